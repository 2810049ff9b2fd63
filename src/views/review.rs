use std::fmt::Write;

use crate::verification::VerificationResult;

/// Verification review screen: one card per result
pub fn render(results: &[VerificationResult]) -> String {
    let mut out = String::new();

    for item in results {
        let _ = writeln!(out, "  Serial Number: {}", item.serial_number);
        let _ = writeln!(out, "  Product: {}", item.product.name);
        let _ = writeln!(out, "  {}", item.product.description);
        let marker = if item.product.status.is_valid() { "ok" } else { "!!" };
        let _ = writeln!(out, "  Status: {} [{}]", item.product.status, marker);
        out.push('\n');
    }

    out.push_str("  [back] Back to Editing   [continue] Continue to Shipping\n");
    out
}
