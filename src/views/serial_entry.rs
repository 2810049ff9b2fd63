use std::fmt::Write;

use crate::wizard::WizardController;

const PLACEHOLDER: &str = "XX-XXXXXX";

/// Serial entry screen: one numbered row per serial, with inline errors
pub fn render(wizard: &WizardController) -> String {
    let mut out = String::new();
    let errors = wizard.state().serial_errors();

    if let Some(message) = errors.and_then(|e| e.collection.as_deref()) {
        let _ = writeln!(out, "  ! {message}");
    }

    for (index, serial) in wizard.serial_numbers().iter().enumerate() {
        let shown = if serial.is_empty() { PLACEHOLDER } else { serial };
        let remove = if index > 0 { "   [remove]" } else { "" };
        let _ = writeln!(out, "  {:>2}. {}{}", index + 1, shown, remove);

        if let Some(message) = errors.and_then(|e| e.row(index)) {
            let _ = writeln!(out, "      ! {message}");
        }
    }

    out.push_str("\n  [add] Add Serial Number\n");
    if wizard.is_loading() {
        out.push_str("  Verifying...\n");
    } else {
        out.push_str("  [submit] Verify Serial Numbers\n");
    }
    out
}
