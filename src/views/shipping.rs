use std::fmt::Write;

use crate::order::ShippingField;
use crate::regions;
use crate::wizard::WizardController;

/// Shipping form screen: every field with its current value and error
pub fn render(wizard: &WizardController) -> String {
    let mut out = String::new();
    let info = wizard.shipping();
    let errors = wizard.state().shipping_errors();

    for field in ShippingField::ALL {
        let value = info.get(field);
        let required = if field.is_required() { " *" } else { "" };

        let shown = match field {
            ShippingField::State if value.is_empty() => "Select a state".to_string(),
            ShippingField::State => match regions::display_name(value) {
                Some(name) => format!("{value} ({name})"),
                None => value.to_string(),
            },
            _ => value.to_string(),
        };

        let _ = writeln!(out, "  {}{} [{}]: {}", field.label(), required, field.key(), shown);
        if let Some(message) = errors.and_then(|e| e.get(&field)) {
            let _ = writeln!(out, "      ! {message}");
        }
    }

    out.push_str("\n  [back] Back   [submit] Submit Order   ('states' lists state codes)\n");
    out
}
