//! Text step views
//!
//! Each view reads the controller and returns the screen for its step as
//! plain text. Views never mutate state; user input goes through
//! [`crate::messaging::CommandExecutor`].

pub mod review;
pub mod serial_entry;
pub mod shipping;

use std::fmt::Write;

use crate::wizard::{WizardController, WizardStep};

/// Render the screen for the controller's current step
pub fn render(wizard: &WizardController) -> String {
    let step = wizard.current_step();
    let mut out = String::new();

    if let Some(notice) = wizard.notice() {
        let _ = writeln!(out, "!! {notice}  (type 'ok' to dismiss)");
        out.push('\n');
    }

    let _ = writeln!(out, "{}", header(step));
    out.push_str(&match step {
        WizardStep::CollectSerials => serial_entry::render(wizard),
        WizardStep::ReviewVerification => review::render(wizard.verification_results()),
        WizardStep::CollectShipping => shipping::render(wizard),
        WizardStep::Complete => render_complete(wizard),
    });
    out
}

fn header(step: WizardStep) -> String {
    let title = if step.is_last() {
        step.title().to_string()
    } else {
        format!("Step {} of {}: {}", step.number(), WizardStep::total_steps(), step.title())
    };
    format!("{title}\n{}\n{}", "=".repeat(title.chars().count()), step.description())
}

fn render_complete(wizard: &WizardController) -> String {
    let mut out = String::new();
    if let Some(receipt) = wizard.state().receipt() {
        let _ = writeln!(out, "Order reference: {}", receipt.reference);
        let _ = writeln!(out, "Items: {}", receipt.item_count);
    }
    out.push_str("\n[new] start another order   [quit] exit\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::MemoryOrderSink;
    use crate::verification::SimulatedVerifier;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_header_shows_progress() {
        assert!(header(WizardStep::ReviewVerification).starts_with("Step 2 of 3: Verify Products\n"));
        assert!(header(WizardStep::Complete).starts_with("Order Submitted\n"));
    }

    #[test]
    fn test_render_dispatches_on_step() {
        let wizard = WizardController::new(
            Arc::new(SimulatedVerifier::new(Duration::ZERO)),
            Arc::new(MemoryOrderSink::new()),
        );
        let screen = render(&wizard);
        assert!(screen.contains("Step 1 of 3: Enter Serial Numbers"));
        assert!(screen.contains("Verify Serial Numbers"));
        assert!(!screen.contains("!!"));
    }
}
