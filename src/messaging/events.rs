/// Event types for the wizard
///
/// Events represent things that have happened (past tense).
/// They are broadcast to all subscribers.
use std::time::Duration;

use crate::wizard::WizardStep;

/// Wizard events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// The wizard moved between steps
    StepChanged { from: WizardStep, to: WizardStep },

    /// A submit was refused because of field errors
    ValidationFailed { step: WizardStep, error_count: usize },

    /// Serial numbers were sent for verification
    VerificationStarted { count: usize },

    /// Verification finished and produced results
    VerificationCompleted { count: usize, elapsed: Duration },

    /// Verification failed; input is kept for a retry
    VerificationFailed { message: String },

    /// The order sink accepted the order
    OrderSubmitted { reference: String, item_count: usize },

    /// A blocking message the user has to acknowledge
    NoticeRaised { message: String },

    /// The session was discarded and restarted
    SessionReset,
}

impl WizardEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            WizardEvent::StepChanged { from, to } => {
                format!("Step changed: {} -> {}", from, to)
            }
            WizardEvent::ValidationFailed { step, error_count } => {
                format!("{} has {} invalid field(s)", step, error_count)
            }
            WizardEvent::VerificationStarted { count } => {
                format!("Verifying {} serial number(s)", count)
            }
            WizardEvent::VerificationCompleted { count, elapsed } => {
                format!("Verified {} serial number(s) in {} ms", count, elapsed.as_millis())
            }
            WizardEvent::VerificationFailed { message } => {
                format!("Verification failed: {}", message)
            }
            WizardEvent::OrderSubmitted { reference, .. } => {
                format!("Order submitted: {}", reference)
            }
            WizardEvent::NoticeRaised { message } => message.clone(),
            WizardEvent::SessionReset => "Session reset".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_description() {
        let event = WizardEvent::StepChanged {
            from: WizardStep::CollectSerials,
            to: WizardStep::ReviewVerification,
        };
        assert_eq!(
            event.description(),
            "Step changed: Enter Serial Numbers -> Verify Products"
        );

        let event = WizardEvent::VerificationCompleted {
            count: 2,
            elapsed: Duration::from_millis(1003),
        };
        assert_eq!(event.description(), "Verified 2 serial number(s) in 1003 ms");
    }
}
