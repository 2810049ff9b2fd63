/// Command executor
///
/// Applies front-end commands to the wizard controller. The controller
/// publishes events for whatever actually changed.

use tracing::{debug, info};

use super::commands::{Command, CommandResult, USAGE};
use crate::error::WizardError;
use crate::regions;
use crate::wizard::{SubmitOutcome, VerificationUpdate, WizardController};

/// Command executor owning one wizard session
pub struct CommandExecutor {
    controller: WizardController,
}

impl CommandExecutor {
    pub fn new(controller: WizardController) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut WizardController {
        &mut self.controller
    }

    /// Execute a command immediately
    pub fn execute(&mut self, command: Command) -> CommandResult {
        debug!("Executing command: {}", command.description());

        match command {
            Command::EditSerial { index, raw } => {
                into_result(self.controller.edit_serial(index, &raw).map(|_| ()))
            }
            Command::AddSerial => into_result(self.controller.add_serial_row().map(|_| ())),
            Command::RemoveSerial { index } => {
                into_result(self.controller.remove_serial_row(index).map(|_| ()))
            }
            Command::SetShippingField { field, value } => {
                into_result(self.controller.set_shipping_field(field, value))
            }
            Command::Submit => match self.controller.submit() {
                Ok(SubmitOutcome::VerificationStarted) => {
                    CommandResult::SuccessWithValue("Verifying...".to_string())
                }
                Ok(SubmitOutcome::AlreadyVerifying) => {
                    CommandResult::SuccessWithValue("Verification already in progress".to_string())
                }
                Ok(SubmitOutcome::Invalid) => {
                    CommandResult::Error("Please correct the highlighted fields".to_string())
                }
                Ok(SubmitOutcome::SubmissionFailed) => CommandResult::Success,
                Ok(SubmitOutcome::Submitted(receipt)) => {
                    info!(reference = %receipt.reference, "Order confirmed");
                    CommandResult::SuccessWithValue(format!("Order {} submitted", receipt.reference))
                }
                Err(e) => CommandResult::Error(e.to_string()),
            },
            Command::Back => into_result(self.controller.back().map(|_| ())),
            Command::Continue => into_result(self.controller.continue_to_shipping().map(|_| ())),
            Command::Refresh => match self.controller.poll_verification() {
                Some(VerificationUpdate::Verified { count }) => {
                    CommandResult::SuccessWithValue(format!("{count} serial number(s) verified"))
                }
                Some(VerificationUpdate::Failed(_)) | None => CommandResult::Success,
            },
            Command::Acknowledge => {
                self.controller.acknowledge_notice();
                CommandResult::Success
            }
            Command::ListStates => CommandResult::SuccessWithValue(
                regions::STATES
                    .iter()
                    .map(|region| format!("{}  {}", region.code, region.name))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Command::NewOrder => {
                if self.controller.is_completed() {
                    self.controller.reset();
                    CommandResult::Success
                } else {
                    CommandResult::Error("Finish or quit the current order first".to_string())
                }
            }
            Command::Help => CommandResult::SuccessWithValue(USAGE.to_string()),
            Command::Quit => {
                info!("Quit command received");
                CommandResult::Success
            }
        }
    }
}

fn into_result(result: Result<(), WizardError>) -> CommandResult {
    match result {
        Ok(()) => CommandResult::Success,
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::MemoryOrderSink;
    use crate::verification::SimulatedVerifier;
    use crate::wizard::WizardStep;
    use std::sync::Arc;
    use std::time::Duration;

    fn executor() -> CommandExecutor {
        CommandExecutor::new(WizardController::new(
            Arc::new(SimulatedVerifier::new(Duration::ZERO)),
            Arc::new(MemoryOrderSink::new()),
        ))
    }

    fn run(executor: &mut CommandExecutor, line: &str) -> CommandResult {
        executor.execute(Command::parse(line).unwrap())
    }

    #[test]
    fn test_edit_and_submit() {
        let mut executor = executor();
        assert_eq!(run(&mut executor, "set 1 ab123456"), CommandResult::Success);
        assert_eq!(executor.controller().serial_numbers(), &["AB-123456".to_string()]);

        assert_eq!(
            run(&mut executor, "submit"),
            CommandResult::SuccessWithValue("Verifying...".to_string())
        );
        executor
            .controller_mut()
            .wait_for_verification(Duration::from_secs(5))
            .unwrap();
        assert_eq!(executor.controller().current_step(), WizardStep::ReviewVerification);
    }

    #[test]
    fn test_invalid_submit_reports_error() {
        let mut executor = executor();
        assert!(matches!(run(&mut executor, "submit"), CommandResult::Error(_)));
    }

    #[test]
    fn test_wizard_errors_become_messages() {
        let mut executor = executor();
        assert_eq!(
            run(&mut executor, "remove 1"),
            CommandResult::Error("The first serial number row cannot be removed".to_string())
        );
        assert_eq!(
            run(&mut executor, "new"),
            CommandResult::Error("Finish or quit the current order first".to_string())
        );
    }

    #[test]
    fn test_list_states() {
        let mut executor = executor();
        let CommandResult::SuccessWithValue(listing) = run(&mut executor, "states") else {
            panic!("expected a listing");
        };
        assert_eq!(listing.lines().count(), regions::STATES.len());
        assert!(listing.starts_with("AL  Alabama"));
    }
}
