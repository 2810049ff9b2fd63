/// Wizard flow management
///
/// [`WizardController`] owns one session: the step state, the shipping
/// draft, the pending verification request and the last notice. Every user
/// action goes through it; a transition either fully applies or leaves the
/// state untouched.

use std::mem;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::state::WizardState;
use super::steps::WizardStep;
use crate::error::{VerificationError, WizardError};
use crate::messaging::{EventBus, WizardEvent};
use crate::order::{OrderReceipt, OrderSink, OrderSubmission, ShippingField, ShippingInfo};
use crate::serial::format_serial;
use crate::validation::{validate_serials, validate_shipping, SerialErrors, ShippingErrors};
use crate::verification::{spawn_verification, PendingVerification, RetryPolicy, SerialVerifier, VerificationResult};

pub const VERIFICATION_FAILED_NOTICE: &str = "Error verifying serial numbers. Please try again.";
pub const SUBMISSION_FAILED_NOTICE: &str = "Error submitting order. Please try again.";

/// Result of a `submit` action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Serial numbers passed validation and were sent for verification
    VerificationStarted,

    /// A verification request is already outstanding; nothing was done
    AlreadyVerifying,

    /// Field errors were recorded; the step did not change
    Invalid,

    /// The order sink refused the order; a notice was raised
    SubmissionFailed,

    /// The order was accepted
    Submitted(OrderReceipt),
}

/// Applied verification outcome, returned by the polling calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationUpdate {
    /// Results are in; now on the review step
    Verified { count: usize },

    /// Still on the serial step with input intact
    Failed(VerificationError),
}

/// Wizard controller
pub struct WizardController {
    state: WizardState,
    shipping: ShippingInfo,
    notice: Option<String>,
    pending: Option<PendingVerification>,
    /// Request left running by `reset`; blocks new requests until it settles
    abandoned: Option<PendingVerification>,
    verifier: Arc<dyn SerialVerifier>,
    order_sink: Arc<dyn OrderSink>,
    retry_policy: RetryPolicy,
    events: EventBus,
}

impl WizardController {
    /// Create a controller for a fresh session
    pub fn new(verifier: Arc<dyn SerialVerifier>, order_sink: Arc<dyn OrderSink>) -> Self {
        Self {
            state: WizardState::new(),
            shipping: ShippingInfo::default(),
            notice: None,
            pending: None,
            abandoned: None,
            verifier,
            order_sink,
            retry_policy: RetryPolicy::default(),
            events: EventBus::new(),
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Publish on `events` instead of a private bus
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Get wizard state
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Get current step
    pub fn current_step(&self) -> WizardStep {
        self.state.current_step()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Check if wizard is completed
    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    pub fn serial_numbers(&self) -> &[String] {
        self.state.serial_numbers()
    }

    pub fn verification_results(&self) -> &[VerificationResult] {
        self.state.verification_results()
    }

    /// Shipping draft, kept across back/continue
    pub fn shipping(&self) -> &ShippingInfo {
        &self.shipping
    }

    /// Blocking message waiting for acknowledgement
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn acknowledge_notice(&mut self) {
        self.notice = None;
    }

    /// Replace row `index` with the formatted form of `raw`
    pub fn edit_serial(&mut self, index: usize, raw: &str) -> Result<&str, WizardError> {
        let (serial_numbers, errors) = self.editable_serials("edit serial numbers")?;
        let slot = serial_numbers
            .get_mut(index)
            .ok_or(WizardError::RowOutOfRange(index))?;

        let formatted = format_serial(raw, slot);
        debug!(index, "Serial edited: {:?} -> {:?}", raw, formatted);
        *slot = formatted;

        revalidate_serials(serial_numbers, errors);
        Ok(serial_numbers[index].as_str())
    }

    /// Append an empty serial row; returns the new row count
    pub fn add_serial_row(&mut self) -> Result<usize, WizardError> {
        let (serial_numbers, errors) = self.editable_serials("add serial numbers")?;
        serial_numbers.push(String::new());
        revalidate_serials(serial_numbers, errors);
        Ok(serial_numbers.len())
    }

    /// Remove row `index`. The first row always stays.
    pub fn remove_serial_row(&mut self, index: usize) -> Result<usize, WizardError> {
        let (serial_numbers, errors) = self.editable_serials("remove serial numbers")?;
        if index == 0 {
            return Err(WizardError::FirstRowLocked);
        }
        if index >= serial_numbers.len() {
            return Err(WizardError::RowOutOfRange(index));
        }

        serial_numbers.remove(index);
        revalidate_serials(serial_numbers, errors);
        Ok(serial_numbers.len())
    }

    /// Update one field of the shipping draft
    pub fn set_shipping_field(
        &mut self,
        field: ShippingField,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        if self.is_completed() {
            return Err(WizardError::Completed);
        }

        self.shipping.set(field, value);
        if let WizardState::CollectShipping { errors, .. } = &mut self.state {
            if !errors.is_empty() {
                *errors = validate_shipping(&self.shipping).err().unwrap_or_default();
            }
        }
        Ok(())
    }

    /// Submit the current step
    pub fn submit(&mut self) -> Result<SubmitOutcome, WizardError> {
        match self.current_step() {
            WizardStep::CollectSerials => Ok(self.submit_serials()),
            WizardStep::CollectShipping => Ok(self.submit_order()),
            WizardStep::ReviewVerification => Err(WizardError::InvalidAction {
                action: "submit",
                step: WizardStep::ReviewVerification,
            }),
            WizardStep::Complete => Err(WizardError::Completed),
        }
    }

    fn submit_serials(&mut self) -> SubmitOutcome {
        let WizardState::CollectSerials {
            serial_numbers,
            errors,
            is_loading,
        } = &mut self.state
        else {
            return SubmitOutcome::Invalid;
        };

        if *is_loading || self.pending.is_some() {
            debug!("Submit ignored: verification already running");
            return SubmitOutcome::AlreadyVerifying;
        }
        if self
            .abandoned
            .as_ref()
            .is_some_and(|abandoned| abandoned.try_finish().is_none())
        {
            debug!("Submit ignored: an abandoned verification is still running");
            return SubmitOutcome::AlreadyVerifying;
        }
        self.abandoned = None;

        if let Err(found) = validate_serials(serial_numbers) {
            let error_count = found.rows.len() + usize::from(found.collection.is_some());
            warn!(error_count, "Serial numbers failed validation");
            *errors = found;
            self.events.publish(WizardEvent::ValidationFailed {
                step: WizardStep::CollectSerials,
                error_count,
            });
            return SubmitOutcome::Invalid;
        }

        *errors = SerialErrors::default();
        *is_loading = true;
        self.notice = None;
        let count = serial_numbers.len();
        self.pending = Some(spawn_verification(
            Arc::clone(&self.verifier),
            serial_numbers.clone(),
            self.retry_policy,
        ));

        self.events.publish(WizardEvent::VerificationStarted { count });
        SubmitOutcome::VerificationStarted
    }

    fn submit_order(&mut self) -> SubmitOutcome {
        let WizardState::CollectShipping {
            serial_numbers,
            results,
            errors,
        } = &mut self.state
        else {
            return SubmitOutcome::Invalid;
        };

        if let Err(found) = validate_shipping(&self.shipping) {
            warn!(error_count = found.len(), "Shipping information failed validation");
            self.events.publish(WizardEvent::ValidationFailed {
                step: WizardStep::CollectShipping,
                error_count: found.len(),
            });
            *errors = found;
            return SubmitOutcome::Invalid;
        }
        *errors = ShippingErrors::new();
        self.notice = None;

        let order = OrderSubmission {
            serial_numbers: serial_numbers.clone(),
            verification_results: results.clone(),
            shipping: self.shipping.clone(),
        };

        match self.order_sink.submit(&order) {
            Ok(receipt) => {
                info!(reference = %receipt.reference, "Order submitted");
                self.events.publish(WizardEvent::OrderSubmitted {
                    reference: receipt.reference.clone(),
                    item_count: receipt.item_count,
                });
                self.state = WizardState::Submitted {
                    order,
                    receipt: receipt.clone(),
                };
                self.publish_step(WizardStep::CollectShipping, WizardStep::Complete);
                SubmitOutcome::Submitted(receipt)
            }
            Err(e) => {
                error!("Order submission failed: {}", e);
                self.raise_notice(SUBMISSION_FAILED_NOTICE);
                SubmitOutcome::SubmissionFailed
            }
        }
    }

    /// Apply a finished verification, if any, without blocking
    pub fn poll_verification(&mut self) -> Option<VerificationUpdate> {
        let outcome = self.pending.as_ref()?.try_finish()?;
        Some(self.finish_verification(outcome))
    }

    /// Block up to `timeout` for the outstanding verification and apply it
    pub fn wait_for_verification(&mut self, timeout: Duration) -> Option<VerificationUpdate> {
        let outcome = self.pending.as_ref()?.wait(timeout)?;
        Some(self.finish_verification(outcome))
    }

    fn finish_verification(
        &mut self,
        outcome: Result<Vec<VerificationResult>, VerificationError>,
    ) -> VerificationUpdate {
        let Some(pending) = self.pending.take() else {
            return VerificationUpdate::Failed(VerificationError::WorkerDisconnected);
        };

        match outcome {
            Ok(results) => {
                let count = results.len();
                info!(count, elapsed_ms = pending.elapsed().as_millis() as u64, "Serial numbers verified");
                self.events.publish(WizardEvent::VerificationCompleted {
                    count,
                    elapsed: pending.elapsed(),
                });
                self.state = WizardState::ReviewVerification {
                    serial_numbers: pending.serial_numbers().to_vec(),
                    results,
                };
                self.publish_step(WizardStep::CollectSerials, WizardStep::ReviewVerification);
                VerificationUpdate::Verified { count }
            }
            Err(e) => {
                error!("Error verifying serial numbers: {}", e);
                if let WizardState::CollectSerials { is_loading, .. } = &mut self.state {
                    *is_loading = false;
                }
                self.events.publish(WizardEvent::VerificationFailed {
                    message: e.to_string(),
                });
                self.raise_notice(VERIFICATION_FAILED_NOTICE);
                VerificationUpdate::Failed(e)
            }
        }
    }

    /// Navigate to previous step
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let from = self.current_step();
        let next = match &mut self.state {
            WizardState::ReviewVerification { serial_numbers, .. } => WizardState::CollectSerials {
                serial_numbers: mem::take(serial_numbers),
                errors: SerialErrors::default(),
                is_loading: false,
            },
            WizardState::CollectShipping {
                serial_numbers,
                results,
                ..
            } => WizardState::ReviewVerification {
                serial_numbers: mem::take(serial_numbers),
                results: mem::take(results),
            },
            WizardState::CollectSerials { .. } => {
                return Err(WizardError::InvalidAction {
                    action: "go back",
                    step: from,
                })
            }
            WizardState::Submitted { .. } => return Err(WizardError::Completed),
        };

        self.state = next;
        let to = self.current_step();
        self.publish_step(from, to);
        Ok(to)
    }

    /// Move from the review step to shipping. The review is informational,
    /// so nothing is re-checked.
    pub fn continue_to_shipping(&mut self) -> Result<WizardStep, WizardError> {
        let from = self.current_step();
        let WizardState::ReviewVerification {
            serial_numbers,
            results,
        } = &mut self.state
        else {
            return Err(if from == WizardStep::Complete {
                WizardError::Completed
            } else {
                WizardError::InvalidAction {
                    action: "continue",
                    step: from,
                }
            });
        };

        let invalid = results.iter().filter(|r| !r.product.status.is_valid()).count();
        if invalid > 0 {
            warn!(invalid, "Continuing with products not reported as valid");
        }

        self.state = WizardState::CollectShipping {
            serial_numbers: mem::take(serial_numbers),
            results: mem::take(results),
            errors: ShippingErrors::new(),
        };
        self.publish_step(from, WizardStep::CollectShipping);
        Ok(WizardStep::CollectShipping)
    }

    /// Discard the session and start over. An outstanding verification is
    /// abandoned; no new one starts until it has finished.
    pub fn reset(&mut self) {
        self.state = WizardState::new();
        self.shipping = ShippingInfo::default();
        self.notice = None;
        if let Some(pending) = self.pending.take() {
            warn!("Abandoning verification of {} serial number(s)", pending.serial_numbers().len());
            self.abandoned = Some(pending);
        }
        info!("Wizard session reset");
        self.events.publish(WizardEvent::SessionReset);
    }

    fn editable_serials(
        &mut self,
        action: &'static str,
    ) -> Result<(&mut Vec<String>, &mut SerialErrors), WizardError> {
        match &mut self.state {
            WizardState::CollectSerials { is_loading: true, .. } => Err(WizardError::Busy),
            WizardState::CollectSerials {
                serial_numbers,
                errors,
                ..
            } => Ok((serial_numbers, errors)),
            WizardState::Submitted { .. } => Err(WizardError::Completed),
            other => Err(WizardError::InvalidAction {
                action,
                step: other.current_step(),
            }),
        }
    }

    fn raise_notice(&mut self, message: &str) {
        self.notice = Some(message.to_string());
        self.events.publish(WizardEvent::NoticeRaised {
            message: message.to_string(),
        });
    }

    fn publish_step(&self, from: WizardStep, to: WizardStep) {
        info!("Wizard step: {} -> {}", from, to);
        self.events.publish(WizardEvent::StepChanged { from, to });
    }
}

/// Once errors are showing, keep them in sync with every edit
fn revalidate_serials(serial_numbers: &[String], errors: &mut SerialErrors) {
    if !errors.is_empty() {
        *errors = validate_serials(serial_numbers).err().unwrap_or_default();
    }
}
