/// Wizard state management
///
/// One variant per step, each carrying only what that step shows. Serial
/// numbers and verification results are carried forward between variants.

use super::steps::WizardStep;
use crate::order::{OrderReceipt, OrderSubmission};
use crate::validation::{SerialErrors, ShippingErrors};
use crate::verification::VerificationResult;

/// Wizard state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    /// Step 1: editable serial rows, never fewer than one
    CollectSerials {
        serial_numbers: Vec<String>,
        errors: SerialErrors,
        /// A verification request is outstanding
        is_loading: bool,
    },

    /// Step 2: results line up 1:1 with `serial_numbers`
    ReviewVerification {
        serial_numbers: Vec<String>,
        results: Vec<VerificationResult>,
    },

    /// Step 3: shipping form; the draft itself lives on the session
    CollectShipping {
        serial_numbers: Vec<String>,
        results: Vec<VerificationResult>,
        errors: ShippingErrors,
    },

    /// Order accepted by the sink
    Submitted {
        order: OrderSubmission,
        receipt: OrderReceipt,
    },
}

impl WizardState {
    /// Create a new wizard state (fresh start with one empty row)
    pub fn new() -> Self {
        WizardState::CollectSerials {
            serial_numbers: vec![String::new()],
            errors: SerialErrors::default(),
            is_loading: false,
        }
    }

    /// Get current step
    pub fn current_step(&self) -> WizardStep {
        match self {
            WizardState::CollectSerials { .. } => WizardStep::CollectSerials,
            WizardState::ReviewVerification { .. } => WizardStep::ReviewVerification,
            WizardState::CollectShipping { .. } => WizardStep::CollectShipping,
            WizardState::Submitted { .. } => WizardStep::Complete,
        }
    }

    pub fn serial_numbers(&self) -> &[String] {
        match self {
            WizardState::CollectSerials { serial_numbers, .. }
            | WizardState::ReviewVerification { serial_numbers, .. }
            | WizardState::CollectShipping { serial_numbers, .. } => serial_numbers,
            WizardState::Submitted { order, .. } => &order.serial_numbers,
        }
    }

    /// Verification results; empty while collecting serials
    pub fn verification_results(&self) -> &[VerificationResult] {
        match self {
            WizardState::CollectSerials { .. } => &[],
            WizardState::ReviewVerification { results, .. }
            | WizardState::CollectShipping { results, .. } => results,
            WizardState::Submitted { order, .. } => &order.verification_results,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, WizardState::CollectSerials { is_loading: true, .. })
    }

    /// Check if wizard is completed
    pub fn is_completed(&self) -> bool {
        matches!(self, WizardState::Submitted { .. })
    }

    pub fn serial_errors(&self) -> Option<&SerialErrors> {
        match self {
            WizardState::CollectSerials { errors, .. } => Some(errors),
            _ => None,
        }
    }

    pub fn shipping_errors(&self) -> Option<&ShippingErrors> {
        match self {
            WizardState::CollectShipping { errors, .. } => Some(errors),
            _ => None,
        }
    }

    pub fn receipt(&self) -> Option<&OrderReceipt> {
        match self {
            WizardState::Submitted { receipt, .. } => Some(receipt),
            _ => None,
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::ShippingInfo;

    #[test]
    fn test_new_wizard_state() {
        let state = WizardState::new();
        assert_eq!(state.current_step(), WizardStep::CollectSerials);
        assert_eq!(state.serial_numbers(), &[String::new()]);
        assert!(state.verification_results().is_empty());
        assert!(!state.is_loading());
        assert!(!state.is_completed());
        assert!(state.serial_errors().is_some_and(SerialErrors::is_empty));
    }

    #[test]
    fn test_loading_only_in_first_step() {
        let state = WizardState::CollectSerials {
            serial_numbers: vec!["AB-123456".into()],
            errors: SerialErrors::default(),
            is_loading: true,
        };
        assert!(state.is_loading());

        let state = WizardState::ReviewVerification {
            serial_numbers: vec!["AB-123456".into()],
            results: Vec::new(),
        };
        assert!(!state.is_loading());
        assert_eq!(state.current_step(), WizardStep::ReviewVerification);
    }

    #[test]
    fn test_submitted_state() {
        let state = WizardState::Submitted {
            order: OrderSubmission {
                serial_numbers: vec!["AB-123456".into()],
                verification_results: Vec::new(),
                shipping: ShippingInfo::default(),
            },
            receipt: OrderReceipt {
                reference: "ORD-TEST".into(),
                item_count: 1,
            },
        };
        assert!(state.is_completed());
        assert_eq!(state.current_step(), WizardStep::Complete);
        assert_eq!(state.serial_numbers().len(), 1);
        assert_eq!(state.receipt().map(|r| r.reference.as_str()), Some("ORD-TEST"));
        assert!(state.shipping_errors().is_none());
    }
}
