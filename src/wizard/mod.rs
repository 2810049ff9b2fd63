/// Order intake wizard module
///
/// Drives one order session from serial entry to submission.
///
/// ## Architecture
///
/// ```text
/// WizardController
///   ├── WizardState (tagged by step: serials, review, shipping, submitted)
///   ├── WizardStep (enum of all steps)
///   ├── ShippingInfo draft (carried across steps)
///   └── Actions (edit/add/remove rows, submit, back, continue, reset)
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// use serial_order_intake::wizard::{WizardController, WizardStep};
///
/// let mut wizard = WizardController::new(verifier, order_sink);
/// wizard.edit_serial(0, "ab123456")?;       // stored as "AB-123456"
/// wizard.submit()?;                         // starts verification
///
/// // From the UI loop
/// if let Some(update) = wizard.poll_verification() {
///     // now on WizardStep::ReviewVerification, or a notice to show
/// }
/// ```
///
/// ## Steps
///
/// 1. **CollectSerials** - Enter and verify serial numbers
/// 2. **ReviewVerification** - Review what the catalog returned
/// 3. **CollectShipping** - Enter the shipping address and submit
/// 4. **Complete** - Order handed to the order sink

pub mod steps;
pub mod state;
pub mod flow;

// Re-export commonly used types
pub use steps::WizardStep;
pub use state::WizardState;
pub use flow::{
    SubmitOutcome, VerificationUpdate, WizardController, SUBMISSION_FAILED_NOTICE,
    VERIFICATION_FAILED_NOTICE,
};
