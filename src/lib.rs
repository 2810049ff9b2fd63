//! Serial number order intake
//!
//! A three-step order wizard: collect product serial numbers, verify them
//! against a catalog, then collect shipping information and submit the order.

pub mod config;
pub mod error;
pub mod messaging;
pub mod order;
pub mod regions;
pub mod serial;
pub mod validation;
pub mod verification;
pub mod views;
pub mod wizard;

pub use config::Config;
pub use error::{AppResult, ConfigError, SubmissionError, VerificationError, WizardError};
pub use wizard::{WizardController, WizardState, WizardStep};
