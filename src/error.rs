use thiserror::Error;

use crate::wizard::WizardStep;

/// Application-level errors using thiserror for structured error handling.
///
/// These errors represent domain-specific failures that can occur while a
/// wizard session runs. They provide context and can be chained with anyhow.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Verification service unavailable: {0}")]
    Unavailable(String),

    #[error("Verification attempt {attempt} timed out")]
    Timeout { attempt: u32 },

    #[error("Verification returned {actual} results for {expected} serial numbers")]
    Mismatch { expected: usize, actual: usize },

    #[error("Verification returned results out of order at position {index}")]
    OutOfOrder { index: usize },

    #[error("Verification failed after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<VerificationError>,
    },

    #[error("Verification worker stopped before reporting a result")]
    WorkerDisconnected,
}

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Order rejected: {0}")]
    Rejected(String),

    #[error("Failed to serialize order")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Cannot {action} during step: {step}")]
    InvalidAction {
        action: &'static str,
        step: WizardStep,
    },

    #[error("Serial numbers are being verified")]
    Busy,

    #[error("Serial number row {0} does not exist")]
    RowOutOfRange(usize),

    #[error("The first serial number row cannot be removed")]
    FirstRowLocked,

    #[error("Order has already been submitted")]
    Completed,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine user config directory")]
    NoConfigDir,
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = VerificationError::Timeout { attempt: 2 };
        assert_eq!(err.to_string(), "Verification attempt 2 timed out");

        let err = WizardError::InvalidAction {
            action: "continue",
            step: WizardStep::CollectSerials,
        };
        assert_eq!(
            err.to_string(),
            "Cannot continue during step: Enter Serial Numbers"
        );
    }

    #[test]
    fn test_exhausted_wraps_last_failure() {
        let err = VerificationError::Exhausted {
            attempts: 3,
            last: Box::new(VerificationError::Unavailable("catalog offline".into())),
        };
        assert_eq!(
            err.to_string(),
            "Verification failed after 3 attempts: Verification service unavailable: catalog offline"
        );
    }

    #[test]
    fn test_error_source_chain() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let config_err = ConfigError::LoadFailed {
            path: "/test/config.json".to_string(),
            source: Box::new(io_err),
        };

        assert!(config_err.source().is_some());
        assert_eq!(
            config_err.to_string(),
            "Failed to load configuration from /test/config.json"
        );
    }
}
