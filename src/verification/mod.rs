/// Serial number verification
///
/// ## Architecture
///
/// ```text
/// WizardController ── spawn_verification ──> worker thread
///        ▲                                       │  attempt 1..=max_retries+1
///        │                                       ▼
///        └──── PendingVerification <──── SerialVerifier::verify
///              (crossbeam channel)        (timeout per attempt)
/// ```
///
/// The controller owns at most one [`PendingVerification`] at a time and
/// polls it from the UI loop.

pub mod simulated;
pub mod worker;

pub use simulated::SimulatedVerifier;
pub use worker::{spawn_verification, PendingVerification, RetryPolicy};

use serde::{Deserialize, Serialize};

use crate::error::VerificationError;

/// Catalog status reported for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    Valid,
    Invalid,
}

impl ProductStatus {
    pub fn is_valid(self) -> bool {
        matches!(self, ProductStatus::Valid)
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Valid => write!(f, "Valid"),
            ProductStatus::Invalid => write!(f, "Invalid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub description: String,
    pub status: ProductStatus,
}

/// Catalog answer for one submitted serial number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub serial_number: String,
    pub product: Product,
}

/// Looks up serial numbers in a product catalog.
///
/// Runs on the verification worker thread and may block. Must return one
/// result per input serial, in input order.
pub trait SerialVerifier: Send + Sync {
    fn verify(&self, serial_numbers: &[String]) -> Result<Vec<VerificationResult>, VerificationError>;
}

/// Check that `results` line up 1:1 with `serial_numbers`
pub fn check_alignment(
    serial_numbers: &[String],
    results: &[VerificationResult],
) -> Result<(), VerificationError> {
    if results.len() != serial_numbers.len() {
        return Err(VerificationError::Mismatch {
            expected: serial_numbers.len(),
            actual: results.len(),
        });
    }

    match serial_numbers
        .iter()
        .zip(results)
        .position(|(serial, result)| *serial != result.serial_number)
    {
        Some(index) => Err(VerificationError::OutOfOrder { index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(serial: &str) -> VerificationResult {
        VerificationResult {
            serial_number: serial.to_string(),
            product: Product {
                name: format!("Product for {serial}"),
                description: "Sample product description".to_string(),
                status: ProductStatus::Valid,
            },
        }
    }

    #[test]
    fn test_alignment_accepts_matching_order() {
        let serials = vec!["AB-123456".to_string(), "CD-000001".to_string()];
        let results = vec![result("AB-123456"), result("CD-000001")];
        assert_eq!(check_alignment(&serials, &results), Ok(()));
    }

    #[test]
    fn test_alignment_rejects_count_mismatch() {
        let serials = vec!["AB-123456".to_string(), "CD-000001".to_string()];
        let results = vec![result("AB-123456")];
        assert_eq!(
            check_alignment(&serials, &results),
            Err(VerificationError::Mismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_alignment_rejects_reordering() {
        let serials = vec!["AB-123456".to_string(), "CD-000001".to_string()];
        let results = vec![result("CD-000001"), result("AB-123456")];
        assert_eq!(
            check_alignment(&serials, &results),
            Err(VerificationError::OutOfOrder { index: 0 })
        );
    }

    #[test]
    fn test_result_wire_shape() {
        let json = serde_json::to_value(result("AB-123456")).unwrap();
        assert_eq!(json["serialNumber"], "AB-123456");
        assert_eq!(json["product"]["status"], "Valid");
        assert_eq!(json["product"]["name"], "Product for AB-123456");
    }
}
