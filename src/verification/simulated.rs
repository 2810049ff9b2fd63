use rand::Rng;
use std::thread;
use std::time::Duration;
use tracing::debug;

use super::{Product, ProductStatus, SerialVerifier, VerificationResult};
use crate::error::VerificationError;

/// Stand-in for the product catalog lookup.
///
/// Waits `delay`, then reports every serial as a valid sample product. With a
/// non-zero `failure_rate` a request fails with that probability instead.
#[derive(Debug, Clone)]
pub struct SimulatedVerifier {
    delay: Duration,
    failure_rate: f64,
}

impl SimulatedVerifier {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure_rate: 0.0,
        }
    }

    /// Probability (clamped to 0.0-1.0) that a request fails
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = failure_rate.clamp(0.0, 1.0);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedVerifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

impl SerialVerifier for SimulatedVerifier {
    fn verify(&self, serial_numbers: &[String]) -> Result<Vec<VerificationResult>, VerificationError> {
        debug!(count = serial_numbers.len(), delay_ms = self.delay.as_millis() as u64, "Simulating catalog lookup");
        thread::sleep(self.delay);

        if self.failure_rate > 0.0 && rand::thread_rng().gen_bool(self.failure_rate) {
            return Err(VerificationError::Unavailable(
                "simulated catalog outage".to_string(),
            ));
        }

        Ok(serial_numbers
            .iter()
            .map(|serial| VerificationResult {
                serial_number: serial.clone(),
                product: Product {
                    name: format!("Product for {serial}"),
                    description: "Sample product description".to_string(),
                    status: ProductStatus::Valid,
                },
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::check_alignment;

    #[test]
    fn test_echoes_serials_in_order() {
        let verifier = SimulatedVerifier::new(Duration::ZERO);
        let serials = vec!["ZZ-999999".to_string(), "AB-123456".to_string()];

        let results = verifier.verify(&serials).unwrap();
        assert!(check_alignment(&serials, &results).is_ok());
        assert_eq!(results[1].product.name, "Product for AB-123456");
        assert!(results.iter().all(|r| r.product.status.is_valid()));
    }

    #[test]
    fn test_certain_failure() {
        let verifier = SimulatedVerifier::new(Duration::ZERO).with_failure_rate(1.0);
        let err = verifier.verify(&["AB-123456".to_string()]).unwrap_err();
        assert!(matches!(err, VerificationError::Unavailable(_)));
    }

    #[test]
    fn test_failure_rate_is_clamped() {
        let verifier = SimulatedVerifier::new(Duration::ZERO).with_failure_rate(7.5);
        assert!(verifier.verify(&["AB-123456".to_string()]).is_err());

        let verifier = SimulatedVerifier::new(Duration::ZERO).with_failure_rate(-1.0);
        assert!(verifier.verify(&["AB-123456".to_string()]).is_ok());
    }
}
