use regex::Regex;
use std::sync::OnceLock;

use super::FieldErrors;

pub const FORMAT_MESSAGE: &str = "Must be format XX-XXXXXX";
pub const REQUIRED_MESSAGE: &str = "Required";
pub const COLLECTION_MESSAGE: &str = "At least one serial number is required";

fn serial_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z0-9]{2}-[A-Z0-9]{6}$").expect("serial pattern compiles"))
}

/// Whether `serial` is in canonical `XX-XXXXXX` form
pub fn is_canonical_serial(serial: &str) -> bool {
    serial_pattern().is_match(serial)
}

/// Serial list errors: one optional collection-level message plus
/// per-row messages keyed by row index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerialErrors {
    pub collection: Option<String>,
    pub rows: FieldErrors<usize>,
}

impl SerialErrors {
    pub fn is_empty(&self) -> bool {
        self.collection.is_none() && self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&str> {
        self.rows.get(&index)
    }
}

/// Validate the serial number list submitted from step 1
pub fn validate_serials(serial_numbers: &[String]) -> Result<(), SerialErrors> {
    let mut errors = SerialErrors::default();

    if serial_numbers.is_empty() {
        errors.collection = Some(COLLECTION_MESSAGE.to_string());
    }

    for (index, serial) in serial_numbers.iter().enumerate() {
        if serial.is_empty() {
            errors.rows.insert(index, REQUIRED_MESSAGE);
        } else if !is_canonical_serial(serial) {
            errors.rows.insert(index, FORMAT_MESSAGE);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_canonical_serial_passes() {
        assert!(validate_serials(&list(&["AB-123456"])).is_ok());
        assert!(validate_serials(&list(&["AB-123456", "9Z-ZZZZZZ"])).is_ok());
    }

    #[test]
    fn test_shape_violations() {
        for bad in ["ab-123456", "AB123456", "AB-12345", "AB-1234567", "A-1234567", " AB-123456"] {
            let errors = validate_serials(&list(&[bad])).unwrap_err();
            assert_eq!(errors.row(0), Some(FORMAT_MESSAGE), "{bad:?}");
            assert!(errors.collection.is_none());
        }
    }

    #[test]
    fn test_errors_are_per_row() {
        let errors = validate_serials(&list(&["AB-123456", "bad", "CD-000000", ""])).unwrap_err();
        assert_eq!(errors.rows.len(), 2);
        assert_eq!(errors.row(1), Some(FORMAT_MESSAGE));
        assert_eq!(errors.row(3), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.row(0), None);
    }

    #[test]
    fn test_empty_collection() {
        let errors = validate_serials(&[]).unwrap_err();
        assert_eq!(errors.collection.as_deref(), Some(COLLECTION_MESSAGE));
        assert!(errors.rows.is_empty());
    }
}
