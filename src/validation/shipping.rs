use regex::Regex;
use std::sync::OnceLock;

use super::FieldErrors;
use crate::order::{ShippingField, ShippingInfo};
use crate::regions;

pub type ShippingErrors = FieldErrors<ShippingField>;

/// Content constraint applied after the required and length checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Email,
    PersonName,
    RegionCode,
    ZipCode,
}

/// Declarative constraints for one shipping field
#[derive(Debug, Clone, Copy)]
struct FieldRule {
    field: ShippingField,
    /// Subject used in messages, e.g. "First name"
    subject: &'static str,
    required: bool,
    max_len: Option<usize>,
    pattern: Option<Pattern>,
}

const fn rule(
    field: ShippingField,
    subject: &'static str,
    required: bool,
    max_len: Option<usize>,
    pattern: Option<Pattern>,
) -> FieldRule {
    FieldRule {
        field,
        subject,
        required,
        max_len,
        pattern,
    }
}

const RULES: [FieldRule; 9] = [
    rule(ShippingField::Email, "Email", true, None, Some(Pattern::Email)),
    rule(ShippingField::FirstName, "First name", true, Some(50), Some(Pattern::PersonName)),
    rule(ShippingField::LastName, "Last name", true, Some(50), Some(Pattern::PersonName)),
    rule(ShippingField::CompanyName, "Company name", false, Some(100), None),
    rule(ShippingField::StreetAddress, "Street address", true, Some(100), None),
    rule(ShippingField::StreetAddress2, "Street address 2", false, Some(100), None),
    rule(ShippingField::City, "City", true, Some(50), Some(Pattern::PersonName)),
    rule(ShippingField::State, "State", true, None, Some(Pattern::RegionCode)),
    rule(ShippingField::ZipCode, "ZIP code", true, None, Some(Pattern::ZipCode)),
];

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        )
        .expect("email pattern compiles")
    })
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z\s'-]+$").expect("name pattern compiles"))
}

fn zip_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("zip pattern compiles"))
}

impl Pattern {
    fn matches(self, value: &str) -> bool {
        match self {
            Pattern::Email => email_pattern().is_match(value),
            Pattern::PersonName => name_pattern().is_match(value),
            Pattern::RegionCode => regions::is_known_code(value),
            Pattern::ZipCode => zip_pattern().is_match(value),
        }
    }

    fn message(self, subject: &str) -> String {
        match self {
            Pattern::Email => "Invalid email address".to_string(),
            Pattern::PersonName => {
                format!("{subject} can only contain letters, spaces, hyphens, and apostrophes")
            }
            Pattern::RegionCode => format!("{subject} must be a valid state code"),
            Pattern::ZipCode => {
                "ZIP code must be 5 digits or 5+4 format (e.g., 12345 or 12345-6789)".to_string()
            }
        }
    }
}

impl FieldRule {
    /// First failing constraint, checked as required, then length, then pattern
    fn check(&self, value: &str) -> Option<String> {
        if value.is_empty() {
            return self
                .required
                .then(|| format!("{} is required", self.subject));
        }

        if let Some(max) = self.max_len {
            if value.chars().count() > max {
                return Some(format!("{} must be {} characters or less", self.subject, max));
            }
        }

        self.pattern
            .filter(|pattern| !pattern.matches(value))
            .map(|pattern| pattern.message(self.subject))
    }
}

/// Validate a single shipping field
pub fn validate_field(field: ShippingField, value: &str) -> Option<String> {
    RULES
        .iter()
        .find(|rule| rule.field == field)
        .and_then(|rule| rule.check(value))
}

/// Validate the shipping form submitted from step 3
pub fn validate_shipping(info: &ShippingInfo) -> Result<(), ShippingErrors> {
    let mut errors = ShippingErrors::new();
    for rule in &RULES {
        if let Some(message) = rule.check(info.get(rule.field)) {
            errors.insert(rule.field, message);
        }
    }
    errors.into_result()
}
