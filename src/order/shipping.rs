//! Shipping information collected in the last wizard step

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Shipping form values. Optional fields are empty strings when not given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub street_address: String,
    pub street_address2: String,
    pub city: String,
    /// Region code from [`crate::regions::STATES`]
    pub state: String,
    pub zip_code: String,
}

impl ShippingInfo {
    pub fn get(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::Email => &self.email,
            ShippingField::FirstName => &self.first_name,
            ShippingField::LastName => &self.last_name,
            ShippingField::CompanyName => &self.company_name,
            ShippingField::StreetAddress => &self.street_address,
            ShippingField::StreetAddress2 => &self.street_address2,
            ShippingField::City => &self.city,
            ShippingField::State => &self.state,
            ShippingField::ZipCode => &self.zip_code,
        }
    }

    pub fn set(&mut self, field: ShippingField, value: impl Into<String>) {
        let slot = match field {
            ShippingField::Email => &mut self.email,
            ShippingField::FirstName => &mut self.first_name,
            ShippingField::LastName => &mut self.last_name,
            ShippingField::CompanyName => &mut self.company_name,
            ShippingField::StreetAddress => &mut self.street_address,
            ShippingField::StreetAddress2 => &mut self.street_address2,
            ShippingField::City => &mut self.city,
            ShippingField::State => &mut self.state,
            ShippingField::ZipCode => &mut self.zip_code,
        };
        *slot = value.into();
    }
}

/// Shipping form field identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShippingField {
    Email,
    FirstName,
    LastName,
    CompanyName,
    StreetAddress,
    StreetAddress2,
    City,
    State,
    ZipCode,
}

impl ShippingField {
    /// Fields in form order
    pub const ALL: [ShippingField; 9] = [
        ShippingField::Email,
        ShippingField::FirstName,
        ShippingField::LastName,
        ShippingField::CompanyName,
        ShippingField::StreetAddress,
        ShippingField::StreetAddress2,
        ShippingField::City,
        ShippingField::State,
        ShippingField::ZipCode,
    ];

    /// Form key, matching the serialized field name
    pub fn key(self) -> &'static str {
        match self {
            ShippingField::Email => "email",
            ShippingField::FirstName => "firstName",
            ShippingField::LastName => "lastName",
            ShippingField::CompanyName => "companyName",
            ShippingField::StreetAddress => "streetAddress",
            ShippingField::StreetAddress2 => "streetAddress2",
            ShippingField::City => "city",
            ShippingField::State => "state",
            ShippingField::ZipCode => "zipCode",
        }
    }

    /// Label shown next to the input
    pub fn label(self) -> &'static str {
        match self {
            ShippingField::Email => "Email Address",
            ShippingField::FirstName => "First Name",
            ShippingField::LastName => "Last Name",
            ShippingField::CompanyName => "Company Name (Optional)",
            ShippingField::StreetAddress => "Street Address",
            ShippingField::StreetAddress2 => "Street Address 2 (Optional)",
            ShippingField::City => "City",
            ShippingField::State => "State",
            ShippingField::ZipCode => "ZIP Code",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(
            self,
            ShippingField::CompanyName | ShippingField::StreetAddress2
        )
    }
}

impl std::fmt::Display for ShippingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Parses a form key; case, `_` and `-` are ignored so `zip_code` and
/// `ZIPCODE` both resolve to [`ShippingField::ZipCode`].
impl FromStr for ShippingField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        ShippingField::ALL
            .into_iter()
            .find(|field| field.key().to_lowercase() == wanted)
            .ok_or_else(|| format!("Unknown shipping field: {s}"))
    }
}
