//! Shipping address type.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when an address field name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown address field: {0} (expected street, city, state, pincode or phone)")]
pub struct UnknownAddressField(pub String);

/// One of the five editable address fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Street,
    City,
    State,
    Pincode,
    Phone,
}

impl AddressField {
    /// All fields in form order.
    pub const ALL: [Self; 5] = [
        Self::Street,
        Self::City,
        Self::State,
        Self::Pincode,
        Self::Phone,
    ];

    /// The field's form name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::Pincode => "pincode",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressField {
    type Err = UnknownAddressField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownAddressField(s.to_owned()))
    }
}

/// A shipping address as entered on the checkout form.
///
/// All fields are free text. Stored verbatim (untrimmed) in local storage as
/// a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: String,
}

impl ShippingAddress {
    /// Get a field value.
    #[must_use]
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Street => &self.street,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Pincode => &self.pincode,
            AddressField::Phone => &self.phone,
        }
    }

    /// Replace a field value.
    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        let slot = match field {
            AddressField::Street => &mut self.street,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::Pincode => &mut self.pincode,
            AddressField::Phone => &mut self.phone,
        };
        *slot = value.into();
    }

    /// Fields that are empty or whitespace-only.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<AddressField> {
        AddressField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    /// An address is complete when every field has non-whitespace content.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Single-line form sent to the remote API: fields joined by `", "`.
    #[must_use]
    pub fn flatten(&self) -> String {
        AddressField::ALL
            .into_iter()
            .map(|field| self.get(field))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
