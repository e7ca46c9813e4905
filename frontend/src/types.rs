//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Field Schema** - The known extracted fields, in display order
//! - **Result Types** - The canonical extraction result
//! - **Error Types** - Extraction client errors

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Field Schema
// =============================================================================

/// A field the backend knows how to extract.
///
/// The declaration order of [`FieldKey::ALL`] is the display order. Adding or
/// removing a backend field means changing this list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKey {
    CustomerName,
    Profession,
    Location,
    InsuranceType,
    CoverageAmount,
    Deductible,
    InsuranceYear,
    BrokerName,
    BrokerEmail,
    BrokerPhone,
}

impl FieldKey {
    /// Every known field, in schema order.
    pub const ALL: [FieldKey; 10] = [
        FieldKey::CustomerName,
        FieldKey::Profession,
        FieldKey::Location,
        FieldKey::InsuranceType,
        FieldKey::CoverageAmount,
        FieldKey::Deductible,
        FieldKey::InsuranceYear,
        FieldKey::BrokerName,
        FieldKey::BrokerEmail,
        FieldKey::BrokerPhone,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::CustomerName => "customer_name",
            FieldKey::Profession => "profession",
            FieldKey::Location => "location",
            FieldKey::InsuranceType => "insurance_type",
            FieldKey::CoverageAmount => "coverage_amount",
            FieldKey::Deductible => "deductible",
            FieldKey::InsuranceYear => "insurance_year",
            FieldKey::BrokerName => "broker_name",
            FieldKey::BrokerEmail => "broker_email",
            FieldKey::BrokerPhone => "broker_phone",
        }
    }

    /// Look up a field by its wire name.
    pub fn from_wire(name: &str) -> Option<FieldKey> {
        FieldKey::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Display label, e.g. `broker_phone` -> `Broker Phone`.
    pub fn label(&self) -> String {
        humanize_key(self.as_str())
    }
}

/// Replace underscores with spaces and capitalize each word.
pub fn humanize_key(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

// =============================================================================
// Result Types
// =============================================================================

/// An extracted value. The backend sends text for most fields and a number
/// for the policy year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(number) => write!(f, "{}", number),
        }
    }
}

/// Extracted fields, one slot per [`FieldKey`] in schema order.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedFields {
    entries: Vec<(FieldKey, Option<FieldValue>)>,
}

impl ExtractedFields {
    /// Fill every known field from `lookup`.
    pub fn from_lookup(mut lookup: impl FnMut(FieldKey) -> Option<FieldValue>) -> Self {
        Self {
            entries: FieldKey::ALL.into_iter().map(|key| (key, lookup(key))).collect(),
        }
    }

    /// Slots holding a value, in schema order.
    pub fn present(&self) -> impl Iterator<Item = (FieldKey, &FieldValue)> + '_ {
        self.entries
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (*key, v)))
    }
}

/// How the backend classified the inquiry.
#[derive(Clone, Debug, PartialEq)]
pub enum Classification {
    /// Free-text label (flat schema).
    Label(String),
    /// Risk-type taxonomy entry (risk-typed schema).
    RiskType {
        code: Option<String>,
        name: Option<String>,
    },
}

/// Canonical extraction result, independent of the wire shape.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractionResult {
    /// Message sender
    pub sender: String,
    /// Message subject
    pub subject: String,
    /// `None` when the backend could not classify the inquiry
    pub classification: Option<Classification>,
    /// Extracted fields in schema order
    pub fields: ExtractedFields,
    /// Original message body, unmodified
    pub raw_body: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Extraction client errors.
///
/// The `Display` output is what the user sees; the UI makes no other
/// distinction between kinds.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ExtractionError {
    /// No response was received.
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Upload failed ({status}): {body}")]
    Http { status: u16, body: String },

    /// Success status, but the body is not a valid result.
    #[error("Invalid response from server: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ExtractionError {
    fn from(e: serde_json::Error) -> Self {
        ExtractionError::Decode(e.to_string())
    }
}

/// Result type alias for extraction client operations.
pub type ClientResult<T> = Result<T, ExtractionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(FieldKey::BrokerPhone.label(), "Broker Phone");
        assert_eq!(FieldKey::CustomerName.label(), "Customer Name");
        assert_eq!(FieldKey::Deductible.label(), "Deductible");
        assert_eq!(humanize_key("policy_start_year"), "Policy Start Year");
    }

    #[test]
    fn test_wire_names_round_trip() {
        for key in FieldKey::ALL {
            assert_eq!(FieldKey::from_wire(key.as_str()), Some(key));
        }
        assert_eq!(FieldKey::from_wire("favourite_colour"), None);
    }

    #[test]
    fn test_present_keeps_schema_order() {
        let fields = ExtractedFields::from_lookup(|key| match key {
            FieldKey::BrokerPhone => Some(FieldValue::Text("+41 44 000 00 00".to_string())),
            FieldKey::CustomerName => Some(FieldValue::Text("Jane Doe".to_string())),
            _ => None,
        });

        let keys: Vec<FieldKey> = fields.present().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![FieldKey::CustomerName, FieldKey::BrokerPhone]);
        assert!(fields.present().all(|(key, _)| key != FieldKey::Deductible));
    }

    #[test]
    fn test_field_value_deserialization() {
        let text: FieldValue = serde_json::from_str(r#""CHF 5000""#).unwrap();
        assert_eq!(text.to_string(), "CHF 5000");

        let year: FieldValue = serde_json::from_str("2025").unwrap();
        assert_eq!(year.to_string(), "2025");

        assert!(serde_json::from_str::<FieldValue>("true").is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = ExtractionError::Http {
            status: 500,
            body: "server error".to_string(),
        };
        assert_eq!(err.to_string(), "Upload failed (500): server error");

        let err = ExtractionError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = ExtractionError::Decode("missing field `sender`".to_string());
        assert_eq!(err.to_string(), "Invalid response from server: missing field `sender`");
    }
}
