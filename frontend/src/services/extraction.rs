//! HTTP client for the extraction backend.
//!
//! Sends one email file as `multipart/form-data` and normalizes whichever
//! response shape the backend speaks into an [`ExtractionResult`].

use std::collections::BTreeMap;

use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::Value;
use web_sys::{File, FormData};

use crate::config::{ClientConfig, SchemaVersion};
use crate::types::{
    Classification, ClientResult, ExtractedFields, ExtractionError, ExtractionResult, FieldKey,
    FieldValue,
};

// =============================================================================
// Wire shapes
// =============================================================================

/// Flat response: free-text classification and an open field map.
#[derive(Debug, Clone, Deserialize)]
pub struct FlatWire {
    pub sender: String,
    pub subject: String,
    pub classification: Option<String>,
    pub extracted_fields: BTreeMap<String, Option<FieldValue>>,
    #[serde(default)]
    pub raw_body: String,
}

/// Risk-typed response: taxonomy code/name and a typed data record.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskTypedWire {
    pub sender: String,
    pub subject: String,
    pub risk_type_code: Option<String>,
    pub risk_type_name: Option<String>,
    pub data: InquiryData,
    #[serde(default)]
    pub raw_body: String,
}

/// Typed `data` record of the risk-typed response.
#[derive(Debug, Clone, Deserialize)]
pub struct InquiryData {
    pub customer_name: Option<String>,
    pub profession: Option<String>,
    pub location: Option<String>,
    pub insurance_type: Option<String>,
    pub coverage_amount: Option<String>,
    pub deductible: Option<String>,
    pub insurance_year: Option<i64>,
    pub broker_name: Option<String>,
    pub broker_email: Option<String>,
    pub broker_phone: Option<String>,
    /// Keys this client does not know about
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

impl InquiryData {
    fn value(&self, key: FieldKey) -> Option<FieldValue> {
        let text = |v: &Option<String>| v.clone().map(FieldValue::Text);
        match key {
            FieldKey::CustomerName => text(&self.customer_name),
            FieldKey::Profession => text(&self.profession),
            FieldKey::Location => text(&self.location),
            FieldKey::InsuranceType => text(&self.insurance_type),
            FieldKey::CoverageAmount => text(&self.coverage_amount),
            FieldKey::Deductible => text(&self.deductible),
            FieldKey::InsuranceYear => self.insurance_year.map(|y| FieldValue::Number(y.into())),
            FieldKey::BrokerName => text(&self.broker_name),
            FieldKey::BrokerEmail => text(&self.broker_email),
            FieldKey::BrokerPhone => text(&self.broker_phone),
        }
    }
}

/// A decoded response body, tagged by shape.
#[derive(Debug, Clone)]
pub enum WireResult {
    Flat(FlatWire),
    RiskTyped(RiskTypedWire),
}

impl WireResult {
    /// Parse a success body using the configured schema.
    pub fn parse(body: &str, schema: SchemaVersion) -> ClientResult<Self> {
        let value: Value = serde_json::from_str(body)?;
        let schema = match schema {
            SchemaVersion::Auto => detect_schema(&value)?,
            fixed => fixed,
        };

        match schema {
            SchemaVersion::RiskTyped => Ok(WireResult::RiskTyped(serde_json::from_value(value)?)),
            _ => Ok(WireResult::Flat(serde_json::from_value(value)?)),
        }
    }

    /// Field names in the body that are not part of [`FieldKey::ALL`].
    pub fn unknown_fields(&self) -> Vec<&str> {
        match self {
            WireResult::Flat(wire) => wire
                .extracted_fields
                .keys()
                .filter(|name| FieldKey::from_wire(name).is_none())
                .map(String::as_str)
                .collect(),
            WireResult::RiskTyped(wire) => wire.data.unknown.keys().map(String::as_str).collect(),
        }
    }

    /// Normalize into the canonical model.
    pub fn into_result(self) -> ExtractionResult {
        for name in self.unknown_fields() {
            log::warn!("Dropping unknown extracted field '{}'", name);
        }

        match self {
            WireResult::Flat(wire) => {
                let mut fields = wire.extracted_fields;
                ExtractionResult {
                    sender: wire.sender,
                    subject: wire.subject,
                    classification: wire
                        .classification
                        .filter(|label| !label.trim().is_empty())
                        .map(Classification::Label),
                    fields: ExtractedFields::from_lookup(|key| {
                        fields.remove(key.as_str()).flatten()
                    }),
                    raw_body: wire.raw_body,
                }
            }
            WireResult::RiskTyped(wire) => {
                let classification = match (wire.risk_type_code, wire.risk_type_name) {
                    (None, None) => None,
                    (code, name) => Some(Classification::RiskType { code, name }),
                };
                ExtractionResult {
                    sender: wire.sender,
                    subject: wire.subject,
                    classification,
                    fields: ExtractedFields::from_lookup(|key| wire.data.value(key)),
                    raw_body: wire.raw_body,
                }
            }
        }
    }
}

/// Pick a shape from the keys present in the body.
fn detect_schema(value: &Value) -> ClientResult<SchemaVersion> {
    let object = value
        .as_object()
        .ok_or_else(|| ExtractionError::Decode("expected a JSON object".to_string()))?;

    if ["data", "risk_type_code", "risk_type_name"]
        .iter()
        .any(|key| object.contains_key(*key))
    {
        Ok(SchemaVersion::RiskTyped)
    } else if ["extracted_fields", "classification"]
        .iter()
        .any(|key| object.contains_key(*key))
    {
        Ok(SchemaVersion::Flat)
    } else {
        Err(ExtractionError::Decode(
            "response matches neither known schema".to_string(),
        ))
    }
}

/// Decode a success body into the canonical model.
pub fn decode_response(body: &str, schema: SchemaVersion) -> ClientResult<ExtractionResult> {
    WireResult::parse(body, schema).map(WireResult::into_result)
}

// =============================================================================
// Request
// =============================================================================

/// Upload one email file to the extraction endpoint.
///
/// Exactly one request is sent; nothing is retried.
pub async fn submit_file(file: &File, config: &ClientConfig) -> ClientResult<ExtractionResult> {
    let form_data = FormData::new()
        .map_err(|e| ExtractionError::Transport(format!("Failed to create FormData: {:?}", e)))?;

    form_data
        .append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| ExtractionError::Transport(format!("Failed to append file: {:?}", e)))?;

    let request = Request::post(&config.upload_endpoint)
        .body(form_data)
        .map_err(|e| ExtractionError::Transport(format!("Failed to build request: {}", e)))?;

    let response = request
        .send()
        .await
        .map_err(|e| ExtractionError::Transport(e.to_string()))?;

    if !response.ok() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ExtractionError::Http {
            status: response.status(),
            body,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ExtractionError::Transport(format!("Failed to read response: {}", e)))?;

    decode_response(&body, config.schema)
}
