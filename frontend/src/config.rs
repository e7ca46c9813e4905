//! Application configuration.
//!
//! Centralized configuration for the OfferAssistant frontend.
//! Defaults target a backend on localhost; a packaged build can override
//! them at compile time (see [`ClientConfig::from_build_env`]).

use std::fmt;
use std::str::FromStr;

/// Application name, shown in the page header and title.
pub const APP_NAME: &str = "OfferAssistant";

/// Default extraction endpoint.
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "http://localhost:8000/upload";

/// File suffixes offered by the file picker.
///
/// Only a hint: other files are still sent and the backend decides.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".msg", ".eml"];

/// Badge text when the backend did not classify the inquiry.
pub const UNKNOWN_CLASSIFICATION: &str = "Unknown";

/// Value for the file input's `accept` attribute.
pub fn accept_attribute() -> String {
    ACCEPTED_EXTENSIONS.join(",")
}

// =============================================================================
// Response schema selection
// =============================================================================

/// Which response shape the backend speaks.
///
/// Two shapes are deployed in the wild and neither is authoritative yet:
///
/// - **Flat** - `classification` label + `extracted_fields` map
/// - **RiskTyped** - `risk_type_code` / `risk_type_name` + typed `data` record
///
/// `Auto` inspects each response body and picks the shape from its keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchemaVersion {
    #[default]
    Auto,
    Flat,
    RiskTyped,
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::Auto => write!(f, "auto"),
            SchemaVersion::Flat => write!(f, "flat"),
            SchemaVersion::RiskTyped => write!(f, "risk-typed"),
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SchemaVersion::Auto),
            "flat" | "legacy" => Ok(SchemaVersion::Flat),
            "risk-typed" | "risk_typed" => Ok(SchemaVersion::RiskTyped),
            other => Err(format!("unknown response schema '{}'", other)),
        }
    }
}

// =============================================================================
// Client configuration
// =============================================================================

/// Settings consumed by the extraction client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute URL or path relative to the page origin.
    pub upload_endpoint: String,
    /// Expected response shape.
    pub schema: SchemaVersion,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            upload_endpoint: DEFAULT_UPLOAD_ENDPOINT.to_string(),
            schema: SchemaVersion::Auto,
        }
    }
}

impl ClientConfig {
    /// Build from compile-time overrides.
    ///
    /// - `OFFER_ASSISTANT_UPLOAD_ENDPOINT` - extraction endpoint
    /// - `OFFER_ASSISTANT_SCHEMA` - `auto`, `flat` or `risk-typed`
    pub fn from_build_env() -> Self {
        Self::from_overrides(
            option_env!("OFFER_ASSISTANT_UPLOAD_ENDPOINT"),
            option_env!("OFFER_ASSISTANT_SCHEMA"),
        )
    }

    fn from_overrides(endpoint: Option<&str>, schema: Option<&str>) -> Self {
        let mut config = Self::default();

        if let Some(endpoint) = endpoint.map(str::trim).filter(|e| !e.is_empty()) {
            config.upload_endpoint = endpoint.to_string();
        }

        if let Some(raw) = schema {
            match raw.parse() {
                Ok(schema) => config.schema = schema,
                Err(e) => log::warn!("{}, falling back to auto", e),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_overrides(None, None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.upload_endpoint, "http://localhost:8000/upload");
        assert_eq!(config.schema, SchemaVersion::Auto);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_overrides(Some("/api/upload"), Some("Risk-Typed"));
        assert_eq!(config.upload_endpoint, "/api/upload");
        assert_eq!(config.schema, SchemaVersion::RiskTyped);

        let config = ClientConfig::from_overrides(Some("  "), Some("legacy"));
        assert_eq!(config.upload_endpoint, DEFAULT_UPLOAD_ENDPOINT);
        assert_eq!(config.schema, SchemaVersion::Flat);
    }

    #[test]
    fn test_bad_schema_falls_back_to_auto() {
        let config = ClientConfig::from_overrides(None, Some("v3"));
        assert_eq!(config.schema, SchemaVersion::Auto);
        assert!("v3".parse::<SchemaVersion>().is_err());
    }

    #[test]
    fn test_accept_attribute() {
        assert_eq!(accept_attribute(), ".msg,.eml");
    }
}
