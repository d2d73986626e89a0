//! Shapes shared by every Maps API response.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status value the Maps API uses for a successful call.
pub const STATUS_OK: &str = "OK";

/// Status fields present on every Maps endpoint response.
///
/// Endpoint-specific fields are decoded separately and only for OK
/// responses, so a rejection never fails on the shape of a partial payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub status: String,

    #[serde(default)]
    pub error_message: Option<String>,
}

impl Envelope {
    /// Read the status fields out of a response body.
    pub fn from_body(body: &serde_json::Value) -> serde_json::Result<Self> {
        Self::deserialize(body)
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Text describing a rejection: the upstream message when present, else the raw status.
    pub fn rejection_reason(&self) -> String {
        match self.error_message.as_deref() {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => self.status.clone(),
        }
    }
}

/// A coordinate pair as the Maps API spells it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Query-string form: `<lat>,<lng>`.
impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_latlng_display() {
        assert_eq!(LatLng::new(1.5, 2.5).to_string(), "1.5,2.5");
        assert_eq!(LatLng::new(-33.8688, 151.2093).to_string(), "-33.8688,151.2093");
    }

    #[test]
    fn test_envelope_without_payload_fields() {
        let body = json!({"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."});
        let envelope = Envelope::from_body(&body).unwrap();
        assert!(!envelope.is_ok());
        assert_eq!(envelope.rejection_reason(), "The provided API key is invalid.");
    }

    #[test]
    fn test_envelope_ignores_payload_shape() {
        let body = json!({
            "status": "INVALID_REQUEST",
            "error_message": "Invalid request.",
            "results": [{"elevation": "n/a"}]
        });
        let envelope = Envelope::from_body(&body).unwrap();
        assert_eq!(envelope.rejection_reason(), "Invalid request.");
    }

    #[test]
    fn test_rejection_reason_falls_back_to_status() {
        let envelope = Envelope::from_body(&json!({"status": "ZERO_RESULTS"})).unwrap();
        assert_eq!(envelope.rejection_reason(), "ZERO_RESULTS");

        let envelope =
            Envelope::from_body(&json!({"status": "INVALID_REQUEST", "error_message": ""})).unwrap();
        assert_eq!(envelope.rejection_reason(), "INVALID_REQUEST");
    }

    #[test]
    fn test_envelope_requires_status() {
        assert!(Envelope::from_body(&json!({"results": []})).is_err());
    }
}
