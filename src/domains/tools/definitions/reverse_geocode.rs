//! Reverse geocoding tool: coordinates -> address.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domains::maps::{Endpoint, LatLng, QueryParams};
use crate::domains::tools::{MapsOperation, ToolError};

/// Parameters for reverse geocoding.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReverseGeocodeParams {
    /// Latitude coordinate.
    #[serde(alias = "lat")]
    #[schemars(description = "Latitude coordinate")]
    pub latitude: f64,

    /// Longitude coordinate.
    #[serde(alias = "lng")]
    #[schemars(description = "Longitude coordinate")]
    pub longitude: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReverseGeocodePayload {
    #[serde(default)]
    pub results: Vec<AddressCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct AddressCandidate {
    pub formatted_address: Option<String>,
    pub place_id: Option<String>,
    pub address_components: Option<Value>,
}

/// Structured output for a reverse-geocoded location.
#[derive(Debug, Clone, Serialize)]
pub struct ReverseGeocodeResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_components: Option<Value>,
}

/// Reverse geocoding tool.
#[derive(Debug, Clone)]
pub struct ReverseGeocodeTool;

impl MapsOperation for ReverseGeocodeTool {
    const NAME: &'static str = "maps_reverse_geocode";
    const DESCRIPTION: &'static str = "Convert coordinates into an address";
    const ENDPOINT: Endpoint = Endpoint::Geocode;
    const FAILURE_PREFIX: &'static str = "Reverse geocoding failed";

    type Params = ReverseGeocodeParams;
    type Payload = ReverseGeocodePayload;
    type Output = ReverseGeocodeResult;

    fn query(params: &ReverseGeocodeParams) -> QueryParams {
        QueryParams::new().push("latlng", LatLng::new(params.latitude, params.longitude))
    }

    /// Only the first candidate is used.
    fn project(payload: ReverseGeocodePayload) -> Result<ReverseGeocodeResult, ToolError> {
        let first = payload
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ToolError::malformed("no results returned"))?;

        Ok(ReverseGeocodeResult {
            formatted_address: first.formatted_address,
            place_id: first.place_id,
            address_components: first.address_components,
        })
    }
}
