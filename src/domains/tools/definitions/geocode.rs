//! Geocoding tool: address -> coordinates.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::maps::{Endpoint, Geometry, LatLng, QueryParams};
use crate::domains::tools::{MapsOperation, ToolError};

/// Parameters for geocoding.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GeocodeParams {
    /// The address to geocode.
    #[schemars(description = "The address to geocode")]
    pub address: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeocodePayload {
    #[serde(default)]
    pub results: Vec<GeocodeCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeCandidate {
    pub geometry: Option<Geometry>,
    pub formatted_address: Option<String>,
    pub place_id: Option<String>,
}

/// Structured output for a geocoded address.
#[derive(Debug, Clone, Serialize)]
pub struct GeocodeResult {
    pub location: LatLng,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

/// Geocoding tool.
#[derive(Debug, Clone)]
pub struct GeocodeTool;

impl MapsOperation for GeocodeTool {
    const NAME: &'static str = "maps_geocode";
    const DESCRIPTION: &'static str = "Convert an address into geographic coordinates";
    const ENDPOINT: Endpoint = Endpoint::Geocode;
    const FAILURE_PREFIX: &'static str = "Geocoding failed";

    type Params = GeocodeParams;
    type Payload = GeocodePayload;
    type Output = GeocodeResult;

    fn query(params: &GeocodeParams) -> QueryParams {
        QueryParams::new().push("address", &params.address)
    }

    /// Only the first candidate is used.
    fn project(payload: GeocodePayload) -> Result<GeocodeResult, ToolError> {
        let first = payload
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ToolError::malformed("no results returned"))?;

        let location = first
            .geometry
            .map(|g| g.location)
            .ok_or_else(|| ToolError::malformed("result has no location"))?;

        Ok(GeocodeResult {
            location,
            formatted_address: first.formatted_address,
            place_id: first.place_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::dispatch;
    use crate::domains::tools::testing::{StubUpstream, json_of, text_of};
    use serde_json::json;

    fn params(address: &str) -> GeocodeParams {
        GeocodeParams {
            address: address.to_string(),
        }
    }

    #[tokio::test]
    async fn test_geocode_projection() {
        let upstream = StubUpstream::ok(json!({
            "results": [{
                "address_components": [{"long_name": "1600", "short_name": "1600", "types": ["street_number"]}],
                "formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA",
                "geometry": {
                    "location": {"lat": 37.4224764, "lng": -122.0842499},
                    "location_type": "ROOFTOP"
                },
                "place_id": "ChIJ2eUgeAK6j4ARbn5u_wAGqWA",
                "types": ["street_address"]
            }]
        }));

        let result =
            dispatch::<GeocodeTool>(&upstream, params("1600 Amphitheatre Parkway")).await;

        assert_eq!(
            json_of(&result),
            json!({
                "location": {"lat": 37.4224764, "lng": -122.0842499},
                "formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA",
                "place_id": "ChIJ2eUgeAK6j4ARbn5u_wAGqWA"
            })
        );
        assert_eq!(upstream.last_endpoint(), Some(Endpoint::Geocode));
        assert_eq!(
            upstream.last_query().unwrap().get("address"),
            Some("1600 Amphitheatre Parkway")
        );
    }

    #[tokio::test]
    async fn test_geocode_uses_first_result_only() {
        let upstream = StubUpstream::ok(json!({
            "results": [
                {
                    "formatted_address": "Springfield, IL, USA",
                    "geometry": {"location": {"lat": 39.78, "lng": -89.65}},
                    "place_id": "first"
                },
                {
                    "formatted_address": "Springfield, MO, USA",
                    "geometry": {"location": {"lat": 37.21, "lng": -93.29}},
                    "place_id": "second"
                }
            ]
        }));

        let output = json_of(&dispatch::<GeocodeTool>(&upstream, params("Springfield")).await);
        assert_eq!(output["place_id"], "first");
        assert_eq!(output["location"], json!({"lat": 39.78, "lng": -89.65}));
    }

    #[tokio::test]
    async fn test_geocode_rejection_uses_error_message() {
        let upstream = StubUpstream::new(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        }));

        let result = dispatch::<GeocodeTool>(&upstream, params("anywhere")).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "Geocoding failed: The provided API key is invalid."
        );
    }

    #[tokio::test]
    async fn test_geocode_rejection_uses_status() {
        let upstream = StubUpstream::new(json!({"status": "ZERO_RESULTS", "results": []}));

        let result = dispatch::<GeocodeTool>(&upstream, params("zzzz")).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Geocoding failed: ZERO_RESULTS");
    }

    #[tokio::test]
    async fn test_geocode_ok_without_results() {
        let upstream = StubUpstream::ok(json!({"results": []}));

        let result = dispatch::<GeocodeTool>(&upstream, params("zzzz")).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Geocoding failed: no results returned");
    }

    #[tokio::test]
    async fn test_geocode_transport_failure() {
        let upstream = StubUpstream::unreachable();

        let result = dispatch::<GeocodeTool>(&upstream, params("anywhere")).await;
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Geocoding failed: request error"));
    }

    #[tokio::test]
    async fn test_geocode_body_without_status() {
        let upstream = StubUpstream::new(json!({"results": []}));

        let result = dispatch::<GeocodeTool>(&upstream, params("anywhere")).await;
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Geocoding failed: invalid response body"));
    }
}
