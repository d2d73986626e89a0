//! Place details tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domains::maps::{Endpoint, Geometry, LatLng, QueryParams};
use crate::domains::tools::{MapsOperation, ToolError};

/// Parameters for place details.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlaceDetailsParams {
    /// The place ID to get details for.
    #[schemars(description = "The place ID to get details for")]
    pub place_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceDetailsPayload {
    #[serde(default)]
    pub result: Option<PlaceRecord>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceRecord {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
    pub rating: Option<Value>,
    pub reviews: Option<Value>,
    pub opening_hours: Option<Value>,
}

/// Structured output for place details.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceDetailsResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LatLng>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<Value>,
}

/// Place details tool.
#[derive(Debug, Clone)]
pub struct PlaceDetailsTool;

impl MapsOperation for PlaceDetailsTool {
    const NAME: &'static str = "maps_place_details";
    const DESCRIPTION: &'static str = "Get detailed information about a specific place";
    const ENDPOINT: Endpoint = Endpoint::PlaceDetails;
    const FAILURE_PREFIX: &'static str = "Place details request failed";

    type Params = PlaceDetailsParams;
    type Payload = PlaceDetailsPayload;
    type Output = PlaceDetailsResult;

    fn query(params: &PlaceDetailsParams) -> QueryParams {
        QueryParams::new().push("place_id", &params.place_id)
    }

    fn project(payload: PlaceDetailsPayload) -> Result<PlaceDetailsResult, ToolError> {
        let place = payload
            .result
            .ok_or_else(|| ToolError::malformed("response has no result"))?;

        Ok(PlaceDetailsResult {
            name: place.name,
            formatted_address: place.formatted_address,
            location: place.geometry.map(|g| g.location),
            formatted_phone_number: place.formatted_phone_number,
            website: place.website,
            rating: place.rating,
            reviews: place.reviews,
            opening_hours: place.opening_hours,
        })
    }
}
