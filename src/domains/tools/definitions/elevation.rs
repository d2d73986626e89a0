//! Elevation tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::Coordinates;
use crate::domains::maps::{Endpoint, LatLng, QueryParams};
use crate::domains::tools::{MapsOperation, ToolError};

/// Parameters for elevation lookups.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ElevationParams {
    /// Locations to get elevation for.
    #[schemars(description = "Array of locations to get elevation for")]
    pub locations: Vec<Coordinates>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ElevationPayload {
    #[serde(default)]
    pub results: Vec<ElevationSample>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ElevationSample {
    pub elevation: f64,
    pub location: LatLng,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f64>,
}

/// Structured output for elevation samples.
#[derive(Debug, Clone, Serialize)]
pub struct ElevationResult {
    pub results: Vec<ElevationSample>,
}

/// Elevation tool.
#[derive(Debug, Clone)]
pub struct ElevationTool;

impl MapsOperation for ElevationTool {
    const NAME: &'static str = "maps_elevation";
    const DESCRIPTION: &'static str = "Get elevation data for locations on the earth";
    const ENDPOINT: Endpoint = Endpoint::Elevation;
    const FAILURE_PREFIX: &'static str = "Elevation request failed";

    type Params = ElevationParams;
    type Payload = ElevationPayload;
    type Output = ElevationResult;

    fn query(params: &ElevationParams) -> QueryParams {
        QueryParams::new().push_joined(
            "locations",
            params.locations.iter().copied().map(LatLng::from),
        )
    }

    fn project(payload: ElevationPayload) -> Result<ElevationResult, ToolError> {
        Ok(ElevationResult {
            results: payload.results,
        })
    }
}
