//! Distance matrix tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::TravelMode;
use crate::domains::maps::{Endpoint, QueryParams};
use crate::domains::tools::{MapsOperation, ToolError};

/// Parameters for distance matrix requests.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DistanceMatrixParams {
    /// Origin addresses or coordinates.
    #[schemars(description = "Array of origin addresses or coordinates")]
    pub origins: Vec<String>,

    /// Destination addresses or coordinates.
    #[schemars(description = "Array of destination addresses or coordinates")]
    pub destinations: Vec<String>,

    /// Travel mode (upstream default: driving).
    #[schemars(description = "Travel mode (driving, walking, bicycling, transit)")]
    #[serde(default)]
    pub mode: Option<TravelMode>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DistanceMatrixPayload {
    #[serde(default)]
    pub origin_addresses: Vec<String>,
    #[serde(default)]
    pub destination_addresses: Vec<String>,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct MatrixElement {
    #[serde(default)]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Value>,
}

/// Structured output for a distance matrix.
#[derive(Debug, Clone, Serialize)]
pub struct DistanceMatrixResult {
    pub origin_addresses: Vec<String>,
    pub destination_addresses: Vec<String>,
    pub results: Vec<MatrixRowResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixRowResult {
    pub elements: Vec<MatrixElement>,
}

/// Distance matrix tool.
#[derive(Debug, Clone)]
pub struct DistanceMatrixTool;

impl MapsOperation for DistanceMatrixTool {
    const NAME: &'static str = "maps_distance_matrix";
    const DESCRIPTION: &'static str =
        "Calculate travel distance and time for multiple origins and destinations";
    const ENDPOINT: Endpoint = Endpoint::DistanceMatrix;
    const FAILURE_PREFIX: &'static str = "Distance matrix request failed";

    type Params = DistanceMatrixParams;
    type Payload = DistanceMatrixPayload;
    type Output = DistanceMatrixResult;

    fn query(params: &DistanceMatrixParams) -> QueryParams {
        QueryParams::new()
            .push_joined("origins", &params.origins)
            .push_joined("destinations", &params.destinations)
            .push_opt("mode", params.mode)
    }

    fn project(payload: DistanceMatrixPayload) -> Result<DistanceMatrixResult, ToolError> {
        Ok(DistanceMatrixResult {
            origin_addresses: payload.origin_addresses,
            destination_addresses: payload.destination_addresses,
            results: payload
                .rows
                .into_iter()
                .map(|row| MatrixRowResult {
                    elements: row.elements,
                })
                .collect(),
        })
    }
}
