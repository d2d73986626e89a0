//! Directions tool.
//!
//! Each route is reported by its first leg only: a multi-waypoint route
//! loses the distance, duration and steps of every later leg.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::TravelMode;
use crate::domains::maps::{Endpoint, QueryParams};
use crate::domains::tools::{MapsOperation, ToolError};

/// Parameters for directions requests.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DirectionsParams {
    /// Starting point address or coordinates.
    #[schemars(description = "Starting point address or coordinates")]
    pub origin: String,

    /// Ending point address or coordinates.
    #[schemars(description = "Ending point address or coordinates")]
    pub destination: String,

    /// Travel mode (upstream default: driving).
    #[schemars(description = "Travel mode (driving, walking, bicycling, transit)")]
    #[serde(default)]
    pub mode: Option<TravelMode>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DirectionsPayload {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
pub struct Route {
    pub summary: Option<String>,
    #[serde(default)]
    pub legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
pub struct Leg {
    pub distance: Option<Value>,
    pub duration: Option<Value>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct Step {
    pub html_instructions: Option<String>,
    pub distance: Option<Value>,
    pub duration: Option<Value>,
    pub travel_mode: Option<String>,
}

/// Structured output for directions.
#[derive(Debug, Clone, Serialize)]
pub struct DirectionsResult {
    pub routes: Vec<RouteSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
    pub steps: Vec<StepSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_mode: Option<String>,
}

impl From<Step> for StepSummary {
    fn from(s: Step) -> Self {
        Self {
            instructions: s.html_instructions,
            distance: s.distance,
            duration: s.duration,
            travel_mode: s.travel_mode,
        }
    }
}

impl TryFrom<Route> for RouteSummary {
    type Error = ToolError;

    fn try_from(route: Route) -> Result<Self, ToolError> {
        let leg = route
            .legs
            .into_iter()
            .next()
            .ok_or_else(|| ToolError::malformed("route has no legs"))?;

        Ok(Self {
            summary: route.summary,
            distance: leg.distance,
            duration: leg.duration,
            steps: leg.steps.into_iter().map(StepSummary::from).collect(),
        })
    }
}

/// Directions tool.
#[derive(Debug, Clone)]
pub struct DirectionsTool;

impl MapsOperation for DirectionsTool {
    const NAME: &'static str = "maps_directions";
    const DESCRIPTION: &'static str = "Get directions between two points";
    const ENDPOINT: Endpoint = Endpoint::Directions;
    const FAILURE_PREFIX: &'static str = "Directions request failed";

    type Params = DirectionsParams;
    type Payload = DirectionsPayload;
    type Output = DirectionsResult;

    fn query(params: &DirectionsParams) -> QueryParams {
        QueryParams::new()
            .push("origin", &params.origin)
            .push("destination", &params.destination)
            .push_opt("mode", params.mode)
    }

    fn project(payload: DirectionsPayload) -> Result<DirectionsResult, ToolError> {
        let routes = payload
            .routes
            .into_iter()
            .map(RouteSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DirectionsResult { routes })
    }
}
