//! Place text search tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::Coordinates;
use crate::domains::maps::{Endpoint, Geometry, LatLng, QueryParams};
use crate::domains::tools::{MapsOperation, ToolError};

/// Radius used when a search is biased to a location without an explicit radius.
pub const DEFAULT_RADIUS_METERS: u32 = 5000;

/// Parameters for place search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchPlacesParams {
    /// Free-text search query.
    #[schemars(description = "Search query")]
    pub query: String,

    /// Optional center point to bias results toward.
    #[schemars(description = "Optional center point for the search")]
    #[serde(default)]
    pub location: Option<Coordinates>,

    /// Search radius in meters; only used together with `location`.
    #[schemars(description = "Search radius in meters (max 50000)")]
    #[serde(default)]
    pub radius: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchPlacesPayload {
    #[serde(default)]
    pub results: Vec<PlaceCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceCandidate {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
    pub place_id: Option<String>,
    pub rating: Option<Value>,
    pub types: Option<Vec<String>>,
}

/// Structured output for place search results.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPlacesResult {
    pub places: Vec<PlaceSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaceSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LatLng>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

impl From<PlaceCandidate> for PlaceSummary {
    fn from(p: PlaceCandidate) -> Self {
        Self {
            name: p.name,
            formatted_address: p.formatted_address,
            location: p.geometry.map(|g| g.location),
            place_id: p.place_id,
            rating: p.rating,
            types: p.types,
        }
    }
}

/// Place search tool.
#[derive(Debug, Clone)]
pub struct SearchPlacesTool;

impl MapsOperation for SearchPlacesTool {
    const NAME: &'static str = "maps_search_places";
    const DESCRIPTION: &'static str = "Search for places using Google Places API";
    const ENDPOINT: Endpoint = Endpoint::PlaceTextSearch;
    const FAILURE_PREFIX: &'static str = "Place search failed";

    type Params = SearchPlacesParams;
    type Payload = SearchPlacesPayload;
    type Output = SearchPlacesResult;

    fn query(params: &SearchPlacesParams) -> QueryParams {
        let query = QueryParams::new().push("query", &params.query);
        match params.location {
            Some(center) => query
                .push("location", LatLng::from(center))
                .push("radius", params.radius.unwrap_or(DEFAULT_RADIUS_METERS)),
            None => query,
        }
    }

    fn project(payload: SearchPlacesPayload) -> Result<SearchPlacesResult, ToolError> {
        Ok(SearchPlacesResult {
            places: payload.results.into_iter().map(PlaceSummary::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::dispatch;
    use crate::domains::tools::testing::{StubUpstream, json_of, text_of};
    use serde_json::json;

    fn params(location: Option<Coordinates>, radius: Option<u32>) -> SearchPlacesParams {
        SearchPlacesParams {
            query: "coffee".to_string(),
            location,
            radius,
        }
    }

    #[tokio::test]
    async fn test_search_places_projection() {
        let upstream = StubUpstream::ok(json!({
            "html_attributions": [],
            "results": [
                {
                    "business_status": "OPERATIONAL",
                    "formatted_address": "1 Main St, Springfield",
                    "geometry": {"location": {"lat": 10.0, "lng": 20.0}, "viewport": {}},
                    "name": "Bean There",
                    "place_id": "p1",
                    "rating": 4.5,
                    "types": ["cafe", "food"],
                    "user_ratings_total": 120
                },
                {
                    "formatted_address": "2 Side St, Springfield",
                    "geometry": {"location": {"lat": 10.5, "lng": 20.5}},
                    "name": "Unrated Cafe",
                    "place_id": "p2",
                    "types": ["cafe"]
                }
            ]
        }));

        let result = dispatch::<SearchPlacesTool>(&upstream, params(None, None)).await;

        assert_eq!(
            json_of(&result),
            json!({
                "places": [
                    {
                        "name": "Bean There",
                        "formatted_address": "1 Main St, Springfield",
                        "location": {"lat": 10.0, "lng": 20.0},
                        "place_id": "p1",
                        "rating": 4.5,
                        "types": ["cafe", "food"]
                    },
                    {
                        "name": "Unrated Cafe",
                        "formatted_address": "2 Side St, Springfield",
                        "location": {"lat": 10.5, "lng": 20.5},
                        "place_id": "p2",
                        "types": ["cafe"]
                    }
                ]
            })
        );
        assert_eq!(upstream.last_endpoint(), Some(Endpoint::PlaceTextSearch));
    }

    #[tokio::test]
    async fn test_search_places_keeps_integer_rating() {
        let upstream = StubUpstream::ok(json!({
            "results": [{"name": "Five Star Diner", "place_id": "p3", "rating": 5}]
        }));

        let result = dispatch::<SearchPlacesTool>(&upstream, params(None, None)).await;

        assert_eq!(
            json_of(&result),
            json!({"places": [{"name": "Five Star Diner", "place_id": "p3", "rating": 5}]})
        );
    }

    #[tokio::test]
    async fn test_search_places_omits_absent_location_and_radius() {
        let upstream = StubUpstream::ok(json!({"results": []}));

        dispatch::<SearchPlacesTool>(&upstream, params(None, None)).await;

        let query = upstream.last_query().unwrap();
        assert_eq!(query.get("query"), Some("coffee"));
        assert!(!query.contains("location"));
        assert!(!query.contains("radius"));
        assert_eq!(query.pairs().len(), 1);
    }

    #[tokio::test]
    async fn test_search_places_with_center() {
        let upstream = StubUpstream::ok(json!({"results": []}));
        let center = Coordinates {
            latitude: 1.5,
            longitude: 2.5,
        };

        dispatch::<SearchPlacesTool>(&upstream, params(Some(center), Some(800))).await;
        let query = upstream.last_query().unwrap();
        assert_eq!(query.get("location"), Some("1.5,2.5"));
        assert_eq!(query.get("radius"), Some("800"));

        dispatch::<SearchPlacesTool>(&upstream, params(Some(center), None)).await;
        let query = upstream.last_query().unwrap();
        assert_eq!(query.get("radius"), Some("5000"));
    }

    #[tokio::test]
    async fn test_search_places_radius_without_center_is_dropped() {
        let upstream = StubUpstream::ok(json!({"results": []}));

        dispatch::<SearchPlacesTool>(&upstream, params(None, Some(800))).await;
        assert!(!upstream.last_query().unwrap().contains("radius"));
    }

    #[tokio::test]
    async fn test_search_places_rejection() {
        let upstream = StubUpstream::new(json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota for this API."
        }));

        let result = dispatch::<SearchPlacesTool>(&upstream, params(None, None)).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "Place search failed: You have exceeded your daily request quota for this API."
        );
    }

    #[test]
    fn test_params_deserialization() {
        let json = r#"{"query": "pizza", "location": {"latitude": 1.0, "longitude": 2.0}}"#;
        let params: SearchPlacesParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.query, "pizza");
        assert!(params.location.is_some());
        assert!(params.radius.is_none());
    }
}
