//! Argument types shared across Maps tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domains::maps::LatLng;

/// A coordinate argument.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, JsonSchema)]
pub struct Coordinates {
    /// Latitude in degrees.
    #[serde(alias = "lat")]
    pub latitude: f64,

    /// Longitude in degrees.
    #[serde(alias = "lng")]
    pub longitude: f64,
}

impl From<Coordinates> for LatLng {
    fn from(c: Coordinates) -> Self {
        LatLng::new(c.latitude, c.longitude)
    }
}

/// Travel mode for distance and directions requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_api_param(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Bicycling => "bicycling",
            Self::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_param())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_accept_short_names() {
        let long: Coordinates =
            serde_json::from_str(r#"{"latitude": 1.5, "longitude": 2.5}"#).unwrap();
        let short: Coordinates = serde_json::from_str(r#"{"lat": 1.5, "lng": 2.5}"#).unwrap();
        assert_eq!(long, short);
        assert_eq!(LatLng::from(short).to_string(), "1.5,2.5");
    }

    #[test]
    fn test_travel_mode_tokens() {
        let mode: TravelMode = serde_json::from_str(r#""bicycling""#).unwrap();
        assert_eq!(mode, TravelMode::Bicycling);
        assert_eq!(TravelMode::Transit.to_string(), "transit");
        assert!(serde_json::from_str::<TravelMode>(r#""flying""#).is_err());
    }
}
