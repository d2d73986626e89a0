//! Maps domain: the upstream Google Maps Web Service API.
//!
//! - `client`: endpoint paths, query building and the reqwest-backed client
//! - `envelope`: the status envelope and coordinate types shared by all endpoints
//! - `error`: transport-level failures

pub mod client;
pub mod envelope;
mod error;

pub use client::{Endpoint, MapsClient, QueryParams, Upstream};
pub use envelope::{Envelope, Geometry, LatLng, STATUS_OK};
pub use error::{UpstreamError, UpstreamResult};
