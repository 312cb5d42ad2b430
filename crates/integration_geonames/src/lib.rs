#![forbid(unsafe_code)]
//! GeoNames web service integration
//!
//! Generic client for the GeoNames web services (<https://www.geonames.org/export/ws-overview.html>):
//! place search, reverse geocoding, postal codes, weather, elevation, timezone
//! and Wikipedia proximity search.
//!
//! # Architecture
//!
//! Endpoints are data, not code. The [`endpoints`] registry lists every
//! supported endpoint and the response property holding its payload.
//! [`GeoNamesClient::invoke`] runs any endpoint through one pipeline:
//! validation, parameter normalization, credential injection, query
//! encoding, [`Transport::fetch`], error-envelope detection and unwrapping.
//! The per-endpoint methods (`search`, `timezone`, ...) are thin wrappers.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geonames::{Credentials, GeoNamesClient, GeoNamesConfig, RequestParams};
//!
//! let config = GeoNamesConfig::default().with_credentials(Credentials::new("demo"));
//! let client = GeoNamesClient::new(config)?;
//!
//! let places = client
//!     .search(RequestParams::new().with("q", "Zürich").with("maxRows", 5))
//!     .await?;
//! let berlin = client.get(2_950_159).await?;
//! ```

mod client;
mod config;
pub mod endpoints;
mod error;
mod params;
mod query;
mod transport;

pub use client::GeoNamesClient;
pub use config::{Credentials, ENV_PREFIX, GeoNamesConfig};
pub use endpoints::{Endpoint, describe, list_endpoints};
pub use error::{GeoNamesError, ServiceErrorCode, TransportError};
pub use params::{GEONAME_ID, ParamValue, RequestParams, Scalar};
pub use query::encode as encode_query;
pub use transport::{HttpTransport, RequestOptions, Transport};
