//! GeoNames client
//!
//! Every endpoint goes through the same pipeline: registry lookup, parameter
//! normalization, credential injection, query encoding, fetch, envelope
//! check, unwrap.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::{Credentials, GeoNamesConfig};
use crate::endpoints::{self, Endpoint};
use crate::error::GeoNamesError;
use crate::params::RequestParams;
use crate::query;
use crate::transport::{HttpTransport, RequestOptions, Transport};

/// Parameter dropped from every request; the client always asks for JSON
const FORMAT_PARAM: &str = "type";

/// Generic GeoNames web service client
pub struct GeoNamesClient {
    transport: Arc<dyn Transport>,
    config: GeoNamesConfig,
    credentials: Option<Credentials>,
}

impl std::fmt::Debug for GeoNamesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoNamesClient")
            .field("transport", &"dyn Transport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeoNamesClient {
    /// Create a client using the HTTP transport
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: GeoNamesConfig) -> Result<Self, GeoNamesError> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client with default configuration (no credentials)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, GeoNamesError> {
        Self::new(GeoNamesConfig::default())
    }

    /// Create a client on top of a custom transport
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_transport(
        config: GeoNamesConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, GeoNamesError> {
        config.validate().map_err(GeoNamesError::Configuration)?;
        let credentials = config.credentials();

        Ok(Self {
            transport,
            config,
            credentials,
        })
    }

    /// Create a shareable client wrapped in Arc
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new_shared(config: GeoNamesConfig) -> Result<Arc<Self>, GeoNamesError> {
        Ok(Arc::new(Self::new(config)?))
    }

    /// Configured base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Configured mirror servers
    #[must_use]
    pub fn failover_servers(&self) -> &[String] {
        &self.config.failover_servers
    }

    /// Names of all endpoints this client can call
    #[must_use]
    pub fn list_endpoints() -> Vec<&'static str> {
        endpoints::list_endpoints()
    }

    /// Call an endpoint by name
    ///
    /// `params` is either a full parameter set or a single value, which is
    /// sent as `geonameId`.
    ///
    /// # Errors
    ///
    /// - [`GeoNamesError::UnsupportedEndpoint`] for unknown names, before any request
    /// - [`GeoNamesError::Transport`] if the request fails
    /// - [`GeoNamesError::Decode`] if the body is not JSON
    /// - [`GeoNamesError::Service`] if the service answers with its error envelope
    pub async fn invoke(
        &self,
        endpoint: &str,
        params: impl Into<RequestParams>,
    ) -> Result<Value, GeoNamesError> {
        self.dispatch(endpoint, params.into(), RequestOptions::default())
            .await
    }

    /// Call an endpoint by name with transport options (e.g. a timeout)
    ///
    /// # Errors
    ///
    /// Same as [`GeoNamesClient::invoke`].
    pub async fn invoke_with_options(
        &self,
        endpoint: &str,
        params: impl Into<RequestParams>,
        options: RequestOptions,
    ) -> Result<Value, GeoNamesError> {
        self.dispatch(endpoint, params.into(), options).await
    }

    #[instrument(skip(self, params, options))]
    async fn dispatch(
        &self,
        endpoint: &str,
        params: RequestParams,
        options: RequestOptions,
    ) -> Result<Value, GeoNamesError> {
        let descriptor =
            endpoints::describe(endpoint).ok_or_else(|| GeoNamesError::UnsupportedEndpoint {
                endpoint: endpoint.to_string(),
            })?;

        let params = self.prepare_params(params);
        let url = self.build_url(descriptor, &params);
        debug!(url = %query::redact(&url), "Calling GeoNames endpoint");

        let body = self.transport.fetch(&url, &options).await?;

        let value: Value =
            serde_json::from_slice(&body).map_err(|e| GeoNamesError::Decode(e.to_string()))?;

        if let Some(err) = Self::service_error(&value) {
            return Err(err);
        }

        Ok(descriptor.unwrap(value))
    }

    /// Drop the format parameter and inject credentials
    fn prepare_params(&self, mut params: RequestParams) -> RequestParams {
        params.remove(FORMAT_PARAM);

        if let Some(ref credentials) = self.credentials {
            params.insert("username", credentials.username.as_str());
            if let Some(token) = credentials.token() {
                params.insert("token", token);
            }
        }

        params
    }

    fn build_url(&self, endpoint: &Endpoint, params: &RequestParams) -> String {
        format!(
            "{}/{}JSON?{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.name,
            query::encode(params)
        )
    }

    /// Detect `{"status": {"message": "...", "value": N}}`
    #[allow(clippy::cast_possible_truncation)]
    fn service_error(value: &Value) -> Option<GeoNamesError> {
        let status = value.get("status")?;
        let message = status.get("message")?.as_str()?;
        let code = status.get("value")?;
        let code = code
            .as_i64()
            .or_else(|| code.as_f64().map(|f| f as i64))?;

        Some(GeoNamesError::Service {
            code,
            message: message.to_string(),
        })
    }
}

macro_rules! endpoint_methods {
    ($($(#[$meta:meta])* $method:ident => $name:literal;)*) => {
        impl GeoNamesClient {
            $(
                $(#[$meta])*
                ///
                /// # Errors
                ///
                /// Same as [`GeoNamesClient::invoke`].
                pub async fn $method(
                    &self,
                    params: impl Into<RequestParams>,
                ) -> Result<Value, GeoNamesError> {
                    self.invoke($name, params).await
                }
            )*
        }

        #[cfg(test)]
        const ENDPOINT_METHOD_NAMES: &[&str] = &[$($name),*];
    };
}

endpoint_methods! {
    /// Children of a feature (e.g. administrative divisions of a country)
    children => "children";
    /// Cities within a bounding box
    cities => "cities";
    /// ISO country code for a coordinate
    country_code => "countryCode";
    /// Country information
    country_info => "countryInfo";
    /// Country and administrative subdivision for a coordinate
    country_subdivision => "countrySubdivision";
    /// Earthquakes within a bounding box
    earthquakes => "earthquakes";
    /// Closest toponym for a coordinate
    find_nearby => "findNearby";
    /// Closest populated place for a coordinate
    find_nearby_place_name => "findNearbyPlaceName";
    /// Postal codes near a coordinate or postal code
    find_nearby_postal_codes => "findNearbyPostalCodes";
    /// Nearest street segments (US only)
    find_nearby_streets => "findNearbyStreets";
    /// Nearest weather station observation
    find_nearby_weather => "findNearByWeather";
    /// Wikipedia articles near a coordinate
    find_nearby_wikipedia => "findNearbyWikipedia";
    /// Nearest address (US only)
    find_nearest_address => "findNearestAddress";
    /// Nearest street intersection (US only)
    find_nearest_intersection => "findNearestIntersection";
    /// Full record for a `geonameId`
    get => "get";
    /// GTOPO30 elevation
    gtopo30 => "gtopo30";
    /// All ancestors of a feature
    hierarchy => "hierarchy";
    /// Neighbourhood for a coordinate (US cities only)
    neighbourhood => "neighbourhood";
    /// Neighbouring countries or administrative divisions
    neighbours => "neighbours";
    /// Countries with postal code data
    postal_code_country_info => "postalCodeCountryInfo";
    /// Places for a postal code
    postal_code_lookup => "postalCodeLookup";
    /// Postal code search
    postal_code_search => "postalCodeSearch";
    /// Full-text place search
    search => "search";
    /// Siblings of a feature
    siblings => "siblings";
    /// SRTM3 elevation
    srtm3 => "srtm3";
    /// Timezone, sunrise and sunset for a coordinate
    timezone => "timezone";
    /// Weather observations within a bounding box
    weather => "weather";
    /// Weather observation for an ICAO airport code
    weather_icao => "weatherIcao";
    /// Wikipedia articles within a bounding box
    wikipedia_bounding_box => "wikipediaBoundingBox";
    /// Wikipedia full-text search
    wikipedia_search => "wikipediaSearch";
}
