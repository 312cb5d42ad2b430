//! GeoNames endpoint registry
//!
//! Static table of the JSON endpoints exposed by the GeoNames web service and
//! the top-level property each one wraps its payload in.

use serde_json::Value;

/// A single GeoNames web service endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Endpoint name as used in the request path (without the `JSON` suffix)
    pub name: &'static str,
    /// Top-level response key holding the payload, if the endpoint wraps it
    pub unwrap_property: Option<&'static str>,
}

impl Endpoint {
    const fn new(name: &'static str, unwrap_property: Option<&'static str>) -> Self {
        Self {
            name,
            unwrap_property,
        }
    }

    /// Extract the payload from a decoded response
    ///
    /// Objects carrying the unwrap property yield that property's value.
    /// Anything else (no unwrap property, property absent, arrays, scalars)
    /// is returned unchanged.
    #[must_use]
    pub fn unwrap(&self, value: Value) -> Value {
        match (self.unwrap_property, value) {
            (Some(property), Value::Object(mut map)) => match map.remove(property) {
                Some(inner) => inner,
                None => Value::Object(map),
            },
            (_, value) => value,
        }
    }
}

static ENDPOINTS: &[Endpoint] = &[
    Endpoint::new("children", Some("geonames")),
    Endpoint::new("cities", Some("geonames")),
    Endpoint::new("countryCode", None),
    Endpoint::new("countryInfo", Some("geonames")),
    Endpoint::new("countrySubdivision", None),
    Endpoint::new("earthquakes", Some("earthquakes")),
    Endpoint::new("findNearby", Some("geonames")),
    Endpoint::new("findNearbyPlaceName", Some("geonames")),
    Endpoint::new("findNearbyPostalCodes", Some("postalCodes")),
    Endpoint::new("findNearbyStreets", Some("streetSegment")),
    Endpoint::new("findNearByWeather", Some("weatherObservation")),
    Endpoint::new("findNearbyWikipedia", Some("geonames")),
    Endpoint::new("findNearestAddress", Some("address")),
    Endpoint::new("findNearestIntersection", Some("intersection")),
    Endpoint::new("get", None),
    Endpoint::new("gtopo30", None),
    Endpoint::new("hierarchy", Some("geonames")),
    Endpoint::new("neighbourhood", Some("neighbourhood")),
    Endpoint::new("neighbours", Some("geonames")),
    Endpoint::new("postalCodeCountryInfo", Some("geonames")),
    // Upstream answers this one with a lowercase key, unlike postalCodeSearch.
    Endpoint::new("postalCodeLookup", Some("postalcodes")),
    Endpoint::new("postalCodeSearch", Some("postalCodes")),
    Endpoint::new("search", Some("geonames")),
    Endpoint::new("siblings", Some("geonames")),
    Endpoint::new("srtm3", None),
    Endpoint::new("timezone", None),
    Endpoint::new("weather", Some("weatherObservations")),
    Endpoint::new("weatherIcao", Some("weatherObservation")),
    Endpoint::new("wikipediaBoundingBox", Some("geonames")),
    Endpoint::new("wikipediaSearch", Some("geonames")),
];

/// Names of all supported endpoints
#[must_use]
pub fn list_endpoints() -> Vec<&'static str> {
    ENDPOINTS.iter().map(|e| e.name).collect()
}

/// Look up an endpoint by its exact (case-sensitive) name
#[must_use]
pub fn describe(name: &str) -> Option<&'static Endpoint> {
    ENDPOINTS.iter().find(|e| e.name == name)
}
