//! Request parameters
//!
//! GeoNames parameters are endpoint specific and passed through untouched.
//! The only structure imposed here is "name → scalar or list of scalars",
//! kept in insertion order so the encoded query string is deterministic.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

/// Parameter name used when a call is made with a single bare value
pub const GEONAME_ID: &str = "geonameId";

/// A single query parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// UTF-8 text
    Text(String),
    /// Raw bytes in an unknown encoding (UTF-8 or ISO-8859-1)
    Bytes(Vec<u8>),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value, sent as `true`/`false`
    Bool(bool),
}

impl Scalar {
    /// Render the value as UTF-8 text
    ///
    /// Byte values that are not valid UTF-8 are decoded as ISO-8859-1, where
    /// every byte maps to the code point of the same value.
    #[must_use]
    pub fn to_utf8(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(s) => Cow::Borrowed(s),
                Err(_) => Cow::Owned(bytes.iter().copied().map(char::from).collect()),
            },
            Self::Integer(i) => Cow::Owned(i.to_string()),
            Self::Float(f) => Cow::Owned(f.to_string()),
            Self::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_utf8())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&[u8]> for Scalar {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A parameter value: one scalar, or a list encoded as repeated keys
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Single `name=value` pair
    Single(Scalar),
    /// One `name=value` pair per element, in order
    Multiple(Vec<Scalar>),
}

impl From<Scalar> for ParamValue {
    fn from(value: Scalar) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<Scalar>> for ParamValue {
    fn from(values: Vec<Scalar>) -> Self {
        Self::Multiple(values)
    }
}

macro_rules! impl_param_value_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Single(value.into())
                }
            }

            impl From<Vec<$ty>> for ParamValue {
                fn from(values: Vec<$ty>) -> Self {
                    Self::Multiple(values.into_iter().map(Into::into).collect())
                }
            }
        )*
    };
}

impl_param_value_from!(&str, String, i32, i64, u32, f64, bool);

// Vec<u8> is a single byte-string value, not a list.
impl From<Vec<u8>> for ParamValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Single(Scalar::Bytes(value))
    }
}

impl From<&[u8]> for ParamValue {
    fn from(value: &[u8]) -> Self {
        Self::Single(Scalar::from(value))
    }
}

/// Ordered set of request parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    inner: IndexMap<String, ParamValue>,
}

impl RequestParams {
    /// Create an empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for a single-value call: `{ geonameId: value }`
    #[must_use]
    pub fn geoname_id(value: impl Into<Scalar>) -> Self {
        Self::new().with(GEONAME_ID, ParamValue::Single(value.into()))
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a parameter
    ///
    /// Replacing keeps the parameter's original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.inner.insert(name.into(), value.into());
    }

    /// Remove a parameter, preserving the order of the others
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.inner.shift_remove(name)
    }

    /// Get a parameter by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.inner.get(name)
    }

    /// Check whether a parameter is set
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check whether no parameters are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for RequestParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> From<Vec<(K, V)>> for RequestParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<Scalar> for RequestParams {
    fn from(value: Scalar) -> Self {
        Self::geoname_id(value)
    }
}

impl From<&str> for RequestParams {
    fn from(value: &str) -> Self {
        Self::geoname_id(value)
    }
}

impl From<String> for RequestParams {
    fn from(value: String) -> Self {
        Self::geoname_id(value)
    }
}

impl From<i64> for RequestParams {
    fn from(value: i64) -> Self {
        Self::geoname_id(value)
    }
}

impl From<i32> for RequestParams {
    fn from(value: i32) -> Self {
        Self::geoname_id(value)
    }
}

impl From<u32> for RequestParams {
    fn from(value: u32) -> Self {
        Self::geoname_id(value)
    }
}

impl From<()> for RequestParams {
    fn from((): ()) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_text_is_borrowed() {
        let scalar = Scalar::from("Zürich");
        assert!(matches!(scalar.to_utf8(), Cow::Borrowed("Zürich")));
    }

    #[test]
    fn test_scalar_valid_utf8_bytes_unchanged() {
        let scalar = Scalar::from("Zürich".as_bytes());
        assert_eq!(scalar.to_utf8(), "Zürich");
    }

    #[test]
    fn test_scalar_latin1_bytes_transcoded() {
        // "Zürich" in ISO-8859-1
        let scalar = Scalar::from(vec![0x5A, 0xFC, 0x72, 0x69, 0x63, 0x68]);
        assert_eq!(scalar.to_utf8(), "Zürich");
    }

    #[test]
    fn test_scalar_numbers_and_bools() {
        assert_eq!(Scalar::from(2_950_159_i64).to_string(), "2950159");
        assert_eq!(Scalar::from(47.3).to_string(), "47.3");
        assert_eq!(Scalar::from(-8).to_string(), "-8");
        assert_eq!(Scalar::from(true).to_string(), "true");
        assert_eq!(Scalar::from(false).to_string(), "false");
    }

    #[test]
    fn test_single_value_becomes_geoname_id() {
        let params = RequestParams::from(2_950_159);
        assert_eq!(params.len(), 1);
        assert_eq!(
            params.get(GEONAME_ID),
            Some(&ParamValue::Single(Scalar::Integer(2_950_159)))
        );

        assert_eq!(RequestParams::from("2950159"), RequestParams::geoname_id("2950159"));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut params = RequestParams::from([("a", "1"), ("b", "2"), ("c", "3")]);
        params.insert("a", "changed");

        let names: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(params.get("a"), Some(&ParamValue::from("changed")));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut params = RequestParams::from([("a", "1"), ("type", "xml"), ("c", "3")]);
        assert!(params.remove("type").is_some());
        assert!(params.remove("type").is_none());

        let names: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_builder_with_list_value() {
        let params = RequestParams::new()
            .with("q", "berlin")
            .with("featureClass", vec!["P", "A"])
            .with("maxRows", 10);

        assert_eq!(params.len(), 3);
        assert_eq!(
            params.get("featureClass"),
            Some(&ParamValue::Multiple(vec![Scalar::from("P"), Scalar::from("A")]))
        );
        assert!(params.contains("maxRows"));
        assert!(!params.is_empty());
    }

    #[test]
    fn test_unit_is_empty() {
        assert!(RequestParams::from(()).is_empty());
    }
}
