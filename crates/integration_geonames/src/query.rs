//! Query string encoding
//!
//! Form-urlencodes request parameters: space becomes `+`, reserved
//! characters are percent-escaped, list values repeat their key. Every
//! value is normalized to UTF-8 before escaping.

use url::form_urlencoded::Serializer;

use crate::params::{ParamValue, RequestParams};

/// Encode parameters into a query string, in insertion order
#[must_use]
pub fn encode(params: &RequestParams) -> String {
    let mut serializer = Serializer::new(String::new());
    for (name, value) in params.iter() {
        match value {
            ParamValue::Single(scalar) => {
                serializer.append_pair(name, &scalar.to_utf8());
            },
            ParamValue::Multiple(scalars) => {
                for scalar in scalars {
                    serializer.append_pair(name, &scalar.to_utf8());
                }
            },
        }
    }
    serializer.finish()
}

/// Replace credential values in an encoded URL so it can be logged
pub(crate) fn redact(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let redacted = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name @ ("username" | "token"), _)) => format!("{name}=***"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{base}?{redacted}")
}
