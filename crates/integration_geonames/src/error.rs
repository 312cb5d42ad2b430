//! GeoNames error types

use thiserror::Error;

/// Errors raised by a [`Transport`](crate::Transport) while fetching a URL
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed before a response body was read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Server answered with a non-success status
    #[error("HTTP {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// Service is temporarily unavailable (HTTP 5xx)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl TransportError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::ServiceUnavailable(_) | Self::Timeout { .. }
        )
    }
}

/// Error codes reported in the GeoNames `status` envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorCode {
    /// 10: invalid or disabled account
    AuthorizationException,
    /// 11: record does not exist
    RecordDoesNotExist,
    /// 12: unspecified server error
    OtherError,
    /// 13: database timeout
    DatabaseTimeout,
    /// 14: invalid parameter
    InvalidParameter,
    /// 15: no result found
    NoResultFound,
    /// 16: duplicate exception
    DuplicateException,
    /// 17: postal code not found
    PostalCodeNotFound,
    /// 18: daily limit of credits exceeded
    DailyLimitExceeded,
    /// 19: hourly limit of credits exceeded
    HourlyLimitExceeded,
    /// 20: weekly limit of credits exceeded
    WeeklyLimitExceeded,
    /// 21: invalid input
    InvalidInput,
    /// 22: server overloaded
    ServerOverloaded,
    /// 23: service not implemented
    ServiceNotImplemented,
    /// 24: radius too large
    RadiusTooLarge,
    /// 27: maxRows too large
    MaxRowsTooLarge,
    /// Any code not listed above
    Unknown(i64),
}

impl ServiceErrorCode {
    /// Map a numeric `status.value` to a known code
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            10 => Self::AuthorizationException,
            11 => Self::RecordDoesNotExist,
            12 => Self::OtherError,
            13 => Self::DatabaseTimeout,
            14 => Self::InvalidParameter,
            15 => Self::NoResultFound,
            16 => Self::DuplicateException,
            17 => Self::PostalCodeNotFound,
            18 => Self::DailyLimitExceeded,
            19 => Self::HourlyLimitExceeded,
            20 => Self::WeeklyLimitExceeded,
            21 => Self::InvalidInput,
            22 => Self::ServerOverloaded,
            23 => Self::ServiceNotImplemented,
            24 => Self::RadiusTooLarge,
            27 => Self::MaxRowsTooLarge,
            other => Self::Unknown(other),
        }
    }

    /// Credit limit codes (18, 19, 20)
    #[must_use]
    pub const fn is_quota_exceeded(&self) -> bool {
        matches!(
            self,
            Self::DailyLimitExceeded | Self::HourlyLimitExceeded | Self::WeeklyLimitExceeded
        )
    }
}

/// Errors that can occur while calling a GeoNames endpoint
#[derive(Debug, Error)]
pub enum GeoNamesError {
    /// Endpoint name is not in the registry
    #[error("Unsupported endpoint: {endpoint}")]
    UnsupportedEndpoint {
        /// The requested endpoint name
        endpoint: String,
    },

    /// The service answered with its error envelope
    #[error("GeoNames error {code}: {message}")]
    Service {
        /// `status.value` from the response
        code: i64,
        /// `status.message` from the response
        message: String,
    },

    /// Transport failure, propagated unchanged
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response body is not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GeoNamesError {
    /// Classified service error code, for [`GeoNamesError::Service`] only
    #[must_use]
    pub const fn service_code(&self) -> Option<ServiceErrorCode> {
        match self {
            Self::Service { code, .. } => Some(ServiceErrorCode::from_code(*code)),
            _ => None,
        }
    }

    /// Returns true if this error is retryable
    ///
    /// The client never retries on its own; this is for callers.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_retryable(),
            Self::Service { code, .. } => matches!(
                ServiceErrorCode::from_code(*code),
                ServiceErrorCode::DatabaseTimeout
                    | ServiceErrorCode::ServerOverloaded
                    | ServiceErrorCode::HourlyLimitExceeded
            ),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_code_mapping() {
        assert_eq!(ServiceErrorCode::from_code(10), ServiceErrorCode::AuthorizationException);
        assert_eq!(ServiceErrorCode::from_code(15), ServiceErrorCode::NoResultFound);
        assert_eq!(ServiceErrorCode::from_code(27), ServiceErrorCode::MaxRowsTooLarge);
        assert_eq!(ServiceErrorCode::from_code(99), ServiceErrorCode::Unknown(99));
        assert_eq!(ServiceErrorCode::from_code(25), ServiceErrorCode::Unknown(25));
    }

    #[test]
    fn test_quota_codes() {
        assert!(ServiceErrorCode::from_code(18).is_quota_exceeded());
        assert!(ServiceErrorCode::from_code(19).is_quota_exceeded());
        assert!(ServiceErrorCode::from_code(20).is_quota_exceeded());
        assert!(!ServiceErrorCode::from_code(22).is_quota_exceeded());
    }

    #[test]
    fn test_service_code_only_for_service_errors() {
        let err = GeoNamesError::Service {
            code: 11,
            message: "record does not exist".to_string(),
        };
        assert_eq!(err.service_code(), Some(ServiceErrorCode::RecordDoesNotExist));

        let err = GeoNamesError::Decode("eof".to_string());
        assert_eq!(err.service_code(), None);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(GeoNamesError::from(TransportError::Timeout { timeout_secs: 30 }).is_retryable());
        assert!(
            GeoNamesError::from(TransportError::ConnectionFailed("refused".to_string()))
                .is_retryable()
        );
        assert!(
            GeoNamesError::Service {
                code: 22,
                message: "server overloaded".to_string()
            }
            .is_retryable()
        );

        assert!(!GeoNamesError::from(TransportError::HttpStatus { status: 404 }).is_retryable());
        assert!(
            !GeoNamesError::UnsupportedEndpoint {
                endpoint: "nope".to_string()
            }
            .is_retryable()
        );
        assert!(
            !GeoNamesError::Service {
                code: 18,
                message: "daily limit".to_string()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_error_display() {
        let err = GeoNamesError::UnsupportedEndpoint {
            endpoint: "fooBar".to_string(),
        };
        assert!(err.to_string().contains("fooBar"));

        let err = GeoNamesError::Service {
            code: 15,
            message: "no result found".to_string(),
        };
        assert!(err.to_string().contains("15"));
        assert!(err.to_string().contains("no result found"));

        let err = GeoNamesError::from(TransportError::Timeout { timeout_secs: 10 });
        assert_eq!(err.to_string(), "Request timed out after 10 seconds");
    }
}
