//! Provider error types.
//!
//! Provider failures arrive as an error code string plus a free-form
//! message. The code is mapped onto [`ProviderErrorKind`] so callers can
//! branch on the failure class without string matching.

use std::fmt;
use thiserror::Error;

/// Failure classes reported by the provider API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    /// Request rate exceeded.
    Throttled,
    /// Credentials lack permission for the call.
    AccessDenied,
    /// A parameter was rejected.
    InvalidParameter,
    /// The referenced resource does not exist.
    NotFound,
    /// The resource (e.g. a route for the destination) already exists.
    AlreadyExists,
    /// The resource is still referenced by another resource.
    DependencyViolation,
    /// The request never reached the provider or the response was lost.
    Transport,
    /// Any other provider-side failure.
    Internal,
}

impl ProviderErrorKind {
    /// Maps a provider error code onto a failure class.
    pub fn from_code(code: &str) -> Self {
        match code {
            "Throttling" | "RequestLimitExceeded" => ProviderErrorKind::Throttled,
            "UnauthorizedOperation" | "AuthFailure" | "AccessDenied" => {
                ProviderErrorKind::AccessDenied
            }
            "RouteAlreadyExists" | "Resource.AlreadyAssociated" => {
                ProviderErrorKind::AlreadyExists
            }
            "DependencyViolation" => ProviderErrorKind::DependencyViolation,
            c if c.ends_with(".NotFound") => ProviderErrorKind::NotFound,
            c if c.starts_with("InvalidParameter") || c == "MissingParameter" => {
                ProviderErrorKind::InvalidParameter
            }
            _ => ProviderErrorKind::Internal,
        }
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProviderErrorKind::Throttled => "throttled",
            ProviderErrorKind::AccessDenied => "access denied",
            ProviderErrorKind::InvalidParameter => "invalid parameter",
            ProviderErrorKind::NotFound => "not found",
            ProviderErrorKind::AlreadyExists => "already exists",
            ProviderErrorKind::DependencyViolation => "dependency violation",
            ProviderErrorKind::Transport => "transport failure",
            ProviderErrorKind::Internal => "internal error",
        };
        write!(f, "{}", s)
    }
}

/// Error returned by any [`RouteTableApi`](crate::RouteTableApi) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed ({kind}): {message}")]
pub struct ProviderError {
    /// Failure class.
    pub kind: ProviderErrorKind,
    /// The API operation that failed (e.g. `CreateRoute`).
    pub operation: String,
    /// Provider message.
    pub message: String,
}

impl ProviderError {
    /// Creates an error of the given kind.
    pub fn new(
        kind: ProviderErrorKind,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates an error from a provider error code.
    pub fn from_code(
        operation: impl Into<String>,
        code: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ProviderErrorKind::from_code(code), operation, message)
    }

    /// Creates a transport error.
    pub fn transport(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport, operation, message)
    }

    /// Returns true if the failure is transient.
    ///
    /// This crate never retries; the flag is for provider clients that do.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ProviderErrorKind::Throttled | ProviderErrorKind::Transport
        )
    }
}

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_from_code() {
        assert_eq!(
            ProviderErrorKind::from_code("RequestLimitExceeded"),
            ProviderErrorKind::Throttled
        );
        assert_eq!(
            ProviderErrorKind::from_code("UnauthorizedOperation"),
            ProviderErrorKind::AccessDenied
        );
        assert_eq!(
            ProviderErrorKind::from_code("InvalidRouteTableID.NotFound"),
            ProviderErrorKind::NotFound
        );
        assert_eq!(
            ProviderErrorKind::from_code("InvalidAssociationID.NotFound"),
            ProviderErrorKind::NotFound
        );
        assert_eq!(
            ProviderErrorKind::from_code("InvalidParameterValue"),
            ProviderErrorKind::InvalidParameter
        );
        assert_eq!(
            ProviderErrorKind::from_code("RouteAlreadyExists"),
            ProviderErrorKind::AlreadyExists
        );
        assert_eq!(
            ProviderErrorKind::from_code("SomethingNew"),
            ProviderErrorKind::Internal
        );
    }

    #[test]
    fn test_error_display() {
        let err = ProviderError::from_code("DeleteRoute", "InvalidRoute.NotFound", "no route");
        assert_eq!(err.to_string(), "DeleteRoute failed (not found): no route");
    }

    #[test]
    fn test_error_retryable() {
        assert!(ProviderError::from_code("CreateRoute", "Throttling", "slow down").is_retryable());
        assert!(ProviderError::transport("CreateRoute", "connection reset").is_retryable());
        assert!(!ProviderError::from_code("CreateRoute", "AuthFailure", "denied").is_retryable());
    }
}
