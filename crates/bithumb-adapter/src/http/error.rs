/*
[INPUT]:  Error sources (configuration, vendor status codes, payload shape, transport)
[OUTPUT]: Structured error type with a category for callers
[POS]:    Error handling layer - unified error type for the whole pipeline
[UPDATE]: When adding new error sources or vendor status codes
*/

use std::fmt;

use thiserror::Error;

/// Kind of business error reported by the vendor through its `status` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainErrorKind {
    /// Endpoint or feature was retired by the vendor
    FeatureRetired,
    AuthenticationFailed,
    PermissionDenied,
    BadRequest,
    ExchangeUnavailable,
    /// Business rejection with a free-form notice (insufficient funds, min size, ...)
    ExchangeNotice,
    /// Code not present in the status table
    Unclassified,
}

impl fmt::Display for DomainErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DomainErrorKind::FeatureRetired => "feature retired",
            DomainErrorKind::AuthenticationFailed => "authentication failed",
            DomainErrorKind::PermissionDenied => "permission denied",
            DomainErrorKind::BadRequest => "bad request",
            DomainErrorKind::ExchangeUnavailable => "exchange unavailable",
            DomainErrorKind::ExchangeNotice => "exchange notice",
            DomainErrorKind::Unclassified => "exchange error",
        };
        f.write_str(label)
    }
}

/// Coarse grouping of [`BithumbError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    UnsupportedOperation,
    Domain,
    MalformedResponse,
    Transport,
}

/// Main error type for the Bithumb adapter
#[derive(Error, Debug)]
pub enum BithumbError {
    /// Access key or secret absent for an authenticated call
    #[error("bithumb: missing credentials ({0})")]
    MissingCredentials(&'static str),

    #[error("bithumb: invalid symbol format: {0:?}")]
    InvalidSymbolFormat(String),

    /// Order parameters rejected locally
    #[error("bithumb: invalid order: {0}")]
    InvalidOrder(String),

    #[error("bithumb: configuration error: {0}")]
    Config(String),

    #[error("bithumb: unsupported order type: {0}")]
    UnsupportedOrderType(String),

    /// Vendor rejected the request
    #[error("bithumb: {kind} (status {code}): {message}")]
    Domain {
        kind: DomainErrorKind,
        code: String,
        message: String,
    },

    /// A successful payload that could not be normalized
    #[error("bithumb: malformed response: {0}")]
    MalformedResponse(String),

    #[error("bithumb: HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status that the classifier declined to interpret
    #[error("bithumb: HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

impl BithumbError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BithumbError::MissingCredentials(_)
            | BithumbError::InvalidSymbolFormat(_)
            | BithumbError::InvalidOrder(_)
            | BithumbError::Config(_) => ErrorCategory::Configuration,
            BithumbError::UnsupportedOrderType(_) => ErrorCategory::UnsupportedOperation,
            BithumbError::Domain { .. } => ErrorCategory::Domain,
            BithumbError::MalformedResponse(_) => ErrorCategory::MalformedResponse,
            BithumbError::Transport(_) | BithumbError::HttpStatus { .. } => {
                ErrorCategory::Transport
            }
        }
    }

    /// Hint for callers that run their own retry policy. Nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            BithumbError::Transport(err) => err.is_timeout() || err.is_connect(),
            BithumbError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            BithumbError::Domain { kind, .. } => *kind == DomainErrorKind::ExchangeUnavailable,
            _ => false,
        }
    }

    /// Domain kind, if this is a vendor business error
    pub fn domain_kind(&self) -> Option<DomainErrorKind> {
        match self {
            BithumbError::Domain { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        BithumbError::MalformedResponse(message.into())
    }
}

impl From<url::ParseError> for BithumbError {
    fn from(err: url::ParseError) -> Self {
        BithumbError::Config(format!("invalid URL: {err}"))
    }
}

/// Result type alias for Bithumb operations
pub type Result<T> = std::result::Result<T, BithumbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            BithumbError::MissingCredentials("secret").category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            BithumbError::UnsupportedOrderType("market".to_string()).category(),
            ErrorCategory::UnsupportedOperation
        );
        assert_eq!(
            BithumbError::malformed("no units").category(),
            ErrorCategory::MalformedResponse
        );
        assert_eq!(
            BithumbError::HttpStatus {
                status: 502,
                body: String::new()
            }
            .category(),
            ErrorCategory::Transport
        );
    }

    #[test]
    fn test_error_retryable() {
        let gateway = BithumbError::HttpStatus {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert!(gateway.is_retryable());

        let retired = BithumbError::Domain {
            kind: DomainErrorKind::FeatureRetired,
            code: "5100".to_string(),
            message: "retired".to_string(),
        };
        assert!(!retired.is_retryable());
        assert!(!BithumbError::MissingCredentials("access key").is_retryable());
    }

    #[test]
    fn test_messages_carry_adapter_identity() {
        let err = BithumbError::Domain {
            kind: DomainErrorKind::ExchangeNotice,
            code: "5600".to_string(),
            message: "insufficient balance".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.starts_with("bithumb:"));
        assert!(rendered.contains("5600"));
        assert!(rendered.contains("insufficient balance"));
    }
}
