/*
[INPUT]:  Signed envelopes
[OUTPUT]: Raw HTTP responses (status, headers, body)
[POS]:    HTTP layer - transport capability consumed by the adapter
[UPDATE]: When the transport contract changes
*/

use std::fmt::Debug;

use async_trait::async_trait;

use crate::http::envelope::{Headers, SignedEnvelope};
use crate::http::{BithumbError, Result};

/// Undecoded HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP exchange. Network and timeout failures surface as
/// [`BithumbError::Transport`] and are never reinterpreted by the adapter.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn perform(&self, envelope: &SignedEnvelope) -> Result<RawResponse>;

    /// Fallback classification used when the vendor body carries no verdict
    fn default_error(&self, response: &RawResponse) -> Option<BithumbError> {
        if response.is_success() {
            return None;
        }
        Some(BithumbError::HttpStatus {
            status: response.status,
            body: response.body.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NullTransport;

    #[async_trait]
    impl Transport for NullTransport {
        async fn perform(&self, _envelope: &SignedEnvelope) -> Result<RawResponse> {
            unreachable!("not dispatched in these tests")
        }
    }

    fn response(status: u16) -> RawResponse {
        RawResponse {
            status,
            headers: Headers::new(),
            body: "gateway".to_string(),
        }
    }

    #[test]
    fn default_error_only_for_non_success() {
        assert!(NullTransport.default_error(&response(200)).is_none());
        assert!(NullTransport.default_error(&response(204)).is_none());

        match NullTransport.default_error(&response(502)) {
            Some(BithumbError::HttpStatus { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "gateway");
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }
}
