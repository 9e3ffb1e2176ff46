/*
[INPUT]:  Request descriptors, auth headers, raw HTTP responses
[OUTPUT]: Signed envelopes, transport results, classified errors
[POS]:    HTTP layer - request building, dispatch and classification
[UPDATE]: When adding endpoints or changing transport behavior
*/

pub mod classify;
pub mod client;
pub mod envelope;
pub mod error;
pub mod request;
pub mod transport;

pub use error::{BithumbError, DomainErrorKind, ErrorCategory, Result};

pub use client::{ClientConfig, ReqwestTransport};
pub use envelope::{Headers, SignedEnvelope};
pub use request::RequestDescriptor;
pub use transport::{RawResponse, Transport};
