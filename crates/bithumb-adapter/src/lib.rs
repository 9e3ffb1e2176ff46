/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Bithumb adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod adapter;
pub mod auth;
pub mod http;
pub mod normalize;
pub mod types;

// Re-export the orchestration entry point
pub use adapter::{AdapterConfig, BithumbAdapter, DEFAULT_BASE_URL, default_buy_fee_rate};

// Re-export commonly used types from auth
pub use auth::{
    AuthScheme,
    AuthStrategy,
    BearerTokenAuth,
    Clock,
    Credentials,
    FixedClock,
    HmacDigestAuth,
    SystemClock,
};

// Re-export commonly used types from http
pub use http::{
    BithumbError,
    ClientConfig,
    DomainErrorKind,
    ErrorCategory,
    RawResponse,
    RequestDescriptor,
    ReqwestTransport,
    Result,
    SignedEnvelope,
    Transport,
};

// Re-export all types
pub use types::*;
