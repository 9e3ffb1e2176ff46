/*
[INPUT]:  Request descriptor, credentials, nonce
[OUTPUT]: `Authorization: Bearer <HS256 token>` header
[POS]:    Auth layer - token-based signing scheme
[UPDATE]: When claim set or token algorithm changes
*/

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use super::{AuthScheme, AuthStrategy, Credentials};
use crate::http::envelope::Headers;
use crate::http::request::RequestDescriptor;
use crate::http::{BithumbError, Result};

type HmacSha256 = Hmac<Sha256>;

const TOKEN_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    access_key: &'a str,
    nonce: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
}

/// Compact HS256 token carrying `{access_key, nonce[, query]}`
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerTokenAuth;

impl BearerTokenAuth {
    /// Build the signed token. `query` is only claimed when the request carries a body.
    pub fn token(
        &self,
        request: &RequestDescriptor,
        credentials: &Credentials,
        nonce: u64,
    ) -> Result<String> {
        let (access_key, secret) = credentials.require()?;

        let claims = Claims {
            access_key,
            nonce: nonce.to_string(),
            query: request.encoded_body(),
        };
        let claims_json = serde_json::to_vec(&claims)
            .map_err(|e| BithumbError::Config(format!("failed to encode token claims: {e}")))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(TOKEN_HEADER),
            URL_SAFE_NO_PAD.encode(claims_json)
        );

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| BithumbError::Config(format!("invalid secret: {e}")))?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }
}

impl AuthStrategy for BearerTokenAuth {
    fn scheme(&self) -> AuthScheme {
        AuthScheme::Bearer
    }

    fn authorize(
        &self,
        request: &RequestDescriptor,
        _endpoint: &str,
        credentials: &Credentials,
        nonce: u64,
    ) -> Result<Headers> {
        let token = self.token(request, credentials, nonce)?;
        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        Ok(headers)
    }
}
