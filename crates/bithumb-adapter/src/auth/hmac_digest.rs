/*
[INPUT]:  Request descriptor, endpoint path, credentials, nonce
[OUTPUT]: Api-Key / Api-Sign / Api-Nonce headers
[POS]:    Auth layer - HMAC-SHA512 digest signing scheme
[UPDATE]: When the signed message layout changes
*/

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha512;

use super::{AuthScheme, AuthStrategy, Credentials};
use crate::http::envelope::Headers;
use crate::http::request::{RequestDescriptor, encode_params};
use crate::http::{BithumbError, Result};

type HmacSha512 = Hmac<Sha512>;

/// Signs `endpoint \0 params \0 nonce` with HMAC-SHA512
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacDigestAuth;

impl HmacDigestAuth {
    /// Base64 of the raw digest
    pub fn sign(
        &self,
        endpoint: &str,
        encoded_params: &str,
        nonce: u64,
        secret: &str,
    ) -> Result<String> {
        let message = format!("{endpoint}\0{encoded_params}\0{nonce}");

        let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
            .map_err(|e| BithumbError::Config(format!("invalid secret: {e}")))?;
        mac.update(message.as_bytes());
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }
}

impl AuthStrategy for HmacDigestAuth {
    fn scheme(&self) -> AuthScheme {
        AuthScheme::Hmac
    }

    fn authorize(
        &self,
        request: &RequestDescriptor,
        endpoint: &str,
        credentials: &Credentials,
        nonce: u64,
    ) -> Result<Headers> {
        let (access_key, secret) = credentials.require()?;
        let signature = self.sign(endpoint, &encode_params(&request.params()), nonce, secret)?;

        let mut headers = Headers::new();
        headers.insert("Api-Key".to_string(), access_key.to_string());
        headers.insert("Api-Sign".to_string(), signature);
        headers.insert("Api-Nonce".to_string(), nonce.to_string());
        Ok(headers)
    }
}
