/*
[INPUT]:  Request descriptor, base URL, authentication headers
[OUTPUT]: Transport-ready signed envelope
[POS]:    HTTP layer - final request assembly
[UPDATE]: When header policy or parameter placement changes
*/

use std::collections::BTreeMap;

use reqwest::Method;
use url::Url;

use crate::http::Result;
use crate::http::request::RequestDescriptor;

pub type Headers = BTreeMap<String, String>;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Fully assembled request handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    pub url: Url,
    pub method: Method,
    pub headers: Headers,
    pub body: Option<String>,
}

impl SignedEnvelope {
    pub fn build(base_url: &Url, request: &RequestDescriptor, auth_headers: Headers) -> Result<Self> {
        let url = request_url(base_url, request)?;

        let mut headers = auth_headers;
        if request.requires_auth {
            headers.insert("Accept".to_string(), "application/json".to_string());
        }

        let body = request.encoded_body();
        if body.is_some() {
            headers.insert("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string());
        }

        Ok(Self {
            url,
            method: request.method.clone(),
            headers,
            body,
        })
    }
}

/// Endpoint URL with GET parameters in the query string
pub fn request_url(base_url: &Url, request: &RequestDescriptor) -> Result<Url> {
    let mut url = base_url.join(&request.path)?;
    url.set_query(request.encoded_query().as_deref());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request;
    use crate::types::{CanonicalSymbol, OrderState};

    fn base() -> Url {
        Url::parse("https://api.bithumb.com/v1/").unwrap()
    }

    #[test]
    fn get_params_go_into_url() {
        let symbol = CanonicalSymbol::parse("BTC/KRW").unwrap();
        let envelope =
            SignedEnvelope::build(&base(), &request::my_trades(&symbol, OrderState::Done), Headers::new())
                .unwrap();

        assert_eq!(
            envelope.url.as_str(),
            "https://api.bithumb.com/v1/orders?market=KRW-BTC&order_by=desc&state=done"
        );
        assert!(envelope.body.is_none());
        assert_eq!(envelope.headers["Accept"], "application/json");
        assert!(!envelope.headers.contains_key("Content-Type"));
    }

    #[test]
    fn non_get_params_go_into_form_body() {
        let envelope =
            SignedEnvelope::build(&base(), &request::cancel_order("abc").unwrap(), Headers::new())
                .unwrap();

        assert_eq!(envelope.url.as_str(), "https://api.bithumb.com/v1/order");
        assert_eq!(envelope.method, Method::DELETE);
        assert_eq!(envelope.body.as_deref(), Some("uuid=abc"));
        assert_eq!(envelope.headers["Content-Type"], FORM_CONTENT_TYPE);
    }

    #[test]
    fn public_requests_keep_auth_headers_empty() {
        let symbol = CanonicalSymbol::parse("BTC/KRW").unwrap();
        let envelope =
            SignedEnvelope::build(&base(), &request::order_book(&symbol), Headers::new()).unwrap();
        assert!(envelope.headers.is_empty());
        assert_eq!(envelope.url.path(), "/v1/orderbook");
    }
}
