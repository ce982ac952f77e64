//! The slice of an incoming request the problem layer may consume.

use axum::extract::FromRequestParts;
use http::request::Parts;
use http::{Method, header};

/// Request method, path, and the raw `Link` header. Used by problem
/// handlers to derive `instance` and diagnostic values, nothing else.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    /// Raw `Link` header value, unparsed. Non-UTF-8 values count as absent.
    pub link: Option<String>,
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            method: parts.method.clone(),
            path: parts.uri.path().to_owned(),
            link: parts
                .headers
                .get(header::LINK)
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned),
        })
    }
}
