//! NGSI-LD ProblemDetail response bodies (pure data model, no HTTP framework dependencies)

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// Content type for ProblemDetail responses as per RFC 7807.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Custom serializer for `StatusCode` to u16
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

/// Custom deserializer for `StatusCode` from u16
fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

/// Standardized error-response body of the NGSI-LD API.
///
/// Field semantics follow RFC 7807: `type` identifies the error kind with a
/// stable URI, `title` is a short human-readable summary, `status` mirrors the
/// HTTP status code, `detail` elaborates on the specific occurrence, and
/// `instance` identifies the resource or request involved. `detail` and
/// `instance` are omitted from the wire format when absent — an `instance`
/// is never fabricated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[cfg_attr(
    feature = "utoipa",
    schema(
        title = "ProblemDetail",
        description = "NGSI-LD ProblemDetail error response body"
    )
)]
#[must_use]
pub struct ProblemDetail {
    /// A URI reference that identifies the error type, drawn from the
    /// NGSI-LD error vocabulary.
    #[serde(rename = "type")]
    pub type_uri: String,
    /// A short, human-readable summary of the error.
    pub title: String,
    /// The HTTP status code for this occurrence. Serializes as u16.
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    #[cfg_attr(feature = "utoipa", schema(value_type = u16))]
    pub status: StatusCode,
    /// A human-readable explanation specific to this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// A URI reference that identifies the specific occurrence, e.g. the
    /// offending context URI or the request path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetail {
    /// Create a new ProblemDetail with the given status and title.
    ///
    /// The `type` defaults to `about:blank` until one is supplied; catalog
    /// users go through [`crate::catalog::ErrorType::problem`] instead, which
    /// seeds all three registry-controlled fields at once.
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: "about:blank".to_owned(),
            title: title.into(),
            status,
            detail: None,
            instance: None,
        }
    }

    pub fn with_type(mut self, type_uri: impl Into<String>) -> Self {
        self.type_uri = type_uri.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Attach an instance only when one exists; empty strings count as absent.
    pub fn with_instance_opt(mut self, instance: Option<String>) -> Self {
        self.instance = instance.filter(|i| !i.is_empty());
        self
    }
}

/// Axum integration: make ProblemDetail directly usable as a response
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ProblemDetail {
    fn into_response(self) -> axum::response::Response {
        use axum::http::HeaderValue;

        let status = self.status;
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}
