#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Common test utilities for temporal integration tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::{DateTime, Utc};
use http::Request;
use ngsild_errors::ProblemDetail;
use serde_json::json;
use url::Url;

use temporal::api::problem::ProblemTranslator;
use temporal::api::rest::routes;
use temporal::config::TemporalConfig;
use temporal::domain::context::{ContextResolver, LdContext};
use temporal::domain::error::TemporalFailure;
use temporal::domain::model::{AttributeInstance, TemporalEntity};
use temporal::domain::repo::EntityRepository;
use temporal::domain::service::EntityTemporalService;
use temporal::infra::InMemoryEntityRepository;

/// Fully qualified name the core context gives the `speed` attribute.
pub const SPEED: &str = "https://uri.etsi.org/ngsi-ld/default-context/speed";

/// A context the stub resolver knows; defines only `speed`, no `@vocab`.
pub const STRICT_CONTEXT: &str = "https://example.org/strict-context.jsonld";

/// Resolver with a fixed set of known contexts: anything else it is asked
/// to fetch is unreachable.
pub struct StubContextResolver {
    known: HashMap<String, Arc<LdContext>>,
}

impl StubContextResolver {
    pub fn new() -> Self {
        let mut known = HashMap::new();
        let mut terms = BTreeMap::new();
        terms.insert("speed".to_owned(), "https://example.org/attrs/speed".to_owned());
        known.insert(
            STRICT_CONTEXT.to_owned(),
            Arc::new(LdContext::new(terms, None)),
        );
        Self { known }
    }
}

#[async_trait]
impl ContextResolver for StubContextResolver {
    async fn resolve(&self, reference: Option<&Url>) -> Result<Arc<LdContext>, TemporalFailure> {
        match reference {
            None => Ok(Arc::new(LdContext::core())),
            Some(url) => self.known.get(url.as_str()).cloned().ok_or_else(|| {
                TemporalFailure::context_unreachable(
                    url.as_str(),
                    anyhow::anyhow!("connection refused"),
                )
            }),
        }
    }
}

pub fn instant(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
}

pub fn seeded_repo() -> Arc<InMemoryEntityRepository> {
    let repo = InMemoryEntityRepository::new();
    repo.seed(
        TemporalEntity::new("urn:ngsi-ld:Car:1", "Car")
            .with_instance(
                SPEED,
                AttributeInstance::new(json!(50), instant("2021-01-01T00:00:00Z")),
            )
            .with_instance(
                SPEED,
                AttributeInstance::new(json!(80), instant("2021-01-02T00:00:00Z")),
            )
            .with_instance(
                SPEED,
                AttributeInstance::new(json!(100), instant("2021-01-03T00:00:00Z")),
            ),
    );
    repo.seed(TemporalEntity::new("urn:ngsi-ld:Bus:7", "Bus").with_instance(
        SPEED,
        AttributeInstance::new(json!(30), instant("2021-01-01T00:00:00Z")),
    ));
    Arc::new(repo)
}

/// Test router over the seeded in-memory repository and the stub resolver.
pub fn test_router() -> Router {
    router_with_repo(seeded_repo())
}

/// Test router over an arbitrary repository, e.g. a failing one.
pub fn router_with_repo(repo: Arc<dyn EntityRepository>) -> Router {
    let service = Arc::new(EntityTemporalService::new(
        repo,
        Arc::new(StubContextResolver::new()),
        TemporalConfig::default(),
    ));
    routes::router(service, Arc::new(ProblemTranslator::with_defaults()))
}

/// GET request with an optional raw `Link` header.
pub fn get_request(uri: &str, link: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(link) = link {
        builder = builder.header("Link", link);
    }
    builder.body(Body::empty()).unwrap()
}

/// The NGSI-LD `Link` header for a context reference.
pub fn context_link(uri: &str) -> String {
    format!("<{uri}>; rel=\"http://www.w3.org/ns/json-ld#context\"; type=\"application/ld+json\"")
}

/// Reads a response body as a ProblemDetail.
pub async fn extract_problem(response: axum::response::Response) -> ProblemDetail {
    let content_type = response
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    assert_eq!(
        content_type.as_deref(),
        Some("application/problem+json"),
        "error responses must carry the problem-detail media type"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&body).expect("failed to parse ProblemDetail JSON")
}

/// Reads a response body as arbitrary JSON.
pub async fn extract_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&body).expect("failed to parse JSON body")
}
