//! Router assembly for the temporal module.

use std::any::Any;
use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Json, Router};
use http::StatusCode;
use ngsild_errors::{APPLICATION_PROBLEM_JSON, ErrorType};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::api::problem::{ProblemResponse, ProblemTranslator};
use crate::domain::service::EntityTemporalService;

use super::handlers;
use super::openapi::ApiDoc;
use super::request_context::RequestContext;

/// Builds the module router.
///
/// Unknown routes fall back to a 404 problem body and panics anywhere in
/// request handling surface as the catch-all 500 problem body; the
/// framework's default error pages are never reachable.
pub fn router(service: Arc<EntityTemporalService>, translator: Arc<ProblemTranslator>) -> Router {
    use utoipa::OpenApi as _;

    Router::new()
        .route(
            "/temporal/entities",
            get(handlers::query_temporal_entities),
        )
        .route(
            "/temporal/entities/{entity_id}",
            get(handlers::retrieve_temporal_entity),
        )
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .fallback(|ctx: RequestContext| async move {
            let error_type = ErrorType::ResourceNotFound;
            ProblemResponse(
                error_type.status(),
                error_type.problem().with_instance(ctx.path),
            )
        })
        .layer(Extension(service))
        .layer(Extension(translator))
        .layer(CatchPanicLayer::custom(panic_problem))
        .layer(TraceLayer::new_for_http())
}

/// Response for panics that escape a handler. The body is the generic
/// catch-all envelope; the panic payload stays in the logs.
fn panic_problem(_panic: Box<dyn Any + Send + 'static>) -> http::Response<axum::body::Body> {
    tracing::error!("request handling panicked, returning the catch-all problem response");
    let problem = ErrorType::CATCH_ALL.problem();
    let body = serde_json::to_string(&problem)
        .unwrap_or_else(|_| r#"{"title":"Internal error.","status":500}"#.to_owned());

    let response = http::Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(http::header::CONTENT_TYPE, APPLICATION_PROBLEM_JSON)
        .body(axum::body::Body::from(body));
    match response {
        Ok(response) => response,
        Err(_) => {
            let mut fallback = http::Response::new(axum::body::Body::empty());
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        }
    }
}
