//! Boundary adapter: the seam between the HTTP transport and the handler
//! dispatch.
//!
//! `respond` upholds the one invariant everything above relies on: whatever
//! fails, a well-formed (status, ProblemDetail) pair comes back. Handler
//! execution is guarded, so even a defective handler degrades to the
//! catch-all envelope instead of escaping.

use std::panic::{AssertUnwindSafe, catch_unwind};

use http::StatusCode;
use ngsild_errors::{ErrorType, ProblemDetail};

use crate::api::rest::request_context::RequestContext;
use crate::domain::error::TemporalFailure;

use super::handler::ProblemHandler;
use super::registry::HandlerRegistry;

/// Translates classified failures into protocol-compliant responses.
///
/// Built once at startup around an immutable [`HandlerRegistry`] and shared
/// across requests.
pub struct ProblemTranslator {
    registry: HandlerRegistry,
}

impl ProblemTranslator {
    #[must_use]
    pub fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    /// A translator over the full production handler set.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(HandlerRegistry::with_defaults())
    }

    /// Translates a failure into an HTTP status and ProblemDetail body.
    ///
    /// Never panics outward: a panicking handler is logged and replaced by
    /// the catch-all response.
    pub fn respond(
        &self,
        ctx: &RequestContext,
        failure: &TemporalFailure,
    ) -> (StatusCode, ProblemDetail) {
        let handler = self.registry.resolve(failure);
        let translated =
            catch_unwind(AssertUnwindSafe(|| Self::translate(handler, ctx, failure)));
        match translated {
            Ok(response) => response,
            Err(_) => {
                tracing::error!(
                    kind = ?failure.kind(),
                    method = %ctx.method,
                    path = %ctx.path,
                    "problem handler panicked, degrading to the catch-all response"
                );
                Self::catch_all_response()
            }
        }
    }

    /// Like [`respond`](Self::respond), wrapped for direct use as an axum
    /// response.
    pub fn reject(&self, ctx: &RequestContext, failure: &TemporalFailure) -> ProblemResponse {
        let (status, problem) = self.respond(ctx, failure);
        ProblemResponse(status, problem)
    }

    fn translate(
        handler: &dyn ProblemHandler,
        ctx: &RequestContext,
        failure: &TemporalFailure,
    ) -> (StatusCode, ProblemDetail) {
        // The wrapped cause is logged here, and only here. Debug formatting
        // renders the source chain; none of it reaches the body below.
        tracing::error!(
            kind = ?failure.kind(),
            method = %ctx.method,
            path = %ctx.path,
            failure = ?failure,
            "translating failure into a problem response"
        );

        let status = handler.status();
        let mut problem = handler
            .error_type()
            .problem()
            .with_title(handler.title(failure))
            .with_instance_opt(handler.instance(ctx, failure));
        if let Some(detail) = handler.detail(failure) {
            problem = problem.with_detail(detail);
        }
        // A handler may legitimately override the status; the body mirrors
        // the actual response code.
        problem.status = status;

        (status, problem)
    }

    fn catch_all_response() -> (StatusCode, ProblemDetail) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::CATCH_ALL.problem(),
        )
    }
}

/// An axum-ready problem response with the problem-detail media type.
pub struct ProblemResponse(pub StatusCode, pub ProblemDetail);

impl axum::response::IntoResponse for ProblemResponse {
    fn into_response(self) -> axum::response::Response {
        let ProblemResponse(status, mut problem) = self;
        problem.status = status;
        problem.into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::problem::handler::{CatchAllHandler, HandlerScope};
    use crate::domain::error::FailureKind;
    use http::Method;
    use std::sync::Arc;

    fn ctx() -> RequestContext {
        RequestContext {
            method: Method::GET,
            path: "/temporal/entities".to_owned(),
            link: None,
        }
    }

    #[test]
    fn test_status_and_type_follow_the_selected_error_type() {
        let translator = ProblemTranslator::with_defaults();

        let failure =
            TemporalFailure::context_unreachable("https://no-context.org", anyhow::anyhow!("dns"));
        let (status, problem) = translator.respond(&ctx(), &failure);
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            problem.type_uri,
            "https://uri.etsi.org/ngsi-ld/errors/LdContextNotAvailable"
        );
        assert_eq!(problem.status, status);
    }

    #[test]
    fn test_translation_is_deterministic() {
        let translator = ProblemTranslator::with_defaults();
        let failure = TemporalFailure::invalid_time_relation("endTimeAt missing");

        let first = translator.respond(&ctx(), &failure);
        let second = translator.respond(&ctx(), &failure);
        assert_eq!(first, second);
    }

    #[test]
    fn test_wrapped_cause_never_reaches_the_body() {
        let translator = ProblemTranslator::with_defaults();
        let failure =
            TemporalFailure::storage(anyhow::anyhow!("FATAL: SELECT secret FROM attributes"));

        let (_, problem) = translator.respond(&ctx(), &failure);
        let body = serde_json::to_string(&problem).unwrap();
        assert!(!body.contains("SELECT"));
        assert!(!body.contains("FATAL"));
    }

    #[test]
    fn test_absent_instance_stays_absent() {
        let translator = ProblemTranslator::with_defaults();
        let failure = TemporalFailure::attribute_expansion("speed");

        let (status, problem) = translator.respond(&ctx(), &failure);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(problem.title, "Attribute expansion failed.");
        assert_eq!(problem.instance, None);
    }

    struct PanickingHandler;

    impl ProblemHandler for PanickingHandler {
        fn scope(&self) -> HandlerScope {
            HandlerScope::Kind(FailureKind::Storage)
        }

        fn error_type(&self) -> ErrorType {
            ErrorType::InternalError
        }

        fn title(&self, _failure: &TemporalFailure) -> String {
            panic!("defective handler")
        }
    }

    #[test]
    fn test_panicking_handler_degrades_to_catch_all() {
        let registry = crate::api::problem::registry::HandlerRegistry::new(
            vec![Arc::new(PanickingHandler)],
            Arc::new(CatchAllHandler),
        )
        .unwrap();
        let translator = ProblemTranslator::new(registry);

        let failure = TemporalFailure::storage(anyhow::anyhow!("any"));
        let (status, problem) = translator.respond(&ctx(), &failure);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            problem.type_uri,
            "https://uri.etsi.org/ngsi-ld/errors/InternalError"
        );
        assert_eq!(problem.detail, None);
    }
}
