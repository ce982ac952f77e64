//! The `ProblemHandler` contract and its concrete implementations.

use http::StatusCode;
use ngsild_errors::ErrorType;

use crate::api::rest::request_context::RequestContext;
use crate::domain::error::{FailureClass, FailureKind, TemporalFailure};

/// The slice of the failure taxonomy a handler claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerScope {
    /// One exact failure kind. Always beats a class match.
    Kind(FailureKind),
    /// A broader failure family, matched when no kind handler applies.
    Class(FailureClass),
}

/// Translates one category of failure into its ProblemDetail ingredients.
///
/// Implementations are immutable and shared; they hold no request state.
/// A handler may log the wrapped cause, but nothing it returns from
/// `title`, `instance`, or `detail` may carry cause text — only the
/// category payload, which is client-safe by construction.
pub trait ProblemHandler: Send + Sync {
    /// The scope this handler is registered under.
    fn scope(&self) -> HandlerScope;

    /// The catalog entry this handler maps its failures to.
    fn error_type(&self) -> ErrorType;

    /// The response status; the error type's status unless overridden.
    fn status(&self) -> StatusCode {
        self.error_type().status()
    }

    /// The response title, possibly parameterized by the failure payload.
    fn title(&self, failure: &TemporalFailure) -> String;

    /// A value identifying the specific resource or request involved.
    /// `None` when no natural identifier exists; never fabricated.
    fn instance(&self, ctx: &RequestContext, failure: &TemporalFailure) -> Option<String> {
        let _ = (ctx, failure);
        None
    }

    /// Free-text elaboration derived from the category payload.
    fn detail(&self, failure: &TemporalFailure) -> Option<String> {
        let _ = failure;
        None
    }
}

/// Attribute names the active context cannot expand. An internal
/// inconsistency between the declared context and the requested attribute.
pub struct AttributeExpansionHandler;

impl ProblemHandler for AttributeExpansionHandler {
    fn scope(&self) -> HandlerScope {
        HandlerScope::Kind(FailureKind::AttributeExpansion)
    }

    fn error_type(&self) -> ErrorType {
        ErrorType::InternalError
    }

    fn title(&self, _failure: &TemporalFailure) -> String {
        "Attribute expansion failed.".to_owned()
    }

    fn detail(&self, failure: &TemporalFailure) -> Option<String> {
        match failure {
            TemporalFailure::AttributeExpansion { attribute } => Some(format!(
                "The attribute {attribute:?} could not be expanded against the active context."
            )),
            _ => None,
        }
    }
}

/// Context documents that could not be fetched or decoded. A transient
/// upstream dependency failure, not a client error.
pub struct ContextRetrievalHandler;

impl ProblemHandler for ContextRetrievalHandler {
    fn scope(&self) -> HandlerScope {
        HandlerScope::Kind(FailureKind::ContextUnreachable)
    }

    fn error_type(&self) -> ErrorType {
        ErrorType::LdContextNotAvailable
    }

    fn title(&self, _failure: &TemporalFailure) -> String {
        "Unable to retrieve the requested context.".to_owned()
    }

    fn instance(&self, _ctx: &RequestContext, failure: &TemporalFailure) -> Option<String> {
        match failure {
            TemporalFailure::ContextUnreachable { uri, .. } => Some(uri.clone()),
            _ => None,
        }
    }
}

/// Context references that are not syntactically valid http(s) URIs.
/// Pure client input validation.
pub struct ContextUriHandler;

impl ProblemHandler for ContextUriHandler {
    fn scope(&self) -> HandlerScope {
        HandlerScope::Kind(FailureKind::ContextUriInvalid)
    }

    fn error_type(&self) -> ErrorType {
        ErrorType::BadRequestData
    }

    fn title(&self, _failure: &TemporalFailure) -> String {
        "Invalid context URI.".to_owned()
    }

    fn instance(&self, _ctx: &RequestContext, failure: &TemporalFailure) -> Option<String> {
        match failure {
            TemporalFailure::ContextUriInvalid { reference } => {
                let printable = !reference.is_empty()
                    && reference.chars().all(|c| !c.is_control() && c.is_ascii());
                printable.then(|| reference.clone())
            }
            _ => None,
        }
    }
}

/// `timerel`/`timeAt`/`endTimeAt` combinations that form no valid relation.
pub struct TimeRelationHandler;

impl ProblemHandler for TimeRelationHandler {
    fn scope(&self) -> HandlerScope {
        HandlerScope::Kind(FailureKind::InvalidTimeRelation)
    }

    fn error_type(&self) -> ErrorType {
        ErrorType::BadRequestData
    }

    fn title(&self, _failure: &TemporalFailure) -> String {
        "Invalid time relation query.".to_owned()
    }

    fn detail(&self, failure: &TemporalFailure) -> Option<String> {
        match failure {
            TemporalFailure::InvalidTimeRelation { detail } => Some(detail.clone()),
            _ => None,
        }
    }
}

/// Entities the repository does not know.
pub struct EntityNotFoundHandler;

impl ProblemHandler for EntityNotFoundHandler {
    fn scope(&self) -> HandlerScope {
        HandlerScope::Kind(FailureKind::EntityNotFound)
    }

    fn error_type(&self) -> ErrorType {
        ErrorType::ResourceNotFound
    }

    fn title(&self, _failure: &TemporalFailure) -> String {
        "Entity not found.".to_owned()
    }

    fn instance(&self, ctx: &RequestContext, _failure: &TemporalFailure) -> Option<String> {
        Some(ctx.path.clone())
    }
}

/// Storage-layer failures. The wrapped cause (engine internals, statements)
/// stays in the logs.
pub struct PersistenceHandler;

impl ProblemHandler for PersistenceHandler {
    fn scope(&self) -> HandlerScope {
        HandlerScope::Kind(FailureKind::Storage)
    }

    fn error_type(&self) -> ErrorType {
        ErrorType::InternalError
    }

    fn title(&self, _failure: &TemporalFailure) -> String {
        "Was not able to retrieve entities.".to_owned()
    }
}

/// The final safety net: anything no other handler claims.
pub struct CatchAllHandler;

impl ProblemHandler for CatchAllHandler {
    fn scope(&self) -> HandlerScope {
        HandlerScope::Kind(FailureKind::Unexpected)
    }

    fn error_type(&self) -> ErrorType {
        ErrorType::CATCH_ALL
    }

    fn title(&self, _failure: &TemporalFailure) -> String {
        self.error_type().default_title().to_owned()
    }
}
