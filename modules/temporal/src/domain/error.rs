//! Classified failure values for temporal query processing.
//!
//! Every failure a collaborator can surface is one variant of the closed
//! [`TemporalFailure`] enum. The variant is the classification: the problem
//! translation layer dispatches on [`TemporalFailure::kind`] and never
//! guesses. Wrapped causes exist for diagnostics only and are never
//! serialized into a client response.

use thiserror::Error;

/// Discriminant of a [`TemporalFailure`], used by the problem-handler
/// registry to select a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The `Link` header's context reference is not a valid http(s) URI.
    ContextUriInvalid,
    /// A referenced JSON-LD context could not be fetched or decoded.
    ContextUnreachable,
    /// An attribute name could not be expanded against the active context.
    AttributeExpansion,
    /// The temporal query parameters form no valid time relation.
    InvalidTimeRelation,
    /// The requested entity does not exist.
    EntityNotFound,
    /// The storage layer failed.
    Storage,
    /// Anything the collaborators did not classify.
    Unexpected,
}

/// Broader failure families; the "is-a" axis of handler scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// JSON-LD context resolution and expansion.
    Context,
    /// Client-supplied query validation.
    Validation,
    /// Storage-layer access.
    Persistence,
}

impl FailureKind {
    /// The family this kind belongs to, if any. `Unexpected` belongs to
    /// none, so it can only ever reach the catch-all handler.
    #[must_use]
    pub fn class(self) -> Option<FailureClass> {
        match self {
            Self::ContextUriInvalid | Self::ContextUnreachable | Self::AttributeExpansion => {
                Some(FailureClass::Context)
            }
            Self::InvalidTimeRelation | Self::EntityNotFound => Some(FailureClass::Validation),
            Self::Storage => Some(FailureClass::Persistence),
            Self::Unexpected => None,
        }
    }
}

/// A classified failure raised anywhere in temporal query processing.
#[derive(Error, Debug)]
pub enum TemporalFailure {
    /// The context reference from the `Link` header is not a syntactically
    /// valid absolute http(s) URI.
    #[error("context reference is not a valid URI: {reference:?}")]
    ContextUriInvalid { reference: String },

    /// The referenced context document could not be retrieved or decoded.
    #[error("context could not be retrieved: {uri}")]
    ContextUnreachable {
        uri: String,
        #[source]
        cause: anyhow::Error,
    },

    /// The active context does not define the requested attribute name.
    #[error("attribute could not be expanded: {attribute}")]
    AttributeExpansion { attribute: String },

    /// `timerel`/`timeAt`/`endTimeAt` do not form a valid time relation.
    #[error("invalid time relation query: {detail}")]
    InvalidTimeRelation { detail: String },

    /// The requested entity does not exist.
    #[error("entity not found: {entity_id}")]
    EntityNotFound { entity_id: String },

    /// The storage layer failed.
    #[error("storage failure")]
    Storage(#[source] anyhow::Error),

    /// An unclassified runtime failure.
    #[error("unexpected failure")]
    Unexpected(#[from] anyhow::Error),
}

impl TemporalFailure {
    /// The discriminant used for handler dispatch.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ContextUriInvalid { .. } => FailureKind::ContextUriInvalid,
            Self::ContextUnreachable { .. } => FailureKind::ContextUnreachable,
            Self::AttributeExpansion { .. } => FailureKind::AttributeExpansion,
            Self::InvalidTimeRelation { .. } => FailureKind::InvalidTimeRelation,
            Self::EntityNotFound { .. } => FailureKind::EntityNotFound,
            Self::Storage(_) => FailureKind::Storage,
            Self::Unexpected(_) => FailureKind::Unexpected,
        }
    }

    /// Creates a `ContextUriInvalid` failure.
    #[must_use]
    pub fn context_uri_invalid(reference: impl Into<String>) -> Self {
        Self::ContextUriInvalid {
            reference: reference.into(),
        }
    }

    /// Creates a `ContextUnreachable` failure wrapping the retrieval cause.
    #[must_use]
    pub fn context_unreachable(uri: impl Into<String>, cause: anyhow::Error) -> Self {
        Self::ContextUnreachable {
            uri: uri.into(),
            cause,
        }
    }

    /// Creates an `AttributeExpansion` failure.
    #[must_use]
    pub fn attribute_expansion(attribute: impl Into<String>) -> Self {
        Self::AttributeExpansion {
            attribute: attribute.into(),
        }
    }

    /// Creates an `InvalidTimeRelation` failure.
    #[must_use]
    pub fn invalid_time_relation(detail: impl Into<String>) -> Self {
        Self::InvalidTimeRelation {
            detail: detail.into(),
        }
    }

    /// Creates an `EntityNotFound` failure.
    #[must_use]
    pub fn entity_not_found(entity_id: impl Into<String>) -> Self {
        Self::EntityNotFound {
            entity_id: entity_id.into(),
        }
    }

    /// Creates a `Storage` failure wrapping the storage-layer cause.
    #[must_use]
    pub fn storage(cause: anyhow::Error) -> Self {
        Self::Storage(cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            TemporalFailure::context_uri_invalid("ht://x").kind(),
            FailureKind::ContextUriInvalid
        );
        assert_eq!(
            TemporalFailure::context_unreachable(
                "https://no-context.org",
                anyhow::anyhow!("connection refused")
            )
            .kind(),
            FailureKind::ContextUnreachable
        );
        assert_eq!(
            TemporalFailure::attribute_expansion("temperature").kind(),
            FailureKind::AttributeExpansion
        );
        assert_eq!(
            TemporalFailure::invalid_time_relation("endTimeAt missing").kind(),
            FailureKind::InvalidTimeRelation
        );
        assert_eq!(
            TemporalFailure::entity_not_found("urn:ngsi-ld:Car:1").kind(),
            FailureKind::EntityNotFound
        );
        assert_eq!(
            TemporalFailure::storage(anyhow::anyhow!("pool exhausted")).kind(),
            FailureKind::Storage
        );
        assert_eq!(
            TemporalFailure::from(anyhow::anyhow!("boom")).kind(),
            FailureKind::Unexpected
        );
    }

    #[test]
    fn test_class_mapping() {
        assert_eq!(
            FailureKind::ContextUriInvalid.class(),
            Some(FailureClass::Context)
        );
        assert_eq!(
            FailureKind::ContextUnreachable.class(),
            Some(FailureClass::Context)
        );
        assert_eq!(
            FailureKind::AttributeExpansion.class(),
            Some(FailureClass::Context)
        );
        assert_eq!(
            FailureKind::InvalidTimeRelation.class(),
            Some(FailureClass::Validation)
        );
        assert_eq!(
            FailureKind::EntityNotFound.class(),
            Some(FailureClass::Validation)
        );
        assert_eq!(FailureKind::Storage.class(), Some(FailureClass::Persistence));
        assert_eq!(FailureKind::Unexpected.class(), None);
    }

    #[test]
    fn test_display_does_not_render_wrapped_cause() {
        let failure = TemporalFailure::storage(anyhow::anyhow!("SELECT secret FROM attributes"));
        assert_eq!(failure.to_string(), "storage failure");

        let failure = TemporalFailure::from(anyhow::anyhow!("stack trace here"));
        assert_eq!(failure.to_string(), "unexpected failure");
    }

    #[test]
    fn test_display_keeps_client_safe_payload() {
        let failure = TemporalFailure::context_uri_invalid("invalidURI");
        assert_eq!(
            failure.to_string(),
            "context reference is not a valid URI: \"invalidURI\""
        );
    }
}
