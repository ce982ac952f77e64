//! Startup-validated handler dispatch table.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::error::{FailureClass, FailureKind, TemporalFailure};

use super::handler::{
    AttributeExpansionHandler, CatchAllHandler, ContextRetrievalHandler, ContextUriHandler,
    EntityNotFoundHandler, HandlerScope, PersistenceHandler, ProblemHandler, TimeRelationHandler,
};

/// Configuration errors detected while building the registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two handlers claimed the same scope. Equally specific handlers are a
    /// configuration defect, rejected at startup rather than resolved
    /// ambiguously per request.
    #[error("two handlers registered for scope {0:?}")]
    DuplicateScope(HandlerScope),
}

/// The immutable dispatch table: exact-kind handlers, class handlers, and
/// the catch-all fallback.
///
/// Built once during process startup and shared read-only afterwards.
/// Dispatch is a pure function of the failure discriminant; it performs no
/// I/O and cannot fail.
pub struct HandlerRegistry {
    by_kind: HashMap<FailureKind, Arc<dyn ProblemHandler>>,
    by_class: HashMap<FailureClass, Arc<dyn ProblemHandler>>,
    catch_all: Arc<dyn ProblemHandler>,
}

impl HandlerRegistry {
    /// Builds a registry from scoped handlers plus the fallback.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateScope` when two handlers claim the same scope.
    pub fn new(
        handlers: Vec<Arc<dyn ProblemHandler>>,
        catch_all: Arc<dyn ProblemHandler>,
    ) -> Result<Self, RegistryError> {
        let mut by_kind: HashMap<FailureKind, Arc<dyn ProblemHandler>> = HashMap::new();
        let mut by_class: HashMap<FailureClass, Arc<dyn ProblemHandler>> = HashMap::new();

        for handler in handlers {
            match handler.scope() {
                HandlerScope::Kind(kind) => {
                    if by_kind.insert(kind, handler).is_some() {
                        return Err(RegistryError::DuplicateScope(HandlerScope::Kind(kind)));
                    }
                }
                HandlerScope::Class(class) => {
                    if by_class.insert(class, handler).is_some() {
                        return Err(RegistryError::DuplicateScope(HandlerScope::Class(class)));
                    }
                }
            }
        }

        Ok(Self {
            by_kind,
            by_class,
            catch_all,
        })
    }

    /// The full production handler set.
    #[must_use]
    pub fn with_defaults() -> Self {
        let catch_all: Arc<dyn ProblemHandler> = Arc::new(CatchAllHandler);
        let handlers: Vec<Arc<dyn ProblemHandler>> = vec![
            Arc::new(AttributeExpansionHandler),
            Arc::new(ContextRetrievalHandler),
            Arc::new(ContextUriHandler),
            Arc::new(TimeRelationHandler),
            Arc::new(EntityNotFoundHandler),
            Arc::new(PersistenceHandler),
            catch_all.clone(),
        ];
        match Self::new(handlers, catch_all) {
            Ok(registry) => registry,
            Err(e) => unreachable!("default handler scopes are distinct: {e}"),
        }
    }

    /// Resolves the most specific handler for a failure.
    ///
    /// Exact kind match beats class match beats catch-all.
    #[must_use]
    pub fn resolve(&self, failure: &TemporalFailure) -> &dyn ProblemHandler {
        let kind = failure.kind();
        if let Some(handler) = self.by_kind.get(&kind) {
            return handler.as_ref();
        }
        if let Some(handler) = kind.class().and_then(|class| self.by_class.get(&class)) {
            return handler.as_ref();
        }
        self.catch_all.as_ref()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
