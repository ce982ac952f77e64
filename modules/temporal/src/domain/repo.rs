//! Repository trait for temporal entity storage.

use async_trait::async_trait;

use super::error::TemporalFailure;
use super::model::{TemporalEntity, TemporalQuery};

/// Storage interface used by the temporal service.
///
/// Implementations surface every error as a classified [`TemporalFailure`];
/// they never swallow failures or return placeholder values for them.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// Retrieves the temporal evolution of all entities matching the query.
    ///
    /// # Errors
    ///
    /// Returns `Storage` when the storage layer fails.
    async fn find_entities(
        &self,
        query: &TemporalQuery,
    ) -> Result<Vec<TemporalEntity>, TemporalFailure>;

    /// Retrieves the temporal evolution of a single entity, or `None` when
    /// the entity is unknown.
    ///
    /// # Errors
    ///
    /// Returns `Storage` when the storage layer fails.
    async fn find_entity_by_id(
        &self,
        entity_id: &str,
        query: &TemporalQuery,
    ) -> Result<Option<TemporalEntity>, TemporalFailure>;
}
