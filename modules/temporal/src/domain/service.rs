//! Domain service orchestrating temporal queries.

use std::sync::Arc;

use url::Url;

use crate::config::TemporalConfig;

use super::context::ContextResolver;
use super::error::TemporalFailure;
use super::model::{TemporalEntity, TemporalQuery, TimeWindow};
use super::repo::EntityRepository;

/// Raw query parameters as they arrive from the REST layer: short attribute
/// names, unparsed time strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemporalQueryParams {
    pub ids: Vec<String>,
    pub types: Vec<String>,
    pub attrs: Vec<String>,
    pub timerel: Option<String>,
    pub time_at: Option<String>,
    pub end_time_at: Option<String>,
    pub last_n: Option<u32>,
    pub page_size: Option<u32>,
}

/// Service for retrieving temporal histories of context entities.
///
/// Orchestration order: resolve the active context, expand the requested
/// attribute names, validate the time relation, then query the repository.
/// The first failure surfaces unchanged; classification happens at the point
/// of detection, never here.
pub struct EntityTemporalService {
    repo: Arc<dyn EntityRepository>,
    resolver: Arc<dyn ContextResolver>,
    config: TemporalConfig,
}

impl EntityTemporalService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn EntityRepository>,
        resolver: Arc<dyn ContextResolver>,
        config: TemporalConfig,
    ) -> Self {
        Self {
            repo,
            resolver,
            config,
        }
    }

    /// Retrieves the temporal evolution of all entities matching the query.
    pub async fn query_entities(
        &self,
        context_ref: Option<&Url>,
        params: &TemporalQueryParams,
    ) -> Result<Vec<TemporalEntity>, TemporalFailure> {
        let query = self.build_query(context_ref, params).await?;
        self.repo.find_entities(&query).await
    }

    /// Retrieves the temporal evolution of a single entity.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` when the entity is unknown.
    pub async fn query_entity_by_id(
        &self,
        context_ref: Option<&Url>,
        entity_id: &str,
        params: &TemporalQueryParams,
    ) -> Result<TemporalEntity, TemporalFailure> {
        let query = self.build_query(context_ref, params).await?;
        self.repo
            .find_entity_by_id(entity_id, &query)
            .await?
            .ok_or_else(|| TemporalFailure::entity_not_found(entity_id))
    }

    async fn build_query(
        &self,
        context_ref: Option<&Url>,
        params: &TemporalQueryParams,
    ) -> Result<TemporalQuery, TemporalFailure> {
        let context = self.resolver.resolve(context_ref).await?;

        let attributes = params
            .attrs
            .iter()
            .map(|attr| context.expand(attr))
            .collect::<Result<Vec<_>, _>>()?;

        let window = TimeWindow::from_params(
            params.timerel.as_deref(),
            params.time_at.as_deref(),
            params.end_time_at.as_deref(),
        )?;

        let page_size = params
            .page_size
            .unwrap_or(self.config.default_page_size)
            .min(self.config.page_size_limit);

        Ok(TemporalQuery {
            ids: params.ids.clone(),
            types: params.types.clone(),
            attributes,
            window,
            last_n: params.last_n,
            page_size,
        })
    }
}
