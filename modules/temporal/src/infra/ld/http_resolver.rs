//! HTTP-backed context resolver with a per-URL cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use url::Url;

use crate::domain::context::{ContextResolver, LdContext};
use crate::domain::error::TemporalFailure;

/// Fetches remote JSON-LD context documents and caches them by URL.
///
/// Requests without a context reference get the built-in core context. Any
/// fetch or decode failure surfaces as `ContextUnreachable` with the cause
/// wrapped for the logs.
pub struct HttpContextResolver {
    client: reqwest::Client,
    cache: DashMap<String, Arc<LdContext>>,
    core: Arc<LdContext>,
}

impl HttpContextResolver {
    /// Creates a resolver with the given fetch timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(fetch_timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(fetch_timeout).build()?;
        Ok(Self {
            client,
            cache: DashMap::new(),
            core: Arc::new(LdContext::core()),
        })
    }

    async fn fetch(&self, url: &Url) -> anyhow::Result<serde_json::Value> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ContextResolver for HttpContextResolver {
    async fn resolve(&self, reference: Option<&Url>) -> Result<Arc<LdContext>, TemporalFailure> {
        let Some(url) = reference else {
            return Ok(self.core.clone());
        };

        if let Some(cached) = self.cache.get(url.as_str()) {
            return Ok(cached.clone());
        }

        let document = self
            .fetch(url)
            .await
            .map_err(|cause| TemporalFailure::context_unreachable(url.as_str(), cause))?;
        let context = LdContext::from_document(&document)
            .map(Arc::new)
            .map_err(|cause| TemporalFailure::context_unreachable(url.as_str(), cause))?;

        tracing::debug!(url = %url, "cached remote JSON-LD context");
        self.cache.insert(url.as_str().to_owned(), context.clone());
        Ok(context)
    }
}
