//! Seedable in-memory repository for temporal entities.
//!
//! Sufficient for tests and demos; a time-series database binding is out of
//! scope for this service.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::error::TemporalFailure;
use crate::domain::model::{TemporalEntity, TemporalQuery};
use crate::domain::repo::EntityRepository;

/// In-memory implementation of [`EntityRepository`].
#[derive(Default)]
pub struct InMemoryEntityRepository {
    entities: RwLock<Vec<TemporalEntity>>,
}

impl InMemoryEntityRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity to the store.
    pub fn seed(&self, entity: TemporalEntity) {
        self.entities.write().push(entity);
    }

    fn matches_query(entity: &TemporalEntity, query: &TemporalQuery) -> bool {
        if !query.ids.is_empty() && !query.ids.contains(&entity.id) {
            return false;
        }
        if !query.types.is_empty() && !query.types.contains(&entity.entity_type) {
            return false;
        }
        true
    }

    /// Applies attribute, time-window, and lastN filtering to one entity.
    fn project(entity: &TemporalEntity, query: &TemporalQuery) -> TemporalEntity {
        let mut projected = TemporalEntity::new(entity.id.clone(), entity.entity_type.clone());

        for (name, instances) in &entity.attributes {
            if !query.attributes.is_empty() && !query.attributes.contains(name) {
                continue;
            }

            let mut kept: Vec<_> = instances
                .iter()
                .filter(|instance| {
                    query
                        .window
                        .is_none_or(|window| window.contains(instance.observed_at))
                })
                .cloned()
                .collect();
            kept.sort_by_key(|instance| instance.observed_at);

            if let Some(last_n) = query.last_n {
                let keep_from = kept.len().saturating_sub(last_n as usize);
                kept.drain(..keep_from);
            }

            if !kept.is_empty() {
                projected.attributes.insert(name.clone(), kept);
            }
        }

        projected
    }
}

#[async_trait]
impl EntityRepository for InMemoryEntityRepository {
    async fn find_entities(
        &self,
        query: &TemporalQuery,
    ) -> Result<Vec<TemporalEntity>, TemporalFailure> {
        let entities = self.entities.read();
        Ok(entities
            .iter()
            .filter(|entity| Self::matches_query(entity, query))
            .take(query.page_size as usize)
            .map(|entity| Self::project(entity, query))
            .collect())
    }

    async fn find_entity_by_id(
        &self,
        entity_id: &str,
        query: &TemporalQuery,
    ) -> Result<Option<TemporalEntity>, TemporalFailure> {
        let entities = self.entities.read();
        Ok(entities
            .iter()
            .find(|entity| entity.id == entity_id)
            .map(|entity| Self::project(entity, query)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::model::{AttributeInstance, TimeWindow};
    use chrono::{DateTime, Utc};
    use serde_json::json;

    const SPEED: &str = "https://uri.etsi.org/ngsi-ld/default-context/speed";
    const TEMPERATURE: &str = "https://uri.etsi.org/ngsi-ld/default-context/temperature";

    fn instant(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    fn query() -> TemporalQuery {
        TemporalQuery {
            ids: vec![],
            types: vec![],
            attributes: vec![],
            window: None,
            last_n: None,
            page_size: 20,
        }
    }

    fn seeded() -> InMemoryEntityRepository {
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
                )
                .with_instance(
                    TEMPERATURE,
                    AttributeInstance::new(json!(21), instant("2021-01-01T00:00:00Z")),
                ),
        );
        repo.seed(TemporalEntity::new("urn:ngsi-ld:Bus:7", "Bus").with_instance(
            SPEED,
            AttributeInstance::new(json!(30), instant("2021-01-01T00:00:00Z")),
        ));
        repo
    }

    #[tokio::test]
    async fn test_type_filter() {
        let repo = seeded();
        let q = TemporalQuery {
            types: vec!["Car".to_owned()],
            ..query()
        };
        let entities = repo.find_entities(&q).await.unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, "urn:ngsi-ld:Car:1");
    }

    #[tokio::test]
    async fn test_attribute_projection() {
        let repo = seeded();
        let q = TemporalQuery {
            attributes: vec![TEMPERATURE.to_owned()],
            ..query()
        };
        let entity = repo
            .find_entity_by_id("urn:ngsi-ld:Car:1", &q)
            .await
            .unwrap()
            .unwrap();
        assert!(entity.attributes.contains_key(TEMPERATURE));
        assert!(!entity.attributes.contains_key(SPEED));
    }

    #[tokio::test]
    async fn test_time_window_filters_instances() {
        let repo = seeded();
        let q = TemporalQuery {
            window: Some(TimeWindow::After(instant("2021-01-01T12:00:00Z"))),
            ..query()
        };
        let entity = repo
            .find_entity_by_id("urn:ngsi-ld:Car:1", &q)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entity.attributes[SPEED].len(), 2);
        // Temperature has no instances in the window, so it disappears.
        assert!(!entity.attributes.contains_key(TEMPERATURE));
    }

    #[tokio::test]
    async fn test_last_n_keeps_the_newest_instances() {
        let repo = seeded();
        let q = TemporalQuery {
            last_n: Some(2),
            ..query()
        };
        let entity = repo
            .find_entity_by_id("urn:ngsi-ld:Car:1", &q)
            .await
            .unwrap()
            .unwrap();
        let speeds: Vec<_> = entity.attributes[SPEED]
            .iter()
            .map(|i| i.value.clone())
            .collect();
        assert_eq!(speeds, vec![json!(80), json!(100)]);
    }

    #[tokio::test]
    async fn test_page_size_limits_entities() {
        let repo = seeded();
        let q = TemporalQuery {
            page_size: 1,
            ..query()
        };
        let entities = repo.find_entities(&q).await.unwrap();
        assert_eq!(entities.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_entity_is_none() {
        let repo = seeded();
        let found = repo
            .find_entity_by_id("urn:ngsi-ld:Car:404", &query())
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
