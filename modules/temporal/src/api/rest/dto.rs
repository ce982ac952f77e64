//! Wire DTOs for the temporal REST surface.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::model::{AttributeInstance, TemporalEntity};
use crate::domain::service::TemporalQueryParams;

/// One recorded value of an attribute at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributeInstanceDto {
    pub value: serde_json::Value,
    pub observed_at: DateTime<Utc>,
}

impl From<AttributeInstance> for AttributeInstanceDto {
    fn from(instance: AttributeInstance) -> Self {
        Self {
            value: instance.value,
            observed_at: instance.observed_at,
        }
    }
}

/// Temporal representation of one context entity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemporalEntityDto {
    pub id: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Attribute histories keyed by fully qualified attribute name.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Vec<AttributeInstanceDto>>,
}

impl From<TemporalEntity> for TemporalEntityDto {
    fn from(entity: TemporalEntity) -> Self {
        Self {
            id: entity.id,
            entity_type: entity.entity_type,
            attributes: entity
                .attributes
                .into_iter()
                .map(|(name, instances)| {
                    (name, instances.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }
}

/// Query parameters of the temporal retrieval operations.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TemporalEntitiesQuery {
    /// Comma-separated list of entity ids.
    pub id: Option<String>,
    /// Comma-separated list of entity types.
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    /// Comma-separated list of attribute names, expanded against the active
    /// context.
    pub attrs: Option<String>,
    /// Time relation: `before`, `after`, or `between`.
    pub timerel: Option<String>,
    /// RFC 3339 reference instant for the time relation.
    #[serde(rename = "timeAt")]
    pub time_at: Option<String>,
    /// RFC 3339 end instant; required for `between`.
    #[serde(rename = "endTimeAt")]
    pub end_time_at: Option<String>,
    /// Keep only the last N instances of each attribute.
    #[serde(rename = "lastN")]
    pub last_n: Option<u32>,
    /// Maximum number of entities to return.
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
}

impl TemporalEntitiesQuery {
    /// Converts the raw wire parameters into service inputs.
    #[must_use]
    pub fn into_params(self) -> TemporalQueryParams {
        TemporalQueryParams {
            ids: csv(self.id.as_deref()),
            types: csv(self.entity_type.as_deref()),
            attrs: csv(self.attrs.as_deref()),
            timerel: self.timerel,
            time_at: self.time_at,
            end_time_at: self.end_time_at,
            last_n: self.last_n,
            page_size: self.page_size,
        }
    }
}

fn csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
    .unwrap_or_default()
}
