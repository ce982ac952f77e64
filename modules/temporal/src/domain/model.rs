//! Temporal entity model and query types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::TemporalFailure;

/// One recorded value of an attribute at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeInstance {
    pub value: serde_json::Value,
    pub observed_at: DateTime<Utc>,
}

impl AttributeInstance {
    #[must_use]
    pub fn new(value: serde_json::Value, observed_at: DateTime<Utc>) -> Self {
        Self { value, observed_at }
    }
}

/// The temporal evolution of one context entity.
///
/// Attribute names are stored fully qualified; requests arrive with short
/// names and are expanded against the active context before they reach the
/// repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalEntity {
    pub id: String,
    pub entity_type: String,
    pub attributes: BTreeMap<String, Vec<AttributeInstance>>,
}

impl TemporalEntity {
    #[must_use]
    pub fn new(id: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity_type: entity_type.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Appends an instance to the named attribute's history.
    #[must_use]
    pub fn with_instance(
        mut self,
        attribute: impl Into<String>,
        instance: AttributeInstance,
    ) -> Self {
        self.attributes
            .entry(attribute.into())
            .or_default()
            .push(instance);
        self
    }
}

/// A validated time window derived from `timerel`/`timeAt`/`endTimeAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Before(DateTime<Utc>),
    After(DateTime<Utc>),
    Between(DateTime<Utc>, DateTime<Utc>),
}

impl TimeWindow {
    /// Validates the raw temporal query parameters.
    ///
    /// Absent `timerel` and `timeAt` mean no temporal filtering. Any other
    /// incomplete or inconsistent combination is an `InvalidTimeRelation`
    /// failure.
    pub fn from_params(
        timerel: Option<&str>,
        time_at: Option<&str>,
        end_time_at: Option<&str>,
    ) -> Result<Option<Self>, TemporalFailure> {
        let relation = match (timerel, time_at) {
            (None, None) => return Ok(None),
            (None, Some(_)) => {
                return Err(TemporalFailure::invalid_time_relation(
                    "timeAt was given without a timerel",
                ));
            }
            (Some(_), None) => {
                return Err(TemporalFailure::invalid_time_relation(
                    "timerel was given without a timeAt",
                ));
            }
            (Some(relation), Some(_)) => relation,
        };

        let time_at = parse_instant("timeAt", time_at)?;

        match relation {
            "before" => Ok(Some(Self::Before(time_at))),
            "after" => Ok(Some(Self::After(time_at))),
            "between" => {
                let Some(end) = end_time_at else {
                    return Err(TemporalFailure::invalid_time_relation(
                        "timerel 'between' requires an endTimeAt",
                    ));
                };
                let end = parse_instant("endTimeAt", Some(end))?;
                if end < time_at {
                    return Err(TemporalFailure::invalid_time_relation(
                        "endTimeAt lies before timeAt",
                    ));
                }
                Ok(Some(Self::Between(time_at, end)))
            }
            other => Err(TemporalFailure::invalid_time_relation(format!(
                "unknown timerel {other:?}"
            ))),
        }
    }

    /// Whether an observation instant falls inside this window.
    ///
    /// `before` is strict, `after` is strict, `between` is inclusive on both
    /// ends.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        match *self {
            Self::Before(t) => at < t,
            Self::After(t) => at > t,
            Self::Between(start, end) => at >= start && at <= end,
        }
    }
}

fn parse_instant(name: &str, raw: Option<&str>) -> Result<DateTime<Utc>, TemporalFailure> {
    let Some(raw) = raw else {
        return Err(TemporalFailure::invalid_time_relation(format!(
            "{name} is required"
        )));
    };
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| {
            TemporalFailure::invalid_time_relation(format!(
                "{name} is not an RFC 3339 instant: {raw:?}"
            ))
        })
}

/// A fully resolved temporal query, ready for the repository.
///
/// `attributes` holds fully qualified names; empty filter vectors mean "no
/// restriction".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalQuery {
    pub ids: Vec<String>,
    pub types: Vec<String>,
    pub attributes: Vec<String>,
    pub window: Option<TimeWindow>,
    pub last_n: Option<u32>,
    pub page_size: u32,
}
