//! NGSI-LD Temporal API module.
//!
//! Retrieves temporal histories of context entities and translates every
//! internal failure into an NGSI-LD `ProblemDetail` envelope. The
//! module is layered as:
//! - `domain`: failure values, temporal model, context machinery, service
//! - `api::problem`: the failure-to-ProblemDetail translation core
//! - `api::rest`: axum handlers, routing, DTOs, OpenAPI document
//! - `infra`: HTTP-backed context resolver and in-memory entity storage
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
