//! NGSI-LD error vocabulary and ProblemDetail response bodies
//!
//! This crate provides pure data types for NGSI-LD error responses, with no
//! mandatory dependencies on HTTP frameworks. It includes:
//! - The closed catalog of NGSI-LD error kinds (`ErrorType`)
//! - The standardized error-response body (`ProblemDetail`)
//!
//! Optional features:
//! - `axum`: `IntoResponse` for `ProblemDetail` with the problem-detail media type
//! - `utoipa`: `ToSchema` derives for OpenAPI documents
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod problem;

pub use catalog::ErrorType;
pub use problem::{APPLICATION_PROBLEM_JSON, ProblemDetail};
