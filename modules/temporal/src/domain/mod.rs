//! Domain layer of the temporal module.

pub mod context;
pub mod error;
pub mod model;
pub mod repo;
pub mod service;
