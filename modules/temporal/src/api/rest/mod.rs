//! REST surface of the temporal module.

pub mod dto;
pub mod handlers;
pub mod link;
pub mod openapi;
pub mod request_context;
pub mod routes;
