//! JSON-LD context retrieval.

pub mod http_resolver;

pub use http_resolver::HttpContextResolver;
