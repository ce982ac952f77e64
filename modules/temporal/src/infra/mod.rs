//! Infrastructure implementations of the domain seams.

pub mod ld;
pub mod storage;

pub use ld::HttpContextResolver;
pub use storage::InMemoryEntityRepository;
