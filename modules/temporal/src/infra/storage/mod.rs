//! Entity storage implementations.

pub mod in_memory_repo;

pub use in_memory_repo::InMemoryEntityRepository;
