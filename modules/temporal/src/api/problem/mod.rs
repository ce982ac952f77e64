//! Translation of classified failures into NGSI-LD ProblemDetail envelopes.
//!
//! Three pieces:
//! - [`handler`]: the `ProblemHandler` contract and one implementation per
//!   failure category
//! - [`registry`]: the startup-validated dispatch table
//! - [`adapter`]: the boundary seam that always yields a well-formed
//!   status/body pair, whatever goes wrong underneath

pub mod adapter;
pub mod handler;
pub mod registry;

pub use adapter::{ProblemResponse, ProblemTranslator};
pub use handler::{HandlerScope, ProblemHandler};
pub use registry::{HandlerRegistry, RegistryError};
