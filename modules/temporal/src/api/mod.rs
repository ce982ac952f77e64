//! API layer: problem translation core and REST surface.

pub mod problem;
pub mod rest;
