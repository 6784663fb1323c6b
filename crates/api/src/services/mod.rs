//! Orchestration between HTTP handlers and the repositories.

pub mod space;

pub use space::SpaceService;
