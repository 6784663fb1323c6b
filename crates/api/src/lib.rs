//! Space rental API server library.
//!
//! Exposes configuration, state, error handling, services and routes so
//! integration tests, the server binary and the seed binary share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
