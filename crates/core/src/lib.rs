//! Domain types and pure logic for the space rental service.
//!
//! Nothing in this crate touches the database or the network. The `db` crate
//! maps these types onto storage and the `api` crate exposes them over HTTP.

pub mod encoding;
pub mod error;
pub mod patch;
pub mod query;
pub mod space;
pub mod types;
