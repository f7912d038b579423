//! # fitpulse-database
//!
//! PostgreSQL connection management and the concrete store implementations
//! behind the `fitpulse-entity` storage traits.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
