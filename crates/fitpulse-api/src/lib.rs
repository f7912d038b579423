//! # fitpulse-api
//!
//! HTTP API layer for FitPulse built on Axum.
//!
//! Provides the REST endpoints for reminders and the notification inbox,
//! plus extractors, DTOs, CORS, and error mapping. Handlers stay thin:
//! they adapt HTTP payloads to service inputs and wrap service outputs in
//! the response envelope.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
