//! HTTP integration tests.
//!
//! These run the full Axum router over in-memory stores, so the whole
//! request path (extractors, validation, services, error mapping) is
//! exercised without a database.

mod helpers;
mod notification_test;
mod reminder_test;
