//! Per-request context passed to every service call.

use chrono::{DateTime, Utc};
use fitpulse_core::types::UserId;
use serde::{Deserialize, Serialize};

/// Identity and timing information for a single request.
///
/// `request_time` is stamped once when the context is built and used as "now"
/// for every schedule computation in the request, so a create and its
/// `next_run_at` always agree on the clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Authenticated owner of the request.
    pub user_id: UserId,
    /// Moment the request entered the system.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Builds a context for `user_id` stamped with the current time.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            request_time: Utc::now(),
        }
    }

    /// Builds a context with an explicit clock, for deterministic tests.
    pub fn at(user_id: UserId, request_time: DateTime<Utc>) -> Self {
        Self {
            user_id,
            request_time,
        }
    }
}
