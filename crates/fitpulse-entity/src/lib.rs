//! # fitpulse-entity
//!
//! Domain entities for FitPulse: the reminder model with its day-of-week
//! mask and next-run calculator, the in-app notification model, and the
//! store/sink traits through which the rest of the workspace reads and
//! writes them. Database entities derive `sqlx::FromRow`; everything
//! derives `Debug`, `Clone`, and `Serialize`.

pub mod notification;
pub mod reminder;
pub mod testing;
