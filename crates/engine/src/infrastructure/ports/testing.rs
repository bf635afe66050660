//! Testability ports for injecting time and randomness.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform sample from the closed range `[min, max]`.
    fn gen_range(&self, min: f64, max: f64) -> f64;
    fn gen_uuid(&self) -> Uuid;
}
