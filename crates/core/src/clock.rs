//! Source of "today" for date validation.
//!
//! Handlers read the current date through [`Clock`] so tests can pin it.

use std::sync::Arc;

use chrono::Utc;

use crate::types::StayDate;

pub trait Clock: Send + Sync {
    /// The current calendar date.
    fn today(&self) -> StayDate;
}

/// Wall clock, UTC calendar date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> StayDate {
        Utc::now().date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub StayDate);

impl Clock for FixedClock {
    fn today(&self) -> StayDate {
        self.0
    }
}

pub type SharedClock = Arc<dyn Clock>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_its_date() {
        let date = StayDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }
}
