//! Booking lifecycle, stay-date validation, and the overlap rule used by the
//! conflict checker.
//!
//! A booking occupies its room on the half-open range `[check_in, check_out)`:
//! the check-out day is free for the next guest to check in.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::StayDate;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Booking lifecycle status. `Pending` is the only creation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Canceled,
}

/// Statuses that hold a room and therefore participate in conflict checks.
pub const ACTIVE_STATUSES: &[BookingStatus] = &[BookingStatus::Pending, BookingStatus::Confirmed];

impl BookingStatus {
    /// Parse from the database `status` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "canceled" => Ok(Self::Canceled),
            other => Err(CoreError::Validation(format!(
                "Unknown booking status '{other}'. Must be one of: pending, confirmed, canceled"
            ))),
        }
    }

    /// Database name value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Canceled => "canceled",
        }
    }

    /// Whether a booking in this status blocks its dates.
    pub fn is_active(self) -> bool {
        ACTIVE_STATUSES.contains(&self)
    }

    /// Whether an administrator may move a booking from `self` to `next`.
    ///
    /// Allowed: pending -> confirmed, pending -> canceled,
    /// confirmed -> canceled, canceled -> confirmed (restore).
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Canceled)
                | (Self::Confirmed, Self::Canceled)
                | (Self::Canceled, Self::Confirmed)
        )
    }

    /// Validate a transition, returning a descriptive error when it is not allowed.
    pub fn transition_to(self, next: BookingStatus) -> Result<BookingStatus, CoreError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::Validation(format!(
                "Cannot change booking status from '{}' to '{}'",
                self.as_str(),
                next.as_str()
            )))
        }
    }

    /// Whether the transition turns an inactive booking back into an active
    /// one, which requires re-checking the dates.
    pub fn reactivates(self, next: BookingStatus) -> bool {
        !self.is_active() && next.is_active()
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// A stay on `[check_in, check_out)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub check_in: StayDate,
    pub check_out: StayDate,
}

impl DateRange {
    /// Build a range, requiring `check_out` strictly after `check_in`.
    pub fn new(check_in: StayDate, check_out: StayDate) -> Result<Self, CoreError> {
        if check_out <= check_in {
            return Err(CoreError::Validation(
                "Check-out date must be after check-in date".into(),
            ));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Half-open overlap test. Ranges that only touch at a boundary
    /// (one checks out the day the other checks in) do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }

    /// Number of nights in the stay.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Validate requested stay dates against `today`.
///
/// Rejects a check-in before `today` and a check-out that is not strictly
/// after check-in.
pub fn validate_stay(
    check_in: StayDate,
    check_out: StayDate,
    today: StayDate,
) -> Result<DateRange, CoreError> {
    if check_in < today {
        return Err(CoreError::Validation(
            "Check-in date cannot be in the past".into(),
        ));
    }
    DateRange::new(check_in, check_out)
}

// ---------------------------------------------------------------------------
// Guest request
// ---------------------------------------------------------------------------

/// Body of a guest booking request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookingRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub guest_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub phone: Option<String>,
    pub check_in: StayDate,
    pub check_out: StayDate,
}

impl BookingRequest {
    /// Trim text fields and turn blank optional fields into `None`.
    pub fn normalized(mut self) -> Self {
        self.guest_name = self.guest_name.trim().to_string();
        self.email = blank_to_none(self.email);
        self.phone = blank_to_none(self.phone);
        self
    }

    /// Normalize, then run field validation and the stay-date rules.
    pub fn validate_against(self, today: StayDate) -> Result<(Self, DateRange), CoreError> {
        let request = self.normalized();
        request.validate()?;
        let range = validate_stay(request.check_in, request.check_out, today)?;
        Ok((request, range))
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
