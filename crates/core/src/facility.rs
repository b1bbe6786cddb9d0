//! Facility name rules and room-facility assignment helpers.

use crate::error::CoreError;
use crate::types::DbId;

/// Message returned when a facility name collides with an existing one.
pub const DUPLICATE_FACILITY_MESSAGE: &str = "A facility with this name already exists";

/// Trim a facility name and require it to be non-empty.
pub fn normalize_facility_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Facility name is required".into()));
    }
    Ok(trimmed.to_string())
}

/// Collapse repeated facility ids, keeping first-seen order.
pub fn dedupe_facility_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
