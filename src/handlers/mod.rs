pub mod laps;
pub mod points;
pub mod schedule;
pub mod standings;

use crate::models::error::ApiError;

/// The results archive covers seasons from 1950; allow next year once its
/// calendar is published.
pub(crate) fn validate_year(year: i32, current_year: i32) -> Result<(), ApiError> {
    if (1950..=current_year + 1).contains(&year) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("year {year} out of range")))
    }
}
