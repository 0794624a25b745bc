pub mod cache;
pub mod error;
pub mod laps;
pub mod points;
pub mod schedule;
