use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct SeasonRequest {
    pub year: i32,
}

/// Points paid out by one concluded round, keyed by driver code. Sprint is
/// `None` for conventional weekends.
#[derive(Debug, Clone, Default)]
pub struct RoundScores {
    pub round: u32,
    pub race: HashMap<String, f64>,
    pub sprint: Option<HashMap<String, f64>>,
}

/// Cumulative points after a round, serialised as `[round, points]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressionSample(pub u32, pub f64);
