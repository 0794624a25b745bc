use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LapsRequest {
    pub year: i32,
    pub round: u32,
    pub session: String,
}

// Rows as the session archive returns them. Nullable columns stay Options;
// a lap without a duration never completed (pit in-lap cut short, red flag).

#[derive(Debug, Clone, Deserialize)]
pub struct SessionInfo {
    pub session_key: i64,
    pub session_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionDriver {
    pub driver_number: u32,
    pub name_acronym: String,
    pub team_colour: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LapRecord {
    pub driver_number: u32,
    pub lap_number: u32,
    pub lap_duration: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stint {
    pub driver_number: u32,
    pub compound: Option<String>,
    pub lap_start: u32,
    pub lap_end: u32,
}

/// One completed lap in the transport shape: clock string, compound, lap number.
pub type LapEntry = (String, String, u32);

#[derive(Debug, Clone, Serialize)]
pub struct DriverLaps {
    pub team_color: String,
    pub lap_times: Vec<LapEntry>,
}
