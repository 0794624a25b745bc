use std::collections::HashMap;
use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{Datelike, Utc};

use crate::models::cache::CacheEntry;
use crate::models::error::ApiError;
use crate::models::laps::{DriverLaps, LapRecord, LapsRequest, SessionDriver, Stint};
use crate::utils::race_utils::{canonical_session_name, compound_for_lap, format_lap_time};
use crate::utils::state::AppState;
use crate::utils::{jolpica, openf1};

const LAPS_TTL_SECONDS: i64 = 6 * 3600;
// The session archive has lap data from 2018 onwards.
const EARLIEST_LAP_SEASON: i32 = 2018;

/// Per-driver lap table for one session: team colour plus every completed
/// lap as (clock string, compound, lap number).
pub async fn laps(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LapsRequest>,
) -> Result<Json<HashMap<String, DriverLaps>>, ApiError> {
    let session_name = canonical_session_name(&request.session)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown session \"{}\"", request.session)))?;
    if !(EARLIEST_LAP_SEASON..=Utc::now().year()).contains(&request.year) {
        return Err(ApiError::BadRequest(format!(
            "no lap data for year {}",
            request.year
        )));
    }
    if request.round == 0 {
        return Err(ApiError::BadRequest("round must be at least 1".to_string()));
    }

    let cache_key = format!("{}-{}-{session_name}", request.year, request.round);
    if let Some(entry) = state.laps_cache.get(&cache_key) {
        if !entry.is_expired() {
            return Ok(Json(entry.value.clone()));
        }
    }

    let events = jolpica::season_schedule(&state, request.year).await?;
    let event = events
        .iter()
        .find(|e| e.round == request.round)
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "no round {} in the {} season",
                request.round, request.year
            ))
        })?;

    let session = openf1::find_session(&state, request.year, &event.country, session_name).await?;
    let drivers = openf1::session_drivers(&state, session.session_key).await?;
    let laps = openf1::session_laps(&state, session.session_key).await?;
    let stints = openf1::session_stints(&state, session.session_key).await?;

    let table = build_lap_table(&drivers, &laps, &stints);
    state
        .laps_cache
        .insert(cache_key, CacheEntry::new(table.clone(), LAPS_TTL_SECONDS));
    Ok(Json(table))
}

/// Fold the archive's flat lap and stint rows into one entry per driver.
/// Laps with no recorded duration are dropped, not zero-filled.
fn build_lap_table(
    drivers: &[SessionDriver],
    laps: &[LapRecord],
    stints: &[Stint],
) -> HashMap<String, DriverLaps> {
    let acronyms: HashMap<u32, &str> = drivers
        .iter()
        .map(|d| (d.driver_number, d.name_acronym.as_str()))
        .collect();

    let mut table: HashMap<String, DriverLaps> = HashMap::with_capacity(drivers.len());
    for driver in drivers {
        table.insert(
            driver.name_acronym.clone(),
            DriverLaps {
                team_color: driver
                    .team_colour
                    .clone()
                    .unwrap_or_else(|| "FFFFFF".to_string()),
                lap_times: Vec::new(),
            },
        );
    }

    for lap in laps {
        let Some(duration) = lap.lap_duration else {
            continue;
        };
        let Some(acronym) = acronyms.get(&lap.driver_number) else {
            continue;
        };
        if let Some(entry) = table.get_mut(*acronym) {
            entry.lap_times.push((
                format_lap_time(duration),
                compound_for_lap(stints, lap.driver_number, lap.lap_number),
                lap.lap_number,
            ));
        }
    }

    for entry in table.values_mut() {
        entry.lap_times.sort_by_key(|&(_, _, lap_number)| lap_number);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(number: u32, acronym: &str, colour: Option<&str>) -> SessionDriver {
        SessionDriver {
            driver_number: number,
            name_acronym: acronym.to_string(),
            team_colour: colour.map(|c| c.to_string()),
        }
    }

    fn lap(number: u32, lap_number: u32, duration: Option<f64>) -> LapRecord {
        LapRecord {
            driver_number: number,
            lap_number,
            lap_duration: duration,
        }
    }

    fn stint(number: u32, compound: &str, lap_start: u32, lap_end: u32) -> Stint {
        Stint {
            driver_number: number,
            compound: Some(compound.to_string()),
            lap_start,
            lap_end,
        }
    }

    #[test]
    fn laps_without_duration_never_appear() {
        let drivers = vec![driver(1, "VER", Some("3671C6"))];
        let laps = vec![
            lap(1, 1, None),
            lap(1, 2, Some(83.456)),
            lap(1, 3, None),
        ];
        let stints = vec![stint(1, "SOFT", 1, 10)];

        let table = build_lap_table(&drivers, &laps, &stints);
        let entry = &table["VER"];
        assert_eq!(entry.team_color, "3671C6");
        assert_eq!(
            entry.lap_times,
            vec![("0:01:23.456000".to_string(), "SOFT".to_string(), 2)]
        );
    }

    #[test]
    fn lap_times_are_ordered_by_lap_number() {
        let drivers = vec![driver(4, "NOR", Some("FF8000"))];
        let laps = vec![
            lap(4, 3, Some(85.0)),
            lap(4, 1, Some(84.0)),
            lap(4, 2, Some(86.0)),
        ];
        let table = build_lap_table(&drivers, &laps, &[]);
        let numbers: Vec<u32> = table["NOR"].lap_times.iter().map(|l| l.2).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn compound_comes_from_the_matching_stint() {
        let drivers = vec![driver(16, "LEC", Some("E8002D"))];
        let laps = vec![lap(16, 5, Some(90.0)), lap(16, 20, Some(91.0))];
        let stints = vec![stint(16, "MEDIUM", 1, 15), stint(16, "HARD", 16, 50)];

        let table = build_lap_table(&drivers, &laps, &stints);
        let compounds: Vec<&str> = table["LEC"]
            .lap_times
            .iter()
            .map(|l| l.1.as_str())
            .collect();
        assert_eq!(compounds, vec!["MEDIUM", "HARD"]);
    }

    #[test]
    fn driver_without_laps_gets_an_empty_entry() {
        let drivers = vec![driver(1, "VER", None), driver(4, "NOR", Some("FF8000"))];
        let laps = vec![lap(4, 1, Some(84.0))];
        let table = build_lap_table(&drivers, &laps, &[]);
        assert!(table["VER"].lap_times.is_empty());
        assert_eq!(table["VER"].team_color, "FFFFFF");
        assert_eq!(table["NOR"].lap_times.len(), 1);
    }

    #[test]
    fn laps_from_unlisted_drivers_are_skipped() {
        let drivers = vec![driver(1, "VER", None)];
        let laps = vec![lap(99, 1, Some(84.0))];
        let table = build_lap_table(&drivers, &laps, &[]);
        assert_eq!(table.len(), 1);
        assert!(table["VER"].lap_times.is_empty());
    }
}
