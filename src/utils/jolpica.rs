use serde_json::{from_str, Value};
use std::collections::HashMap;

use crate::models::cache::CacheEntry;
use crate::models::error::ApiError;
use crate::models::points::RoundScores;
use crate::models::schedule::{Event, RawRace};
use crate::utils::state::AppState;

const SCHEDULE_TTL_SECONDS: i64 = 3600;

/// Season schedule from the results archive, cached per year.
pub async fn season_schedule(state: &AppState, year: i32) -> Result<Vec<Event>, ApiError> {
    if let Some(entry) = state.schedule_cache.get(&year) {
        if !entry.is_expired() {
            return Ok(entry.value.clone());
        }
    }

    let res = state
        .http_client
        .get(format!(
            "{}/{year}/races/?format=json&limit=100",
            state.config.jolpica_base_url
        ))
        .send()
        .await?;
    let body = res.text().await?;
    let events = parse_schedule(&body)?;

    state
        .schedule_cache
        .insert(year, CacheEntry::new(events.clone(), SCHEDULE_TTL_SECONDS));
    Ok(events)
}

/// Race and sprint points paid out by one round. Absent race results are an
/// error for a round we believe concluded; an absent sprint table just means
/// a conventional weekend.
pub async fn round_scores(state: &AppState, year: i32, round: u32) -> Result<RoundScores, ApiError> {
    let race_body = state
        .http_client
        .get(format!(
            "{}/{year}/{round}/results/?format=json&limit=100",
            state.config.jolpica_base_url
        ))
        .send()
        .await?
        .text()
        .await?;
    let race = parse_round_points(&race_body, "Results")?.ok_or_else(|| {
        ApiError::NotFound(format!("no race results for round {round} of {year}"))
    })?;

    let sprint_body = state
        .http_client
        .get(format!(
            "{}/{year}/{round}/sprint/?format=json&limit=100",
            state.config.jolpica_base_url
        ))
        .send()
        .await?
        .text()
        .await?;
    let sprint = parse_round_points(&sprint_body, "SprintResults")?;

    Ok(RoundScores { round, race, sprint })
}

fn parse_schedule(body: &str) -> Result<Vec<Event>, ApiError> {
    let payload: Value = from_str(body)?;
    let races = payload["MRData"]["RaceTable"]["Races"].clone();
    if races.is_null() {
        return Err(ApiError::Upstream(
            "schedule payload missing race table".to_string(),
        ));
    }
    let raw: Vec<RawRace> = serde_json::from_value(races)?;
    let mut events: Vec<Event> = raw.into_iter().filter_map(RawRace::into_event).collect();
    events.sort_by_key(|e| e.round);
    Ok(events)
}

/// `driver code -> points` for one result table, or `None` when the archive
/// has no such session for the round. Rows without a driver code are skipped;
/// codes only exist from the early 2000s on and the roster matches by code.
fn parse_round_points(
    body: &str,
    results_key: &str,
) -> Result<Option<HashMap<String, f64>>, ApiError> {
    let payload: Value = from_str(body)?;
    let races = payload["MRData"]["RaceTable"]["Races"]
        .as_array()
        .ok_or_else(|| ApiError::Upstream("results payload missing race table".to_string()))?
        .clone();

    let Some(race) = races.first() else {
        return Ok(None);
    };
    let rows = race[results_key]
        .as_array()
        .ok_or_else(|| ApiError::Upstream(format!("results payload missing {results_key}")))?;

    let mut points = HashMap::with_capacity(rows.len());
    for row in rows {
        let Some(code) = row["Driver"]["code"].as_str() else {
            continue;
        };
        let Some(score) = row["points"].as_str().and_then(|p| p.parse::<f64>().ok()) else {
            continue;
        };
        points.insert(code.to_string(), score);
    }
    Ok(Some(points))
}
