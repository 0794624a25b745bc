use std::collections::HashMap;
use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{Datelike, Utc};

use crate::handlers::validate_year;
use crate::models::error::ApiError;
use crate::models::points::{ProgressionSample, RoundScores, SeasonRequest};
use crate::utils::state::AppState;
use crate::utils::{jolpica, scoring};

/// Maximum championship points still on the table this season.
pub async fn remaining_points(State(state): State<Arc<AppState>>) -> Result<Json<u32>, ApiError> {
    let now = Utc::now();
    let events = jolpica::season_schedule(&state, now.year()).await?;
    Ok(Json(scoring::maximum_remaining_points(now, &events)))
}

/// Round-by-round cumulative points for the tracked drivers. Only rounds
/// whose race started before now are fetched; the first archive failure
/// aborts the whole request.
pub async fn points_across_season(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SeasonRequest>,
) -> Result<Json<HashMap<String, Vec<ProgressionSample>>>, ApiError> {
    let now = Utc::now();
    validate_year(request.year, now.year())?;

    let events = jolpica::season_schedule(&state, request.year).await?;
    let mut rounds: Vec<RoundScores> = Vec::with_capacity(events.len());
    for event in events.iter().filter(|e| e.race_start < now) {
        rounds.push(jolpica::round_scores(&state, request.year, event.round).await?);
    }

    Ok(Json(scoring::points_progression(
        &state.config.tracked_drivers,
        &rounds,
    )))
}
