use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{Datelike, Utc};

use crate::handlers::validate_year;
use crate::models::error::ApiError;
use crate::models::points::SeasonRequest;
use crate::models::schedule::{self, Event, EventFormat};
use crate::utils::jolpica;
use crate::utils::state::AppState;

/// A season's calendar as (event name, weekend format) pairs, in round order.
pub async fn event_schedule(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SeasonRequest>,
) -> Result<Json<Vec<(String, EventFormat)>>, ApiError> {
    validate_year(request.year, Utc::now().year())?;
    let events = jolpica::season_schedule(&state, request.year).await?;
    Ok(Json(
        events.into_iter().map(|e| (e.name, e.format)).collect(),
    ))
}

/// The event that is ongoing or up next, timestamps in RFC 3339.
pub async fn next_event(State(state): State<Arc<AppState>>) -> Result<Json<Event>, ApiError> {
    let now = Utc::now();
    let events = jolpica::season_schedule(&state, now.year()).await?;
    let next = schedule::next_event(now, &events).ok_or_else(|| {
        ApiError::NotFound("the season is over; no upcoming events".to_string())
    })?;
    Ok(Json(next.clone()))
}
