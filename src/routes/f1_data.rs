use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    laps::laps,
    points::{points_across_season, remaining_points},
    schedule::{event_schedule, next_event},
    standings::driver_standings,
};
use crate::utils::state::AppState;

/// One route per statistics endpoint, mapped 1:1 onto its handler.
pub fn f1_data_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/driver-standings", get(driver_standings))
        .route("/remaining-points", get(remaining_points))
        .route("/laps", post(laps))
        .route("/points-across-season", post(points_across_season))
        .route("/event-schedule", post(event_schedule))
        .route("/next-event", get(next_event))
}
