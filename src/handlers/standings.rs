use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{from_str, Value};

use crate::models::error::ApiError;
use crate::utils::state::AppState;

/// Current championship driver standings, relayed verbatim from the results
/// archive. Clients index `[0].DriverStandings`.
pub async fn driver_standings(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let res = state
        .http_client
        .get(format!(
            "{}/current/driverstandings/?format=json",
            state.config.jolpica_base_url
        ))
        .send()
        .await?;
    let body = res.text().await?;
    let payload: Value = from_str(&body)?;

    let lists = payload["MRData"]["StandingsTable"]["StandingsLists"].clone();
    if !lists.is_array() {
        return Err(ApiError::Upstream(
            "standings payload missing standings lists".to_string(),
        ));
    }
    Ok(Json(lists))
}
