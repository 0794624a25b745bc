use serde::de::DeserializeOwned;
use serde_json::from_str;
use tracing::debug;

use crate::models::error::ApiError;
use crate::models::laps::{LapRecord, SessionDriver, SessionInfo, Stint};
use crate::utils::state::AppState;

/// Resolve a session by year, host country and session name. The schedule
/// archive and the session archive share no round numbering, so the country
/// of the event's circuit is the join key.
pub async fn find_session(
    state: &AppState,
    year: i32,
    country: &str,
    session_name: &str,
) -> Result<SessionInfo, ApiError> {
    let sessions: Vec<SessionInfo> = fetch_rows(
        state,
        "sessions",
        &[
            ("year", year.to_string()),
            ("country_name", country.to_string()),
            ("session_name", session_name.to_string()),
        ],
    )
    .await?;

    let session = sessions.into_iter().next().ok_or_else(|| {
        ApiError::NotFound(format!(
            "no {session_name} session found for {country} {year}"
        ))
    })?;
    debug!(
        "resolved {} {country} {year} to session {}",
        session.session_name, session.session_key
    );
    Ok(session)
}

pub async fn session_drivers(state: &AppState, session_key: i64) -> Result<Vec<SessionDriver>, ApiError> {
    fetch_rows(state, "drivers", &[("session_key", session_key.to_string())]).await
}

pub async fn session_laps(state: &AppState, session_key: i64) -> Result<Vec<LapRecord>, ApiError> {
    fetch_rows(state, "laps", &[("session_key", session_key.to_string())]).await
}

pub async fn session_stints(state: &AppState, session_key: i64) -> Result<Vec<Stint>, ApiError> {
    fetch_rows(state, "stints", &[("session_key", session_key.to_string())]).await
}

async fn fetch_rows<T: DeserializeOwned>(
    state: &AppState,
    endpoint: &str,
    query: &[(&str, String)],
) -> Result<Vec<T>, ApiError> {
    let res = state
        .http_client
        .get(format!("{}/{endpoint}", state.config.openf1_base_url))
        .query(query)
        .send()
        .await?;
    let body = res.text().await?;
    Ok(from_str(&body)?)
}
