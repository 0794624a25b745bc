use dashmap::DashMap;
use reqwest::Client;
use std::collections::HashMap;

use crate::models::cache::CacheEntry;
use crate::models::laps::DriverLaps;
use crate::models::schedule::Event;
use crate::utils::config::Config;

pub struct AppState {
    pub config: Config,
    pub http_client: Client,
    /// Season schedules keyed by year; the published calendar rarely changes.
    pub schedule_cache: DashMap<i32, CacheEntry<Vec<Event>>>,
    /// Formatted lap tables keyed by "year-round-session".
    pub laps_cache: DashMap<String, CacheEntry<HashMap<String, DriverLaps>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            http_client: Client::new(),
            schedule_cache: DashMap::new(),
            laps_cache: DashMap::new(),
        }
    }
}
