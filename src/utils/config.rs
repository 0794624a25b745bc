#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub jolpica_base_url: String,
    pub openf1_base_url: String,
    pub tracked_drivers: Vec<String>,
}

const DEFAULT_ROSTER: &str = "VER,NOR,PIA,LEC,HAM,RUS,ALO,SAI";

impl Config {
    pub fn init() -> Self {
        Config {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            jolpica_base_url: std::env::var("JOLPICA_BASE_URL")
                .unwrap_or_else(|_| "https://api.jolpi.ca/ergast/f1".to_string()),
            openf1_base_url: std::env::var("OPENF1_BASE_URL")
                .unwrap_or_else(|_| "https://api.openf1.org/v1".to_string()),
            tracked_drivers: parse_roster(
                &std::env::var("TRACKED_DRIVERS").unwrap_or_else(|_| DEFAULT_ROSTER.to_string()),
            ),
        }
    }
}

/// Comma-separated driver codes, e.g. "VER, NOR,PIA".
pub fn parse_roster(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|code| code.trim().to_uppercase())
        .filter(|code| !code.is_empty())
        .collect()
}
