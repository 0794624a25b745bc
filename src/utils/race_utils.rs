use crate::models::laps::Stint;

/// Validate a requested session name against the names the session archive
/// uses, returning the canonical spelling.
pub fn canonical_session_name(requested: &str) -> Option<&'static str> {
    match requested {
        "Practice 1" => Some("Practice 1"),
        "Practice 2" => Some("Practice 2"),
        "Practice 3" => Some("Practice 3"),
        "Sprint Qualifying" => Some("Sprint Qualifying"),
        "Sprint Shootout" => Some("Sprint Shootout"),
        "Sprint" => Some("Sprint"),
        "Qualifying" => Some("Qualifying"),
        "Race" => Some("Race"),
        _ => None,
    }
}

/// Render a lap duration in seconds as clock text: unpadded hours, then
/// minutes, seconds and six fractional digits. Never carries a day segment.
pub fn format_lap_time(seconds: f64) -> String {
    let total_micros = (seconds * 1_000_000.0).round() as u64;
    let micros = total_micros % 1_000_000;
    let total_secs = total_micros / 1_000_000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;
    format!("{hours}:{mins:02}:{secs:02}.{micros:06}")
}

/// The compound a driver was on for a given lap, from the stint whose lap
/// range contains it.
pub fn compound_for_lap(stints: &[Stint], driver_number: u32, lap_number: u32) -> String {
    stints
        .iter()
        .find(|s| {
            s.driver_number == driver_number
                && s.lap_start <= lap_number
                && lap_number <= s.lap_end
        })
        .and_then(|s| s.compound.clone())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_typical_lap() {
        assert_eq!(format_lap_time(83.456), "0:01:23.456000");
    }

    #[test]
    fn formats_whole_minute_and_over_an_hour() {
        assert_eq!(format_lap_time(60.0), "0:01:00.000000");
        assert_eq!(format_lap_time(3723.5), "1:02:03.500000");
    }

    #[test]
    fn no_day_segment_ever() {
        assert!(!format_lap_time(90.0).contains("day"));
    }

    #[test]
    fn session_names_validate_against_known_set() {
        assert_eq!(canonical_session_name("Race"), Some("Race"));
        assert_eq!(canonical_session_name("Sprint"), Some("Sprint"));
        assert_eq!(canonical_session_name("Warmup"), None);
        assert_eq!(canonical_session_name("race"), None);
    }

    #[test]
    fn compound_joins_on_stint_range() {
        let stints = vec![
            Stint {
                driver_number: 1,
                compound: Some("SOFT".to_string()),
                lap_start: 1,
                lap_end: 12,
            },
            Stint {
                driver_number: 1,
                compound: Some("HARD".to_string()),
                lap_start: 13,
                lap_end: 57,
            },
        ];
        assert_eq!(compound_for_lap(&stints, 1, 12), "SOFT");
        assert_eq!(compound_for_lap(&stints, 1, 13), "HARD");
        assert_eq!(compound_for_lap(&stints, 44, 5), "UNKNOWN");
    }
}
