use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Outer bound on how long a race can still be underway after its start,
/// red-flag suspensions included.
pub const MAX_RACE_DURATION_HOURS: i64 = 4;

/// Weekend layout of an event, as the schedule archive distinguishes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFormat {
    Conventional,
    Sprint,
    SprintShootout,
    SprintQualifying,
}

impl EventFormat {
    pub fn is_sprint_weekend(&self) -> bool {
        !matches!(self, EventFormat::Conventional)
    }
}

/// One scheduled competition weekend. Timestamps are normalised to UTC when
/// the event is built from an archive row, so comparisons downstream never
/// deal with mixed or missing zones.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub round: u32,
    pub name: String,
    pub country: String,
    pub race_start: DateTime<Utc>,
    pub sprint_start: Option<DateTime<Utc>>,
    pub format: EventFormat,
}

impl Event {
    /// The race has started but its window has not closed yet.
    pub fn race_underway(&self, now: DateTime<Utc>) -> bool {
        self.race_start <= now
            && now < self.race_start + Duration::hours(MAX_RACE_DURATION_HOURS)
    }
}

/// The event that is either ongoing or the soonest upcoming one.
pub fn next_event(now: DateTime<Utc>, events: &[Event]) -> Option<&Event> {
    events
        .iter()
        .filter(|e| now < e.race_start + Duration::hours(MAX_RACE_DURATION_HOURS))
        .min_by_key(|e| e.race_start)
}

// Raw schedule rows as the results archive returns them. Dates and times are
// strings and most keys are PascalCase.

#[derive(Debug, Clone, Deserialize)]
pub struct RawSession {
    pub date: String,
    pub time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLocation {
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCircuit {
    #[serde(rename = "Location")]
    pub location: RawLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRace {
    pub round: String,
    #[serde(rename = "raceName")]
    pub race_name: String,
    #[serde(rename = "Circuit")]
    pub circuit: RawCircuit,
    pub date: String,
    pub time: Option<String>,
    #[serde(rename = "Sprint")]
    pub sprint: Option<RawSession>,
    #[serde(rename = "SprintShootout")]
    pub sprint_shootout: Option<RawSession>,
    #[serde(rename = "SprintQualifying")]
    pub sprint_qualifying: Option<RawSession>,
}

impl RawRace {
    pub fn into_event(self) -> Option<Event> {
        let round = self.round.parse().ok()?;
        let race_start = parse_utc(&self.date, self.time.as_deref())?;
        let sprint_start = self
            .sprint
            .as_ref()
            .and_then(|s| parse_utc(&s.date, s.time.as_deref()));

        let format = if self.sprint_qualifying.is_some() {
            EventFormat::SprintQualifying
        } else if self.sprint_shootout.is_some() {
            EventFormat::SprintShootout
        } else if self.sprint.is_some() {
            EventFormat::Sprint
        } else {
            EventFormat::Conventional
        };

        Some(Event {
            round,
            name: self.race_name,
            country: self.circuit.location.country,
            race_start,
            sprint_start,
            format,
        })
    }
}

/// Combine the archive's date and optional time strings into a UTC instant.
/// Older seasons carry no time component; those fall back to midnight UTC.
pub fn parse_utc(date: &str, time: Option<&str>) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = match time {
        Some(t) => NaiveTime::parse_from_str(t.trim_end_matches('Z'), "%H:%M:%S").ok()?,
        None => NaiveTime::MIN,
    };
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(round: u32, race_start: DateTime<Utc>) -> Event {
        Event {
            round,
            name: format!("Round {round}"),
            country: "Italy".to_string(),
            race_start,
            sprint_start: None,
            format: EventFormat::Conventional,
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn parse_utc_with_time() {
        let ts = parse_utc("2025-03-16", Some("04:00:00Z")).unwrap();
        assert_eq!(ts, at("2025-03-16T04:00:00Z"));
    }

    #[test]
    fn parse_utc_without_time_is_midnight() {
        let ts = parse_utc("1998-05-10", None).unwrap();
        assert_eq!(ts, at("1998-05-10T00:00:00Z"));
    }

    #[test]
    fn parse_utc_rejects_garbage() {
        assert!(parse_utc("sometime", None).is_none());
        assert!(parse_utc("2025-03-16", Some("soon")).is_none());
    }

    #[test]
    fn raw_race_derives_format_from_session_blocks() {
        let body = r#"{
            "round": "6",
            "raceName": "Miami Grand Prix",
            "Circuit": {"Location": {"country": "USA"}},
            "date": "2025-05-04",
            "time": "20:00:00Z",
            "Sprint": {"date": "2025-05-03", "time": "16:00:00Z"},
            "SprintQualifying": {"date": "2025-05-02", "time": "20:30:00Z"}
        }"#;
        let raw: RawRace = serde_json::from_str(body).unwrap();
        let event = raw.into_event().unwrap();
        assert_eq!(event.round, 6);
        assert_eq!(event.format, EventFormat::SprintQualifying);
        assert!(event.format.is_sprint_weekend());
        assert_eq!(event.sprint_start, Some(at("2025-05-03T16:00:00Z")));
        assert_eq!(event.race_start, at("2025-05-04T20:00:00Z"));
    }

    #[test]
    fn raw_race_without_sprint_is_conventional() {
        let body = r#"{
            "round": "1",
            "raceName": "Australian Grand Prix",
            "Circuit": {"Location": {"country": "Australia"}},
            "date": "2025-03-16",
            "time": "04:00:00Z"
        }"#;
        let raw: RawRace = serde_json::from_str(body).unwrap();
        let event = raw.into_event().unwrap();
        assert_eq!(event.format, EventFormat::Conventional);
        assert!(event.sprint_start.is_none());
    }

    #[test]
    fn next_event_prefers_soonest_upcoming() {
        let now = at("2025-06-01T12:00:00Z");
        let events = vec![
            event(1, at("2025-03-16T04:00:00Z")),
            event(2, at("2025-06-15T13:00:00Z")),
            event(3, at("2025-06-29T13:00:00Z")),
        ];
        assert_eq!(next_event(now, &events).unwrap().round, 2);
    }

    #[test]
    fn next_event_keeps_ongoing_race() {
        let events = vec![
            event(1, at("2025-03-16T04:00:00Z")),
            event(2, at("2025-06-15T13:00:00Z")),
        ];
        // Half an hour into round 2, it is still the current event.
        let now = at("2025-06-15T13:30:00Z");
        assert_eq!(next_event(now, &events).unwrap().round, 2);
    }

    #[test]
    fn next_event_none_after_season() {
        let events = vec![event(1, at("2025-03-16T04:00:00Z"))];
        assert!(next_event(at("2025-12-01T00:00:00Z"), &events).is_none());
    }
}
