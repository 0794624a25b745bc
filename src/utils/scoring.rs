use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::models::points::{ProgressionSample, RoundScores};
use crate::models::schedule::Event;

// Race win pays 25 plus the fastest-lap bonus point; a sprint win pays 8.
// TODO: parameterise by season once the fastest-lap bonus drops from the rules.
pub const RACE_WIN_POINTS: u32 = 26;
pub const SPRINT_WIN_POINTS: u32 = 8;

/// The most points a driver could still score this season.
///
/// Counts every event whose race has not started, plus the most recently
/// started event while its race window is still open (the race may be
/// running, its points not yet paid out). Sprint points count only while the
/// sprint itself has not started.
pub fn maximum_remaining_points(now: DateTime<Utc>, events: &[Event]) -> u32 {
    let ongoing = events
        .iter()
        .filter(|e| e.race_start < now)
        .max_by_key(|e| e.race_start)
        .filter(|e| e.race_underway(now));

    let mut remaining_races = 0u32;
    let mut remaining_sprints = 0u32;

    for event in events {
        let upcoming = event.race_start >= now;
        let live = !upcoming && ongoing.is_some_and(|o| o.round == event.round);
        if !(upcoming || live) {
            continue;
        }
        remaining_races += 1;
        if event.sprint_start.is_some_and(|sprint| sprint >= now) {
            remaining_sprints += 1;
        }
    }

    remaining_races * RACE_WIN_POINTS + remaining_sprints * SPRINT_WIN_POINTS
}

/// Cumulative points per tracked driver over the given concluded rounds,
/// in schedule order.
///
/// A sample is appended for every round, scoring or not. Sprint points are
/// credited only when the driver also appears in that round's race results;
/// the archive awards the weekend as a unit.
pub fn points_progression(
    roster: &[String],
    rounds: &[RoundScores],
) -> HashMap<String, Vec<ProgressionSample>> {
    let mut progression = HashMap::with_capacity(roster.len());

    for driver in roster {
        let mut total = 0.0;
        let mut samples = Vec::with_capacity(rounds.len());

        for round in rounds {
            if let Some(race_points) = round.race.get(driver) {
                total += race_points;
                if let Some(sprint) = &round.sprint {
                    if let Some(sprint_points) = sprint.get(driver) {
                        total += sprint_points;
                    }
                }
            }
            samples.push(ProgressionSample(round.round, total));
        }

        progression.insert(driver.clone(), samples);
    }

    progression
}
