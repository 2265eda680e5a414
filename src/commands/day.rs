use anyhow::Result;
use owo_colors::OwoColorize;
use winnerforce_core::filter::{events_on_day, sort_chronologically};
use winnerforce_core::projector::EventProjector;
use winnerforce_core::{CalendarEvent, CanonicalDay, DayNormalizer, Snapshot};

use crate::commands::{day_arg, print_json};
use crate::render::{Render, pluralize};

pub fn run(snapshot: &Snapshot, normalizer: &DayNormalizer, date: &str, json: bool) -> Result<()> {
    // Validate up front so a typo is an error rather than an empty day.
    let day = day_arg(date, normalizer)?;
    let found = events_for_day(snapshot, normalizer, day);

    if json {
        return print_json(&found);
    }

    println!(
        "{} {}",
        day.date().format("%A %B %-d, %Y").to_string().bold(),
        format!("({} {})", found.len(), pluralize("event", found.len())).dimmed()
    );

    if found.is_empty() {
        println!("  {}", "Nothing scheduled".dimmed());
    }

    for event in &found {
        println!("  {}", event.render());
    }

    Ok(())
}

/// Events on `day`, sorted by day with input order kept among equals.
fn events_for_day(snapshot: &Snapshot, normalizer: &DayNormalizer, day: CanonicalDay) -> Vec<CalendarEvent> {
    let mut events = EventProjector::for_snapshot(*normalizer, snapshot).project_snapshot(snapshot);
    sort_chronologically(&mut events);

    events_on_day(&events, &day.into(), normalizer)
        .into_iter()
        .cloned()
        .collect()
}
