use anyhow::Result;
use chrono::Duration;
use owo_colors::OwoColorize;
use winnerforce_core::filter::{events_in_range, group_by_day, sort_chronologically};
use winnerforce_core::projector::EventProjector;
use winnerforce_core::{CanonicalDay, DayNormalizer, Snapshot};

use crate::commands::{DEFAULT_EVENT_DAYS, day_arg, print_json, today};
use crate::render::Render;

pub fn run(
    snapshot: &Snapshot,
    normalizer: &DayNormalizer,
    from: Option<&str>,
    to: Option<&str>,
    json: bool,
) -> Result<()> {
    let today = today(normalizer);
    let from = match from {
        Some(s) => day_arg(s, normalizer)?,
        None => today,
    };
    let to = match to {
        Some(s) => day_arg(s, normalizer)?,
        None => CanonicalDay::new(from.date() + Duration::days(DEFAULT_EVENT_DAYS)),
    };

    if to < from {
        anyhow::bail!("--to ({}) is before --from ({})", to, from);
    }

    let mut events = EventProjector::for_snapshot(*normalizer, snapshot).project_snapshot(snapshot);
    sort_chronologically(&mut events);
    let in_range = events_in_range(&events, Some(from), Some(to));

    if json {
        return print_json(&in_range);
    }

    if in_range.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for (i, (day, day_events)) in group_by_day(in_range).into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", format_day_label(day, today).bold());
        for event in day_events {
            println!("  {}", event.render());
        }
    }

    Ok(())
}

/// Format a day as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_day_label(day: CanonicalDay, today: CanonicalDay) -> String {
    match (day.date() - today.date()).num_days() {
        -1 => "Yesterday".to_string(),
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => day.date().format("%a %b %-d").to_string(),
    }
}
