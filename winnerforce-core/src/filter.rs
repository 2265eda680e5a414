//! Day and range selection over projected events.

use std::collections::BTreeMap;

use crate::date::{CanonicalDay, DateLike, DayNormalizer};
use crate::event::CalendarEvent;

/// Events falling on `target_day`, in input order.
///
/// An unparseable target matches nothing.
pub fn events_on_day<'e>(
    events: &'e [CalendarEvent],
    target_day: &DateLike,
    normalizer: &DayNormalizer,
) -> Vec<&'e CalendarEvent> {
    let Ok(target) = normalizer.normalize_to_day(target_day) else {
        return Vec::new();
    };

    events.iter().filter(|e| e.date == target).collect()
}

/// Events whose day lies within `from..=to`, in input order.
/// `None` bounds are open.
pub fn events_in_range<'e>(
    events: &'e [CalendarEvent],
    from: Option<CanonicalDay>,
    to: Option<CanonicalDay>,
) -> Vec<&'e CalendarEvent> {
    events
        .iter()
        .filter(|e| from.is_none_or(|from| e.date >= from))
        .filter(|e| to.is_none_or(|to| e.date <= to))
        .collect()
}

/// Stable sort by day; events on the same day keep their relative order.
pub fn sort_chronologically(events: &mut [CalendarEvent]) {
    events.sort_by_key(|e| e.date);
}

/// Events bucketed by day, days ascending, input order within a day.
pub fn group_by_day<'e, I>(events: I) -> BTreeMap<CanonicalDay, Vec<&'e CalendarEvent>>
where
    I: IntoIterator<Item = &'e CalendarEvent>,
{
    let mut days: BTreeMap<CanonicalDay, Vec<&'e CalendarEvent>> = BTreeMap::new();
    for event in events {
        days.entry(event.date).or_default().push(event);
    }
    days
}
