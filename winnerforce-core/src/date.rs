//! Day-granularity normalization of mixed date representations.
//!
//! Backend responses carry dates as ISO strings, epoch milliseconds or
//! already-typed values depending on where they came from. Every calendar
//! comparison goes through [`DayNormalizer`] so all views agree on which day
//! a record belongs to.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::DateParseError;

/// Date-time formats carrying an explicit UTC offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

/// Date-time formats without an offset (wall-clock time).
const WALL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date as it arrives from the backend or from in-process code.
///
/// Only `Millis`, `Text`, `DateTimeZoned` and `Missing` are produced when
/// deserializing; the typed variants exist for values built in code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateLike {
    /// Milliseconds since the Unix epoch
    Millis(i64),
    /// Unparsed ISO-8601 date or date-time
    Text(String),
    /// Wall-clock time in an IANA zone
    DateTimeZoned {
        datetime: NaiveDateTime,
        tzid: String,
    },
    /// `null` or an absent field. Never normalizes to a day.
    #[default]
    Missing,
    /// All-day value, taken as that day in the consumer zone
    #[serde(skip_deserializing)]
    Date(NaiveDate),
    #[serde(skip_deserializing)]
    DateTimeUtc(DateTime<Utc>),
    /// Wall-clock time in the consumer zone
    #[serde(skip_deserializing)]
    DateTimeFloating(NaiveDateTime),
}

impl fmt::Display for DateLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLike::Millis(ms) => write!(f, "{}ms", ms),
            DateLike::Text(s) => write!(f, "{}", s),
            DateLike::DateTimeZoned { datetime, tzid } => {
                write!(f, "{} ({})", datetime.format("%Y-%m-%dT%H:%M:%S"), tzid)
            }
            DateLike::Missing => write!(f, "(missing)"),
            DateLike::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            DateLike::DateTimeUtc(dt) => write!(f, "{}", dt.to_rfc3339()),
            DateLike::DateTimeFloating(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

impl From<&str> for DateLike {
    fn from(s: &str) -> Self {
        DateLike::Text(s.to_string())
    }
}

impl From<String> for DateLike {
    fn from(s: String) -> Self {
        DateLike::Text(s)
    }
}

impl From<NaiveDate> for DateLike {
    fn from(d: NaiveDate) -> Self {
        DateLike::Date(d)
    }
}

impl From<NaiveDateTime> for DateLike {
    fn from(dt: NaiveDateTime) -> Self {
        DateLike::DateTimeFloating(dt)
    }
}

impl<Z: TimeZone> From<DateTime<Z>> for DateLike {
    fn from(dt: DateTime<Z>) -> Self {
        DateLike::DateTimeUtc(dt.with_timezone(&Utc))
    }
}

impl From<CanonicalDay> for DateLike {
    /// Feeding a canonical day back in yields the same canonical day.
    fn from(day: CanonicalDay) -> Self {
        DateLike::DateTimeFloating(day.0.and_time(NaiveTime::MIN))
    }
}

/// A day in the consumer zone, used only for day-granularity comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalDay(NaiveDate);

impl CanonicalDay {
    pub fn new(date: NaiveDate) -> Self {
        CanonicalDay(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The instant this day starts in `zone`.
    pub fn midnight(&self, zone: &DayZone) -> Option<DateTime<Utc>> {
        zone.resolve_wall(&self.0.and_time(NaiveTime::MIN))
    }
}

impl fmt::Display for CanonicalDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// The zone in which instants are truncated to days.
///
/// `Local` follows the machine the code runs on, so the same backend
/// timestamp can land on different days for users in different zones.
/// Use `Named` to pin the zone when that matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayZone {
    #[default]
    Local,
    Named(Tz),
}

impl DayZone {
    fn day_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
        match self {
            DayZone::Local => instant.with_timezone(&Local).date_naive(),
            DayZone::Named(tz) => instant.with_timezone(tz).date_naive(),
        }
    }

    fn resolve_wall(&self, wall: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            DayZone::Local => resolve_in(&Local, wall),
            DayZone::Named(tz) => resolve_in(tz, wall),
        }
    }
}

/// Resolve a wall-clock time in `tz`, moving times inside a DST gap forward
/// by an hour the way browsers do.
fn resolve_in<Z: TimeZone>(tz: &Z, wall: &NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(wall)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(*wall + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

impl fmt::Display for DayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayZone::Local => write!(f, "local"),
            DayZone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

impl FromStr for DayZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("local") {
            return Ok(DayZone::Local);
        }
        s.parse::<Tz>()
            .map(DayZone::Named)
            .map_err(|_| format!("Unknown time zone '{}'. Expected \"local\" or an IANA name", s))
    }
}

impl Serialize for DayZone {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DayZone {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How a bare `YYYY-MM-DD` string is placed in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOnlyPolicy {
    /// Midnight UTC, as browsers parse date-only ISO strings
    #[default]
    Utc,
    /// That calendar day in the consumer zone
    Local,
}

/// A parsed point in time, before truncation.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Moment {
    Instant(DateTime<Utc>),
    Wall(NaiveDateTime),
}

/// Truncates `DateLike` values to canonical days in a fixed zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayNormalizer {
    zone: DayZone,
    date_only: DateOnlyPolicy,
}

impl DayNormalizer {
    pub fn new(zone: DayZone, date_only: DateOnlyPolicy) -> Self {
        DayNormalizer { zone, date_only }
    }

    pub fn in_zone(zone: DayZone) -> Self {
        DayNormalizer {
            zone,
            date_only: DateOnlyPolicy::default(),
        }
    }

    pub fn zone(&self) -> DayZone {
        self.zone
    }

    pub fn date_only(&self) -> DateOnlyPolicy {
        self.date_only
    }

    /// Parse `d` and truncate it to midnight in the consumer zone.
    pub fn normalize_to_day(&self, d: &DateLike) -> Result<CanonicalDay, DateParseError> {
        let day = match self.moment(d)? {
            Moment::Instant(instant) => self.zone.day_of(&instant),
            Moment::Wall(wall) => wall.date(),
        };
        Ok(CanonicalDay(day))
    }

    /// Whether both values fall on the same day. Unparseable input never
    /// matches.
    pub fn days_equal(&self, a: &DateLike, b: &DateLike) -> bool {
        self.try_days_equal(a, b).unwrap_or(false)
    }

    pub fn try_days_equal(&self, a: &DateLike, b: &DateLike) -> Result<bool, DateParseError> {
        Ok(self.normalize_to_day(a)? == self.normalize_to_day(b)?)
    }

    /// Parse `d` into an absolute instant, resolving wall-clock values in the
    /// consumer zone.
    pub fn to_instant(&self, d: &DateLike) -> Result<DateTime<Utc>, DateParseError> {
        match self.moment(d)? {
            Moment::Instant(instant) => Ok(instant),
            Moment::Wall(wall) => self
                .zone
                .resolve_wall(&wall)
                .ok_or_else(|| DateParseError::new(d.to_string(), "time does not exist in zone")),
        }
    }

    fn moment(&self, d: &DateLike) -> Result<Moment, DateParseError> {
        match d {
            DateLike::Millis(ms) => DateTime::from_timestamp_millis(*ms)
                .map(Moment::Instant)
                .ok_or_else(|| DateParseError::new(d.to_string(), "epoch milliseconds out of range")),
            DateLike::Text(s) => self.parse_text(s),
            DateLike::DateTimeZoned { datetime, tzid } => {
                let tz: Tz = tzid
                    .parse()
                    .map_err(|_| DateParseError::new(d.to_string(), format!("unknown tzid '{}'", tzid)))?;
                resolve_in(&tz, datetime)
                    .map(Moment::Instant)
                    .ok_or_else(|| DateParseError::new(d.to_string(), "time does not exist in zone"))
            }
            DateLike::Missing => Err(DateParseError::new("", "no date given")),
            DateLike::Date(date) => Ok(Moment::Wall(date.and_time(NaiveTime::MIN))),
            DateLike::DateTimeUtc(dt) => Ok(Moment::Instant(*dt)),
            DateLike::DateTimeFloating(dt) => Ok(Moment::Wall(*dt)),
        }
    }

    fn parse_text(&self, raw: &str) -> Result<Moment, DateParseError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(DateParseError::new(raw, "empty string"));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Moment::Instant(dt.with_timezone(&Utc)));
        }

        if let Some(naive) = s.strip_suffix(['Z', 'z']) {
            if let Some(wall) = parse_wall(naive) {
                return Ok(Moment::Instant(wall.and_utc()));
            }
        }

        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, format) {
                return Ok(Moment::Instant(dt.with_timezone(&Utc)));
            }
        }

        if let Some(wall) = parse_wall(s) {
            return Ok(Moment::Wall(wall));
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
            let midnight = date.and_time(NaiveTime::MIN);
            return Ok(match self.date_only {
                DateOnlyPolicy::Utc => Moment::Instant(midnight.and_utc()),
                DateOnlyPolicy::Local => Moment::Wall(midnight),
            });
        }

        Err(DateParseError::new(raw, "not an ISO-8601 date or date-time"))
    }
}

fn parse_wall(s: &str) -> Option<NaiveDateTime> {
    WALL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use proptest::prelude::*;

    fn utc() -> DayNormalizer {
        DayNormalizer::in_zone(DayZone::Named(chrono_tz::UTC))
    }

    fn new_york() -> DayNormalizer {
        DayNormalizer::in_zone(DayZone::Named(chrono_tz::America::New_York))
    }

    fn day(y: i32, m: u32, d: u32) -> CanonicalDay {
        CanonicalDay::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    // --- day boundaries ---

    #[test]
    fn last_second_and_first_second_are_different_days() {
        let a = DateLike::from("2023-06-15T23:59:59");
        let b = DateLike::from("2023-06-16T00:00:01");
        assert!(!utc().days_equal(&a, &b));
    }

    #[test]
    fn start_and_end_of_day_are_same_day() {
        let a = DateLike::from("2023-06-15T00:00:00");
        let b = DateLike::from("2023-06-15T23:59:59");
        assert!(utc().days_equal(&a, &b));
    }

    #[test]
    fn utc_instant_truncates_in_consumer_zone() {
        let late = DateLike::from("2023-06-16T02:00:00Z");
        assert_eq!(new_york().normalize_to_day(&late).unwrap(), day(2023, 6, 15));
        assert_eq!(utc().normalize_to_day(&late).unwrap(), day(2023, 6, 16));
    }

    #[test]
    fn offset_strings_are_absolute() {
        let d = DateLike::from("2023-06-15T23:30:00+02:00");
        assert_eq!(utc().normalize_to_day(&d).unwrap(), day(2023, 6, 15));

        let compact = DateLike::from("2023-06-15T01:30:00.000+0300");
        assert_eq!(utc().normalize_to_day(&compact).unwrap(), day(2023, 6, 14));
    }

    #[test]
    fn fractional_seconds_and_missing_seconds_parse() {
        let n = utc();
        assert!(n.normalize_to_day(&"2023-06-15T10:30:00.123Z".into()).is_ok());
        assert!(n.normalize_to_day(&"2023-06-15T10:30Z".into()).is_ok());
        assert!(n.normalize_to_day(&"2023-06-15T10:30".into()).is_ok());
        assert!(n.normalize_to_day(&"2023-06-15 10:30:00".into()).is_ok());
    }

    #[test]
    fn floating_time_keeps_its_wall_date() {
        let d = DateLike::from("2023-06-15T23:30:00");
        assert_eq!(new_york().normalize_to_day(&d).unwrap(), day(2023, 6, 15));
        assert_eq!(utc().normalize_to_day(&d).unwrap(), day(2023, 6, 15));
    }

    #[test]
    fn date_only_follows_policy() {
        let d = DateLike::from("2023-06-15");

        // Midnight UTC is still the previous evening in New York.
        assert_eq!(new_york().normalize_to_day(&d).unwrap(), day(2023, 6, 14));

        let local = DayNormalizer::new(
            DayZone::Named(chrono_tz::America::New_York),
            DateOnlyPolicy::Local,
        );
        assert_eq!(local.normalize_to_day(&d).unwrap(), day(2023, 6, 15));
    }

    #[test]
    fn typed_variants_normalize() {
        let n = new_york();
        let instant = Utc.with_ymd_and_hms(2023, 6, 15, 3, 0, 0).unwrap();
        assert_eq!(n.normalize_to_day(&instant.into()).unwrap(), day(2023, 6, 14));

        let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        assert_eq!(n.normalize_to_day(&date.into()).unwrap(), day(2023, 6, 15));
    }

    #[test]
    fn zoned_value_resolves_through_its_tzid() {
        let d = DateLike::DateTimeZoned {
            datetime: NaiveDate::from_ymd_opt(2023, 6, 16)
                .unwrap()
                .and_hms_opt(1, 30, 0)
                .unwrap(),
            tzid: "Europe/Berlin".to_string(),
        };
        // 01:30 in Berlin (CEST) is 23:30 UTC the previous day.
        assert_eq!(utc().normalize_to_day(&d).unwrap(), day(2023, 6, 15));
    }

    #[test]
    fn unknown_tzid_is_an_error() {
        let d = DateLike::DateTimeZoned {
            datetime: NaiveDate::from_ymd_opt(2023, 6, 16)
                .unwrap()
                .and_hms_opt(1, 30, 0)
                .unwrap(),
            tzid: "Mars/Olympus".to_string(),
        };
        let err = utc().normalize_to_day(&d).unwrap_err();
        assert!(err.reason.contains("Mars/Olympus"));
    }

    #[test]
    fn epoch_millis_normalize() {
        // 2023-06-15T10:30:00Z
        let d = DateLike::Millis(1_686_825_000_000);
        assert_eq!(utc().normalize_to_day(&d).unwrap(), day(2023, 6, 15));
        assert!(utc().normalize_to_day(&DateLike::Millis(i64::MAX)).is_err());
    }

    // --- parse failures ---

    #[test]
    fn garbage_is_a_parse_error() {
        let err = utc().normalize_to_day(&"not-a-date".into()).unwrap_err();
        assert_eq!(err.input, "not-a-date");
        assert!(utc().normalize_to_day(&"".into()).is_err());
        assert!(utc().normalize_to_day(&"2023-13-45".into()).is_err());
    }

    #[test]
    fn unparseable_dates_never_match() {
        let n = utc();
        let bad = DateLike::from("not-a-date");
        assert!(!n.days_equal(&bad, &bad));
        assert!(!n.days_equal(&bad, &"2023-06-15".into()));
        assert!(n.try_days_equal(&bad, &"2023-06-15".into()).is_err());
    }

    // --- instants ---

    #[test]
    fn to_instant_resolves_wall_time_in_zone() {
        let instant = new_york().to_instant(&"2023-06-15T10:30".into()).unwrap();
        assert_eq!(instant.hour(), 14);
        assert_eq!(instant.minute(), 30);
    }

    #[test]
    fn to_instant_moves_dst_gap_forward() {
        // 02:30 does not exist in New York on 2023-03-12.
        let instant = new_york().to_instant(&"2023-03-12T02:30".into()).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2023, 3, 12, 7, 30, 0).unwrap());
    }

    #[test]
    fn canonical_midnight_is_start_of_day_in_zone() {
        let zone = DayZone::Named(chrono_tz::America::New_York);
        let midnight = day(2023, 6, 15).midnight(&zone).unwrap();
        assert_eq!(midnight, Utc.with_ymd_and_hms(2023, 6, 15, 4, 0, 0).unwrap());
    }

    // --- zones and serde ---

    #[test]
    fn day_zone_parses_local_and_iana_names() {
        assert_eq!("local".parse::<DayZone>().unwrap(), DayZone::Local);
        assert_eq!(
            "Europe/Paris".parse::<DayZone>().unwrap(),
            DayZone::Named(chrono_tz::Europe::Paris)
        );
        assert!("Nowhere/Special".parse::<DayZone>().is_err());
        assert_eq!(DayZone::Named(chrono_tz::Asia::Tokyo).to_string(), "Asia/Tokyo");
    }

    #[test]
    fn deserializes_backend_shapes() {
        let text: DateLike = serde_json::from_str("\"2023-06-15T10:30:00Z\"").unwrap();
        assert_eq!(text, DateLike::Text("2023-06-15T10:30:00Z".to_string()));

        let millis: DateLike = serde_json::from_str("1686825000000").unwrap();
        assert_eq!(millis, DateLike::Millis(1_686_825_000_000));

        let zoned: DateLike =
            serde_json::from_str(r#"{"datetime":"2023-06-15T10:30:00","tzid":"Asia/Tokyo"}"#)
                .unwrap();
        assert!(matches!(zoned, DateLike::DateTimeZoned { .. }));

        let null: DateLike = serde_json::from_str("null").unwrap();
        assert_eq!(null, DateLike::Missing);
    }

    #[test]
    fn missing_date_is_a_parse_error() {
        let err = utc().normalize_to_day(&DateLike::Missing).unwrap_err();
        assert_eq!(err.reason, "no date given");
        assert!(!utc().days_equal(&DateLike::Missing, &DateLike::Missing));
        assert!(utc().to_instant(&DateLike::default()).is_err());
    }

    #[test]
    fn canonical_day_feeds_back_unchanged() {
        let n = new_york();
        let first = n.normalize_to_day(&"2023-06-15T23:59:59Z".into()).unwrap();
        let second = n.normalize_to_day(&first.into()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.date().day(), 15);
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(ms in 0i64..4_102_444_800_000) {
            for zone in [DayZone::Named(chrono_tz::UTC), DayZone::Named(chrono_tz::Asia::Kolkata)] {
                let n = DayNormalizer::in_zone(zone);
                let once = n.normalize_to_day(&DateLike::Millis(ms)).unwrap();
                let twice = n.normalize_to_day(&once.into()).unwrap();
                prop_assert_eq!(once, twice);
            }
        }

        #[test]
        fn days_equal_is_commutative(a in 0i64..4_102_444_800_000, b in 0i64..4_102_444_800_000) {
            let n = DayNormalizer::in_zone(DayZone::Named(chrono_tz::America::Los_Angeles));
            let (a, b) = (DateLike::Millis(a), DateLike::Millis(b));
            prop_assert_eq!(n.days_equal(&a, &b), n.days_equal(&b, &a));
        }

        #[test]
        fn arbitrary_text_never_panics(s in ".{0,40}") {
            let n = utc();
            let parsed = DateLike::Text(s);
            let _ = n.normalize_to_day(&parsed);
            prop_assert_eq!(n.days_equal(&parsed, &parsed), n.normalize_to_day(&parsed).is_ok());
        }
    }
}
