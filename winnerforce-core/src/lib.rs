//! Core types for Winnerforce calendar and activity views.
//!
//! This crate turns heterogeneous backend records into view-ready data:
//! - `date` normalizes mixed date representations to a canonical day
//! - `reference` resolves fields that hold either an id or an expanded record
//! - `projector` turns posts and campaigns into calendar events
//! - `filter` selects events by day or range
//! - `association` answers "is A linked to B" queries
//! - `store` keeps client-side associations (team assignments) behind a
//!   key-value interface

pub mod association;
pub mod config;
pub mod date;
pub mod error;
pub mod event;
pub mod filter;
pub mod model;
pub mod projector;
pub mod reference;
pub mod snapshot;
pub mod store;

pub use date::{CanonicalDay, DateLike, DateOnlyPolicy, DayNormalizer, DayZone};
pub use error::{DateParseError, WinnerforceError, WinnerforceResult};
pub use event::{CalendarEvent, EventKind, EventSource};
pub use model::{Campaign, Goal, Identifier, ScheduledPost};
pub use reference::{Record, Reference, ResolvedRef};
pub use snapshot::Snapshot;
