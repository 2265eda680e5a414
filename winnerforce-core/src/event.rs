//! Calendar events derived from posts and campaigns.
//!
//! Events are built on demand for a view and never persisted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::CanonicalDay;
use crate::model::{Campaign, Identifier, ScheduledPost};
use crate::reference::ResolvedRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Post,
    CampaignStart,
    CampaignEnd,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Post => "post",
            EventKind::CampaignStart => "campaign-start",
            EventKind::CampaignEnd => "campaign-end",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The record an event was projected from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "record", rename_all = "lowercase")]
pub enum EventSource {
    Post(ScheduledPost),
    Campaign(Campaign),
}

/// A display-oriented calendar entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Post id, or `<campaign id>:start` / `<campaign id>:end`
    pub id: Identifier,
    pub title: String,
    pub date: CanonicalDay,
    pub kind: EventKind,
    pub status: String,
    /// Campaign the post belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<ResolvedRef>,
    /// Goals the post or campaign serves
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<ResolvedRef>,
    pub source: EventSource,
}

impl CalendarEvent {
    pub fn source_id(&self) -> &str {
        match &self.source {
            EventSource::Post(post) => &post.id,
            EventSource::Campaign(campaign) => &campaign.id,
        }
    }
}
