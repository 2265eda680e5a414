//! Projection of posts and campaigns into calendar events.
//!
//! Records whose date does not parse are dropped and logged, never emitted
//! with a made-up date. Output order follows input order; sort explicitly
//! with [`crate::filter::sort_chronologically`] when needed.

use tracing::warn;

use crate::date::{CanonicalDay, DateLike, DayNormalizer};
use crate::error::DateParseError;
use crate::event::{CalendarEvent, EventKind, EventSource};
use crate::model::{Campaign, Goal, ScheduledPost};
use crate::reference::{resolve, resolve_all};
use crate::snapshot::Snapshot;

/// Builds calendar events, resolving embedded references against the
/// campaigns and goals it knows about.
#[derive(Debug, Clone)]
pub struct EventProjector<'a> {
    normalizer: DayNormalizer,
    campaigns: &'a [Campaign],
    goals: &'a [Goal],
}

impl<'a> EventProjector<'a> {
    pub fn new(normalizer: DayNormalizer) -> Self {
        EventProjector {
            normalizer,
            campaigns: &[],
            goals: &[],
        }
    }

    pub fn for_snapshot(normalizer: DayNormalizer, snapshot: &'a Snapshot) -> Self {
        EventProjector {
            normalizer,
            campaigns: &snapshot.campaigns,
            goals: &snapshot.goals,
        }
    }

    pub fn with_known(mut self, campaigns: &'a [Campaign], goals: &'a [Goal]) -> Self {
        self.campaigns = campaigns;
        self.goals = goals;
        self
    }

    /// Project a post onto the day it is scheduled for.
    pub fn project_post(&self, post: &ScheduledPost) -> Option<CalendarEvent> {
        let date = match self.normalizer.normalize_to_day(&post.scheduled_at) {
            Ok(date) => date,
            Err(e) => {
                warn!(post = %post.id, error = %e, "dropping post with unparseable scheduledAt");
                return None;
            }
        };

        Some(CalendarEvent {
            id: post.id.clone(),
            title: post.title.clone(),
            date,
            kind: EventKind::Post,
            status: post.status.clone(),
            campaign: resolve(post.campaign.as_ref(), self.campaigns),
            goals: resolve(post.goal.as_ref(), self.goals).into_iter().collect(),
            source: EventSource::Post(post.clone()),
        })
    }

    /// Project a campaign into its start and end events. Each is dropped on
    /// its own if its date does not parse.
    pub fn project_campaign(&self, campaign: &Campaign) -> Vec<CalendarEvent> {
        let goals = campaign
            .goals
            .as_deref()
            .map(|refs| resolve_all(refs, self.goals))
            .unwrap_or_default();

        let boundaries = [
            (EventKind::CampaignStart, &campaign.start, "start", campaign.name.clone()),
            (EventKind::CampaignEnd, &campaign.end, "end", format!("{} ends", campaign.name)),
        ];

        boundaries
            .into_iter()
            .filter_map(|(kind, when, suffix, title)| {
                let date = self.day_or_warn(when, &campaign.id, suffix).ok()?;

                Some(CalendarEvent {
                    id: format!("{}:{}", campaign.id, suffix),
                    title,
                    date,
                    kind,
                    status: campaign.status.clone(),
                    campaign: None,
                    goals: goals.clone(),
                    source: EventSource::Campaign(campaign.clone()),
                })
            })
            .collect()
    }

    /// Every event for a set of posts and campaigns: posts first, then
    /// campaign boundaries, each in input order.
    pub fn project_all(&self, posts: &[ScheduledPost], campaigns: &[Campaign]) -> Vec<CalendarEvent> {
        let mut events: Vec<CalendarEvent> =
            posts.iter().filter_map(|p| self.project_post(p)).collect();

        for campaign in campaigns {
            events.extend(self.project_campaign(campaign));
        }

        events
    }

    pub fn project_snapshot(&self, snapshot: &Snapshot) -> Vec<CalendarEvent> {
        self.project_all(&snapshot.posts, &snapshot.campaigns)
    }

    fn day_or_warn(
        &self,
        when: &DateLike,
        campaign_id: &str,
        boundary: &str,
    ) -> Result<CanonicalDay, DateParseError> {
        self.normalizer.normalize_to_day(when).inspect_err(|e| {
            warn!(campaign = %campaign_id, boundary, error = %e, "dropping campaign event with unparseable date");
        })
    }
}
