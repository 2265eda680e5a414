//! Links between entities expressed as reference lists.
//!
//! Reference lists from the backend mix bare ids and expanded records in the
//! same array, so matching always goes through [`Reference::id`].

use crate::model::{Campaign, ScheduledPost};
use crate::reference::{Record, Reference};

/// Whether any entry of `parent_refs` points at `target_id`.
///
/// A missing or empty list is never associated. Collections that have not
/// loaded yet are passed as empty and simply match nothing.
pub fn is_associated<T: Record>(parent_refs: Option<&[Reference<T>]>, target_id: &str) -> bool {
    parent_refs
        .unwrap_or_default()
        .iter()
        .any(|r| r.id() == target_id)
}

/// Campaigns that list `goal_id` among their goals, in input order.
pub fn campaigns_for_goal<'c>(campaigns: &'c [Campaign], goal_id: &str) -> Vec<&'c Campaign> {
    campaigns
        .iter()
        .filter(|c| is_associated(c.goals.as_deref(), goal_id))
        .collect()
}

/// Posts that belong to `campaign_id`, in input order.
pub fn posts_for_campaign<'p>(posts: &'p [ScheduledPost], campaign_id: &str) -> Vec<&'p ScheduledPost> {
    posts
        .iter()
        .filter(|p| p.campaign.as_ref().is_some_and(|r| r.id() == campaign_id))
        .collect()
}

/// Posts that serve `goal_id`, either directly or through their campaign.
pub fn posts_for_goal<'p>(
    posts: &'p [ScheduledPost],
    campaigns: &[Campaign],
    goal_id: &str,
) -> Vec<&'p ScheduledPost> {
    let linked: Vec<&str> = campaigns_for_goal(campaigns, goal_id)
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();

    posts
        .iter()
        .filter(|p| {
            let direct = p.goal.as_ref().is_some_and(|r| r.id() == goal_id);
            let via_campaign = p
                .campaign
                .as_ref()
                .is_some_and(|r| linked.contains(&r.id()));
            direct || via_campaign
        })
        .collect()
}
