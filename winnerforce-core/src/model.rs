//! Backend records consumed by the calendar and activity views.
//!
//! Records are read-only snapshots: the backend owns them and the client
//! re-fetches after every write. Fields a partial response may omit default
//! to empty values.

use serde::{Deserialize, Serialize};

use crate::date::DateLike;
use crate::reference::{Record, Reference};

/// Opaque record identifier, unique within its collection.
pub type Identifier = String;

/// A social-media post scheduled for publication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPost {
    pub id: Identifier,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub scheduled_at: DateLike,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<Reference<Campaign>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Reference<Goal>>,
}

/// A marketing campaign running from `start` to `end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Identifier,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start: DateLike,
    #[serde(default)]
    pub end: DateLike,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<Reference<Goal>>>,
}

/// A measurable target that campaigns and posts contribute to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Identifier,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub target_value: f64,
    #[serde(default)]
    pub current_value: f64,
}

impl Goal {
    /// Progress towards the target as a percentage in `0..=100`.
    /// A goal without a positive target reports no progress.
    pub fn progress(&self) -> f64 {
        if self.target_value <= 0.0 || !self.current_value.is_finite() {
            return 0.0;
        }
        (self.current_value / self.target_value * 100.0).clamp(0.0, 100.0)
    }
}

impl Record for ScheduledPost {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

impl Record for Campaign {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Record for Goal {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_accepts_bare_and_expanded_references() {
        let json = r#"{
            "id": "post-1",
            "title": "Launch teaser",
            "scheduledAt": "2023-06-15T10:30:00Z",
            "status": "scheduled",
            "platform": "instagram",
            "campaign": "camp-1",
            "goal": { "id": "goal-2", "title": "Reach 10k", "status": "active" }
        }"#;

        let post: ScheduledPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.campaign, Some(Reference::Id("camp-1".to_string())));
        match post.goal {
            Some(Reference::Expanded(goal)) => assert_eq!(goal.title, "Reach 10k"),
            other => panic!("Expected expanded goal, got {:?}", other),
        }
    }

    #[test]
    fn partial_records_fill_defaults() {
        let json = r#"{ "id": "camp-1", "start": "2023-06-10", "end": "2023-06-20" }"#;
        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign.name, "");
        assert!(campaign.goals.is_none());
    }

    #[test]
    fn missing_and_null_dates_deserialize() {
        let post: ScheduledPost =
            serde_json::from_str(r#"{ "id": "post-1", "scheduledAt": null }"#).unwrap();
        assert_eq!(post.scheduled_at, DateLike::Missing);

        let campaign: Campaign = serde_json::from_str(r#"{ "id": "camp-1", "start": "2023-06-10" }"#).unwrap();
        assert_eq!(campaign.end, DateLike::Missing);
    }

    #[test]
    fn partially_expanded_campaign_is_still_expanded() {
        let json = r#"{ "id": "post-1", "scheduledAt": "2023-06-15", "campaign": { "id": "c1", "name": "Summer" } }"#;
        let post: ScheduledPost = serde_json::from_str(json).unwrap();
        match post.campaign {
            Some(Reference::Expanded(campaign)) => {
                assert_eq!(campaign.name, "Summer");
                assert_eq!(campaign.start, DateLike::Missing);
            }
            other => panic!("Expected expanded campaign, got {:?}", other),
        }
    }

    #[test]
    fn campaign_goals_may_mix_forms() {
        let json = r#"{
            "id": "camp-1", "name": "Summer",
            "start": "2023-06-10", "end": "2023-06-20",
            "goals": ["goal-1", { "id": "goal-2", "title": "G2" }]
        }"#;
        let campaign: Campaign = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = campaign.goals.iter().flatten().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["goal-1", "goal-2"]);
    }

    #[test]
    fn goal_progress_is_clamped() {
        let mut goal = Goal {
            id: "goal-1".to_string(),
            title: "Followers".to_string(),
            status: "active".to_string(),
            target_value: 200.0,
            current_value: 50.0,
        };
        assert_eq!(goal.progress(), 25.0);

        goal.current_value = 500.0;
        assert_eq!(goal.progress(), 100.0);

        goal.target_value = 0.0;
        assert_eq!(goal.progress(), 0.0);
    }
}
