use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use winnerforce_core::association::{campaigns_for_goal, posts_for_goal};
use winnerforce_core::reference::{Reference, resolve};
use winnerforce_core::{Campaign, Goal, ResolvedRef, ScheduledPost, Snapshot};

use crate::commands::print_json;
use crate::render::{Render, pluralize};

#[derive(Serialize)]
struct GoalView<'a> {
    goal: ResolvedRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress: Option<f64>,
    campaigns: Vec<&'a Campaign>,
    posts: Vec<&'a ScheduledPost>,
}

pub fn run(snapshot: &Snapshot, id: &str, json: bool) -> Result<()> {
    let view = goal_view(snapshot, id)?;
    let goal = snapshot.goal(id);

    if json {
        return print_json(&view);
    }

    match goal {
        Some(goal) => println!("{}", goal.render()),
        None => println!(
            "🎯 {} {}",
            view.goal.render(),
            "(not in snapshot)".dimmed()
        ),
    }

    println!(
        "   {}",
        format!("{} linked {}", view.campaigns.len(), pluralize("campaign", view.campaigns.len())).dimmed()
    );
    for campaign in &view.campaigns {
        println!("   • {} {}", campaign.name, format!("({})", campaign.status).dimmed());
    }

    println!(
        "   {}",
        format!("{} linked {}", view.posts.len(), pluralize("post", view.posts.len())).dimmed()
    );
    for post in &view.posts {
        println!("   • {} {}", post.title, format!("[{}]", post.platform).dimmed());
    }

    Ok(())
}

fn goal_view<'a>(snapshot: &'a Snapshot, id: &str) -> Result<GoalView<'a>> {
    let reference: Reference<Goal> = Reference::Id(id.to_string());
    let Some(resolved) = resolve(Some(&reference), &snapshot.goals) else {
        anyhow::bail!("Could not resolve goal '{}'", id);
    };

    Ok(GoalView {
        goal: resolved,
        progress: snapshot.goal(id).map(Goal::progress),
        campaigns: campaigns_for_goal(&snapshot.campaigns, id),
        posts: posts_for_goal(&snapshot.posts, &snapshot.campaigns, id),
    })
}
