//! TUI rendering traits for Winnerforce types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to winnerforce-core types using owo_colors.

use owo_colors::OwoColorize;
use winnerforce_core::event::{CalendarEvent, EventKind};
use winnerforce_core::reference::ResolvedRef;
use winnerforce_core::Goal;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventKind {
    fn render(&self) -> String {
        let tag = format!("{:<14}", self.as_str());
        match self {
            EventKind::Post => tag.cyan().to_string(),
            EventKind::CampaignStart => tag.green().to_string(),
            EventKind::CampaignEnd => tag.yellow().to_string(),
        }
    }
}

impl Render for ResolvedRef {
    fn render(&self) -> String {
        if self.is_placeholder() {
            self.label.dimmed().italic().to_string()
        } else {
            self.label.clone()
        }
    }
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let mut line = format!("{} {}", self.kind.render(), self.title.bold());

        if !self.status.is_empty() {
            line.push_str(&format!(" {}", format!("({})", self.status).dimmed()));
        }

        let mut links: Vec<String> = Vec::new();
        if let Some(campaign) = &self.campaign {
            links.push(campaign.render());
        }
        links.extend(self.goals.iter().map(|g| g.render()));
        if !links.is_empty() {
            line.push_str(&format!(" {} {}", "→".dimmed(), links.join(", ")));
        }

        line
    }
}

impl Render for Goal {
    fn render(&self) -> String {
        let progress = self.progress();
        let pct = format!("{:.0}%", progress);
        let pct = if progress >= 100.0 {
            pct.green().to_string()
        } else {
            pct.yellow().to_string()
        };

        format!(
            "🎯 {} {} {}",
            self.title.bold(),
            pct,
            format!("({} / {})", self.current_value, self.target_value).dimmed()
        )
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
