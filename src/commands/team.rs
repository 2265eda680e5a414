use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use winnerforce_core::store::{FileStore, KeyValueStore, TeamAssignments};

use crate::TeamAction;
use crate::commands::print_json;

#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
enum TeamOutcome {
    Assigned { team: String, ambassador: String, changed: bool },
    Unassigned { team: String, ambassador: String, changed: bool },
    Members(Vec<String>),
}

pub fn run(store_path: &Path, action: TeamAction, json: bool) -> Result<()> {
    let store = FileStore::open(store_path)
        .with_context(|| format!("Could not open store at {}", store_path.display()))?;
    let mut teams = TeamAssignments::new(store);

    let outcome = apply(&mut teams, action)?;

    if json {
        return print_json(&outcome);
    }

    match outcome {
        TeamOutcome::Assigned { team, ambassador, changed: true } => {
            println!("{} {} → {}", "+".green(), ambassador, team);
        }
        TeamOutcome::Assigned { team, ambassador, changed: false } => {
            println!("{}", format!("{} is already on {}", ambassador, team).dimmed());
        }
        TeamOutcome::Unassigned { team, ambassador, changed: true } => {
            println!("{} {} ✕ {}", "-".red(), ambassador, team);
        }
        TeamOutcome::Unassigned { team, ambassador, changed: false } => {
            println!("{}", format!("{} is not on {}", ambassador, team).dimmed());
        }
        TeamOutcome::Members(members) => {
            if members.is_empty() {
                println!("{}", "No ambassadors assigned".dimmed());
            }
            for member in members {
                println!("  {}", member);
            }
        }
    }

    Ok(())
}

fn apply<S: KeyValueStore>(teams: &mut TeamAssignments<S>, action: TeamAction) -> Result<TeamOutcome> {
    let outcome = match action {
        TeamAction::Assign { team, ambassador } => {
            let changed = teams.assign(&team, &ambassador)?;
            TeamOutcome::Assigned { team, ambassador, changed }
        }
        TeamAction::Unassign { team, ambassador } => {
            let changed = teams.unassign(&team, &ambassador)?;
            TeamOutcome::Unassigned { team, ambassador, changed }
        }
        TeamAction::List { team } => TeamOutcome::Members(teams.members(&team)?),
    };

    Ok(outcome)
}
