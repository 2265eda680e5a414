use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use winnerforce_core::DayZone;
use winnerforce_core::config::WinnerforceConfig;

use crate::commands::print_json;

#[derive(Serialize)]
struct ConfigView {
    config_file: String,
    time_zone: String,
    effective_zone: String,
    date_only: String,
    snapshot: String,
    store: String,
}

pub fn run(config: &WinnerforceConfig, json: bool) -> Result<()> {
    let effective_zone = match config.time_zone {
        DayZone::Local => iana_time_zone::get_timezone().unwrap_or_else(|_| "unknown".to_string()),
        DayZone::Named(_) => config.time_zone.to_string(),
    };

    let view = ConfigView {
        config_file: WinnerforceConfig::config_path()?.display().to_string(),
        time_zone: config.time_zone.to_string(),
        effective_zone,
        date_only: format!("{:?}", config.date_only).to_lowercase(),
        snapshot: config.snapshot_path().display().to_string(),
        store: config.store_path().display().to_string(),
    };

    if json {
        return print_json(&view);
    }

    println!("{} {}", "config:".dimmed(), view.config_file);
    println!(
        "{} {} {}",
        "time_zone:".dimmed(),
        view.time_zone,
        format!("({})", view.effective_zone).dimmed()
    );
    println!("{} {}", "date_only:".dimmed(), view.date_only);
    println!("{} {}", "snapshot:".dimmed(), view.snapshot);
    println!("{} {}", "store:".dimmed(), view.store);

    Ok(())
}
