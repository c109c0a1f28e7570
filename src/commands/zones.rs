use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use uuid::Uuid;

use crate::api::ZonesApi;
use crate::config::{Config, DisplayConfig};
use crate::models::{
    HrZoneConfig, HrZoneSystem, PowerZoneConfig, PowerZoneSystem, TableStatus, ZoneProfileUpdate,
    ZonesData,
};
use crate::session::{ZoneChanges, ZonesSession};
use crate::ui::SettingsView;

/// Rollback of earlier writes is best-effort, so the hint must not
/// promise that nothing was kept
const SAVE_FAILURE_HINT: &str =
    "Earlier writes were rolled back where possible; run the command again to retry.";

pub async fn show_zones(athlete: Option<Uuid>) -> Result<()> {
    let config = Config::load()?;
    let athlete_id = config.resolve_athlete(athlete)?;

    let api = ZonesApi::new(&config)?;
    let mut session = ZonesSession::new(api);

    let spinner = spinner("Fetching zones...");
    let result = session.fetch_zones(athlete_id).await;
    spinner.finish_and_clear();

    match result {
        Ok(data) => {
            render_zones_data(data, &config.display);
            Ok(())
        }
        Err(e) => {
            println!("✗ Failed to fetch zones: {}", e);
            println!();
            println!("Check your network connection and run the command again.");
            Err(e.into())
        }
    }
}

pub async fn set_zones(
    athlete: Option<Uuid>,
    ftp: Option<u32>,
    max_hr: Option<u32>,
    resting_hr: Option<u32>,
    power_system: Option<PowerZoneSystem>,
    hr_system: Option<HrZoneSystem>,
) -> Result<()> {
    let config = Config::load()?;
    let athlete_id = config.resolve_athlete(athlete)?;

    let api = ZonesApi::new(&config)?;
    let mut session = ZonesSession::new(api);

    // Load current values first so a failed save can be rolled back
    let spinner = spinner("Fetching current zones...");
    let fetched = session.fetch_zones(athlete_id).await;
    spinner.finish_and_clear();
    if let Err(e) = fetched {
        println!("✗ Failed to fetch current zones: {}", e);
        return Err(e.into());
    }

    let changes = ZoneChanges {
        profile: Some(ZoneProfileUpdate {
            ftp,
            max_hr,
            resting_hr,
        }),
        power: match power_system {
            Some(system) => Some(power_config_for(system)?),
            None => None,
        },
        heart_rate: match hr_system {
            Some(system) => Some(hr_config_for(system)?),
            None => None,
        },
    };

    if changes.is_empty() {
        println!("Nothing to update.");
        println!();
        println!("Pass --ftp, --max-hr, --resting-hr, --power-system or --hr-system.");
        return Ok(());
    }

    let spinner = self::spinner("Saving zone settings...");
    let saved = session.save_changes(athlete_id, &changes).await;
    spinner.finish_and_clear();

    if let Err(e) = saved {
        println!("✗ Failed to save zone settings: {}", e);
        println!();
        println!("{}", SAVE_FAILURE_HINT);
        return Err(e.into());
    }

    println!("✓ Zone settings saved");
    println!();

    // Re-fetch so the rendered tables reflect what the server stored
    let spinner = self::spinner("Refreshing zones...");
    let refreshed = session.fetch_zones(athlete_id).await;
    spinner.finish_and_clear();

    match refreshed {
        Ok(data) => {
            render_zones_data(data, &config.display);
            Ok(())
        }
        Err(e) => {
            println!("✗ Saved, but failed to refresh zones: {}", e);
            Err(e.into())
        }
    }
}

pub async fn edit_zones(athlete: Option<Uuid>) -> Result<()> {
    let config = Config::load()?;
    let athlete_id = config.resolve_athlete(athlete)?;

    let api = ZonesApi::new(&config)?;
    let mut session = ZonesSession::new(api);

    let spinner = spinner("Fetching zones...");
    let fetched = session.fetch_zones(athlete_id).await;
    spinner.finish_and_clear();
    if let Err(e) = fetched {
        println!("✗ Failed to fetch zones: {}", e);
        return Err(e.into());
    }

    let mut view = SettingsView::new(session, athlete_id)?;
    view.run().await
}

fn power_config_for(system: PowerZoneSystem) -> Result<PowerZoneConfig> {
    let boundaries = if system == PowerZoneSystem::Custom {
        Some(prompt_boundaries("power")?)
    } else {
        None
    };
    Ok(PowerZoneConfig { system, boundaries })
}

fn hr_config_for(system: HrZoneSystem) -> Result<HrZoneConfig> {
    let boundaries = if system == HrZoneSystem::Custom {
        Some(prompt_boundaries("heart rate")?)
    } else {
        None
    };
    Ok(HrZoneConfig { system, boundaries })
}

/// Ask for custom cut points as comma-separated fractions of the threshold
fn prompt_boundaries(label: &str) -> Result<Vec<f64>> {
    let raw: String = Input::new()
        .with_prompt(format!(
            "Custom {} boundaries as fractions, ascending (e.g. 0.6,0.8,1.0)",
            label
        ))
        .interact_text()?;

    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("'{}' is not a number", part.trim()))
        })
        .collect()
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub fn render_zones_data(data: &ZonesData, display: &DisplayConfig) {
    println!("Zones for athlete {}", data.athlete_id);
    println!(
        "Fetched {}",
        data.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    render_table(
        &format!("Power zones ({})", data.power.system),
        "W",
        &data.power_table,
        display,
    );
    println!();
    render_table(
        &format!("Heart rate zones ({})", data.heart_rate.system),
        "bpm",
        &data.hr_table,
        display,
    );
}

fn render_table(title: &str, unit: &str, status: &TableStatus, display: &DisplayConfig) {
    println!("{}", title);
    println!("────────────────────────────────────────");

    let table = match status {
        TableStatus::Ready(table) => table,
        TableStatus::Unavailable(reason) => {
            println!("  {}", reason);
            return;
        }
    };

    for zone in table {
        let range = match zone.max_absolute {
            Some(max) => format!("{}-{} {}", zone.min_absolute, max, unit),
            None => format!("{}+ {}", zone.min_absolute, unit),
        };

        let percent = match zone.max_percent {
            Some(max) => format!("({:.0}-{:.0}%)", zone.min_percent, max),
            None => format!("({:.0}%+)", zone.min_percent),
        };

        let name = if display.color {
            zone.name
                .truecolor(zone.color.r, zone.color.g, zone.color.b)
                .to_string()
        } else {
            zone.name.clone()
        };

        if display.show_percentages {
            println!("  {}. {:<24} {:>14} {}", zone.index, name, range, percent);
        } else {
            println!("  {}. {:<24} {:>14}", zone.index, name, range);
        }
    }
}
