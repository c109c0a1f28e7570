use anyhow::Result;
use colored::Colorize;
use std::process::Command;

use crate::config::Config;

pub async fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "RidePro Configuration".bold());
    println!("────────────────────────────────");
    println!();

    println!("{}", "[api]".cyan());
    println!("  base_url           = {}", config.api.base_url);
    println!("  timeout_seconds    = {}", config.api.timeout_seconds);
    println!();

    println!("{}", "[auth]".cyan());
    if config.is_authenticated() {
        println!("  token              = {}", "(configured, hidden)".green());
    } else {
        println!("  token              = {}", "(not set)".yellow());
    }
    println!();

    println!("{}", "[athlete]".cyan());
    match config.athlete.default_athlete_id {
        Some(id) => println!("  default_athlete_id = {}", id),
        None => println!("  default_athlete_id = {}", "(not set)".yellow()),
    }
    println!();

    println!("{}", "[display]".cyan());
    println!("  show_percentages   = {}", config.display.show_percentages);
    println!("  color              = {}", config.display.color);

    if !config.is_authenticated() {
        println!();
        println!("Zone commands need an API token under [auth]; add one with: ridepro config edit");
    }

    Ok(())
}

pub async fn edit_config() -> Result<()> {
    let config_file = Config::config_file()?;

    // First edit on a fresh machine starts from the defaults
    if !config_file.exists() {
        Config::default().save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

    Command::new(editor).arg(&config_file).status()?;

    // Reload so a broken edit is caught now, not on the next zones call
    if let Err(e) = Config::load() {
        println!("✗ The edited file does not parse: {:#}", e);
        return Err(e);
    }

    println!("✓ Configuration updated");

    Ok(())
}

pub async fn init_config(force: bool) -> Result<()> {
    let config_file = Config::config_file()?;

    if config_file.exists() && !force {
        println!(
            "A configuration already exists at {}",
            config_file.display()
        );
        println!("Re-run with --force to replace it with the defaults.");
        return Ok(());
    }

    let config = Config::default();
    config.save()?;

    println!("✓ Wrote default configuration to {}", config_file.display());
    println!();
    println!("Next steps:");
    println!("  - add your RidePro API token under [auth]");
    println!("  - set [athlete] default_athlete_id to skip --athlete on every zones command");
    println!("  - 'ridepro config edit' opens the file in $EDITOR");

    Ok(())
}
