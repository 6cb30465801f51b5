use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::presenter::{DEFAULT_DEMO_DIR, DEFAULT_INTERVAL_MS};

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();

    let interval = config
        .interval_ms()
        .map(|ms| ms.to_string())
        .unwrap_or_else(|| format!("{DEFAULT_INTERVAL_MS} (default)"));
    let demo_dir = config
        .demo_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| format!("{DEFAULT_DEMO_DIR} (default)"));

    print_entry("defaults.theme", config.theme());
    print_entry("defaults.interval_ms", &interval);
    print_entry("defaults.autoplay", &config.autoplay().to_string());
    print_entry("defaults.demo_dir", &demo_dir);
    print_entry("defaults.title", config.title().unwrap_or("(none)"));
    Ok(())
}

fn print_entry(key: &str, value: &str) {
    println!("  {} {value}", format!("{key:<22}").cyan());
}

fn set(key: &str, value: &str) -> Result<()> {
    let path = Config::path()?;
    update_at(&path, key, value)?;
    println!(
        "{} {key} = {value} ({})",
        "Saved".green().bold(),
        path.display()
    );
    Ok(())
}

/// Apply one `key = value` change to the config file at `path`. An existing
/// file that fails to parse is left untouched.
fn update_at(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_new(path)?;
    config.set(key, value)?;
    config.save_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MALFORMED: &str = "defaults:\n  theme: light\n  title: My Trip\n  interval_ms: fast\n";

    #[test]
    fn test_update_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picdeck").join("config.yaml");
        update_at(&path, "defaults.autoplay", "true").unwrap();
        assert!(Config::load_from(&path).unwrap().autoplay());
    }

    #[test]
    fn test_update_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        update_at(&path, "defaults.title", "My Trip").unwrap();
        update_at(&path, "defaults.autoplay", "true").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.title(), Some("My Trip"));
        assert!(config.autoplay());
    }

    #[test]
    fn test_update_refuses_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, MALFORMED).unwrap();

        assert!(update_at(&path, "defaults.autoplay", "true").is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), MALFORMED);
    }

    #[test]
    fn test_update_rejected_value_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        update_at(&path, "defaults.theme", "light").unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        assert!(update_at(&path, "defaults.theme", "neon").is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }
}
