use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::encoding::HourMode;

pub const DEFAULT_BATTERY_PATH: &str = "/sys/class/power_supply/BAT0";
pub const DEFAULT_POLL_SECS: u64 = 5;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Host settings for running the face on a desktop.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub clock: Option<ClockConfig>,
    pub status: Option<StatusConfig>,
    /// stop after this many ticks, run until signalled when unset
    pub frames: Option<u64>,
    /// redraw in place instead of scrolling
    pub ansi: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ClockConfig {
    pub hour_mode: Option<HourMode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StatusConfig {
    pub battery_path: Option<PathBuf>,
    pub poll_secs: Option<u64>,
}

impl Config {
    pub fn hour_mode(&self) -> HourMode {
        self.clock.as_ref().and_then(|c| c.hour_mode).unwrap_or_default()
    }

    pub fn battery_path(&self) -> PathBuf {
        self.status
            .as_ref()
            .and_then(|s| s.battery_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BATTERY_PATH))
    }

    pub fn poll_secs(&self) -> u64 {
        self.status.as_ref().and_then(|s| s.poll_secs).unwrap_or(DEFAULT_POLL_SECS)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "smartbits", version, about = "Binary clock watch face")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, short = 'c', value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Enable debug log level
    #[arg(long, short = 'v', alias = "verbose", action = ArgAction::SetTrue)]
    pub debug: bool,
    /// Show hours 1-12 with a PM LED
    #[arg(long = "12h", action = ArgAction::SetTrue, conflicts_with = "twenty_four")]
    pub twelve: bool,
    /// Show hours 0-23
    #[arg(long = "24h", id = "twenty_four", action = ArgAction::SetTrue)]
    pub twenty_four: bool,
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub battery_path: Option<PathBuf>,
    /// Seconds between battery/connection polls
    #[arg(long)]
    pub poll_secs: Option<u64>,
    /// Stop after N ticks
    #[arg(long, short = 'n')]
    pub frames: Option<u64>,
    /// Redraw in place with ANSI escapes
    #[arg(long, action = ArgAction::SetTrue)]
    pub ansi: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(Config, Cli), ConfigError> {
    let cli = Cli::parse();
    let cfg = load_from(&cli)?;
    Ok((cfg, cli))
}

/// defaults -> YAML (explicit path or search) -> CLI
pub fn load_from(cli: &Cli) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            merge(&mut cfg, read_yaml(p)?);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        merge(&mut cfg, read_yaml(&p)?);
    }

    apply_cli_overrides(&mut cfg, cli);
    validate(&cfg)?;
    Ok(cfg)
}

/// Pretty YAML of the effective config
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    if let Some(home) = home_dir() {
        let p = home.join(".config/smartbits/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/smartbits.yaml");
        if p.exists() { return Some(p) }
    }
    for candidate in &["smartbits.yaml", "config/smartbits.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(s)?)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() { dst.log_level = src.log_level; }
    if src.frames.is_some()    { dst.frames = src.frames; }
    if src.ansi.is_some()      { dst.ansi = src.ansi; }
    match (&mut dst.clock, src.clock) {
        (None, Some(c)) => dst.clock = Some(c),
        (Some(d), Some(s)) => {
            if s.hour_mode.is_some() { d.hour_mode = s.hour_mode; }
        }
        _ => {}
    }
    match (&mut dst.status, src.status) {
        (None, Some(c)) => dst.status = Some(c),
        (Some(d), Some(s)) => {
            if s.battery_path.is_some() { d.battery_path = s.battery_path; }
            if s.poll_secs.is_some()    { d.poll_secs = s.poll_secs; }
        }
        _ => {}
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }
    if cli.debug               { cfg.log_level = Some("debug".into()); }
    if cli.frames.is_some()    { cfg.frames = cli.frames; }
    if cli.ansi                { cfg.ansi = Some(true); }

    let mode = if cli.twelve {
        Some(HourMode::TwelveHour)
    } else if cli.twenty_four {
        Some(HourMode::TwentyFourHour)
    } else {
        None
    };
    if mode.is_some() {
        cfg.clock.get_or_insert_with(ClockConfig::default).hour_mode = mode;
    }

    if cli.battery_path.is_some() || cli.poll_secs.is_some() {
        let status = cfg.status.get_or_insert_with(StatusConfig::default);
        if cli.battery_path.is_some() { status.battery_path = cli.battery_path.clone(); }
        if cli.poll_secs.is_some()    { status.poll_secs = cli.poll_secs; }
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.poll_secs() == 0 {
        return Err(ConfigError::Validation("status poll_secs must be > 0".into()));
    }
    if cfg.frames == Some(0) {
        return Err(ConfigError::Validation("frames must be > 0 when set".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["smartbits"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.hour_mode(), HourMode::TwentyFourHour);
        assert_eq!(cfg.poll_secs(), DEFAULT_POLL_SECS);
        assert_eq!(cfg.battery_path(), PathBuf::from(DEFAULT_BATTERY_PATH));
        assert_eq!(cfg.log_level(), "info");
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_yaml() {
        let cfg = parse_yaml(
            "log_level: debug\nclock:\n  hour_mode: 12h\nstatus:\n  poll_secs: 30\n",
        )
        .unwrap();
        assert_eq!(cfg.hour_mode(), HourMode::TwelveHour);
        assert_eq!(cfg.poll_secs(), 30);
        assert_eq!(cfg.log_level(), "debug");
        assert!(parse_yaml("clock:\n  hour_mode: 13h\n").is_err());
    }

    #[test]
    fn test_cli_overrides_yaml() {
        let mut cfg = parse_yaml("clock:\n  hour_mode: 12h\nstatus:\n  poll_secs: 30\n").unwrap();
        apply_cli_overrides(&mut cfg, &cli(&["--24h", "--poll-secs", "2", "-v"]));
        assert_eq!(cfg.hour_mode(), HourMode::TwentyFourHour);
        assert_eq!(cfg.poll_secs(), 2);
        assert_eq!(cfg.log_level(), "debug");
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut dst = parse_yaml("status:\n  battery_path: /tmp/bat\n").unwrap();
        merge(&mut dst, parse_yaml("status:\n  poll_secs: 9\n").unwrap());
        assert_eq!(dst.battery_path(), PathBuf::from("/tmp/bat"));
        assert_eq!(dst.poll_secs(), 9);
    }

    #[test]
    fn test_conflicting_hour_flags() {
        assert!(Cli::try_parse_from(["smartbits", "--12h", "--24h"]).is_err());
    }

    #[test]
    fn test_validation() {
        let cfg = parse_yaml("status:\n  poll_secs: 0\n").unwrap();
        assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))));
        let cfg = parse_yaml("frames: 0\n").unwrap();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_from(&cli(&["--config", "/nonexistent/smartbits.yaml"])).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_dump_shows_mode() {
        let cfg = parse_yaml("clock:\n  hour_mode: 12h\n").unwrap();
        let s = dump(&cfg).unwrap();
        assert!(s.contains("12h"));
    }
}
