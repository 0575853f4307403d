//! Configuration file management for airmerge.
//!
//! Reads/writes `~/.airmerge/config.yaml` with feed URLs, poll interval,
//! watch-list settings, and webhook URL. Every lookup has a typed
//! default; a missing or malformed file degrades to defaults.

use std::path::{Path, PathBuf};

use crate::types::AirmergeError;
use crate::watchlist::{TrackMode, WatchConfig};

pub const DEFAULT_INTERVAL_SECS: u64 = 10;

/// Full configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    pub feed_a: FeedConfig,
    pub feed_b: FeedConfig,
    pub poll: PollConfig,
    pub tracking: TrackingConfig,
    pub webhook: Option<String>,
}

/// One feed endpoint. `url` may point at an HTTP endpoint or be unset
/// when the feed is supplied from a file on the command line.
#[derive(Debug, Clone, Default)]
pub struct FeedConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval_secs: u64,
}

/// Raw watch-list settings as configured. `callsigns` and
/// `registrations` stay comma-separated text here; normalization happens
/// in `to_watch_config`.
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    pub enabled: bool,
    pub mode: String,
    pub callsigns: String,
    pub registrations: String,
}

impl TrackingConfig {
    /// Normalize into the matcher's form. Unknown modes fall back to
    /// callsign matching.
    pub fn to_watch_config(&self) -> WatchConfig {
        WatchConfig::from_lists(
            self.enabled,
            TrackMode::parse_or_default(&self.mode),
            &self.callsigns,
            &self.registrations,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            feed_a: FeedConfig::default(),
            feed_b: FeedConfig::default(),
            poll: PollConfig {
                interval_secs: DEFAULT_INTERVAL_SECS,
            },
            tracking: TrackingConfig {
                enabled: false,
                mode: "callsign".into(),
                callsigns: String::new(),
                registrations: String::new(),
            },
            webhook: None,
        }
    }
}

/// Get the config directory path (`~/.airmerge/`).
pub fn config_dir() -> PathBuf {
    dirs_home().join(".airmerge")
}

/// Get the config file path.
pub fn config_file() -> PathBuf {
    config_dir().join("config.yaml")
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Load config from `~/.airmerge/config.yaml`.
///
/// Returns default config if the file doesn't exist or doesn't parse.
pub fn load_config() -> Config {
    load_config_from(&config_file())
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(_) => return Config::default(),
    };

    parse_config(&text).unwrap_or_default()
}

/// Save config to `~/.airmerge/config.yaml`.
pub fn save_config(config: &Config) -> Result<PathBuf, AirmergeError> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir).map_err(|e| AirmergeError::Config(e.to_string()))?;

    let path = config_file();
    save_config_to(config, &path)?;
    Ok(path)
}

/// Save config to an explicit path.
pub fn save_config_to(config: &Config, path: &Path) -> Result<(), AirmergeError> {
    let text = serialize_config(config);
    std::fs::write(path, text).map_err(|e| AirmergeError::Config(e.to_string()))
}

/// Parse simple YAML-like config text.
fn parse_config(text: &str) -> Option<Config> {
    let mut config = Config::default();
    let mut current_section: Option<String> = None;

    for line in text.lines() {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }

        let is_indented = line.starts_with("  ") || line.starts_with('\t');

        if let Some((key, val)) = stripped.split_once(':') {
            let key = key.trim();
            let val = val.trim();

            if !is_indented {
                if val.is_empty() {
                    current_section = Some(key.to_string());
                } else {
                    current_section = None;
                    if key == "webhook" {
                        config.webhook = parse_string_value(val);
                    }
                }
            } else if let Some(ref section) = current_section {
                match section.as_str() {
                    "feed_a" => {
                        if key == "url" {
                            config.feed_a.url = parse_string_value(val);
                        }
                    }
                    "feed_b" => {
                        if key == "url" {
                            config.feed_b.url = parse_string_value(val);
                        }
                    }
                    "poll" => {
                        if key == "interval_secs" {
                            if let Ok(v) = val.parse::<u64>() {
                                config.poll.interval_secs = v;
                            }
                        }
                    }
                    "tracking" => match key {
                        "enabled" => config.tracking.enabled = val == "true",
                        "mode" => {
                            if let Some(v) = parse_string_value(val) {
                                config.tracking.mode = v;
                            }
                        }
                        "callsigns" => {
                            config.tracking.callsigns = parse_string_value(val).unwrap_or_default();
                        }
                        "registrations" => {
                            config.tracking.registrations =
                                parse_string_value(val).unwrap_or_default();
                        }
                        _ => {}
                    },
                    _ => {}
                }
            }
        }
    }

    Some(config)
}

fn parse_string_value(val: &str) -> Option<String> {
    if val == "null" || val == "~" || val.is_empty() {
        return None;
    }
    // Strip quotes
    if (val.starts_with('"') && val.ends_with('"'))
        || (val.starts_with('\'') && val.ends_with('\''))
    {
        return Some(val[1..val.len() - 1].to_string());
    }
    Some(val.to_string())
}

/// Serialize config to YAML-like text.
fn serialize_config(config: &Config) -> String {
    let mut lines = vec!["# airmerge configuration".to_string(), String::new()];

    lines.push("feed_a:".into());
    match &config.feed_a.url {
        Some(v) => lines.push(format!("  url: \"{v}\"")),
        None => lines.push("  url: null".into()),
    }
    lines.push(String::new());

    lines.push("feed_b:".into());
    match &config.feed_b.url {
        Some(v) => lines.push(format!("  url: \"{v}\"")),
        None => lines.push("  url: null".into()),
    }
    lines.push(String::new());

    lines.push("poll:".into());
    lines.push(format!("  interval_secs: {}", config.poll.interval_secs));
    lines.push(String::new());

    lines.push("tracking:".into());
    lines.push(format!("  enabled: {}", config.tracking.enabled));
    lines.push(format!("  mode: \"{}\"", config.tracking.mode));
    lines.push(format!("  callsigns: \"{}\"", config.tracking.callsigns));
    lines.push(format!(
        "  registrations: \"{}\"",
        config.tracking.registrations
    ));
    lines.push(String::new());

    match &config.webhook {
        Some(url) => lines.push(format!("webhook: \"{url}\"")),
        None => lines.push("webhook: null".into()),
    }

    lines.join("\n") + "\n"
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll.interval_secs, 10);
        assert!(!config.tracking.enabled);
        assert_eq!(config.tracking.mode, "callsign");
        assert!(config.feed_a.url.is_none());
        assert!(config.webhook.is_none());
    }

    #[test]
    fn test_parse_config() {
        let text = r#"
feed_a:
  url: "http://tracker.local/flights.json"

feed_b:
  url: "http://receiver.local/data/aircraft.json"

poll:
  interval_secs: 30

tracking:
  enabled: true
  mode: "both"
  callsigns: "LH123, CHX16"
  registrations: "D-ABCD"

webhook: "https://example.com/hook"
"#;
        let config = parse_config(text).unwrap();
        assert_eq!(
            config.feed_a.url.as_deref(),
            Some("http://tracker.local/flights.json")
        );
        assert_eq!(
            config.feed_b.url.as_deref(),
            Some("http://receiver.local/data/aircraft.json")
        );
        assert_eq!(config.poll.interval_secs, 30);
        assert!(config.tracking.enabled);
        assert_eq!(config.tracking.mode, "both");
        assert_eq!(config.tracking.callsigns, "LH123, CHX16");
        assert_eq!(config.webhook, Some("https://example.com/hook".into()));
    }

    #[test]
    fn test_parse_config_null_values() {
        let text = r#"
feed_a:
  url: null

feed_b:
  url: ~

webhook: null
"#;
        let config = parse_config(text).unwrap();
        assert!(config.feed_a.url.is_none());
        assert!(config.feed_b.url.is_none());
        assert!(config.webhook.is_none());
    }

    #[test]
    fn test_roundtrip() {
        let mut config = Config::default();
        config.feed_b.url = Some("http://localhost/aircraft.json".into());
        config.poll.interval_secs = 5;
        config.tracking.enabled = true;
        config.tracking.mode = "registration".into();
        config.tracking.registrations = "D-ABCD, N12345".into();
        config.webhook = Some("https://example.com".into());

        let text = serialize_config(&config);
        let parsed = parse_config(&text).unwrap();
        assert_eq!(parsed.feed_b.url.as_deref(), Some("http://localhost/aircraft.json"));
        assert_eq!(parsed.poll.interval_secs, 5);
        assert!(parsed.tracking.enabled);
        assert_eq!(parsed.tracking.mode, "registration");
        assert_eq!(parsed.tracking.registrations, "D-ABCD, N12345");
        assert_eq!(parsed.webhook, Some("https://example.com".into()));
    }

    #[test]
    fn test_to_watch_config() {
        let tracking = TrackingConfig {
            enabled: true,
            mode: "bogus-mode".into(),
            callsigns: "lh123, ba456".into(),
            registrations: String::new(),
        };
        let wc = tracking.to_watch_config();
        assert!(wc.enabled);
        // Unknown mode falls back to callsign matching.
        assert_eq!(wc.mode, TrackMode::Callsign);
        assert!(wc.callsigns.contains("LH123"));
        assert!(wc.callsigns.contains("BA456"));
    }

    #[test]
    fn test_save_and_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = Config::default();
        config.tracking.enabled = true;
        config.tracking.callsigns = "CHX16".into();
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path);
        assert!(loaded.tracking.enabled);
        assert_eq!(loaded.tracking.callsigns, "CHX16");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let path = PathBuf::from("/nonexistent/airmerge/config.yaml");
        let config = load_config_from(&path);
        assert_eq!(config.poll.interval_secs, DEFAULT_INTERVAL_SECS);
    }
}
