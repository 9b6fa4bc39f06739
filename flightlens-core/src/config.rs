//! Configuration file management for FlightLens.
//!
//! Reads/writes `~/.flightlens/config.yaml` with API keys, upstream endpoint
//! URLs, dashboard address, live-lookup timeout and an optional specs file.

use std::path::{Path, PathBuf};

use crate::types::{FlightLensError, Result};

pub const DEFAULT_AVIATIONSTACK_URL: &str = "http://api.aviationstack.com/v1/flights";
pub const DEFAULT_OPENSKY_URL: &str = "https://opensky-network.org/api/states/all";
pub const DEFAULT_OPENWEATHERMAP_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Full configuration structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub endpoints: EndpointConfig,
    pub dashboard: DashboardConfig,
    pub lookup: LookupConfig,
    pub specs_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiConfig {
    pub aviationstack_key: Option<String>,
    pub openweathermap_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    pub aviationstack_url: String,
    pub opensky_url: String,
    pub openweathermap_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    /// Upper bound on the live-position lookup, in seconds.
    pub live_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig::default(),
            endpoints: EndpointConfig {
                aviationstack_url: DEFAULT_AVIATIONSTACK_URL.into(),
                opensky_url: DEFAULT_OPENSKY_URL.into(),
                openweathermap_url: DEFAULT_OPENWEATHERMAP_URL.into(),
            },
            dashboard: DashboardConfig {
                host: "127.0.0.1".into(),
                port: 8080,
            },
            lookup: LookupConfig {
                live_timeout_secs: 10,
            },
            specs_path: None,
        }
    }
}

/// Get the config directory path (`~/.flightlens/`).
pub fn config_dir() -> PathBuf {
    dirs_home().join(".flightlens")
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

/// Load config from `path` (normally [`config_file`]). A missing file yields
/// the defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)?;
    Ok(parse_config(&text))
}

/// Save config to an explicit path, creating parent directories.
pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| FlightLensError::Config(e.to_string()))?;
    }
    std::fs::write(path, serialize_config(config))
        .map_err(|e| FlightLensError::Config(e.to_string()))
}

/// Parse simple YAML-like config text. Unknown keys are ignored.
pub fn parse_config(text: &str) -> Config {
    let mut config = Config::default();
    let mut current_section: Option<String> = None;

    for line in text.lines() {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }

        let is_indented = line.starts_with("  ") || line.starts_with('\t');

        let Some((key, val)) = stripped.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let val = val.trim();

        if !is_indented {
            if val.is_empty() {
                current_section = Some(key.to_string());
            } else {
                current_section = None;
                if key == "specs_path" {
                    config.specs_path = parse_string_value(val);
                }
            }
            continue;
        }

        let Some(section) = current_section.as_deref() else {
            continue;
        };
        match (section, key) {
            ("api", "aviationstack_key") => config.api.aviationstack_key = parse_string_value(val),
            ("api", "openweathermap_key") => {
                config.api.openweathermap_key = parse_string_value(val)
            }
            ("endpoints", "aviationstack_url") => {
                set_string(&mut config.endpoints.aviationstack_url, val)
            }
            ("endpoints", "opensky_url") => set_string(&mut config.endpoints.opensky_url, val),
            ("endpoints", "openweathermap_url") => {
                set_string(&mut config.endpoints.openweathermap_url, val)
            }
            ("dashboard", "host") => set_string(&mut config.dashboard.host, val),
            ("dashboard", "port") => {
                if let Ok(v) = val.parse::<u16>() {
                    config.dashboard.port = v;
                }
            }
            ("lookup", "live_timeout_secs") => {
                if let Ok(v) = val.parse::<u64>() {
                    config.lookup.live_timeout_secs = v;
                }
            }
            _ => {}
        }
    }

    config
}

fn set_string(slot: &mut String, val: &str) {
    if let Some(v) = parse_string_value(val) {
        *slot = v;
    }
}

fn parse_string_value(val: &str) -> Option<String> {
    if val == "null" || val == "~" || val.is_empty() {
        return None;
    }
    // Strip quotes
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        return Some(val[1..val.len() - 1].to_string());
    }
    Some(val.to_string())
}

fn push_optional(lines: &mut Vec<String>, key: &str, value: &Option<String>) {
    match value {
        Some(v) => lines.push(format!("{key}: \"{v}\"")),
        None => lines.push(format!("{key}: null")),
    }
}

/// Serialize config to YAML-like text.
pub fn serialize_config(config: &Config) -> String {
    let mut lines = vec!["# flightlens configuration".to_string(), String::new()];

    lines.push("api:".into());
    push_optional(&mut lines, "  aviationstack_key", &config.api.aviationstack_key);
    push_optional(&mut lines, "  openweathermap_key", &config.api.openweathermap_key);
    lines.push(String::new());

    lines.push("endpoints:".into());
    lines.push(format!("  aviationstack_url: \"{}\"", config.endpoints.aviationstack_url));
    lines.push(format!("  opensky_url: \"{}\"", config.endpoints.opensky_url));
    lines.push(format!("  openweathermap_url: \"{}\"", config.endpoints.openweathermap_url));
    lines.push(String::new());

    lines.push("dashboard:".into());
    lines.push(format!("  host: \"{}\"", config.dashboard.host));
    lines.push(format!("  port: {}", config.dashboard.port));
    lines.push(String::new());

    lines.push("lookup:".into());
    lines.push(format!("  live_timeout_secs: {}", config.lookup.live_timeout_secs));
    lines.push(String::new());

    push_optional(&mut lines, "specs_path", &config.specs_path);

    lines.join("\n") + "\n"
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
