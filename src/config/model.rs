// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Default hard cap on concurrent workers.
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [pool]
/// max_workers = 10
/// initial_workers = 2
/// initial_tasks = 5
///
/// [scheduler]
/// tick_interval = "100ms"
/// completion_threshold = "20s"
///
/// [display]
/// refresh_interval = "100ms"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub pool: PoolSection,

    #[serde(default)]
    pub scheduler: SchedulerSection,

    #[serde(default)]
    pub display: DisplaySection,
}

/// `[pool]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolSection {
    /// Maximum number of workers alive at the same time.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Workers added when the pool starts.
    #[serde(default)]
    pub initial_workers: usize,

    /// Tasks enqueued when the pool starts.
    #[serde(default)]
    pub initial_tasks: i64,
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

impl Default for PoolSection {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            initial_workers: 0,
            initial_tasks: 0,
        }
    }
}

/// `[scheduler]` section. Durations are strings like `"100ms"` or `"20s"`.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSection {
    /// Period of the scheduling tick.
    #[serde(default = "default_tick_interval")]
    pub tick_interval: String,

    /// How long a task runs before it is considered complete.
    #[serde(default = "default_completion_threshold")]
    pub completion_threshold: String,
}

fn default_tick_interval() -> String {
    "100ms".to_string()
}

fn default_completion_threshold() -> String {
    "20s".to_string()
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            tick_interval: default_tick_interval(),
            completion_threshold: default_completion_threshold(),
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySection {
    /// How often the status reporter polls a snapshot.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: String,
}

fn default_refresh_interval() -> String {
    "100ms".to_string()
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            refresh_interval: default_refresh_interval(),
        }
    }
}

/// Validated configuration with durations already parsed.
///
/// Only obtainable through `ConfigFile::try_from(RawConfigFile)` or
/// [`ConfigFile::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub pool: PoolSettings,
    pub scheduler: SchedulerSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_workers: usize,
    pub initial_workers: usize,
    pub initial_tasks: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    pub max_workers: usize,
    pub tick_interval: Duration,
    pub completion_threshold: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    pub refresh_interval: Duration,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        pool: PoolSettings,
        scheduler: SchedulerSettings,
        display: DisplaySettings,
    ) -> Self {
        Self {
            pool,
            scheduler,
            display,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            pool: PoolSettings {
                max_workers: DEFAULT_MAX_WORKERS,
                initial_workers: 0,
                initial_tasks: 0,
            },
            scheduler: SchedulerSettings {
                max_workers: DEFAULT_MAX_WORKERS,
                tick_interval: Duration::from_millis(100),
                completion_threshold: Duration::from_secs(20),
            },
            display: DisplaySettings {
                refresh_interval: Duration::from_millis(100),
            },
        }
    }
}

/// Parse a duration string such as `"100ms"`, `"20s"`, `"2m"` or `"1h"`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| format!("duration '{}' is missing a unit suffix", s))?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;

    match unit_part.trim().to_lowercase().as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => value
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("duration '{}' is too large", s)),
        "h" => value
            .checked_mul(60 * 60)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("duration '{}' is too large", s)),
        unit => Err(format!(
            "unsupported duration unit '{}'; expected ms, s, m, or h",
            unit
        )),
    }
}
