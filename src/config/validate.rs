// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{
    parse_duration, ConfigFile, DisplaySettings, PoolSettings, RawConfigFile, SchedulerSettings,
};
use crate::errors::{Result, WorkpoolError};
use crate::pool::MAX_ENQUEUE_BATCH;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::WorkpoolError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_pool(&raw)?;

        let tick_interval = duration_field("[scheduler].tick_interval", &raw.scheduler.tick_interval)?;
        let completion_threshold = duration_field(
            "[scheduler].completion_threshold",
            &raw.scheduler.completion_threshold,
        )?;
        let refresh_interval = duration_field("[display].refresh_interval", &raw.display.refresh_interval)?;

        ensure_non_zero("[scheduler].tick_interval", tick_interval)?;
        ensure_non_zero("[display].refresh_interval", refresh_interval)?;

        Ok(ConfigFile::new_unchecked(
            PoolSettings {
                max_workers: raw.pool.max_workers,
                initial_workers: raw.pool.initial_workers,
                initial_tasks: raw.pool.initial_tasks,
            },
            SchedulerSettings {
                max_workers: raw.pool.max_workers,
                tick_interval,
                completion_threshold,
            },
            DisplaySettings { refresh_interval },
        ))
    }
}

fn validate_pool(cfg: &RawConfigFile) -> Result<()> {
    if cfg.pool.max_workers == 0 {
        return Err(WorkpoolError::ConfigError(
            "[pool].max_workers must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.pool.initial_workers > cfg.pool.max_workers {
        return Err(WorkpoolError::ConfigError(format!(
            "[pool].initial_workers ({}) exceeds [pool].max_workers ({})",
            cfg.pool.initial_workers, cfg.pool.max_workers
        )));
    }

    if cfg.pool.initial_tasks > MAX_ENQUEUE_BATCH {
        return Err(WorkpoolError::ConfigError(format!(
            "[pool].initial_tasks ({}) exceeds the batch limit ({})",
            cfg.pool.initial_tasks, MAX_ENQUEUE_BATCH
        )));
    }

    Ok(())
}

fn duration_field(key: &str, value: &str) -> Result<Duration> {
    parse_duration(value).map_err(|e| WorkpoolError::ConfigError(format!("{key}: {e}")))
}

fn ensure_non_zero(key: &str, value: Duration) -> Result<()> {
    if value.is_zero() {
        return Err(WorkpoolError::ConfigError(format!(
            "{key} must be greater than zero"
        )));
    }
    Ok(())
}
