#![allow(dead_code)]

use workpool::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn max_workers(mut self, max: usize) -> Self {
        self.config.pool.max_workers = max;
        self
    }

    pub fn initial_workers(mut self, n: usize) -> Self {
        self.config.pool.initial_workers = n;
        self
    }

    pub fn initial_tasks(mut self, n: i64) -> Self {
        self.config.pool.initial_tasks = n;
        self
    }

    pub fn tick_interval(mut self, value: &str) -> Self {
        self.config.scheduler.tick_interval = value.to_string();
        self
    }

    pub fn completion_threshold(mut self, value: &str) -> Self {
        self.config.scheduler.completion_threshold = value.to_string();
        self
    }

    pub fn refresh_interval(mut self, value: &str) -> Self {
        self.config.display.refresh_interval = value.to_string();
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
