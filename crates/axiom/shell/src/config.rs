//! Shell timing and capacity configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOG_CAPACITY: usize = 20;

/// Shell configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Entries kept in the session log before the oldest is evicted
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,

    /// Duration of each of the two authorization steps
    #[serde(default = "default_auth_step_ms")]
    pub auth_step_ms: u64,

    /// Duration of each cosmetic progress stage
    #[serde(default = "default_stage_delay_ms")]
    pub stage_delay_ms: u64,

    /// Pause between a generate result landing and the busy flag clearing
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            log_capacity: DEFAULT_LOG_CAPACITY,
            auth_step_ms: default_auth_step_ms(),
            stage_delay_ms: default_stage_delay_ms(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl ShellConfig {
    /// All delays zeroed, for non-interactive use.
    pub fn immediate() -> Self {
        Self {
            auth_step_ms: 0,
            stage_delay_ms: 0,
            settle_delay_ms: 0,
            ..Default::default()
        }
    }

    pub fn auth_step(&self) -> Duration {
        Duration::from_millis(self.auth_step_ms)
    }

    pub fn stage_delay(&self) -> Duration {
        Duration::from_millis(self.stage_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

fn default_log_capacity() -> usize {
    DEFAULT_LOG_CAPACITY
}

fn default_auth_step_ms() -> u64 {
    1500
}

fn default_stage_delay_ms() -> u64 {
    800
}

fn default_settle_delay_ms() -> u64 {
    500
}
