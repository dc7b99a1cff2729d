//! PLC runtime configuration.
//!
//! Timing and task parameters for the two PLC tasks.  The board topology
//! itself is not configurable; it lives in [`crate::plc::board`].

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::drivers::task_pin::Core;

/// Scheduling parameters for one PLC task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfig {
    /// CPU core the task is pinned to (ignored off-target).
    pub core: Core,
    /// FreeRTOS priority (ignored off-target).
    pub priority: u8,
    /// Stack size in KiB.
    pub stack_kb: usize,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            core: Core::App,
            priority: 5,
            stack_kb: 4,
        }
    }
}

/// Core PLC configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlcConfig {
    /// Input sampling period (milliseconds)
    pub sample_period_ms: u32,
    /// Evaluator pause after each applied state (milliseconds)
    pub settle_period_ms: u32,
    pub sampler_task: TaskConfig,
    pub evaluator_task: TaskConfig,
}

impl Default for PlcConfig {
    fn default() -> Self {
        Self {
            sample_period_ms: 50, // 20 Hz
            settle_period_ms: 10,
            sampler_task: TaskConfig::default(),
            evaluator_task: TaskConfig::default(),
        }
    }
}

/// Smallest stack a std thread survives on with logging enabled.
const MIN_STACK_KB: usize = 2;

impl PlcConfig {
    /// Reject values the tasks cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("sample_period_ms must be > 0"));
        }
        if self.settle_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("settle_period_ms must be > 0"));
        }
        for task in [&self.sampler_task, &self.evaluator_task] {
            if task.stack_kb < MIN_STACK_KB {
                return Err(ConfigError::ValidationFailed("stack_kb below 2 KiB"));
            }
            if task.priority == 0 {
                return Err(ConfigError::ValidationFailed("priority 0 is reserved for idle"));
            }
        }
        Ok(())
    }

    /// Parse a JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}
