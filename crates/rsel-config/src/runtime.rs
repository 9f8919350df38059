use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::HumanDuration;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Minimum time between two progress log lines during a run.
    pub progress_interval: HumanDuration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            progress_interval: HumanDuration::from(Duration::from_secs(1)),
        }
    }
}
