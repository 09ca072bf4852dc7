//! Pass reporting types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action issued during a convergence pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassAction {
    /// Best-effort local cleanup sequence
    Unregister,
    /// Registration against the desired server
    Register,
    /// Service-level subscription attach
    Attach,
}

/// Summary of one convergence pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassReport {
    /// Actions issued, in order
    pub actions: Vec<PassAction>,
    /// Non-zero exits that were tolerated
    pub tolerated_failures: u32,
    /// When the pass finished
    pub completed_at: DateTime<Utc>,
}

impl PassReport {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            tolerated_failures: 0,
            completed_at: Utc::now(),
        }
    }

    /// Record an issued action
    pub fn record(&mut self, action: PassAction) {
        self.actions.push(action);
    }

    /// Count a tolerated command failure
    pub fn tolerate(&mut self) {
        self.tolerated_failures += 1;
    }

    /// Whether the pass issued no commands
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for PassReport {
    fn default() -> Self {
        Self::new()
    }
}
