use std::fmt;

use serde::Serialize;

/// Terminal result of a run, serialized as `{"failed", "changed", "msg"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallOutcome {
    pub failed:  bool,
    /// A write or delete of the managed binary was attempted.
    pub changed: bool,
    #[serde(rename = "msg")]
    pub message: Option<String>,
}

impl InstallOutcome {
    /// Mark the run failed. Only the first message is kept.
    pub fn fail(&mut self, error: impl fmt::Display) {
        self.failed = true;
        if self.message.is_none() {
            self.message = Some(error.to_string());
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> { serde_json::to_string(self) }
}
