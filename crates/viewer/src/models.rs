use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Outcome of a load request as handed to the presentation layer.
/// Serializes to `{}` on success and `{"error": "..."}` on failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoadResult {
    pub fn ok() -> Self {
        Self { error: None }
    }

    pub fn failed(error: impl Display) -> Self {
        Self {
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
