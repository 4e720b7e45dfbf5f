use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use search::DEFAULT_MAX_RESULTS;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

impl SearchConfig {
    pub fn with_env_overrides(&self) -> Self {
        self.with_max_results_override(env::var("VIEWER_MAX_RESULTS").ok())
    }

    /// Unparseable overrides are ignored.
    pub fn with_max_results_override(&self, value: Option<String>) -> Self {
        let max_results = value
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(self.max_results);
        Self { max_results }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Export opened by [`crate::App::startup`].
    pub path: Option<String>,
}

impl ViewerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ViewerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_from_env() -> anyhow::Result<Self> {
        let config_path =
            env::var("VIEWER_CONFIG_PATH").unwrap_or_else(|_| Self::default_config_path());
        let mut config = Self::load(Path::new(&config_path))?;
        config.search = config.search.with_env_overrides();
        Ok(config)
    }

    pub fn default_config_path() -> String {
        "./viewer.toml".to_string()
    }
}
