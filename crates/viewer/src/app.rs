use std::path::Path;
use std::sync::Arc;

use chat_core::{group_by_day, ChatSummary, DayGroup, Message, SearchResult};
use store::ExportStore;

use crate::config::ViewerConfig;
use crate::errors::ViewerError;
use crate::models::LoadResult;

/// Query surface consumed by a presentation layer.
///
/// Cloning is cheap and clones share the same loaded export.
#[derive(Debug, Clone, Default)]
pub struct App {
    store: Arc<ExportStore>,
    config: ViewerConfig,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(ViewerConfig::default())
    }

    pub fn with_config(config: ViewerConfig) -> Self {
        Self {
            store: Arc::new(ExportStore::new()),
            config,
        }
    }

    pub fn from_config_file(path: &Path) -> Result<Self, ViewerError> {
        let mut config = ViewerConfig::load(path)?;
        config.search = config.search.with_env_overrides();
        Ok(Self::with_config(config))
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Opens the export named in the configuration, if any. A failure is
    /// logged and reported but leaves the app usable.
    pub fn startup(&self) -> LoadResult {
        match self.config.export.path.as_deref() {
            Some(path) => {
                let result = self.load_file(path);
                if let Some(error) = &result.error {
                    tracing::warn!("Could not open configured export {}: {}", path, error);
                }
                result
            }
            None => LoadResult::ok(),
        }
    }

    pub fn try_load_file(&self, path: impl AsRef<Path>) -> Result<(), ViewerError> {
        self.store.load_file(path)?;
        Ok(())
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> LoadResult {
        match self.try_load_file(path) {
            Ok(()) => LoadResult::ok(),
            Err(e) => LoadResult::failed(e),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    pub fn loaded_file_name(&self) -> Option<String> {
        self.store.file_name()
    }

    pub fn chats(&self) -> Vec<ChatSummary> {
        self.store.chats()
    }

    pub fn messages(&self, chat_id: &str) -> Vec<Message> {
        self.store.messages(chat_id)
    }

    pub fn message_days(&self, chat_id: &str) -> Vec<DayGroup> {
        group_by_day(&self.store.messages(chat_id))
    }

    /// Searches the current export. Surrounding whitespace in the query is
    /// ignored and the configured result cap applies.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let export = self.store.export();
        search::search(
            export.as_deref(),
            query.trim(),
            self.config.search.max_results,
        )
    }
}
