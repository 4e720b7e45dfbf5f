use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chat_core::{ChatSummary, Export, Message};
use parking_lot::RwLock;

use crate::error::LoadError;

#[derive(Debug)]
struct LoadedExport {
    export: Arc<Export>,
    path: PathBuf,
}

/// Holds at most one loaded export.
///
/// A load parses outside the lock and swaps the whole export in one step, so
/// readers observe either the previous export or the new one. Readers take a
/// snapshot and release the lock before doing any work.
#[derive(Debug, Default)]
pub struct ExportStore {
    current: RwLock<Option<Arc<LoadedExport>>>,
}

impl ExportStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        tracing::info!("Loading export from {}", path.display());

        let bytes = fs::read(path).map_err(|source| {
            tracing::warn!("Could not read {}: {}", path.display(), source);
            LoadError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        self.load_bytes(&bytes, path)
    }

    /// Parses and installs an export from bytes already in memory. `source`
    /// is recorded as the export's file path.
    pub fn load_bytes(&self, bytes: &[u8], source: impl Into<PathBuf>) -> Result<(), LoadError> {
        let path = source.into();
        let export = parse_export(bytes).map_err(|e| {
            tracing::warn!("Rejected export {}: {}", path.display(), e);
            e
        })?;

        let chat_count = export.chats.len();
        let loaded = Arc::new(LoadedExport {
            export: Arc::new(export),
            path,
        });

        tracing::info!(
            "Loaded export {} with {} chats",
            loaded.path.display(),
            chat_count
        );

        *self.current.write() = Some(loaded);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// Snapshot of the current export. Stays valid across later loads.
    pub fn export(&self) -> Option<Arc<Export>> {
        self.snapshot().map(|loaded| Arc::clone(&loaded.export))
    }

    pub fn file_path(&self) -> Option<PathBuf> {
        self.snapshot().map(|loaded| loaded.path.clone())
    }

    pub fn file_name(&self) -> Option<String> {
        self.snapshot().and_then(|loaded| {
            loaded
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
    }

    /// Chat summaries, most recent first. Chats without messages sort last.
    pub fn chats(&self) -> Vec<ChatSummary> {
        let Some(export) = self.export() else {
            return Vec::new();
        };

        let mut summaries: Vec<ChatSummary> =
            export.chats.iter().map(ChatSummary::from_chat).collect();
        summaries.sort_by(|a, b| b.last_message_date.cmp(&a.last_message_date));
        summaries
    }

    /// Messages of the given chat in stored order. Unknown ids yield an
    /// empty list.
    pub fn messages(&self, chat_id: &str) -> Vec<Message> {
        self.export()
            .and_then(|export| {
                export
                    .chats
                    .iter()
                    .find(|chat| chat.id == chat_id)
                    .map(|chat| chat.messages.clone())
            })
            .unwrap_or_default()
    }

    fn snapshot(&self) -> Option<Arc<LoadedExport>> {
        self.current.read().clone()
    }
}

fn parse_export(bytes: &[u8]) -> Result<Export, LoadError> {
    let export: Export = serde_json::from_slice(bytes)?;
    if export.chats.is_empty() {
        return Err(LoadError::EmptyExport);
    }
    Ok(export)
}
