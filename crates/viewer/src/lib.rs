pub mod app;
pub mod config;
pub mod errors;
pub mod models;
pub mod telemetry;

pub use app::App;
pub use config::ViewerConfig;
pub use errors::ViewerError;
pub use models::LoadResult;

pub use chat_core::{ChatSummary, DayGroup, Message, SearchResult};
