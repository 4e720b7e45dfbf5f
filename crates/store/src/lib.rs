pub mod error;
pub mod export_store;

pub use error::LoadError;
pub use export_store::ExportStore;
