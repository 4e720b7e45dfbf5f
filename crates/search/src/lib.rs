pub mod engine;
pub mod snippet;

pub use engine::{search, DEFAULT_MAX_RESULTS};
pub use snippet::{extract_snippet, SNIPPET_LEN};
