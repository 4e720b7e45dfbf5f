use store::LoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ViewerError {
    /// True when picking a different export file can fix the problem.
    pub fn is_user_correctable(&self) -> bool {
        match self {
            ViewerError::Load(_) => true,
            ViewerError::Config(_) => false,
        }
    }
}

impl From<anyhow::Error> for ViewerError {
    fn from(err: anyhow::Error) -> Self {
        ViewerError::Config(format!("{err:#}"))
    }
}
