use thiserror::Error;

/// Errors that can occur while loading gate configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to extract resource gate config: {0}")]
    Extract(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Extract(Box::new(err))
    }
}
