//! Error type for composer operations

/// Errors raised by the composer controller and its infrastructure
#[derive(Debug, thiserror::Error)]
pub enum ComposerError {
    #[error("Unknown display strategy label: {0:?}")]
    UnknownDisplayStrategy(String),

    #[error("Invalid display strategy code: {0}")]
    InvalidDisplayStrategyCode(u8),

    #[error("No display strategy is selected")]
    NoDisplayStrategySelected,

    #[error("Dropdown entry {index} out of range ({len} entries)")]
    EntryOutOfRange { index: usize, len: usize },

    #[error("Dropdown entry {index} has no marker slot")]
    EntryNotMarkable { index: usize },

    #[error("Required element not found: {0}")]
    MissingElement(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("File read error: {0}")]
    FileRead(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ComposerError {
    fn from(err: reqwest::Error) -> Self {
        ComposerError::Network(err.to_string())
    }
}

#[cfg(feature = "web")]
impl From<gloo_net::Error> for ComposerError {
    fn from(err: gloo_net::Error) -> Self {
        ComposerError::Network(err.to_string())
    }
}
