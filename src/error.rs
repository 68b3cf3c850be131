use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocfgError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize document: {0}")]
    Emit(#[from] serde_yaml::Error),

    #[error("Unknown resource '{0}'")]
    UnknownResource(String),

    #[error("A resource named '{0}' already exists")]
    DuplicateResource(String),

    #[error("Provider index {index} out of range for {count} providers")]
    ProviderIndex { index: usize, count: usize },

    #[error("Wrong number of values to unpack for {provider}: expected {expected}, got {got}")]
    ProviderArity {
        provider: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Malformed {provider} value at position {position}: expected {expected}")]
    ProviderCell {
        provider: &'static str,
        position: usize,
        expected: &'static str,
    },
}
