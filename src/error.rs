//! Error types for the advisor demo.

use std::path::PathBuf;

/// Errors surfaced while starting the demo.
///
/// Playback itself never fails: collaborators that are missing or broken
/// simply disable the feature that needs them.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// Script file could not be read.
    #[error("Failed to read script {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Script file is not valid TOML or does not match the script schema.
    #[error("Failed to parse script {path}: {source}")]
    ScriptParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
