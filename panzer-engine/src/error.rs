use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Error surface for editor launches.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The executable could not be located or started at all.
    #[error("failed to spawn editor {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The editor exited with the fatal invalid-arguments code.
    #[error("Failed to start the engine, invalid args")]
    InvalidArguments,

    #[error("editor neither became ready nor exited within {0:?}")]
    Timeout(Duration),

    #[error("editor launch cancelled")]
    Cancelled,

    #[error("I/O error while waiting for editor: {0}")]
    Io(#[from] std::io::Error),
}
