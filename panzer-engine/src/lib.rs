//! Editor process launcher: spawn, readiness probe, exit-code classification.

mod error;
pub mod launcher;
pub mod process;

pub use error::LaunchError;
pub use launcher::{EngineLauncher, LaunchOptions, LaunchOutcome, CONFIG_FILE_FLAG};
pub use process::{
    normalize_exit_code, ChildProcess, EngineProcess, LaunchCommand, ProcessEvent, Spawner,
    TokioSpawner, FATAL_EXIT_CODE,
};
