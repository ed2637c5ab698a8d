//! `EngineLauncher` — start the external editor against a project.
//!
//! ## Launch states
//!
//! ```text
//! NotStarted ──spawn──▶ Starting ──probe──▶ Ready   (child left running)
//!                           │
//!                           └──────exit────▶ Exited  (code -2 is fatal)
//! ```
//!
//! The wait for the first event is bounded only when [`LaunchOptions::timeout`]
//! is set; `None` waits until the editor becomes ready or exits. Callers can
//! also pass a cancellation future to [`EngineLauncher::start_with`].

use std::ffi::OsString;
use std::future::{self, Future};
use std::path::{Path, PathBuf};
use std::time::Duration;

use panzer_core::config::CONFIG_FILE_NAME;
use panzer_core::storage::absolute;
use panzer_core::Settings;

use crate::error::LaunchError;
use crate::process::{
    EngineProcess, LaunchCommand, ProcessEvent, Spawner, TokioSpawner, FATAL_EXIT_CODE,
};

/// Command-line flag that precedes the config file path.
pub const CONFIG_FILE_FLAG: &str = "--projectConfigFile";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Upper bound on the wait for ready / exit. `None` is unbounded.
    pub timeout: Option<Duration>,
}

/// Non-error terminal states of a launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The editor is interactive and runs detached from the launcher.
    Ready,
    /// The editor exited with a code other than the fatal one.
    Exited { code: Option<i32> },
}

pub struct EngineLauncher<S: Spawner = TokioSpawner> {
    executable: PathBuf,
    working_dir: PathBuf,
    spawner: S,
    options: LaunchOptions,
}

impl EngineLauncher<TokioSpawner> {
    /// Editor at `<editor_dir>/<editor_name>`, run from `editor_dir`.
    pub fn from_settings(settings: &Settings) -> Self {
        EngineLauncher::with_spawner(
            absolute(&settings.editor_executable()),
            absolute(&settings.editor_dir),
            TokioSpawner::new(settings.ready_after()),
        )
        .with_options(LaunchOptions {
            timeout: settings.launch_timeout(),
        })
    }
}

impl<S: Spawner> EngineLauncher<S> {
    pub fn with_spawner(executable: PathBuf, working_dir: PathBuf, spawner: S) -> Self {
        Self {
            executable,
            working_dir,
            spawner,
            options: LaunchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LaunchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> LaunchOptions {
        self.options
    }

    /// `<exe> --projectConfigFile <abs project>/projectConfig.json`, run from the editor dir.
    pub fn command_for(&self, project_path: &Path) -> LaunchCommand {
        let config = absolute(project_path).join(CONFIG_FILE_NAME);
        LaunchCommand {
            program: self.executable.clone(),
            args: vec![OsString::from(CONFIG_FILE_FLAG), config.into_os_string()],
            working_dir: self.working_dir.clone(),
        }
    }

    /// Start the editor with the configured options and no cancellation.
    pub async fn start(&self, project_path: &Path) -> Result<LaunchOutcome, LaunchError> {
        self.start_with(project_path, self.options, future::pending())
            .await
    }

    /// Start the editor; resolves on the first of ready, exit, timeout or `cancel`.
    ///
    /// A child still running after a timeout or cancellation is not killed.
    pub async fn start_with<C>(
        &self,
        project_path: &Path,
        options: LaunchOptions,
        cancel: C,
    ) -> Result<LaunchOutcome, LaunchError>
    where
        C: Future<Output = ()>,
    {
        let command = self.command_for(project_path);
        tracing::info!(
            program = %command.program.display(),
            project = %project_path.display(),
            "starting editor"
        );

        let mut process = self
            .spawner
            .spawn(&command)
            .map_err(|source| LaunchError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        let deadline = async {
            match options.timeout {
                Some(limit) => tokio::time::sleep(limit).await,
                None => future::pending::<()>().await,
            }
        };

        let event = tokio::select! {
            event = process.next_event() => event?,
            () = deadline => {
                let limit = options.timeout.unwrap_or_default();
                tracing::warn!(?limit, "editor launch timed out");
                return Err(LaunchError::Timeout(limit));
            }
            () = cancel => {
                tracing::warn!("editor launch cancelled");
                return Err(LaunchError::Cancelled);
            }
        };

        classify(event)
    }
}

fn classify(event: ProcessEvent) -> Result<LaunchOutcome, LaunchError> {
    match event {
        ProcessEvent::Ready => {
            tracing::info!("editor is ready");
            Ok(LaunchOutcome::Ready)
        }
        ProcessEvent::Exited(Some(FATAL_EXIT_CODE)) => {
            tracing::error!(code = FATAL_EXIT_CODE, "editor rejected its arguments");
            Err(LaunchError::InvalidArguments)
        }
        // Any other exit, including non-zero, is a normal terminal state.
        ProcessEvent::Exited(code) => {
            tracing::info!(?code, "editor exited before becoming ready");
            Ok(LaunchOutcome::Exited { code })
        }
    }
}
