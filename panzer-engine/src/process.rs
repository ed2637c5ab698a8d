//! Child-process seam: how an editor is spawned and observed.
//!
//! The launcher only sees [`ProcessEvent`]s, so tests drive it with scripted
//! processes while [`TokioSpawner`] runs the real executable.

use std::ffi::OsString;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};

/// Exit code the editor uses to reject its command line.
pub const FATAL_EXIT_CODE: i32 = -2;

/// Fully resolved editor invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub working_dir: PathBuf,
}

/// First observable state change of a spawned editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessEvent {
    /// The process became interactive; it keeps running on its own.
    Ready,
    /// The process terminated before becoming ready. `None` when killed by a signal.
    Exited(Option<i32>),
}

pub trait EngineProcess: Send {
    /// Resolve with whichever of ready / exited happens first.
    fn next_event(&mut self) -> impl Future<Output = io::Result<ProcessEvent>> + Send;
}

pub trait Spawner {
    type Process: EngineProcess;

    fn spawn(&self, command: &LaunchCommand) -> io::Result<Self::Process>;
}

// ---------------------------------------------------------------------------
// Real processes
// ---------------------------------------------------------------------------

/// Spawns editors with `tokio::process`.
///
/// Readiness probe: an editor that is still running `ready_after` the spawn
/// is considered interactive.
#[derive(Debug, Clone, Copy)]
pub struct TokioSpawner {
    pub ready_after: Duration,
}

impl TokioSpawner {
    pub fn new(ready_after: Duration) -> Self {
        Self { ready_after }
    }
}

impl Spawner for TokioSpawner {
    type Process = ChildProcess;

    fn spawn(&self, command: &LaunchCommand) -> io::Result<ChildProcess> {
        let child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.working_dir)
            .stdin(Stdio::null())
            .spawn()?;
        tracing::debug!(pid = ?child.id(), program = %command.program.display(), "spawned editor");
        Ok(ChildProcess {
            child,
            ready_after: self.ready_after,
        })
    }
}

/// A spawned editor. Dropping it does not kill the child.
#[derive(Debug)]
pub struct ChildProcess {
    child: Child,
    ready_after: Duration,
}

impl EngineProcess for ChildProcess {
    async fn next_event(&mut self) -> io::Result<ProcessEvent> {
        tokio::select! {
            biased;
            status = self.child.wait() => {
                Ok(ProcessEvent::Exited(status?.code().map(normalize_exit_code)))
            }
            () = tokio::time::sleep(self.ready_after) => Ok(ProcessEvent::Ready),
        }
    }
}

/// Map a platform exit status to the editor's signed exit code.
///
/// Unix only reports the low byte, so `exit(-2)` arrives as `254`.
pub fn normalize_exit_code(code: i32) -> i32 {
    #[cfg(unix)]
    {
        code as u8 as i8 as i32
    }
    #[cfg(not(unix))]
    {
        code
    }
}
