//! Process table inspection backends

use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use sysinfo::System;
use thiserror::Error;

/// Failure of an underlying OS facility (listing tool, spawn, kill).
///
/// A listing that succeeds with zero matches is not an error; it means the
/// service is not running.
#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("failed to run {tool}: {source}")]
    Tool {
        tool: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("failed to spawn {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Capability over the OS process table.
///
/// Injected into the controller as a trait object so tests can substitute a
/// fake table instead of depending on the real OS environment.
pub trait ProcessInspector {
    /// Whether one or more processes match the given image name.
    fn is_running(&mut self, name: &str) -> Result<bool, InspectorError>;

    /// Spawn a detached process from `path` with stdio redirected to null.
    ///
    /// Returns the child pid. The child is never waited on or supervised;
    /// whether it stays alive afterwards is not this method's concern.
    fn spawn_detached(&mut self, path: &Path) -> Result<u32, InspectorError>;

    /// Issue a forceful termination request to every process matching `name`.
    ///
    /// Returns the number of requests issued. Exit is not verified.
    fn kill_by_name(&mut self, name: &str) -> Result<u32, InspectorError>;
}

/// Which process-table backend to use. Selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectorBackend {
    /// In-process queries via the system's process table.
    #[default]
    Native,
    /// Shell out to `pgrep`/`SIGKILL` (unix only).
    Pgrep,
}

/// Build the inspector for the chosen backend.
pub fn select_inspector(backend: InspectorBackend) -> anyhow::Result<Box<dyn ProcessInspector>> {
    match backend {
        InspectorBackend::Native => Ok(Box::new(NativeInspector::new())),
        #[cfg(unix)]
        InspectorBackend::Pgrep => Ok(Box::new(PgrepInspector)),
        #[cfg(not(unix))]
        InspectorBackend::Pgrep => anyhow::bail!("the pgrep backend is only available on unix hosts"),
    }
}

fn spawn_detached_impl(path: &Path) -> Result<u32, InspectorError> {
    let child = Command::new(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| InspectorError::Spawn {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(child.id())
}

/// Inspector backed by the in-process system process table.
pub struct NativeInspector {
    sys: System,
}

impl NativeInspector {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }
}

impl Default for NativeInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessInspector for NativeInspector {
    fn is_running(&mut self, name: &str) -> Result<bool, InspectorError> {
        self.sys.refresh_processes();

        // Case-insensitive match on the image name, per OS convention.
        // One or more matches counts as running.
        let running = self
            .sys
            .processes()
            .values()
            .any(|proc| proc.name().eq_ignore_ascii_case(name));

        tracing::debug!(name, running, "process table queried");
        Ok(running)
    }

    fn spawn_detached(&mut self, path: &Path) -> Result<u32, InspectorError> {
        spawn_detached_impl(path)
    }

    fn kill_by_name(&mut self, name: &str) -> Result<u32, InspectorError> {
        self.sys.refresh_processes();

        let mut requested = 0;
        for proc in self.sys.processes().values() {
            if proc.name().eq_ignore_ascii_case(name) && proc.kill() {
                requested += 1;
            }
        }

        tracing::debug!(name, requested, "termination requested");
        Ok(requested)
    }
}

/// Inspector shelling out to `pgrep -x` for listing; kills matched pids
/// with SIGKILL directly.
#[cfg(unix)]
pub struct PgrepInspector;

#[cfg(unix)]
impl PgrepInspector {
    fn matching_pids(&self, name: &str) -> Result<Vec<u32>, InspectorError> {
        let output = Command::new("pgrep")
            .arg("-x")
            .arg(name)
            .output()
            .map_err(|source| InspectorError::Tool {
                tool: "pgrep",
                source,
            })?;

        // pgrep exits 1 when nothing matches; absence means "not running",
        // not a failure.
        let pids = String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter_map(|line| line.trim().parse::<u32>().ok())
            .collect();

        Ok(pids)
    }
}

#[cfg(unix)]
impl ProcessInspector for PgrepInspector {
    fn is_running(&mut self, name: &str) -> Result<bool, InspectorError> {
        let running = !self.matching_pids(name)?.is_empty();
        tracing::debug!(name, running, "pgrep queried");
        Ok(running)
    }

    fn spawn_detached(&mut self, path: &Path) -> Result<u32, InspectorError> {
        spawn_detached_impl(path)
    }

    fn kill_by_name(&mut self, name: &str) -> Result<u32, InspectorError> {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let mut requested = 0;
        for pid in self.matching_pids(name)? {
            match kill(Pid::from_raw(pid as i32), Signal::SIGKILL) {
                Ok(()) => requested += 1,
                // Already gone between listing and kill.
                Err(nix::errno::Errno::ESRCH) => {}
                Err(err) => tracing::debug!(pid, %err, "kill request failed"),
            }
        }

        tracing::debug!(name, requested, "termination requested");
        Ok(requested)
    }
}
