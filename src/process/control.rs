//! Lifecycle controller for the managed service

use crate::process::ProcessInspector;
use anyhow::Result;
use std::path::PathBuf;

/// The fixed identity of the managed service, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServiceIdentity {
    /// Name used in user-facing messages, e.g. "Redis".
    pub display_name: String,
    /// Image name matched in the process table, e.g. "redis-server".
    pub process_name: String,
    /// Path (or PATH-resolved name) of the executable to spawn.
    pub executable: PathBuf,
}

/// Running-state derived from a fresh process-table query. Never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    NotRunning,
}

/// Result of a `start` request.
///
/// `SpawnRequested` means exactly that: a spawn was issued. Whether the
/// child actually initialized is not verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    AlreadyRunning,
    SpawnRequested,
}

/// Result of a `stop` request.
///
/// `TerminationRequested` carries no guarantee that the processes exited;
/// the forceful signal is sent and nothing is re-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    NotRunning,
    TerminationRequested,
}

/// Drives start/stop/status for one service through an injected inspector.
///
/// Keeps no running-state of its own; the OS process table is the only
/// state store.
pub struct ServiceController {
    identity: ServiceIdentity,
    inspector: Box<dyn ProcessInspector>,
}

impl ServiceController {
    pub fn new(identity: ServiceIdentity, inspector: Box<dyn ProcessInspector>) -> Self {
        Self {
            identity,
            inspector,
        }
    }

    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    /// Start the service unless an instance is already running.
    pub fn start(&mut self) -> Result<StartOutcome> {
        if self.inspector.is_running(&self.identity.process_name)? {
            return Ok(StartOutcome::AlreadyRunning);
        }

        let pid = self.inspector.spawn_detached(&self.identity.executable)?;
        tracing::info!(pid, exe = %self.identity.executable.display(), "spawn requested");

        Ok(StartOutcome::SpawnRequested)
    }

    /// Forcefully terminate all matching instances, if any are running.
    pub fn stop(&mut self) -> Result<StopOutcome> {
        if !self.inspector.is_running(&self.identity.process_name)? {
            return Ok(StopOutcome::NotRunning);
        }

        let requested = self.inspector.kill_by_name(&self.identity.process_name)?;
        tracing::info!(
            requested,
            name = %self.identity.process_name,
            "termination requested"
        );

        Ok(StopOutcome::TerminationRequested)
    }

    /// Report the current running-state. Pure read.
    pub fn status(&mut self) -> Result<RunState> {
        if self.inspector.is_running(&self.identity.process_name)? {
            Ok(RunState::Running)
        } else {
            Ok(RunState::NotRunning)
        }
    }
}
