//! Process inspection and lifecycle control for the managed service

pub mod control;
pub mod inspect;

pub use control::{RunState, ServiceController, ServiceIdentity, StartOutcome, StopOutcome};
#[cfg(unix)]
pub use inspect::PgrepInspector;
pub use inspect::{select_inspector, InspectorBackend, InspectorError, NativeInspector, ProcessInspector};
