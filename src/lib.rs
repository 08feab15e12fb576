//! Redisctl library - interactive lifecycle controller for a local redis-server

pub mod config;
pub mod process;
pub mod repl;

// Re-export commonly used types
pub use config::{Config, ServiceConfig};
pub use process::{
    select_inspector, InspectorBackend, InspectorError, NativeInspector, ProcessInspector,
    RunState, ServiceController, ServiceIdentity, StartOutcome, StopOutcome,
};
pub use repl::{run_loop, ReplCommand};
