//! Shared fake process table for integration tests
#![allow(dead_code)]

use redisctl::process::{InspectorError, ProcessInspector, ServiceIdentity};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Observable state of the fake process table.
#[derive(Debug, Default)]
pub struct FakeTable {
    pub running: bool,
    pub spawns: u32,
    pub kills: u32,
    pub spawned_paths: Vec<PathBuf>,
}

/// Inspector over an in-memory process table. The returned handle lets a
/// test observe what the controller actually requested.
pub struct FakeInspector {
    table: Rc<RefCell<FakeTable>>,
}

impl FakeInspector {
    pub fn new() -> (Self, Rc<RefCell<FakeTable>>) {
        Self::with_running(false)
    }

    pub fn with_running(running: bool) -> (Self, Rc<RefCell<FakeTable>>) {
        let table = Rc::new(RefCell::new(FakeTable {
            running,
            ..FakeTable::default()
        }));
        (
            Self {
                table: Rc::clone(&table),
            },
            table,
        )
    }
}

impl ProcessInspector for FakeInspector {
    fn is_running(&mut self, _name: &str) -> Result<bool, InspectorError> {
        Ok(self.table.borrow().running)
    }

    fn spawn_detached(&mut self, path: &Path) -> Result<u32, InspectorError> {
        let mut table = self.table.borrow_mut();
        table.spawns += 1;
        table.spawned_paths.push(path.to_path_buf());
        table.running = true;
        Ok(4242)
    }

    fn kill_by_name(&mut self, _name: &str) -> Result<u32, InspectorError> {
        let mut table = self.table.borrow_mut();
        table.kills += 1;
        table.running = false;
        Ok(1)
    }
}

pub fn test_identity() -> ServiceIdentity {
    ServiceIdentity {
        display_name: "Redis".to_string(),
        process_name: "redis-server".to_string(),
        executable: PathBuf::from("redis-server"),
    }
}
