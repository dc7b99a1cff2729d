//! Thread-backed task runner.
//!
//! Implements [`TaskRunner`] on top of
//! [`spawn_on_core`](crate::drivers::task_pin::spawn_on_core): one pinned
//! FreeRTOS-backed pthread per PLC task on target, a plain thread on the
//! host.

use std::io;
use std::thread::JoinHandle;

use crate::app::ports::{SpawnError, TaskBody, TaskKind, TaskRunner};
use crate::config::TaskConfig;
use crate::drivers::task_pin::spawn_on_core;

#[derive(Debug, Clone, Copy, Default)]
pub struct PinnedThreadRunner;

impl TaskRunner for PinnedThreadRunner {
    fn spawn(
        &mut self,
        kind: TaskKind,
        config: &TaskConfig,
        body: TaskBody,
    ) -> Result<JoinHandle<()>, SpawnError> {
        spawn_on_core(
            config.core,
            config.priority,
            config.stack_kb,
            kind.thread_name(),
            body,
        )
        .map_err(|e| {
            log::warn!("{}: {}", kind.label(), e);
            spawn_error(&e)
        })
    }
}

/// A refused thread config is the runner declining the task; every other
/// failure means the OS could not create it.
fn spawn_error(e: &io::Error) -> SpawnError {
    match e.kind() {
        io::ErrorKind::InvalidInput => SpawnError::Rejected("pthread config refused"),
        _ => SpawnError::OutOfResources,
    }
}
