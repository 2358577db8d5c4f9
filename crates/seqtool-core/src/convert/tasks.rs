use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::error::{Error, Result};

/// How units of work are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One thread per unit, joined at the end of the run
    #[default]
    Threaded,
    /// Every unit runs inline as soon as it is spawned
    Synchronous,
}

impl ExecutionMode {
    pub fn from_single_threaded(single_threaded: bool) -> Self {
        if single_threaded {
            Self::Synchronous
        } else {
            Self::Threaded
        }
    }
}

/// A unit of work that failed
#[derive(Debug)]
pub struct TaskFailure {
    pub name: String,
    pub error: Error,
}

/// Outcome of every unit launched during a run
#[derive(Debug, Default)]
pub struct RunReport {
    pub succeeded: Vec<String>,
    pub failures: Vec<TaskFailure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn task_count(&self) -> usize {
        self.succeeded.len() + self.failures.len()
    }

    fn record(&mut self, name: String, result: Result<()>) {
        match result {
            Ok(()) => {
                debug!("Task '{}' finished", name);
                self.succeeded.push(name);
            }
            Err(e) => {
                error!("Task '{}' failed: {}", name, e);
                self.failures.push(TaskFailure { name, error: e });
            }
        }
    }
}

/// Units of work launched during one run.
///
/// Tasks never cancel each other; a failing task is recorded and its
/// siblings run to completion. `join` is the single barrier.
#[derive(Debug, Default)]
pub struct TaskSet {
    mode: ExecutionMode,
    running: Vec<(String, JoinHandle<Result<()>>)>,
    report: RunReport,
}

impl TaskSet {
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            mode,
            running: Vec::new(),
            report: RunReport::default(),
        }
    }

    pub fn spawn<F>(&mut self, name: impl Into<String>, task: F)
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        let name = name.into();
        match self.mode {
            ExecutionMode::Synchronous => {
                let result = task();
                self.report.record(name, result);
            }
            ExecutionMode::Threaded => {
                let spawned = thread::Builder::new()
                    .name(name.clone())
                    .spawn(task);
                match spawned {
                    Ok(handle) => self.running.push((name, handle)),
                    Err(e) => self.report.record(name, Err(e.into())),
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.running.len() + self.report.task_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait for every launched task and collect the outcomes.
    pub fn join(mut self) -> RunReport {
        for (name, handle) in self.running.drain(..) {
            let result = match handle.join() {
                Ok(result) => result,
                Err(_) => Err(Error::TaskPanicked(name.clone())),
            };
            self.report.record(name, result);
        }
        self.report
    }
}
