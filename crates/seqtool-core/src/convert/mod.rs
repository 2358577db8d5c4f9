//! Conversion orchestration.
//!
//! This module sequences a run:
//! - `process_file` - resolve, decode, filter and encode one input
//! - `run` - launch per-part and per-file units and join them
//! - `TaskSet` - threaded or synchronous execution with a single join barrier
//! - `TempStore` - temporary files torn down after the barrier

mod orchestrator;
mod process;
mod tasks;
mod temp;

pub use orchestrator::*;
pub use process::*;
pub use tasks::*;
pub use temp::*;
