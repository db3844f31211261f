//! Core orchestration: tasks, role classification and the coordinator
//! driving the execute/review/retry cycle.

pub mod classify;
mod coordinator;
mod task;
mod task_state;

pub use classify::classify_role;
pub use coordinator::*;
pub use task::*;
pub use task_state::*;
