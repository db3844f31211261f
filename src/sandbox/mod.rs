//! Isolated code execution: compile-then-run or run-only, under a hard
//! wall-clock timeout, with structured result capture.

mod language;
mod runner;

pub use language::*;
pub use runner::*;
