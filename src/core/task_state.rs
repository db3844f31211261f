/// Represents the current state of a task in the execute/review/retry cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Initial state, also re-entered after each rejection
    Pending,
    /// State while the assigned role executor is working on the task
    Executing,
    /// State while the reviewer is evaluating the execution result
    Reviewing,
    /// Terminal state once the reviewer approves the result
    Completed,
    /// Terminal state once the retry budget is exhausted
    Abandoned,
}

impl TaskState {
    /// Returns true when no further work may be scheduled against the task
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Abandoned)
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskState::Pending => "Pending",
            TaskState::Executing => "Executing",
            TaskState::Reviewing => "Reviewing",
            TaskState::Completed => "Completed",
            TaskState::Abandoned => "Abandoned",
        };
        write!(f, "{}", s)
    }
}
