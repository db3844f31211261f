use super::task_state::TaskState;
use crate::agents::RoleKind;
use serde::{Deserialize, Serialize};

/// Estimated complexity assigned to a task by the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Task shape produced by the planner's structured decomposition
#[derive(Debug, Clone, Deserialize)]
pub struct TaskSpec {
    /// Description of the work to be done
    pub description: String,
    /// Estimated complexity, defaults to Medium when the model omits it
    #[serde(default = "default_complexity")]
    pub estimated_complexity: Complexity,
    /// Target file path, empty when not applicable
    #[serde(default)]
    pub file_path: String,
}

fn default_complexity() -> Complexity {
    Complexity::Medium
}

/// Envelope for the planner's JSON reply
#[derive(Debug, Deserialize)]
pub struct TaskList {
    pub tasks: Vec<TaskSpec>,
}

/// One decomposed unit of work with an assigned role and completion state
#[derive(Debug, Clone)]
pub struct Task {
    /// Identifier, unique and stable within a goal run
    pub id: u32,
    /// Description of the work to be done
    pub description: String,
    /// Estimated complexity
    pub complexity: Complexity,
    /// Target file path, may be empty
    pub file_path: String,
    /// Role responsible for the task, immutable once assigned
    pub assigned_role: Option<RoleKind>,
    /// Whether the task was approved by the reviewer
    pub completed: bool,
    /// Current state in the execute/review/retry cycle
    pub state: TaskState,
    /// Feedback carried over from rejected attempts, appended in order
    pub feedback_history: Vec<String>,
}

impl Task {
    /// Creates a task from a planner-produced spec
    pub fn from_spec(id: u32, spec: TaskSpec) -> Self {
        Self {
            id,
            description: spec.description,
            complexity: spec.estimated_complexity,
            file_path: spec.file_path,
            assigned_role: None,
            completed: false,
            state: TaskState::Pending,
            feedback_history: Vec::new(),
        }
    }

    /// Synthesizes the single fallback task used when decomposition yields nothing
    pub fn fallback(goal: &str) -> Self {
        Self {
            id: 1,
            description: format!("Plan and carry out the goal: {}", goal),
            complexity: Complexity::Medium,
            file_path: String::new(),
            assigned_role: None,
            completed: false,
            state: TaskState::Pending,
            feedback_history: Vec::new(),
        }
    }

    /// Appends rejection feedback carried into the next attempt
    pub fn append_feedback(&mut self, feedback: &str) {
        self.feedback_history.push(feedback.to_string());
    }

    /// Returns the description extended with all accumulated feedback
    pub fn description_with_feedback(&self) -> String {
        let mut text = self.description.clone();
        for feedback in &self.feedback_history {
            text.push_str("\nPrevious attempt feedback: ");
            text.push_str(feedback);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_task_is_medium_with_empty_path() {
        let task = Task::fallback("build a game");
        assert_eq!(task.id, 1);
        assert_eq!(task.complexity, Complexity::Medium);
        assert!(task.file_path.is_empty());
        assert!(!task.completed);
        assert_eq!(task.state, TaskState::Pending);
    }

    #[test]
    fn feedback_accumulates_into_description() {
        let mut task = Task::from_spec(
            1,
            TaskSpec {
                description: "Implement add".into(),
                estimated_complexity: Complexity::Low,
                file_path: "src/add.py".into(),
            },
        );
        task.append_feedback("missing edge case");
        task.append_feedback("still failing");
        let text = task.description_with_feedback();
        assert!(text.starts_with("Implement add"));
        assert!(text.contains("Previous attempt feedback: missing edge case"));
        assert!(text.contains("Previous attempt feedback: still failing"));
    }

    #[test]
    fn task_spec_decodes_with_defaults() {
        let spec: TaskSpec =
            serde_json::from_str(r#"{"description": "Review the code"}"#).unwrap();
        assert_eq!(spec.estimated_complexity, Complexity::Medium);
        assert!(spec.file_path.is_empty());
    }
}
