mod coder;
mod context_log;
mod planner;
mod reviewer;
mod tester;
mod worker;

pub use coder::*;
pub use context_log::*;
pub use planner::*;
pub use reviewer::*;
pub use tester::*;
pub use worker::*;

use crate::constants::{EXECUTOR_TOOL_INSTRUCTIONS, MAX_RELEVANT_CONTEXT_ENTRIES};
use crate::core::Task;
use crate::errors::Error;
use crate::sandbox::ExecutionResult;
use crate::tools::{registry, ToolCall};

/// Closed set of role tags determining which capabilities an executor supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    Planner,
    Coder,
    Tester,
    Reviewer,
    Research,
    Debug,
    Optimization,
}

impl RoleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::Planner => "planner",
            RoleKind::Coder => "coder",
            RoleKind::Tester => "tester",
            RoleKind::Reviewer => "reviewer",
            RoleKind::Research => "research",
            RoleKind::Debug => "debug",
            RoleKind::Optimization => "optimization",
        }
    }
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a role executor's attempt at a task
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    /// Raw text content or the dispatch message of a requested tool
    pub content: String,
    /// Name of the tool that was dispatched, if any
    pub tool_name: Option<String>,
    /// Whether the attempt (including any tool dispatch) succeeded
    pub success: bool,
    /// Sandbox result attached when the task targeted an executable file
    pub execution: Option<ExecutionResult>,
}

impl TaskOutcome {
    /// Plain-text outcome with no tool provenance
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_name: None,
            success: true,
            execution: None,
        }
    }
}

/// The reviewer's approve/reject decision with feedback text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewVerdict {
    pub approved: bool,
    /// Non-empty whenever the verdict is not approved
    pub feedback: String,
}

/// High-level assessment of the whole run produced by the reviewer
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ProgressReview {
    #[serde(default)]
    pub progress: String,
    #[serde(default)]
    pub missing: String,
    #[serde(default)]
    pub next_steps: String,
}

/// Polymorphic capability set shared by all role executors.
///
/// Each concrete role implements a subset; the defaults report the
/// capability as unsupported so the orchestrator can convert the error
/// into rejection feedback instead of crashing the run.
#[async_trait::async_trait]
pub trait AgentBehavior: Send + Sync {
    fn name(&self) -> &str;
    fn role(&self) -> RoleKind;

    async fn decompose_goal(&mut self, _goal: &str) -> Result<Vec<Task>, Error> {
        Err(self.unsupported("decompose_goal"))
    }

    async fn execute_task(&mut self, _task: &Task, _goal: &str) -> Result<TaskOutcome, Error> {
        Err(self.unsupported("execute_task"))
    }

    async fn review_task(
        &mut self,
        _task: &Task,
        _outcome: &TaskOutcome,
        _goal: &str,
    ) -> Result<ReviewVerdict, Error> {
        Err(self.unsupported("review_task"))
    }

    async fn review_overall_progress(
        &mut self,
        _tasks: &[Task],
        _goal: &str,
    ) -> Result<ProgressReview, Error> {
        Err(self.unsupported("review_overall_progress"))
    }

    fn unsupported(&self, capability: &'static str) -> Error {
        Error::UnsupportedCapability {
            role: self.role().to_string(),
            capability,
        }
    }
}

/// Scans a model reply for a tool request line.
///
/// Returns `None` when the reply is plain text, `Some(Err(_))` when a
/// request line is present but its JSON payload cannot be decoded.
pub(crate) fn parse_tool_request(resp: &str) -> Option<Result<ToolCall, String>> {
    for line in resp.lines() {
        if let Some(idx) = line.find("TOOL_REQUEST:") {
            let payload = line[idx + "TOOL_REQUEST:".len()..].trim();
            return match serde_json::from_str::<ToolCall>(payload) {
                Ok(call) => Some(Ok(call)),
                Err(e) => Some(Err(format!("Error: invalid JSON in tool request: {}", e))),
            };
        }
    }
    None
}

/// Extracts the outermost JSON object from a reply that may wrap it in
/// code fences or prose.
pub(crate) fn extract_json_object(resp: &str) -> Option<&str> {
    let start = resp.find('{')?;
    let end = resp.rfind('}')?;
    if end > start {
        Some(&resp[start..=end])
    } else {
        None
    }
}

/// Builds the instruction payload sent to an executing role: the task with
/// its carried-over feedback, relevant context-log entries, the overall
/// goal, and the tool capability list.
pub(crate) fn build_executor_prompt(
    role: RoleKind,
    task: &Task,
    goal: &str,
    context: &ContextLog,
) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!("Current role: {}\n", role));
    prompt.push_str("Task: ");
    prompt.push_str(&task.description_with_feedback());
    if !task.file_path.is_empty() {
        prompt.push_str(&format!("\nTarget file: {}", task.file_path));
    }
    prompt.push_str(&format!("\nEstimated complexity: {:?}", task.complexity));

    let relevant = context.for_prompt(&task.description, MAX_RELEVANT_CONTEXT_ENTRIES);
    if !relevant.is_empty() {
        prompt.push_str("\n\nContext of previous actions:\n");
        prompt.push_str(&relevant);
    }

    prompt.push_str(&format!("\n\nOverall goal: {}\n\n", goal));
    prompt.push_str(registry::describe());
    prompt.push_str("\n\n");
    prompt.push_str(EXECUTOR_TOOL_INSTRUCTIONS);
    prompt
}

/// Shared execution path for tool-using roles: one model call, at most one
/// tool dispatch folded into the outcome, and an optional sandbox pass when
/// the task targets an executable file.
pub(crate) async fn execute_with_tools(
    role: RoleKind,
    llm_client: &crate::llm::LlmClient,
    dispatcher: &crate::tools::ToolDispatcher,
    context: &mut ContextLog,
    system_prompt: &str,
    task: &Task,
    goal: &str,
    sandbox_mode: Option<crate::sandbox::RunMode>,
) -> Result<TaskOutcome, Error> {
    use crate::llm::ChatMessage;
    use crate::sandbox::RunMode;

    let prompt = build_executor_prompt(role, task, goal, context);
    let messages = vec![
        ChatMessage::new("system", system_prompt),
        ChatMessage::new("user", &prompt),
    ];
    let response = llm_client.call_llm_api(messages).await?;

    let mut outcome = match parse_tool_request(&response) {
        None => {
            context.append("task_execution", &response);
            TaskOutcome::text(response)
        }
        Some(Err(msg)) => {
            context.append("tool_request_error", &msg);
            TaskOutcome {
                content: msg,
                tool_name: None,
                success: false,
                execution: None,
            }
        }
        Some(Ok(call)) => {
            // run_code_file surfaces its structured result so a failing run
            // reaches the review veto
            let (message, success, execution) = dispatcher.dispatch_with_execution(&call).await;
            context.append(
                &format!("tool:{}", call.name),
                &format!("arguments: {} outcome: {}", call.arguments, message),
            );
            TaskOutcome {
                content: message,
                tool_name: Some(call.name),
                success,
                execution,
            }
        }
    };

    if let Some(mode) = sandbox_mode {
        if outcome.success
            && outcome.tool_name.is_some()
            && outcome.execution.is_none()
            && !task.file_path.is_empty()
        {
            // execute_code declines non-executable targets, nothing to attach then
            if let Ok(result) = dispatcher
                .execute_code(&task.file_path, mode == RunMode::UnitTest)
                .await
            {
                context.append("sandbox_run", &result.summary());
                outcome.execution = Some(result);
            }
        }
    }

    Ok(outcome)
}
