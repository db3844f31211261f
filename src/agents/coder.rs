use super::{execute_with_tools, AgentBehavior, ContextLog, RoleKind, TaskOutcome};
use crate::constants::CODER_SYSTEM_PROMPT;
use crate::core::Task;
use crate::errors::Error;
use crate::llm::LlmClient;
use crate::sandbox::RunMode;
use crate::tools::ToolDispatcher;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Role executor for implementation tasks.
///
/// Interacts with the model collaborator, forwards at most one tool request
/// per attempt to the dispatcher, and attaches a script-mode sandbox run
/// whenever the task targets an executable file.
pub struct CoderAgent {
    pub name: String,
    llm_client: LlmClient,
    system_prompt: String,
    dispatcher: Arc<ToolDispatcher>,
    context: ContextLog,
}

impl CoderAgent {
    pub fn new(
        name: &str,
        system_prompt: Option<&str>,
        llm_client: LlmClient,
        dispatcher: Arc<ToolDispatcher>,
    ) -> Self {
        Self {
            name: name.to_string(),
            llm_client,
            system_prompt: system_prompt.unwrap_or(CODER_SYSTEM_PROMPT).to_string(),
            dispatcher,
            context: ContextLog::new(),
        }
    }
}

#[async_trait]
impl AgentBehavior for CoderAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> RoleKind {
        RoleKind::Coder
    }

    async fn execute_task(&mut self, task: &Task, goal: &str) -> Result<TaskOutcome, Error> {
        debug!("CoderAgent: executing task {}...", task.id);
        execute_with_tools(
            RoleKind::Coder,
            &self.llm_client,
            &self.dispatcher,
            &mut self.context,
            &self.system_prompt,
            task,
            goal,
            Some(RunMode::Script),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::ReviewerAgent;
    use crate::core::{Complexity, TaskSpec};
    use crate::llm::testing::ScriptedProvider;
    use crate::sandbox::Sandbox;
    use crate::tools::ProjectWorkspace;

    fn python_available() -> bool {
        std::process::Command::new("python3")
            .arg("--version")
            .output()
            .is_ok()
    }

    fn temp_dispatcher() -> Arc<ToolDispatcher> {
        let root = std::env::temp_dir().join(format!("forgeline-coder-{}", uuid::Uuid::new_v4()));
        Arc::new(ToolDispatcher::new(
            ProjectWorkspace::new(root).unwrap(),
            Sandbox::default(),
        ))
    }

    fn task(description: &str, file_path: &str) -> Task {
        Task::from_spec(
            1,
            TaskSpec {
                description: description.into(),
                estimated_complexity: Complexity::Low,
                file_path: file_path.into(),
            },
        )
    }

    #[tokio::test]
    async fn plain_reply_yields_text_outcome() {
        let provider = ScriptedProvider::new(["The layout is already in place, nothing to do."]);
        let mut coder = CoderAgent::new(
            "CodingAgent",
            None,
            LlmClient::from_provider(Box::new(provider)),
            temp_dispatcher(),
        );
        let outcome = coder
            .execute_task(&task("Check the layout", ""), "build a page")
            .await
            .unwrap();
        assert!(outcome.success);
        assert!(outcome.tool_name.is_none());
        assert!(outcome.execution.is_none());
    }

    #[tokio::test]
    async fn tool_request_is_dispatched_and_folded() {
        let provider = ScriptedProvider::new([
            "TOOL_REQUEST: {\"name\": \"write_file\", \"arguments\": {\"is_project_file\": true, \"filename\": \"index.html\", \"content\": \"<html></html>\"}}",
        ]);
        let dispatcher = temp_dispatcher();
        let mut coder = CoderAgent::new(
            "CodingAgent",
            None,
            LlmClient::from_provider(Box::new(provider)),
            dispatcher.clone(),
        );
        let outcome = coder
            .execute_task(&task("Implement the page", "index.html"), "build a page")
            .await
            .unwrap();
        assert!(outcome.success, "{}", outcome.content);
        assert_eq!(outcome.tool_name.as_deref(), Some("write_file"));
        // html is not executable, so no sandbox result is attached
        assert!(outcome.execution.is_none());
        assert!(dispatcher.workspace().read_file("index.html").is_ok());
        assert_eq!(coder.context.entries().len(), 1);
    }

    #[tokio::test]
    async fn direct_run_of_a_missing_file_carries_the_failure_to_review() {
        let provider = ScriptedProvider::new([
            "TOOL_REQUEST: {\"name\": \"run_code_file\", \"arguments\": {\"file_path\": \"missing.py\", \"is_unit_test\": false}}",
        ]);
        let mut coder = CoderAgent::new(
            "CodingAgent",
            None,
            LlmClient::from_provider(Box::new(provider)),
            temp_dispatcher(),
        );
        let run_task = task("Run the script", "missing.py");
        let outcome = coder.execute_task(&run_task, "ship it").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.execution.as_ref().unwrap().exit_code, -1);

        let mut reviewer = ReviewerAgent::new(
            "ReviewAgent",
            None,
            LlmClient::from_provider(Box::new(ScriptedProvider::new(["Yes: looks fine"]))),
        );
        let verdict = reviewer
            .review_task(&run_task, &outcome, "ship it")
            .await
            .unwrap();
        assert!(!verdict.approved);
        assert!(verdict.feedback.contains("Sandbox execution failed"));
    }

    #[tokio::test]
    async fn failing_direct_run_is_attached_and_vetoed() {
        if !python_available() {
            return;
        }
        let dispatcher = temp_dispatcher();
        dispatcher
            .workspace()
            .write_file("boom.py", "raise SystemExit(2)\n")
            .unwrap();
        let provider = ScriptedProvider::new([
            "TOOL_REQUEST: {\"name\": \"run_code_file\", \"arguments\": {\"file_path\": \"boom.py\", \"is_unit_test\": false}}",
        ]);
        let mut coder = CoderAgent::new(
            "CodingAgent",
            None,
            LlmClient::from_provider(Box::new(provider)),
            dispatcher,
        );
        let run_task = task("Run the script", "boom.py");
        let outcome = coder.execute_task(&run_task, "ship it").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.execution.as_ref().unwrap().exit_code, 2);

        let mut reviewer = ReviewerAgent::new(
            "ReviewAgent",
            None,
            LlmClient::from_provider(Box::new(ScriptedProvider::new(["Yes: looks fine"]))),
        );
        let verdict = reviewer
            .review_task(&run_task, &outcome, "ship it")
            .await
            .unwrap();
        assert!(!verdict.approved);
        assert!(verdict.feedback.contains("Sandbox execution failed"));
    }

    #[tokio::test]
    async fn malformed_tool_request_fails_the_attempt() {
        let provider = ScriptedProvider::new(["TOOL_REQUEST: {not json"]);
        let mut coder = CoderAgent::new(
            "CodingAgent",
            None,
            LlmClient::from_provider(Box::new(provider)),
            temp_dispatcher(),
        );
        let outcome = coder
            .execute_task(&task("Implement add", "src/add.py"), "add numbers")
            .await
            .unwrap();
        assert!(!outcome.success);
        assert!(outcome.content.contains("invalid JSON"));
    }
}
