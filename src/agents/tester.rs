use super::{execute_with_tools, AgentBehavior, ContextLog, RoleKind, TaskOutcome};
use crate::constants::TESTER_SYSTEM_PROMPT;
use crate::core::Task;
use crate::errors::Error;
use crate::llm::LlmClient;
use crate::sandbox::RunMode;
use crate::tools::ToolDispatcher;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Role executor for verification tasks.
///
/// Same tool-driven flow as the coder, but sandbox runs target the
/// language's unit-test entry point instead of plain script execution.
pub struct TesterAgent {
    pub name: String,
    llm_client: LlmClient,
    system_prompt: String,
    dispatcher: Arc<ToolDispatcher>,
    context: ContextLog,
}

impl TesterAgent {
    pub fn new(
        name: &str,
        system_prompt: Option<&str>,
        llm_client: LlmClient,
        dispatcher: Arc<ToolDispatcher>,
    ) -> Self {
        Self {
            name: name.to_string(),
            llm_client,
            system_prompt: system_prompt.unwrap_or(TESTER_SYSTEM_PROMPT).to_string(),
            dispatcher,
            context: ContextLog::new(),
        }
    }
}

#[async_trait]
impl AgentBehavior for TesterAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> RoleKind {
        RoleKind::Tester
    }

    async fn execute_task(&mut self, task: &Task, goal: &str) -> Result<TaskOutcome, Error> {
        debug!("TesterAgent: executing task {}...", task.id);
        execute_with_tools(
            RoleKind::Tester,
            &self.llm_client,
            &self.dispatcher,
            &mut self.context,
            &self.system_prompt,
            task,
            goal,
            Some(RunMode::UnitTest),
        )
        .await
    }
}
