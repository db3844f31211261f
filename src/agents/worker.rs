use super::{execute_with_tools, AgentBehavior, ContextLog, RoleKind, TaskOutcome};
use crate::constants::{
    DEBUG_SYSTEM_PROMPT, OPTIMIZATION_SYSTEM_PROMPT, RESEARCH_SYSTEM_PROMPT,
};
use crate::core::Task;
use crate::errors::Error;
use crate::llm::LlmClient;
use crate::tools::ToolDispatcher;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Generic tool-using executor for the auxiliary roles (research, debug,
/// optimization). These roles read and annotate the project but never get
/// a sandbox pass attached to their outcome.
pub struct WorkerAgent {
    pub name: String,
    role: RoleKind,
    llm_client: LlmClient,
    system_prompt: String,
    dispatcher: Arc<ToolDispatcher>,
    context: ContextLog,
}

impl WorkerAgent {
    pub fn new(
        name: &str,
        role: RoleKind,
        system_prompt: Option<&str>,
        llm_client: LlmClient,
        dispatcher: Arc<ToolDispatcher>,
    ) -> Self {
        let default_prompt = match role {
            RoleKind::Debug => DEBUG_SYSTEM_PROMPT,
            RoleKind::Optimization => OPTIMIZATION_SYSTEM_PROMPT,
            _ => RESEARCH_SYSTEM_PROMPT,
        };
        Self {
            name: name.to_string(),
            role,
            llm_client,
            system_prompt: system_prompt.unwrap_or(default_prompt).to_string(),
            dispatcher,
            context: ContextLog::new(),
        }
    }
}

#[async_trait]
impl AgentBehavior for WorkerAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> RoleKind {
        self.role
    }

    async fn execute_task(&mut self, task: &Task, goal: &str) -> Result<TaskOutcome, Error> {
        debug!("WorkerAgent ({}): executing task {}...", self.role, task.id);
        execute_with_tools(
            self.role,
            &self.llm_client,
            &self.dispatcher,
            &mut self.context,
            &self.system_prompt,
            task,
            goal,
            None,
        )
        .await
    }
}
