use super::{extract_json_object, AgentBehavior, ContextLog, RoleKind};
use crate::constants::{PLANNER_FORMAT_REMINDER, PLANNER_SYSTEM_PROMPT, PLANNER_USER_PROMPT};
use crate::core::{Task, TaskList, TaskSpec};
use crate::errors::Error;
use crate::llm::{ChatMessage, LlmClient};
use async_trait::async_trait;
use tracing::{debug, info};

/// Role executor that decomposes a goal into an ordered task list.
pub struct PlannerAgent {
    pub name: String,
    llm_client: LlmClient,
    system_prompt: String,
    context: ContextLog,
}

impl PlannerAgent {
    pub fn new(name: &str, system_prompt: Option<&str>, llm_client: LlmClient) -> Self {
        Self {
            name: name.to_string(),
            llm_client,
            system_prompt: system_prompt.unwrap_or(PLANNER_SYSTEM_PROMPT).to_string(),
            context: ContextLog::new(),
        }
    }
}

/// Decodes the structured decomposition from a model reply that may wrap
/// the JSON object in prose or code fences.
pub(crate) fn decode_task_list(resp: &str) -> Result<Vec<TaskSpec>, serde_json::Error> {
    let json = extract_json_object(resp).unwrap_or(resp);
    let list: TaskList = serde_json::from_str(json)?;
    Ok(list.tasks)
}

#[async_trait]
impl AgentBehavior for PlannerAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> RoleKind {
        RoleKind::Planner
    }

    /// Breaks the goal down into tasks via the model collaborator.
    ///
    /// The reply must decode as a `{"tasks": [...]}` object; the format
    /// check re-prompts once before giving up.
    async fn decompose_goal(&mut self, goal: &str) -> Result<Vec<Task>, Error> {
        debug!("PlannerAgent: decomposing goal...");

        let user_prompt = format!("{}\n\nGoal: {}", PLANNER_USER_PROMPT, goal);
        let mut messages = vec![
            ChatMessage::new("system", &self.system_prompt),
            ChatMessage::new("user", &user_prompt),
        ];

        let response = self
            .llm_client
            .call_llm_with_format_check(
                &mut messages,
                |resp| decode_task_list(resp).is_ok(),
                PLANNER_FORMAT_REMINDER,
                2,
            )
            .await?;

        let specs = decode_task_list(&response)?;
        let tasks: Vec<Task> = specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Task::from_spec(i as u32 + 1, spec))
            .collect();

        self.context.append(
            "goal_analysis",
            &format!("goal: {} decomposed into {} tasks", goal, tasks.len()),
        );
        info!("Planner decomposed goal into {} tasks", tasks.len());
        Ok(tasks)
    }
}
