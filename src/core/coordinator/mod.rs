mod run;
mod stats;

pub use stats::RunStats;

use crate::agents::{
    AgentBehavior, CoderAgent, PlannerAgent, ReviewerAgent, RoleKind, TesterAgent, WorkerAgent,
};
use crate::config::OrchestratorConfig;
use crate::constants::{MAX_TASK_RETRIES, SANDBOX_TIMEOUT_SECS};
use crate::core::Task;
use crate::errors::Error;
use crate::llm::LlmClient;
use crate::sandbox::Sandbox;
use crate::tools::{ProjectWorkspace, ToolDispatcher};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Arc;

const DEFAULT_WORKSPACE_ROOT: &str = "workspace";

/// Orchestrates a goal run: decomposition, role routing, the
/// execute/review/retry cycle for every task, and the closing progress
/// review.
pub struct Coordinator {
    pub spinner: ProgressBar,
    planner: Box<dyn AgentBehavior>,
    reviewer: Box<dyn AgentBehavior>,
    executors: HashMap<RoleKind, Box<dyn AgentBehavior>>,
    /// Processed tasks in planner order
    pub tasks: Vec<Task>,
    pub stats: RunStats,
    max_retries: usize,
}

impl Coordinator {
    pub fn new(
        planner: Box<dyn AgentBehavior>,
        reviewer: Box<dyn AgentBehavior>,
        executors: HashMap<RoleKind, Box<dyn AgentBehavior>>,
        max_retries: usize,
    ) -> Self {
        let mut coordinator = Self {
            spinner: ProgressBar::new_spinner(),
            planner,
            reviewer,
            executors,
            tasks: Vec::new(),
            stats: RunStats::default(),
            max_retries,
        };
        coordinator.init_spinner();
        coordinator
    }

    /// Builds the full agent roster from a configuration.
    ///
    /// Every executor shares one dispatcher (and thus one workspace and
    /// sandbox) but owns its LLM client and context log.
    pub fn from_config(
        config: &OrchestratorConfig,
        llm_provider: &str,
        llm_model: &str,
    ) -> Result<Self, Error> {
        let workspace_root = config
            .workspace
            .root
            .as_deref()
            .unwrap_or(DEFAULT_WORKSPACE_ROOT);
        let workspace = ProjectWorkspace::new(workspace_root)?;
        let sandbox = Sandbox::new(config.sandbox.timeout_secs.unwrap_or(SANDBOX_TIMEOUT_SECS));
        let dispatcher = Arc::new(ToolDispatcher::new(workspace, sandbox));
        tracing::info!(
            "Workspace root: {}",
            dispatcher.workspace().root().display()
        );

        let client = || LlmClient::new(llm_provider, llm_model);
        let agents = &config.agents;

        let planner = Box::new(PlannerAgent::new(
            "PlannerAgent",
            agents.planner.system_prompt.as_deref(),
            client()?,
        ));
        let reviewer = Box::new(ReviewerAgent::new(
            "ReviewAgent",
            agents.reviewer.system_prompt.as_deref(),
            client()?,
        ));

        let mut executors: HashMap<RoleKind, Box<dyn AgentBehavior>> = HashMap::new();
        executors.insert(
            RoleKind::Coder,
            Box::new(CoderAgent::new(
                "CodingAgent",
                agents.coder.system_prompt.as_deref(),
                client()?,
                dispatcher.clone(),
            )),
        );
        executors.insert(
            RoleKind::Tester,
            Box::new(TesterAgent::new(
                "TestingAgent",
                agents.tester.system_prompt.as_deref(),
                client()?,
                dispatcher.clone(),
            )),
        );
        executors.insert(
            RoleKind::Research,
            Box::new(WorkerAgent::new(
                "ResearchAgent",
                RoleKind::Research,
                agents.research.system_prompt.as_deref(),
                client()?,
                dispatcher.clone(),
            )),
        );
        executors.insert(
            RoleKind::Debug,
            Box::new(WorkerAgent::new(
                "DebugAgent",
                RoleKind::Debug,
                agents.debug.system_prompt.as_deref(),
                client()?,
                dispatcher.clone(),
            )),
        );
        executors.insert(
            RoleKind::Optimization,
            Box::new(WorkerAgent::new(
                "OptimizationAgent",
                RoleKind::Optimization,
                agents.optimization.system_prompt.as_deref(),
                client()?,
                dispatcher.clone(),
            )),
        );
        // review-classified tasks are carried out by a research-style worker;
        // the independent review gate below still applies to their outcome
        executors.insert(
            RoleKind::Reviewer,
            Box::new(WorkerAgent::new(
                "ReviewExecutor",
                RoleKind::Research,
                agents.research.system_prompt.as_deref(),
                client()?,
                dispatcher,
            )),
        );

        let max_retries = config.parameters.max_retries.unwrap_or(MAX_TASK_RETRIES);
        Ok(Self::new(planner, reviewer, executors, max_retries))
    }

    fn executor_for(&mut self, role: RoleKind) -> Option<&mut Box<dyn AgentBehavior>> {
        if self.executors.contains_key(&role) {
            self.executors.get_mut(&role)
        } else {
            self.executors.get_mut(&RoleKind::Coder)
        }
    }

    fn init_spinner(&mut self) {
        self.spinner
            .enable_steady_tick(std::time::Duration::from_millis(120));
        self.spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner} [{elapsed_precise}] {msg}")
                .expect("Failed to set spinner template"),
        );
    }
}
