mod parser;

pub use parser::load_config;

use serde::Deserialize;

/// Top-level YAML configuration for an orchestrator run.
///
/// Every section is optional; an absent file or empty document yields the
/// built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrchestratorConfig {
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub sandbox: SandboxConfig,
}

/// Run-wide parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParametersConfig {
    /// LLM provider name ("openai" or "ollama")
    pub llm_provider: Option<String>,
    /// Model passed to the provider
    pub llm_model: Option<String>,
    /// Retry budget per task before abandonment
    pub max_retries: Option<usize>,
}

/// Per-role overrides
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentsConfig {
    #[serde(default)]
    pub planner: AgentConfig,
    #[serde(default)]
    pub coder: AgentConfig,
    #[serde(default)]
    pub tester: AgentConfig,
    #[serde(default)]
    pub reviewer: AgentConfig,
    #[serde(default)]
    pub research: AgentConfig,
    #[serde(default)]
    pub debug: AgentConfig,
    #[serde(default)]
    pub optimization: AgentConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentConfig {
    /// Replaces the role's built-in system prompt when set
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceConfig {
    /// Root directory holding all agent-produced files
    pub root: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SandboxConfig {
    /// Wall-clock budget per sandbox child process
    pub timeout_secs: Option<u64>,
}
