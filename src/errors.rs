#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("LLM error: {0}")]
    Llm(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Workspace error: {0}")]
    Workspace(String),
    #[error("role '{role}' does not support '{capability}'")]
    UnsupportedCapability {
        role: String,
        capability: &'static str,
    },
}
