mod dispatcher;
pub mod registry;
mod workspace;

pub use dispatcher::*;
pub use workspace::*;

/// A named, argument-bearing request for a side-effecting operation.
///
/// Produced by a role executor's interaction with the model collaborator
/// and consumed exactly once by the tool dispatcher.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ToolCall {
    /// Must match a registered capability
    pub name: String,
    /// String-keyed argument mapping, validated against the registry
    #[serde(default)]
    pub arguments: serde_json::Value,
}
