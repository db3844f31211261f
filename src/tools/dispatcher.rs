use super::registry::{self, ParamKind, ToolKind, ToolSpec};
use super::{ProjectWorkspace, ToolCall};
use crate::sandbox::{ExecutionResult, Language, RunMode, Sandbox};
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Validates tool calls against the registry and executes the matching
/// workspace or sandbox operation.
///
/// Stateless service shared by reference across all role executors. Every
/// failure is converted into a `(message, false)` pair; nothing raises past
/// this boundary.
#[derive(Debug)]
pub struct ToolDispatcher {
    workspace: ProjectWorkspace,
    sandbox: Sandbox,
}

impl ToolDispatcher {
    pub fn new(workspace: ProjectWorkspace, sandbox: Sandbox) -> Self {
        Self { workspace, sandbox }
    }

    pub fn workspace(&self) -> &ProjectWorkspace {
        &self.workspace
    }

    /// Dispatches one tool call: registry lookup, argument validation, then
    /// exactly one side-effecting operation.
    pub async fn dispatch(&self, call: &ToolCall) -> (String, bool) {
        let (message, success, _) = self.dispatch_with_execution(call).await;
        (message, success)
    }

    /// Like `dispatch`, but additionally surfaces the structured sandbox
    /// result of a `run_code_file` call so it can be attached to the task
    /// outcome for review.
    pub async fn dispatch_with_execution(
        &self,
        call: &ToolCall,
    ) -> (String, bool, Option<ExecutionResult>) {
        info!("Handling tool call: {}", call.name);

        let spec = match registry::find(&call.name) {
            Some(spec) => spec,
            None => {
                let msg = format!("Unknown tool: '{}'", call.name);
                warn!("{}", msg);
                return (msg, false, None);
            }
        };

        let empty = Map::new();
        let args = match &call.arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                return (
                    "Error: tool arguments must be a JSON object".to_string(),
                    false,
                    None,
                )
            }
        };

        if let Err(msg) = validate_args(spec, args) {
            warn!("{}", msg);
            return (msg, false, None);
        }

        match spec.kind {
            ToolKind::ReadFile => without_execution(self.read_file(args)),
            ToolKind::WriteFile => without_execution(self.write_file(args)),
            ToolKind::AppendFile => without_execution(self.append_file(args)),
            ToolKind::DeleteFile => without_execution(self.delete_file(args)),
            ToolKind::CreateDirectory => without_execution(self.create_directory(args)),
            ToolKind::DeleteDirectory => without_execution(self.delete_directory(args)),
            ToolKind::ListDirectory => without_execution(self.list_directory(args)),
            ToolKind::SetCurrentDirectory => without_execution(self.set_current_directory(args)),
            ToolKind::GetCurrentDirectory => without_execution((
                format!("Current directory: {}", self.workspace.current_directory()),
                true,
            )),
            ToolKind::GetProjectStructure => without_execution(match self.workspace.structure_report() {
                Ok(report) => (format!("Project structure:\n{}", report), true),
                Err(e) => (format!("Error reading project structure: {}", e), false),
            }),
            ToolKind::RunCodeFile => self.run_code_file(args).await,
        }
    }

    /// Resolves and runs a workspace file in the sandbox. Also used by the
    /// coder and tester roles to attach execution results to their outcomes.
    pub async fn execute_code(&self, file_path: &str, unit_test: bool) -> Result<ExecutionResult, String> {
        let language = Language::from_path(file_path)
            .ok_or_else(|| format!("Error: unsupported language for '{}'", file_path))?;
        let full_path = self.workspace.resolve(file_path).map_err(|e| e.to_string())?;
        let mode = if unit_test { RunMode::UnitTest } else { RunMode::Script };
        Ok(self.sandbox.run(&full_path, language, mode).await)
    }

    fn read_file(&self, args: &Map<String, Value>) -> (String, bool) {
        let filename = str_arg(args, "filename");
        match self.workspace.read_file(filename) {
            Ok(content) => (format!("Content of file '{}':\n{}", filename, content), true),
            Err(e) => (format!("Error reading file '{}': {}", filename, e), false),
        }
    }

    fn write_file(&self, args: &Map<String, Value>) -> (String, bool) {
        let filename = str_arg(args, "filename");
        let content = str_arg(args, "content");
        // non-project files land in a shared notes area for inter-agent context
        let path = if bool_arg(args, "is_project_file") {
            filename.to_string()
        } else {
            format!("notes/{}", filename)
        };
        match self.workspace.write_file(&path, content) {
            Ok(()) => (format!("File written successfully: '{}'", path), true),
            Err(e) => (format!("Error writing file '{}': {}", path, e), false),
        }
    }

    fn append_file(&self, args: &Map<String, Value>) -> (String, bool) {
        let filename = str_arg(args, "filename");
        match self.workspace.append_file(filename, str_arg(args, "content")) {
            Ok(()) => (format!("Content appended to '{}'", filename), true),
            Err(e) => (format!("Error appending to '{}': {}", filename, e), false),
        }
    }

    fn delete_file(&self, args: &Map<String, Value>) -> (String, bool) {
        let filename = str_arg(args, "filename");
        match self.workspace.delete_file(filename) {
            Ok(()) => (format!("File '{}' deleted successfully", filename), true),
            Err(e) => (format!("Error deleting file '{}': {}", filename, e), false),
        }
    }

    fn create_directory(&self, args: &Map<String, Value>) -> (String, bool) {
        let path = str_arg(args, "path");
        match self.workspace.create_directory(path) {
            Ok(()) => (format!("Directory '{}' created", path), true),
            Err(e) => (format!("Error creating directory '{}': {}", path, e), false),
        }
    }

    fn delete_directory(&self, args: &Map<String, Value>) -> (String, bool) {
        let path = str_arg(args, "path");
        match self.workspace.delete_directory(path) {
            Ok(()) => (format!("Directory '{}' deleted", path), true),
            Err(e) => (format!("Error deleting directory '{}': {}", path, e), false),
        }
    }

    fn list_directory(&self, args: &Map<String, Value>) -> (String, bool) {
        let path = args
            .get("path")
            .and_then(Value::as_str)
            .unwrap_or(".");
        match self.workspace.list_directory(path) {
            Ok(entries) => {
                let listing = entries
                    .iter()
                    .enumerate()
                    .map(|(i, name)| format!("{}. {}", i + 1, name))
                    .collect::<Vec<_>>()
                    .join("\n");
                (format!("Entries of '{}':\n{}", path, listing), true)
            }
            Err(e) => (format!("Error listing directory '{}': {}", path, e), false),
        }
    }

    fn set_current_directory(&self, args: &Map<String, Value>) -> (String, bool) {
        let path = str_arg(args, "path");
        match self.workspace.set_current_directory(path) {
            Ok(()) => (
                format!("Current directory set to '{}'", self.workspace.current_directory()),
                true,
            ),
            Err(e) => (format!("Error setting current directory '{}': {}", path, e), false),
        }
    }

    async fn run_code_file(&self, args: &Map<String, Value>) -> (String, bool, Option<ExecutionResult>) {
        let file_path = str_arg(args, "file_path");
        match self.execute_code(file_path, bool_arg(args, "is_unit_test")).await {
            Ok(result) => {
                let success = result.success();
                let message = format!("Execution result:\n{}", result.summary());
                (message, success, Some(result))
            }
            Err(msg) => (msg, false, None),
        }
    }
}

fn without_execution((message, success): (String, bool)) -> (String, bool, Option<ExecutionResult>) {
    (message, success, None)
}

/// Checks presence and JSON type of every declared argument
fn validate_args(spec: &ToolSpec, args: &Map<String, Value>) -> Result<(), String> {
    for param in spec.params {
        match args.get(param.name) {
            None if param.required => {
                return Err(format!(
                    "Error: missing required argument '{}' for tool '{}'",
                    param.name, spec.name
                ))
            }
            None => {}
            Some(value) => {
                let matches = match param.kind {
                    ParamKind::String => value.is_string(),
                    ParamKind::Bool => value.is_boolean(),
                };
                if !matches {
                    return Err(format!(
                        "Error: argument '{}' of tool '{}' must be a {}",
                        param.name,
                        spec.name,
                        match param.kind {
                            ParamKind::String => "string",
                            ParamKind::Bool => "boolean",
                        }
                    ));
                }
            }
        }
    }
    Ok(())
}

// arguments are pre-validated against the registry
fn str_arg<'a>(args: &'a Map<String, Value>, name: &str) -> &'a str {
    args.get(name).and_then(Value::as_str).unwrap_or_default()
}

fn bool_arg(args: &Map<String, Value>, name: &str) -> bool {
    args.get(name).and_then(Value::as_bool).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_dispatcher() -> ToolDispatcher {
        let root = std::env::temp_dir().join(format!("forgeline-disp-{}", uuid::Uuid::new_v4()));
        ToolDispatcher::new(ProjectWorkspace::new(root).unwrap(), Sandbox::default())
    }

    fn call(name: &str, arguments: Value) -> ToolCall {
        ToolCall {
            name: name.to_string(),
            arguments,
        }
    }

    #[tokio::test]
    async fn unknown_tool_fails_without_side_effects() {
        let dispatcher = temp_dispatcher();
        let (msg, success) = dispatcher
            .dispatch(&call("summon_demon", json!({"filename": "x"})))
            .await;
        assert!(!success);
        assert!(msg.contains("Unknown tool"));
        assert!(dispatcher.workspace().list_directory(".").unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_required_argument_is_rejected() {
        let dispatcher = temp_dispatcher();
        let (msg, success) = dispatcher
            .dispatch(&call("write_file", json!({"filename": "a.txt"})))
            .await;
        assert!(!success);
        assert!(msg.contains("missing required argument"));
    }

    #[tokio::test]
    async fn ill_typed_argument_is_rejected() {
        let dispatcher = temp_dispatcher();
        let (msg, success) = dispatcher
            .dispatch(&call(
                "write_file",
                json!({"is_project_file": "yes", "filename": "a.txt", "content": "hi"}),
            ))
            .await;
        assert!(!success);
        assert!(msg.contains("must be a boolean"));
    }

    #[tokio::test]
    async fn non_object_arguments_are_rejected() {
        let dispatcher = temp_dispatcher();
        let (msg, success) = dispatcher.dispatch(&call("read_file", json!([1, 2]))).await;
        assert!(!success);
        assert!(msg.contains("JSON object"));
    }

    #[tokio::test]
    async fn write_then_read_roundtrip() {
        let dispatcher = temp_dispatcher();
        let (msg, success) = dispatcher
            .dispatch(&call(
                "write_file",
                json!({"is_project_file": true, "filename": "src/add.py", "content": "def add(a, b):\n    return a + b\n"}),
            ))
            .await;
        assert!(success, "{}", msg);

        let (msg, success) = dispatcher
            .dispatch(&call("read_file", json!({"filename": "src/add.py"})))
            .await;
        assert!(success);
        assert!(msg.contains("return a + b"));
    }

    #[tokio::test]
    async fn non_project_files_land_in_notes() {
        let dispatcher = temp_dispatcher();
        let (_, success) = dispatcher
            .dispatch(&call(
                "write_file",
                json!({"is_project_file": false, "filename": "findings.md", "content": "# notes"}),
            ))
            .await;
        assert!(success);
        assert!(dispatcher
            .workspace()
            .read_file("notes/findings.md")
            .is_ok());
    }

    #[tokio::test]
    async fn directory_cursor_tools_cooperate() {
        let dispatcher = temp_dispatcher();
        dispatcher
            .dispatch(&call("create_directory", json!({"path": "src"})))
            .await;
        let (msg, success) = dispatcher
            .dispatch(&call("set_current_directory", json!({"path": "src"})))
            .await;
        assert!(success, "{}", msg);
        let (msg, _) = dispatcher
            .dispatch(&call("get_current_directory", json!({})))
            .await;
        assert!(msg.contains("src"));
    }

    #[tokio::test]
    async fn run_code_file_surfaces_the_structured_result() {
        let dispatcher = temp_dispatcher();
        let (msg, success, execution) = dispatcher
            .dispatch_with_execution(&call(
                "run_code_file",
                json!({"file_path": "missing.py", "is_unit_test": false}),
            ))
            .await;
        assert!(!success);
        assert!(msg.contains("Return Code: -1"));
        let result = execution.unwrap();
        assert_eq!(result.exit_code, -1);
        assert!(result.stderr.contains("File not found"));
    }

    #[tokio::test]
    async fn run_code_file_rejects_unsupported_language() {
        let dispatcher = temp_dispatcher();
        dispatcher
            .workspace()
            .write_file("style.css", "body {}")
            .unwrap();
        let (msg, success) = dispatcher
            .dispatch(&call(
                "run_code_file",
                json!({"file_path": "style.css", "is_unit_test": false}),
            ))
            .await;
        assert!(!success);
        assert!(msg.contains("unsupported language"));
    }
}
