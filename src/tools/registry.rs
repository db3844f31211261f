use once_cell::sync::Lazy;

/// Expected JSON type of a tool argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Bool,
}

impl ParamKind {
    fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Bool => "boolean",
        }
    }
}

/// Declared argument of a registered tool
#[derive(Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

/// Closed set of dispatchable operations, one per registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    ReadFile,
    WriteFile,
    AppendFile,
    DeleteFile,
    CreateDirectory,
    DeleteDirectory,
    ListDirectory,
    SetCurrentDirectory,
    GetCurrentDirectory,
    GetProjectStructure,
    RunCodeFile,
}

/// Declared capability: name plus argument schema
#[derive(Debug)]
pub struct ToolSpec {
    pub name: &'static str,
    pub kind: ToolKind,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

/// The fixed capability table. Adding a tool means adding one entry here
/// and one handler in the dispatcher.
static REGISTRY: [ToolSpec; 11] = [
    ToolSpec {
        name: "read_file",
        kind: ToolKind::ReadFile,
        description: "Read the content of a file, path relative to the current directory",
        params: &[ParamSpec { name: "filename", kind: ParamKind::String, required: true }],
    },
    ToolSpec {
        name: "write_file",
        kind: ToolKind::WriteFile,
        description: "Create or overwrite a file. Set is_project_file to true for project source files, false for shared notes",
        params: &[
            ParamSpec { name: "is_project_file", kind: ParamKind::Bool, required: true },
            ParamSpec { name: "filename", kind: ParamKind::String, required: true },
            ParamSpec { name: "content", kind: ParamKind::String, required: true },
        ],
    },
    ToolSpec {
        name: "append_file",
        kind: ToolKind::AppendFile,
        description: "Append content to an existing file",
        params: &[
            ParamSpec { name: "filename", kind: ParamKind::String, required: true },
            ParamSpec { name: "content", kind: ParamKind::String, required: true },
        ],
    },
    ToolSpec {
        name: "delete_file",
        kind: ToolKind::DeleteFile,
        description: "Delete a file from the project",
        params: &[ParamSpec { name: "filename", kind: ParamKind::String, required: true }],
    },
    ToolSpec {
        name: "create_directory",
        kind: ToolKind::CreateDirectory,
        description: "Create a directory, including missing parents",
        params: &[ParamSpec { name: "path", kind: ParamKind::String, required: true }],
    },
    ToolSpec {
        name: "delete_directory",
        kind: ToolKind::DeleteDirectory,
        description: "Delete a directory and its contents",
        params: &[ParamSpec { name: "path", kind: ParamKind::String, required: true }],
    },
    ToolSpec {
        name: "list_directory",
        kind: ToolKind::ListDirectory,
        description: "List the entries of a directory, defaults to the current directory",
        params: &[ParamSpec { name: "path", kind: ParamKind::String, required: false }],
    },
    ToolSpec {
        name: "set_current_directory",
        kind: ToolKind::SetCurrentDirectory,
        description: "Set the current working directory for subsequent tool calls",
        params: &[ParamSpec { name: "path", kind: ParamKind::String, required: true }],
    },
    ToolSpec {
        name: "get_current_directory",
        kind: ToolKind::GetCurrentDirectory,
        description: "Get the current working directory",
        params: &[],
    },
    ToolSpec {
        name: "get_project_structure",
        kind: ToolKind::GetProjectStructure,
        description: "Get the whole project tree and the current working directory",
        params: &[],
    },
    ToolSpec {
        name: "run_code_file",
        kind: ToolKind::RunCodeFile,
        description: "Run a source file in the sandbox, as a unit test when is_unit_test is true",
        params: &[
            ParamSpec { name: "file_path", kind: ParamKind::String, required: true },
            ParamSpec { name: "is_unit_test", kind: ParamKind::Bool, required: true },
        ],
    },
];

/// Rendered capability list included in executor prompts
static DESCRIBED: Lazy<String> = Lazy::new(|| {
    let mut text = String::from("You have access to the following tools:\n");
    for tool in all() {
        let params = tool
            .params
            .iter()
            .map(|p| {
                format!(
                    "{}: {}{}",
                    p.name,
                    p.kind.as_str(),
                    if p.required { "" } else { " (optional)" }
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(&format!("- {} ({{{}}}): {}\n", tool.name, params, tool.description));
    }
    text
});

pub fn all() -> &'static [ToolSpec] {
    &REGISTRY
}

pub fn find(name: &str) -> Option<&'static ToolSpec> {
    REGISTRY.iter().find(|t| t.name == name)
}

pub fn describe() -> &'static str {
    &DESCRIBED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_fixed_and_lookup_works() {
        assert_eq!(all().len(), 11);
        assert!(find("write_file").is_some());
        assert!(find("format_disk").is_none());
    }

    #[test]
    fn write_file_schema_matches_contract() {
        let spec = find("write_file").unwrap();
        let names: Vec<_> = spec.params.iter().map(|p| p.name).collect();
        assert_eq!(names, ["is_project_file", "filename", "content"]);
        assert!(spec.params.iter().all(|p| p.required));
    }

    #[test]
    fn capability_list_names_every_tool() {
        for tool in all() {
            assert!(describe().contains(tool.name));
        }
    }
}
