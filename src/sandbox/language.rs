/// Languages the sandbox knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Interpreted, run with python3
    Python,
    /// Interpreted, run with node
    JavaScript,
    /// Compiled with g++ into a temporary artifact
    Cpp,
    /// Compiled with javac into temporary class files
    Java,
}

impl Language {
    /// Maps a file extension to a supported language
    pub fn from_path(path: &str) -> Option<Language> {
        let extension = std::path::Path::new(path).extension()?.to_str()?;
        match extension {
            "py" => Some(Language::Python),
            "js" | "mjs" => Some(Language::JavaScript),
            "cpp" | "cc" | "cxx" => Some(Language::Cpp),
            "java" => Some(Language::Java),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Cpp => "cpp",
            Language::Java => "java",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
