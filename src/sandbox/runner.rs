use super::Language;
use crate::constants::SANDBOX_TIMEOUT_SECS;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};
use uuid::Uuid;

/// How a file should be executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Run as a standard script / program
    Script,
    /// Run through the language's unit-test runner where one exists
    UnitTest,
}

/// Normalized result of a sandboxed run. Exit code 0 means success by
/// convention; -1 is synthesized for timeouts and spawn failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Synthetic result for a child that exceeded the wall-clock budget
    pub fn timed_out(seconds: u64) -> Self {
        Self {
            exit_code: -1,
            stdout: String::new(),
            stderr: format!("Execution timed out after {} seconds.", seconds),
        }
    }

    /// Synthetic result for spawn or IO failures
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            exit_code: -1,
            stdout: String::new(),
            stderr: message.into(),
        }
    }

    /// Human-readable rendering used in tool messages and review prompts
    pub fn summary(&self) -> String {
        format!(
            "Return Code: {}\nOutput: {}\nErrors: {}",
            self.exit_code, self.stdout, self.stderr
        )
    }
}

/// Isolated child-process runner with a hard wall-clock timeout.
///
/// Stateless and safely reusable across sequential task invocations; the
/// timeout applies to each child process (compile and run are bounded
/// separately) and `run` never returns an error.
#[derive(Debug, Clone)]
pub struct Sandbox {
    timeout: Duration,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new(SANDBOX_TIMEOUT_SECS)
    }
}

impl Sandbox {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Compiles (if needed) and runs a single source file.
    ///
    /// Temporary artifacts are removed on every exit path, including
    /// compile failure and timeout.
    pub async fn run(&self, file_path: &Path, language: Language, mode: RunMode) -> ExecutionResult {
        if !file_path.is_file() {
            return ExecutionResult::failed(format!("File not found: {}", file_path.display()));
        }

        debug!("Sandbox run: {} ({}, {:?})", file_path.display(), language, mode);

        match language {
            Language::Python => match mode {
                RunMode::Script => self.run_process("python3", &[file_path.as_os_str()]).await,
                RunMode::UnitTest => {
                    self.run_process(
                        "python3",
                        &[OsStr::new("-m"), OsStr::new("unittest"), file_path.as_os_str()],
                    )
                    .await
                }
            },
            Language::JavaScript => match mode {
                RunMode::Script => self.run_process("node", &[file_path.as_os_str()]).await,
                RunMode::UnitTest => {
                    self.run_process("node", &[OsStr::new("--test"), file_path.as_os_str()])
                        .await
                }
            },
            Language::Cpp => self.compile_and_run_cpp(file_path).await,
            Language::Java => self.compile_and_run_java(file_path).await,
        }
    }

    async fn compile_and_run_cpp(&self, file_path: &Path) -> ExecutionResult {
        let artifact = std::env::temp_dir().join(format!("forgeline-bin-{}", Uuid::new_v4()));

        let compile = self
            .run_process(
                "g++",
                &[OsStr::new("-o"), artifact.as_os_str(), file_path.as_os_str()],
            )
            .await;
        if !compile.success() {
            remove_artifact(&artifact);
            return compile;
        }

        let result = self.run_process(&artifact, &[]).await;
        remove_artifact(&artifact);
        result
    }

    async fn compile_and_run_java(&self, file_path: &Path) -> ExecutionResult {
        let class_dir = std::env::temp_dir().join(format!("forgeline-classes-{}", Uuid::new_v4()));
        let class_name = match file_path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => {
                return ExecutionResult::failed(format!(
                    "Cannot derive a class name from: {}",
                    file_path.display()
                ))
            }
        };

        let compile = self
            .run_process(
                "javac",
                &[OsStr::new("-d"), class_dir.as_os_str(), file_path.as_os_str()],
            )
            .await;
        if !compile.success() {
            remove_artifact_dir(&class_dir);
            return compile;
        }

        let result = self
            .run_process(
                "java",
                &[OsStr::new("-cp"), class_dir.as_os_str(), OsStr::new(&class_name)],
            )
            .await;
        remove_artifact_dir(&class_dir);
        result
    }

    /// Spawns one child process and supervises it under the timeout.
    /// On expiry the future holding the child is dropped and the child is
    /// killed by the runtime (kill_on_drop).
    async fn run_process(&self, program: impl AsRef<OsStr>, args: &[&OsStr]) -> ExecutionResult {
        let program = program.as_ref();
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                return ExecutionResult::failed(format!(
                    "Failed to spawn '{}': {}",
                    program.to_string_lossy(),
                    e
                ))
            }
        };

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => ExecutionResult {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            },
            Ok(Err(e)) => ExecutionResult::failed(format!(
                "An error occurred while running '{}': {}",
                program.to_string_lossy(),
                e
            )),
            Err(_) => ExecutionResult::timed_out(self.timeout.as_secs()),
        }
    }
}

/// Removes a temporary artifact; a missing artifact is not an error
fn remove_artifact(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove artifact {}: {}", path.display(), e);
        }
    }
}

/// Removes a temporary class/object directory; missing is not an error
fn remove_artifact_dir(path: &Path) {
    if let Err(e) = std::fs::remove_dir_all(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove artifact dir {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_source(name_prefix: &str, extension: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "{}-{}.{}",
            name_prefix,
            Uuid::new_v4(),
            extension
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn python_available() -> bool {
        std::process::Command::new("python3")
            .arg("--version")
            .output()
            .is_ok()
    }

    #[tokio::test]
    async fn missing_file_yields_synthetic_failure() {
        let sandbox = Sandbox::default();
        let result = sandbox
            .run(Path::new("/nonexistent/nope.py"), Language::Python, RunMode::Script)
            .await;
        assert_eq!(result.exit_code, -1);
        assert!(result.stderr.contains("File not found"));
    }

    #[tokio::test]
    async fn script_run_captures_stdout_and_exit_code() {
        if !python_available() {
            return;
        }
        let sandbox = Sandbox::default();
        let path = temp_source("fl-ok", "py", "print('hello from sandbox')\n");
        let result = sandbox.run(&path, Language::Python, RunMode::Script).await;
        remove_artifact(&path);
        assert_eq!(result.exit_code, 0);
        assert!(result.stdout.contains("hello from sandbox"));
    }

    #[tokio::test]
    async fn failing_script_reports_nonzero_exit_and_stderr() {
        if !python_available() {
            return;
        }
        let sandbox = Sandbox::default();
        let path = temp_source("fl-err", "py", "raise SystemExit(2)\n");
        let result = sandbox.run(&path, Language::Python, RunMode::Script).await;
        remove_artifact(&path);
        assert_eq!(result.exit_code, 2);
    }

    #[tokio::test]
    async fn runaway_child_is_killed_at_the_timeout() {
        if !python_available() {
            return;
        }
        let sandbox = Sandbox::new(1);
        let path = temp_source("fl-hang", "py", "import time\ntime.sleep(60)\n");
        let result = sandbox.run(&path, Language::Python, RunMode::Script).await;
        remove_artifact(&path);
        assert_eq!(result.exit_code, -1);
        assert!(result.stderr.contains("timed out"));
    }

    #[test]
    fn artifact_cleanup_is_idempotent() {
        let path = std::env::temp_dir().join(format!("forgeline-bin-{}", Uuid::new_v4()));
        std::fs::write(&path, b"artifact").unwrap();
        remove_artifact(&path);
        assert!(!path.exists());
        // second removal of a now-missing artifact must be safe
        remove_artifact(&path);
        remove_artifact_dir(&path);
    }

    #[test]
    fn timeout_result_is_well_formed() {
        let result = ExecutionResult::timed_out(30);
        assert_eq!(result.exit_code, -1);
        assert!(result.stderr.contains("timed out after 30 seconds"));
        assert!(!result.success());
    }
}
