use crate::errors::Error;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

/// File and directory primitives scoped under a project root.
///
/// Paths given to every operation are relative to a mutable current-directory
/// cursor owned by the workspace; resolution never escapes the root.
#[derive(Debug)]
pub struct ProjectWorkspace {
    root: PathBuf,
    /// Current directory cursor, kept relative to the root
    current: Mutex<PathBuf>,
}

impl ProjectWorkspace {
    /// Creates the workspace, ensuring the root directory exists
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            current: Mutex::new(PathBuf::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a relative path against the cursor, rejecting escapes from the root
    pub fn resolve(&self, path: &str) -> Result<PathBuf, Error> {
        let current = self.current.lock().expect("workspace cursor poisoned");
        let mut normalized = current.clone();
        for component in Path::new(path).components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(Error::Workspace(format!(
                            "Path '{}' escapes the project root",
                            path
                        )));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::Workspace(format!(
                        "Absolute paths are not allowed: '{}'",
                        path
                    )));
                }
            }
        }
        Ok(self.root.join(normalized))
    }

    pub fn read_file(&self, path: &str) -> Result<String, Error> {
        let full = self.resolve(path)?;
        Ok(fs::read_to_string(full)?)
    }

    /// Writes a file, creating parent directories as needed
    pub fn write_file(&self, path: &str, content: &str) -> Result<(), Error> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, content)?;
        Ok(())
    }

    /// Appends to an existing file; appending to a missing file is an error
    pub fn append_file(&self, path: &str, content: &str) -> Result<(), Error> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Err(Error::Workspace(format!(
                "Tried to append to a non-existent file: '{}'",
                path
            )));
        }
        use std::io::Write;
        let mut file = fs::OpenOptions::new().append(true).open(full)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    pub fn delete_file(&self, path: &str) -> Result<(), Error> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Err(Error::Workspace(format!(
                "Tried to delete a non-existent file: '{}'",
                path
            )));
        }
        fs::remove_file(full)?;
        Ok(())
    }

    pub fn create_directory(&self, path: &str) -> Result<(), Error> {
        let full = self.resolve(path)?;
        fs::create_dir_all(full)?;
        Ok(())
    }

    pub fn delete_directory(&self, path: &str) -> Result<(), Error> {
        let full = self.resolve(path)?;
        if !full.is_dir() {
            return Err(Error::Workspace(format!(
                "Tried to delete a non-existent directory: '{}'",
                path
            )));
        }
        fs::remove_dir_all(full)?;
        Ok(())
    }

    pub fn list_directory(&self, path: &str) -> Result<Vec<String>, Error> {
        let full = self.resolve(path)?;
        let mut entries = Vec::new();
        for entry in fs::read_dir(full)? {
            let entry = entry?;
            if let Ok(name) = entry.file_name().into_string() {
                entries.push(name);
            }
        }
        entries.sort();
        Ok(entries)
    }

    /// Moves the cursor; the target must be an existing directory
    pub fn set_current_directory(&self, path: &str) -> Result<(), Error> {
        let full = self.resolve(path)?;
        if !full.is_dir() {
            return Err(Error::Workspace(format!("Invalid directory: '{}'", path)));
        }
        let relative = full
            .strip_prefix(&self.root)
            .map_err(|_| Error::Workspace(format!("Invalid directory: '{}'", path)))?
            .to_path_buf();
        *self.current.lock().expect("workspace cursor poisoned") = relative;
        Ok(())
    }

    /// Returns the cursor relative to the root, "." at the root itself
    pub fn current_directory(&self) -> String {
        let current = self.current.lock().expect("workspace cursor poisoned");
        if current.as_os_str().is_empty() {
            ".".to_string()
        } else {
            current.display().to_string()
        }
    }

    /// Whole-tree structure dump: directories map to nested objects, files to null
    pub fn structure(&self) -> Result<Value, Error> {
        fn walk(dir: &Path) -> Result<Value, Error> {
            let mut map = Map::new();
            let mut entries: Vec<_> = fs::read_dir(dir)?.flatten().collect();
            entries.sort_by_key(|e| e.file_name());
            for entry in entries {
                let name = entry.file_name().to_string_lossy().into_owned();
                let path = entry.path();
                if path.is_dir() {
                    map.insert(name, walk(&path)?);
                } else {
                    map.insert(name, Value::Null);
                }
            }
            Ok(Value::Object(map))
        }
        walk(&self.root)
    }

    /// Structure plus cursor, rendered for tool output
    pub fn structure_report(&self) -> Result<String, Error> {
        let report = json!({
            "current_dir": self.current_directory(),
            "structure": self.structure()?,
        });
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_workspace() -> ProjectWorkspace {
        let root = std::env::temp_dir().join(format!("forgeline-ws-{}", uuid::Uuid::new_v4()));
        ProjectWorkspace::new(root).unwrap()
    }

    #[test]
    fn write_read_roundtrip_creates_parents() {
        let ws = temp_workspace();
        ws.write_file("src/add.py", "def add(a, b):\n    return a + b\n")
            .unwrap();
        let content = ws.read_file("src/add.py").unwrap();
        assert!(content.contains("return a + b"));
    }

    #[test]
    fn append_requires_existing_file() {
        let ws = temp_workspace();
        assert!(ws.append_file("notes.txt", "more").is_err());
        ws.write_file("notes.txt", "start\n").unwrap();
        ws.append_file("notes.txt", "more\n").unwrap();
        assert_eq!(ws.read_file("notes.txt").unwrap(), "start\nmore\n");
    }

    #[test]
    fn cursor_moves_and_reports() {
        let ws = temp_workspace();
        assert_eq!(ws.current_directory(), ".");
        ws.create_directory("src").unwrap();
        ws.set_current_directory("src").unwrap();
        assert_eq!(ws.current_directory(), "src");
        ws.write_file("main.py", "print('hi')\n").unwrap();
        assert!(ws.root().join("src/main.py").is_file());
        ws.set_current_directory("..").unwrap();
        assert_eq!(ws.current_directory(), ".");
    }

    #[test]
    fn escaping_the_root_is_rejected() {
        let ws = temp_workspace();
        assert!(ws.resolve("../outside.txt").is_err());
        assert!(ws.resolve("/etc/passwd").is_err());
        assert!(ws.resolve("src/../../outside.txt").is_err());
    }

    #[test]
    fn structure_dump_lists_files_and_dirs() {
        let ws = temp_workspace();
        ws.write_file("src/game.js", "// game\n").unwrap();
        ws.write_file("README.md", "# readme\n").unwrap();
        let tree = ws.structure().unwrap();
        assert_eq!(tree["README.md"], Value::Null);
        assert_eq!(tree["src"]["game.js"], Value::Null);
    }
}
