use crate::domain::navigator::{NavigatorElement, ProjectRef};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// A fully specified external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub working_dir: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Captured output of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// `-1` when the process was terminated without an exit status.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// External process port (implemented by Infrastructure)
pub trait ToolRunner: Send + Sync {
    /// Run the command to completion. Errors only when the process could not be
    /// started or its output could not be collected.
    fn run(&self, command: &ToolCommand) -> Result<ProcessResult>;
}

/// A directory entry inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Project/resource model port backing the navigator
pub trait ProjectModel: Send + Sync {
    fn projects(&self) -> Result<Vec<ProjectRef>>;

    fn is_accessible(&self, project: &ProjectRef) -> bool;

    /// Entries of `dir` (a directory inside `project`), in display order.
    fn members(&self, project: &ProjectRef, dir: &Path) -> Result<Vec<ResourceEntry>>;

    /// Names and directories of the project's build targets.
    fn build_targets(&self, project: &ProjectRef) -> Result<Vec<(String, PathBuf)>>;

    /// Elements listed before the build targets container. None by default.
    fn first_children(&self, _project: &ProjectRef) -> Vec<NavigatorElement> {
        Vec::new()
    }
}
