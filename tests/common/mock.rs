//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use go_navigator::domain::navigator::ProjectRef;
use go_navigator::domain::ports::{
    ProcessResult, ProjectModel, ResourceEntry, ToolCommand, ToolRunner,
};

/// Mock ToolRunner that replays a fixed process result and records commands.
pub struct MockToolRunner {
    pub result: ProcessResult,
    pub commands: Mutex<Vec<ToolCommand>>,
}

impl MockToolRunner {
    pub fn new(exit_code: i32, stdout: impl Into<String>) -> Self {
        Self {
            result: ProcessResult {
                exit_code,
                stdout: stdout.into(),
                stderr: String::new(),
            },
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding(stdout: impl Into<String>) -> Self {
        Self::new(0, stdout)
    }

    pub fn last_command(&self) -> Option<ToolCommand> {
        self.commands.lock().unwrap().last().cloned()
    }
}

impl ToolRunner for MockToolRunner {
    fn run(&self, command: &ToolCommand) -> Result<ProcessResult> {
        self.commands.lock().unwrap().push(command.clone());
        Ok(self.result.clone())
    }
}

/// Mock ToolRunner whose process never starts.
pub struct FailingToolRunner;

impl ToolRunner for FailingToolRunner {
    fn run(&self, command: &ToolCommand) -> Result<ProcessResult> {
        Err(anyhow!("No such file or directory: {}", command.program.display()))
    }
}

/// Mock ProjectModel serving directory listings from an in-memory map.
pub struct MockProjectModel {
    projects: Vec<ProjectRef>,
    inaccessible: Vec<String>,
    dirs: HashMap<PathBuf, Vec<ResourceEntry>>,
    targets: HashMap<String, Vec<(String, PathBuf)>>,
}

impl MockProjectModel {
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            inaccessible: Vec::new(),
            dirs: HashMap::new(),
            targets: HashMap::new(),
        }
    }

    pub fn with_project(mut self, name: &str, root: impl Into<PathBuf>) -> Self {
        self.projects.push(ProjectRef::new(name, root));
        self
    }

    pub fn with_inaccessible(mut self, name: &str) -> Self {
        self.inaccessible.push(name.to_string());
        self
    }

    pub fn with_entry(mut self, dir: impl AsRef<Path>, name: &str, is_dir: bool) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let path = dir.join(name);
        self.dirs
            .entry(dir)
            .or_default()
            .push(ResourceEntry { path, is_dir });
        self
    }

    pub fn with_target(mut self, project: &str, name: &str, path: impl Into<PathBuf>) -> Self {
        self.targets
            .entry(project.to_string())
            .or_default()
            .push((name.to_string(), path.into()));
        self
    }
}

impl Default for MockProjectModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectModel for MockProjectModel {
    fn projects(&self) -> Result<Vec<ProjectRef>> {
        Ok(self.projects.clone())
    }

    fn is_accessible(&self, project: &ProjectRef) -> bool {
        !self.inaccessible.contains(&project.name)
    }

    fn members(&self, _project: &ProjectRef, dir: &Path) -> Result<Vec<ResourceEntry>> {
        self.dirs
            .get(dir)
            .cloned()
            .ok_or_else(|| anyhow!("Directory not found: {}", dir.display()))
    }

    fn build_targets(&self, project: &ProjectRef) -> Result<Vec<(String, PathBuf)>> {
        Ok(self.targets.get(&project.name).cloned().unwrap_or_default())
    }
}
