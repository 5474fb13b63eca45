use crate::domain::navigator::ProjectRef;
use crate::domain::ports::{ProjectModel, ResourceEntry};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Directory name holding one sub-directory per Go command.
const BUILD_TARGETS_DIR: &str = "cmd";

/// File system project model.
///
/// Conventions:
/// - every non-hidden directory of the workspace root is a project
/// - every directory under `<project>/cmd/` is a build target
pub struct FsProjectModel {
    workspace_root: PathBuf,
}

impl FsProjectModel {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }
}

impl ProjectModel for FsProjectModel {
    fn projects(&self) -> Result<Vec<ProjectRef>> {
        let entries = list_dir(&self.workspace_root)?;
        Ok(entries
            .into_iter()
            .filter(|e| e.is_dir)
            .map(|e| {
                let name = file_name(&e.path);
                ProjectRef::new(name, e.path)
            })
            .collect())
    }

    fn is_accessible(&self, project: &ProjectRef) -> bool {
        std::fs::read_dir(&project.root).is_ok()
    }

    fn members(&self, _project: &ProjectRef, dir: &Path) -> Result<Vec<ResourceEntry>> {
        list_dir(dir)
    }

    fn build_targets(&self, project: &ProjectRef) -> Result<Vec<(String, PathBuf)>> {
        let cmd_dir = project.root.join(BUILD_TARGETS_DIR);
        if !cmd_dir.is_dir() {
            return Ok(Vec::new());
        }
        Ok(list_dir(&cmd_dir)?
            .into_iter()
            .filter(|e| e.is_dir)
            .map(|e| (file_name(&e.path), e.path))
            .collect())
    }
}

/// Non-hidden entries of `dir`: directories first, then files, each by name.
fn list_dir(dir: &Path) -> Result<Vec<ResourceEntry>> {
    let read = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut entries = Vec::new();
    for entry in read {
        let entry = entry.with_context(|| format!("Failed to read entry in: {}", dir.display()))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push(ResourceEntry {
            path: entry.path(),
            is_dir,
        });
    }

    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.path.cmp(&b.path)));
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
