//! Navigator tree model.
//!
//! The tree is a closed set of element kinds; every query dispatches with an
//! exhaustive `match`.

use crate::domain::ports::ProjectModel;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const BUILD_TARGETS_LABEL: &str = "Build Targets";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectRef {
    pub name: String,
    pub root: PathBuf,
}

impl ProjectRef {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildTargetsContainer {
    pub project: ProjectRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildTargetElement {
    pub project: ProjectRef,
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceElement {
    pub project: ProjectRef,
    pub path: PathBuf,
    pub is_dir: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavigatorElement {
    Project(ProjectRef),
    BuildTargets(BuildTargetsContainer),
    BuildTarget(BuildTargetElement),
    Resource(ResourceElement),
}

impl NavigatorElement {
    pub fn kind(&self) -> &'static str {
        match self {
            NavigatorElement::Project(_) => "project",
            NavigatorElement::BuildTargets(_) => "build_targets",
            NavigatorElement::BuildTarget(_) => "build_target",
            NavigatorElement::Resource(r) if r.is_dir => "directory",
            NavigatorElement::Resource(_) => "file",
        }
    }

    pub fn label(&self) -> String {
        match self {
            NavigatorElement::Project(p) => p.name.clone(),
            NavigatorElement::BuildTargets(_) => BUILD_TARGETS_LABEL.to_string(),
            NavigatorElement::BuildTarget(t) => t.name.clone(),
            NavigatorElement::Resource(r) => r
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| r.path.to_string_lossy().into_owned()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            NavigatorElement::Project(p) => Some(&p.root),
            NavigatorElement::BuildTargets(_) => None,
            NavigatorElement::BuildTarget(t) => Some(&t.path),
            NavigatorElement::Resource(r) => Some(&r.path),
        }
    }
}

/// Answers tree-structure queries for a navigator view.
#[derive(Clone)]
pub struct NavigatorContentProvider {
    model: Arc<dyn ProjectModel>,
}

impl NavigatorContentProvider {
    pub fn new(model: Arc<dyn ProjectModel>) -> Self {
        Self { model }
    }

    pub fn roots(&self) -> anyhow::Result<Vec<NavigatorElement>> {
        Ok(self
            .model
            .projects()?
            .into_iter()
            .map(NavigatorElement::Project)
            .collect())
    }

    pub fn has_children(&self, element: &NavigatorElement) -> bool {
        match element {
            NavigatorElement::Project(project) => self.model.is_accessible(project),
            NavigatorElement::BuildTargets(_) => true,
            NavigatorElement::BuildTarget(_) => false,
            NavigatorElement::Resource(resource) => resource.is_dir,
        }
    }

    pub fn children(&self, element: &NavigatorElement) -> Vec<NavigatorElement> {
        match element {
            NavigatorElement::Project(project) => self.project_children(project),
            NavigatorElement::BuildTargets(container) => {
                match self.model.build_targets(&container.project) {
                    Ok(targets) => targets
                        .into_iter()
                        .map(|(name, path)| {
                            NavigatorElement::BuildTarget(BuildTargetElement {
                                project: container.project.clone(),
                                name,
                                path,
                            })
                        })
                        .collect(),
                    Err(e) => {
                        tracing::debug!(
                            "Failed to list build targets of {}: {:#}",
                            container.project.name,
                            e
                        );
                        Vec::new()
                    }
                }
            }
            NavigatorElement::BuildTarget(_) => Vec::new(),
            NavigatorElement::Resource(resource) if resource.is_dir => {
                self.resource_children(&resource.project, &resource.path)
            }
            NavigatorElement::Resource(_) => Vec::new(),
        }
    }

    pub fn parent(&self, element: &NavigatorElement) -> Option<NavigatorElement> {
        match element {
            NavigatorElement::Project(_) => None,
            NavigatorElement::BuildTargets(container) => {
                Some(NavigatorElement::Project(container.project.clone()))
            }
            NavigatorElement::BuildTarget(target) => {
                Some(NavigatorElement::BuildTargets(BuildTargetsContainer {
                    project: target.project.clone(),
                }))
            }
            NavigatorElement::Resource(resource) => {
                if !resource.path.starts_with(&resource.project.root)
                    || resource.path == resource.project.root
                {
                    return None;
                }
                let parent = resource.path.parent()?;
                if parent == resource.project.root {
                    Some(NavigatorElement::Project(resource.project.clone()))
                } else {
                    Some(NavigatorElement::Resource(ResourceElement {
                        project: resource.project.clone(),
                        path: parent.to_path_buf(),
                        is_dir: true,
                    }))
                }
            }
        }
    }

    fn project_children(&self, project: &ProjectRef) -> Vec<NavigatorElement> {
        if !self.model.is_accessible(project) {
            return Vec::new();
        }
        let mut children = self.model.first_children(project);
        children.push(NavigatorElement::BuildTargets(BuildTargetsContainer {
            project: project.clone(),
        }));
        children.extend(self.resource_children(project, &project.root));
        children
    }

    fn resource_children(&self, project: &ProjectRef, dir: &Path) -> Vec<NavigatorElement> {
        // A listing failure leaves the directory empty in the tree.
        match self.model.members(project, dir) {
            Ok(entries) => entries
                .into_iter()
                .map(|entry| {
                    NavigatorElement::Resource(ResourceElement {
                        project: project.clone(),
                        path: entry.path,
                        is_dir: entry.is_dir,
                    })
                })
                .collect(),
            Err(e) => {
                tracing::debug!("Failed to list {}: {:#}", dir.display(), e);
                Vec::new()
            }
        }
    }
}
