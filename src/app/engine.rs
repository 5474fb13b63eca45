use crate::adapters::fs::workspace::FsProjectModel;
use crate::adapters::oracle::operation::GoOracleFindDefinition;
use crate::adapters::oracle::parser::parse_find_definition;
use crate::adapters::process::runner::ProcessToolRunner;
use crate::app::config::EngineConfig;
use crate::app::dto::*;
use crate::domain::navigator::{NavigatorContentProvider, NavigatorElement};
use crate::domain::ports::{ProjectModel, ToolRunner};
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone)]
pub struct NavigatorEngine {
    inner: Arc<EngineData>,
}

struct EngineData {
    config: EngineConfig,
    oracle: GoOracleFindDefinition,
    runner: Arc<dyn ToolRunner>,
    navigator: NavigatorContentProvider,
}

impl NavigatorEngine {
    /// Engine backed by real processes and the file system.
    pub fn new(config: EngineConfig) -> Self {
        let model = Arc::new(FsProjectModel::new(config.workspace_root.clone()));
        Self::with_adapters(config, Arc::new(ProcessToolRunner::new()), model)
    }

    /// Construct an engine from explicit adapters.
    ///
    /// Used for testing or when tools run somewhere other than a local child process.
    pub fn with_adapters(
        config: EngineConfig,
        runner: Arc<dyn ToolRunner>,
        model: Arc<dyn ProjectModel>,
    ) -> Self {
        let oracle = GoOracleFindDefinition::new(config.oracle_path.clone())
            .with_gopath(config.gopath.clone());
        Self {
            inner: Arc::new(EngineData {
                config,
                oracle,
                runner,
                navigator: NavigatorContentProvider::new(model),
            }),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    pub fn navigator(&self) -> &NavigatorContentProvider {
        &self.inner.navigator
    }

    pub fn health(&self) -> HealthResponse {
        let project_count = match self.inner.navigator.roots() {
            Ok(roots) => roots.len(),
            Err(e) => {
                tracing::warn!("Failed to list projects: {:#}", e);
                0
            }
        };
        HealthResponse {
            oracle_path: self.inner.config.oracle_path.to_string_lossy().to_string(),
            workspace_root: self.inner.config.workspace_root.to_string_lossy().to_string(),
            project_count,
        }
    }

    pub fn find_definition(&self, req: FindDefinitionRequest) -> Result<DefinitionResponse> {
        let file = self.resolve(&req.file);
        let result = self
            .inner
            .oracle
            .execute(self.inner.runner.as_ref(), &file, req.offset, &req.scope)
            .with_context(|| format!("Find definition failed at {}:#{}", file.display(), req.offset))?;
        tracing::info!("Find definition at {}:#{}: {:?}", file.display(), req.offset, result);
        Ok(result.into())
    }

    pub fn parse_output(&self, req: ParseOutputRequest) -> Result<DefinitionResponse> {
        let result = parse_find_definition(&req.output, req.exit_code)?;
        Ok(result.into())
    }

    /// Render the navigator tree. `depth` limits how many levels below the
    /// projects are expanded; `None` expands everything.
    pub fn tree(&self, depth: Option<usize>) -> Result<TreeResponse> {
        let navigator = &self.inner.navigator;
        let roots = navigator.roots().with_context(|| {
            format!(
                "Failed to list projects in {}",
                self.inner.config.workspace_root.display()
            )
        })?;

        Ok(TreeResponse {
            workspace_root: self.inner.config.workspace_root.to_string_lossy().to_string(),
            projects: roots
                .iter()
                .map(|root| build_tree_node(navigator, root, depth))
                .collect(),
        })
    }

    fn resolve(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.inner.config.workspace_root.join(path)
        }
    }
}

fn build_tree_node(
    navigator: &NavigatorContentProvider,
    element: &NavigatorElement,
    depth: Option<usize>,
) -> TreeNode {
    let has_children = navigator.has_children(element);
    let children = match depth {
        Some(0) => Vec::new(),
        _ if !has_children => Vec::new(),
        _ => {
            let next = depth.map(|d| d - 1);
            navigator
                .children(element)
                .iter()
                .map(|child| build_tree_node(navigator, child, next))
                .collect()
        }
    };

    TreeNode {
        label: element.label(),
        kind: element.kind().to_string(),
        path: element.path().map(|p| p.to_string_lossy().to_string()),
        has_children,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ToolError;
    use crate::domain::navigator::ProjectRef;
    use crate::domain::ports::{ProcessResult, ResourceEntry, ToolCommand};
    use std::sync::Mutex;

    struct RecordingRunner {
        stdout: String,
        commands: Mutex<Vec<ToolCommand>>,
    }

    impl ToolRunner for RecordingRunner {
        fn run(&self, command: &ToolCommand) -> Result<ProcessResult> {
            self.commands.lock().unwrap().push(command.clone());
            Ok(ProcessResult {
                exit_code: 0,
                stdout: self.stdout.clone(),
                stderr: String::new(),
            })
        }
    }

    struct OneProject;

    impl ProjectModel for OneProject {
        fn projects(&self) -> Result<Vec<ProjectRef>> {
            Ok(vec![ProjectRef::new("app", "/ws/app")])
        }
        fn is_accessible(&self, _project: &ProjectRef) -> bool {
            true
        }
        fn members(&self, _project: &ProjectRef, dir: &Path) -> Result<Vec<ResourceEntry>> {
            if dir == Path::new("/ws/app") {
                Ok(vec![ResourceEntry {
                    path: "/ws/app/pkg".into(),
                    is_dir: true,
                }])
            } else {
                Ok(vec![ResourceEntry {
                    path: dir.join("lib.go"),
                    is_dir: false,
                }])
            }
        }
        fn build_targets(&self, _project: &ProjectRef) -> Result<Vec<(String, PathBuf)>> {
            Ok(Vec::new())
        }
    }

    fn engine(stdout: &str) -> (NavigatorEngine, Arc<RecordingRunner>) {
        let runner = Arc::new(RecordingRunner {
            stdout: stdout.into(),
            commands: Mutex::new(Vec::new()),
        });
        let config = EngineConfig {
            workspace_root: "/ws".into(),
            ..EngineConfig::default()
        };
        let engine = NavigatorEngine::with_adapters(config, runner.clone(), Arc::new(OneProject));
        (engine, runner)
    }

    #[test]
    fn test_find_definition_resolves_relative_file() {
        let (engine, runner) = engine(r#"{"describe":{"desc":"source file","detail":"package"}}"#);
        let res = engine
            .find_definition(FindDefinitionRequest {
                file: "app/main.go".into(),
                offset: 12,
                scope: vec![],
            })
            .unwrap();
        assert_eq!(res.kind, DefinitionKind::Empty);
        let commands = runner.commands.lock().unwrap();
        assert_eq!(commands[0].args[0], "-pos=/ws/app/main.go:#12");
    }

    #[test]
    fn test_parse_output_keeps_tool_error() {
        let (engine, _) = engine("");
        let err = engine
            .parse_output(ParseOutputRequest {
                output: "{}".into(),
                exit_code: 3,
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::ToolInvocation { exit_code: 3 })
        ));
    }

    #[test]
    fn test_tree_depth_limits_expansion() {
        let (engine, _) = engine("");
        let full = engine.tree(None).unwrap();
        let app = &full.projects[0];
        assert_eq!(app.label, "app");
        assert_eq!(app.children.len(), 2);
        assert_eq!(app.children[1].children[0].label, "lib.go");

        let shallow = engine.tree(Some(0)).unwrap();
        assert!(shallow.projects[0].children.is_empty());
        assert!(shallow.projects[0].has_children);

        let one = engine.tree(Some(1)).unwrap();
        assert_eq!(one.projects[0].children.len(), 2);
        assert!(one.projects[0].children[1].children.is_empty());
    }

    #[test]
    fn test_health_counts_projects() {
        let (engine, _) = engine("");
        let health = engine.health();
        assert_eq!(health.project_count, 1);
        assert_eq!(health.oracle_path, "oracle");
    }
}
