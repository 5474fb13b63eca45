use crate::adapters::oracle::parser::parse_find_definition;
use crate::domain::definition::FindDefinitionResult;
use crate::domain::ports::{ToolCommand, ToolRunner};
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// Find-definition through `oracle describe`.
#[derive(Debug, Clone)]
pub struct GoOracleFindDefinition {
    oracle_path: PathBuf,
    gopath: Option<String>,
}

impl GoOracleFindDefinition {
    pub fn new(oracle_path: impl Into<PathBuf>) -> Self {
        Self {
            oracle_path: oracle_path.into(),
            gopath: None,
        }
    }

    pub fn with_gopath(mut self, gopath: Option<String>) -> Self {
        self.gopath = gopath;
        self
    }

    /// `oracle -pos=<file>:#<offset> -format=json describe <scope...>`
    ///
    /// Without an explicit scope the file's own directory is analysed.
    pub fn build_command(&self, file: &Path, offset: usize, scope: &[String]) -> ToolCommand {
        let mut cmd = ToolCommand::new(&self.oracle_path)
            .arg(format!("-pos={}:#{}", file.display(), offset))
            .arg("-format=json")
            .arg("describe");

        if scope.is_empty() {
            let dir = file
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            cmd = cmd.arg(dir.to_string_lossy());
        } else {
            for package in scope {
                cmd = cmd.arg(package.as_str());
            }
        }

        if let Some(gopath) = &self.gopath {
            cmd = cmd.env("GOPATH", gopath.as_str());
        }
        cmd
    }

    pub fn execute(
        &self,
        runner: &dyn ToolRunner,
        file: &Path,
        offset: usize,
        scope: &[String],
    ) -> Result<FindDefinitionResult> {
        let cmd = self.build_command(file, offset, scope);
        tracing::debug!("Running {} {:?}", cmd.program.display(), cmd.args);

        let output = runner
            .run(&cmd)
            .with_context(|| format!("Failed to run oracle: {}", cmd.program.display()))?;
        if output.exit_code != 0 && !output.stderr.is_empty() {
            tracing::warn!("oracle stderr: {}", output.stderr.trim_end());
        }

        Ok(parse_find_definition(&output.stdout, output.exit_code)?)
    }
}
