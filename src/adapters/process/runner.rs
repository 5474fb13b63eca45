use crate::domain::ports::{ProcessResult, ToolCommand, ToolRunner};
use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Runs tools as child processes and waits for them.
pub struct ProcessToolRunner;

impl ProcessToolRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProcessToolRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRunner for ProcessToolRunner {
    fn run(&self, command: &ToolCommand) -> Result<ProcessResult> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .envs(command.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null());
        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .with_context(|| format!("Failed to start process: {}", command.program.display()))?;

        Ok(ProcessResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
