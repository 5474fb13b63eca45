use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ORACLE: &str = "oracle";
pub const DEFAULT_THROTTLE_MILLIS: u64 = 500;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path or name of the oracle executable.
    pub oracle_path: PathBuf,
    /// Passed to the oracle as `GOPATH` when set.
    pub gopath: Option<String>,
    /// Directory whose sub-directories are the navigator's projects.
    pub workspace_root: PathBuf,
    /// Minimum interval between navigator refreshes.
    pub throttle_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            oracle_path: PathBuf::from(DEFAULT_ORACLE),
            gopath: None,
            workspace_root: PathBuf::from("."),
            throttle_delay: Duration::from_millis(DEFAULT_THROTTLE_MILLIS),
        }
    }
}
