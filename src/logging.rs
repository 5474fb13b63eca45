//! Logging initialisation for the `gonav` binary.
//!
//! Every mode writes to stderr so that stdout stays reserved for command
//! output and, in MCP mode, for the stdio protocol.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub enum LogMode {
    Cli,
    Server,
    Mcp,
}

pub fn init(mode: LogMode, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match mode {
        LogMode::Cli => builder.with_target(false).try_init(),
        LogMode::Server => builder.with_target(true).try_init(),
        // MCP clients usually capture stderr into log files.
        LogMode::Mcp => builder.with_ansi(false).with_target(true).try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))
}
