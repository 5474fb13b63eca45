use anyhow::Result;
use clap::{Parser, Subcommand};
use go_navigator::app::config::{DEFAULT_ORACLE, DEFAULT_THROTTLE_MILLIS, EngineConfig};
use go_navigator::app::engine::NavigatorEngine;
use go_navigator::cli;
use go_navigator::logging::{self, LogMode};
use go_navigator::server::{http, mcp::NavigatorMcpServer};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "gonav",
    version,
    about = "Go project navigation and oracle-backed find-definition"
)]
struct Cli {
    /// Go oracle executable
    #[arg(long, env = "GONAV_ORACLE", default_value = DEFAULT_ORACLE, global = true)]
    oracle: PathBuf,

    /// GOPATH handed to the oracle
    #[arg(long, env = "GOPATH", global = true)]
    gopath: Option<String>,

    /// Workspace root; each sub-directory is a project
    #[arg(long, short = 'w', default_value = ".", global = true)]
    workspace: PathBuf,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the definition of the identifier at a byte offset in a Go file
    FindDefinition {
        file: String,
        /// Byte offset of the cursor
        offset: usize,
        /// Package to analyse (repeatable); defaults to the file's directory
        #[arg(long)]
        scope: Vec<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interpret saved `oracle -format=json describe` output
    Parse {
        /// File holding the output; stdin when omitted or `-`
        input: Option<PathBuf>,
        /// Exit status the oracle returned
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        exit_code: i32,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the workspace navigator tree
    Tree {
        /// Levels to expand below each project
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Print the navigator tree and refresh it on file changes
    Watch {
        /// Minimum interval between refreshes, in milliseconds
        #[arg(long, default_value_t = DEFAULT_THROTTLE_MILLIS)]
        throttle_ms: u64,
        /// Levels to expand below each project
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:7878")]
        addr: SocketAddr,
    },
    /// Serve MCP over stdio
    Mcp,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mode = match args.command {
        Commands::Serve { .. } => LogMode::Server,
        Commands::Mcp => LogMode::Mcp,
        _ => LogMode::Cli,
    };
    logging::init(mode, args.verbose)?;

    let mut config = EngineConfig {
        oracle_path: args.oracle,
        gopath: args.gopath,
        workspace_root: args.workspace,
        ..EngineConfig::default()
    };
    if let Commands::Watch { throttle_ms, .. } = &args.command {
        config.throttle_delay = Duration::from_millis(*throttle_ms);
    }
    tracing::debug!("Configuration: {:?}", config);
    let engine = NavigatorEngine::new(config);

    match args.command {
        Commands::FindDefinition {
            file,
            offset,
            scope,
            json,
        } => cli::find_definition(&engine, &file, offset, &scope, json),
        Commands::Parse {
            input,
            exit_code,
            json,
        } => cli::parse_output(&engine, input.as_deref(), exit_code, json),
        Commands::Tree { depth } => cli::display_tree(&engine, depth),
        Commands::Watch { depth, .. } => {
            let delay = engine.config().throttle_delay;
            cli::watch_workspace(&engine, delay, depth).await
        }
        Commands::Serve { addr } => http::serve(engine, addr).await,
        Commands::Mcp => NavigatorMcpServer::new(engine).serve_stdio().await,
    }
}
