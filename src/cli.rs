use crate::app::dto::{
    DefinitionKind, DefinitionResponse, FindDefinitionRequest, ParseOutputRequest, TreeNode,
    TreeResponse,
};
use crate::app::engine::NavigatorEngine;
use crate::app::refresh::NavigatorRefresher;
use anyhow::{Context as _, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as _};
use std::fmt::Write as _;
use std::io::Read as _;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const EMPTY_RESULT_MESSAGE: &str = "Nothing to navigate to: the position is a source file reference.";

pub fn find_definition(
    engine: &NavigatorEngine,
    file: &str,
    offset: usize,
    scope: &[String],
    json: bool,
) -> Result<()> {
    let res = engine.find_definition(FindDefinitionRequest {
        file: file.to_string(),
        offset,
        scope: scope.to_vec(),
    })?;
    print_definition(&res, json)
}

/// Interpret saved oracle output read from `input`, or stdin when `None` or `-`.
pub fn parse_output(
    engine: &NavigatorEngine,
    input: Option<&Path>,
    exit_code: i32,
    json: bool,
) -> Result<()> {
    let output = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read oracle output: {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read oracle output from stdin")?;
            buf
        }
    };

    let res = engine.parse_output(ParseOutputRequest { output, exit_code })?;
    print_definition(&res, json)
}

pub fn display_tree(engine: &NavigatorEngine, depth: Option<usize>) -> Result<()> {
    let tree = engine.tree(depth)?;
    print!("{}", render_tree(&tree));
    Ok(())
}

/// Print the tree, then re-print it whenever the workspace changes, at most
/// once per `delay`. Returns on Ctrl-C.
pub async fn watch_workspace(
    engine: &NavigatorEngine,
    delay: Duration,
    depth: Option<usize>,
) -> Result<()> {
    let root = engine.config().workspace_root.clone();
    let refresher = Arc::new(NavigatorRefresher::new(
        engine.clone(),
        delay,
        depth,
        |tree| {
            println!("{}", "=".repeat(80));
            print!("{}", render_tree(&tree));
        },
    )?);
    refresher.request_refresh_blocking().await?;

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<notify::Result<Event>>();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            let _ = tx.send(res);
        },
        notify::Config::default(),
    )
    .context("Failed to create file watcher")?;
    watcher
        .watch(&root, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", root.display()))?;
    tracing::info!("Watching {} (throttle {:?})", root.display(), delay);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = rx.recv() => match event {
                Some(Ok(event)) => {
                    if !matches!(event.kind, EventKind::Access(_)) {
                        tracing::debug!("Change detected: {:?}", event.paths);
                        refresher.request_refresh_blocking().await?;
                    }
                }
                Some(Err(e)) => tracing::warn!("Watch error: {}", e),
                None => break,
            }
        }
    }

    refresher.gate().cancel();
    tracing::info!("Stopped watching {}", root.display());
    Ok(())
}

fn print_definition(res: &DefinitionResponse, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(res)?);
    } else {
        println!("{}", format_definition(res));
    }
    Ok(())
}

pub fn format_definition(res: &DefinitionResponse) -> String {
    match (res.kind, &res.location, &res.message) {
        (DefinitionKind::Location, Some(loc), _) => {
            format!("{}:{}:{}", loc.path, loc.line, loc.column)
        }
        (DefinitionKind::SoftFailure, _, Some(message)) => message.clone(),
        _ => EMPTY_RESULT_MESSAGE.to_string(),
    }
}

pub fn render_tree(tree: &TreeResponse) -> String {
    let mut out = String::new();
    for node in &tree.projects {
        render_node(&mut out, node, 0);
    }
    out
}

fn render_node(out: &mut String, node: &TreeNode, indent: usize) {
    let suffix = match node.kind.as_str() {
        "project" | "directory" => "/",
        _ => "",
    };
    let _ = writeln!(out, "{}{}{}", "  ".repeat(indent), node.label, suffix);
    for child in &node.children {
        render_node(out, child, indent + 1);
    }
}
