use crate::app::dto::TreeResponse;
use crate::app::engine::NavigatorEngine;
use crate::app::throttle::{RunDisposition, ThrottleGate};
use anyhow::{Context as _, Result};
use std::sync::Arc;
use std::time::Duration;

/// Re-renders the navigator tree on demand, at most once per throttle delay.
pub struct NavigatorRefresher {
    gate: ThrottleGate,
}

impl NavigatorRefresher {
    pub fn new<S>(
        engine: NavigatorEngine,
        delay: Duration,
        depth: Option<usize>,
        sink: S,
    ) -> Result<Self>
    where
        S: Fn(TreeResponse) + Send + Sync + 'static,
    {
        let gate = ThrottleGate::new("navigator-refresh", delay, move || -> Result<()> {
            let tree = engine.tree(depth)?;
            sink(tree);
            Ok(())
        })?;
        Ok(Self { gate })
    }

    pub fn request_refresh(&self) -> RunDisposition {
        self.gate.request_run()
    }

    /// Request a refresh from the blocking pool, so an immediate render never
    /// walks the workspace on an async worker thread.
    pub async fn request_refresh_blocking(self: &Arc<Self>) -> Result<RunDisposition> {
        let refresher = Arc::clone(self);
        tokio::task::spawn_blocking(move || refresher.request_refresh())
            .await
            .context("Navigator refresh task failed")
    }

    pub fn gate(&self) -> &ThrottleGate {
        &self.gate
    }
}
