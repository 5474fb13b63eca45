use crate::app::dto::*;
use crate::app::engine::NavigatorEngine;
use rmcp::{
    Json, ServerHandler, ServiceExt, handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters, model::*, tool, tool_handler, tool_router,
    transport::stdio,
};
use tokio::task::spawn_blocking;

#[derive(Clone)]
pub struct NavigatorMcpServer {
    engine: NavigatorEngine,
    tool_router: ToolRouter<Self>,
}

impl NavigatorMcpServer {
    pub fn new(engine: NavigatorEngine) -> Self {
        Self {
            engine,
            tool_router: Self::tool_router(),
        }
    }

    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        let service = self.serve(stdio()).await?;
        service.waiting().await?;
        Ok(())
    }
}

#[tool_router]
impl NavigatorMcpServer {
    #[tool(
        description = "Find the definition of the Go identifier at a byte offset, using the Go oracle."
    )]
    async fn find_definition(
        &self,
        params: Parameters<FindDefinitionRequest>,
    ) -> Result<Json<DefinitionResponse>, String> {
        let engine = self.engine.clone();
        let req = params.0;
        spawn_blocking(move || engine.find_definition(req))
            .await
            .map_err(|e| format!("task join error: {e}"))?
            .map(Json)
            .map_err(|e| format!("{e:#}"))
    }

    #[tool(description = "Interpret raw `oracle -format=json describe` output as a find-definition result.")]
    async fn parse_oracle_output(
        &self,
        params: Parameters<ParseOutputRequest>,
    ) -> Result<Json<DefinitionResponse>, String> {
        self.engine
            .parse_output(params.0)
            .map(Json)
            .map_err(|e| format!("{e:#}"))
    }

    #[tool(description = "List workspace projects, build targets and files as a tree.")]
    async fn navigator_tree(
        &self,
        params: Parameters<TreeParams>,
    ) -> Result<Json<TreeResponse>, String> {
        let engine = self.engine.clone();
        let depth = params.0.depth;
        spawn_blocking(move || engine.tree(depth))
            .await
            .map_err(|e| format!("task join error: {e}"))?
            .map(Json)
            .map_err(|e| format!("{e:#}"))
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, rmcp::schemars::JsonSchema)]
pub struct TreeParams {
    /// Levels to expand below each project; all when omitted.
    pub depth: Option<usize>,
}

#[tool_handler]
impl ServerHandler for NavigatorMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Navigate Go workspaces: find definitions through the Go oracle and browse projects and build targets."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
