use crate::domain::definition::FindDefinitionResult;
use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    pub oracle_path: String,
    pub workspace_root: String,
    pub project_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindDefinitionRequest {
    /// Go source file; relative paths are resolved against the workspace root.
    pub file: String,
    /// Byte offset of the cursor inside the file.
    pub offset: usize,
    /// Packages the oracle should analyse. Defaults to the file's directory.
    #[serde(default)]
    pub scope: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ParseOutputRequest {
    /// Raw stdout of `oracle -format=json describe`.
    pub output: String,
    #[serde(default)]
    pub exit_code: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionKind {
    Empty,
    Location,
    SoftFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocationDto {
    pub path: String,
    /// 1-based.
    pub line: u32,
    /// 1-based.
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DefinitionResponse {
    pub kind: DefinitionKind,
    /// Set for `location`.
    pub location: Option<LocationDto>,
    /// Set for `soft_failure`.
    pub message: Option<String>,
}

impl From<FindDefinitionResult> for DefinitionResponse {
    fn from(result: FindDefinitionResult) -> Self {
        match result {
            FindDefinitionResult::Empty => DefinitionResponse {
                kind: DefinitionKind::Empty,
                location: None,
                message: None,
            },
            FindDefinitionResult::Location(loc) => DefinitionResponse {
                kind: DefinitionKind::Location,
                location: Some(LocationDto {
                    path: loc.path.to_string_lossy().into_owned(),
                    line: loc.line,
                    column: loc.column,
                }),
                message: None,
            },
            FindDefinitionResult::SoftFailure { message } => DefinitionResponse {
                kind: DefinitionKind::SoftFailure,
                location: None,
                message: Some(message),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TreeResponse {
    pub workspace_root: String,
    pub projects: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TreeNode {
    pub label: String,
    /// project|build_targets|build_target|directory|file
    pub kind: String,
    pub path: Option<String>,
    pub has_children: bool,
    pub children: Vec<TreeNode>,
}
