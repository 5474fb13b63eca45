use thiserror::Error;

/// Failures of an external tool invocation or of interpreting its output.
///
/// Expected negative outcomes ("already at a definition", ...) are not errors;
/// they are reported as [`FindDefinitionResult::SoftFailure`](crate::domain::definition::FindDefinitionResult).
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Program exited with non-zero status: {exit_code}")]
    ToolInvocation { exit_code: i32 },
    #[error("Error parsing JSON output: {message}")]
    MalformedOutput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ToolError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ToolError::MalformedOutput {
            message: message.into(),
            source: None,
        }
    }

    pub fn malformed_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ToolError::MalformedOutput {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::malformed_with(err.to_string(), err)
    }
}

pub type ToolResult<T> = std::result::Result<T, ToolError>;
