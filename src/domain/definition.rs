use crate::domain::location::SourceLocation;

pub const DEFINITION_NOT_AVAILABLE: &str = "Definition not available.";
pub const ALREADY_AT_DEFINITION: &str = "Already at a definition: ";
pub const NOT_A_DEFINITION: &str =
    "Selected position does not refer to a definition. Rather, it's a:\n";

/// Outcome of a find-definition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindDefinitionResult {
    /// The cursor is on a plain source file reference; nothing to navigate to.
    Empty,
    Location(SourceLocation),
    /// An expected negative outcome, shown to the user as-is.
    SoftFailure { message: String },
}

impl FindDefinitionResult {
    pub fn soft_failure(message: impl Into<String>) -> Self {
        FindDefinitionResult::SoftFailure {
            message: message.into(),
        }
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            FindDefinitionResult::Location(loc) => Some(loc),
            _ => None,
        }
    }
}
