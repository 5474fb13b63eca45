// Go oracle `describe` output parsing.
// Turns the JSON document printed by `oracle -format=json describe` into a
// find-definition result.

use crate::domain::definition::{
    ALREADY_AT_DEFINITION, DEFINITION_NOT_AVAILABLE, FindDefinitionResult, NOT_A_DEFINITION,
};
use crate::domain::error::{ToolError, ToolResult};
use crate::domain::location::parse_path_line_column;
use serde_json::{Map, Value};

const DEFINITION_OF: &str = "definition of ";

/// Interpret the output of a finished oracle process.
pub fn parse_find_definition(output: &str, exit_code: i32) -> ToolResult<FindDefinitionResult> {
    if exit_code != 0 {
        return Err(ToolError::ToolInvocation { exit_code });
    }
    parse_json_result(output)
}

/// Interpret an oracle JSON document, ignoring the process status.
pub fn parse_json_result(output: &str) -> ToolResult<FindDefinitionResult> {
    let json: Value = serde_json::from_str(output)?;
    let root = json
        .as_object()
        .ok_or_else(|| ToolError::malformed("expected a JSON object"))?;

    let describe = get_object(root, "describe")?;
    let desc = get_string(describe, "desc")
        .ok_or_else(|| ToolError::malformed("missing string field \"desc\""))?;
    let detail = get_string(describe, "detail");

    if desc == "source file" {
        return Ok(FindDefinitionResult::Empty);
    }

    if desc == "identifier" {
        let value = get_object(describe, "value")?;
        return location_or_unavailable(value, "objpos");
    }

    if detail == Some("type") {
        if let Some(name) = desc.strip_prefix(DEFINITION_OF) {
            return Ok(FindDefinitionResult::soft_failure(format!(
                "{ALREADY_AT_DEFINITION}{name}"
            )));
        }
        let ty = get_object(describe, "type")?;
        return location_or_unavailable(ty, "namepos");
    }

    Ok(FindDefinitionResult::soft_failure(format!(
        "{NOT_A_DEFINITION}{desc}"
    )))
}

fn location_or_unavailable(
    object: &Map<String, Value>,
    key: &str,
) -> ToolResult<FindDefinitionResult> {
    match get_string(object, key) {
        Some(pos) => Ok(FindDefinitionResult::Location(parse_path_line_column(
            pos, ":",
        )?)),
        None => Ok(FindDefinitionResult::soft_failure(DEFINITION_NOT_AVAILABLE)),
    }
}

fn get_object<'a>(object: &'a Map<String, Value>, key: &str) -> ToolResult<&'a Map<String, Value>> {
    object
        .get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| ToolError::malformed(format!("missing object field \"{key}\"")))
}

/// A present non-string value counts as absent.
fn get_string<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}
