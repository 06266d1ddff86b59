//! Structured reflection on tool failures.
//!
//! When a tool fails, the model gets the error together with likely causes
//! and a recovery hint, so its next call can be corrected instead of
//! repeated.

use crate::ToolError;

/// Format a tool failure for the model.
///
/// The message contains the error, its kind, recovery suggestions keyed on
/// the kind and HTTP status, and a preview of the arguments used.
pub fn format_tool_failure(tool_name: &str, arguments: &str, error: &ToolError) -> String {
    let mut msg = format!("Error from tool '{tool_name}' ({}):\n  {error}\n", error.kind());

    let suggestions = suggestions_for(error);
    if !suggestions.is_empty() {
        msg.push_str("\nPossible causes and recovery:\n");
        for suggestion in &suggestions {
            msg.push_str(&format!("  - {suggestion}\n"));
        }
    }

    let args_preview: String = arguments.chars().take(200).collect();
    msg.push_str(&format!("\nArguments used: {args_preview}"));
    if arguments.chars().count() > 200 {
        msg.push_str("...");
    }

    msg
}

/// Recovery suggestions for an error.
pub fn suggestions_for(error: &ToolError) -> Vec<&'static str> {
    match error {
        ToolError::Validation(_) => vec![
            "The arguments do not match the tool's parameter schema. Fix the listed fields and retry.",
            "Check required fields, numeric bounds and allowed enum values.",
        ],
        ToolError::Configuration(_) => vec![
            "The tool is missing credentials or a target repository. This cannot be fixed by changing arguments; report it to the operator.",
        ],
        ToolError::UnknownTool(_) => {
            vec!["No tool has this name. Pick one of the tools in the provided list."]
        }
        ToolError::Remote { status, .. } => match status {
            401 | 403 => vec![
                "The token lacks permission for this operation or has expired.",
                "Do not retry with the same arguments.",
            ],
            404 => vec![
                "The referenced number, name or id does not exist in this repository.",
                "List the resource first to find a valid identifier.",
            ],
            409 => vec!["The remote reported a conflict, such as a merge conflict or a stale head SHA."],
            410 => vec!["The resource has been removed or the feature is disabled on this repository."],
            422 => vec![
                "The remote rejected the field values. Check names, formats and that referenced branches or users exist.",
            ],
            429 => vec!["Rate limited. Wait before retrying."],
            500..=599 => vec!["The remote had an internal error. Retrying later may succeed."],
            _ => vec!["Review the message returned by the remote and adjust the arguments."],
        },
        ToolError::Transport(_) => vec![
            "The request did not complete (network error or timeout). Retrying may succeed.",
        ],
        ToolError::Decode(_) => {
            vec!["The remote answered in an unexpected shape. Retrying with the same arguments will not help."]
        }
        ToolError::Lifecycle { .. } => vec![
            "The resource's current state does not allow this action. Fetch it to check its state first.",
        ],
    }
}
