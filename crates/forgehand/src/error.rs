//! Error kinds surfaced by tool execution.

use thiserror::Error;

/// Why a tool invocation did not complete.
///
/// `Validation` and `Configuration` are always raised before any remote call
/// is made. The remaining variants describe what happened on the wire.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments failed schema or local constraint checks.
    #[error("invalid arguments: {0}")]
    Validation(String),

    /// Required ambient configuration (credential, owner, repo) is missing
    /// or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The remote answered with a non-success HTTP status.
    #[error("remote returned HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    /// The request never produced an HTTP status (connect failure, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// A success response did not match the expected projection.
    #[error("unexpected response shape: {0}")]
    Decode(String),

    /// The resource's current state does not permit the requested action.
    #[error("{resource} is {state}; cannot {action}")]
    Lifecycle {
        resource: String,
        state: String,
        action: String,
    },

    /// No tool is registered under this name.
    #[error("unknown tool '{0}'")]
    UnknownTool(String),
}

impl ToolError {
    /// Build a remote error from a status code and message.
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        ToolError::Remote {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ToolError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the remote answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the failure was detected locally, before any remote call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ToolError::Validation(_) | ToolError::Configuration(_) | ToolError::UnknownTool(_)
        )
    }

    /// Short machine-readable kind, used in logs and model-facing output.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::Validation(_) => "validation",
            ToolError::Configuration(_) => "configuration",
            ToolError::Remote { .. } => "remote",
            ToolError::Transport(_) => "transport",
            ToolError::Decode(_) => "decode",
            ToolError::Lifecycle { .. } => "lifecycle",
            ToolError::UnknownTool(_) => "unknown_tool",
        }
    }
}
