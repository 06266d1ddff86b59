//! Convenience re-exports for common `forgehand` types.
//!
//! Meant to be glob-imported when defining tools:
//!
//! ```ignore
//! use forgehand::prelude::*;
//! ```

// ── Core types ──────────────────────────────────────────────────────
pub use crate::{ToolDef, ToolError, ToolInvocation, json_schema_for};

// ── Tools ───────────────────────────────────────────────────────────
pub use crate::tools::reflection::format_tool_failure;
pub use crate::tools::spec::{ToolSpec, ToolSpecBuilder};
pub use crate::tools::{
    SchemaTool, Tool, ToolCategory, ToolFilter, ToolFuture, ToolSet, parse_validated,
};
