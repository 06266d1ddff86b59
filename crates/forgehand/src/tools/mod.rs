//! Tools, their registry and the pieces around them.
//!
//! A [`Tool`] is a definition plus an async `execute`. Most are built as a
//! [`SchemaTool`] from a typed argument struct, whose derived JSON Schema
//! gates every call before the handler runs. Descriptions come from
//! [`ToolSpec`](spec::ToolSpec). A [`ToolSet`] dispatches by name and a
//! [`ToolFilter`] narrows it by category, task keywords or read-only mode.
//! Failures are rendered for the model by [`reflection`].

pub mod core;
pub mod filter;
pub mod reflection;
pub mod schema;
pub mod spec;

pub use core::{DEFAULT_MAX_RESULT_BYTES, Tool, ToolFuture, ToolSet, truncate_result};
pub use filter::{ToolCategory, ToolFilter};
pub use schema::{SchemaTool, parse_validated};
pub use spec::{ToolSpec, ToolSpecBuilder};
