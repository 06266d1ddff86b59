//! Validated-request / shaped-response tools for LLM function-calling agents.
//!
//! `forgehand` is the framework half of the workspace: it knows nothing about
//! any particular remote API. A tool is a name, a description, a typed
//! argument struct whose JSON Schema is derived with `schemars`, and an async
//! handler that turns validated arguments into a small, stable result shape.
//!
//! # A first tool
//!
//! ```ignore
//! use forgehand::prelude::*;
//! use schemars::JsonSchema;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct LookupArgs {
//!     /// Identifier to look up.
//!     #[schemars(range(min = 1))]
//!     id: u64,
//! }
//!
//! #[derive(Serialize)]
//! struct Found {
//!     id: u64,
//!     found: bool,
//! }
//!
//! let tools = ToolSet::new().with(SchemaTool::new(
//!     ToolSpec::builder("lookup", "Look up a record by id"),
//!     |args: LookupArgs| async move { Ok(Found { id: args.id, found: true }) },
//! ));
//!
//! let result = tools.execute("lookup", r#"{"id": 7}"#).await?;
//! ```
//!
//! # Layout
//!
//! | Concern | Item |
//! |---|---|
//! | typed tools | [`SchemaTool`](tools::schema::SchemaTool) |
//! | hand-written tools | [`Tool`](tools::core::Tool) |
//! | model-facing descriptions | [`ToolSpec`](tools::spec::ToolSpec) |
//! | registry and dispatch | [`ToolSet`](tools::core::ToolSet) |
//! | exposing a subset | [`ToolFilter`](tools::filter::ToolFilter) |
//! | failure text for the model | [`tools::reflection`] |
//! | error kinds | [`ToolError`] |

pub mod error;
pub mod prelude;
pub mod tools;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub use error::ToolError;
pub use schemars;

/// The JSON Schema of `T`, as a plain value ready for a [`ToolDef`].
///
/// ```
/// use forgehand::json_schema_for;
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct CloseArgs {
///     number: u64,
///     #[serde(default)]
///     reason: Option<String>,
/// }
///
/// let schema = json_schema_for::<CloseArgs>();
/// assert_eq!(schema["type"], "object");
/// assert!(schema["required"].as_array().unwrap().contains(&"number".into()));
/// ```
pub fn json_schema_for<T: JsonSchema>() -> Value {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(schema) => schema,
        Err(_) => json!({"type": "object", "properties": {}}),
    }
}

/// Discriminator of a [`ToolDef`]; only functions exist on the wire.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToolType {
    Function,
}

/// What the model is shown for one tool, in the function-calling wire
/// format: `{"type": "function", "function": {name, description, parameters}}`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ToolDef {
    #[serde(rename = "type")]
    pub kind: ToolType,
    pub function: FunctionDef,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object.
    pub parameters: Value,
}

impl ToolDef {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        let function = FunctionDef {
            name: name.into(),
            description: description.into(),
            parameters,
        };
        Self {
            kind: ToolType::Function,
            function,
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// One requested call, as emitted by a model or read from a batch file.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ToolInvocation {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_def_serializes_as_function() {
        let def = ToolDef::new("close", "Close a thing", serde_json::json!({"type": "object"}));
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "close");
        assert_eq!(def.name(), "close");
    }

    #[test]
    fn invocation_defaults_missing_arguments_to_null() {
        let call: ToolInvocation = serde_json::from_str(r#"{"name": "list"}"#).unwrap();
        assert_eq!(call.name, "list");
        assert!(call.arguments.is_null());
    }
}
