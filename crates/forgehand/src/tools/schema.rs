//! Typed tools whose arguments are validated against a derived JSON Schema.
//!
//! A [`SchemaTool`] is the immutable pairing of an input schema and an
//! execution function. The schema is generated from the argument type with
//! `schemars`, so the constraints the model sees (required fields, bounds,
//! enumerations, defaults) are exactly the ones enforced here.

use crate::tools::core::{Tool, ToolFuture};
use crate::tools::spec::ToolSpecBuilder;
use crate::{ToolDef, ToolError};
use jsonschema::Validator;
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::warn;

type ErasedHandler =
    Box<dyn Fn(&str) -> Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send>> + Send + Sync>;

/// A tool built from a typed argument struct and an async handler.
///
/// Execution is split in two phases:
///
/// 1. **Validation** (synchronous): the raw arguments are parsed as JSON,
///    checked against the compiled schema, then deserialized into `A`
///    (which applies serde defaults). Any failure is a
///    [`ToolError::Validation`] and the handler is never called.
/// 2. **Execution**: the handler receives `A` and produces a result that is
///    serialized to JSON.
///
/// # Example
///
/// ```ignore
/// #[derive(Deserialize, JsonSchema)]
/// struct CloseArgs {
///     #[schemars(range(min = 1))]
///     number: u64,
/// }
///
/// let tool = SchemaTool::new(
///     ToolSpec::builder("close_thing", "Close a thing by number"),
///     |args: CloseArgs| async move { Ok(json!({ "number": args.number, "status": "closed" })) },
/// )
/// .mutation(true);
/// ```
pub struct SchemaTool {
    def: ToolDef,
    handler: ErasedHandler,
    mutation: bool,
}

impl SchemaTool {
    /// Create a tool from a spec and a typed async handler.
    ///
    /// The spec's parameters are replaced by the schema derived from `A`.
    pub fn new<A, O, F, Fut>(spec: ToolSpecBuilder, handler: F) -> Self
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
        O: Serialize + Send + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, ToolError>> + Send + 'static,
    {
        let def = spec.parameters_for::<A>().to_tool_def();
        let validator = compile_schema(&def).map(Arc::new);
        let tool_name = def.function.name.clone();

        let erased = move |raw: &str| -> Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send>> {
            let args: A = match parse_validated(validator.as_deref(), &tool_name, raw) {
                Ok(a) => a,
                Err(e) => return Box::pin(async move { Err(e) }),
            };
            let fut = handler(args);
            let tool_name = tool_name.clone();
            Box::pin(async move {
                let output = fut.await?;
                serde_json::to_value(output).map_err(|e| {
                    ToolError::Decode(format!("failed to serialize result of '{tool_name}': {e}"))
                })
            })
        };

        Self {
            def,
            handler: Box::new(erased),
            mutation: false,
        }
    }

    /// Flag the tool as changing remote state; read-only filters drop it.
    pub fn mutation(mut self, is_mutation: bool) -> Self {
        self.mutation = is_mutation;
        self
    }
}

impl Tool for SchemaTool {
    fn definition(&self) -> ToolDef {
        self.def.clone()
    }

    fn execute(&self, arguments: &str) -> ToolFuture<'_> {
        (self.handler)(arguments)
    }

    fn is_mutation(&self) -> bool {
        self.mutation
    }
}

impl fmt::Debug for SchemaTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaTool")
            .field("name", &self.def.function.name)
            .field("mutation", &self.mutation)
            .finish()
    }
}

fn compile_schema(def: &ToolDef) -> Option<Validator> {
    match jsonschema::validator_for(&def.function.parameters) {
        Ok(v) => Some(v),
        Err(e) => {
            // Typed deserialization still rejects malformed input.
            warn!(
                "Schema for tool '{}' did not compile, falling back to typed parsing only: {e}",
                def.function.name
            );
            None
        }
    }
}

/// Parse, schema-check and deserialize raw tool arguments.
///
/// An empty string or JSON `null` is treated as `{}` so tools whose
/// arguments are all optional can be called without any.
pub fn parse_validated<A: DeserializeOwned>(
    validator: Option<&Validator>,
    tool_name: &str,
    arguments: &str,
) -> Result<A, ToolError> {
    let value: Value = if arguments.trim().is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_str(arguments).map_err(|e| {
            ToolError::Validation(format!("arguments for '{tool_name}' are not valid JSON: {e}"))
        })?
    };
    let value = if value.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        value
    };

    if let Some(validator) = validator {
        let errors: Vec<String> = validator
            .iter_errors(&value)
            .map(|e| {
                let path = e.instance_path().to_string();
                if path.is_empty() {
                    e.to_string()
                } else {
                    format!("{path}: {e}")
                }
            })
            .collect();
        if !errors.is_empty() {
            return Err(ToolError::Validation(errors.join("; ")));
        }
    }

    serde_json::from_value(value).map_err(|e| ToolError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::spec::ToolSpec;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Deserialize, JsonSchema, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    enum Color {
        Red,
        Blue,
    }

    fn default_limit() -> u32 {
        20
    }

    #[derive(Deserialize, JsonSchema)]
    struct PaintArgs {
        /// Target name.
        #[schemars(length(min = 1))]
        name: String,
        #[schemars(range(min = 1, max = 100))]
        #[serde(default = "default_limit")]
        limit: u32,
        #[serde(default)]
        color: Option<Color>,
    }

    #[derive(Serialize)]
    struct Painted {
        name: String,
        limit: u32,
        color: Option<Color>,
    }

    fn paint_tool(calls: Arc<AtomicUsize>) -> SchemaTool {
        SchemaTool::new(
            ToolSpec::builder("paint", "Paint a thing"),
            move |args: PaintArgs| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    Ok(Painted {
                        name: args.name,
                        limit: args.limit,
                        color: args.color,
                    })
                }
            },
        )
    }

    #[test]
    fn definition_uses_derived_schema() {
        let tool = paint_tool(Arc::new(AtomicUsize::new(0)));
        let def = tool.definition();
        assert_eq!(def.function.name, "paint");
        let params = &def.function.parameters;
        assert_eq!(params["type"], "object");
        assert_eq!(params["required"], json!(["name"]));
        assert_eq!(params["properties"]["limit"]["maximum"], json!(100.0));
        assert!(!tool.is_mutation());
        assert!(tool.mutation(true).is_mutation());
    }

    #[tokio::test]
    async fn applies_defaults() {
        let calls = Arc::new(AtomicUsize::new(0));
        let tool = paint_tool(calls.clone());
        let out = tool.execute(r#"{"name": "fence"}"#).await.unwrap();
        assert_eq!(out, json!({"name": "fence", "limit": 20, "color": null}));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejects_before_handler_runs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let tool = paint_tool(calls.clone());

        for bad in [
            r#"{}"#,
            r#"{"name": ""}"#,
            r#"{"name": "fence", "limit": 101}"#,
            r#"{"name": "fence", "limit": 0}"#,
            r#"{"name": "fence", "color": "green"}"#,
            r#"{"name": 5}"#,
            "not json",
        ] {
            let err = tool.execute(bad).await.unwrap_err();
            assert!(matches!(err, ToolError::Validation(_)), "{bad}: {err}");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn enum_values_round_trip() {
        let tool = paint_tool(Arc::new(AtomicUsize::new(0)));
        let out = tool
            .execute(r#"{"name": "door", "color": "blue", "limit": 100}"#)
            .await
            .unwrap();
        assert_eq!(out["color"], "blue");
        assert_eq!(out["limit"], 100);
    }

    #[test]
    fn empty_and_null_arguments_mean_no_arguments() {
        #[derive(Deserialize, JsonSchema)]
        struct NoArgs {
            #[serde(default = "default_limit")]
            limit: u32,
        }
        let parsed: NoArgs = parse_validated(None, "t", "").unwrap();
        assert_eq!(parsed.limit, 20);
        let parsed: NoArgs = parse_validated(None, "t", "null").unwrap();
        assert_eq!(parsed.limit, 20);
    }
}
