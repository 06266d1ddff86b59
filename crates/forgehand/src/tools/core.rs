//! The [`Tool`] trait and the [`ToolSet`] registry.
//!
//! A tool is a definition (what the model sees) plus an async `execute`
//! over the raw JSON argument string. The registry maps names to tools,
//! exports definitions and dispatches calls, singly or as a concurrent
//! batch.

use crate::tools::reflection::format_tool_failure;
use crate::{ToolDef, ToolError, ToolInvocation};
use futures::future::join_all;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Rendered results longer than this many bytes are cut for the model.
pub const DEFAULT_MAX_RESULT_BYTES: usize = 30_000;

/// What [`Tool::execute`] returns. Boxed so `Tool` stays object safe.
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send + 'a>>;

// ── Tool trait ─────────────────────────────────────────────────────

/// One callable operation.
///
/// Most tools are [`SchemaTool`](super::SchemaTool)s; implement this
/// directly only when the arguments cannot be described by a type.
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDef;

    /// Run with the raw JSON argument string as produced by the model.
    fn execute(&self, arguments: &str) -> ToolFuture<'_>;

    fn name(&self) -> String {
        self.definition().function.name
    }

    /// Whether a call changes remote state.
    fn is_mutation(&self) -> bool {
        false
    }
}

// ── ToolSet ────────────────────────────────────────────────────────

struct Registered {
    tool: Box<dyn Tool>,
    mutation: bool,
}

/// Tools by name.
///
/// Built once, then only read, so one set can serve concurrent calls.
///
/// ```ignore
/// let tools = ToolSet::new().with(lookup_tool).with(close_tool);
/// let shaped = tools.execute("lookup", r#"{"id": 3}"#).await?;
/// let for_model = tools.execute_for_model("close", r#"{"id": 3}"#).await;
/// ```
pub struct ToolSet {
    tools: BTreeMap<String, Registered>,
    max_result_bytes: usize,
}

impl fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSet")
            .field("tools", &self.names())
            .field("max_result_bytes", &self.max_result_bytes)
            .finish()
    }
}

impl ToolSet {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
            max_result_bytes: DEFAULT_MAX_RESULT_BYTES,
        }
    }

    /// Byte budget for [`execute_for_model`](Self::execute_for_model).
    pub fn with_max_result_bytes(mut self, max: usize) -> Self {
        self.max_result_bytes = max;
        self
    }

    /// Add a tool. A second tool with the same name replaces the first.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name();
        let entry = Registered {
            mutation: tool.is_mutation(),
            tool: Box::new(tool),
        };
        if self.tools.insert(name.clone(), entry).is_some() {
            warn!("Tool {name} registered twice; keeping the latest");
        }
    }

    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        self.register(tool);
        self
    }

    /// Drop every tool for which `keep(name, is_mutation)` is false.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, bool) -> bool) {
        self.tools.retain(|name, entry| keep(name, entry.mutation));
    }

    /// Definitions in name order.
    pub fn definitions(&self) -> Vec<ToolDef> {
        self.tools.values().map(|e| e.tool.definition()).collect()
    }

    pub fn definition(&self, name: &str) -> Option<ToolDef> {
        self.tools.get(name).map(|e| e.tool.definition())
    }

    /// Names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn is_mutation_tool(&self, name: &str) -> bool {
        self.tools.get(name).is_some_and(|e| e.mutation)
    }

    /// Run one call.
    ///
    /// An unknown name is [`ToolError::UnknownTool`]. Arguments are
    /// validated by the tool itself, before anything leaves the process.
    pub async fn execute(&self, name: &str, arguments: &str) -> Result<Value, ToolError> {
        let entry = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        log_tool_call(name, arguments);
        let start = Instant::now();
        let result = entry.tool.execute(arguments).await;
        let elapsed_ms = start.elapsed().as_millis();

        match &result {
            Ok(value) => {
                debug!("Tool {name} completed in {elapsed_ms}ms");
                trace!("Tool {name} result: {value}");
            }
            Err(e) => info!("Tool {name} failed after {elapsed_ms}ms ({}): {e}", e.kind()),
        }
        result
    }

    /// Run independent calls concurrently. Results are in input order and
    /// one failure does not affect the rest.
    pub async fn execute_batch(&self, calls: &[ToolInvocation]) -> Vec<Result<Value, ToolError>> {
        let arguments: Vec<String> = calls.iter().map(|c| c.arguments.to_string()).collect();
        join_all(
            calls
                .iter()
                .zip(&arguments)
                .map(|(call, args)| self.execute(&call.name, args)),
        )
        .await
    }

    /// Run one call and render the outcome as text for the model: pretty
    /// JSON on success (cut to the byte budget), otherwise an
    /// `Error from tool ...` block with recovery hints.
    pub async fn execute_for_model(&self, name: &str, arguments: &str) -> String {
        match self.execute(name, arguments).await {
            Ok(value) => {
                let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
                truncate_result(text, self.max_result_bytes)
            }
            Err(e) => format_tool_failure(name, arguments, &e),
        }
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        Self::new()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

const ARGUMENT_PREVIEW_CHARS: usize = 120;

/// `info!` a call with its arguments cut to a short preview; the full
/// arguments go to `trace!`.
pub fn log_tool_call(name: &str, arguments: &str) {
    let mut preview: String = arguments.chars().take(ARGUMENT_PREVIEW_CHARS).collect();
    if arguments.chars().count() > ARGUMENT_PREVIEW_CHARS {
        preview.push_str("...");
    }
    info!("[tool] {name}({preview})");
    trace!("[tool] {name} arguments: {arguments}");
}

/// Cut `s` to at most `max` bytes on a character boundary and note the
/// original size.
pub fn truncate_result(mut s: String, max: usize) -> String {
    if s.len() <= max {
        return s;
    }
    let total = s.len();
    let cut = (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    s.truncate(cut);
    format!("{s}...\n[truncated: {total} bytes total]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns `{"echo": <text>}`; requires `text`.
    struct Echo;

    impl Tool for Echo {
        fn definition(&self) -> ToolDef {
            ToolDef::new(
                "echo",
                "Echo the text back",
                json!({"type": "object", "properties": {"text": {"type": "string"}}, "required": ["text"]}),
            )
        }

        fn execute(&self, arguments: &str) -> ToolFuture<'_> {
            let parsed = serde_json::from_str::<Value>(arguments);
            Box::pin(async move {
                let args = parsed.map_err(|e| ToolError::Validation(e.to_string()))?;
                let text = args
                    .get("text")
                    .ok_or_else(|| ToolError::Validation("text is required".into()))?;
                Ok(json!({"echo": text}))
            })
        }
    }

    /// A mutating tool that counts its calls.
    struct Bump(Arc<AtomicUsize>);

    impl Tool for Bump {
        fn definition(&self) -> ToolDef {
            ToolDef::new("bump", "Increment a counter", json!({"type": "object"}))
        }

        fn execute(&self, _arguments: &str) -> ToolFuture<'_> {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            Box::pin(async move { Ok(json!({"count": n})) })
        }

        fn is_mutation(&self) -> bool {
            true
        }
    }

    /// Returns a 200-character payload.
    struct Wide;

    impl Tool for Wide {
        fn definition(&self) -> ToolDef {
            ToolDef::new("wide", "Return a long payload", json!({"type": "object"}))
        }

        fn execute(&self, _arguments: &str) -> ToolFuture<'_> {
            Box::pin(async { Ok(json!({"payload": "x".repeat(200)})) })
        }
    }

    fn all_three() -> ToolSet {
        ToolSet::new()
            .with(Wide)
            .with(Echo)
            .with(Bump(Arc::new(AtomicUsize::new(0))))
    }

    #[test]
    fn names_and_definitions_are_sorted() {
        let set = all_three();
        let names: Vec<String> = set.definitions().into_iter().map(|d| d.function.name).collect();
        assert_eq!(names, ["bump", "echo", "wide"]);
        assert_eq!(set.names(), names);
        assert_eq!(set.len(), 3);
        assert_eq!(Echo.name(), "echo");
    }

    #[tokio::test]
    async fn dispatches_by_name() {
        let set = all_three();
        let out = set.execute("echo", r#"{"text": "hi"}"#).await.unwrap();
        assert_eq!(out, json!({"echo": "hi"}));

        let err = set.execute("nope", "{}").await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(ref n) if n == "nope"));
    }

    #[tokio::test]
    async fn batch_keeps_order_and_isolates_failures() {
        let set = all_three();
        let results = set
            .execute_batch(&[
                ToolInvocation::new("echo", json!({"text": "a"})),
                ToolInvocation::new("echo", json!({})),
                ToolInvocation::new("bump", json!({})),
            ])
            .await;
        assert_eq!(results[0].as_ref().unwrap()["echo"], "a");
        assert!(matches!(results[1], Err(ToolError::Validation(_))));
        assert_eq!(results[2].as_ref().unwrap()["count"], 1);
    }

    #[tokio::test]
    async fn model_text_is_truncated_or_reflected() {
        let set = all_three().with_max_result_bytes(50);
        let text = set.execute_for_model("wide", "{}").await;
        assert!(text.ends_with("bytes total]"));

        let text = set.execute_for_model("echo", "{}").await;
        assert!(text.starts_with("Error from tool 'echo' (validation)"));
    }

    #[test]
    fn retain_sees_mutation_flag() {
        let mut set = all_three();
        assert!(set.is_mutation_tool("bump"));
        assert!(!set.is_mutation_tool("echo"));

        set.retain(|_, mutation| !mutation);
        assert_eq!(set.names(), ["echo", "wide"]);
        assert!(!set.contains("bump"));
        assert!(!set.is_mutation_tool("bump"));
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate_result("short".into(), 10), "short");

        let cut = truncate_result("é".repeat(10), 5);
        assert!(cut.starts_with("éé..."));
        assert!(cut.ends_with("[truncated: 20 bytes total]"));
    }
}
