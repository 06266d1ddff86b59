//! Tool descriptions written for the model.
//!
//! A one-line description is rarely enough for a model to pick between
//! `update_issue` and `close_issue`, or `create_pull_review` and
//! `submit_pull_review`. [`ToolSpec`] carries the purpose plus optional
//! guidance and renders it into the single description string of a
//! [`ToolDef`].
//!
//! Rendered layout, sections present only when set:
//!
//! ```text
//! <purpose>.
//! When to use: ...
//! When NOT to use: ...
//! Returns: ...
//! Examples:
//!   - <call> -> <outcome>
//! Instead:
//!   - <situation>: use '<tool>', <reason>
//! ```

use crate::ToolDef;
use serde_json::{Value, json};

/// Everything the model is told about one tool.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Unique within a `ToolSet`.
    pub name: String,
    /// Imperative, one sentence: "Create an issue in the repository".
    pub purpose: String,
    pub when_to_use: Option<String>,
    pub when_not_to_use: Option<String>,
    /// JSON Schema of the arguments.
    pub parameters: Value,
    /// Shape of the result, e.g. `{number, url, status: "created"}`.
    pub output_format: Option<String>,
    pub examples: Vec<Example>,
    pub alternatives: Vec<Alternative>,
}

/// A sample call and what it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub call: String,
    pub outcome: String,
}

/// A situation where a neighbouring tool is the right choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    pub situation: String,
    pub tool: String,
    pub reason: String,
}

impl ToolSpec {
    pub fn builder(name: impl Into<String>, purpose: impl Into<String>) -> ToolSpecBuilder {
        ToolSpecBuilder {
            spec: ToolSpec {
                name: name.into(),
                purpose: purpose.into(),
                when_to_use: None,
                when_not_to_use: None,
                parameters: Value::Null,
                output_format: None,
                examples: Vec::new(),
                alternatives: Vec::new(),
            },
        }
    }

    /// The description string the model reads.
    pub fn to_description(&self) -> String {
        let mut lines = vec![format!("{}.", self.purpose.trim_end_matches('.'))];

        let labelled = [
            ("When to use", &self.when_to_use),
            ("When NOT to use", &self.when_not_to_use),
            ("Returns", &self.output_format),
        ];
        for (label, text) in labelled {
            if let Some(text) = text {
                lines.push(format!("{label}: {text}"));
            }
        }

        if !self.examples.is_empty() {
            lines.push("Examples:".into());
            lines.extend(
                self.examples
                    .iter()
                    .map(|e| format!("  - {} -> {}", e.call, e.outcome)),
            );
        }
        if !self.alternatives.is_empty() {
            lines.push("Instead:".into());
            lines.extend(
                self.alternatives
                    .iter()
                    .map(|a| format!("  - {}: use '{}', {}", a.situation, a.tool, a.reason)),
            );
        }

        lines.join("\n")
    }

    pub fn to_tool_def(&self) -> ToolDef {
        ToolDef::new(&self.name, self.to_description(), self.parameters.clone())
    }
}

/// Chained construction of a [`ToolSpec`].
#[derive(Debug, Clone)]
pub struct ToolSpecBuilder {
    spec: ToolSpec,
}

impl ToolSpecBuilder {
    pub fn when_to_use(mut self, text: impl Into<String>) -> Self {
        self.spec.when_to_use = Some(text.into());
        self
    }

    pub fn when_not_to_use(mut self, text: impl Into<String>) -> Self {
        self.spec.when_not_to_use = Some(text.into());
        self
    }

    pub fn parameters(mut self, schema: Value) -> Self {
        self.spec.parameters = schema;
        self
    }

    /// Derive the parameter schema from an argument type.
    pub fn parameters_for<T: schemars::JsonSchema>(self) -> Self {
        self.parameters(crate::json_schema_for::<T>())
    }

    pub fn example(mut self, call: impl Into<String>, outcome: impl Into<String>) -> Self {
        self.spec.examples.push(Example {
            call: call.into(),
            outcome: outcome.into(),
        });
        self
    }

    pub fn output_format(mut self, shape: impl Into<String>) -> Self {
        self.spec.output_format = Some(shape.into());
        self
    }

    /// Point the model at `tool` for `situation`.
    pub fn disambiguate(
        mut self,
        situation: impl Into<String>,
        tool: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        self.spec.alternatives.push(Alternative {
            situation: situation.into(),
            tool: tool.into(),
            reason: reason.into(),
        });
        self
    }

    pub fn to_tool_def(self) -> ToolDef {
        self.build().to_tool_def()
    }

    /// Finish the spec. Without parameters the tool takes an empty object.
    pub fn build(mut self) -> ToolSpec {
        if self.spec.parameters.is_null() {
            self.spec.parameters = json!({"type": "object", "properties": {}});
        }
        self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_section_in_order() {
        let desc = ToolSpec::builder("close_issue", "Close an issue by number.")
            .when_to_use("When the work on an issue is finished")
            .when_not_to_use("When editing the title or body")
            .output_format(r#"{number, url, status: "closed"}"#)
            .example("close_issue(number=42)", "Issue #42 closed")
            .disambiguate("Reopening an issue", "update_issue", "close_issue only closes")
            .build()
            .to_description();

        assert_eq!(
            desc,
            "Close an issue by number.\n\
             When to use: When the work on an issue is finished\n\
             When NOT to use: When editing the title or body\n\
             Returns: {number, url, status: \"closed\"}\n\
             Examples:\n  \
             - close_issue(number=42) -> Issue #42 closed\n\
             Instead:\n  \
             - Reopening an issue: use 'update_issue', close_issue only closes"
        );
    }

    #[test]
    fn bare_spec_is_just_the_purpose() {
        let spec = ToolSpec::builder("list_repo_labels", "List labels").build();
        assert_eq!(spec.to_description(), "List labels.");
        assert_eq!(spec.parameters, json!({"type": "object", "properties": {}}));
    }

    #[test]
    fn explicit_parameters_reach_the_definition() {
        let def = ToolSpec::builder("get_branch", "Get one branch")
            .parameters(json!({"type": "object", "properties": {"branch": {"type": "string"}}}))
            .to_tool_def();

        assert_eq!(def.name(), "get_branch");
        assert_eq!(def.function.description, "Get one branch.");
        assert_eq!(def.function.parameters["properties"]["branch"]["type"], "string");
    }
}
