//! Selecting which tools a model gets to see.
//!
//! A catalog of fifty-odd tools is a lot of context for every request. This
//! module narrows it:
//! - Category-based filtering (group tools by resource)
//! - Task-based filtering (select categories matching task keywords)
//! - Read-only mode (drop every tool that mutates remote state)

use crate::tools::core::ToolSet;
use crate::{ToolDef, ToolError};
use std::collections::HashSet;

/// Named group of tools, usually one remote resource.
#[derive(Debug, Clone)]
pub struct ToolCategory {
    pub name: String,
    pub tools: Vec<String>,
    /// Free text matched against task keywords, e.g. "When triaging issues".
    pub when_relevant: String,
}

impl ToolCategory {
    pub fn new(name: impl Into<String>, tools: &[&str], when_relevant: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tools: tools.iter().map(ToString::to_string).collect(),
            when_relevant: when_relevant.into(),
        }
    }

    fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        [&self.name, &self.when_relevant]
            .iter()
            .any(|text| text.to_lowercase().contains(&needle))
    }
}

/// Categories plus the rules for narrowing a [`ToolSet`] with them.
#[derive(Debug, Default, Clone)]
pub struct ToolFilter {
    categories: Vec<ToolCategory>,
    pinned: HashSet<String>,
    max_tools: Option<usize>,
    read_only: bool,
}

impl ToolFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: ToolCategory) -> Self {
        self.categories.push(category);
        self
    }

    /// Keep `tool_name` in every selection, whatever the categories say.
    pub fn with_always_include(mut self, tool_name: impl Into<String>) -> Self {
        self.pinned.insert(tool_name.into());
        self
    }

    /// Cap on [`filter_for_task`](Self::filter_for_task) output.
    pub fn with_max_tools(mut self, max: usize) -> Self {
        self.max_tools = Some(max);
        self
    }

    /// When set, mutation tools never survive a selection.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn categories(&self) -> &[ToolCategory] {
        &self.categories
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&ToolCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Definitions for a task given as keywords, sorted by name.
    ///
    /// A category is picked when any keyword occurs in its name or
    /// `when_relevant` text. Pinned tools always come along. No match at
    /// all means no narrowing.
    pub fn filter_for_task(&self, task_keywords: &[&str], tools: &ToolSet) -> Vec<ToolDef> {
        let mut selected: HashSet<&str> = self.pinned.iter().map(String::as_str).collect();
        let mut matched = false;

        for category in &self.categories {
            if task_keywords.iter().any(|kw| category.matches_keyword(kw)) {
                matched = true;
                selected.extend(category.tools.iter().map(String::as_str));
            }
        }

        let mut filtered: Vec<ToolDef> = tools
            .definitions()
            .into_iter()
            .filter(|d| !matched || selected.contains(d.function.name.as_str()))
            .filter(|d| !(self.read_only && tools.is_mutation_tool(&d.function.name)))
            .collect();

        if let Some(max) = self.max_tools {
            filtered.truncate(max);
        }
        filtered
    }

    /// Restrict a tool set in place to the named categories.
    ///
    /// An empty `category_names` keeps every category. Read-only mode is
    /// applied either way. Unknown category names are a configuration error
    /// and leave the set untouched.
    pub fn restrict(&self, tools: &mut ToolSet, category_names: &[&str]) -> Result<(), ToolError> {
        let mut keep: Option<HashSet<String>> = None;
        if !category_names.is_empty() {
            let mut names = self.pinned.clone();
            for wanted in category_names {
                let category = self.category(wanted).ok_or_else(|| {
                    let known: Vec<&str> = self.categories.iter().map(|c| c.name.as_str()).collect();
                    ToolError::Configuration(format!(
                        "unknown tool category '{wanted}' (known: {})",
                        known.join(", ")
                    ))
                })?;
                names.extend(category.tools.iter().cloned());
            }
            keep = Some(names);
        }

        let read_only = self.read_only;
        tools.retain(|name, is_mutation| {
            let in_category = keep.as_ref().is_none_or(|k| k.contains(name));
            in_category && !(read_only && is_mutation)
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::core::{Tool, ToolFuture};
    use serde_json::json;

    struct Named {
        name: &'static str,
        mutation: bool,
    }

    impl Tool for Named {
        fn definition(&self) -> ToolDef {
            ToolDef::new(self.name, format!("{} tool", self.name), json!({}))
        }

        fn execute(&self, _arguments: &str) -> ToolFuture<'_> {
            Box::pin(async { Ok(json!(null)) })
        }

        fn is_mutation(&self) -> bool {
            self.mutation
        }
    }

    fn tool_set() -> ToolSet {
        [
            ("list_things", false),
            ("create_thing", true),
            ("list_widgets", false),
            ("delete_widget", true),
            ("whoami", false),
        ]
        .into_iter()
        .fold(ToolSet::new(), |set, (name, mutation)| {
            set.with(Named { name, mutation })
        })
    }

    fn filter() -> ToolFilter {
        ToolFilter::new()
            .with_always_include("whoami")
            .with_category(ToolCategory::new(
                "things",
                &["list_things", "create_thing"],
                "When tracking things",
            ))
            .with_category(ToolCategory::new(
                "widgets",
                &["list_widgets", "delete_widget"],
                "When managing widgets",
            ))
    }

    fn names(defs: &[ToolDef]) -> Vec<&str> {
        defs.iter().map(|d| d.function.name.as_str()).collect()
    }

    #[test]
    fn filter_by_keyword() {
        let tools = tool_set();
        let defs = filter().filter_for_task(&["Widgets"], &tools);
        assert_eq!(names(&defs), vec!["delete_widget", "list_widgets", "whoami"]);
    }

    #[test]
    fn no_match_returns_everything() {
        let tools = tool_set();
        let defs = filter().filter_for_task(&["nothing"], &tools);
        assert_eq!(defs.len(), 5);
    }

    #[test]
    fn read_only_and_max_tools() {
        let tools = tool_set();
        let defs = filter()
            .read_only(true)
            .filter_for_task(&["tracking"], &tools);
        assert_eq!(names(&defs), vec!["list_things", "whoami"]);

        let defs = filter().with_max_tools(2).filter_for_task(&[], &tools);
        assert_eq!(defs.len(), 2);
    }

    #[test]
    fn restrict_to_categories() {
        let mut tools = tool_set();
        filter().restrict(&mut tools, &["things"]).unwrap();
        assert_eq!(tools.names(), vec!["create_thing", "list_things", "whoami"]);
    }

    #[test]
    fn restrict_read_only_without_categories() {
        let mut tools = tool_set();
        filter().read_only(true).restrict(&mut tools, &[]).unwrap();
        assert_eq!(tools.names(), vec!["list_things", "list_widgets", "whoami"]);
    }

    #[test]
    fn restrict_unknown_category_fails() {
        let mut tools = tool_set();
        let err = filter().restrict(&mut tools, &["gadgets"]).unwrap_err();
        assert!(matches!(err, ToolError::Configuration(ref m) if m.contains("gadgets")));
        assert_eq!(tools.len(), 5);
    }
}
