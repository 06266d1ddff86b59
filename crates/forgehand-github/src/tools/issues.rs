//! Issue tools: create, list, update, close.

use forgehand::tools::SchemaTool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::args::{self, Direction, OpenState, StateFilter};
use super::shape::{ItemList, RemoteNumbered, Status};
use super::{ForgeContext, ForgeToolKind};
use crate::filter::KeywordFilter;

// ── Arguments ───────────────────────────────────────────────────────

#[derive(Deserialize, JsonSchema, Debug)]
pub struct CreateIssueArgs {
    /// Issue title.
    #[schemars(length(min = 1))]
    pub title: String,
    /// Markdown body.
    #[serde(default)]
    pub body: Option<String>,
    /// Label names to apply.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Logins to assign.
    #[serde(default)]
    pub assignees: Option<Vec<String>>,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueSort {
    Created,
    Updated,
    Comments,
}

fn created() -> IssueSort {
    IssueSort::Created
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ListIssuesArgs {
    /// Issue status to list.
    #[serde(default = "args::open")]
    pub state: StateFilter,
    /// Keep only issues whose title or body contains this word
    /// (case-insensitive). Use sparingly, only when asked for issues about a
    /// topic, and keep it to one word.
    #[serde(default)]
    pub keyword: Option<String>,
    /// Only issues carrying all of these labels. Not every issue about a
    /// subject carries a label of that name; use this when a specific label
    /// is asked for.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Only issues that mention this login.
    #[serde(default)]
    pub mentioned: Option<String>,
    /// Only issues assigned to this login. Use "@" for the repository
    /// owner, "none" for unassigned issues and "*" for assigned to anyone.
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default = "created")]
    pub sort: IssueSort,
    #[serde(default = "args::desc")]
    pub direction: Direction,
    /// Page size.
    #[schemars(range(min = 1, max = 100))]
    #[serde(default = "args::limit_20")]
    pub limit: u32,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct UpdateIssueArgs {
    /// Issue number.
    #[schemars(range(min = 1))]
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Replaces the issue's labels.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Replaces the issue's assignees.
    #[serde(default)]
    pub assignees: Option<Vec<String>>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct IssueNumberArgs {
    /// Issue number.
    #[schemars(range(min = 1))]
    pub number: u64,
}

// ── Wire types ──────────────────────────────────────────────────────

/// Body for create and update. Only provided fields are sent.
#[derive(Serialize, Default)]
struct IssueFields<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignees: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<OpenState>,
}

#[derive(Serialize)]
struct IssueQuery<'a> {
    state: StateFilter,
    mentioned: Option<&'a str>,
    assignee: Option<String>,
    sort: IssueSort,
    direction: Direction,
    per_page: u32,
    labels: Option<&'a [String]>,
}

/// A label as it appears on an issue: either a bare name or an object.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum LabelRef {
    Name(String),
    Object { name: Option<String> },
}

impl LabelRef {
    fn into_name(self) -> Option<String> {
        match self {
            LabelRef::Name(name) => Some(name),
            LabelRef::Object { name } => name,
        }
    }
}

#[derive(Deserialize, Debug)]
struct RemoteIssue {
    number: u64,
    title: Option<String>,
    body: Option<String>,
    html_url: Option<String>,
    #[serde(default)]
    labels: Vec<LabelRef>,
}

// ── Results ─────────────────────────────────────────────────────────

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IssueItem {
    pub number: u64,
    pub title: Option<String>,
    pub url: Option<String>,
    pub labels: Vec<String>,
}

// ── Tools ───────────────────────────────────────────────────────────

pub fn create_issue(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::CreateIssue;
    ctx.tool(
        kind,
        kind.spec("Create an issue in the configured repository")
            .when_to_use("When asked to file, open or report a new issue")
            .when_not_to_use("When changing an existing issue; use update_issue instead")
            .output_format(r#"{number, url, status: "created"}"#),
        move |ctx, args: CreateIssueArgs| async move {
            let fields = IssueFields {
                title: Some(args.title.as_str()),
                body: args.body.as_deref(),
                labels: args.labels.as_deref(),
                assignees: args.assignees.as_deref(),
                state: None,
            };
            let req = ctx.request(kind)?.body(&fields)?;
            let issue: RemoteNumbered = ctx.fetch(req).await?;
            Ok(issue.into_change(Status::Created))
        },
    )
}

pub fn list_issues(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ListIssues;
    ctx.tool(
        kind,
        kind.spec("List or search issues in the configured repository")
            .when_to_use("When asked which issues exist, or for issues about a topic, label or person")
            .when_not_to_use("When the issue number is already known and only its comments are needed; use list_issue_comments")
            .output_format("{items: [{number, title, url, labels}]}. Display issues as #{number}. {title}")
            .example(r#"list_issues(keyword="login", state="all")"#, "Issues mentioning login, open or closed"),
        move |ctx, args: ListIssuesArgs| async move {
            let mut req = ctx.request(kind)?;
            let assignee = match args.assignee.as_deref() {
                Some("@") => ctx.config().owner.clone(),
                other => other.map(str::to_string),
            };
            req = req.query(&IssueQuery {
                state: args.state,
                mentioned: args.mentioned.as_deref(),
                assignee,
                sort: args.sort,
                direction: args.direction,
                per_page: args.limit,
                labels: args.labels.as_deref(),
            })?;

            let issues: Vec<RemoteIssue> = ctx.fetch(req).await?;
            let issues = KeywordFilter::new(args.keyword.as_deref())
                .apply(issues, |i| [i.title.as_deref(), i.body.as_deref()]);

            Ok(issues
                .into_iter()
                .map(|i| IssueItem {
                    number: i.number,
                    title: i.title,
                    url: i.html_url,
                    labels: i.labels.into_iter().filter_map(LabelRef::into_name).collect(),
                })
                .collect::<ItemList<_>>())
        },
    )
}

pub fn update_issue(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::UpdateIssue;
    ctx.tool(
        kind,
        kind.spec("Update the title, body, labels or assignees of an issue")
            .when_to_use(
                "When asked to edit an issue. If no issue number was given, list issues first \
                 and ask which one",
            )
            .when_not_to_use("When closing an issue; use close_issue instead")
            .output_format(r#"{number, url, status: "updated"}"#),
        move |ctx, args: UpdateIssueArgs| async move {
            let fields = IssueFields {
                title: args.title.as_deref(),
                body: args.body.as_deref(),
                labels: args.labels.as_deref(),
                assignees: args.assignees.as_deref(),
                state: None,
            };
            let req = ctx
                .request(kind)?
                .param("issue_number", args.number)
                .body(&fields)?;
            let issue: RemoteNumbered = ctx.fetch(req).await?;
            Ok(issue.into_change(Status::Updated))
        },
    )
}

pub fn close_issue(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::CloseIssue;
    ctx.tool(
        kind,
        kind.spec("Close an issue")
            .when_to_use(
                "When an issue is resolved or should be closed. If no issue number was given, \
                 list issues first and ask which one",
            )
            .when_not_to_use("When reopening or editing an issue; use update_issue")
            .output_format(r#"{number, url, status: "closed"}"#),
        move |ctx, args: IssueNumberArgs| async move {
            let fields = IssueFields {
                state: Some(OpenState::Closed),
                ..IssueFields::default()
            };
            let req = ctx
                .request(kind)?
                .param("issue_number", args.number)
                .body(&fields)?;
            let issue: RemoteNumbered = ctx.fetch(req).await?;
            Ok(issue.into_change(Status::Closed))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use forgehand::ToolError;
    use crate::tools::testing::{mock_ctx, run};
    use serde_json::json;

    #[tokio::test]
    async fn create_sends_only_provided_fields() {
        let (mock, ctx) = mock_ctx();
        mock.reply(
            ForgeToolKind::CreateIssue.route(),
            201,
            json!({"number": 12, "html_url": "https://github.com/octo/hello/issues/12", "node_id": "x"}),
        );

        let out = run(&ctx, ForgeToolKind::CreateIssue, json!({"title": "Crash on start"}))
            .await
            .unwrap();
        assert_eq!(
            out,
            json!({"number": 12, "url": "https://github.com/octo/hello/issues/12", "status": "created"})
        );

        let calls = mock.calls();
        assert_eq!(calls[0].path().unwrap(), "/repos/octo/hello/issues");
        assert_eq!(calls[0].body, Some(json!({"title": "Crash on start"})));
    }

    #[tokio::test]
    async fn create_without_title_never_calls_remote() {
        let (mock, ctx) = mock_ctx();
        for args in [json!({}), json!({"title": ""}), json!({"body": "no title"})] {
            let err = run(&ctx, ForgeToolKind::CreateIssue, args).await.unwrap_err();
            assert!(matches!(err, ToolError::Validation(_)));
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn list_defaults_and_query() {
        let (mock, ctx) = mock_ctx();
        mock.reply(ForgeToolKind::ListIssues.route(), 200, json!([]));

        run(
            &ctx,
            ForgeToolKind::ListIssues,
            json!({"labels": ["bug", "ui"], "assignee": "@"}),
        )
        .await
        .unwrap();

        let req = &mock.calls()[0];
        assert_eq!(req.query_value("state"), Some("open"));
        assert_eq!(req.query_value("sort"), Some("created"));
        assert_eq!(req.query_value("direction"), Some("desc"));
        assert_eq!(req.query_value("per_page"), Some("20"));
        assert_eq!(req.query_value("labels"), Some("bug,ui"));
        assert_eq!(req.query_value("assignee"), Some("octo"));
        assert_eq!(req.query_value("mentioned"), None);
    }

    #[tokio::test]
    async fn list_keeps_keyword_matches_and_flattens_labels() {
        let (mock, ctx) = mock_ctx();
        mock.reply(
            ForgeToolKind::ListIssues.route(),
            200,
            json!([
                {"number": 1, "title": "Fix login bug", "body": null, "html_url": "u1",
                 "labels": [{"name": "bug", "color": "d73a4a"}, "urgent"]},
                {"number": 2, "title": "Update docs", "body": "typo", "html_url": "u2", "labels": []}
            ]),
        );

        let out = run(&ctx, ForgeToolKind::ListIssues, json!({"keyword": "BUG"}))
            .await
            .unwrap();
        assert_eq!(
            out,
            json!({"items": [{"number": 1, "title": "Fix login bug", "url": "u1", "labels": ["bug", "urgent"]}]})
        );
    }

    #[tokio::test]
    async fn list_limit_over_max_is_rejected() {
        let (mock, ctx) = mock_ctx();
        let err = run(&ctx, ForgeToolKind::ListIssues, json!({"limit": 101}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
        let err = run(&ctx, ForgeToolKind::ListIssues, json!({"state": "merged"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn update_and_close() {
        let (mock, ctx) = mock_ctx();
        let route = ForgeToolKind::UpdateIssue.route();
        mock.reply(route, 200, json!({"number": 4, "html_url": "u4"}));

        let out = run(&ctx, ForgeToolKind::UpdateIssue, json!({"number": 4, "labels": []}))
            .await
            .unwrap();
        assert_eq!(out["status"], "updated");

        let out = run(&ctx, ForgeToolKind::CloseIssue, json!({"number": 4}))
            .await
            .unwrap();
        assert_eq!(out, json!({"number": 4, "url": "u4", "status": "closed"}));

        let calls = mock.calls_to(route);
        assert_eq!(calls[0].body, Some(json!({"labels": []})));
        assert_eq!(calls[1].path().unwrap(), "/repos/octo/hello/issues/4");
        assert_eq!(calls[1].body, Some(json!({"state": "closed"})));
    }

    #[tokio::test]
    async fn remote_errors_propagate() {
        let (mock, ctx) = mock_ctx();
        mock.fail(ForgeToolKind::CloseIssue.route(), 404, "Not Found");
        let err = run(&ctx, ForgeToolKind::CloseIssue, json!({"number": 999}))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
