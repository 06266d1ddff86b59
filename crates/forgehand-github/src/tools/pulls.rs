//! Pull request tools.
//!
//! `check_pull_merged` and `merge_pull` share an endpoint: GET answers the
//! question (404 means not merged), PUT performs the merge.

use forgehand::tools::SchemaTool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::args::{self, Direction, OpenState, PerPage, StateFilter};
use super::shape::{ItemList, RemoteNumbered, RemoteRef, RemoteUser, Status, login, ref_name};
use super::{ForgeContext, ForgeToolKind};
use crate::filter::KeywordFilter;

// ── Arguments ───────────────────────────────────────────────────────

#[derive(Deserialize, JsonSchema, Debug)]
pub struct CreatePullArgs {
    #[schemars(length(min = 1))]
    pub title: String,
    /// Branch containing the changes. Use "user:branch" for forks.
    #[schemars(length(min = 1))]
    pub head: String,
    /// Branch to merge into.
    #[schemars(length(min = 1))]
    pub base: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub draft: Option<bool>,
    #[serde(default)]
    pub maintainer_can_modify: Option<bool>,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PullSort {
    Created,
    Updated,
    Popularity,
    #[serde(rename = "long-running")]
    LongRunning,
}

fn created() -> PullSort {
    PullSort::Created
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ListPullsArgs {
    #[serde(default = "args::open")]
    pub state: StateFilter,
    /// Filter by head as "user:branch".
    #[serde(default)]
    pub head: Option<String>,
    /// Filter by base branch.
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default = "created")]
    pub sort: PullSort,
    #[serde(default = "args::desc")]
    pub direction: Direction,
    /// Page size.
    #[schemars(range(min = 1, max = 100))]
    #[serde(default = "args::limit_20")]
    pub limit: u32,
    /// One word; keeps pull requests whose title or body contains it.
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct PullNumberArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct UpdatePullArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub state: Option<OpenState>,
    /// New base branch.
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub maintainer_can_modify: Option<bool>,
    #[serde(default)]
    pub draft: Option<bool>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ListPullCommitsArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    /// Page size.
    #[schemars(range(min = 1, max = 250))]
    #[serde(default = "args::limit_100")]
    pub limit: u32,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ListPullFilesArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    /// Page size.
    #[schemars(range(min = 1, max = 300))]
    #[serde(default = "args::limit_100")]
    pub limit: u32,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    Merge,
    Squash,
    Rebase,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct MergePullArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    #[serde(default)]
    pub commit_title: Option<String>,
    #[serde(default)]
    pub commit_message: Option<String>,
    #[serde(default)]
    pub merge_method: Option<MergeMethod>,
    /// Merge only if the head is still at this SHA.
    #[serde(default)]
    pub sha: Option<String>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct UpdatePullBranchArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    /// Update only if the head is still at this SHA.
    #[serde(default)]
    pub expected_head_sha: Option<String>,
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Serialize, Default)]
struct PullFields<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    head: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<OpenState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    draft: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maintainer_can_modify: Option<bool>,
}

#[derive(Serialize)]
struct PullQuery<'a> {
    state: StateFilter,
    head: Option<&'a str>,
    base: Option<&'a str>,
    sort: PullSort,
    direction: Direction,
    per_page: u32,
}

#[derive(Serialize)]
struct MergeBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    commit_title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commit_message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merge_method: Option<MergeMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Serialize)]
struct UpdateBranchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    expected_head_sha: Option<&'a str>,
}

#[derive(Deserialize, Debug)]
struct RemotePull {
    number: u64,
    title: Option<String>,
    body: Option<String>,
    html_url: Option<String>,
    state: Option<String>,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    merged: bool,
    head: Option<RemoteRef>,
    base: Option<RemoteRef>,
    user: Option<RemoteUser>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RemoteGitAuthor {
    name: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RemoteGitCommit {
    author: Option<RemoteGitAuthor>,
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RemotePullCommit {
    sha: String,
    author: Option<RemoteUser>,
    commit: Option<RemoteGitCommit>,
    html_url: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RemotePullFile {
    filename: String,
    status: Option<String>,
    additions: Option<u64>,
    deletions: Option<u64>,
    changes: Option<u64>,
    blob_url: Option<String>,
    raw_url: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RemoteMergeResult {
    #[serde(default)]
    merged: bool,
    message: Option<String>,
    sha: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RemoteMessage {
    message: Option<String>,
}

// ── Results ─────────────────────────────────────────────────────────

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PullItem {
    pub number: u64,
    pub title: Option<String>,
    pub url: Option<String>,
    pub state: Option<String>,
    pub draft: bool,
    pub head: Option<String>,
    pub base: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PullDetail {
    pub number: u64,
    pub title: Option<String>,
    pub url: Option<String>,
    pub state: Option<String>,
    pub draft: bool,
    pub merged: bool,
    pub head: Option<String>,
    pub base: Option<String>,
    pub user: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub body: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CommitItem {
    pub sha: String,
    pub author: Option<String>,
    pub message: String,
    pub html_url: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FileItem {
    pub filename: String,
    pub status: Option<String>,
    pub additions: Option<u64>,
    pub deletions: Option<u64>,
    pub changes: Option<u64>,
    pub blob_url: Option<String>,
    pub raw_url: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MergedCheck {
    pub number: u64,
    pub merged: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PullMerge {
    pub number: u64,
    pub merged: bool,
    pub message: Option<String>,
    pub sha: Option<String>,
    pub status: Status,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BranchUpdate {
    pub number: u64,
    pub status: Status,
    pub message: String,
}

// ── Tools ───────────────────────────────────────────────────────────

pub fn create_pull(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::CreatePull;
    ctx.tool(
        kind,
        kind.spec("Open a pull request")
            .when_to_use("When asked to propose merging one branch into another")
            .example(
                r#"create_pull(title="Fix login", head="fix-login", base="main")"#,
                "A pull request from fix-login into main",
            )
            .output_format(r#"{number, url, status: "created"}"#),
        move |ctx, args: CreatePullArgs| async move {
            let fields = PullFields {
                title: Some(args.title.as_str()),
                head: Some(args.head.as_str()),
                base: Some(args.base.as_str()),
                body: args.body.as_deref(),
                draft: args.draft,
                maintainer_can_modify: args.maintainer_can_modify,
                state: None,
            };
            let req = ctx.request(kind)?.body(&fields)?;
            let pull: RemoteNumbered = ctx.fetch(req).await?;
            Ok(pull.into_change(Status::Created))
        },
    )
}

pub fn list_pulls(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ListPulls;
    ctx.tool(
        kind,
        kind.spec("List or search pull requests in the repository")
            .when_not_to_use("When the number is known; use get_pull")
            .output_format(
                "{items: [{number, title, url, state, draft, head, base}]}. \
                 Display pull requests as #{number}. {title}",
            ),
        move |ctx, args: ListPullsArgs| async move {
            let req = ctx.request(kind)?.query(&PullQuery {
                state: args.state,
                head: args.head.as_deref(),
                base: args.base.as_deref(),
                sort: args.sort,
                direction: args.direction,
                per_page: args.limit,
            })?;
            let pulls: Vec<RemotePull> = ctx.fetch(req).await?;
            let pulls = KeywordFilter::new(args.keyword.as_deref())
                .apply(pulls, |p| [p.title.as_deref(), p.body.as_deref()]);
            Ok(pulls
                .into_iter()
                .map(|p| PullItem {
                    number: p.number,
                    title: p.title,
                    url: p.html_url,
                    state: p.state,
                    draft: p.draft,
                    head: ref_name(p.head),
                    base: ref_name(p.base),
                })
                .collect::<ItemList<_>>())
        },
    )
}

pub fn get_pull(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::GetPull;
    ctx.tool(
        kind,
        kind.spec("Get one pull request by number")
            .output_format(
                "{number, title, url, state, draft, merged, head, base, user, \
                 created_at, updated_at, body}",
            ),
        move |ctx, args: PullNumberArgs| async move {
            let req = ctx.request(kind)?.param("pull_number", args.number);
            let p: RemotePull = ctx.fetch(req).await?;
            Ok(PullDetail {
                number: p.number,
                title: p.title,
                url: p.html_url,
                state: p.state,
                draft: p.draft,
                merged: p.merged,
                head: ref_name(p.head),
                base: ref_name(p.base),
                user: login(p.user),
                created_at: p.created_at,
                updated_at: p.updated_at,
                body: p.body.unwrap_or_default(),
            })
        },
    )
}

pub fn update_pull(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::UpdatePull;
    ctx.tool(
        kind,
        kind.spec("Change a pull request's title, body, state, base, draft flag or maintainer permissions")
            .when_not_to_use("When merging; use merge_pull")
            .output_format(r#"{number, url, status: "updated"}"#),
        move |ctx, args: UpdatePullArgs| async move {
            let fields = PullFields {
                title: args.title.as_deref(),
                body: args.body.as_deref(),
                state: args.state,
                base: args.base.as_deref(),
                maintainer_can_modify: args.maintainer_can_modify,
                draft: args.draft,
                head: None,
            };
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .body(&fields)?;
            let pull: RemoteNumbered = ctx.fetch(req).await?;
            Ok(pull.into_change(Status::Updated))
        },
    )
}

pub fn list_pull_commits(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ListPullCommits;
    ctx.tool(
        kind,
        kind.spec("List the commits on a pull request")
            .output_format("{items: [{sha, author, message, html_url}]}"),
        move |ctx, args: ListPullCommitsArgs| async move {
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .query(&PerPage {
                    per_page: args.limit,
                })?;
            let commits: Vec<RemotePullCommit> = ctx.fetch(req).await?;
            Ok(commits
                .into_iter()
                .map(|c| {
                    let (git_author, message) = match c.commit {
                        Some(g) => (g.author.and_then(|a| a.name), g.message),
                        None => (None, None),
                    };
                    CommitItem {
                        sha: c.sha,
                        author: login(c.author).or(git_author),
                        message: message.unwrap_or_default(),
                        html_url: c.html_url,
                    }
                })
                .collect::<ItemList<_>>())
        },
    )
}

pub fn list_pull_files(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ListPullFiles;
    ctx.tool(
        kind,
        kind.spec("List the files changed by a pull request")
            .output_format(
                "{items: [{filename, status, additions, deletions, changes, blob_url, raw_url}]}",
            ),
        move |ctx, args: ListPullFilesArgs| async move {
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .query(&PerPage {
                    per_page: args.limit,
                })?;
            let files: Vec<RemotePullFile> = ctx.fetch(req).await?;
            Ok(files
                .into_iter()
                .map(|f| FileItem {
                    filename: f.filename,
                    status: f.status,
                    additions: f.additions,
                    deletions: f.deletions,
                    changes: f.changes,
                    blob_url: f.blob_url,
                    raw_url: f.raw_url,
                })
                .collect::<ItemList<_>>())
        },
    )
}

pub fn check_pull_merged(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::CheckPullMerged;
    ctx.tool(
        kind,
        kind.spec("Check whether a pull request has been merged")
            .output_format("{number, merged}"),
        move |ctx, args: PullNumberArgs| async move {
            let req = ctx.request(kind)?.param("pull_number", args.number);
            Ok(MergedCheck {
                number: args.number,
                merged: ctx.check(req).await?,
            })
        },
    )
}

pub fn merge_pull(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::MergePull;
    ctx.tool(
        kind,
        kind.spec("Merge a pull request")
            .when_to_use("Only when explicitly asked to merge. Confirm the number first")
            .output_format(r#"{number, merged, message, sha, status: "merged" | "failed"}"#),
        move |ctx, args: MergePullArgs| async move {
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .body(&MergeBody {
                    commit_title: args.commit_title.as_deref(),
                    commit_message: args.commit_message.as_deref(),
                    merge_method: args.merge_method,
                    sha: args.sha.as_deref(),
                })?;
            let result: RemoteMergeResult = ctx.fetch(req).await?;
            Ok(PullMerge {
                number: args.number,
                merged: result.merged,
                message: result.message,
                sha: result.sha,
                status: if result.merged {
                    Status::Merged
                } else {
                    Status::Failed
                },
            })
        },
    )
}

pub fn update_pull_branch(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::UpdatePullBranch;
    ctx.tool(
        kind,
        kind.spec("Bring a pull request's branch up to date with its base")
            .output_format(r#"{number, status: "updated", message}"#),
        move |ctx, args: UpdatePullBranchArgs| async move {
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .body(&UpdateBranchBody {
                    expected_head_sha: args.expected_head_sha.as_deref(),
                })?;
            let reply: Option<RemoteMessage> = ctx.fetch(req).await?;
            Ok(BranchUpdate {
                number: args.number,
                status: Status::Updated,
                message: reply
                    .and_then(|r| r.message)
                    .unwrap_or_else(|| "Branch update triggered".to_string()),
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{mock_ctx, run};
    use forgehand::ToolError;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn create_requires_head_and_base() {
        let (mock, ctx) = mock_ctx();
        let err = run(
            &ctx,
            ForgeToolKind::CreatePull,
            json!({"title": "Fix", "head": "fix"}),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
        assert_eq!(mock.call_count(), 0);

        mock.reply(
            ForgeToolKind::CreatePull.route(),
            201,
            json!({"number": 42, "html_url": "p42"}),
        );
        let out = run(
            &ctx,
            ForgeToolKind::CreatePull,
            json!({"title": "Fix", "head": "fix", "base": "main", "draft": true}),
        )
        .await
        .unwrap();
        assert_eq!(out, json!({"number": 42, "url": "p42", "status": "created"}));
        assert_eq!(
            mock.calls()[0].body,
            Some(json!({"title": "Fix", "head": "fix", "base": "main", "draft": true}))
        );
    }

    #[tokio::test]
    async fn list_filters_and_projects() {
        let (mock, ctx) = mock_ctx();
        mock.reply(
            ForgeToolKind::ListPulls.route(),
            200,
            json!([
                {"number": 1, "title": "Fix login bug", "body": null, "html_url": "p1", "state": "open",
                 "draft": false, "head": {"ref": "fix-login", "sha": "a"}, "base": {"ref": "main"}},
                {"number": 2, "title": "Docs", "body": "Mentions a Bug", "html_url": "p2", "state": "open",
                 "head": {"ref": "docs"}, "base": {"ref": "main"}},
                {"number": 3, "title": "Refactor", "body": "cleanup", "html_url": "p3", "state": "open",
                 "head": {"ref": "refactor"}, "base": {"ref": "main"}}
            ]),
        );
        let out = run(
            &ctx,
            ForgeToolKind::ListPulls,
            json!({"keyword": "bug", "sort": "long-running"}),
        )
        .await
        .unwrap();
        let numbers: Vec<u64> = out["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["number"].as_u64().unwrap())
            .collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(
            out["items"][0],
            json!({"number": 1, "title": "Fix login bug", "url": "p1", "state": "open",
                   "draft": false, "head": "fix-login", "base": "main"})
        );
        assert_eq!(mock.calls()[0].query_value("sort"), Some("long-running"));
    }

    #[tokio::test]
    async fn get_defaults_missing_body() {
        let (mock, ctx) = mock_ctx();
        mock.reply(
            ForgeToolKind::GetPull.route(),
            200,
            json!({"number": 7, "title": "T", "body": null, "html_url": "p7", "state": "closed",
                   "draft": false, "merged": true, "head": {"ref": "h"}, "base": {"ref": "main"},
                   "user": {"login": "alice"}, "created_at": "2024-01-01T00:00:00Z",
                   "updated_at": "2024-01-02T00:00:00Z", "mergeable": null}),
        );
        let out = run(&ctx, ForgeToolKind::GetPull, json!({"number": 7}))
            .await
            .unwrap();
        assert_eq!(
            out,
            json!({"number": 7, "title": "T", "url": "p7", "state": "closed", "draft": false,
                   "merged": true, "head": "h", "base": "main", "user": "alice",
                   "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-02T00:00:00Z",
                   "body": ""})
        );
    }

    #[tokio::test]
    async fn commits_fall_back_to_git_author() {
        let (mock, ctx) = mock_ctx();
        mock.reply(
            ForgeToolKind::ListPullCommits.route(),
            200,
            json!([
                {"sha": "a", "author": {"login": "alice"}, "commit": {"author": {"name": "Alice"}, "message": "one"}, "html_url": "ca"},
                {"sha": "b", "author": null, "commit": {"author": {"name": "Bob"}, "message": "two"}, "html_url": "cb"},
                {"sha": "c", "author": null, "commit": null, "html_url": "cc"}
            ]),
        );
        let out = run(&ctx, ForgeToolKind::ListPullCommits, json!({"number": 7}))
            .await
            .unwrap();
        assert_eq!(
            out,
            json!({"items": [
                {"sha": "a", "author": "alice", "message": "one", "html_url": "ca"},
                {"sha": "b", "author": "Bob", "message": "two", "html_url": "cb"},
                {"sha": "c", "author": null, "message": "", "html_url": "cc"}
            ]})
        );
        assert_eq!(mock.calls()[0].query_value("per_page"), Some("100"));
    }

    #[tokio::test]
    async fn page_size_caps_differ_per_list() {
        let (mock, ctx) = mock_ctx();
        mock.reply(ForgeToolKind::ListPullFiles.route(), 200, json!([]));
        run(&ctx, ForgeToolKind::ListPullFiles, json!({"number": 7, "limit": 300}))
            .await
            .unwrap();
        let err = run(&ctx, ForgeToolKind::ListPullCommits, json!({"number": 7, "limit": 251}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
        let err = run(&ctx, ForgeToolKind::ListPullFiles, json!({"number": 7, "limit": 301}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn merged_check() {
        let (mock, ctx) = mock_ctx();
        mock.reply(ForgeToolKind::CheckPullMerged.route(), 204, Value::Null);
        let out = run(&ctx, ForgeToolKind::CheckPullMerged, json!({"number": 7}))
            .await
            .unwrap();
        assert_eq!(out, json!({"number": 7, "merged": true}));

        let (mock, ctx) = mock_ctx();
        mock.fail(ForgeToolKind::CheckPullMerged.route(), 404, "Not Found");
        let out = run(&ctx, ForgeToolKind::CheckPullMerged, json!({"number": 8}))
            .await
            .unwrap();
        assert_eq!(out, json!({"number": 8, "merged": false}));

        let (mock, ctx) = mock_ctx();
        mock.fail(ForgeToolKind::CheckPullMerged.route(), 500, "Server Error");
        let err = run(&ctx, ForgeToolKind::CheckPullMerged, json!({"number": 8}))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn merge_reports_outcome() {
        let (mock, ctx) = mock_ctx();
        mock.reply(
            ForgeToolKind::MergePull.route(),
            200,
            json!({"sha": "m", "merged": true, "message": "Pull Request successfully merged"}),
        );
        let out = run(
            &ctx,
            ForgeToolKind::MergePull,
            json!({"number": 7, "merge_method": "squash"}),
        )
        .await
        .unwrap();
        assert_eq!(
            out,
            json!({"number": 7, "merged": true, "message": "Pull Request successfully merged",
                   "sha": "m", "status": "merged"})
        );
        let req = &mock.calls()[0];
        assert_eq!(req.route.method, crate::client::Method::Put);
        assert_eq!(req.body, Some(json!({"merge_method": "squash"})));
    }

    #[tokio::test]
    async fn update_branch_defaults_message() {
        let (mock, ctx) = mock_ctx();
        mock.reply(ForgeToolKind::UpdatePullBranch.route(), 202, json!({}));
        let out = run(&ctx, ForgeToolKind::UpdatePullBranch, json!({"number": 7}))
            .await
            .unwrap();
        assert_eq!(
            out,
            json!({"number": 7, "status": "updated", "message": "Branch update triggered"})
        );
        assert_eq!(mock.calls()[0].body, Some(json!({})));
    }
}
