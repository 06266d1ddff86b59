//! Review comment tools: comments anchored to lines of a pull request diff.

use forgehand::tools::SchemaTool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::args::{self, BodyOnly, Direction, PerPage, Side};
use super::shape::{IdStatus, ItemList, RemoteComment, RemoteUser, Status, login};
use super::{ForgeContext, ForgeToolKind};

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommentSort {
    Created,
    Updated,
}

fn created() -> CommentSort {
    CommentSort::Created
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ListRepoReviewCommentsArgs {
    #[serde(default = "created")]
    pub sort: CommentSort,
    #[serde(default = "args::desc")]
    pub direction: Direction,
    /// Only comments updated after this RFC 3339 timestamp.
    #[serde(default)]
    pub since: Option<String>,
    /// Page size.
    #[schemars(range(min = 1, max = 100))]
    #[serde(default = "args::limit_50")]
    pub limit: u32,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ReviewCommentIdArgs {
    /// Review comment id.
    #[schemars(range(min = 1))]
    pub comment_id: u64,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ReviewCommentBodyArgs {
    /// Review comment id.
    #[schemars(range(min = 1))]
    pub comment_id: u64,
    #[schemars(length(min = 1))]
    pub body: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ListPullReviewCommentsArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    /// Page size.
    #[schemars(range(min = 1, max = 100))]
    #[serde(default = "args::limit_50")]
    pub limit: u32,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct CreatePullReviewCommentArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    #[schemars(length(min = 1))]
    pub body: String,
    /// SHA of the commit being commented on.
    #[schemars(length(min = 1))]
    pub commit_id: String,
    /// File path relative to the repository root.
    #[schemars(length(min = 1))]
    pub path: String,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub start_side: Option<Side>,
    /// Line the comment applies to; the last line of a range.
    #[schemars(range(min = 1))]
    #[serde(default)]
    pub line: Option<u64>,
    /// First line of a multi-line range.
    #[schemars(range(min = 1))]
    #[serde(default)]
    pub start_line: Option<u64>,
    /// Reply to this review comment instead of starting a new thread.
    #[schemars(range(min = 1))]
    #[serde(default)]
    pub in_reply_to: Option<u64>,
}

#[derive(Serialize)]
struct RepoCommentsQuery<'a> {
    sort: CommentSort,
    direction: Direction,
    since: Option<&'a str>,
    per_page: u32,
}

#[derive(Serialize)]
struct LineComment<'a> {
    body: &'a str,
    commit_id: &'a str,
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_line: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_side: Option<Side>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct RemoteReviewComment {
    pub id: u64,
    pub user: Option<RemoteUser>,
    pub pull_request_url: Option<String>,
    pub path: Option<String>,
    pub body: Option<String>,
    pub html_url: Option<String>,
}

impl RemoteReviewComment {
    fn into_detail(self) -> ReviewCommentDetail {
        ReviewCommentDetail {
            id: self.id,
            user: login(self.user),
            pr_url: self.pull_request_url,
            path: self.path,
            body: self.body,
            url: self.html_url,
        }
    }

    pub(crate) fn into_item(self) -> ReviewCommentItem {
        ReviewCommentItem {
            id: self.id,
            user: login(self.user),
            path: self.path,
            body: self.body,
            url: self.html_url,
        }
    }
}

/// A review comment seen from the repository, with its pull request.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReviewCommentDetail {
    pub id: u64,
    pub user: Option<String>,
    pub pr_url: Option<String>,
    pub path: Option<String>,
    pub body: Option<String>,
    pub url: Option<String>,
}

/// A review comment seen from its pull request.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReviewCommentItem {
    pub id: u64,
    pub user: Option<String>,
    pub path: Option<String>,
    pub body: Option<String>,
    pub url: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PullReviewComments {
    pub number: u64,
    pub items: Vec<ReviewCommentItem>,
}

pub fn list_repo_review_comments(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ListRepoReviewComments;
    ctx.tool(
        kind,
        kind.spec("List review comments across every pull request in the repository")
            .when_not_to_use("For one pull request; use list_pull_review_comments")
            .output_format("{items: [{id, user, pr_url, path, body, url}]}"),
        move |ctx, args: ListRepoReviewCommentsArgs| async move {
            args::check_timestamp("since", args.since.as_deref())?;
            let req = ctx.request(kind)?.query(&RepoCommentsQuery {
                sort: args.sort,
                direction: args.direction,
                since: args.since.as_deref(),
                per_page: args.limit,
            })?;
            let comments: Vec<RemoteReviewComment> = ctx.fetch(req).await?;
            Ok(comments
                .into_iter()
                .map(RemoteReviewComment::into_detail)
                .collect::<ItemList<_>>())
        },
    )
}

pub fn get_review_comment(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::GetReviewComment;
    ctx.tool(
        kind,
        kind.spec("Get one review comment by id")
            .output_format("{id, user, pr_url, path, body, url}"),
        move |ctx, args: ReviewCommentIdArgs| async move {
            let req = ctx.request(kind)?.param("comment_id", args.comment_id);
            let comment: RemoteReviewComment = ctx.fetch(req).await?;
            Ok(comment.into_detail())
        },
    )
}

pub fn update_review_comment(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::UpdateReviewComment;
    ctx.tool(
        kind,
        kind.spec("Replace the body of a review comment")
            .output_format(r#"{id, url, status: "updated"}"#),
        move |ctx, args: ReviewCommentBodyArgs| async move {
            let req = ctx
                .request(kind)?
                .param("comment_id", args.comment_id)
                .body(&BodyOnly { body: &args.body })?;
            let comment: RemoteComment = ctx.fetch(req).await?;
            Ok(comment.into_change(Status::Updated))
        },
    )
}

pub fn delete_review_comment(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::DeleteReviewComment;
    ctx.tool(
        kind,
        kind.spec("Delete a review comment")
            .when_to_use("Only when explicitly asked to delete a review comment")
            .output_format(r#"{id, status: "deleted"}"#),
        move |ctx, args: ReviewCommentIdArgs| async move {
            let req = ctx.request(kind)?.param("comment_id", args.comment_id);
            ctx.send(req).await?;
            Ok(IdStatus {
                id: args.comment_id,
                status: Status::Deleted,
            })
        },
    )
}

pub fn list_pull_review_comments(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ListPullReviewComments;
    ctx.tool(
        kind,
        kind.spec("List the review comments on one pull request")
            .when_not_to_use("For the conversation comments; use list_issue_comments with the pull request number")
            .output_format("{number, items: [{id, user, path, body, url}]}"),
        move |ctx, args: ListPullReviewCommentsArgs| async move {
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .query(&PerPage {
                    per_page: args.limit,
                })?;
            let comments: Vec<RemoteReviewComment> = ctx.fetch(req).await?;
            Ok(PullReviewComments {
                number: args.number,
                items: comments
                    .into_iter()
                    .map(RemoteReviewComment::into_item)
                    .collect(),
            })
        },
    )
}

pub fn create_pull_review_comment(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::CreatePullReviewComment;
    ctx.tool(
        kind,
        kind.spec("Comment on a line or range of lines in a pull request diff")
            .when_to_use("When giving feedback on specific code in a pull request")
            .when_not_to_use("For a general comment on the pull request; use create_issue_comment")
            .disambiguate(
                "Answering an existing review comment",
                "reply_to_review_comment",
                "it needs only the comment id and body",
            )
            .example(
                r#"create_pull_review_comment(number=7, body="Off by one?", commit_id="6dcb09b", path="src/lib.rs", line=42, side="RIGHT")"#,
                "A comment on line 42 of the new version of src/lib.rs",
            )
            .output_format(r#"{id, url, status: "created"}"#),
        move |ctx, args: CreatePullReviewCommentArgs| async move {
            let req = match args.in_reply_to {
                Some(parent) => ctx
                    .request(ForgeToolKind::ReplyToReviewComment)?
                    .param("comment_id", parent)
                    .body(&BodyOnly { body: &args.body })?,
                None => ctx
                    .request(kind)?
                    .param("pull_number", args.number)
                    .body(&LineComment {
                        body: &args.body,
                        commit_id: &args.commit_id,
                        path: &args.path,
                        line: args.line,
                        side: args.side,
                        start_line: args.start_line,
                        start_side: args.start_side,
                    })?,
            };
            let comment: RemoteComment = ctx.fetch(req).await?;
            Ok(comment.into_change(Status::Created))
        },
    )
}

pub fn reply_to_review_comment(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ReplyToReviewComment;
    ctx.tool(
        kind,
        kind.spec("Reply in the thread of an existing review comment")
            .output_format(r#"{id, url, status: "created"}"#),
        move |ctx, args: ReviewCommentBodyArgs| async move {
            let req = ctx
                .request(kind)?
                .param("comment_id", args.comment_id)
                .body(&BodyOnly { body: &args.body })?;
            let comment: RemoteComment = ctx.fetch(req).await?;
            Ok(comment.into_change(Status::Created))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{mock_ctx, run};
    use forgehand::ToolError;
    use serde_json::{Value, json};

    fn comment(id: u64) -> Value {
        json!({
            "id": id,
            "user": {"login": "alice"},
            "pull_request_url": "https://api.github.com/repos/octo/hello/pulls/7",
            "path": "src/lib.rs",
            "body": "nit",
            "html_url": format!("r{id}"),
            "diff_hunk": "@@ -1 +1 @@"
        })
    }

    #[tokio::test]
    async fn repo_listing_validates_since() {
        let (mock, ctx) = mock_ctx();
        let err = run(
            &ctx,
            ForgeToolKind::ListRepoReviewComments,
            json!({"since": "yesterday"}),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
        assert_eq!(mock.call_count(), 0);

        mock.reply(ForgeToolKind::ListRepoReviewComments.route(), 200, json!([comment(1)]));
        let out = run(
            &ctx,
            ForgeToolKind::ListRepoReviewComments,
            json!({"since": "2024-01-01T00:00:00Z"}),
        )
        .await
        .unwrap();
        assert_eq!(
            out,
            json!({"items": [{"id": 1, "user": "alice",
                              "pr_url": "https://api.github.com/repos/octo/hello/pulls/7",
                              "path": "src/lib.rs", "body": "nit", "url": "r1"}]})
        );
        let req = &mock.calls()[0];
        assert_eq!(req.query_value("since"), Some("2024-01-01T00:00:00Z"));
        assert_eq!(req.query_value("sort"), Some("created"));
    }

    #[tokio::test]
    async fn pull_listing_carries_number() {
        let (mock, ctx) = mock_ctx();
        mock.reply(
            ForgeToolKind::ListPullReviewComments.route(),
            200,
            json!([comment(1), comment(2)]),
        );
        let out = run(&ctx, ForgeToolKind::ListPullReviewComments, json!({"number": 7}))
            .await
            .unwrap();
        assert_eq!(out["number"], 7);
        assert_eq!(out["items"].as_array().unwrap().len(), 2);
        assert!(out["items"][0].get("pr_url").is_none());
    }

    #[tokio::test]
    async fn create_anchors_to_line() {
        let (mock, ctx) = mock_ctx();
        mock.reply(
            ForgeToolKind::CreatePullReviewComment.route(),
            201,
            json!({"id": 5, "html_url": "r5"}),
        );
        let out = run(
            &ctx,
            ForgeToolKind::CreatePullReviewComment,
            json!({"number": 7, "body": "Off by one?", "commit_id": "6dcb09b",
                   "path": "src/lib.rs", "line": 42, "side": "RIGHT"}),
        )
        .await
        .unwrap();
        assert_eq!(out, json!({"id": 5, "url": "r5", "status": "created"}));
        let req = &mock.calls()[0];
        assert_eq!(req.path().unwrap(), "/repos/octo/hello/pulls/7/comments");
        assert_eq!(
            req.body,
            Some(json!({"body": "Off by one?", "commit_id": "6dcb09b",
                        "path": "src/lib.rs", "line": 42, "side": "RIGHT"}))
        );
    }

    #[tokio::test]
    async fn create_with_in_reply_to_posts_a_reply() {
        let (mock, ctx) = mock_ctx();
        mock.reply(
            ForgeToolKind::ReplyToReviewComment.route(),
            201,
            json!({"id": 6, "html_url": "r6"}),
        );
        run(
            &ctx,
            ForgeToolKind::CreatePullReviewComment,
            json!({"number": 7, "body": "Fixed", "commit_id": "6dcb09b",
                   "path": "src/lib.rs", "in_reply_to": 5}),
        )
        .await
        .unwrap();
        let req = &mock.calls()[0];
        assert_eq!(req.route, ForgeToolKind::ReplyToReviewComment.route());
        assert_eq!(req.path().unwrap(), "/repos/octo/hello/pulls/comments/5/replies");
        assert_eq!(req.body, Some(json!({"body": "Fixed"})));
    }

    #[tokio::test]
    async fn invalid_side_is_rejected() {
        let (mock, ctx) = mock_ctx();
        let err = run(
            &ctx,
            ForgeToolKind::CreatePullReviewComment,
            json!({"number": 7, "body": "x", "commit_id": "c", "path": "p", "side": "right"}),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn get_update_delete() {
        let (mock, ctx) = mock_ctx();
        mock.reply(ForgeToolKind::GetReviewComment.route(), 200, comment(9));
        mock.reply(
            ForgeToolKind::UpdateReviewComment.route(),
            200,
            json!({"id": 9, "html_url": "r9"}),
        );
        mock.reply(ForgeToolKind::DeleteReviewComment.route(), 204, Value::Null);

        let got = run(&ctx, ForgeToolKind::GetReviewComment, json!({"comment_id": 9}))
            .await
            .unwrap();
        assert_eq!(got["url"], "r9");

        let out = run(
            &ctx,
            ForgeToolKind::UpdateReviewComment,
            json!({"comment_id": 9, "body": "better"}),
        )
        .await
        .unwrap();
        assert_eq!(out, json!({"id": 9, "url": "r9", "status": "updated"}));

        let out = run(&ctx, ForgeToolKind::DeleteReviewComment, json!({"comment_id": 9}))
            .await
            .unwrap();
        assert_eq!(out, json!({"id": 9, "status": "deleted"}));
    }
}
