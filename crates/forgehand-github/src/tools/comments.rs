//! Issue comment tools.

use forgehand::tools::SchemaTool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::args::{self, BodyOnly, PerPage};
use super::shape::{IdStatus, ItemList, RemoteComment, RemoteUser, Status, login};
use super::{ForgeContext, ForgeToolKind};

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ListCommentsArgs {
    /// Issue number.
    #[schemars(range(min = 1))]
    pub number: u64,
    /// Page size.
    #[schemars(range(min = 1, max = 100))]
    #[serde(default = "args::limit_50")]
    pub limit: u32,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct CreateCommentArgs {
    /// Issue number.
    #[schemars(range(min = 1))]
    pub number: u64,
    /// Markdown body.
    #[schemars(length(min = 1))]
    pub body: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct UpdateCommentArgs {
    /// Comment id.
    #[schemars(range(min = 1))]
    pub comment_id: u64,
    /// New Markdown body.
    #[schemars(length(min = 1))]
    pub body: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct CommentIdArgs {
    /// Comment id.
    #[schemars(range(min = 1))]
    pub comment_id: u64,
}

#[derive(Deserialize, Debug)]
struct RemoteIssueComment {
    id: u64,
    user: Option<RemoteUser>,
    body: Option<String>,
    html_url: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CommentItem {
    pub id: u64,
    pub user: Option<String>,
    pub body: Option<String>,
    pub url: Option<String>,
}

pub fn list_issue_comments(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ListIssueComments;
    ctx.tool(
        kind,
        kind.spec("List the comments on an issue or pull request conversation")
            .when_to_use("When asked what was said on an issue")
            .when_not_to_use("For line comments on a pull request diff; use list_pull_review_comments")
            .output_format("{items: [{id, user, body, url}]}"),
        move |ctx, args: ListCommentsArgs| async move {
            let req = ctx
                .request(kind)?
                .param("issue_number", args.number)
                .query(&PerPage {
                    per_page: args.limit,
                })?;
            let comments: Vec<RemoteIssueComment> = ctx.fetch(req).await?;
            Ok(comments
                .into_iter()
                .map(|c| CommentItem {
                    id: c.id,
                    user: login(c.user),
                    body: c.body,
                    url: c.html_url,
                })
                .collect::<ItemList<_>>())
        },
    )
}

pub fn create_issue_comment(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::CreateIssueComment;
    ctx.tool(
        kind,
        kind.spec("Comment on an issue or pull request conversation")
            .when_to_use("When asked to reply to or comment on an issue")
            .when_not_to_use("For a comment on a specific diff line; use create_pull_review_comment")
            .output_format(r#"{id, url, status: "created"}"#),
        move |ctx, args: CreateCommentArgs| async move {
            let req = ctx
                .request(kind)?
                .param("issue_number", args.number)
                .body(&BodyOnly { body: &args.body })?;
            let comment: RemoteComment = ctx.fetch(req).await?;
            Ok(comment.into_change(Status::Created))
        },
    )
}

pub fn update_issue_comment(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::UpdateIssueComment;
    ctx.tool(
        kind,
        kind.spec("Replace the body of an issue comment")
            .output_format(r#"{id, url, status: "updated"}"#),
        move |ctx, args: UpdateCommentArgs| async move {
            let req = ctx
                .request(kind)?
                .param("comment_id", args.comment_id)
                .body(&BodyOnly { body: &args.body })?;
            let comment: RemoteComment = ctx.fetch(req).await?;
            Ok(comment.into_change(Status::Updated))
        },
    )
}

pub fn delete_issue_comment(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::DeleteIssueComment;
    ctx.tool(
        kind,
        kind.spec("Delete an issue comment")
            .when_to_use("Only when explicitly asked to delete a comment")
            .output_format(r#"{id, status: "deleted"}"#),
        move |ctx, args: CommentIdArgs| async move {
            let req = ctx.request(kind)?.param("comment_id", args.comment_id);
            ctx.send(req).await?;
            Ok(IdStatus {
                id: args.comment_id,
                status: Status::Deleted,
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
    async fn list_projects_comments() {
        let (mock, ctx) = mock_ctx();
        mock.reply(
            ForgeToolKind::ListIssueComments.route(),
            200,
            json!([
                {"id": 10, "user": {"login": "alice"}, "body": "+1", "html_url": "c10", "reactions": {}},
                {"id": 11, "user": null, "body": "ghost", "html_url": "c11"}
            ]),
        );
        let out = run(&ctx, ForgeToolKind::ListIssueComments, json!({"number": 5}))
            .await
            .unwrap();
        assert_eq!(
            out,
            json!({"items": [
                {"id": 10, "user": "alice", "body": "+1", "url": "c10"},
                {"id": 11, "user": null, "body": "ghost", "url": "c11"}
            ]})
        );
        let req = &mock.calls()[0];
        assert_eq!(req.path().unwrap(), "/repos/octo/hello/issues/5/comments");
        assert_eq!(req.query_value("per_page"), Some("50"));
    }

    #[tokio::test]
    async fn create_requires_body() {
        let (mock, ctx) = mock_ctx();
        let err = run(&ctx, ForgeToolKind::CreateIssueComment, json!({"number": 5, "body": ""}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
        assert_eq!(mock.call_count(), 0);

        mock.reply(
            ForgeToolKind::CreateIssueComment.route(),
            201,
            json!({"id": 99, "html_url": "c99"}),
        );
        let out = run(&ctx, ForgeToolKind::CreateIssueComment, json!({"number": 5, "body": "Thanks"}))
            .await
            .unwrap();
        assert_eq!(out, json!({"id": 99, "url": "c99", "status": "created"}));
        assert_eq!(mock.calls()[0].body, Some(json!({"body": "Thanks"})));
    }

    #[tokio::test]
    async fn update_and_delete_address_the_comment() {
        let (mock, ctx) = mock_ctx();
        mock.reply(
            ForgeToolKind::UpdateIssueComment.route(),
            200,
            json!({"id": 99, "html_url": "c99"}),
        );
        mock.reply(ForgeToolKind::DeleteIssueComment.route(), 204, Value::Null);

        let out = run(
            &ctx,
            ForgeToolKind::UpdateIssueComment,
            json!({"comment_id": 99, "body": "edited"}),
        )
        .await
        .unwrap();
        assert_eq!(out["status"], "updated");

        let out = run(&ctx, ForgeToolKind::DeleteIssueComment, json!({"comment_id": 99}))
            .await
            .unwrap();
        assert_eq!(out, json!({"id": 99, "status": "deleted"}));

        for req in mock.calls() {
            assert_eq!(req.path().unwrap(), "/repos/octo/hello/issues/comments/99");
        }
    }
}
