//! Pull request review tools and the review lifecycle.
//!
//! A review is created pending (no event) or submitted directly (with an
//! event). A pending review can have its body updated, be submitted or be
//! deleted. A submitted approval or change request can only be dismissed.
//!
//! ```text
//!            create(no event)          submit(event)
//!   (none) ─────────────────▶ PENDING ─────────────▶ APPROVED | CHANGES_REQUESTED | COMMENTED
//!      │                        │                          │
//!      │ create(event)          │ delete_pending           │ dismiss (approved / changes requested)
//!      └───────────────────▶ submitted                     ▼
//!                               ▼                       DISMISSED
//!                            (deleted)
//! ```
//!
//! The remote enforces these rules. With [`ForgeConfig::review_guard`]
//! enabled, submit, dismiss and delete-pending first read the review and
//! refuse locally with [`ToolError::Lifecycle`] when [`ReviewState::allows`]
//! says no.
//!
//! [`ForgeConfig::review_guard`]: crate::config::ForgeConfig::review_guard

use std::fmt;

use forgehand::ToolError;
use forgehand::tools::SchemaTool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::args::{self, BodyOnly, PerPage, Side};
use super::review_comments::{RemoteReviewComment, ReviewCommentItem};
use super::shape::{IdStatus, RemoteUser, Status, login};
use super::{ForgeContext, ForgeToolKind};

// ── Lifecycle ───────────────────────────────────────────────────────

/// The verdict attached when a review is submitted.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewEvent {
    Approve,
    RequestChanges,
    Comment,
}

/// Where a review is in its lifecycle.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Pending,
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Unknown,
}

impl ReviewState {
    /// Map the remote `state` string. Anything unrecognized is `Unknown`.
    pub fn from_remote(state: Option<&str>) -> Self {
        match state {
            Some("PENDING") => Self::Pending,
            Some("APPROVED") => Self::Approved,
            Some("CHANGES_REQUESTED") => Self::ChangesRequested,
            Some("COMMENTED") => Self::Commented,
            Some("DISMISSED") => Self::Dismissed,
            _ => Self::Unknown,
        }
    }

    /// Whether `action` is permitted from this state.
    pub fn allows(self, action: ReviewAction) -> bool {
        use ReviewAction::*;
        match self {
            Self::Pending => matches!(action, UpdateBody | Submit | DeletePending),
            Self::Approved | Self::ChangesRequested => matches!(action, UpdateBody | Dismiss),
            Self::Commented | Self::Dismissed | Self::Unknown => action == UpdateBody,
        }
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::ChangesRequested => "changes requested",
            Self::Commented => "commented",
            Self::Dismissed => "dismissed",
            Self::Unknown => "in an unknown state",
        })
    }
}

/// A state-changing operation on an existing review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    UpdateBody,
    Submit,
    Dismiss,
    DeletePending,
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UpdateBody => "update its body",
            Self::Submit => "submit it",
            Self::Dismiss => "dismiss it",
            Self::DeletePending => "delete it",
        })
    }
}

/// Read the review and refuse `action` if its state forbids it. A no-op
/// unless the review guard is enabled.
async fn guard(
    ctx: &ForgeContext,
    number: u64,
    review_id: u64,
    action: ReviewAction,
) -> Result<(), ToolError> {
    if !ctx.config().review_guard {
        return Ok(());
    }
    let req = ctx
        .request(ForgeToolKind::GetPullReview)?
        .param("pull_number", number)
        .param("review_id", review_id);
    let review: RemoteReview = ctx.fetch(req).await?;
    let state = ReviewState::from_remote(review.state.as_deref());
    debug!(review_id, %state, %action, "review guard");
    if state.allows(action) {
        Ok(())
    } else {
        Err(ToolError::Lifecycle {
            resource: format!("review {review_id}"),
            state: state.to_string(),
            action: action.to_string(),
        })
    }
}

// ── Arguments ───────────────────────────────────────────────────────

#[derive(Deserialize, JsonSchema, Debug)]
pub struct PullNumberArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
}

/// A line comment submitted as part of a review.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct DraftReviewComment {
    /// File path relative to the repository root.
    #[schemars(length(min = 1))]
    pub path: String,
    /// Position in the diff. Prefer line and side.
    #[schemars(range(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
    #[schemars(range(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[schemars(range(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_side: Option<Side>,
    #[schemars(length(min = 1))]
    pub body: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct CreateReviewArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    #[serde(default)]
    pub body: Option<String>,
    /// Leave out to create a pending review.
    #[serde(default)]
    pub event: Option<ReviewEvent>,
    #[serde(default)]
    pub comments: Option<Vec<DraftReviewComment>>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ReviewRefArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    #[schemars(range(min = 1))]
    pub review_id: u64,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct UpdateReviewArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    #[schemars(range(min = 1))]
    pub review_id: u64,
    #[schemars(length(min = 1))]
    pub body: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ListReviewCommentsArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    #[schemars(range(min = 1))]
    pub review_id: u64,
    /// Page size.
    #[schemars(range(min = 1, max = 100))]
    #[serde(default = "args::limit_50")]
    pub limit: u32,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct DismissReviewArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    #[schemars(range(min = 1))]
    pub review_id: u64,
    /// Why the review is dismissed.
    #[schemars(length(min = 1))]
    pub message: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct SubmitReviewArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    #[schemars(range(min = 1))]
    pub review_id: u64,
    #[serde(default)]
    pub body: Option<String>,
    pub event: ReviewEvent,
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct CreateReviewBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<ReviewEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comments: Option<&'a [DraftReviewComment]>,
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
    event: ReviewEvent,
}

#[derive(Serialize)]
struct DismissBody<'a> {
    message: &'a str,
}

#[derive(Deserialize, Debug)]
struct RemoteReview {
    id: u64,
    user: Option<RemoteUser>,
    state: Option<String>,
    submitted_at: Option<String>,
    body: Option<String>,
}

impl RemoteReview {
    fn state(&self) -> ReviewState {
        ReviewState::from_remote(self.state.as_deref())
    }

    fn into_item(self) -> ReviewItem {
        ReviewItem {
            id: self.id,
            state: self.state(),
            user: login(self.user),
            submitted_at: self.submitted_at,
            body: self.body.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct RemoteReviewState {
    id: Option<u64>,
    state: Option<String>,
}

// ── Results ─────────────────────────────────────────────────────────

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReviewItem {
    pub id: u64,
    pub user: Option<String>,
    pub state: ReviewState,
    pub submitted_at: Option<String>,
    pub body: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PullReviews {
    pub number: u64,
    pub items: Vec<ReviewItem>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReviewCreated {
    pub number: u64,
    pub review_id: u64,
    pub state: ReviewState,
    pub status: Status,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReviewComments {
    pub number: u64,
    pub review_id: u64,
    pub items: Vec<ReviewCommentItem>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReviewTransition {
    pub id: u64,
    pub state: ReviewState,
    pub status: Status,
}

// ── Tools ───────────────────────────────────────────────────────────

pub fn list_pull_reviews(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ListPullReviews;
    ctx.tool(
        kind,
        kind.spec("List the reviews on a pull request, oldest first")
            .when_not_to_use("For reviewers who have not reviewed yet; use get_requested_reviewers")
            .output_format("{number, items: [{id, user, state, submitted_at, body}]}"),
        move |ctx, args: PullNumberArgs| async move {
            let req = ctx.request(kind)?.param("pull_number", args.number);
            let reviews: Vec<RemoteReview> = ctx.fetch(req).await?;
            Ok(PullReviews {
                number: args.number,
                items: reviews.into_iter().map(RemoteReview::into_item).collect(),
            })
        },
    )
}

pub fn create_pull_review(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::CreatePullReview;
    ctx.tool(
        kind,
        kind.spec("Start a review on a pull request, optionally submitting it at once")
            .when_to_use(
                "When asked to review, approve or request changes. Without event the review \
                 stays pending until submit_pull_review",
            )
            .disambiguate(
                "Finishing a review that is already pending",
                "submit_pull_review",
                "creating another review would leave the pending one behind",
            )
            .example(
                r#"create_pull_review(number=7, event="APPROVE", body="LGTM")"#,
                "An approval",
            )
            .output_format(r#"{number, review_id, state, status: "created"}"#),
        move |ctx, args: CreateReviewArgs| async move {
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .body(&CreateReviewBody {
                    body: args.body.as_deref(),
                    event: args.event,
                    comments: args.comments.as_deref(),
                })?;
            let review: RemoteReview = ctx.fetch(req).await?;
            Ok(ReviewCreated {
                number: args.number,
                review_id: review.id,
                state: review.state(),
                status: Status::Created,
            })
        },
    )
}

pub fn get_pull_review(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::GetPullReview;
    ctx.tool(
        kind,
        kind.spec("Get one review on a pull request")
            .output_format("{id, user, state, submitted_at, body}"),
        move |ctx, args: ReviewRefArgs| async move {
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .param("review_id", args.review_id);
            let review: RemoteReview = ctx.fetch(req).await?;
            Ok(review.into_item())
        },
    )
}

pub fn update_pull_review(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::UpdatePullReview;
    ctx.tool(
        kind,
        kind.spec("Replace the summary body of a review")
            .output_format(r#"{id, status: "updated"}"#),
        move |ctx, args: UpdateReviewArgs| async move {
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .param("review_id", args.review_id)
                .body(&BodyOnly { body: &args.body })?;
            let review: RemoteReviewState = ctx.fetch(req).await?;
            Ok(IdStatus {
                id: review.id.unwrap_or(args.review_id),
                status: Status::Updated,
            })
        },
    )
}

pub fn delete_pending_pull_review(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::DeletePendingPullReview;
    ctx.tool(
        kind,
        kind.spec("Delete a review that has not been submitted")
            .when_not_to_use("For a submitted review; use dismiss_pull_review")
            .output_format(r#"{id, status: "deleted"}"#),
        move |ctx, args: ReviewRefArgs| async move {
            guard(&ctx, args.number, args.review_id, ReviewAction::DeletePending).await?;
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .param("review_id", args.review_id);
            ctx.send(req).await?;
            Ok(IdStatus {
                id: args.review_id,
                status: Status::Deleted,
            })
        },
    )
}

pub fn list_review_comments_for_review(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ListReviewCommentsForReview;
    ctx.tool(
        kind,
        kind.spec("List the line comments that belong to one review")
            .output_format("{number, review_id, items: [{id, user, path, body, url}]}"),
        move |ctx, args: ListReviewCommentsArgs| async move {
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .param("review_id", args.review_id)
                .query(&PerPage {
                    per_page: args.limit,
                })?;
            let comments: Vec<RemoteReviewComment> = ctx.fetch(req).await?;
            Ok(ReviewComments {
                number: args.number,
                review_id: args.review_id,
                items: comments
                    .into_iter()
                    .map(RemoteReviewComment::into_item)
                    .collect(),
            })
        },
    )
}

pub fn dismiss_pull_review(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::DismissPullReview;
    ctx.tool(
        kind,
        kind.spec("Dismiss a submitted approval or change request")
            .when_not_to_use("For a pending review; use delete_pending_pull_review")
            .output_format(r#"{id, state, status: "dismissed"}"#),
        move |ctx, args: DismissReviewArgs| async move {
            guard(&ctx, args.number, args.review_id, ReviewAction::Dismiss).await?;
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .param("review_id", args.review_id)
                .body(&DismissBody {
                    message: &args.message,
                })?;
            let review: RemoteReviewState = ctx.fetch(req).await?;
            Ok(ReviewTransition {
                id: args.review_id,
                state: ReviewState::from_remote(review.state.as_deref()),
                status: Status::Dismissed,
            })
        },
    )
}

pub fn submit_pull_review(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::SubmitPullReview;
    ctx.tool(
        kind,
        kind.spec("Submit a pending review with a verdict")
            .when_to_use("After create_pull_review without an event, once the review is complete")
            .output_format(r#"{id, state, status: "submitted"}"#),
        move |ctx, args: SubmitReviewArgs| async move {
            guard(&ctx, args.number, args.review_id, ReviewAction::Submit).await?;
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .param("review_id", args.review_id)
                .body(&SubmitBody {
                    body: args.body.as_deref(),
                    event: args.event,
                })?;
            let review: RemoteReviewState = ctx.fetch(req).await?;
            Ok(ReviewTransition {
                id: args.review_id,
                state: ReviewState::from_remote(review.state.as_deref()),
                status: Status::Submitted,
            })
        },
    )
}
