//! The forge tool catalog.
//!
//! Every endpoint is one [`ForgeToolKind`] variant. A kind knows its name,
//! its [`Route`], its category and whether it mutates remote state;
//! [`ForgeToolKind::build`] turns it into a [`SchemaTool`] bound to a
//! [`ForgeContext`]. [`ForgeToolsExt`] registers the whole catalog on a
//! [`ToolSet`].
//!
//! | Module | Tools |
//! |--------|-------|
//! | [`issues`] | create, list, update, close |
//! | [`assignees`] | add, remove, check, list |
//! | [`comments`] | issue comments: list, create, update, delete |
//! | [`labels`] | repository labels and labels on an issue |
//! | [`milestones`] | list, create, update, delete |
//! | [`branches`] | list, get, rename, merge |
//! | [`pulls`] | pull requests, their commits, files and merging |
//! | [`review_comments`] | line comments on pull requests |
//! | [`review_requests`] | requested reviewers |
//! | [`reviews`] | the review lifecycle |

pub mod args;
pub mod assignees;
pub mod branches;
pub mod comments;
pub mod issues;
pub mod labels;
pub mod milestones;
pub mod names;
pub mod pulls;
pub mod review_comments;
pub mod review_requests;
pub mod reviews;
pub mod shape;

use std::future::Future;
use std::sync::Arc;

use forgehand::ToolError;
use forgehand::tools::{SchemaTool, ToolCategory, ToolFilter, ToolSet, ToolSpec, ToolSpecBuilder};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::{
    ForgeClient, ForgeRequest, ForgeResponse, GitHubClient, Method, Route,
};
use crate::config::ForgeConfig;

// ── Context ─────────────────────────────────────────────────────────

/// What every tool execution needs: the client and the configuration.
///
/// Cheap to clone; both halves are shared.
#[derive(Clone)]
pub struct ForgeContext {
    client: Arc<dyn ForgeClient>,
    config: Arc<ForgeConfig>,
}

impl ForgeContext {
    pub fn new(client: Arc<dyn ForgeClient>, config: ForgeConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    /// Context backed by a real [`GitHubClient`].
    pub fn from_config(config: ForgeConfig) -> Result<Self, ToolError> {
        let client = GitHubClient::new(&config)?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Start a request for an endpoint with owner and repo bound.
    ///
    /// Fails with [`ToolError::Configuration`] when they are not set.
    pub fn request(&self, kind: ForgeToolKind) -> Result<ForgeRequest, ToolError> {
        Ok(ForgeRequest::new(kind.route(), &self.config.repo_ref()?))
    }

    /// Perform one request.
    pub async fn send(&self, request: ForgeRequest) -> Result<ForgeResponse, ToolError> {
        self.client.request(request).await
    }

    /// Perform one request and project the body.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ForgeRequest) -> Result<T, ToolError> {
        self.send(request).await?.decode()
    }

    /// Perform a check-style request: 2xx is `true`, 404 is `false`, any
    /// other failure propagates.
    pub async fn check(&self, request: ForgeRequest) -> Result<bool, ToolError> {
        match self.send(request).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Bind a typed handler to this context.
    pub fn tool<A, O, F, Fut>(&self, kind: ForgeToolKind, spec: ToolSpecBuilder, handler: F) -> SchemaTool
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
        O: Serialize + Send + 'static,
        F: Fn(ForgeContext, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, ToolError>> + Send + 'static,
    {
        let ctx = self.clone();
        SchemaTool::new(spec, move |args: A| handler(ctx.clone(), args)).mutation(kind.is_mutation())
    }
}

impl std::fmt::Debug for ForgeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForgeContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ── Tool kinds ──────────────────────────────────────────────────────

/// One variant per remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForgeToolKind {
    CreateIssue,
    ListIssues,
    UpdateIssue,
    CloseIssue,
    AddIssueAssignees,
    RemoveIssueAssignees,
    CheckRepoAssignee,
    ListRepoAssignees,
    ListIssueComments,
    CreateIssueComment,
    UpdateIssueComment,
    DeleteIssueComment,
    ListRepoLabels,
    CreateRepoLabel,
    UpdateRepoLabel,
    DeleteRepoLabel,
    SetIssueLabels,
    AddIssueLabels,
    RemoveIssueLabel,
    ListMilestones,
    CreateMilestone,
    UpdateMilestone,
    DeleteMilestone,
    ListBranches,
    GetBranch,
    RenameBranch,
    MergeBranch,
    CreatePull,
    ListPulls,
    GetPull,
    UpdatePull,
    ListPullCommits,
    ListPullFiles,
    CheckPullMerged,
    MergePull,
    UpdatePullBranch,
    ListRepoReviewComments,
    GetReviewComment,
    UpdateReviewComment,
    DeleteReviewComment,
    ListPullReviewComments,
    CreatePullReviewComment,
    ReplyToReviewComment,
    GetRequestedReviewers,
    RequestReviewers,
    RemoveRequestedReviewers,
    ListPullReviews,
    CreatePullReview,
    GetPullReview,
    UpdatePullReview,
    DeletePendingPullReview,
    ListReviewCommentsForReview,
    DismissPullReview,
    SubmitPullReview,
}

const ISSUES: &str = "/repos/{owner}/{repo}/issues";
const ISSUE: &str = "/repos/{owner}/{repo}/issues/{issue_number}";
const ISSUE_ASSIGNEES: &str = "/repos/{owner}/{repo}/issues/{issue_number}/assignees";
const ISSUE_COMMENTS: &str = "/repos/{owner}/{repo}/issues/{issue_number}/comments";
const ISSUE_COMMENT: &str = "/repos/{owner}/{repo}/issues/comments/{comment_id}";
const ISSUE_LABELS: &str = "/repos/{owner}/{repo}/issues/{issue_number}/labels";
const LABELS: &str = "/repos/{owner}/{repo}/labels";
const LABEL: &str = "/repos/{owner}/{repo}/labels/{name}";
const MILESTONES: &str = "/repos/{owner}/{repo}/milestones";
const MILESTONE: &str = "/repos/{owner}/{repo}/milestones/{milestone_number}";
const PULLS: &str = "/repos/{owner}/{repo}/pulls";
const PULL: &str = "/repos/{owner}/{repo}/pulls/{pull_number}";
const PULL_MERGE: &str = "/repos/{owner}/{repo}/pulls/{pull_number}/merge";
const PULL_COMMENTS: &str = "/repos/{owner}/{repo}/pulls/{pull_number}/comments";
const REVIEW_COMMENT: &str = "/repos/{owner}/{repo}/pulls/comments/{comment_id}";
const REQUESTED_REVIEWERS: &str = "/repos/{owner}/{repo}/pulls/{pull_number}/requested_reviewers";
const REVIEWS: &str = "/repos/{owner}/{repo}/pulls/{pull_number}/reviews";
const REVIEW: &str = "/repos/{owner}/{repo}/pulls/{pull_number}/reviews/{review_id}";

impl ForgeToolKind {
    /// Every kind, in catalog order.
    pub const ALL: [ForgeToolKind; 54] = [
        Self::CreateIssue,
        Self::ListIssues,
        Self::UpdateIssue,
        Self::CloseIssue,
        Self::AddIssueAssignees,
        Self::RemoveIssueAssignees,
        Self::CheckRepoAssignee,
        Self::ListRepoAssignees,
        Self::ListIssueComments,
        Self::CreateIssueComment,
        Self::UpdateIssueComment,
        Self::DeleteIssueComment,
        Self::ListRepoLabels,
        Self::CreateRepoLabel,
        Self::UpdateRepoLabel,
        Self::DeleteRepoLabel,
        Self::SetIssueLabels,
        Self::AddIssueLabels,
        Self::RemoveIssueLabel,
        Self::ListMilestones,
        Self::CreateMilestone,
        Self::UpdateMilestone,
        Self::DeleteMilestone,
        Self::ListBranches,
        Self::GetBranch,
        Self::RenameBranch,
        Self::MergeBranch,
        Self::CreatePull,
        Self::ListPulls,
        Self::GetPull,
        Self::UpdatePull,
        Self::ListPullCommits,
        Self::ListPullFiles,
        Self::CheckPullMerged,
        Self::MergePull,
        Self::UpdatePullBranch,
        Self::ListRepoReviewComments,
        Self::GetReviewComment,
        Self::UpdateReviewComment,
        Self::DeleteReviewComment,
        Self::ListPullReviewComments,
        Self::CreatePullReviewComment,
        Self::ReplyToReviewComment,
        Self::GetRequestedReviewers,
        Self::RequestReviewers,
        Self::RemoveRequestedReviewers,
        Self::ListPullReviews,
        Self::CreatePullReview,
        Self::GetPullReview,
        Self::UpdatePullReview,
        Self::DeletePendingPullReview,
        Self::ListReviewCommentsForReview,
        Self::DismissPullReview,
        Self::SubmitPullReview,
    ];

    pub fn name(self) -> &'static str {
        use names::*;
        match self {
            Self::CreateIssue => CREATE_ISSUE,
            Self::ListIssues => LIST_ISSUES,
            Self::UpdateIssue => UPDATE_ISSUE,
            Self::CloseIssue => CLOSE_ISSUE,
            Self::AddIssueAssignees => ADD_ISSUE_ASSIGNEES,
            Self::RemoveIssueAssignees => REMOVE_ISSUE_ASSIGNEES,
            Self::CheckRepoAssignee => CHECK_REPO_ASSIGNEE,
            Self::ListRepoAssignees => LIST_REPO_ASSIGNEES,
            Self::ListIssueComments => LIST_ISSUE_COMMENTS,
            Self::CreateIssueComment => CREATE_ISSUE_COMMENT,
            Self::UpdateIssueComment => UPDATE_ISSUE_COMMENT,
            Self::DeleteIssueComment => DELETE_ISSUE_COMMENT,
            Self::ListRepoLabels => LIST_REPO_LABELS,
            Self::CreateRepoLabel => CREATE_REPO_LABEL,
            Self::UpdateRepoLabel => UPDATE_REPO_LABEL,
            Self::DeleteRepoLabel => DELETE_REPO_LABEL,
            Self::SetIssueLabels => SET_ISSUE_LABELS,
            Self::AddIssueLabels => ADD_ISSUE_LABELS,
            Self::RemoveIssueLabel => REMOVE_ISSUE_LABEL,
            Self::ListMilestones => LIST_MILESTONES,
            Self::CreateMilestone => CREATE_MILESTONE,
            Self::UpdateMilestone => UPDATE_MILESTONE,
            Self::DeleteMilestone => DELETE_MILESTONE,
            Self::ListBranches => LIST_BRANCHES,
            Self::GetBranch => GET_BRANCH,
            Self::RenameBranch => RENAME_BRANCH,
            Self::MergeBranch => MERGE_BRANCH,
            Self::CreatePull => CREATE_PULL,
            Self::ListPulls => LIST_PULLS,
            Self::GetPull => GET_PULL,
            Self::UpdatePull => UPDATE_PULL,
            Self::ListPullCommits => LIST_PULL_COMMITS,
            Self::ListPullFiles => LIST_PULL_FILES,
            Self::CheckPullMerged => CHECK_PULL_MERGED,
            Self::MergePull => MERGE_PULL,
            Self::UpdatePullBranch => UPDATE_PULL_BRANCH,
            Self::ListRepoReviewComments => LIST_REPO_REVIEW_COMMENTS,
            Self::GetReviewComment => GET_REVIEW_COMMENT,
            Self::UpdateReviewComment => UPDATE_REVIEW_COMMENT,
            Self::DeleteReviewComment => DELETE_REVIEW_COMMENT,
            Self::ListPullReviewComments => LIST_PULL_REVIEW_COMMENTS,
            Self::CreatePullReviewComment => CREATE_PULL_REVIEW_COMMENT,
            Self::ReplyToReviewComment => REPLY_TO_REVIEW_COMMENT,
            Self::GetRequestedReviewers => GET_REQUESTED_REVIEWERS,
            Self::RequestReviewers => REQUEST_REVIEWERS,
            Self::RemoveRequestedReviewers => REMOVE_REQUESTED_REVIEWERS,
            Self::ListPullReviews => LIST_PULL_REVIEWS,
            Self::CreatePullReview => CREATE_PULL_REVIEW,
            Self::GetPullReview => GET_PULL_REVIEW,
            Self::UpdatePullReview => UPDATE_PULL_REVIEW,
            Self::DeletePendingPullReview => DELETE_PENDING_PULL_REVIEW,
            Self::ListReviewCommentsForReview => LIST_REVIEW_COMMENTS_FOR_REVIEW,
            Self::DismissPullReview => DISMISS_PULL_REVIEW,
            Self::SubmitPullReview => SUBMIT_PULL_REVIEW,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// The endpoint this kind targets.
    pub fn route(self) -> Route {
        use Method::*;
        let (method, template) = match self {
            Self::CreateIssue => (Post, ISSUES),
            Self::ListIssues => (Get, ISSUES),
            Self::UpdateIssue | Self::CloseIssue => (Patch, ISSUE),
            Self::AddIssueAssignees => (Post, ISSUE_ASSIGNEES),
            Self::RemoveIssueAssignees => (Delete, ISSUE_ASSIGNEES),
            Self::CheckRepoAssignee => (Get, "/repos/{owner}/{repo}/assignees/{assignee}"),
            Self::ListRepoAssignees => (Get, "/repos/{owner}/{repo}/assignees"),
            Self::ListIssueComments => (Get, ISSUE_COMMENTS),
            Self::CreateIssueComment => (Post, ISSUE_COMMENTS),
            Self::UpdateIssueComment => (Patch, ISSUE_COMMENT),
            Self::DeleteIssueComment => (Delete, ISSUE_COMMENT),
            Self::ListRepoLabels => (Get, LABELS),
            Self::CreateRepoLabel => (Post, LABELS),
            Self::UpdateRepoLabel => (Patch, LABEL),
            Self::DeleteRepoLabel => (Delete, LABEL),
            Self::SetIssueLabels => (Put, ISSUE_LABELS),
            Self::AddIssueLabels => (Post, ISSUE_LABELS),
            Self::RemoveIssueLabel => (
                Delete,
                "/repos/{owner}/{repo}/issues/{issue_number}/labels/{name}",
            ),
            Self::ListMilestones => (Get, MILESTONES),
            Self::CreateMilestone => (Post, MILESTONES),
            Self::UpdateMilestone => (Patch, MILESTONE),
            Self::DeleteMilestone => (Delete, MILESTONE),
            Self::ListBranches => (Get, "/repos/{owner}/{repo}/branches"),
            Self::GetBranch => (Get, "/repos/{owner}/{repo}/branches/{branch}"),
            Self::RenameBranch => (Post, "/repos/{owner}/{repo}/branches/{branch}/rename"),
            Self::MergeBranch => (Post, "/repos/{owner}/{repo}/merges"),
            Self::CreatePull => (Post, PULLS),
            Self::ListPulls => (Get, PULLS),
            Self::GetPull => (Get, PULL),
            Self::UpdatePull => (Patch, PULL),
            Self::ListPullCommits => (Get, "/repos/{owner}/{repo}/pulls/{pull_number}/commits"),
            Self::ListPullFiles => (Get, "/repos/{owner}/{repo}/pulls/{pull_number}/files"),
            Self::CheckPullMerged => (Get, PULL_MERGE),
            Self::MergePull => (Put, PULL_MERGE),
            Self::UpdatePullBranch => (
                Put,
                "/repos/{owner}/{repo}/pulls/{pull_number}/update-branch",
            ),
            Self::ListRepoReviewComments => (Get, "/repos/{owner}/{repo}/pulls/comments"),
            Self::GetReviewComment => (Get, REVIEW_COMMENT),
            Self::UpdateReviewComment => (Patch, REVIEW_COMMENT),
            Self::DeleteReviewComment => (Delete, REVIEW_COMMENT),
            Self::ListPullReviewComments => (Get, PULL_COMMENTS),
            Self::CreatePullReviewComment => (Post, PULL_COMMENTS),
            Self::ReplyToReviewComment => (
                Post,
                "/repos/{owner}/{repo}/pulls/comments/{comment_id}/replies",
            ),
            Self::GetRequestedReviewers => (Get, REQUESTED_REVIEWERS),
            Self::RequestReviewers => (Post, REQUESTED_REVIEWERS),
            Self::RemoveRequestedReviewers => (Delete, REQUESTED_REVIEWERS),
            Self::ListPullReviews => (Get, REVIEWS),
            Self::CreatePullReview => (Post, REVIEWS),
            Self::GetPullReview => (Get, REVIEW),
            Self::UpdatePullReview => (Put, REVIEW),
            Self::DeletePendingPullReview => (Delete, REVIEW),
            Self::ListReviewCommentsForReview => (
                Get,
                "/repos/{owner}/{repo}/pulls/{pull_number}/reviews/{review_id}/comments",
            ),
            Self::DismissPullReview => (
                Put,
                "/repos/{owner}/{repo}/pulls/{pull_number}/reviews/{review_id}/dismissals",
            ),
            Self::SubmitPullReview => (
                Post,
                "/repos/{owner}/{repo}/pulls/{pull_number}/reviews/{review_id}/events",
            ),
        };
        Route::new(method, template)
    }

    /// Every endpoint except GET changes remote state.
    pub fn is_mutation(self) -> bool {
        self.route().method != Method::Get
    }

    /// The [`ToolFilter`] category this kind belongs to.
    pub fn category(self) -> &'static str {
        match self {
            Self::CreateIssue
            | Self::ListIssues
            | Self::UpdateIssue
            | Self::CloseIssue
            | Self::AddIssueAssignees
            | Self::RemoveIssueAssignees
            | Self::CheckRepoAssignee
            | Self::ListRepoAssignees
            | Self::ListIssueComments
            | Self::CreateIssueComment
            | Self::UpdateIssueComment
            | Self::DeleteIssueComment => "issues",
            Self::ListRepoLabels
            | Self::CreateRepoLabel
            | Self::UpdateRepoLabel
            | Self::DeleteRepoLabel
            | Self::SetIssueLabels
            | Self::AddIssueLabels
            | Self::RemoveIssueLabel => "labels",
            Self::ListMilestones
            | Self::CreateMilestone
            | Self::UpdateMilestone
            | Self::DeleteMilestone => "milestones",
            Self::ListBranches | Self::GetBranch | Self::RenameBranch | Self::MergeBranch => {
                "branches"
            }
            Self::CreatePull
            | Self::ListPulls
            | Self::GetPull
            | Self::UpdatePull
            | Self::ListPullCommits
            | Self::ListPullFiles
            | Self::CheckPullMerged
            | Self::MergePull
            | Self::UpdatePullBranch => "pulls",
            Self::ListRepoReviewComments
            | Self::GetReviewComment
            | Self::UpdateReviewComment
            | Self::DeleteReviewComment
            | Self::ListPullReviewComments
            | Self::CreatePullReviewComment
            | Self::ReplyToReviewComment
            | Self::GetRequestedReviewers
            | Self::RequestReviewers
            | Self::RemoveRequestedReviewers
            | Self::ListPullReviews
            | Self::CreatePullReview
            | Self::GetPullReview
            | Self::UpdatePullReview
            | Self::DeletePendingPullReview
            | Self::ListReviewCommentsForReview
            | Self::DismissPullReview
            | Self::SubmitPullReview => "reviews",
        }
    }

    /// Start the description for this kind.
    pub fn spec(self, purpose: &str) -> ToolSpecBuilder {
        ToolSpec::builder(self.name(), purpose)
    }

    /// Build the tool for this kind.
    pub fn build(self, ctx: &ForgeContext) -> SchemaTool {
        match self {
            Self::CreateIssue => issues::create_issue(ctx),
            Self::ListIssues => issues::list_issues(ctx),
            Self::UpdateIssue => issues::update_issue(ctx),
            Self::CloseIssue => issues::close_issue(ctx),
            Self::AddIssueAssignees => assignees::add_issue_assignees(ctx),
            Self::RemoveIssueAssignees => assignees::remove_issue_assignees(ctx),
            Self::CheckRepoAssignee => assignees::check_repo_assignee(ctx),
            Self::ListRepoAssignees => assignees::list_repo_assignees(ctx),
            Self::ListIssueComments => comments::list_issue_comments(ctx),
            Self::CreateIssueComment => comments::create_issue_comment(ctx),
            Self::UpdateIssueComment => comments::update_issue_comment(ctx),
            Self::DeleteIssueComment => comments::delete_issue_comment(ctx),
            Self::ListRepoLabels => labels::list_repo_labels(ctx),
            Self::CreateRepoLabel => labels::create_repo_label(ctx),
            Self::UpdateRepoLabel => labels::update_repo_label(ctx),
            Self::DeleteRepoLabel => labels::delete_repo_label(ctx),
            Self::SetIssueLabels => labels::set_issue_labels(ctx),
            Self::AddIssueLabels => labels::add_issue_labels(ctx),
            Self::RemoveIssueLabel => labels::remove_issue_label(ctx),
            Self::ListMilestones => milestones::list_milestones(ctx),
            Self::CreateMilestone => milestones::create_milestone(ctx),
            Self::UpdateMilestone => milestones::update_milestone(ctx),
            Self::DeleteMilestone => milestones::delete_milestone(ctx),
            Self::ListBranches => branches::list_branches(ctx),
            Self::GetBranch => branches::get_branch(ctx),
            Self::RenameBranch => branches::rename_branch(ctx),
            Self::MergeBranch => branches::merge_branch(ctx),
            Self::CreatePull => pulls::create_pull(ctx),
            Self::ListPulls => pulls::list_pulls(ctx),
            Self::GetPull => pulls::get_pull(ctx),
            Self::UpdatePull => pulls::update_pull(ctx),
            Self::ListPullCommits => pulls::list_pull_commits(ctx),
            Self::ListPullFiles => pulls::list_pull_files(ctx),
            Self::CheckPullMerged => pulls::check_pull_merged(ctx),
            Self::MergePull => pulls::merge_pull(ctx),
            Self::UpdatePullBranch => pulls::update_pull_branch(ctx),
            Self::ListRepoReviewComments => review_comments::list_repo_review_comments(ctx),
            Self::GetReviewComment => review_comments::get_review_comment(ctx),
            Self::UpdateReviewComment => review_comments::update_review_comment(ctx),
            Self::DeleteReviewComment => review_comments::delete_review_comment(ctx),
            Self::ListPullReviewComments => review_comments::list_pull_review_comments(ctx),
            Self::CreatePullReviewComment => review_comments::create_pull_review_comment(ctx),
            Self::ReplyToReviewComment => review_comments::reply_to_review_comment(ctx),
            Self::GetRequestedReviewers => review_requests::get_requested_reviewers(ctx),
            Self::RequestReviewers => review_requests::request_reviewers(ctx),
            Self::RemoveRequestedReviewers => review_requests::remove_requested_reviewers(ctx),
            Self::ListPullReviews => reviews::list_pull_reviews(ctx),
            Self::CreatePullReview => reviews::create_pull_review(ctx),
            Self::GetPullReview => reviews::get_pull_review(ctx),
            Self::UpdatePullReview => reviews::update_pull_review(ctx),
            Self::DeletePendingPullReview => reviews::delete_pending_pull_review(ctx),
            Self::ListReviewCommentsForReview => reviews::list_review_comments_for_review(ctx),
            Self::DismissPullReview => reviews::dismiss_pull_review(ctx),
            Self::SubmitPullReview => reviews::submit_pull_review(ctx),
        }
    }
}

// ── Registration ────────────────────────────────────────────────────

/// Extension trait for registering forge tools on a [`ToolSet`].
///
/// # Example
///
/// ```ignore
/// use forgehand::tools::ToolSet;
/// use forgehand_github::{ForgeConfig, ForgeContext, ForgeToolsExt};
///
/// let ctx = ForgeContext::from_config(ForgeConfig::from_env()?)?;
/// let tools = ToolSet::new().with_forge_tools(&ctx);
/// ```
pub trait ForgeToolsExt {
    /// Register every tool in the catalog.
    fn with_forge_tools(self, ctx: &ForgeContext) -> Self;

    /// Register a selection of tools.
    fn with_forge_tool_kinds(self, ctx: &ForgeContext, kinds: &[ForgeToolKind]) -> Self;
}

impl ForgeToolsExt for ToolSet {
    fn with_forge_tools(self, ctx: &ForgeContext) -> Self {
        self.with_forge_tool_kinds(ctx, &ForgeToolKind::ALL)
    }

    fn with_forge_tool_kinds(self, ctx: &ForgeContext, kinds: &[ForgeToolKind]) -> Self {
        kinds
            .iter()
            .fold(self, |set, kind| set.with(kind.build(ctx)))
    }
}

/// Category names, with when each is relevant.
pub const CATEGORIES: [(&str, &str); 6] = [
    (
        "issues",
        "When creating, listing, updating or closing issues, or managing their assignees and comments",
    ),
    ("labels", "When managing repository labels or the labels on an issue"),
    ("milestones", "When planning or tracking milestones and due dates"),
    ("branches", "When listing, inspecting, renaming or merging branches"),
    (
        "pulls",
        "When creating, listing, inspecting, updating or merging pull requests and their commits or files",
    ),
    (
        "reviews",
        "When reviewing pull requests: reviews, review comments, replies and requested reviewers",
    ),
];

/// A [`ToolFilter`] with one category per resource family.
pub fn forge_tool_filter() -> ToolFilter {
    CATEGORIES
        .iter()
        .fold(ToolFilter::new(), |filter, (category, when)| {
            let tools: Vec<&str> = ForgeToolKind::ALL
                .into_iter()
                .filter(|k| k.category() == *category)
                .map(ForgeToolKind::name)
                .collect();
            filter.with_category(ToolCategory::new(*category, &tools, *when))
        })
}
