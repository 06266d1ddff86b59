//! Tool name constants.
//!
//! Use these instead of hard-coded strings when filtering or dispatching.

// ── Issues ──────────────────────────────────────────────────────────
pub const CREATE_ISSUE: &str = "create_issue";
pub const LIST_ISSUES: &str = "list_issues";
pub const UPDATE_ISSUE: &str = "update_issue";
pub const CLOSE_ISSUE: &str = "close_issue";

// ── Assignees ───────────────────────────────────────────────────────
pub const ADD_ISSUE_ASSIGNEES: &str = "add_issue_assignees";
pub const REMOVE_ISSUE_ASSIGNEES: &str = "remove_issue_assignees";
pub const CHECK_REPO_ASSIGNEE: &str = "check_repo_assignee";
pub const LIST_REPO_ASSIGNEES: &str = "list_repo_assignees";

// ── Issue comments ──────────────────────────────────────────────────
pub const LIST_ISSUE_COMMENTS: &str = "list_issue_comments";
pub const CREATE_ISSUE_COMMENT: &str = "create_issue_comment";
pub const UPDATE_ISSUE_COMMENT: &str = "update_issue_comment";
pub const DELETE_ISSUE_COMMENT: &str = "delete_issue_comment";

// ── Labels ──────────────────────────────────────────────────────────
pub const LIST_REPO_LABELS: &str = "list_repo_labels";
pub const CREATE_REPO_LABEL: &str = "create_repo_label";
pub const UPDATE_REPO_LABEL: &str = "update_repo_label";
pub const DELETE_REPO_LABEL: &str = "delete_repo_label";
pub const SET_ISSUE_LABELS: &str = "set_issue_labels";
pub const ADD_ISSUE_LABELS: &str = "add_issue_labels";
pub const REMOVE_ISSUE_LABEL: &str = "remove_issue_label";

// ── Milestones ──────────────────────────────────────────────────────
pub const LIST_MILESTONES: &str = "list_milestones";
pub const CREATE_MILESTONE: &str = "create_milestone";
pub const UPDATE_MILESTONE: &str = "update_milestone";
pub const DELETE_MILESTONE: &str = "delete_milestone";

// ── Branches ────────────────────────────────────────────────────────
pub const LIST_BRANCHES: &str = "list_branches";
pub const GET_BRANCH: &str = "get_branch";
pub const RENAME_BRANCH: &str = "rename_branch";
pub const MERGE_BRANCH: &str = "merge_branch";

// ── Pull requests ───────────────────────────────────────────────────
pub const CREATE_PULL: &str = "create_pull";
pub const LIST_PULLS: &str = "list_pulls";
pub const GET_PULL: &str = "get_pull";
pub const UPDATE_PULL: &str = "update_pull";
pub const LIST_PULL_COMMITS: &str = "list_pull_commits";
pub const LIST_PULL_FILES: &str = "list_pull_files";
pub const CHECK_PULL_MERGED: &str = "check_pull_merged";
pub const MERGE_PULL: &str = "merge_pull";
pub const UPDATE_PULL_BRANCH: &str = "update_pull_branch";

// ── Review comments ─────────────────────────────────────────────────
pub const LIST_REPO_REVIEW_COMMENTS: &str = "list_repo_review_comments";
pub const GET_REVIEW_COMMENT: &str = "get_review_comment";
pub const UPDATE_REVIEW_COMMENT: &str = "update_review_comment";
pub const DELETE_REVIEW_COMMENT: &str = "delete_review_comment";
pub const LIST_PULL_REVIEW_COMMENTS: &str = "list_pull_review_comments";
pub const CREATE_PULL_REVIEW_COMMENT: &str = "create_pull_review_comment";
pub const REPLY_TO_REVIEW_COMMENT: &str = "reply_to_review_comment";

// ── Review requests ─────────────────────────────────────────────────
pub const GET_REQUESTED_REVIEWERS: &str = "get_requested_reviewers";
pub const REQUEST_REVIEWERS: &str = "request_reviewers";
pub const REMOVE_REQUESTED_REVIEWERS: &str = "remove_requested_reviewers";

// ── Reviews ─────────────────────────────────────────────────────────
pub const LIST_PULL_REVIEWS: &str = "list_pull_reviews";
pub const CREATE_PULL_REVIEW: &str = "create_pull_review";
pub const GET_PULL_REVIEW: &str = "get_pull_review";
pub const UPDATE_PULL_REVIEW: &str = "update_pull_review";
pub const DELETE_PENDING_PULL_REVIEW: &str = "delete_pending_pull_review";
pub const LIST_REVIEW_COMMENTS_FOR_REVIEW: &str = "list_review_comments_for_review";
pub const DISMISS_PULL_REVIEW: &str = "dismiss_pull_review";
pub const SUBMIT_PULL_REVIEW: &str = "submit_pull_review";
