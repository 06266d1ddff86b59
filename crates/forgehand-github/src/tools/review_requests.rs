//! Requested reviewer tools.

use forgehand::ToolError;
use forgehand::tools::SchemaTool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::args;
use super::shape::{RemoteUser, Status};
use super::{ForgeContext, ForgeToolKind};

#[derive(Deserialize, JsonSchema, Debug)]
pub struct PullNumberArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ReviewersArgs {
    /// Pull request number.
    #[schemars(range(min = 1))]
    pub number: u64,
    /// User logins.
    #[serde(default)]
    pub reviewers: Vec<String>,
    /// Team slugs.
    #[serde(default)]
    pub team_reviewers: Vec<String>,
}

impl ReviewersArgs {
    fn check(&self) -> Result<(), ToolError> {
        args::check_entries("reviewers", &self.reviewers)?;
        args::check_entries("team_reviewers", &self.team_reviewers)
    }
}

#[derive(Serialize)]
struct ReviewersBody<'a> {
    reviewers: &'a [String],
    team_reviewers: &'a [String],
}

#[derive(Deserialize, Debug)]
struct RemoteTeam {
    slug: Option<String>,
    name: Option<String>,
}

impl RemoteTeam {
    fn handle(self) -> Option<String> {
        self.slug.or(self.name)
    }
}

#[derive(Deserialize, Debug)]
struct RemoteRequested {
    #[serde(default)]
    users: Vec<RemoteUser>,
    #[serde(default)]
    teams: Vec<RemoteTeam>,
}

/// The pull request returned after requesting reviewers.
#[derive(Deserialize, Debug)]
struct RemoteRequestedOnPull {
    #[serde(default)]
    requested_reviewers: Vec<RemoteUser>,
    #[serde(default)]
    requested_teams: Vec<RemoteTeam>,
}

fn logins(users: Vec<RemoteUser>) -> Vec<String> {
    users.into_iter().filter_map(|u| u.login).collect()
}

fn team_handles(teams: Vec<RemoteTeam>) -> Vec<String> {
    teams.into_iter().filter_map(RemoteTeam::handle).collect()
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RequestedReviewers {
    pub number: u64,
    pub users: Vec<String>,
    pub teams: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReviewersRequested {
    pub number: u64,
    pub users: Vec<String>,
    pub teams: Vec<String>,
    pub status: Status,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RemovedReviewers {
    pub reviewers: Vec<String>,
    pub team_reviewers: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReviewersRemoved {
    pub number: u64,
    pub removed: RemovedReviewers,
    pub status: Status,
}

pub fn get_requested_reviewers(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::GetRequestedReviewers;
    ctx.tool(
        kind,
        kind.spec("List the users and teams whose review is requested on a pull request")
            .when_not_to_use("For reviews already given; use list_pull_reviews")
            .output_format("{number, users: [login], teams: [slug]}"),
        move |ctx, args: PullNumberArgs| async move {
            let req = ctx.request(kind)?.param("pull_number", args.number);
            let requested: RemoteRequested = ctx.fetch(req).await?;
            Ok(RequestedReviewers {
                number: args.number,
                users: logins(requested.users),
                teams: team_handles(requested.teams),
            })
        },
    )
}

pub fn request_reviewers(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::RequestReviewers;
    ctx.tool(
        kind,
        kind.spec("Request a review of a pull request from users or teams")
            .output_format(r#"{number, users: [login], teams: [slug], status: "requested"}"#),
        move |ctx, args: ReviewersArgs| async move {
            args.check()?;
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .body(&ReviewersBody {
                    reviewers: &args.reviewers,
                    team_reviewers: &args.team_reviewers,
                })?;
            let pull: RemoteRequestedOnPull = ctx.fetch(req).await?;
            Ok(ReviewersRequested {
                number: args.number,
                users: logins(pull.requested_reviewers),
                teams: team_handles(pull.requested_teams),
                status: Status::Requested,
            })
        },
    )
}

pub fn remove_requested_reviewers(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::RemoveRequestedReviewers;
    ctx.tool(
        kind,
        kind.spec("Withdraw review requests from users or teams")
            .output_format(
                r#"{number, removed: {reviewers, team_reviewers}, status: "removed"}"#,
            ),
        move |ctx, args: ReviewersArgs| async move {
            args.check()?;
            let req = ctx
                .request(kind)?
                .param("pull_number", args.number)
                .body(&ReviewersBody {
                    reviewers: &args.reviewers,
                    team_reviewers: &args.team_reviewers,
                })?;
            ctx.send(req).await?;
            Ok(ReviewersRemoved {
                number: args.number,
                removed: RemovedReviewers {
                    reviewers: args.reviewers,
                    team_reviewers: args.team_reviewers,
                },
                status: Status::Removed,
            })
        },
    )
}
