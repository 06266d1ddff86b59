//! Assignee tools: add to and remove from an issue, check and list the
//! repository's assignable users.

use forgehand::tools::SchemaTool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::args::{self, PerPage};
use super::shape::{ItemList, RemoteUser, Status};
use super::{ForgeContext, ForgeToolKind};

#[derive(Deserialize, JsonSchema, Debug)]
pub struct IssueAssigneesArgs {
    /// Issue number.
    #[schemars(range(min = 1))]
    pub number: u64,
    /// Logins, at least one.
    #[schemars(length(min = 1))]
    pub assignees: Vec<String>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct CheckAssigneeArgs {
    /// Login to check.
    #[schemars(length(min = 1))]
    pub assignee: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ListAssigneesArgs {
    /// Page size.
    #[schemars(range(min = 1, max = 100))]
    #[serde(default = "args::limit_30")]
    pub limit: u32,
}

#[derive(Serialize)]
struct AssigneesBody<'a> {
    assignees: &'a [String],
}

#[derive(Deserialize, Debug)]
struct RemoteAssigned {
    number: u64,
    #[serde(default)]
    assignees: Vec<RemoteUser>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AssigneesChange {
    pub number: u64,
    pub assignees: Vec<String>,
    pub status: Status,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AssigneesRemoved {
    pub number: u64,
    pub removed: Vec<String>,
    pub status: Status,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Assignability {
    pub assignee: String,
    pub assignable: bool,
}

pub fn add_issue_assignees(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::AddIssueAssignees;
    ctx.tool(
        kind,
        kind.spec("Add assignees to an issue; existing assignees are kept")
            .when_to_use("When asked to assign someone to an issue")
            .when_not_to_use("When replacing all assignees; use update_issue with assignees")
            .output_format(r#"{number, assignees: [login], status: "updated"}"#),
        move |ctx, args: IssueAssigneesArgs| async move {
            args::check_entries("assignees", &args.assignees)?;
            let req = ctx
                .request(kind)?
                .param("issue_number", args.number)
                .body(&AssigneesBody {
                    assignees: &args.assignees,
                })?;
            let issue: RemoteAssigned = ctx.fetch(req).await?;
            Ok(AssigneesChange {
                number: issue.number,
                assignees: issue.assignees.into_iter().filter_map(|u| u.login).collect(),
                status: Status::Updated,
            })
        },
    )
}

pub fn remove_issue_assignees(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::RemoveIssueAssignees;
    ctx.tool(
        kind,
        kind.spec("Remove assignees from an issue")
            .when_to_use("When asked to unassign someone from an issue")
            .output_format(r#"{number, removed: [login], status: "updated"}"#),
        move |ctx, args: IssueAssigneesArgs| async move {
            args::check_entries("assignees", &args.assignees)?;
            let req = ctx
                .request(kind)?
                .param("issue_number", args.number)
                .body(&AssigneesBody {
                    assignees: &args.assignees,
                })?;
            ctx.send(req).await?;
            Ok(AssigneesRemoved {
                number: args.number,
                removed: args.assignees,
                status: Status::Updated,
            })
        },
    )
}

pub fn check_repo_assignee(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::CheckRepoAssignee;
    ctx.tool(
        kind,
        kind.spec("Check whether a user can be assigned to issues in the repository")
            .when_to_use("Before assigning someone who may not be a collaborator")
            .output_format("{assignee, assignable}"),
        move |ctx, args: CheckAssigneeArgs| async move {
            let req = ctx.request(kind)?.param("assignee", &args.assignee);
            let assignable = ctx.check(req).await?;
            Ok(Assignability {
                assignee: args.assignee,
                assignable,
            })
        },
    )
}

pub fn list_repo_assignees(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ListRepoAssignees;
    ctx.tool(
        kind,
        kind.spec("List the users who can be assigned to issues in the repository")
            .output_format("{items: [login]}"),
        move |ctx, args: ListAssigneesArgs| async move {
            let req = ctx.request(kind)?.query(&PerPage {
                per_page: args.limit,
            })?;
            let users: Vec<RemoteUser> = ctx.fetch(req).await?;
            Ok(users.into_iter().filter_map(|u| u.login).collect::<ItemList<_>>())
        },
    )
}
