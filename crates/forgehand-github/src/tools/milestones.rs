//! Milestone tools.

use forgehand::tools::SchemaTool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::args::{self, Direction, OpenState, StateFilter};
use super::shape::{ItemList, NumberStatus, RemoteNumbered, Status};
use super::{ForgeContext, ForgeToolKind};

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneSort {
    DueOn,
    Completeness,
}

fn due_on() -> MilestoneSort {
    MilestoneSort::DueOn
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ListMilestonesArgs {
    #[serde(default = "args::open")]
    pub state: StateFilter,
    #[serde(default = "due_on")]
    pub sort: MilestoneSort,
    #[serde(default = "args::asc")]
    pub direction: Direction,
    /// Page size.
    #[schemars(range(min = 1, max = 100))]
    #[serde(default = "args::limit_50")]
    pub limit: u32,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct CreateMilestoneArgs {
    #[schemars(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub state: Option<OpenState>,
    #[serde(default)]
    pub description: Option<String>,
    /// Due date as an RFC 3339 timestamp, e.g. "2024-05-01T00:00:00Z".
    #[serde(default)]
    pub due_on: Option<String>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct UpdateMilestoneArgs {
    /// Milestone number.
    #[schemars(range(min = 1))]
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub state: Option<OpenState>,
    #[serde(default)]
    pub description: Option<String>,
    /// Due date as an RFC 3339 timestamp.
    #[serde(default)]
    pub due_on: Option<String>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct MilestoneNumberArgs {
    /// Milestone number.
    #[schemars(range(min = 1))]
    pub number: u64,
}

#[derive(Serialize)]
struct MilestoneQuery {
    state: StateFilter,
    sort: MilestoneSort,
    direction: Direction,
    per_page: u32,
}

#[derive(Serialize)]
struct MilestoneFields<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<OpenState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_on: Option<&'a str>,
}

#[derive(Deserialize, Debug)]
struct RemoteMilestone {
    number: u64,
    title: Option<String>,
    state: Option<String>,
    due_on: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MilestoneItem {
    pub number: u64,
    pub title: Option<String>,
    pub state: Option<String>,
    pub due_on: Option<String>,
}

pub fn list_milestones(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ListMilestones;
    ctx.tool(
        kind,
        kind.spec("List milestones in the repository")
            .output_format("{items: [{number, title, state, due_on}]}"),
        move |ctx, args: ListMilestonesArgs| async move {
            let req = ctx.request(kind)?.query(&MilestoneQuery {
                state: args.state,
                sort: args.sort,
                direction: args.direction,
                per_page: args.limit,
            })?;
            let milestones: Vec<RemoteMilestone> = ctx.fetch(req).await?;
            Ok(milestones
                .into_iter()
                .map(|m| MilestoneItem {
                    number: m.number,
                    title: m.title,
                    state: m.state,
                    due_on: m.due_on,
                })
                .collect::<ItemList<_>>())
        },
    )
}

pub fn create_milestone(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::CreateMilestone;
    ctx.tool(
        kind,
        kind.spec("Create a milestone")
            .example(
                r#"create_milestone(title="v1.0", due_on="2024-05-01T00:00:00Z")"#,
                "A milestone due on 1 May 2024",
            )
            .output_format(r#"{number, url, status: "created"}"#),
        move |ctx, args: CreateMilestoneArgs| async move {
            args::check_timestamp("due_on", args.due_on.as_deref())?;
            let fields = MilestoneFields {
                title: Some(args.title.as_str()),
                state: args.state,
                description: args.description.as_deref(),
                due_on: args.due_on.as_deref(),
            };
            let req = ctx.request(kind)?.body(&fields)?;
            let milestone: RemoteNumbered = ctx.fetch(req).await?;
            Ok(milestone.into_change(Status::Created))
        },
    )
}

pub fn update_milestone(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::UpdateMilestone;
    ctx.tool(
        kind,
        kind.spec("Change a milestone's title, state, description or due date")
            .output_format(r#"{number, status: "updated"}"#),
        move |ctx, args: UpdateMilestoneArgs| async move {
            args::check_timestamp("due_on", args.due_on.as_deref())?;
            let fields = MilestoneFields {
                title: args.title.as_deref(),
                state: args.state,
                description: args.description.as_deref(),
                due_on: args.due_on.as_deref(),
            };
            let req = ctx
                .request(kind)?
                .param("milestone_number", args.number)
                .body(&fields)?;
            let milestone: RemoteNumbered = ctx.fetch(req).await?;
            Ok(NumberStatus {
                number: milestone.number,
                status: Status::Updated,
            })
        },
    )
}

pub fn delete_milestone(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::DeleteMilestone;
    ctx.tool(
        kind,
        kind.spec("Delete a milestone")
            .when_to_use("Only when explicitly asked to delete a milestone")
            .when_not_to_use("When a milestone is finished; close it with update_milestone")
            .output_format(r#"{number, status: "deleted"}"#),
        move |ctx, args: MilestoneNumberArgs| async move {
            let req = ctx
                .request(kind)?
                .param("milestone_number", args.number);
            ctx.send(req).await?;
            Ok(NumberStatus {
                number: args.number,
                status: Status::Deleted,
            })
        },
    )
}
