//! Label tools: repository labels and the labels on an issue.

use forgehand::ToolError;
use forgehand::tools::SchemaTool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::args::{self, PerPage};
use super::shape::{ItemList, Status};
use super::{ForgeContext, ForgeToolKind};

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ListLabelsArgs {
    /// Page size.
    #[schemars(range(min = 1, max = 100))]
    #[serde(default = "args::limit_50")]
    pub limit: u32,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct CreateLabelArgs {
    /// Label name.
    #[schemars(length(min = 1))]
    pub name: String,
    /// Six hex digits without the leading '#', e.g. "d73a4a".
    #[schemars(regex(pattern = r"^[0-9a-fA-F]{6}$"))]
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct UpdateLabelArgs {
    /// The label's name as it is now.
    #[schemars(length(min = 1))]
    pub current_name: String,
    /// New name.
    #[serde(default)]
    pub new_name: Option<String>,
    /// Six hex digits without the leading '#'.
    #[schemars(regex(pattern = r"^[0-9a-fA-F]{6}$"))]
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct LabelNameArgs {
    /// Label name.
    #[schemars(length(min = 1))]
    pub name: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct IssueLabelsArgs {
    /// Issue number.
    #[schemars(range(min = 1))]
    pub number: u64,
    /// Label names. Omitted means none.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct RemoveIssueLabelArgs {
    /// Issue number.
    #[schemars(range(min = 1))]
    pub number: u64,
    /// Label name to take off the issue.
    #[schemars(length(min = 1))]
    pub name: String,
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Serialize, Default)]
struct LabelFields<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct LabelsBody<'a> {
    labels: &'a [String],
}

#[derive(Deserialize, Debug)]
struct RemoteLabel {
    name: String,
    color: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

// ── Results ─────────────────────────────────────────────────────────

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LabelItem {
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LabelCreated {
    pub name: String,
    pub url: Option<String>,
    pub status: Status,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LabelStatus {
    pub name: String,
    pub status: Status,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IssueLabels {
    pub number: u64,
    pub labels: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IssueLabelRemoved {
    pub number: u64,
    pub removed: String,
}

fn check_color(color: Option<&str>) -> Result<(), ToolError> {
    match color {
        Some(c) if c.len() != 6 || !c.chars().all(|ch| ch.is_ascii_hexdigit()) => Err(
            ToolError::Validation(format!("color: '{c}' must be six hex digits without '#'")),
        ),
        _ => Ok(()),
    }
}

async fn put_labels(
    ctx: &ForgeContext,
    kind: ForgeToolKind,
    args: IssueLabelsArgs,
) -> Result<IssueLabels, ToolError> {
    let labels = args.labels.unwrap_or_default();
    args::check_entries("labels", &labels)?;
    let req = ctx
        .request(kind)?
        .param("issue_number", args.number)
        .body(&LabelsBody { labels: &labels })?;
    let current: Vec<RemoteLabel> = ctx.fetch(req).await?;
    Ok(IssueLabels {
        number: args.number,
        labels: current.into_iter().map(|l| l.name).collect(),
    })
}

pub fn list_repo_labels(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ListRepoLabels;
    ctx.tool(
        kind,
        kind.spec("List the labels defined in the repository")
            .when_to_use("Before labelling an issue, to find the exact label names")
            .output_format("{items: [{name, color, description}]}"),
        move |ctx, args: ListLabelsArgs| async move {
            let req = ctx.request(kind)?.query(&PerPage {
                per_page: args.limit,
            })?;
            let labels: Vec<RemoteLabel> = ctx.fetch(req).await?;
            Ok(labels
                .into_iter()
                .map(|l| LabelItem {
                    name: l.name,
                    color: l.color,
                    description: l.description,
                })
                .collect::<ItemList<_>>())
        },
    )
}

pub fn create_repo_label(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::CreateRepoLabel;
    ctx.tool(
        kind,
        kind.spec("Create a label in the repository")
            .when_not_to_use("When putting an existing label on an issue; use add_issue_labels")
            .example(
                r#"create_repo_label(name="bug", color="ff0000")"#,
                "A red 'bug' label",
            )
            .output_format(r#"{name, url, status: "created"}"#),
        move |ctx, args: CreateLabelArgs| async move {
            check_color(args.color.as_deref())?;
            let fields = LabelFields {
                name: Some(args.name.as_str()),
                color: args.color.as_deref(),
                description: args.description.as_deref(),
                ..LabelFields::default()
            };
            let req = ctx.request(kind)?.body(&fields)?;
            let label: RemoteLabel = ctx.fetch(req).await?;
            Ok(LabelCreated {
                name: label.name,
                url: label.url,
                status: Status::Created,
            })
        },
    )
}

pub fn update_repo_label(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::UpdateRepoLabel;
    ctx.tool(
        kind,
        kind.spec("Rename a label or change its color or description")
            .output_format(r#"{name, status: "updated"}"#),
        move |ctx, args: UpdateLabelArgs| async move {
            check_color(args.color.as_deref())?;
            let fields = LabelFields {
                new_name: args.new_name.as_deref(),
                color: args.color.as_deref(),
                description: args.description.as_deref(),
                ..LabelFields::default()
            };
            let req = ctx
                .request(kind)?
                .param("name", &args.current_name)
                .body(&fields)?;
            let label: RemoteLabel = ctx.fetch(req).await?;
            Ok(LabelStatus {
                name: label.name,
                status: Status::Updated,
            })
        },
    )
}

pub fn delete_repo_label(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::DeleteRepoLabel;
    ctx.tool(
        kind,
        kind.spec("Delete a label from the repository; it is removed from every issue")
            .when_to_use("Only when explicitly asked to delete a label")
            .when_not_to_use("When taking a label off one issue; use remove_issue_label")
            .output_format(r#"{name, status: "deleted"}"#),
        move |ctx, args: LabelNameArgs| async move {
            let req = ctx.request(kind)?.param("name", &args.name);
            ctx.send(req).await?;
            Ok(LabelStatus {
                name: args.name,
                status: Status::Deleted,
            })
        },
    )
}

pub fn set_issue_labels(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::SetIssueLabels;
    ctx.tool(
        kind,
        kind.spec("Replace all labels on an issue; omitting labels clears them")
            .when_not_to_use("When adding to the existing labels; use add_issue_labels")
            .output_format("{number, labels: [name]}"),
        move |ctx, args: IssueLabelsArgs| async move { put_labels(&ctx, kind, args).await },
    )
}

pub fn add_issue_labels(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::AddIssueLabels;
    ctx.tool(
        kind,
        kind.spec("Add labels to an issue; existing labels are kept")
            .when_to_use("When asked to label or tag an issue. Check list_repo_labels for exact names")
            .output_format("{number, labels: [name]}"),
        move |ctx, args: IssueLabelsArgs| async move { put_labels(&ctx, kind, args).await },
    )
}

pub fn remove_issue_label(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::RemoveIssueLabel;
    ctx.tool(
        kind,
        kind.spec("Take one label off an issue")
            .output_format("{number, removed}"),
        move |ctx, args: RemoveIssueLabelArgs| async move {
            let req = ctx
                .request(kind)?
                .param("issue_number", args.number)
                .param("name", &args.name);
            ctx.send(req).await?;
            Ok(IssueLabelRemoved {
                number: args.number,
                removed: args.name,
            })
        },
    )
}
