//! Branch tools: list, get, rename, merge.

use forgehand::tools::SchemaTool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::args;
use super::shape::{ItemList, Status};
use super::{ForgeContext, ForgeToolKind};
use crate::filter::KeywordFilter;

#[derive(Deserialize, JsonSchema, Debug)]
pub struct ListBranchesArgs {
    /// Only protected (true) or unprotected (false) branches.
    #[serde(default)]
    pub protected: Option<bool>,
    /// Page size.
    #[schemars(range(min = 1, max = 100))]
    #[serde(default = "args::limit_30")]
    pub limit: u32,
    /// One word; keeps branches whose name contains it.
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct BranchArgs {
    /// Branch name.
    #[schemars(length(min = 1))]
    pub branch: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct RenameBranchArgs {
    /// Current branch name.
    #[schemars(length(min = 1))]
    pub branch: String,
    /// New branch name.
    #[schemars(length(min = 1))]
    pub new_name: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
pub struct MergeBranchArgs {
    /// Branch to merge into.
    #[schemars(length(min = 1))]
    pub base: String,
    /// Branch name or commit SHA to merge from.
    #[schemars(length(min = 1))]
    pub head: String,
    #[serde(default)]
    pub commit_message: Option<String>,
}

#[derive(Serialize)]
struct BranchQuery {
    protected: Option<bool>,
    per_page: u32,
}

#[derive(Serialize)]
struct RenameBody<'a> {
    new_name: &'a str,
}

#[derive(Serialize)]
struct MergeBody<'a> {
    base: &'a str,
    head: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    commit_message: Option<&'a str>,
}

#[derive(Deserialize, Debug, Default)]
struct RemoteLinks {
    html: Option<String>,
    #[serde(rename = "self")]
    self_link: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RemoteCommitRef {
    sha: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RemoteBranch {
    name: String,
    #[serde(default)]
    protected: bool,
    commit: Option<RemoteCommitRef>,
    protection_url: Option<String>,
    #[serde(rename = "_links", default)]
    links: RemoteLinks,
}

impl RemoteBranch {
    fn commit_sha(&mut self) -> Option<String> {
        self.commit.take().and_then(|c| c.sha)
    }
}

#[derive(Deserialize, Debug)]
struct RemoteRenamed {
    name: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RemoteCommitMessage {
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RemoteMergeCommit {
    sha: Option<String>,
    commit: Option<RemoteCommitMessage>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BranchItem {
    pub name: String,
    pub protected: bool,
    pub commit_sha: Option<String>,
    pub url: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BranchDetail {
    pub name: String,
    pub protected: bool,
    pub commit_sha: Option<String>,
    pub protection_url: Option<String>,
    pub link_html: Option<String>,
    pub link_self: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BranchRenamed {
    pub old_name: String,
    pub new_name: Option<String>,
    pub status: Status,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BranchMerge {
    pub base: String,
    pub head: String,
    pub sha: Option<String>,
    pub commit_message: Option<String>,
    pub status: Status,
}

/// 201 created a merge commit, 204 means base already contains head.
fn merge_status(status: u16) -> Status {
    match status {
        201 => Status::Merged,
        204 => Status::Noop,
        _ => Status::Ok,
    }
}

pub fn list_branches(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::ListBranches;
    ctx.tool(
        kind,
        kind.spec("List branches in the repository")
            .output_format("{items: [{name, protected, commit_sha, url}]}"),
        move |ctx, args: ListBranchesArgs| async move {
            let req = ctx.request(kind)?.query(&BranchQuery {
                protected: args.protected,
                per_page: args.limit,
            })?;
            let branches: Vec<RemoteBranch> = ctx.fetch(req).await?;
            let branches = KeywordFilter::new(args.keyword.as_deref())
                .apply(branches, |b| [Some(b.name.as_str())]);
            Ok(branches
                .into_iter()
                .map(|mut b| BranchItem {
                    commit_sha: b.commit_sha(),
                    url: b.links.html.or(b.links.self_link),
                    name: b.name,
                    protected: b.protected,
                })
                .collect::<ItemList<_>>())
        },
    )
}

pub fn get_branch(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::GetBranch;
    ctx.tool(
        kind,
        kind.spec("Get one branch by name")
            .output_format("{name, protected, commit_sha, protection_url, link_html, link_self}"),
        move |ctx, args: BranchArgs| async move {
            let req = ctx.request(kind)?.param("branch", &args.branch);
            let mut b: RemoteBranch = ctx.fetch(req).await?;
            Ok(BranchDetail {
                commit_sha: b.commit_sha(),
                name: b.name,
                protected: b.protected,
                protection_url: b.protection_url,
                link_html: b.links.html,
                link_self: b.links.self_link,
            })
        },
    )
}

pub fn rename_branch(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::RenameBranch;
    ctx.tool(
        kind,
        kind.spec("Rename a branch; open pull requests follow the new name")
            .output_format(r#"{old_name, new_name, status: "renamed"}"#),
        move |ctx, args: RenameBranchArgs| async move {
            let req = ctx
                .request(kind)?
                .param("branch", &args.branch)
                .body(&RenameBody {
                    new_name: &args.new_name,
                })?;
            let renamed: RemoteRenamed = ctx.fetch(req).await?;
            Ok(BranchRenamed {
                old_name: args.branch,
                new_name: renamed.name,
                status: Status::Renamed,
            })
        },
    )
}

pub fn merge_branch(ctx: &ForgeContext) -> SchemaTool {
    let kind = ForgeToolKind::MergeBranch;
    ctx.tool(
        kind,
        kind.spec("Merge a branch or commit into a base branch directly, without a pull request")
            .when_not_to_use("When a pull request exists for the change; use merge_pull")
            .output_format(r#"{base, head, sha, commit_message, status: "merged" | "noop" | "ok"}"#),
        move |ctx, args: MergeBranchArgs| async move {
            let req = ctx.request(kind)?.body(&MergeBody {
                base: &args.base,
                head: &args.head,
                commit_message: args.commit_message.as_deref(),
            })?;
            let resp = ctx.send(req).await?;
            let status = merge_status(resp.status);
            let merge: Option<RemoteMergeCommit> = resp.decode()?;
            let (sha, message) = match merge {
                Some(m) => (m.sha, m.commit.and_then(|c| c.message)),
                None => (None, None),
            };
            Ok(BranchMerge {
                base: args.base,
                head: args.head,
                sha,
                commit_message: message.or(args.commit_message),
                status,
            })
        },
    )
}
