//! GitHub issue, pull request, review and branch tools for LLM agents.
//!
//! Each tool validates its arguments against a JSON Schema, performs one
//! REST call and returns a small, stable result object. The framework half
//! (tool trait, registry, filtering, error taxonomy) lives in `forgehand`;
//! this crate supplies the catalog and the HTTP plumbing.
//!
//! # Library usage
//!
//! ```ignore
//! use forgehand::tools::ToolSet;
//! use forgehand_github::{ForgeConfig, ForgeContext, ForgeToolsExt};
//!
//! let ctx = ForgeContext::from_config(ForgeConfig::from_env()?)?;
//! let tools = ToolSet::new().with_forge_tools(&ctx);
//!
//! let issues = tools.execute("list_issues", r#"{"state": "open", "limit": 10}"#).await?;
//! ```
//!
//! Tests swap the HTTP client for [`MockForge`]:
//!
//! ```ignore
//! let mock = Arc::new(MockForge::new());
//! let ctx = ForgeContext::new(mock.clone(), ForgeConfig::default().with_repo("octo", "hello"));
//! ```
//!
//! # Binary
//!
//! ```sh
//! forgehand list --category reviews
//! forgehand schema create_issue
//! forgehand call list_repo_labels --args '{"limit": 5}'
//! forgehand batch calls.json
//! ```

pub mod client;
pub mod config;
pub mod filter;
pub mod mock;
pub mod tools;

pub use client::{ForgeClient, ForgeRequest, ForgeResponse, GitHubClient, Method, Route};
pub use config::{ForgeConfig, RepoRef};
pub use mock::MockForge;
pub use tools::{CATEGORIES, ForgeContext, ForgeToolKind, ForgeToolsExt, forge_tool_filter};
