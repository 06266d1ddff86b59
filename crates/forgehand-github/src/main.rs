//! Inspect and run the forge tools from the command line.
//!
//! Configuration comes from the environment (`GITHUB_PAT`, `OWNER`, `REPO`,
//! ...) and can be overridden with global flags. Logs go to stderr, filtered
//! by `FORGEHAND_LOG`.
//!
//! # Examples
//!
//! ```sh
//! # What is available
//! forgehand list --category pulls --read-only
//!
//! # Argument schema of one tool
//! forgehand schema merge_pull
//!
//! # One call
//! forgehand --owner octo --repo hello call list_issues --args '{"keyword": "crash"}'
//!
//! # Several independent calls, concurrently
//! forgehand batch calls.json
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use forgehand::tools::ToolSet;
use forgehand::{ToolError, ToolInvocation};
use forgehand_github::{ForgeConfig, ForgeContext, ForgeToolsExt, forge_tool_filter};
use serde_json::{Value, json};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Inspect and run GitHub tools for LLM agents.
#[derive(Parser, Debug)]
#[command(name = "forgehand", version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Repository owner (overrides OWNER)
    #[arg(long, global = true)]
    owner: Option<String>,

    /// Repository name (overrides REPO)
    #[arg(long, global = true)]
    repo: Option<String>,

    /// REST API root (overrides GITHUB_API_URL)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Per-request timeout in seconds (overrides FORGEHAND_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Check review state before submit, dismiss and delete
    #[arg(long, global = true)]
    review_guard: bool,

    /// Debug logging when FORGEHAND_LOG is unset
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tools with their descriptions
    List {
        /// Only tools in this category (repeatable)
        #[arg(long)]
        category: Vec<String>,

        /// Drop tools that change remote state
        #[arg(long)]
        read_only: bool,

        /// Print full function-calling definitions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a tool's argument schema
    Schema {
        tool: String,
    },
    /// Validate and execute one tool call
    Call {
        tool: String,

        /// Arguments as a JSON object
        #[arg(long, conflicts_with = "stdin")]
        args: Option<String>,

        /// Read the JSON arguments from stdin
        #[arg(long)]
        stdin: bool,
    },
    /// Run a JSON array of {name, arguments} calls concurrently
    Batch {
        file: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not a JSON array of {{name, arguments}}: {source}")]
    BatchFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Batch finished but at least one call failed; carries the first
    /// failure's exit code.
    #[error("{failed} of {total} calls failed")]
    BatchFailed {
        failed: usize,
        total: usize,
        code: i32,
    },
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Tool(e) => tool_exit_code(e),
            CliError::BatchFailed { code, .. } => *code,
            CliError::Read { .. } | CliError::BatchFile { .. } => 1,
        }
    }
}

fn tool_exit_code(error: &ToolError) -> i32 {
    match error {
        ToolError::Validation(_) => 2,
        ToolError::Configuration(_) => 3,
        ToolError::Remote { .. }
        | ToolError::Transport(_)
        | ToolError::Decode(_)
        | ToolError::Lifecycle { .. } => 4,
        ToolError::UnknownTool(_) => 1,
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("FORGEHAND_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn resolve_config(global: &GlobalArgs) -> Result<ForgeConfig, ToolError> {
    let mut config = ForgeConfig::from_env()?;
    if let Some(owner) = &global.owner {
        config.owner = Some(owner.clone());
    }
    if let Some(repo) = &global.repo {
        config.repo = Some(repo.clone());
    }
    if let Some(api_base) = &global.api_base {
        config.api_base = api_base.clone();
    }
    if let Some(secs) = global.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    if global.review_guard {
        config.review_guard = true;
    }
    debug!(?config, "Resolved configuration");
    Ok(config)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn print_json(value: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    );
}

/// One batch entry as printed: the result or the error, tagged by name.
fn batch_entry(name: &str, result: &Result<Value, ToolError>) -> Value {
    match result {
        Ok(value) => json!({"name": name, "ok": true, "result": value}),
        Err(e) => json!({
            "name": name,
            "ok": false,
            "error": {"kind": e.kind(), "status": e.status(), "message": e.to_string()},
        }),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli.global)?;
    let ctx = ForgeContext::from_config(config)?;
    let mut tools = ToolSet::new().with_forge_tools(&ctx);

    match cli.command {
        Command::List {
            category,
            read_only,
            json,
        } => {
            let categories: Vec<&str> = category.iter().map(String::as_str).collect();
            forge_tool_filter()
                .read_only(read_only)
                .restrict(&mut tools, &categories)?;
            let definitions = tools.definitions();
            if json {
                print_json(&json!(definitions));
            } else {
                for def in &definitions {
                    let summary = def.function.description.lines().next().unwrap_or_default();
                    println!("{:<36} {summary}", def.name());
                }
            }
        }
        Command::Schema { tool } => {
            let def = tools
                .definition(&tool)
                .ok_or_else(|| ToolError::UnknownTool(tool.clone()))?;
            print_json(&def.function.parameters);
        }
        Command::Call { tool, args, stdin } => {
            let arguments = if stdin {
                io::read_to_string(io::stdin()).map_err(|source| CliError::Read {
                    path: "stdin".into(),
                    source,
                })?
            } else {
                args.unwrap_or_else(|| "{}".into())
            };
            let value = tools.execute(&tool, &arguments).await?;
            print_json(&value);
        }
        Command::Batch { file } => {
            let text = read_file(&file)?;
            let calls: Vec<ToolInvocation> =
                serde_json::from_str(&text).map_err(|source| CliError::BatchFile {
                    path: file.display().to_string(),
                    source,
                })?;
            let results = tools.execute_batch(&calls).await;
            let entries: Vec<Value> = calls
                .iter()
                .zip(&results)
                .map(|(call, result)| batch_entry(&call.name, result))
                .collect();
            print_json(&Value::Array(entries));

            let failed: Vec<&ToolError> = results.iter().filter_map(|r| r.as_ref().err()).collect();
            if let Some(first) = failed.first() {
                return Err(CliError::BatchFailed {
                    failed: failed.len(),
                    total: results.len(),
                    code: tool_exit_code(first),
                });
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(e.exit_code());
    }
}
