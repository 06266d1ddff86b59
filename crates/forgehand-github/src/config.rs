//! Ambient configuration shared by every forge tool.
//!
//! [`ForgeConfig`] is resolved once at startup (from the environment, CLI
//! flags or code) and then shared read-only behind an `Arc`. Missing values
//! are not an error here: they surface as [`ToolError::Configuration`] the
//! first time a tool needs them, before any request is sent.

use std::fmt;
use std::time::Duration;

use forgehand::ToolError;

/// Default REST API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Owner and repository every tool call targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Configuration for the forge tools.
#[derive(Clone)]
pub struct ForgeConfig {
    /// Personal access token. Default: none.
    pub token: Option<String>,
    /// Repository owner (user or organization). Default: none.
    pub owner: Option<String>,
    /// Repository name. Default: none.
    pub repo: Option<String>,
    /// REST API root. Default: `https://api.github.com`.
    pub api_base: String,
    /// `User-Agent` header. Default: `forgehand/<version>`.
    pub user_agent: String,
    /// Per-request timeout. Default: 30 seconds.
    pub timeout: Duration,
    /// Check review state locally before submit/dismiss/delete. Default: off.
    pub review_guard: bool,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            token: None,
            owner: None,
            repo: None,
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: concat!("forgehand/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: DEFAULT_TIMEOUT,
            review_guard: false,
        }
    }
}

impl fmt::Debug for ForgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForgeConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("review_guard", &self.review_guard)
            .finish()
    }
}

impl ForgeConfig {
    /// Read configuration from process environment variables.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `GITHUB_PAT` (else `GITHUB_TOKEN`) | `token` |
    /// | `OWNER` | `owner` |
    /// | `REPO` | `repo` |
    /// | `GITHUB_API_URL` | `api_base` |
    /// | `FORGEHAND_TIMEOUT_SECS` | `timeout` |
    /// | `FORGEHAND_REVIEW_GUARD` | `review_guard` |
    pub fn from_env() -> Result<Self, ToolError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset. A timeout or guard value that does not
    /// parse is a configuration error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ToolError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self {
            token: get("GITHUB_PAT").or_else(|| get("GITHUB_TOKEN")),
            owner: get("OWNER"),
            repo: get("REPO"),
            ..Self::default()
        };

        if let Some(base) = get("GITHUB_API_URL") {
            config.api_base = base;
        }
        if let Some(secs) = get("FORGEHAND_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                ToolError::Configuration(format!(
                    "FORGEHAND_TIMEOUT_SECS must be a whole number of seconds, got '{secs}'"
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(flag) = get("FORGEHAND_REVIEW_GUARD") {
            config.review_guard = parse_flag(&flag).ok_or_else(|| {
                ToolError::Configuration(format!(
                    "FORGEHAND_REVIEW_GUARD must be true/false/1/0, got '{flag}'"
                ))
            })?;
        }
        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_repo(mut self, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self.repo = Some(repo.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_review_guard(mut self, enabled: bool) -> Self {
        self.review_guard = enabled;
        self
    }

    /// The target repository, or a configuration error naming what is missing.
    pub fn repo_ref(&self) -> Result<RepoRef, ToolError> {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => Ok(RepoRef {
                owner: owner.clone(),
                repo: repo.clone(),
            }),
            (None, Some(_)) => Err(ToolError::Configuration(
                "repository owner is not set (OWNER or --owner)".into(),
            )),
            (Some(_), None) => Err(ToolError::Configuration(
                "repository name is not set (REPO or --repo)".into(),
            )),
            (None, None) => Err(ToolError::Configuration(
                "repository owner and name are not set (OWNER/REPO or --owner/--repo)".into(),
            )),
        }
    }

    /// The access token, or a configuration error.
    pub fn token(&self) -> Result<&str, ToolError> {
        self.token.as_deref().ok_or_else(|| {
            ToolError::Configuration("access token is not set (GITHUB_PAT or GITHUB_TOKEN)".into())
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ForgeConfig::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("forgehand/"));
        assert!(!config.review_guard);
        assert!(config.token.is_none());
    }

    #[test]
    fn reads_all_variables() {
        let config = ForgeConfig::from_lookup(lookup(&[
            ("GITHUB_PAT", "ghp_secret"),
            ("OWNER", "octo"),
            ("REPO", "hello"),
            ("GITHUB_API_URL", "http://127.0.0.1:9000"),
            ("FORGEHAND_TIMEOUT_SECS", "5"),
            ("FORGEHAND_REVIEW_GUARD", "true"),
        ]))
        .unwrap();
        assert_eq!(config.token().unwrap(), "ghp_secret");
        assert_eq!(config.repo_ref().unwrap().to_string(), "octo/hello");
        assert_eq!(config.api_base, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.review_guard);
    }

    #[test]
    fn token_falls_back_to_github_token() {
        let config =
            ForgeConfig::from_lookup(lookup(&[("GITHUB_PAT", "  "), ("GITHUB_TOKEN", "ghs_x")]))
                .unwrap();
        assert_eq!(config.token.as_deref(), Some("ghs_x"));
    }

    #[test]
    fn bad_timeout_is_configuration_error() {
        let err = ForgeConfig::from_lookup(lookup(&[("FORGEHAND_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ToolError::Configuration(ref m) if m.contains("soon")));

        let err = ForgeConfig::from_lookup(lookup(&[("FORGEHAND_REVIEW_GUARD", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ToolError::Configuration(_)));
    }

    #[test]
    fn missing_values_surface_on_use() {
        let config = ForgeConfig::from_lookup(lookup(&[("OWNER", "octo")])).unwrap();
        assert!(matches!(config.repo_ref(), Err(ToolError::Configuration(ref m)) if m.contains("REPO")));
        assert!(matches!(config.token(), Err(ToolError::Configuration(_))));
    }

    #[test]
    fn debug_redacts_token() {
        let config = ForgeConfig::default().with_token("ghp_secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
