//! Remote call descriptors and the HTTP client that performs them.
//!
//! A [`ForgeRequest`] is a pure value: method, path template, path
//! parameters, query pairs and an optional JSON body. Tools build one from
//! validated arguments and hand it to a [`ForgeClient`], which performs
//! exactly one request. [`GitHubClient`] is the reqwest-backed
//! implementation; [`MockForge`](crate::mock::MockForge) is the scripted one
//! used in tests.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use forgehand::ToolError;
use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Url;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::{ForgeConfig, RepoRef};

/// Media type requested from the REST API.
pub const MEDIA_TYPE: &str = "application/vnd.github+json";

/// REST API version pinned by every request.
pub const API_VERSION: &str = "2022-11-28";

// ── Remote call descriptor ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fixed endpoint: method plus path template such as
/// `/repos/{owner}/{repo}/issues/{issue_number}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    pub method: Method,
    pub template: &'static str,
}

impl Route {
    pub const fn new(method: Method, template: &'static str) -> Self {
        Self { method, template }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method.as_str(), self.template)
    }
}

/// One request against a [`Route`].
#[derive(Debug, Clone, PartialEq)]
pub struct ForgeRequest {
    pub route: Route,
    /// Values for `{placeholders}` in the template.
    pub params: BTreeMap<String, String>,
    /// Query pairs, in insertion order.
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ForgeRequest {
    /// Start a request with `owner` and `repo` already bound.
    pub fn new(route: Route, repo: &RepoRef) -> Self {
        Self {
            route,
            params: BTreeMap::new(),
            query: Vec::new(),
            body: None,
        }
        .param("owner", &repo.owner)
        .param("repo", &repo.repo)
    }

    /// Bind a path parameter.
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    /// Flatten a serializable struct into query pairs.
    ///
    /// `null` fields and empty arrays are skipped, arrays are joined with
    /// `,`, and scalars are rendered without quotes.
    pub fn query<T: Serialize>(mut self, query: &T) -> Result<Self, ToolError> {
        let value = serde_json::to_value(query)
            .map_err(|e| ToolError::Validation(format!("query parameters: {e}")))?;
        let Value::Object(fields) = value else {
            return Err(ToolError::Validation(
                "query parameters must serialize to an object".into(),
            ));
        };
        for (key, value) in fields {
            let rendered = match value {
                Value::Null => continue,
                Value::Array(items) if items.is_empty() => continue,
                Value::Array(items) => items
                    .iter()
                    .map(scalar_to_string)
                    .collect::<Vec<_>>()
                    .join(","),
                other => scalar_to_string(&other),
            };
            self.query.push((key, rendered));
        }
        Ok(self)
    }

    /// Attach a JSON body.
    pub fn body<T: Serialize>(mut self, body: &T) -> Result<Self, ToolError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ToolError::Validation(format!("request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// The path segments with placeholders substituted, not yet
    /// percent-encoded. A placeholder without a bound value is an error.
    pub fn path_segments(&self) -> Result<Vec<String>, ToolError> {
        self.route
            .template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|segment| {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => self.params.get(name).cloned().ok_or_else(|| {
                        ToolError::Validation(format!(
                            "missing path parameter '{name}' for {}",
                            self.route
                        ))
                    }),
                    None => Ok(segment.to_string()),
                }
            })
            .collect()
    }

    /// The substituted path, for logging and assertions.
    pub fn path(&self) -> Result<String, ToolError> {
        Ok(format!("/{}", self.path_segments()?.join("/")))
    }

    /// Look up a bound query value.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Response ───────────────────────────────────────────────────────

/// A 2xx response. Empty bodies (204) decode as `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForgeResponse {
    pub status: u16,
    pub data: Value,
}

impl ForgeResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    /// Project the body into a typed shape. Unknown fields are ignored.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ToolError> {
        serde_json::from_value(self.data).map_err(|e| ToolError::Decode(e.to_string()))
    }
}

// ── Client trait ───────────────────────────────────────────────────

/// Boxed future returned by [`ForgeClient::request`].
pub type ForgeFuture<'a> = BoxFuture<'a, Result<ForgeResponse, ToolError>>;

/// Performs one request per call. Never retries.
///
/// Non-2xx responses are returned as [`ToolError::Remote`].
pub trait ForgeClient: Send + Sync {
    fn request(&self, request: ForgeRequest) -> ForgeFuture<'_>;
}

// ── GitHubClient ───────────────────────────────────────────────────

/// Async HTTP client for the GitHub REST API.
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: Url,
    token: Option<String>,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base.as_str())
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl GitHubClient {
    /// Build a client from configuration.
    ///
    /// A missing token is allowed here and reported on the first request.
    pub fn new(config: &ForgeConfig) -> Result<Self, ToolError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| ToolError::Configuration(format!("failed to build HTTP client: {e}")))?;
        let api_base = Url::parse(&config.api_base).map_err(|e| {
            ToolError::Configuration(format!("invalid API base URL '{}': {e}", config.api_base))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(ToolError::Configuration(format!(
                "API base URL '{}' cannot carry a path",
                config.api_base
            )));
        }
        Ok(Self {
            http,
            api_base,
            token: config.token.clone(),
        })
    }

    /// Resolve the full URL for a request. Path parameters are
    /// percent-encoded as single segments, so `feature/x` stays one segment.
    pub fn url(&self, request: &ForgeRequest) -> Result<Url, ToolError> {
        let segments = request.path_segments()?;
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| ToolError::Configuration("API base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments.iter());
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }

    async fn send(&self, request: ForgeRequest) -> Result<ForgeResponse, ToolError> {
        let token = self.token.as_deref().ok_or_else(|| {
            ToolError::Configuration("access token is not set (GITHUB_PAT or GITHUB_TOKEN)".into())
        })?;
        let url = self.url(&request)?;
        let method = request.route.method;

        debug!("Forge request: {} {}", method.as_str(), url.path());
        if let Some(body) = &request.body {
            trace!("Forge request body: {body}");
        }

        let mut builder = self
            .http
            .request(method.into(), url)
            .header(ACCEPT, MEDIA_TYPE)
            .header("X-GitHub-Api-Version", API_VERSION)
            .bearer_auth(token);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let resp = builder
            .send()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| ToolError::Transport(format!("failed to read response: {e}")))?;

        debug!(
            "Forge response: {} -> HTTP {} in {:.0}ms ({} bytes)",
            request.route,
            status,
            start.elapsed().as_secs_f64() * 1000.0,
            text.len()
        );
        trace!(
            "Forge response body: {}",
            text.chars().take(2000).collect::<String>()
        );

        if !(200..300).contains(&status) {
            return Err(ToolError::remote(status, remote_message(&text)));
        }

        let data = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|e| ToolError::Decode(format!("response is not JSON: {e}")))?
        };
        Ok(ForgeResponse { status, data })
    }
}

impl ForgeClient for GitHubClient {
    fn request(&self, request: ForgeRequest) -> ForgeFuture<'_> {
        self.send(request).boxed()
    }
}

/// Extract a readable message from an error body.
///
/// Uses the JSON `message` field and appends any `errors[]` details. Falls
/// back to the raw body.
pub fn remote_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str);

    let Some(message) = message else {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return "no response body".to_string();
        }
        let mut raw: String = trimmed.chars().take(500).collect();
        if trimmed.chars().count() > 500 {
            raw.push_str("...");
        }
        return raw;
    };

    let details: Vec<String> = parsed
        .as_ref()
        .and_then(|v| v.get("errors"))
        .and_then(Value::as_array)
        .map(|errors| errors.iter().filter_map(error_detail).collect())
        .unwrap_or_default();

    if details.is_empty() {
        message.to_string()
    } else {
        format!("{message} ({})", details.join("; "))
    }
}

fn error_detail(error: &Value) -> Option<String> {
    if let Some(s) = error.as_str() {
        return Some(s.to_string());
    }
    if let Some(m) = error.get("message").and_then(Value::as_str) {
        return Some(m.to_string());
    }
    let code = error.get("code").and_then(Value::as_str)?;
    match error.get("field").and_then(Value::as_str) {
        Some(field) => Some(format!("{field}: {code}")),
        None => Some(code.to_string()),
    }
}
