//! Scripted in-memory forge for tests.
//!
//! [`MockForge`] answers requests by [`Route`] and records every request it
//! receives, so tests can assert both on results and on what was (or was
//! not) sent.
//!
//! ```ignore
//! let mock = Arc::new(MockForge::new());
//! mock.reply(ForgeToolKind::GetBranch.route(), 200, json!({"name": "main"}));
//! let ctx = ForgeContext::new(mock.clone(), config);
//! // ... run tools ...
//! assert_eq!(mock.call_count(), 1);
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use forgehand::ToolError;
use futures::FutureExt;
use serde_json::Value;

use crate::client::{ForgeClient, ForgeFuture, ForgeRequest, ForgeResponse, Route};

type Handler = Box<dyn Fn(&ForgeRequest) -> Result<ForgeResponse, ToolError> + Send + Sync>;

enum Scripted {
    Reply(ForgeResponse),
    Fail { status: u16, message: String },
    Handler(Handler),
}

impl Scripted {
    fn answer(&self, request: &ForgeRequest) -> Result<ForgeResponse, ToolError> {
        match self {
            Scripted::Reply(resp) => Ok(resp.clone()),
            Scripted::Fail { status, message } => Err(ToolError::remote(*status, message.clone())),
            Scripted::Handler(handler) => handler(request),
        }
    }
}

/// A [`ForgeClient`] that replays scripted answers.
///
/// Answers queued for a route are used in order; the last one repeats.
/// A request to a route with nothing scripted fails with
/// [`ToolError::Transport`].
#[derive(Default)]
pub struct MockForge {
    script: Mutex<HashMap<Route, VecDeque<Scripted>>>,
    calls: Mutex<Vec<ForgeRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockForge {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, route: Route, scripted: Scripted) -> &Self {
        lock(&self.script).entry(route).or_default().push_back(scripted);
        self
    }

    /// Queue a success response.
    pub fn reply(&self, route: Route, status: u16, data: Value) -> &Self {
        self.push(route, Scripted::Reply(ForgeResponse::new(status, data)))
    }

    /// Queue a non-2xx response.
    pub fn fail(&self, route: Route, status: u16, message: impl Into<String>) -> &Self {
        self.push(
            route,
            Scripted::Fail {
                status,
                message: message.into(),
            },
        )
    }

    /// Queue a computed answer, for fakes that keep state across calls.
    pub fn respond_with(
        &self,
        route: Route,
        handler: impl Fn(&ForgeRequest) -> Result<ForgeResponse, ToolError> + Send + Sync + 'static,
    ) -> &Self {
        self.push(route, Scripted::Handler(Box::new(handler)))
    }

    /// Every request received, in order.
    pub fn calls(&self) -> Vec<ForgeRequest> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Requests received for one route.
    pub fn calls_to(&self, route: Route) -> Vec<ForgeRequest> {
        lock(&self.calls)
            .iter()
            .filter(|r| r.route == route)
            .cloned()
            .collect()
    }

    fn answer(&self, request: &ForgeRequest) -> Result<ForgeResponse, ToolError> {
        let mut script = lock(&self.script);
        let Some(queue) = script.get_mut(&request.route) else {
            return Err(ToolError::Transport(format!(
                "no reply scripted for {}",
                request.route
            )));
        };
        if queue.len() > 1
            && let Some(scripted) = queue.pop_front()
        {
            return scripted.answer(request);
        }
        match queue.front() {
            Some(scripted) => scripted.answer(request),
            None => Err(ToolError::Transport(format!(
                "no reply scripted for {}",
                request.route
            ))),
        }
    }
}

impl ForgeClient for MockForge {
    fn request(&self, request: ForgeRequest) -> ForgeFuture<'_> {
        lock(&self.calls).push(request.clone());
        let result = self.answer(&request);
        async move { result }.boxed()
    }
}
