//! Result shapes and remote projections shared across tool families.
//!
//! Remote projections (`Remote*`) name only the fields a tool reads;
//! everything else in the payload is ignored. Result structs always
//! serialize every field, with `null` for absent values, so a tool's output
//! has the same keys on every call.

use serde::{Deserialize, Serialize};

/// Outcome marker carried by mutation results.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Created,
    Updated,
    Closed,
    Deleted,
    Renamed,
    Merged,
    Noop,
    Ok,
    Failed,
    Requested,
    Removed,
    Dismissed,
    Submitted,
}

/// `{items: [...]}`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ItemList<T> {
    pub items: Vec<T>,
}

impl<T> ItemList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for ItemList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// `{number, url, status}` for issues, milestones and pull requests.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NumberedChange {
    pub number: u64,
    pub url: Option<String>,
    pub status: Status,
}

/// `{id, url, status}` for comments.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CommentChange {
    pub id: u64,
    pub url: Option<String>,
    pub status: Status,
}

/// `{id, status}` for deletions and body-only updates.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IdStatus {
    pub id: u64,
    pub status: Status,
}

/// `{number, status}`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NumberStatus {
    pub number: u64,
    pub status: Status,
}

// ── Remote projections ─────────────────────────────────────────────

#[derive(Deserialize, Debug, Default)]
pub struct RemoteUser {
    pub login: Option<String>,
}

/// The login of an optional user object.
pub fn login(user: Option<RemoteUser>) -> Option<String> {
    user.and_then(|u| u.login)
}

/// Anything identified by `number` with an `html_url`.
#[derive(Deserialize, Debug)]
pub struct RemoteNumbered {
    pub number: u64,
    pub html_url: Option<String>,
}

impl RemoteNumbered {
    pub fn into_change(self, status: Status) -> NumberedChange {
        NumberedChange {
            number: self.number,
            url: self.html_url,
            status,
        }
    }
}

/// Anything identified by `id` with an `html_url`.
#[derive(Deserialize, Debug)]
pub struct RemoteComment {
    pub id: u64,
    pub html_url: Option<String>,
}

impl RemoteComment {
    pub fn into_change(self, status: Status) -> CommentChange {
        CommentChange {
            id: self.id,
            url: self.html_url,
            status,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct RemoteRef {
    #[serde(rename = "ref")]
    pub ref_name: Option<String>,
}

/// The ref name of an optional `head`/`base` object.
pub fn ref_name(r: Option<RemoteRef>) -> Option<String> {
    r.and_then(|r| r.ref_name)
}
