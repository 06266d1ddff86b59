//! Argument enums and defaults shared by several tool families.

use chrono::DateTime;
use forgehand::ToolError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// State filter for list endpoints.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    Open,
    Closed,
    All,
}

/// State of a single issue, milestone or pull request.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OpenState {
    Open,
    Closed,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// Side of a diff a review comment is anchored to.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    #[serde(rename = "LEFT")]
    Left,
    #[serde(rename = "RIGHT")]
    Right,
}

pub fn open() -> StateFilter {
    StateFilter::Open
}

pub fn asc() -> Direction {
    Direction::Asc
}

pub fn desc() -> Direction {
    Direction::Desc
}

pub fn limit_20() -> u32 {
    20
}

pub fn limit_30() -> u32 {
    30
}

pub fn limit_50() -> u32 {
    50
}

pub fn limit_100() -> u32 {
    100
}

/// `?per_page=N` for list endpoints with no other query.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct PerPage {
    pub per_page: u32,
}

/// `{"body": ...}`
#[derive(Serialize, Debug)]
pub struct BodyOnly<'a> {
    pub body: &'a str,
}

/// Reject a timestamp that is not RFC 3339 (`2024-05-01T00:00:00Z`).
pub fn check_timestamp(field: &str, value: Option<&str>) -> Result<(), ToolError> {
    match value {
        Some(v) => DateTime::parse_from_rfc3339(v).map(|_| ()).map_err(|e| {
            ToolError::Validation(format!(
                "{field}: '{v}' is not an RFC 3339 timestamp ({e}); use e.g. 2024-05-01T00:00:00Z"
            ))
        }),
        None => Ok(()),
    }
}

/// Reject a list argument whose entries are blank.
pub fn check_entries(field: &str, values: &[String]) -> Result<(), ToolError> {
    match values.iter().position(|v| v.trim().is_empty()) {
        Some(i) => Err(ToolError::Validation(format!("{field}[{i}] must not be empty"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps() {
        assert!(check_timestamp("due_on", Some("2024-05-01T00:00:00Z")).is_ok());
        assert!(check_timestamp("due_on", Some("2024-05-01T09:30:00+02:00")).is_ok());
        assert!(check_timestamp("due_on", None).is_ok());
        let err = check_timestamp("due_on", Some("next friday")).unwrap_err();
        assert!(matches!(err, ToolError::Validation(ref m) if m.starts_with("due_on:")));
    }

    #[test]
    fn entries() {
        assert!(check_entries("labels", &["bug".into()]).is_ok());
        let err = check_entries("labels", &["bug".into(), " ".into()]).unwrap_err();
        assert!(err.to_string().contains("labels[1]"));
    }

    #[test]
    fn enums_use_protocol_spelling() {
        assert_eq!(serde_json::to_string(&Side::Left).unwrap(), r#""LEFT""#);
        assert_eq!(serde_json::to_string(&StateFilter::All).unwrap(), r#""all""#);
        let d: Direction = serde_json::from_str(r#""asc""#).unwrap();
        assert_eq!(d, Direction::Asc);
    }
}
