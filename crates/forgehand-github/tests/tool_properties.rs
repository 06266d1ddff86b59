//! Tool-level properties checked through the public registry against a
//! scripted forge.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use forgehand::tools::ToolSet;
use forgehand::{ToolError, ToolInvocation};
use forgehand_github::{
    ForgeConfig, ForgeContext, ForgeResponse, ForgeToolKind, ForgeToolsExt, MockForge,
    forge_tool_filter,
};
use serde_json::{Value, json};

fn setup() -> (Arc<MockForge>, ToolSet) {
    let mock = Arc::new(MockForge::new());
    let ctx = ForgeContext::new(
        mock.clone(),
        ForgeConfig::default().with_repo("octo", "hello"),
    );
    (mock, ToolSet::new().with_forge_tools(&ctx))
}

fn keys(value: &Value) -> Vec<String> {
    let mut keys: Vec<String> = value
        .as_object()
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default();
    keys.sort();
    keys
}

#[tokio::test]
async fn result_shape_ignores_unknown_remote_fields() {
    let (mock, tools) = setup();
    let route = ForgeToolKind::ListIssues.route();
    mock.reply(
        route,
        200,
        json!([{"number": 1, "title": "a", "html_url": "u", "labels": []}]),
    );
    let plain = tools.execute("list_issues", "{}").await.unwrap();

    let (mock, tools) = setup();
    mock.reply(
        route,
        200,
        json!([{
            "number": 1, "title": "a", "html_url": "u", "labels": [],
            "node_id": "I_kw", "reactions": {"+1": 3}, "user": {"login": "alice"},
            "pull_request": null, "locked": false
        }]),
    );
    let noisy = tools.execute("list_issues", "{}").await.unwrap();

    assert_eq!(plain, noisy);
    assert_eq!(keys(&noisy["items"][0]), ["labels", "number", "title", "url"]);
}

#[tokio::test]
async fn missing_required_field_makes_no_remote_call() {
    let (mock, tools) = setup();
    for (tool, args) in [
        ("create_issue", json!({"body": "no title"})),
        ("create_pull", json!({"title": "t", "head": "feature"})),
        ("get_branch", json!({})),
        ("create_issue_comment", json!({"number": 3})),
        ("dismiss_pull_review", json!({"number": 3, "review_id": 9})),
    ] {
        let err = tools.execute(tool, &args.to_string()).await.unwrap_err();
        assert!(
            matches!(err, ToolError::Validation(_)),
            "{tool}: expected validation error, got {err:?}"
        );
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn out_of_range_values_are_rejected_locally() {
    let (mock, tools) = setup();
    for (tool, args) in [
        ("list_issues", json!({"limit": 101})),
        ("list_repo_labels", json!({"limit": 0})),
        ("list_pulls", json!({"state": "merged"})),
        ("close_issue", json!({"number": 0})),
        ("create_issue", json!({"title": ""})),
    ] {
        let err = tools.execute(tool, &args.to_string()).await.unwrap_err();
        assert_eq!(err.kind(), "validation", "{tool}");
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn check_tools_turn_404_into_false() {
    let (mock, tools) = setup();
    mock.fail(ForgeToolKind::CheckPullMerged.route(), 404, "Not Found");
    mock.fail(ForgeToolKind::CheckRepoAssignee.route(), 404, "Not Found");

    let out = tools
        .execute("check_pull_merged", r#"{"number": 5}"#)
        .await
        .unwrap();
    assert_eq!(out, json!({"number": 5, "merged": false}));

    let out = tools
        .execute("check_repo_assignee", r#"{"assignee": "ghost"}"#)
        .await
        .unwrap();
    assert_eq!(out, json!({"assignee": "ghost", "assignable": false}));
}

#[tokio::test]
async fn check_tools_propagate_other_failures() {
    let (mock, tools) = setup();
    mock.fail(ForgeToolKind::CheckPullMerged.route(), 500, "Server Error");

    let err = tools
        .execute("check_pull_merged", r#"{"number": 5}"#)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn not_found_outside_check_tools_is_an_error() {
    let (mock, tools) = setup();
    mock.fail(ForgeToolKind::GetPull.route(), 404, "Not Found");

    let err = tools.execute("get_pull", r#"{"number": 404}"#).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn keyword_keeps_case_insensitive_matches() {
    let page = json!([
        {"number": 1, "title": "Fix login bug", "html_url": "u1", "labels": []},
        {"number": 2, "title": "Update docs", "html_url": "u2", "labels": []}
    ]);
    let numbers = |out: &Value| -> Vec<u64> {
        out["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["number"].as_u64().unwrap())
            .collect()
    };

    let (mock, tools) = setup();
    mock.reply(ForgeToolKind::ListIssues.route(), 200, page);

    let out = tools.execute("list_issues", r#"{"keyword": "bug"}"#).await.unwrap();
    assert_eq!(numbers(&out), [1]);
    let out = tools.execute("list_issues", r#"{"keyword": "BUG"}"#).await.unwrap();
    assert_eq!(numbers(&out), [1]);
    let out = tools.execute("list_issues", "{}").await.unwrap();
    assert_eq!(numbers(&out), [1, 2]);

    // The keyword never reaches the remote.
    assert!(
        mock.calls()
            .iter()
            .all(|c| c.query_value("keyword").is_none())
    );
}

#[tokio::test]
async fn keyword_applies_to_pull_bodies() {
    let (mock, tools) = setup();
    mock.reply(
        ForgeToolKind::ListPulls.route(),
        200,
        json!([
            {"number": 7, "title": "Refactor", "body": "Fixes the Login flow",
             "html_url": "p7", "state": "open", "draft": false,
             "head": {"ref": "feature"}, "base": {"ref": "main"}},
            {"number": 8, "title": "Docs", "body": null,
             "html_url": "p8", "state": "open", "draft": false,
             "head": {"ref": "docs"}, "base": {"ref": "main"}}
        ]),
    );
    let out = tools.execute("list_pulls", r#"{"keyword": "login"}"#).await.unwrap();
    let items = out["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["number"], 7);
}

#[tokio::test]
async fn reads_are_repeatable() {
    let (mock, tools) = setup();
    mock.reply(
        ForgeToolKind::GetBranch.route(),
        200,
        json!({"name": "main", "commit": {"sha": "abc"}, "protected": true}),
    );
    let args = r#"{"branch": "main"}"#;
    let first = tools.execute("get_branch", args).await.unwrap();
    let second = tools.execute("get_branch", args).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn creates_are_not_idempotent() {
    let (mock, tools) = setup();
    let next = Arc::new(AtomicU64::new(40));
    mock.respond_with(ForgeToolKind::CreateIssue.route(), move |_| {
        let number = next.fetch_add(1, Ordering::SeqCst);
        Ok(ForgeResponse::new(
            201,
            json!({"number": number, "html_url": format!("https://github.com/octo/hello/issues/{number}")}),
        ))
    });

    let args = r#"{"title": "Flaky test"}"#;
    let first = tools.execute("create_issue", args).await.unwrap();
    let second = tools.execute("create_issue", args).await.unwrap();
    assert_eq!(first["status"], "created");
    assert_ne!(first["number"], second["number"]);
    assert_eq!(mock.calls_to(ForgeToolKind::CreateIssue.route()).len(), 2);
}

#[tokio::test]
async fn created_label_shows_up_in_listing() {
    let (mock, tools) = setup();
    let store: Arc<Mutex<Vec<Value>>> = Arc::default();

    let created = store.clone();
    mock.respond_with(ForgeToolKind::CreateRepoLabel.route(), move |req| {
        let mut label = req.body.clone().unwrap_or_default();
        let name = label["name"].as_str().unwrap_or_default().to_string();
        label["url"] = json!(format!("https://api.github.com/repos/octo/hello/labels/{name}"));
        label["id"] = json!(1);
        created.lock().unwrap().push(label.clone());
        Ok(ForgeResponse::new(201, label))
    });
    let listed = store.clone();
    mock.respond_with(ForgeToolKind::ListRepoLabels.route(), move |_| {
        Ok(ForgeResponse::new(200, Value::Array(listed.lock().unwrap().clone())))
    });

    let out = tools
        .execute("create_repo_label", r#"{"name": "bug", "color": "ff0000"}"#)
        .await
        .unwrap();
    assert_eq!(out["status"], "created");

    let out = tools.execute("list_repo_labels", "{}").await.unwrap();
    let items = out["items"].as_array().unwrap();
    assert!(
        items
            .iter()
            .any(|l| l["name"] == "bug" && l["color"] == "ff0000")
    );
}

#[tokio::test]
async fn missing_owner_is_a_configuration_error() {
    let mock = Arc::new(MockForge::new());
    let config = ForgeConfig {
        repo: Some("hello".into()),
        ..ForgeConfig::default()
    };
    let ctx = ForgeContext::new(mock.clone(), config);
    let tools = ToolSet::new().with_forge_tools(&ctx);

    let err = tools.execute("list_repo_labels", "{}").await.unwrap_err();
    assert!(matches!(err, ToolError::Configuration(_)));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn registry_covers_the_catalog() {
    let (_mock, tools) = setup();
    assert_eq!(tools.len(), ForgeToolKind::ALL.len());

    let names: Vec<String> = tools.definitions().into_iter().map(|d| d.name().to_string()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    for kind in ForgeToolKind::ALL {
        assert_eq!(tools.is_mutation_tool(kind.name()), kind.is_mutation(), "{}", kind.name());
    }

    let err = tools.execute("list_everything", "{}").await.unwrap_err();
    assert!(matches!(err, ToolError::UnknownTool(_)));
}

#[tokio::test]
async fn read_only_filter_drops_mutations() {
    let (_mock, mut tools) = setup();
    forge_tool_filter()
        .read_only(true)
        .restrict(&mut tools, &["reviews"])
        .unwrap();
    let names = tools.names();
    assert!(names.contains(&"list_pull_reviews".to_string()));
    assert!(names.contains(&"get_requested_reviewers".to_string()));
    assert!(!names.contains(&"submit_pull_review".to_string()));
    assert!(!names.contains(&"list_issues".to_string()));
}

#[tokio::test]
async fn batch_keeps_input_order() {
    let (mock, tools) = setup();
    mock.reply(
        ForgeToolKind::GetBranch.route(),
        200,
        json!({"name": "main", "protected": false}),
    );
    mock.fail(ForgeToolKind::GetPull.route(), 404, "Not Found");

    let results = tools
        .execute_batch(&[
            ToolInvocation::new("get_pull", json!({"number": 1})),
            ToolInvocation::new("get_branch", json!({"branch": "main"})),
            ToolInvocation::new("no_such_tool", json!({})),
        ])
        .await;
    assert_eq!(results.len(), 3);
    assert!(results[0].as_ref().unwrap_err().is_not_found());
    assert_eq!(results[1].as_ref().unwrap()["name"], "main");
    assert!(matches!(results[2], Err(ToolError::UnknownTool(_))));
}
