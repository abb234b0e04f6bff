// MCP handler tests: tool listings and resource views

use crate::handler::SqlServerHandler;
use crate::stores::StoreServerHandler;
use crate::tests::test_helpers::seeded_store;
use crate::tools::{SqlTools, StoreTools};

#[test]
fn test_sql_tool_listing() {
    let mut names: Vec<String> = SqlTools::tools().into_iter().map(|tool| tool.name).collect();
    names.sort();

    assert_eq!(
        names,
        vec![
            "delete_data",
            "execute_query",
            "get_table_structure",
            "insert_data",
            "list_tables",
            "update_data",
        ]
    );
}

#[test]
fn test_store_tool_listing() {
    let mut names: Vec<String> = StoreTools::tools().into_iter().map(|tool| tool.name).collect();
    names.sort();

    assert_eq!(names, vec!["add_user", "store_info", "user_leave"]);
}

#[tokio::test]
async fn test_table_schema_resource_is_json() {
    let (_temp_dir, store) = seeded_store();
    let handler = SqlServerHandler::new(store);

    let text = handler.read_table_schema("tables://users/schema").await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(json["table"], "users");
    let columns = json["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 5);
    assert_eq!(columns[0]["name"], "id");
    assert_eq!(columns[0]["type"], "INTEGER");
    assert_eq!(columns[0]["primary_key"], true);
    assert_eq!(columns[1]["not_null"], true);
    assert_eq!(columns[4]["default"], "CURRENT_TIMESTAMP");
    assert!(columns[0]["default"].is_null());
}

#[tokio::test]
async fn test_unknown_resources_are_rejected() {
    let (_temp_dir, store) = seeded_store();
    let handler = SqlServerHandler::new(store);

    assert!(handler.read_table_schema("tables://missing/schema").await.is_err());
    assert!(handler.read_table_schema("files://users").await.is_err());
}

#[tokio::test]
async fn test_one_resource_per_table() {
    let (_temp_dir, store) = seeded_store();
    let handler = SqlServerHandler::new(store);

    let uris: Vec<String> = handler
        .table_resources()
        .await
        .unwrap()
        .into_iter()
        .map(|resource| resource.uri)
        .collect();

    assert_eq!(
        uris,
        vec!["tables://sqlite_sequence/schema", "tables://users/schema"]
    );
}

#[test]
fn test_greeting_text() {
    assert_eq!(
        StoreServerHandler::greeting("Ann"),
        "Hello, Ann! this is store manage"
    );
}
