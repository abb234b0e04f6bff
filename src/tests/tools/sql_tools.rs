// SQL tool tests - the exact text each operation answers with

use crate::tests::test_helpers::{count_rows, rendered_row_count, seeded_store};
use crate::tools::{
    DeleteDataTool, ExecuteQueryTool, GetTableStructureTool, InsertDataTool, ListTablesTool,
    UpdateDataTool,
};

fn query(sql: &str) -> ExecuteQueryTool {
    ExecuteQueryTool {
        query: sql.to_string(),
        params: None,
    }
}

#[tokio::test]
async fn test_execute_query_select() {
    let (_temp_dir, store) = seeded_store();

    let text = query("SELECT name, age FROM users ORDER BY id").run(&store).await;

    assert!(text.starts_with("Query result (3 rows):\n+"), "{}", text);
    assert!(text.contains("| Zhang San | 30  |"), "{}", text);
    assert_eq!(rendered_row_count(&text), 3);
}

#[tokio::test]
async fn test_execute_query_empty_read() {
    let (_temp_dir, store) = seeded_store();

    let text = query("SELECT * FROM users WHERE age > 100").run(&store).await;

    assert_eq!(text, "Query completed, no rows returned.");
}

#[tokio::test]
async fn test_execute_query_write() {
    let (_temp_dir, store) = seeded_store();

    let text = query("INSERT INTO users (name, email, age) VALUES ('Zhao Liu', 'zhao@example.com', 28)")
        .run(&store)
        .await;

    assert_eq!(text, "Success! Rows affected: 1, last inserted id: 4");
}

#[tokio::test]
async fn test_execute_query_with_params() {
    let (_temp_dir, store) = seeded_store();

    let tool = ExecuteQueryTool {
        query: "SELECT name FROM users WHERE age = :age".to_string(),
        params: Some(r#"{"age": 35}"#.to_string()),
    };
    let text = tool.run(&store).await;

    assert!(text.contains("Wang Wu"), "{}", text);
    assert_eq!(rendered_row_count(&text), 1);
}

#[tokio::test]
async fn test_execute_query_bad_params_never_reach_the_store() {
    let (_temp_dir, store) = seeded_store();

    let tool = ExecuteQueryTool {
        query: "DELETE FROM users".to_string(),
        params: Some("[1, ".to_string()),
    };
    let text = tool.run(&store).await;

    assert!(text.starts_with("Error: invalid JSON in params:"), "{}", text);
    assert_eq!(count_rows(&store, "users"), 3);

    let tool = ExecuteQueryTool {
        query: "SELECT 1".to_string(),
        params: Some("42".to_string()),
    };
    assert_eq!(
        tool.run(&store).await,
        "Error: params must be a JSON array or object"
    );
}

#[tokio::test]
async fn test_execute_query_backend_error() {
    let (_temp_dir, store) = seeded_store();

    let text = query("SELECT * FROM nowhere").run(&store).await;

    assert!(text.starts_with("Error: "), "{}", text);
    assert!(text.contains("no such table"), "{}", text);
}

#[tokio::test]
async fn test_list_tables() {
    let (_temp_dir, store) = seeded_store();
    query("CREATE TABLE orders (id INTEGER)").run(&store).await;

    let text = ListTablesTool {}.run(&store).await;
    let names: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with('|'))
        .skip(1)
        .map(|line| line.trim_matches('|').trim())
        .collect();

    assert_eq!(names, vec!["orders", "sqlite_sequence", "users"]);
}

#[tokio::test]
async fn test_get_table_structure() {
    let (_temp_dir, store) = seeded_store();

    let text = GetTableStructureTool {
        table_name: "users".to_string(),
    }
    .run(&store)
    .await;

    assert_eq!(rendered_row_count(&text), 5);
    for header in ["cid", "name", "type", "notnull", "dflt_value", "pk"] {
        assert!(text.contains(header), "missing {} in {}", header, text);
    }
    assert!(text.contains("created_at"));
}

#[tokio::test]
async fn test_insert_data() {
    let (_temp_dir, store) = seeded_store();

    let text = InsertDataTool {
        table_name: "users".to_string(),
        data: r#"{"name": "A", "email": "a@x.com", "age": 1}"#.to_string(),
    }
    .run(&store)
    .await;
    assert_eq!(text, "Success! Rows affected: 1, last inserted id: 4");

    let text = query("SELECT * FROM users WHERE email='a@x.com'").run(&store).await;
    assert_eq!(rendered_row_count(&text), 1);
}

#[tokio::test]
async fn test_insert_data_decode_errors() {
    let (_temp_dir, store) = seeded_store();

    let insert = |data: &str| InsertDataTool {
        table_name: "users".to_string(),
        data: data.to_string(),
    };

    let text = insert("{name: 'A'}").run(&store).await;
    assert!(text.starts_with("Error: invalid JSON in data:"), "{}", text);

    let text = insert("[1, 2]").run(&store).await;
    assert_eq!(text, "Error: data must be a JSON object");

    let text = insert("{}").run(&store).await;
    assert_eq!(text, "Error: data must contain at least one column");

    assert_eq!(count_rows(&store, "users"), 3);
}

#[tokio::test]
async fn test_update_data() {
    let (_temp_dir, store) = seeded_store();

    let text = UpdateDataTool {
        table_name: "users".to_string(),
        data: r#"{"age": 31}"#.to_string(),
        condition: "name = 'Zhang San'".to_string(),
    }
    .run(&store)
    .await;
    assert_eq!(text, "Success! Rows affected: 1, last inserted id: none");

    let text = query("SELECT age FROM users WHERE name = 'Zhang San'").run(&store).await;
    assert!(text.contains("| 31  |"), "{}", text);
}

#[tokio::test]
async fn test_delete_data_blank_condition_deletes_all() {
    let (_temp_dir, store) = seeded_store();

    let text = DeleteDataTool {
        table_name: "users".to_string(),
        condition: String::new(),
    }
    .run(&store)
    .await;

    assert_eq!(text, "Success! Rows affected: 3, last inserted id: none");
    assert_eq!(count_rows(&store, "users"), 0);
}

#[tokio::test]
async fn test_delete_data_bad_condition_is_reported() {
    let (_temp_dir, store) = seeded_store();

    let text = DeleteDataTool {
        table_name: "users".to_string(),
        condition: "no_such_column = 1".to_string(),
    }
    .run(&store)
    .await;

    assert!(text.starts_with("Error: "), "{}", text);
    assert_eq!(count_rows(&store, "users"), 3);
}
