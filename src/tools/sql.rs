//! SQL tools - the operations exposed by `kestrel-sql`
//!
//! Every tool answers with text, including on failure: backend faults become
//! `Error: ...` lines via the shared renderer and decode faults are reported
//! without touching the store.

use rust_mcp_sdk::macros::{mcp_tool, JsonSchema};
use rust_mcp_sdk::schema::CallToolResult;
use rust_mcp_sdk::tool_box;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::formatting::format_result;
use super::text_result;
use crate::database::values::{parse_params, parse_row_data};
use crate::database::{QueryResult, SqlStore};

/// Run a blocking store operation off the async runtime.
async fn run_blocking<F>(store: &SqlStore, op: F) -> QueryResult
where
    F: FnOnce(&SqlStore) -> QueryResult + Send + 'static,
{
    let store = store.clone();
    match tokio::task::spawn_blocking(move || op(&store)).await {
        Ok(result) => result,
        Err(e) => {
            error!("❌ Store task failed: {}", e);
            QueryResult::error(format!("store task failed: {}", e))
        }
    }
}

#[mcp_tool(
    name = "execute_query",
    description = "Execute one SQL statement against the store. SELECT/PRAGMA return rows as a table; other statements are committed and report affected rows and the last inserted id.",
    title = "Execute SQL",
    idempotent_hint = false,
    destructive_hint = true,
    open_world_hint = false,
    read_only_hint = false
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ExecuteQueryTool {
    /// SQL statement, e.g. "SELECT * FROM users WHERE age > 30"
    pub query: String,
    /// Optional bind parameters as JSON: an array binds ?-placeholders in order, an object binds :name placeholders
    #[serde(default)]
    pub params: Option<String>,
}

impl ExecuteQueryTool {
    pub async fn run(&self, store: &SqlStore) -> String {
        debug!("🗄️  execute_query: {}", self.query);
        let params = match parse_params(self.params.as_deref()) {
            Ok(params) => params,
            Err(e) => return format_result(&QueryResult::error(e.to_string())),
        };

        let query = self.query.clone();
        let result = run_blocking(store, move |store| store.execute(&query, &params)).await;
        format_result(&result)
    }

    pub async fn call_tool(&self, store: &SqlStore) -> CallToolResult {
        text_result(self.run(store).await)
    }
}

#[mcp_tool(
    name = "get_table_structure",
    description = "Describe the columns of a table: name, declared type, NOT NULL flag, default value and primary-key position.",
    title = "Get Table Structure",
    idempotent_hint = true,
    destructive_hint = false,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetTableStructureTool {
    /// Table name, e.g. "users"
    pub table_name: String,
}

impl GetTableStructureTool {
    pub async fn run(&self, store: &SqlStore) -> String {
        let table = self.table_name.clone();
        let result = run_blocking(store, move |store| store.table_structure(&table)).await;
        format_result(&result)
    }

    pub async fn call_tool(&self, store: &SqlStore) -> CallToolResult {
        text_result(self.run(store).await)
    }
}

#[mcp_tool(
    name = "list_tables",
    description = "List every table in the store, sorted by name.",
    title = "List Tables",
    idempotent_hint = true,
    destructive_hint = false,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ListTablesTool {}

impl ListTablesTool {
    pub async fn run(&self, store: &SqlStore) -> String {
        let result = run_blocking(store, |store| store.list_tables()).await;
        format_result(&result)
    }

    pub async fn call_tool(&self, store: &SqlStore) -> CallToolResult {
        text_result(self.run(store).await)
    }
}

#[mcp_tool(
    name = "insert_data",
    description = "Insert one row. `data` is a JSON object of column -> value, e.g. {\"name\": \"Ann\", \"email\": \"ann@example.com\", \"age\": 30}.",
    title = "Insert Row",
    idempotent_hint = false,
    destructive_hint = false,
    open_world_hint = false,
    read_only_hint = false
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct InsertDataTool {
    /// Target table name
    pub table_name: String,
    /// JSON object mapping column names to values
    pub data: String,
}

impl InsertDataTool {
    pub async fn run(&self, store: &SqlStore) -> String {
        let data = match parse_row_data(&self.data, "data") {
            Ok(data) => data,
            Err(e) => return format_result(&QueryResult::error(e.to_string())),
        };

        let table = self.table_name.clone();
        let result = run_blocking(store, move |store| store.insert(&table, &data)).await;
        format_result(&result)
    }

    pub async fn call_tool(&self, store: &SqlStore) -> CallToolResult {
        text_result(self.run(store).await)
    }
}

#[mcp_tool(
    name = "update_data",
    description = "Update rows. `data` is a JSON object of column -> new value; `condition` is a raw SQL WHERE predicate such as \"id = 1\". It is not escaped or validated. WARNING: an empty condition updates EVERY row.",
    title = "Update Rows",
    idempotent_hint = false,
    destructive_hint = true,
    open_world_hint = false,
    read_only_hint = false
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct UpdateDataTool {
    /// Target table name
    pub table_name: String,
    /// JSON object mapping column names to new values
    pub data: String,
    /// Raw SQL WHERE predicate, e.g. "id = 1"; empty matches all rows
    #[serde(default)]
    pub condition: String,
}

impl UpdateDataTool {
    pub async fn run(&self, store: &SqlStore) -> String {
        let data = match parse_row_data(&self.data, "data") {
            Ok(data) => data,
            Err(e) => return format_result(&QueryResult::error(e.to_string())),
        };

        let table = self.table_name.clone();
        let condition = self.condition.clone();
        let result =
            run_blocking(store, move |store| store.update(&table, &data, &condition)).await;
        format_result(&result)
    }

    pub async fn call_tool(&self, store: &SqlStore) -> CallToolResult {
        text_result(self.run(store).await)
    }
}

#[mcp_tool(
    name = "delete_data",
    description = "Delete rows matching a raw SQL WHERE predicate such as \"id = 1\". It is not escaped or validated. WARNING: an empty condition deletes EVERY row in the table.",
    title = "Delete Rows",
    idempotent_hint = false,
    destructive_hint = true,
    open_world_hint = false,
    read_only_hint = false
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct DeleteDataTool {
    /// Target table name
    pub table_name: String,
    /// Raw SQL WHERE predicate; empty deletes all rows
    #[serde(default)]
    pub condition: String,
}

impl DeleteDataTool {
    pub async fn run(&self, store: &SqlStore) -> String {
        let table = self.table_name.clone();
        let condition = self.condition.clone();
        let result = run_blocking(store, move |store| store.delete(&table, &condition)).await;
        format_result(&result)
    }

    pub async fn call_tool(&self, store: &SqlStore) -> CallToolResult {
        text_result(self.run(store).await)
    }
}

tool_box!(SqlTools, [
    ExecuteQueryTool,
    GetTableStructureTool,
    ListTablesTool,
    InsertDataTool,
    UpdateDataTool,
    DeleteDataTool,
]);
