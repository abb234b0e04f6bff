// Kestrel MCP Tools

use rust_mcp_sdk::schema::{CallToolResult, TextContent};

pub mod formatting; // Shared result renderer (the observable text contract)
pub mod sql; // kestrel-sql operations
pub mod stores; // kestrel-stores headcount operations

pub use formatting::format_result;
pub use sql::{
    DeleteDataTool, ExecuteQueryTool, GetTableStructureTool, InsertDataTool, ListTablesTool,
    SqlTools, UpdateDataTool,
};
pub use stores::{AddUserTool, StoreInfoTool, StoreTools, UserLeaveTool};

/// Wrap a tool's text answer as a single-content MCP result
pub(crate) fn text_result(text: String) -> CallToolResult {
    CallToolResult::text_content(vec![TextContent::from(text)])
}
