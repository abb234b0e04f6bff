// Store headcount tools - the operations exposed by `kestrel-stores`

use rust_mcp_sdk::macros::{mcp_tool, JsonSchema};
use rust_mcp_sdk::schema::CallToolResult;
use rust_mcp_sdk::tool_box;
use serde::{Deserialize, Serialize};

use super::text_result;
use crate::stores::{StoreCounts, StoreRegistry};

pub const STORE_NOT_FOUND: &str = "store not found.";

fn changed(store_name: &str, counts: Option<StoreCounts>) -> String {
    match counts {
        Some(counts) => format!("now {} user {}", store_name, counts.to_json()),
        None => STORE_NOT_FOUND.to_string(),
    }
}

#[mcp_tool(
    name = "add_user",
    description = "Record a new user (or manager) joining a store and return the updated counts.",
    title = "Add Store User",
    idempotent_hint = false,
    destructive_hint = false,
    open_world_hint = false,
    read_only_hint = false
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddUserTool {
    /// Store name, case-insensitive (e.g. "store1")
    pub store_name: String,
    /// True to count a manager instead of a regular user
    #[serde(default)]
    pub is_manager: bool,
}

impl AddUserTool {
    pub fn run(&self, registry: &StoreRegistry) -> String {
        changed(&self.store_name, registry.add(&self.store_name, self.is_manager))
    }

    pub fn call_tool(&self, registry: &StoreRegistry) -> CallToolResult {
        text_result(self.run(registry))
    }
}

#[mcp_tool(
    name = "user_leave",
    description = "Record a user (or manager) leaving a store and return the updated counts. Counts never drop below zero.",
    title = "Store User Leaves",
    idempotent_hint = false,
    destructive_hint = false,
    open_world_hint = false,
    read_only_hint = false
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct UserLeaveTool {
    /// Store name, case-insensitive
    pub store_name: String,
    /// True to remove a manager instead of a regular user
    #[serde(default)]
    pub is_manager: bool,
}

impl UserLeaveTool {
    pub fn run(&self, registry: &StoreRegistry) -> String {
        changed(&self.store_name, registry.leave(&self.store_name, self.is_manager))
    }

    pub fn call_tool(&self, registry: &StoreRegistry) -> CallToolResult {
        text_result(self.run(registry))
    }
}

#[mcp_tool(
    name = "store_info",
    description = "Report the current user and manager counts of a store.",
    title = "Store Info",
    idempotent_hint = true,
    destructive_hint = false,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct StoreInfoTool {
    /// Store name, case-insensitive
    pub store_name: String,
}

impl StoreInfoTool {
    pub fn run(&self, registry: &StoreRegistry) -> String {
        match registry.info(&self.store_name) {
            Some(counts) => format!("{} user info {}", self.store_name, counts.to_json()),
            None => STORE_NOT_FOUND.to_string(),
        }
    }

    pub fn call_tool(&self, registry: &StoreRegistry) -> CallToolResult {
        text_result(self.run(registry))
    }
}

tool_box!(StoreTools, [AddUserTool, UserLeaveTool, StoreInfoTool]);
