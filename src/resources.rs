//! Resource URI templates
//!
//! Resources are addressed by name instead of being invoked: metadata
//! browsers read `tables://users/schema` rather than calling a tool.

pub const TABLE_SCHEMA_TEMPLATE: &str = "tables://{table_name}/schema";
pub const GREETING_TEMPLATE: &str = "greeting://{name}";

const TABLES_SCHEME: &str = "tables://";
const SCHEMA_SUFFIX: &str = "/schema";
const GREETING_SCHEME: &str = "greeting://";

pub fn table_schema_uri(table: &str) -> String {
    format!("{}{}{}", TABLES_SCHEME, table, SCHEMA_SUFFIX)
}

/// Table name addressed by a `tables://{table_name}/schema` URI
pub fn parse_table_schema_uri(uri: &str) -> Option<&str> {
    let table = uri
        .strip_prefix(TABLES_SCHEME)?
        .strip_suffix(SCHEMA_SUFFIX)?;
    (!table.is_empty() && !table.contains('/')).then_some(table)
}

/// Name addressed by a `greeting://{name}` URI
pub fn parse_greeting_uri(uri: &str) -> Option<&str> {
    let name = uri.strip_prefix(GREETING_SCHEME)?;
    (!name.is_empty() && !name.contains('/')).then_some(name)
}
