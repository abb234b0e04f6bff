//! SQL text builders for the templated write operations.
//!
//! Identifiers are quoted; values are always bound as parameters. The
//! `condition` fragment of UPDATE/DELETE is caller-supplied raw SQL and is
//! inserted verbatim: callers are trusted with it, and a blank condition
//! addresses every row in the table.

use serde_json::{Map, Value};

use super::types::SqlValue;
use super::values::json_to_sql;

/// Quote an identifier for SQLite, doubling any embedded double quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.trim().replace('"', "\"\""))
}

/// `INSERT INTO t (a, b) VALUES (?, ?)` in the mapping's iteration order
pub fn build_insert(table: &str, data: &Map<String, Value>) -> (String, Vec<SqlValue>) {
    let columns: Vec<String> = data.keys().map(|k| quote_identifier(k)).collect();
    let placeholders = vec!["?"; data.len()].join(", ");
    let values = data.values().map(json_to_sql).collect();

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table),
        columns.join(", "),
        placeholders
    );
    (sql, values)
}

/// `UPDATE t SET a = ?, b = ? [WHERE <condition>]`
pub fn build_update(
    table: &str,
    data: &Map<String, Value>,
    condition: &str,
) -> (String, Vec<SqlValue>) {
    let assignments: Vec<String> = data
        .keys()
        .map(|k| format!("{} = ?", quote_identifier(k)))
        .collect();
    let values = data.values().map(json_to_sql).collect();

    let mut sql = format!(
        "UPDATE {} SET {}",
        quote_identifier(table),
        assignments.join(", ")
    );
    append_condition(&mut sql, condition);
    (sql, values)
}

/// `DELETE FROM t [WHERE <condition>]`
pub fn build_delete(table: &str, condition: &str) -> String {
    let mut sql = format!("DELETE FROM {}", quote_identifier(table));
    append_condition(&mut sql, condition);
    sql
}

fn append_condition(sql: &mut String, condition: &str) {
    let condition = condition.trim();
    if !condition.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(condition);
    }
}
