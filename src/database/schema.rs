// Schema introspection

use super::error::{Result, StoreError};
use super::statements::quote_identifier;
use super::types::{ColumnInfo, QueryParams, QueryResult, Row, SqlValue, TableSchema};
use super::{run_statement, SqlStore};

const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name";

impl SqlStore {
    /// All table names, lexicographically ordered, as a result table
    pub fn list_tables(&self) -> QueryResult {
        self.execute(LIST_TABLES_SQL, &QueryParams::None)
    }

    pub fn table_names(&self) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(LIST_TABLES_SQL)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    /// Column descriptors for `table`, straight from `PRAGMA table_info`
    pub fn table_structure(&self, table: &str) -> QueryResult {
        self.execute(&table_info_sql(table), &QueryParams::None)
    }

    /// Typed schema for the resource view. Unknown tables are an error here,
    /// unlike `table_structure`, which simply reports no rows.
    pub fn table_schema(&self, table: &str) -> Result<TableSchema> {
        let conn = self.connect()?;
        let rows = match run_statement(&conn, &table_info_sql(table), &QueryParams::None)? {
            QueryResult::Rows(rows) => rows,
            _ => Vec::new(),
        };

        if rows.is_empty() {
            return Err(StoreError::InvalidInput(format!("no such table: {}", table)));
        }

        Ok(TableSchema {
            table: table.to_string(),
            columns: rows.iter().map(column_from_row).collect(),
        })
    }
}

fn table_info_sql(table: &str) -> String {
    format!("PRAGMA table_info({})", quote_identifier(table))
}

fn column_from_row(row: &Row) -> ColumnInfo {
    let text = |name: &str| row.get(name).and_then(SqlValue::as_str).unwrap_or_default();
    let flag = |name: &str| row.get(name).and_then(SqlValue::as_i64).unwrap_or(0);

    ColumnInfo {
        cid: flag("cid"),
        name: text("name").to_string(),
        declared_type: text("type").to_string(),
        not_null: flag("notnull") != 0,
        default: row
            .get("dflt_value")
            .filter(|v| !v.is_null())
            .map(|v| v.to_string()),
        primary_key: flag("pk") > 0,
    }
}
