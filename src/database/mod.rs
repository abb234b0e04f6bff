//! Kestrel's Store Module - single-file SQLite backing the SQL tool server
//!
//! The store keeps no connection between calls: every operation opens its own
//! connection, runs one statement and drops the connection again. Isolation
//! between concurrent callers is left to SQLite's own locking.

use rusqlite::types::ToSql;
use rusqlite::Connection;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

mod error;
mod schema;
pub mod seed;
pub mod statements;
pub mod types;
pub mod values;

pub use error::{Result, StoreError};
pub use types::*;

/// Default busy timeout while waiting on another writer's lock
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Handle to the backing store file. Cheap to clone; holds no connection.
#[derive(Debug, Clone)]
pub struct SqlStore {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqlStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed the demo table if the store file does not exist yet.
    ///
    /// Must run before anything else opens a connection, since opening
    /// creates the file.
    pub fn bootstrap_if_missing(&self) -> Result<bool> {
        seed::bootstrap_if_missing(&self.path)
    }

    /// Open a fresh connection for one operation
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    /// Run one statement, converting every fault into an error record.
    pub fn execute(&self, sql: &str, params: &QueryParams) -> QueryResult {
        match self.try_execute(sql, params) {
            Ok(result) => result,
            Err(e) => {
                warn!("Statement failed: {} ({})", e, sql);
                QueryResult::error(e.to_string())
            }
        }
    }

    pub fn try_execute(&self, sql: &str, params: &QueryParams) -> Result<QueryResult> {
        let conn = self.connect()?;
        run_statement(&conn, sql, params)
    }

    /// Insert one row built from `data` (column -> value, in mapping order)
    pub fn insert(&self, table: &str, data: &Map<String, Value>) -> QueryResult {
        let (sql, values) = statements::build_insert(table, data);
        self.execute(&sql, &QueryParams::Positional(values))
    }

    /// Update rows matching the raw `condition`; blank updates every row.
    pub fn update(&self, table: &str, data: &Map<String, Value>, condition: &str) -> QueryResult {
        let (sql, values) = statements::build_update(table, data, condition);
        self.execute(&sql, &QueryParams::Positional(values))
    }

    /// Delete rows matching the raw `condition`; blank deletes every row.
    pub fn delete(&self, table: &str, condition: &str) -> QueryResult {
        let sql = statements::build_delete(table, condition);
        self.execute(&sql, &QueryParams::None)
    }
}

/// Execute `sql` on `conn` and shape the outcome by the statement's kind.
pub(crate) fn run_statement(
    conn: &Connection,
    sql: &str,
    params: &QueryParams,
) -> Result<QueryResult> {
    let kind = QueryKind::classify(sql);
    debug!("Running {:?} statement: {}", kind, sql);

    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let named: Vec<(&str, &dyn ToSql)> = match params {
        QueryParams::Named(pairs) => pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect(),
        _ => Vec::new(),
    };

    let mut rows = match params {
        QueryParams::None => stmt.query([])?,
        QueryParams::Positional(values) => stmt.query(rusqlite::params_from_iter(values.iter()))?,
        QueryParams::Named(_) => stmt.query(named.as_slice())?,
    };

    match kind {
        QueryKind::Read => {
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                let mut snapshot = Row::default();
                for (idx, column) in columns.iter().enumerate() {
                    snapshot.push(column.clone(), SqlValue::from(row.get_ref(idx)?));
                }
                out.push(snapshot);
            }
            Ok(QueryResult::Rows(out))
        }
        QueryKind::Write => {
            // Step to completion; autocommit commits on success only
            while rows.next()?.is_some() {}
            drop(rows);

            let affected_rows = u64::try_from(conn.changes()).unwrap_or(0);
            let rowid = conn.last_insert_rowid();
            Ok(QueryResult::Write(WriteSummary {
                affected_rows,
                last_inserted_id: (rowid != 0).then_some(rowid),
            }))
        }
    }
}
