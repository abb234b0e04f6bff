// Demo bootstrap for a fresh store file

use rusqlite::{params, Connection};
use std::fs;
use std::path::Path;
use tracing::info;

use super::error::Result;

/// Example table created when the store file does not exist yet
pub const DEMO_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT UNIQUE,
    age INTEGER,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// (name, email, age)
pub const DEMO_USERS: &[(&str, &str, i64)] = &[
    ("Zhang San", "zhang@example.com", 30),
    ("Li Si", "li@example.com", 25),
    ("Wang Wu", "wang@example.com", 35),
];

/// Create and seed the store, but only when the file is absent.
///
/// Existence of the file is the only check: an existing file is never
/// touched, whatever its schema. Returns whether seeding happened.
pub fn bootstrap_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut conn = Connection::open(path)?;
    let tx = conn.transaction()?;
    tx.execute(DEMO_SCHEMA, [])?;
    for (name, email, age) in DEMO_USERS {
        tx.execute(
            "INSERT OR IGNORE INTO users (name, email, age) VALUES (?1, ?2, ?3)",
            params![name, email, age],
        )?;
    }
    tx.commit()?;

    info!(
        "🌱 Created demo store at {} with {} users",
        path.display(),
        DEMO_USERS.len()
    );
    Ok(true)
}
