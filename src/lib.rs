// Kestrel - Agent Tooling Library
//!
//! Kestrel provides the two pieces of agent tooling that have to survive
//! untrusted input: an MCP tool server over a single-file SQLite store, and an
//! extractor that turns a free-form LLM reply into a set of named source files.

pub mod config;
pub mod database;
pub mod extraction;
pub mod handler;
pub mod logging;
pub mod resources;
pub mod startup; // Server details and transport selection shared by both servers
pub mod stores;
pub mod tools;


// Re-export common types
pub use database::{QueryParams, QueryResult, Row, SqlStore, SqlValue, StoreError, WriteSummary};
pub use extraction::{extract_files, ExtractOptions, ExtractionResult, FileAssignment};
pub use handler::SqlServerHandler;
pub use stores::{StoreCounts, StoreRegistry, StoreServerHandler};
