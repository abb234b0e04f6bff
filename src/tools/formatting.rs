//! Text rendering for SQL tool results
//!
//! Every SQL operation answers with the string produced here. Callers
//! (including LLM agents) parse this layout, so it must stay stable:
//!
//! ```text
//! Query result (2 rows):
//! +----+-------+
//! | id | name  |
//! +----+-------+
//! | 1  | Alice |
//! | 2  | Bob   |
//! +----+-------+
//! ```

use crate::database::{QueryResult, Row, WriteSummary};

pub const NO_ROWS_MESSAGE: &str = "Query completed, no rows returned.";

/// Render any result variant as the single text answer of a tool call
pub fn format_result(result: &QueryResult) -> String {
    match result {
        QueryResult::Error { message } => format_error(message),
        QueryResult::Write(summary) => format_summary(summary),
        QueryResult::Rows(rows) if rows.is_empty() => NO_ROWS_MESSAGE.to_string(),
        QueryResult::Rows(rows) => format!(
            "Query result ({} rows):\n{}",
            rows.len(),
            format_table(rows)
        ),
    }
}

pub fn format_error(message: &str) -> String {
    format!("Error: {}", message)
}

fn format_summary(summary: &WriteSummary) -> String {
    let last_id = summary
        .last_inserted_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string());
    format!(
        "Success! Rows affected: {}, last inserted id: {}",
        summary.affected_rows, last_id
    )
}

/// Aligned plain-text table; headers come from the first row.
///
/// Cells are placed by position, so repeated column names (joins,
/// duplicate aliases) each keep their own value.
pub fn format_table(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let headers: Vec<&str> = first.columns().collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut values: Vec<String> = row.values().map(|v| v.to_string()).collect();
            values.resize(headers.len(), String::new());
            values
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut lines = Vec::with_capacity(cells.len() + 4);
    lines.push(rule.clone());
    lines.push(format_line(headers.iter().copied(), &widths));
    lines.push(rule.clone());
    for row in &cells {
        lines.push(format_line(row.iter().map(String::as_str), &widths));
    }
    lines.push(rule);

    lines.join("\n")
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!(" {:<width$} ", cell, width = width))
        .collect();
    format!("|{}|", padded.join("|"))
}
