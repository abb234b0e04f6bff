//! kestrel-extract: split an LLM reply into named source files
//!
//! Reads one reply from a file or stdin, runs the multi-file extractor and
//! either prints the resulting mapping or writes the files to a directory.
//!
//! Formats:
//! - json: `{"path": "content", ...}` in extraction order
//! - list: one path per line
//! - marked: `FILE: path` + fenced body per file (re-extractable)

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;

use kestrel::extraction::persist::SUMMARY_FILE_NAME;
use kestrel::extraction::{extract_files, files_summary, write_to_dir, ExtractOptions};
use kestrel::logging::init_cli_logging;

#[derive(Parser)]
#[command(name = "kestrel-extract")]
#[command(about = "Split a free-form LLM reply into named source files", long_about = None)]
#[command(version)]
struct Cli {
    /// Reply text to read (stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Expected target language, used for default file extensions
    #[arg(short, long)]
    language: Option<String>,

    /// How to print the extracted mapping
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormatArg,

    /// Write the files under this directory
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Create a fresh project_<timestamp> directory under --out-dir
    #[arg(long, requires = "out_dir")]
    timestamped: bool,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormatArg {
    /// JSON object of path -> content
    Json,
    /// One path per line
    List,
    /// FILE markers with fenced bodies
    Marked,
}

fn main() -> Result<()> {
    init_cli_logging("kestrel=warn");
    let cli = Cli::parse();

    let text = read_input(cli.input.as_deref())?;
    let options = ExtractOptions {
        language_hint: cli.language,
    };
    let result = extract_files(&text, &options);
    info!("Extracted {} files", result.len());

    if let Some(out_dir) = cli.out_dir {
        let root = if cli.timestamped {
            out_dir.join(format!("project_{}", Local::now().format("%Y%m%d_%H%M%S")))
        } else {
            out_dir
        };

        let written = write_to_dir(&result, &root)?;
        if cli.timestamped {
            let summary = root.join(SUMMARY_FILE_NAME);
            fs::write(&summary, files_summary(&result))
                .with_context(|| format!("Failed to write {}", summary.display()))?;
        }
        eprintln!("✅ Wrote {} files to {}", written.len(), root.display());
    }

    match cli.format {
        OutputFormatArg::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormatArg::List => {
            for path in result.paths() {
                println!("{}", path);
            }
        }
        OutputFormatArg::Marked => print!("{}", result.to_marked_text()),
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
