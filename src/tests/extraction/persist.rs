// Writing extracted files to disk

use crate::extraction::persist::SUMMARY_FILE_NAME;
use crate::extraction::{extract_files, files_summary, write_to_dir, ExtractOptions};
use std::fs;
use tempfile::TempDir;

const REPLY: &str = "FILE: backend/main.py\n```python\nprint('a')\nprint('b')\n```\n\
                     FILE: frontend/static/css/style.css\n```css\nbody { margin: 0; }\n```\n";

#[test]
fn test_write_to_dir_creates_nested_files() {
    let temp_dir = TempDir::new().unwrap();
    let result = extract_files(REPLY, &ExtractOptions::default());

    let written = write_to_dir(&result, temp_dir.path()).unwrap();

    assert_eq!(
        written,
        vec![
            temp_dir.path().join("backend/main.py"),
            temp_dir.path().join("frontend/static/css/style.css"),
        ]
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("backend/main.py")).unwrap(),
        "print('a')\nprint('b')"
    );
    assert_eq!(
        fs::read_to_string(&written[1]).unwrap(),
        "body { margin: 0; }"
    );
}

#[test]
fn test_write_to_dir_overwrites_existing_files() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("backend/main.py");
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(&target, "stale").unwrap();

    let result = extract_files(REPLY, &ExtractOptions::default());
    write_to_dir(&result, temp_dir.path()).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "print('a')\nprint('b')");
}

#[test]
fn test_write_to_dir_reports_unwritable_root() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not_a_dir");
    fs::write(&blocker, "file").unwrap();

    let result = extract_files(REPLY, &ExtractOptions::default());
    let err = write_to_dir(&result, &blocker).unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to create directory"));
}

#[test]
fn test_files_summary_lists_line_counts() {
    let result = extract_files(REPLY, &ExtractOptions::default());

    assert_eq!(
        files_summary(&result),
        "# Generated files\n\n- `backend/main.py` (2 lines)\n- `frontend/static/css/style.css` (1 lines)\n"
    );
    assert_eq!(SUMMARY_FILE_NAME, "FILES.md");
}
