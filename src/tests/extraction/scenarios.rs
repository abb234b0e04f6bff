// End-to-end extractor scenarios: reply text in, ordered path -> content out

use crate::extraction::paths::{normalize_path, PathError};
use crate::extraction::{extract_files, ExtractOptions, ExtractionResult};

fn extract(text: &str) -> ExtractionResult {
    extract_files(text, &ExtractOptions::default())
}

const FASTAPI_MAIN: &str = "from fastapi import FastAPI\n\napp = FastAPI()\n\n@app.get(\"/\")\ndef root():\n    return {\"ok\": True}";
const INDEX_HTML: &str = "<!DOCTYPE html>\n<html>\n<body>Hello</body>\n</html>";

#[test]
fn test_explicit_markers_in_document_order() {
    let reply = format!(
        "Here is the project.\n\nFILE: backend/main.py\n```python\n{}\n```\n\nFILE: frontend/index.html\n```html\n{}\n```\n",
        FASTAPI_MAIN, INDEX_HTML
    );

    let result = extract(&reply);

    assert_eq!(result.paths(), vec!["backend/main.py", "frontend/index.html"]);
    assert_eq!(result.get("backend/main.py"), Some(FASTAPI_MAIN));
    assert_eq!(result.get("frontend/index.html"), Some(INDEX_HTML));
}

#[test]
fn test_heading_and_localized_markers() {
    let reply = "### backend/app.py\n```python\nprint('hi')\n```\n\n文件：frontend/static/js/app.js\n```js\nconsole.log(1);\n```\n";

    let result = extract(reply);

    assert_eq!(result.paths(), vec!["backend/app.py", "frontend/static/js/app.js"]);
}

#[test]
fn test_unmarked_doctype_block_becomes_index_html() {
    let reply = format!("```\n{}\n```", INDEX_HTML);

    let result = extract(&reply);

    assert_eq!(result.paths(), vec!["frontend/index.html"]);
    assert_eq!(result.get("frontend/index.html"), Some(INDEX_HTML));
}

#[test]
fn test_unrecognizable_blocks_get_distinct_names() {
    let reply = "Two notes:\n```\nalpha\n```\nand\n```\nbeta\n```\n";

    let result = extract(reply);

    assert_eq!(result.paths(), vec!["file.txt", "file_1.txt"]);
    assert_eq!(result.get("file.txt"), Some("alpha"));
    assert_eq!(result.get("file_1.txt"), Some("beta"));
}

#[test]
fn test_marked_text_round_trips() {
    let reply = format!(
        "FILE: backend/main.py\n```python\n{}\n```\n\n```\n{}\n```\n\n```css\nbody {{ margin: 0; }}\n```\n\n```\nalpha\n```\n",
        FASTAPI_MAIN, INDEX_HTML
    );

    let first = extract(&reply);
    assert_eq!(first.len(), 4);

    let second = extract(&first.to_marked_text());
    assert_eq!(second, first);
}

#[test]
fn test_hints_pair_with_blocks_positionally() {
    let reply = "First, create server.py:\n```python\nprint('serving')\n```\n\
                 Then save this as page.html:\n```html\n<p>hi</p>\n```\n";

    let result = extract(reply);

    assert_eq!(result.paths(), vec!["backend/server.py", "frontend/page.html"]);
}

#[test]
fn test_hint_count_mismatch_falls_back_to_sniffing() {
    let reply = "Create server.py as follows:\n```python\nprint('serving')\n```\n\
                 And the page:\n```html\n<p>hi</p>\n```\n";

    let result = extract(reply);

    assert_eq!(result.paths(), vec!["backend/main.py", "frontend/index.html"]);
}

#[test]
fn test_markers_disable_hint_pairing() {
    let reply = "Create notes.md first.\nFILE: backend/db.py\n```python\nimport sqlite3\n```\n";

    let result = extract(reply);

    assert_eq!(result.paths(), vec!["backend/db.py"]);
}

#[test]
fn test_info_string_path() {
    let reply = "```python:backend/db.py\nimport sqlite3\n```\n```js title=\"static/app.js\"\nlet a = 1;\n```\n";

    let result = extract(reply);

    assert_eq!(result.paths(), vec!["backend/db.py", "static/app.js"]);
}

#[test]
fn test_marker_paths_are_normalized() {
    let reply = "FILE: 1. `src\\app.py`\n```python\nx = 1\n```\n\
                 File: \"/../etc/settings.json\"\n```json\n{}\n```\n";

    let result = extract(reply);

    assert_eq!(result.paths(), vec!["src/app.py", "etc/settings.json"]);
}

#[test]
fn test_normalize_path_rules() {
    assert_eq!(normalize_path("文件：/backend/../main.py").unwrap(), "backend/main.py");
    assert_eq!(normalize_path("2. app.py").unwrap(), "app.py");
    assert_eq!(normalize_path("1.py").unwrap(), "1.py");
    assert_eq!(normalize_path("FILE: `config.json`").unwrap(), "config.json");
    assert_eq!(normalize_path("- 'web\\static\\site.css'").unwrap(), "web/static/site.css");
    assert_eq!(normalize_path("../"), Err(PathError::Empty));
    assert!(matches!(normalize_path("my file.py"), Err(PathError::Whitespace(_))));
}

#[test]
fn test_missing_extension_comes_from_the_tag() {
    let reply = "FILE: backend/run\n```python\nprint(1)\n```\nFILE: tools/setup\n```\necho hi\n```\n";

    let result = extract(reply);

    assert_eq!(result.paths(), vec!["backend/run.py", "tools/setup.txt"]);
}

#[test]
fn test_language_hint_sets_default_extension() {
    let reply = "FILE: tools/setup\n```\necho hi\n```\n```\nalpha\n```\n";

    let result = extract_files(reply, &ExtractOptions::with_language("bash"));

    assert_eq!(result.paths(), vec!["tools/setup.sh", "file.sh"]);
}

#[test]
fn test_bare_names_are_rooted_by_type() {
    let reply = "FILE: style.css\n```css\nbody { margin: 0; }\n```\n\
                 FILE: app.js\n```js\nlet a = 1;\n```\n\
                 FILE: web/app.js\n```js\nlet b = 2;\n```\n\
                 FILE: models.py\n```python\nclass User: pass\n```\n\
                 FILE: README.md\n```markdown\n# Readme\n```\n";

    let result = extract(reply);

    assert_eq!(
        result.paths(),
        vec![
            "frontend/static/css/style.css",
            "frontend/static/js/app.js",
            "web/app.js",
            "backend/models.py",
            "README.md",
        ]
    );
}

#[test]
fn test_colliding_paths_get_suffixes() {
    let reply = "FILE: main.py\n```python\na = 1\n```\nFILE: main.py\n```python\nb = 2\n```\nFILE: main.py\n```python\nc = 3\n```\n";

    let result = extract(reply);

    assert_eq!(
        result.paths(),
        vec!["backend/main.py", "backend/main_1.py", "backend/main_2.py"]
    );
    assert_eq!(result.get("backend/main_2.py"), Some("c = 3"));
}

#[test]
fn test_route_file_is_promoted_to_backend_entry() {
    let reply = format!(
        "FILE: backend/server.py\n```python\n{}\n```\nFILE: backend/models.py\n```python\nclass User: pass\n```\n",
        FASTAPI_MAIN
    );

    let result = extract(&reply);

    assert_eq!(result.paths(), vec!["backend/main.py", "backend/models.py"]);
    assert_eq!(result.get("backend/main.py"), Some(FASTAPI_MAIN));
}

#[test]
fn test_existing_entry_blocks_promotion() {
    let reply = format!(
        "FILE: backend/app.py\n```python\nprint('entry')\n```\nFILE: backend/routes.py\n```python\n{}\n```\n",
        FASTAPI_MAIN
    );

    let result = extract(&reply);

    assert_eq!(result.paths(), vec!["backend/app.py", "backend/routes.py"]);
}

#[test]
fn test_markup_file_is_promoted_to_index() {
    let reply = format!(
        "FILE: frontend/home.html\n```html\n{}\n```\nFILE: frontend/about.html\n```html\n<p>about</p>\n```\n",
        INDEX_HTML
    );

    let result = extract(&reply);

    assert_eq!(result.paths(), vec!["frontend/index.html", "frontend/about.html"]);
}

#[test]
fn test_content_sniffing_defaults() {
    let reply = "```\nfastapi==0.110.0\nuvicorn==0.29.0\n```\n\
                 ```python\nimport pytest\n\ndef test_root():\n    assert True\n```\n\
                 ```python\nclass Settings(BaseSettings):\n    debug: bool = False\n```\n\
                 ```\nconst el = document.querySelector('#app');\n```\n\
                 ```\n.card {\n  padding: 4px;\n}\n```\n";

    let result = extract(reply);

    assert_eq!(
        result.paths(),
        vec![
            "backend/requirements.txt",
            "backend/tests/test_api.py",
            "backend/config.py",
            "frontend/static/js/app.js",
            "frontend/static/css/style.css",
        ]
    );
}

#[test]
fn test_unterminated_block_is_kept() {
    let result = extract("FILE: notes.md\n```markdown\n# Title\nbody");

    assert_eq!(result.paths(), vec!["notes.md"]);
    assert_eq!(result.get("notes.md"), Some("# Title\nbody"));
}

#[test]
fn test_reply_without_fences_is_one_file() {
    let result = extract("  Just a plain answer with no code.  \n");
    assert_eq!(result.paths(), vec!["file.txt"]);
    assert_eq!(result.get("file.txt"), Some("Just a plain answer with no code."));

    let result = extract(INDEX_HTML);
    assert_eq!(result.paths(), vec!["frontend/index.html"]);
}

#[test]
fn test_empty_reply_yields_nothing() {
    assert!(extract("").is_empty());
    assert!(extract("   \n\n").is_empty());
}

#[test]
fn test_json_output_keeps_order() {
    let reply = "FILE: b.txt\n```\nB\n```\nFILE: a.txt\n```\nA\n```\n";

    let json = serde_json::to_string(&extract(reply)).unwrap();

    assert_eq!(json, r#"{"b.txt":"B","a.txt":"A"}"#);
}

#[test]
fn test_declared_language_keeps_its_extension() {
    let reply = "```swift\nimport SwiftUI\n\nstruct ContentView: View {}\n```\n\
                 ```kotlin\nimport kotlinx.coroutines.launch\n\nfun main() {}\n```\n\
                 ```go\npackage main\n```\n";

    let result = extract(reply);

    assert_eq!(result.paths(), vec!["file.swift", "file.kt", "file.go"]);
}

#[test]
fn test_heading_titles_do_not_name_files() {
    let reply = "## Using Node.js\n```js\nconst http = require('http');\n```\n";

    let result = extract(reply);

    assert_eq!(result.paths(), vec!["frontend/static/js/app.js"]);
}
