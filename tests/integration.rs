//! Integration tests for repodoc

mod harness;

use harness::{TestTree, run_repodoc};

/// The §8-style fixture used by several scenarios.
fn sample_tree() -> TestTree {
    let tree = TestTree::new();
    tree.add_file("README.md", "# readme");
    tree.add_file("ios/AppDelegate.swift", "class AppDelegate {}");
    tree.add_file("src/ios/helper.swift", "func helper() {}");
    tree.add_file("src/android/MainActivity.kt", "class MainActivity");
    tree.add_file("src/utils.py", "def util(): pass");
    tree
}

#[test]
fn test_default_run_writes_document() {
    let tree = TestTree::new();
    tree.add_file("README.md", "hello world");
    tree.add_file("src/main.py", "print('hi')");

    let (stdout, _stderr, success) = run_repodoc(tree.path(), &[]);
    assert!(success, "repodoc should succeed");
    assert!(stdout.contains("output.txt"), "should report the output file");

    let doc = tree.read_output("output.txt");
    assert!(doc.starts_with("Repository Documentation"));
    assert!(doc.contains("Directory/File Tree Begins -->"));
    assert!(doc.contains("├── ") || doc.contains("└── "));
    assert!(doc.contains("[File Begins] README.md"));
    assert!(doc.contains("hello world"));
    assert!(doc.contains("[File Ends] README.md"));
}

#[test]
fn test_output_file_not_documented() {
    let tree = TestTree::new();
    tree.add_file("main.py", "print('hi')");

    let (_, _, first) = run_repodoc(tree.path(), &[]);
    assert!(first);
    let (_, _, second) = run_repodoc(tree.path(), &[]);
    assert!(second);

    let doc = tree.read_output("output.txt");
    assert!(
        !doc.contains("[File Begins] output.txt"),
        "the document must not swallow itself: {}",
        doc
    );
}

#[test]
fn test_exclude_dir_by_name() {
    let tree = sample_tree();

    let (_, _, success) = run_repodoc(tree.path(), &["--exclude-dir", "ios"]);
    assert!(success);

    let doc = tree.read_output("output.txt");
    assert!(doc.contains("README.md"));
    assert!(doc.contains("MainActivity.kt"));
    assert!(doc.contains("utils.py"));
    assert!(
        !doc.contains("ios"),
        "every ios/ directory should be gone: {}",
        doc
    );
}

#[test]
fn test_exclude_dir_by_path() {
    let tree = sample_tree();

    let (_, _, success) = run_repodoc(tree.path(), &["--exclude-dir", "src/android"]);
    assert!(success);

    let doc = tree.read_output("output.txt");
    assert!(!doc.contains("MainActivity.kt"), "{}", doc);
    assert!(doc.contains("AppDelegate.swift"), "top-level ios/ remains");
    assert!(doc.contains("helper.swift"), "src/ios/ remains");
}

#[test]
fn test_scope_with_whitelist() {
    let tree = sample_tree();

    let (_, _, success) = run_repodoc(
        tree.path(),
        &["--scope-to", "src", "--include-files", "*.py"],
    );
    assert!(success);

    let doc = tree.read_output("output.txt");
    assert!(doc.contains("[File Begins] src/utils.py"), "{}", doc);
    assert!(!doc.contains("README.md"));
    assert!(!doc.contains("swift"));
    assert!(!doc.contains("MainActivity.kt"));
}

#[test]
fn test_whitelist_overrides_type_blacklist() {
    let tree = TestTree::new();
    tree.add_file("main.py", "print('hi')");
    tree.add_file("notes.txt", "notes");

    let (_, _, success) = run_repodoc(
        tree.path(),
        &["--include-files", "*.py", "--ignore-types", ".py"],
    );
    assert!(success);

    let doc = tree.read_output("output.txt");
    assert!(
        doc.contains("[File Begins] main.py"),
        "whitelisted file beats the extension blacklist: {}",
        doc
    );
    assert!(!doc.contains("notes.txt"));
}

#[test]
fn test_default_type_blacklist() {
    let tree = TestTree::new();
    tree.add_file("kept.py", "x = 1");
    tree.add_file("logo.png", "not really a png");

    let (_, _, success) = run_repodoc(tree.path(), &[]);
    assert!(success);

    let doc = tree.read_output("output.txt");
    assert!(doc.contains("kept.py"));
    assert!(!doc.contains("logo.png"));
}

#[test]
fn test_ignore_types_none_disables_defaults() {
    let tree = TestTree::new();
    tree.add_file("logo.png", "bytes");

    let (_, _, success) = run_repodoc(tree.path(), &["--ignore-types", "none"]);
    assert!(success);

    let doc = tree.read_output("output.txt");
    assert!(doc.contains("logo.png"), "{}", doc);
}

#[test]
fn test_ignore_files_patterns() {
    let tree = TestTree::new();
    tree.add_file("keep.py", "k");
    tree.add_file("LICENSE", "license text");
    tree.add_file("trace.out", "trace");

    let (_, _, success) = run_repodoc(tree.path(), &["--ignore-files", "LICENSE", "*.out"]);
    assert!(success);

    let doc = tree.read_output("output.txt");
    assert!(doc.contains("keep.py"));
    assert!(!doc.contains("LICENSE"));
    assert!(!doc.contains("trace.out"));
}

#[test]
fn test_ignore_settings() {
    let tree = TestTree::new();
    tree.add_file("app.py", "x");
    tree.add_file("settings.yaml", "a: 1");

    let (_, _, success) = run_repodoc(tree.path(), &["--ignore-settings"]);
    assert!(success);

    let doc = tree.read_output("output.txt");
    assert!(doc.contains("app.py"));
    assert!(!doc.contains("settings.yaml"));
}

#[test]
fn test_no_content_mode() {
    let tree = TestTree::new();
    tree.add_file("main.py", "secret_body()");

    let (_, _, success) = run_repodoc(tree.path(), &["--no-content"]);
    assert!(success);

    let doc = tree.read_output("output.txt");
    assert!(doc.contains("main.py"), "tree still lists the file");
    assert!(!doc.contains("File Content Begins"));
    assert!(!doc.contains("secret_body"));
}

#[test]
fn test_json_output() {
    let tree = TestTree::new();
    tree.add_file("main.py", "x");
    tree.add_file("src/lib.py", "y");

    let (stdout, _stderr, success) = run_repodoc(tree.path(), &["--json"]);
    assert!(success, "repodoc --json should succeed");

    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("output should be valid JSON");
    assert_eq!(json["type"], "dir", "root should be a directory");
    assert!(json["children"].is_array());

    let children = json["children"].as_array().unwrap();
    let main_py = children.iter().find(|c| c["name"] == "main.py");
    assert!(main_py.is_some(), "should include main.py");
    assert_eq!(main_py.unwrap()["type"], "file");
    assert_eq!(main_py.unwrap()["path"], "main.py");

    let src = children.iter().find(|c| c["name"] == "src").unwrap();
    assert_eq!(src["children"][0]["path"], "src/lib.py");

    assert!(
        !tree.path().join("output.txt").exists(),
        "--json must not write the document"
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let tree = TestTree::new();
    tree.add_file("main.py", "x");

    let (stdout, _stderr, success) = run_repodoc(tree.path(), &["--dry-run"]);
    assert!(success);
    assert!(stdout.contains("main.py"), "tree goes to stdout: {}", stdout);
    assert!(stdout.contains("Walk Statistics"));
    assert!(stdout.contains("Files included:    1"));
    assert!(
        !tree.path().join("output.txt").exists(),
        "--dry-run must not write the document"
    );
}

#[test]
fn test_custom_config_file() {
    let tree = TestTree::new();
    tree.add_file("kept.xyz", "x");
    tree.add_file("main.py", "y");
    let config = tree.add_file(
        "conf/repodoc.json",
        r#"{ "additional_ignore_types": [".py"], "default_output_file": "repo.txt" }"#,
    );

    let (_, _, success) = run_repodoc(
        tree.path(),
        &["--config", config.to_str().unwrap(), "--exclude-dir", "conf"],
    );
    assert!(success);

    let doc = tree.read_output("repo.txt");
    assert!(doc.contains("kept.xyz"), "{}", doc);
    assert!(!doc.contains("[File Begins] main.py"));
}

#[test]
fn test_invalid_glob_fails_before_walking() {
    let tree = TestTree::new();
    tree.add_file("main.py", "x");

    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_repodoc"));
    cmd.current_dir(tree.path())
        .args(["--include-files", "[bad"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("invalid glob pattern"));
    assert!(
        !tree.path().join("output.txt").exists(),
        "configuration errors are fatal before any output"
    );
}

#[test]
fn test_invalid_scope_fails() {
    let tree = TestTree::new();
    tree.add_file("main.py", "x");

    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_repodoc"));
    cmd.current_dir(tree.path()).args(["--scope-to", "../out"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("scope path"));
}
