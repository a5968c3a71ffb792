//! Unit tests for CLI commands.

use super::*;
use std::fs;
use tempfile::TempDir;

const MANIFEST: &str = r#"[source]
url = "https://pypi.org/simple"

[packages]
boto3 = "==1.10.9"

[dev-packages]
flake8 = "*"

[requires]
interpreter = "3.6"
"#;

fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

fn create_test_context(temp_dir: &TempDir) -> CommandContext {
    CommandContext {
        cwd: temp_dir.path().to_path_buf(),
        output: crate::output::OutputHandler::new(),
    }
}

fn manifest_path(temp_dir: &TempDir) -> std::path::PathBuf {
    temp_dir.path().join("vetch.toml")
}

#[test]
fn test_suggest_similar_command() {
    // Exact matches
    assert_eq!(suggest_similar_command("check"), Some("check".to_string()));

    // Typos
    assert_eq!(suggest_similar_command("chek"), Some("check".to_string()));
    assert_eq!(suggest_similar_command("lst"), Some("list".to_string()));
    assert_eq!(suggest_similar_command("remov"), Some("remove".to_string()));

    // No suggestion for very different strings
    assert_eq!(suggest_similar_command("xyz"), None);
    assert_eq!(suggest_similar_command("completely-different"), None);
}

#[test]
fn test_edit_distance() {
    assert_eq!(edit_distance("", ""), 0);
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("abc", ""), 3);
    assert_eq!(edit_distance("abc", "abc"), 0);
    assert_eq!(edit_distance("abc", "ab"), 1);
    assert_eq!(edit_distance("check", "chek"), 1);
    assert_eq!(edit_distance("list", "lst"), 1);
}

#[tokio::test]
async fn test_init_empty_directory() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    init::execute(&ctx).await.unwrap();

    let content = fs::read_to_string(manifest_path(&temp_dir)).unwrap();
    assert!(content.contains("[packages]"));
    assert!(content.contains("[dev-packages]"));
    assert!(content.contains("interpreter = \"3.6\""));

    // The starter manifest must itself pass validation
    vetch_manifest::toml::parse_manifest(&content).unwrap();
}

#[tokio::test]
async fn test_init_does_not_overwrite() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    fs::write(manifest_path(&temp_dir), "existing content").unwrap();

    init::execute(&ctx).await.unwrap();

    let content = fs::read_to_string(manifest_path(&temp_dir)).unwrap();
    assert_eq!(content, "existing content");
}

#[tokio::test]
async fn test_check_valid_manifest() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    fs::write(manifest_path(&temp_dir), MANIFEST).unwrap();

    let result = check::execute(None, None, &ctx).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_check_invalid_manifest() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    fs::write(
        manifest_path(&temp_dir),
        "[packages]\nboto3 = \"==one.two\"\n",
    )
    .unwrap();

    let result = check::execute(None, None, &ctx).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_check_explicit_path() {
    let temp_dir = create_temp_dir();
    let other_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    fs::write(manifest_path(&other_dir), MANIFEST).unwrap();

    let result = check::execute(Some(manifest_path(&other_dir)), None, &ctx).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_check_with_satisfiable_index() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    fs::write(manifest_path(&temp_dir), MANIFEST).unwrap();
    let index_path = temp_dir.path().join("index.json");
    fs::write(
        &index_path,
        r#"{"boto3": ["1.10.8", "1.10.9"], "flake8": ["3.7.9"]}"#,
    )
    .unwrap();

    let result = check::execute(None, Some(index_path), &ctx).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_check_with_unsatisfiable_index() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    fs::write(manifest_path(&temp_dir), MANIFEST).unwrap();
    let index_path = temp_dir.path().join("index.json");
    fs::write(
        &index_path,
        r#"{"boto3": ["1.10.8"], "flake8": ["3.7.9"]}"#,
    )
    .unwrap();

    let result = check::execute(None, Some(index_path), &ctx).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_add_requirement() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    fs::write(manifest_path(&temp_dir), MANIFEST).unwrap();

    add::execute(
        "requests".to_string(),
        Some(">=2.0, <3.0".to_string()),
        vec!["security".to_string()],
        false,
        &ctx,
    )
    .await
    .unwrap();

    let content = fs::read_to_string(manifest_path(&temp_dir)).unwrap();
    let manifest = vetch_manifest::toml::parse_manifest(&content).unwrap();
    let reqs = manifest.requirements(vetch_core::types::Group::Runtime).unwrap();
    let requests = reqs.iter().find(|r| r.name == "requests").unwrap();
    assert_eq!(requests.extras, vec!["security"]);
}

#[tokio::test]
async fn test_add_duplicate_fails() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    fs::write(manifest_path(&temp_dir), MANIFEST).unwrap();

    let result = add::execute("BOTO3".to_string(), None, Vec::new(), false, &ctx).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_add_without_manifest_fails() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    let result = add::execute("requests".to_string(), None, Vec::new(), false, &ctx).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_remove_requirement() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    fs::write(manifest_path(&temp_dir), MANIFEST).unwrap();

    remove::execute("boto3".to_string(), false, &ctx).await.unwrap();

    let content = fs::read_to_string(manifest_path(&temp_dir)).unwrap();
    let manifest = vetch_manifest::toml::parse_manifest(&content).unwrap();
    assert!(manifest.packages.is_empty());
    assert!(manifest.dev_packages.contains_key("flake8"));
}

#[tokio::test]
async fn test_remove_missing_fails() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    fs::write(manifest_path(&temp_dir), MANIFEST).unwrap();

    let result = remove::execute("requests".to_string(), false, &ctx).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_list_runs_on_valid_manifest() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    fs::write(manifest_path(&temp_dir), MANIFEST).unwrap();

    list::execute(false, false, false, &ctx).await.unwrap();
    list::execute(true, false, true, &ctx).await.unwrap();
}

#[tokio::test]
async fn test_fmt_rewrites_then_passes_check() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    // Oddly formatted but valid manifest
    fs::write(
        manifest_path(&temp_dir),
        "[packages]\nboto3    =    \"==1.10.9\"\n",
    )
    .unwrap();

    // --check flags the non-canonical form
    let result = fmt::execute(true, &ctx).await;
    assert!(result.is_err());

    // A real run rewrites it, after which --check passes
    fmt::execute(false, &ctx).await.unwrap();
    fmt::execute(true, &ctx).await.unwrap();
}

#[tokio::test]
async fn test_handle_unknown_word() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    assert!(handle_unknown_word("chek", &ctx).is_err());
}
