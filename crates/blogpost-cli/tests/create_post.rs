// Integration tests for the create-post binary
//
// The prompts need a real terminal, so these cover everything that happens
// before the first question plus the failure when no terminal is attached.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn create_post(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("create-post").unwrap();
    cmd.current_dir(dir)
        .env_remove("BLOGPOST_CONTENT_DIR")
        .env_remove("VISUAL")
        .env_remove("EDITOR")
        .timeout(Duration::from_secs(20));
    cmd
}

fn site_with_posts() -> TempDir {
    let temp = TempDir::new().unwrap();
    let blog = temp.path().join("content/blog");
    fs::create_dir_all(&blog).unwrap();
    fs::write(
        blog.join("2019-05-01-hello.md"),
        "---\ntitle: \"Hello\"\ntags:\n- Go\n- testing\n---\n\nHi\n",
    )
    .unwrap();
    temp
}

#[test]
fn test_help_describes_the_tool() {
    let temp = TempDir::new().unwrap();
    create_post(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create-post"))
        .stdout(predicate::str::contains("--open"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_missing_content_directory_fails() {
    let temp = TempDir::new().unwrap();
    create_post(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to build tag vocabulary"))
        .stderr(predicate::str::contains("content/blog"));
}

#[test]
fn test_malformed_post_is_reported_by_name() {
    let temp = site_with_posts();
    fs::write(
        temp.path().join("content/blog/broken.md"),
        "---\ntitle: never closed\n",
    )
    .unwrap();

    create_post(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.md"))
        .stderr(predicate::str::contains("never closed"));
}

#[test]
fn test_content_directory_from_environment() {
    let temp = site_with_posts();
    create_post(temp.path())
        .env("BLOGPOST_CONTENT_DIR", "somewhere-else")
        .assert()
        .failure()
        .stderr(predicate::str::contains("somewhere-else"));
}

#[test]
fn test_content_directory_from_config_file() {
    let temp = site_with_posts();
    fs::write(
        temp.path().join(".create-post.toml"),
        "[content]\nposts_dir = \"drafts\"\n",
    )
    .unwrap();

    create_post(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("drafts"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let temp = site_with_posts();
    create_post(temp.path())
        .args(["--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_invalid_config_names_the_file() {
    let temp = site_with_posts();
    fs::write(temp.path().join(".create-post.toml"), "[content\n").unwrap();

    create_post(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(".create-post.toml"));
}

#[test]
fn test_missing_team_directory_fails_when_authors_enabled() {
    let temp = site_with_posts();
    fs::write(
        temp.path().join(".create-post.toml"),
        "[authors]\nenabled = true\n",
    )
    .unwrap();

    create_post(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load team members"));
}

#[test]
fn test_without_a_terminal_nothing_is_written() {
    let temp = site_with_posts();
    create_post(temp.path()).write_stdin("My Post\n").assert().failure();

    let posts = fs::read_dir(temp.path().join("content/blog")).unwrap().count();
    assert_eq!(posts, 1);
}
