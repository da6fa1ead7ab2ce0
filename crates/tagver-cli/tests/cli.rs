//! End-to-end runs of the `tagver` binary against throwaway repositories.

use git2::{Commit, ObjectType, Repository, Signature};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test context with a fresh repository in a temp directory
struct TestContext {
    repo: Repository,
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let repo = Repository::init(temp_dir.path()).expect("failed to init repository");
        Self { repo, temp_dir }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn commit(&self, message: &str) {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = self
            .repo
            .index()
            .and_then(|mut index| index.write_tree())
            .unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&Commit<'_>> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap();
    }

    fn commits(&self, n: usize) {
        for i in 0..n {
            self.commit(&format!("commit {i}"));
        }
    }

    fn tag(&self, name: &str) {
        let head = self.repo.head().unwrap().peel(ObjectType::Commit).unwrap();
        self.repo.tag_lightweight(name, &head, false).unwrap();
    }

    fn head_hex(&self) -> String {
        self.repo.head().unwrap().peel_to_commit().unwrap().id().to_string()
    }

    fn tagver_cmd(&self) -> Command {
        // Find the binary built by cargo
        let bin_path = env!("CARGO_BIN_EXE_tagver");
        let mut cmd = Command::new(bin_path);
        cmd.current_dir(self.path());
        cmd.env_remove("TAGVER_REPO");
        cmd.env_remove("TAGVER_CONFIG");
        cmd.env_remove("RUST_LOG");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.tagver_cmd()
            .args(args)
            .output()
            .expect("failed to run tagver")
    }

    fn stdout(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "tagver {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let stdout = ctx.stdout(&["--help"]);
    assert!(stdout.contains("Usage:"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx.run(&["--version"]);
    assert!(output.status.success());
}

#[test]
fn code_and_name_past_tag() {
    let ctx = TestContext::new();
    ctx.commit("initial");
    ctx.tag("v1.0");
    ctx.commits(3);

    assert_eq!(ctx.stdout(&["code"]), "65539\n");

    let name = ctx.stdout(&["name"]);
    let name = name.trim_end();
    let abbrev = name
        .strip_prefix("1.0.r3.g")
        .unwrap_or_else(|| panic!("unexpected name {name}"));
    assert!(abbrev.len() >= 4);
    assert!(ctx.head_hex().starts_with(abbrev));
}

#[test]
fn exact_tag() {
    let ctx = TestContext::new();
    ctx.commit("initial");
    ctx.tag("v2.5");

    assert_eq!(ctx.stdout(&["code"]), "132096\n");
    assert_eq!(ctx.stdout(&["name"]), "2.5\n");
}

#[test]
fn untagged_repository() {
    let ctx = TestContext::new();
    ctx.commit("initial");

    assert_eq!(ctx.stdout(&["code"]), "1\n");
    assert!(ctx.stdout(&["name"]).starts_with("NONE.r1.g"));
    assert_eq!(
        ctx.stdout(&["describe"]),
        format!("- 1 {}\n", ctx.head_hex())
    );
}

#[test]
fn repo_flag_and_env_select_repository() {
    let ctx = TestContext::new();
    ctx.commit("initial");
    ctx.tag("v4.2");

    let elsewhere = TempDir::new().unwrap();
    let repo = ctx.path().to_str().unwrap();

    let output = ctx
        .tagver_cmd()
        .current_dir(elsewhere.path())
        .args(["--repo", repo, "name"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "4.2\n");

    let output = ctx
        .tagver_cmd()
        .current_dir(elsewhere.path())
        .env("TAGVER_REPO", repo)
        .arg("code")
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "262656\n");
}

#[test]
fn show_text_lists_both_values() {
    let ctx = TestContext::new();
    ctx.commit("initial");
    ctx.tag("v1.0");
    ctx.commits(3);

    let stdout = ctx.stdout(&["show"]);
    assert!(stdout.contains("Code:"));
    assert!(stdout.contains("65539"));
    assert!(stdout.contains("1.0.r3.g"));
    assert!(stdout.contains(&ctx.head_hex()));
}

#[test]
fn show_json() {
    let ctx = TestContext::new();
    ctx.commit("initial");
    ctx.tag("v1.0");
    ctx.commits(3);

    let stdout = ctx.stdout(&["show", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["code"], 65539);
    assert_eq!(value["describe"]["tag"], "v1.0");
    assert_eq!(value["describe"]["distance"], 3);
    assert_eq!(value["describe"]["commit"], ctx.head_hex());
}

#[test]
fn show_env_with_prefix() {
    let ctx = TestContext::new();
    ctx.commit("initial");
    ctx.tag("v2.5");

    assert_eq!(
        ctx.stdout(&["show", "--format", "env", "--prefix", "APP"]),
        "APP_CODE=132096\nAPP_NAME=2.5\n"
    );
}

#[test]
fn show_cargo_instructions() {
    let ctx = TestContext::new();
    ctx.commit("initial");
    ctx.tag("v2.5");

    let stdout = ctx.stdout(&["show", "--format", "cargo"]);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("cargo:rustc-env=VERSION_CODE=132096"));
    assert_eq!(lines.next(), Some("cargo:rustc-env=VERSION_NAME=2.5"));
    assert!(lines.all(|l| l.starts_with("cargo:rerun-if-changed=")));
}

#[test]
fn config_file_sets_defaults() {
    let ctx = TestContext::new();
    ctx.commit("initial");
    ctx.tag("v2.5");
    std::fs::write(
        ctx.path().join("tagver.toml"),
        "[output]\nformat = \"env\"\nprefix = \"BUILD\"\n",
    )
    .unwrap();

    assert_eq!(
        ctx.stdout(&["show"]),
        "BUILD_CODE=132096\nBUILD_NAME=2.5\n"
    );
    assert_eq!(
        ctx.stdout(&["show", "--format", "env", "--prefix", "CLI"]),
        "CLI_CODE=132096\nCLI_NAME=2.5\n"
    );
}

#[test]
fn config_can_require_annotated_tags() {
    let ctx = TestContext::new();
    ctx.commits(2);
    ctx.tag("v1.0");
    std::fs::write(ctx.path().join("tagver.toml"), "[describe]\ntags = \"annotated\"\n").unwrap();

    assert_eq!(ctx.stdout(&["code"]), "2\n");
}

#[test]
fn malformed_tag_fails_without_output() {
    let ctx = TestContext::new();
    ctx.commit("initial");
    ctx.tag("v1.0-beta");
    ctx.commit("next");

    let output = ctx.run(&["show"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Malformed tag 'v1.0-beta'"), "{stderr}");
    assert!(stderr.contains("minor"), "{stderr}");

    // The raw triple is still inspectable.
    let describe = ctx.stdout(&["describe"]);
    assert!(describe.starts_with("v1.0-beta 1 "));
}

#[test]
fn overflowing_tag_fails() {
    let ctx = TestContext::new();
    ctx.commit("initial");
    ctx.tag("v300.0");

    let output = ctx.run(&["code"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("exceeds 255"));
}

#[test]
fn not_a_repository_fails() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_tagver"))
        .current_dir(dir.path())
        .env_remove("TAGVER_REPO")
        .env_remove("TAGVER_CONFIG")
        .arg("code")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Repository unavailable"));
}

#[test]
fn repeated_runs_are_identical() {
    let ctx = TestContext::new();
    ctx.commit("initial");
    ctx.tag("v0.4");
    ctx.commits(7);

    let first = ctx.stdout(&["show", "--format", "json"]);
    let second = ctx.stdout(&["show", "--format", "json"]);
    assert_eq!(first, second);
}

#[test]
fn completions_need_no_repository() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_tagver"))
        .current_dir(dir.path())
        .args(["completions", "bash"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("tagver"));
}
