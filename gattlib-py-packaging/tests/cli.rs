//! Contains the integration tests for this project, which run the binary against real (throwaway) Git
//! repositories and verify what it prints.

use assert_cmd::Command;
use gattlib_py_packaging::version::VersionSource;
use gattlib_py_packaging::DescriptorReport;
use regex::Regex;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

static README: &str = "# gattlib-py\n\nPython wrapper for gattlib.\n";

/// Runs `git` with the specified arguments in `dir`, panicking if it fails.
fn git(dir: &Path, args: &[&str]) {
    let output = std::process::Command::new("git")
        .args(&[
            "-c",
            "user.name=gattlib tests",
            "-c",
            "user.email=tests@gattlib.invalid",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "tag.gpgsign=false",
            "-c",
            "init.defaultBranch=main",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Unable to run git.");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Creates a temp dir containing a `gattlib-py` project. If `repo` is `true`, it's also made a Git
/// repository with one commit of the project.
fn project(repo: bool) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("README.md"), README).unwrap();
    fs::create_dir_all(dir.path().join("gattlib")).unwrap();
    fs::write(dir.path().join("gattlib/__init__.py"), "").unwrap();

    if repo {
        git(dir.path(), &["init", "--quiet"]);
        git(dir.path(), &["add", "."]);
        git(dir.path(), &["commit", "--quiet", "-m", "Initial commit"]);
    }

    dir
}

/// Adds another commit to the repository in `dir`.
fn commit(dir: &Path, message: &str) {
    fs::write(dir.join("CHANGES.txt"), message).unwrap();
    git(dir, &["add", "CHANGES.txt"]);
    git(dir, &["commit", "--quiet", "-m", message]);
}

/// Returns a [Command] for the binary, run in and pointed at `dir`, isolated from any override in the
/// test environment and from any Git repository that encloses the temp directory.
fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.current_dir(dir)
        .arg("--project-dir")
        .arg(dir)
        .env_remove("GATTLIB_PY_VERSION")
        .env_remove("GATTLIB_PY_GIT")
        .env("GIT_CEILING_DIRECTORIES", dir.parent().unwrap());
    cmd
}

/// Runs the command to completion and returns its standard output, asserting that it succeeded.
fn stdout(cmd: &mut Command) -> String {
    let output = cmd.unwrap();
    assert_eq!(true, output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

/// Verifies that the override is printed verbatim, whatever the repository says.
#[test]
fn version_override() {
    let project = project(true);
    git(project.path(), &["tag", "-a", "v0.7.2", "-m", "v0.7.2"]);

    let output = stdout(cmd(project.path()).env("GATTLIB_PY_VERSION", "1.0.0.dev3"));
    assert_eq!("1.0.0.dev3\n", output);
}

/// Verifies that a clean checkout at an annotated tag is versioned as exactly that tag.
#[test]
fn version_at_tag() {
    let project = project(true);
    git(project.path(), &["tag", "-a", "v0.7.2", "-m", "v0.7.2"]);

    assert_eq!("v0.7.2\n", stdout(&mut cmd(project.path())));
}

/// Verifies that commits after a (lightweight) tag are counted and the commit hash is included.
#[test]
fn version_past_tag() {
    let project = project(true);
    git(project.path(), &["tag", "0.7.2"]);
    commit(project.path(), "one");
    commit(project.path(), "two");

    let output = stdout(&mut cmd(project.path()));
    let expected = Regex::new("^0\\.7\\.2-2-g[0-9a-f]{7,}\n$").unwrap();
    assert!(expected.is_match(&output), "unexpected version: {:?}", output);
}

/// Verifies the dirty marker, both with and without a tag.
#[test]
fn version_dirty() {
    let project = project(true);
    fs::write(project.path().join("README.md"), "# changed\n").unwrap();

    let untagged = stdout(&mut cmd(project.path()));
    let expected = Regex::new("^[0-9a-f]{7,}-dirty\n$").unwrap();
    assert!(expected.is_match(&untagged), "unexpected version: {:?}", untagged);

    git(project.path(), &["tag", "-a", "v0.7.2", "-m", "v0.7.2"]);
    assert_eq!("v0.7.2-dirty\n", stdout(&mut cmd(project.path())));
}

/// Verifies that resolving twice against an unchanged repository gives the same version.
#[test]
fn version_idempotent() {
    let project = project(true);
    commit(project.path(), "one");

    let first = stdout(&mut cmd(project.path()));
    let second = stdout(&mut cmd(project.path()));
    assert_eq!(first, second);
    assert_ne!("\n", first);
}

/// Verifies that outside of any repository, the version is silently empty, unless `--strict` is used.
#[test]
fn version_outside_repository() {
    let project = project(false);

    assert_eq!("\n", stdout(&mut cmd(project.path())));

    let output = cmd(project.path()).arg("--strict").unwrap_err();
    let output = output.as_output().unwrap();
    assert_eq!(false, output.status.success());
    assert_eq!("", String::from_utf8_lossy(&output.stdout));
}

/// Verifies the `descriptor` command's JSON.
#[test]
fn descriptor() {
    let project = project(true);
    git(project.path(), &["tag", "-a", "v0.7.2", "-m", "v0.7.2"]);

    let output = stdout(cmd(project.path()).arg("descriptor"));
    let report: DescriptorReport = serde_json::from_str(&output).unwrap();

    assert_eq!(VersionSource::SourceControl, report.version_source);
    assert_eq!("gattlib-py", report.package.name);
    assert_eq!("v0.7.2", report.package.version.as_str());
    assert_eq!(README, report.package.long_description);
    assert_eq!(vec!["gattlib".to_owned()], report.package.packages);
    assert_eq!(vec!["setuptools".to_owned()], report.package.install_requires);
    assert_eq!(env!("CARGO_PKG_VERSION"), report.tool.tool_version);

    let parts = report.version_parts.unwrap();
    assert_eq!(Some("v0.7.2".to_owned()), parts.tag);
    assert_eq!(Some(0), parts.distance);
    assert_eq!(None, parts.commit);
    assert_eq!(true, parts.is_release());
}

/// Verifies the `pkg-info` command's output.
#[test]
fn pkg_info() {
    let project = project(true);
    git(project.path(), &["tag", "-a", "v0.7.2", "-m", "v0.7.2"]);

    let output = stdout(cmd(project.path()).arg("pkg-info"));
    assert!(output.starts_with("Metadata-Version: 2.1\nName: gattlib-py\nVersion: v0.7.2\n"));
    assert!(output.contains("\nRequires-Dist: setuptools\n\n"));
    assert!(output.ends_with(README));
}

/// Verifies that a missing README is fatal, and that the error says which file was missing.
#[test]
fn missing_readme() {
    let project = project(false);
    fs::remove_file(project.path().join("README.md")).unwrap();

    let output = cmd(project.path())
        .env("GATTLIB_PY_VERSION", "0.7.2")
        .arg("descriptor")
        .unwrap_err();
    let output = output.as_output().unwrap();
    assert_eq!(false, output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("README.md"));
}

/// Verifies that a missing README is fatal for the default `version` command too, even with an override.
#[test]
fn version_missing_readme() {
    let project = project(false);
    fs::remove_file(project.path().join("README.md")).unwrap();

    let output = cmd(project.path())
        .env("GATTLIB_PY_VERSION", "0.7.2")
        .unwrap_err();
    let output = output.as_output().unwrap();
    assert_eq!(false, output.status.success());
    assert_eq!("", String::from_utf8_lossy(&output.stdout));
    assert!(String::from_utf8_lossy(&output.stderr).contains("README.md"));
}
