use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const PAGE: &str = "docs/components/segmented-button.md";

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_apidoc")));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// Fresh, writable copy of the fixture package.
fn package() -> TempDir {
    let dir = TempDir::new().unwrap();
    copy_dir(Path::new(&fixture_path("package")), dir.path());
    dir
}

fn config_arg(dir: &TempDir) -> String {
    dir.path().join("apidoc.toml").to_str().unwrap().to_string()
}

// -- update --

#[test]
fn regenerates_api_region() {
    let dir = package();

    cmd().args(["-c", config_arg(&dir).as_str()]).assert().success();

    let output = fs::read_to_string(dir.path().join(PAGE)).unwrap();
    let expected = fs::read_to_string(fixture_path("segmented-button.expected.md")).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn second_run_is_byte_identical() {
    let dir = package();

    cmd().args(["-c", config_arg(&dir).as_str()]).assert().success();
    let first = fs::read_to_string(dir.path().join(PAGE)).unwrap();

    cmd().args(["-c", config_arg(&dir).as_str()]).assert().success();
    let second = fs::read_to_string(dir.path().join(PAGE)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn discovers_config_from_working_directory() {
    let dir = package();

    cmd()
        .current_dir(dir.path().join("docs/components"))
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join(PAGE)).unwrap();
    assert!(output.contains("### OutlinedSegmentedButtonSet"));
}

#[test]
fn verbose_logs_updated_page() {
    let dir = package();

    cmd()
        .args(["-c", config_arg(&dir).as_str(), "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Updated API docs"));
}

// -- check mode --

#[test]
fn check_fails_on_stale_page_without_writing() {
    let dir = package();
    let before = fs::read_to_string(dir.path().join(PAGE)).unwrap();

    cmd()
        .args(["-c", config_arg(&dir).as_str(), "--check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("stale:"))
        .stderr(predicate::str::contains("segmented-button.md"));

    let after = fs::read_to_string(dir.path().join(PAGE)).unwrap();
    assert_eq!(before, after);
}

#[test]
fn check_passes_after_update() {
    let dir = package();

    cmd().args(["-c", config_arg(&dir).as_str()]).assert().success();
    cmd()
        .args(["-c", config_arg(&dir).as_str(), "--check"])
        .assert()
        .success();
}

// -- markers --

#[test]
fn page_without_markers_is_left_alone() {
    let dir = package();
    let page = "# Segmented buttons\n\nNo generated region.\n";
    fs::write(dir.path().join(PAGE), page).unwrap();

    cmd()
        .args(["-c", config_arg(&dir).as_str()])
        .assert()
        .success()
        .stderr(predicate::str::contains("No generated API region"));

    assert_eq!(fs::read_to_string(dir.path().join(PAGE)).unwrap(), page);
}

#[test]
fn strict_fails_on_page_without_markers() {
    let dir = package();
    fs::write(dir.path().join(PAGE), "# Segmented buttons\n").unwrap();

    cmd()
        .args(["-c", config_arg(&dir).as_str(), "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no `<!-- auto-generated API docs start -->`"));
}

// -- errors --

#[test]
fn missing_config_fails() {
    cmd()
        .args(["-c", "/nonexistent/apidoc.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn unresolvable_entrypoint_aborts_without_writing() {
    let dir = package();
    let before = fs::read_to_string(dir.path().join(PAGE)).unwrap();
    fs::write(
        dir.path().join("apidoc.toml"),
        r#"[docs]
"segmented-button.md" = [
  "src/segmentedbutton/outlined-segmented-button.ts",
  "src/segmentedbutton/missing.ts",
]
"#,
    )
    .unwrap();

    cmd()
        .args(["-c", config_arg(&dir).as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("module not found: src/segmentedbutton/missing.ts"));

    assert_eq!(fs::read_to_string(dir.path().join(PAGE)).unwrap(), before);
}

#[test]
fn invalid_manifest_fails() {
    let dir = package();
    fs::write(dir.path().join("custom-elements.json"), "{ \"modules\": 3 }").unwrap();

    cmd()
        .args(["-c", config_arg(&dir).as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid manifest"));
}
