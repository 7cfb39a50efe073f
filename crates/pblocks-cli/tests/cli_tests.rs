//! End-to-end tests that run the `pblocks` binary against temporary files.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const SOURCE: &str = "fn main() {\n  doSomething();\n}\n";

const REGION: &str = "\
fn main() {
  //#region
  // __1__
  // doSomething();
  // __2__active
  //#endregion
  doSomething();
  //#endblock
}
";

fn pblocks(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pblocks").unwrap();
    cmd.current_dir(dir)
        .env_remove("PBLOCKS_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn setup(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("main.rs"), content).unwrap();
    dir
}

fn read(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("main.rs")).unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    pblocks(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new-block"))
        .stdout(predicate::str::contains("next-block"))
        .stdout(predicate::str::contains("prev-block"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_new_block_wraps_line() {
    let dir = setup(SOURCE);
    pblocks(dir.path())
        .args(["new-block", "main.rs", "--line", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created region"));

    assert_eq!(read(&dir), REGION);
}

#[test]
fn test_new_block_inside_region_adds_block() {
    let dir = setup(REGION);
    pblocks(dir.path())
        .args(["new-block", "main.rs", "--line", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added block 3"));

    let text = read(&dir);
    assert!(text.contains("  // __2__\n  // doSomething();\n  // __3__active\n"));
}

#[test]
fn test_next_and_prev_switch_blocks() {
    let dir = setup(&REGION.replace("  doSomething();\n  //#endblock", "  doOther();\n  //#endblock"));

    pblocks(dir.path())
        .args(["next-block", "main.rs", "-l", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Activated block 1"));
    let text = read(&dir);
    assert!(text.contains("  // __1__active\n  // __2__\n  // doOther();\n"));
    assert!(text.contains("  //#endregion\n  doSomething();\n"));

    pblocks(dir.path())
        .args(["prev-block", "main.rs", "-l", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Activated block 2"));
    assert!(read(&dir).contains("  //#endregion\n  doOther();\n"));
}

#[test]
fn test_dry_run_prints_diff_and_keeps_file() {
    let dir = setup(SOURCE);
    pblocks(dir.path())
        .args(["new-block", "main.rs", "--line", "2", "--dry-run"])
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("+++ b/main.rs"))
        .stdout(predicate::str::contains("+  //#region"));

    assert_eq!(read(&dir), SOURCE);
}

#[test]
fn test_skipped_command_leaves_file() {
    let dir = setup(SOURCE);
    pblocks(dir.path())
        .args(["next-block", "main.rs", "--line", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not inside a parallel region"));

    assert_eq!(read(&dir), SOURCE);
}

#[test]
fn test_config_file_selects_tabs() {
    let dir = setup("\tcall();\n");
    fs::write(
        dir.path().join(".pblocks.toml"),
        "[indent]\ninsert_spaces = false\n",
    )
    .unwrap();

    pblocks(dir.path())
        .args(["new-block", "main.rs", "--line", "1"])
        .assert()
        .success();
    assert!(read(&dir).starts_with("\t//#region\n\t// __1__\n\t// call();\n"));
}

#[test]
fn test_flag_overrides_config() {
    let dir = setup("\tcall();\n");
    fs::write(dir.path().join("custom.toml"), "[indent]\ntab_size = 2\n").unwrap();

    pblocks(dir.path())
        .args(["--config", "custom.toml", "new-block", "main.rs", "--line", "1"])
        .assert()
        .success();
    assert!(read(&dir).starts_with("  //#region\n"));

    let dir = setup("\tcall();\n");
    pblocks(dir.path())
        .args(["new-block", "main.rs", "--line", "1", "--tabs"])
        .assert()
        .success();
    assert!(read(&dir).starts_with("\t//#region\n"));
}

#[test]
fn test_invalid_config_is_an_error() {
    let dir = setup(SOURCE);
    fs::write(dir.path().join(".pblocks.toml"), "[indent]\ntab_size = 0\n").unwrap();

    pblocks(dir.path())
        .args(["new-block", "main.rs", "--line", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tab_size"));
    assert_eq!(read(&dir), SOURCE);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    pblocks(dir.path())
        .args(["new-block", "absent.rs", "--line", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.rs"));
}

#[test]
fn test_list_json() {
    let dir = setup(REGION);
    let output = pblocks(dir.path())
        .args(["list", "main.rs", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "start_line": 2,
            "end_line": 8,
            "block_ids": [1, 2],
            "active_id": 2,
            "well_formed": true,
        }])
    );
}

#[test]
fn test_list_text() {
    let dir = setup(REGION);
    pblocks(dir.path())
        .args(["list", "main.rs"])
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("lines    2-8"))
        .stdout(predicate::str::contains("active 2"));
}

#[test]
fn test_check_clean_file() {
    let dir = setup(REGION);
    pblocks(dir.path())
        .args(["check", "main.rs"])
        .assert()
        .success();
}

#[test]
fn test_check_reports_problems() {
    let dir = setup("//#region\n// __1__active\n//#endregion\ncode();\n");
    pblocks(dir.path())
        .args(["check", "main.rs"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("line 1: region is never closed"));
}

#[test]
fn test_untouched_lines_keep_their_endings() {
    let dir = setup("fn main() {\r\n  call();\n}\r\n");
    pblocks(dir.path())
        .args(["new-block", "main.rs", "--line", "2"])
        .assert()
        .success();

    let text = read(&dir);
    assert!(text.starts_with("fn main() {\r\n  //#region\r\n"));
    assert!(text.ends_with("  //#endblock\r\n}\r\n"));
    assert!(!text.contains("call();\n"));
}
