use std::{fs, process::Command};

use tempfile::tempdir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_lxgw-jb-nerd")
}

#[test]
fn help_lists_commands() {
    let output = Command::new(bin()).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["build", "check", "clean"] {
        assert!(stdout.contains(command), "missing {command} in:\n{stdout}");
    }
}

#[test]
fn clean_removes_work_and_output() {
    let dir = tempdir().unwrap();
    let work = dir.path().join("work");
    let output = dir.path().join("output");
    fs::create_dir_all(work.join("downloads")).unwrap();
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("LXGWJBMonoNerdFont-Regular.ttf"), b"font").unwrap();

    let result = Command::new(bin())
        .current_dir(dir.path())
        .args(["clean", "--work-dir", "work", "--output-dir", "output"])
        .output()
        .unwrap();

    assert!(
        result.status.success(),
        "clean failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert!(String::from_utf8_lossy(&result.stdout).contains("Cleaned 2 directories"));
    assert!(!work.exists());
    assert!(!output.exists());
}

#[test]
fn check_fails_without_glyph_editor() {
    let dir = tempdir().unwrap();

    let result = Command::new(bin())
        .current_dir(dir.path())
        .args(["check", "--fontforge", "/nonexistent/fontforge"])
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Glyph editor: FAIL"));
    assert!(stdout.contains("Directory structure: PASS"));
    assert!(stdout.contains("Total: 1/2 checks passed"));
    assert!(String::from_utf8_lossy(&result.stderr).contains("Error:"));
    assert!(dir.path().join("work/downloads").is_dir());
}
