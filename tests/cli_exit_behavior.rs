use std::process::{Command, Output};
use std::str;

fn run_adapter(args: &[&str], model_dir: &std::path::Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ocr-infer-adapter"))
        .args(args)
        .env("OCR_INFER_MODEL_DIR", model_dir)
        .env_remove("OCR_INFER_DEBUG")
        .output()
        .expect("Failed to execute ocr-infer-adapter")
}

#[test]
fn test_missing_image_emits_single_empty_line_and_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.png");

    let output = run_adapter(&["--image", missing.to_str().unwrap()], dir.path());

    assert!(output.status.success(), "adapter exited with {:?}", output.status);
    assert_eq!(output.stdout, b"\n");
}

#[test]
fn test_undecodable_image_emits_single_empty_line() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.png");
    std::fs::write(&bogus, "not an image").unwrap();

    let output = run_adapter(
        &["--image", bogus.to_str().unwrap(), "--mode", "tiny", "--size", "256"],
        dir.path(),
    );

    assert!(output.status.success());
    assert_eq!(output.stdout, b"\n");
    let stderr = str::from_utf8(&output.stderr).expect("stderr is not valid UTF-8");
    assert!(!stderr.contains("[time] load="), "model must not be loaded: {}", stderr);
}

#[test]
fn test_missing_required_argument_still_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_adapter(&["--mode", "small"], dir.path());

    assert!(output.status.success());
    assert_eq!(output.stdout, b"\n");
}

#[test]
fn test_invalid_mode_still_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_adapter(&["--image", "a.png", "--mode", "huge"], dir.path());

    assert!(output.status.success());
    assert_eq!(output.stdout, b"\n");
}

#[test]
fn test_help_lists_documented_options() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_adapter(&["--help"], dir.path());

    assert!(output.status.success());
    let stdout = str::from_utf8(&output.stdout).expect("stdout is not valid UTF-8");
    for option in ["--image", "--mode", "--size", "--max-chars"] {
        assert!(stdout.contains(option), "help should mention {}", option);
    }
}
