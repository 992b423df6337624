use std::path::Path;
use std::process::{Command, Output};

fn convert(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_convert"))
        .args(args)
        .current_dir(cwd)
        .env_remove("CONVERT_OUTPUT_DIR")
        .env_remove("FFMPEG_BIN")
        .env_remove("RUST_LOG")
        .env_remove("LOG_LEVEL")
        .output()
        .expect("failed to run convert")
}

#[test]
fn missing_input_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = convert(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    assert!(output.stdout.is_empty());
    assert!(!dir.path().join("core").exists());
}

#[test]
fn extra_input_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    // A missing binary would fail differently if anything were spawned.
    let output = convert(
        dir.path(),
        &["--ffmpeg", "/nonexistent/ffmpeg", "a.mp4", "b.mp4"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("could not be started"));
    assert!(!dir.path().join("core").exists());
}

#[test]
fn help_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let output = convert(dir.path(), &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--dry-run"));
}

#[cfg(unix)]
#[test]
fn dry_run_prints_commands_and_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = convert(dir.path(), &["--dry-run", "demo.mp4"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ffmpeg -i demo.mp4 -vn -acodec libmp3lame -q:a 2 core/demo.mp3 -y"));
    assert!(stdout.contains("core/demo_palette.png -y"));
    assert!(stdout.contains("paletteuse' core/demo.gif -y"));
    assert!(!dir.path().join("core").exists());
}

#[test]
fn missing_tool_fails_before_any_step() {
    let dir = tempfile::tempdir().unwrap();
    let output = convert(dir.path(), &["--ffmpeg", "/nonexistent/ffmpeg", "demo.mp4"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not be started"));
    assert!(!dir.path().join("core").exists());
}

#[cfg(unix)]
#[test]
fn failing_tool_stops_at_audio_step() {
    let dir = tempfile::tempdir().unwrap();
    let output = convert(dir.path(), &["--ffmpeg", "false", "demo.mp4"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error during audio extraction: audio conversion failed"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Generating palette"));
}

#[cfg(unix)]
#[test]
fn succeeding_tool_reports_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let output = convert(dir.path(), &["--ffmpeg", "true", "/videos/demo.mp4"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Conversion complete!"));
    assert!(stdout.contains("MP3: core/demo.mp3"));
    assert!(stdout.contains("GIF: core/demo.gif"));
    assert!(dir.path().join("core").is_dir());
    assert!(!dir.path().join("core/demo_palette.png").exists());
}

#[cfg(unix)]
#[test]
fn json_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = convert(
        dir.path(),
        &["--ffmpeg", "true", "--output-dir", "out", "--json", "clip.final.mp4"],
    );

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["input"], "clip.final.mp4");
    assert_eq!(report["audio"], "out/clip.final.mp3");
    assert_eq!(report["image"], "out/clip.final.gif");
    assert_eq!(report["dryRun"], false);
}

#[cfg(unix)]
#[test]
fn dry_run_json_keeps_stdout_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let output = convert(dir.path(), &["--dry-run", "--json", "demo.mp4"]);

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["dryRun"], true);
    assert_eq!(report["paletteRemoved"], false);
    let commands = report["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 3);
    assert_eq!(
        commands[0],
        "ffmpeg -i demo.mp4 -vn -acodec libmp3lame -q:a 2 core/demo.mp3 -y"
    );
    assert!(!dir.path().join("core").exists());
}

#[cfg(unix)]
#[test]
fn input_starting_with_a_dash_is_a_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let output = convert(dir.path(), &["--dry-run", "--json", "-clip.mp4"]);

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["input"], "-clip.mp4");
    assert_eq!(report["audio"], "core/-clip.mp3");
    assert_eq!(report["image"], "core/-clip.gif");
}
