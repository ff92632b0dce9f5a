/*!
 * Integration test for clipboard functionality
 */

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::process::Command;

use tempfile::tempdir;

#[test]
#[ignore] // This test requires tmux to be running and is ignored by default
          // To run this test manually use: cargo test --test clipboard_integration -- --ignored
fn test_clip_flag() {
    // Skip if not in a tmux session
    if env::var("TMUX").is_err() {
        return;
    }

    let temp_dir = tempdir().unwrap();
    let project = temp_dir.path().join("project");
    fs::create_dir(&project).unwrap();
    let output_file = temp_dir.path().join("bundle.txt");

    let mut file = File::create(project.join("test.txt")).unwrap();
    writeln!(file, "Test content for clipboard integration").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_filebundle"))
        .args([
            "--clip",
            "--no-report",
            "-o",
            &output_file.to_string_lossy(),
            &project.to_string_lossy(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let bundle = fs::read_to_string(&output_file).unwrap();
    assert_eq!(bundle, "test.txt:\nTest content for clipboard integration\n");

    let clipboard_output = Command::new("tmux").args(["show-buffer"]).output().unwrap();
    let clipboard_content = String::from_utf8_lossy(&clipboard_output.stdout);

    assert_eq!(bundle, clipboard_content);
}
