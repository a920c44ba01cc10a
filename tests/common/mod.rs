/*!
 * Common test utilities for the subcomply test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use subcomply::subtitle_processor::OutputCue;

/// Three well-formed cues with generous timing
pub const SAMPLE_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
";

/// Routes library logs to the test output; safe to call repeatedly
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SRT)
}

/// Builds one SRT block
pub fn srt_block(index: i64, start: &str, end: &str, lines: &[&str]) -> String {
    format!("{}\n{} --> {}\n{}", index, start, end, lines.join("\n"))
}

/// Joins blocks into a track
pub fn srt_track(blocks: &[String]) -> String {
    blocks.join("\n\n")
}

/// `count` words of twelve letters each, separated by single spaces
pub fn twelve_letter_words(count: usize) -> String {
    vec!["abcdefghijkl"; count].join(" ")
}

/// Asserts the timing invariants of rendered cues, in milliseconds with a
/// 1ms rounding tolerance
pub fn assert_timing_invariants(cues: &[OutputCue], min_gap_seconds: f64) {
    for cue in cues {
        let start = cue.start_timestamp().as_millis() as f64;
        let end = cue.end_timestamp().as_millis() as f64;
        let duration = end - start;
        assert!(duration + 1.0 >= 5000.0 / 6.0, "cue {} too short: {}ms", cue.index, duration);
        assert!(duration <= 7001.0, "cue {} too long: {}ms", cue.index, duration);
    }

    for pair in cues.windows(2) {
        let gap = pair[1].start_timestamp().as_millis() as f64 - pair[0].end_timestamp().as_millis() as f64;
        assert!(
            gap + 1.0 >= min_gap_seconds * 1000.0,
            "gap before cue {} is {}ms",
            pair[1].index,
            gap
        );
    }
}
