use anyhow::{Context, Result};
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::AppError;

// @module: File and directory utilities

// @const: One block with the blank lines that follow it
static FRAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s).*?(?:\r?\n\r?\n+|$)").expect("Invalid frame regex")
});

/// Format of the timestamp appended to output file names
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d--%H-%M";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a subtitle file as UTF-8
    pub fn read_subtitle<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(AppError::File(format!("Subtitle file not found: {:?}", path)).into());
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
    }

    // @returns: "\r\n" when the text uses DOS line endings, else "\n"
    pub fn detect_newline(text: &str) -> &'static str {
        if text.contains("\r\n") { "\r\n" } else { "\n" }
    }

    // @generates: Output path for a processed subtitle
    // @params: input_file, output_dir, prefix, postfix, timestamp
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        prefix: &str,
        postfix: &str,
        timestamp: bool,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default().to_string_lossy();
        let timestamp = timestamp.then(|| Local::now().format(OUTPUT_TIMESTAMP_FORMAT).to_string());

        output_dir
            .as_ref()
            .join(Self::output_file_name(&stem, prefix, postfix, timestamp.as_deref()))
    }

    /// `{prefix-}{stem}{-postfix}{-timestamp}.srt`, skipping empty parts
    pub fn output_file_name(stem: &str, prefix: &str, postfix: &str, timestamp: Option<&str>) -> String {
        let mut name = String::new();
        if !prefix.is_empty() {
            name.push_str(prefix);
            name.push('-');
        }
        name.push_str(stem);
        if !postfix.is_empty() {
            name.push('-');
            name.push_str(postfix);
        }
        if let Some(timestamp) = timestamp {
            name.push('-');
            name.push_str(timestamp);
        }
        name.push_str(".srt");
        name
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let extension = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
            {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Split raw text into frames: each block together with the blank lines
    /// after it. Whitespace-only frames are dropped.
    pub fn split_into_frames(text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        FRAME_REGEX
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|frame| !frame.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Greedily pack frames into chunks of at most `max_chars` characters.
    ///
    /// A frame longer than the limit forms a chunk of its own, and a chunk
    /// closes as soon as it reaches the limit. Joining the chunks gives back
    /// the frames unchanged.
    pub fn chunk_frames(frames: &[String], max_chars: usize) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_chars = 0;

        for frame in frames {
            let frame_chars = frame.chars().count();

            if current_chars + frame_chars > max_chars && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_chars = 0;
            }

            current.push_str(frame);
            current_chars += frame_chars;

            if current_chars >= max_chars {
                chunks.push(std::mem::take(&mut current));
                current_chars = 0;
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}
