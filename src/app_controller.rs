use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::compliance::{ComplianceEngine, ComplianceReport};
use crate::errors::AppError;
use crate::file_utils::{FileManager, OUTPUT_TIMESTAMP_FORMAT};
use crate::validation::{AuditReport, ComplianceAuditor};

// @module: Application controller for subtitle processing

/// Counts gathered while processing a folder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Main application controller for subtitle compliance
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Engine built from the configuration
    engine: ComplianceEngine,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let engine = ComplianceEngine::new(config.compliance)
            .with_timecode_repair(config.intake.repair_translated_timecodes);

        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Apply the rules to raw text, keeping the input's line endings
    pub fn comply_text(&self, content: &str) -> ComplianceReport {
        let mut report = self.engine.apply_with_report(content);
        let newline = FileManager::detect_newline(content);
        if newline != "\n" {
            report.text = report.text.replace('\n', newline);
        }
        report
    }

    /// Process one subtitle file.
    ///
    /// Returns the written path, or `None` when the output already exists
    /// and `force_overwrite` is off.
    pub fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<Option<PathBuf>> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        // Check if the input file exists
        if !input_file.exists() {
            return Err(AppError::File(format!("Input file does not exist: {:?}", input_file)).into());
        }

        let output = &self.config.output;
        let output_path = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            &output.prefix,
            &output.postfix,
            output.timestamp_suffix,
        );

        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, output already exists (use -f to force overwrite): {:?}", output_path);
            return Ok(None);
        }

        let content = FileManager::read_subtitle(&input_file)?;
        let report = self.comply_text(&content);

        for skipped in &report.skipped_blocks {
            warn!("{}", skipped.to_error());
        }

        if report.cues.is_empty() {
            warn!("No cues left after compliance in {:?}", input_file);
        }

        FileManager::write_to_file(&output_path, &report.text)
            .context("Failed to write compliant subtitles")?;

        info!(
            "{} source cues -> {} compliant cues ({} blocks skipped) in {}",
            report.source_cue_count,
            report.cues.len(),
            report.skipped_blocks.len(),
            Self::format_duration(start_time.elapsed())
        );
        info!("Success: {}", output_path.display());

        Ok(Some(output_path))
    }

    /// Process every `.srt` file under a directory, recursively.
    ///
    /// Results go to `output_dir` when given, otherwise to the configured
    /// output directory resolved against `input_dir`. Files this tool wrote
    /// are ignored.
    pub fn run_folder(&self, input_dir: PathBuf, output_dir: Option<PathBuf>, force_overwrite: bool) -> Result<FolderSummary> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        // Check if the input directory exists
        if !input_dir.is_dir() {
            return Err(AppError::File(format!("Input directory does not exist: {:?}", input_dir)).into());
        }

        let output_dir = output_dir.unwrap_or_else(|| input_dir.join(&self.config.output.directory));
        debug!("Writing folder results to {:?}", output_dir);
        let subtitle_files: Vec<PathBuf> = FileManager::find_files(&input_dir, "srt")?
            .into_iter()
            .filter(|path| !path.starts_with(&output_dir) && !self.is_own_output(path))
            .collect();

        if subtitle_files.is_empty() {
            return Err(anyhow!("No subtitle files found in directory: {:?}", input_dir));
        }

        // Create a progress bar for folder processing
        let folder_pb = ProgressBar::new(subtitle_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        let mut summary = FolderSummary::default();

        for subtitle_file in &subtitle_files {
            let file_name = subtitle_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            folder_pb.set_message(format!("Processing: {}", file_name));

            match self.run(subtitle_file.clone(), output_dir.clone(), force_overwrite) {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.errors += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors in {}",
            summary.processed,
            summary.skipped,
            summary.errors,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Audit a subtitle file against the configured rules without changing it
    pub fn audit(&self, input_file: &Path) -> Result<AuditReport> {
        let content = FileManager::read_subtitle(input_file)?;

        let report = ComplianceAuditor::from_config(&self.config.compliance)
            .with_timecode_repair(self.config.intake.repair_translated_timecodes)
            .audit_text(&content);

        for entry in report.failed_entries() {
            for issue in &entry.issues {
                warn!("Cue {}: {}", entry.index, issue);
            }
        }
        for skipped in &report.skipped_blocks {
            warn!("{}", skipped.to_error());
        }

        info!(
            "Audit of {:?}: {} cues, {} failed, {} issues",
            input_file,
            report.cue_count(),
            report.failed_entries().len(),
            report.total_issues
        );

        Ok(report)
    }

    /// Split a subtitle file into `{stem}.part-NNN.srt` files of at most the
    /// configured number of characters
    pub fn chunk(&self, input_file: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let content = FileManager::read_subtitle(input_file)?;
        let frames = FileManager::split_into_frames(&content);
        let chunks = FileManager::chunk_frames(&frames, self.config.chunking.max_chars_per_chunk);

        let stem = input_file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "subtitles".to_string());

        let mut written = Vec::with_capacity(chunks.len());
        for (number, chunk) in (1..).zip(&chunks) {
            let path = output_dir.join(format!("{}.part-{:03}.srt", stem, number));
            FileManager::write_to_file(&path, chunk)?;
            debug!("Wrote chunk {} ({} chars) to {:?}", number, chunk.chars().count(), path);
            written.push(path);
        }

        info!("Split {:?} into {} chunks", input_file, written.len());

        Ok(written)
    }

    // @checks: File name carries the configured postfix
    fn is_own_output(&self, path: &Path) -> bool {
        let postfix = &self.config.output.postfix;
        if postfix.is_empty() {
            return false;
        }

        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        let marker = format!("-{}", postfix);
        if stem.ends_with(&marker) {
            return true;
        }

        // {stem}-{postfix}-{timestamp}
        stem.rsplit_once(&format!("{}-", marker)).is_some_and(|(_, suffix)| {
            NaiveDateTime::parse_from_str(suffix, OUTPUT_TIMESTAMP_FORMAT).is_ok()
        })
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
