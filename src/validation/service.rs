/*!
 * Compliance audit that orchestrates the timecode and layout validators.
 *
 * The auditor takes cues that already carry final timing, either straight
 * from the engine or parsed from an SRT file, and reports every rule they
 * break without changing anything.
 */

use std::fmt;

use log::{debug, warn};

use crate::compliance::{ComplianceConfig, ComplianceRules};
use crate::subtitle_processor::{CueParser, OutputCue, SkippedBlock, split_blocks};

use super::layout::{LayoutIssue, LayoutValidator};
use super::timecodes::{TimecodeIssue, TimecodeValidator};

/// A rule broken by one cue
#[derive(Debug, Clone, PartialEq)]
pub enum AuditIssue {
    Timing(TimecodeIssue),
    Layout(LayoutIssue),
}

impl fmt::Display for AuditIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditIssue::Timing(issue) => write!(f, "[timing] {}", issue),
            AuditIssue::Layout(issue) => write!(f, "[layout] {}", issue),
        }
    }
}

/// Audit outcome for a single cue
#[derive(Debug, Clone)]
pub struct AuditEntryResult {
    /// Index of the cue as written
    pub index: i64,
    /// Whether the cue broke no rule
    pub passed: bool,
    /// Issues found, timing first
    pub issues: Vec<AuditIssue>,
}

/// Audit outcome for a whole track
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    /// Overall pass/fail status
    pub passed: bool,
    /// Results for each cue, in track order
    pub entry_results: Vec<AuditEntryResult>,
    /// Total number of issues
    pub total_issues: usize,
    /// Blocks that could not be parsed at all
    pub skipped_blocks: Vec<SkippedBlock>,
}

impl AuditReport {
    /// Get all failed entries
    pub fn failed_entries(&self) -> Vec<&AuditEntryResult> {
        self.entry_results.iter().filter(|r| !r.passed).collect()
    }

    /// Number of cues audited
    pub fn cue_count(&self) -> usize {
        self.entry_results.len()
    }
}

/// Checks timed cues against the compliance rules
pub struct ComplianceAuditor {
    timecodes: TimecodeValidator,
    layout: LayoutValidator,
    parser: CueParser,
}

impl ComplianceAuditor {
    /// Create an auditor for the given rules
    pub fn new(rules: ComplianceRules) -> Self {
        Self {
            timecodes: TimecodeValidator::with_rules(rules),
            layout: LayoutValidator::with_rules(rules),
            parser: CueParser::new(),
        }
    }

    /// Create an auditor for the rules a config derives
    pub fn from_config(config: &ComplianceConfig) -> Self {
        Self::new(config.rules())
    }

    /// Accept timing lines mangled by machine translation
    pub fn with_timecode_repair(mut self, enabled: bool) -> Self {
        self.parser = self.parser.with_timecode_repair(enabled);
        self
    }

    /// Audit cues in display order
    pub fn audit_cues(&self, cues: &[OutputCue]) -> AuditReport {
        let timing = self.timecodes.validate_sequence(cues);
        let layout = self.layout.validate_collection(cues);

        let entry_results: Vec<AuditEntryResult> = timing
            .into_iter()
            .zip(layout)
            .map(|(timing, layout)| {
                let issues: Vec<AuditIssue> = timing
                    .issues
                    .into_iter()
                    .map(AuditIssue::Timing)
                    .chain(layout.issues.into_iter().map(AuditIssue::Layout))
                    .collect();

                AuditEntryResult {
                    index: timing.index,
                    passed: issues.is_empty(),
                    issues,
                }
            })
            .collect();

        let total_issues: usize = entry_results.iter().map(|r| r.issues.len()).sum();
        let passed = total_issues == 0;

        debug!(
            "Audit: {} cues, {} failed, {} issues",
            entry_results.len(),
            entry_results.iter().filter(|r| !r.passed).count(),
            total_issues
        );

        AuditReport {
            passed,
            entry_results,
            total_issues,
            skipped_blocks: Vec::new(),
        }
    }

    /// Parse SRT text keeping its timing as written, then audit it.
    ///
    /// Unparseable blocks are listed in the report and fail it.
    pub fn audit_text(&self, content: &str) -> AuditReport {
        let mut cues = Vec::new();
        let mut skipped = Vec::new();

        for (i, block) in split_blocks(content).iter().enumerate() {
            match self.parser.parse_block_as_written(block) {
                Ok(cue) => cues.push(cue),
                Err(reason) => {
                    warn!("Block {} cannot be audited: {}", i + 1, reason);
                    skipped.push(SkippedBlock {
                        block_number: i + 1,
                        first_line: block.first().cloned().unwrap_or_default(),
                        reason,
                    });
                }
            }
        }

        let mut report = self.audit_cues(&cues);
        report.passed = report.passed && skipped.is_empty();
        report.skipped_blocks = skipped;
        report
    }
}

impl Default for ComplianceAuditor {
    fn default() -> Self {
        Self::new(ComplianceRules::default())
    }
}
