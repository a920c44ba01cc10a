/*!
 * Layout validation for timed cues.
 *
 * This module validates what a cue shows on screen:
 * - At least one non-blank line
 * - No more lines than the rules allow
 * - Every line within the character limit (23 when the cue contains Hangul)
 * - Speaker dashes followed by a space
 */

use log::debug;

use crate::compliance::ComplianceRules;
use crate::compliance::segmenter::needs_speaker_space;
use crate::subtitle_processor::OutputCue;

/// Result of layout validation for a single cue
#[derive(Debug, Clone)]
pub struct LayoutEntryResult {
    /// Index of the cue
    pub index: i64,
    /// Whether validation passed
    pub passed: bool,
    /// Issues found
    pub issues: Vec<LayoutIssue>,
}

impl LayoutEntryResult {
    /// Create a passing result
    pub fn passed(index: i64) -> Self {
        Self {
            index,
            passed: true,
            issues: vec![],
        }
    }

    /// Create a failing result
    pub fn failed(index: i64, issues: Vec<LayoutIssue>) -> Self {
        Self {
            index,
            passed: false,
            issues,
        }
    }
}

/// Types of layout issues
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutIssue {
    /// Cue shows no text
    EmptyText,
    /// Cue has more lines than allowed
    TooManyLines { count: usize, max: usize },
    /// A line exceeds the character limit (line numbers are 1-based)
    LineTooLong {
        line_number: usize,
        length: usize,
        max: usize,
    },
    /// A speaker dash is glued to the speech
    SpeakerDashSpacing { line_number: usize },
}

impl std::fmt::Display for LayoutIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutIssue::EmptyText => write!(f, "Cue has no text"),
            LayoutIssue::TooManyLines { count, max } => {
                write!(f, "Too many lines: {} (max: {})", count, max)
            }
            LayoutIssue::LineTooLong {
                line_number,
                length,
                max,
            } => write!(
                f,
                "Line {} too long: {} chars (max: {})",
                line_number, length, max
            ),
            LayoutIssue::SpeakerDashSpacing { line_number } => {
                write!(f, "Line {}: speaker dash without a following space", line_number)
            }
        }
    }
}

/// Layout validator for timed cues
pub struct LayoutValidator {
    rules: ComplianceRules,
}

impl LayoutValidator {
    /// Create a new validator with the default rules
    pub fn new() -> Self {
        Self {
            rules: ComplianceRules::default(),
        }
    }

    /// Create a new validator with custom rules
    pub fn with_rules(rules: ComplianceRules) -> Self {
        Self { rules }
    }

    /// Validate the lines of a single cue
    pub fn validate_cue(&self, cue: &OutputCue) -> LayoutEntryResult {
        let lines: Vec<&str> = cue
            .text_lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return LayoutEntryResult::failed(cue.index, vec![LayoutIssue::EmptyText]);
        }

        let mut issues = Vec::new();

        if lines.len() > self.rules.max_lines_per_cue {
            issues.push(LayoutIssue::TooManyLines {
                count: lines.len(),
                max: self.rules.max_lines_per_cue,
            });
        }

        let max = self.rules.line_limit_for(&lines.join(" "));
        for (line_number, line) in (1..).zip(&lines) {
            let length = line.chars().count();
            if length > max {
                issues.push(LayoutIssue::LineTooLong {
                    line_number,
                    length,
                    max,
                });
            }

            if needs_speaker_space(line) {
                issues.push(LayoutIssue::SpeakerDashSpacing { line_number });
            }
        }

        if issues.is_empty() {
            LayoutEntryResult::passed(cue.index)
        } else {
            LayoutEntryResult::failed(cue.index, issues)
        }
    }

    /// Validate a collection of cues
    pub fn validate_collection(&self, cues: &[OutputCue]) -> Vec<LayoutEntryResult> {
        let results: Vec<LayoutEntryResult> = cues.iter().map(|c| self.validate_cue(c)).collect();

        debug!(
            "Layout validation: {} cues, {} issues",
            cues.len(),
            results.iter().map(|r| r.issues.len()).sum::<usize>()
        );

        results
    }
}

impl Default for LayoutValidator {
    fn default() -> Self {
        Self::new()
    }
}
