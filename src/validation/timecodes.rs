/*!
 * Timecode validation for timed cues.
 *
 * This module checks that cue timings are:
 * - Logically consistent (start < end)
 * - Within the minimum and maximum duration
 * - Readable at the configured reading speed
 * - Separated from the previous cue by the minimum gap
 *
 * Checks run on the millisecond values a cue renders to, with a 1ms
 * tolerance for rounding.
 */

use log::debug;

use crate::compliance::ComplianceRules;
use crate::subtitle_processor::OutputCue;

/// Rounding slack allowed on every comparison
pub const TOLERANCE_MS: f64 = 1.0;

/// Result of timecode validation for a single cue
#[derive(Debug, Clone)]
pub struct TimecodeEntryResult {
    /// Index of the cue
    pub index: i64,
    /// Whether the cue passed validation
    pub passed: bool,
    /// Issues found
    pub issues: Vec<TimecodeIssue>,
}

impl TimecodeEntryResult {
    /// Create a passing result
    pub fn passed(index: i64) -> Self {
        Self {
            index,
            passed: true,
            issues: vec![],
        }
    }

    /// Create a failing result
    pub fn failed(index: i64, issues: Vec<TimecodeIssue>) -> Self {
        Self {
            index,
            passed: false,
            issues,
        }
    }
}

/// Types of timecode issues
#[derive(Debug, Clone, PartialEq)]
pub enum TimecodeIssue {
    /// Start time is not before end time
    InvalidTimeRange {
        start_ms: u64,
        end_ms: u64,
    },
    /// Duration is too short
    DurationTooShort {
        duration_ms: u64,
        min_duration_ms: u64,
    },
    /// Duration is too long
    DurationTooLong {
        duration_ms: u64,
        max_duration_ms: u64,
    },
    /// Reading speed exceeds limit
    ReadingSpeedTooHigh {
        cps: f64,
        max_cps: f64,
    },
    /// Starts before the previous cue has ended
    Overlap {
        previous_index: i64,
        overlap_ms: u64,
    },
    /// Starts too soon after the previous cue
    GapTooSmall {
        previous_index: i64,
        gap_ms: u64,
        min_gap_ms: u64,
    },
}

impl std::fmt::Display for TimecodeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimecodeIssue::InvalidTimeRange { start_ms, end_ms } => {
                write!(f, "Invalid time range: start {}ms >= end {}ms", start_ms, end_ms)
            }
            TimecodeIssue::DurationTooShort { duration_ms, min_duration_ms } => {
                write!(
                    f,
                    "Duration too short: {}ms (min: {}ms)",
                    duration_ms, min_duration_ms
                )
            }
            TimecodeIssue::DurationTooLong { duration_ms, max_duration_ms } => {
                write!(
                    f,
                    "Duration too long: {}ms (max: {}ms)",
                    duration_ms, max_duration_ms
                )
            }
            TimecodeIssue::ReadingSpeedTooHigh { cps, max_cps } => {
                write!(f, "Reading speed too high: {:.1} CPS (max: {:.1})", cps, max_cps)
            }
            TimecodeIssue::Overlap { previous_index, overlap_ms } => {
                write!(
                    f,
                    "Overlaps with cue {} by {}ms",
                    previous_index, overlap_ms
                )
            }
            TimecodeIssue::GapTooSmall { previous_index, gap_ms, min_gap_ms } => {
                write!(
                    f,
                    "Gap of {}ms after cue {} (min: {}ms)",
                    gap_ms, previous_index, min_gap_ms
                )
            }
        }
    }
}

/// Timecode validator for timed cues
pub struct TimecodeValidator {
    rules: ComplianceRules,
}

impl TimecodeValidator {
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

    /// Validate a single cue on its own
    pub fn validate_cue(&self, cue: &OutputCue) -> TimecodeEntryResult {
        let mut issues = Vec::new();
        let start_ms = cue.start_timestamp().as_millis();
        let end_ms = cue.end_timestamp().as_millis();

        // Check time range validity
        if end_ms <= start_ms {
            issues.push(TimecodeIssue::InvalidTimeRange { start_ms, end_ms });
            // Can't do further validation with invalid times
            return TimecodeEntryResult::failed(cue.index, issues);
        }

        let duration_ms = end_ms - start_ms;
        let min_duration_ms = self.rules.min_duration_seconds * 1000.0;
        let max_duration_ms = self.rules.max_duration_seconds * 1000.0;

        if (duration_ms as f64) < min_duration_ms - TOLERANCE_MS {
            issues.push(TimecodeIssue::DurationTooShort {
                duration_ms,
                min_duration_ms: min_duration_ms.round() as u64,
            });
        }

        if (duration_ms as f64) > max_duration_ms + TOLERANCE_MS {
            issues.push(TimecodeIssue::DurationTooLong {
                duration_ms,
                max_duration_ms: max_duration_ms.round() as u64,
            });
        }

        let cps = Self::calculate_cps(cue);
        if cps > self.rules.reading_speed_cps {
            issues.push(TimecodeIssue::ReadingSpeedTooHigh {
                cps,
                max_cps: self.rules.reading_speed_cps,
            });
        }

        if issues.is_empty() {
            TimecodeEntryResult::passed(cue.index)
        } else {
            TimecodeEntryResult::failed(cue.index, issues)
        }
    }

    /// Validate cues in display order, including the gap to the previous cue
    pub fn validate_sequence(&self, cues: &[OutputCue]) -> Vec<TimecodeEntryResult> {
        let mut results: Vec<TimecodeEntryResult> = cues.iter().map(|c| self.validate_cue(c)).collect();
        let min_gap_ms = self.rules.min_gap_seconds * 1000.0;

        for (i, pair) in cues.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);
            let previous_end = previous.end_timestamp().as_millis();
            let current_start = current.start_timestamp().as_millis();

            let issue = if current_start < previous_end {
                Some(TimecodeIssue::Overlap {
                    previous_index: previous.index,
                    overlap_ms: previous_end - current_start,
                })
            } else {
                let gap_ms = current_start - previous_end;
                ((gap_ms as f64) < min_gap_ms - TOLERANCE_MS).then(|| TimecodeIssue::GapTooSmall {
                    previous_index: previous.index,
                    gap_ms,
                    min_gap_ms: min_gap_ms.round() as u64,
                })
            };

            if let Some(issue) = issue {
                if let Some(result) = results.get_mut(i + 1) {
                    result.issues.push(issue);
                    result.passed = false;
                }
            }
        }

        debug!(
            "Timecode validation: {} cues, {} issues",
            cues.len(),
            results.iter().map(|r| r.issues.len()).sum::<usize>()
        );

        results
    }

    /// Calculate reading speed (characters per second) for a cue.
    ///
    /// One millisecond is added to the duration to absorb rounding.
    pub fn calculate_cps(cue: &OutputCue) -> f64 {
        let start_ms = cue.start_timestamp().as_millis();
        let end_ms = cue.end_timestamp().as_millis();
        if end_ms <= start_ms {
            return f64::INFINITY;
        }

        let duration_secs = ((end_ms - start_ms) as f64 + TOLERANCE_MS) / 1000.0;
        cue.char_count() as f64 / duration_secs
    }
}

impl Default for TimecodeValidator {
    fn default() -> Self {
        Self::new()
    }
}
