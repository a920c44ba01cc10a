use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use regex::Regex;
use once_cell::sync::Lazy;
use log::{warn, debug};

use crate::errors::SubtitleError;

// @module: Subtitle cue model and permissive SRT block parsing

// @const: Single SRT timestamp (hours may run past two digits)
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2}),(\d{3})$").expect("Invalid timestamp regex")
});

// @const: Timing line as it tends to come back from machine translation
static MANGLED_TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\d:,.\s]*\d\s*-\s*-\s*>\s*\d[\d:,.\s]*$").expect("Invalid timing line regex")
});

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex")
});

const MILLIS_PER_HOUR: u64 = 3_600_000;
const MILLIS_PER_MINUTE: u64 = 60_000;
const MILLIS_PER_SECOND: u64 = 1_000;

/// Position in a subtitle track, in whole milliseconds.
///
/// Parsed from and displayed as `HH:MM:SS,mmm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Convert fractional seconds to a timestamp.
    ///
    /// The millisecond value is rounded half-up; negative and non-finite
    /// inputs clamp to zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        if !secs.is_finite() || secs <= 0.0 {
            return Self::ZERO;
        }
        Timestamp((secs * 1000.0 + 0.5).floor() as u64)
    }

    /// Parse an SRT timestamp (`HH:MM:SS,mmm`)
    pub fn parse(timestamp: &str) -> Result<Self, SubtitleError> {
        let trimmed = timestamp.trim();
        let invalid = || SubtitleError::InvalidTimestamp(trimmed.to_string());

        let caps = TIMESTAMP_REGEX.captures(trimmed).ok_or_else(invalid)?;
        let field = |i: usize| -> Result<u64, SubtitleError> {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .ok_or_else(invalid)
        };

        let hours = field(1)?;
        let minutes = field(2)?;
        let seconds = field(3)?;
        let millis = field(4)?;

        // Validate time components
        if minutes >= 60 || seconds >= 60 {
            return Err(invalid());
        }

        hours.checked_mul(MILLIS_PER_HOUR)
            .and_then(|h| h.checked_add(minutes * MILLIS_PER_MINUTE + seconds * MILLIS_PER_SECOND + millis))
            .map(Timestamp)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ms = self.0;
        let hours = ms / MILLIS_PER_HOUR;
        let minutes = (ms % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
        let seconds = (ms % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
        let millis = ms % MILLIS_PER_SECOND;

        write!(f, "{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl FromStr for Timestamp {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// @struct: One cue as found in the input track
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCue {
    // @field: Index line as written, 0 when it was not a number
    pub original_index: i64,

    // @field: Start time
    pub start: Timestamp,

    // @field: End time, always after start
    pub end: Timestamp,

    // @field: Trimmed, non-empty text lines in source order
    pub text_lines: Vec<String>,
}

impl SourceCue {
    /// Build a cue, moving a non-positive end to `start + min_duration`
    pub fn new(original_index: i64, start: Timestamp, end: Timestamp, text_lines: Vec<String>) -> Self {
        let end = if end <= start {
            Timestamp::from_secs_f64(start.as_secs_f64() + crate::compliance::MIN_DURATION_SECONDS)
        } else {
            end
        };

        SourceCue {
            original_index,
            start,
            end,
            text_lines,
        }
    }

    pub fn start_seconds(&self) -> f64 {
        self.start.as_secs_f64()
    }

    pub fn end_seconds(&self) -> f64 {
        self.end.as_secs_f64()
    }
}

// @struct: One cue in the compliant result
#[derive(Debug, Clone, PartialEq)]
pub struct OutputCue {
    // @field: Source index until rendering, then 1..N
    pub index: i64,

    // @field: Start in seconds
    pub start_seconds: f64,

    // @field: End in seconds
    pub end_seconds: f64,

    // @field: Display lines
    pub text_lines: Vec<String>,
}

impl OutputCue {
    pub fn new(index: i64, start_seconds: f64, end_seconds: f64, text_lines: Vec<String>) -> Self {
        OutputCue {
            index,
            start_seconds,
            end_seconds,
            text_lines,
        }
    }

    pub fn duration_seconds(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }

    pub fn start_timestamp(&self) -> Timestamp {
        Timestamp::from_secs_f64(self.start_seconds)
    }

    pub fn end_timestamp(&self) -> Timestamp {
        Timestamp::from_secs_f64(self.end_seconds)
    }

    /// Characters shown on screen, counting the line break as one space
    pub fn char_count(&self) -> usize {
        let joined: usize = self.text_lines.iter().map(|line| line.chars().count()).sum();
        joined + self.text_lines.len().saturating_sub(1)
    }
}

impl From<&SourceCue> for OutputCue {
    fn from(cue: &SourceCue) -> Self {
        OutputCue::new(cue.original_index, cue.start_seconds(), cue.end_seconds(), cue.text_lines.clone())
    }
}

impl fmt::Display for OutputCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\n{} --> {}", self.index, self.start_timestamp(), self.end_timestamp())?;
        for line in &self.text_lines {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// Why a block was left out of the parsed cues
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Fewer than three non-empty lines
    TooFewLines { found: usize },
    /// Second line has no `-->`
    MissingTimecode,
    /// Timing line did not split into two valid timestamps
    InvalidTimestamp(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewLines { found } => {
                write!(f, "expected at least 3 lines, found {}", found)
            }
            SkipReason::MissingTimecode => write!(f, "second line is not a timing line"),
            SkipReason::InvalidTimestamp(line) => write!(f, "unparsable timing line '{}'", line),
        }
    }
}

/// A dropped block, kept for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedBlock {
    /// 1-based position among the blocks of the input
    pub block_number: usize,
    /// First line of the block, for locating it in the source
    pub first_line: String,
    pub reason: SkipReason,
}

impl SkippedBlock {
    pub fn to_error(&self) -> SubtitleError {
        SubtitleError::MalformedBlock {
            block_number: self.block_number,
            reason: self.reason.to_string(),
        }
    }
}

/// Cues parsed from a track plus the blocks that were dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub cues: Vec<SourceCue>,
    pub skipped: Vec<SkippedBlock>,
}

impl ParseReport {
    pub fn block_count(&self) -> usize {
        self.cues.len() + self.skipped.len()
    }
}

/// Permissive SRT parser.
///
/// Malformed blocks never fail the parse; they are dropped and listed in the
/// returned [`ParseReport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CueParser {
    repair_timecodes: bool,
}

impl CueParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also accept timing lines mangled by machine translation
    /// (`00: 01: 21, 068 -- > ...`)
    pub fn with_timecode_repair(mut self, enabled: bool) -> Self {
        self.repair_timecodes = enabled;
        self
    }

    /// Parse raw track text into cues
    pub fn parse(&self, content: &str) -> ParseReport {
        let mut report = ParseReport::default();

        for (i, block) in split_blocks(content).iter().enumerate() {
            let block_number = i + 1;
            match self.parse_block(block) {
                Ok(cue) => report.cues.push(cue),
                Err(reason) => {
                    warn!("Skipping subtitle block {}: {}", block_number, reason);
                    report.skipped.push(SkippedBlock {
                        block_number,
                        first_line: block.first().cloned().unwrap_or_default(),
                        reason,
                    });
                }
            }
        }

        debug!(
            "Parsed {} cues from {} blocks ({} skipped)",
            report.cues.len(),
            report.block_count(),
            report.skipped.len()
        );

        report
    }

    /// Turn one block (its non-empty lines) into a cue
    pub fn parse_block(&self, lines: &[String]) -> Result<SourceCue, SkipReason> {
        let cue = self.parse_block_as_written(lines)?;
        Ok(SourceCue::new(
            cue.index,
            cue.start_timestamp(),
            cue.end_timestamp(),
            cue.text_lines,
        ))
    }

    /// Like [`CueParser::parse_block`], but keeps the timing exactly as
    /// written, including an end that is not after the start
    pub fn parse_block_as_written(&self, lines: &[String]) -> Result<OutputCue, SkipReason> {
        if lines.len() < 3 {
            return Err(SkipReason::TooFewLines { found: lines.len() });
        }

        let index_line = lines[0].trim();
        let timing_line = if self.repair_timecodes {
            repair_timing_line(lines[1].trim())
        } else {
            Cow::Borrowed(lines[1].trim())
        };

        if !timing_line.contains("-->") {
            return Err(SkipReason::MissingTimecode);
        }

        let parts: Vec<&str> = timing_line.split("-->").map(str::trim).collect();
        if parts.len() != 2 {
            return Err(SkipReason::InvalidTimestamp(timing_line.to_string()));
        }

        let (start, end) = match (Timestamp::parse(parts[0]), Timestamp::parse(parts[1])) {
            (Ok(start), Ok(end)) => (start, end),
            _ => return Err(SkipReason::InvalidTimestamp(timing_line.to_string())),
        };

        let original_index = index_line.parse::<i64>().unwrap_or(0);

        let text_lines = lines[2..]
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Ok(OutputCue::new(
            original_index,
            start.as_secs_f64(),
            end.as_secs_f64(),
            text_lines,
        ))
    }
}

/// Parse raw track text with the default parser
pub fn parse_cues(content: &str) -> Vec<SourceCue> {
    CueParser::new().parse(content).cues
}

/// Split raw text into blocks of non-empty lines.
///
/// `\r\n` is normalized first; whitespace-only lines separate blocks.
pub fn split_blocks(content: &str) -> Vec<Vec<String>> {
    let normalized = content.replace("\r\n", "\n");
    let mut blocks = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in normalized.trim().split('\n') {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(line.trim_end().to_string());
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Undo the spacing damage translators do to timing lines.
///
/// Lines that do not look like a timing line come back unchanged.
pub fn repair_timing_line(line: &str) -> Cow<'_, str> {
    if !MANGLED_TIMING_LINE_REGEX.is_match(line) {
        return Cow::Borrowed(line);
    }

    let compact = WHITESPACE_REGEX.replace_all(line, "");
    let repaired = compact
        .split("-->")
        .map(|side| side.replace('.', ","))
        .collect::<Vec<_>>()
        .join(" --> ");

    if repaired == line {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(repaired)
    }
}
