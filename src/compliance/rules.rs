/*!
 * Presentation rules applied by the compliance engine.
 *
 * The rule set is fixed; only the audience and the frame rate vary. Frame
 * counts (minimum gap, sync tolerance) turn into seconds through the frame
 * rate.
 */

use serde::{Deserialize, Serialize};

/// Shortest time a cue may stay on screen (20 frames at 24 fps)
pub const MIN_DURATION_SECONDS: f64 = 5.0 / 6.0;

/// Longest time a cue may stay on screen
pub const MAX_DURATION_SECONDS: f64 = 7.0;

/// Frames of silence required between two cues
pub const MIN_GAP_FRAMES: u32 = 2;

/// Frames added to every computed duration
pub const SYNC_TOLERANCE_FRAMES: u32 = 3;

pub const DEFAULT_FRAMES_PER_SECOND: u32 = 24;

/// Characters per second for adult programs
pub const READING_SPEED_ADULT_CPS: u32 = 20;

/// Characters per second for children's programs
pub const READING_SPEED_CHILD_CPS: u32 = 17;

pub const MAX_LINES_PER_CUE: usize = 2;

pub const MAX_CHARS_PER_LINE: usize = 42;

/// Line limit when the text contains Hangul syllables
pub const HANGUL_MAX_CHARS_PER_LINE: usize = 23;

/// Caller-facing knobs of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceConfig {
    /// Use the slower children's reading speed
    #[serde(default)]
    pub is_child_audience: bool,

    /// Frame rate used to convert frame counts to seconds
    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: u32,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            is_child_audience: false,
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
        }
    }
}

impl ComplianceConfig {
    /// Default configuration for a children's program
    pub fn child() -> Self {
        Self {
            is_child_audience: true,
            ..Self::default()
        }
    }

    pub fn rules(&self) -> ComplianceRules {
        ComplianceRules::from_config(self)
    }
}

fn default_frames_per_second() -> u32 {
    DEFAULT_FRAMES_PER_SECOND
}

/// Rule values derived from a [`ComplianceConfig`], in seconds and characters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplianceRules {
    pub min_duration_seconds: f64,
    pub max_duration_seconds: f64,
    pub min_gap_seconds: f64,
    pub sync_tolerance_seconds: f64,
    pub reading_speed_cps: f64,
    pub max_lines_per_cue: usize,
    pub max_chars_per_line: usize,
    pub hangul_max_chars_per_line: usize,
}

impl ComplianceRules {
    pub fn from_config(config: &ComplianceConfig) -> Self {
        // A zero frame rate is treated as one frame per second
        let fps = config.frames_per_second.max(1) as f64;
        let cps = if config.is_child_audience {
            READING_SPEED_CHILD_CPS
        } else {
            READING_SPEED_ADULT_CPS
        };

        Self {
            min_duration_seconds: MIN_DURATION_SECONDS,
            max_duration_seconds: MAX_DURATION_SECONDS,
            min_gap_seconds: MIN_GAP_FRAMES as f64 / fps,
            sync_tolerance_seconds: SYNC_TOLERANCE_FRAMES as f64 / fps,
            reading_speed_cps: cps.max(1) as f64,
            max_lines_per_cue: MAX_LINES_PER_CUE,
            max_chars_per_line: MAX_CHARS_PER_LINE,
            hangul_max_chars_per_line: HANGUL_MAX_CHARS_PER_LINE,
        }
    }

    /// Character limit per line for the given (normalized) text
    pub fn line_limit_for(&self, text: &str) -> usize {
        if text.chars().any(is_hangul_syllable) {
            self.hangul_max_chars_per_line
        } else {
            self.max_chars_per_line
        }
    }
}

impl Default for ComplianceRules {
    fn default() -> Self {
        Self::from_config(&ComplianceConfig::default())
    }
}

/// True for characters in the Hangul Syllables block (U+AC00..=U+D7AF)
pub fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7AF}').contains(&c)
}
