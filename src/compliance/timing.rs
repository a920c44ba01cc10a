/*!
 * Sequential timing allocation.
 *
 * Each candidate cue gets a duration from its length and the reading speed,
 * bounded by the minimum and maximum duration, and starts no earlier than the
 * previous cue's end plus the minimum gap. The previous end is carried in a
 * [`TimingState`] that callers thread through the fold themselves.
 */

use log::trace;

use super::CueLayout;
use super::rules::ComplianceRules;
use crate::subtitle_processor::OutputCue;

/// Accumulator carried from one source cue to the next
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimingState {
    /// End of the last emitted cue, 0.0 before the first one
    pub previous_end_seconds: f64,
}

impl TimingState {
    pub fn new(previous_end_seconds: f64) -> Self {
        Self { previous_end_seconds }
    }
}

/// On-screen time for a cue showing `char_count` characters
pub fn cue_duration(char_count: usize, rules: &ComplianceRules) -> f64 {
    let chars = if char_count == 0 {
        rules.max_lines_per_cue
    } else {
        char_count
    };

    let reading_time = chars as f64 / rules.reading_speed_cps;
    let required = reading_time.max(rules.min_duration_seconds) + rules.sync_tolerance_seconds;
    required.clamp(rules.min_duration_seconds, rules.max_duration_seconds)
}

/// Time the line groups of one source cue.
///
/// Returns the emitted cues, still carrying the source index, and the state
/// for the next source cue. A layout without groups emits nothing and leaves
/// the state untouched.
pub fn allocate(layout: &CueLayout, state: TimingState, rules: &ComplianceRules) -> (Vec<OutputCue>, TimingState) {
    if layout.groups.is_empty() {
        return (Vec::new(), state);
    }

    let mut current_start = layout
        .start_seconds
        .max(state.previous_end_seconds + rules.min_gap_seconds);
    let mut previous_end = state.previous_end_seconds;
    let mut cues = Vec::with_capacity(layout.groups.len());

    for group in &layout.groups {
        let char_count = group.join(" ").chars().count();
        let duration = cue_duration(char_count, rules);
        let end = current_start + duration;

        trace!(
            "Cue from source {}: {} chars, {:.3}s -> {:.3}s",
            layout.original_index, char_count, current_start, end
        );

        cues.push(OutputCue::new(layout.original_index, current_start, end, group.clone()));
        previous_end = end;
        current_start = end + rules.min_gap_seconds;
    }

    (cues, TimingState::new(previous_end))
}
