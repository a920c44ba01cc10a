//! Final numbering and SRT serialization of compliant cues.

use crate::subtitle_processor::OutputCue;

/// Give cues the indices 1..N in emission order
pub fn renumber(cues: &mut [OutputCue]) {
    for (cue, index) in cues.iter_mut().zip(1..) {
        cue.index = index;
    }
}

/// Serialize cues as SRT blocks separated by one blank line.
///
/// Timestamps are rounded half-up to the millisecond. No cues gives an
/// empty string.
pub fn serialize(cues: &[OutputCue]) -> String {
    cues.iter()
        .map(|cue| cue.to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}
