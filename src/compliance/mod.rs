/*!
 * Caption compliance and re-timing engine.
 *
 * Rewrites a subtitle track so that it satisfies broadcast presentation
 * rules: reading speed, minimum and maximum duration, minimum gap between
 * cues, at most two lines per cue, a per-line character limit (shorter for
 * Hangul), dual-speaker dashes and spelled-out small numbers.
 *
 * # Architecture
 *
 * - `rules`: configuration and the derived rule values
 * - `normalizer`: joins and cleans the text of one cue
 * - `wrapper`: greedy line wrapping under the character limit
 * - `segmenter`: groups lines into cues, formats speaker dashes
 * - `timing`: sequential start/end allocation with carried state
 * - `renderer`: renumbering and SRT serialization
 *
 * Normalizing, wrapping and segmenting are a per-cue map that produces
 * [`CueLayout`]s; timing is a strict left-to-right fold over those layouts.
 * The engine does no I/O and never fails: malformed blocks are dropped and
 * reported, degenerate values are clamped.
 */

pub mod normalizer;
pub mod renderer;
pub mod rules;
pub mod segmenter;
pub mod timing;
pub mod wrapper;

use log::debug;

use crate::subtitle_processor::{CueParser, OutputCue, SkippedBlock, SourceCue};

pub use rules::{
    ComplianceConfig, ComplianceRules, HANGUL_MAX_CHARS_PER_LINE, MAX_CHARS_PER_LINE,
    MAX_DURATION_SECONDS, MAX_LINES_PER_CUE, MIN_DURATION_SECONDS,
};
pub use timing::TimingState;

/// Untimed line groups for one source cue
#[derive(Debug, Clone, PartialEq)]
pub struct CueLayout {
    pub original_index: i64,
    pub start_seconds: f64,
    /// Candidate output cues, each at most `max_lines_per_cue` lines
    pub groups: Vec<Vec<String>>,
}

/// Result of a compliance run with its diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceReport {
    /// Rendered SRT text
    pub text: String,
    /// Rendered cues, numbered 1..N
    pub cues: Vec<OutputCue>,
    /// Blocks the parser dropped
    pub skipped_blocks: Vec<SkippedBlock>,
    /// Number of cues the parser accepted
    pub source_cue_count: usize,
}

/// Broadcast-style compliance engine
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    config: ComplianceConfig,
    rules: ComplianceRules,
    parser: CueParser,
}

impl ComplianceEngine {
    pub fn new(config: ComplianceConfig) -> Self {
        Self {
            config,
            rules: config.rules(),
            parser: CueParser::new(),
        }
    }

    /// Accept timing lines mangled by machine translation
    pub fn with_timecode_repair(mut self, enabled: bool) -> Self {
        self.parser = self.parser.with_timecode_repair(enabled);
        self
    }

    pub fn config(&self) -> &ComplianceConfig {
        &self.config
    }

    pub fn rules(&self) -> &ComplianceRules {
        &self.rules
    }

    /// Rewrite raw SRT text into compliant SRT text
    pub fn apply(&self, raw: &str) -> String {
        self.apply_with_report(raw).text
    }

    /// Rewrite raw SRT text and keep the intermediate results
    pub fn apply_with_report(&self, raw: &str) -> ComplianceReport {
        let parsed = self.parser.parse(raw);
        let mut cues = self.comply_cues(&parsed.cues);

        renderer::renumber(&mut cues);
        let text = renderer::serialize(&cues);

        debug!(
            "Compliance: {} source cues -> {} output cues ({} blocks skipped)",
            parsed.cues.len(),
            cues.len(),
            parsed.skipped.len()
        );

        ComplianceReport {
            text,
            cues,
            skipped_blocks: parsed.skipped,
            source_cue_count: parsed.cues.len(),
        }
    }

    /// Normalize, wrap and segment one source cue
    pub fn layout(&self, cue: &SourceCue) -> CueLayout {
        let text = normalizer::normalize(&cue.text_lines);
        let limit = self.rules.line_limit_for(&text);
        let lines = wrapper::wrap(&text, limit);

        CueLayout {
            original_index: cue.original_index,
            start_seconds: cue.start_seconds(),
            groups: segmenter::segment(&lines, self.rules.max_lines_per_cue),
        }
    }

    /// Lay out and time a sequence of source cues, in order.
    ///
    /// The returned cues still carry their source indices.
    pub fn comply_cues(&self, cues: &[SourceCue]) -> Vec<OutputCue> {
        let layouts: Vec<CueLayout> = cues.iter().map(|cue| self.layout(cue)).collect();

        let (output, _) = layouts.iter().fold(
            (Vec::with_capacity(layouts.len()), TimingState::default()),
            |(mut output, state), layout| {
                let (emitted, next) = timing::allocate(layout, state, &self.rules);
                output.extend(emitted);
                (output, next)
            },
        );

        output
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new(ComplianceConfig::default())
    }
}

/// Rewrite raw SRT text into compliant SRT text
pub fn apply_compliance(raw: &str, config: &ComplianceConfig) -> String {
    ComplianceEngine::new(*config).apply(raw)
}
