/*!
 * Compliance audit for timed subtitle tracks.
 *
 * This module checks cues that already carry their final timing:
 * - Timecode validation (range, duration, reading speed, gaps)
 * - Layout validation (line count, line length, speaker dashes)
 *
 * # Architecture
 *
 * - `timecodes`: Validates timing of each cue and of consecutive cues
 * - `layout`: Validates the lines a cue shows
 * - `service`: Orchestrates both validators into an `AuditReport`
 */

pub mod layout;
pub mod service;
pub mod timecodes;

// Re-export main types
pub use layout::{LayoutIssue, LayoutValidator};
pub use service::{AuditEntryResult, AuditIssue, AuditReport, ComplianceAuditor};
pub use timecodes::{TimecodeIssue, TimecodeValidator};
