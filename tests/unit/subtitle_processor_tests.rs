/*!
 * Tests for timestamps, cues and the SRT block parser
 */

use subcomply::errors::SubtitleError;
use subcomply::subtitle_processor::{
    CueParser, OutputCue, SkipReason, SourceCue, Timestamp, parse_cues, repair_timing_line, split_blocks,
};

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parse_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";

    let parsed = Timestamp::parse(ts).unwrap();

    assert_eq!(parsed.as_millis(), 5_025_678);
    assert_eq!(parsed.to_string(), ts);
}

#[test]
fn test_timestamp_parse_withOutOfRangeFields_shouldFail() {
    for invalid in ["00:60:00,000", "00:00:60,000", "00:00:01.000", "1:2:3", "", "aa:bb:cc,ddd"] {
        assert!(
            matches!(Timestamp::parse(invalid), Err(SubtitleError::InvalidTimestamp(_))),
            "{} should not parse",
            invalid
        );
    }
}

#[test]
fn test_timestamp_fromStr_shouldMatchParse() {
    let ts: Timestamp = "00:00:02,500".parse().unwrap();

    assert_eq!(ts, Timestamp::from_millis(2500));
}

#[test]
fn test_timestamp_fromSecsF64_shouldRoundToNearestMillisecond() {
    assert_eq!(Timestamp::from_secs_f64(1.958_333_3).as_millis(), 1958);
    assert_eq!(Timestamp::from_secs_f64(1.958_6).as_millis(), 1959);
    assert_eq!(Timestamp::from_secs_f64(2.0).as_millis(), 2000);
}

#[test]
fn test_timestamp_fromSecsF64_withNegativeOrNaN_shouldClampToZero() {
    assert_eq!(Timestamp::from_secs_f64(-3.0), Timestamp::ZERO);
    assert_eq!(Timestamp::from_secs_f64(f64::NAN), Timestamp::ZERO);
}

#[test]
fn test_timestamp_display_withLargeHours_shouldKeepAllDigits() {
    assert_eq!(Timestamp::from_millis(100 * 3_600_000).to_string(), "100:00:00,000");
}

#[test]
fn test_sourceCue_new_withEndBeforeStart_shouldExtendByMinimumDuration() {
    let cue = SourceCue::new(
        1,
        Timestamp::from_millis(1000),
        Timestamp::from_millis(500),
        vec!["Hi".to_string()],
    );

    assert_eq!(cue.end.as_millis(), 1833);
}

#[test]
fn test_sourceCue_new_withEqualStartAndEnd_shouldExtendByMinimumDuration() {
    let cue = SourceCue::new(1, Timestamp::from_millis(0), Timestamp::from_millis(0), vec![]);

    assert_eq!(cue.end.as_millis(), 833);
}

#[test]
fn test_outputCue_charCount_shouldCountLineBreakAsOneCharacter() {
    let cue = OutputCue::new(1, 0.0, 1.0, vec!["Hello".to_string(), "World".to_string()]);

    assert_eq!(cue.char_count(), 11);
}

#[test]
fn test_outputCue_display_shouldRenderBlockWithoutTrailingNewline() {
    let cue = OutputCue::new(3, 61.234, 65.432, vec!["- Hi".to_string(), "- Bye".to_string()]);

    assert_eq!(cue.to_string(), "3\n00:01:01,234 --> 00:01:05,432\n- Hi\n- Bye");
}

#[test]
fn test_splitBlocks_withWhitespaceOnlySeparators_shouldSplit() {
    let blocks = split_blocks("1\na --> b\ntext\n   \n2\nc --> d\nmore\r\n\r\n\r\n");

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[1], vec!["2", "c --> d", "more"]);
}

#[test]
fn test_parse_withValidTrack_shouldReturnAllCues() {
    let cues = parse_cues(crate::common::SAMPLE_SRT);

    assert_eq!(cues.len(), 3);
    assert_eq!(cues[0].original_index, 1);
    assert_eq!(cues[1].start.as_millis(), 5000);
    assert_eq!(cues[2].text_lines, vec!["For testing purposes."]);
}

#[test]
fn test_parse_withDosNewlines_shouldParseSameAsUnix() {
    let unix = crate::common::SAMPLE_SRT;
    let dos = unix.replace('\n', "\r\n");

    assert_eq!(parse_cues(&dos), parse_cues(unix));
}

#[test]
fn test_parse_withNonNumericIndex_shouldUseZero() {
    let cues = parse_cues("abc\n00:00:01,000 --> 00:00:02,000\nHello");

    assert_eq!(cues[0].original_index, 0);
}

#[test]
fn test_parse_withMalformedBlocks_shouldReportEachReason() {
    let raw = "1\n00:00:01,000 --> 00:00:02,000\n\n\
               2\nno timing here\ntext\n\n\
               3\n00:00:01,000 --> nonsense\ntext\n\n\
               4\n00:00:05,000 --> 00:00:06,000\nKept";

    let report = CueParser::new().parse(raw);

    assert_eq!(report.cues.len(), 1);
    assert_eq!(report.cues[0].text_lines, vec!["Kept"]);
    assert_eq!(report.block_count(), 4);
    assert_eq!(report.skipped[0].reason, SkipReason::TooFewLines { found: 2 });
    assert_eq!(report.skipped[1].reason, SkipReason::MissingTimecode);
    assert!(matches!(report.skipped[2].reason, SkipReason::InvalidTimestamp(_)));
    assert_eq!(report.skipped[2].block_number, 3);
    assert_eq!(report.skipped[2].first_line, "3");
}

#[test]
fn test_skippedBlock_toError_shouldCarryBlockNumber() {
    let report = CueParser::new().parse("x\ny\nz");

    let error = report.skipped[0].to_error();

    assert!(matches!(error, SubtitleError::MalformedBlock { block_number: 1, .. }));
}

#[test]
fn test_parse_withMangledTiming_shouldOnlyParseWhenRepairIsOn() {
    let raw = "1\n00: 00: 01, 000 -- > 00:00:02.500\nBonjour";

    let strict = CueParser::new().parse(raw);
    let repairing = CueParser::new().with_timecode_repair(true).parse(raw);

    assert!(strict.cues.is_empty());
    assert_eq!(repairing.cues.len(), 1);
    assert_eq!(repairing.cues[0].start.as_millis(), 1000);
    assert_eq!(repairing.cues[0].end.as_millis(), 2500);
}

#[test]
fn test_repairTimingLine_shouldLeaveTextAndCleanLinesAlone() {
    let clean = "00:00:01,000 --> 00:00:02,000";

    assert_eq!(repair_timing_line(clean), clean);
    assert_eq!(repair_timing_line("Wait -- > what?"), "Wait -- > what?");
    assert_eq!(
        repair_timing_line("00: 01: 21,068 -- > 00:01:23, 500"),
        "00:01:21,068 --> 00:01:23,500"
    );
}

#[test]
fn test_parseBlockAsWritten_shouldKeepReversedTiming() {
    let lines: Vec<String> = ["7", "00:00:02,000 --> 00:00:01,000", "Hi"]
        .iter()
        .map(|l| l.to_string())
        .collect();

    let cue = CueParser::new().parse_block_as_written(&lines).unwrap();

    assert_eq!(cue.index, 7);
    assert_eq!(cue.start_timestamp().as_millis(), 2000);
    assert_eq!(cue.end_timestamp().as_millis(), 1000);
}
