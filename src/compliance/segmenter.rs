//! Grouping of wrapped lines into cues, with dual-speaker formatting.

/// Split wrapped lines into consecutive groups of at most `max_lines`
pub fn segment(lines: &[String], max_lines: usize) -> Vec<Vec<String>> {
    lines
        .chunks(max_lines.max(1))
        .map(|group| group.iter().map(|line| format_speaker_line(line)).collect())
        .collect()
}

/// `"-Hi"` becomes `"- Hi"`; anything else passes through trimmed
pub fn format_speaker_line(line: &str) -> String {
    let trimmed = line.trim();
    if needs_speaker_space(trimmed) {
        format!("- {}", trimmed[1..].trim_start())
    } else {
        trimmed.to_string()
    }
}

/// True when the line opens with a dash that is glued to the speech
pub fn needs_speaker_space(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next() == Some('-') && chars.next().is_some_and(|c| c != ' ')
}
