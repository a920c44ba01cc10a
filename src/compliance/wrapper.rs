/*!
 * Greedy line wrapping with a per-line character limit.
 *
 * Widths are counted in characters, and a line that starts with a speaker
 * dash counts the space the segmenter will insert after it, so no line grows
 * past the limit once it is formatted.
 */

use super::segmenter::needs_speaker_space;

/// Width of a line once speaker formatting has been applied
pub fn display_width(line: &str) -> usize {
    line.chars().count() + usize::from(needs_speaker_space(line))
}

/// Wrap normalized text into lines of at most `limit` characters.
///
/// Tokens are separated by single spaces. A token that cannot fit on a line
/// by itself is broken with [`split_overlong_word`].
pub fn wrap(text: &str, limit: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let pieces = if display_width(word) > limit {
            split_overlong_word(word, limit)
        } else {
            vec![word.to_string()]
        };

        for piece in pieces {
            if current.is_empty() {
                current = piece;
                continue;
            }

            let candidate_width = display_width(&current) + 1 + piece.chars().count();
            if candidate_width > limit {
                lines.push(std::mem::replace(&mut current, piece));
            } else {
                current.push(' ');
                current.push_str(&piece);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Break a word that is too long for one line.
///
/// Every chunk but the last holds `limit - 1` characters followed by a `-`
/// continuation marker; the last chunk is the unsuffixed remainder. A chunk
/// starting with a speaker dash gives up one more character for the space
/// inserted after the dash.
pub fn split_overlong_word(word: &str, limit: usize) -> Vec<String> {
    let effective_limit = limit.max(3);
    let chars: Vec<char> = word.chars().collect();
    let mut rest: &[char] = &chars;
    let mut chunks = Vec::new();

    while chars_width(rest) > effective_limit {
        let budget = if starts_with_speaker_dash(rest) {
            effective_limit - 1
        } else {
            effective_limit
        };
        let take = budget - 1;

        let mut chunk: String = rest[..take].iter().collect();
        chunk.push('-');
        chunks.push(chunk);
        rest = &rest[take..];
    }

    chunks.push(rest.iter().collect());
    chunks
}

fn chars_width(chars: &[char]) -> usize {
    chars.len() + usize::from(starts_with_speaker_dash(chars))
}

fn starts_with_speaker_dash(chars: &[char]) -> bool {
    matches!(chars, ['-', next, ..] if *next != ' ')
}
