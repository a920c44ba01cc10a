/*!
 * Text normalization for a single cue.
 *
 * Turns the source lines of a cue into one logical string:
 * - lines joined with single spaces, whitespace collapsed
 * - bracketed annotations such as `[laughs]` removed
 * - a space after sentence punctuation and ellipses
 * - standalone numbers one to ten spelled out
 *
 * Running the normalizer on its own output gives the same string back.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Stand-in for `...` while single-dot spacing runs
const ELLIPSIS_PLACEHOLDER: char = '\u{E000}';

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex")
});

/// A `[...]` span together with the whitespace around it
static ANNOTATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\[[^\]]*\]\s*").expect("Invalid annotation regex")
});

/// Words that carry dots of their own: links, domains, e-mail addresses
static URL_LIKE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[a-z][a-z0-9+.-]*://\S+|www\.\S+|\S+@\S+\.\S+|[a-z0-9-]+(?:\.[a-z0-9-]+)*\.(?:com|org|net|edu|gov|io|co|uk|de|fr|tv|info)(?:/\S*)?[.,!?]*)$")
        .expect("Invalid url regex")
});

/// Dotted abbreviations such as `e.g.`, `i.e.,` or `U.S.A.`
static ABBREVIATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\p{L}\.){2,}[,;:!?]*$").expect("Invalid abbreviation regex")
});

static SMALL_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(10|[1-9])\b").expect("Invalid number regex")
});

/// Normalize the text lines of one cue into a single string
pub fn normalize(lines: &[String]) -> String {
    let joined = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let collapsed = collapse_whitespace(&joined);
    let without_annotations = remove_annotations(&collapsed);
    let spaced = fix_sentence_spacing(&without_annotations);
    spell_out_small_numbers(&spaced)
}

/// Collapse every whitespace run to one space and trim
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Drop `[...]` annotations, keeping one space where they were
pub fn remove_annotations(text: &str) -> String {
    if !text.contains('[') {
        return text.to_string();
    }
    let replaced = ANNOTATION_REGEX.replace_all(text, " ");
    collapse_whitespace(&replaced)
}

/// Put a space after sentence punctuation glued to the next word.
///
/// `!`, `?` and ellipses are always followed by a space when text comes
/// next. A single `.` only gets one before a letter, so decimals survive,
/// and links and dotted abbreviations are left alone.
pub fn fix_sentence_spacing(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            if URL_LIKE_REGEX.is_match(word) || ABBREVIATION_REGEX.is_match(word) {
                word.to_string()
            } else {
                space_word(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn space_word(word: &str) -> String {
    let protected = word.replace("...", &ELLIPSIS_PLACEHOLDER.to_string());
    let chars: Vec<char> = protected.chars().collect();
    let mut spaced = String::with_capacity(protected.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        spaced.push(c);
        let Some(&next) = chars.get(i + 1) else {
            continue;
        };

        let needs_space = match c {
            '!' | '?' | '\u{2026}' | ELLIPSIS_PLACEHOLDER => starts_text(&chars[i + 1..]),
            '.' => next.is_alphabetic(),
            _ => false,
        };
        if needs_space {
            spaced.push(' ');
        }
    }

    spaced.replace(ELLIPSIS_PLACEHOLDER, "...")
}

// @checks: Rest of the word opens new text rather than closing punctuation
fn starts_text(rest: &[char]) -> bool {
    match rest {
        [c, ..] if c.is_alphanumeric() => true,
        ['\u{201C}' | '\u{2018}' | '\u{00AB}' | '(' | '\u{00BF}' | '\u{00A1}', ..] => true,
        ['"' | '\'', after, ..] => after.is_alphanumeric(),
        _ => false,
    }
}

/// Rewrite the standalone numbers 1 to 10 as words.
///
/// Digits that are part of a decimal such as `3.5` or `2,75` are kept.
pub fn spell_out_small_numbers(text: &str) -> String {
    SMALL_NUMBER_REGEX
        .replace_all(text, |caps: &Captures| {
            let Some(number) = caps.get(1) else {
                return String::new();
            };
            if is_decimal_part(text, number.start(), number.end()) {
                number.as_str().to_string()
            } else {
                number_word(number.as_str()).to_string()
            }
        })
        .into_owned()
}

// @checks: Digits at start..end touch a separator followed or preceded by a digit
fn is_decimal_part(text: &str, start: usize, end: usize) -> bool {
    let mut after = text[end..].chars();
    let joins_next = matches!(after.next(), Some('.' | ','))
        && after.next().is_some_and(|c| c.is_ascii_digit());

    let mut before = text[..start].chars().rev();
    let joins_previous = matches!(before.next(), Some('.' | ','))
        && before.next().is_some_and(|c| c.is_ascii_digit());

    joins_next || joins_previous
}

fn number_word(digits: &str) -> &str {
    match digits {
        "1" => "one",
        "2" => "two",
        "3" => "three",
        "4" => "four",
        "5" => "five",
        "6" => "six",
        "7" => "seven",
        "8" => "eight",
        "9" => "nine",
        "10" => "ten",
        other => other,
    }
}
