//! Filename-safe titles.
//!
//! Everything written into a cartridge's `audio/` directory is named from a
//! human title, so the title must survive any filesystem the archive is
//! copied to.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Used when sanitizing leaves nothing behind.
pub const PLACEHOLDER_TITLE: &str = "Track";

fn disallowed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\s\-.,'()]").expect("static regex"))
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

fn track_number_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\s*[-._ ]\s*").expect("static regex"))
}

/// Map an arbitrary title to a portable filename fragment.
///
/// Diacritics and non-Latin scripts are dropped, `/` becomes `-` and `:`
/// becomes ` - `. Anything outside letters, digits, `_`, whitespace and
/// `-.,'()` is removed and whitespace is collapsed. Never returns an empty
/// string.
pub fn sanitize_filename(name: &str) -> String {
    let ascii: String = name.nfkd().filter(char::is_ascii).collect();
    let ascii = ascii.replace('/', "-").replace(':', " - ");
    let kept = disallowed().replace_all(&ascii, "");
    let collapsed = whitespace_run().replace_all(&kept, " ");
    let trimmed = collapsed.trim();

    if trimmed.is_empty() {
        PLACEHOLDER_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Strip a leading track number such as `01 - `, `3.` or `12_`.
pub fn strip_track_number(stem: &str) -> &str {
    match track_number_prefix().find(stem) {
        Some(m) => &stem[m.end()..],
        None => stem,
    }
}

/// Derive a track title from a raw filename stem.
///
/// Handles stems like `03 - Artist - Album - 03 - Song` that repeat the
/// album header: the number is stripped, then the `artist - album - `
/// prefix, then a number again. The prefix match is a plain string
/// comparison and will also eat a legitimately hyphenated title that
/// happens to start the same way.
pub fn title_from_stem(stem: &str, artist: &str, album: &str) -> String {
    let mut title = strip_track_number(stem);
    let prefix = format!("{artist} - {album} - ");
    if let Some(rest) = title.strip_prefix(prefix.as_str()) {
        title = rest;
    }
    sanitize_filename(strip_track_number(title))
}

/// `NN - Title.ext`, with `ext` given without the dot.
pub fn destination_file_name(number: usize, title: &str, ext: &str) -> String {
    format!("{number:02} - {title}.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_allowed(s: &str) -> bool {
        s.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || c.is_ascii_whitespace()
                || matches!(c, '_' | '-' | '.' | ',' | '\'' | '(' | ')')
        })
    }

    #[test]
    fn sanitize_drops_diacritics_and_non_latin() {
        assert_eq!(sanitize_filename("Café Müller"), "Cafe Muller");
        assert_eq!(sanitize_filename("東京 Tokyo"), "Tokyo");
        assert_eq!(sanitize_filename("Ⅸ Symphony"), "IX Symphony");
    }

    #[test]
    fn sanitize_replaces_separators_and_colons() {
        assert_eq!(sanitize_filename("AC/DC"), "AC-DC");
        assert_eq!(sanitize_filename("Part 1: The Beginning"), "Part 1 - The Beginning");
    }

    #[test]
    fn sanitize_strips_disallowed_and_collapses_whitespace() {
        assert_eq!(sanitize_filename("  What?!  Is   *this*  "), "What Is this");
        assert_eq!(sanitize_filename("Don't (Stop), Me.Now"), "Don't (Stop), Me.Now");
        assert_eq!(sanitize_filename("tab\there\nnewline"), "tab here newline");
    }

    #[test]
    fn sanitize_falls_back_to_placeholder() {
        assert_eq!(sanitize_filename(""), "Track");
        assert_eq!(sanitize_filename("🎵🎶"), "Track");
        assert_eq!(sanitize_filename("?!*<>|\"#"), "Track");
        assert_eq!(sanitize_filename("   "), "Track");
    }

    #[test]
    fn sanitize_is_idempotent_and_stays_in_allowed_set() {
        let inputs = [
            "",
            "🎵",
            "Ça: va / bien?",
            "St. Louis Blues (1925)",
            "Ｆｕｌｌｗｉｄｔｈ",
            "a\u{0301}b\u{0308}",
            "<<>>",
            "  mixed\t\tspacing  ",
        ];
        for input in inputs {
            let once = sanitize_filename(input);
            assert!(!once.is_empty(), "empty for {input:?}");
            assert!(once.is_ascii(), "non-ascii for {input:?}");
            assert!(only_allowed(&once), "disallowed char in {once:?}");
            assert_eq!(sanitize_filename(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn strip_track_number_handles_common_separators() {
        assert_eq!(strip_track_number("01 - Song"), "Song");
        assert_eq!(strip_track_number("1. Song"), "Song");
        assert_eq!(strip_track_number("07_Song"), "Song");
        assert_eq!(strip_track_number("12 Song"), "Song");
        assert_eq!(strip_track_number("Song 01"), "Song 01");
        assert_eq!(strip_track_number("1999"), "1999");
    }

    #[test]
    fn title_from_stem_removes_repeated_album_header() {
        assert_eq!(
            title_from_stem("01 - The Spells - The Night Has Eyes - 01 - Black Cat", "The Spells", "The Night Has Eyes"),
            "Black Cat"
        );
        assert_eq!(
            title_from_stem("The Spells - The Night Has Eyes - Moon", "The Spells", "The Night Has Eyes"),
            "Moon"
        );
        assert_eq!(title_from_stem("02 Plain Title", "A", "B"), "Plain Title");
        assert_eq!(title_from_stem("03 - ", "A", "B"), "Track");
    }

    #[test]
    fn destination_file_name_pads_number() {
        assert_eq!(destination_file_name(1, "Intro", "m4a"), "01 - Intro.m4a");
        assert_eq!(destination_file_name(12, "Song", "mp3"), "12 - Song.mp3");
    }
}
