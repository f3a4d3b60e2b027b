//! Shared rendering utilities and helpers.
//!
//! This module provides low-level rendering utilities used across multiple
//! UI components: cursor positioning, match-highlighted text output, and
//! the language-code formatting used by the translations column.

use crate::domain::Translation;
use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\x1b[{row};{col}H`. Coordinates are 1-indexed.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Renders text with highlighted character ranges for search matches.
///
/// Splits the text into highlighted and normal sections based on the
/// provided character ranges. Highlighting is skipped entirely for selected
/// rows, where the selection background takes precedence.
///
/// Ranges use character indices (not byte indices) with exclusive ends.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        // Ranges may have been computed on untruncated text; clamp them
        // into what is actually being rendered.
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Converts a language code to a flag emoji using regional indicators.
///
/// The country part is taken from after the `-` (e.g. `"en-GB"` → `GB`);
/// bare codes are uppercased and used directly. Codes containing anything
/// but ASCII letters are returned unchanged, since they cannot map to a
/// regional-indicator pair.
#[must_use]
pub fn flag_emoji(language_code: &str) -> String {
    let country = language_code
        .split('-')
        .nth(1)
        .map_or_else(|| language_code.to_uppercase(), |c| c.to_string());

    if country.is_empty() || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return language_code.to_string();
    }

    country
        .chars()
        .map(|c| {
            let offset = u32::from(c.to_ascii_uppercase()) - u32::from('A');
            char::from_u32(0x1F1E6 + offset).unwrap_or(c)
        })
        .collect()
}

/// Builds the translations-column preview for a record.
///
/// Shows the first translation with its flag, plus a `(+N)` suffix when
/// more languages exist. Records without translations render as `"-"`.
#[must_use]
pub fn translation_preview(translations: &[Translation]) -> String {
    let Some(first) = translations.first() else {
        return "-".to_string();
    };

    let flag = flag_emoji(&first.languages_code);
    let rest = translations.len() - 1;
    if rest == 0 {
        format!("{flag} {}", first.value)
    } else {
        format!("{flag} {} (+{rest})", first.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translation(value: &str, code: &str) -> Translation {
        Translation {
            value: value.to_string(),
            languages_code: code.to_string(),
        }
    }

    #[test]
    fn test_flag_emoji_from_region_code() {
        assert_eq!(flag_emoji("en-GB"), "\u{1F1EC}\u{1F1E7}");
        assert_eq!(flag_emoji("nl-NL"), "\u{1F1F3}\u{1F1F1}");
    }

    #[test]
    fn test_flag_emoji_bare_code_uppercased() {
        assert_eq!(flag_emoji("de"), "\u{1F1E9}\u{1F1EA}");
    }

    #[test]
    fn test_flag_emoji_invalid_code_passthrough() {
        assert_eq!(flag_emoji("x1"), "x1");
        assert_eq!(flag_emoji(""), "");
    }

    #[test]
    fn test_translation_preview() {
        assert_eq!(translation_preview(&[]), "-");

        let single = vec![translation("Accept", "en-GB")];
        assert_eq!(translation_preview(&single), "\u{1F1EC}\u{1F1E7} Accept");

        let multiple = vec![
            translation("Accept", "en-GB"),
            translation("Accepteren", "nl-NL"),
            translation("Akzeptieren", "de-DE"),
        ];
        assert_eq!(
            translation_preview(&multiple),
            "\u{1F1EC}\u{1F1E7} Accept (+2)"
        );
    }
}
