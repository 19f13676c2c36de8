//! Text metrics
//!
//! Pure counting over the current buffer. Recomputed on every buffer change.

use std::fmt;

/// Counts derived from the buffer text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TextMetrics {
    /// Unicode scalar values in the text
    pub characters: usize,
    /// Characters left after removing whitespace, see `is_blank`
    pub characters_without_whitespace: usize,
    /// 0 for empty text, otherwise line breaks + 1
    pub lines: usize,
    /// Characters excluding `\r` and `\n`
    pub characters_without_newlines: usize,
    pub utf8_bytes: usize,
    pub utf16_bytes: usize,
    /// Manuscript sheets needed, `characters_without_newlines / page size` rounded up
    pub manuscript_pages: usize,
}

impl TextMetrics {
    /// Compute all metrics for `text`.
    ///
    /// `page_chars` is the manuscript sheet capacity and must be non-zero
    /// (enforced when the configuration is loaded).
    pub(crate) fn compute(text: &str, page_chars: usize) -> Self {
        let characters = text.chars().count();
        let characters_without_whitespace = text.chars().filter(|&c| !is_blank(c)).count();
        let lines = if text.is_empty() {
            0
        } else {
            text.matches('\n').count() + 1
        };
        let characters_without_newlines = text.chars().filter(|c| !matches!(c, '\r' | '\n')).count();

        Self {
            characters,
            characters_without_whitespace,
            lines,
            characters_without_newlines,
            utf8_bytes: text.len(),
            utf16_bytes: text.encode_utf16().count() * 2,
            manuscript_pages: characters_without_newlines.div_ceil(page_chars.max(1)),
        }
    }

    /// Value for a single metric
    pub(crate) fn get(&self, kind: MetricKind) -> usize {
        match kind {
            MetricKind::Characters => self.characters,
            MetricKind::CharactersWithoutWhitespace => self.characters_without_whitespace,
            MetricKind::Lines => self.lines,
            MetricKind::CharactersWithoutNewlines => self.characters_without_newlines,
            MetricKind::Utf8Bytes => self.utf8_bytes,
            MetricKind::Utf16Bytes => self.utf16_bytes,
            MetricKind::ManuscriptPages => self.manuscript_pages,
        }
    }

    /// Metrics shown in the given display mode, paired with their values
    pub(crate) fn rows(&self, show_details: bool) -> impl Iterator<Item = (MetricKind, usize)> + '_ {
        MetricKind::ALL
            .iter()
            .copied()
            .filter(move |kind| show_details || !kind.is_detail())
            .map(move |kind| (kind, self.get(kind)))
    }
}

/// Whitespace for counting purposes.
///
/// Unicode `White_Space` plus the ASCII information separators
/// U+001C..=U+001F, which text splitting treats as field breaks.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{1c}'..='\u{1f}')
}

/// Metric identifiers used for labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MetricKind {
    Characters,
    CharactersWithoutWhitespace,
    Lines,
    CharactersWithoutNewlines,
    Utf8Bytes,
    Utf16Bytes,
    ManuscriptPages,
}

impl MetricKind {
    pub(crate) const ALL: [MetricKind; 7] = [
        MetricKind::Characters,
        MetricKind::CharactersWithoutWhitespace,
        MetricKind::Lines,
        MetricKind::CharactersWithoutNewlines,
        MetricKind::Utf8Bytes,
        MetricKind::Utf16Bytes,
        MetricKind::ManuscriptPages,
    ];

    /// Detail metrics are hidden unless `metrics.show_details` is set
    pub(crate) fn is_detail(self) -> bool {
        !matches!(
            self,
            MetricKind::Characters | MetricKind::CharactersWithoutWhitespace | MetricKind::Lines
        )
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Characters => write!(f, "Characters (with whitespace)"),
            MetricKind::CharactersWithoutWhitespace => write!(f, "Characters (without whitespace)"),
            MetricKind::Lines => write!(f, "Lines"),
            MetricKind::CharactersWithoutNewlines => write!(f, "Characters (without line breaks)"),
            MetricKind::Utf8Bytes => write!(f, "Bytes (UTF-8)"),
            MetricKind::Utf16Bytes => write!(f, "Bytes (UTF-16)"),
            MetricKind::ManuscriptPages => write!(f, "Manuscript pages"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(text: &str) -> (usize, usize, usize) {
        let m = TextMetrics::compute(text, 400);
        (m.characters, m.characters_without_whitespace, m.lines)
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(counts(""), (0, 0, 0));
        assert_eq!(TextMetrics::compute("", 400), TextMetrics::default());
    }

    #[test]
    fn test_mixed_text() {
        assert_eq!(counts("ab cd\nef"), (8, 6, 2));
    }

    #[test]
    fn test_line_count() {
        assert_eq!(counts("single line").2, 1);
        assert_eq!(counts("a\nb\nc").2, 3);
        assert_eq!(counts("\n").2, 2);
        assert_eq!(counts("trailing\n").2, 2);
        assert_eq!(counts("\n\n\n").2, 4);
    }

    #[test]
    fn test_characters_are_scalar_values() {
        // Japanese text counts one per character, not per byte
        assert_eq!(counts("日本語"), (3, 3, 1));
        assert_eq!(counts("🦀🦀"), (2, 2, 1));
    }

    #[test]
    fn test_whitespace_removal() {
        assert_eq!(counts("  a \t b\r\n c  ").1, 3);
        assert_eq!(counts("   \n\t ").1, 0);
        // Ideographic space (U+3000) is whitespace
        assert_eq!(counts("あ\u{3000}い").1, 2);
    }

    #[test]
    fn test_whitespace_count_matches_filtered_chars() {
        for text in ["", "a b", " lead", "trail ", "x\ty\nz", "no_space", "\u{a0}nbsp"] {
            let expected = text.chars().filter(|c| !c.is_whitespace()).count();
            assert_eq!(counts(text).1, expected, "text: {:?}", text);
        }
    }

    #[test]
    fn test_information_separators_are_whitespace() {
        assert_eq!(counts("a\u{1f}b").1, 2);
        assert_eq!(counts("\u{1c}\u{1d}\u{1e}x").1, 1);
        // Still counted as characters
        assert_eq!(counts("a\u{1f}b").0, 3);
    }

    #[test]
    fn test_detail_metrics() {
        let m = TextMetrics::compute("ab\r\nあ🦀", 400);
        assert_eq!(m.characters, 6);
        assert_eq!(m.characters_without_newlines, 4);
        assert_eq!(m.utf8_bytes, 2 + 2 + 3 + 4);
        // 🦀 needs a surrogate pair
        assert_eq!(m.utf16_bytes, (5 + 2) * 2);
        assert_eq!(m.manuscript_pages, 1);
    }

    #[test]
    fn test_manuscript_pages_round_up() {
        let page = "字".repeat(400);
        assert_eq!(TextMetrics::compute(&page, 400).manuscript_pages, 1);
        let over = format!("{}\n字", page);
        assert_eq!(TextMetrics::compute(&over, 400).manuscript_pages, 2);
        assert_eq!(TextMetrics::compute("abcd", 2).manuscript_pages, 2);
    }

    #[test]
    fn test_rows_hide_details() {
        let m = TextMetrics::compute("ab cd\nef", 400);
        let basic: Vec<_> = m.rows(false).collect();
        assert_eq!(
            basic,
            vec![
                (MetricKind::Characters, 8),
                (MetricKind::CharactersWithoutWhitespace, 6),
                (MetricKind::Lines, 2),
            ]
        );
        assert_eq!(m.rows(true).count(), MetricKind::ALL.len());
    }

    #[test]
    fn test_metric_labels() {
        assert_eq!(format!("{}", MetricKind::Lines), "Lines");
        assert_eq!(
            format!("{}", MetricKind::CharactersWithoutWhitespace),
            "Characters (without whitespace)"
        );
    }
}
