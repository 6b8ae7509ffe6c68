// Text label encoding: trimmed text to its Unicode code points.
//
// Trimming is part of the seed, so the whitespace set is frozen. It is
// Unicode `White_Space` minus U+0085 (NEL), plus U+FEFF (BOM), the set that
// historical draws were trimmed with. `str::trim` differs on exactly those
// two characters; use `trim_label` instead wherever a label is trimmed.

use crate::error::{DrawError, Result};

/// Whether `c` is stripped from the ends of a label.
pub fn is_label_whitespace(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{0085}' => false,
        _ => c.is_whitespace(),
    }
}

/// `text` without leading or trailing label whitespace.
pub fn trim_label(text: &str) -> &str {
    text.trim_matches(is_label_whitespace)
}

/// Code points of `text` after trimming surrounding whitespace.
///
/// Fails with `InvalidRange` if nothing is left after trimming. A Rust
/// `&str` is always valid UTF-8, so every `char` yields a code point.
pub fn encode_text(text: &str) -> Result<Vec<u64>> {
    let trimmed = trim_label(text);
    if trimmed.is_empty() {
        return Err(DrawError::InvalidRange(
            "text must be non-empty after trimming whitespace".into(),
        ));
    }
    Ok(trimmed.chars().map(|c| u64::from(u32::from(c))).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii() {
        assert_eq!(encode_text("abc").unwrap(), vec![97, 98, 99]);
    }

    #[test]
    fn outer_whitespace_is_ignored() {
        assert_eq!(encode_text("  \t hi \n").unwrap(), vec![104, 105]);
    }

    #[test]
    fn inner_whitespace_is_kept() {
        assert_eq!(encode_text("a b").unwrap(), vec![97, 32, 98]);
    }

    #[test]
    fn non_bmp_is_one_code_point() {
        // U+1F3B2 (game die) is a surrogate pair in UTF-16 but one code point.
        assert_eq!(encode_text("抽奖🎲").unwrap(), vec![0x62BD, 0x5956, 0x1F3B2]);
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        assert_eq!(encode_text("\u{FEFF}abc\u{FEFF}").unwrap(), vec![97, 98, 99]);
        assert!(encode_text("\u{FEFF}").unwrap_err().is_invalid_range());
    }

    #[test]
    fn next_line_is_kept() {
        assert_eq!(encode_text("\u{0085}abc").unwrap(), vec![0x85, 97, 98, 99]);
        assert_eq!(encode_text("\u{0085}").unwrap(), vec![0x85]);
    }

    #[test]
    fn label_whitespace_set() {
        let stripped = [
            '\t', '\n', '\u{000B}', '\u{000C}', '\r', ' ', '\u{00A0}', '\u{1680}', '\u{2000}',
            '\u{200A}', '\u{2028}', '\u{2029}', '\u{202F}', '\u{205F}', '\u{3000}', '\u{FEFF}',
        ];
        for c in stripped {
            assert!(is_label_whitespace(c), "{c:?}");
        }
        for c in ['a', '\u{0085}', '\u{200B}', '\u{180E}', '\u{001C}'] {
            assert!(!is_label_whitespace(c), "{c:?}");
        }
    }

    #[test]
    fn trim_label_keeps_inner_text() {
        assert_eq!(trim_label(" \u{FEFF}a \u{FEFF} b\u{3000}"), "a \u{FEFF} b");
        assert_eq!(trim_label("\u{0085} x \u{0085}"), "\u{0085} x \u{0085}");
    }

    #[test]
    fn blank_is_invalid_range() {
        for text in ["", "   ", "\n\t\u{3000}"] {
            let err = encode_text(text).unwrap_err();
            assert!(err.is_invalid_range(), "{text:?}: {err:?}");
        }
    }
}
