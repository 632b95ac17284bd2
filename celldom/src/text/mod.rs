use unicode_width::UnicodeWidthStr;

/// Terminal display width of `s` (wide glyphs count double).
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Number of characters in `s`, the unit used for content-length thresholds.
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}
