//! Unicode-aware helpers for fitting words into terminal cells.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Drop control characters. A word list is one entry per line, so tabs and
/// newlines are removed too.
pub fn sanitize(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}

/// Display width in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` columns, ending with `tail` when
/// anything was cut. Wide characters are never split.
pub fn truncate(s: &str, max_width: usize, tail: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let tail_width = display_width(tail);
    if tail_width > max_width {
        return String::new();
    }

    let budget = max_width - tail_width;
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(tail);
    out
}
