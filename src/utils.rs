use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shortens `s` to at most `max_width` terminal columns, ending in "...".
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push_str("...");
    out
}

/// Counts the visual lines `text` takes when wrapped at `max_width` columns.
/// Explicit newlines always break. Wrapping is per character, so this is an
/// upper bound of what ratatui's word wrap produces, which is good enough to
/// centre text vertically.
pub fn wrapped_line_count(text: &str, max_width: usize) -> usize {
    if text.is_empty() {
        return 0;
    }
    let max_width = max_width.max(1);

    text.split('\n')
        .map(|line| {
            let mut lines = 1;
            let mut current_width = 0;
            for ch in line.trim_end().chars() {
                let char_width = ch.width().unwrap_or(1);
                if current_width + char_width > max_width && current_width > 0 {
                    lines += 1;
                    current_width = char_width;
                } else {
                    current_width += char_width;
                }
            }
            lines
        })
        .sum()
}

/// Formats an elapsed time as `m:ss`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
