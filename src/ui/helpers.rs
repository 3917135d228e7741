use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `s` to at most `max_width` display columns, marking the cut with `…`.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if width + cw + 1 > max_width {
            result.push('…');
            break;
        }
        result.push(c);
        width += cw;
    }
    result
}

pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Rows one logical line occupies once word-wrapped to `max_width` columns.
pub fn wrapped_height(line: &str, max_width: usize) -> usize {
    if max_width == 0 || line.is_empty() {
        return 1;
    }

    let mut rows = 1;
    let mut current = 0;
    for word in line.split_inclusive(char::is_whitespace) {
        let w = word.width();
        if current > 0 && current + w > max_width {
            rows += 1;
            current = 0;
        }
        current += w;
        // Words longer than the line break mid-word
        while current > max_width {
            rows += 1;
            current -= max_width;
        }
    }
    rows
}
