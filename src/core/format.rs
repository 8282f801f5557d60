//! Display formatting helpers shared by the views

/// Format a number with `,` thousands separators and at most three decimals
///
/// ```
/// use fleetview::core::format::group_thousands;
/// assert_eq!(group_thousands(50000000.0), "50,000,000");
/// assert_eq!(group_thousands(1420788.5), "1,420,788.5");
/// ```
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let text = format!("{}", rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

/// Cut `text` to at most `max_chars` characters and append `...`
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// Pad or cut `text` to exactly `width` display columns
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len > width {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(-1234567.0), "-1,234,567");
        assert_eq!(group_thousands(0.3333333), "0.333");
    }

    #[test]
    fn test_truncate_always_appends_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Falcon", 3), "Fal...");
        assert_eq!(truncate_with_ellipsis("Hi", 10), "Hi...");
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("", 2), "  ");
    }
}
