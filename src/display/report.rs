//! Small text helpers for the breakdown and trend tables

/// Percentage with fewer decimals as the share grows
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar standing in for a chart slice
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate to at most `max_len` characters, with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(0.04), "0.04%");
        assert_eq!(format_percentage(8.34), "8.3%");
        assert_eq!(format_percentage(32.0), "32%");
    }

    #[test]
    fn test_format_bar() {
        // Food at 40 of a 60 maximum fills two thirds
        let bar = format_bar(40.0, 60.0, 12);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 8);
        assert_eq!(bar.chars().count(), 12);
        assert_eq!(format_bar(25.0, 0.0, 3), "   ");
        assert_eq!(format_bar(90.0, 60.0, 4), "████");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Bills & Utilities", 10), "Bills &...");
        assert_eq!(truncate("Salary", 24), "Salary");
        assert_eq!(truncate("Healthcare", 2), "..");
        assert_eq!(truncate("Café crème brûlée", 8), "Café ...");
    }
}
