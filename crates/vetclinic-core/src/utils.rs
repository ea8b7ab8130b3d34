//! Utility functions for string formatting and matching.

/// Case-insensitive substring match, used by the search filters.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a currency amount for display, e.g. `1808.5` -> `"₹1,808.50"`.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}₹{}.{:02}", sign, grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Golden Retriever", "retriev"));
        assert!(contains_ignore_case("Buddy", "BUD"));
        assert!(!contains_ignore_case("Whiskers", "buddy"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1808.0), "₹1,808.00");
        assert_eq!(format_amount(67000.5), "₹67,000.50");
        assert_eq!(format_amount(0.0), "₹0.00");
        assert_eq!(format_amount(999.999), "₹1,000.00");
    }
}
