//! Formatting utilities for CLI output.

/// Format a large number with commas for readability.
///
/// # Examples
///
/// ```
/// use rf_cli_common::format_number;
///
/// assert_eq!(format_number(0), "0");
/// assert_eq!(format_number(123), "123");
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(701528), "701,528");
/// assert_eq!(format_number(1234567890), "1,234,567,890");
/// ```
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}
