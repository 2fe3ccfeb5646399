//! Digit grouping for human-readable amounts.

/// Inserts `thousands_separator` every three integer digits and swaps the
/// `.` decimal point for `decimal_separator`.
///
/// The input is a plain decimal string such as `"1234567.89"`. Fraction
/// digits are kept as given.
pub fn group_digits(formatted: &str, thousands_separator: &str, decimal_separator: &str) -> String {
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted, None),
    };
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };

    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(thousands_separator);

    match fraction {
        Some(fraction) => format!("{}{}{}{}", sign, grouped, decimal_separator, fraction),
        None => format!("{}{}", sign, grouped),
    }
}
