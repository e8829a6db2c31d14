// File: crates/pulse-core/src/format.rs
// Summary: Default value formatter used for axis labels and tooltips.

/// Caller-supplied value formatter.
pub type Formatter<'a> = Box<dyn Fn(f64) -> String + 'a>;

/// Compact formatter: magnitudes of 1000 and above get a one-decimal `k`
/// suffix, everything else is rounded with `,` thousands grouping.
///
/// ```
/// use pulse_core::format::format_compact;
/// assert_eq!(format_compact(999.0), "999");
/// assert_eq!(format_compact(1000.0), "1.0k");
/// assert_eq!(format_compact(2500.0), "2.5k");
/// ```
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    if value.abs() >= 1000.0 {
        return format!("{:.1}k", value / 1000.0);
    }
    group_thousands(value.round() as i64)
}

/// Integer with `,` between groups of three digits.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Apply an optional caller formatter, falling back to [`format_compact`].
pub(crate) fn apply(formatter: Option<&Formatter<'_>>, value: f64) -> String {
    match formatter {
        Some(f) => f(value),
        None => format_compact(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values() {
        assert_eq!(format_compact(999.0), "999");
        assert_eq!(format_compact(1000.0), "1.0k");
        assert_eq!(format_compact(2500.0), "2.5k");
    }

    #[test]
    fn negatives_and_rounding() {
        assert_eq!(format_compact(-1500.0), "-1.5k");
        assert_eq!(format_compact(-999.4), "-999");
        assert_eq!(format_compact(12.6), "13");
        assert_eq!(format_compact(0.0), "0");
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-12345), "-12,345");
    }
}
