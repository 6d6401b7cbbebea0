// ---------------------------------------------------------------------------
// Number formatting for the metric cards and chart labels
// ---------------------------------------------------------------------------

/// Group the digits of a non-negative integer with commas: `1234567` → `1,234,567`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount, e.g. `$1,234,568` or `-$35`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// Rounded count with separators, e.g. `12,500`.
pub fn format_count(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(rounded.abs() as u64))
}

/// One decimal place, e.g. `42.5%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}
