use chrono::NaiveDate;

const NOT_AVAILABLE: &str = "N/A";

/// Two-decimal price, `N/A` when absent or not finite.
#[must_use]
pub fn format_price(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(value) => format!("{value:.2}"),
        None => NOT_AVAILABLE.to_owned(),
    }
}

/// Two-decimal price with a dollar prefix, `N/A` when absent.
#[must_use]
pub fn format_currency(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(value) => format!("${value:.2}"),
        None => NOT_AVAILABLE.to_owned(),
    }
}

/// Signed percentage such as `+1.25%` or `-0.40%`.
#[must_use]
pub fn format_percentage(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(value) => {
            let sign = if value >= 0.0 { "+" } else { "" };
            format!("{sign}{value:.2}%")
        }
        None => NOT_AVAILABLE.to_owned(),
    }
}

/// Volume grouped with thousands separators.
#[must_use]
pub fn format_volume(value: Option<u64>) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_owned();
    };
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Tooltip heading, e.g. `Jan 2, 2024`.
#[must_use]
pub fn format_tooltip_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Left-axis label: dollar prefix plus the shortest decimal form of the tick.
#[must_use]
pub fn format_axis_price(value: f64) -> String {
    // Avoid "-0" for ticks that land on zero after rounding.
    let value = if value == 0.0 { 0.0 } else { value };
    format!("${value}")
}
