//! Display Helpers
//!
//! Money formatting and parsing for the form inputs.

/// Format an amount as dollars with two decimals
pub fn format_money(amount: f64) -> String {
    // Avoid "-$0.00" from rounding noise
    let amount = if amount.abs() < 0.005 { 0.0 } else { amount };
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

/// Format a 0..=1 proportion as a percentage
pub fn format_percent(proportion: f64) -> String {
    format!("{:.1}%", proportion * 100.0)
}

/// Parse user input like "12.50", "$12.50" or "1,200".
/// Empty input is zero. Returns None for anything that is not a finite number;
/// sign checks are left to the engine.
pub fn parse_amount(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Tip for a percentage of the subtotal, rounded to the cent
pub fn tip_from_percent(subtotal: f64, percent: f64) -> f64 {
    (subtotal * percent).round() / 100.0
}

/// Initials for a person chip: first letter of up to two words
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}
