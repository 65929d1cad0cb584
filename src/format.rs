//! Number formatting helpers for presentation layers.

/// Formats a gain total with K/M suffixes: 950 -> "950",
/// 12_500 -> "12.5K", 3_000_000 -> "3.0M".
pub fn format_number(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Formats the prestige multiplier for display: 1.2 -> "x1.2".
pub fn format_multiplier(multiplier: f64) -> String {
    format!("x{:.1}", multiplier)
}
