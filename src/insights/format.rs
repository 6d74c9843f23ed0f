/// Minutes rendered as hours with one decimal place. Display is capped at
/// "12.0 hours"; the underlying totals are never truncated.
pub fn format_hours(minutes: i64) -> String {
    let mut hours = minutes as f64 / 60.0;
    if hours > 12.0 {
        hours = 12.0;
    }
    if (hours - 1.0).abs() < f64::EPSILON {
        "1.0 hour".to_string()
    } else {
        format!("{hours:.1} hours")
    }
}
