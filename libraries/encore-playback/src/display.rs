//! Formatting helpers for player displays

/// Render seconds as `m:ss`
///
/// Minutes are not wrapped into hours. Negative or non-finite input
/// renders as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
