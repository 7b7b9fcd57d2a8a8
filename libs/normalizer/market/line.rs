//! Line keys
//!
//! Handicap and total maps are keyed by the line rendered with two decimals
//! and at most one trailing zero removed. Consumers join on these exact
//! strings, so "2.0" stays "2.0" and is never shortened to "2".

/// Format a handicap or total value as a line key
pub fn line_key(value: f64) -> String {
    let mut line = format!("{:.2}", value);
    if line.ends_with('0') {
        line.pop();
    }
    line
}
