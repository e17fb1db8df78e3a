//! Display formatting helpers.

use regex::Regex;

/// Format a number for display: integral values without decimals,
/// everything else with two decimal places.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        format!("{:.0}", n)
    } else {
        format!("{:.2}", n)
    }
}

/// Whether a raw cell value should be exported as a number rather than
/// text: an optional leading minus, digits, optional decimal part.
pub fn looks_numeric(value: &str) -> bool {
    let re = Regex::new(r"^-?\d+(\.\d+)?$").expect("numeric pattern is valid");
    re.is_match(value)
}
