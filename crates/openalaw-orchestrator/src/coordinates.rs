use std::sync::OnceLock;

use openalaw_core::bridge::Point;
use regex::Regex;

static COORDINATE_RE: OnceLock<Regex> = OnceLock::new();

fn coordinate_re() -> &'static Regex {
    // ASCII digits only; `\d` would also accept other Unicode digit classes.
    COORDINATE_RE.get_or_init(|| {
        Regex::new(r"([0-9]+)[^0-9]+([0-9]+)").expect("coordinate pattern is valid")
    })
}

/// Pull an `(x, y)` pair out of free text: the first run of digits, anything
/// that is not a digit, then a second run of digits.
///
/// Purely textual. "2024 to 10" yields `(2024, 10)`. Numbers that do not fit
/// in an `i32` yield `None`.
pub fn extract_coordinates(task: &str) -> Option<Point> {
    let caps = coordinate_re().captures(task)?;
    let x = caps.get(1)?.as_str().parse().ok()?;
    let y = caps.get(2)?.as_str().parse().ok()?;
    Some(Point { x, y })
}
