//! CSS translate wire form
//!
//! Hosts hand the engine raw `translate(Xpx, Ypx)` strings and expect the
//! same form back when the engine writes a transform.

use crate::math::Vec2;

/// Parse a `translate(Xpx, Ypx)` string into an offset
///
/// Returns `None` for anything that is not a plain 2D translate.
pub fn parse_translate(value: &str) -> Option<Vec2> {
    let trimmed = value.trim();
    let body = trimmed
        .strip_prefix("translate(")
        .and_then(|rest| rest.strip_suffix(')'))?;

    let mut parts = body.split(',');
    let x = parse_px(parts.next()?)?;
    let y = match parts.next() {
        Some(part) => parse_px(part)?,
        // single-argument translate only shifts x
        None => 0.0,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(Vec2::new(x, y))
}

/// Write an offset as a `translate(Xpx, Ypx)` string
pub fn write_translate(offset: Vec2) -> String {
    format!("translate({}px, {}px)", offset.x, offset.y)
}

fn parse_px(part: &str) -> Option<f32> {
    let trimmed = part.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    number.trim().parse::<f32>().ok()
}
