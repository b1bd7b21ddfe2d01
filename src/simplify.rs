use crate::trace::Point;

/// Keep-one-in-N stride for a simplify ratio: `max(1, floor((1 - simplify) * 8))`.
#[inline]
pub fn every_nth(simplify: f32) -> usize {
    (((1.0 - simplify.clamp(0.0, 1.0)) * 8.0).floor() as usize).max(1)
}

/// Decimate a point sequence, keeping indices `0, n, 2n, ...` in order.
///
/// Short inputs may come back with fewer than three points; those render as
/// degenerate polygons and are emitted as-is.
pub fn simplify_points(points: &[Point], simplify: f32) -> Vec<Point> {
    points.iter().step_by(every_nth(simplify)).copied().collect()
}
