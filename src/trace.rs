//! Connected-component region extraction over the full-resolution buffer.

use palette::Srgb;
use serde::Serialize;

use crate::color::PaletteFilter;
use crate::error::{Result, invalid};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// A flood-collected region: its fill and the points in visitation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub fill: Srgb<u8>,
    pub points: Vec<Point>,
    pub area: f64,
}

/// Counters describing one tracing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceStats {
    pub discovered: usize,
    pub kept: usize,
    pub too_few_points: usize,
    pub too_small: usize,
    pub filtered_pixels: usize,
    pub visited_pixels: usize,
}

/// Absolute area of the closed polygon through `points` (shoelace formula).
pub fn shoelace_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice: i64 = 0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        twice += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }
    twice.abs() as f64 / 2.0
}

#[inline(always)]
fn rgb_at(pixels: &[u8], idx: usize) -> [u8; 3] {
    let o = idx * 4;
    [pixels[o], pixels[o + 1], pixels[o + 2]]
}

/// Scan `pixels` in row-major order and flood-collect 4-connected regions of
/// identical RGB.
///
/// Alpha is not consulted. With a filter, pixels whose color is not a member
/// are marked visited and skipped without snapping to the nearest entry.
/// Regions with fewer than three points, or whose shoelace area over the raw
/// visitation order is below `min_area`, are dropped.
pub fn trace_regions(
    pixels: &[u8],
    width: u32,
    height: u32,
    filter: Option<&PaletteFilter>,
    min_area: f64,
) -> Result<(Vec<Region>, TraceStats)> {
    let (w, h) = (width as usize, height as usize);
    let len = w * h;
    if pixels.len() != len * 4 {
        return Err(invalid(format!(
            "pixel buffer holds {} bytes, expected {} for {width}x{height}",
            pixels.len(),
            len * 4
        )));
    }

    let mut seen = vec![false; len];
    let mut stack = Vec::<usize>::new();
    let mut regions = Vec::new();
    let mut stats = TraceStats::default();

    for start in 0..len {
        if seen[start] {
            continue;
        }
        let color = rgb_at(pixels, start);
        if filter.is_some_and(|f| !f.contains(color)) {
            seen[start] = true;
            stats.filtered_pixels += 1;
            stats.visited_pixels += 1;
            continue;
        }

        stats.discovered += 1;
        seen[start] = true;
        stack.push(start);
        let mut points = Vec::new();

        while let Some(idx) = stack.pop() {
            let x = idx % w;
            let y = idx / w;
            points.push(Point { x: x as u32, y: y as u32 });
            stats.visited_pixels += 1;

            let mut visit = |n: usize| {
                if !seen[n] && rgb_at(pixels, n) == color {
                    seen[n] = true;
                    stack.push(n);
                }
            };
            if x + 1 < w {
                visit(idx + 1);
            }
            if x > 0 {
                visit(idx - 1);
            }
            if y + 1 < h {
                visit(idx + w);
            }
            if y > 0 {
                visit(idx - w);
            }
        }

        if points.len() < 3 {
            stats.too_few_points += 1;
            continue;
        }
        let area = shoelace_area(&points);
        if area < min_area {
            stats.too_small += 1;
            continue;
        }

        stats.kept += 1;
        regions.push(Region {
            fill: Srgb::new(color[0], color[1], color[2]),
            points,
            area,
        });
    }

    log::debug!(
        "traced {width}x{height}: {} regions discovered, {} kept, {} under 3 points, {} under min area {min_area}, {} pixels filtered",
        stats.discovered,
        stats.kept,
        stats.too_few_points,
        stats.too_small,
        stats.filtered_pixels
    );

    Ok((regions, stats))
}
