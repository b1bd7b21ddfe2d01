//! Flat SVG serializer for traced polygons.

use palette::Srgb;

use crate::color::to_hex;
use crate::trace::Point;

/// A simplified region ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub fill: Srgb<u8>,
    pub points: Vec<Point>,
}

/// Render polygons as `<polygon>` children of a single `<svg>` root, in the
/// order given. No DOCTYPE, styles or grouping.
pub fn to_svg(width: u32, height: u32, polygons: &[Polygon]) -> String {
    let mut out = format!(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}">"#);
    for polygon in polygons {
        out.push_str(r#"<polygon points=""#);
        for (i, p) in polygon.points.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&format!("{},{}", p.x, p.y));
        }
        out.push_str(&format!(r#"" fill="{}" stroke="none"/>"#, to_hex(polygon.fill)));
    }
    out.push_str("</svg>");
    out
}
