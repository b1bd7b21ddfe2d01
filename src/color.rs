use std::collections::HashSet;

use palette::Srgb;

use crate::error::{Result, invalid};

/// Format a color as `#RRGGBB` (uppercase).
#[inline]
pub fn to_hex(c: Srgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", c.red, c.green, c.blue)
}

/// Parse `#RRGGBB` / `RRGGBB` in either case.
pub fn parse_hex(s: &str) -> Result<Srgb<u8>> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid(format!("hex color must be 6 hex digits: {s:?}")));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid(format!("invalid hex color: {s:?}")))
    };
    Ok(Srgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Set of colors allowed to seed a region.
#[derive(Debug, Clone, Default)]
pub struct PaletteFilter {
    colors: HashSet<[u8; 3]>,
}

impl PaletteFilter {
    pub fn from_hex<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let colors = entries
            .iter()
            .map(|s| parse_hex(s.as_ref()).map(|c| [c.red, c.green, c.blue]))
            .collect::<Result<HashSet<_>>>()?;
        Ok(Self { colors })
    }

    #[inline(always)]
    pub fn contains(&self, rgb: [u8; 3]) -> bool {
        self.colors.contains(&rgb)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_uppercase_with_hash() {
        assert_eq!(to_hex(Srgb::new(255, 10, 171)), "#FF0AAB");
    }

    #[test]
    fn parse_accepts_either_case_and_optional_hash() {
        assert_eq!(parse_hex("#ff0aab").unwrap(), Srgb::new(255, 10, 171));
        assert_eq!(parse_hex("FF0AAB").unwrap(), Srgb::new(255, 10, 171));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(parse_hex("#FFF").is_err());
        assert!(parse_hex("#GG0000").is_err());
        assert!(parse_hex("#ÿÿÿ").is_err());
        assert!(parse_hex("#+F+F+F").is_err());
        assert!(parse_hex("-1FFFF").is_err());
    }

    #[test]
    fn filter_matches_case_insensitively() {
        let filter = PaletteFilter::from_hex(&["#00ff00", "#0000FF"]).unwrap();
        assert_eq!(filter.len(), 2);
        assert!(filter.contains([0, 255, 0]));
        assert!(filter.contains([0, 0, 255]));
        assert!(!filter.contains([255, 0, 0]));
        assert!(PaletteFilter::from_hex(&["#+F+F+F"]).is_err());
    }
}
