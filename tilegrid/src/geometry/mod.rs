//! Integer geometry primitives
//!
//! Provides the size, rectangle, offset and tile-index value types that the
//! tiling engine consumes and produces, plus text parsing for the `WxH` and
//! `X,Y,WxH` forms used by configuration files and the CLI.

mod types;

pub use types::{ParseGeometryError, Rect, Size, TileIndex, Vector2d};

use std::str::FromStr;

/// Parses a size written as `WxH` (for example `512x512`).
///
/// Surrounding whitespace is ignored and the separator may be `x` or `X`.
pub fn parse_size(input: &str) -> Result<Size, ParseGeometryError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseGeometryError::Empty);
    }

    let (width, height) =
        trimmed
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or_else(|| ParseGeometryError::Malformed {
                input: input.to_string(),
                expected: "WIDTHxHEIGHT",
            })?;

    let width = parse_component(input, width)?;
    let height = parse_component(input, height)?;
    if width < 0 || height < 0 {
        return Err(ParseGeometryError::NegativeExtent {
            input: input.to_string(),
        });
    }

    Ok(Size::new(width, height))
}

/// Parses a rectangle written as `X,Y,WxH` (for example `10,20,300x200`).
///
/// The origin may be negative; the extent may not.
pub fn parse_rect(input: &str) -> Result<Rect, ParseGeometryError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseGeometryError::Empty);
    }

    let mut parts = trimmed.splitn(3, ',');
    let (x, y, size) = match (parts.next(), parts.next(), parts.next()) {
        (Some(x), Some(y), Some(size)) => (x, y, size),
        _ => {
            return Err(ParseGeometryError::Malformed {
                input: input.to_string(),
                expected: "X,Y,WIDTHxHEIGHT",
            })
        }
    };

    let x = parse_component(input, x)?;
    let y = parse_component(input, y)?;
    let size = parse_size(size).map_err(|e| match e {
        ParseGeometryError::Empty | ParseGeometryError::Malformed { .. } => {
            ParseGeometryError::Malformed {
                input: input.to_string(),
                expected: "X,Y,WIDTHxHEIGHT",
            }
        }
        ParseGeometryError::InvalidNumber { component, .. } => ParseGeometryError::InvalidNumber {
            input: input.to_string(),
            component,
        },
        ParseGeometryError::NegativeExtent { .. } => ParseGeometryError::NegativeExtent {
            input: input.to_string(),
        },
    })?;

    Ok(Rect::new(x, y, size.width(), size.height()))
}

fn parse_component(input: &str, component: &str) -> Result<i32, ParseGeometryError> {
    let component = component.trim();
    component
        .parse::<i32>()
        .map_err(|_| ParseGeometryError::InvalidNumber {
            input: input.to_string(),
            component: component.to_string(),
        })
}

impl FromStr for Size {
    type Err = ParseGeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_size(s)
    }
}

impl FromStr for Rect {
    type Err = ParseGeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rect(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_clamps_negative_extents() {
        let size = Size::new(-5, 10);
        assert_eq!(size.width(), 0);
        assert_eq!(size.height(), 10);
        assert!(size.is_empty());
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.bottom(), 60);
        assert_eq!(rect.size(), Size::new(30, 40));
    }

    #[test]
    fn test_rect_intersection_overlapping() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersection(&b), Rect::new(5, 5, 5, 5));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_rect_intersection_touching_edges_is_empty() {
        // Edges are exclusive, so rectangles sharing a border do not overlap
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(a.intersection(&b).is_empty());
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_empty_rect_intersects_nothing() {
        let empty = Rect::new(5, 5, 0, 10);
        let big = Rect::new(0, 0, 100, 100);
        assert!(!empty.intersects(&big));
        assert!(!big.intersects(&empty));
        assert_eq!(big.intersection(&empty), Rect::default());
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 5, 5, 20);
        assert_eq!(a.union(&b), Rect::new(0, 0, 25, 25));

        // Empty rectangles don't stretch the union toward their origin
        let empty = Rect::new(-50, -50, 0, 0);
        assert_eq!(a.union(&empty), a);
        assert_eq!(empty.union(&a), a);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.contains_point(0, 0));
        assert!(rect.contains_point(9, 9));
        assert!(!rect.contains_point(10, 9));
        assert!(rect.contains_rect(&Rect::new(2, 2, 8, 8)));
        assert!(!rect.contains_rect(&Rect::new(2, 2, 9, 8)));
        assert!(!rect.contains_rect(&Rect::new(2, 2, 0, 0)));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("512x256").unwrap(), Size::new(512, 256));
        assert_eq!(" 10 X 20 ".parse::<Size>().unwrap(), Size::new(10, 20));
    }

    #[test]
    fn test_parse_size_errors() {
        assert_eq!(parse_size("   "), Err(ParseGeometryError::Empty));
        assert!(matches!(
            parse_size("512"),
            Err(ParseGeometryError::Malformed { .. })
        ));
        assert!(matches!(
            parse_size("12xab"),
            Err(ParseGeometryError::InvalidNumber { component, .. }) if component == "ab"
        ));
        assert!(matches!(
            parse_size("-1x4"),
            Err(ParseGeometryError::NegativeExtent { .. })
        ));
    }

    #[test]
    fn test_parse_rect() {
        assert_eq!(
            parse_rect("10,20,300x200").unwrap(),
            Rect::new(10, 20, 300, 200)
        );
        assert_eq!(
            "-4, -8, 16x16".parse::<Rect>().unwrap(),
            Rect::new(-4, -8, 16, 16)
        );
    }

    #[test]
    fn test_parse_rect_errors() {
        assert!(matches!(
            parse_rect("10,20"),
            Err(ParseGeometryError::Malformed { .. })
        ));
        assert!(matches!(
            parse_rect("10,20,"),
            Err(ParseGeometryError::Malformed { .. })
        ));
        assert!(matches!(
            parse_rect("a,20,1x1"),
            Err(ParseGeometryError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_rect("0,0,1x-1"),
            Err(ParseGeometryError::NegativeExtent { input }) if input == "0,0,1x-1"
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let rect = Rect::new(-3, 7, 12, 5);
        assert_eq!(rect.to_string(), "-3,7,12x5");
        assert_eq!(rect.to_string().parse::<Rect>().unwrap(), rect);
        assert_eq!(Size::new(4, 9).to_string(), "4x9");
    }

    #[test]
    fn test_serialize_field_names() {
        let rect = serde_json::to_value(Rect::new(-3, 7, 12, 5)).unwrap();
        assert_eq!(
            rect,
            serde_json::json!({ "x": -3, "y": 7, "width": 12, "height": 5 })
        );

        let size = serde_json::to_value(Size::new(4, -9)).unwrap();
        assert_eq!(size, serde_json::json!({ "width": 4, "height": 0 }));

        let index = serde_json::to_value(TileIndex::new(2, 1)).unwrap();
        assert_eq!(index, serde_json::json!({ "x": 2, "y": 1 }));

        let offset = serde_json::to_value(Vector2d::new(1, 0)).unwrap();
        assert_eq!(offset, serde_json::json!({ "x": 1, "y": 0 }));
    }
}
