//! Freeform drawing primitives placed on a seating floor plan.
//!
//! Shapes, polylines, text labels, and image anchors are decorative or
//! structural only: they carry geometry plus style, and nothing in the seat
//! or assignment logic ever references them. The only behavior they have is
//! validation of their own geometric and style values.
//!
//! All primitives carry an extension bag (`extra`) that captures JSON fields
//! this crate does not model, so that documents produced by other editors
//! survive a load/save cycle byte-for-byte in content.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors produced when validating a drawing primitive.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// A shape or polyline has no points at all.
    #[error("{primitive} {id} has an empty point list")]
    EmptyPointList { primitive: &'static str, id: String },

    /// A color value is not a recognised hex color string.
    #[error("invalid color value: {0:?}")]
    InvalidColor(String),

    /// A coordinate is NaN or infinite.
    #[error("{primitive} {id} has a non-finite coordinate")]
    NonFiniteCoordinate { primitive: &'static str, id: String },

    /// A text label has an empty text body.
    #[error("text label {0} has empty text")]
    EmptyText(String),
}

/// A point in floor-plan coordinates.
///
/// The coordinate space is abstract: the viewer applies the workspace view
/// scale when rendering, so units here are whatever the editor produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Validates a hex color string of the form `#RGB`, `#RRGGBB`, or `#RRGGBBAA`.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidColor`] when the string is not a
/// `#`-prefixed hex value of a supported length.
pub fn validate_color(color: &str) -> Result<(), GeometryError> {
    let invalid = || GeometryError::InvalidColor(color.to_string());

    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if !matches!(hex.len(), 3 | 6 | 8) {
        return Err(invalid());
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    Ok(())
}

// ── Primitive types ───────────────────────────────────────────────────────────

/// A freeform filled polygon (or open path when `closed` is false).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: String,
    pub points: Vec<Point>,
    /// Fill color; hex string.
    pub fill: String,
    /// Outline color; hex string.
    pub stroke: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Whether the last point connects back to the first.
    #[serde(default = "default_closed")]
    pub closed: bool,
    /// Unrecognised wire fields, preserved verbatim on round-trip.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An open multi-segment line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polyline {
    pub id: String,
    pub points: Vec<Point>,
    pub stroke: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A piece of text anchored at a position on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLabel {
    pub id: String,
    pub position: Point,
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    pub color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A reference to an externally hosted image, placed at a position and size.
///
/// The engine never fetches the image; `href` is opaque to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnchor {
    pub id: String,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub href: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_stroke_width() -> f64 {
    1.0
}
fn default_closed() -> bool {
    true
}
fn default_font_size() -> f64 {
    14.0
}

// ── Validation ────────────────────────────────────────────────────────────────

impl Shape {
    /// # Errors
    ///
    /// Returns [`GeometryError`] for an empty point list, a non-finite
    /// coordinate, or an invalid fill/stroke color.
    pub fn validate(&self) -> Result<(), GeometryError> {
        validate_points("shape", &self.id, &self.points)?;
        validate_color(&self.fill)?;
        validate_color(&self.stroke)?;
        Ok(())
    }
}

impl Polyline {
    /// # Errors
    ///
    /// Returns [`GeometryError`] for an empty point list, a non-finite
    /// coordinate, or an invalid stroke color.
    pub fn validate(&self) -> Result<(), GeometryError> {
        validate_points("polyline", &self.id, &self.points)?;
        validate_color(&self.stroke)?;
        Ok(())
    }
}

impl TextLabel {
    /// # Errors
    ///
    /// Returns [`GeometryError`] for empty text, a non-finite anchor
    /// position, or an invalid color.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.text.trim().is_empty() {
            return Err(GeometryError::EmptyText(self.id.clone()));
        }
        if !self.position.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate {
                primitive: "text label",
                id: self.id.clone(),
            });
        }
        validate_color(&self.color)?;
        Ok(())
    }
}

impl ImageAnchor {
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFiniteCoordinate`] when the anchor
    /// position or dimensions are not finite numbers.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !self.position.is_finite() || !self.width.is_finite() || !self.height.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate {
                primitive: "image",
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

fn validate_points(
    primitive: &'static str,
    id: &str,
    points: &[Point],
) -> Result<(), GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyPointList {
            primitive,
            id: id.to_string(),
        });
    }
    if points.iter().any(|p| !p.is_finite()) {
        return Err(GeometryError::NonFiniteCoordinate {
            primitive,
            id: id.to_string(),
        });
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_shape(points: Vec<Point>) -> Shape {
        Shape {
            id: "shape-1".to_string(),
            points,
            fill: "#ffffff".to_string(),
            stroke: "#333333".to_string(),
            stroke_width: 1.0,
            closed: true,
            extra: Map::new(),
        }
    }

    // ── validate_color ────────────────────────────────────────────────────────

    #[test]
    fn test_validate_color_accepts_six_digit_hex() {
        assert!(validate_color("#A1B2C3").is_ok());
    }

    #[test]
    fn test_validate_color_accepts_three_digit_hex() {
        assert!(validate_color("#fff").is_ok());
    }

    #[test]
    fn test_validate_color_accepts_eight_digit_hex_with_alpha() {
        assert!(validate_color("#11223344").is_ok());
    }

    #[test]
    fn test_validate_color_rejects_missing_hash_prefix() {
        assert_eq!(
            validate_color("ffffff"),
            Err(GeometryError::InvalidColor("ffffff".to_string()))
        );
    }

    #[test]
    fn test_validate_color_rejects_non_hex_characters() {
        assert!(validate_color("#zzzzzz").is_err());
    }

    #[test]
    fn test_validate_color_rejects_wrong_length() {
        assert!(validate_color("#ffff").is_err());
    }

    // ── Shape / Polyline ──────────────────────────────────────────────────────

    #[test]
    fn test_shape_validate_succeeds_with_points_and_valid_colors() {
        let shape = make_shape(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        assert!(shape.validate().is_ok());
    }

    #[test]
    fn test_shape_validate_rejects_empty_point_list() {
        let shape = make_shape(vec![]);
        assert_eq!(
            shape.validate(),
            Err(GeometryError::EmptyPointList {
                primitive: "shape",
                id: "shape-1".to_string()
            })
        );
    }

    #[test]
    fn test_shape_validate_rejects_nan_coordinate() {
        let shape = make_shape(vec![Point::new(f64::NAN, 0.0)]);
        assert!(matches!(
            shape.validate(),
            Err(GeometryError::NonFiniteCoordinate { .. })
        ));
    }

    #[test]
    fn test_shape_validate_rejects_invalid_fill_color() {
        let mut shape = make_shape(vec![Point::new(0.0, 0.0)]);
        shape.fill = "red".to_string();
        assert!(matches!(shape.validate(), Err(GeometryError::InvalidColor(_))));
    }

    #[test]
    fn test_polyline_validate_rejects_empty_point_list() {
        let polyline = Polyline {
            id: "pl-1".to_string(),
            points: vec![],
            stroke: "#000000".to_string(),
            stroke_width: 2.0,
            extra: Map::new(),
        };
        assert!(matches!(
            polyline.validate(),
            Err(GeometryError::EmptyPointList { .. })
        ));
    }

    // ── TextLabel / ImageAnchor ───────────────────────────────────────────────

    #[test]
    fn test_text_label_validate_rejects_whitespace_only_text() {
        let label = TextLabel {
            id: "t-1".to_string(),
            position: Point::new(5.0, 5.0),
            text: "   ".to_string(),
            font_size: 14.0,
            color: "#222222".to_string(),
            extra: Map::new(),
        };
        assert_eq!(label.validate(), Err(GeometryError::EmptyText("t-1".to_string())));
    }

    #[test]
    fn test_image_anchor_validate_rejects_infinite_width() {
        let image = ImageAnchor {
            id: "img-1".to_string(),
            position: Point::new(0.0, 0.0),
            width: f64::INFINITY,
            height: 100.0,
            href: "https://example.com/plan.png".to_string(),
            extra: Map::new(),
        };
        assert!(matches!(
            image.validate(),
            Err(GeometryError::NonFiniteCoordinate { .. })
        ));
    }

    #[test]
    fn test_unknown_fields_round_trip_through_extension_bag() {
        let json = r##"{
            "id": "shape-9",
            "points": [{"x": 1.0, "y": 2.0}],
            "fill": "#eeeeee",
            "stroke": "#111111",
            "rotation": 45,
            "layerHint": "background"
        }"##;
        let shape: Shape = serde_json::from_str(json).expect("shape must parse");
        assert_eq!(shape.extra.get("rotation"), Some(&Value::from(45)));

        let out = serde_json::to_value(&shape).expect("shape must serialize");
        assert_eq!(out.get("layerHint"), Some(&Value::from("background")));
    }
}
