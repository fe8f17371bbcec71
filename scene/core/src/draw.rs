//! Draw Commands
//!
//! The scene never talks to a drawing API directly. Each frame is emitted
//! as a list of [`DrawCommand`] values that a [`crate::Surface`] rasterises
//! (terminal buffer) or records (headless tests).
//!
//! Geometry is in surface width-units with the origin at the top-left.
//! Polygons arrive fully transformed, so surfaces never need a transform
//! stack.

use serde::Serialize;

/// Colour with straight (non-premultiplied) alpha
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity (0.0 = invisible, 1.0 = solid)
    pub a: f64,
}

impl Rgba {
    /// Opaque colour
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same colour at a different opacity (clamped to 0.0 - 1.0)
    #[must_use]
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Accent cyan used for points, lines, the jet body and the wordmark
pub const ACCENT_CYAN: Rgba = Rgba::rgb(0, 216, 255);

/// White used for exchange names, the cockpit and the tagline
pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

/// A position on the surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `to` (t = 0.0 is self, t = 1.0 is `to`)
    #[must_use]
    pub fn lerp(self, to: Point, t: f64) -> Point {
        Point::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }

    /// Angle in radians of the direction from self to `to`
    #[must_use]
    pub fn angle_to(self, to: Point) -> f64 {
        (to.y - self.y).atan2(to.x - self.x)
    }
}

/// Soft halo drawn around a shape
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Glow {
    /// Blur radius in width-units
    pub blur: f64,
    pub color: Rgba,
}

impl Glow {
    #[must_use]
    pub const fn new(blur: f64, color: Rgba) -> Self {
        Self { blur, color }
    }
}

/// Font weight for text commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// A single drawing operation
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Filled circle
    Circle {
        center: Point,
        radius: f64,
        fill: Rgba,
        glow: Option<Glow>,
    },

    /// Stroked straight line
    Line {
        from: Point,
        to: Point,
        width: f64,
        stroke: Rgba,
        glow: Option<Glow>,
    },

    /// Filled closed polygon
    Polygon {
        points: Vec<Point>,
        fill: Rgba,
        glow: Option<Glow>,
    },

    /// Text centred horizontally on `anchor`, baseline at `anchor.y`
    Text {
        text: String,
        anchor: Point,
        size: f64,
        weight: FontWeight,
        fill: Rgba,
        glow: Option<Glow>,
    },
}

impl DrawCommand {
    /// The text content, for text commands
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(ACCENT_CYAN.with_alpha(1.7).a, 1.0);
        assert_eq!(ACCENT_CYAN.with_alpha(-0.2).a, 0.0);
        assert_eq!(ACCENT_CYAN.with_alpha(0.4).r, ACCENT_CYAN.r);
    }

    #[test]
    fn test_point_lerp() {
        let a = Point::new(0.0, 10.0);
        let b = Point::new(100.0, 30.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point::new(50.0, 20.0));
    }

    #[test]
    fn test_angle_to() {
        let origin = Point::new(0.0, 0.0);
        assert!((origin.angle_to(Point::new(1.0, 0.0))).abs() < 1e-12);
        let down = origin.angle_to(Point::new(0.0, 5.0));
        assert!((down - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_text_accessor() {
        let text = DrawCommand::Text {
            text: "JetFyX".to_string(),
            anchor: Point::new(0.0, 0.0),
            size: 36.0,
            weight: FontWeight::Bold,
            fill: ACCENT_CYAN,
            glow: None,
        };
        assert_eq!(text.text(), Some("JetFyX"));
        let dot = DrawCommand::Circle {
            center: Point::new(0.0, 0.0),
            radius: 4.0,
            fill: ACCENT_CYAN,
            glow: None,
        };
        assert_eq!(dot.text(), None);
    }
}
