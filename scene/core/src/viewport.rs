//! Viewport and Responsive Layout
//!
//! The viewport is the only input besides elapsed time. Everything the scene
//! positions or sizes is derived here, once per frame.

use serde::Serialize;

use crate::draw::Point;
use crate::poi::PointOfInterest;

/// Widths below this use the centred mobile layout
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Normalized extent the exchange map is fitted into
const MAP_EXTENT: f64 = 190.0;

/// Horizontal stretch applied to normalized POI offsets
const MAP_STRETCH_X: f64 = 5.0;

/// Vertical stretch applied to normalized POI offsets
const MAP_STRETCH_Y: f64 = 3.5;

/// Size of the drawing surface in width-units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the mobile layout applies
    #[must_use]
    pub const fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT
    }

    /// Whether there is anything to draw on
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Font sizes for every text element of the scene
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FontSizes {
    pub title: f64,
    pub poi_name: f64,
    pub poi_label: f64,
    pub wordmark: f64,
    pub tagline: f64,
    pub subtitle: f64,
}

impl FontSizes {
    const MOBILE: Self = Self {
        title: 14.0,
        poi_name: 13.0,
        poi_label: 11.0,
        wordmark: 24.0,
        tagline: 11.0,
        subtitle: 10.0,
    };

    const DESKTOP: Self = Self {
        title: 18.0,
        poi_name: 16.0,
        poi_label: 13.0,
        wordmark: 36.0,
        tagline: 15.0,
        subtitle: 13.0,
    };
}

/// Per-frame layout computed from the viewport
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Layout {
    pub viewport: Viewport,
    pub mobile: bool,
    /// Anchor of the exchange map
    pub center: Point,
    /// Map scale factor
    pub scale: f64,
    /// Baseline of the title caption
    pub title_y: f64,
    /// Baseline of the brand wordmark
    pub wordmark_y: f64,
    /// Length of the jet marker
    pub jet_size: f64,
    pub fonts: FontSizes,
}

impl Layout {
    /// Compute the layout for a viewport
    ///
    /// Mobile layouts centre the map; desktop layouts push it to the right
    /// and upper part of the surface, leaving room for foreground copy.
    #[must_use]
    pub fn for_viewport(viewport: Viewport) -> Self {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let mobile = viewport.is_mobile();

        let (center, max_width) = if mobile {
            (Point::new(width / 2.0, height / 2.0), width * 0.85)
        } else {
            (Point::new(width * 0.7, height * 0.35), width * 0.35)
        };
        let max_height = height * 0.6;
        let scale = max_width.min(max_height) / MAP_EXTENT;

        let (title_y, wordmark_y) = if mobile {
            (center.y - height * 0.35, center.y + height * 0.25)
        } else {
            (center.y - height * 0.25, center.y + height * 0.18)
        };

        Self {
            viewport,
            mobile,
            center,
            scale,
            title_y,
            wordmark_y,
            jet_size: if mobile { 25.0 } else { 50.0 },
            fonts: if mobile {
                FontSizes::MOBILE
            } else {
                FontSizes::DESKTOP
            },
        }
    }

    /// Screen position of an exchange
    #[must_use]
    pub fn project(&self, poi: &PointOfInterest) -> Point {
        Point::new(
            self.center.x + (poi.x - 50.0) * self.scale * MAP_STRETCH_X,
            self.center.y + (poi.y - 50.0) * self.scale * MAP_STRETCH_Y,
        )
    }
}
