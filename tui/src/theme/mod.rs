//! Theme and Colors
//!
//! JetFyX palette for the terminal hero: cyan accents on the terminal's own
//! dark background.
//!
//! Terminals have no alpha channel, so translucent scene colours are faded
//! towards black instead. On a dark background this reads the same as
//! blending.

use ratatui::style::Color;
use scene_core::Rgba;

// ============================================================================
// Brand Palette
// ============================================================================

/// Signature accent cyan
pub const ACCENT_CYAN: Color = Color::Rgb(0, 216, 255);

/// Deeper cyan for secondary copy
pub const ACCENT_CYAN_DIM: Color = Color::Rgb(0, 140, 170);

/// Headline white
pub const HEADLINE_WHITE: Color = Color::Rgb(240, 244, 248);

/// Body copy gray
pub const BODY_GRAY: Color = Color::Rgb(160, 170, 180);

/// Muted gray for captions
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

// ============================================================================
// Scene Colors
// ============================================================================

/// Glow halos never get brighter than this share of their colour
pub const GLOW_STRENGTH: f64 = 0.35;

/// Below this effective alpha a cell is left untouched
pub const MIN_VISIBLE_ALPHA: f64 = 0.04;

/// Convert a scene colour to a terminal colour, fading by its alpha
pub fn fade(color: Rgba) -> Color {
    fade_by(color, color.a)
}

/// Convert a scene colour, scaled by an explicit factor instead of its alpha
pub fn fade_by(color: Rgba, factor: f64) -> Color {
    let factor = factor.clamp(0.0, 1.0);
    let channel = |c: u8| (f64::from(c) * factor).round() as u8;
    Color::Rgb(channel(color.r), channel(color.g), channel(color.b))
}

/// Halo colour for a glow around a shape
///
/// Wider blur radii spread the same light further, so they come out dimmer.
pub fn glow_color(color: Rgba, blur: f64) -> Color {
    let spread = (10.0 / blur.max(1.0)).min(1.0);
    fade_by(color, color.a * GLOW_STRENGTH * (0.5 + 0.5 * spread))
}
