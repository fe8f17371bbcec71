//! Global Trading Scene
//!
//! Emits the draw commands for one frame. [`render_frame`] is a pure
//! function of `elapsed` and the surface's viewport: it clears the surface
//! and redraws everything from scratch.

use crate::draw::{DrawCommand, FontWeight, Glow, Point, Rgba, ACCENT_CYAN, WHITE};
use crate::poi::{next_index, EXCHANGES};
use crate::surface::Surface;
use crate::timeline::{self, Phase, PoiReveal};
use crate::viewport::Layout;

/// Caption shown while the scene fades in
pub const TITLE: &str = "Global Trading Infrastructure";

/// Brand wordmark
pub const WORDMARK: &str = "JetFyX";

/// First tagline line
pub const TAGLINE: &str = "Powering Brokers Worldwide";

/// Second tagline line
pub const SUBTITLE: &str = "One Platform. All Markets.";

/// Offsets of the exchange name and label above the point
const POI_NAME_OFFSET: f64 = 22.0;
const POI_LABEL_OFFSET: f64 = 8.0;

/// Offsets of the tagline lines below the wordmark
const TAGLINE_OFFSET: f64 = 28.0;
const SUBTITLE_OFFSET: f64 = 48.0;

/// Connection line styling
const LINE_WIDTH: f64 = 2.0;
const LINE_GLOW: f64 = 15.0;
const HEAD_RADIUS: f64 = 6.0;
const HEAD_GLOW: f64 = 25.0;
const JET_GLOW: f64 = 20.0;

/// Jet body outline, in units of the jet size, nose pointing along +x
const JET_BODY: [(f64, f64); 4] = [(0.6, 0.0), (-0.4, 0.15), (-0.2, 0.0), (-0.4, -0.15)];

/// Cockpit outline, in units of the jet size
const JET_COCKPIT: [(f64, f64); 3] = [(0.3, 0.0), (0.1, 0.08), (0.1, -0.08)];

/// Draw one frame of the scene
///
/// Returns the phase the frame belongs to.
pub fn render_frame<S: Surface + ?Sized>(surface: &mut S, elapsed: f64) -> Phase {
    surface.clear();

    let viewport = surface.viewport();
    if viewport.is_empty() {
        return Phase::at(elapsed);
    }

    let layout = Layout::for_viewport(viewport);

    draw_title(surface, &layout, elapsed);
    draw_exchanges(surface, &layout, elapsed);
    draw_connections(surface, &layout, elapsed);
    draw_brand(surface, &layout, elapsed);

    Phase::at(elapsed)
}

fn draw_title<S: Surface + ?Sized>(surface: &mut S, layout: &Layout, elapsed: f64) {
    if !timeline::title_visible(elapsed) {
        return;
    }
    let color = ACCENT_CYAN.with_alpha(timeline::title_opacity(elapsed) * 0.8);
    surface.draw(glowing_text(
        TITLE,
        Point::new(layout.center.x, layout.title_y),
        layout.fonts.title,
        color,
    ));
}

fn draw_exchanges<S: Surface + ?Sized>(surface: &mut S, layout: &Layout, elapsed: f64) {
    for (index, poi) in EXCHANGES.iter().enumerate() {
        let Some(reveal) = PoiReveal::at(elapsed, index) else {
            continue;
        };
        let position = layout.project(poi);

        if let Some(alpha) = reveal.text_alpha {
            surface.draw(DrawCommand::Text {
                text: poi.id.to_string(),
                anchor: Point::new(position.x, position.y - POI_NAME_OFFSET),
                size: layout.fonts.poi_name,
                weight: FontWeight::Bold,
                fill: WHITE.with_alpha(alpha),
                glow: Some(Glow::new(8.0, WHITE.with_alpha(0.5))),
            });
            surface.draw(DrawCommand::Text {
                text: poi.label.to_string(),
                anchor: Point::new(position.x, position.y - POI_LABEL_OFFSET),
                size: layout.fonts.poi_label,
                weight: FontWeight::Regular,
                fill: ACCENT_CYAN.with_alpha(alpha * 0.9),
                glow: Some(Glow::new(6.0, ACCENT_CYAN.with_alpha(0.5))),
            });
        }

        surface.draw(glowing_point(
            position,
            reveal.pulse_radius,
            ACCENT_CYAN,
            reveal.glow_blur,
        ));
    }
}

fn draw_connections<S: Surface + ?Sized>(surface: &mut S, layout: &Layout, elapsed: f64) {
    for (index, poi) in EXCHANGES.iter().enumerate() {
        let Some(progress) = timeline::connection_progress(elapsed, index) else {
            continue;
        };
        let from = layout.project(poi);
        let to = layout.project(&EXCHANGES[next_index(index)]);
        let head = from.lerp(to, progress);

        surface.draw(DrawCommand::Line {
            from,
            to: head,
            width: LINE_WIDTH,
            stroke: ACCENT_CYAN,
            glow: Some(Glow::new(LINE_GLOW, ACCENT_CYAN)),
        });

        if progress < 1.0 {
            surface.draw(glowing_point(head, HEAD_RADIUS, ACCENT_CYAN, HEAD_GLOW));
            let (body, cockpit) = jet_outline(head, to, layout.jet_size);
            surface.draw(DrawCommand::Polygon {
                points: body,
                fill: ACCENT_CYAN,
                glow: Some(Glow::new(JET_GLOW, ACCENT_CYAN)),
            });
            surface.draw(DrawCommand::Polygon {
                points: cockpit,
                fill: WHITE,
                glow: Some(Glow::new(JET_GLOW, ACCENT_CYAN)),
            });
        }
    }
}

fn draw_brand<S: Surface + ?Sized>(surface: &mut S, layout: &Layout, elapsed: f64) {
    let Some(alpha) = timeline::wordmark_alpha(elapsed) else {
        return;
    };
    let wordmark_at = Point::new(layout.center.x, layout.wordmark_y);
    surface.draw(glowing_text(
        WORDMARK,
        wordmark_at,
        layout.fonts.wordmark,
        ACCENT_CYAN.with_alpha(alpha),
    ));

    let Some(alpha) = timeline::tagline_alpha(elapsed) else {
        return;
    };
    surface.draw(DrawCommand::Text {
        text: TAGLINE.to_string(),
        anchor: Point::new(wordmark_at.x, wordmark_at.y + TAGLINE_OFFSET),
        size: layout.fonts.tagline,
        weight: FontWeight::Regular,
        fill: WHITE.with_alpha(alpha),
        glow: None,
    });
    surface.draw(DrawCommand::Text {
        text: SUBTITLE.to_string(),
        anchor: Point::new(wordmark_at.x, wordmark_at.y + SUBTITLE_OFFSET),
        size: layout.fonts.subtitle,
        weight: FontWeight::Bold,
        fill: ACCENT_CYAN.with_alpha(alpha * 0.8),
        glow: None,
    });
}

/// Bold caption glowing in its own colour
fn glowing_text(text: &str, anchor: Point, size: f64, color: Rgba) -> DrawCommand {
    DrawCommand::Text {
        text: text.to_string(),
        anchor,
        size,
        weight: FontWeight::Bold,
        fill: color,
        glow: Some(Glow::new(10.0, color)),
    }
}

fn glowing_point(center: Point, radius: f64, color: Rgba, blur: f64) -> DrawCommand {
    DrawCommand::Circle {
        center,
        radius,
        fill: color,
        glow: Some(Glow::new(blur, color)),
    }
}

/// Body and cockpit polygons of the jet at `at`, nose facing `target`
#[must_use]
pub fn jet_outline(at: Point, target: Point, size: f64) -> (Vec<Point>, Vec<Point>) {
    let angle = at.angle_to(target);
    let (sin, cos) = angle.sin_cos();
    let place = |&(u, v): &(f64, f64)| {
        let (x, y) = (u * size, v * size);
        Point::new(at.x + x * cos - y * sin, at.y + x * sin + y * cos)
    };
    (
        JET_BODY.iter().map(place).collect(),
        JET_COCKPIT.iter().map(place).collect(),
    )
}
