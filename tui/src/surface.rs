//! Terminal Surface
//!
//! Rasterises scene draw commands into a ratatui [`Buffer`]. Each terminal
//! cell covers `cell.width × cell.height` width-units of the scene viewport,
//! and a cell is touched when its centre falls inside a shape.
//!
//! Only foreground colours are written. Untouched cells stay blank, which
//! the compositor treats as transparent, so whatever sits behind the scene
//! shows through.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use scene_core::draw::{DrawCommand, FontWeight, Glow, Point, Rgba};
use scene_core::{SceneConfig, Surface, SurfaceError, Viewport};
use unicode_width::UnicodeWidthStr;

use crate::theme::{fade, glow_color, MIN_VISIBLE_ALPHA};

/// Glyph for filled circles
const DOT: &str = "●";

/// Glyph for filled polygons
const FILL: &str = "█";

/// Glyph for glow halos
const HALO: &str = "·";

/// Text at or above this size is letter-spaced to read as display type
const DISPLAY_TEXT_PX: f64 = 24.0;

/// Width-units covered by one terminal cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl CellSize {
    #[must_use]
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            width: config.cell_width_px,
            height: config.cell_height_px,
        }
    }

    /// Scene viewport for a terminal grid
    #[must_use]
    pub fn viewport_for(self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            u32::from(cols).saturating_mul(self.width),
            u32::from(rows).saturating_mul(self.height),
        )
    }

    /// Terminal grid for a scene viewport
    #[must_use]
    pub fn grid_for(self, viewport: Viewport) -> (u16, u16) {
        let cols = viewport.width / self.width.max(1);
        let rows = viewport.height / self.height.max(1);
        (
            u16::try_from(cols).unwrap_or(u16::MAX),
            u16::try_from(rows).unwrap_or(u16::MAX),
        )
    }
}

/// Scene surface backed by a terminal cell buffer
#[derive(Debug)]
pub struct TerminalSurface {
    buffer: Buffer,
    cell: CellSize,
    viewport: Viewport,
    /// Text placed this frame as `(row, start, end)` column spans
    text_spans: Vec<(u16, u16, u16)>,
}

impl TerminalSurface {
    /// Acquire a surface covering `cols × rows` cells
    ///
    /// # Errors
    ///
    /// [`SurfaceError::ZeroArea`] when the grid is empty and
    /// [`SurfaceError::Unsupported`] when the cell size is zero.
    pub fn acquire(cols: u16, rows: u16, cell: CellSize) -> Result<Self, SurfaceError> {
        if cell.width == 0 || cell.height == 0 {
            return Err(SurfaceError::Unsupported(format!(
                "cell size {}x{} cannot map to a viewport",
                cell.width, cell.height
            )));
        }
        if cols == 0 || rows == 0 {
            return Err(SurfaceError::ZeroArea {
                width: u32::from(cols),
                height: u32::from(rows),
            });
        }
        Ok(Self {
            buffer: Buffer::empty(Rect::new(0, 0, cols, rows)),
            cell,
            viewport: cell.viewport_for(cols, rows),
            text_spans: Vec::new(),
        })
    }

    /// The rasterised frame
    #[must_use]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn cols(&self) -> u16 {
        self.buffer.area.width
    }

    fn rows(&self) -> u16 {
        self.buffer.area.height
    }

    /// Cell containing a point, if it is on the grid
    fn cell_at(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / f64::from(self.cell.width)).floor();
        let row = (y / f64::from(self.cell.height)).floor();
        (col < f64::from(self.cols()) && row < f64::from(self.rows()))
            .then_some((col as u16, row as u16))
    }

    /// Centre of a cell in width-units
    fn cell_centre(&self, col: u16, row: u16) -> Point {
        Point::new(
            (f64::from(col) + 0.5) * f64::from(self.cell.width),
            (f64::from(row) + 0.5) * f64::from(self.cell.height),
        )
    }

    /// Cells whose area overlaps a rectangle, clipped to the grid
    fn cells_in(&self, min: Point, max: Point) -> impl Iterator<Item = (u16, u16)> {
        let cw = f64::from(self.cell.width);
        let ch = f64::from(self.cell.height);
        let clamp_col = |v: f64| v.clamp(0.0, f64::from(self.cols())) as u16;
        let clamp_row = |v: f64| v.clamp(0.0, f64::from(self.rows())) as u16;
        let (c0, c1) = (clamp_col((min.x / cw).floor()), clamp_col((max.x / cw).floor() + 1.0));
        let (r0, r1) = (clamp_row((min.y / ch).floor()), clamp_row((max.y / ch).floor() + 1.0));
        (r0..r1).flat_map(move |row| (c0..c1).map(move |col| (col, row)))
    }

    fn paint(&mut self, (col, row): (u16, u16), symbol: &str, fg: Color) {
        if let Some(cell) = self.buffer.cell_mut((col, row)) {
            cell.set_symbol(symbol).set_fg(fg);
        }
    }

    /// Dim halo around a region, only on cells nothing has drawn on yet
    fn halo(&mut self, min: Point, max: Point, glow: Option<Glow>) {
        let Some(glow) = glow else {
            return;
        };
        if glow.color.a < MIN_VISIBLE_ALPHA {
            return;
        }
        let reach = glow.blur / 2.0;
        let fg = glow_color(glow.color, glow.blur);
        let cells: Vec<_> = self
            .cells_in(
                Point::new(min.x - reach, min.y - reach),
                Point::new(max.x + reach, max.y + reach),
            )
            .collect();
        for (col, row) in cells {
            if let Some(cell) = self.buffer.cell_mut((col, row)) {
                if cell.symbol() == " " {
                    cell.set_symbol(HALO).set_fg(fg);
                }
            }
        }
    }

    fn circle(&mut self, center: Point, radius: f64, fill: Rgba, glow: Option<Glow>) {
        let min = Point::new(center.x - radius, center.y - radius);
        let max = Point::new(center.x + radius, center.y + radius);
        self.halo(min, max, glow);

        let fg = fade(fill);
        let covered: Vec<_> = self
            .cells_in(min, max)
            .filter(|&(col, row)| {
                let c = self.cell_centre(col, row);
                (c.x - center.x).hypot(c.y - center.y) <= radius
            })
            .collect();
        for cell in covered {
            self.paint(cell, DOT, fg);
        }
        // Points smaller than a cell still show up
        if let Some(cell) = self.cell_at(center.x, center.y) {
            self.paint(cell, DOT, fg);
        }
    }

    fn line(&mut self, from: Point, to: Point, stroke: Rgba, glow: Option<Glow>) {
        let cw = f64::from(self.cell.width);
        let ch = f64::from(self.cell.height);
        let (dx, dy) = ((to.x - from.x) / cw, (to.y - from.y) / ch);
        let symbol = line_glyph(dx, dy);
        let steps = (dx.abs().max(dy.abs()) * 2.0).ceil().max(1.0) as usize;
        let samples: Vec<Point> = (0..=steps)
            .map(|s| from.lerp(to, s as f64 / steps as f64))
            .collect();

        for &p in &samples {
            self.halo(p, p, glow);
        }
        let fg = fade(stroke);
        for p in samples {
            if let Some(cell) = self.cell_at(p.x, p.y) {
                self.paint(cell, symbol, fg);
            }
        }
    }

    fn polygon(&mut self, points: &[Point], fill: Rgba, glow: Option<Glow>) {
        let Some((min, max)) = bounds(points) else {
            return;
        };
        self.halo(min, max, glow);

        let fg = fade(fill);
        let covered: Vec<_> = self
            .cells_in(min, max)
            .filter(|&(col, row)| {
                let c = self.cell_centre(col, row);
                contains(points, c.x, c.y)
            })
            .collect();
        if covered.is_empty() {
            let n = points.len() as f64;
            let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
            let cy = points.iter().map(|p| p.y).sum::<f64>() / n;
            if let Some(cell) = self.cell_at(cx, cy) {
                self.paint(cell, FILL, fg);
            }
            return;
        }
        for cell in covered {
            self.paint(cell, FILL, fg);
        }
    }

    fn text(&mut self, text: &str, anchor: Point, size: f64, weight: FontWeight, fill: Rgba) {
        let content = if size >= DISPLAY_TEXT_PX {
            letter_spaced(text)
        } else {
            text.to_string()
        };
        let row = (anchor.y / f64::from(self.cell.height)).floor();
        if !(0.0..f64::from(self.rows())).contains(&row) {
            return;
        }

        let width = content.width() as f64;
        let centre_col = anchor.x / f64::from(self.cell.width);
        let start = (centre_col - width / 2.0).round().max(0.0);
        if start >= f64::from(self.cols()) {
            return;
        }
        let start = start as u16;
        let end = start.saturating_add(width as u16).min(self.cols());
        let row = self.free_text_row(row as u16, start, end);
        self.text_spans.push((row, start, end));

        let mut style = Style::default().fg(fade(fill));
        if weight == FontWeight::Bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        let room = usize::from(self.cols() - start);
        self.buffer.set_stringn(start, row, &content, room, style);
    }

    /// Row for a text span, nudged one row up or down if text already
    /// covers those columns
    ///
    /// Captions a few width-units apart can land on the same cell row.
    fn free_text_row(&self, row: u16, start: u16, end: u16) -> u16 {
        let taken = |r: u16| {
            self.text_spans
                .iter()
                .any(|&(sr, ss, se)| sr == r && ss < end && start < se)
        };
        let candidates = [Some(row), row.checked_sub(1), row.checked_add(1)];
        candidates
            .into_iter()
            .flatten()
            .filter(|&r| r < self.rows())
            .find(|&r| !taken(r))
            .unwrap_or(row)
    }
}

impl Surface for TerminalSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        let (cols, rows) = self.cell.grid_for(viewport);
        self.viewport = viewport;
        self.buffer = Buffer::empty(Rect::new(0, 0, cols, rows));
        self.text_spans.clear();
    }

    fn clear(&mut self) {
        self.buffer.reset();
        self.text_spans.clear();
    }

    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Circle {
                center,
                radius,
                fill,
                glow,
            } => {
                if fill.a >= MIN_VISIBLE_ALPHA {
                    self.circle(center, radius, fill, glow);
                }
            }
            DrawCommand::Line {
                from,
                to,
                stroke,
                glow,
                ..
            } => {
                if stroke.a >= MIN_VISIBLE_ALPHA {
                    self.line(from, to, stroke, glow);
                }
            }
            DrawCommand::Polygon { points, fill, glow } => {
                if fill.a >= MIN_VISIBLE_ALPHA {
                    self.polygon(&points, fill, glow);
                }
            }
            // Halos around letters are unreadable at cell size, so text
            // glow is dropped
            DrawCommand::Text {
                text,
                anchor,
                size,
                weight,
                fill,
                ..
            } => {
                if fill.a >= MIN_VISIBLE_ALPHA {
                    self.text(&text, anchor, size, weight, fill);
                }
            }
        }
    }
}

/// Box-drawing glyph closest to a direction given in cell units
fn line_glyph(dx: f64, dy: f64) -> &'static str {
    if dx.abs() >= dy.abs() * 2.0 {
        "─"
    } else if dy.abs() >= dx.abs() * 2.0 {
        "│"
    } else if dx * dy > 0.0 {
        "╲"
    } else {
        "╱"
    }
}

fn bounds(points: &[Point]) -> Option<(Point, Point)> {
    let first = points.first()?;
    Some(points.iter().fold((*first, *first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    }))
}

/// Even-odd point-in-polygon test
fn contains(points: &[Point], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for (i, pi) in points.iter().enumerate() {
        let pj = points[j];
        if (pi.y > y) != (pj.y > y) && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn letter_spaced(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, ch) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
