//! Layered Compositor
//!
//! Stacks the scene backdrop and the foreground copy. Each layer has its own
//! buffer and is blitted back to front; blank cells are holes, so the scene
//! shows between the letters of the copy and the copy is never hidden behind
//! an opaque scene fill.

mod layer;

use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub use layer::Layer;

/// Unique identifier for a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

/// The compositor manages all layers and composites them together
pub struct Compositor {
    /// All layers by ID
    layers: HashMap<LayerId, Layer>,
    /// Layers sorted by z-index for rendering
    render_order: Vec<LayerId>,
    /// Next layer ID to assign
    next_id: u32,
    /// Output buffer (composited result)
    output: Buffer,
    /// Total area
    area: Rect,
}

impl Compositor {
    /// Create a new compositor for the given area
    pub fn new(area: Rect) -> Self {
        Self {
            layers: HashMap::new(),
            render_order: Vec::new(),
            next_id: 0,
            output: Buffer::empty(area),
            area,
        }
    }

    /// Create a new layer and return its ID
    pub fn create_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        let layer = Layer::new(id, bounds, z_index);
        self.layers.insert(id, layer);
        self.update_render_order();

        id
    }

    /// Get mutable access to a layer's buffer for rendering
    pub fn layer_buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layers.get_mut(&id).map(|l| &mut l.buffer)
    }

    /// Move a layer to a new position
    pub fn move_layer(&mut self, id: LayerId, x: u16, y: u16) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.bounds.x = x;
            layer.bounds.y = y;
        }
    }

    /// Resize a layer, discarding its contents
    pub fn resize_layer(&mut self, id: LayerId, width: u16, height: u16) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.bounds.width = width;
            layer.bounds.height = height;
            // Buffer uses origin coordinates
            layer.buffer = Buffer::empty(Rect::new(0, 0, width, height));
        }
    }

    /// Set layer visibility
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.visible = visible;
        }
    }

    /// Include or exclude a layer from mouse hit-testing
    pub fn set_interactive(&mut self, id: LayerId, interactive: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.interactive = interactive;
        }
    }

    /// Resize the entire compositor
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.output = Buffer::empty(area);
    }

    /// Composite all visible layers into the output buffer
    pub fn composite(&mut self) -> &Buffer {
        self.output.reset();

        // Back to front
        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                if layer.visible {
                    Self::blit_layer(&mut self.output, &self.area, layer);
                }
            }
        }

        &self.output
    }

    /// Blit a layer onto the output buffer, skipping blank cells
    fn blit_layer(output: &mut Buffer, area: &Rect, layer: &Layer) {
        let lb = &layer.bounds;

        for ly in 0..lb.height {
            for lx in 0..lb.width {
                let dst_x = lb.x.saturating_add(lx);
                let dst_y = lb.y.saturating_add(ly);

                if dst_x >= area.width || dst_y >= area.height {
                    continue;
                }

                let Some(src_cell) = layer.buffer.cell((lx, ly)) else {
                    continue;
                };

                // Blank cells are holes in the layer
                if src_cell.symbol() != " " {
                    if let Some(dst_cell) = output.cell_mut((dst_x, dst_y)) {
                        *dst_cell = src_cell.clone();
                    }
                }
            }
        }
    }

    /// Find the topmost interactive layer at a given position (for mouse events)
    ///
    /// Non-interactive layers are skipped so clicks fall through them.
    pub fn layer_at(&self, x: u16, y: u16) -> Option<LayerId> {
        // Front to back
        self.render_order
            .iter()
            .rev()
            .filter_map(|id| self.layers.get(id))
            .find(|layer| layer.visible && layer.interactive && layer.contains(x, y))
            .map(|layer| layer.id)
    }

    /// Update render order based on z-indices
    fn update_render_order(&mut self) {
        self.render_order = self.layers.keys().copied().collect();
        self.render_order
            .sort_by_key(|id| self.layers.get(id).map_or(0, |l| l.z_index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    fn area() -> Rect {
        Rect::new(0, 0, 10, 3)
    }

    #[test]
    fn test_front_layer_wins_where_drawn() {
        let mut compositor = Compositor::new(area());
        let back = compositor.create_layer(area(), 0);
        let front = compositor.create_layer(area(), 10);

        if let Some(buf) = compositor.layer_buffer_mut(back) {
            buf.set_string(0, 0, "··········", Style::default());
        }
        if let Some(buf) = compositor.layer_buffer_mut(front) {
            buf.set_string(2, 0, "Hi", Style::default());
        }

        let out = compositor.composite();
        let row: String = (0..10)
            .filter_map(|x| out.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect();
        assert_eq!(row, "··Hi······");
    }

    #[test]
    fn test_hidden_layer_not_drawn() {
        let mut compositor = Compositor::new(area());
        let layer = compositor.create_layer(area(), 0);
        if let Some(buf) = compositor.layer_buffer_mut(layer) {
            buf.set_string(0, 1, "x", Style::default());
        }
        compositor.set_visible(layer, false);
        let out = compositor.composite();
        assert_eq!(out.cell((0, 1)).map(|c| c.symbol()), Some(" "));
    }

    #[test]
    fn test_hit_testing_skips_non_interactive() {
        let mut compositor = Compositor::new(area());
        let copy = compositor.create_layer(Rect::new(0, 0, 5, 3), 0);
        let backdrop = compositor.create_layer(area(), 10);
        compositor.set_interactive(backdrop, false);

        assert_eq!(compositor.layer_at(1, 1), Some(copy));
        assert_eq!(compositor.layer_at(8, 1), None);
    }

    #[test]
    fn test_offset_layer_clipped_to_area() {
        let mut compositor = Compositor::new(area());
        let layer = compositor.create_layer(Rect::new(8, 2, 4, 1), 0);
        if let Some(buf) = compositor.layer_buffer_mut(layer) {
            buf.set_string(0, 0, "abcd", Style::default());
        }
        let out = compositor.composite();
        assert_eq!(out.cell((8, 2)).map(|c| c.symbol()), Some("a"));
        assert_eq!(out.cell((9, 2)).map(|c| c.symbol()), Some("b"));
    }
}
