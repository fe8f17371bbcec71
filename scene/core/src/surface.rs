//! Drawing Surfaces
//!
//! A surface is anything that can be cleared, resized and fed
//! [`DrawCommand`]s. The terminal host rasterises into a ratatui buffer;
//! tests and the dump tool use [`crate::RecordingSurface`].

use thiserror::Error;

use crate::draw::DrawCommand;
use crate::viewport::Viewport;

/// Errors raised while acquiring a drawing surface
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The host cannot provide a drawing context
    #[error("drawing context unavailable: {0}")]
    Unsupported(String),

    /// The surface would have no drawable area
    #[error("surface has no drawable area ({width}x{height})")]
    ZeroArea {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// A 2D drawing target owned by one animation loop
pub trait Surface {
    /// Current size in width-units
    fn viewport(&self) -> Viewport;

    /// Resize the drawing area (contents may be discarded)
    fn resize(&mut self, viewport: Viewport);

    /// Erase everything, leaving the surface fully transparent
    fn clear(&mut self);

    /// Draw one command on top of what is already there
    fn draw(&mut self, command: DrawCommand);
}
