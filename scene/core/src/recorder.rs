//! Headless Recording Surface
//!
//! Records every surface call instead of drawing. Two runs with the same
//! elapsed time and viewport must record identical calls, which is how the
//! scene's determinism is checked.
//!
//! The call log is shared (`Rc<RefCell<..>>`) so a test can keep a handle
//! after the surface itself has been moved into an animation loop.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::draw::DrawCommand;
use crate::surface::Surface;
use crate::viewport::Viewport;

/// One recorded surface call
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum SurfaceCall {
    Resize { viewport: Viewport },
    Clear,
    Draw { command: DrawCommand },
}

/// Shared handle onto a recording surface's call history
#[derive(Clone, Debug, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<SurfaceCall>>>,
}

impl CallLog {
    /// Number of calls recorded so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    /// Copy of every recorded call
    #[must_use]
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    /// Drain the history, returning what was recorded
    pub fn take(&self) -> Vec<SurfaceCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    /// Draw commands issued since the most recent clear
    #[must_use]
    pub fn last_frame(&self) -> Vec<DrawCommand> {
        let calls = self.calls.borrow();
        let start = calls
            .iter()
            .rposition(|c| matches!(c, SurfaceCall::Clear))
            .map_or(0, |i| i + 1);
        calls[start..]
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Draw { command } => Some(command.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, call: SurfaceCall) {
        self.calls.borrow_mut().push(call);
    }
}

/// Surface that records instead of drawing
#[derive(Debug)]
pub struct RecordingSurface {
    viewport: Viewport,
    log: CallLog,
}

impl RecordingSurface {
    /// Create a recorder of the given size
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            log: CallLog::default(),
        }
    }

    /// Handle onto the call history
    #[must_use]
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.log.push(SurfaceCall::Resize { viewport });
    }

    fn clear(&mut self) {
        self.log.push(SurfaceCall::Clear);
    }

    fn draw(&mut self, command: DrawCommand) {
        self.log.push(SurfaceCall::Draw { command });
    }
}

/// Per-kind command counts for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub circles: usize,
    pub lines: usize,
    pub polygons: usize,
    pub texts: usize,
}

impl FrameStats {
    /// Count the commands of a frame
    #[must_use]
    pub fn of(commands: &[DrawCommand]) -> Self {
        commands.iter().fold(Self::default(), |mut stats, command| {
            match command {
                DrawCommand::Circle { .. } => stats.circles += 1,
                DrawCommand::Line { .. } => stats.lines += 1,
                DrawCommand::Polygon { .. } => stats.polygons += 1,
                DrawCommand::Text { .. } => stats.texts += 1,
            }
            stats
        })
    }

    /// Total number of commands
    #[must_use]
    pub fn total(&self) -> usize {
        self.circles + self.lines + self.polygons + self.texts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Point, ACCENT_CYAN};

    fn dot() -> DrawCommand {
        DrawCommand::Circle {
            center: Point::new(1.0, 2.0),
            radius: 3.0,
            fill: ACCENT_CYAN,
            glow: None,
        }
    }

    #[test]
    fn test_log_survives_move() {
        let surface = RecordingSurface::new(Viewport::new(10, 10));
        let log = surface.log();
        let mut moved = surface;
        moved.clear();
        moved.draw(dot());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_last_frame_starts_after_clear() {
        let mut surface = RecordingSurface::new(Viewport::new(10, 10));
        let log = surface.log();
        surface.clear();
        surface.draw(dot());
        surface.draw(dot());
        surface.clear();
        surface.draw(dot());
        assert_eq!(log.last_frame().len(), 1);
    }

    #[test]
    fn test_resize_is_recorded() {
        let mut surface = RecordingSurface::new(Viewport::new(10, 10));
        let log = surface.log();
        surface.resize(Viewport::new(20, 5));
        assert_eq!(surface.viewport(), Viewport::new(20, 5));
        assert_eq!(
            log.take(),
            vec![SurfaceCall::Resize {
                viewport: Viewport::new(20, 5)
            }]
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_frame_stats() {
        let stats = FrameStats::of(&[dot(), dot()]);
        assert_eq!(stats.circles, 2);
        assert_eq!(stats.total(), 2);
    }
}
