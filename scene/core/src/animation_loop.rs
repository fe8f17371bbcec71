//! Animation Loop
//!
//! Owns the surface, the loop clock and the host registrations for one
//! mounted instance of the scene.
//!
//! # Lifecycle
//!
//! ```text
//! mount ──ok──> Running ──unmount/drop──> TornDown
//!   │              │ on_frame: sample clock, redraw, request next frame
//!   │              │ on_resize: resize surface
//!   └──err──> Inert (no listener, no frames, no drawing)
//! ```
//!
//! Teardown removes the resize listener and cancels the pending frame
//! before the surface is released. Callbacks arriving afterwards find no
//! surface and return without side effects.

use tracing::{debug, trace};

use crate::clock::{Clock, TimeSource};
use crate::host::{FrameHandle, FrameHost, ListenerHandle};
use crate::scene::render_frame;
use crate::surface::{Surface, SurfaceError};
use crate::timeline::Phase;
use crate::viewport::Viewport;

enum LoopState<S> {
    Running {
        surface: S,
        resize_listener: ListenerHandle,
        pending_frame: Option<FrameHandle>,
    },
    Inert,
    TornDown,
}

/// A mounted global trading scene
pub struct AnimationLoop<S: Surface, T: TimeSource, H: FrameHost> {
    state: LoopState<S>,
    host: H,
    time: T,
    clock: Clock,
    /// Phase of the last drawn frame
    phase: Option<Phase>,
    frames_drawn: u64,
}

impl<S: Surface, T: TimeSource, H: FrameHost> AnimationLoop<S, T, H> {
    /// Mount the scene on a host
    ///
    /// `surface` is the result of acquiring a drawing context. On success
    /// the surface is sized to the host viewport, a resize listener is
    /// registered, the loop clock starts and the first frame is requested.
    /// On failure the loop stays inert and never draws.
    pub fn mount(host: H, surface: Result<S, SurfaceError>, time: T) -> Self {
        let clock = Clock::starting_at(time.now());

        let state = match surface {
            Ok(mut surface) => {
                let viewport = host.viewport();
                surface.resize(viewport);
                let resize_listener = host.add_resize_listener();
                let pending_frame = Some(host.request_frame());
                debug!(
                    width = viewport.width,
                    height = viewport.height,
                    "Scene mounted"
                );
                LoopState::Running {
                    surface,
                    resize_listener,
                    pending_frame,
                }
            }
            Err(e) => {
                debug!(error = %e, "No drawing surface, scene stays inert");
                LoopState::Inert
            }
        };

        Self {
            state,
            host,
            time,
            clock,
            phase: None,
            frames_drawn: 0,
        }
    }

    /// Run one frame
    ///
    /// Returns `true` if the frame was drawn. Inert and torn-down loops
    /// return `false` without touching anything.
    pub fn on_frame(&mut self) -> bool {
        let LoopState::Running {
            surface,
            pending_frame,
            ..
        } = &mut self.state
        else {
            trace!("Frame callback without a live surface ignored");
            return false;
        };

        if let Some(stale) = pending_frame.take() {
            self.host.cancel_frame(stale);
        }

        let sample = self.clock.sample(self.time.now());
        if sample.wrapped {
            debug!(wraps = self.clock.wraps(), "Scene loop restarted");
        }

        let phase = render_frame(surface, sample.elapsed);
        if self.phase != Some(phase) {
            debug!(phase = %phase, elapsed = sample.elapsed, "Scene phase changed");
            self.phase = Some(phase);
        }
        self.frames_drawn += 1;

        *pending_frame = Some(self.host.request_frame());
        true
    }

    /// Handle a viewport resize
    pub fn on_resize(&mut self, viewport: Viewport) {
        match &mut self.state {
            LoopState::Running { surface, .. } => {
                trace!(
                    width = viewport.width,
                    height = viewport.height,
                    "Scene surface resized"
                );
                surface.resize(viewport);
            }
            _ => trace!("Resize without a live surface ignored"),
        }
    }

    /// Tear the scene down, returning its surface
    ///
    /// Removes the resize listener and cancels the pending frame. Safe to
    /// call more than once; later calls return `None`.
    pub fn unmount(&mut self) -> Option<S> {
        match std::mem::replace(&mut self.state, LoopState::TornDown) {
            LoopState::Running {
                surface,
                resize_listener,
                pending_frame,
            } => {
                self.host.remove_resize_listener(resize_listener);
                if let Some(frame) = pending_frame {
                    self.host.cancel_frame(frame);
                }
                debug!(frames_drawn = self.frames_drawn, "Scene unmounted");
                Some(surface)
            }
            LoopState::Inert | LoopState::TornDown => None,
        }
    }

    /// Whether the loop is mounted with a live surface
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// Whether mounting failed to acquire a surface
    #[must_use]
    pub fn is_inert(&self) -> bool {
        matches!(self.state, LoopState::Inert)
    }

    /// The live surface, if any
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        match &self.state {
            LoopState::Running { surface, .. } => Some(surface),
            _ => None,
        }
    }

    /// Seconds into the current loop as of now
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed_at(self.time.now())
    }

    /// Phase of the most recent frame
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Frames drawn since mount
    #[must_use]
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Completed loops since mount
    #[must_use]
    pub fn wraps(&self) -> u64 {
        self.clock.wraps()
    }
}

impl<S: Surface, T: TimeSource, H: FrameHost> Drop for AnimationLoop<S, T, H> {
    fn drop(&mut self) {
        let _ = self.unmount();
    }
}
