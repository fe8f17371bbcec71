//! Main Application
//!
//! The App struct hosts the global trading scene in the terminal:
//! - Event loop (keyboard, mouse, resize) and frame ticks
//! - Scheduler acting as the scene's frame host
//! - Compositor stacking the scene backdrop behind the hero copy
//!
//! # Frame Flow
//!
//! ```text
//! interval tick ──> Scheduler::take_frame ──> AnimationLoop::on_frame
//!                                                  │ draw commands
//!                                                  v
//!                         TerminalSurface buffer ──> backdrop layer (z 0)
//!                                HeroCopy widget ──> copy layer     (z 10)
//!                                                  │ composite
//!                                                  v
//!                                              terminal
//! ```

use std::io;

use crossterm::event::{
    self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::Widget;
use ratatui::Terminal;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use scene_core::{
    AnimationLoop, FrameHost, MonotonicTime, Phase, SceneConfig, Scheduler, TimeSource,
};

use crate::compositor::{Compositor, LayerId};
use crate::surface::{CellSize, TerminalSurface};
use crate::widgets::HeroCopy;

/// Margin between the copy and the terminal edge
const COPY_MARGIN: u16 = 2;

/// Share of the width given to the copy on wide terminals
const COPY_WIDTH_PERCENT: u32 = 45;

struct AppLayers {
    backdrop: LayerId,
    copy: LayerId,
}

/// Main application state
pub struct App<T: TimeSource = MonotonicTime> {
    /// Whether the app is running
    running: bool,
    config: SceneConfig,
    cell: CellSize,
    compositor: Compositor,
    layers: AppLayers,
    /// Frame host shared with the scene
    host: Scheduler,
    scene: AnimationLoop<TerminalSurface, T, Scheduler>,
    /// Copy only changes on resize
    copy_dirty: bool,
}

impl App<MonotonicTime> {
    /// Create an app for a terminal of `size` cells
    pub fn new(size: (u16, u16), config: SceneConfig) -> Self {
        Self::with_time(size, config, MonotonicTime::new())
    }
}

impl<T: TimeSource> App<T> {
    /// Create an app driven by an explicit time source
    pub fn with_time(size: (u16, u16), config: SceneConfig, time: T) -> Self {
        let (cols, rows) = size;
        let area = Rect::new(0, 0, cols, rows);
        let cell = CellSize::from_config(&config);
        let viewport = cell.viewport_for(cols, rows);

        let mut compositor = Compositor::new(area);

        // Backdrop: full screen, never the target of clicks
        let backdrop = compositor.create_layer(area, 0);
        compositor.set_interactive(backdrop, false);

        let copy = compositor.create_layer(copy_bounds(area, viewport.is_mobile()), 10);
        compositor.set_visible(copy, config.show_copy);

        let host = Scheduler::new(viewport);
        let surface = TerminalSurface::acquire(cols, rows, cell);
        let scene = AnimationLoop::mount(host.clone(), surface, time);

        info!(
            cols,
            rows,
            width = viewport.width,
            height = viewport.height,
            fps = config.target_fps,
            "Terminal hero started"
        );

        Self {
            running: true,
            config,
            cell,
            compositor,
            layers: AppLayers { backdrop, copy },
            host,
            scene,
            copy_dirty: true,
        }
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // A slow frame drops ticks instead of bursting to catch up
        let mut frames = tokio::time::interval(self.config.frame_interval());
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => {
                        warn!(error = %e, "Terminal event stream failed");
                        self.running = false;
                    }
                    None => self.running = false,
                },

                _ = frames.tick() => self.tick(),
            }

            self.render(terminal)?;
        }

        self.shutdown();
        Ok(())
    }

    /// Whether the app should keep running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Phase of the last scene frame
    pub fn phase(&self) -> Option<Phase> {
        self.scene.phase()
    }

    /// Dispatch one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => self.handle_resize(w, h),
            _ => {}
        }
    }

    /// Run the scene if the host has a frame due
    pub fn tick(&mut self) {
        if self.host.take_frame() {
            self.scene.on_frame();
        }
    }

    /// Tear the scene down
    pub fn shutdown(&mut self) {
        if self.scene.unmount().is_some() {
            info!(frames = self.scene.frames_drawn(), "Terminal hero stopped");
        }
        self.running = false;
    }

    fn handle_key(&mut self, key: event::KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: event::MouseEvent) {
        if let MouseEventKind::Down(_) = mouse.kind {
            match self.compositor.layer_at(mouse.column, mouse.row) {
                Some(id) if id == self.layers.copy => {
                    debug!(x = mouse.column, y = mouse.row, "Click on hero copy");
                }
                _ => trace!(x = mouse.column, y = mouse.row, "Click on empty space"),
            }
        }
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        let area = Rect::new(0, 0, width, height);
        let viewport = self.cell.viewport_for(width, height);

        self.compositor.resize(area);
        self.compositor
            .resize_layer(self.layers.backdrop, width, height);

        let copy = copy_bounds(area, viewport.is_mobile());
        self.compositor.move_layer(self.layers.copy, copy.x, copy.y);
        self.compositor
            .resize_layer(self.layers.copy, copy.width, copy.height);
        self.copy_dirty = true;

        // Only a mounted scene is listening
        if self.host.resize(viewport) {
            self.scene.on_resize(viewport);
        }
    }

    /// Render the UI
    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.render_backdrop();
        self.render_copy();

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            frame.buffer_mut().merge(output);
        })?;

        Ok(())
    }

    /// Copy the scene's last frame onto the backdrop layer
    fn render_backdrop(&mut self) {
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.backdrop) else {
            return;
        };
        buf.reset();
        if let Some(surface) = self.scene.surface() {
            buf.merge(surface.buffer());
        }
    }

    fn render_copy(&mut self) {
        if !self.copy_dirty {
            return;
        }
        let mobile = self.host.viewport().is_mobile();
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.copy) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        let alignment = if mobile {
            Alignment::Center
        } else {
            Alignment::Left
        };
        HeroCopy::new().alignment(alignment).render(area, buf);
        self.copy_dirty = false;
    }
}

/// Where the copy goes: left column on wide terminals, bottom on narrow ones
fn copy_bounds(area: Rect, mobile: bool) -> Rect {
    if mobile {
        let width = area.width.saturating_sub(COPY_MARGIN * 2);
        let height = HeroCopy::height(width).min(area.height);
        Rect::new(
            COPY_MARGIN.min(area.width),
            area.height - height,
            width,
            height,
        )
    } else {
        let width = u32::from(area.width) * COPY_WIDTH_PERCENT / 100;
        let width = u16::try_from(width).unwrap_or(area.width);
        let height = HeroCopy::height(width).min(area.height);
        Rect::new(
            COPY_MARGIN.min(area.width),
            (area.height - height) / 2,
            width,
            height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseButton, MouseEvent};
    use ratatui::backend::TestBackend;
    use scene_core::{ManualTime, Surface, Viewport};

    fn app(size: (u16, u16)) -> (App<ManualTime>, ManualTime) {
        let time = ManualTime::new();
        let app = App::with_time(size, SceneConfig::default(), time.clone());
        (app, time)
    }

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect()
            })
            .collect()
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_quit_keys() {
        for event in [
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            key(KeyCode::Esc, KeyModifiers::NONE),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let (mut app, _) = app((120, 40));
            app.handle_event(event);
            assert!(!app.is_running());
        }

        let (mut app, _) = app((120, 40));
        app.handle_event(key(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(app.is_running());
    }

    #[test]
    fn test_tick_draws_when_frame_due() {
        let (mut app, time) = app((120, 40));
        time.advance_secs(12.0);
        app.tick();
        assert_eq!(app.phase(), Some(Phase::Connect));
    }

    #[test]
    fn test_render_composites_scene_and_copy() {
        let (mut app, time) = app((120, 40));
        time.advance_secs(31.0);
        app.tick();

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        app.render(&mut terminal).unwrap();
        let rows = screen(&terminal);

        assert!(rows.iter().any(|r| r.contains("J e t F y X")));
        assert!(rows.iter().any(|r| r.contains("Book a Live Demo")));
    }

    #[test]
    fn test_copy_can_be_hidden() {
        let mut config = SceneConfig::default();
        config.show_copy = false;
        let mut app = App::with_time((120, 40), config, ManualTime::new());
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        app.render(&mut terminal).unwrap();
        assert!(!screen(&terminal).iter().any(|r| r.contains("Book a Live Demo")));
    }

    #[test]
    fn test_resize_reaches_scene() {
        let (mut app, _) = app((120, 40));
        app.handle_event(Event::Resize(60, 40));
        assert_eq!(
            app.scene.surface().map(Surface::viewport),
            Some(Viewport::new(480, 640))
        );
    }

    #[test]
    fn test_shutdown_releases_host() {
        let (mut app, _) = app((120, 40));
        app.shutdown();
        assert_eq!(app.host.listener_count(), 0);
        assert_eq!(app.host.pending_frames(), 0);
        assert!(!app.is_running());

        // Late events are harmless
        app.handle_event(Event::Resize(80, 24));
        app.tick();
        assert!(app.scene.surface().is_none());
    }

    #[test]
    fn test_empty_terminal_leaves_scene_inert() {
        let (mut app, _) = app((0, 0));
        app.tick();
        assert_eq!(app.phase(), None);
        assert_eq!(app.host.listener_count(), 0);
    }

    #[test]
    fn test_clicks_fall_through_backdrop() {
        let (mut app, _) = app((120, 40));
        let click = |column, row| {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            })
        };
        app.handle_event(click(110, 5));
        assert_eq!(app.compositor.layer_at(110, 5), None);
        let copy = copy_bounds(Rect::new(0, 0, 120, 40), false);
        assert_eq!(
            app.compositor.layer_at(copy.x, copy.y),
            Some(app.layers.copy)
        );
    }

    #[test]
    fn test_copy_bounds_follow_breakpoint() {
        let wide = copy_bounds(Rect::new(0, 0, 120, 40), false);
        assert_eq!(wide.x, COPY_MARGIN);
        assert_eq!(wide.width, 54);
        assert!(wide.y > 0);

        let narrow = copy_bounds(Rect::new(0, 0, 60, 40), true);
        assert_eq!(narrow.width, 56);
        assert_eq!(narrow.y + narrow.height, 40);
    }
}
