//! Scene Core - Surface-Agnostic Global Trading Scene for JetFyX
//!
//! This crate holds everything about the looping hero animation that does
//! not depend on how it is displayed: the 32-second timeline, the responsive
//! layout, the exchange table and the animation loop lifecycle. Surfaces
//! receive plain [`DrawCommand`]s, so the same frames drive a terminal, a
//! recorder in tests or the `scene-dump` tool.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Frame Hosts                             │
//! │   ┌─────────────┐   ┌──────────────┐   ┌──────────────────┐   │
//! │   │  Terminal   │   │  scene-dump  │   │      Tests       │   │
//! │   │ (ratatui)   │   │   (JSON)     │   │ (ManualTime)     │   │
//! │   └──────┬──────┘   └──────┬───────┘   └────────┬─────────┘   │
//! │          └─────────────────┼────────────────────┘             │
//! │             request_frame / resize listeners                  │
//! └────────────────────────────┼──────────────────────────────────┘
//!                              │
//! ┌────────────────────────────┼──────────────────────────────────┐
//! │                       SCENE CORE                               │
//! │  ┌─────────────────────────┴──────────────────────────────┐   │
//! │  │                    AnimationLoop                        │   │
//! │  │  ┌────────┐  ┌──────────┐  ┌──────────┐  ┌───────────┐  │   │
//! │  │  │ Clock  │  │ Timeline │  │  Layout  │  │  Surface  │  │   │
//! │  │  │ (wrap) │  │ (phases) │  │ (mobile) │  │ (commands)│  │   │
//! │  │  └────────┘  └──────────┘  └──────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`AnimationLoop`]: One mounted instance of the scene
//! - [`FrameHost`]: Frame scheduling and resize notifications
//! - [`Surface`]: Anything that accepts draw commands
//! - [`render_frame`]: Pure per-frame renderer
//! - [`Phase`]: Which part of the timeline a frame belongs to
//!
//! # Quick Start
//!
//! ```
//! use scene_core::{AnimationLoop, ManualTime, RecordingSurface, Scheduler, Viewport};
//!
//! let host = Scheduler::new(Viewport::new(1200, 800));
//! let time = ManualTime::new();
//! let surface = RecordingSurface::new(Viewport::default());
//! let mut scene = AnimationLoop::mount(host.clone(), Ok(surface), time.clone());
//!
//! time.advance_secs(12.0);
//! if host.take_frame() {
//!     scene.on_frame();
//! }
//! assert_eq!(scene.phase().map(|p| p.name()), Some("connect"));
//! ```

pub mod animation_loop;
pub mod clock;
pub mod config;
pub mod draw;
pub mod host;
pub mod poi;
pub mod recorder;
pub mod scene;
pub mod surface;
pub mod timeline;
pub mod viewport;

pub use animation_loop::AnimationLoop;
pub use clock::{Clock, ClockSample, ManualTime, MonotonicTime, TimeSource};
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, SceneConfig,
};
pub use draw::{DrawCommand, FontWeight, Glow, Point, Rgba, ACCENT_CYAN, WHITE};
pub use host::{FrameHandle, FrameHost, ListenerHandle, Scheduler};
pub use poi::{PointOfInterest, EXCHANGES, EXCHANGE_COUNT};
pub use recorder::{CallLog, FrameStats, RecordingSurface, SurfaceCall};
pub use scene::{render_frame, SUBTITLE, TAGLINE, TITLE, WORDMARK};
pub use surface::{Surface, SurfaceError};
pub use timeline::{Phase, LOOP_SECS};
pub use viewport::{Layout, Viewport, MOBILE_BREAKPOINT};
