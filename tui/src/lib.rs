//! JetFyX Terminal Hero
//!
//! Full-screen terminal host for the global trading scene: the animated
//! exchange map runs behind the JetFyX hero copy.
//!
//! # Architecture
//!
//! - **Surface**: Rasterises scene draw commands into terminal cells
//! - **Compositor**: Layered rendering, scene backdrop behind the copy
//! - **Widgets**: The hero copy block
//! - **Theme**: Brand palette and alpha fading

pub mod app;
pub mod compositor;
pub mod surface;
pub mod theme;
pub mod widgets;

pub use app::App;
