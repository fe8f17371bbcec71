//! Custom widgets for the JetFyX terminal hero

pub mod hero_copy;

pub use hero_copy::HeroCopy;
