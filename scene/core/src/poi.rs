//! Points of Interest
//!
//! The eight exchanges the scene visits, in the order they are revealed and
//! connected. Positions are normalized to a 100x100 grid centred on (50, 50)
//! and projected onto the surface by [`crate::viewport::Layout`].

use serde::Serialize;

/// A named exchange on the schematic map
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PointOfInterest {
    /// Short identifier drawn in bold above the point (e.g. "NYSE")
    pub id: &'static str,
    /// Normalized x position (0.0 - 100.0)
    pub x: f64,
    /// Normalized y position (0.0 - 100.0)
    pub y: f64,
    /// City label drawn under the identifier
    pub label: &'static str,
}

impl PointOfInterest {
    const fn new(id: &'static str, x: f64, y: f64, label: &'static str) -> Self {
        Self { id, x, y, label }
    }
}

/// Number of exchanges in the loop
pub const EXCHANGE_COUNT: usize = 8;

/// The fixed exchange sequence. Connections run from each entry to the next,
/// wrapping from the last back to the first.
pub const EXCHANGES: [PointOfInterest; EXCHANGE_COUNT] = [
    PointOfInterest::new("NYSE", 51.5, 35.0, "New York"),
    PointOfInterest::new("LSE", 71.5, 45.0, "London"),
    PointOfInterest::new("JPX", 81.5, 65.0, "Tokyo"),
    PointOfInterest::new("HKEX", 71.5, 85.0, "Hong Kong"),
    PointOfInterest::new("BSE", 51.5, 95.0, "Mumbai"),
    PointOfInterest::new("Tadawul", 31.5, 85.0, "Riyadh"),
    PointOfInterest::new("Euronext", 21.5, 65.0, "Europe"),
    PointOfInterest::new("NASDAQ", 31.5, 45.0, "NASDAQ"),
];

/// Index of the exchange a connection from `index` flies to
#[must_use]
pub const fn next_index(index: usize) -> usize {
    (index + 1) % EXCHANGE_COUNT
}
