//! Scene Timeline
//!
//! Pure functions mapping elapsed seconds to phase progress. Nothing here
//! holds state: the same `elapsed` always yields the same values, which is
//! what lets a dropped frame go unnoticed.
//!
//! ```text
//!  0s      2s                 10s             ~22s            28s  29.5s  32s
//!  |title--|                   |                               |      |     |
//!          |POI 0..7 reveal, 0.8s apart (each 2s)              |      |     |
//!                              |connections, 1.8s apart (each 1.8s)   |     |
//!                                                              |mark--|tag--|
//!                                                                         wrap
//! ```

use serde::Serialize;

/// Length of one full loop
pub const LOOP_SECS: f64 = 32.0;

/// Title caption fade-in window (the title is only drawn inside it)
pub const TITLE_FADE_SECS: f64 = 2.0;

/// When the first exchange starts revealing
pub const REVEAL_START_SECS: f64 = 2.0;

/// Delay between consecutive exchange reveals
pub const REVEAL_STAGGER_SECS: f64 = 0.8;

/// Length of one exchange's reveal window
pub const REVEAL_WINDOW_SECS: f64 = 2.0;

/// Reveal progress after which exchange text starts fading in
pub const TEXT_REVEAL_THRESHOLD: f64 = 0.3;

/// When connections start flying
pub const CONNECT_START_SECS: f64 = 10.0;

/// Duration of one connection, which is also the stagger between them
pub const CONNECTION_SECS: f64 = 1.8;

/// When the wordmark starts fading in
pub const WORDMARK_START_SECS: f64 = 28.0;

/// Wordmark fade-in window
pub const WORDMARK_FADE_SECS: f64 = 1.5;

/// When the tagline starts fading in
pub const TAGLINE_START_SECS: f64 = 29.5;

/// Tagline fade-in window
pub const TAGLINE_FADE_SECS: f64 = 1.0;

/// The latest phase that has begun at a given moment
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Title caption fading in
    Title,
    /// Exchanges appearing one by one
    Reveal,
    /// Connections flying between exchanges
    Connect,
    /// Wordmark and tagline
    Brand,
}

impl Phase {
    /// Classify a moment of the loop
    #[must_use]
    pub fn at(elapsed: f64) -> Self {
        if elapsed >= WORDMARK_START_SECS {
            Self::Brand
        } else if elapsed >= CONNECT_START_SECS {
            Self::Connect
        } else if elapsed >= REVEAL_START_SECS {
            Self::Reveal
        } else {
            Self::Title
        }
    }

    /// Lowercase name for logs
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Reveal => "reveal",
            Self::Connect => "connect",
            Self::Brand => "brand",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ratio of `numerator` over `window`, capped at 1.0
fn ramp(numerator: f64, window: f64) -> f64 {
    (numerator / window).min(1.0)
}

/// Title opacity, `min(elapsed / 2, 1)`
///
/// Reaches 1.0 exactly at the end of the fade window, the same moment the
/// title stops being drawn (see [`title_visible`]).
#[must_use]
pub fn title_opacity(elapsed: f64) -> f64 {
    ramp(elapsed, TITLE_FADE_SECS)
}

/// Whether the title caption is drawn
#[must_use]
pub fn title_visible(elapsed: f64) -> bool {
    elapsed < TITLE_FADE_SECS
}

/// When exchange `index` starts revealing
#[must_use]
pub fn reveal_start(index: usize) -> f64 {
    REVEAL_START_SECS + index as f64 * REVEAL_STAGGER_SECS
}

/// State of one exchange's reveal at a given moment
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PoiReveal {
    /// Progress through the 2s reveal window (0.0 - 1.0)
    pub progress: f64,
    /// Radius of the pulsing point
    pub pulse_radius: f64,
    /// Glow blur of the pulsing point
    pub glow_blur: f64,
    /// Opacity of the name/label text, once past the threshold
    pub text_alpha: Option<f64>,
}

impl PoiReveal {
    /// Reveal state of exchange `index`, or `None` before its window opens
    ///
    /// The pulse oscillates with `sin(elapsed * k + index)`, so neighbouring
    /// exchanges never pulse in step.
    #[must_use]
    pub fn at(elapsed: f64, index: usize) -> Option<Self> {
        let start = reveal_start(index);
        if elapsed < start {
            return None;
        }

        let phase_offset = index as f64;
        let progress = ramp(elapsed - start, REVEAL_WINDOW_SECS);
        let text_alpha = (progress > TEXT_REVEAL_THRESHOLD)
            .then(|| ramp(progress - TEXT_REVEAL_THRESHOLD, 1.0 - TEXT_REVEAL_THRESHOLD));

        Some(Self {
            progress,
            pulse_radius: 4.0 + (elapsed * 3.0 + phase_offset).sin() * 2.0,
            glow_blur: 20.0 + (elapsed * 2.0 + phase_offset).sin() * 10.0,
            text_alpha,
        })
    }
}

/// When connection `index` starts, relative to [`CONNECT_START_SECS`]
#[must_use]
pub fn connection_start(index: usize) -> f64 {
    index as f64 * CONNECTION_SECS
}

/// Progress of the connection from exchange `index` to the next one
///
/// `None` until the connection has started; then a value in 0.0 - 1.0 that
/// stays at 1.0 once the line is complete.
#[must_use]
pub fn connection_progress(elapsed: f64, index: usize) -> Option<f64> {
    if elapsed < CONNECT_START_SECS {
        return None;
    }
    let local = elapsed - CONNECT_START_SECS - connection_start(index);
    (local >= 0.0).then(|| ramp(local, CONNECTION_SECS).max(0.0))
}

/// Wordmark opacity, or `None` before it starts
#[must_use]
pub fn wordmark_alpha(elapsed: f64) -> Option<f64> {
    (elapsed >= WORDMARK_START_SECS)
        .then(|| ramp(elapsed - WORDMARK_START_SECS, WORDMARK_FADE_SECS))
}

/// Tagline opacity, or `None` before it starts
#[must_use]
pub fn tagline_alpha(elapsed: f64) -> Option<f64> {
    (elapsed >= TAGLINE_START_SECS).then(|| ramp(elapsed - TAGLINE_START_SECS, TAGLINE_FADE_SECS))
}
