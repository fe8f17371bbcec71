//! Frame capture
//!
//! Drives a mounted [`AnimationLoop`] with hand-set time and a recording
//! surface, collecting what each frame drew.

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use scene_core::draw::DrawCommand;
use scene_core::{
    AnimationLoop, FrameStats, ManualTime, Phase, RecordingSurface, Scheduler, Viewport,
};
use serde::Serialize;
use tracing::debug;

/// What to capture
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DumpRequest {
    pub viewport: Viewport,
    /// Time of the first frame, seconds after mount
    pub start: f64,
    pub frames: u32,
    /// Seconds between frames
    pub step: f64,
}

impl DumpRequest {
    fn validate(&self) -> Result<()> {
        if !self.start.is_finite() || self.start < 0.0 {
            bail!("--elapsed must be a non-negative number, got {}", self.start);
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            bail!("--step must be a positive number, got {}", self.step);
        }
        if self.frames == 0 {
            bail!("--frames must be at least 1");
        }
        // Frame times only grow, so the last one bounds them all
        mount_offset(self.frame_time(self.frames - 1))?;
        Ok(())
    }

    fn frame_time(&self, index: u32) -> f64 {
        self.start + f64::from(index) * self.step
    }
}

/// Time since mount as a clock reading
fn mount_offset(at: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(at)
        .with_context(|| format!("frame time {at}s is out of range"))
}

/// One captured frame
#[derive(Clone, Debug, Serialize)]
pub struct FrameDump {
    /// Seconds since mount
    pub at: f64,
    /// Seconds into the loop the frame was drawn for
    pub elapsed: f64,
    pub phase: Option<Phase>,
    pub stats: FrameStats,
    pub commands: Vec<DrawCommand>,
}

/// Capture the requested frames
///
/// # Errors
///
/// Returns an error if the request has a negative start, a non-positive
/// step, no frames, or frame times too large for the clock.
pub fn capture(request: &DumpRequest) -> Result<Vec<FrameDump>> {
    request.validate()?;

    let host = Scheduler::new(request.viewport);
    let time = ManualTime::new();
    let surface = RecordingSurface::new(request.viewport);
    let log = surface.log();
    let mut scene = AnimationLoop::mount(host.clone(), Ok(surface), time.clone());

    let mut dumps = Vec::with_capacity(request.frames as usize);
    for index in 0..request.frames {
        let at = request.frame_time(index);
        time.set(mount_offset(at)?);

        if !host.take_frame() {
            debug!(at, "No frame requested, skipping");
            continue;
        }
        scene.on_frame();

        let commands = log.last_frame();
        dumps.push(FrameDump {
            at,
            elapsed: scene.elapsed(),
            phase: scene.phase(),
            stats: FrameStats::of(&commands),
            commands,
        });
    }

    scene.unmount();
    Ok(dumps)
}

/// One line per frame: time, phase and command counts
#[must_use]
pub fn summarize(dumps: &[FrameDump]) -> String {
    let mut out = String::new();
    for dump in dumps {
        let phase = dump.phase.map_or("-", Phase::name);
        let texts: Vec<&str> = dump.commands.iter().filter_map(DrawCommand::text).collect();
        let _ = writeln!(
            out,
            "t={:>7.3} loop={:>6.3} {:<7} circles={} lines={} polygons={} texts={} {:?}",
            dump.at,
            dump.elapsed,
            phase,
            dump.stats.circles,
            dump.stats.lines,
            dump.stats.polygons,
            dump.stats.texts,
            texts,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(start: f64, frames: u32, step: f64) -> DumpRequest {
        DumpRequest {
            viewport: Viewport::new(1200, 800),
            start,
            frames,
            step,
        }
    }

    #[test]
    fn test_captures_each_frame() {
        let dumps = capture(&request(1.0, 4, 3.0)).unwrap();
        assert_eq!(dumps.len(), 4);
        let phases: Vec<_> = dumps.iter().filter_map(|d| d.phase).collect();
        assert_eq!(
            phases,
            vec![Phase::Title, Phase::Reveal, Phase::Reveal, Phase::Connect]
        );
        assert_eq!(dumps[0].commands.len(), dumps[0].stats.total());
    }

    #[test]
    fn test_frames_past_loop_end_wrap() {
        let dumps = capture(&request(31.0, 2, 1.0)).unwrap();
        assert_eq!(dumps[0].phase, Some(Phase::Brand));
        assert_eq!(dumps[1].elapsed, 0.0);
        assert_eq!(dumps[1].phase, Some(Phase::Title));
    }

    #[test]
    fn test_rejects_bad_requests() {
        assert!(capture(&request(-1.0, 1, 1.0)).is_err());
        assert!(capture(&request(0.0, 0, 1.0)).is_err());
        assert!(capture(&request(0.0, 1, 0.0)).is_err());
    }

    #[test]
    fn test_rejects_times_beyond_the_clock() {
        let err = capture(&request(1e20, 1, 1.0)).unwrap_err();
        assert!(err.to_string().contains("out of range"));

        // Start is fine, but later frames overflow
        assert!(capture(&request(0.0, 3, 1e19)).is_err());
        assert!(capture(&request(f64::MAX, 2, f64::MAX)).is_err());
    }

    #[test]
    fn test_summary_lists_texts() {
        let dumps = capture(&request(0.5, 1, 1.0)).unwrap();
        let summary = summarize(&dumps);
        assert_eq!(summary.lines().count(), 1);
        assert!(summary.contains("title"));
        assert!(summary.contains("Global Trading Infrastructure"));
    }

    #[test]
    fn test_json_shape() {
        let dumps = capture(&request(10.5, 1, 1.0)).unwrap();
        let json = serde_json::to_value(&dumps).unwrap();
        assert_eq!(json[0]["phase"], "connect");
        let kinds: Vec<&str> = json[0]["commands"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["kind"].as_str())
            .collect();
        assert!(kinds.contains(&"polygon"));
    }
}
