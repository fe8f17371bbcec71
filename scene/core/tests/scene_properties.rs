//! Behavioural properties of the scene, checked through the public API.
//!
//! Every test drives time by hand, so nothing here depends on wall-clock
//! timing.

use pretty_assertions::assert_eq;
use scene_core::draw::{DrawCommand, FontWeight};
use scene_core::recorder::FrameStats;
use scene_core::{
    render_frame, AnimationLoop, ManualTime, Phase, RecordingSurface, Scheduler, Surface,
    SurfaceCall, Viewport, EXCHANGES, TITLE, WORDMARK,
};

const DESKTOP: Viewport = Viewport::new(1200, 800);
const MOBILE: Viewport = Viewport::new(500, 900);

fn frame_at(elapsed: f64, viewport: Viewport) -> Vec<DrawCommand> {
    let mut surface = RecordingSurface::new(viewport);
    let log = surface.log();
    render_frame(&mut surface, elapsed);
    log.last_frame()
}

fn texts(commands: &[DrawCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|c| c.text().map(str::to_string))
        .collect()
}

/// Bold exchange identifiers in draw order (labels are regular weight)
fn exchange_names_at(elapsed: f64) -> Vec<String> {
    let ids: Vec<&str> = EXCHANGES.iter().map(|p| p.id).collect();
    frame_at(elapsed, DESKTOP)
        .into_iter()
        .filter_map(|c| match c {
            DrawCommand::Text {
                text,
                weight: FontWeight::Bold,
                ..
            } if ids.contains(&text.as_str()) => Some(text),
            _ => None,
        })
        .collect()
}

fn title_alpha(commands: &[DrawCommand]) -> Option<f64> {
    commands.iter().find_map(|c| match c {
        DrawCommand::Text { text, fill, .. } if text == TITLE => Some(fill.a),
        _ => None,
    })
}

#[test]
fn test_same_moment_draws_the_same_frame() {
    for elapsed in [0.0, 1.3, 5.75, 11.2, 19.9, 29.8, 31.99] {
        assert_eq!(frame_at(elapsed, DESKTOP), frame_at(elapsed, DESKTOP));
        assert_eq!(frame_at(elapsed, MOBILE), frame_at(elapsed, MOBILE));
    }
}

#[test]
fn test_title_hands_over_to_reveal_at_two_seconds() {
    let eps = 1e-6;
    let before = frame_at(2.0 - eps, DESKTOP);
    assert_eq!(texts(&before), vec![TITLE.to_string()]);
    let alpha = title_alpha(&before).unwrap();
    assert!((alpha - (2.0 - eps) / 2.0 * 0.8).abs() < 1e-12);
    assert!(alpha < 0.8);

    let halfway = title_alpha(&frame_at(1.0, DESKTOP)).unwrap();
    assert!((halfway - 0.4).abs() < 1e-12);

    assert_eq!(Phase::at(2.0 - 1e-6), Phase::Title);

    let after = frame_at(2.0, DESKTOP);
    assert!(!texts(&after).contains(&TITLE.to_string()));
    assert_eq!(Phase::at(2.0), Phase::Reveal);
    // First exchange just appeared: point only, no text yet
    assert_eq!(after.len(), 1);
    assert!(matches!(after[0], DrawCommand::Circle { .. }));
}

#[test]
fn test_exchanges_reveal_in_order() {
    // JPX is 0.79s into its window, past the 30% text threshold
    assert_eq!(exchange_names_at(4.39), vec!["NYSE", "LSE", "JPX"]);
    // Exchange 3 exists from 4.4s but its name waits for 30% progress
    let at_4_41 = frame_at(4.41, DESKTOP);
    assert_eq!(FrameStats::of(&at_4_41).circles, 4);
    let all: Vec<String> = EXCHANGES.iter().map(|p| p.id.to_string()).collect();
    assert_eq!(exchange_names_at(9.7), all);
}

#[test]
fn test_no_connections_before_ten_seconds() {
    for elapsed in [2.0, 6.0, 9.6, 9.999] {
        let stats = FrameStats::of(&frame_at(elapsed, DESKTOP));
        assert_eq!(stats.lines, 0, "line drawn at {elapsed}");
        assert_eq!(stats.polygons, 0, "jet drawn at {elapsed}");
    }
    assert_eq!(FrameStats::of(&frame_at(10.0, DESKTOP)).lines, 1);
}

#[test]
fn test_last_connection_starts_at_twenty_two_point_six() {
    // Connection 6 is still landing, so one jet is in flight either side
    let before = FrameStats::of(&frame_at(22.59, DESKTOP));
    assert_eq!(before.lines, 7);
    assert_eq!(before.polygons, 2);

    let after = FrameStats::of(&frame_at(22.61, DESKTOP));
    assert_eq!(after.lines, 8);
    assert_eq!(after.polygons, 2);

    let landed = FrameStats::of(&frame_at(24.5, DESKTOP));
    assert_eq!(landed.lines, 8);
    assert_eq!(landed.polygons, 0);
}

#[test]
fn test_brand_appears_at_twenty_eight_seconds() {
    assert!(!texts(&frame_at(27.99, DESKTOP)).contains(&WORDMARK.to_string()));
    assert!(texts(&frame_at(28.0, DESKTOP)).contains(&WORDMARK.to_string()));
}

#[test]
fn test_layout_switches_at_breakpoint() {
    let title_anchor = |viewport| match frame_at(1.0, viewport).first() {
        Some(DrawCommand::Text { anchor, size, .. }) => (anchor.x, *size),
        other => panic!("expected title, got {other:?}"),
    };

    let (mobile_x, mobile_size) = title_anchor(MOBILE);
    assert!((mobile_x - 250.0).abs() < 1e-9);
    assert_eq!(mobile_size, 14.0);
    let (desktop_x, desktop_size) = title_anchor(DESKTOP);
    assert!((desktop_x - 840.0).abs() < 1e-9);
    assert_eq!(desktop_size, 18.0);
    assert_eq!(title_anchor(Viewport::new(767, 900)).1, 14.0);
    assert_eq!(title_anchor(Viewport::new(768, 900)).1, 18.0);
}

#[test]
fn test_loop_wraps_back_to_the_first_frame() {
    let host = Scheduler::new(DESKTOP);
    let time = ManualTime::new();
    let surface = RecordingSurface::new(Viewport::default());
    let log = surface.log();
    let mut scene = AnimationLoop::mount(host.clone(), Ok(surface), time.clone());

    time.advance_secs(31.5);
    assert!(host.take_frame());
    scene.on_frame();
    assert_eq!(scene.phase(), Some(Phase::Brand));

    time.advance_secs(0.5);
    assert!(host.take_frame());
    scene.on_frame();
    assert_eq!(scene.wraps(), 1);
    assert_eq!(log.last_frame(), frame_at(0.0, DESKTOP));

    time.advance_secs(1.0);
    assert!(host.take_frame());
    scene.on_frame();
    assert_eq!(log.last_frame(), frame_at(1.0, DESKTOP));
}

#[test]
fn test_nothing_reaches_the_surface_after_unmount() {
    let host = Scheduler::new(DESKTOP);
    let time = ManualTime::new();
    let surface = RecordingSurface::new(Viewport::default());
    let log = surface.log();
    let mut scene = AnimationLoop::mount(host.clone(), Ok(surface), time.clone());

    time.advance_secs(3.0);
    scene.on_frame();
    let returned = scene.unmount();
    assert!(returned.is_some());
    let recorded = log.len();

    // A frame or resize that was already in flight arrives late
    time.advance_secs(1.0);
    assert!(!scene.on_frame());
    assert!(!host.resize(Viewport::new(640, 480)));
    scene.on_resize(Viewport::new(640, 480));

    assert_eq!(log.len(), recorded);
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.listener_count(), 0);
}

#[test]
fn test_resize_reaches_the_surface_while_mounted() {
    let host = Scheduler::new(DESKTOP);
    let surface = RecordingSurface::new(Viewport::default());
    let log = surface.log();
    let mut scene = AnimationLoop::mount(host.clone(), Ok(surface), ManualTime::new());

    assert!(host.resize(MOBILE));
    scene.on_resize(MOBILE);
    assert_eq!(scene.surface().map(Surface::viewport), Some(MOBILE));
    assert_eq!(
        log.calls().last(),
        Some(&SurfaceCall::Resize { viewport: MOBILE })
    );
}
