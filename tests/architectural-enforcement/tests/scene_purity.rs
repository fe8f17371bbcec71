//! Integration Test: Scene Purity
//!
//! **Policy**: A frame is a pure function of elapsed time and viewport.
//! The scene core MUST NOT use randomness, and only the loop clock may read
//! the system clock. The core also MUST NOT depend on any terminal or async
//! runtime crate, so every host drives it the same way.

use std::path::Path;

use architectural_enforcement::{assert_none, find_violations};

const SCENE_CORE: &str = "scene/core/src";

fn is_loop_clock(path: &Path) -> bool {
    path.ends_with("clock.rs")
}

#[test]
fn test_no_randomness_in_scene() {
    let violations = find_violations(
        SCENE_CORE,
        &["rand::", "thread_rng", "fastrand", "getrandom"],
        |_| false,
    );
    assert_none("Randomness found in the scene core", &violations);
}

#[test]
fn test_clock_reads_only_in_loop_clock() {
    let violations = find_violations(
        SCENE_CORE,
        &["Instant::now", "SystemTime::now", "UNIX_EPOCH"],
        is_loop_clock,
    );
    assert_none(
        "System clock read outside clock.rs (inject a TimeSource instead)",
        &violations,
    );
}

#[test]
fn test_hosts_read_time_through_time_source() {
    let violations = find_violations("tui/src", &["Instant::now", "SystemTime::now"], |_| false);
    assert_none(
        "Terminal host reads the clock directly (use scene_core::MonotonicTime)",
        &violations,
    );
}

#[test]
fn test_scene_core_is_surface_agnostic() {
    let violations = find_violations(
        SCENE_CORE,
        &["ratatui", "crossterm", "tokio"],
        |_| false,
    );
    assert_none(
        "Scene core depends on a terminal or async runtime",
        &violations,
    );
}
