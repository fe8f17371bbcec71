//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. The terminal
//! host paces frames with `tokio::time::interval`; the scene core never
//! waits at all, it draws when its host asks.
//! **Exceptions**: Test code (after `#[cfg(test)]`)

use architectural_enforcement::{assert_none, find_violations};

const SLEEP_PATTERNS: &[&str] = &["::sleep(", ".sleep(", "sleep_until("];

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = Vec::new();
    for dir in ["scene/core/src", "scene/dump/src", "tui/src"] {
        violations.extend(find_violations(dir, SLEEP_PATTERNS, |_| false));
    }
    assert_none(
        "Sleep calls found in production code (use tokio::time::interval or wait on I/O)",
        &violations,
    );
}

#[test]
fn test_frame_pacing_uses_interval() {
    let app = architectural_enforcement::workspace_root().join("tui/src/app.rs");
    let content = std::fs::read_to_string(&app).unwrap();
    assert!(
        content.contains("tokio::time::interval("),
        "tui/src/app.rs must pace frames with tokio::time::interval"
    );
    assert!(
        content.contains("MissedTickBehavior::Skip"),
        "missed frame ticks must be skipped, not burst"
    );
}
