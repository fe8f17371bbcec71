//! HeroCopy Widget
//!
//! The marketing copy that sits in front of the scene: badge, headline,
//! pitch, call-to-action buttons and the three highlights.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::theme::{ACCENT_CYAN, ACCENT_CYAN_DIM, BODY_GRAY, DIM_GRAY, HEADLINE_WHITE};

pub const BADGE: &str = "ONE PLUG-AND-PLAY TRADING STACK";
pub const HEADLINE: &str = "One unified trading stack for modern Forex brokers";
pub const PITCH: &str = "Replace 6–8 vendors with one powerful system.";
pub const PROMISE: &str = "Launch faster. Operate leaner. Scale smarter.";
pub const PRIMARY_CTA: &str = "Book a Live Demo";
pub const SECONDARY_CTA: &str = "Talk to Our Team";

/// Title and caption of each highlight
pub const HIGHLIGHTS: [(&str, &str); 3] = [
    ("Fast Launch", "Go live in weeks, not months"),
    ("Risk-First", "Compliant & secure operations"),
    ("One System", "Replace fragmented tools"),
];

/// One rendered line of copy
struct CopyLine {
    text: String,
    style: Style,
}

impl CopyLine {
    fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn blank() -> Self {
        Self::new("", Style::default())
    }
}

/// Foreground hero copy
pub struct HeroCopy {
    alignment: Alignment,
}

impl HeroCopy {
    pub fn new() -> Self {
        Self {
            alignment: Alignment::Left,
        }
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Rows the copy needs at a given width
    pub fn height(width: u16) -> u16 {
        u16::try_from(Self::lines(width).len()).unwrap_or(u16::MAX)
    }

    fn lines(width: u16) -> Vec<CopyLine> {
        let width = usize::from(width.max(1));
        let wrapped = |text: &str, style: Style| -> Vec<CopyLine> {
            wrap(text, width)
                .into_iter()
                .map(|cow| CopyLine::new(cow.into_owned(), style))
                .collect()
        };

        let mut lines = Vec::new();
        lines.extend(wrapped(
            &format!("◆ {BADGE}"),
            Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD),
        ));
        lines.push(CopyLine::blank());
        lines.extend(wrapped(
            HEADLINE,
            Style::default()
                .fg(HEADLINE_WHITE)
                .add_modifier(Modifier::BOLD),
        ));
        lines.push(CopyLine::blank());
        lines.extend(wrapped(PITCH, Style::default().fg(BODY_GRAY)));
        lines.extend(wrapped(PROMISE, Style::default().fg(ACCENT_CYAN_DIM)));
        lines.push(CopyLine::blank());

        let buttons = format!("[ {PRIMARY_CTA} → ]  [ {SECONDARY_CTA} ]");
        if buttons.width() <= width {
            lines.push(CopyLine::new(
                buttons,
                Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD),
            ));
        } else {
            lines.push(CopyLine::new(
                format!("[ {PRIMARY_CTA} → ]"),
                Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD),
            ));
            lines.push(CopyLine::new(
                format!("[ {SECONDARY_CTA} ]"),
                Style::default().fg(ACCENT_CYAN),
            ));
        }
        lines.push(CopyLine::blank());

        for (title, caption) in HIGHLIGHTS {
            lines.extend(wrapped(
                &format!("{title} · {caption}"),
                Style::default().fg(DIM_GRAY),
            ));
        }
        lines
    }
}

impl Default for HeroCopy {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for HeroCopy {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, line) in Self::lines(area.width)
            .iter()
            .take(usize::from(area.height))
            .enumerate()
        {
            let line_width = u16::try_from(line.text.width()).unwrap_or(area.width);
            let x = match self.alignment {
                Alignment::Center => area.x + area.width.saturating_sub(line_width) / 2,
                Alignment::Right => area.x + area.width.saturating_sub(line_width),
                Alignment::Left => area.x,
            };
            let y = area.y + i as u16;
            buf.set_stringn(x, y, &line.text, usize::from(area.width), line.style);
        }
    }
}
