//! Screen layout for git-recover.
//!
//! Pure layout arithmetic, recomputed inside `terminal.draw()` on every render so
//! each frame reflects the current terminal size.
//!
//! ```text
//! ┌ header ────────────────────────────────────────────┐
//! ├ commits ───────────────┬ preview (>= 80 cols) ─────┤
//! │                        │                           │
//! ├ prompt (naming) / spinner (recovering) ────────────┤
//! └ status bar ────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use crate::app::{Phase, SessionState, Viewport};
use crate::theme::Theme;

/// Narrowest terminal that still gets the preview pane.
pub const PREVIEW_MIN_WIDTH: u16 = 80;

/// Rows taken by the branch-name prompt (border + three lines).
const PROMPT_HEIGHT: u16 = 5;

/// Rects for one frame. Only valid inside the current draw closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    pub list: Rect,
    pub preview: Option<Rect>,
    /// Prompt box while naming, spinner row while recovering.
    pub footer: Option<Rect>,
    pub status: Rect,
}

/// Whether the preview pane is shown for this viewport.
pub fn shows_preview(viewport: Option<Viewport>) -> bool {
    viewport.is_some_and(|v| v.width >= PREVIEW_MIN_WIDTH)
}

/// Splits `area` for the browsing phases.
pub fn compute_layout(area: Rect, phase: &Phase, viewport: Option<Viewport>) -> ScreenAreas {
    let footer_height = match phase {
        Phase::NamingBranch { .. } => PROMPT_HEIGHT,
        Phase::Recovering { .. } => 1,
        _ => 0,
    };

    let [header, main, footer, status] = area.layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(footer_height),
        Constraint::Length(1),
    ]));

    let (list, preview) = if shows_preview(viewport) {
        let [list, preview] = main.layout(
            &Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .spacing(Spacing::Overlap(1)),
        );
        (list, Some(preview))
    } else {
        (main, None)
    };

    ScreenAreas {
        header,
        list,
        preview,
        footer: (footer_height > 0).then_some(footer),
        status,
    }
}

/// Builds a bordered panel. The active panel gets a thick border.
///
/// `MergeStrategy::Fuzzy` joins the shared column between list and preview;
/// `Exact` produces broken junctions when thick and plain borders meet.
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_active: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_active {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_active { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// One-row title bar with the commit count.
pub fn render_header(frame: &mut Frame, area: Rect, state: &SessionState, theme: &Theme) {
    let count = state.commits().len();
    let noun = if count == 1 { "commit" } else { "commits" };
    let line = Line::from(vec![
        Span::styled(" git-recover ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {count} recoverable {noun}")),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(theme.title_fg).bg(theme.title_bg)),
        area,
    );
}

/// One-row key-hint bar. Never blank.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &SessionState, theme: &Theme) {
    let hints: &[(&str, &str)] = match state.phase {
        Phase::Browsing => &[
            ("↑/k ↓/j", "move"),
            ("enter", "recover"),
            ("pgup/pgdn", "scroll preview"),
            ("q", "quit"),
        ],
        Phase::NamingBranch { .. } => &[("enter", "create branch"), ("esc", "back"), ("ctrl-c", "quit")],
        Phase::Recovering { .. } => &[("", "please wait")],
        Phase::Succeeded { .. } | Phase::Failed { .. } => &[("any key", "exit")],
    };

    let key_style = Style::default().fg(theme.status_bar_fg).add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::raw(" ")];
    for (key, action) in hints {
        if !key.is_empty() {
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::raw(*action));
        spans.push(Span::raw("  "));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(width: u16, height: u16) -> Rect {
        Rect::new(0, 0, width, height)
    }

    #[test]
    fn wide_terminal_splits_list_and_preview() {
        let viewport = Some(Viewport { width: 120, height: 40 });
        let areas = compute_layout(area(120, 40), &Phase::Browsing, viewport);
        let preview = areas.preview.expect("preview pane");
        assert!(areas.list.width >= 59 && preview.width >= 59);
        assert_eq!(areas.header.height, 1);
        assert_eq!(areas.status.height, 1);
        assert!(areas.footer.is_none());
    }

    #[test]
    fn narrow_or_unknown_viewport_shows_list_only() {
        let narrow = Some(Viewport { width: 79, height: 40 });
        assert!(compute_layout(area(79, 40), &Phase::Browsing, narrow).preview.is_none());
        assert!(compute_layout(area(120, 40), &Phase::Browsing, None).preview.is_none());
    }

    #[test]
    fn recovering_reserves_spinner_row() {
        let phase = Phase::Recovering { branch: "b".to_owned() };
        let areas = compute_layout(area(60, 20), &phase, None);
        assert_eq!(areas.footer.map(|r| r.height), Some(1));
    }
}
