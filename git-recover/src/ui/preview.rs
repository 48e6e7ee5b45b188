//! Preview pane renderer.
//!
//! Uses a `List` with manual virtual scrolling: only
//! `lines[preview_scroll..preview_scroll + viewport_height]` become `ListItem`s per
//! frame, so a multi-thousand-line `git show` costs O(viewport) to draw.

use ratatui::{
    layout::{Margin, Rect},
    style::Style,
    text::Line,
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{PreviewContent, SessionState};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

pub const LOADING_TEXT: &str = "Loading preview...";

pub fn render_preview(frame: &mut Frame, area: Rect, state: &SessionState, theme: &Theme) {
    let shown = state
        .preview
        .as_ref()
        .and_then(|preview| state.commits().iter().find(|c| c.hash == preview.hash));
    let title = match shown {
        Some(commit) if state.preview_loading() => {
            format!("Preview {} (loading)", commit.short_hash())
        }
        Some(commit) => format!("Preview {}", commit.short_hash()),
        None => "Preview".to_owned(),
    };
    frame.render_widget(panel_block(title, false, theme), area);
    let inner = area.inner(Margin { vertical: 1, horizontal: 1 });

    let Some(preview) = &state.preview else {
        let text = Line::styled(LOADING_TEXT, Style::default().fg(theme.muted));
        frame.render_widget(Paragraph::new(text), inner);
        return;
    };

    match &preview.content {
        PreviewContent::Unavailable(reason) => {
            let text = vec![
                Line::styled("Preview unavailable:", Style::default().fg(theme.error)),
                Line::styled(reason.clone(), Style::default().fg(theme.error)),
            ];
            frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
        }
        PreviewContent::Lines(lines) => {
            let total = lines.len();
            let start = usize::from(state.preview_scroll).min(total.saturating_sub(1));
            let end = (start + usize::from(inner.height)).min(total);
            let items: Vec<ListItem> = lines[start..end]
                .iter()
                .map(|line| ListItem::new(line.clone()))
                .collect();
            frame.render_widget(List::new(items), inner);
        }
    }
}
