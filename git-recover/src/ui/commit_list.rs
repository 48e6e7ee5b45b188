//! Commit list panel.
//!
//! Each row shows the short hash, a source badge, the summary, and the date. The
//! selection is rebuilt from `SessionState::cursor` every frame, and `List` scrolls
//! so the selected row is always visible.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

use git_recover_core::{CommitRecord, CommitSource};

use crate::app::{Phase, SessionState};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

pub fn render_commit_list(frame: &mut Frame, area: Rect, state: &SessionState, theme: &Theme) {
    let title = format!("Commits ({})", state.commits().len());
    let block = panel_block(title, state.phase == Phase::Browsing, theme);

    let items: Vec<ListItem> = state
        .commits()
        .iter()
        .map(|commit| commit_item(commit, theme))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(
            Style::default()
                .fg(theme.selected)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

    let mut list_state = ListState::default().with_selected(Some(state.cursor()));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn commit_item(commit: &CommitRecord, theme: &Theme) -> ListItem<'static> {
    let badge_color = match commit.source {
        CommitSource::Dangling => theme.source_dangling,
        CommitSource::Reflog => theme.source_reflog,
    };
    ListItem::new(Line::from(vec![
        Span::styled(commit.short_hash().to_owned(), Style::default().fg(theme.hash)),
        Span::raw(" "),
        Span::styled(format!("[{}]", commit.source), Style::default().fg(badge_color)),
        Span::raw(" "),
        Span::styled(commit.message.clone(), Style::default().fg(theme.item)),
        Span::styled(format!("  {}", commit.date), Style::default().fg(theme.muted)),
    ]))
}
