//! UI rendering for git-recover.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. It reads the session by shared reference and never
//! talks to git. Layout arithmetic lives in `layout.rs`; the two panels live in
//! `commit_list.rs` and `preview.rs`.

pub mod commit_list;
pub mod keybindings;
pub mod layout;
pub mod preview;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Wrap},
    Frame,
};

use crate::app::{Phase, SessionState};
use crate::input::TextInput;
use crate::theme::Theme;
use layout::{compute_layout, render_header, render_status_bar};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const EXIT_HINT: &str = "Press any key to exit.";

/// Renders one complete frame for the current phase.
pub fn render(frame: &mut Frame, state: &SessionState, theme: &Theme) {
    match &state.phase {
        Phase::Succeeded { message, branch } => {
            let lines = vec![
                Line::styled(
                    message.clone(),
                    Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
                ),
                Line::from(vec![
                    Span::raw("Branch: "),
                    Span::styled(branch.clone(), Style::default().fg(theme.hash)),
                ]),
            ];
            render_outcome(frame, lines, theme);
        }
        Phase::Failed { error } => {
            let lines = vec![Line::styled(
                format!("Error: {error}"),
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            )];
            render_outcome(frame, lines, theme);
        }
        Phase::Browsing | Phase::NamingBranch { .. } | Phase::Recovering { .. } => {
            render_session(frame, state, theme)
        }
    }
}

fn render_session(frame: &mut Frame, state: &SessionState, theme: &Theme) {
    let areas = compute_layout(frame.area(), &state.phase, state.viewport);

    render_header(frame, areas.header, state, theme);
    commit_list::render_commit_list(frame, areas.list, state, theme);
    if let Some(area) = areas.preview {
        preview::render_preview(frame, area, state, theme);
    }

    if let Some(area) = areas.footer {
        match &state.phase {
            Phase::NamingBranch { input } => render_prompt(frame, area, state, input, theme),
            Phase::Recovering { branch } => render_spinner(frame, area, state, branch, theme),
            _ => {}
        }
    }

    render_status_bar(frame, areas.status, state, theme);
}

/// Branch-name prompt: which commit, the buffer with its caret, and the key hint.
fn render_prompt(
    frame: &mut Frame,
    area: Rect,
    state: &SessionState,
    input: &TextInput,
    theme: &Theme,
) {
    let commit = state.selected();
    let block = Block::bordered()
        .title("New branch")
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(theme.border_active));
    frame.render_widget(block, area);

    let (before, under, after) = input.split_at_caret();
    let caret_style = Style::default().bg(theme.caret).fg(theme.title_bg);
    let caret = match under {
        Some(c) => Span::styled(c.to_string(), caret_style),
        None => Span::styled(" ", caret_style),
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("Recover "),
            Span::styled(commit.short_hash().to_owned(), Style::default().fg(theme.hash)),
            Span::raw(" "),
            Span::styled(commit.message.clone(), Style::default().fg(theme.item)),
        ]),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.border_active)),
            Span::raw(before.to_owned()),
            caret,
            Span::raw(after.to_owned()),
        ]),
        Line::styled("(esc to cancel, enter to confirm)", Style::default().fg(theme.muted)),
    ];
    let inner = area.inner(Margin { vertical: 1, horizontal: 1 });
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_spinner(frame: &mut Frame, area: Rect, state: &SessionState, branch: &str, theme: &Theme) {
    let glyph = SPINNER[state.tick % SPINNER.len()];
    let line = Line::from(vec![
        Span::styled(format!(" {glyph} "), Style::default().fg(theme.border_active)),
        Span::raw("Recovering... "),
        Span::styled(format!("creating {branch}"), Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Final screen: outcome lines plus the exit hint, centred.
fn render_outcome(frame: &mut Frame, mut lines: Vec<Line<'static>>, theme: &Theme) {
    lines.push(Line::raw(""));
    lines.push(Line::styled(EXIT_HINT, Style::default().fg(theme.muted)));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let [_, middle, _] = frame.area().layout(&Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ]));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        middle,
    );
}
