//! Turns `git show --stat --patch` output into styled preview lines.
//!
//! Runs on the git worker threads so the event loop only ever stores finished
//! `Line<'static>` values. Code lines inside hunks are syntax highlighted by the
//! file's extension (syntect); a removed line immediately followed by an added
//! line is rendered as a word-level diff (similar) with changed words in bold.

use std::path::Path;
use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use similar::{ChangeTag, TextDiff};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::theme::Theme;

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Previews longer than this are cut off with a marker line.
pub const MAX_PREVIEW_LINES: usize = 5_000;

const SYNTAX_THEME: &str = "base16-ocean.dark";

/// Forces the syntax and theme sets to load so the first preview is not slow.
pub fn warm_up() {
    let _ = &*PS;
    let _ = &*TS;
}

/// Where in the `git show` output the parser currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Commit header, message, and `--stat` summary.
    Header,
    /// Between `diff --git` and the first `@@` of a file.
    FileMeta,
    /// Inside a hunk.
    Hunk,
}

/// Styles the complete output of `git show` for one commit.
pub fn highlight_show(text: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut out: Vec<Line<'static>> = Vec::new();
    let mut section = Section::Header;
    let mut syntax: &'static SyntaxReference = PS.find_syntax_plain_text();
    let mut highlighter: Option<HighlightLines<'static>> = None;
    let mut pending_removed: Option<(String, Vec<Span<'static>>)> = None;
    let mut truncated = false;

    for raw in text.lines() {
        if out.len() >= MAX_PREVIEW_LINES {
            truncated = true;
            break;
        }
        let line = raw.replace('\t', "    ");

        if let Some(paths) = line.strip_prefix("diff --git ") {
            flush_removed(&mut pending_removed, &mut out);
            section = Section::FileMeta;
            syntax = syntax_for_path(new_path(paths));
            out.push(styled(
                line.clone(),
                Style::default()
                    .fg(theme.diff_file_header)
                    .add_modifier(Modifier::BOLD),
            ));
            continue;
        }

        match section {
            Section::Header => out.push(header_line(line, theme)),
            Section::FileMeta | Section::Hunk if line.starts_with("@@") => {
                flush_removed(&mut pending_removed, &mut out);
                section = Section::Hunk;
                // Fresh highlighter per hunk: syntax state never leaks across hunks.
                highlighter = syntax_theme().map(|t| HighlightLines::new(syntax, t));
                out.push(styled(line, Style::default().fg(theme.diff_hunk_header)));
            }
            Section::FileMeta => out.push(styled(line, Style::default().fg(theme.muted))),
            Section::Hunk => {
                hunk_line(&line, highlighter.as_mut(), &mut pending_removed, &mut out, theme)
            }
        }
    }
    flush_removed(&mut pending_removed, &mut out);

    if truncated {
        out.truncate(MAX_PREVIEW_LINES);
        out.push(styled(
            format!("... preview truncated at {MAX_PREVIEW_LINES} lines"),
            Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
        ));
    }
    out
}

/// Styles one line of the commit header / message / stat block.
fn header_line(line: String, theme: &Theme) -> Line<'static> {
    if line.starts_with("commit ") {
        styled(
            line,
            Style::default()
                .fg(theme.preview_commit)
                .add_modifier(Modifier::BOLD),
        )
    } else if line.starts_with("Author:")
        || line.starts_with("Date:")
        || line.starts_with("Merge:")
    {
        styled(line, Style::default().fg(theme.muted))
    } else {
        Line::raw(line)
    }
}

/// Emits one hunk body line, pairing `-` lines with a following `+` line.
fn hunk_line(
    line: &str,
    highlighter: Option<&mut HighlightLines<'static>>,
    pending_removed: &mut Option<(String, Vec<Span<'static>>)>,
    out: &mut Vec<Line<'static>>,
    theme: &Theme,
) {
    let mut chars = line.chars();
    let origin = chars.next().unwrap_or(' ');
    let code = chars.as_str();
    let base_spans = match highlighter {
        Some(h) => syntax_spans(code, h),
        None => vec![Span::raw(code.to_owned())],
    };

    match origin {
        '-' => {
            flush_removed(pending_removed, out);
            let mut spans = vec![Span::styled("- ", Style::default().fg(theme.diff_removed))];
            spans.extend(base_spans);
            *pending_removed = Some((code.to_owned(), spans));
        }
        '+' => {
            if let Some((old_code, _)) = pending_removed.take() {
                let (old_words, new_words) = word_diff_spans(&old_code, code, theme);
                let mut old_spans =
                    vec![Span::styled("- ", Style::default().fg(theme.diff_removed))];
                old_spans.extend(old_words);
                out.push(Line::from(old_spans));
                let mut new_spans =
                    vec![Span::styled("+ ", Style::default().fg(theme.diff_added))];
                new_spans.extend(new_words);
                out.push(Line::from(new_spans));
            } else {
                let mut spans = vec![Span::styled("+ ", Style::default().fg(theme.diff_added))];
                spans.extend(base_spans);
                out.push(Line::from(spans));
            }
        }
        '\\' => {
            // "\ No newline at end of file"
            flush_removed(pending_removed, out);
            out.push(styled(line.to_owned(), Style::default().fg(theme.muted)));
        }
        _ => {
            flush_removed(pending_removed, out);
            let mut spans = vec![Span::styled("  ", Style::default().fg(theme.diff_context))];
            spans.extend(base_spans);
            out.push(Line::from(spans));
        }
    }
}

fn flush_removed(
    pending_removed: &mut Option<(String, Vec<Span<'static>>)>,
    out: &mut Vec<Line<'static>>,
) {
    if let Some((_, spans)) = pending_removed.take() {
        out.push(Line::from(spans));
    }
}

/// Computes word-level diff spans for a removed/added line pair.
///
/// Returns the spans for the old line and the new line. Changed words are bold;
/// unchanged words are muted.
fn word_diff_spans(
    old_line: &str,
    new_line: &str,
    theme: &Theme,
) -> (Vec<Span<'static>>, Vec<Span<'static>>) {
    let diff = TextDiff::from_words(old_line, new_line);
    let mut old_spans: Vec<Span<'static>> = Vec::new();
    let mut new_spans: Vec<Span<'static>> = Vec::new();

    for op in diff.ops() {
        for change in diff.iter_inline_changes(op) {
            for (emphasized, value) in change.iter_strings_lossy() {
                let text = value.into_owned();
                match change.tag() {
                    ChangeTag::Delete => {
                        old_spans.push(Span::styled(text, emphasis(theme.diff_removed, emphasized)))
                    }
                    ChangeTag::Insert => {
                        new_spans.push(Span::styled(text, emphasis(theme.diff_added, emphasized)))
                    }
                    ChangeTag::Equal => {
                        let span = Span::styled(text, Style::default().fg(theme.muted));
                        old_spans.push(span.clone());
                        new_spans.push(span);
                    }
                }
            }
        }
    }
    (old_spans, new_spans)
}

fn emphasis(color: Color, emphasized: bool) -> Style {
    let style = Style::default().fg(color);
    if emphasized {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Highlights one code line, falling back to a plain span on error.
fn syntax_spans(code: &str, h: &mut HighlightLines<'static>) -> Vec<Span<'static>> {
    let ranges = h.highlight_line(code, &PS).unwrap_or_default();
    let spans: Vec<Span<'static>> = ranges
        .into_iter()
        .map(|(style, text)| syntect_to_span(style, text))
        .collect();
    if spans.is_empty() {
        vec![Span::raw(code.to_owned())]
    } else {
        spans
    }
}

/// Converts a syntect (Style, &str) pair to an owned ratatui Span.
///
/// Only the foreground and font style carry over; syntect backgrounds would paint
/// over the terminal's own.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    use syntect::highlighting::FontStyle;

    let fg = style.foreground;
    let mut ratatui_style = Style::default();
    if fg.a > 0 {
        ratatui_style = ratatui_style.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.to_owned(), ratatui_style)
}

fn syntax_theme() -> Option<&'static syntect::highlighting::Theme> {
    TS.themes
        .get(SYNTAX_THEME)
        .or_else(|| TS.themes.values().next())
}

/// Picks the post-image path out of `a/<old> b/<new>`.
fn new_path(paths: &str) -> &str {
    match paths.rfind(" b/") {
        Some(idx) => &paths[idx + 3..],
        None => paths,
    }
}

fn syntax_for_path(path: &str) -> &'static SyntaxReference {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("txt");
    PS.find_syntax_by_extension(ext)
        .unwrap_or_else(|| PS.find_syntax_plain_text())
}

fn styled(text: String, style: Style) -> Line<'static> {
    Line::from(Span::styled(text, style))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW: &str = "commit aaa1111bbbb2222cccc3333dddd4444eeee5555
Author: Ada <ada@example.com>
Date:   Mon Jan 1 12:00:00 2024 +0000

    fix parser

 src/lib.rs | 2 +-
 1 file changed, 1 insertion(+), 1 deletion(-)

diff --git a/src/lib.rs b/src/lib.rs
index 1111111..2222222 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1,3 +1,3 @@
 fn main() {
-    let value = compute(alpha, beta);
+    let value = compute(alpha, gamma);
 }
\\ No newline at end of file";

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn find<'a>(lines: &'a [Line<'static>], needle: &str) -> &'a Line<'static> {
        lines
            .iter()
            .find(|l| text(l).contains(needle))
            .unwrap_or_else(|| panic!("no line containing {needle:?}"))
    }

    #[test]
    fn keeps_one_output_line_per_input_line() {
        let lines = highlight_show(SHOW, &Theme::dark());
        assert_eq!(lines.len(), SHOW.lines().count());
    }

    #[test]
    fn commit_header_uses_commit_color() {
        let theme = Theme::dark();
        let lines = highlight_show(SHOW, &theme);
        assert_eq!(lines[0].spans[0].style.fg, Some(theme.preview_commit));
        assert!(text(&lines[0]).starts_with("commit aaa1111"));
    }

    #[test]
    fn hunk_header_and_file_header_are_styled() {
        let theme = Theme::dark();
        let lines = highlight_show(SHOW, &theme);
        assert_eq!(
            find(&lines, "@@ -1,3").spans[0].style.fg,
            Some(theme.diff_hunk_header)
        );
        assert_eq!(
            find(&lines, "diff --git").spans[0].style.fg,
            Some(theme.diff_file_header)
        );
        assert_eq!(find(&lines, "index 1111111").spans[0].style.fg, Some(theme.muted));
    }

    #[test]
    fn paired_change_is_word_diffed() {
        let theme = Theme::dark();
        let lines = highlight_show(SHOW, &theme);
        let removed = find(&lines, "beta");
        assert_eq!(text(removed), "-     let value = compute(alpha, beta);");
        assert_eq!(removed.spans[0].style.fg, Some(theme.diff_removed));

        let added = find(&lines, "gamma");
        assert_eq!(text(added), "+     let value = compute(alpha, gamma);");
        let changed = added
            .spans
            .iter()
            .find(|s| s.content.contains("gamma"))
            .expect("changed word span");
        assert_eq!(changed.style.fg, Some(theme.diff_added));
        let unchanged = added
            .spans
            .iter()
            .find(|s| s.content.contains("let"))
            .expect("unchanged word span");
        assert_eq!(unchanged.style.fg, Some(theme.muted));
    }

    #[test]
    fn unpaired_addition_keeps_prefix() {
        let show = "diff --git a/notes b/notes\n@@ -0,0 +1 @@\n+hello";
        let theme = Theme::dark();
        let lines = highlight_show(show, &theme);
        let last = lines.last().expect("lines");
        assert_eq!(text(last), "+ hello");
        assert_eq!(last.spans[0].style.fg, Some(theme.diff_added));
    }

    #[test]
    fn trailing_removal_is_flushed() {
        let show = "diff --git a/a.txt b/a.txt\n@@ -1 +0,0 @@\n-gone";
        let lines = highlight_show(show, &Theme::dark());
        assert_eq!(text(lines.last().expect("lines")), "- gone");
    }

    #[test]
    fn long_previews_are_truncated() {
        let mut show = String::from("diff --git a/a.txt b/a.txt\n@@ -0,0 +1,6000 @@\n");
        for i in 0..6000 {
            show.push_str(&format!("+line {i}\n"));
        }
        let lines = highlight_show(&show, &Theme::dark());
        assert_eq!(lines.len(), MAX_PREVIEW_LINES + 1);
        assert!(text(lines.last().expect("lines")).contains("truncated"));
    }

    #[test]
    fn new_path_takes_post_image() {
        assert_eq!(new_path("a/old.rs b/new.rs"), "new.rs");
        assert_eq!(new_path("a/x b/dir/y.py"), "dir/y.py");
    }
}
