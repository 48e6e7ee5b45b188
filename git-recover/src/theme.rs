//! Color theme system for git-recover.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every surface
//! git-recover renders: the commit list, the preview pane, the branch-name prompt,
//! and the outcome screens. Two built-in themes are provided:
//!
//! - `dark`: ANSI 16 colors, works on any terminal.
//! - `catppuccin_mocha`: Catppuccin Mocha palette in RGB; requires truecolor.
//!
//! Themes carry no state. The same value is handed to the renderer and cloned
//! into each git worker for preview highlighting.

use ratatui::style::Color;
use tracing::warn;

/// All color values used across git-recover's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the pane that receives navigation keys.
    pub border_active: Color,
    /// Border color for the preview pane and inactive panels.
    pub border_inactive: Color,

    // Header
    pub title_fg: Color,
    pub title_bg: Color,

    // Commit list
    /// Foreground of the row under the cursor.
    pub selected: Color,
    /// Foreground of every other row.
    pub item: Color,
    /// Abbreviated hash column.
    pub hash: Color,
    /// Badge for commits found by `git fsck`.
    pub source_dangling: Color,
    /// Badge for commits found in the reflog.
    pub source_reflog: Color,
    /// Dates and other secondary text.
    pub muted: Color,

    // Preview pane
    /// `commit <hash>` line at the top of `git show` output.
    pub preview_commit: Color,
    /// `diff --git` file headers.
    pub diff_file_header: Color,
    /// Added lines (`+`).
    pub diff_added: Color,
    /// Removed lines (`-`).
    pub diff_removed: Color,
    /// Unchanged context lines.
    pub diff_context: Color,
    /// Hunk header lines (`@@ ... @@`).
    pub diff_hunk_header: Color,

    // Outcome and prompt
    pub success: Color,
    pub error: Color,
    /// Text caret in the branch-name prompt.
    pub caret: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            title_fg: Color::White,
            title_bg: Color::Magenta,

            selected: Color::Magenta,
            item: Color::Reset,
            hash: Color::Yellow,
            source_dangling: Color::Red,
            source_reflog: Color::Blue,
            muted: Color::DarkGray,

            preview_commit: Color::Yellow,
            diff_file_header: Color::White,
            diff_added: Color::Green,
            diff_removed: Color::Red,
            diff_context: Color::Reset,
            diff_hunk_header: Color::Cyan,

            success: Color::Green,
            error: Color::Red,
            caret: Color::White,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let teal = Color::Rgb(148, 226, 213); // #94e2d5
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let peach = Color::Rgb(250, 179, 135); // #fab387
        let rosewater = Color::Rgb(245, 224, 220); // #f5e0dc

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            title_fg: base,
            title_bg: mauve,

            selected: mauve,
            item: text,
            hash: peach,
            source_dangling: red,
            source_reflog: blue,
            muted: overlay1,

            preview_commit: yellow,
            diff_file_header: lavender,
            diff_added: green,
            diff_removed: red,
            diff_context: text,
            diff_hunk_header: teal,

            success: green,
            error: red,
            caret: rosewater,

            status_bar_bg: surface1,
            status_bar_fg: text,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                warn!(theme = %other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_both_spellings_of_catppuccin() {
        assert_eq!(Theme::from_name("catppuccin-mocha").selected, Theme::catppuccin_mocha().selected);
        assert_eq!(Theme::from_name("catppuccin_mocha").selected, Theme::catppuccin_mocha().selected);
    }

    #[test]
    fn unknown_name_falls_back_to_dark() {
        assert_eq!(Theme::from_name("solarized").selected, Theme::dark().selected);
    }
}
