//! Centralized theme and styling.

use ratatui::style::{Color, Modifier, Style};

/// Application theme with consistent colors and styles.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Accent color for the palette and focused borders.
    pub accent: Color,
    /// Heading line color.
    pub heading: Color,
    /// Task list item color.
    pub task: Color,
    /// Image reference color.
    pub image: Color,
    /// Success messages.
    pub success: Color,
    /// Warning messages.
    pub warning: Color,
    /// Muted/secondary text color.
    pub muted: Color,
    /// Border color.
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            heading: Color::LightMagenta,
            task: Color::LightGreen,
            image: Color::LightBlue,
            success: Color::Green,
            warning: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::Gray,
        }
    }
}

impl Theme {
    /// Style for panel titles.
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for normal text.
    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Style for muted/secondary text.
    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for success messages.
    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Style for warning messages.
    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Style for borders.
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for the focused panel border.
    #[must_use]
    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for the highlighted palette row.
    #[must_use]
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    /// Style for placeholder text.
    #[must_use]
    pub fn placeholder_style(&self) -> Style {
        Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
    }

    /// Style for a document line, picked from its block prefix.
    #[must_use]
    pub fn line_style(&self, line: &str) -> Style {
        if line.starts_with('#') {
            Style::default()
                .fg(self.heading)
                .add_modifier(Modifier::BOLD)
        } else if line.starts_with("- [") {
            Style::default().fg(self.task)
        } else if line.starts_with("![") {
            Style::default().fg(self.image)
        } else {
            self.normal_style()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_style_uses_accent_and_bold() {
        let theme = Theme::default();
        let style = theme.header_style();

        assert_eq!(style.fg, Some(theme.accent));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn highlight_style_is_reversed_accent() {
        let theme = Theme::default();
        let style = theme.highlight_style();

        assert_eq!(style.fg, Some(theme.accent));
        assert!(style.add_modifier.contains(Modifier::REVERSED));
    }

    mod line_styles {
        use super::*;

        #[test]
        fn headings_are_bold() {
            let theme = Theme::default();
            let style = theme.line_style("## Plan");
            assert_eq!(style.fg, Some(theme.heading));
            assert!(style.add_modifier.contains(Modifier::BOLD));
        }

        #[test]
        fn tasks_and_images_get_their_colors() {
            let theme = Theme::default();
            assert_eq!(theme.line_style("- [ ] milk").fg, Some(theme.task));
            assert_eq!(theme.line_style("- [x] eggs").fg, Some(theme.task));
            assert_eq!(
                theme.line_style("![](https://example.com/a.png)").fg,
                Some(theme.image)
            );
        }

        #[test]
        fn plain_lines_use_normal_style() {
            let theme = Theme::default();
            assert_eq!(theme.line_style("hello"), theme.normal_style());
            assert_eq!(theme.line_style("- bullet"), theme.normal_style());
        }
    }
}
