//! Colors for the dark and light themes.

use figart_core::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub focus: Color,
    pub accent: Color,
    pub error: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

impl Palette {
    pub fn for_theme(theme: ThemeName) -> Self {
        match theme {
            ThemeName::Dark => Self {
                background: Color::Reset,
                text: Color::Gray,
                muted: Color::DarkGray,
                border: Color::DarkGray,
                focus: Color::Cyan,
                accent: Color::Magenta,
                error: Color::Red,
                highlight_fg: Color::Black,
                highlight_bg: Color::Magenta,
            },
            ThemeName::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                border: Color::Gray,
                focus: Color::Blue,
                accent: Color::Magenta,
                error: Color::Red,
                highlight_fg: Color::White,
                highlight_bg: Color::Blue,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.focus } else { self.border };
        Style::default().fg(color)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_differ() {
        let dark = Palette::for_theme(ThemeName::Dark);
        let light = Palette::for_theme(ThemeName::Light);
        assert_ne!(dark, light);
        assert_eq!(light.base().bg, Some(Color::White));
    }
}
