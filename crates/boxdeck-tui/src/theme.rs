//! Color palettes (Catppuccin Mocha and Latte)

use boxdeck_config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Styles used by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title: Color,
    pub text: Color,
    pub border: Color,
    pub header: Color,
    /// ID and Image columns
    pub accent: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    /// Session name in the footer
    pub footer_name: Color,
    pub subtle: Color,
}

impl Theme {
    pub fn mocha() -> Self {
        Self {
            title: Color::Rgb(0x89, 0xb4, 0xfa),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            border: Color::Rgb(0x31, 0x32, 0x44),
            header: Color::Rgb(0xa6, 0xe3, 0xa1),
            accent: Color::Rgb(0xcb, 0xa6, 0xf7),
            highlight_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            highlight_bg: Color::Rgb(0x31, 0x32, 0x44),
            footer_name: Color::Rgb(0xeb, 0xa0, 0xac),
            subtle: Color::Rgb(0xfa, 0xb3, 0x87),
        }
    }

    pub fn latte() -> Self {
        Self {
            title: Color::Rgb(0x1e, 0x66, 0xf5),
            text: Color::Rgb(0x4c, 0x4f, 0x69),
            border: Color::Rgb(0x18, 0x18, 0x25),
            header: Color::Rgb(0x40, 0xa0, 0x2b),
            accent: Color::Rgb(0x88, 0x39, 0xef),
            highlight_fg: Color::Rgb(0xe6, 0xe9, 0xef),
            highlight_bg: Color::Rgb(0x6c, 0x6f, 0x85),
            footer_name: Color::Rgb(0xe6, 0x45, 0x53),
            subtle: Color::Rgb(0xfe, 0x64, 0x0b),
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Mocha => Self::mocha(),
            ThemeName::Latte => Self::latte(),
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::DIM)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default().fg(self.highlight_fg).bg(self.highlight_bg)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}
