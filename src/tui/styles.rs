//! Color palette and preset styles for the terminal UI.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::BpCategory;

/// Palette used by every view.
pub struct Theme;

impl Theme {
    /// Teal accent for focus and key hints
    pub const ACCENT: Color = Color::Rgb(45, 212, 191); // #2DD4BF

    /// Darker teal for focused borders
    pub const ACCENT_DARK: Color = Color::Rgb(13, 148, 136); // #0D9488

    /// Systolic bar (blue)
    pub const SYSTOLIC: Color = Color::Rgb(59, 130, 246); // #3B82F6

    /// Diastolic bar (green)
    pub const DIASTOLIC: Color = Color::Rgb(16, 185, 129); // #10B981

    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT_DARK)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn systolic_bar() -> Style {
        Style::default().fg(Self::SYSTOLIC)
    }

    #[must_use]
    pub fn diastolic_bar() -> Style {
        Style::default().fg(Self::DIASTOLIC)
    }

    /// Style for a pressure category badge.
    #[must_use]
    pub fn category(category: BpCategory) -> Style {
        let color = match category {
            BpCategory::Normal => Self::DIASTOLIC,
            BpCategory::Elevated | BpCategory::Stage1 => Self::WARNING,
            BpCategory::Stage2 | BpCategory::Crisis => Self::DANGER,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
