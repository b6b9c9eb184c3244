//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection. Status
//! badges and risk tiers use fixed clinical colors from [`crate::data::metrics`]
//! regardless of theme.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::config::ThemeChoice;
use crate::data::{status_color_pair, PatientStatus, ReadingStatus, RiskTier};

/// Color and style theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for healthy indicators (online devices, normal readings).
    pub healthy: Color,
    /// Color for degraded indicators.
    pub warning: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Secondary text such as labels and freshness hints.
    pub muted: Style,
    /// Style for section titles.
    pub header: Style,
    /// Style for the selected patient card.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            healthy: Color::Green,
            warning: Color::Yellow,
            border: Color::Gray,
            muted: Style::default().fg(Color::Gray),
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            healthy: Color::Green,
            warning: Color::Yellow,
            border: Color::DarkGray,
            muted: Style::default().fg(Color::DarkGray),
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Resolve a configured choice.
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::auto_detect(),
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Badge style for a patient status.
    pub fn status_style(&self, status: PatientStatus) -> Style {
        let pair = status_color_pair(status);
        Style::default()
            .fg(pair.fg)
            .bg(pair.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Text style for a risk tier.
    pub fn risk_style(&self, tier: RiskTier) -> Style {
        let style = Style::default().fg(tier.color());
        if tier == RiskTier::High {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Marker style for a latest reading.
    pub fn reading_style(&self, status: ReadingStatus) -> Style {
        match status {
            ReadingStatus::Normal => Style::default().fg(self.healthy),
            ReadingStatus::Warning => Style::default().fg(self.warning),
        }
    }

    /// Dot color for a device category.
    pub fn device_style(&self, fully_online: bool) -> Style {
        Style::default().fg(if fully_online {
            self.healthy
        } else {
            self.warning
        })
    }

    /// Standard bordered block style.
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}
