//! Color and style themes for the widgets.
//!
//! Supports light and dark palettes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Styling tokens shared by the grid and text field widgets.
///
/// Use [`Theme::auto_detect()`] for automatic selection based on the
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for focused borders and active elements.
    pub accent: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for the grid header row.
    pub header: Style,
    /// Style for the cursor (highlighted) row.
    pub selected: Style,
    /// Style for checkbox cells and the sort arrow.
    pub control: Style,
    /// Style for the empty-state message panel.
    pub empty: Style,
    /// Style for the loading placeholder row.
    pub loading: Style,
    /// Style for field labels.
    pub label: Style,
    /// Style for placeholder text in an empty field.
    pub placeholder: Style,
    /// Color for error borders and messages.
    pub error: Color,
    /// Color for positive status accents.
    pub success: Color,
    /// Color for cautionary status accents.
    pub warning: Color,
    /// Color for negative status accents.
    pub danger: Color,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            accent: Color::Cyan,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            control: Style::default().fg(Color::Cyan),
            empty: Style::default().add_modifier(Modifier::DIM),
            loading: Style::default().fg(Color::Cyan).add_modifier(Modifier::DIM),
            label: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            placeholder: Style::default().add_modifier(Modifier::DIM),
            error: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            accent: Color::Blue,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            control: Style::default().fg(Color::Blue),
            empty: Style::default().add_modifier(Modifier::DIM),
            loading: Style::default().fg(Color::Blue).add_modifier(Modifier::DIM),
            label: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            placeholder: Style::default().add_modifier(Modifier::DIM),
            error: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for a field border given its focus/error state.
    pub fn field_border(&self, focused: bool, has_error: bool) -> Style {
        if has_error {
            Style::default().fg(self.error)
        } else if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
