use crate::domain::Quadrant;
use crate::notifications::NoticeLevel;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Border of the pane with keyboard focus
pub fn focused_border_style() -> Style {
    Style::default()
        .fg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Accent colour per quadrant
pub fn quadrant_style(quadrant: Quadrant) -> Style {
    let color = match quadrant {
        Quadrant::DoFirst => Color::Red,
        Quadrant::Schedule => Color::Yellow,
        Quadrant::Delegate => Color::Blue,
        Quadrant::Eliminate => Color::Gray,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Group header in the habits pane
pub fn group_header_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Streak / counter badge style
pub fn badge_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Negative counter style
pub fn warning_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Done-today habit style
pub fn done_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Dates and durations
pub fn meta_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Status line style per notice level
pub fn notice_style(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Info => Style::default().fg(Color::Green),
        NoticeLevel::Warning => Style::default().fg(Color::Yellow),
        NoticeLevel::Error => warning_style(),
    }
}
