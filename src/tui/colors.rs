//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Priority;

/// Used for Low priority
pub const DARK_GREEN: Color = Color::Rgb(0, 130, 0);
/// Used for Medium priority
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for High priority
pub const DARK_RED: Color = Color::Rgb(190, 30, 30);

/// Foreground color for a priority label.
pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => DARK_GREEN,
        Priority::Medium => GOLD,
        Priority::High => DARK_RED,
    }
}
