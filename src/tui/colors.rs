//! Shared styling for the TUI.

use ratatui::style::Color;

/// Header and status bar background.
pub const BAR_BG: Color = Color::Rgb(0, 95, 135);

/// Background of the selected row.
pub const SELECTED_BG: Color = Color::Rgb(60, 60, 80);

/// Background of odd (zebra) rows.
pub const STRIPE_BG: Color = Color::Rgb(25, 25, 35);

/// Star-rating color by value: strong ratings read green, weak ones red.
pub fn rating_color(rating: Option<f64>) -> Color {
    match rating {
        Some(r) if r >= 4.0 => Color::Green,
        Some(r) if r >= 2.5 => Color::Yellow,
        Some(_) => Color::Red,
        None => Color::DarkGray,
    }
}
