//! Color constants for consistent theming

use ratatui::style::Color;

// Rows
pub const CURSOR_BG: Color = Color::Rgb(40, 40, 60);
pub const BORDER: Color = Color::DarkGray;
pub const MUTED: Color = Color::Gray;
pub const ACCENT: Color = Color::Cyan;
pub const COUNT: Color = Color::Yellow;
pub const SUCCESS: Color = Color::Green;

// Status bar
pub const STATUS_BAR_BG: Color = Color::Rgb(30, 30, 50);
pub const PREFIX_BADGE_BG: Color = Color::Rgb(230, 230, 230);

// Popups
pub const POPUP_BG: Color = Color::Rgb(20, 20, 30);
pub const PALETTE_SELECTED_BG: Color = Color::Rgb(220, 220, 220);
pub const TOAST_BG: Color = Color::Rgb(30, 30, 40);
pub const CONFIRM_BG: Color = Color::Rgb(30, 20, 20);
