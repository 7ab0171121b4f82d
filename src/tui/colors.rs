//! Color constants for the task page.

use ratatui::style::Color;

/// Light grey behind the page and title bar.
pub const PAGE_BG: Color = Color::Rgb(243, 243, 243);
pub const CARD_BG: Color = Color::White;
pub const INK: Color = Color::Black;
/// Border of the card under the cursor.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for the action sheet highlight
pub const SHEET_HIGHLIGHT: Color = Color::Rgb(220, 220, 220);
