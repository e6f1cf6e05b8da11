//! Colors and layout constants shared by the screens

use macroquad::prelude::Color;

// ============================================================================
// Palette - earthy farm theme
// ============================================================================

pub const BACKGROUND: Color = Color::new(0.094, 0.110, 0.086, 1.0);         // rgba(24, 28, 22, 255)
pub const PANEL_BG: Color = Color::new(0.133, 0.153, 0.122, 0.961);         // rgba(34, 39, 31, 245)
pub const PANEL_BORDER: Color = Color::new(0.420, 0.345, 0.220, 1.0);       // rgba(107, 88, 56, 255)
pub const HEADER_BG: Color = Color::new(0.165, 0.141, 0.098, 1.0);          // rgba(42, 36, 25, 255)
pub const CARD_BG: Color = Color::new(0.176, 0.200, 0.157, 1.0);           // rgba(45, 51, 40, 255)

pub const INPUT_BG: Color = Color::new(0.235, 0.235, 0.314, 1.0);          // rgba(60, 60, 80, 255)
pub const INPUT_ACTIVE_BG: Color = Color::new(0.314, 0.471, 0.706, 1.0);   // rgba(80, 120, 180, 255)

pub const BUTTON_BG: Color = Color::new(0.243, 0.420, 0.220, 1.0);         // rgba(62, 107, 56, 255)
pub const BUTTON_HOVER_BG: Color = Color::new(0.322, 0.541, 0.290, 1.0);   // rgba(82, 138, 74, 255)
pub const BUTTON_DISABLED_BG: Color = Color::new(0.220, 0.220, 0.220, 1.0); // rgba(56, 56, 56, 255)
pub const BUTTON_SECONDARY_BG: Color = Color::new(0.267, 0.251, 0.204, 1.0); // rgba(68, 64, 52, 255)

pub const TEXT_TITLE: Color = Color::new(0.855, 0.737, 0.502, 1.0);        // rgba(218, 188, 128, 255)
pub const TEXT_NORMAL: Color = Color::new(0.824, 0.824, 0.855, 1.0);       // rgba(210, 210, 218, 255)
pub const TEXT_DIM: Color = Color::new(0.502, 0.502, 0.541, 1.0);          // rgba(128, 128, 138, 255)
pub const TEXT_GOLD: Color = Color::new(1.0, 0.843, 0.314, 1.0);           // rgba(255, 215, 80, 255)
pub const TEXT_GOOD: Color = Color::new(0.392, 0.784, 0.392, 1.0);         // rgba(100, 200, 100, 255)
pub const TEXT_WATER: Color = Color::new(0.400, 0.650, 0.950, 1.0);        // rgba(102, 166, 242, 255)

pub const OVERLAY: Color = Color::new(0.0, 0.0, 0.0, 0.588);
pub const ALERT_BG: Color = Color::new(0.063, 0.063, 0.086, 0.980);        // rgba(16, 16, 22, 250)
pub const ALERT_BORDER: Color = Color::new(0.753, 0.322, 0.251, 1.0);      // rgba(192, 82, 64, 255)

// ============================================================================
// Layout
// ============================================================================

pub const HEADER_HEIGHT: f32 = 56.0;
pub const FOOTER_HEIGHT: f32 = 48.0;
pub const PADDING: f32 = 12.0;
pub const SIDE_PANEL_WIDTH: f32 = 300.0;
pub const FIELD_CARD_WIDTH: f32 = 200.0;
pub const FIELD_CARD_HEIGHT: f32 = 150.0;
pub const BUTTON_HEIGHT: f32 = 28.0;
pub const LINE_HEIGHT: f32 = 20.0;

pub const FONT_TITLE: f32 = 28.0;
pub const FONT_HEADING: f32 = 22.0;
pub const FONT_BODY: f32 = 18.0;
pub const FONT_SMALL: f32 = 16.0;
