use macroquad::prelude::*;

use crate::action::Action;
use crate::app::App;
use crate::session::REGIONS;
use crate::view::{FieldCard, GameView};
use crate::worker::RequestKind;

use super::layout::{UiElementId, UiLayout};
use super::text::{truncate_to_width, wrap_text};
use super::theme::*;

/// One full-window screen. `update` reads input against the layout built by
/// the previous `render`.
pub trait Screen {
    fn update(&mut self, app: &mut App);
    fn render(&mut self, app: &App);
}

fn text_width(text: &str, font_size: f32) -> f32 {
    measure_text(text, None, font_size as u16, 1.0).width
}

fn clicked(layout: &UiLayout) -> Option<UiElementId> {
    if !is_mouse_button_pressed(MouseButton::Left) {
        return None;
    }
    let (mx, my) = mouse_position();
    layout.hit_test(mx, my).cloned()
}

fn is_hovered(bounds: Rect) -> bool {
    let (mx, my) = mouse_position();
    bounds.contains(vec2(mx, my))
}

fn draw_panel(x: f32, y: f32, w: f32, h: f32, title: &str) -> f32 {
    draw_rectangle(x, y, w, h, PANEL_BG);
    draw_rectangle_lines(x, y, w, h, 2.0, PANEL_BORDER);
    draw_text(title, x + PADDING, y + 24.0, FONT_HEADING, TEXT_TITLE);
    draw_line(x + PADDING, y + 32.0, x + w - PADDING, y + 32.0, 1.0, PANEL_BORDER);
    y + 32.0 + LINE_HEIGHT
}

fn draw_button(layout: &mut UiLayout, id: UiElementId, bounds: Rect, label: &str, enabled: bool, base: Color) {
    let bg = if !enabled {
        BUTTON_DISABLED_BG
    } else if is_hovered(bounds) {
        BUTTON_HOVER_BG
    } else {
        base
    };
    draw_rectangle(bounds.x, bounds.y, bounds.w, bounds.h, bg);
    draw_rectangle_lines(bounds.x, bounds.y, bounds.w, bounds.h, 1.0, PANEL_BORDER);

    let label_w = text_width(label, FONT_SMALL);
    let color = if enabled { TEXT_NORMAL } else { TEXT_DIM };
    draw_text(label, bounds.x + (bounds.w - label_w) / 2.0, bounds.y + bounds.h / 2.0 + 5.0, FONT_SMALL, color);

    if enabled {
        layout.add(id, bounds);
    }
}

// ============================================================================
// Login Screen
// ============================================================================

pub struct LoginScreen {
    layout: UiLayout,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self { layout: UiLayout::new() }
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for LoginScreen {
    fn update(&mut self, app: &mut App) {
        while let Some(c) = get_char_pressed() {
            if !c.is_control() {
                app.login.push_char(c);
            }
        }

        if is_key_pressed(KeyCode::Backspace) {
            app.login.backspace();
        }
        if is_key_pressed(KeyCode::Left) {
            app.login.prev_region();
        }
        if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::Tab) {
            app.login.next_region();
        }

        if (is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter)) && !app.is_busy() {
            app.submit_login();
        }

        match clicked(&self.layout) {
            Some(UiElementId::RegionOption(index)) => app.login.select_region(index),
            Some(UiElementId::StartButton) => app.submit_login(),
            _ => {}
        }
    }

    fn render(&mut self, app: &App) {
        self.layout.clear();
        let sw = screen_width();
        let sh = screen_height();

        // Furrow lines
        for i in 0..24 {
            let y = sh * 0.55 + i as f32 * 14.0;
            draw_line(0.0, y, sw, y, 1.0, Color::new(0.35, 0.28, 0.18, 0.08 + i as f32 * 0.004));
        }

        let title = "SHAMBA";
        let title_w = text_width(title, 56.0);
        draw_text(title, (sw - title_w) / 2.0, sh * 0.18, 56.0, TEXT_TITLE);

        let subtitle = "Grow your farm with satellite insight";
        let sub_w = text_width(subtitle, FONT_BODY);
        draw_text(subtitle, (sw - sub_w) / 2.0, sh * 0.18 + 34.0, FONT_BODY, TEXT_DIM);

        let box_w = 360.0;
        let box_h = 46.0;
        let box_x = (sw - box_w) / 2.0;
        let mut y = sh * 0.34;

        // Name field
        draw_text("Your name", box_x, y - 8.0, FONT_SMALL, TEXT_NORMAL);
        let name_bounds = Rect::new(box_x, y, box_w, box_h);
        draw_rectangle(box_x, y, box_w, box_h, INPUT_ACTIVE_BG);
        draw_rectangle_lines(box_x, y, box_w, box_h, 2.0, WHITE);
        self.layout.add(UiElementId::NameInput, name_bounds);

        let (display, color) = if app.login.name.is_empty() {
            ("Enter your name...".to_string(), TEXT_DIM)
        } else {
            let cursor = if (get_time() * 2.0) as i32 % 2 == 0 { "|" } else { "" };
            (format!("{}{}", app.login.name, cursor), WHITE)
        };
        draw_text(&display, box_x + 12.0, y + 29.0, FONT_BODY, color);
        y += box_h + 40.0;

        // Region picker
        draw_text("Region", box_x, y - 8.0, FONT_SMALL, TEXT_NORMAL);
        let option_gap = 8.0;
        let option_w = (box_w - option_gap * (REGIONS.len() as f32 - 1.0)) / REGIONS.len() as f32;
        for (i, region) in REGIONS.iter().enumerate() {
            let bounds = Rect::new(box_x + i as f32 * (option_w + option_gap), y, option_w, 36.0);
            let base = if i == app.login.region_index() { INPUT_ACTIVE_BG } else { INPUT_BG };
            draw_button(&mut self.layout, UiElementId::RegionOption(i), bounds, region, true, base);
        }
        y += 36.0 + 30.0;

        // Start
        let busy = app.pending() == Some(RequestKind::StartSession);
        let label = if busy { "Working..." } else { "Start Farming" };
        let start_bounds = Rect::new(box_x, y, box_w, 40.0);
        draw_button(&mut self.layout, UiElementId::StartButton, start_bounds, label, !app.is_busy(), BUTTON_BG);
        y += 40.0 + 36.0;

        draw_text("[Enter] Start   [Left/Right] Change region", box_x, y, FONT_SMALL, TEXT_DIM);
    }
}

// ============================================================================
// Game Screen
// ============================================================================

pub struct GameScreen {
    layout: UiLayout,
}

impl GameScreen {
    pub fn new() -> Self {
        Self { layout: UiLayout::new() }
    }

    fn render_header(&self, view: &GameView, sw: f32) {
        let h = &view.header;
        draw_rectangle(0.0, 0.0, sw, HEADER_HEIGHT, HEADER_BG);
        draw_line(0.0, HEADER_HEIGHT, sw, HEADER_HEIGHT, 2.0, PANEL_BORDER);

        draw_text(&h.player_name, PADDING, 36.0, FONT_TITLE, TEXT_TITLE);
        let name_w = text_width(&h.player_name, FONT_TITLE);
        draw_text(&h.region, PADDING * 2.0 + name_w, 36.0, FONT_BODY, TEXT_DIM);

        let balance = format!("{} {}", h.balance, h.currency);
        let balance_w = text_width(&balance, FONT_HEADING);
        draw_text(&balance, sw - balance_w - PADDING, 36.0, FONT_HEADING, TEXT_GOLD);

        let day = format!("Day {}", h.day);
        let day_w = text_width(&day, FONT_HEADING);
        draw_text(&day, sw - balance_w - day_w - PADDING * 4.0, 36.0, FONT_HEADING, TEXT_NORMAL);
    }

    fn render_left_panel(&self, view: &GameView, x: f32, y: f32, h: f32) {
        let w = SIDE_PANEL_WIDTH;
        let mut cy = draw_panel(x, y, w, h, "Environment");
        let env = &view.environment;

        draw_text("Soil moisture", x + PADDING, cy, FONT_SMALL, TEXT_DIM);
        draw_text(&env.soil_moisture, x + 170.0, cy, FONT_SMALL, TEXT_WATER);
        cy += LINE_HEIGHT;
        draw_text("Rain forecast", x + PADDING, cy, FONT_SMALL, TEXT_DIM);
        draw_text(&env.precipitation, x + 170.0, cy, FONT_SMALL, TEXT_NORMAL);
        cy += LINE_HEIGHT;
        draw_text("Vegetation index", x + PADDING, cy, FONT_SMALL, TEXT_DIM);
        draw_text(&env.vegetation_index, x + 170.0, cy, FONT_SMALL, TEXT_GOOD);
        cy += LINE_HEIGHT * 1.5;

        if let Some(region) = &view.region_info {
            draw_text("Region", x + PADDING, cy, FONT_BODY, TEXT_TITLE);
            cy += LINE_HEIGHT;
            if let Some(specialty) = &region.specialty {
                for line in wrap_text(specialty, w - PADDING * 2.0, |s| text_width(s, FONT_SMALL)) {
                    draw_text(&line, x + PADDING, cy, FONT_SMALL, TEXT_NORMAL);
                    cy += LINE_HEIGHT;
                }
            }
            if !region.crops.is_empty() {
                let crops = format!("Crops: {}", region.crops.join(", "));
                let crops = truncate_to_width(&crops, w - PADDING * 2.0, |s| text_width(s, FONT_SMALL));
                draw_text(&crops, x + PADDING, cy, FONT_SMALL, TEXT_DIM);
                cy += LINE_HEIGHT;
            }
            if !region.livestock.is_empty() {
                let herds = format!("Herds: {}", region.livestock.join(", "));
                let herds = truncate_to_width(&herds, w - PADDING * 2.0, |s| text_width(s, FONT_SMALL));
                draw_text(&herds, x + PADDING, cy, FONT_SMALL, TEXT_DIM);
                cy += LINE_HEIGHT;
            }
            cy += LINE_HEIGHT * 0.5;
        }

        if !view.livestock.is_empty() {
            draw_text("Livestock", x + PADDING, cy, FONT_BODY, TEXT_TITLE);
            cy += LINE_HEIGHT;
            for herd in &view.livestock {
                if cy > y + h - PADDING {
                    break;
                }
                let mut line = format!("{} x{}", herd.kind, herd.count);
                if let Some(health) = &herd.health {
                    line.push_str(&format!("  hp {}", health));
                }
                if let Some(feed) = &herd.feed_level {
                    line.push_str(&format!("  feed {}", feed));
                }
                draw_text(&line, x + PADDING, cy, FONT_SMALL, TEXT_NORMAL);
                cy += LINE_HEIGHT;
            }
        }
    }

    fn render_field_card(&mut self, card: &FieldCard, x: f32, y: f32, enabled: bool) {
        let w = FIELD_CARD_WIDTH;
        draw_rectangle(x, y, w, FIELD_CARD_HEIGHT, CARD_BG);
        draw_rectangle_lines(x, y, w, FIELD_CARD_HEIGHT, 1.0, PANEL_BORDER);

        let measure = |s: &str| text_width(s, FONT_SMALL);
        draw_text(&card.title, x + 10.0, y + 22.0, FONT_BODY, TEXT_TITLE);

        let mut cy = y + 44.0;
        let crop = truncate_to_width(&format!("Crop: {}", card.crop), w - 20.0, measure);
        draw_text(&crop, x + 10.0, cy, FONT_SMALL, TEXT_NORMAL);
        cy += LINE_HEIGHT;
        let status = truncate_to_width(&format!("Status: {}", card.status), w - 20.0, measure);
        draw_text(&status, x + 10.0, cy, FONT_SMALL, TEXT_NORMAL);
        cy += LINE_HEIGHT;
        let mut water = format!("Water: {}", card.water_level);
        if let Some(stage) = card.growth_stage {
            water.push_str(&format!("  Stage {}", stage));
        }
        draw_text(&water, x + 10.0, cy, FONT_SMALL, TEXT_WATER);

        if let Some(action) = &card.action {
            let bounds = Rect::new(x + 10.0, y + FIELD_CARD_HEIGHT - BUTTON_HEIGHT - 10.0, w - 20.0, BUTTON_HEIGHT);
            draw_button(
                &mut self.layout,
                UiElementId::ActionButton(action.clone()),
                bounds,
                action.label(),
                enabled,
                BUTTON_BG,
            );
        }
    }

    fn render_fields(&mut self, view: &GameView, x: f32, y: f32, w: f32, h: f32, enabled: bool) {
        draw_text("Fields", x, y + 20.0, FONT_HEADING, TEXT_TITLE);
        let top = y + 32.0;

        if view.fields.is_empty() {
            draw_text("No fields yet", x, top + 20.0, FONT_SMALL, TEXT_DIM);
            return;
        }

        let columns = (((w + PADDING) / (FIELD_CARD_WIDTH + PADDING)).floor() as usize).max(1);
        for (i, card) in view.fields.iter().enumerate() {
            let col = i % columns;
            let row = i / columns;
            let cx = x + col as f32 * (FIELD_CARD_WIDTH + PADDING);
            let cy = top + row as f32 * (FIELD_CARD_HEIGHT + PADDING);

            if cy + FIELD_CARD_HEIGHT > y + h {
                let remaining = view.fields.len() - i;
                draw_text(&format!("...and {} more fields", remaining), x, cy + 16.0, FONT_SMALL, TEXT_DIM);
                break;
            }
            self.render_field_card(card, cx, cy, enabled);
        }
    }

    fn render_right_panel(&self, view: &GameView, x: f32, y: f32, h: f32) {
        let w = SIDE_PANEL_WIDTH;
        let bottom = y + h - PADDING;
        let mut cy = draw_panel(x, y, w, h, "Quests");
        let measure = |s: &str| text_width(s, FONT_SMALL);

        if view.quests.is_empty() {
            draw_text("No active quests", x + PADDING, cy, FONT_SMALL, TEXT_DIM);
            cy += LINE_HEIGHT;
        }
        for (i, quest) in view.quests.iter().enumerate() {
            if cy > bottom - LINE_HEIGHT * 8.0 {
                draw_text(&format!("...and {} more quests", view.quests.len() - i), x + PADDING, cy, FONT_SMALL, TEXT_DIM);
                cy += LINE_HEIGHT;
                break;
            }
            let (marker, color) = if quest.complete { ("[+]", TEXT_GOOD) } else { ("[ ]", TEXT_NORMAL) };
            draw_text(marker, x + PADDING, cy, FONT_SMALL, color);
            let title = truncate_to_width(&quest.title, w - PADDING * 2.0 - 30.0, measure);
            draw_text(&title, x + PADDING + 30.0, cy, FONT_SMALL, color);
            cy += LINE_HEIGHT;

            for line in wrap_text(&quest.description, w - PADDING * 2.0, measure).iter().take(3) {
                draw_text(line, x + PADDING, cy, FONT_SMALL, TEXT_DIM);
                cy += LINE_HEIGHT;
            }
            if let Some(tip) = &quest.learning_point {
                for line in wrap_text(&format!("Tip: {}", tip), w - PADDING * 2.0, measure).iter().take(2) {
                    draw_text(line, x + PADDING, cy, FONT_SMALL, TEXT_GOLD);
                    cy += LINE_HEIGHT;
                }
            }
            cy += LINE_HEIGHT * 0.5;
        }

        cy += LINE_HEIGHT * 0.5;
        draw_text("Inventory", x + PADDING, cy, FONT_BODY, TEXT_TITLE);
        cy += LINE_HEIGHT;
        if view.inventory.is_empty() {
            draw_text("Nothing stored", x + PADDING, cy, FONT_SMALL, TEXT_DIM);
            cy += LINE_HEIGHT;
        }
        for row in &view.inventory {
            if cy > bottom - LINE_HEIGHT * 3.0 {
                break;
            }
            draw_text(&row.item, x + PADDING, cy, FONT_SMALL, TEXT_NORMAL);
            let qty_w = text_width(&row.quantity, FONT_SMALL);
            draw_text(&row.quantity, x + w - PADDING - qty_w, cy, FONT_SMALL, TEXT_NORMAL);
            cy += LINE_HEIGHT;
        }

        cy += LINE_HEIGHT * 0.5;
        draw_text("Market", x + PADDING, cy, FONT_BODY, TEXT_TITLE);
        cy += LINE_HEIGHT;
        for row in &view.market {
            if cy > bottom {
                break;
            }
            draw_text(&row.item, x + PADDING, cy, FONT_SMALL, TEXT_NORMAL);
            let price_w = text_width(&row.price, FONT_SMALL);
            draw_text(&row.price, x + w - PADDING - price_w, cy, FONT_SMALL, TEXT_GOLD);
            cy += LINE_HEIGHT;
        }
    }

    fn render_footer(&mut self, app: &App, sw: f32, sh: f32) {
        let y = sh - FOOTER_HEIGHT;
        draw_rectangle(0.0, y, sw, FOOTER_HEIGHT, HEADER_BG);
        draw_line(0.0, y, sw, y, 2.0, PANEL_BORDER);

        let enabled = !app.is_busy();
        let button_y = y + (FOOTER_HEIGHT - BUTTON_HEIGHT) / 2.0;
        let mut bx = sw - PADDING;

        let buttons = [
            (UiElementId::SwitchFarmer, "Switch Farmer", 140.0, BUTTON_SECONDARY_BG, true),
            (UiElementId::RefreshSensors, "Refresh Sensors", 150.0, BUTTON_SECONDARY_BG, enabled),
            (UiElementId::ActionButton(Action::NextDay), "Next Day", 120.0, BUTTON_BG, enabled),
        ];
        for (id, label, width, base, on) in buttons {
            bx -= width;
            draw_button(&mut self.layout, id, Rect::new(bx, button_y, width, BUTTON_HEIGHT), label, on, base);
            bx -= PADDING;
        }

        let status = if app.is_busy() {
            Some(("Working...", TEXT_GOLD))
        } else {
            app.status().map(|s| (s, TEXT_NORMAL))
        };
        if let Some((text, color)) = status {
            let text = truncate_to_width(text, bx - PADDING * 2.0, |s| text_width(s, FONT_BODY));
            draw_text(&text, PADDING, y + 30.0, FONT_BODY, color);
        }
    }
}

impl Default for GameScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for GameScreen {
    fn update(&mut self, app: &mut App) {
        if !app.is_busy() {
            if is_key_pressed(KeyCode::N) {
                app.dispatch(Action::NextDay);
            }
            if is_key_pressed(KeyCode::R) {
                app.refresh_environment();
            }
        }

        match clicked(&self.layout) {
            Some(UiElementId::ActionButton(action)) => app.dispatch(action),
            Some(UiElementId::RefreshSensors) => app.refresh_environment(),
            Some(UiElementId::SwitchFarmer) => app.end_session(),
            _ => {}
        }
    }

    fn render(&mut self, app: &App) {
        self.layout.clear();
        let sw = screen_width();
        let sh = screen_height();

        let Some(view) = app.game_view() else {
            draw_text("Loading farm...", PADDING, sh / 2.0, FONT_HEADING, TEXT_DIM);
            return;
        };

        self.render_header(view, sw);

        let body_y = HEADER_HEIGHT + PADDING;
        let body_h = sh - HEADER_HEIGHT - FOOTER_HEIGHT - PADDING * 2.0;
        let center_x = PADDING * 2.0 + SIDE_PANEL_WIDTH;
        let center_w = sw - SIDE_PANEL_WIDTH * 2.0 - PADDING * 4.0;

        self.render_left_panel(view, PADDING, body_y, body_h);
        self.render_fields(view, center_x, body_y, center_w, body_h, !app.is_busy());
        self.render_right_panel(view, sw - SIDE_PANEL_WIDTH - PADDING, body_y, body_h);
        self.render_footer(app, sw, sh);
    }
}

// ============================================================================
// Alert Overlay
// ============================================================================

/// Modal message box; swallows input until dismissed
pub struct AlertOverlay {
    layout: UiLayout,
}

impl AlertOverlay {
    pub fn new() -> Self {
        Self { layout: UiLayout::new() }
    }
}

impl Default for AlertOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for AlertOverlay {
    fn update(&mut self, app: &mut App) {
        // Drain typed characters so they don't leak into the login form
        while get_char_pressed().is_some() {}

        let keyed = is_key_pressed(KeyCode::Enter)
            || is_key_pressed(KeyCode::KpEnter)
            || is_key_pressed(KeyCode::Escape)
            || is_key_pressed(KeyCode::Space);
        if keyed || matches!(clicked(&self.layout), Some(UiElementId::DismissAlert)) {
            app.dismiss_alert();
        }
    }

    fn render(&mut self, app: &App) {
        self.layout.clear();
        let Some(message) = app.current_alert() else {
            return;
        };

        let sw = screen_width();
        let sh = screen_height();
        draw_rectangle(0.0, 0.0, sw, sh, OVERLAY);

        let w = 440.0_f32.min(sw - PADDING * 2.0);
        let lines = wrap_text(message, w - PADDING * 2.0, |s| text_width(s, FONT_BODY));
        let h = 90.0 + lines.len() as f32 * LINE_HEIGHT + BUTTON_HEIGHT;
        let x = (sw - w) / 2.0;
        let y = (sh - h) / 2.0;

        draw_rectangle(x, y, w, h, ALERT_BG);
        draw_rectangle_lines(x, y, w, h, 2.0, ALERT_BORDER);
        draw_text("Notice", x + PADDING, y + 28.0, FONT_HEADING, TEXT_TITLE);

        let mut cy = y + 56.0;
        for line in &lines {
            draw_text(line, x + PADDING, cy, FONT_BODY, TEXT_NORMAL);
            cy += LINE_HEIGHT;
        }

        let bounds = Rect::new(x + (w - 100.0) / 2.0, y + h - BUTTON_HEIGHT - PADDING, 100.0, BUTTON_HEIGHT);
        draw_button(&mut self.layout, UiElementId::DismissAlert, bounds, "OK", true, BUTTON_SECONDARY_BG);
    }
}
