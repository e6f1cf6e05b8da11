use macroquad::prelude::{Rect, Vec2};

use crate::action::Action;

/// Identifier for a clickable UI element
#[derive(Debug, Clone, PartialEq)]
pub enum UiElementId {
    // Login
    NameInput,
    RegionOption(usize),
    StartButton,

    // Game
    /// Carries the intent itself so a click never has to re-derive it
    ActionButton(Action),
    RefreshSensors,
    SwitchFarmer,

    // Alert overlay
    DismissAlert,
}

/// A button, region chip or input box drawn this frame
pub struct HitRegion {
    pub id: UiElementId,
    pub bounds: Rect,
}

/// Click targets registered while a screen draws.
///
/// Screens rebuild it every `render`, and `update` on the next frame tests
/// the mouse against it. Disabled buttons are never registered, so while a
/// request is in flight no field card or footer button can be hit.
#[derive(Default)]
pub struct UiLayout {
    regions: Vec<HitRegion>,
}

impl UiLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn add(&mut self, id: UiElementId, bounds: Rect) {
        self.regions.push(HitRegion { id, bounds });
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Later registrations sit on top, so the alert's OK button wins over
    /// whatever it covers.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<&UiElementId> {
        let point = Vec2::new(x, y);
        self.regions
            .iter()
            .rev()
            .find(|r| r.bounds.contains(point))
            .map(|r| &r.id)
    }
}
