mod screens;
pub mod layout;
pub mod text;
pub mod theme;

pub use layout::{HitRegion, UiElementId, UiLayout};
pub use screens::{AlertOverlay, GameScreen, LoginScreen, Screen};
