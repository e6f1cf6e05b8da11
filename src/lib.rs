// Shamba farming client: login, action dispatch and snapshot rendering

use macroquad::prelude::*;
use std::sync::Arc;

pub mod action;
pub mod api;
pub mod app;
pub mod config;
pub mod dispatch;
pub mod session;
pub mod ui;
pub mod view;
pub mod worker;

use api::HttpBackend;
use app::{App, View};
use config::ClientConfig;
use ui::{AlertOverlay, GameScreen, LoginScreen, Screen};

pub use app::window_conf;

/// Frame loop. Runs until the window closes.
pub async fn run(config: ClientConfig) {
    log::info!("Connecting to farm server at {}", config.server_url);

    let backend = Arc::new(HttpBackend::new(&config.server_url, config.request_timeout()));
    let mut app = App::new(backend, &config.default_region);

    let mut login_screen = LoginScreen::new();
    let mut game_screen = GameScreen::new();
    let mut alert_overlay = AlertOverlay::new();

    loop {
        // 1. Apply finished requests
        app.poll();

        // 2. Input against last frame's layout; an open alert takes it all
        if app.current_alert().is_some() {
            alert_overlay.update(&mut app);
        } else {
            match app.view() {
                View::Login => login_screen.update(&mut app),
                View::Game => game_screen.update(&mut app),
            }
        }

        // 3. Draw the visible screen, then any alert on top
        clear_background(ui::theme::BACKGROUND);
        match app.view() {
            View::Login => login_screen.render(&app),
            View::Game => game_screen.render(&app),
        }
        alert_overlay.render(&app);

        next_frame().await;
    }
}
