use shamba_client::config::ClientConfig;
use shamba_client::window_conf;

fn main() {
    env_logger::init();

    // Set panic hook to capture crash info
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        if let Some(location) = panic_info.location() {
            eprintln!("  at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    let config = ClientConfig::load();
    macroquad::Window::from_config(window_conf(&config), shamba_client::run(config));
}
