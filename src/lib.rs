use wasm_bindgen::prelude::*;

use crate::domain::logging::LogComponent;

pub mod app;
pub mod application;
pub mod domain;
pub mod global_state;
pub mod infrastructure;
pub mod macros;
pub mod presentation;

/// Installs logging and mounts the benchmark page.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = if cfg!(debug_assertions) {
        infrastructure::services::ConsoleLogger::new_development()
    } else {
        infrastructure::services::ConsoleLogger::new_production()
    };
    domain::logging::init_logger(Box::new(console_logger));
    domain::logging::init_time_provider(Box::new(
        infrastructure::services::BrowserTimeProvider::new(),
    ));

    log_info!(LogComponent::Presentation("Initialize"), "texture upload benchmark starting");
    leptos::mount_to_body(app::App);
}
