//! Curso Admin Frontend Entry Point

mod app;
mod components;
mod context;
mod logging;
mod settings;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(settings::log_level());
    mount_to_body(App);
}
