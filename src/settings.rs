//! Runtime Settings
//!
//! `localStorage` overrides, then build-time env, then defaults.

use assignment_sync::ApiConfig;
use log::LevelFilter;

use crate::logging;

const API_BASE_KEY: &str = "curso_admin.api_base";
const LOG_LEVEL_KEY: &str = "curso_admin.log_level";

fn local_storage_item(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(key).ok().flatten()
}

pub fn api_config() -> ApiConfig {
    let stored = local_storage_item(API_BASE_KEY);
    ApiConfig::resolve([stored.as_deref(), option_env!("CURSO_API_BASE")])
}

pub fn log_level() -> LevelFilter {
    logging::parse_level(local_storage_item(LOG_LEVEL_KEY).as_deref())
}
