//! Application Context
//!
//! Shared state provided via Leptos Context API.

use assignment_sync::ApiConfig;
use leptos::prelude::*;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Bumped after every saved assignment - read
    pub reload_trigger: ReadSignal<u32>,
    /// Bumped after every saved assignment - write
    set_reload_trigger: WriteSignal<u32>,
    /// Resolved API base address
    api_config: StoredValue<ApiConfig>,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>), api_config: ApiConfig) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            api_config: StoredValue::new(api_config),
        }
    }

    /// Tell dependent views that assignments changed
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn api_config(&self) -> ApiConfig {
        self.api_config.get_value()
    }
}
