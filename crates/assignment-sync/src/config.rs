//! API Configuration
//!
//! Base address of the Curso REST API.

use serde::{Deserialize, Serialize};

/// Address used when nothing else is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// API configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// First non-blank candidate wins, falling back to the default address
    pub fn resolve<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        candidates
            .into_iter()
            .flatten()
            .find(|url| !url.trim().is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    /// Join the base address with an API path (`/area/`, `cursoArea/7`, ...)
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
