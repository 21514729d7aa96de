// Runtime state module
// Shared state handed to every connection

use handlebars::Handlebars;

use super::types::Config;

/// Shared application state
pub struct AppState {
    pub config: Config,
    /// Template registry used to render the landing page
    pub templates: Handlebars<'static>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            templates: Handlebars::new(),
        }
    }
}
