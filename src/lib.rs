pub mod api;
pub mod config;
pub mod error;
pub mod spoonacular;
pub mod translator;

use config::Config;
use error::UpstreamError;
use spoonacular::SpoonacularClient;
use translator::Translator;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub translator: Translator,
}

impl AppState {
    pub fn new(config: Config) -> std::result::Result<Self, UpstreamError> {
        let client = SpoonacularClient::from_config(&config)?;
        let translator = Translator::new(client, config.spoonacular_api_key.clone());
        Ok(Self { translator })
    }
}
