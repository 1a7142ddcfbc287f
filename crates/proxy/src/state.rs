use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;

pub struct ProxyState {
    pub client: Client,
    pub backend_url: String,
}

impl ProxyState {
    #[must_use]
    pub fn new(config: &Config) -> Arc<Self> {
        Arc::new(Self {
            client: Client::new(),
            backend_url: config.backend_url.trim_end_matches('/').to_owned(),
        })
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.backend_url, path.trim_start_matches('/'))
    }
}
