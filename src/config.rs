use std::time::Duration;

pub const DEFAULT_WIKIDATA_BASE_URL: &str = "https://www.wikidata.org";
pub const DEFAULT_COMMONS_BASE_URL: &str = "https://commons.wikimedia.org";
pub const DEFAULT_SPARQL_ENDPOINT: &str = "https://query.wikidata.org/sparql";
pub const DEFAULT_USER_AGENT: &str = "wikiflat/0.1 (+https://github.com/)";
/// Upper bound of ids accepted by a single `wbgetentities` call.
pub const MAX_IDS_PER_REQUEST: usize = 50;

const API_PATH: &str = "/w/api.php";

/// Endpoints and transport settings shared by every client.
#[derive(Debug, Clone, PartialEq)]
pub struct WikiConfig {
    pub wikidata_base_url: String,
    pub commons_base_url: String,
    pub sparql_endpoint: String,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub label_chunk_size: usize,
}

impl WikiConfig {
    pub fn new() -> Self {
        Self {
            wikidata_base_url: DEFAULT_WIKIDATA_BASE_URL.to_string(),
            commons_base_url: DEFAULT_COMMONS_BASE_URL.to_string(),
            sparql_endpoint: DEFAULT_SPARQL_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Some(Duration::from_secs(60)),
            label_chunk_size: MAX_IDS_PER_REQUEST,
        }
    }

    pub fn with_wikidata_base_url(mut self, url: impl Into<String>) -> Self {
        self.wikidata_base_url = url.into();
        self
    }

    pub fn with_commons_base_url(mut self, url: impl Into<String>) -> Self {
        self.commons_base_url = url.into();
        self
    }

    pub fn with_sparql_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.sparql_endpoint = endpoint.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_label_chunk_size(mut self, size: usize) -> Self {
        self.label_chunk_size = size.clamp(1, MAX_IDS_PER_REQUEST);
        self
    }

    pub fn wikidata_api_url(&self) -> String {
        api_url(&self.wikidata_base_url)
    }

    pub fn commons_api_url(&self) -> String {
        api_url(&self.commons_base_url)
    }
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn api_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), API_PATH)
}
