use std::sync::Arc;

use crate::config::WikiConfig;
use crate::domain::{LabelMap, MediaMetadata, SearchResult};
use crate::error::Result;
use crate::resources::{commons, search, EntityLabelClient, SparqlClient};
use crate::transport::{HttpApiSession, HttpTransport, ReqwestTransport};

/// Every lookup wired to one transport and one set of endpoints.
pub struct WikiClient {
    config: WikiConfig,
    wikidata: HttpApiSession,
    commons: HttpApiSession,
    sparql: SparqlClient,
    labels: EntityLabelClient,
}

impl WikiClient {
    pub fn new(config: WikiConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: WikiConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            wikidata: HttpApiSession::new(transport.clone(), config.wikidata_api_url()),
            commons: HttpApiSession::new(transport.clone(), config.commons_api_url()),
            sparql: SparqlClient::from_config(transport.clone(), &config),
            labels: EntityLabelClient::from_config(transport, &config),
            config,
        }
    }

    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    pub fn wikidata_session(&self) -> &HttpApiSession {
        &self.wikidata
    }

    pub fn commons_session(&self) -> &HttpApiSession {
        &self.commons
    }

    pub fn sparql(&self) -> &SparqlClient {
        &self.sparql
    }

    pub fn labels(&self) -> &EntityLabelClient {
        &self.labels
    }

    pub fn search_keyword(&self, keyword: &str, language: &str) -> Result<Vec<SearchResult>> {
        search::search_keyword(&self.wikidata, keyword, language)
    }

    pub fn labels_for_ids<S: AsRef<str>>(&self, ids: &[S], lang: &str) -> Result<LabelMap> {
        self.labels.fetch_labels_for_ids(ids, lang)
    }

    pub fn media_metadata<S: AsRef<str>>(&self, titles: &[S]) -> Result<MediaMetadata> {
        commons::fetch_and_format_media_metadata(&self.commons, titles)
    }
}
