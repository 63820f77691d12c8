use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::config::{WikiConfig, MAX_IDS_PER_REQUEST};
use crate::domain::LabelMap;
use crate::error::{Result, WikiError};
use crate::transport::HttpTransport;

#[derive(Debug, Deserialize)]
struct EntitiesResponse {
    #[serde(default)]
    error: Option<ApiErrorBody>,
    #[serde(default)]
    entities: BTreeMap<String, EntityLabels>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct EntityLabels {
    #[serde(default)]
    labels: BTreeMap<String, LabelValue>,
}

#[derive(Debug, Deserialize)]
struct LabelValue {
    value: String,
}

/// Label lookup through the `wbgetentities` module, batched to the
/// service's per-request id limit.
pub struct EntityLabelClient {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
    chunk_size: usize,
}

impl EntityLabelClient {
    pub fn new(transport: Arc<dyn HttpTransport>, api_url: impl Into<String>) -> Self {
        Self {
            transport,
            api_url: api_url.into(),
            chunk_size: MAX_IDS_PER_REQUEST,
        }
    }

    pub fn from_config(transport: Arc<dyn HttpTransport>, config: &WikiConfig) -> Self {
        Self::new(transport, config.wikidata_api_url()).with_chunk_size(config.label_chunk_size)
    }

    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.clamp(1, MAX_IDS_PER_REQUEST);
        self
    }

    /// Every requested id ends up in the map; ids without a label in `lang`
    /// map to an empty string. A failing chunk fails the whole call.
    pub fn fetch_labels_for_ids<S: AsRef<str>>(&self, ids: &[S], lang: &str) -> Result<LabelMap> {
        let mut labels = LabelMap::new();
        for (index, chunk) in ids.chunks(self.chunk_size).enumerate() {
            debug!(chunk = index, ids = chunk.len(), lang, "fetching entity labels");
            self.fetch_chunk(chunk, lang, &mut labels)?;
        }
        Ok(labels)
    }

    fn fetch_chunk<S: AsRef<str>>(
        &self,
        chunk: &[S],
        lang: &str,
        labels: &mut LabelMap,
    ) -> Result<()> {
        let ids = chunk
            .iter()
            .map(|id| id.as_ref())
            .collect::<Vec<_>>()
            .join("|");
        let params = [
            ("action".to_string(), "wbgetentities".to_string()),
            ("ids".to_string(), ids),
            ("props".to_string(), "labels".to_string()),
            ("languages".to_string(), lang.to_string()),
            ("format".to_string(), "json".to_string()),
        ];

        let response = self.transport.get(&self.api_url, &params)?;
        if response.status != 200 {
            return Err(WikiError::Service(format!(
                "could not get labels for ids from wikidata API (status {})",
                response.status
            )));
        }

        let parsed: EntitiesResponse = serde_json::from_str(&response.body)?;
        if let Some(error) = parsed.error {
            return Err(WikiError::Service(error.info));
        }

        for (id, mut entity) in parsed.entities {
            let label = entity
                .labels
                .remove(lang)
                .map(|label| label.value)
                .unwrap_or_default();
            labels.insert(id, label);
        }
        for id in chunk {
            labels.entry(id.as_ref().to_string()).or_default();
        }
        Ok(())
    }
}
