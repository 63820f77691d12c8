use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WikiConfig;
use crate::domain::{ItemLabelMap, LabelMap, PropertyLabelMap};
use crate::error::{Result, WikiError};
use crate::transport::{HttpTransport, SPARQL_QUERY_CONTENT_TYPE};
use crate::utils::last_path_segment;

const ALL_PROPERTIES_QUERY: &str = r#"SELECT ?property ?propertyLabel WHERE {
  ?property a wikibase:Property .

  SERVICE wikibase:label { bd:serviceParam wikibase:language "en" . }
}
"#;

const EXTERNAL_ID_PROPERTIES_QUERY: &str = r#"SELECT ?property ?propertyLabel WHERE {
  ?property wikibase:propertyType wikibase:ExternalId .

  SERVICE wikibase:label { bd:serviceParam wikibase:language "en". }
}
"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparqlValue {
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: String,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

/// One result row: variable name to bound value.
pub type Binding = BTreeMap<String, SparqlValue>;

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<Binding>,
}

/// Runs SELECT queries against the query service.
pub struct SparqlClient {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
}

impl SparqlClient {
    pub fn new(transport: Arc<dyn HttpTransport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(transport: Arc<dyn HttpTransport>, config: &WikiConfig) -> Self {
        Self::new(transport, config.sparql_endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `query` as the raw request body and returns `results.bindings`.
    pub fn execute_query(&self, query: &str) -> Result<Vec<Binding>> {
        let params = [("format".to_string(), "json".to_string())];
        let response = self.transport.post(
            &self.endpoint,
            &params,
            SPARQL_QUERY_CONTENT_TYPE,
            query.to_string(),
        )?;

        let parsed: SparqlResponse =
            serde_json::from_str(&response.body).map_err(|source| WikiError::Query {
                message: format!(
                    "query service answered status {} with an undecodable body",
                    response.status
                ),
                source,
            })?;
        debug!(rows = parsed.results.bindings.len(), "query executed");
        Ok(parsed.results.bindings)
    }

    pub fn fetch_all_properties(&self) -> Result<Vec<Binding>> {
        self.execute_query(ALL_PROPERTIES_QUERY)
    }

    pub fn fetch_and_format_all_properties(&self) -> Result<PropertyLabelMap> {
        process_property_bindings(&self.fetch_all_properties()?)
    }

    pub fn fetch_external_id_properties(&self) -> Result<Vec<Binding>> {
        self.execute_query(EXTERNAL_ID_PROPERTIES_QUERY)
    }

    pub fn fetch_and_format_external_id_properties(&self) -> Result<PropertyLabelMap> {
        process_property_bindings(&self.fetch_external_id_properties()?)
    }

    /// English labels for `ids`; an empty list is rejected before any request.
    pub fn fetch_labels_for_ids<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Binding>> {
        let query = labels_query(ids)?;
        self.execute_query(&query)
    }

    pub fn fetch_and_format_labels_for_ids<S: AsRef<str>>(&self, ids: &[S]) -> Result<ItemLabelMap> {
        process_item_bindings(&self.fetch_labels_for_ids(ids)?)
    }
}

fn labels_query<S: AsRef<str>>(ids: &[S]) -> Result<String> {
    if ids.is_empty() {
        return Err(WikiError::EmptyIdList);
    }
    let values = ids
        .iter()
        .map(|id| format!("wd:{}", id.as_ref()))
        .collect::<Vec<_>>()
        .join(" ");
    Ok(format!(
        r#"SELECT ?item ?itemLabel WHERE {{
  VALUES ?item {{ {values} }}

  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "en". }}
}}
"#
    ))
}

pub fn process_property_bindings(bindings: &[Binding]) -> Result<PropertyLabelMap> {
    labels_from_bindings(bindings, "property", "propertyLabel")
}

pub fn process_item_bindings(bindings: &[Binding]) -> Result<ItemLabelMap> {
    labels_from_bindings(bindings, "item", "itemLabel")
}

/// Keys each row by the last path segment of its `key_var` URI. Later rows
/// overwrite earlier ones for the same key.
pub fn labels_from_bindings(
    bindings: &[Binding],
    key_var: &str,
    label_var: &str,
) -> Result<LabelMap> {
    let mut labels = LabelMap::new();
    for binding in bindings {
        let key = bound_value(binding, key_var)?;
        let label = bound_value(binding, label_var)?;
        labels.insert(last_path_segment(key).to_string(), label.to_string());
    }
    Ok(labels)
}

fn bound_value<'a>(binding: &'a Binding, variable: &str) -> Result<&'a str> {
    binding
        .get(variable)
        .map(|value| value.value.as_str())
        .ok_or_else(|| WikiError::MissingVariable {
            variable: variable.to_string(),
        })
}
