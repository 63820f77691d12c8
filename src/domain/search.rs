use serde::{Deserialize, Serialize};

/// One entry of a `wbsearchentities` response, as sent by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub language: String,
}

impl SearchResult {
    /// Falls back to the first alias when the hit carries no label. The
    /// language is the one the search was issued with.
    pub fn from_hit(hit: SearchHit, language: &str) -> Self {
        let label = hit.label.or_else(|| hit.aliases.into_iter().next());
        Self {
            id: hit.id,
            label,
            description: hit.description,
            url: hit.url,
            language: language.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(json: &str) -> SearchHit {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn label_wins_over_aliases() {
        let result = SearchResult::from_hit(
            hit(r#"{"id": "Q42", "label": "Douglas Adams", "aliases": ["DNA"], "url": "//www.wikidata.org/wiki/Q42"}"#),
            "en",
        );
        assert_eq!(result.label.as_deref(), Some("Douglas Adams"));
        assert_eq!(result.description, None);
    }

    #[test]
    fn first_alias_is_used_without_label() {
        let result = SearchResult::from_hit(
            hit(r#"{"id": "Q1", "aliases": ["Foo", "Bar"], "url": "//x/Q1", "description": "d"}"#),
            "fr",
        );
        assert_eq!(result.label.as_deref(), Some("Foo"));
        assert_eq!(result.description.as_deref(), Some("d"));
        assert_eq!(result.language, "fr");
    }

    #[test]
    fn label_is_null_without_label_or_aliases() {
        let result = SearchResult::from_hit(hit(r#"{"id": "Q2", "url": "//x/Q2"}"#), "en");
        assert_eq!(result.label, None);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["label"].is_null());
        assert!(json["description"].is_null());
    }
}
