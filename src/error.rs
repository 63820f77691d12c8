use thiserror::Error;

pub type Result<T> = std::result::Result<T, WikiError>;

#[derive(Debug, Error)]
pub enum WikiError {
    #[error("HTTP transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The query service answered with something that is not a SPARQL JSON result.
    #[error("invalid query: {message}")]
    Query {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Service(String),

    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    #[error("unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("query result binding has no `{variable}` variable")]
    MissingVariable { variable: String },

    #[error("at least one identifier is required")]
    EmptyIdList,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl WikiError {
    pub fn is_query_decode(&self) -> bool {
        matches!(self, WikiError::Query { .. })
    }
}
