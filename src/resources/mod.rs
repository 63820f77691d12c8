pub mod commons;
pub mod labels;
pub mod search;
pub mod sparql;

pub use commons::{fetch_and_format_media_metadata, fetch_media_metadata, format_media_metadata};
pub use labels::EntityLabelClient;
pub use search::{fetch_search_results, process_search_results, search_keyword, DEFAULT_LANGUAGE};
pub use sparql::{
    labels_from_bindings, process_item_bindings, process_property_bindings, Binding, SparqlClient,
    SparqlValue,
};
