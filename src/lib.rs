pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod resources;
pub mod transport;
pub mod utils;

pub use client::WikiClient;
pub use config::WikiConfig;
pub use domain::{LabelMap, MediaKind, MediaMetadata, MediaRecord, SearchResult};
pub use error::{Result, WikiError};
pub use resources::{EntityLabelClient, SparqlClient};
pub use transport::{ApiSession, HttpApiSession, HttpTransport, ReqwestTransport};
