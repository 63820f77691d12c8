use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wikiflat::config::{
    DEFAULT_COMMONS_BASE_URL, DEFAULT_SPARQL_ENDPOINT, DEFAULT_USER_AGENT, DEFAULT_WIKIDATA_BASE_URL,
};
use wikiflat::{WikiClient, WikiConfig};

#[derive(Parser)]
#[command(name = "wikiflat", version, about = "Flattened Wikidata and Commons lookups", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
    #[arg(long, env = "WIKIFLAT_WIKIDATA_URL", default_value = DEFAULT_WIKIDATA_BASE_URL, global = true)]
    wikidata_url: String,
    #[arg(long, env = "WIKIFLAT_COMMONS_URL", default_value = DEFAULT_COMMONS_BASE_URL, global = true)]
    commons_url: String,
    #[arg(long, env = "WIKIFLAT_SPARQL_ENDPOINT", default_value = DEFAULT_SPARQL_ENDPOINT, global = true)]
    sparql_endpoint: String,
    #[arg(long, env = "WIKIFLAT_USER_AGENT", default_value = DEFAULT_USER_AGENT, global = true)]
    user_agent: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Search Wikidata items by keyword.
    Search {
        keyword: String,
        #[arg(long, default_value = "en")]
        language: String,
    },
    /// List every property, or only external-identifier properties.
    Properties {
        #[arg(long)]
        external_id: bool,
    },
    /// Resolve labels for item and property ids.
    Labels {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long, default_value = "en")]
        lang: String,
        /// Resolve through the query service (English only) instead of wbgetentities.
        #[arg(long)]
        sparql: bool,
    },
    /// Fetch Commons metadata for file titles.
    Media {
        #[arg(required = true)]
        titles: Vec<String>,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = WikiConfig::new()
        .with_wikidata_base_url(cli.wikidata_url)
        .with_commons_base_url(cli.commons_url)
        .with_sparql_endpoint(cli.sparql_endpoint)
        .with_user_agent(cli.user_agent);
    let client = WikiClient::new(config).context("cannot set up the HTTP client")?;

    match cli.command {
        Commands::Search { keyword, language } => {
            let results = client
                .search_keyword(&keyword, &language)
                .with_context(|| format!("search for {keyword:?} failed"))?;
            info!(%keyword, hits = results.len(), "search done");
            print_json(&results)?;
        }
        Commands::Properties { external_id } => {
            let properties = if external_id {
                client.sparql().fetch_and_format_external_id_properties()
            } else {
                client.sparql().fetch_and_format_all_properties()
            }
            .context("property query failed")?;
            info!(properties = properties.len(), external_id, "properties fetched");
            print_json(&properties)?;
        }
        Commands::Labels { ids, lang, sparql } => {
            let labels = if sparql {
                client.sparql().fetch_and_format_labels_for_ids(&ids)
            } else {
                client.labels_for_ids(&ids, &lang)
            }
            .context("label lookup failed")?;
            info!(requested = ids.len(), resolved = labels.len(), "labels fetched");
            print_json(&labels)?;
        }
        Commands::Media { titles } => {
            let metadata = client
                .media_metadata(&titles)
                .context("media metadata lookup failed")?;
            info!(requested = titles.len(), found = metadata.len(), "media metadata fetched");
            print_json(&metadata)?;
        }
    }

    Ok(())
}
