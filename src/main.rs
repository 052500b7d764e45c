use anyhow::{Context, Result};
use api_docs_explorer::auth::{
    ACCESS_TOKEN_KEY, JsonFileStore, TOKEN_QUERY_PARAM, TokenResolver, page_query_params,
};
use api_docs_explorer::clipboard::{self, SystemClipboard};
use api_docs_explorer::command;
use api_docs_explorer::config::{DEFAULT_SERVICE_ROOT, ExplorerConfig, default_store_path};
use api_docs_explorer::fetcher::CatalogFetcher;
use api_docs_explorer::models::{Catalog, HttpMethod};
use api_docs_explorer::render::{EndpointId, text};
use api_docs_explorer::session::{ExplorerSession, SessionView};
use api_docs_explorer::web::{self, AppState};
use clap::{Parser, Subcommand};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "api-docs-explorer")]
#[command(about = "Searchable API documentation explorer for the booking admin backend")]
struct Cli {
    /// Root URL of the backend serving /api/docs/endpoints
    #[arg(long, global = true, env = "API_DOCS_SERVICE_ROOT", default_value = DEFAULT_SERVICE_ROOT)]
    service_root: String,
    /// Access token, as the dashboard would pass it in the `token` query parameter
    #[arg(long, global = true)]
    token: Option<String>,
    /// Dashboard page URL to read the `token` query parameter from
    #[arg(long, global = true, value_parser = reqwest::Url::parse)]
    page_url: Option<reqwest::Url>,
    /// Persisted key-value store holding `access_token`
    #[arg(long, global = true, env = "API_DOCS_STORE")]
    store: Option<PathBuf>,
    #[arg(long, global = true, default_value_t = 10)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the catalog and print it as a collapsible tree
    Explore {
        #[arg(short, long)]
        query: Option<String>,
        #[arg(long)]
        expand_all: bool,
        /// Open a category (`C`) or an endpoint (`C:E`) by index
        #[arg(short, long = "expand")]
        expand: Vec<String>,
    },
    /// Print the example curl command for one endpoint
    Command {
        #[arg(short, long)]
        category: String,
        #[arg(short, long)]
        path: String,
        #[arg(short, long)]
        method: Option<HttpMethod>,
        /// Also place the command on the system clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Serve the explorer view over HTTP
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: IpAddr,
    },
    /// Save the fetched catalog to a JSON file
    Snapshot {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Persist an access token for later runs
    SaveToken { token: String },
    /// Remove the persisted access token
    ClearToken,
}

impl Cli {
    fn config(&self) -> ExplorerConfig {
        ExplorerConfig {
            service_root: self.service_root.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            store_path: self.store.clone().unwrap_or_else(default_store_path),
        }
    }

    /// `--token` plays the part of the page's own query parameter and is
    /// consulted before any `--page-url`.
    fn resolver(&self, store: JsonFileStore) -> TokenResolver<JsonFileStore> {
        let mut query_params = Vec::new();
        if let Some(token) = &self.token {
            query_params.push((TOKEN_QUERY_PARAM.to_string(), token.clone()));
        }
        if let Some(url) = &self.page_url {
            query_params.extend(page_query_params(url));
        }
        TokenResolver::new(query_params, store)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    match &cli.command {
        Commands::Explore { query, expand_all, expand } => {
            let mut session = load_session(&cli, &config).await?;
            require_loaded(&session)?;
            if let Some(query) = query {
                session.set_query(query.as_str());
            }
            if *expand_all {
                session.expand_all()?;
            }
            for target in expand {
                open_node(&mut session, target)?;
            }
            if let SessionView::Loaded { tree, .. } = session.view() {
                print!("{}", text::paint(&tree));
            }
        }
        Commands::Command { category, path, method, copy } => {
            let session = load_session(&cli, &config).await?;
            let catalog = require_loaded(&session)?;
            let endpoint = session.find_endpoint(category, path, *method)?;
            let command = command::synthesize(endpoint, &catalog.base_url);
            println!("{}", command);

            if *copy {
                let mut sink = SystemClipboard::open()?;
                let ack = clipboard::copy_command(&mut sink, &command)?;
                eprintln!("{}", ack);
            }
        }
        Commands::Serve { port, host } => {
            let store = JsonFileStore::load(&config.store_path)?;
            let resolver = cli.resolver(store);
            let fetcher = CatalogFetcher::new(&config)?;
            let mut session = ExplorerSession::new();
            session.load(&resolver, &fetcher).await;
            if let Some(failure) = session.failure() {
                tracing::warn!("starting with no catalog: {}", failure.remediation());
            }

            let state = Arc::new(AppState {
                session: RwLock::new(session),
                resolver,
                fetcher,
            });
            web::run_server(SocketAddr::new(*host, *port), state).await;
        }
        Commands::Snapshot { output } => {
            let session = load_session(&cli, &config).await?;
            require_loaded(&session)?;
            let snapshot = session
                .snapshot(&config.service_root)
                .context("catalog disappeared before snapshot")?;

            let output_path = output
                .clone()
                .unwrap_or_else(|| PathBuf::from("data/snapshots/catalog.json"));
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output_path, serde_json::to_string_pretty(&snapshot)?)?;
            println!("Catalog saved to: {}", output_path.display());
        }
        Commands::SaveToken { token } => {
            let mut store = JsonFileStore::load(&config.store_path)?;
            store.set(ACCESS_TOKEN_KEY, token.trim());
            store.save()?;
            println!("Access token saved to {}", store.path().display());
        }
        Commands::ClearToken => {
            let mut store = JsonFileStore::load(&config.store_path)?;
            if store.remove(ACCESS_TOKEN_KEY).is_some() {
                store.save()?;
                println!("Access token removed from {}", store.path().display());
            } else {
                println!("No access token stored");
            }
        }
    }

    Ok(())
}

async fn load_session(cli: &Cli, config: &ExplorerConfig) -> Result<ExplorerSession> {
    let store = JsonFileStore::load(&config.store_path)?;
    let resolver = cli.resolver(store);
    let fetcher = CatalogFetcher::new(config)?;
    let mut session = ExplorerSession::new();
    session.load(&resolver, &fetcher).await;
    Ok(session)
}

fn require_loaded(session: &ExplorerSession) -> Result<&Catalog> {
    if let Some(failure) = session.failure() {
        return Err(anyhow::Error::new(failure.clone()).context(failure.remediation()));
    }
    session.catalog().context("catalog was not loaded")
}

/// Opens `C` or `C:E` without collapsing anything already open.
fn open_node(session: &mut ExplorerSession, target: &str) -> Result<()> {
    let (category, endpoint) = match target.split_once(':') {
        Some((c, e)) => (c, Some(e)),
        None => (target, None),
    };
    let category: usize = category
        .trim()
        .parse()
        .with_context(|| format!("invalid category index in --expand {}", target))?;

    if !session.expansion().is_category_expanded(category) {
        session.toggle_category(category)?;
    }
    if let Some(endpoint) = endpoint {
        let endpoint: usize = endpoint
            .trim()
            .parse()
            .with_context(|| format!("invalid endpoint index in --expand {}", target))?;
        let id = EndpointId::new(category, endpoint);
        if !session.expansion().is_endpoint_expanded(id) {
            session.toggle_endpoint(id)?;
        }
    }
    Ok(())
}
