use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use folio_fetch::{Fetcher, HttpFetcher, SvgCache};
use folio_index::Catalog;
use folio_runtime::{FileSessionStore, SessionStore, ViewManager};

use crate::args::{Cli, Commands};
use crate::config::Config;
use crate::views::{self, SiteContext};

pub fn run(cli: Cli) -> Result<()> {
    init_tracing(&cli.log_level);

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let mut config = Config::load_from(&config_path)?;
    if let Some(root) = cli.root {
        config.site_root = root;
    }

    match cli.command {
        Commands::Render {
            view,
            options,
            query,
        } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(render(&config, &config_path, view, options, query))
        }

        Commands::Reset => {
            let session = FileSessionStore::new(config.session_path(&config_path));
            session.clear().context("could not clear the session")?;
            println!("Session cleared.");
            Ok(())
        }

        Commands::Config => {
            println!("# {}", config_path.display());
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn render(
    config: &Config,
    config_path: &Path,
    view: Option<String>,
    options: Option<String>,
    query: Option<String>,
) -> Result<()> {
    info!(root = %config.site_root, "rendering against site root");

    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(config.site_root.clone()));
    let context = Arc::new(SiteContext {
        catalog: Catalog::new(fetcher.clone()),
        svg: SvgCache::new(fetcher),
        posts_per_page: config.posts_per_page,
    });
    let registry = views::registry(context);

    let session: Arc<dyn SessionStore> =
        Arc::new(FileSessionStore::new(config.session_path(config_path)));
    let manager = ViewManager::new(registry, session, "Home");

    match (view, query) {
        (Some(view), _) => {
            let options = options
                .map(|raw| serde_json::from_str(&raw))
                .transpose()
                .context("--options must be a JSON object")?;
            manager.show_view(&view, options).await?;
        }
        (None, query) => manager.initialize(query.as_deref()).await?,
    }

    println!("{}", manager.pane().content());
    Ok(())
}
