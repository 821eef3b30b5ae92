use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Render the site's views from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file path (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Override the content root URL from the config
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// Log filter (overridden by RUST_LOG when set)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a view through the full pipeline and print its HTML
    Render {
        /// View name (Home, PostFeed, Portfolio, About)
        #[arg(long, conflicts_with = "query")]
        view: Option<String>,

        /// View options as a JSON object, e.g. '{"maxItems": 3}'
        #[arg(long, requires = "view")]
        options: Option<String>,

        /// Deep-link query string, e.g. "q=view-post&id=my-post"
        #[arg(long)]
        query: Option<String>,
    },

    /// Clear the persisted session
    Reset,

    /// Print the effective configuration
    Config,
}
