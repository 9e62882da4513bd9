mod export;
mod fetch;
mod grid;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use variantdesk_core::Column;

#[derive(Debug, Parser)]
#[command(name = "variantdesk")]
#[command(about = "Fetch and browse Trendyol color-variant listings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch one or more color-variants URLs and print the merged grid
    Fetch {
        /// Color-variants endpoint URLs, fetched in order
        #[arg(required = true)]
        urls: Vec<String>,
        /// Field to search in: name, product_id or barcode
        #[arg(long, default_value = "name")]
        search_field: String,
        /// Case-insensitive substring to filter rows by
        #[arg(long)]
        search: Option<String>,
        /// Column to sort the grid by (e.g. price_current)
        #[arg(long)]
        sort: Option<Column>,
        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Write every fetched record to a spreadsheet (defaults to the configured path;
        /// `.csv` and `.json` paths are written in that format)
        #[arg(long)]
        export: Option<Option<PathBuf>>,
    },
    /// Interactive session (the default)
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = variantdesk_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Fetch {
            urls,
            search_field,
            search,
            sort,
            desc,
            export,
        }) => {
            let options = fetch::FetchOptions {
                search_field: variantdesk_core::SearchField::parse_or_name(&search_field),
                query: search.unwrap_or_default(),
                sort: sort.map(|column| variantdesk_core::SortState {
                    column,
                    descending: desc,
                }),
                export: export.map(|path| path.unwrap_or_else(|| config.export_path.clone())),
            };
            fetch::run_fetch(&config, &urls, options).await
        }
        Some(Commands::Shell) | None => shell::run_shell(&config).await,
    }
}
