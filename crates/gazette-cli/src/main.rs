use clap::{Parser, Subcommand};
use gazette_core::SourceKind;
use gazette_scraper::GazetteScraper;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gazette-cli")]
#[command(about = "Dal Gazette scraper command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape the article list and print it as JSON
    Articles {
        /// Source to scrape (`rss` or `page`); defaults to `GAZETTE_SOURCE`
        #[arg(long)]
        source: Option<SourceKind>,
    },
    /// Fetch one article page and print its extracted body
    Content {
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = gazette_core::load_app_config()?;

    // stdout carries the command output
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let scraper = GazetteScraper::from_config(&config)?;

    match cli.command {
        Commands::Articles { source } => {
            let source = source.unwrap_or(config.source);
            let batch = scraper.fetch_articles(source).await;
            tracing::info!(
                source = %source,
                count = batch.articles.len(),
                origin = ?batch.origin,
                "article batch ready"
            );
            println!("{}", serde_json::to_string_pretty(&batch.articles)?);
        }
        Commands::Content { url } => {
            let content = scraper.fetch_article_content(&url).await?;
            println!("{content}");
        }
    }

    Ok(())
}
