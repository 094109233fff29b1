//! SoulGraph Feed
//!
//! Fetches a user's feed from the social API and prints it ranked as JSON.
//!
//! ```text
//! soulgraph-feed <user-id> [recent|popular|relevant] [text,image,video]
//! ```
//!
//! Without a sort argument the configured `FEED_DEFAULT_SORT` is used; without
//! a content-type list every type is shown.

use anyhow::Context;
use std::io::Write;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use soulgraph::social::{FeedFilter, PostContentType, SortBy};
use soulgraph::{Config, Error, Result, SocialClient};

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        error!(code = e.error_code(), "❌ {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    info!("🔮 SoulGraph Feed v{}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let user_id = args
        .next()
        .ok_or_else(|| Error::config("usage: soulgraph-feed <user-id> [sort] [content-types]"))?;

    // Load configuration
    let config = Config::from_env()?;
    info!("✅ Configuration loaded and validated");

    let sort_by = match args.next() {
        Some(raw) => raw
            .parse::<SortBy>()
            .map_err(|message| Error::InvalidConfig {
                key: "sort",
                message: message.into(),
            })?,
        None => config.feed.default_sort,
    };
    let content_types = match args.next() {
        Some(raw) => parse_content_types(&raw)?,
        None => Vec::new(),
    };

    let client = SocialClient::from_config(&config.api)?;
    let ranker = config.feed.ranker();
    let filter = FeedFilter {
        content_types,
        sort_by,
    };

    let items = client.fetch_ranked_feed(&user_id, &filter, &ranker).await?;
    info!("📰 {} feed items for {} (sort={})", items.len(), user_id, sort_by);

    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &items).context("failed to write feed to stdout")?;
    writeln!(out).context("failed to write feed to stdout")?;
    Ok(())
}

fn parse_content_types(raw: &str) -> Result<Vec<PostContentType>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<PostContentType>().map_err(|message| Error::InvalidConfig {
                key: "content-types",
                message: message.into(),
            })
        })
        .collect()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Default log levels
        EnvFilter::new("soulgraph=debug,reqwest=warn,info")
    });

    // Logs go to stderr so stdout stays pure JSON
    if std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(std::env::var("NO_COLOR").is_err()),
            )
            .init();
    }
}
