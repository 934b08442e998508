mod cli;
mod inspect;
mod recorded;

use std::path::Path;

use clap::Parser;
use eyre::WrapErr;
use futures::TryStreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sift_core::event::Event;
use sift_core::response::CoinObject;
use sift_core::rpc::{self, JsonPageFetcher};
use sift_core::{Digest, EventId, ObjectId};

use cli::{Cli, Command, ListingKind};
use recorded::RecordedPages;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    match args.command {
        Command::Effects { path } => {
            let raw = tokio::fs::read(&path)
                .await
                .wrap_err_with(|| format!("read recording {}", path.display()))?;
            let recorded = inspect::decode_recorded(&raw)
                .wrap_err_with(|| format!("decode recording {}", path.display()))?;
            for line in inspect::summarize(&recorded) {
                println!("{line}");
            }
        }
        Command::Walk {
            kind,
            cursor,
            limit,
            path,
        } => {
            let cursor = cursor.as_deref();
            let printed = match kind {
                ListingKind::Coins => {
                    walk_listing::<CoinObject, ObjectId>(&path, cursor, limit, |coin| {
                        format!("{} {} {}", coin.coin_object_id, coin.balance, coin.coin_type)
                    })
                    .await?
                }
                ListingKind::Transactions => {
                    walk_listing::<Digest, String>(&path, cursor, limit, Digest::to_string).await?
                }
                ListingKind::Events => {
                    walk_listing::<Event, EventId>(&path, cursor, limit, Event::to_string).await?
                }
            };
            tracing::info!(items = printed, ?kind, "walk finished");
        }
    }

    Ok(())
}

/// Walk a recorded listing from `cursor` (JSON text) and print each item.
/// Returns how many items were printed.
async fn walk_listing<T, C>(
    path: &Path,
    cursor: Option<&str>,
    limit: Option<usize>,
    render: impl Fn(&T) -> String,
) -> eyre::Result<usize>
where
    T: DeserializeOwned + Send + 'static,
    C: Serialize + DeserializeOwned + Clone + Send + 'static,
{
    let start: Option<C> = cursor
        .map(serde_json::from_str)
        .transpose()
        .wrap_err("--cursor must be a JSON-encoded cursor of the listing's type")?;

    let source = RecordedPages::load(path).await?;
    tracing::info!(pages = source.page_count(), path = %path.display(), "loaded recording");

    let fetcher: JsonPageFetcher<_, T, C> = JsonPageFetcher::new(source);
    let mut items = std::pin::pin!(rpc::walk(&fetcher, start));

    let mut printed = 0;
    while limit.map_or(true, |max| printed < max) {
        let Some(item) = items.try_next().await.wrap_err("walk recorded listing")? else {
            break;
        };
        println!("{}", render(&item));
        printed += 1;
    }
    Ok(printed)
}
