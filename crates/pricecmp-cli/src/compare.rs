//! `aggregate` and `batch` command handlers.
//!
//! A batch fans out across queries with bounded concurrency. Each query is
//! independent; a blank query in the file is skipped, never fatal.

use std::path::Path;

use futures::stream::{self, StreamExt};
use pricecmp_core::{AggregationResult, SearchProvider};
use pricecmp_engine::{AggregateOptions, Aggregator};
use rust_decimal::Decimal;

const STORE_WIDTH: usize = 28;
const TITLE_LIMIT: usize = 60;

pub(crate) fn options(limit: Option<usize>, include_international: bool) -> AggregateOptions {
    AggregateOptions {
        limit,
        domestic_only: !include_international,
    }
}

/// Aggregate one query and print the result.
///
/// # Errors
///
/// Returns an error for a blank query or if JSON encoding fails.
pub(crate) async fn run_aggregate<P: SearchProvider>(
    aggregator: &Aggregator<P>,
    query: &str,
    options: &AggregateOptions,
    json: bool,
) -> anyhow::Result<()> {
    let result = aggregator.aggregate(query, options).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_table(query, &result));
    }
    Ok(())
}

/// Aggregate every query in `file`, at most `max_concurrent` at a time.
///
/// Results print in completion order, each labelled with its query.
///
/// # Errors
///
/// Returns an error if the file cannot be read or JSON encoding fails.
pub(crate) async fn run_batch<P: SearchProvider>(
    aggregator: &Aggregator<P>,
    file: &Path,
    max_concurrent: usize,
    json: bool,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
    let queries = parse_batch(&content);
    if queries.is_empty() {
        println!("no queries found in {}", file.display());
        return Ok(());
    }

    let options = AggregateOptions::default();
    let results: Vec<(&str, Result<AggregationResult, _>)> = stream::iter(queries)
        .map(|q| {
            let options = &options;
            async move { (q, aggregator.aggregate(q, options).await) }
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    let mut priced = 0usize;
    for (query, outcome) in &results {
        match outcome {
            Ok(result) => {
                if !result.is_empty() {
                    priced += 1;
                }
                if json {
                    let line = serde_json::json!({ "query": query, "result": result });
                    println!("{line}");
                } else {
                    print!("{}", render_table(query, result));
                    println!();
                }
            }
            Err(e) => tracing::warn!(query, error = %e, "skipping query"),
        }
    }

    tracing::info!(
        queries = results.len(),
        priced,
        "batch complete"
    );
    Ok(())
}

/// Queries from a batch file: one per line, trimmed, skipping blank lines
/// and `#` comments.
pub(crate) fn parse_batch(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Ranked comparison table, or a "no prices found" line for an empty result.
pub(crate) fn render_table(query: &str, result: &AggregationResult) -> String {
    if result.is_empty() {
        return format!("no prices found for \"{query}\"\n");
    }

    let mut out = format!("{query}\n");
    out.push_str(&format!("{:<4}{:<STORE_WIDTH$}{:>12}  URL\n", "#", "STORE", "PRICE"));
    for (i, offer) in result.offers.iter().enumerate() {
        out.push_str(&format!(
            "{:<4}{:<STORE_WIDTH$}{:>12}  {}\n",
            i + 1,
            truncate(&offer.store.display_name, STORE_WIDTH - 2),
            format_usd(offer.price),
            truncate(&offer.url, TITLE_LIMIT),
        ));
    }

    out.push_str(&format!("stores: {}", result.total_stores));
    if let (Some(price), Some(store)) = (result.best_price, result.best_store.as_deref()) {
        out.push_str(&format!("  best: {} at {store}", format_usd(price)));
    }
    if let Some(savings) = result.max_savings {
        out.push_str(&format!("  max savings: {}", format_usd(savings)));
    }
    out.push('\n');
    out
}

fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_owned()
    }
}
