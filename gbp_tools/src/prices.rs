use anyhow::Result;
use gbp_engine::{
    db_types::Cryptocurrency,
    refresh_objects::{default_tracked_assets, RefreshOutcome, RefreshReport},
    PriceRefresher,
    PriceStoreApi,
    SqliteDatabase,
};
use gbp_price_feed::CoinGeckoApi;
use gbp_server::config::ServerConfig;
use prettytable::{
    format::{LinePosition, LineSeparator, TableFormat},
    row,
    Table,
};

pub async fn refresh_prices(config: &ServerConfig) {
    async fn refresh(config: &ServerConfig) -> Result<(RefreshReport, Vec<Cryptocurrency>)> {
        let db = SqliteDatabase::new_with_url(&config.database_url, 1).await?;
        let feed = CoinGeckoApi::new(config.price_feed.clone())?;
        println!("Fetching prices from {}", config.price_feed.base_url);
        let refresher = PriceRefresher::new(db.clone(), feed, default_tracked_assets());
        let report = refresher.refresh_once().await?;
        let cryptos = PriceStoreApi::new(db.clone()).fetch_all_cryptos().await?;
        db.close().await;
        Ok((report, cryptos))
    }
    match refresh(config).await {
        Ok((report, cryptos)) => {
            println!("{}", format_report(&report));
            println!("{}", format_cryptos(&cryptos));
        },
        Err(e) => println!("Error refreshing prices: {e}"),
    }
}

fn markdown_format() -> TableFormat {
    prettytable::format::FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separator(LinePosition::Title, LineSeparator::new('-', '|', '|', '|'))
        .padding(1, 1)
        .build()
}

pub fn format_report(report: &RefreshReport) -> String {
    let mut table = Table::new();
    table.set_titles(row!["Symbol", "Result", "Price (USD)", "Details"]);
    for (symbol, outcome) in &report.outcomes {
        let (result, price, details) = match outcome {
            RefreshOutcome::Live { price } => ("live", price.to_string(), String::new()),
            RefreshOutcome::Fallback { price, reason } => ("fallback", price.to_string(), reason.clone()),
            RefreshOutcome::Failed { reason } => ("failed", "-".to_string(), reason.clone()),
        };
        table.add_row(row![symbol, result, price, details]);
    }
    table.set_format(markdown_format());
    let elapsed = (report.finished_at - report.started_at).num_milliseconds();
    format!(
        "Price refresh finished in {elapsed} ms: {} live, {} fallback, {} failed\n{table}",
        report.live_count(),
        report.fallback_count(),
        report.failed_count()
    )
}

pub fn format_cryptos(cryptos: &[Cryptocurrency]) -> String {
    if cryptos.is_empty() {
        return "No cryptocurrencies have been set up. Run `gbptools seed` first.".to_string();
    }
    let mut table = Table::new();
    table.set_titles(row!["Symbol", "Name", "Price (USD)", "Active", "Wallet", "Last updated"]);
    for c in cryptos {
        table.add_row(row![
            c.symbol,
            c.name,
            c.usd_price.to_string(),
            if c.is_active { "yes" } else { "no" },
            c.wallet_address,
            c.last_updated.format("%Y-%m-%d %H:%M:%S").to_string()
        ]);
    }
    table.set_format(markdown_format());
    format!("{table}")
}
