use std::collections::HashMap;

use log::*;
use serde_json::Value;

/// Extracts the USD quotes from a simple price response, `{ "bitcoin": { "usd": 67000.5 }, ... }`.
///
/// Entries without a numeric `usd` field are skipped, so the refresher treats them as if the feed had not quoted them
/// at all.
pub fn parse_usd_prices(body: &Value) -> HashMap<String, f64> {
    let Some(entries) = body.as_object() else {
        return HashMap::new();
    };
    entries
        .iter()
        .filter_map(|(id, quote)| match quote.get("usd").and_then(Value::as_f64) {
            Some(price) => Some((id.clone(), price)),
            None => {
                debug!("💱️ Ignoring unusable quote for {id}: {quote}");
                None
            },
        })
        .collect()
}
