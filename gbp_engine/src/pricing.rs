//! # Pricing engine
//!
//! Converts a USD base price into an amount of every payment currency. These functions are pure: they never fail and
//! never touch storage. Both the product listing and the order intake use them, so the amount a customer sees is the
//! amount the server validates against.
use std::collections::BTreeMap;

use gbp_common::CryptoAmount;
use serde::{Deserialize, Serialize};

use crate::db_types::{Card, Cryptocurrency};

/// Per-symbol crypto amounts for `base_price_usd`.
///
/// Currencies with a zero, negative or non-finite price are left out of the result. A negative or non-finite base price
/// gives an empty map.
pub fn compute_prices<'a, I>(base_price_usd: f64, cryptos: I) -> BTreeMap<String, CryptoAmount>
where I: IntoIterator<Item = &'a Cryptocurrency> {
    cryptos
        .into_iter()
        .filter_map(|c| CryptoAmount::from_usd(base_price_usd, c.usd_price).map(|amount| (c.symbol.clone(), amount)))
        .collect()
}

/// The amount of a single currency needed to pay `base_price_usd`. `None` if the currency has no usable price.
pub fn price_in(base_price_usd: f64, crypto: &Cryptocurrency) -> Option<CryptoAmount> {
    CryptoAmount::from_usd(base_price_usd, crypto.usd_price)
}

/// A card annotated with its price in every currency that was passed to [`price_card`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedCard {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: String,
    pub base_price_usd: f64,
    pub crypto_prices: BTreeMap<String, CryptoAmount>,
}

pub fn price_card(card: Card, cryptos: &[Cryptocurrency]) -> PricedCard {
    let crypto_prices = compute_prices(card.base_price_usd, cryptos);
    PricedCard {
        id: card.id,
        name: card.name,
        description: card.description,
        image_url: card.image_url,
        base_price_usd: card.base_price_usd,
        crypto_prices,
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;

    use super::*;

    fn crypto(symbol: &str, usd_price: f64) -> Cryptocurrency {
        Cryptocurrency {
            id: 1,
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            usd_price,
            wallet_address: "wallet".to_string(),
            is_active: true,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn bnb_at_500_prices_a_1000_dollar_card_at_two() {
        let prices = compute_prices(1000.0, &[crypto("BNB", 500.0)]);
        assert_eq!(prices.len(), 1);
        assert_eq!(prices["BNB"].to_string(), "2.00000000");
    }

    #[test]
    fn invalid_prices_are_excluded() {
        let cryptos = [
            crypto("BTC", 62541.2),
            crypto("ZERO", 0.0),
            crypto("NEG", -1.0),
            crypto("NAN", f64::NAN),
            crypto("INF", f64::INFINITY),
        ];
        let prices = compute_prices(500.0, &cryptos);
        assert_eq!(prices.keys().collect::<Vec<_>>(), vec!["BTC"]);
        assert_eq!(prices["BTC"].to_string(), "0.00799473");
    }

    #[test]
    fn bad_base_price_gives_empty_map() {
        let cryptos = [crypto("BTC", 62541.2)];
        assert!(compute_prices(f64::NAN, &cryptos).is_empty());
        assert!(compute_prices(-10.0, &cryptos).is_empty());
        assert!(compute_prices(1000.0, &[]).is_empty());
    }

    #[test]
    fn round_trip_stays_within_half_a_unit() {
        let bases = [0.01, 1.0, 500.0, 1000.0, 1234.56, 2500.0, 3000.0, 99999.99];
        let prices = [0.1183, 0.5, 1.0, 605.3, 3051.8, 62541.2, 123456.789];
        for base in bases {
            for price in prices {
                let amount = compute_prices(base, &[crypto("X", price)])["X"];
                assert_eq!(amount.value(), (base / price * 1e8).round() / 1e8);
                // Rounding moves the amount by at most half of the smallest unit
                let error = (amount.to_usd(price) - base).abs();
                assert!(error <= 0.5e-8 * price + 1e-9 * base, "base {base}, price {price}, error {error}");
            }
        }
    }

    #[test]
    fn priced_card_carries_base_price() {
        let card = Card {
            id: 7,
            name: "Gold Visa".into(),
            description: Some("Premium card with enhanced benefits".into()),
            base_price_usd: 1000.0,
            image_url: "https://i.imgur.com/ZKlpSSb.jpg".into(),
        };
        let priced = price_card(card, &[crypto("BNB", 500.0), crypto("ETH", 3051.8)]);
        assert_eq!(priced.id, 7);
        assert_eq!(priced.base_price_usd, 1000.0);
        assert_eq!(priced.crypto_prices["BNB"].value(), 2.0);
        assert_eq!(priced.crypto_prices["ETH"].to_string(), "0.32767547");
        let json = serde_json::to_value(&priced).unwrap();
        assert_eq!(json["crypto_prices"]["BNB"], serde_json::json!(2.0));
    }
}
