//! Types shared by every crate in the Global Business Pay workspace.
//!
//! * [`CryptoAmount`] is the single place where crypto amounts are derived from USD prices, so that every price shown
//!   to a customer and every amount validated at checkout agrees to the last decimal.
//! * [`Secret`] hides configuration secrets from logs.
mod amount;

pub mod helpers;
pub mod op;
mod secret;

pub use amount::{round_to_crypto_precision, CryptoAmount, CryptoAmountError, CRYPTO_DECIMALS};
pub use secret::Secret;
