//! # Global Business Pay server
//! This crate hosts the HTTP server for the Global Business Pay storefront. It is responsible for:
//! Serving the card catalogue, priced in every accepted cryptocurrency.
//! Taking card orders, together with the customer's payment receipt.
//! Storing support chat conversations and answering visitors automatically.
//! Keeping cryptocurrency prices up to date in the background.
//! Giving admins a guarded API to manage prices, cards, orders and chats.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/...`: The storefront API. Routes under `/api/admin`, and `GET /api/cryptocurrencies`, need the admin key.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod middleware;
pub mod price_worker;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
