//! # Support chat responder
//!
//! A deterministic keyword classifier that maps a free-text message to one canned reply. [`respond`] is a total
//! function: every input produces a reply, and the same input always produces the same reply.
//!
//! Matching happens in three stages:
//! 1. A handful of high-priority intents, checked in a fixed order.
//! 2. The [`rules::RULES`] table, most specific rule first, matching keywords as whole words.
//! 3. [`DEFAULT_RESPONSE`].
mod matcher;
pub mod rules;

use log::trace;
pub use matcher::contains_word;
use matcher::{contains_any, contains_any_word, find_rule};
use rules::{
    ABOUT_RESPONSE,
    ADMIN_RESPONSE,
    BASIC_PREMIUM_RESPONSE,
    CATALOGUE_RESPONSE,
    GREETING_RESPONSE,
    WEBSITE_RESPONSE,
    WORLD_ELITE_RESPONSE,
};

pub const DEFAULT_RESPONSE: &str = "Thank you for your message. I'm here to help with information about Global \
    Business Pay Visa cards. You can ask about our different card types, pricing, benefits, application process, or \
    anything else related to our services. For specific questions about your account or application, please contact \
    our customer support team at support@globalbusinesspay.com or call us at +1-800-BNB-VISA.";

/// Sent in place of a reply when a reply could not be produced or stored.
pub const FALLBACK_RESPONSE: &str = "Our chat service is currently experiencing technical difficulties. Please try \
    again later or contact our support team directly at support@globalbusinesspay.com for assistance.";

const ABOUT_PHRASES: [&str; 7] = [
    "about this site",
    "what is this",
    "what is global business",
    "what do you do",
    "tell me more",
    "what is your service",
    "what services",
];

const GREETINGS: [&str; 8] =
    ["hello", "hi", "hey", "greetings", "howdy", "good morning", "good afternoon", "good evening"];

const CATALOGUE_PHRASES: [&str; 6] =
    ["what cards", "which cards", "card types", "card options", "types of card", "kinds of card"];

const ADMIN_PHRASES: [&str; 9] = [
    "admin",
    "administrator",
    "backend",
    "login",
    "dashboard",
    "management",
    "manage orders",
    "change price",
    "control panel",
];

fn special_case(message: &str) -> Option<&'static str> {
    if contains_any(message, &ABOUT_PHRASES) {
        return Some(ABOUT_RESPONSE);
    }
    if contains_any_word(message, &GREETINGS) {
        return Some(GREETING_RESPONSE);
    }
    if contains_word(message, "website") || (contains_word(message, "site") && !message.contains("visit")) {
        return Some(WEBSITE_RESPONSE);
    }
    let offers_cards = message.contains("offer") && message.contains("card");
    if contains_any(message, &CATALOGUE_PHRASES) || offers_cards || message.trim() == "cards" {
        return Some(CATALOGUE_RESPONSE);
    }
    if message.contains("world elite") {
        return Some(WORLD_ELITE_RESPONSE);
    }
    if message.contains("basic premium") {
        return Some(BASIC_PREMIUM_RESPONSE);
    }
    if contains_any(message, &ADMIN_PHRASES) {
        return Some(ADMIN_RESPONSE);
    }
    None
}

/// Pick the canned reply for a customer's chat message.
pub fn respond(message: &str) -> &'static str {
    let message = message.to_lowercase();
    if let Some(response) = special_case(&message) {
        trace!("💬️ Special case match");
        return response;
    }
    match find_rule(&message) {
        Some(rule) => {
            trace!("💬️ Matched rule with keywords {:?}", rule.keywords);
            rule.response
        },
        None => {
            trace!("💬️ No rule matched. Using the default response");
            DEFAULT_RESPONSE
        },
    }
}
