mod admin;
mod cards;
mod helpers;
mod messages;
mod mocks;
mod orders;
