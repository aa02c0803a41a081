//! Mastodon API client.

mod client;
mod dto;

pub use client::MastodonClient;
