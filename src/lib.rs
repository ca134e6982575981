//! voxcart: voice-driven product search across several shopping providers.
//!
//! A spoken or typed request is turned into a search intent (query plus
//! price, brand and category filters), sent to every configured provider
//! concurrently, and answered with one result per provider in a fixed order.
//!
//! # Architecture
//!
//! - **`voxcart-search`**: intent extraction, provider adapters, response
//!   cache and the aggregator. Never fails; unavailable providers answer
//!   with built-in sample data.
//! - **Voice capture**: the [`voice::VoiceCapture`] port yields a final transcript
//! - **History**: [`history::RecentSearches`] remembers the last few queries
//! - **Entry point**: [`search::SearchService`] ties the above together

pub mod config;
pub mod error;
pub mod history;
pub mod search;
pub mod voice;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use history::{FileStore, KeyValueStore, MemoryStore, RecentSearches};
pub use search::{SearchResponse, SearchService, USER_ERROR_MESSAGE};
pub use voice::{CaptureError, ScriptedCapture, Transcript, VOICE_TIPS, VoiceCapture};

pub use voxcart_search;
