pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod frontier;
pub mod output;
pub mod strong_ties;
pub mod tfidf;
