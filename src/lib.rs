//! Popularity ledger service for a movie discovery front end.
//!
//! Records one occurrence per completed search that returned results and
//! serves the most-searched terms, backed by a remote document store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
