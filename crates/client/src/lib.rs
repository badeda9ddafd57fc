//! Client code for favicache.
//!
//! This crate provides the HTTP fetch pipeline and the favicon discovery
//! implementation shared by the server and CLI.

pub mod discover;
pub mod fetch;

pub use discover::{HttpDiscoverer, IconLink, best_icon, extract_icon_links};

pub use fetch::{FetchClient, FetchConfig, FetchResponse};
