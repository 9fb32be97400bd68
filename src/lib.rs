pub mod config;
pub mod error;
pub mod geo;
pub mod import;
pub mod indexer;
pub mod panel;
pub mod photo;
pub mod processor;
pub mod selection;
pub mod session;
pub mod store;
pub mod store_clients;
pub mod walker;
pub mod web_server;

#[cfg(test)]
mod fixtures;
