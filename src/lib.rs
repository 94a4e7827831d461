pub mod aggregator;
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod service;
pub mod types;
