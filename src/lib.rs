pub mod api;
pub mod app;
pub mod auth;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod sdk;
pub mod services;

// Public so integration tests under tests/ can build the app without Postgres
pub mod testing;
