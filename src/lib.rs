pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod services;
pub mod types;
