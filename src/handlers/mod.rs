pub mod auth;
pub mod questions;
