//! Mercado-RS Library
//!
//! Core library modules for the mercado-rs web application: a CRUD backend
//! managing cities and supermarkets with association endpoints.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;
