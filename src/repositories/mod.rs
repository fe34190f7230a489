//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for all domain entities.

mod city_repo;
mod supermarket_repo;

pub use city_repo::CityRepository;
pub use supermarket_repo::SupermarketRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub cities: CityRepository,
    pub supermarkets: SupermarketRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            cities: CityRepository::new(pool.clone()),
            supermarkets: SupermarketRepository::new(pool),
        }
    }
}
