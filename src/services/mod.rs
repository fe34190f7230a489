//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod city_market_service;
mod city_service;
mod supermarket_service;

pub use city_market_service::{CityMarketService, CityStore, MarketStore};
pub use city_service::{ALLOWED_COUNTRIES, CityService};
pub use supermarket_service::{MIN_NAME_LENGTH, SupermarketService};

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub cities: CityService,
    pub supermarkets: SupermarketService,
    pub city_markets: CityMarketService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            cities: CityService::new(repos.cities.clone()),
            supermarkets: SupermarketService::new(repos.supermarkets.clone()),
            city_markets: CityMarketService::new(repos.cities, repos.supermarkets),
        }
    }
}
