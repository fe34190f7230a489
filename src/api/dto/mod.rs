//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `city` - City-related request/response DTOs
//! - `supermarket` - Supermarket-related request/response DTOs
//! - `error` - Common error response DTOs

mod city;
mod error;
mod supermarket;

pub use city::{CityResponse, CreateCityRequest, UpdateCityRequest};
pub use error::ErrorResponse;
pub use supermarket::{
    CreateSupermarketRequest, SupermarketRef, SupermarketResponse, UpdateSupermarketRequest,
};
