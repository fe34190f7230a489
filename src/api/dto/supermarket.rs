//! Supermarket-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{City, NewSupermarket, Supermarket, UpdateSupermarket};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new supermarket.
///
/// The strict minimum-name-length rule is a domain rule checked by the
/// supermarket service; only request-shape constraints live here.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateSupermarketRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[schema(min_length = 1)]
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    #[validate(url(message = "website must be a valid URL"))]
    #[schema(format = "uri")]
    pub website: String,
}

impl CreateSupermarketRequest {
    /// Converts the request DTO into a NewSupermarket model.
    pub fn into_new_supermarket(self) -> NewSupermarket {
        NewSupermarket {
            name: self.name,
            longitude: self.longitude,
            latitude: self.latitude,
            website: self.website,
        }
    }
}

/// Request body for updating a supermarket. Absent fields keep their
/// persisted values (shallow merge).
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateSupermarketRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    #[validate(url(message = "website must be a valid URL"))]
    pub website: Option<String>,
}

impl UpdateSupermarketRequest {
    /// Converts the request DTO into an UpdateSupermarket changeset.
    pub fn into_update_supermarket(self) -> UpdateSupermarket {
        UpdateSupermarket {
            name: self.name,
            longitude: self.longitude,
            latitude: self.latitude,
            website: self.website,
        }
    }
}

/// Reference to an existing supermarket by id, used by the endpoint that
/// replaces a city's whole collection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SupermarketRef {
    pub id: Uuid,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for supermarket data.
///
/// The owning city is embedded (scalar fields only) on paths that eagerly
/// load it; otherwise just the back-reference id is exposed.
#[derive(Debug, Serialize, ToSchema)]
pub struct SupermarketResponse {
    pub id: Uuid,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub website: String,
    pub city_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<super::CityResponse>,
}

impl SupermarketResponse {
    /// Builds a response embedding the owning city, when there is one.
    pub fn with_city(market: Supermarket, city: Option<City>) -> Self {
        Self {
            city: city.map(super::CityResponse::from),
            ..Self::from(market)
        }
    }
}

impl From<Supermarket> for SupermarketResponse {
    fn from(market: Supermarket) -> Self {
        Self {
            id: market.id,
            name: market.name,
            longitude: market.longitude,
            latitude: market.latitude,
            website: market.website,
            city_id: market.city_id,
            city: None,
        }
    }
}
