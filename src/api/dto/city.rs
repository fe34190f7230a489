//! City-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::SupermarketResponse;
use crate::models::{City, NewCity, Supermarket, UpdateCity};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new city.
///
/// The country allow-list is a domain rule checked by the city service, not
/// a request-shape concern, so it is deliberately absent here.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCityRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[schema(min_length = 1)]
    pub name: String,
    pub country: String,
    #[validate(range(min = 0, message = "population must be non-negative"))]
    #[schema(minimum = 0)]
    pub population: i64,
}

impl CreateCityRequest {
    /// Converts the request DTO into a NewCity model for database insertion.
    pub fn into_new_city(self) -> NewCity {
        NewCity {
            name: self.name,
            country: self.country,
            population: self.population,
        }
    }
}

/// Request body for updating a city. Absent fields keep their persisted
/// values (shallow merge).
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCityRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub country: Option<String>,
    #[validate(range(min = 0, message = "population must be non-negative"))]
    pub population: Option<i64>,
}

impl UpdateCityRequest {
    /// Converts the request DTO into an UpdateCity changeset.
    pub fn into_update_city(self) -> UpdateCity {
        UpdateCity {
            name: self.name,
            country: self.country,
            population: self.population,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for city data.
///
/// The supermarket collection is only present on paths that eagerly load
/// the association; scalar-only lookups omit the field entirely.
#[derive(Debug, Serialize, ToSchema)]
pub struct CityResponse {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub population: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supermarkets: Option<Vec<SupermarketResponse>>,
}

impl CityResponse {
    /// Builds a response including the city's supermarket collection.
    pub fn with_markets(city: City, markets: Vec<Supermarket>) -> Self {
        let markets = markets.into_iter().map(SupermarketResponse::from).collect();
        Self {
            supermarkets: Some(markets),
            ..Self::from(city)
        }
    }
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            country: city.country,
            population: city.population,
            supermarkets: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn create_request_accepts_valid_payload() {
        let request = CreateCityRequest {
            name: "Springfield".to_string(),
            country: "Ecuador".to_string(),
            population: 50_000,
        };
        assert!(request.validate().is_ok());

        let new_city = request.into_new_city();
        assert_eq!(new_city.name, "Springfield");
        assert_eq!(new_city.population, 50_000);
    }

    #[test]
    fn create_request_rejects_negative_population() {
        let request = CreateCityRequest {
            name: "Springfield".to_string(),
            country: "Ecuador".to_string(),
            population: -1,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn scalar_response_omits_collection() {
        let city = City {
            id: Uuid::new_v4(),
            name: "Springfield".to_string(),
            country: "Ecuador".to_string(),
            population: 50_000,
        };
        let response = CityResponse::from(city);
        assert!(response.supermarkets.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("supermarkets").is_none());
    }

    #[test]
    fn eager_response_embeds_collection() {
        let city = City {
            id: Uuid::new_v4(),
            name: "Springfield".to_string(),
            country: "Ecuador".to_string(),
            population: 50_000,
        };
        let market = Supermarket {
            id: Uuid::new_v4(),
            name: "Springfield Central Market".to_string(),
            longitude: 1.0,
            latitude: 2.0,
            website: "http://a.test".to_string(),
            city_id: Some(city.id),
        };

        let response = CityResponse::with_markets(city, vec![market]);
        let markets = response.supermarkets.unwrap();
        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].name, "Springfield Central Market");
    }
}
