use utoipa::OpenApi;

pub const CITY_TAG: &str = "City";
pub const SUPERMARKET_TAG: &str = "Supermarket";
pub const ASSOCIATION_TAG: &str = "Association";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mercado",
        description = "CRUD api server for cities and their supermarkets",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::CityResponse,
            crate::api::dto::CreateCityRequest,
            crate::api::dto::UpdateCityRequest,
            crate::api::dto::SupermarketResponse,
            crate::api::dto::CreateSupermarketRequest,
            crate::api::dto::UpdateSupermarketRequest,
            crate::api::dto::SupermarketRef,
        )
    ),
    tags(
        (name = CITY_TAG, description = "City management endpoints"),
        (name = SUPERMARKET_TAG, description = "Supermarket management endpoints"),
        (name = ASSOCIATION_TAG, description = "City/supermarket association endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
