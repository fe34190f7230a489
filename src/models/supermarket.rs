use diesel::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use super::City;

/// Supermarket model for reading from database.
/// `city_id` is the nullable back-reference to the owning city; a
/// supermarket may exist unassociated.
#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone, PartialEq)]
#[diesel(table_name = crate::schema::supermarkets)]
#[diesel(belongs_to(City))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Supermarket {
    pub id: Uuid,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub website: String,
    pub city_id: Option<Uuid>,
}

/// NewSupermarket model for inserting new records.
/// Created supermarkets start unassociated; the link to a city is
/// established through the association endpoints.
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::supermarkets)]
pub struct NewSupermarket {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub website: String,
}

/// UpdateSupermarket model for partial updates (shallow merge).
/// The association is deliberately absent here; only the association
/// service mutates `city_id`.
#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::supermarkets)]
pub struct UpdateSupermarket {
    pub name: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub website: Option<String>,
}
