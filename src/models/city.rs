use diesel::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

/// City model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::cities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub population: i64,
}

/// NewCity model for inserting new records.
/// The id column is omitted; the database generates a uuid on insert.
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::cities)]
pub struct NewCity {
    pub name: String,
    pub country: String,
    pub population: i64,
}

/// UpdateCity model for partial updates.
/// Derives AsChangeset so `None` fields keep their persisted values
/// (shallow merge). The id is not part of the changeset and can never
/// be overwritten.
#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::cities)]
pub struct UpdateCity {
    pub name: Option<String>,
    pub country: Option<String>,
    pub population: Option<i64>,
}
