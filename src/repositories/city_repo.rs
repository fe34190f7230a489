//! City repository for async database operations.
//!
//! Provides CRUD operations for the cities table using diesel_async.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{City, NewCity, Supermarket, UpdateCity};

/// City repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap
/// (just reference count increment). No need for `Arc<CityRepository>`.
#[derive(Clone)]
pub struct CityRepository {
    pool: AsyncDbPool,
}

impl CityRepository {
    /// Creates a new CityRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new city in the database.
    ///
    /// # Returns
    /// The created city with its generated id
    pub async fn create(&self, new_city: NewCity) -> Result<City, AppError> {
        use crate::schema::cities::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(cities)
            .values(&new_city)
            .returning(City::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a city by its ID, scalar columns only.
    ///
    /// # Returns
    /// `Some(City)` if found, `None` otherwise
    pub async fn find_by_id(&self, city_id: Uuid) -> Result<Option<City>, AppError> {
        use crate::schema::cities::dsl::*;
        let mut conn = self.pool.get().await?;

        cities
            .filter(id.eq(city_id))
            .select(City::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds a city together with its supermarket collection.
    ///
    /// # Returns
    /// `Some((City, Vec<Supermarket>))` if found, `None` otherwise
    pub async fn find_with_markets(
        &self,
        city_id: Uuid,
    ) -> Result<Option<(City, Vec<Supermarket>)>, AppError> {
        let mut conn = self.pool.get().await?;

        let city = {
            use crate::schema::cities::dsl::*;
            cities
                .filter(id.eq(city_id))
                .select(City::as_select())
                .first(&mut conn)
                .await
                .optional()?
        };

        let Some(city) = city else {
            return Ok(None);
        };

        let markets = Supermarket::belonging_to(&city)
            .select(Supermarket::as_select())
            .load(&mut conn)
            .await?;

        Ok(Some((city, markets)))
    }

    /// Lists all cities, each with its supermarket collection eagerly loaded.
    pub async fn list_with_markets(&self) -> Result<Vec<(City, Vec<Supermarket>)>, AppError> {
        let mut conn = self.pool.get().await?;

        let all_cities = {
            use crate::schema::cities::dsl::*;
            cities.select(City::as_select()).load(&mut conn).await?
        };

        let markets = Supermarket::belonging_to(&all_cities)
            .select(Supermarket::as_select())
            .load(&mut conn)
            .await?;

        Ok(markets
            .grouped_by(&all_cities)
            .into_iter()
            .zip(all_cities)
            .map(|(markets, city)| (city, markets))
            .collect())
    }

    /// Updates a city's scalar fields.
    ///
    /// # Arguments
    /// * `city_id` - The city's ID
    /// * `update_data` - The fields to update (None fields are ignored)
    ///
    /// # Returns
    /// The updated city
    pub async fn update(&self, city_id: Uuid, update_data: UpdateCity) -> Result<City, AppError> {
        use crate::schema::cities::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(cities.filter(id.eq(city_id)))
            .set(&update_data)
            .returning(City::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes a city from the database.
    ///
    /// The `supermarkets.city_id` foreign key is declared `ON DELETE SET
    /// NULL`, so the city's supermarkets survive unassociated.
    ///
    /// # Returns
    /// The number of affected rows (0 or 1)
    pub async fn delete(&self, city_id: Uuid) -> Result<usize, AppError> {
        use crate::schema::cities::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(cities.filter(id.eq(city_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
