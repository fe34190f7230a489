//! Supermarket repository for async database operations.
//!
//! Provides CRUD operations for the supermarkets table plus the writes that
//! mutate the city association (`city_id`).

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{City, NewSupermarket, Supermarket, UpdateSupermarket};

/// Supermarket repository holding an async connection pool.
#[derive(Clone)]
pub struct SupermarketRepository {
    pool: AsyncDbPool,
}

impl SupermarketRepository {
    /// Creates a new SupermarketRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new supermarket in the database, initially unassociated.
    ///
    /// # Returns
    /// The created supermarket with its generated id
    pub async fn create(&self, new_market: NewSupermarket) -> Result<Supermarket, AppError> {
        use crate::schema::supermarkets::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(supermarkets)
            .values(&new_market)
            .returning(Supermarket::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a supermarket by its ID.
    ///
    /// # Returns
    /// `Some(Supermarket)` if found, `None` otherwise
    pub async fn find_by_id(&self, market_id: Uuid) -> Result<Option<Supermarket>, AppError> {
        use crate::schema::supermarkets::dsl::*;
        let mut conn = self.pool.get().await?;

        supermarkets
            .filter(id.eq(market_id))
            .select(Supermarket::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists all supermarkets, each with its owning city (if any).
    pub async fn list_with_cities(&self) -> Result<Vec<(Supermarket, Option<City>)>, AppError> {
        use crate::schema::{cities, supermarkets};
        let mut conn = self.pool.get().await?;

        supermarkets::table
            .left_join(cities::table)
            .select((Supermarket::as_select(), Option::<City>::as_select()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists the supermarkets currently associated with the given city.
    pub async fn find_by_city(&self, owner_id: Uuid) -> Result<Vec<Supermarket>, AppError> {
        use crate::schema::supermarkets::dsl::*;
        let mut conn = self.pool.get().await?;

        supermarkets
            .filter(city_id.eq(owner_id))
            .select(Supermarket::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Updates a supermarket's scalar fields.
    ///
    /// The association is not part of the changeset; only [`Self::set_city`]
    /// and [`Self::replace_city_markets`] touch `city_id`.
    ///
    /// # Returns
    /// The updated supermarket
    pub async fn update(
        &self,
        market_id: Uuid,
        update_data: UpdateSupermarket,
    ) -> Result<Supermarket, AppError> {
        use crate::schema::supermarkets::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(supermarkets.filter(id.eq(market_id)))
            .set(&update_data)
            .returning(Supermarket::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes a supermarket from the database.
    ///
    /// # Returns
    /// The number of affected rows (0 or 1)
    pub async fn delete(&self, market_id: Uuid) -> Result<usize, AppError> {
        use crate::schema::supermarkets::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(supermarkets.filter(id.eq(market_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Attaches or detaches a supermarket to a city by rewriting its
    /// back-reference.
    ///
    /// # Arguments
    /// * `market_id` - The supermarket's ID
    /// * `owner_id` - `Some(city)` to attach, `None` to detach
    pub async fn set_city(
        &self,
        market_id: Uuid,
        owner_id: Option<Uuid>,
    ) -> Result<Supermarket, AppError> {
        use crate::schema::supermarkets::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(supermarkets.filter(id.eq(market_id)))
            .set(city_id.eq(owner_id))
            .returning(Supermarket::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Replaces a city's entire supermarket collection with the given set.
    ///
    /// Detach and re-attach run inside a single transaction so a concurrent
    /// writer can never observe a half-replaced collection.
    pub async fn replace_city_markets(
        &self,
        owner_id: Uuid,
        market_ids: &[Uuid],
    ) -> Result<(), AppError> {
        use crate::schema::supermarkets::dsl::*;
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                diesel::update(supermarkets.filter(city_id.eq(owner_id)))
                    .set(city_id.eq(None::<Uuid>))
                    .execute(conn)
                    .await?;

                diesel::update(supermarkets.filter(id.eq_any(market_ids)))
                    .set(city_id.eq(owner_id))
                    .execute(conn)
                    .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}
