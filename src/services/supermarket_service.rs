//! Supermarket service for business logic operations.
//!
//! Mirrors the city service structure over the minimum-name-length rule
//! instead of the country allow-list.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{City, NewSupermarket, Supermarket, UpdateSupermarket};
use crate::repositories::SupermarketRepository;

/// A supermarket name must be strictly longer than this many characters.
pub const MIN_NAME_LENGTH: usize = 10;

/// Checks the strict minimum length rule. A name of exactly
/// `MIN_NAME_LENGTH` characters is rejected.
///
/// # Errors
/// `PreconditionFailed` when the name is too short.
pub(crate) fn validate_name_length(name: &str) -> AppResult<()> {
    if name.chars().count() > MIN_NAME_LENGTH {
        Ok(())
    } else {
        Err(AppError::precondition_failed(
            "the name must have more than 10 characters",
        ))
    }
}

/// Supermarket service for handling supermarket-related business logic.
#[derive(Clone)]
pub struct SupermarketService {
    repo: SupermarketRepository,
}

impl SupermarketService {
    /// Creates a new SupermarketService with the given repository.
    pub fn new(repo: SupermarketRepository) -> Self {
        Self { repo }
    }

    /// Lists all supermarkets, each with its owning city loaded (if any).
    pub async fn find_all(&self) -> AppResult<Vec<(Supermarket, Option<City>)>> {
        self.repo.list_with_cities().await
    }

    /// Gets a supermarket by its ID.
    ///
    /// # Returns
    /// The supermarket if found, or `NotFound` error
    pub async fn find_one(&self, id: Uuid) -> AppResult<Supermarket> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("supermarket", id))
    }

    /// Creates a new supermarket, initially unassociated.
    ///
    /// # Errors
    /// `PreconditionFailed` when the name is 10 characters or shorter.
    pub async fn create(&self, new_market: NewSupermarket) -> AppResult<Supermarket> {
        validate_name_length(&new_market.name)?;
        self.repo.create(new_market).await
    }

    /// Updates a supermarket with shallow-merge semantics. The association
    /// field is not touched here; only the association service mutates it.
    ///
    /// # Errors
    /// - `PreconditionFailed` when a supplied name is too short
    /// - `NotFound` when the id does not resolve to an existing supermarket
    pub async fn update(&self, id: Uuid, update_data: UpdateSupermarket) -> AppResult<Supermarket> {
        if let Some(name) = &update_data.name {
            validate_name_length(name)?;
        }
        let persisted = self.find_one(id).await?;
        if update_data.name.is_none()
            && update_data.longitude.is_none()
            && update_data.latitude.is_none()
            && update_data.website.is_none()
        {
            // Empty changeset: nothing to overwrite.
            return Ok(persisted);
        }
        self.repo.update(id, update_data).await
    }

    /// Deletes a supermarket.
    ///
    /// # Errors
    /// `NotFound` when the id does not resolve to an existing supermarket.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.find_one(id).await?;
        self.repo.delete(id).await?;
        Ok(())
    }
}
