//! City service for business logic operations.
//!
//! Provides a higher-level API for city operations, encapsulating
//! the country allow-list rule and coordinating with the repository layer.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{City, NewCity, Supermarket, UpdateCity};
use crate::repositories::CityRepository;

/// The closed set of countries a city may belong to.
pub const ALLOWED_COUNTRIES: &[&str] = &["Argentina", "Ecuador", "Paraguay"];

/// Checks a country name against the allow-list.
///
/// # Errors
/// `PreconditionFailed` when the country is not in the list.
pub(crate) fn validate_country(allowed: &[&str], country: &str) -> AppResult<()> {
    if allowed.contains(&country) {
        Ok(())
    } else {
        Err(AppError::precondition_failed(
            "the given country is not valid",
        ))
    }
}

/// City service for handling city-related business logic.
///
/// Wraps the `CityRepository`; cloning is cheap since the repository
/// holds the connection pool via `Arc`.
#[derive(Clone)]
pub struct CityService {
    repo: CityRepository,
    allowed_countries: &'static [&'static str],
}

impl CityService {
    /// Creates a new CityService with the default country allow-list.
    pub fn new(repo: CityRepository) -> Self {
        Self::with_allowed_countries(repo, ALLOWED_COUNTRIES)
    }

    /// Creates a CityService with a custom country allow-list.
    pub fn with_allowed_countries(
        repo: CityRepository,
        allowed_countries: &'static [&'static str],
    ) -> Self {
        Self {
            repo,
            allowed_countries,
        }
    }

    /// Lists all cities, each with its supermarket collection eagerly loaded.
    pub async fn find_all(&self) -> AppResult<Vec<(City, Vec<Supermarket>)>> {
        self.repo.list_with_markets().await
    }

    /// Gets a city by its ID, scalar fields only.
    ///
    /// # Returns
    /// The city if found, or `NotFound` error
    pub async fn find_one(&self, id: Uuid) -> AppResult<City> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("city", id))
    }

    /// Creates a new city.
    ///
    /// # Errors
    /// `PreconditionFailed` when the country is not in the allow-list.
    pub async fn create(&self, new_city: NewCity) -> AppResult<City> {
        validate_country(self.allowed_countries, &new_city.country)?;
        self.repo.create(new_city).await
    }

    /// Updates a city with shallow-merge semantics: fields present in the
    /// payload overwrite, absent fields keep their persisted values. The
    /// identifier is never part of the merge.
    ///
    /// # Errors
    /// - `PreconditionFailed` when a supplied country is not in the allow-list
    /// - `NotFound` when the id does not resolve to an existing city
    pub async fn update(&self, id: Uuid, update_data: UpdateCity) -> AppResult<City> {
        if let Some(country) = &update_data.country {
            validate_country(self.allowed_countries, country)?;
        }
        let persisted = self.find_one(id).await?;
        if update_data.name.is_none()
            && update_data.country.is_none()
            && update_data.population.is_none()
        {
            // Empty changeset: nothing to overwrite.
            return Ok(persisted);
        }
        self.repo.update(id, update_data).await
    }

    /// Deletes a city. Its supermarkets survive unassociated.
    ///
    /// # Errors
    /// `NotFound` when the id does not resolve to an existing city.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.find_one(id).await?;
        self.repo.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn allowed_countries_pass() {
        for country in ALLOWED_COUNTRIES {
            assert!(validate_country(ALLOWED_COUNTRIES, country).is_ok());
        }
    }

    #[test]
    fn unlisted_country_fails_with_precondition() {
        let err = validate_country(ALLOWED_COUNTRIES, "Colombia").unwrap_err();
        match err {
            AppError::PreconditionFailed { message } => {
                assert_eq!(message, "the given country is not valid");
            }
            other => panic!("expected PreconditionFailed, got {other:?}"),
        }
    }

    #[test]
    fn country_check_is_case_sensitive() {
        assert!(validate_country(ALLOWED_COUNTRIES, "ecuador").is_err());
        assert!(validate_country(ALLOWED_COUNTRIES, "").is_err());
    }

    proptest! {
        #[test]
        fn arbitrary_strings_outside_the_list_fail(country in "[A-Za-z ]{0,30}") {
            prop_assume!(!ALLOWED_COUNTRIES.contains(&country.as_str()));
            let is_precondition_failed = matches!(
                validate_country(ALLOWED_COUNTRIES, &country),
                Err(AppError::PreconditionFailed { .. })
            );
            prop_assert!(is_precondition_failed);
        }
    }

    /// Builds a service over a pool that is never connected. Validation
    /// runs before any repository call, so these tests need no database.
    fn service_over(allowed: &'static [&'static str]) -> CityService {
        use diesel_async::AsyncPgConnection;
        use diesel_async::pooled_connection::AsyncDieselConnectionManager;
        use diesel_async::pooled_connection::bb8::Pool;

        let manager =
            AsyncDieselConnectionManager::<AsyncPgConnection>::new("postgres://localhost/unused");
        let pool = Pool::builder().build_unchecked(manager);
        CityService::with_allowed_countries(CityRepository::new(pool), allowed)
    }

    #[tokio::test]
    async fn create_validates_against_the_injected_list() {
        let service = service_over(&["Wonderland"]);
        let err = service
            .create(NewCity {
                name: "Cuenca".to_string(),
                country: "Ecuador".to_string(),
                population: 330_000,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PreconditionFailed { .. }));
    }

    #[tokio::test]
    async fn update_validates_a_supplied_country_before_the_lookup() {
        let service = service_over(ALLOWED_COUNTRIES);
        let update = UpdateCity {
            country: Some("Atlantis".to_string()),
            ..Default::default()
        };
        let err = service.update(Uuid::new_v4(), update).await.unwrap_err();
        assert!(matches!(err, AppError::PreconditionFailed { .. }));
    }
}
