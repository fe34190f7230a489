//! Association service for the many-to-one link between cities and
//! supermarkets.
//!
//! Every operation resolves the referenced entities in a fixed order —
//! supermarket first, then city with its collection eagerly loaded — before
//! mutating any state, so the error taxonomy is stable regardless of which
//! side is missing.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{City, Supermarket};
use crate::repositories::{CityRepository, SupermarketRepository};

/// Contract message for a pair that exists but is not linked.
const NOT_ASSOCIATED: &str = "supermarket not associated with city";

/// City lookups as needed by the association operations.
///
/// Implemented by `CityRepository` for production use; tests substitute an
/// in-memory store.
#[async_trait]
pub trait CityStore: Send + Sync {
    async fn find_with_markets(
        &self,
        city_id: Uuid,
    ) -> AppResult<Option<(City, Vec<Supermarket>)>>;
}

/// Supermarket lookups and association writes.
#[async_trait]
pub trait MarketStore: Send + Sync {
    async fn find_by_id(&self, market_id: Uuid) -> AppResult<Option<Supermarket>>;
    async fn find_by_city(&self, city_id: Uuid) -> AppResult<Vec<Supermarket>>;
    async fn set_city(&self, market_id: Uuid, city_id: Option<Uuid>) -> AppResult<()>;
    async fn replace_city_markets(&self, city_id: Uuid, market_ids: &[Uuid]) -> AppResult<()>;
}

#[async_trait]
impl CityStore for CityRepository {
    async fn find_with_markets(
        &self,
        city_id: Uuid,
    ) -> AppResult<Option<(City, Vec<Supermarket>)>> {
        CityRepository::find_with_markets(self, city_id).await
    }
}

#[async_trait]
impl MarketStore for SupermarketRepository {
    async fn find_by_id(&self, market_id: Uuid) -> AppResult<Option<Supermarket>> {
        SupermarketRepository::find_by_id(self, market_id).await
    }

    async fn find_by_city(&self, city_id: Uuid) -> AppResult<Vec<Supermarket>> {
        SupermarketRepository::find_by_city(self, city_id).await
    }

    async fn set_city(&self, market_id: Uuid, city_id: Option<Uuid>) -> AppResult<()> {
        SupermarketRepository::set_city(self, market_id, city_id).await?;
        Ok(())
    }

    async fn replace_city_markets(&self, city_id: Uuid, market_ids: &[Uuid]) -> AppResult<()> {
        SupermarketRepository::replace_city_markets(self, city_id, market_ids).await
    }
}

/// Finds a supermarket inside a city's loaded collection by id.
pub(crate) fn market_in_collection(markets: &[Supermarket], market_id: Uuid) -> Option<&Supermarket> {
    markets.iter().find(|m| m.id == market_id)
}

/// Service managing the city/supermarket association.
///
/// Talks to both stores but never to the other services. The store types
/// default to the diesel repositories.
#[derive(Clone)]
pub struct CityMarketService<C = CityRepository, M = SupermarketRepository> {
    cities: C,
    markets: M,
}

impl<C: CityStore, M: MarketStore> CityMarketService<C, M> {
    /// Creates a new CityMarketService over both stores.
    pub fn new(cities: C, markets: M) -> Self {
        Self { cities, markets }
    }

    /// Resolves a supermarket or fails with "supermarket not found".
    async fn get_market(&self, market_id: Uuid) -> AppResult<Supermarket> {
        self.markets
            .find_by_id(market_id)
            .await?
            .ok_or_else(|| AppError::not_found("supermarket", market_id))
    }

    /// Resolves a city with its collection or fails with "city not found".
    async fn get_city_with_markets(&self, city_id: Uuid) -> AppResult<(City, Vec<Supermarket>)> {
        self.cities
            .find_with_markets(city_id)
            .await?
            .ok_or_else(|| AppError::not_found("city", city_id))
    }

    /// Adds a supermarket to a city's collection and returns the updated
    /// city with its full collection.
    ///
    /// The add is idempotent: the relational representation keeps the link
    /// as a single nullable back-reference, so re-adding an already
    /// associated pair is a no-op success rather than a duplicate entry.
    /// A supermarket currently owned by another city is moved.
    pub async fn add_market_to_city(
        &self,
        city_id: Uuid,
        market_id: Uuid,
    ) -> AppResult<(City, Vec<Supermarket>)> {
        let market = self.get_market(market_id).await?;
        let (city, markets) = self.get_city_with_markets(city_id).await?;

        if market.city_id == Some(city.id) {
            return Ok((city, markets));
        }

        self.markets.set_city(market.id, Some(city.id)).await?;
        let markets = self.markets.find_by_city(city.id).await?;
        Ok((city, markets))
    }

    /// Returns the supermarket with the given id from the city's collection.
    ///
    /// # Errors
    /// - `NotFound` when either entity does not exist
    /// - `PreconditionFailed` when both exist but are not associated
    pub async fn find_market_from_city(
        &self,
        city_id: Uuid,
        market_id: Uuid,
    ) -> AppResult<Supermarket> {
        let market = self.get_market(market_id).await?;
        let (_, markets) = self.get_city_with_markets(city_id).await?;

        market_in_collection(&markets, market.id)
            .cloned()
            .ok_or_else(|| AppError::precondition_failed(NOT_ASSOCIATED))
    }

    /// Returns the city's full supermarket collection.
    ///
    /// # Errors
    /// `NotFound` when the city does not exist.
    pub async fn find_markets_from_city(&self, city_id: Uuid) -> AppResult<Vec<Supermarket>> {
        let (_, markets) = self.get_city_with_markets(city_id).await?;
        Ok(markets)
    }

    /// Replaces the city's entire supermarket collection with exactly the
    /// supplied set (full overwrite, not merge).
    ///
    /// Every listed supermarket is resolved in list order before any state
    /// changes; the first unresolvable id aborts the whole operation with
    /// `NotFound` and leaves the persisted collection untouched.
    pub async fn update_markets_from_city(
        &self,
        city_id: Uuid,
        market_ids: &[Uuid],
    ) -> AppResult<(City, Vec<Supermarket>)> {
        let (city, _) = self.get_city_with_markets(city_id).await?;

        for market_id in market_ids {
            self.get_market(*market_id).await?;
        }

        self.markets.replace_city_markets(city.id, market_ids).await?;
        let markets = self.markets.find_by_city(city.id).await?;
        Ok((city, markets))
    }

    /// Removes a supermarket from a city's collection. The supermarket
    /// itself survives, unassociated.
    ///
    /// # Errors
    /// - `NotFound` when either entity does not exist
    /// - `PreconditionFailed` when the pair is not currently associated
    pub async fn delete_market_from_city(&self, city_id: Uuid, market_id: Uuid) -> AppResult<()> {
        let market = self.get_market(market_id).await?;
        let (_, markets) = self.get_city_with_markets(city_id).await?;

        if market_in_collection(&markets, market.id).is_none() {
            return Err(AppError::precondition_failed(NOT_ASSOCIATED));
        }

        self.markets.set_city(market.id, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// In-memory store backing both sides of the association.
    #[derive(Clone, Default)]
    struct MemoryStore {
        cities: Arc<Mutex<HashMap<Uuid, City>>>,
        markets: Arc<Mutex<HashMap<Uuid, Supermarket>>>,
    }

    impl MemoryStore {
        fn add_city(&self, name: &str) -> City {
            let city = City {
                id: Uuid::new_v4(),
                name: name.to_string(),
                country: "Ecuador".to_string(),
                population: 330_000,
            };
            self.cities.lock().unwrap().insert(city.id, city.clone());
            city
        }

        fn add_market(&self, name: &str, owner: Option<Uuid>) -> Supermarket {
            let market = Supermarket {
                id: Uuid::new_v4(),
                name: name.to_string(),
                longitude: -79.9,
                latitude: -2.19,
                website: "http://market.test".to_string(),
                city_id: owner,
            };
            self.markets.lock().unwrap().insert(market.id, market.clone());
            market
        }

        fn market(&self, id: Uuid) -> Supermarket {
            self.markets.lock().unwrap()[&id].clone()
        }

        fn markets_of(&self, owner: Uuid) -> Vec<Supermarket> {
            let mut markets: Vec<_> = self
                .markets
                .lock()
                .unwrap()
                .values()
                .filter(|m| m.city_id == Some(owner))
                .cloned()
                .collect();
            markets.sort_by_key(|m| m.id);
            markets
        }
    }

    #[async_trait]
    impl CityStore for MemoryStore {
        async fn find_with_markets(
            &self,
            city_id: Uuid,
        ) -> AppResult<Option<(City, Vec<Supermarket>)>> {
            let Some(city) = self.cities.lock().unwrap().get(&city_id).cloned() else {
                return Ok(None);
            };
            let markets = self.markets_of(city.id);
            Ok(Some((city, markets)))
        }
    }

    #[async_trait]
    impl MarketStore for MemoryStore {
        async fn find_by_id(&self, market_id: Uuid) -> AppResult<Option<Supermarket>> {
            Ok(self.markets.lock().unwrap().get(&market_id).cloned())
        }

        async fn find_by_city(&self, city_id: Uuid) -> AppResult<Vec<Supermarket>> {
            Ok(self.markets_of(city_id))
        }

        async fn set_city(&self, market_id: Uuid, city_id: Option<Uuid>) -> AppResult<()> {
            if let Some(market) = self.markets.lock().unwrap().get_mut(&market_id) {
                market.city_id = city_id;
            }
            Ok(())
        }

        async fn replace_city_markets(&self, city_id: Uuid, market_ids: &[Uuid]) -> AppResult<()> {
            let mut markets = self.markets.lock().unwrap();
            for market in markets.values_mut() {
                if market.city_id == Some(city_id) {
                    market.city_id = None;
                }
            }
            for id in market_ids {
                if let Some(market) = markets.get_mut(id) {
                    market.city_id = Some(city_id);
                }
            }
            Ok(())
        }
    }

    fn service() -> (CityMarketService<MemoryStore, MemoryStore>, MemoryStore) {
        let store = MemoryStore::default();
        (CityMarketService::new(store.clone(), store.clone()), store)
    }

    fn sorted_ids(markets: &[Supermarket]) -> Vec<Uuid> {
        let mut ids: Vec<_> = markets.iter().map(|m| m.id).collect();
        ids.sort();
        ids
    }

    #[tokio::test]
    async fn added_market_is_returned_unchanged_from_the_collection() {
        let (service, store) = service();
        let city = store.add_city("Guayaquil");
        let market = store.add_market("Mercado del Litoral", None);

        service.add_market_to_city(city.id, market.id).await.unwrap();
        let found = service
            .find_market_from_city(city.id, market.id)
            .await
            .unwrap();

        assert_eq!(found.id, market.id);
        assert_eq!(found.name, market.name);
        assert_eq!(found.longitude, market.longitude);
        assert_eq!(found.latitude, market.latitude);
        assert_eq!(found.website, market.website);
        assert_eq!(found.city_id, Some(city.id));
    }

    #[tokio::test]
    async fn re_adding_an_associated_pair_is_a_no_op() {
        let (service, store) = service();
        let city = store.add_city("Cuenca");
        let market = store.add_market("Supermercados del Austro", None);

        service.add_market_to_city(city.id, market.id).await.unwrap();
        let (_, markets) = service.add_market_to_city(city.id, market.id).await.unwrap();

        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].id, market.id);
    }

    #[tokio::test]
    async fn adding_moves_a_market_owned_by_another_city() {
        let (service, store) = service();
        let old_owner = store.add_city("Asunción");
        let new_owner = store.add_city("Quito");
        let market = store.add_market("Mercado Central Histórico", Some(old_owner.id));

        service
            .add_market_to_city(new_owner.id, market.id)
            .await
            .unwrap();

        assert_eq!(store.market(market.id).city_id, Some(new_owner.id));
        let left_behind = service.find_markets_from_city(old_owner.id).await.unwrap();
        assert!(left_behind.is_empty());
    }

    #[tokio::test]
    async fn add_resolves_the_market_before_the_city() {
        let (service, _) = service();

        // Both ids unknown: the market lookup runs first, so its error wins.
        let err = service
            .add_market_to_city(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "supermarket not found");
    }

    #[tokio::test]
    async fn add_with_unknown_city_fails_with_city_not_found() {
        let (service, store) = service();
        let market = store.add_market("Mercado del Litoral", None);

        let err = service
            .add_market_to_city(Uuid::new_v4(), market.id)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "city not found");
    }

    #[tokio::test]
    async fn removed_market_is_no_longer_found_in_the_collection() {
        let (service, store) = service();
        let city = store.add_city("Guayaquil");
        let market = store.add_market("Mercado del Litoral", Some(city.id));

        service
            .delete_market_from_city(city.id, market.id)
            .await
            .unwrap();

        let err = service
            .find_market_from_city(city.id, market.id)
            .await
            .unwrap_err();
        match err {
            AppError::PreconditionFailed { message } => {
                assert_eq!(message, "supermarket not associated with city");
            }
            other => panic!("expected PreconditionFailed, got {other:?}"),
        }
        // The supermarket itself survives, unassociated.
        assert_eq!(store.market(market.id).city_id, None);
    }

    #[tokio::test]
    async fn delete_rejects_a_pair_that_was_never_associated() {
        let (service, store) = service();
        let city = store.add_city("Cuenca");
        let market = store.add_market("Mercado del Litoral", None);

        let err = service
            .delete_market_from_city(city.id, market.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PreconditionFailed { .. }));
        assert_eq!(store.market(market.id).city_id, None);
    }

    #[tokio::test]
    async fn replace_leaves_exactly_the_supplied_markets_associated() {
        let (service, store) = service();
        let city = store.add_city("Quito");
        let kept = store.add_market("Supermercado La Carolina", Some(city.id));
        let dropped = store.add_market("Mercado de Iñaquito", Some(city.id));
        let added = store.add_market("Mercado de San Roque", None);

        let (_, markets) = service
            .update_markets_from_city(city.id, &[kept.id, added.id])
            .await
            .unwrap();

        let mut expected = vec![kept.id, added.id];
        expected.sort();
        assert_eq!(sorted_ids(&markets), expected);
        assert_eq!(store.market(dropped.id).city_id, None);
    }

    #[tokio::test]
    async fn replace_aborts_before_mutating_when_an_id_is_unknown() {
        let (service, store) = service();
        let city = store.add_city("Asunción");
        let existing = store.add_market("Mercado Municipal Cuatro", Some(city.id));
        let free = store.add_market("Mercado de Abasto Norte", None);

        let err = service
            .update_markets_from_city(city.id, &[free.id, Uuid::new_v4()])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "supermarket not found");

        // Nothing moved: the collection still holds only the original market.
        let markets = service.find_markets_from_city(city.id).await.unwrap();
        assert_eq!(sorted_ids(&markets), vec![existing.id]);
        assert_eq!(store.market(free.id).city_id, None);
    }

    #[tokio::test]
    async fn listing_markets_of_an_unknown_city_fails() {
        let (service, _) = service();
        let err = service
            .find_markets_from_city(Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "city not found");
    }

    fn market(id: Uuid, city_id: Option<Uuid>) -> Supermarket {
        Supermarket {
            id,
            name: "Springfield Central Market".to_string(),
            longitude: 1.0,
            latitude: 2.0,
            website: "http://a.test".to_string(),
            city_id,
        }
    }

    #[test]
    fn finds_market_in_collection_by_id() {
        let city_id = Uuid::new_v4();
        let wanted = Uuid::new_v4();
        let markets = vec![
            market(Uuid::new_v4(), Some(city_id)),
            market(wanted, Some(city_id)),
        ];

        let found = market_in_collection(&markets, wanted).unwrap();
        assert_eq!(found.id, wanted);
    }

    #[test]
    fn missing_market_yields_none() {
        let markets = vec![market(Uuid::new_v4(), None)];
        assert!(market_in_collection(&markets, Uuid::new_v4()).is_none());
    }

    #[test]
    fn empty_collection_yields_none() {
        assert!(market_in_collection(&[], Uuid::new_v4()).is_none());
    }

    #[test]
    fn not_associated_message_matches_contract() {
        let err = AppError::precondition_failed(NOT_ASSOCIATED);
        assert_eq!(err.to_string(), "supermarket not associated with city");
    }
}
