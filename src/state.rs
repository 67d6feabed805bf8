//! Client state store.
//!
//! Holds the session's named values and mirrors the persisted ones to the
//! repository on every change. Writes are whole-value overwrites; a failed
//! write is logged and the in-memory value stays authoritative.

use crate::domain::{
    GeoPoint, ParkingSpot, Repository, RepositoryPtr, Reservation, StorageKey, Transaction, User,
};

pub struct ClientStore {
    // ---
    repository: RepositoryPtr,
    user: Option<User>,
    spots: Vec<ParkingSpot>,
    reservations: Vec<Reservation>,
    transactions: Vec<Transaction>,
    favorites: Vec<String>,
    parked_car: Option<GeoPoint>,
}

fn log_write_failure(key: StorageKey, result: anyhow::Result<()>) {
    // ---
    if let Err(err) = result {
        tracing::error!("Failed to persist {}: {:?}", key, err);
    }
}

impl ClientStore {
    // ---
    /// Restores persisted values; spots always start empty.
    pub async fn load(repository: RepositoryPtr) -> Self {
        // ---
        let user = repository.load_user().await;
        let reservations = repository.load_reservations().await;
        let transactions = repository.load_transactions().await;
        let favorites = repository.load_favorites().await;
        let parked_car = repository.load_parked_car().await;

        tracing::debug!(
            "Restored state: user={:?} reservations={} transactions={} favorites={}",
            user.as_ref().map(|u| u.id.as_str()),
            reservations.len(),
            transactions.len(),
            favorites.len()
        );

        Self {
            repository,
            user,
            spots: Vec::new(),
            reservations,
            transactions,
            favorites,
            parked_car,
        }
    }

    pub fn repository(&self) -> &RepositoryPtr {
        &self.repository
    }

    // ------------------------------------------------------------
    // User
    // ------------------------------------------------------------

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub async fn set_user(&mut self, user: Option<User>) {
        // ---
        self.user = user;
        let result = self.repository.save_user(self.user.as_ref()).await;
        log_write_failure(StorageKey::CurrentUser, result);
    }

    /// Applies `f` to the signed-in user, if any, and persists the result.
    pub async fn update_user<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut User),
    {
        // ---
        let Some(mut user) = self.user.clone() else {
            return false;
        };
        f(&mut user);
        self.set_user(Some(user)).await;
        true
    }

    // ------------------------------------------------------------
    // Spots (not persisted)
    // ------------------------------------------------------------

    pub fn spots(&self) -> &[ParkingSpot] {
        &self.spots
    }

    pub fn spots_mut(&mut self) -> &mut Vec<ParkingSpot> {
        &mut self.spots
    }

    pub fn set_spots(&mut self, spots: Vec<ParkingSpot>) {
        self.spots = spots;
    }

    pub fn spot(&self, id: &str) -> Option<&ParkingSpot> {
        // ---
        self.spots.iter().find(|s| s.id == id)
    }

    pub fn spot_mut(&mut self, id: &str) -> Option<&mut ParkingSpot> {
        // ---
        self.spots.iter_mut().find(|s| s.id == id)
    }

    // ------------------------------------------------------------
    // Reservations and transactions (most recent first)
    // ------------------------------------------------------------

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub async fn set_reservations(&mut self, reservations: Vec<Reservation>) {
        // ---
        self.reservations = reservations;
        let result = self.repository.save_reservations(&self.reservations).await;
        log_write_failure(StorageKey::Reservations, result);
    }

    pub async fn prepend_reservation(&mut self, reservation: Reservation) {
        // ---
        let mut next = Vec::with_capacity(self.reservations.len() + 1);
        next.push(reservation);
        next.extend(self.reservations.iter().cloned());
        self.set_reservations(next).await;
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub async fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        // ---
        self.transactions = transactions;
        let result = self.repository.save_transactions(&self.transactions).await;
        log_write_failure(StorageKey::Transactions, result);
    }

    pub async fn prepend_transaction(&mut self, transaction: Transaction) {
        // ---
        let mut next = Vec::with_capacity(self.transactions.len() + 1);
        next.push(transaction);
        next.extend(self.transactions.iter().cloned());
        self.set_transactions(next).await;
    }

    // ------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn is_favorite(&self, spot_id: &str) -> bool {
        self.favorites.iter().any(|f| f == spot_id)
    }

    /// Removes `spot_id` if present, appends it otherwise.
    ///
    /// Returns true when the spot is a favorite afterwards.
    pub async fn toggle_favorite(&mut self, spot_id: &str) -> bool {
        // ---
        let now_favorite = if self.is_favorite(spot_id) {
            self.favorites.retain(|f| f != spot_id);
            false
        } else {
            self.favorites.push(spot_id.to_string());
            true
        };

        let result = self.repository.save_favorites(&self.favorites).await;
        log_write_failure(StorageKey::Favorites, result);
        now_favorite
    }

    // ------------------------------------------------------------
    // Parked car marker
    // ------------------------------------------------------------

    pub fn parked_car(&self) -> Option<GeoPoint> {
        self.parked_car
    }

    pub async fn set_parked_car(&mut self, parked: Option<GeoPoint>) {
        // ---
        self.parked_car = parked;
        let result = self.repository.save_parked_car(self.parked_car).await;
        log_write_failure(StorageKey::ParkedCar, result);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::domain::Role;
    use crate::infrastructure::fixtures;
    use crate::infrastructure::storage::create_memory_repository;

    #[tokio::test]
    async fn favorites_double_toggle_restores_order() {
        // ---
        let mut store = ClientStore::load(create_memory_repository()).await;
        store.toggle_favorite("p1").await;
        store.toggle_favorite("p2").await;
        store.toggle_favorite("p3").await;
        let before = store.favorites().to_vec();

        assert!(store.toggle_favorite("p4").await);
        assert!(!store.toggle_favorite("p4").await);
        assert_eq!(store.favorites(), before.as_slice());
    }

    #[tokio::test]
    async fn changes_survive_reload() {
        // ---
        let repository = create_memory_repository();
        let mut store = ClientStore::load(repository.clone()).await;

        store
            .set_user(Some(fixtures::profile_for("x@y.z", Role::User)))
            .await;
        store.toggle_favorite("p2").await;
        store.set_parked_car(Some(GeoPoint::new(41.0, 69.0))).await;
        for trx in fixtures::transactions().into_iter().rev() {
            store.prepend_transaction(trx).await;
        }

        let reloaded = ClientStore::load(repository).await;
        assert_eq!(reloaded.user().map(|u| u.id.as_str()), Some("user1"));
        assert_eq!(reloaded.favorites(), ["p2".to_string()].as_slice());
        assert_eq!(reloaded.parked_car(), Some(GeoPoint::new(41.0, 69.0)));
        assert_eq!(reloaded.transactions(), fixtures::transactions().as_slice());
        assert!(reloaded.spots().is_empty());
    }

    #[tokio::test]
    async fn update_user_without_session_is_noop() {
        // ---
        let mut store = ClientStore::load(create_memory_repository()).await;
        assert!(!store.update_user(|u| u.balance += 1).await);
        assert!(store.user().is_none());
    }
}
