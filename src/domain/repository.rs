use super::models::{GeoPoint, Reservation, Transaction, User};
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Keys of the persisted client state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    // ---
    CurrentUser,
    Reservations,
    Transactions,
    Favorites,
    ParkedCar,
}

impl StorageKey {
    // ---
    pub const ALL: [StorageKey; 5] = [
        StorageKey::CurrentUser,
        StorageKey::Reservations,
        StorageKey::Transactions,
        StorageKey::Favorites,
        StorageKey::ParkedCar,
    ];

    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            StorageKey::CurrentUser => "currentUser",
            StorageKey::Reservations => "reservations",
            StorageKey::Transactions => "transactions",
            StorageKey::Favorites => "favorites",
            StorageKey::ParkedCar => "parkedCar",
        }
    }
}

impl fmt::Display for StorageKey {
    // ---
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstraction for client state persistence.
///
/// Backends store one JSON document per key and overwrite it whole.
/// Typed `load_*` methods never fail on bad data: a missing or corrupt
/// value yields the type's default and a warning.
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    // ---
    /// Raw stored value for `key`, if any.
    async fn read_raw(&self, key: StorageKey) -> Result<Option<String>>;

    /// Replace the stored value for `key`.
    async fn write_raw(&self, key: StorageKey, value: String) -> Result<()>;

    async fn load_user(&self) -> Option<User> {
        load_or_default(self, StorageKey::CurrentUser).await
    }

    async fn save_user(&self, user: Option<&User>) -> Result<()> {
        save_value(self, StorageKey::CurrentUser, &user).await
    }

    async fn load_reservations(&self) -> Vec<Reservation> {
        load_or_default(self, StorageKey::Reservations).await
    }

    async fn save_reservations(&self, reservations: &[Reservation]) -> Result<()> {
        save_value(self, StorageKey::Reservations, &reservations).await
    }

    async fn load_transactions(&self) -> Vec<Transaction> {
        load_or_default(self, StorageKey::Transactions).await
    }

    async fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        save_value(self, StorageKey::Transactions, &transactions).await
    }

    async fn load_favorites(&self) -> Vec<String> {
        load_or_default(self, StorageKey::Favorites).await
    }

    async fn save_favorites(&self, favorites: &[String]) -> Result<()> {
        save_value(self, StorageKey::Favorites, &favorites).await
    }

    async fn load_parked_car(&self) -> Option<GeoPoint> {
        load_or_default(self, StorageKey::ParkedCar).await
    }

    async fn save_parked_car(&self, parked: Option<GeoPoint>) -> Result<()> {
        save_value(self, StorageKey::ParkedCar, &parked).await
    }
}

/// Type alias for any backend that implements Repository.
pub type RepositoryPtr = Arc<dyn Repository>;

async fn load_or_default<R, T>(repo: &R, key: StorageKey) -> T
where
    R: Repository + ?Sized,
    T: DeserializeOwned + Default,
{
    // ---
    let raw = match repo.read_raw(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            tracing::warn!("Failed to read {}: {:?}", key, err);
            return T::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|err| {
        tracing::warn!("Discarding unreadable {}: {}", key, err);
        T::default()
    })
}

async fn save_value<R, T>(repo: &R, key: StorageKey, value: &T) -> Result<()>
where
    R: Repository + ?Sized,
    T: Serialize + Sync + ?Sized,
{
    // ---
    let raw = serde_json::to_string(value)?;
    repo.write_raw(key, raw).await
}
