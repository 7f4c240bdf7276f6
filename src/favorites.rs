//! # Favorites Store
//!
//! The one piece of state shared across views: the set of favorited product
//! ids, persisted under a single key as a JSON array of integers.
//!
//! ## Lifecycle
//!
//! `Uninitialized -> Hydrating -> Ready`. The store is constructed once at
//! application start with its storage injected, hydrated from the persisted
//! key, and handed to every consumer that needs it. Consumers watch the state
//! so they can hold off rendering favorite-dependent UI until `Ready`.
//!
//! Nothing is persisted before hydration completes: mutations that arrive
//! early are applied to the in-memory set right away and replayed over the
//! hydrated set, so a fast-clicking user clobbers nothing and loses nothing.
//!
//! ## Failure policy
//!
//! Storage failures never surface. A missing key, unreadable file, or
//! malformed payload hydrates to an empty set with a warning; a failed write
//! is logged and dropped.

use std::{collections::BTreeSet, io, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::{fs, sync::watch};
use tracing::warn;

use crate::error::PersistenceError;

/// The single persisted key.
pub const FAVORITES_KEY: &str = "product-explorer-favorites";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Hydrating,
    Ready,
}

/// Local key-value persistence seam.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` means the key has never been written.
    async fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    async fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// One file per key under a directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Read(e)),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        fs::write(self.path(key), value)
            .await
            .map_err(PersistenceError::Write)
    }
}

/// Membership change resolved at mutation time, so replaying it over the
/// hydrated set reproduces what the user saw themselves do.
#[derive(Debug, Clone, Copy)]
enum Mutation {
    Add(u64),
    Remove(u64),
    Clear,
}

pub struct FavoritesStore {
    favorites: Arc<BTreeSet<u64>>,
    storage: Box<dyn KeyValueStore>,
    state_tx: watch::Sender<StoreState>,
    pending: Vec<Mutation>,
}

impl FavoritesStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        let (state_tx, _) = watch::channel(StoreState::Uninitialized);

        Self {
            favorites: Arc::new(BTreeSet::new()),
            storage,
            state_tx,
            pending: Vec::new(),
        }
    }

    /// Loads the persisted set, replays mutations that arrived early, and
    /// transitions to `Ready`. Hydrating more than once is a no-op.
    pub async fn hydrate(&mut self) {
        if self.state() != StoreState::Uninitialized {
            return;
        }
        self.state_tx.send_replace(StoreState::Hydrating);

        let mut set = match self.storage.read(FAVORITES_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<u64>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    warn!("Discarding malformed favorites payload: {e}");
                    BTreeSet::new()
                }
            },
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                warn!("Failed to load favorites: {e}");
                BTreeSet::new()
            }
        };

        let replay = !self.pending.is_empty();
        for mutation in self.pending.drain(..) {
            match mutation {
                Mutation::Add(id) => {
                    set.insert(id);
                }
                Mutation::Remove(id) => {
                    set.remove(&id);
                }
                Mutation::Clear => set.clear(),
            }
        }
        self.favorites = Arc::new(set);

        self.state_tx.send_replace(StoreState::Ready);

        if replay {
            self.flush().await;
        }
    }

    /// Adds `id` if absent, removes it if present. Self-inverse.
    pub async fn toggle(&mut self, id: u64) {
        let mut next = (*self.favorites).clone();
        let mutation = if next.insert(id) {
            Mutation::Add(id)
        } else {
            next.remove(&id);
            Mutation::Remove(id)
        };
        self.favorites = Arc::new(next);

        self.record(mutation).await;
    }

    pub async fn clear(&mut self) {
        self.favorites = Arc::new(BTreeSet::new());

        self.record(Mutation::Clear).await;
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.favorites.len()
    }

    /// Current set value. Every mutation swaps in a fresh allocation, so
    /// consumers comparing by reference observe the change.
    pub fn favorites(&self) -> Arc<BTreeSet<u64>> {
        self.favorites.clone()
    }

    pub fn state(&self) -> StoreState {
        *self.state_tx.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<StoreState> {
        self.state_tx.subscribe()
    }

    async fn record(&mut self, mutation: Mutation) {
        if self.state() == StoreState::Ready {
            self.flush().await;
        } else {
            self.pending.push(mutation);
        }
    }

    async fn flush(&self) {
        let ids: Vec<u64> = self.favorites.iter().copied().collect();
        let payload = match serde_json::to_string(&ids) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to encode favorites: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.write(FAVORITES_KEY, &payload).await {
            warn!("Failed to save favorites: {e}");
        }
    }
}
