//! Load-once holder for the shared dataset bundle.
//!
//! [`BundleCache`] moves through `Unloaded → Loaded` or `Unloaded → Failed`
//! exactly once. Both end states are terminal: a loaded bundle is never
//! reloaded and a failed load is never retried, so every session sees the
//! same snapshot or the same error.

use std::sync::Arc;

use league_core::error::LoadError;
use league_data::store::{DatasetBundle, DatasetStore};

// ── BundleState ───────────────────────────────────────────────────────────────

/// Lifecycle of the process-wide bundle.
#[derive(Debug)]
pub enum BundleState {
    Unloaded,
    Loaded(Arc<DatasetBundle>),
    Failed(LoadError),
}

impl BundleState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, BundleState::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, BundleState::Failed(_))
    }
}

// ── BundleCache ───────────────────────────────────────────────────────────────

/// Owns the store and the bundle it produced.
///
/// # Example
/// ```no_run
/// use league_runtime::bundle_cache::BundleCache;
/// use league_data::store::DatasetStore;
///
/// let mut cache = BundleCache::new(DatasetStore::new("data"));
/// if let Ok(bundle) = cache.get() {
///     println!("fixtures: {}", bundle.fixtures().len());
/// }
/// ```
pub struct BundleCache {
    store: DatasetStore,
    state: BundleState,
}

impl BundleCache {
    pub fn new(store: DatasetStore) -> Self {
        Self {
            store,
            state: BundleState::Unloaded,
        }
    }

    /// Wrap an already-built bundle; the cache starts out `Loaded`.
    pub fn preloaded(store: DatasetStore, bundle: DatasetBundle) -> Self {
        Self {
            store,
            state: BundleState::Loaded(Arc::new(bundle)),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Shared handle to the bundle, loading it on first use.
    ///
    /// After a failed load every call returns the original error.
    pub fn get(&mut self) -> Result<Arc<DatasetBundle>, &LoadError> {
        if let BundleState::Unloaded = self.state {
            self.state = match self.store.load() {
                Ok(bundle) => BundleState::Loaded(Arc::new(bundle)),
                Err(e) => {
                    tracing::error!(
                        data_dir = %self.store.data_dir().display(),
                        error = %e,
                        "dataset load failed"
                    );
                    BundleState::Failed(e)
                }
            };
        } else {
            tracing::debug!("returning cached dataset bundle");
        }

        match &self.state {
            BundleState::Loaded(bundle) => Ok(Arc::clone(bundle)),
            BundleState::Failed(e) => Err(e),
            BundleState::Unloaded => unreachable!("state set above"),
        }
    }

    pub fn state(&self) -> &BundleState {
        &self.state
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
