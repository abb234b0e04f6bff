//! Store headcount registry
//!
//! State for the `kestrel-stores` demo server: per-store user and manager
//! counts. The registry is built once at startup and handed to the server
//! handler; tools reach it only through that handle.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::config::StoreSeed;

mod handler;

pub use handler::StoreServerHandler;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub user_cnt: u32,
    pub manager_cnt: u32,
}

impl StoreCounts {
    /// JSON with a space after `:` and `,`, e.g. `{"user_cnt": 18, "manager_cnt": 2}`
    pub fn to_json(&self) -> String {
        format!(
            r#"{{"user_cnt": {}, "manager_cnt": {}}}"#,
            self.user_cnt, self.manager_cnt
        )
    }
}

#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: Mutex<HashMap<String, StoreCounts>>,
}

impl StoreRegistry {
    pub fn new<I, S>(initial: I) -> Self
    where
        I: IntoIterator<Item = (S, StoreCounts)>,
        S: AsRef<str>,
    {
        let stores = initial
            .into_iter()
            .map(|(name, counts)| (store_key(name.as_ref()), counts))
            .collect();
        Self {
            stores: Mutex::new(stores),
        }
    }

    pub fn from_seeds(seeds: &[StoreSeed]) -> Self {
        Self::new(seeds.iter().map(|seed| {
            (
                seed.name.as_str(),
                StoreCounts {
                    user_cnt: seed.user_cnt,
                    manager_cnt: seed.manager_cnt,
                },
            )
        }))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, StoreCounts>> {
        self.stores.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register one more user or manager; `None` if the store is unknown
    pub fn add(&self, store: &str, is_manager: bool) -> Option<StoreCounts> {
        let mut stores = self.lock();
        let counts = stores.get_mut(&store_key(store))?;
        if is_manager {
            counts.manager_cnt += 1;
        } else {
            counts.user_cnt += 1;
        }
        debug!("➕ {} now {:?}", store, counts);
        Some(*counts)
    }

    /// Remove one user or manager, never going below zero
    pub fn leave(&self, store: &str, is_manager: bool) -> Option<StoreCounts> {
        let mut stores = self.lock();
        let counts = stores.get_mut(&store_key(store))?;
        if is_manager {
            counts.manager_cnt = counts.manager_cnt.saturating_sub(1);
        } else {
            counts.user_cnt = counts.user_cnt.saturating_sub(1);
        }
        debug!("➖ {} now {:?}", store, counts);
        Some(*counts)
    }

    pub fn info(&self, store: &str) -> Option<StoreCounts> {
        self.lock().get(&store_key(store)).copied()
    }

    /// Known store names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }
}

fn store_key(name: &str) -> String {
    name.trim().to_uppercase()
}
