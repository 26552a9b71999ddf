//! In-memory rank store
//!
//! Implements `RankStore` over process memory with real transaction
//! semantics: writes are staged on a private copy of the scope and published
//! under one write lock at commit.
//!
//! ## Concurrency
//!
//! - Pessimistic: one async mutex per scope, taken in `begin`, released when
//!   the transaction ends. Scopes never share a lock, and a scope's lock is
//!   forgotten once no transaction holds or awaits it.
//! - Optimistic: every published commit bumps the scope version; a commit
//!   whose read version is stale fails with `VersionConflict`.

use crate::domain::entities::{sort_by_rank, RankedEntity};
use crate::domain::errors::StoreError;
use crate::domain::value_objects::{ConcurrencyMode, Key, Rank, RankUpdate};
use crate::ports::outbound::{RankStore, RankTransaction};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex as ScopeLock, OwnedMutexGuard};
use tracing::{debug, warn};

struct ScopeRows<I> {
    version: u64,
    ranks: HashMap<I, Rank>,
}

impl<I> Default for ScopeRows<I> {
    fn default() -> Self {
        Self {
            version: 0,
            ranks: HashMap::new(),
        }
    }
}

struct Tables<S, I> {
    scopes: HashMap<S, ScopeRows<I>>,
    /// Reverse index for single-row lookup
    owners: HashMap<I, S>,
}

struct Shared<S, I> {
    tables: RwLock<Tables<S, I>>,
    scope_locks: Mutex<HashMap<S, Arc<ScopeLock<()>>>>,
    mode: ConcurrencyMode,
    fail_next_commit: AtomicBool,
    commits: AtomicU64,
}

impl<S: Key, I> Shared<S, I> {
    fn release_scope_lock(&self, scope: &S) {
        let mut locks = self.scope_locks.lock();
        // The map's own handle is the only one left
        if locks.get(scope).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(scope);
        }
    }
}

/// In-memory `RankStore`.
///
/// Cloning is cheap; clones share the same tables.
pub struct InMemoryRankStore<S, I> {
    shared: Arc<Shared<S, I>>,
}

impl<S, I> Clone for InMemoryRankStore<S, I> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: Key, I: Key> InMemoryRankStore<S, I> {
    pub fn new(mode: ConcurrencyMode) -> Self {
        Self {
            shared: Arc::new(Shared {
                tables: RwLock::new(Tables {
                    scopes: HashMap::new(),
                    owners: HashMap::new(),
                }),
                scope_locks: Mutex::new(HashMap::new()),
                mode,
                fail_next_commit: AtomicBool::new(false),
                commits: AtomicU64::new(0),
            }),
        }
    }

    pub fn pessimistic() -> Self {
        Self::new(ConcurrencyMode::Pessimistic)
    }

    pub fn optimistic() -> Self {
        Self::new(ConcurrencyMode::Optimistic)
    }

    /// Load rows exported from a legacy table, as-is.
    ///
    /// Legacy ranks may be gapped or 1-based; run `resequence` on the scope
    /// afterwards. Replaces whatever the scope held.
    pub fn import_scope(&self, scope: S, rows: impl IntoIterator<Item = (I, Rank)>) {
        let mut guard = self.shared.tables.write();
        let tables = &mut *guard;

        let entry = tables.scopes.entry(scope.clone()).or_default();
        for id in entry.ranks.keys() {
            tables.owners.remove(id);
        }
        entry.ranks = rows.into_iter().collect();
        entry.version += 1;
        for id in entry.ranks.keys() {
            tables.owners.insert(id.clone(), scope.clone());
        }
    }

    /// Make the next commit fail with a backend error.
    pub fn fail_next_commit(&self) {
        self.shared.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Version of a scope (0 if never written).
    pub fn version(&self, scope: &S) -> u64 {
        self.shared
            .tables
            .read()
            .scopes
            .get(scope)
            .map_or(0, |rows| rows.version)
    }

    /// Number of published commits.
    pub fn commit_count(&self) -> u64 {
        self.shared.commits.load(Ordering::SeqCst)
    }

    fn scope_lock(&self, scope: &S) -> Arc<ScopeLock<()>> {
        let mut locks = self.shared.scope_locks.lock();
        Arc::clone(locks.entry(scope.clone()).or_default())
    }

    #[cfg(test)]
    fn tracked_scope_locks(&self) -> usize {
        self.shared.scope_locks.lock().len()
    }
}

impl<S: Key, I: Key> Default for InMemoryRankStore<S, I> {
    fn default() -> Self {
        Self::new(ConcurrencyMode::default())
    }
}

fn to_listing<S: Key, I: Key>(scope: &S, ranks: &HashMap<I, Rank>) -> Vec<RankedEntity<S, I>> {
    let mut listing: Vec<_> = ranks
        .iter()
        .map(|(id, rank)| RankedEntity::new(scope.clone(), id.clone(), *rank))
        .collect();
    sort_by_rank(&mut listing);
    listing
}

#[async_trait]
impl<S: Key, I: Key> RankStore for InMemoryRankStore<S, I> {
    type Scope = S;
    type Id = I;
    type Transaction = InMemoryTransaction<S, I>;

    async fn list_by_scope(&self, scope: &S) -> Result<Vec<RankedEntity<S, I>>, StoreError> {
        let tables = self.shared.tables.read();
        Ok(tables
            .scopes
            .get(scope)
            .map(|rows| to_listing(scope, &rows.ranks))
            .unwrap_or_default())
    }

    async fn get(&self, id: &I) -> Result<Option<RankedEntity<S, I>>, StoreError> {
        let tables = self.shared.tables.read();
        let found = tables.owners.get(id).and_then(|scope| {
            tables
                .scopes
                .get(scope)
                .and_then(|rows| rows.ranks.get(id))
                .map(|rank| RankedEntity::new(scope.clone(), id.clone(), *rank))
        });
        Ok(found)
    }

    async fn begin(&self, scope: &S) -> Result<InMemoryTransaction<S, I>, StoreError> {
        let guard = match self.shared.mode {
            ConcurrencyMode::Pessimistic => Some(self.scope_lock(scope).lock_owned().await),
            ConcurrencyMode::Optimistic => None,
        };

        let (read_version, working) = {
            let tables = self.shared.tables.read();
            tables
                .scopes
                .get(scope)
                .map(|rows| (rows.version, rows.ranks.clone()))
                .unwrap_or_default()
        };

        debug!(scope = %scope, version = read_version, mode = self.shared.mode.as_str(), "Transaction opened");

        Ok(InMemoryTransaction {
            shared: Arc::clone(&self.shared),
            scope: scope.clone(),
            read_version,
            working,
            inserted: HashSet::new(),
            deleted: HashSet::new(),
            dirty: false,
            finished: false,
            scope_guard: guard,
        })
    }

    fn concurrency(&self) -> ConcurrencyMode {
        self.shared.mode
    }
}

/// Transaction over one scope of an [`InMemoryRankStore`].
///
/// Holds a private copy of the scope. Dropping it without committing discards
/// the copy and releases the scope lock.
pub struct InMemoryTransaction<S: Key, I: Key> {
    shared: Arc<Shared<S, I>>,
    scope: S,
    read_version: u64,
    working: HashMap<I, Rank>,
    inserted: HashSet<I>,
    deleted: HashSet<I>,
    dirty: bool,
    finished: bool,
    scope_guard: Option<OwnedMutexGuard<()>>,
}

impl<S: Key, I: Key> InMemoryTransaction<S, I> {
    fn missing(&self, id: &I) -> StoreError {
        StoreError::Backend(format!("no row {} in scope {}", id, self.scope))
    }
}

#[async_trait]
impl<S: Key, I: Key> RankTransaction for InMemoryTransaction<S, I> {
    type Scope = S;
    type Id = I;

    fn scope(&self) -> &S {
        &self.scope
    }

    async fn list_scope(&mut self) -> Result<Vec<RankedEntity<S, I>>, StoreError> {
        Ok(to_listing(&self.scope, &self.working))
    }

    async fn insert(&mut self, entity: RankedEntity<S, I>) -> Result<(), StoreError> {
        if entity.scope != self.scope {
            return Err(StoreError::Backend(format!(
                "insert into scope {} through a transaction on {}",
                entity.scope, self.scope
            )));
        }
        if self.working.contains_key(&entity.id) {
            return Err(StoreError::DuplicateKey(entity.id.to_string()));
        }
        let owned_elsewhere = {
            let tables = self.shared.tables.read();
            tables.owners.contains_key(&entity.id) && !self.deleted.contains(&entity.id)
        };
        if owned_elsewhere {
            return Err(StoreError::DuplicateKey(entity.id.to_string()));
        }

        self.deleted.remove(&entity.id);
        self.inserted.insert(entity.id.clone());
        self.working.insert(entity.id, entity.rank);
        self.dirty = true;
        Ok(())
    }

    async fn delete(&mut self, id: &I) -> Result<(), StoreError> {
        if self.working.remove(id).is_none() {
            return Err(self.missing(id));
        }
        if !self.inserted.remove(id) {
            self.deleted.insert(id.clone());
        }
        self.dirty = true;
        Ok(())
    }

    async fn batch_update_ranks(&mut self, updates: &[RankUpdate<I>]) -> Result<(), StoreError> {
        if let Some(unknown) = updates.iter().find(|u| !self.working.contains_key(&u.id)) {
            return Err(self.missing(&unknown.id));
        }
        for update in updates {
            self.working.insert(update.id.clone(), update.rank);
        }
        self.dirty |= !updates.is_empty();
        Ok(())
    }

    async fn commit(mut self) -> Result<(), StoreError> {
        if self.shared.fail_next_commit.swap(false, Ordering::SeqCst) {
            warn!(scope = %self.scope, "Injected commit failure");
            return Err(StoreError::Backend("injected commit failure".into()));
        }

        let mut guard = self.shared.tables.write();
        let tables = &mut *guard;

        let found = tables.scopes.get(&self.scope).map_or(0, |rows| rows.version);
        if found != self.read_version {
            return Err(StoreError::VersionConflict {
                scope: self.scope.to_string(),
                expected: self.read_version,
                found,
            });
        }

        if !self.dirty {
            self.finished = true;
            return Ok(());
        }

        if let Some(taken) = self
            .inserted
            .iter()
            .find(|id| tables.owners.contains_key(*id))
        {
            return Err(StoreError::DuplicateKey(taken.to_string()));
        }

        let rows = tables.scopes.entry(self.scope.clone()).or_default();
        rows.ranks = std::mem::take(&mut self.working);
        rows.version += 1;
        let version = rows.version;

        for id in self.deleted.drain() {
            tables.owners.remove(&id);
        }
        for id in self.inserted.drain() {
            tables.owners.insert(id, self.scope.clone());
        }
        drop(guard);

        self.finished = true;
        self.shared.commits.fetch_add(1, Ordering::SeqCst);
        debug!(scope = %self.scope, version, "Transaction committed");
        Ok(())
    }

    async fn rollback(mut self) {
        self.finished = true;
        debug!(scope = %self.scope, "Transaction rolled back");
    }
}

impl<S: Key, I: Key> Drop for InMemoryTransaction<S, I> {
    fn drop(&mut self) {
        if !self.finished {
            debug!(scope = %self.scope, dirty = self.dirty, "Transaction dropped, rolling back");
        }
        if let Some(guard) = self.scope_guard.take() {
            drop(guard);
            self.shared.release_scope_lock(&self.scope);
        }
    }
}
