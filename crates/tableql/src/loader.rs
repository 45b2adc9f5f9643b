mod partition;
pub use partition::partition;

use tableql_core::{
    schema::db::ColumnRef,
    stmt::{Filter, Row, Select, Value},
    Driver, Error, Result,
};

use indexmap::IndexMap;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tokio::sync::oneshot;

/// Loader settings shared by every loader of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// How many times the future that opened a batch yields to the executor
    /// before dispatching it. Sibling resolvers polled in the meantime join
    /// the batch.
    pub batch_yield_count: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_yield_count: 2,
        }
    }
}

/// What a loader is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    /// No keys are queued and no query is running
    Idle,

    /// At least one batch is accepting keys
    Collecting,

    /// A batch query is running and nothing is queued
    Dispatching,
}

/// Batches lookups of rows by the value of one column.
///
/// Every `load` made while a batch is collecting joins it, and the batch is
/// resolved with a single `column IN (...)` query. Keys are grouped into
/// separate batches by their filter, so two list fields with different
/// arguments never share a query.
#[derive(Debug)]
pub struct Loader {
    /// Table and column looked up by key
    column: ColumnRef,

    /// Schema qualifying the table in batch queries
    schema: Option<String>,

    driver: Arc<dyn Driver>,

    config: LoaderConfig,

    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    /// Used to tell a batch apart from a later batch with the same filter
    next_batch_id: u64,

    /// Batches accepting keys
    collecting: HashMap<Filter, Batch>,

    /// Number of batch queries in flight
    dispatching: usize,

    /// Rows of every key resolved so far
    cache: HashMap<(Filter, Value), Vec<Row>>,
}

#[derive(Debug)]
struct Batch {
    id: u64,

    /// Set when the opener went away and the batch was handed to its
    /// waiters. The next caller to join takes over as opener.
    orphaned: bool,

    /// Distinct keys in the order they were first requested, with everyone
    /// waiting on each.
    waiters: IndexMap<Value, Vec<oneshot::Sender<Reply>>>,
}

/// What a waiter is sent.
#[derive(Debug)]
enum Reply {
    Rows(Result<Vec<Row>>),

    /// The batch's opener went away before dispatching it. Dispatch batch
    /// `id`, then wait on `rx`.
    Dispatch {
        id: u64,
        rx: oneshot::Receiver<Reply>,
    },
}

enum Slot {
    Ready(Vec<Row>),
    Pending(oneshot::Receiver<Reply>),
}

impl Loader {
    pub fn new(column: ColumnRef, driver: Arc<dyn Driver>, config: LoaderConfig) -> Loader {
        Loader {
            column,
            schema: None,
            driver,
            config,
            state: Mutex::default(),
        }
    }

    /// Qualify the loader's table with `schema` in every batch query.
    pub fn in_schema(mut self, schema: impl Into<String>) -> Loader {
        self.schema = Some(schema.into());
        self
    }

    /// The `(table, column)` pair this loader reads.
    pub fn column(&self) -> &ColumnRef {
        &self.column
    }

    pub fn state(&self) -> LoaderState {
        let state = self.lock();

        if !state.collecting.is_empty() {
            LoaderState::Collecting
        } else if state.dispatching > 0 {
            LoaderState::Dispatching
        } else {
            LoaderState::Idle
        }
    }

    /// Rows whose column equals `key` and that satisfy `filter`.
    ///
    /// A null key never matches and resolves to no rows without a query.
    pub async fn load(&self, key: Value, filter: Filter) -> Result<Vec<Row>> {
        let mut rows = self.load_many(vec![key], filter).await?;
        Ok(rows.pop().unwrap_or_default())
    }

    /// Rows for each of `keys`, positionally.
    pub async fn load_many(&self, keys: Vec<Value>, filter: Filter) -> Result<Vec<Vec<Row>>> {
        let (slots, opened) = self.enqueue(keys, &filter);

        let mut guard = opened.map(|id| OpenBatch {
            loader: self,
            filter: &filter,
            id,
            armed: true,
        });

        // Rebound after `guard` so it drops first: a cancelled opener's own
        // receivers must be closed when the guard looks for a waiter to hand
        // the batch to.
        let slots = slots;

        if let Some(guard) = &mut guard {
            for _ in 0..self.config.batch_yield_count {
                tokio::task::yield_now().await;
            }

            guard.armed = false;
            self.dispatch(&filter, guard.id).await;
        }

        let mut ret = Vec::with_capacity(slots.len());

        for slot in slots {
            ret.push(match slot {
                Slot::Ready(rows) => rows,
                Slot::Pending(rx) => self.wait(rx, &filter).await?,
            });
        }

        Ok(ret)
    }

    /// Waits for a queued key's rows, dispatching its batch if asked to.
    async fn wait(&self, mut rx: oneshot::Receiver<Reply>, filter: &Filter) -> Result<Vec<Row>> {
        loop {
            match rx.await {
                Ok(Reply::Rows(rows)) => return rows,
                Ok(Reply::Dispatch { id, rx: next }) => {
                    self.dispatch(filter, id).await;
                    rx = next;
                }
                Err(_) => {
                    return Err(Error::load_cancelled(
                        &self.column.table,
                        &self.column.column,
                    ))
                }
            }
        }
    }

    /// Queues every key that is neither null nor cached. Returns the id of the
    /// batch this call opened or took over, if any.
    fn enqueue(&self, keys: Vec<Value>, filter: &Filter) -> (Vec<Slot>, Option<u64>) {
        let mut state = self.lock();
        let State {
            next_batch_id,
            collecting,
            cache,
            ..
        } = &mut *state;

        let mut slots = Vec::with_capacity(keys.len());
        let mut opened = None;

        for key in keys {
            if key.is_null() {
                slots.push(Slot::Ready(vec![]));
                continue;
            }

            if let Some(rows) = cache.get(&(filter.clone(), key.clone())) {
                slots.push(Slot::Ready(rows.clone()));
                continue;
            }

            let batch = collecting.entry(filter.clone()).or_insert_with(|| {
                let id = *next_batch_id;
                *next_batch_id += 1;
                opened = Some(id);
                Batch {
                    id,
                    orphaned: false,
                    waiters: IndexMap::new(),
                }
            });

            if batch.orphaned {
                batch.orphaned = false;
                opened = Some(batch.id);
            }

            let (tx, rx) = oneshot::channel();
            batch.waiters.entry(key).or_default().push(tx);
            slots.push(Slot::Pending(rx));
        }

        (slots, opened)
    }

    async fn dispatch(&self, filter: &Filter, id: u64) {
        let Some(batch) = self.take_batch(filter, id) else {
            return;
        };

        let _in_flight = InFlight::new(self);
        let keys: Vec<Value> = batch.waiters.keys().cloned().collect();

        tracing::trace!(
            loader = %self.column,
            %filter,
            keys = keys.len(),
            "dispatching batch"
        );

        let mut select =
            Select::batch(&self.column.table, &self.column.column, keys.clone(), filter);
        select.schema = self.schema.clone();

        match self.driver.exec(select.into()).await {
            Ok(rows) => {
                let groups = partition(&self.column.column, &keys, rows);

                {
                    let mut state = self.lock();
                    for (key, rows) in keys.iter().zip(&groups) {
                        state
                            .cache
                            .insert((filter.clone(), key.clone()), rows.clone());
                    }
                }

                for (senders, rows) in batch.waiters.into_values().zip(groups) {
                    for tx in senders {
                        let _ = tx.send(Reply::Rows(Ok(rows.clone())));
                    }
                }
            }
            Err(err) => {
                tracing::debug!(loader = %self.column, %filter, error = %err, "batch failed");

                for tx in batch.waiters.into_values().flatten() {
                    let _ = tx.send(Reply::Rows(Err(err.clone())));
                }
            }
        }
    }

    /// Removes the batch `id` from the collecting set so later loads open a
    /// new one.
    fn take_batch(&self, filter: &Filter, id: u64) -> Option<Batch> {
        let mut state = self.lock();

        match state.collecting.get(filter) {
            Some(batch) if batch.id == id => {
                state.dispatching += 1;
                state.collecting.remove(filter)
            }
            _ => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // The lock is never held across an await or a user callback, so a
        // poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Hands a batch whose opener was cancelled before dispatching it to the
/// callers still waiting on it. Every one of them is asked to dispatch and
/// the first to be polled does. A batch nobody waits on is discarded.
struct OpenBatch<'a> {
    loader: &'a Loader,
    filter: &'a Filter,
    id: u64,
    armed: bool,
}

impl Drop for OpenBatch<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut state = self.loader.lock();

        let Some(batch) = state
            .collecting
            .get_mut(self.filter)
            .filter(|batch| batch.id == self.id)
        else {
            return;
        };

        batch.waiters.retain(|_, senders| {
            senders.retain(|tx| !tx.is_closed());
            !senders.is_empty()
        });

        if batch.waiters.is_empty() {
            tracing::debug!(loader = %self.loader.column, "batch dropped before dispatch");
            state.collecting.remove(self.filter);
            return;
        }

        tracing::debug!(
            loader = %self.loader.column,
            keys = batch.waiters.len(),
            "batch opener dropped; handing dispatch to waiters"
        );

        batch.orphaned = true;

        for tx in batch.waiters.values_mut().flatten() {
            let (next, rx) = oneshot::channel();
            let prev = std::mem::replace(tx, next);
            let _ = prev.send(Reply::Dispatch { id: self.id, rx });
        }
    }
}

/// Counts a batch as in flight until dropped.
struct InFlight<'a>(&'a Loader);

impl<'a> InFlight<'a> {
    fn new(loader: &'a Loader) -> InFlight<'a> {
        InFlight(loader)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.lock().dispatching -= 1;
    }
}
