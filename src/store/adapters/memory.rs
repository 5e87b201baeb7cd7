//! In-memory document store with live change feeds.

use async_trait::async_trait;
use chrono::SecondsFormat;
use mockable::{Clock, DefaultClock};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::store::{
    domain::{
        Collection, Document, DocumentId, FieldValue, Fields, Precondition, Query, Revision,
        Write, WriteBatch,
    },
    ports::{DocumentStore, Snapshot, StoreError, StoreResult, Subscription},
};

/// Thread-safe in-memory document store.
///
/// Commits are serialized behind a single lock, so every subscriber observes
/// snapshots in commit order.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    state: Arc<RwLock<StoreState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Default)]
struct StoreState {
    collections: HashMap<Collection, BTreeMap<DocumentId, Document>>,
    subscribers: Vec<Subscriber>,
    last_revision: u64,
    next_subscriber: u64,
    unavailable: bool,
}

struct Subscriber {
    id: u64,
    collection: Collection,
    query: Query,
    sender: mpsc::UnboundedSender<Snapshot>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Creates an empty store stamping server timestamps with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty store stamping server timestamps with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            clock,
        }
    }

    /// Simulates a transport outage. While unavailable every operation fails
    /// with [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        if let Ok(mut state) = self.state.write() {
            state.unavailable = !available;
        }
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state
            .read()
            .map(|state| state.subscribers.len())
            .unwrap_or(0)
    }

    fn read_state(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        let state = self
            .state
            .read()
            .map_err(|err| StoreError::unavailable(std::io::Error::other(err.to_string())))?;
        ensure_available(&state)?;
        Ok(state)
    }

    fn write_state(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        let state = self
            .state
            .write()
            .map_err(|err| StoreError::unavailable(std::io::Error::other(err.to_string())))?;
        ensure_available(&state)?;
        Ok(state)
    }

    fn server_time(&self) -> Value {
        Value::String(self.clock.utc().to_rfc3339_opts(SecondsFormat::Nanos, true))
    }

    fn commit_locked(&self, state: &mut StoreState, batch: &WriteBatch) -> StoreResult<()> {
        for precondition in batch.preconditions() {
            check_precondition(state, precondition)?;
        }

        let revision = Revision::new(state.last_revision + 1);
        let timestamp = self.server_time();
        let mut staged = state.collections.clone();
        for write in batch.writes() {
            apply_write(&mut staged, write, revision, &timestamp)?;
        }

        state.collections = staged;
        state.last_revision = revision.value();
        let mut touched: Vec<Collection> = batch.writes().iter().map(Write::collection).collect();
        touched.sort_unstable();
        touched.dedup();
        for collection in touched {
            notify(state, collection);
        }
        Ok(())
    }
}

fn ensure_available(state: &StoreState) -> StoreResult<()> {
    if state.unavailable {
        return Err(StoreError::unavailable(std::io::Error::new(
            std::io::ErrorKind::NotConnected,
            "store is offline",
        )));
    }
    Ok(())
}

fn find<'a>(state: &'a StoreState, collection: Collection, id: &DocumentId) -> Option<&'a Document> {
    state
        .collections
        .get(&collection)
        .and_then(|documents| documents.get(id))
}

fn check_precondition(state: &StoreState, precondition: &Precondition) -> StoreResult<()> {
    let (collection, id, holds) = match precondition {
        Precondition::Absent { collection, id } => {
            (*collection, id, find(state, *collection, id).is_none())
        }
        Precondition::AtRevision {
            collection,
            id,
            revision,
        } => (
            *collection,
            id,
            find(state, *collection, id).is_some_and(|doc| doc.revision() == *revision),
        ),
    };
    if holds {
        Ok(())
    } else {
        Err(StoreError::PreconditionFailed {
            collection,
            id: id.clone(),
        })
    }
}

/// Resolves field writes onto `fields`, rejecting deletes when `allow_delete`
/// is false.
fn resolve_fields(
    fields: &mut Map<String, Value>,
    writes: &Fields,
    timestamp: &Value,
    allow_delete: bool,
) -> StoreResult<()> {
    for (name, write) in writes.iter() {
        match write {
            FieldValue::Set(value) => {
                fields.insert(name.to_owned(), value.clone());
            }
            FieldValue::ServerTimestamp => {
                fields.insert(name.to_owned(), timestamp.clone());
            }
            FieldValue::Delete if allow_delete => {
                fields.remove(name);
            }
            FieldValue::Delete => return Err(StoreError::InvalidField(name.to_owned())),
        }
    }
    Ok(())
}

fn apply_write(
    collections: &mut HashMap<Collection, BTreeMap<DocumentId, Document>>,
    write: &Write,
    revision: Revision,
    timestamp: &Value,
) -> StoreResult<()> {
    let documents = collections.entry(write.collection()).or_default();
    match write {
        Write::Set { id, fields, .. } => {
            let mut resolved = Map::new();
            resolve_fields(&mut resolved, fields, timestamp, false)?;
            documents.insert(id.clone(), Document::new(id.clone(), revision, resolved));
        }
        Write::Update {
            collection,
            id,
            fields,
        } => {
            let existing = documents.get(id).ok_or_else(|| StoreError::NotFound {
                collection: *collection,
                id: id.clone(),
            })?;
            let mut resolved = existing.fields().clone();
            resolve_fields(&mut resolved, fields, timestamp, true)?;
            documents.insert(id.clone(), Document::new(id.clone(), revision, resolved));
        }
        Write::Delete { id, .. } => {
            documents.remove(id);
        }
    }
    Ok(())
}

fn snapshot_for(state: &StoreState, collection: Collection, query: &Query) -> Snapshot {
    let documents = state
        .collections
        .get(&collection)
        .map(|documents| query.apply(documents.values()))
        .unwrap_or_default();
    Snapshot {
        collection,
        documents,
    }
}

fn notify(state: &mut StoreState, collection: Collection) {
    let mut closed = Vec::new();
    for subscriber in state
        .subscribers
        .iter()
        .filter(|subscriber| subscriber.collection == collection)
    {
        let snapshot = snapshot_for(state, collection, &subscriber.query);
        if subscriber.sender.send(snapshot).is_err() {
            closed.push(subscriber.id);
        }
    }
    state
        .subscribers
        .retain(|subscriber| !closed.contains(&subscriber.id));
}

fn remove_subscriber(state: &Weak<RwLock<StoreState>>, subscriber_id: u64) {
    if let Some(state) = state.upgrade()
        && let Ok(mut guard) = state.write()
    {
        guard
            .subscribers
            .retain(|subscriber| subscriber.id != subscriber_id);
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> StoreResult<Option<Document>> {
        let state = self.read_state()?;
        Ok(find(&state, collection, id).cloned())
    }

    async fn list(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Document>> {
        let state = self.read_state()?;
        Ok(snapshot_for(&state, collection, query).documents)
    }

    async fn create(&self, collection: Collection, fields: Fields) -> StoreResult<DocumentId> {
        let id = DocumentId::new(Uuid::new_v4().to_string());
        let batch = WriteBatch::new()
            .require_absent(collection, id.clone())
            .set(collection, id.clone(), fields);
        let mut state = self.write_state()?;
        self.commit_locked(&mut state, &batch)?;
        Ok(id)
    }

    async fn set(
        &self,
        collection: Collection,
        id: &DocumentId,
        fields: Fields,
    ) -> StoreResult<()> {
        let batch = WriteBatch::new().set(collection, id.clone(), fields);
        let mut state = self.write_state()?;
        self.commit_locked(&mut state, &batch)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &DocumentId,
        fields: Fields,
    ) -> StoreResult<()> {
        let batch = WriteBatch::new().update(collection, id.clone(), fields);
        let mut state = self.write_state()?;
        self.commit_locked(&mut state, &batch)
    }

    async fn delete(&self, collection: Collection, id: &DocumentId) -> StoreResult<()> {
        let batch = WriteBatch::new().delete(collection, id.clone());
        let mut state = self.write_state()?;
        self.commit_locked(&mut state, &batch)
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut state = self.write_state()?;
        self.commit_locked(&mut state, &batch)
    }

    async fn subscribe(&self, collection: Collection, query: Query) -> StoreResult<Subscription> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut state = self.write_state()?;
        let subscriber_id = state.next_subscriber;
        state.next_subscriber += 1;

        let initial = snapshot_for(&state, collection, &query);
        sender
            .send(initial)
            .map_err(|err| StoreError::unavailable(std::io::Error::other(err.to_string())))?;
        state.subscribers.push(Subscriber {
            id: subscriber_id,
            collection,
            query,
            sender,
        });

        let weak = Arc::downgrade(&self.state);
        Ok(Subscription::new(collection, receiver, move || {
            remove_subscriber(&weak, subscriber_id);
        }))
    }
}
