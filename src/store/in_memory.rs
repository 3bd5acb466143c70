//! InMemoryRecordStore - Vec-backed record store with change notification.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use event_emitter_rs::EventEmitter;
use tracing::debug;

use crate::record::{Record, RecordId};

use super::store::RecordStore;
use super::{RecordSource, StoreError, StoreEvent};

/// In-memory record store backed by a `Vec` (insertion order is the display
/// default). Clone-friendly via Arc: clones share storage, the identity
/// counter, and the listener set.
#[derive(Clone)]
pub struct InMemoryRecordStore<R> {
    records: Arc<RwLock<Vec<R>>>,
    next_id: Arc<AtomicU64>,
    loaded: Arc<AtomicBool>,
    emitter: Arc<RwLock<EventEmitter>>,
}

impl<R: Record> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> InMemoryRecordStore<R> {
    /// Create a new empty, not-yet-loaded store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            loaded: Arc::new(AtomicBool::new(false)),
            emitter: Arc::new(RwLock::new(EventEmitter::new())),
        }
    }

    /// Register a listener for every mutation. The payload is the
    /// JSON-serialized [`StoreEvent`]. Returns the listener id.
    ///
    /// Listeners run on the emitter's own thread, not the mutating one.
    pub fn on_change<F>(&self, listener: F) -> Result<String, StoreError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.on_event(StoreEvent::CHANGED, listener)
    }

    /// Register a listener for a single event topic (`"loaded"`,
    /// `"inserted"`, `"updated"`, `"removed"`, `"restored"`).
    pub fn on_event<F>(&self, topic: &str, listener: F) -> Result<String, StoreError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .write()
            .map_err(|_| StoreError::LockPoisoned("listeners"))?;
        Ok(emitter.on(topic, listener))
    }

    /// Publish `event` under its own topic and the `"changed"` catch-all.
    /// Best-effort: the mutation it reports has already happened.
    fn notify(&self, event: StoreEvent) {
        let payload = match serde_json::to_string(&event) {
            Ok(payload) => payload,
            Err(_) => return,
        };
        if let Ok(mut emitter) = self.emitter.write() {
            emitter.emit(event.topic(), payload.clone());
            emitter.emit(StoreEvent::CHANGED, payload);
        }
    }
}

impl<R: Record> RecordStore<R> for InMemoryRecordStore<R> {
    fn load(&self, source: &dyn RecordSource<R>) -> Result<usize, StoreError> {
        let incoming = source.fetch()?;

        let mut seen = HashSet::with_capacity(incoming.len());
        let mut max_id = 0;
        for record in &incoming {
            if !seen.insert(record.id()) {
                return Err(StoreError::Load(format!(
                    "duplicate record id {} in dataset",
                    record.id()
                )));
            }
            max_id = max_id.max(record.id());
        }

        let count = incoming.len();
        {
            let mut records = self
                .records
                .write()
                .map_err(|_| StoreError::LockPoisoned("load"))?;
            *records = incoming;
        }
        // Identities are never reused: resume above both the highest loaded
        // id and anything already handed out.
        self.next_id.fetch_max(max_id + 1, Ordering::SeqCst);
        self.loaded.store(true, Ordering::SeqCst);

        debug!(count, "loaded dataset");
        self.notify(StoreEvent::Loaded { count });
        Ok(count)
    }

    fn insert(&self, mut draft: R) -> Result<R, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        draft.set_id(id);

        let stored = draft.clone();
        {
            let mut records = self
                .records
                .write()
                .map_err(|_| StoreError::LockPoisoned("insert"))?;
            records.push(draft);
        }

        debug!(id, "inserted record");
        self.notify(StoreEvent::Inserted { id });
        Ok(stored)
    }

    fn update(&self, id: RecordId, patch: &R) -> Result<(), StoreError> {
        {
            let mut records = self
                .records
                .write()
                .map_err(|_| StoreError::LockPoisoned("update"))?;
            let record = records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or(StoreError::NotFound { id })?;
            record.assign_from(patch);
        }

        debug!(id, "updated record");
        self.notify(StoreEvent::Updated { id });
        Ok(())
    }

    fn remove(&self, id: RecordId) -> Result<(), StoreError> {
        {
            let mut records = self
                .records
                .write()
                .map_err(|_| StoreError::LockPoisoned("remove"))?;
            let position = records
                .iter()
                .position(|r| r.id() == id)
                .ok_or(StoreError::NotFound { id })?;
            records.remove(position);
        }

        debug!(id, "removed record");
        self.notify(StoreEvent::Removed { id });
        Ok(())
    }

    fn restore_fields(&self, id: RecordId, snapshot: &R) -> Result<(), StoreError> {
        {
            let mut records = self
                .records
                .write()
                .map_err(|_| StoreError::LockPoisoned("restore"))?;
            let record = records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or(StoreError::NotFound { id })?;
            record.assign_from(snapshot);
        }

        debug!(id, "restored record fields");
        self.notify(StoreEvent::Restored { id });
        Ok(())
    }

    fn get(&self, id: RecordId) -> Result<Option<R>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned("get"))?;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    fn all(&self) -> Result<Vec<R>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned("all"))?;
        Ok(records.clone())
    }

    fn len(&self) -> Result<usize, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned("len"))?;
        Ok(records.len())
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;
    use crate::product::Product;
    use crate::store::StaticSource;

    struct FailingSource;

    impl RecordSource<Product> for FailingSource {
        fn fetch(&self) -> Result<Vec<Product>, StoreError> {
            Err(StoreError::Load("service unavailable".into()))
        }
    }

    fn chai() -> Product {
        Product::new("Chai", 18.0, 39)
    }

    fn seeded(records: Vec<Product>) -> InMemoryRecordStore<Product> {
        let store = InMemoryRecordStore::new();
        store.load(&StaticSource::new(records)).unwrap();
        store
    }

    #[test]
    fn new_store_is_empty_and_not_loaded() {
        let store = InMemoryRecordStore::<Product>::new();
        assert!(!store.is_loaded());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn load_replaces_collection_wholesale() {
        let store = seeded(vec![chai()]);
        assert!(store.is_loaded());
        assert_eq!(store.len().unwrap(), 1);

        let mut chang = Product::new("Chang", 19.0, 17);
        chang.id = 2;
        let count = store.load(&StaticSource::new(vec![chang.clone()])).unwrap();
        assert_eq!(count, 1);

        let all = store.all().unwrap();
        assert_eq!(all, vec![chang]);
    }

    #[test]
    fn failed_load_leaves_no_partial_state() {
        let mut first = chai();
        first.id = 1;
        let store = seeded(vec![first.clone()]);

        let err = store.load(&FailingSource).unwrap_err();
        assert!(matches!(err, StoreError::Load(_)));
        assert_eq!(store.all().unwrap(), vec![first]);
        assert!(store.is_loaded());
    }

    #[test]
    fn failed_load_on_fresh_store_keeps_editing_disabled() {
        let store = InMemoryRecordStore::<Product>::new();
        assert!(store.load(&FailingSource).is_err());
        assert!(!store.is_loaded());
    }

    #[test]
    fn load_rejects_duplicate_identities() {
        let mut a = chai();
        a.id = 1;
        let mut b = Product::new("Chang", 19.0, 17);
        b.id = 1;

        let store = InMemoryRecordStore::new();
        let err = store.load(&StaticSource::new(vec![a, b])).unwrap_err();
        assert!(matches!(err, StoreError::Load(_)));
        assert!(!store.is_loaded());
    }

    #[test]
    fn insert_assigns_fresh_identities_at_the_tail() {
        let store = InMemoryRecordStore::new();
        let first = store.insert(chai()).unwrap();
        let second = store.insert(Product::new("Chang", 19.0, 17)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let all = store.all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Chai");
        assert_eq!(all[1].name, "Chang");
    }

    #[test]
    fn insert_resumes_above_highest_loaded_id() {
        let mut high = chai();
        high.id = 77;
        let store = seeded(vec![high]);

        let inserted = store.insert(Product::new("Chang", 19.0, 17)).unwrap();
        assert_eq!(inserted.id, 78);
    }

    #[test]
    fn identities_are_never_reused_after_remove() {
        let store = InMemoryRecordStore::new();
        let first = store.insert(chai()).unwrap();
        store.remove(first.id).unwrap();

        let second = store.insert(Product::new("Chang", 19.0, 17)).unwrap();
        assert_ne!(second.id, first.id);
    }

    #[test]
    fn update_overwrites_fields_preserving_identity() {
        let store = InMemoryRecordStore::new();
        let stored = store.insert(chai()).unwrap();

        let mut edited = stored.clone();
        edited.units_in_stock = 12;
        edited.discontinued = true;
        store.update(stored.id, &edited).unwrap();

        let live = store.get(stored.id).unwrap().unwrap();
        assert_eq!(live.id, stored.id);
        assert_eq!(live.units_in_stock, 12);
        assert!(live.discontinued);
    }

    #[test]
    fn update_missing_record_is_not_found() {
        let store = InMemoryRecordStore::<Product>::new();
        let err = store.update(42, &chai()).unwrap_err();
        assert_eq!(err, StoreError::NotFound { id: 42 });
    }

    #[test]
    fn removed_identity_rejects_later_mutation() {
        let store = InMemoryRecordStore::new();
        let stored = store.insert(chai()).unwrap();
        store.remove(stored.id).unwrap();

        assert_eq!(
            store.remove(stored.id).unwrap_err(),
            StoreError::NotFound { id: stored.id }
        );
        assert_eq!(
            store.update(stored.id, &stored).unwrap_err(),
            StoreError::NotFound { id: stored.id }
        );
        assert_eq!(
            store.restore_fields(stored.id, &stored).unwrap_err(),
            StoreError::NotFound { id: stored.id }
        );
    }

    #[test]
    fn restore_fields_reverts_to_snapshot() {
        let store = InMemoryRecordStore::new();
        let snapshot = store.insert(chai()).unwrap();

        let mut mutated = snapshot.clone();
        mutated.units_in_stock = 100;
        store.update(snapshot.id, &mutated).unwrap();

        store.restore_fields(snapshot.id, &snapshot).unwrap();
        assert_eq!(store.get(snapshot.id).unwrap().unwrap(), snapshot);
    }

    #[test]
    fn clone_shares_storage() {
        let store = InMemoryRecordStore::new();
        let clone = store.clone();

        let stored = store.insert(chai()).unwrap();
        assert_eq!(clone.get(stored.id).unwrap().unwrap().name, "Chai");

        let next = clone.insert(Product::new("Chang", 19.0, 17)).unwrap();
        assert_eq!(next.id, stored.id + 1);
    }

    #[test]
    fn mutations_notify_changed_listeners() {
        let store = InMemoryRecordStore::new();
        let (tx, rx) = mpsc::channel::<String>();
        store
            .on_change(move |payload| {
                tx.send(payload).unwrap();
            })
            .unwrap();

        let stored = store.insert(chai()).unwrap();
        let payload = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        let event: StoreEvent = serde_json::from_str(&payload).unwrap();
        assert_eq!(event, StoreEvent::Inserted { id: stored.id });

        store.remove(stored.id).unwrap();
        let payload = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        let event: StoreEvent = serde_json::from_str(&payload).unwrap();
        assert_eq!(event, StoreEvent::Removed { id: stored.id });
    }

    #[test]
    fn topic_listeners_see_only_their_topic() {
        let store = InMemoryRecordStore::new();
        let (tx, rx) = mpsc::channel::<String>();
        store
            .on_event("removed", move |payload| {
                tx.send(payload).unwrap();
            })
            .unwrap();

        let stored = store.insert(chai()).unwrap();
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());

        store.remove(stored.id).unwrap();
        let payload = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        let event: StoreEvent = serde_json::from_str(&payload).unwrap();
        assert_eq!(event, StoreEvent::Removed { id: stored.id });
    }

    #[test]
    fn json_source_parses_service_payloads() {
        let store = InMemoryRecordStore::<Product>::new();
        let source = crate::store::JsonSource::new(
            r#"[
                {"ProductID": 1, "ProductName": "Chai", "UnitPrice": 18.0,
                 "Discontinued": false, "UnitsInStock": 39},
                {"ProductID": 2, "ProductName": "Chang", "UnitPrice": 19.0,
                 "Discontinued": true, "UnitsInStock": 17}
            ]"#,
        );

        assert_eq!(store.load(&source).unwrap(), 2);
        let all = store.all().unwrap();
        assert_eq!(all[0].name, "Chai");
        assert!(all[1].discontinued);
    }

    #[test]
    fn json_source_parse_failure_is_a_load_error() {
        let store = InMemoryRecordStore::<Product>::new();
        let err = store
            .load(&crate::store::JsonSource::new("not json"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Load(_)));
        assert!(!store.is_loaded());
    }
}
