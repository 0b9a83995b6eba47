//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Once;

pub use relcoll::{
    BaseCollectionData, ClassDefinition, ClassRef, CollectionData, CollectionDataExt,
    CollectionError, CollectionObserver, CollectionResult, CopyOnWriteCollectionData,
    DomainObjectCollectionEventRaiser, DomainObjectRef, Entity, ErrorKind, EventRaisingCollectionData,
    IndirectEventRaiser, ModificationCheckingCollectionData, ObjectId, ObservableCollectionData,
    OperationKind, ReadOnlyCollectionData, RelationEndPointId,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Install a test-writer tracing subscriber once per test binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
    });
}

// ============================================================================
// Domain fixtures
// ============================================================================

/// The "Order" class used by most tests.
pub fn order_class() -> ClassRef {
    ClassDefinition::new("Order")
}

/// A fresh Order entity.
pub fn order() -> DomainObjectRef {
    Entity::new(&order_class()).into_ref()
}

/// `n` fresh Order entities.
pub fn orders(n: usize) -> Vec<DomainObjectRef> {
    (0..n).map(|_| order()).collect()
}

/// A base store seeded with `objects`.
pub fn base_with(objects: &[DomainObjectRef]) -> Rc<BaseCollectionData> {
    Rc::new(BaseCollectionData::from_objects(objects.iter().cloned()).unwrap())
}

/// Ids of the collection's elements, in order.
pub fn ids_of(data: &dyn CollectionData) -> Vec<ObjectId> {
    data.object_ids()
}

// ============================================================================
// Notification recording
// ============================================================================

/// Changing or changed half of a notification pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Changing,
    Changed,
}

/// One notification, with the collection state seen while it was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observed {
    pub phase: Phase,
    pub operation: OperationKind,
    pub affected: Option<ObjectId>,
    pub index: Option<usize>,
    /// `count()` during the notification
    pub count: usize,
    /// Id at `index` during the notification
    pub at_index: Option<ObjectId>,
}

impl Observed {
    pub fn new(
        phase: Phase,
        operation: OperationKind,
        affected: Option<&DomainObjectRef>,
        index: Option<usize>,
        data: &dyn CollectionData,
    ) -> Self {
        Self {
            phase,
            operation,
            affected: affected.map(|o| o.id().clone()),
            index,
            count: data.count(),
            at_index: index
                .and_then(|i| data.get_object(i))
                .map(|o| o.id().clone()),
        }
    }
}

/// Observer recording every notification together with the observed state.
pub struct RecordingObserver {
    data: Rc<dyn CollectionData>,
    pub log: RefCell<Vec<Observed>>,
}

impl RecordingObserver {
    pub fn new(data: Rc<dyn CollectionData>) -> Self {
        Self {
            data,
            log: RefCell::new(Vec::new()),
        }
    }

    pub fn take(&self) -> Vec<Observed> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

impl CollectionObserver for RecordingObserver {
    fn on_data_changing(
        &self,
        operation: OperationKind,
        affected: Option<&DomainObjectRef>,
        index: Option<usize>,
    ) -> CollectionResult<()> {
        let observed = Observed::new(Phase::Changing, operation, affected, index, &*self.data);
        self.log.borrow_mut().push(observed);
        Ok(())
    }

    fn on_data_changed(
        &self,
        operation: OperationKind,
        affected: Option<&DomainObjectRef>,
        index: Option<usize>,
    ) -> CollectionResult<()> {
        let observed = Observed::new(Phase::Changed, operation, affected, index, &*self.data);
        self.log.borrow_mut().push(observed);
        Ok(())
    }
}

/// Observable wrapper over a fresh base store seeded with `objects`.
pub fn observed_with(
    objects: &[DomainObjectRef],
) -> (ObservableCollectionData<RecordingObserver>, Rc<BaseCollectionData>) {
    let base = base_with(objects);
    let observer = RecordingObserver::new(base.clone());
    (ObservableCollectionData::new(base.clone(), observer), base)
}

// ============================================================================
// Event raiser recording
// ============================================================================

/// Relationship event as seen by a raiser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaisedEvent {
    BeginAdd(usize, ObjectId, usize),
    EndAdd(usize, ObjectId, usize),
    BeginRemove(usize, ObjectId, usize),
    EndRemove(usize, ObjectId, usize),
    BeginDelete,
    EndDelete,
    /// Ids in collection order when the event arrived
    WithinReplaceData(Vec<ObjectId>),
}

/// Raiser recording events; the observed collection is wired in later.
#[derive(Default)]
pub struct RecordingRaiser {
    data: RefCell<Option<Weak<dyn CollectionData>>>,
    pub events: RefCell<Vec<RaisedEvent>>,
}

impl RecordingRaiser {
    pub fn observe(&self, data: Weak<dyn CollectionData>) {
        *self.data.borrow_mut() = Some(data);
    }

    fn data(&self) -> Option<Rc<dyn CollectionData>> {
        self.data.borrow().as_ref().and_then(Weak::upgrade)
    }

    pub fn take(&self) -> Vec<RaisedEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    fn count(&self) -> usize {
        self.data().map_or(0, |d| d.count())
    }

    fn ids(&self) -> Vec<ObjectId> {
        self.data().map_or_else(Vec::new, |d| d.object_ids())
    }

    fn push(&self, event: RaisedEvent) -> CollectionResult<()> {
        self.events.borrow_mut().push(event);
        Ok(())
    }
}

impl DomainObjectCollectionEventRaiser for RecordingRaiser {
    fn begin_add(&self, index: usize, object: &DomainObjectRef) -> CollectionResult<()> {
        self.push(RaisedEvent::BeginAdd(index, object.id().clone(), self.count()))
    }

    fn end_add(&self, index: usize, object: &DomainObjectRef) -> CollectionResult<()> {
        self.push(RaisedEvent::EndAdd(index, object.id().clone(), self.count()))
    }

    fn begin_remove(&self, index: usize, object: &DomainObjectRef) -> CollectionResult<()> {
        self.push(RaisedEvent::BeginRemove(index, object.id().clone(), self.count()))
    }

    fn end_remove(&self, index: usize, object: &DomainObjectRef) -> CollectionResult<()> {
        self.push(RaisedEvent::EndRemove(index, object.id().clone(), self.count()))
    }

    fn begin_delete(&self) -> CollectionResult<()> {
        self.push(RaisedEvent::BeginDelete)
    }

    fn end_delete(&self) -> CollectionResult<()> {
        self.push(RaisedEvent::EndDelete)
    }

    fn within_replace_data(&self) -> CollectionResult<()> {
        let ids = self.ids();
        self.push(RaisedEvent::WithinReplaceData(ids))
    }
}

// ============================================================================
// Full chain
// ============================================================================

/// A collection composed the way relationship properties use it.
pub struct Chain {
    pub source: Rc<BaseCollectionData>,
    pub cow: Rc<CopyOnWriteCollectionData>,
    pub checked: Rc<ModificationCheckingCollectionData>,
    pub raiser: Rc<IndirectEventRaiser>,
    pub recorder: Rc<RecordingRaiser>,
    pub collection: Rc<EventRaisingCollectionData>,
}

impl Chain {
    /// Base → CopyOnWrite → ModificationChecking(Order) → EventRaising, wired.
    pub fn new(objects: &[DomainObjectRef]) -> Self {
        let source = base_with(objects);
        let cow = Rc::new(CopyOnWriteCollectionData::new(source.clone()));
        let checked = Rc::new(
            ModificationCheckingCollectionData::new(cow.clone())
                .with_required_item_type(order_class()),
        );
        let raiser = Rc::new(IndirectEventRaiser::new());
        let collection = Rc::new(EventRaisingCollectionData::with_raiser(
            checked.clone(),
            raiser.clone(),
        ));

        let recorder = Rc::new(RecordingRaiser::default());
        let dynamic: Rc<dyn CollectionData> = collection.clone();
        recorder.observe(Rc::downgrade(&dynamic));
        raiser.set_target(recorder.clone());

        Self {
            source,
            cow,
            checked,
            raiser,
            recorder,
            collection,
        }
    }
}
