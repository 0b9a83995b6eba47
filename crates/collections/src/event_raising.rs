//! Relationship-maintenance events from collection notifications
//!
//! `EventRaisingObserver` translates the observable layer's notifications
//! into calls on a [`DomainObjectCollectionEventRaiser`]:
//!
//! | Notification | Raiser call |
//! |--------------|-------------|
//! | changing(Insert, x, i) | `begin_add(i, x)` |
//! | changed(Insert, x, i) | `end_add(i, x)` |
//! | changing(Remove, x, i) | `begin_remove(i, x)` |
//! | changed(Remove, x, i) | `end_remove(i, x)` |
//! | changing(Sort) | nothing |
//! | changed(Sort) | `within_replace_data()` |
//!
//! A sort is announced once, after the reorder, so the raiser already sees
//! the sorted collection.

use std::rc::Rc;

use relcoll_core::{
    CollectionData, CollectionResult, DomainObjectCollectionEventRaiser, DomainObjectRef,
    OperationKind,
};

use crate::observable::{CollectionObserver, ObservableCollectionData};

/// Observer forwarding notifications to an event raiser
pub struct EventRaisingObserver {
    raiser: Rc<dyn DomainObjectCollectionEventRaiser>,
}

impl EventRaisingObserver {
    /// Forward notifications to `raiser`
    pub fn new(raiser: Rc<dyn DomainObjectCollectionEventRaiser>) -> Self {
        Self { raiser }
    }

    /// The raiser receiving the events
    pub fn raiser(&self) -> &Rc<dyn DomainObjectCollectionEventRaiser> {
        &self.raiser
    }
}

impl CollectionObserver for EventRaisingObserver {
    fn on_data_changing(
        &self,
        operation: OperationKind,
        affected: Option<&DomainObjectRef>,
        index: Option<usize>,
    ) -> CollectionResult<()> {
        match (operation, affected, index) {
            (OperationKind::Insert, Some(object), Some(index)) => {
                self.raiser.begin_add(index, object)
            }
            (OperationKind::Remove, Some(object), Some(index)) => {
                self.raiser.begin_remove(index, object)
            }
            _ => Ok(()),
        }
    }

    fn on_data_changed(
        &self,
        operation: OperationKind,
        affected: Option<&DomainObjectRef>,
        index: Option<usize>,
    ) -> CollectionResult<()> {
        match (operation, affected, index) {
            (OperationKind::Insert, Some(object), Some(index)) => {
                self.raiser.end_add(index, object)
            }
            (OperationKind::Remove, Some(object), Some(index)) => {
                self.raiser.end_remove(index, object)
            }
            (OperationKind::Sort, _, _) => self.raiser.within_replace_data(),
            _ => Ok(()),
        }
    }
}

/// Collection layer raising relationship-maintenance events
pub type EventRaisingCollectionData = ObservableCollectionData<EventRaisingObserver>;

impl EventRaisingCollectionData {
    /// Wrap `inner`, raising events on `raiser`
    pub fn with_raiser(
        inner: Rc<dyn CollectionData>,
        raiser: Rc<dyn DomainObjectCollectionEventRaiser>,
    ) -> Self {
        ObservableCollectionData::new(inner, EventRaisingObserver::new(raiser))
    }

    /// The raiser receiving the events
    pub fn raiser(&self) -> &Rc<dyn DomainObjectCollectionEventRaiser> {
        self.observer().raiser()
    }

    /// Announce that the owning relationship is about to be deleted
    ///
    /// Never called by the collection itself.
    pub fn begin_delete(&self) -> CollectionResult<()> {
        self.raiser().begin_delete()
    }

    /// Announce that the owning relationship has been deleted
    pub fn end_delete(&self) -> CollectionResult<()> {
        self.raiser().end_delete()
    }
}
