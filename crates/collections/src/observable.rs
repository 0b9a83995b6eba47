//! Change notification around every mutation
//!
//! `ObservableCollectionData` wraps a collection and reports each mutation
//! to a [`CollectionObserver`] as a *changing* notification (before the
//! change, old state visible) and a *changed* notification (after the
//! change, new state visible).
//!
//! # Notification Order
//!
//! | Operation | Notifications |
//! |-----------|---------------|
//! | `insert(i, x)` | changing(Insert, x, i) → insert → changed(Insert, x, i) |
//! | `remove(x)` present at i | changing(Remove, x, i) → remove → changed(Remove, x, i) |
//! | `remove(x)` absent | none |
//! | `replace(i, y)` over x | changing(Remove, x, i), changing(Insert, y, i) → replace → changed(Remove, x, i), changed(Insert, y, i) |
//! | `replace(i, x)` same id | none |
//! | `clear()` over e0..en-1 | changing(Remove, ek, k) for k ascending → clear → changed(Remove, ek, k) for k descending |
//! | `sort(c)` | changing(Sort) → sort → changed(Sort), even if the sort fails |
//!
//! All changing notifications of one operation are delivered before the
//! wrapped collection is touched, and all changed notifications after it,
//! so an observer reading the collection sees either the complete old or the
//! complete new state. If a changing notification fails, the operation is
//! abandoned and the collection is unchanged.
//!
//! A call the wrapped collection would reject (read-only, index out of
//! range, duplicate id, wrong item type, different instance under the same
//! id) is rejected here before any notification, so every changing
//! notification is followed by its changed counterpart unless the wrapped
//! collection itself fails.

use std::rc::Rc;

use relcoll_core::{
    ClassRef, CollectionData, CollectionResult, Comparison, DomainObjectRef, ObjectId,
    OperationKind, ReadOnlyOperation, RelationEndPointId,
};

use crate::checks::{check_insert, check_remove, check_replace, check_writable};

/// Receiver of changing/changed notification pairs
///
/// `affected` is None and `index` is None for `OperationKind::Sort`.
pub trait CollectionObserver {
    /// Called before the wrapped collection is modified
    fn on_data_changing(
        &self,
        operation: OperationKind,
        affected: Option<&DomainObjectRef>,
        index: Option<usize>,
    ) -> CollectionResult<()>;

    /// Called after the wrapped collection was modified
    fn on_data_changed(
        &self,
        operation: OperationKind,
        affected: Option<&DomainObjectRef>,
        index: Option<usize>,
    ) -> CollectionResult<()>;
}

/// Collection wrapper notifying an observer around each mutation
pub struct ObservableCollectionData<O: CollectionObserver> {
    inner: Rc<dyn CollectionData>,
    observer: O,
}

impl<O: CollectionObserver> ObservableCollectionData<O> {
    /// Wrap `inner`, reporting its mutations to `observer`
    pub fn new(inner: Rc<dyn CollectionData>, observer: O) -> Self {
        Self { inner, observer }
    }

    /// The notification sink
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The wrapped collection
    pub fn inner(&self) -> &Rc<dyn CollectionData> {
        &self.inner
    }

    fn remove_at(
        &self,
        index: usize,
        affected: &DomainObjectRef,
        remove: impl FnOnce() -> CollectionResult<bool>,
    ) -> CollectionResult<bool> {
        self.observer
            .on_data_changing(OperationKind::Remove, Some(affected), Some(index))?;
        let removed = remove()?;
        self.observer
            .on_data_changed(OperationKind::Remove, Some(affected), Some(index))?;
        Ok(removed)
    }
}

/// Fires the changed notification of a sort on every exit path
///
/// The normal path calls [`SortScope::finish`] to get the notification's
/// result; if the comparison panics, `Drop` still delivers it.
struct SortScope<'a, O: CollectionObserver> {
    observer: &'a O,
    finished: bool,
}

impl<'a, O: CollectionObserver> SortScope<'a, O> {
    fn enter(observer: &'a O) -> CollectionResult<Self> {
        observer.on_data_changing(OperationKind::Sort, None, None)?;
        Ok(Self {
            observer,
            finished: false,
        })
    }

    fn finish(mut self) -> CollectionResult<()> {
        self.finished = true;
        self.observer
            .on_data_changed(OperationKind::Sort, None, None)
    }
}

impl<O: CollectionObserver> Drop for SortScope<'_, O> {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self
                .observer
                .on_data_changed(OperationKind::Sort, None, None);
        }
    }
}

impl<O: CollectionObserver> CollectionData for ObservableCollectionData<O> {
    fn count(&self) -> usize {
        self.inner.count()
    }

    fn is_read_only(&self) -> bool {
        self.inner.is_read_only()
    }

    fn version(&self) -> u64 {
        self.inner.version()
    }

    fn associated_end_point_id(&self) -> Option<RelationEndPointId> {
        self.inner.associated_end_point_id()
    }

    fn required_item_type(&self) -> Option<ClassRef> {
        self.inner.required_item_type()
    }

    fn is_data_complete(&self) -> bool {
        self.inner.is_data_complete()
    }

    fn ensure_data_complete(&self) -> CollectionResult<()> {
        self.inner.ensure_data_complete()
    }

    fn get_object(&self, index: usize) -> Option<DomainObjectRef> {
        self.inner.get_object(index)
    }

    fn get_object_by_id(&self, id: &ObjectId) -> Option<DomainObjectRef> {
        self.inner.get_object_by_id(id)
    }

    fn contains_object_id(&self, id: &ObjectId) -> bool {
        self.inner.contains_object_id(id)
    }

    fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.inner.index_of(id)
    }

    fn insert(&self, index: usize, object: DomainObjectRef) -> CollectionResult<()> {
        check_writable(&*self.inner, ReadOnlyOperation::Insert)?;
        let required = self.inner.required_item_type();
        check_insert(&*self.inner, required.as_ref(), index, &object)?;

        self.observer
            .on_data_changing(OperationKind::Insert, Some(&object), Some(index))?;
        self.inner.insert(index, Rc::clone(&object))?;
        self.observer
            .on_data_changed(OperationKind::Insert, Some(&object), Some(index))
    }

    fn remove(&self, object: &DomainObjectRef) -> CollectionResult<bool> {
        check_writable(&*self.inner, ReadOnlyOperation::Remove)?;
        let Some(index) = self.inner.index_of(object.id()) else {
            return Ok(false);
        };
        check_remove(&*self.inner, object)?;
        self.remove_at(index, object, || self.inner.remove(object))
    }

    fn remove_by_id(&self, id: &ObjectId) -> CollectionResult<bool> {
        check_writable(&*self.inner, ReadOnlyOperation::Remove)?;
        let Some(index) = self.inner.index_of(id) else {
            return Ok(false);
        };
        let Some(affected) = self.inner.get_object(index) else {
            return Ok(false);
        };
        self.remove_at(index, &affected, || self.inner.remove_by_id(id))
    }

    fn replace(&self, index: usize, object: DomainObjectRef) -> CollectionResult<()> {
        check_writable(&*self.inner, ReadOnlyOperation::Replace)?;
        let Some(old) = self.inner.get_object(index) else {
            // Out of range: let the wrapped collection report it
            return self.inner.replace(index, object);
        };
        if old.id() == object.id() {
            return Ok(());
        }
        let required = self.inner.required_item_type();
        check_replace(&*self.inner, required.as_ref(), &old, &object)?;

        self.observer
            .on_data_changing(OperationKind::Remove, Some(&old), Some(index))?;
        self.observer
            .on_data_changing(OperationKind::Insert, Some(&object), Some(index))?;
        self.inner.replace(index, Rc::clone(&object))?;
        self.observer
            .on_data_changed(OperationKind::Remove, Some(&old), Some(index))?;
        self.observer
            .on_data_changed(OperationKind::Insert, Some(&object), Some(index))
    }

    fn clear(&self) -> CollectionResult<()> {
        check_writable(&*self.inner, ReadOnlyOperation::Clear)?;
        let removed: Vec<DomainObjectRef> = (0..self.inner.count())
            .filter_map(|i| self.inner.get_object(i))
            .collect();

        for (index, object) in removed.iter().enumerate() {
            self.observer
                .on_data_changing(OperationKind::Remove, Some(object), Some(index))?;
        }
        self.inner.clear()?;
        for (index, object) in removed.iter().enumerate().rev() {
            self.observer
                .on_data_changed(OperationKind::Remove, Some(object), Some(index))?;
        }
        Ok(())
    }

    fn sort(&self, comparison: &mut Comparison<'_>) -> CollectionResult<()> {
        check_writable(&*self.inner, ReadOnlyOperation::Sort)?;
        let scope = SortScope::enter(&self.observer)?;
        let sorted = self.inner.sort(comparison);
        let changed = scope.finish();
        sorted?;
        changed
    }
}
