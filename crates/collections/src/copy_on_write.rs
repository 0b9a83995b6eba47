//! Copy-on-write sharing of a source collection
//!
//! A `CopyOnWriteCollectionData` starts out as a live view of its source:
//! every read goes to the source, so changes made directly to the source
//! are visible through the wrapper. The first mutation issued through the
//! wrapper (or an explicit [`CopyOnWriteCollectionData::copy_on_write`])
//! clones the source's current contents into a private
//! [`BaseCollectionData`] and switches all further reads and writes to it.
//! The source is never mutated through the wrapper.
//!
//! # Copy State
//!
//! - **SharingSource**: no private store, reads delegate to the source
//! - **OwnsCopy**: private store cloned from the source at fork time
//!
//! [`CopyOnWriteCollectionData::revert_to_copied_data`] drops the private
//! store and goes back to sharing the (live) source.
//!
//! # Versioning
//!
//! The wrapper keeps its own stamp. It advances whenever the visible data
//! changes: a mutation of the current store, a direct mutation of the
//! source while sharing, a fork, or a revert. Enumerators over the wrapper
//! therefore fail fast across a fork as well.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use relcoll_core::{
    ClassRef, CollectionData, CollectionResult, Comparison, DomainObjectRef, ObjectId,
    RelationEndPointId,
};
use tracing::trace;

use crate::base::BaseCollectionData;

#[derive(Debug)]
enum CopyState {
    SharingSource,
    OwnsCopy(Rc<BaseCollectionData>),
}

/// Lazily forking view of a source collection
pub struct CopyOnWriteCollectionData {
    source: Rc<dyn CollectionData>,
    state: RefCell<CopyState>,
    /// Advances on every fork and revert
    generation: Cell<u64>,
    /// (generation, store version) seen by the last `version()` call
    observed: Cell<(u64, u64)>,
    version: Cell<u64>,
}

impl CopyOnWriteCollectionData {
    /// Create a wrapper sharing `source`
    pub fn new(source: Rc<dyn CollectionData>) -> Self {
        let observed = (0, source.version());
        Self {
            source,
            state: RefCell::new(CopyState::SharingSource),
            generation: Cell::new(0),
            observed: Cell::new(observed),
            version: Cell::new(0),
        }
    }

    /// Whether the wrapper owns a private copy
    pub fn is_contents_copied(&self) -> bool {
        matches!(*self.state.borrow(), CopyState::OwnsCopy(_))
    }

    /// The collection the wrapper was created over
    pub fn source(&self) -> &Rc<dyn CollectionData> {
        &self.source
    }

    /// Fork into a private copy of the source's current contents
    ///
    /// Idempotent: once copied, later calls keep the existing private copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the source reports duplicate ids while being
    /// copied, which a well-formed source never does.
    pub fn copy_on_write(&self) -> CollectionResult<()> {
        if self.is_contents_copied() {
            return Ok(());
        }

        let contents = (0..self.source.count()).filter_map(|i| self.source.get_object(i));
        let mut copy = BaseCollectionData::from_objects(contents)?;
        if let Some(class) = self.source.required_item_type() {
            copy = copy.with_required_item_type(class);
        }
        if let Some(end_point_id) = self.source.associated_end_point_id() {
            copy = copy.with_associated_end_point_id(end_point_id);
        }

        trace!(count = copy.count(), "copied source contents into private store");
        *self.state.borrow_mut() = CopyState::OwnsCopy(Rc::new(copy));
        self.generation.set(self.generation.get() + 1);
        Ok(())
    }

    /// Discard the private copy, if any, and share the source again
    ///
    /// Local edits made since the fork are lost.
    pub fn revert_to_copied_data(&self) {
        let previous = std::mem::replace(&mut *self.state.borrow_mut(), CopyState::SharingSource);
        if let CopyState::OwnsCopy(copy) = previous {
            trace!(discarded = copy.count(), "reverted to sharing source");
            self.generation.set(self.generation.get() + 1);
        }
    }

    fn current(&self) -> Rc<dyn CollectionData> {
        match &*self.state.borrow() {
            CopyState::SharingSource => Rc::clone(&self.source),
            CopyState::OwnsCopy(copy) => Rc::clone(copy) as Rc<dyn CollectionData>,
        }
    }

    fn writable(&self) -> CollectionResult<Rc<dyn CollectionData>> {
        self.copy_on_write()?;
        Ok(self.current())
    }
}

impl CollectionData for CopyOnWriteCollectionData {
    fn count(&self) -> usize {
        self.current().count()
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn version(&self) -> u64 {
        let observed = (self.generation.get(), self.current().version());
        if observed != self.observed.get() {
            self.observed.set(observed);
            self.version.set(self.version.get() + 1);
        }
        self.version.get()
    }

    fn associated_end_point_id(&self) -> Option<RelationEndPointId> {
        self.source.associated_end_point_id()
    }

    fn required_item_type(&self) -> Option<ClassRef> {
        self.source.required_item_type()
    }

    fn is_data_complete(&self) -> bool {
        self.current().is_data_complete()
    }

    fn ensure_data_complete(&self) -> CollectionResult<()> {
        self.current().ensure_data_complete()
    }

    fn get_object(&self, index: usize) -> Option<DomainObjectRef> {
        self.current().get_object(index)
    }

    fn get_object_by_id(&self, id: &ObjectId) -> Option<DomainObjectRef> {
        self.current().get_object_by_id(id)
    }

    fn contains_object_id(&self, id: &ObjectId) -> bool {
        self.current().contains_object_id(id)
    }

    fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.current().index_of(id)
    }

    fn insert(&self, index: usize, object: DomainObjectRef) -> CollectionResult<()> {
        self.writable()?.insert(index, object)
    }

    fn remove(&self, object: &DomainObjectRef) -> CollectionResult<bool> {
        self.writable()?.remove(object)
    }

    fn remove_by_id(&self, id: &ObjectId) -> CollectionResult<bool> {
        self.writable()?.remove_by_id(id)
    }

    fn replace(&self, index: usize, object: DomainObjectRef) -> CollectionResult<()> {
        self.writable()?.replace(index, object)
    }

    fn clear(&self) -> CollectionResult<()> {
        self.writable()?.clear()
    }

    fn sort(&self, comparison: &mut Comparison<'_>) -> CollectionResult<()> {
        self.writable()?.sort(comparison)
    }
}
