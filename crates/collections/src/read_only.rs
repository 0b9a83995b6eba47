//! Read-only guard

use std::rc::Rc;

use relcoll_core::{
    ClassRef, CollectionData, CollectionError, CollectionResult, Comparison, DomainObjectRef,
    ObjectId, ReadOnlyOperation, RelationEndPointId,
};
use tracing::debug;

/// Collection layer rejecting every mutation
///
/// Reads are delegated unchanged.
pub struct ReadOnlyCollectionData {
    inner: Rc<dyn CollectionData>,
}

impl ReadOnlyCollectionData {
    /// Wrap `inner` in a read-only view
    pub fn new(inner: Rc<dyn CollectionData>) -> Self {
        Self { inner }
    }

    fn reject<T>(&self, operation: ReadOnlyOperation) -> CollectionResult<T> {
        debug!(?operation, "rejected mutation of read-only collection");
        Err(CollectionError::ReadOnly(operation))
    }
}

impl CollectionData for ReadOnlyCollectionData {
    fn count(&self) -> usize {
        self.inner.count()
    }

    fn is_read_only(&self) -> bool {
        true
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

    fn insert(&self, _index: usize, _object: DomainObjectRef) -> CollectionResult<()> {
        self.reject(ReadOnlyOperation::Insert)
    }

    fn remove(&self, _object: &DomainObjectRef) -> CollectionResult<bool> {
        self.reject(ReadOnlyOperation::Remove)
    }

    fn remove_by_id(&self, _id: &ObjectId) -> CollectionResult<bool> {
        self.reject(ReadOnlyOperation::Remove)
    }

    fn replace(&self, _index: usize, _object: DomainObjectRef) -> CollectionResult<()> {
        self.reject(ReadOnlyOperation::Replace)
    }

    fn clear(&self) -> CollectionResult<()> {
        self.reject(ReadOnlyOperation::Clear)
    }

    fn sort(&self, _comparison: &mut Comparison<'_>) -> CollectionResult<()> {
        self.reject(ReadOnlyOperation::Sort)
    }
}
