//! Argument validation in front of a mutable collection
//!
//! All checks run before the wrapped collection is touched; a rejected call
//! leaves it unchanged.

use std::rc::Rc;

use relcoll_core::{
    ClassRef, CollectionData, CollectionError, CollectionResult, Comparison, DomainObjectRef,
    ObjectId, RelationEndPointId, INDEX_OUT_OF_RANGE,
};

use crate::checks::{check_insert, check_remove, check_replace};

/// Validating collection layer
pub struct ModificationCheckingCollectionData {
    inner: Rc<dyn CollectionData>,
    required_item_type: Option<ClassRef>,
}

impl ModificationCheckingCollectionData {
    /// Wrap `inner`, enforcing its own required item type if it has one
    pub fn new(inner: Rc<dyn CollectionData>) -> Self {
        let required_item_type = inner.required_item_type();
        Self {
            inner,
            required_item_type,
        }
    }

    /// Enforce `class` as the required item type
    pub fn with_required_item_type(mut self, class: ClassRef) -> Self {
        self.required_item_type = Some(class);
        self
    }
}

impl CollectionData for ModificationCheckingCollectionData {
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
        self.required_item_type.clone()
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
        check_insert(&*self.inner, self.required_item_type.as_ref(), index, &object)?;
        self.inner.insert(index, object)
    }

    fn remove(&self, object: &DomainObjectRef) -> CollectionResult<bool> {
        check_remove(&*self.inner, object)?;
        self.inner.remove(object)
    }

    fn remove_by_id(&self, id: &ObjectId) -> CollectionResult<bool> {
        self.inner.remove_by_id(id)
    }

    fn replace(&self, index: usize, object: DomainObjectRef) -> CollectionResult<()> {
        let Some(current) = self.inner.get_object(index) else {
            return Err(CollectionError::IndexOutOfRange {
                parameter: "index",
                actual: index,
                message: INDEX_OUT_OF_RANGE,
            });
        };
        check_replace(
            &*self.inner,
            self.required_item_type.as_ref(),
            &current,
            &object,
        )?;

        self.inner.replace(index, object)
    }

    fn clear(&self) -> CollectionResult<()> {
        self.inner.clear()
    }

    fn sort(&self, comparison: &mut Comparison<'_>) -> CollectionResult<()> {
        self.inner.sort(comparison)
    }
}
