//! Convenience operations available on every collection layer

use relcoll_core::{
    is_same_object, CollectionData, CollectionResult, DomainObjectRef, ObjectId,
};

use crate::iter::CollectionIter;

/// Extension methods built on the [`CollectionData`] capability set
///
/// Implemented for every collection layer, including `dyn CollectionData`.
pub trait CollectionDataExt: CollectionData {
    /// Start a fail-fast enumeration
    fn iter(&self) -> CollectionIter<'_, Self> {
        CollectionIter::new(self)
    }

    /// Append `object` at the end
    fn add(&self, object: DomainObjectRef) -> CollectionResult<()> {
        self.insert(self.count(), object)
    }

    /// Append each of `objects` in order, stopping at the first failure
    ///
    /// Objects appended before the failure stay in the collection.
    fn add_range<I>(&self, objects: I) -> CollectionResult<()>
    where
        I: IntoIterator<Item = DomainObjectRef>,
    {
        for object in objects {
            self.add(object)?;
        }
        Ok(())
    }

    /// Check if this exact instance is an element
    ///
    /// Unlike [`CollectionData::contains_object_id`], a different instance
    /// with the same id does not count.
    fn contains_object(&self, object: &DomainObjectRef) -> bool {
        self.get_object_by_id(object.id())
            .is_some_and(|stored| is_same_object(&stored, object))
    }

    /// Position of this exact instance, if it is an element
    fn index_of_object(&self, object: &DomainObjectRef) -> Option<usize> {
        if self.contains_object(object) {
            self.index_of(object.id())
        } else {
            None
        }
    }

    /// Copy of the elements, in order
    fn to_vec(&self) -> Vec<DomainObjectRef> {
        (0..self.count()).filter_map(|i| self.get_object(i)).collect()
    }

    /// Ids of the elements, in order
    fn object_ids(&self) -> Vec<ObjectId> {
        self.to_vec().iter().map(|o| o.id().clone()).collect()
    }

    /// Check if the elements are exactly `objects` (same instances, same order)
    fn sequence_equals(&self, objects: &[DomainObjectRef]) -> bool {
        self.count() == objects.len()
            && objects
                .iter()
                .enumerate()
                .all(|(i, o)| self.get_object(i).is_some_and(|stored| is_same_object(&stored, o)))
    }
}

impl<T: CollectionData + ?Sized> CollectionDataExt for T {}
