//! Fail-fast enumeration over any collection layer
//!
//! `CollectionIter` records the collection's version when it is created and
//! re-checks it before every step. The first step after a modification
//! yields `ModifiedDuringEnumeration`; afterwards the iterator is exhausted.
//!
//! The iterator holds only a shared reference and a position, never a borrow
//! of the collection's storage, so a loop body may legally mutate the very
//! collection it iterates. That mutation is detected on the next step:
//!
//! ```
//! use relcoll_collections::{BaseCollectionData, CollectionDataExt};
//! use relcoll_core::{ClassDefinition, CollectionData, CollectionError, Entity};
//!
//! let order = ClassDefinition::new("Order");
//! let data = BaseCollectionData::from_objects([
//!     Entity::new(&order).into_ref(),
//!     Entity::new(&order).into_ref(),
//! ])
//! .unwrap();
//!
//! let mut iter = data.iter();
//! let first = iter.next().unwrap().unwrap();
//! data.remove(&first).unwrap();
//! assert!(matches!(
//!     iter.next(),
//!     Some(Err(CollectionError::ModifiedDuringEnumeration))
//! ));
//! assert!(iter.next().is_none());
//! ```

use std::iter::FusedIterator;

use relcoll_core::{CollectionData, CollectionError, CollectionResult, DomainObjectRef};

/// Version-checked iterator over a collection's elements
pub struct CollectionIter<'a, D: CollectionData + ?Sized = dyn CollectionData + 'a> {
    data: &'a D,
    version: u64,
    position: usize,
    finished: bool,
}

impl<'a, D: CollectionData + ?Sized> CollectionIter<'a, D> {
    /// Start enumerating `data` at its current version
    pub fn new(data: &'a D) -> Self {
        Self {
            data,
            version: data.version(),
            position: 0,
            finished: false,
        }
    }
}

impl<D: CollectionData + ?Sized> Iterator for CollectionIter<'_, D> {
    type Item = CollectionResult<DomainObjectRef>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.data.version() != self.version {
            self.finished = true;
            return Some(Err(CollectionError::ModifiedDuringEnumeration));
        }
        match self.data.get_object(self.position) {
            Some(object) => {
                self.position += 1;
                Some(Ok(object))
            }
            None => {
                self.finished = true;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        // One extra item is possible: the modification error
        let remaining = self.data.count().saturating_sub(self.position);
        (0, Some(remaining + 1))
    }
}

impl<D: CollectionData + ?Sized> FusedIterator for CollectionIter<'_, D> {}
