//! Core traits for collection data and relationship events
//!
//! This module defines the capability interface shared by every collection
//! layer, and the event raiser interface used to keep relationship
//! management informed about changes.
//!
//! ## Shared Access
//!
//! All operations take `&self`. Layers use interior mutability so that
//! notification hooks, event raisers and loop bodies can read the same
//! collection while an operation or an enumeration is in progress. No layer
//! holds a borrow of its state across a hook or a caller-supplied comparison.
//!
//! The model is single-threaded: none of these types are `Send` or `Sync`.

use std::cmp::Ordering;

use crate::class::ClassRef;
use crate::domain_object::DomainObjectRef;
use crate::error::CollectionResult;
use crate::types::{ObjectId, RelationEndPointId};

/// Caller-supplied comparison used by `sort`
///
/// A comparison may fail; the error aborts the sort and is returned to the
/// caller of `sort` unchanged.
pub type Comparison<'a> =
    dyn FnMut(&DomainObjectRef, &DomainObjectRef) -> CollectionResult<Ordering> + 'a;

/// Kind of change announced by a collection notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// An object is inserted at an index
    Insert,
    /// An object is removed from an index
    Remove,
    /// The collection is reordered
    Sort,
}

/// Ordered, keyed collection of domain object references
///
/// Every layer of a collection (storage, copy-on-write, validation,
/// notification, read-only guard) implements this trait, so layers can be
/// stacked in any order and any layer may be omitted.
///
/// ## Invariants
///
/// - No two elements share an [`ObjectId`]
/// - Order is preserved by every operation except `sort`
/// - `version()` changes whenever the visible contents or order change, and
///   is unchanged by no-ops
pub trait CollectionData {
    /// Number of elements
    fn count(&self) -> usize;

    /// Check if the collection has no elements
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Whether mutating operations are rejected
    fn is_read_only(&self) -> bool;

    /// Opaque modification stamp
    ///
    /// Used by enumerators to detect modification. Only equality is
    /// meaningful across layers.
    fn version(&self) -> u64;

    /// Relationship end point this collection materializes, if any
    fn associated_end_point_id(&self) -> Option<RelationEndPointId>;

    /// Class every element must be, or derive from, if constrained
    fn required_item_type(&self) -> Option<ClassRef>;

    /// Whether the contents have been fully loaded
    ///
    /// Lazy-loading collaborators override this; plain in-memory data is
    /// always complete.
    fn is_data_complete(&self) -> bool {
        true
    }

    /// Load the remaining contents if the data is incomplete
    ///
    /// # Errors
    ///
    /// Returns an error if the loading collaborator fails.
    fn ensure_data_complete(&self) -> CollectionResult<()> {
        Ok(())
    }

    /// Element at `index`, or None if out of range
    fn get_object(&self, index: usize) -> Option<DomainObjectRef>;

    /// Element with the given id, if present
    fn get_object_by_id(&self, id: &ObjectId) -> Option<DomainObjectRef>;

    /// Check if an element with the given id is present
    fn contains_object_id(&self, id: &ObjectId) -> bool;

    /// Position of the element with the given id, if present
    fn index_of(&self, id: &ObjectId) -> Option<usize>;

    /// Insert `object` at `index`
    ///
    /// # Errors
    ///
    /// Fails if `index > count()` or if an element with the same id is
    /// already present. The collection is unchanged on failure.
    fn insert(&self, index: usize, object: DomainObjectRef) -> CollectionResult<()>;

    /// Remove the element with `object`'s id
    ///
    /// Returns false, without modifying anything, if no such element exists.
    fn remove(&self, object: &DomainObjectRef) -> CollectionResult<bool>;

    /// Remove the element with the given id
    ///
    /// Returns false, without modifying anything, if no such element exists.
    fn remove_by_id(&self, id: &ObjectId) -> CollectionResult<bool>;

    /// Replace the element at `index` with `object`
    ///
    /// Replacing an element with an object of the same id is a no-op.
    ///
    /// # Errors
    ///
    /// Fails if `index >= count()` or if `object`'s id is present at another
    /// position. The collection is unchanged on failure.
    fn replace(&self, index: usize, object: DomainObjectRef) -> CollectionResult<()>;

    /// Remove all elements
    fn clear(&self) -> CollectionResult<()>;

    /// Reorder the elements using `comparison`
    ///
    /// # Errors
    ///
    /// Returns the comparison's error if it fails; the order is unchanged in
    /// that case.
    fn sort(&self, comparison: &mut Comparison<'_>) -> CollectionResult<()>;
}

/// Receiver of relationship-maintenance events
///
/// Implemented by the code that keeps both sides of a bidirectional
/// association (and undo state) consistent. The collection calls the
/// `begin_*` method before a change and the matching `end_*` method after it.
/// `begin_delete`/`end_delete` are never called by the collection itself;
/// they are invoked by the owner when the whole relationship is torn down.
pub trait DomainObjectCollectionEventRaiser {
    /// `object` is about to be inserted at `index`
    fn begin_add(&self, index: usize, object: &DomainObjectRef) -> CollectionResult<()>;

    /// `object` has been inserted at `index`
    fn end_add(&self, index: usize, object: &DomainObjectRef) -> CollectionResult<()>;

    /// `object` is about to be removed from `index`
    fn begin_remove(&self, index: usize, object: &DomainObjectRef) -> CollectionResult<()>;

    /// `object` has been removed from `index`
    fn end_remove(&self, index: usize, object: &DomainObjectRef) -> CollectionResult<()>;

    /// The owning relationship is about to be deleted
    fn begin_delete(&self) -> CollectionResult<()>;

    /// The owning relationship has been deleted
    fn end_delete(&self) -> CollectionResult<()>;

    /// The collection's data was replaced wholesale (e.g. reordered)
    fn within_replace_data(&self) -> CollectionResult<()>;
}
