//! Leaf storage for collection data
//!
//! `BaseCollectionData` owns the ordered sequence of object references, a
//! key index over it, and the version counter. Every other layer eventually
//! delegates to one of these.
//!
//! # Storage Layout
//!
//! - `items`: the ordered sequence (order is significant)
//! - `index`: ObjectId → reference, for O(1) key lookups
//!
//! Both are kept in one `RefCell` and updated together inside a single
//! borrow. Preconditions are checked before anything is modified, so a
//! failed operation leaves both untouched.
//!
//! # Versioning
//!
//! The version increments once per successful mutation that changes content
//! or order. No-ops (removing an absent key, replacing an element with an
//! object of the same id, clearing an empty collection) leave it unchanged.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use relcoll_core::{
    ClassRef, CollectionData, CollectionError, CollectionResult, Comparison, DomainObjectRef,
    ObjectId, RelationEndPointId, INDEX_OUT_OF_RANGE, INSERT_INDEX_OUT_OF_RANGE,
};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::sort::try_sort_by;

#[derive(Debug, Default)]
struct Store {
    items: Vec<DomainObjectRef>,
    index: FxHashMap<ObjectId, DomainObjectRef>,
}

impl Store {
    fn position(&self, id: &ObjectId) -> Option<usize> {
        if !self.index.contains_key(id) {
            return None;
        }
        self.items.iter().position(|object| object.id() == id)
    }
}

/// Ordered, keyed storage with a modification counter
///
/// # Example
///
/// ```
/// use relcoll_collections::BaseCollectionData;
/// use relcoll_core::{ClassDefinition, CollectionData, Entity};
///
/// let order = ClassDefinition::new("Order");
/// let data = BaseCollectionData::new();
/// let first = Entity::new(&order).into_ref();
///
/// data.insert(0, first.clone()).unwrap();
/// assert_eq!(data.count(), 1);
/// assert!(data.contains_object_id(first.id()));
/// ```
#[derive(Debug, Default)]
pub struct BaseCollectionData {
    store: RefCell<Store>,
    version: Cell<u64>,
    required_item_type: Option<ClassRef>,
    associated_end_point_id: Option<RelationEndPointId>,
}

impl BaseCollectionData {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection pre-seeded with `objects`, in order
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if two of the objects share an id.
    pub fn from_objects(
        objects: impl IntoIterator<Item = DomainObjectRef>,
    ) -> CollectionResult<Self> {
        let mut store = Store::default();
        for object in objects {
            if store.index.contains_key(object.id()) {
                return Err(CollectionError::DuplicateKey {
                    id: object.id().clone(),
                    parameter: "domainObjects",
                });
            }
            store.index.insert(object.id().clone(), Rc::clone(&object));
            store.items.push(object);
        }
        Ok(Self {
            store: RefCell::new(store),
            ..Self::default()
        })
    }

    /// Attach the class every element is expected to be (metadata only)
    ///
    /// The base store does not enforce it; a checking layer does.
    pub fn with_required_item_type(mut self, class: ClassRef) -> Self {
        self.required_item_type = Some(class);
        self
    }

    /// Attach the relationship end point this collection materializes
    pub fn with_associated_end_point_id(mut self, end_point_id: RelationEndPointId) -> Self {
        self.associated_end_point_id = Some(end_point_id);
        self
    }

    /// Copy of the current contents, in order
    pub fn snapshot(&self) -> Vec<DomainObjectRef> {
        self.store.borrow().items.clone()
    }

    fn bump_version(&self) {
        self.version.set(self.version.get().wrapping_add(1));
    }
}

impl CollectionData for BaseCollectionData {
    fn count(&self) -> usize {
        self.store.borrow().items.len()
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn version(&self) -> u64 {
        self.version.get()
    }

    fn associated_end_point_id(&self) -> Option<RelationEndPointId> {
        self.associated_end_point_id.clone()
    }

    fn required_item_type(&self) -> Option<ClassRef> {
        self.required_item_type.clone()
    }

    fn get_object(&self, index: usize) -> Option<DomainObjectRef> {
        self.store.borrow().items.get(index).cloned()
    }

    fn get_object_by_id(&self, id: &ObjectId) -> Option<DomainObjectRef> {
        self.store.borrow().index.get(id).cloned()
    }

    fn contains_object_id(&self, id: &ObjectId) -> bool {
        self.store.borrow().index.contains_key(id)
    }

    fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.store.borrow().position(id)
    }

    fn insert(&self, index: usize, object: DomainObjectRef) -> CollectionResult<()> {
        let mut store = self.store.borrow_mut();
        if index > store.items.len() {
            return Err(CollectionError::IndexOutOfRange {
                parameter: "index",
                actual: index,
                message: INSERT_INDEX_OUT_OF_RANGE,
            });
        }
        if store.index.contains_key(object.id()) {
            return Err(CollectionError::DuplicateKey {
                id: object.id().clone(),
                parameter: "domainObject",
            });
        }

        store.index.insert(object.id().clone(), Rc::clone(&object));
        store.items.insert(index, object);
        drop(store);

        self.bump_version();
        Ok(())
    }

    fn remove(&self, object: &DomainObjectRef) -> CollectionResult<bool> {
        self.remove_by_id(object.id())
    }

    fn remove_by_id(&self, id: &ObjectId) -> CollectionResult<bool> {
        let mut store = self.store.borrow_mut();
        let Some(position) = store.position(id) else {
            return Ok(false);
        };

        store.items.remove(position);
        store.index.remove(id);
        drop(store);

        self.bump_version();
        Ok(true)
    }

    fn replace(&self, index: usize, object: DomainObjectRef) -> CollectionResult<()> {
        let mut store = self.store.borrow_mut();
        let Some(current) = store.items.get(index) else {
            return Err(CollectionError::IndexOutOfRange {
                parameter: "index",
                actual: index,
                message: INDEX_OUT_OF_RANGE,
            });
        };

        if current.id() == object.id() {
            return Ok(());
        }
        if store.index.contains_key(object.id()) {
            return Err(CollectionError::DuplicateReplacement {
                id: object.id().clone(),
                parameter: "value",
            });
        }

        let old = std::mem::replace(&mut store.items[index], Rc::clone(&object));
        store.index.remove(old.id());
        store.index.insert(object.id().clone(), object);
        drop(store);

        self.bump_version();
        Ok(())
    }

    fn clear(&self) -> CollectionResult<()> {
        let mut store = self.store.borrow_mut();
        let removed = store.items.len();
        if removed == 0 {
            return Ok(());
        }
        store.items.clear();
        store.index.clear();
        drop(store);

        self.bump_version();
        trace!(removed, "cleared collection data");
        Ok(())
    }

    fn sort(&self, comparison: &mut Comparison<'_>) -> CollectionResult<()> {
        // Sort a detached copy so the comparison may read this collection
        let version = self.version.get();
        let items = self.snapshot();
        let sorted = try_sort_by(items, comparison)?;

        if self.version.get() != version {
            return Err(CollectionError::ModifiedDuringEnumeration);
        }

        self.store.borrow_mut().items = sorted;
        self.bump_version();
        trace!(count = self.count(), "sorted collection data");
        Ok(())
    }
}
