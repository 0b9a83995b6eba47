//! Domain object abstraction
//!
//! Collections hold non-owning, shared references to domain objects. The
//! objects themselves are owned by the surrounding transaction; a
//! collection only keys them by [`ObjectId`].

use crate::class::ClassRef;
use crate::types::ObjectId;
use std::fmt;
use std::rc::Rc;

/// Shared reference to a domain object as stored in collections
pub type DomainObjectRef = Rc<dyn DomainObject>;

/// An entity instance that can be placed in a collection
///
/// ## Invariants
///
/// - `id()` is stable for the lifetime of the object
/// - `class()` is the runtime class of the object, used for type checks
pub trait DomainObject: fmt::Debug {
    /// Identity of the object
    fn id(&self) -> &ObjectId;

    /// Runtime class of the object
    fn class(&self) -> &ClassRef;
}

/// Check whether two references point to the same object instance
///
/// This is reference identity, not key equality: two distinct instances with
/// the same ObjectId are not the same object.
pub fn is_same_object(a: &DomainObjectRef, b: &DomainObjectRef) -> bool {
    Rc::ptr_eq(a, b)
}

/// Plain domain object with no data beyond its identity and class
#[derive(Debug, Clone)]
pub struct Entity {
    id: ObjectId,
    class: ClassRef,
}

impl Entity {
    /// Create an entity of `class` with a freshly generated id
    pub fn new(class: &ClassRef) -> Self {
        Self {
            id: ObjectId::new(class.name()),
            class: Rc::clone(class),
        }
    }

    /// Create an entity with a caller-provided id
    pub fn with_id(id: ObjectId, class: &ClassRef) -> Self {
        Self {
            id,
            class: Rc::clone(class),
        }
    }

    /// Wrap the entity in a shared reference for use in collections
    pub fn into_ref(self) -> DomainObjectRef {
        Rc::new(self)
    }
}

impl DomainObject for Entity {
    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn class(&self) -> &ClassRef {
        &self.class
    }
}
