//! relcoll - Layered domain object collections
//!
//! relcoll provides the collection data behind one-to-many relationship
//! properties of an object-relational mapping runtime: an ordered, keyed
//! store with fail-fast enumeration, copy-on-write sharing, validation,
//! change notification and read-only views, all behind one capability
//! trait.
//!
//! # Quick Start
//!
//! ```
//! use std::rc::Rc;
//! use relcoll::{
//!     BaseCollectionData, ClassDefinition, CollectionData, CollectionDataExt, Entity,
//!     ReadOnlyCollectionData,
//! };
//!
//! let order = ClassDefinition::new("Order");
//! let data = Rc::new(BaseCollectionData::new());
//! data.add(Entity::new(&order).into_ref()).unwrap();
//!
//! let view = ReadOnlyCollectionData::new(data.clone());
//! assert_eq!(view.count(), 1);
//! assert!(view.clear().is_err());
//! ```
//!
//! # Architecture
//!
//! Identity, metadata, errors and configuration live in `relcoll-core`; the
//! collection layers live in `relcoll-collections`. Both are re-exported
//! here.

pub use relcoll_collections::*;
pub use relcoll_core::*;
