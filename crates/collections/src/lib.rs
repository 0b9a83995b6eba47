//! Collection data layers for relcoll
//!
//! This crate implements the layered collections backing one-to-many
//! relationship properties. Each layer implements
//! [`CollectionData`](relcoll_core::CollectionData) and wraps the next:
//!
//! - [`BaseCollectionData`]: ordered, keyed storage with a version counter
//! - [`CopyOnWriteCollectionData`]: shares a source until its first mutation
//! - [`ModificationCheckingCollectionData`]: argument validation gate
//! - [`ObservableCollectionData`]: changing/changed notifications
//! - [`EventRaisingCollectionData`]: relationship begin/end events
//! - [`ReadOnlyCollectionData`]: rejects all mutation
//!
//! plus [`IndirectEventRaiser`] for wiring the event sink after
//! construction and [`CollectionIter`] for fail-fast enumeration.
//!
//! # Typical Composition
//!
//! Innermost to outermost:
//!
//! ```text
//! BaseCollectionData → CopyOnWriteCollectionData → ModificationCheckingCollectionData
//!     → EventRaisingCollectionData → [ReadOnlyCollectionData]
//! ```
//!
//! ```
//! use std::rc::Rc;
//! use relcoll_collections::{
//!     BaseCollectionData, CollectionDataExt, CopyOnWriteCollectionData,
//!     EventRaisingCollectionData, IndirectEventRaiser, ModificationCheckingCollectionData,
//! };
//! use relcoll_core::{ClassDefinition, CollectionData, Entity, UnsetRaiserPolicy};
//!
//! let order = ClassDefinition::new("Order");
//! let source = Rc::new(BaseCollectionData::new());
//! let cow = Rc::new(CopyOnWriteCollectionData::new(source.clone()));
//! let checked = Rc::new(
//!     ModificationCheckingCollectionData::new(cow.clone()).with_required_item_type(order.clone()),
//! );
//! // Nobody listens yet: sorts are allowed, inserts and removes are not
//! let raiser = Rc::new(IndirectEventRaiser::with_policy(UnsetRaiserPolicy::Ignore));
//! let collection = EventRaisingCollectionData::with_raiser(checked, raiser.clone());
//!
//! assert!(collection.add(Entity::new(&order).into_ref()).is_err());
//! collection.sort(&mut |a, b| Ok(a.id().cmp(b.id()))).unwrap();
//! assert_eq!(source.count(), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod base;
mod checks;
pub mod copy_on_write;
pub mod event_raising;
pub mod ext;
pub mod indirect;
pub mod iter;
pub mod modification_checking;
pub mod observable;
pub mod read_only;
mod sort;

pub use base::BaseCollectionData;
pub use copy_on_write::CopyOnWriteCollectionData;
pub use event_raising::{EventRaisingCollectionData, EventRaisingObserver};
pub use ext::CollectionDataExt;
pub use indirect::IndirectEventRaiser;
pub use iter::CollectionIter;
pub use modification_checking::ModificationCheckingCollectionData;
pub use observable::{CollectionObserver, ObservableCollectionData};
pub use read_only::ReadOnlyCollectionData;
