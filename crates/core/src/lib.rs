//! Core types and traits for relcoll
//!
//! This crate defines the foundational types used by the collection layers:
//! - ObjectId: Unique identity of a domain object
//! - RelationEndPointId: Identity of a relationship end point
//! - ClassDefinition: Runtime class metadata for type constraints
//! - DomainObject: Trait for entities held by collections
//! - CollectionData: Capability trait implemented by every collection layer
//! - DomainObjectCollectionEventRaiser: Relationship-maintenance callbacks
//! - CollectionError: Error type hierarchy
//! - CollectionConfig: Policy configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod class;
pub mod config;
pub mod domain_object;
pub mod error;
pub mod traits;
pub mod types;

pub use class::{ClassDefinition, ClassRef};
pub use config::{CollectionConfig, UnsetRaiserPolicy};
pub use domain_object::{is_same_object, DomainObject, DomainObjectRef, Entity};
pub use error::{
    CollectionError, CollectionResult, ErrorKind, ReadOnlyOperation, INDEX_OUT_OF_RANGE,
    INSERT_INDEX_OUT_OF_RANGE,
};
pub use traits::{CollectionData, Comparison, DomainObjectCollectionEventRaiser, OperationKind};
pub use types::{ObjectId, RelationEndPointId};
