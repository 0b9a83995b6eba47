//! Mutation preconditions shared by the validating and notifying layers
//!
//! Each check only reads `data`. A layer runs them before it touches the
//! wrapped collection or announces anything.

use relcoll_core::{
    is_same_object, ClassRef, CollectionData, CollectionError, CollectionResult, DomainObjectRef,
    ReadOnlyOperation, INSERT_INDEX_OUT_OF_RANGE,
};
use tracing::debug;

pub(crate) fn check_writable(
    data: &dyn CollectionData,
    operation: ReadOnlyOperation,
) -> CollectionResult<()> {
    if data.is_read_only() {
        debug!(?operation, "rejected mutation of read-only collection");
        return Err(CollectionError::ReadOnly(operation));
    }
    Ok(())
}

pub(crate) fn check_item_type(
    required: Option<&ClassRef>,
    object: &DomainObjectRef,
    parameter: &'static str,
) -> CollectionResult<()> {
    let Some(required) = required else {
        return Ok(());
    };
    if object.class().is_same_or_derived_from(required) {
        return Ok(());
    }
    debug!(
        actual = %object.class(),
        required = %required,
        "rejected object of wrong type"
    );
    Err(CollectionError::TypeMismatch {
        parameter,
        actual: object.class().name().to_string(),
        required: required.name().to_string(),
    })
}

/// Bounds, then duplicate key, then item type
pub(crate) fn check_insert(
    data: &dyn CollectionData,
    required: Option<&ClassRef>,
    index: usize,
    object: &DomainObjectRef,
) -> CollectionResult<()> {
    if index > data.count() {
        return Err(CollectionError::IndexOutOfRange {
            parameter: "index",
            actual: index,
            message: INSERT_INDEX_OUT_OF_RANGE,
        });
    }
    if data.contains_object_id(object.id()) {
        debug!(id = %object.id(), "rejected insert of duplicate object");
        return Err(CollectionError::DuplicateKey {
            id: object.id().clone(),
            parameter: "domainObject",
        });
    }
    check_item_type(required, object, "domainObject")
}

/// A stored element with the same id must be this very instance
pub(crate) fn check_remove(
    data: &dyn CollectionData,
    object: &DomainObjectRef,
) -> CollectionResult<()> {
    match data.get_object_by_id(object.id()) {
        Some(existing) if !is_same_object(&existing, object) => {
            debug!(id = %object.id(), "rejected removal of a different instance");
            Err(CollectionError::IdentityMismatch {
                id: object.id().clone(),
                parameter: "domainObject",
            })
        }
        _ => Ok(()),
    }
}

/// Collision with another element, then item type
///
/// `current` is the element at the target index.
pub(crate) fn check_replace(
    data: &dyn CollectionData,
    required: Option<&ClassRef>,
    current: &DomainObjectRef,
    object: &DomainObjectRef,
) -> CollectionResult<()> {
    if current.id() != object.id() && data.contains_object_id(object.id()) {
        debug!(id = %object.id(), "rejected replace with object present elsewhere");
        return Err(CollectionError::DuplicateReplacement {
            id: object.id().clone(),
            parameter: "value",
        });
    }
    check_item_type(required, object, "value")
}
