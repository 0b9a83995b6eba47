//! Identity types for domain objects and relation end points
//!
//! This module defines the keys used throughout the collection layers:
//! - ObjectId: Globally unique identity of a domain object (class + UUID)
//! - RelationEndPointId: Identifies the relationship a collection materializes

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identity of a domain object
///
/// An ObjectId pairs the id of the object's class with a UUID value. Two
/// ObjectIds are equal only if both parts match, so the same UUID under two
/// different classes names two different objects.
///
/// ObjectIds are the keys of every collection: a collection never holds two
/// objects with the same ObjectId.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId {
    class_id: String,
    value: Uuid,
}

impl ObjectId {
    /// Create a new ObjectId for the given class with a random UUID v4 value
    pub fn new(class_id: impl Into<String>) -> Self {
        Self {
            class_id: class_id.into(),
            value: Uuid::new_v4(),
        }
    }

    /// Create an ObjectId from an existing class id and value
    ///
    /// Used by loaders where the identity already exists externally.
    pub fn from_parts(class_id: impl Into<String>, value: Uuid) -> Self {
        Self {
            class_id: class_id.into(),
            value,
        }
    }

    /// Parse an ObjectId from its `class|uuid` display form
    ///
    /// # Errors
    /// Returns None if the separator is missing or the value is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        let (class_id, value) = s.split_once('|')?;
        if class_id.is_empty() {
            return None;
        }
        Uuid::parse_str(value)
            .ok()
            .map(|value| Self::from_parts(class_id, value))
    }

    /// Id of the class the object belongs to
    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    /// UUID value of this id
    pub fn value(&self) -> Uuid {
        self.value
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.class_id, self.value)
    }
}

/// Identifies one end of a relationship
///
/// A one-to-many relationship property of an object is addressed by the
/// owning object's id and the property name. A collection may carry the id
/// of the end point it materializes; the collection layers only pass it
/// through, relationship management code consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationEndPointId {
    /// Id of the object owning the relationship property
    pub object_id: ObjectId,
    /// Name of the relationship property
    pub property_name: String,
}

impl RelationEndPointId {
    /// Create a new end point id
    pub fn new(object_id: ObjectId, property_name: impl Into<String>) -> Self {
        Self {
            object_id,
            property_name: property_name.into(),
        }
    }
}

impl fmt::Display for RelationEndPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.object_id, self.property_name)
    }
}
