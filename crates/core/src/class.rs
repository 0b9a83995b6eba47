//! Runtime class metadata
//!
//! Domain objects carry a reference to the class they were instantiated
//! from. Classes form a single-inheritance hierarchy; a collection with a
//! required item type accepts objects of that class or of any class derived
//! from it.

use std::fmt;
use std::rc::Rc;

/// Shared handle to a class definition
pub type ClassRef = Rc<ClassDefinition>;

/// A class in the domain model
///
/// Class identity is the class name: two definitions with the same name are
/// treated as the same class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefinition {
    name: String,
    base: Option<ClassRef>,
}

impl ClassDefinition {
    /// Create a root class (no base class)
    pub fn new(name: impl Into<String>) -> ClassRef {
        Rc::new(Self {
            name: name.into(),
            base: None,
        })
    }

    /// Create a class derived from `base`
    pub fn derived(name: impl Into<String>, base: &ClassRef) -> ClassRef {
        Rc::new(Self {
            name: name.into(),
            base: Some(Rc::clone(base)),
        })
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct base class, if any
    pub fn base(&self) -> Option<&ClassRef> {
        self.base.as_ref()
    }

    /// Check whether this class is `other` or inherits from it
    pub fn is_same_or_derived_from(&self, other: &ClassDefinition) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class.name == other.name {
                return true;
            }
            current = class.base.as_deref();
        }
        false
    }
}

impl fmt::Display for ClassDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
