//! Late-bound event raiser
//!
//! A collection's event-raising layer is built before the object that will
//! receive its events exists. `IndirectEventRaiser` is handed to the layer
//! at construction and pointed at the real raiser afterwards.
//!
//! Every call made while no target is set fails with `EventRaiserNotSet`.
//! `within_replace_data` follows the configured [`UnsetRaiserPolicy`]
//! instead (fail by default).

use std::cell::RefCell;
use std::rc::Rc;

use relcoll_core::{
    CollectionConfig, CollectionError, CollectionResult, DomainObjectCollectionEventRaiser,
    DomainObjectRef, UnsetRaiserPolicy,
};

/// Event raiser delegating to a target set after construction
#[derive(Default)]
pub struct IndirectEventRaiser {
    target: RefCell<Option<Rc<dyn DomainObjectCollectionEventRaiser>>>,
    policy: UnsetRaiserPolicy,
}

impl IndirectEventRaiser {
    /// Create an unwired raiser with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unwired raiser with the given policy
    pub fn with_policy(policy: UnsetRaiserPolicy) -> Self {
        Self {
            target: RefCell::new(None),
            policy,
        }
    }

    /// Create an unwired raiser configured from `config`
    pub fn from_config(config: &CollectionConfig) -> Self {
        Self::with_policy(config.unset_raiser_policy)
    }

    /// Point the raiser at `target`, replacing any previous target
    pub fn set_target(&self, target: Rc<dyn DomainObjectCollectionEventRaiser>) {
        *self.target.borrow_mut() = Some(target);
    }

    /// Remove the current target
    pub fn clear_target(&self) {
        self.target.borrow_mut().take();
    }

    /// The current target, if set
    pub fn target(&self) -> Option<Rc<dyn DomainObjectCollectionEventRaiser>> {
        self.target.borrow().clone()
    }

    /// Policy applied to `within_replace_data` without a target
    pub fn policy(&self) -> UnsetRaiserPolicy {
        self.policy
    }

    fn require_target(&self) -> CollectionResult<Rc<dyn DomainObjectCollectionEventRaiser>> {
        self.target().ok_or(CollectionError::EventRaiserNotSet)
    }
}

impl DomainObjectCollectionEventRaiser for IndirectEventRaiser {
    fn begin_add(&self, index: usize, object: &DomainObjectRef) -> CollectionResult<()> {
        self.require_target()?.begin_add(index, object)
    }

    fn end_add(&self, index: usize, object: &DomainObjectRef) -> CollectionResult<()> {
        self.require_target()?.end_add(index, object)
    }

    fn begin_remove(&self, index: usize, object: &DomainObjectRef) -> CollectionResult<()> {
        self.require_target()?.begin_remove(index, object)
    }

    fn end_remove(&self, index: usize, object: &DomainObjectRef) -> CollectionResult<()> {
        self.require_target()?.end_remove(index, object)
    }

    fn begin_delete(&self) -> CollectionResult<()> {
        self.require_target()?.begin_delete()
    }

    fn end_delete(&self) -> CollectionResult<()> {
        self.require_target()?.end_delete()
    }

    fn within_replace_data(&self) -> CollectionResult<()> {
        match (self.target(), self.policy) {
            (Some(target), _) => target.within_replace_data(),
            (None, UnsetRaiserPolicy::Fail) => Err(CollectionError::EventRaiserNotSet),
            (None, UnsetRaiserPolicy::Ignore) => Ok(()),
        }
    }
}
