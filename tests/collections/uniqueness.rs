//! Key Uniqueness Tests
//!
//! At most one element per object id, in every layer and after any sequence
//! of operations.

use crate::common::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn assert_unique(data: &dyn CollectionData) {
    let ids = ids_of(data);
    let distinct: HashSet<_> = ids.iter().collect();
    assert_eq!(distinct.len(), ids.len(), "duplicate ids in {ids:?}");
}

// ============================================================================
// Rejected operations leave the collection unchanged
// ============================================================================

#[test]
fn test_duplicate_insert_leaves_contents_and_version() {
    init_tracing();
    let objects = orders(3);
    let data = base_with(&objects);
    let version = data.version();

    let err = data.insert(1, objects[2].clone()).unwrap_err();

    assert!(matches!(err, CollectionError::DuplicateKey { .. }));
    assert!(data.sequence_equals(&objects));
    assert_eq!(data.version(), version);
}

#[test]
fn test_duplicate_insert_of_other_instance_with_same_id() {
    let class = order_class();
    let id = ObjectId::new("Order");
    let stored = Entity::with_id(id.clone(), &class).into_ref();
    let twin = Entity::with_id(id, &class).into_ref();
    let data = base_with(&[stored.clone()]);

    assert!(data.add(twin).is_err());
    assert!(data.sequence_equals(&[stored]));
}

#[test]
fn test_replace_with_element_elsewhere_is_rejected() {
    let objects = orders(3);
    let data = base_with(&objects);

    let err = data.replace(0, objects[2].clone()).unwrap_err();

    assert!(matches!(
        err,
        CollectionError::DuplicateReplacement { parameter: "value", .. }
    ));
    assert!(data.sequence_equals(&objects));
    assert_unique(&*data);
}

#[test]
fn test_chain_rejects_duplicates_without_events() {
    let objects = orders(2);
    let chain = Chain::new(&objects);

    assert!(chain.collection.add(objects[0].clone()).is_err());
    assert!(chain.collection.replace(1, objects[0].clone()).is_err());

    assert!(chain.collection.sequence_equals(&objects));
    assert!(chain.recorder.take().is_empty());
    assert!(!chain.cow.is_contents_copied());
}

#[test]
fn test_from_objects_rejects_duplicate_ids() {
    let object = order();
    let err = BaseCollectionData::from_objects([object.clone(), object]).unwrap_err();
    assert!(matches!(
        err,
        CollectionError::DuplicateKey { parameter: "domainObjects", .. }
    ));
}

// ============================================================================
// Property: random operation sequences never produce duplicates
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Insert { pool: usize, index: usize },
    Remove { pool: usize },
    Replace { pool: usize, index: usize },
    Clear,
    Reverse,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..8usize, 0..10usize).prop_map(|(pool, index)| Op::Insert { pool, index }),
        2 => (0..8usize).prop_map(|pool| Op::Remove { pool }),
        2 => (0..8usize, 0..10usize).prop_map(|(pool, index)| Op::Replace { pool, index }),
        1 => Just(Op::Clear),
        1 => Just(Op::Reverse),
    ]
}

fn apply(data: &dyn CollectionData, pool: &[DomainObjectRef], op: &Op) {
    let _ = match op {
        Op::Insert { pool: p, index } => data.insert(*index, pool[*p].clone()),
        Op::Remove { pool: p } => data.remove(&pool[*p]).map(|_| ()),
        Op::Replace { pool: p, index } => data.replace(*index, pool[*p].clone()),
        Op::Clear => data.clear(),
        Op::Reverse => data.sort(&mut |a, b| Ok(b.id().cmp(a.id()))),
    };
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

    #[test]
    fn prop_base_ids_stay_unique(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let pool = orders(8);
        let data = BaseCollectionData::new();
        for op in &ops {
            apply(&data, &pool, op);
            let ids = ids_of(&data);
            let distinct: HashSet<_> = ids.iter().collect();
            prop_assert_eq!(distinct.len(), ids.len());
            for (i, id) in ids.iter().enumerate() {
                prop_assert_eq!(data.index_of(id), Some(i));
            }
        }
    }

    #[test]
    fn prop_chain_ids_stay_unique(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let pool = orders(8);
        let chain = Chain::new(&pool[..2]);
        for op in &ops {
            apply(&*chain.collection, &pool, op);
            assert_unique(&*chain.collection);
        }
        // The shared source is never touched through the chain
        prop_assert!(chain.source.sequence_equals(&pool[..2]));
    }
}
