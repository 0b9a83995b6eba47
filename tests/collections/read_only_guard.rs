//! Read-Only Guard Tests

use crate::common::*;
use std::rc::Rc;

fn guarded(objects: &[DomainObjectRef]) -> (ReadOnlyCollectionData, Chain) {
    let chain = Chain::new(objects);
    let read_only = ReadOnlyCollectionData::new(chain.collection.clone());
    (read_only, chain)
}

#[test]
fn test_every_mutation_is_rejected_without_side_effects() {
    init_tracing();
    let objects = orders(2);
    let (read_only, chain) = guarded(&objects);
    let version = read_only.version();

    let results = [
        read_only.insert(0, order()),
        read_only.add(order()),
        read_only.remove(&objects[0]).map(|_| ()),
        read_only.remove_by_id(objects[0].id()).map(|_| ()),
        read_only.replace(0, order()),
        read_only.clear(),
        read_only.sort(&mut |a, b| Ok(a.id().cmp(b.id()))),
    ];

    for result in results {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
    }
    assert_eq!(read_only.version(), version);
    assert!(read_only.sequence_equals(&objects));
    assert!(!chain.cow.is_contents_copied());
    assert!(chain.recorder.take().is_empty());
}

#[test]
fn test_rejection_precedes_argument_validation() {
    let objects = orders(1);
    let (read_only, _chain) = guarded(&objects);

    // Out of range and duplicate, yet the read-only error wins
    let err = read_only.insert(7, objects[0].clone()).unwrap_err();
    assert_eq!(err.to_string(), "Cannot insert an item into a read-only collection.");
}

#[test]
fn test_reads_see_changes_made_underneath() {
    let objects = orders(1);
    let (read_only, chain) = guarded(&objects);

    let mut iter = read_only.iter();
    assert!(iter.next().unwrap().is_ok());

    let late = order();
    chain.collection.add(late.clone()).unwrap();

    assert!(read_only.is_read_only());
    assert!(!chain.collection.is_read_only());
    assert_eq!(read_only.count(), 2);
    assert!(read_only.contains_object(&late));
    assert!(matches!(
        iter.next(),
        Some(Err(CollectionError::ModifiedDuringEnumeration))
    ));
}

#[test]
fn test_read_only_over_bare_store() {
    let inner: Rc<dyn CollectionData> = base_with(&orders(2));
    let read_only = ReadOnlyCollectionData::new(inner.clone());

    assert!(read_only.clear().is_err());
    assert_eq!(inner.count(), 2);
    assert_eq!(read_only.to_vec().len(), 2);
    assert!(read_only.is_data_complete());
    read_only.ensure_data_complete().unwrap();
}
