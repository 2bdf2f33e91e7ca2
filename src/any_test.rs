use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;

use std::collections::BTreeSet;

#[test]
fn test_kind_parse() {
    for kind in Kind::ALL.iter() {
        let s = kind.to_string();
        assert_eq!(s.parse::<Kind>().unwrap(), *kind);
        assert_eq!(s.to_uppercase().parse::<Kind>().unwrap(), *kind);
    }
    assert_eq!("RedBlack".parse::<Kind>().unwrap(), Kind::Rbt);
    assert_eq!("rb".parse::<Kind>().unwrap(), Kind::Rbt);

    match "splay".parse::<Kind>() {
        Err(Error::InvalidInput(_, msg)) => assert!(msg.contains("splay"), "{}", msg),
        res => panic!("{:?}", res),
    }
}

#[test]
fn test_any_tree() {
    let seed: u128 = random();
    println!("test_any_tree seed {}", seed);
    let mut rng = SmallRng::from_seed(seed.to_le_bytes());

    for kind in Kind::ALL.iter() {
        let mut index: AnyTree<u32> = AnyTree::new(*kind);
        let mut btset: BTreeSet<u32> = BTreeSet::new();
        assert_eq!(index.kind(), *kind);

        for _i in 0..5_000 {
            let key = rng.gen::<u32>() % 1024;
            if rng.gen::<u8>() % 4 == 0 {
                assert_eq!(index.remove(&key), btset.take(&key));
            } else {
                assert_eq!(index.insert(key), btset.insert(key));
            }
        }
        index.validate().unwrap();
        assert_eq!(index.len(), btset.len());

        let a: Vec<u32> = index.iter().cloned().collect();
        let b: Vec<u32> = btset.iter().cloned().collect();
        assert_eq!(a, b);
        assert_eq!(index.min().ok(), btset.iter().next());
        assert_eq!(index.max().ok(), btset.iter().next_back());
        assert_eq!(index.height(), crate::iter::height(index.root_handle()));

        let index = index.transform(|x| *x as u64 + 1);
        assert_eq!(index.kind(), *kind);
        assert_eq!(index.len(), btset.len());
    }
}

#[test]
fn test_any_from() {
    let mut rbt: Rbt<u32> = Rbt::new();
    rbt.insert(1);
    rbt.insert(2);
    let index: AnyTree<u32> = rbt.into();
    assert_eq!(index.kind(), Kind::Rbt);
    assert_eq!(index.len(), 2);

    let index: AnyTree<u32> = Avl::new().into();
    assert_eq!(index.kind(), Kind::Avl);
    let index: AnyTree<u32> = Bst::new().into();
    assert_eq!(index.kind(), Kind::Bst);
}

#[test]
fn test_any_handle() {
    for kind in Kind::ALL.iter() {
        let mut index: AnyTree<u32> = AnyTree::new(*kind);
        for key in [10, 20, 30] {
            index.insert(key);
        }
        index.highlight(&20);

        let views = index.nodes();
        assert_eq!(views.len(), 3);
        for view in views.iter() {
            assert_eq!(view.color.is_some(), *kind == Kind::Rbt, "{}", kind);
            assert_eq!(view.highlighted, *view.key == 20);
        }

        let root = index.root_handle().unwrap();
        match (kind, root) {
            (Kind::Bst, AnyHandle::Bst(_)) => assert_eq!(root.key(), &10),
            (Kind::Avl, AnyHandle::Avl(_)) => assert_eq!(root.key(), &20),
            (Kind::Rbt, AnyHandle::Rbt(cursor)) => {
                assert_eq!(root.key(), &20);
                assert_eq!(cursor.parent(), None);
            }
            (kind, _) => panic!("handle mismatch for {}", kind),
        }
    }
}

#[test]
fn test_any_merge() {
    let mut a: AnyTree<u32> = AnyTree::new(Kind::Bst);
    let mut b: AnyTree<u32> = AnyTree::new(Kind::Rbt);
    for key in [1, 3, 5] {
        a.insert(key);
    }
    for key in [2, 4] {
        b.insert(key);
    }
    a.merge(&b);
    let keys: Vec<u32> = a.iter().cloned().collect();
    assert_eq!(keys, vec![1, 2, 3, 4, 5]);
    assert_eq!(a.kind(), Kind::Bst);
    a.validate().unwrap();
}
