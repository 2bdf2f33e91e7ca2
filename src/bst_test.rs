use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;

use std::mem;

#[test]
fn test_bst_shape() {
    let mut index: Bst<u32> = Bst::new();
    for key in [50, 30, 70, 20, 40, 60, 80] {
        assert!(index.insert(key));
    }
    assert_eq!(index.root(), Some(&50));
    assert_eq!(index.height(), 3);
    index.validate().unwrap();

    // leaf.
    assert_eq!(index.remove(&20), Some(20));
    index.validate().unwrap();
    // one child.
    assert_eq!(index.remove(&30), Some(30));
    let root = index.root_handle().unwrap();
    assert_eq!(root.left().map(Handle::key), Some(&40));
    index.validate().unwrap();
    // two children, successor takes the place of root.
    assert_eq!(index.remove(&50), Some(50));
    assert_eq!(index.root(), Some(&60));
    index.validate().unwrap();

    let keys: Vec<u32> = index.iter().cloned().collect();
    assert_eq!(keys, vec![40, 60, 70, 80]);
}

#[test]
fn test_bst_sorted_input() {
    let n = 500;
    let mut index: Bst<u32> = Bst::new();
    for key in 0..n {
        index.insert(key);
    }
    // no rebalancing, sorted input degenerates into a list.
    assert_eq!(index.height(), n as usize);
    assert_eq!(index.min().unwrap(), &0);
    assert_eq!(index.max().unwrap(), &(n - 1));
    index.validate().unwrap();

    for key in 0..n {
        assert_eq!(index.remove(&key), Some(key));
    }
    assert!(index.is_empty());
}

#[test]
fn test_bst_sorted_deep() {
    let n: u32 = 20_000;
    let mut index: Bst<u32> = Bst::new();
    for key in 0..n {
        assert!(index.insert(key));
    }
    assert!(!index.insert(n / 2));
    assert_eq!(index.height(), n as usize);
    index.validate().unwrap();

    // deepest node, then a node with a single child half way down.
    assert_eq!(index.remove(&(n - 1)), Some(n - 1));
    assert_eq!(index.remove(&(n / 2)), Some(n / 2));
    assert_eq!(index.remove(&(n + 1)), None);
    assert_eq!(index.len(), (n - 2) as usize);
    index.validate().unwrap();
}

#[test]
fn test_bst_chain_100k() {
    let n: u32 = 100_000;
    // same shape that ascending inserts produce, built without paying
    // quadratic insert cost.
    let mut index: Bst<u32> = Bst::new();
    for key in (0..n).rev() {
        let mut node = Box::new(Node::new(key));
        node.right = index.root.take();
        index.root = Some(node);
    }
    index.n_count = n as usize;

    index.validate().unwrap();
    assert_eq!(index.height(), n as usize);
    assert_eq!(index.iter().count(), n as usize);
    assert_eq!(index.max().unwrap(), &(n - 1));
    assert!(index.contains(&(n - 1)));
    assert!(index.highlight(&(n - 2)));
    index.clear_highlights();

    assert!(index.insert(n));
    assert!(!index.insert(n - 1));
    assert_eq!(index.remove(&(n - 1)), Some(n - 1));
    assert_eq!(index.remove(&(n / 2)), Some(n / 2));
    assert_eq!(index.remove(&0), Some(0));
    assert_eq!(index.root(), Some(&1));
    assert_eq!(index.len(), (n - 2) as usize);
    index.validate().unwrap();

    // dropping a 100k deep list must not recurse.
    mem::drop(index);
}

#[test]
fn test_bst_two_children() {
    let mut index: Bst<u32> = Bst::new();
    for key in [50, 30, 80, 70, 90, 60, 65] {
        index.insert(key);
    }
    // successor 60 sits deep in the right subtree and has a right child.
    assert_eq!(index.remove(&50), Some(50));
    assert_eq!(index.root(), Some(&60));
    index.validate().unwrap();

    let keys: Vec<u32> = index.iter().cloned().collect();
    assert_eq!(keys, vec![30, 60, 65, 70, 80, 90]);
    let keys: Vec<u32> = index.preorder().into_iter().cloned().collect();
    assert_eq!(keys, vec![60, 30, 80, 70, 65, 90]);
}

#[test]
fn test_bst_random() {
    let seed: u128 = random();
    println!("test_bst_random seed {}", seed);
    let mut rng = SmallRng::from_seed(seed.to_le_bytes());

    let mut index: Bst<u64> = Bst::new();
    let mut keys = vec![];
    for _i in 0..10_000 {
        let key: u64 = rng.gen();
        if index.insert(key) {
            keys.push(key);
        }
    }
    index.validate().unwrap();
    assert_eq!(index.len(), keys.len());

    for (i, key) in keys.iter().enumerate() {
        if i % 2 == 0 {
            assert_eq!(index.remove(key), Some(*key));
        }
    }
    index.validate().unwrap();
    assert_eq!(index.len(), keys.len() / 2);
}

#[test]
fn test_bst_validate() {
    let mut index: Bst<u32> = Bst::new();
    for key in [2, 1, 3] {
        index.insert(key);
    }
    index.validate().unwrap();

    // break the ordering from inside.
    if let Some(root) = index.root.as_mut() {
        if let Some(left) = root.left.as_mut() {
            left.key = 10;
        }
    }
    match index.validate() {
        Err(Error::Fatal(_, _)) => (),
        res => panic!("{:?}", res),
    }
}

#[test]
fn test_bst_count() {
    let mut index: Bst<u32> = Bst::new();
    index.insert(1);
    index.n_count = 2;
    match index.validate() {
        Err(Error::Fatal(_, msg)) => assert!(msg.contains("n_count"), "{}", msg),
        res => panic!("{:?}", res),
    }
}
