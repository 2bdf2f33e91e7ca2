use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;
use crate::iter;

fn shape(index: &Avl<u32>) -> (u32, Option<u32>, Option<u32>) {
    let root = index.root_handle().unwrap();
    (
        *root.key(),
        root.left().map(|h| *h.key()),
        root.right().map(|h| *h.key()),
    )
}

#[test]
fn test_avl_rotations() {
    // right-right, left-left, left-right and right-left.
    for keys in [[10, 20, 30], [30, 20, 10], [30, 10, 20], [10, 30, 20]] {
        let mut index: Avl<u32> = Avl::new();
        for key in keys {
            index.insert(key);
        }
        assert_eq!(shape(&index), (20, Some(10), Some(30)), "{:?}", keys);
        assert_eq!(index.height(), 2);
        index.validate().unwrap();
    }
}

#[test]
fn test_avl_sequential() {
    let mut index: Avl<u32> = Avl::new();
    for key in 1..=1023 {
        index.insert(key);
        index.validate().unwrap();
    }
    // ascending loads end up in a perfect tree.
    assert_eq!(index.height(), 10);
    assert_eq!(index.root(), Some(&512));

    for key in (1..=1023).rev() {
        assert_eq!(index.remove(&key), Some(key));
        if key % 16 == 0 {
            index.validate().unwrap();
        }
    }
    assert!(index.is_empty());
    assert_eq!(index.height(), 0);
}

#[test]
fn test_avl_remove_rebalance() {
    let mut index: Avl<u32> = Avl::new();
    for key in 1..=7 {
        index.insert(key);
    }
    assert_eq!(shape(&index), (4, Some(2), Some(6)));

    // drain the left side, the tree has to lean back.
    for key in [1, 3, 2] {
        index.remove(&key);
        index.validate().unwrap();
    }
    let (root, _, _) = shape(&index);
    assert_eq!(root, 6);
    assert_eq!(index.height(), 3);

    // remove with a perfectly balanced heavy child.
    let mut index: Avl<u32> = Avl::new();
    for key in [20, 10, 30, 25, 35] {
        index.insert(key);
    }
    index.remove(&10);
    assert_eq!(shape(&index), (30, Some(20), Some(35)));
    index.validate().unwrap();
}

#[test]
fn test_avl_cached_height() {
    let seed: u128 = random();
    println!("test_avl_cached_height seed {}", seed);
    let mut rng = SmallRng::from_seed(seed.to_le_bytes());

    let mut index: Avl<u16> = Avl::new();
    for i in 0..50_000 {
        let key: u16 = rng.gen();
        if rng.gen::<u8>() % 3 == 0 {
            index.remove(&key);
        } else {
            index.insert(key);
        }
        if i % 1000 == 0 {
            index.validate().unwrap();
            assert_eq!(index.height(), iter::height(index.root_handle()));
        }
    }
    index.validate().unwrap();

    let n = index.len() as f64;
    let bound = (1.45 * (n + 2.0).log2()) as usize;
    assert!(index.height() <= bound, "{} {}", index.height(), bound);
}

#[test]
fn test_avl_validate() {
    let mut index: Avl<u32> = Avl::new();
    for key in [2, 1, 3] {
        index.insert(key);
    }
    if let Some(root) = index.root.as_mut() {
        root.height = 5;
    }
    match index.validate() {
        Err(Error::Fatal(_, msg)) => assert!(msg.contains("stale height"), "{}", msg),
        res => panic!("{:?}", res),
    }
}
