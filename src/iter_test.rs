use super::*;
use crate::{Bst, Rbt, Tree};

fn perfect<T>() -> T
where
    T: Tree<u32> + Default,
{
    let mut tree = T::default();
    for key in [4, 2, 6, 1, 3, 5, 7] {
        tree.insert(key);
    }
    tree
}

#[test]
fn test_iter() {
    let tree: Bst<u32> = perfect();

    let mut iter = tree.iter();
    assert!(iter.has_next());
    let keys: Vec<u32> = iter.by_ref().cloned().collect();
    assert_eq!(keys, vec![1, 2, 3, 4, 5, 6, 7]);
    assert!(!iter.has_next());
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);

    // a fresh iterator walks again.
    assert_eq!(tree.iter().count(), 7);
}

#[test]
fn test_iter_empty() {
    let tree: Rbt<u32> = Rbt::new();
    let mut iter = tree.iter();
    assert!(!iter.has_next());
    assert_eq!(iter.next(), None);
    assert_eq!(height(tree.root_handle()), 0);
    assert!(preorder(tree.root_handle()).is_empty());
    assert!(postorder(tree.root_handle()).is_empty());
}

#[test]
fn test_next_handle() {
    let tree: Rbt<u32> = perfect();
    let mut iter = tree.iter();
    let mut n = 0;
    while let Some(h) = iter.next_handle() {
        n += 1;
        assert_eq!(*h.key(), n);
        if let Some(left) = h.left() {
            assert!(left.key() < h.key());
        }
    }
    assert_eq!(n, 7);
}

#[test]
fn test_orders() {
    let tree: Bst<u32> = perfect();

    let keys: Vec<u32> = preorder(tree.root_handle()).into_iter().cloned().collect();
    assert_eq!(keys, vec![4, 2, 1, 3, 6, 5, 7]);
    let keys: Vec<u32> = postorder(tree.root_handle()).into_iter().cloned().collect();
    assert_eq!(keys, vec![1, 3, 2, 5, 7, 6, 4]);
    assert_eq!(height(tree.root_handle()), 3);
}

#[test]
fn test_degenerate() {
    let n = 1_000;
    let mut tree: Bst<u32> = Bst::new();
    for key in (0..n).rev() {
        tree.insert(key);
    }

    assert_eq!(height(tree.root_handle()), n as usize);
    assert_eq!(tree.iter().count(), n as usize);
    assert_eq!(preorder(tree.root_handle()).len(), n as usize);
    let post = postorder(tree.root_handle());
    assert_eq!(post.first(), Some(&&0));
    assert_eq!(post.last(), Some(&&(n - 1)));
}
