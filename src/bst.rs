//! Module provide an unbalanced binary-search-tree implemented by [Bst].
//!
//! Insert and remove walk down the tree in a loop, no rebalancing is
//! done. Height of the tree depends entirely on insertion order:
//! random input gives `O(log n)` on average, sorted input gives a list of
//! height `n`. No operation recurses, not even drop, so a list-like tree
//! costs time but never stack. [Avl] and [Rbt] bound the height.
//!
//! [Avl]: crate::Avl
//! [Rbt]: crate::Rbt

use log::debug;

use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
    fmt,
    ops::Deref,
};

use crate::{tree::Handle, Error, Kind, Result, Tree};

/// Bst manage a single instance of unbalanced binary-search-tree.
pub struct Bst<K> {
    root: Option<Box<Node<K>>>,
    n_count: usize, // number of entries in the tree.
}

impl<K> Default for Bst<K> {
    fn default() -> Bst<K> {
        Bst::new()
    }
}

impl<K> Bst<K> {
    /// Create an empty instance of Bst.
    pub fn new() -> Bst<K> {
        Bst {
            root: None,
            n_count: Default::default(),
        }
    }
}

impl<K> Drop for Bst<K> {
    fn drop(&mut self) {
        // unlink nodes one by one, a degenerate tree would otherwise drop
        // recursively, one frame per level.
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K> Bst<K> {
    fn do_insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match node.key.cmp(&key) {
                Ordering::Greater => &mut node.left,
                Ordering::Less => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *slot = Some(Box::new(Node::new(key)));
        true
    }

    fn do_remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut slot = &mut self.root;
        loop {
            let node = slot.as_deref()?;
            slot = match node.key.borrow().cmp(key) {
                Ordering::Greater => &mut slot.as_mut()?.left,
                Ordering::Less => &mut slot.as_mut()?.right,
                Ordering::Equal => break,
            };
        }

        let node = slot.take()?;
        let Node {
            key: old_key,
            left,
            right,
            ..
        } = *node;
        *slot = match (left, right) {
            (None, right) => right,
            (left, None) => left,
            (Some(left), right) => {
                // in-order successor takes the place of removed node.
                let mut right = right;
                let mut next = match Self::remove_min(&mut right) {
                    Some(next) => next,
                    None => panic!("do_remove(): no successor ? Call the programmer"),
                };
                next.left = Some(left);
                next.right = right;
                Some(next)
            }
        };
        Some(old_key)
    }

    // unlink the left-most node under `slot`.
    fn remove_min(mut slot: &mut Option<Box<Node<K>>>) -> Option<Box<Node<K>>> {
        while slot.as_ref()?.left.is_some() {
            slot = &mut slot.as_mut()?.left;
        }
        let mut node = slot.take()?;
        *slot = node.right.take();
        Some(node)
    }

    // return the number of reachable nodes.
    fn validate_tree(&self) -> Result<usize>
    where
        K: Ord + fmt::Debug,
    {
        let mut n_count = 0;
        let mut stack: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            n_count += 1;

            let (left, right) = (node.as_left_ref(), node.as_right_ref());
            if let Some(left) = left {
                if left.key.ge(&node.key) {
                    err_at!(Fatal, msg: "sort lkey:{:?} parent:{:?}", left.key, node.key)?;
                }
            }
            if let Some(right) = right {
                if right.key.le(&node.key) {
                    err_at!(Fatal, msg: "sort rkey:{:?} parent:{:?}", right.key, node.key)?;
                }
            }
            stack.extend(right);
            stack.extend(left);
        }
        Ok(n_count)
    }

    fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut Node<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref_mut();
        while let Some(nref) = node {
            node = match nref.key.borrow().cmp(key) {
                Ordering::Less => nref.right.as_deref_mut(),
                Ordering::Greater => nref.left.as_deref_mut(),
                Ordering::Equal => return Some(nref),
            };
        }
        None
    }
}

impl<K> Tree<K> for Bst<K>
where
    K: Ord,
{
    type Handle<'a> = &'a Node<K> where Self: 'a;
    type Rebind<L: Ord> = Bst<L>;

    fn kind(&self) -> Kind {
        Kind::Bst
    }

    fn empty_like<L: Ord>(&self) -> Self::Rebind<L> {
        Bst::new()
    }

    #[inline]
    fn len(&self) -> usize {
        self.n_count
    }

    fn insert(&mut self, key: K) -> bool {
        let ok = self.do_insert(key);
        if ok {
            self.n_count += 1;
        } else {
            debug!("bst: duplicate key ignored");
        }
        ok
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let old_key = self.do_remove(key);
        match old_key {
            Some(_) => self.n_count -= 1,
            None => debug!("bst: remove() missed"),
        }
        old_key
    }

    fn highlight<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find_mut(key) {
            Some(node) => {
                node.highlight = true;
                true
            }
            None => false,
        }
    }

    fn clear_highlights(&mut self) {
        let mut stack: Vec<&mut Node<K>> = self.root.as_deref_mut().into_iter().collect();
        while let Some(node) = stack.pop() {
            node.highlight = false;
            stack.extend(node.left.as_deref_mut());
            stack.extend(node.right.as_deref_mut());
        }
    }

    /// Validate tree with following rules:
    ///
    /// * Make sure keys are in strictly ascending order.
    /// * Number of reachable nodes match the entry count.
    fn validate(&self) -> Result<()>
    where
        K: fmt::Debug,
    {
        let n_count = self.validate_tree()?;
        if n_count != self.n_count {
            err_at!(Fatal, msg: "n_count {} != {}", n_count, self.n_count)?;
        }
        Ok(())
    }

    fn root_handle(&self) -> Option<Self::Handle<'_>> {
        self.root.as_ref().map(Deref::deref)
    }
}

/// Node corresponds to a single entry in [Bst] instance.
pub struct Node<K> {
    key: K,
    left: Option<Box<Node<K>>>,  // store: left child
    right: Option<Box<Node<K>>>, // store: right child
    highlight: bool,
}

impl<K> Node<K> {
    fn new(key: K) -> Node<K> {
        Node {
            key,
            left: None,
            right: None,
            highlight: false,
        }
    }

    #[inline]
    fn as_left_ref(&self) -> Option<&Node<K>> {
        self.left.as_ref().map(AsRef::as_ref)
    }

    #[inline]
    fn as_right_ref(&self) -> Option<&Node<K>> {
        self.right.as_ref().map(AsRef::as_ref)
    }
}

impl<'a, K> Handle<'a> for &'a Node<K> {
    type Key = K;

    fn key(self) -> &'a K {
        &self.key
    }

    fn left(self) -> Option<Self> {
        self.as_left_ref()
    }

    fn right(self) -> Option<Self> {
        self.as_right_ref()
    }

    fn is_highlighted(self) -> bool {
        self.highlight
    }
}

#[cfg(test)]
#[path = "bst_test.rs"]
mod bst_test;
