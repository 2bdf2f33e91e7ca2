//! Module define the [Tree] contract shared by all tree variants.
//!
//! Variants implement the structural primitives, insert, remove, height
//! and validate, and expose their nodes through a read-only [Handle].
//! Everything else, lookups, scans, merge and transform, is written once
//! here against handles and the primitives.

use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
};

use crate::{
    iter::{self, Iter},
    Color, Error, Kind, Result,
};

/// Read-only, copyable reference to a tree node.
///
/// For boxed variants this is a plain `&Node`, the arena backed [Rbt]
/// pairs the tree with a node index. Absent children, including the
/// red-black sentinel, are reported as `None`.
///
/// [Rbt]: crate::Rbt
pub trait Handle<'a>: Copy {
    type Key: 'a;

    /// Key stored in this node.
    fn key(self) -> &'a Self::Key;

    fn left(self) -> Option<Self>;

    fn right(self) -> Option<Self>;

    /// Node color, only red-black nodes are colored.
    fn color(self) -> Option<Color> {
        None
    }

    /// Display attribute set by [Tree::highlight].
    fn is_highlighted(self) -> bool;
}

/// Snapshot of a single node, as consumed by renderers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeView<'a, K> {
    pub key: &'a K,
    pub left: Option<&'a K>,
    pub right: Option<&'a K>,
    pub color: Option<Color>,
    pub highlighted: bool,
}

/// Ordered-set contract satisfied by [Bst], [Avl], [Rbt] and [AnyTree].
///
/// Keys are unique, inserting an existing key is a no-op that returns
/// `false`.
///
/// [Bst]: crate::Bst
/// [Avl]: crate::Avl
/// [Rbt]: crate::Rbt
/// [AnyTree]: crate::AnyTree
pub trait Tree<K>: Sized
where
    K: Ord,
{
    type Handle<'a>: Handle<'a, Key = K>
    where
        Self: 'a;

    /// Same variant, over a different key type. Refer to [Tree::transform].
    type Rebind<L: Ord>: Tree<L>;

    /// Variant of this tree.
    fn kind(&self) -> Kind;

    /// Create an empty tree of the same variant, over key type `L`.
    fn empty_like<L: Ord>(&self) -> Self::Rebind<L>;

    /// Return number of keys in this tree.
    fn len(&self) -> usize;

    /// Insert `key`, return false if key is already present, in which
    /// case the tree is left untouched.
    fn insert(&mut self, key: K) -> bool;

    /// Remove `key` and return the key that was stored. If key is not
    /// present, remove is a no-op and return None.
    fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Mark the node holding `key`, return false if key is not present.
    fn highlight<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Clear marks set by [Tree::highlight].
    fn clear_highlights(&mut self);

    /// Check every invariant of this variant, return the first violation
    /// as [Error::Fatal].
    fn validate(&self) -> Result<()>
    where
        K: std::fmt::Debug;

    fn root_handle(&self) -> Option<Self::Handle<'_>>;

    /// Check whether this tree is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes on the longest root-to-leaf path, 0 for an empty
    /// tree.
    fn height(&self) -> usize {
        iter::height(self.root_handle())
    }

    /// Key stored at the root.
    fn root(&self) -> Option<&K> {
        self.root_handle().map(Handle::key)
    }

    fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_ok()
    }

    /// Return the stored key equal to `key`.
    fn find<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root_handle();
        while let Some(h) = node {
            node = match h.key().borrow().cmp(key) {
                Ordering::Less => h.right(),
                Ordering::Greater => h.left(),
                Ordering::Equal => return Ok(h.key()),
            };
        }
        err_at!(KeyNotFound, msg: "find() missed in {} tree", self.kind())
    }

    /// Smallest key in this tree.
    fn min(&self) -> Result<&K> {
        let mut node = match self.root_handle() {
            Some(node) => node,
            None => return err_at!(EmptyTree, msg: "min() on empty {} tree", self.kind()),
        };
        while let Some(left) = node.left() {
            node = left
        }
        Ok(node.key())
    }

    /// Largest key in this tree.
    fn max(&self) -> Result<&K> {
        let mut node = match self.root_handle() {
            Some(node) => node,
            None => return err_at!(EmptyTree, msg: "max() on empty {} tree", self.kind()),
        };
        while let Some(right) = node.right() {
            node = right
        }
        Ok(node.key())
    }

    /// Return an iterator over all keys in ascending order. The iterator
    /// borrows the tree, mutations have to wait until it is dropped.
    fn iter(&self) -> Iter<'_, Self::Handle<'_>> {
        Iter::new(self.root_handle())
    }

    /// Keys in node, left subtree, right subtree order.
    fn preorder(&self) -> Vec<&K> {
        iter::preorder(self.root_handle())
    }

    /// Keys in left subtree, right subtree, node order.
    fn postorder(&self) -> Vec<&K> {
        iter::postorder(self.root_handle())
    }

    /// Node adjacency, color and highlight, in ascending key order.
    fn nodes(&self) -> Vec<NodeView<'_, K>> {
        let mut iter = self.iter();
        let mut views = vec![];
        while let Some(h) = iter.next_handle() {
            views.push(NodeView {
                key: h.key(),
                left: h.left().map(Handle::key),
                right: h.right().map(Handle::key),
                color: h.color(),
                highlighted: h.is_highlighted(),
            })
        }
        views
    }

    /// Insert every key from `other` into this tree, in ascending order.
    fn merge<T>(&mut self, other: &T)
    where
        T: Tree<K>,
        K: Clone,
    {
        for key in other.iter() {
            self.insert(key.clone());
        }
    }

    /// Build a new tree of the same variant holding `f(key)` for every
    /// key. `f` need not preserve order, the new tree is ordered on its
    /// own and keys mapping to the same value collapse into one.
    fn transform<L, F>(&self, mut f: F) -> Self::Rebind<L>
    where
        L: Ord,
        F: FnMut(&K) -> L,
    {
        let mut tree = self.empty_like();
        for key in self.iter() {
            tree.insert(f(key));
        }
        tree
    }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
