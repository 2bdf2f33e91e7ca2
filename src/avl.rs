//! Module provide height balanced binary-search-tree implemented by [Avl].
//!
//! Every node cache the height of its subtree, an empty subtree has
//! height 0 and a leaf has height 1. After insert and remove, heights are
//! recomputed while the recursion unwinds and any node whose children
//! differ in height by more than one is repaired with one or two
//! rotations. Height of the whole tree stays within `1.44 * log2(n)`.

use log::{debug, trace};

use std::{
    borrow::Borrow,
    cmp::{self, Ord, Ordering},
    fmt, mem,
    ops::Deref,
};

use crate::{tree::Handle, Error, Kind, Result, Tree};

/// Avl manage a single instance of [AVL][avl] tree.
///
/// [avl]: https://en.wikipedia.org/wiki/AVL_tree
pub struct Avl<K> {
    root: Option<Box<Node<K>>>,
    n_count: usize, // number of entries in the tree.
}

impl<K> Default for Avl<K> {
    fn default() -> Avl<K> {
        Avl::new()
    }
}

impl<K> Avl<K> {
    /// Create an empty instance of Avl.
    pub fn new() -> Avl<K> {
        Avl {
            root: None,
            n_count: Default::default(),
        }
    }
}

type Delete<K> = (Option<Box<Node<K>>>, Option<K>);
type Delmin<K> = (Option<Box<Node<K>>>, K);

impl<K> Avl<K> {
    fn do_insert(node: Option<Box<Node<K>>>, key: K) -> (Box<Node<K>>, bool)
    where
        K: Ord,
    {
        let mut node = match node {
            Some(node) => node,
            None => return (Box::new(Node::new(key)), true),
        };

        match node.key.cmp(&key) {
            Ordering::Greater => {
                let (left, ok) = Self::do_insert(node.left.take(), key);
                node.left = Some(left);
                (rebalance(node), ok)
            }
            Ordering::Less => {
                let (right, ok) = Self::do_insert(node.right.take(), key);
                node.right = Some(right);
                (rebalance(node), ok)
            }
            Ordering::Equal => (node, false),
        }
    }

    fn do_remove<Q>(node: Option<Box<Node<K>>>, key: &Q) -> Delete<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = match node {
            Some(node) => node,
            None => return (None, None),
        };

        match node.key.borrow().cmp(key) {
            Ordering::Greater => {
                let (left, old_key) = Self::do_remove(node.left.take(), key);
                node.left = left;
                (Some(rebalance(node)), old_key)
            }
            Ordering::Less => {
                let (right, old_key) = Self::do_remove(node.right.take(), key);
                node.right = right;
                (Some(rebalance(node)), old_key)
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, right) => (right, Some(node.key)),
                (left, None) => (left, Some(node.key)),
                (Some(left), Some(right)) => {
                    let (right, successor) = Self::remove_min(right);
                    let old_key = mem::replace(&mut node.key, successor);
                    node.left = Some(left);
                    node.right = right;
                    (Some(rebalance(node)), Some(old_key))
                }
            },
        }
    }

    fn remove_min(mut node: Box<Node<K>>) -> Delmin<K> {
        match node.left.take() {
            None => {
                let Node { key, right, .. } = *node;
                (right, key)
            }
            Some(left) => {
                let (left, min_key) = Self::remove_min(left);
                node.left = left;
                (Some(rebalance(node)), min_key)
            }
        }
    }

    // return the computed height of the subtree.
    fn validate_tree(node: Option<&Node<K>>, n_count: &mut usize) -> Result<usize>
    where
        K: Ord + fmt::Debug,
    {
        let node = match node {
            Some(node) => node,
            None => return Ok(0),
        };
        *n_count += 1;

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

        let lheight = Self::validate_tree(left, n_count)?;
        let rheight = Self::validate_tree(right, n_count)?;
        if lheight.max(rheight) - lheight.min(rheight) > 1 {
            err_at!(Fatal, msg: "unbalanced {:?} heights {} {}", node.key, lheight, rheight)?;
        }
        let height = 1 + cmp::max(lheight, rheight);
        if height != node.height {
            err_at!(Fatal, msg: "stale height {:?} {} != {}", node.key, node.height, height)?;
        }

        Ok(height)
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

impl<K> Tree<K> for Avl<K>
where
    K: Ord,
{
    type Handle<'a> = &'a Node<K> where Self: 'a;
    type Rebind<L: Ord> = Avl<L>;

    fn kind(&self) -> Kind {
        Kind::Avl
    }

    fn empty_like<L: Ord>(&self) -> Self::Rebind<L> {
        Avl::new()
    }

    #[inline]
    fn len(&self) -> usize {
        self.n_count
    }

    fn insert(&mut self, key: K) -> bool {
        let (root, ok) = Self::do_insert(self.root.take(), key);
        self.root = Some(root);
        if ok {
            self.n_count += 1;
        } else {
            debug!("avl: duplicate key ignored");
        }
        ok
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, old_key) = Self::do_remove(self.root.take(), key);
        self.root = root;
        match old_key {
            Some(_) => self.n_count -= 1,
            None => debug!("avl: remove() missed"),
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

    /// Answered from the height cached in root node.
    fn height(&self) -> usize {
        height(self.root.as_deref())
    }

    /// Validate tree with following rules:
    ///
    /// * Make sure keys are in strictly ascending order.
    /// * Heights of left and right subtree differ by at most one.
    /// * Cached height match the computed height.
    /// * Number of reachable nodes match the entry count.
    fn validate(&self) -> Result<()>
    where
        K: fmt::Debug,
    {
        let mut n_count = 0;
        Self::validate_tree(self.root.as_deref(), &mut n_count)?;
        if n_count != self.n_count {
            err_at!(Fatal, msg: "n_count {} != {}", n_count, self.n_count)?;
        }
        Ok(())
    }

    fn root_handle(&self) -> Option<Self::Handle<'_>> {
        self.root.as_ref().map(Deref::deref)
    }
}

#[inline]
fn height<K>(node: Option<&Node<K>>) -> usize {
    node.map_or(0, |node| node.height)
}

// positive when left leaning, negative when right leaning.
#[inline]
fn balance<K>(node: Option<&Node<K>>) -> isize {
    match node {
        Some(node) => {
            let (l, r) = (height(node.as_left_ref()), height(node.as_right_ref()));
            (l as isize) - (r as isize)
        }
        None => 0,
    }
}

// Refresh the cached height and repair the node if its children differ
// in height by two.
//
// For an insert, the heavy child always leans the same way as the new
// key went, so a child leaning the other way is exactly the left-right
// (or right-left) case. For a remove the heavy child can also be
// perfectly balanced, which a single rotation handles.
fn rebalance<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    node.update_height();
    let bal = balance(Some(&*node));
    if bal > 1 {
        if balance(node.as_left_ref()) < 0 {
            trace!("avl: left-right rotation");
            node.left = node.left.take().map(rotate_left);
        }
        rotate_right(node)
    } else if bal < -1 {
        if balance(node.as_right_ref()) > 0 {
            trace!("avl: right-left rotation");
            node.right = node.right.take().map(rotate_right);
        }
        rotate_left(node)
    } else {
        node
    }
}

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//             /    \                    /   \
//            /      \                  /     \
//          left       x             node      xr
//                    / \            /  \
//                  xl   xr       left   xl
//
fn rotate_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let mut x = match node.right.take() {
        Some(x) => x,
        None => panic!("rotate_left(): no right child ? Call the programmer"),
    };
    node.right = x.left.take();
    node.update_height();
    x.left = Some(node);
    x.update_height();
    x
}

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//             /    \                    /   \
//            /      \                  /     \
//          x       right             xl      node
//         / \                                / \
//       xl   xr                             xr  right
//
fn rotate_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let mut x = match node.left.take() {
        Some(x) => x,
        None => panic!("rotate_right(): no left child ? Call the programmer"),
    };
    node.left = x.right.take();
    node.update_height();
    x.right = Some(node);
    x.update_height();
    x
}

/// Node corresponds to a single entry in [Avl] instance.
pub struct Node<K> {
    key: K,
    height: usize,                // store: height of this subtree
    left: Option<Box<Node<K>>>,  // store: left child
    right: Option<Box<Node<K>>>, // store: right child
    highlight: bool,
}

impl<K> Node<K> {
    fn new(key: K) -> Node<K> {
        Node {
            key,
            height: 1,
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

    #[inline]
    fn update_height(&mut self) {
        self.height = 1 + cmp::max(height(self.as_left_ref()), height(self.as_right_ref()));
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
#[path = "avl_test.rs"]
mod avl_test;
