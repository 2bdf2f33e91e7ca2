//! Module implement stack based walks over tree handles.
//!
//! All walks keep their own stack instead of recursing, so they are safe
//! on degenerate, list-like, unbalanced trees.

use std::marker;

use crate::tree::Handle;

/// Ascending, in-order iterator over tree keys.
///
/// Created by [Tree::iter]. Exhausted iterators stay exhausted, create a
/// new one to walk again.
///
/// Iterator borrows the tree, mutating it while iterating is rejected at
/// compile time:
///
/// ```compile_fail
/// use ordtree::{Bst, Tree};
///
/// let mut tree: Bst<u32> = Bst::new();
/// tree.insert(1);
/// for key in tree.iter() {
///     tree.insert(key + 1);
/// }
/// ```
///
/// [Tree::iter]: crate::Tree::iter
pub struct Iter<'a, H> {
    stack: Vec<H>,
    cursor: Option<H>,
    _marker: marker::PhantomData<&'a ()>,
}

impl<'a, H> Iter<'a, H>
where
    H: Handle<'a>,
{
    pub(crate) fn new(root: Option<H>) -> Iter<'a, H> {
        Iter {
            stack: Vec::default(),
            cursor: root,
            _marker: marker::PhantomData,
        }
    }

    /// Check whether there are more keys to visit.
    pub fn has_next(&self) -> bool {
        !self.stack.is_empty() || self.cursor.is_some()
    }

    /// Same as `next()`, but return the node instead of its key.
    pub fn next_handle(&mut self) -> Option<H> {
        while let Some(node) = self.cursor.take() {
            self.cursor = node.left();
            self.stack.push(node);
        }
        let node = self.stack.pop()?;
        self.cursor = node.right();
        Some(node)
    }
}

impl<'a, H> Iterator for Iter<'a, H>
where
    H: Handle<'a>,
{
    type Item = &'a H::Key;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_handle().map(Handle::key)
    }
}

pub(crate) fn preorder<'a, H>(root: Option<H>) -> Vec<&'a H::Key>
where
    H: Handle<'a>,
{
    let mut keys = vec![];
    let mut stack: Vec<H> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        keys.push(node.key());
        stack.extend(node.right());
        stack.extend(node.left());
    }
    keys
}

pub(crate) fn postorder<'a, H>(root: Option<H>) -> Vec<&'a H::Key>
where
    H: Handle<'a>,
{
    // node-right-left is the mirror of post-order, reverse it at the end.
    let mut keys = vec![];
    let mut stack: Vec<H> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        keys.push(node.key());
        stack.extend(node.left());
        stack.extend(node.right());
    }
    keys.reverse();
    keys
}

/// Count levels, level by level.
pub(crate) fn height<'a, H>(root: Option<H>) -> usize
where
    H: Handle<'a>,
{
    let mut level: Vec<H> = root.into_iter().collect();
    let mut height = 0;
    while !level.is_empty() {
        height += 1;
        level = level
            .into_iter()
            .flat_map(|node| node.left().into_iter().chain(node.right()))
            .collect();
    }
    height
}

#[cfg(test)]
#[path = "iter_test.rs"]
mod iter_test;
