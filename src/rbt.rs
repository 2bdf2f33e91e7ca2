//! Module provide red-black tree implemented by [Rbt].
//!
//! Nodes live in an arena, a plain vector, and refer to their left child,
//! right child and parent by index. Index `NIL` is a sentinel standing in
//! for every missing child and for the parent of root, it is always
//! black and never carry a key. With the sentinel in place the fix-up
//! loops never have to branch on a missing node.
//!
//! - New nodes are inserted red, insert fix-up removes consecutive
//!   reds by recoloring and at most two rotations.
//! - Removing a black node leaves one path short of a black,
//!   delete fix-up pushes the extra black up or rotates it away.
//! - Slots of removed nodes are recycled through a free list.

use log::{debug, trace};

use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
    fmt,
};

use crate::{tree::Handle, Color, Error, Kind, Result, Tree};

/// Arena index of the sentinel node.
const NIL: usize = 0;

/// Rbt manage a single instance of [red-black][rbt] tree.
///
/// [rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct Rbt<K> {
    nodes: Vec<Node<K>>, // nodes[NIL] is the sentinel.
    free: Vec<usize>,    // recycled slots in nodes.
    root: usize,
    n_count: usize, // number of entries in the tree.
}

impl<K> Default for Rbt<K> {
    fn default() -> Rbt<K> {
        Rbt::new()
    }
}

impl<K> Rbt<K> {
    /// Create an empty instance of Rbt.
    pub fn new() -> Rbt<K> {
        Rbt {
            nodes: vec![Node::sentinel()],
            free: Vec::default(),
            root: NIL,
            n_count: Default::default(),
        }
    }

    /// Create an empty instance, with room for `capacity` keys before the
    /// arena has to grow.
    pub fn with_capacity(capacity: usize) -> Rbt<K> {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::sentinel());
        Rbt {
            nodes,
            free: Vec::default(),
            root: NIL,
            n_count: Default::default(),
        }
    }
}

// arena accessors.
impl<K> Rbt<K> {
    #[inline]
    fn key(&self, i: usize) -> &K {
        match self.nodes[i].key.as_ref() {
            Some(key) => key,
            None => panic!("key(): no key at {} ? Call the programmer", i),
        }
    }

    #[inline]
    fn left(&self, i: usize) -> usize {
        self.nodes[i].left
    }

    #[inline]
    fn right(&self, i: usize) -> usize {
        self.nodes[i].right
    }

    #[inline]
    fn parent(&self, i: usize) -> usize {
        self.nodes[i].parent
    }

    #[inline]
    fn color(&self, i: usize) -> Color {
        self.nodes[i].color
    }

    #[inline]
    fn is_red(&self, i: usize) -> bool {
        self.nodes[i].color == Color::Red
    }

    #[inline]
    fn is_black(&self, i: usize) -> bool {
        self.nodes[i].color == Color::Black
    }

    #[inline]
    fn set_left(&mut self, i: usize, left: usize) {
        self.nodes[i].left = left
    }

    #[inline]
    fn set_right(&mut self, i: usize, right: usize) {
        self.nodes[i].right = right
    }

    #[inline]
    fn set_parent(&mut self, i: usize, parent: usize) {
        self.nodes[i].parent = parent
    }

    #[inline]
    fn set_color(&mut self, i: usize, color: Color) {
        self.nodes[i].color = color
    }

    fn alloc(&mut self, key: K, parent: usize) -> usize {
        let node = Node::new(key, parent);
        match self.free.pop() {
            Some(i) => {
                self.nodes[i] = node;
                i
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, i: usize) -> K {
        let node = std::mem::replace(&mut self.nodes[i], Node::sentinel());
        self.free.push(i);
        match node.key {
            Some(key) => key,
            None => panic!("release(): no key at {} ? Call the programmer", i),
        }
    }

    fn lookup<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut x = self.root;
        while x != NIL {
            x = match self.key(x).borrow().cmp(key) {
                Ordering::Less => self.right(x),
                Ordering::Greater => self.left(x),
                Ordering::Equal => return x,
            };
        }
        NIL
    }

    fn minimum(&self, mut x: usize) -> usize {
        while self.left(x) != NIL {
            x = self.left(x);
        }
        x
    }
}

// rotations and repair.
impl<K> Rbt<K> {
    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             a   y         =>          x   c
    //                / \                   / \
    //               b   c                 a   b
    //
    fn rotate_left(&mut self, x: usize) {
        let y = self.right(x);
        if y == NIL {
            panic!("rotate_left(): no right child ? Call the programmer");
        }

        let b = self.left(y);
        self.set_right(x, b);
        if b != NIL {
            self.set_parent(b, x);
        }

        let p = self.parent(x);
        self.set_parent(y, p);
        if p == NIL {
            self.root = y;
        } else if x == self.left(p) {
            self.set_left(p, y);
        } else {
            self.set_right(p, y);
        }

        self.set_left(y, x);
        self.set_parent(x, y);
    }

    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             y   c         =>          a   x
    //            / \                           / \
    //           a   b                         b   c
    //
    fn rotate_right(&mut self, x: usize) {
        let y = self.left(x);
        if y == NIL {
            panic!("rotate_right(): no left child ? Call the programmer");
        }

        let b = self.right(y);
        self.set_left(x, b);
        if b != NIL {
            self.set_parent(b, x);
        }

        let p = self.parent(x);
        self.set_parent(y, p);
        if p == NIL {
            self.root = y;
        } else if x == self.right(p) {
            self.set_right(p, y);
        } else {
            self.set_left(p, y);
        }

        self.set_right(y, x);
        self.set_parent(x, y);
    }

    /// Remove consecutive reds starting from the freshly inserted red
    /// node `k`.
    fn fix_insert(&mut self, mut k: usize) {
        while self.is_red(self.parent(k)) {
            let p = self.parent(k);
            let g = self.parent(p);
            if p == self.right(g) {
                let u = self.left(g);
                if self.is_red(u) {
                    // case 1: red uncle, push the black down from g.
                    self.set_color(u, Color::Black);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    k = g;
                } else {
                    if k == self.left(p) {
                        // case 2: inner child, straighten the zig-zag.
                        k = p;
                        self.rotate_right(k);
                    }
                    // case 3: outer child.
                    let p = self.parent(k);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_left(g);
                    trace!("rbt: insert fix-up rotated at {}", g);
                }
            } else {
                let u = self.right(g);
                if self.is_red(u) {
                    self.set_color(u, Color::Black);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    k = g;
                } else {
                    if k == self.right(p) {
                        k = p;
                        self.rotate_left(k);
                    }
                    let p = self.parent(k);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_right(g);
                    trace!("rbt: insert fix-up rotated at {}", g);
                }
            }
            if k == self.root {
                break;
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Replace subtree rooted at `u` with subtree rooted at `v`. Parent of
    /// `v` is updated even when `v` is the sentinel, fix_delete climbs
    /// from there.
    fn transplant(&mut self, u: usize, v: usize) {
        let p = self.parent(u);
        if p == NIL {
            self.root = v;
        } else if u == self.left(p) {
            self.set_left(p, v);
        } else {
            self.set_right(p, v);
        }
        self.set_parent(v, p);
    }

    /// Restore black-height after a black node was spliced out, `x` is
    /// the node that took its place and carry the extra black.
    fn fix_delete(&mut self, mut x: usize) {
        while x != self.root && self.is_black(x) {
            let p = self.parent(x);
            if x == self.left(p) {
                let mut s = self.right(p);
                if self.is_red(s) {
                    // case 1: red sibling, rotate it above the parent.
                    self.set_color(s, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_left(p);
                    s = self.right(self.parent(x));
                }
                if self.is_black(self.left(s)) && self.is_black(self.right(s)) {
                    // case 2: move the extra black up.
                    self.set_color(s, Color::Red);
                    x = self.parent(x);
                } else {
                    if self.is_black(self.right(s)) {
                        // case 3: near child red, far child black.
                        let near = self.left(s);
                        self.set_color(near, Color::Black);
                        self.set_color(s, Color::Red);
                        self.rotate_right(s);
                        s = self.right(self.parent(x));
                    }
                    // case 4: far child red.
                    let p = self.parent(x);
                    let far = self.right(s);
                    self.set_color(s, self.color(p));
                    self.set_color(p, Color::Black);
                    self.set_color(far, Color::Black);
                    self.rotate_left(p);
                    trace!("rbt: delete fix-up rotated at {}", p);
                    x = self.root;
                }
            } else {
                let mut s = self.left(p);
                if self.is_red(s) {
                    self.set_color(s, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_right(p);
                    s = self.left(self.parent(x));
                }
                if self.is_black(self.left(s)) && self.is_black(self.right(s)) {
                    self.set_color(s, Color::Red);
                    x = self.parent(x);
                } else {
                    if self.is_black(self.left(s)) {
                        let near = self.right(s);
                        self.set_color(near, Color::Black);
                        self.set_color(s, Color::Red);
                        self.rotate_left(s);
                        s = self.left(self.parent(x));
                    }
                    let p = self.parent(x);
                    let far = self.left(s);
                    self.set_color(s, self.color(p));
                    self.set_color(p, Color::Black);
                    self.set_color(far, Color::Black);
                    self.rotate_right(p);
                    trace!("rbt: delete fix-up rotated at {}", p);
                    x = self.root;
                }
            }
        }
        self.set_color(x, Color::Black);
    }

    // unlink node `z` from the tree and rebalance, the slot is not
    // released.
    fn unlink(&mut self, z: usize) {
        let mut y = z;
        let mut y_color = self.color(y);
        let x;

        if self.left(z) == NIL {
            x = self.right(z);
            self.transplant(z, x);
        } else if self.right(z) == NIL {
            x = self.left(z);
            self.transplant(z, x);
        } else {
            y = self.minimum(self.right(z));
            y_color = self.color(y);
            x = self.right(y);
            if self.parent(y) == z {
                self.set_parent(x, y);
            } else {
                self.transplant(y, x);
                let zr = self.right(z);
                self.set_right(y, zr);
                self.set_parent(zr, y);
            }
            self.transplant(z, y);
            let zl = self.left(z);
            self.set_left(y, zl);
            self.set_parent(zl, y);
            self.set_color(y, self.color(z));
        }

        if y_color == Color::Black {
            self.fix_delete(x);
        }
        // sentinel may have picked up a parent, leave it clean.
        self.set_parent(NIL, NIL);
    }
}

impl<K> Rbt<K> {
    // return the black-height of the subtree.
    fn validate_tree(&self, x: usize, fromred: bool, n_count: &mut usize) -> Result<usize>
    where
        K: Ord + fmt::Debug,
    {
        if x == NIL {
            return Ok(1);
        }
        *n_count += 1;

        let red = self.is_red(x);
        if fromred && red {
            return err_at!(Fatal, msg: "consecutive reds at {:?}", self.key(x));
        }

        let (left, right) = (self.left(x), self.right(x));
        for child in [left, right] {
            if child != NIL && self.parent(child) != x {
                return err_at!(Fatal, msg: "broken parent link under {:?}", self.key(x));
            }
        }
        if left != NIL && self.key(left).ge(self.key(x)) {
            err_at!(Fatal, msg: "sort lkey:{:?} parent:{:?}", self.key(left), self.key(x))?;
        }
        if right != NIL && self.key(right).le(self.key(x)) {
            err_at!(Fatal, msg: "sort rkey:{:?} parent:{:?}", self.key(right), self.key(x))?;
        }

        let lblacks = self.validate_tree(left, red, n_count)?;
        let rblacks = self.validate_tree(right, red, n_count)?;
        if lblacks != rblacks {
            err_at!(Fatal, msg: "unbalanced blacks {} {}", lblacks, rblacks)?;
        }

        Ok(if red { lblacks } else { lblacks + 1 })
    }

    fn cursor(&self, index: usize) -> Option<Cursor<'_, K>> {
        match index {
            NIL => None,
            index => Some(Cursor { tree: self, index }),
        }
    }
}

impl<K> Tree<K> for Rbt<K>
where
    K: Ord,
{
    type Handle<'a> = Cursor<'a, K> where Self: 'a;
    type Rebind<L: Ord> = Rbt<L>;

    fn kind(&self) -> Kind {
        Kind::Rbt
    }

    fn empty_like<L: Ord>(&self) -> Self::Rebind<L> {
        Rbt::new()
    }

    #[inline]
    fn len(&self) -> usize {
        self.n_count
    }

    fn insert(&mut self, key: K) -> bool {
        let (mut y, mut x) = (NIL, self.root);
        let mut ord = Ordering::Equal;
        while x != NIL {
            y = x;
            ord = key.cmp(self.key(x));
            x = match ord {
                Ordering::Less => self.left(x),
                Ordering::Greater => self.right(x),
                Ordering::Equal => {
                    debug!("rbt: duplicate key ignored");
                    return false;
                }
            };
        }

        let z = self.alloc(key, y);
        self.n_count += 1;
        if y == NIL {
            self.root = z;
        } else if ord == Ordering::Less {
            self.set_left(y, z);
        } else {
            self.set_right(y, z);
        }

        if y == NIL {
            self.set_color(z, Color::Black);
        } else if self.is_red(y) {
            self.fix_insert(z);
        }
        true
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let z = self.lookup(key);
        if z == NIL {
            debug!("rbt: remove() missed");
            return None;
        }

        self.unlink(z);
        self.n_count -= 1;
        Some(self.release(z))
    }

    fn highlight<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.lookup(key) {
            NIL => false,
            x => {
                self.nodes[x].highlight = true;
                true
            }
        }
    }

    fn clear_highlights(&mut self) {
        self.nodes.iter_mut().for_each(|node| node.highlight = false);
    }

    /// Validate tree with following rules:
    ///
    /// * Root and sentinel are black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Children point back to their parent.
    /// * Make sure keys are in sorted order.
    /// * Number of reachable nodes match the entry count.
    fn validate(&self) -> Result<()>
    where
        K: fmt::Debug,
    {
        if self.is_red(NIL) {
            err_at!(Fatal, msg: "red sentinel")?;
        }
        if self.is_red(self.root) {
            err_at!(Fatal, msg: "red root {:?}", self.key(self.root))?;
        }
        if self.root != NIL && self.parent(self.root) != NIL {
            err_at!(Fatal, msg: "root {:?} has a parent", self.key(self.root))?;
        }

        let mut n_count = 0;
        self.validate_tree(self.root, false, &mut n_count)?;
        if n_count != self.n_count {
            err_at!(Fatal, msg: "n_count {} != {}", n_count, self.n_count)?;
        }
        Ok(())
    }

    fn root_handle(&self) -> Option<Self::Handle<'_>> {
        self.cursor(self.root)
    }
}

/// Read-only reference into an [Rbt] node.
pub struct Cursor<'a, K> {
    tree: &'a Rbt<K>,
    index: usize,
}

impl<'a, K> Clone for Cursor<'a, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K> Copy for Cursor<'a, K> {}

impl<'a, K> Cursor<'a, K> {
    /// Key of parent node, None for root.
    pub fn parent(self) -> Option<&'a K> {
        self.tree.cursor(self.tree.parent(self.index)).map(|c| c.tree.key(c.index))
    }
}

impl<'a, K> Handle<'a> for Cursor<'a, K> {
    type Key = K;

    fn key(self) -> &'a K {
        self.tree.key(self.index)
    }

    fn left(self) -> Option<Self> {
        self.tree.cursor(self.tree.left(self.index))
    }

    fn right(self) -> Option<Self> {
        self.tree.cursor(self.tree.right(self.index))
    }

    fn color(self) -> Option<Color> {
        Some(self.tree.color(self.index))
    }

    fn is_highlighted(self) -> bool {
        self.tree.nodes[self.index].highlight
    }
}

/// Node corresponds to a single slot in [Rbt] arena.
struct Node<K> {
    key: Option<K>, // None for sentinel and free slots.
    color: Color,
    left: usize,
    right: usize,
    parent: usize,
    highlight: bool,
}

impl<K> Node<K> {
    fn new(key: K, parent: usize) -> Node<K> {
        Node {
            key: Some(key),
            color: Color::Red,
            left: NIL,
            right: NIL,
            parent,
            highlight: false,
        }
    }

    fn sentinel() -> Node<K> {
        Node {
            key: None,
            color: Color::Black,
            left: NIL,
            right: NIL,
            parent: NIL,
            highlight: false,
        }
    }
}

#[cfg(test)]
#[path = "rbt_test.rs"]
mod rbt_test;
