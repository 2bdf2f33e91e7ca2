//! Module provide [AnyTree], a tree whose variant is picked at runtime.

use std::{borrow::Borrow, fmt, result, str::FromStr};

use crate::{
    avl, bst, rbt,
    tree::Handle,
    Avl, Bst, Color, Error, Rbt, Result, Tree,
};

/// Tree variants.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    /// Unbalanced binary-search-tree, refer to [Bst].
    Bst,
    /// Height balanced tree, refer to [Avl].
    Avl,
    /// Red-black tree, refer to [Rbt].
    Rbt,
}

impl Kind {
    /// All variants, in the order they are documented.
    pub const ALL: [Kind; 3] = [Kind::Bst, Kind::Avl, Kind::Rbt];
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self {
            Kind::Bst => write!(f, "bst"),
            Kind::Avl => write!(f, "avl"),
            Kind::Rbt => write!(f, "rbt"),
        }
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Kind> {
        match s.to_lowercase().as_str() {
            "bst" => Ok(Kind::Bst),
            "avl" => Ok(Kind::Avl),
            "rbt" | "rb" | "redblack" => Ok(Kind::Rbt),
            _ => err_at!(InvalidInput, msg: "unknown tree kind {:?}", s),
        }
    }
}

/// Tagged union over the tree variants.
///
/// ```
/// use ordtree::{AnyTree, Kind, Tree};
///
/// let kind: Kind = "avl".parse().unwrap();
/// let mut tree: AnyTree<u64> = AnyTree::new(kind);
/// tree.insert(10);
/// tree.insert(20);
/// tree.insert(30);
/// assert_eq!(tree.root(), Some(&20));
///
/// let tree = tree.transform(|x| x / 10);
/// assert_eq!(tree.kind(), Kind::Avl);
/// ```
pub enum AnyTree<K> {
    Bst(Bst<K>),
    Avl(Avl<K>),
    Rbt(Rbt<K>),
}

impl<K> AnyTree<K> {
    /// Create an empty tree of variant `kind`.
    pub fn new(kind: Kind) -> AnyTree<K> {
        match kind {
            Kind::Bst => AnyTree::Bst(Bst::new()),
            Kind::Avl => AnyTree::Avl(Avl::new()),
            Kind::Rbt => AnyTree::Rbt(Rbt::new()),
        }
    }
}

impl<K> From<Bst<K>> for AnyTree<K> {
    fn from(tree: Bst<K>) -> AnyTree<K> {
        AnyTree::Bst(tree)
    }
}

impl<K> From<Avl<K>> for AnyTree<K> {
    fn from(tree: Avl<K>) -> AnyTree<K> {
        AnyTree::Avl(tree)
    }
}

impl<K> From<Rbt<K>> for AnyTree<K> {
    fn from(tree: Rbt<K>) -> AnyTree<K> {
        AnyTree::Rbt(tree)
    }
}

macro_rules! dispatch {
    ($tree:expr, $t:ident => $e:expr) => {
        match $tree {
            AnyTree::Bst($t) => $e,
            AnyTree::Avl($t) => $e,
            AnyTree::Rbt($t) => $e,
        }
    };
}

impl<K> Tree<K> for AnyTree<K>
where
    K: Ord,
{
    type Handle<'a> = AnyHandle<'a, K> where Self: 'a;
    type Rebind<L: Ord> = AnyTree<L>;

    fn kind(&self) -> Kind {
        dispatch!(self, t => t.kind())
    }

    fn empty_like<L: Ord>(&self) -> Self::Rebind<L> {
        AnyTree::new(self.kind())
    }

    fn len(&self) -> usize {
        dispatch!(self, t => t.len())
    }

    fn insert(&mut self, key: K) -> bool {
        dispatch!(self, t => t.insert(key))
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        dispatch!(self, t => t.remove(key))
    }

    fn highlight<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        dispatch!(self, t => t.highlight(key))
    }

    fn clear_highlights(&mut self) {
        dispatch!(self, t => t.clear_highlights())
    }

    fn height(&self) -> usize {
        dispatch!(self, t => t.height())
    }

    fn validate(&self) -> Result<()>
    where
        K: fmt::Debug,
    {
        dispatch!(self, t => t.validate())
    }

    fn root_handle(&self) -> Option<Self::Handle<'_>> {
        match self {
            AnyTree::Bst(t) => t.root_handle().map(AnyHandle::Bst),
            AnyTree::Avl(t) => t.root_handle().map(AnyHandle::Avl),
            AnyTree::Rbt(t) => t.root_handle().map(AnyHandle::Rbt),
        }
    }
}

/// Handle into an [AnyTree] node.
pub enum AnyHandle<'a, K> {
    Bst(&'a bst::Node<K>),
    Avl(&'a avl::Node<K>),
    Rbt(rbt::Cursor<'a, K>),
}

impl<'a, K> Clone for AnyHandle<'a, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K> Copy for AnyHandle<'a, K> {}

impl<'a, K> Handle<'a> for AnyHandle<'a, K> {
    type Key = K;

    fn key(self) -> &'a K {
        match self {
            AnyHandle::Bst(h) => h.key(),
            AnyHandle::Avl(h) => h.key(),
            AnyHandle::Rbt(h) => h.key(),
        }
    }

    fn left(self) -> Option<Self> {
        match self {
            AnyHandle::Bst(h) => h.left().map(AnyHandle::Bst),
            AnyHandle::Avl(h) => h.left().map(AnyHandle::Avl),
            AnyHandle::Rbt(h) => h.left().map(AnyHandle::Rbt),
        }
    }

    fn right(self) -> Option<Self> {
        match self {
            AnyHandle::Bst(h) => h.right().map(AnyHandle::Bst),
            AnyHandle::Avl(h) => h.right().map(AnyHandle::Avl),
            AnyHandle::Rbt(h) => h.right().map(AnyHandle::Rbt),
        }
    }

    fn color(self) -> Option<Color> {
        match self {
            AnyHandle::Rbt(h) => h.color(),
            AnyHandle::Bst(_) | AnyHandle::Avl(_) => None,
        }
    }

    fn is_highlighted(self) -> bool {
        match self {
            AnyHandle::Bst(h) => h.is_highlighted(),
            AnyHandle::Avl(h) => h.is_highlighted(),
            AnyHandle::Rbt(h) => h.is_highlighted(),
        }
    }
}

#[cfg(test)]
#[path = "any_test.rs"]
mod any_test;
