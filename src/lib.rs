//! Package implement ordered-sets using binary search trees.
//!
//! Three interchangeable tree variants are provided, all of them satisfying
//! the [Tree] contract:
//!
//! * [Bst] implements a plain, unbalanced [binary-search-tree][wiki-bst].
//!   Its height depends on insertion order, sorted input degrades it into
//!   a linked list.
//! * [Avl] implements an [AVL tree][wiki-avl], caching subtree height in
//!   every node and rotating on the way up after insert and remove.
//! * [Rbt] implements a [red-black tree][wiki-rbt] with a sentinel nil
//!   node, parent back-references and the classic insert/delete fix-ups.
//!   Nodes are kept in an arena and linked by index.
//!
//! [AnyTree] wraps the three variants so that the variant can be picked
//! at runtime, refer to [Kind].
//!
//! - Each entry is a single key, parametrised over `key-type`.
//! - Duplicate keys are ignored by insert.
//! - Full table scan in ascending order, plus pre-order and post-order.
//! - Merge two trees, transform a tree into a new one of the same variant.
//! - Uses ownership model and borrow semantics to ensure safety.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Constructing a tree and CRUD operations:
//!
//! ```
//! use ordtree::{Avl, Tree};
//!
//! let mut tree: Avl<i32> = Avl::new();
//! assert!(tree.is_empty());
//!
//! assert!(tree.insert(10));
//! assert!(tree.insert(20));
//! assert!(tree.insert(30));
//! assert!(!tree.insert(20)); // duplicate is ignored
//!
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.root(), Some(&20));
//! assert_eq!(tree.min().unwrap(), &10);
//! assert_eq!(tree.max().unwrap(), &30);
//!
//! assert_eq!(tree.remove(&10), Some(10));
//! assert_eq!(tree.remove(&10), None);
//! assert!(!tree.contains(&10));
//! ```
//!
//! Merge and transform:
//!
//! ```
//! use ordtree::{Rbt, Tree};
//!
//! let mut a: Rbt<u32> = Rbt::new();
//! let mut b: Rbt<u32> = Rbt::new();
//! a.insert(2);
//! a.insert(4);
//! b.insert(1);
//! b.insert(3);
//! b.insert(5);
//!
//! a.merge(&b);
//! let keys: Vec<u32> = a.iter().cloned().collect();
//! assert_eq!(keys, vec![1, 2, 3, 4, 5]);
//!
//! let doubled = a.transform(|x| x * 2);
//! let keys: Vec<u32> = doubled.iter().cloned().collect();
//! assert_eq!(keys, vec![2, 4, 6, 8, 10]);
//! ```
//!
//! [wiki-bst]: https://en.wikipedia.org/wiki/Binary_search_tree
//! [wiki-avl]: https://en.wikipedia.org/wiki/AVL_tree
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// ```ignore
// use crate::Error;
// err_at!(EmptyTree, msg: "min() on empty tree");
// err_at!(Fatal, msg: "unbalanced blacks {} {}", lblacks, rblacks);
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
}

mod any;
mod avl;
mod bst;
mod iter;
mod rbt;
mod tree;

pub use any::{AnyHandle, AnyTree, Kind};
pub use avl::{Avl, Node as AvlNode};
pub use bst::{Bst, Node as BstNode};
pub use iter::Iter;
pub use rbt::{Cursor, Rbt};
pub use tree::{Handle, NodeView, Tree};

/// Color tag carried by red-black nodes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    /// Tree invariant is broken, returned by [Tree::validate].
    Fatal(String, String),
    /// Minimum or maximum asked on an empty tree.
    EmptyTree(String, String),
    /// Lookup did not find the key.
    KeyNotFound(String, String),
    /// Argument could not be understood, like an unknown [Kind] name.
    InvalidInput(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            EmptyTree(p, msg) => write!(f, "{} EmptyTree: {}", p, msg),
            KeyNotFound(p, msg) => write!(f, "{} KeyNotFound: {}", p, msg),
            InvalidInput(p, msg) => write!(f, "{} InvalidInput: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
