//! A word dictionary backed by a self-balancing binary search tree.
//!
//! Two interchangeable engines implement the [`OrderedSet`] contract:
//! [`AvlTree`] keeps subtrees height-balanced with rotations, and
//! [`RedBlackTree`] keeps the red-black color invariants with rotations and
//! recoloring. [`Dictionary`] picks one of them at construction and adds
//! batch operations on top.
//!
//! ```
//! use balanced_dict::{Dictionary, OrderedSet, Strategy};
//!
//! let mut dictionary = Dictionary::new(Strategy::Avl);
//! assert!(dictionary.insert("apple".to_string()));
//! assert!(!dictionary.insert("apple".to_string()));
//! assert!(dictionary.search(&"apple".to_string()));
//! assert_eq!(dictionary.size(), 1);
//! ```

pub mod avl;
pub mod dictionary;
pub mod error;
pub mod loader;
pub mod rbtree;
pub mod set;
pub mod shell;

pub use avl::AvlTree;
pub use dictionary::{BatchOutcome, BulkOp, Dictionary, Strategy};
pub use error::{Error, Result};
pub use rbtree::RedBlackTree;
pub use set::OrderedSet;
