//! A dictionary facade over one of the balancing strategies.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::avl::AvlTree;
use crate::error::{Error, Result};
use crate::rbtree::RedBlackTree;
use crate::set::OrderedSet;

/// The balancing strategy a dictionary is backed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Avl,
    RedBlack,
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(selector: &str) -> Result<Self> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "avl" => Ok(Strategy::Avl),
            "red-black" | "redblack" | "rb" => Ok(Strategy::RedBlack),
            _ => Err(Error::InvalidStrategy(selector.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Avl => f.write_str("AVL"),
            Strategy::RedBlack => f.write_str("Red-Black"),
        }
    }
}

/// The single-key operation a batch applies to each of its keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkOp {
    Insert,
    Delete,
}

/// Per-key tally of a batch.
///
/// For inserts, `rejected` counts keys that were already present; for
/// deletes, keys that were not found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub rejected: usize,
}

impl BatchOutcome {
    pub fn record(&mut self, success: bool) {
        if success {
            self.succeeded += 1;
        } else {
            self.rejected += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.rejected
    }
}

enum Engine<K> {
    Avl(AvlTree<K>),
    RedBlack(RedBlackTree<K>),
}

/// An ordered dictionary backed by the strategy chosen at construction.
///
/// ```
/// use balanced_dict::{BulkOp, Dictionary, OrderedSet, Strategy};
/// let mut dictionary = Dictionary::new(Strategy::RedBlack);
/// let outcome = dictionary.apply(["apple", "pear", "apple"], BulkOp::Insert);
/// assert_eq!((outcome.succeeded, outcome.rejected), (2, 1));
/// assert!(dictionary.search(&"pear"));
/// ```
pub struct Dictionary<K> {
    engine: Engine<K>,
}

impl<K: Ord> Dictionary<K> {
    pub fn new(strategy: Strategy) -> Self {
        debug!(%strategy, "creating dictionary");
        let engine = match strategy {
            Strategy::Avl => Engine::Avl(AvlTree::new()),
            Strategy::RedBlack => Engine::RedBlack(RedBlackTree::new()),
        };
        Self { engine }
    }

    /// Creates a dictionary from a textual tree type such as `"AVL"` or `"Red-Black"`.
    pub fn from_selector(selector: &str) -> Result<Self> {
        selector.parse().map(Self::new)
    }

    pub fn strategy(&self) -> Strategy {
        match self.engine {
            Engine::Avl(_) => Strategy::Avl,
            Engine::RedBlack(_) => Strategy::RedBlack,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Applies `op` to every key in order and tallies the outcomes.
    /// Nothing is rolled back: each key succeeds or is rejected on its own.
    pub fn apply<I>(&mut self, keys: I, op: BulkOp) -> BatchOutcome
    where
        I: IntoIterator<Item = K>,
    {
        let mut outcome = BatchOutcome::default();
        for key in keys {
            outcome.record(self.apply_one(key, op));
        }
        info!(
            ?op,
            succeeded = outcome.succeeded,
            rejected = outcome.rejected,
            "batch applied"
        );
        outcome
    }

    pub(crate) fn apply_one(&mut self, key: K, op: BulkOp) -> bool {
        match op {
            BulkOp::Insert => self.insert(key),
            BulkOp::Delete => self.delete(&key),
        }
    }

    fn set(&self) -> &dyn OrderedSet<K> {
        match &self.engine {
            Engine::Avl(tree) => tree,
            Engine::RedBlack(tree) => tree,
        }
    }

    fn set_mut(&mut self) -> &mut dyn OrderedSet<K> {
        match &mut self.engine {
            Engine::Avl(tree) => tree,
            Engine::RedBlack(tree) => tree,
        }
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        match &self.engine {
            Engine::Avl(tree) => tree.check_consistency(),
            Engine::RedBlack(tree) => tree.check_consistency(),
        }
    }
}

impl<K: Ord> OrderedSet<K> for Dictionary<K> {
    fn insert(&mut self, key: K) -> bool {
        self.set_mut().insert(key)
    }

    fn delete(&mut self, key: &K) -> bool {
        self.set_mut().delete(key)
    }

    fn search(&self, key: &K) -> bool {
        self.set().search(key)
    }

    fn size(&self) -> usize {
        self.set().size()
    }

    fn height(&self) -> usize {
        self.set().height()
    }
}

#[cfg(test)]
mod tests {
    use super::{BulkOp, Dictionary, Strategy};
    use crate::error::Error;
    use crate::set::OrderedSet;

    #[test]
    fn test_strategy_selector() {
        assert_eq!("AVL".parse::<Strategy>().unwrap(), Strategy::Avl);
        assert_eq!("avl".parse::<Strategy>().unwrap(), Strategy::Avl);
        assert_eq!("Red-Black".parse::<Strategy>().unwrap(), Strategy::RedBlack);
        assert_eq!("RB".parse::<Strategy>().unwrap(), Strategy::RedBlack);
        assert!(matches!(
            "splay".parse::<Strategy>(),
            Err(Error::InvalidStrategy(selector)) if selector == "splay"
        ));
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for strategy in [Strategy::Avl, Strategy::RedBlack] {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_from_selector() {
        let dictionary = Dictionary::<String>::from_selector("Red-Black").unwrap();
        assert_eq!(dictionary.strategy(), Strategy::RedBlack);
        assert!(dictionary.is_empty());
        assert!(Dictionary::<String>::from_selector("B-Tree").is_err());
    }

    #[test]
    fn test_apply_tallies_each_key() {
        for strategy in [Strategy::Avl, Strategy::RedBlack] {
            let mut dictionary = Dictionary::new(strategy);
            let outcome = dictionary.apply(vec![3, 1, 3, 2, 1], BulkOp::Insert);
            assert_eq!((outcome.succeeded, outcome.rejected), (3, 2));
            assert_eq!(dictionary.size(), 3);

            let outcome = dictionary.apply(vec![1, 4, 1], BulkOp::Delete);
            assert_eq!((outcome.succeeded, outcome.rejected), (1, 2));
            assert_eq!(outcome.total(), 3);
            assert_eq!(dictionary.size(), 2);
            assert!(!dictionary.search(&1));
            dictionary.check_consistency();
        }
    }
}
