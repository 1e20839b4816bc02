//! An ordered set implemented with an AVL tree.

use std::cmp::{self, Ordering};

use crate::set::OrderedSet;

/// An ordered set implemented with an AVL tree.
///
/// Every node caches the height of its subtree, so `height` is O(1).
///
/// ```
/// use balanced_dict::AvlTree;
/// let mut tree = AvlTree::new();
/// tree.insert(10);
/// tree.insert(20);
/// tree.insert(30);
/// assert_eq!(tree.height(), 2);
/// assert!(tree.contains(&20));
/// tree.remove(&20);
/// assert!(!tree.contains(&20));
/// ```
pub struct AvlTree<K> {
    root: Link<K>,
    num_nodes: usize,
}

struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
    height: usize,
}

type Link<K> = Option<Box<Node<K>>>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Side {
    Left,
    Right,
}

/// An iterator over the keys of an AVL tree, in ascending order.
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<K: Ord> AvlTree<K> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree. A single node has height 1.
    pub fn height(&self) -> usize {
        Node::height_of(&self.root)
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns a reference to the stored key equal to the given key.
    pub fn get(&self, key: &K) -> Option<&K> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(&node.key),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Returns true if the tree contains the key.
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a key into the tree.
    /// Returns whether the key was newly inserted.
    pub fn insert(&mut self, key: K) -> bool {
        if self.contains(&key) {
            return false;
        }
        let (root, _) = Self::insert_node(self.root.take(), key);
        self.root = Some(root);
        self.num_nodes += 1;
        true
    }

    /// Removes a key from the tree.
    /// Returns whether the key was previously in the tree.
    pub fn remove(&mut self, key: &K) -> bool {
        if !self.contains(key) {
            return false;
        }
        debug_assert!(self.num_nodes >= 1);
        self.root = Self::remove_node(self.root.take(), key);
        self.num_nodes -= 1;
        debug_assert!(!self.contains(key));
        true
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let mut num_nodes = 0;
        Self::check_node(&self.root, None, None, &mut num_nodes);
        assert_eq!(num_nodes, self.num_nodes);
        assert_eq!(self.root.is_none(), self.num_nodes == 0);
    }

    // Returns the checked subtree height.
    #[cfg(any(test, feature = "consistency_check"))]
    fn check_node(link: &Link<K>, lower: Option<&K>, upper: Option<&K>, count: &mut usize) -> usize {
        let node = match link {
            None => return 0,
            Some(node) => node,
        };

        // Check key order against the bounds inherited from the ancestors
        if let Some(lower) = lower {
            assert!(node.key > *lower);
        }
        if let Some(upper) = upper {
            assert!(node.key < *upper);
        }

        let left_height = Self::check_node(&node.left, lower, Some(&node.key), count);
        let right_height = Self::check_node(&node.right, Some(&node.key), upper, count);

        // Check height
        assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

        // Check AVL condition (nearly balance)
        assert!(left_height <= right_height + 1);
        assert!(right_height <= left_height + 1);

        *count += 1;
        node.height
    }

    /// Inserts below the given link and rebalances on the way back up.
    /// Returns the new subtree root and the side the key took at that root.
    fn insert_node(link: Link<K>, key: K) -> (Box<Node<K>>, Option<Side>) {
        let mut node = match link {
            None => return (Node::leaf(key), None),
            Some(node) => node,
        };

        let (side, grandchild_side) = if key < node.key {
            let (left, taken) = Self::insert_node(node.left.take(), key);
            node.left = Some(left);
            (Side::Left, taken)
        } else {
            let (right, taken) = Self::insert_node(node.right.take(), key);
            node.right = Some(right);
            (Side::Right, taken)
        };

        node.adjust_height();
        (Self::rebalance_after_insert(node, grandchild_side), Some(side))
    }

    /// Restores balance at a node after an insert below it.
    /// `grandchild_side` is the side the new key took below the child on the
    /// path; it tells the outer (single rotation) and inner (double rotation)
    /// cases apart.
    fn rebalance_after_insert(mut node: Box<Node<K>>, grandchild_side: Option<Side>) -> Box<Node<K>> {
        let balance = node.balance_factor();
        if balance > 1 {
            if grandchild_side == Some(Side::Right) {
                node.left = node.left.take().map(|left| Self::rotate(left, Side::Left));
            }
            Self::rotate(node, Side::Right)
        } else if balance < -1 {
            if grandchild_side == Some(Side::Left) {
                node.right = node.right.take().map(|right| Self::rotate(right, Side::Right));
            }
            Self::rotate(node, Side::Left)
        } else {
            node
        }
    }

    fn remove_node(link: Link<K>, key: &K) -> Link<K> {
        let mut node = link?;
        match key.cmp(&node.key) {
            Ordering::Less => node.left = Self::remove_node(node.left.take(), key),
            Ordering::Greater => node.right = Self::remove_node(node.right.take(), key),
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, right) => return right,
                (left, None) => return left,
                (left, Some(right)) => {
                    // Replace by the in-order successor, removed from the right subtree
                    let (right, successor) = Self::remove_min(right);
                    node.key = successor;
                    node.left = left;
                    node.right = right;
                }
            },
        }
        Some(Self::rebalance_node(node))
    }

    /// Unlinks the smallest node of a subtree.
    /// Returns the rebalanced remainder and the removed key.
    fn remove_min(mut node: Box<Node<K>>) -> (Link<K>, K) {
        match node.left.take() {
            None => {
                let Node { key, right, .. } = *node;
                (right, key)
            }
            Some(left) => {
                let (left, min) = Self::remove_min(left);
                node.left = left;
                (Some(Self::rebalance_node(node)), min)
            }
        }
    }

    /// Restores AVL condition (balance) at given node if necessary and adjusts height.
    /// The rotation shape is chosen by the balance factor of the heavy child,
    /// since a removal has no new key to steer by.
    /// Initial balance must not exceed +2 or -2, which always holds after a single update.
    fn rebalance_node(mut node: Box<Node<K>>) -> Box<Node<K>> {
        node.adjust_height();
        let balance = node.balance_factor();
        debug_assert!((-2..=2).contains(&balance));
        if balance > 1 {
            // Rebalance right
            if node.left.as_ref().map_or(0, |left| left.balance_factor()) < 0 {
                node.left = node.left.take().map(|left| Self::rotate(left, Side::Left));
            }
            Self::rotate(node, Side::Right)
        } else if balance < -1 {
            // Rebalance left
            if node.right.as_ref().map_or(0, |right| right.balance_factor()) > 0 {
                node.right = node.right.take().map(|right| Self::rotate(right, Side::Right));
            }
            Self::rotate(node, Side::Left)
        } else {
            node
        }
    }

    /// Rotates the subtree rooted at `node` towards `side`, lifting the child
    /// on the opposite side. The intervening subtree changes parent and both
    /// moved nodes get their heights recomputed.
    fn rotate(mut node: Box<Node<K>>, side: Side) -> Box<Node<K>> {
        match side {
            Side::Left => match node.right.take() {
                Some(mut right) => {
                    node.right = right.left.take();
                    node.adjust_height();
                    right.left = Some(node);
                    right.adjust_height();
                    right
                }
                None => node,
            },
            Side::Right => match node.left.take() {
                Some(mut left) => {
                    node.left = left.right.take();
                    node.adjust_height();
                    left.right = Some(node);
                    left.adjust_height();
                    left
                }
                None => node,
            },
        }
    }
}

impl<K> Node<K> {
    fn leaf(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn height_of(link: &Link<K>) -> usize {
        link.as_ref().map_or(0, |node| node.height)
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(Self::height_of(&self.left), Self::height_of(&self.right));
    }

    fn balance_factor(&self) -> isize {
        Self::height_of(&self.left) as isize - Self::height_of(&self.right) as isize
    }
}

impl<'a, K> Iter<'a, K> {
    fn push_left_spine(&mut self, mut current: Option<&'a Node<K>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.key)
    }
}

impl<'a, K: Ord> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> OrderedSet<K> for AvlTree<K> {
    fn insert(&mut self, key: K) -> bool {
        AvlTree::insert(self, key)
    }

    fn delete(&mut self, key: &K) -> bool {
        self.remove(key)
    }

    fn search(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn height(&self) -> usize {
        AvlTree::height(self)
    }
}
