//! Red-black tree keyed by byte strings
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`]. The
//! parent link is a plain back reference; rotations only rewrite handles, so
//! a node keeps its arena slot (and handle) for the lifetime of the map.

use crate::error::Result;
use crate::utils::ChunkedVec;
use std::cmp::Ordering;

/// Handle of a node in the map's arena
pub type NodeId = u32;

#[derive(Debug, Clone)]
struct Node<V> {
    key: Box<[u8]>,
    value: V,
    red: bool,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Outcome of [`StringMap::insert_or_get`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion<V> {
    /// Value stored under the key (the caller's value if the key was new)
    pub value: V,
    /// Node holding the key
    pub node: NodeId,
    /// Whether the key was absent before the call
    pub was_new: bool,
}

/// Ordered, duplicate-free map from byte strings to small values
#[derive(Debug, Clone)]
pub struct StringMap<V> {
    nodes: ChunkedVec<Node<V>>,
    root: Option<NodeId>,
}

impl<V: Copy> StringMap<V> {
    pub fn new() -> Self {
        Self::with_chunk(crate::utils::DEFAULT_CHUNK)
    }

    /// Create a map whose node arena grows by `chunk` nodes
    pub fn with_chunk(chunk: usize) -> Self {
        Self {
            nodes: ChunkedVec::new(chunk),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert `key` with `value` unless it is already present
    ///
    /// An existing entry is returned untouched and `value` is ignored. The key
    /// is only copied when a new node is created.
    pub fn insert_or_get(&mut self, key: &[u8], value: V) -> Result<Insertion<V>> {
        let mut parent = None;
        let mut went_left = false;
        let mut cursor = self.root;

        while let Some(id) = cursor {
            let node = &self.nodes[id as usize];
            parent = Some(id);
            match key.cmp(&*node.key) {
                Ordering::Equal => {
                    return Ok(Insertion {
                        value: node.value,
                        node: id,
                        was_new: false,
                    });
                }
                Ordering::Less => {
                    went_left = true;
                    cursor = node.left;
                }
                Ordering::Greater => {
                    went_left = false;
                    cursor = node.right;
                }
            }
        }

        let id = NodeId::try_from(self.nodes.len())
            .map_err(|_| crate::error::IndexError::allocation::<Node<V>>(self.nodes.len() + 1))?;
        self.nodes.push(Node {
            key: copy_key(key)?,
            value,
            red: true,
            parent,
            left: None,
            right: None,
        })?;

        match parent {
            None => self.root = Some(id),
            Some(p) if went_left => self.nodes[p as usize].left = Some(id),
            Some(p) => self.nodes[p as usize].right = Some(id),
        }

        self.rebalance(id);

        Ok(Insertion {
            value,
            node: id,
            was_new: true,
        })
    }

    /// Find the node holding `key`
    pub fn find(&self, key: &[u8]) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.nodes[id as usize];
            cursor = match key.cmp(&*node.key) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Look up the value stored under `key`
    pub fn get(&self, key: &[u8]) -> Option<V> {
        self.find(key).map(|id| self.value(id))
    }

    /// Key of a node; panics on a handle this map never returned
    #[inline]
    pub fn key(&self, node: NodeId) -> &[u8] {
        &self.nodes[node as usize].key
    }

    /// Value of a node; panics on a handle this map never returned
    #[inline]
    pub fn value(&self, node: NodeId) -> V {
        self.nodes[node as usize].value
    }

    /// In-order traversal, ascending by byte comparison
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            map: self,
            next: self.root.map(|root| self.leftmost(root)),
        }
    }

    /// Release every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[id as usize];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        deepest
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id as usize].left {
            id = left;
        }
        id
    }

    fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.nodes[id as usize].right {
            return Some(self.leftmost(right));
        }
        let mut child = id;
        let mut parent = self.nodes[id as usize].parent;
        while let Some(p) = parent {
            if self.nodes[p as usize].left == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.nodes[p as usize].parent;
        }
        None
    }

    #[inline]
    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.nodes[id as usize].red)
    }

    #[inline]
    fn set_red(&mut self, id: NodeId, red: bool) {
        self.nodes[id as usize].red = red;
    }

    /// Restore the red-black invariants after inserting the red node `node`
    fn rebalance(&mut self, mut node: NodeId) {
        loop {
            let Some(mut parent) = self.nodes[node as usize].parent else {
                self.set_red(node, false);
                return;
            };
            if !self.is_red(Some(parent)) {
                return;
            }
            let Some(grandpa) = self.nodes[parent as usize].parent else {
                // Red root: recoloring it is enough
                self.set_red(parent, false);
                return;
            };

            let parent_is_left = self.nodes[grandpa as usize].left == Some(parent);
            let uncle = if parent_is_left {
                self.nodes[grandpa as usize].right
            } else {
                self.nodes[grandpa as usize].left
            };

            if let Some(uncle) = uncle.filter(|&u| self.is_red(Some(u))) {
                self.set_red(uncle, false);
                self.set_red(parent, false);
                self.set_red(grandpa, true);
                node = grandpa;
                continue;
            }

            // Indirect line: bring the node in line with parent and grandparent
            let node_is_left = self.nodes[parent as usize].left == Some(node);
            if parent_is_left && !node_is_left {
                self.rotate_left(parent);
                std::mem::swap(&mut node, &mut parent);
            } else if !parent_is_left && node_is_left {
                self.rotate_right(parent);
                std::mem::swap(&mut node, &mut parent);
            }

            // Direct line
            self.set_red(parent, false);
            self.set_red(grandpa, true);
            if parent_is_left {
                self.rotate_right(grandpa);
            } else {
                self.rotate_left(grandpa);
            }
            return;
        }
    }

    /// Replace `old` by `new` in the link from `old`'s parent (or the root)
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            None => self.root = Some(new),
            Some(p) => {
                let p = &mut self.nodes[p as usize];
                if p.left == Some(old) {
                    p.left = Some(new);
                } else {
                    p.right = Some(new);
                }
            }
        }
    }

    fn rotate_left(&mut self, x: NodeId) {
        let Some(y) = self.nodes[x as usize].right else {
            return;
        };
        let inner = self.nodes[y as usize].left;
        let parent = self.nodes[x as usize].parent;

        self.nodes[x as usize].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner as usize].parent = Some(x);
        }
        self.nodes[y as usize].parent = parent;
        self.replace_child(parent, x, y);
        self.nodes[y as usize].left = Some(x);
        self.nodes[x as usize].parent = Some(y);
    }

    fn rotate_right(&mut self, x: NodeId) {
        let Some(y) = self.nodes[x as usize].left else {
            return;
        };
        let inner = self.nodes[y as usize].right;
        let parent = self.nodes[x as usize].parent;

        self.nodes[x as usize].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner as usize].parent = Some(x);
        }
        self.nodes[y as usize].parent = parent;
        self.replace_child(parent, x, y);
        self.nodes[y as usize].right = Some(x);
        self.nodes[x as usize].parent = Some(y);
    }
}

impl<V: Copy> Default for StringMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn copy_key(key: &[u8]) -> Result<Box<[u8]>> {
    let mut owned = Vec::new();
    owned
        .try_reserve_exact(key.len())
        .map_err(|_| crate::error::IndexError::allocation::<u8>(key.len()))?;
    owned.extend_from_slice(key);
    Ok(owned.into_boxed_slice())
}

/// In-order iterator over a [`StringMap`]
pub struct Iter<'a, V> {
    map: &'a StringMap<V>,
    next: Option<NodeId>,
}

impl<'a, V: Copy> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.map.successor(id);
        let node = &self.map.nodes[id as usize];
        Some((&*node.key, node.value))
    }
}
