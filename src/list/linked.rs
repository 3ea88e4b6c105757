//! Doubly linked list backed by a [`NodeArena`].
//!
//! Stores list nodes in an arena and links them by [`NodeId`], giving
//! stable handles and O(1) push/pop/remove without pointer chasing. A
//! handle stays valid until its node is removed; afterwards the arena's
//! generation check catches use-after-free instead of aliasing a reused
//! slot.
//!
//! ## Architecture
//!
//! ```text
//!   arena (NodeArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ NodeId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//! ```
//!
//! ## Performance
//! - `push_front` / `push_back`: O(1)
//! - `pop_front` / `pop_back` / `remove`: O(1)
//! - `at` / `trim` / `iter`: O(n)
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::list::arena::{NodeArena, NodeId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

#[derive(Debug)]
/// Doubly linked list with stable, generation-checked node handles.
pub struct LinkedList<T> {
    arena: NodeArena<Node<T>>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl<T> LinkedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is currently a node in this list.
    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the front (oldest by `push_back` convention) value.
    pub fn front(&self) -> Option<&T> {
        self.head
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns the back (newest by `push_back` convention) value.
    pub fn back(&self) -> Option<&T> {
        self.tail
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns the handle of the front node.
    pub fn front_id(&self) -> Option<NodeId> {
        self.head
    }

    /// Returns the handle of the back node.
    pub fn back_id(&self) -> Option<NodeId> {
        self.tail
    }

    /// Returns the value for `id`, if the handle is live.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value for `id`, if live.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Returns the handle after `id`, if any.
    pub fn next_id(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|node| node.next)
    }

    /// Returns the handle before `id`, if any.
    pub fn prev_id(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|node| node.prev)
    }

    /// Inserts a new node at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> NodeId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        if let Some(head) = self.head {
            if let Some(node) = self.arena.get_mut(head) {
                node.prev = Some(id);
            }
        } else {
            self.tail = Some(id);
        }
        self.head = Some(id);
        id
    }

    /// Inserts a new node at the back and returns its handle.
    pub fn push_back(&mut self, value: T) -> NodeId {
        let id = self.arena.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        if let Some(tail) = self.tail {
            if let Some(node) = self.arena.get_mut(tail) {
                node.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        id
    }

    /// Inserts a new node after `anchor` and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` is stale or was never issued by this list.
    pub fn insert_after(&mut self, anchor: NodeId, value: T) -> NodeId {
        assert!(
            self.arena.contains(anchor),
            "node handle is stale or not in this list"
        );
        let next = self.next_id(anchor);
        let id = self.arena.insert(Node {
            value,
            prev: Some(anchor),
            next,
        });
        if let Some(node) = self.arena.get_mut(anchor) {
            node.next = Some(id);
        }
        match next {
            Some(next_id) => {
                if let Some(node) = self.arena.get_mut(next_id) {
                    node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        id
    }

    /// Inserts a new node before `anchor` and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` is stale or was never issued by this list.
    pub fn insert_before(&mut self, anchor: NodeId, value: T) -> NodeId {
        assert!(
            self.arena.contains(anchor),
            "node handle is stale or not in this list"
        );
        let prev = self.prev_id(anchor);
        let id = self.arena.insert(Node {
            value,
            prev,
            next: Some(anchor),
        });
        if let Some(node) = self.arena.get_mut(anchor) {
            node.prev = Some(id);
        }
        match prev {
            Some(prev_id) => {
                if let Some(node) = self.arena.get_mut(prev_id) {
                    node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        id
    }

    /// Removes and returns the front value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes the node `id` and returns its value.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or was never issued by this list — caller
    /// misuse, per the library's precondition rules.
    pub fn remove(&mut self, id: NodeId) -> T {
        assert!(
            self.arena.contains(id),
            "node handle is stale or not in this list"
        );
        self.detach(id);
        self.arena
            .remove(id)
            .map(|node| node.value)
            .expect("detached node missing from arena")
    }

    /// Returns the handle at logical index `i`.
    ///
    /// `i >= 0` walks from the front; `i < 0` walks from the back
    /// (`-1` = back). Returns `None` outside `[-len, len)`.
    pub fn at(&self, i: isize) -> Option<NodeId> {
        if i < 0 {
            return self.from_back((-i - 1) as usize);
        }
        let mut remaining = i as usize;
        if remaining >= self.len() {
            return None;
        }
        let mut current = self.head;
        while remaining > 0 {
            current = self.next_id(current?);
            remaining -= 1;
        }
        current
    }

    fn from_back(&self, i: usize) -> Option<NodeId> {
        if i >= self.len() {
            return None;
        }
        let mut current = self.tail;
        let mut remaining = i;
        while remaining > 0 {
            current = self.prev_id(current?);
            remaining -= 1;
        }
        current
    }

    /// Keeps only the nodes in `[start, end)`; negative indices count
    /// from the back. Trimmed nodes are freed and their handles
    /// invalidated.
    ///
    /// # Panics
    ///
    /// Panics when the resolved `start` exceeds `end`, or either index is
    /// outside the list — caller misuse, per the precondition rules.
    pub fn trim(&mut self, start: isize, end: isize) {
        let len = self.len() as isize;
        let abs_start = if start < 0 { len + start } else { start };
        let abs_end = if end < 0 { len + end } else { end };
        assert!(
            abs_start <= abs_end,
            "trim start index {start} is greater than end index {end}"
        );
        assert!(
            abs_start >= 0 && abs_end >= 0 && abs_start < len && abs_end <= len,
            "trim range [{start}, {end}) out of range for list of length {len}"
        );
        if abs_start == abs_end {
            self.clear();
            return;
        }
        for _ in 0..abs_start {
            self.pop_front();
        }
        for _ in 0..(len - abs_end) {
            self.pop_back();
        }
    }

    /// Pops front nodes while `pred` accepts them; returns the number
    /// removed.
    pub fn pop_front_while(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut removed = 0;
        while let Some(front) = self.front() {
            if !pred(front) {
                break;
            }
            self.pop_front();
            removed += 1;
        }
        removed
    }

    /// Pops back nodes while `pred` accepts them; returns the number
    /// removed.
    pub fn pop_back_while(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut removed = 0;
        while let Some(back) = self.back() {
            if !pred(back) {
                break;
            }
            self.pop_back();
            removed += 1;
        }
        removed
    }

    /// Iterates values front → back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Iterates handles front → back.
    pub fn iter_ids(&self) -> IdIter<'_, T> {
        IdIter {
            list: self,
            current: self.head,
        }
    }

    /// Clears the list and frees all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    fn detach(&mut self, id: NodeId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.arena.get_mut(prev_id) {
                prev_node.next = next;
            }
        } else {
            self.head = next;
        }

        if let Some(next_id) = next {
            if let Some(next_node) = self.arena.get_mut(next_id) {
                next_node.prev = prev;
            }
        } else {
            self.tail = prev;
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            assert!(seen.insert(id));
            let node = self.arena.get(id).expect("node missing");
            assert_eq!(node.prev, prev);
            if node.next.is_none() {
                assert_eq!(self.tail, Some(id));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(count, self.len());
    }
}

impl<T: Clone> LinkedList<T> {
    /// Builds a list from a slice, front to back.
    pub fn from_slice(values: &[T]) -> Self {
        let mut list = Self::with_capacity(values.len());
        for v in values {
            list.push_back(v.clone());
        }
        list
    }

    /// Materializes the values front → back.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed iterator over values, front → back.
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    current: Option<NodeId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

/// Borrowed iterator over handles, front → back.
pub struct IdIter<'a, T> {
    list: &'a LinkedList<T>,
    current: Option<NodeId>,
}

impl<T> Iterator for IdIter<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(id)
    }
}
