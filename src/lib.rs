//! A probabilistic skiplist that also knows the rank of every element.
//!
//! Next to the usual forward links, every level of every node stores the
//! number of elements its link jumps over. That width lets positional
//! queries ([`SkipList::at`], [`SkipList::delete_at`]) skip whole runs of
//! elements instead of walking the bottom level, so they cost expected
//! O(log n) like search, insert and delete.
//!
//! ```
//! use rank_skiplist::SkipList;
//!
//! let mut sk = SkipList::new();
//! for i in &[3, 2, 4, 1] {
//!     sk.insert(*i);
//! }
//! assert_eq!(sk.at(0), Ok(&1));
//! sk.delete(&2);
//! assert_eq!(sk.search(&2), None);
//! assert_eq!(sk.iter().cloned().collect::<Vec<_>>(), vec![1, 3, 4]);
//! ```
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::ops::Index;

mod comparator;
mod error;
mod iter;
mod level;
#[cfg(feature = "serde_support")]
mod serde;

pub use crate::comparator::{Comparator, Natural, Reversed};
pub use crate::error::{Result, SkipListError};
pub use crate::iter::{IntoIter, Iter};
pub use crate::level::Options;

use crate::level::{LevelGenerator, MAX_LEVEL};

pub(crate) type NodeId = usize;

/// One level of a node: where it jumps to, and how many ranks the jump covers.
///
/// For a lane at the end of its level (`next == None`) the width is the
/// number of elements after the lane's owner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Lane {
    pub(crate) next: Option<NodeId>,
    pub(crate) width: usize,
}

impl Lane {
    const EMPTY: Lane = Lane {
        next: None,
        width: 0,
    };
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    // Sized once at creation, a node never changes height.
    pub(crate) lanes: Box<[Lane]>,
}

/// Either the head sentinel or a real node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pos {
    Head,
    Node(NodeId),
}

/// Result of a descent: the last position visited on each level, and the
/// one-based position (head = 0) it sits at.
struct Path {
    preds: [Pos; MAX_LEVEL],
    ranks: [usize; MAX_LEVEL],
}

impl Path {
    fn new() -> Self {
        Path {
            preds: [Pos::Head; MAX_LEVEL],
            ranks: [0; MAX_LEVEL],
        }
    }
}

/// An ordered set with expected O(log n) search, insert, delete and
/// access by rank.
///
/// Elements are kept unique under the comparator `C`: inserting an element
/// equal to one already present replaces it. Nodes live in an arena and
/// link to each other through indices, so removal frees a node right away
/// and the slot is reused by later insertions.
#[derive(Clone)]
pub struct SkipList<T, C = Natural> {
    head: [Lane; MAX_LEVEL],
    nodes: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
    level: usize,
    len: usize,
    cmp: C,
    levels: LevelGenerator,
}

impl<T: Ord> SkipList<T> {
    /// Make an empty skiplist ordered by `T`'s `Ord`.
    pub fn new() -> SkipList<T> {
        SkipList::with_comparator(Natural)
    }
}

impl<T: Ord> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> SkipList<T, C> {
    /// Number of elements, O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Iterate over all elements in order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.head[0].next, self.len)
    }

    /// Remove every element. The comparator and level settings are kept.
    pub fn clear(&mut self) {
        self.head = [Lane::EMPTY; MAX_LEVEL];
        self.nodes.clear();
        self.free.clear();
        self.level = 1;
        self.len = 0;
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node<T> {
        match &self.nodes[id] {
            Some(node) => node,
            None => unreachable!("link to free slot {}", id),
        }
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.nodes[id] {
            Some(node) => node,
            None => unreachable!("link to free slot {}", id),
        }
    }

    #[inline]
    fn lane(&self, pos: Pos, level: usize) -> Lane {
        match pos {
            Pos::Head => self.head[level],
            Pos::Node(id) => self.node(id).lanes[level],
        }
    }

    #[inline]
    fn lane_mut(&mut self, pos: Pos, level: usize) -> &mut Lane {
        match pos {
            Pos::Head => &mut self.head[level],
            Pos::Node(id) => &mut self.node_mut(id).lanes[level],
        }
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node<T> {
        match self.nodes[id].take() {
            Some(node) => {
                self.free.push(id);
                node
            }
            None => unreachable!("double free of slot {}", id),
        }
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            Err(SkipListError::IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Descend by rank alone, stopping on each level at the last position
    /// strictly before rank `index`.
    fn path_to_rank(&self, index: usize) -> Path {
        let mut path = Path::new();
        let mut pos = Pos::Head;
        let mut rank = 0;
        for level in (0..self.level).rev() {
            loop {
                let lane = self.lane(pos, level);
                match lane.next {
                    Some(next) if rank + lane.width <= index => {
                        rank += lane.width;
                        pos = Pos::Node(next);
                    }
                    _ => break,
                }
            }
            path.preds[level] = pos;
            path.ranks[level] = rank;
        }
        path
    }

    /// Unlink `target` using the predecessors in `preds`, trim empty top
    /// levels and hand back the node's value.
    fn unlink(&mut self, preds: &[Pos; MAX_LEVEL], target: NodeId) -> T {
        for level in 0..self.level {
            let pred = self.lane(preds[level], level);
            if pred.next == Some(target) {
                let skipped = self.node(target).lanes[level];
                *self.lane_mut(preds[level], level) = Lane {
                    next: skipped.next,
                    width: pred.width + skipped.width - 1,
                };
            } else {
                self.lane_mut(preds[level], level).width -= 1;
            }
        }
        while self.level > 1 && self.head[self.level - 1].next.is_none() {
            self.level -= 1;
            self.head[self.level] = Lane::EMPTY;
        }
        self.len -= 1;
        self.release(target).value
    }

    /// Get the element at rank `index`, O(log n) expected.
    ///
    /// ```
    /// use rank_skiplist::{SkipList, SkipListError};
    ///
    /// let sk: SkipList<u32> = (10..15).collect();
    /// assert_eq!(sk.at(2), Ok(&12));
    /// assert_eq!(sk.at(5), Err(SkipListError::IndexOutOfRange { index: 5, len: 5 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        let target = index + 1;
        let mut pos = Pos::Head;
        let mut rank = 0;
        for level in (0..self.level).rev() {
            loop {
                let lane = self.lane(pos, level);
                match lane.next {
                    Some(next) if rank + lane.width <= target => {
                        rank += lane.width;
                        pos = Pos::Node(next);
                    }
                    _ => break,
                }
            }
            if rank == target {
                break;
            }
        }
        match pos {
            Pos::Node(id) => Ok(&self.node(id).value),
            Pos::Head => unreachable!("rank {} not reached", index),
        }
    }

    /// Remove and return the element at rank `index`.
    pub fn delete_at(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        let path = self.path_to_rank(index);
        match self.lane(path.preds[0], 0).next {
            Some(target) => Ok(self.unlink(&path.preds, target)),
            None => unreachable!("rank {} not reached", index),
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.head[0].next.map(|id| &self.node(id).value)
    }

    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.at(i).ok())
    }

    /// Remove the smallest element.
    pub fn pop_first(&mut self) -> Option<T> {
        self.delete_at(0).ok()
    }

    /// Remove the largest element.
    pub fn pop_last(&mut self) -> Option<T> {
        self.len.checked_sub(1).and_then(|i| self.delete_at(i).ok())
    }
}

impl<T, C: Comparator<T>> SkipList<T, C> {
    /// Make an empty skiplist ordered by `cmp`.
    ///
    /// ```
    /// use rank_skiplist::SkipList;
    ///
    /// let mut sk = SkipList::with_comparator(|a: &String, b: &String| {
    ///     a.to_lowercase().cmp(&b.to_lowercase())
    /// });
    /// sk.insert("Hello".to_string());
    /// sk.insert("go".to_string());
    /// assert_eq!(sk.at(0).unwrap(), "go");
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_options(cmp, Options::default())
    }

    pub fn with_options(cmp: C, options: Options) -> Self {
        Self::with_generator(cmp, LevelGenerator::new(options))
    }

    fn with_generator(cmp: C, levels: LevelGenerator) -> Self {
        SkipList {
            head: [Lane::EMPTY; MAX_LEVEL],
            nodes: Vec::new(),
            free: Vec::new(),
            level: 1,
            len: 0,
            cmp,
            levels,
        }
    }

    #[inline]
    fn is_less(&self, id: NodeId, value: &T) -> bool {
        self.cmp.compare(&self.node(id).value, value) == Ordering::Less
    }

    #[inline]
    fn is_equal(&self, id: NodeId, value: &T) -> bool {
        self.cmp.compare(&self.node(id).value, value) == Ordering::Equal
    }

    /// Descend by value, stopping on each level at the last node ordered
    /// strictly before `value`.
    fn path_to(&self, value: &T) -> Path {
        let mut path = Path::new();
        let mut pos = Pos::Head;
        let mut rank = 0;
        for level in (0..self.level).rev() {
            loop {
                let lane = self.lane(pos, level);
                match lane.next {
                    Some(next) if self.is_less(next, value) => {
                        rank += lane.width;
                        pos = Pos::Node(next);
                    }
                    _ => break,
                }
            }
            path.preds[level] = pos;
            path.ranks[level] = rank;
        }
        path
    }

    /// Find the stored element equal to `value`.
    ///
    /// The stored element is returned because the comparator may only look
    /// at part of it.
    pub fn search(&self, value: &T) -> Option<&T> {
        let mut pos = Pos::Head;
        let top = (self.level - 1).min(self.levels.entry_level(self.len));
        for level in (0..=top).rev() {
            while let Some(next) = self.lane(pos, level).next {
                if !self.is_less(next, value) {
                    break;
                }
                pos = Pos::Node(next);
            }
        }
        match self.lane(pos, 0).next {
            Some(next) if self.is_equal(next, value) => Some(&self.node(next).value),
            _ => None,
        }
    }

    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Rank of `value`, if present.
    ///
    /// ```
    /// use rank_skiplist::SkipList;
    ///
    /// let sk: SkipList<u32> = vec![30, 10, 20].into_iter().collect();
    /// assert_eq!(sk.index_of(&20), Some(1));
    /// assert_eq!(sk.index_of(&25), None);
    /// ```
    pub fn index_of(&self, value: &T) -> Option<usize> {
        let path = self.path_to(value);
        match self.lane(path.preds[0], 0).next {
            Some(next) if self.is_equal(next, value) => Some(path.ranks[0]),
            _ => None,
        }
    }

    /// Insert `value`, replacing and returning an equal element if there
    /// was one.
    pub fn insert(&mut self, value: T) -> Option<T> {
        let mut path = self.path_to(&value);
        if let Some(next) = self.lane(path.preds[0], 0).next {
            if self.is_equal(next, &value) {
                return Some(mem::replace(&mut self.node_mut(next).value, value));
            }
        }

        let height = self.levels.random_level(self.len);
        if height > self.level {
            for level in self.level..height {
                // New levels span the whole list in one jump.
                self.head[level] = Lane {
                    next: None,
                    width: self.len,
                };
                path.preds[level] = Pos::Head;
                path.ranks[level] = 0;
            }
            self.level = height;
        }

        let rank = path.ranks[0];
        let mut lanes = vec![Lane::EMPTY; height].into_boxed_slice();
        for (level, lane) in lanes.iter_mut().enumerate() {
            let pred = self.lane(path.preds[level], level);
            *lane = Lane {
                next: pred.next,
                width: pred.width - (rank - path.ranks[level]),
            };
        }
        let id = self.alloc(Node { value, lanes });
        for level in 0..height {
            *self.lane_mut(path.preds[level], level) = Lane {
                next: Some(id),
                width: rank - path.ranks[level] + 1,
            };
        }
        for level in height..self.level {
            self.lane_mut(path.preds[level], level).width += 1;
        }
        self.len += 1;
        None
    }

    /// Remove and return the element equal to `value`. No-op if absent.
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let path = self.path_to(value);
        match self.lane(path.preds[0], 0).next {
            Some(target) if self.is_equal(target, value) => Some(self.unlink(&path.preds, target)),
            _ => None,
        }
    }

    /// Overwrite the element at `index`, returning the old one.
    ///
    /// `value` must order strictly between the elements at `index - 1`
    /// and `index + 1`, otherwise the list is left untouched and
    /// [`SkipListError::OrderingViolation`] is returned.
    pub fn update_at(&mut self, index: usize, value: T) -> Result<T> {
        self.check_index(index)?;
        let path = self.path_to_rank(index);
        let pred = path.preds[0];
        let target = match self.lane(pred, 0).next {
            Some(target) => target,
            None => unreachable!("rank {} not reached", index),
        };
        let after_pred = match pred {
            Pos::Head => true,
            Pos::Node(id) => self.is_less(id, &value),
        };
        let before_succ = match self.node(target).lanes[0].next {
            Some(succ) => self.cmp.compare(&value, &self.node(succ).value) == Ordering::Less,
            None => true,
        };
        if !(after_pred && before_succ) {
            return Err(SkipListError::OrderingViolation { index });
        }
        Ok(mem::replace(&mut self.node_mut(target).value, value))
    }

    /// Copy the elements into a new skiplist with the opposite order.
    ///
    /// The result owns its own nodes; mutating one list never affects the
    /// other.
    pub fn reversed(&self) -> SkipList<T, Reversed<C>>
    where
        T: Clone,
        C: Clone,
    {
        let mut reversed = SkipList::with_generator(Reversed(self.cmp.clone()), self.levels.clone());
        reversed.extend(self.iter().cloned());
        reversed
    }

    /// Move the elements into a new skiplist with the opposite order,
    /// without cloning them.
    pub fn into_reversed(self) -> SkipList<T, Reversed<C>> {
        let SkipList {
            head,
            nodes,
            len,
            cmp,
            levels,
            ..
        } = self;
        let mut reversed = SkipList::with_generator(Reversed(cmp), levels);
        reversed.extend(IntoIter::new(nodes, head[0].next, len));
        reversed
    }
}

impl<T, C: Comparator<T>> Extend<T> for SkipList<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for SkipList<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sk = SkipList::with_comparator(C::default());
        sk.extend(iter);
        sk
    }
}

impl<T, C: Comparator<T> + Default> From<Vec<T>> for SkipList<T, C> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T, C> IntoIterator for SkipList<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.nodes, self.head[0].next, self.len)
    }
}

impl<'a, T, C> IntoIterator for &'a SkipList<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> Index<usize> for SkipList<T, C> {
    type Output = T;

    /// Panics when `index >= len`, like slice indexing.
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T: PartialEq, C, D> PartialEq<SkipList<T, D>> for SkipList<T, C> {
    fn eq(&self, other: &SkipList<T, D>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for SkipList<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for SkipList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SkipList(level: {}, len: {}), and table:", self.level, self.len)?;
        for level in (0..self.level).rev() {
            write!(f, "{:>2}: head", level)?;
            let mut lane = self.head[level];
            while let Some(next) = lane.next {
                let node = self.node(next);
                write!(f, " -{}-> {:?}", lane.width, node.value)?;
                lane = node.lanes[level];
            }
            writeln!(f, " -{}-> end", lane.width)?;
        }
        Ok(())
    }
}
