// Indexed Skip List
//
// An ordered multiset over `T: Ord` that augments every forward pointer
// with a *span*: the number of base-level hops it bridges. Spans turn
// "where does this element rank" and "what element sits at this rank"
// into O(log n) traversals instead of O(n) scans, which is the whole
// point of reaching for a skip list here instead of a `BTreeSet` (which
// has no way to ask "what's the key at position k" without walking).
//
// The whole structure lives behind one `parking_lot::RwLock`. Readers
// (`rank_of`, `range`, `contains`, `len`, iteration) take a shared lock;
// writers (`add`, `remove`, `clear`) take an exclusive one. This is a
// deliberate simplification versus a lock-free design: span maintenance
// during insert/delete touches `O(log n)` nodes across multiple levels,
// and getting that right under concurrent, un-synchronized mutation is
// a much harder problem than the read/write ratio here justifies.
//
// Nodes live in an arena (`Vec<Option<Node<T>>>`) addressed by index
// rather than behind raw pointers, so the whole module is free of
// `unsafe`. Deleted slots are pushed onto a free list and reused by
// later inserts.

use parking_lot::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum height a node (or the head) can reach.
pub const MAX_LEVEL: usize = 32;

/// One forward pointer plus the span it bridges.
#[derive(Debug, Clone, Copy)]
struct Lane {
    /// Arena index of the next node at this level, or `None` at the tail.
    next: Option<usize>,
    /// Number of base-level hops from this lane's owner to `next`.
    span: u64,
}

impl Lane {
    const EMPTY: Lane = Lane { next: None, span: 0 };
}

struct Node<T> {
    value: T,
    forward: Vec<Lane>,
}

/// A predecessor reference during a descent: either the head sentinel
/// or a live arena slot.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Pred {
    Head,
    Node(usize),
}

/// Minimal xorshift64* generator for level selection.
///
/// `add` always runs under the write lock, so a single non-thread-safe
/// generator guarded by that same lock is sufficient; there is never a
/// concurrent caller of `next`.
struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    fn seeded() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9e3779b97f4a7c15);
        Self {
            state: nanos ^ 0xd1b54a32d192ed03,
        }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

struct Inner<T> {
    /// Head sentinel lanes, always `MAX_LEVEL` long.
    head: Vec<Lane>,
    arena: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    /// Current highest active level (1-based count of active lanes in `head`).
    level: usize,
    len: usize,
    rng: Xorshift64,
}

impl<T> Inner<T> {
    fn new() -> Self {
        Self {
            head: vec![Lane::EMPTY; MAX_LEVEL],
            arena: Vec::new(),
            free: Vec::new(),
            level: 1,
            len: 0,
            rng: Xorshift64::seeded(),
        }
    }

    fn lane(&self, pred: Pred, level: usize) -> Lane {
        match pred {
            Pred::Head => self.head[level],
            Pred::Node(idx) => self.arena[idx].as_ref().unwrap().forward[level],
        }
    }

    fn set_lane(&mut self, pred: Pred, level: usize, lane: Lane) {
        match pred {
            Pred::Head => self.head[level] = lane,
            Pred::Node(idx) => self.arena[idx].as_mut().unwrap().forward[level] = lane,
        }
    }

    fn value(&self, idx: usize) -> &T {
        &self.arena[idx].as_ref().unwrap().value
    }

    fn random_level(&mut self) -> usize {
        let mut height = 1;
        while height < MAX_LEVEL && self.rng.next() & 1 == 1 {
            height += 1;
        }
        height
    }

    fn alloc(&mut self, value: T, height: usize) -> usize {
        let node = Node {
            value,
            forward: vec![Lane::EMPTY; height],
        };
        if let Some(idx) = self.free.pop() {
            self.arena[idx] = Some(node);
            idx
        } else {
            self.arena.push(Some(node));
            self.arena.len() - 1
        }
    }

    /// Descend from the head, stopping at each level just before the
    /// first element that is `>= value`. Returns the predecessor and
    /// the rank of that predecessor (0 if it is the head) at every
    /// active level.
    fn descend(&self, value: &T) -> ([Pred; MAX_LEVEL], [u64; MAX_LEVEL])
    where
        T: Ord,
    {
        let mut update = [Pred::Head; MAX_LEVEL];
        let mut rank = [0u64; MAX_LEVEL];
        let mut pred = Pred::Head;
        let mut r = 0u64;

        for level in (0..self.level).rev() {
            loop {
                let lane = self.lane(pred, level);
                match lane.next {
                    Some(idx) if self.value(idx) < value => {
                        r += lane.span;
                        pred = Pred::Node(idx);
                    }
                    _ => break,
                }
            }
            update[level] = pred;
            rank[level] = r;
        }

        (update, rank)
    }
}

/// An ordered multiset of `T` supporting O(log n) rank-by-value,
/// value-by-rank, and range-by-rank queries.
///
/// Callers are responsible for uniqueness when it matters (the
/// leaderboard service never inserts a participant id that is already
/// present); inserting an element that compares equal to one already
/// present is not rejected, matching the "unspecified, caller ensures no
/// duplicates" contract this type is built against.
pub struct IndexedSkipList<T> {
    inner: RwLock<Inner<T>>,
}

impl<T> IndexedSkipList<T>
where
    T: Ord + Clone,
{
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::new()),
        }
    }

    /// Insert `value`. Expected O(log n).
    pub fn add(&self, value: T) {
        let mut inner = self.inner.write();
        let old_level = inner.level;
        let (mut update, mut rank) = inner.descend(&value);

        let height = inner.random_level();
        if height > old_level {
            let total = inner.len as u64;
            for j in old_level..height {
                update[j] = Pred::Head;
                rank[j] = 0;
                inner.head[j].span = total;
            }
            inner.level = height;
        }

        let rank0 = rank[0];
        let idx = inner.alloc(value, height);

        for i in 0..height {
            let old = inner.lane(update[i], i);
            let gap = rank0 - rank[i];
            inner.arena[idx].as_mut().unwrap().forward[i] = Lane {
                next: old.next,
                span: old.span - gap,
            };
            inner.set_lane(
                update[i],
                i,
                Lane {
                    next: Some(idx),
                    span: gap + 1,
                },
            );
        }

        for i in height..inner.level {
            let mut lane = inner.lane(update[i], i);
            lane.span += 1;
            inner.set_lane(update[i], i, lane);
        }

        inner.len += 1;
    }

    /// Remove the element equal to `value`, if present. Returns whether
    /// anything was removed. Expected O(log n).
    pub fn remove(&self, value: &T) -> bool {
        let mut inner = self.inner.write();
        let (update, _rank) = inner.descend(value);
        let level = inner.level;

        let target = match inner.lane(update[0], 0).next {
            Some(idx) if inner.value(idx) == value => idx,
            _ => return false,
        };

        for i in 0..level {
            let pred_lane = inner.lane(update[i], i);
            if pred_lane.next == Some(target) {
                let target_lane = inner.arena[target].as_ref().unwrap().forward[i];
                inner.set_lane(
                    update[i],
                    i,
                    Lane {
                        next: target_lane.next,
                        span: pred_lane.span + target_lane.span - 1,
                    },
                );
            } else {
                let mut lane = pred_lane;
                lane.span -= 1;
                inner.set_lane(update[i], i, lane);
            }
        }

        inner.arena[target] = None;
        inner.free.push(target);

        while inner.level > 1 && inner.head[inner.level - 1].next.is_none() {
            inner.level -= 1;
        }
        inner.len -= 1;
        true
    }

    /// 1-based rank of `value`, or `-1` if absent. Expected O(log n).
    pub fn rank_of(&self, value: &T) -> i64 {
        let inner = self.inner.read();
        let (update, rank) = inner.descend(value);
        match inner.lane(update[0], 0).next {
            Some(idx) if inner.value(idx) == value => (rank[0] + 1) as i64,
            _ => -1,
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.rank_of(value) != -1
    }

    /// Up to `count` elements starting at 0-based `start_index`, in
    /// ascending order. Empty if `start_index` or `count` is out of
    /// bounds; never panics on out-of-range input.
    pub fn range(&self, start_index: i64, count: i64) -> Vec<T> {
        if start_index < 0 || count <= 0 {
            return Vec::new();
        }
        let inner = self.inner.read();
        let start_index = start_index as u64;
        let mut traversed = 0u64;
        let mut pred = Pred::Head;

        for level in (0..inner.level).rev() {
            loop {
                let lane = inner.lane(pred, level);
                match lane.next {
                    Some(idx) if traversed + lane.span <= start_index => {
                        traversed += lane.span;
                        pred = Pred::Node(idx);
                    }
                    _ => break,
                }
            }
        }

        let mut out = Vec::new();
        let mut cur = inner.lane(pred, 0).next;
        while let Some(idx) = cur {
            if out.len() as i64 >= count {
                break;
            }
            let node = inner.arena[idx].as_ref().unwrap();
            out.push(node.value.clone());
            cur = node.forward[0].next;
        }
        out
    }

    /// Number of elements currently present.
    pub fn len(&self) -> usize {
        self.inner.read().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every element, resetting the structure to empty.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.head = vec![Lane::EMPTY; MAX_LEVEL];
        inner.arena.clear();
        inner.free.clear();
        inner.level = 1;
        inner.len = 0;
    }

    /// Snapshot of every element in ascending order.
    pub fn iter(&self) -> Vec<T> {
        let inner = self.inner.read();
        let mut out = Vec::with_capacity(inner.len);
        let mut cur = inner.head[0].next;
        while let Some(idx) = cur {
            let node = inner.arena[idx].as_ref().unwrap();
            out.push(node.value.clone());
            cur = node.forward[0].next;
        }
        out
    }

    pub fn stats(&self) -> SkipListStats {
        let inner = self.inner.read();
        SkipListStats {
            len: inner.len,
            level: inner.level,
        }
    }
}

impl<T> Default for IndexedSkipList<T>
where
    T: Ord + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Lightweight observability snapshot, useful for `/health`-style endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipListStats {
    pub len: usize,
    pub level: usize,
}
