//! Associative priority queue.
//!
//! Payloads are kept in one FIFO subqueue per priority level. The queue always
//! serves the most extreme active level first (highest or lowest, depending on
//! the configured order) and falls back to the `Level::None` subqueue once no
//! valued level is left. Within a level, payloads leave in insertion order.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::marker::PhantomData;

use serde::Serialize;
use tracing::{debug, trace};

use crate::level::{Level, PriorityOrder};
use crate::queue::{Fifo, Queue};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelStats {
    pub level: u32,
    pub len: usize,
}

/// Point-in-time view of a priority queue, meant for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueStats {
    pub len: usize,
    pub top: Level,
    pub order: PriorityOrder,
    pub unprioritized: usize,
    pub levels: Vec<LevelStats>,
}

#[derive(Debug, Clone)]
pub struct PriorityQueue<T, Q = Queue<T>> {
    order: PriorityOrder,
    fixed_levels: Option<HashSet<u32>>,
    top: Level,
    active_levels: BTreeSet<u32>,
    subqueues: HashMap<Level, Q>,
    len: usize,
    _payload: PhantomData<T>,
}

impl<T> PriorityQueue<T> {
    /// Creates an empty queue backed by [`Queue`] subqueues.
    ///
    /// A non-empty `fixed_levels` restricts the accepted levels to its valid
    /// entries; zeros are dropped. Enqueues at any other level land in
    /// `Level::None`. An empty slice leaves levels unrestricted.
    pub fn new(order: PriorityOrder, fixed_levels: &[u32]) -> Self {
        Self::with_fifo(order, fixed_levels)
    }

    /// Same as [`PriorityQueue::new`] with the order given by name
    /// (`"highest first"` or `"lowest first"`). Unknown names mean highest first.
    pub fn with_order_name(order: &str, fixed_levels: &[u32]) -> Self {
        Self::new(PriorityOrder::from_name(order), fixed_levels)
    }
}

impl<T, Q: Fifo<T> + Default> PriorityQueue<T, Q> {
    /// Creates an empty queue storing each level in a `Q`.
    pub fn with_fifo(order: PriorityOrder, fixed_levels: &[u32]) -> Self {
        let fixed_levels = if fixed_levels.is_empty() {
            None
        } else {
            Some(
                fixed_levels
                    .iter()
                    .copied()
                    .filter(|level| Level::Value(*level).is_valid())
                    .collect(),
            )
        };

        let mut subqueues = HashMap::new();
        subqueues.insert(Level::None, Q::default());

        Self {
            order,
            fixed_levels,
            top: Level::None,
            active_levels: BTreeSet::new(),
            subqueues,
            len: 0,
            _payload: PhantomData,
        }
    }

    /// Adds a payload and returns the new total length.
    ///
    /// Invalid levels and levels outside the fixed set are demoted to
    /// `Level::None` instead of being rejected.
    pub fn enqueue(&mut self, payload: T, level: impl Into<Level>) -> usize {
        let level = self.admit(level.into());

        if let Level::Value(value) = level {
            let promote = match self.top {
                Level::None => true,
                Level::Value(top) => self.order.outranks(value, top),
            };
            if promote {
                self.top = level;
            }
        }

        self.subqueues
            .entry(level)
            .or_insert_with(|| {
                debug!(%level, "creating subqueue");
                Q::default()
            })
            .push(payload);
        self.len += 1;

        trace!(%level, len = self.len, "enqueued");
        self.len
    }

    /// Removes the payload at the head of the top level's subqueue.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        let top = self.top;
        let subqueue = self.subqueues.get_mut(&top)?;
        let payload = subqueue.pop()?;
        let drained = subqueue.is_empty();
        self.len -= 1;

        if let (Level::Value(value), true) = (top, drained) {
            self.subqueues.remove(&top);
            self.active_levels.remove(&value);
            self.top = self.extremum();
            debug!(level = %top, next = %self.top, "subqueue drained");
        }

        trace!(level = %top, len = self.len, "dequeued");
        Some(payload)
    }

    pub fn peek(&self) -> Option<&T> {
        self.subqueues.get(&self.top).and_then(|subqueue| subqueue.peek())
    }

    /// Flips between highest first and lowest first. Stored payloads are not
    /// moved; only the level served next changes.
    pub fn swap_priority_order(&mut self) {
        self.order = self.order.swapped();

        if self.top != Level::None {
            self.top = self.extremum();
        }
        debug!(order = %self.order, top = %self.top, "priority order swapped");
    }

    /// Empties the queue. Order and fixed levels are kept.
    pub fn reset(&mut self) {
        self.subqueues.clear();
        self.subqueues.insert(Level::None, Q::default());
        self.active_levels.clear();
        self.top = Level::None;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Level that the next `dequeue` serves.
    pub fn top(&self) -> Level {
        self.top
    }

    pub fn order(&self) -> PriorityOrder {
        self.order
    }

    /// Sorted fixed levels, or `None` when levels are unrestricted.
    pub fn fixed_levels(&self) -> Option<Vec<u32>> {
        self.fixed_levels.as_ref().map(|levels| {
            let mut levels: Vec<u32> = levels.iter().copied().collect();
            levels.sort_unstable();
            levels
        })
    }

    /// Non-empty valued levels in the order they will be served.
    pub fn active_levels(&self) -> Vec<u32> {
        match self.order {
            PriorityOrder::HighestFirst => self.active_levels.iter().rev().copied().collect(),
            PriorityOrder::LowestFirst => self.active_levels.iter().copied().collect(),
        }
    }

    /// Number of payloads waiting at `level`.
    pub fn level_len(&self, level: impl Into<Level>) -> usize {
        self.subqueues
            .get(&level.into())
            .map_or(0, |subqueue| subqueue.len())
    }

    pub fn stats(&self) -> QueueStats {
        QueueStats {
            len: self.len,
            top: self.top,
            order: self.order,
            unprioritized: self.level_len(Level::None),
            levels: self
                .active_levels()
                .into_iter()
                .map(|level| LevelStats {
                    level,
                    len: self.level_len(level),
                })
                .collect(),
        }
    }

    fn admit(&mut self, level: Level) -> Level {
        let value = match level {
            Level::None => return Level::None,
            Level::Value(value) => value,
        };

        if !level.is_valid() {
            debug!(%level, "invalid priority level, demoting to none");
            return Level::None;
        }

        if let Some(fixed) = &self.fixed_levels {
            if !fixed.contains(&value) {
                debug!(%level, "priority level not in fixed set, demoting to none");
                return Level::None;
            }
        }

        self.active_levels.insert(value);
        level
    }

    fn extremum(&self) -> Level {
        let extreme = match self.order {
            PriorityOrder::HighestFirst => self.active_levels.last(),
            PriorityOrder::LowestFirst => self.active_levels.first(),
        };

        extreme.copied().map_or(Level::None, Level::Value)
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new(PriorityOrder::default(), &[])
    }
}
