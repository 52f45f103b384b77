//! Fixed-capacity slot store for search-tree nodes.
//!
//! The tree allocates one node per simulation-threshold crossing, so nodes
//! are recycled through a preallocated arena instead of the heap. Slots are
//! addressed by index handles, never by reference. When every slot is in
//! use, allocation degrades to a detached orphan node that is dropped on
//! the next bulk clear; the search never fails outright on exhaustion.

use crate::game_state::board::Board;
use crate::game_state::reversi_types::{Color, Move, MAX_MOVE_NUM};

/// Index handle into a [`NodeArena`]. Handles at or past the arena
/// capacity refer to orphan nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(u32);

impl NodeHandle {
    /// Sentinel for an empty child slot.
    pub const NULL: NodeHandle = NodeHandle(u32::MAX);
}

/// Lazily evaluated terminal classification of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeState {
    /// Not yet checked against the board's terminal test.
    Undetermined,
    /// Checked: the game continues from here.
    NonTerminal,
    /// Checked: the game is over; the score is memoized and absorbing.
    Terminal(f32),
}

/// One search-tree vertex. Owned exclusively by its parent through the
/// arena; the tree never forms cycles.
#[derive(Debug, Clone)]
pub struct Node {
    pub board: Board,
    pub mv: Move,
    pub children: [NodeHandle; MAX_MOVE_NUM],
    pub child_count: u8,
    pub visits: u32,
    pub score_sum: f32,
    pub value: f32,
    pub state: NodeState,
}

impl Node {
    fn blank() -> Self {
        Self {
            board: Board::empty(),
            mv: Move::pass(Color::Black),
            children: [NodeHandle::NULL; MAX_MOVE_NUM],
            child_count: 0,
            visits: 0,
            score_sum: 0.0,
            value: 0.0,
            state: NodeState::Undetermined,
        }
    }

    /// Clear the statistics fields on reallocation. The board and move are
    /// left stale; the allocator's caller always overwrites them.
    fn reset_statistics(&mut self) {
        self.child_count = 0;
        self.visits = 0;
        self.score_sum = 0.0;
        self.value = 0.0;
        self.state = NodeState::Undetermined;
    }

    /// Fold one simulation score into the running mean.
    #[inline]
    pub fn add_score(&mut self, score: f32) {
        self.score_sum += score;
        self.value = self.score_sum / self.visits as f32;
    }
}

pub struct NodeArena {
    slots: Vec<Node>,
    used: Vec<bool>,
    cursor: usize,
    orphans: Vec<Node>,
    saturation_events: u64,
}

impl NodeArena {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: vec![Node::blank(); capacity],
            used: vec![false; capacity],
            cursor: 0,
            orphans: Vec::new(),
            saturation_events: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slot-backed nodes currently live.
    pub fn used_count(&self) -> usize {
        self.used.iter().filter(|used| **used).count()
    }

    /// Times allocation had to fall back to an orphan node.
    #[inline]
    pub fn saturation_events(&self) -> u64 {
        self.saturation_events
    }

    #[inline]
    pub fn is_used(&self, handle: NodeHandle) -> bool {
        let index = handle.0 as usize;
        index >= self.capacity() || self.used[index]
    }

    #[inline]
    pub fn get(&self, handle: NodeHandle) -> &Node {
        let index = handle.0 as usize;
        if index < self.slots.len() {
            &self.slots[index]
        } else {
            &self.orphans[index - self.slots.len()]
        }
    }

    #[inline]
    pub fn get_mut(&mut self, handle: NodeHandle) -> &mut Node {
        let index = handle.0 as usize;
        if index < self.slots.len() {
            &mut self.slots[index]
        } else {
            &mut self.orphans[index - self.slots.len()]
        }
    }

    /// Claim a free slot, scanning circularly from the position after the
    /// last issued index. A full-circle scan without a free slot records a
    /// saturation event and escapes to an orphan node instead of failing.
    pub fn allocate(&mut self) -> NodeHandle {
        let capacity = self.slots.len();
        let start = self.cursor;
        loop {
            let index = self.cursor;
            self.cursor += 1;
            if self.cursor == capacity {
                self.cursor = 0;
            }
            if !self.used[index] {
                self.used[index] = true;
                self.slots[index].reset_statistics();
                return NodeHandle(index as u32);
            }
            if self.cursor == start {
                self.saturation_events += 1;
                let mut orphan = Node::blank();
                orphan.reset_statistics();
                self.orphans.push(orphan);
                return NodeHandle((capacity + self.orphans.len() - 1) as u32);
            }
        }
    }

    /// Return one node to the arena. Orphans are silently dropped (their
    /// storage is reclaimed on the next [`NodeArena::clear`]).
    pub fn free(&mut self, handle: NodeHandle) {
        let index = handle.0 as usize;
        if index < self.slots.len() {
            self.used[index] = false;
        }
    }

    /// Recursively free a node and its whole subtree. Depth is bounded by
    /// the game length, so plain recursion is safe.
    pub fn free_subtree(&mut self, handle: NodeHandle) {
        let node = self.get(handle);
        let child_count = node.child_count as usize;
        let children = node.children;
        for &child in &children[..child_count] {
            self.free_subtree(child);
        }
        self.free(handle);
    }

    /// Mark every slot free and drop accumulated orphans. Used whenever
    /// the tree is rebuilt from an unrelated position.
    pub fn clear(&mut self) {
        for used in &mut self.used {
            *used = false;
        }
        self.cursor = 0;
        self.orphans.clear();
    }
}
