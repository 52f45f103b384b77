//! Monte-Carlo tree search with UCB1 selection over the node arena.
//!
//! One search iteration runs the classic select/expand/simulate/
//! backpropagate pass as a single recursion from the root. Returned scores
//! are always expressed for the player about to move at the *caller's*
//! node, so every recursion level inverts the child's score exactly once.
//! The tree supports incremental root transplantation so statistics
//! accumulated for a position survive the real moves of a game.

use std::time::{Duration, Instant};

use crate::game_state::board::Board;
use crate::game_state::reversi_types::{Color, GameResult, Move, MAX_MOVE_NUM, WIN_SCORE};
use crate::search::node_arena::{Node, NodeArena, NodeHandle, NodeState};
use crate::utils::xorshift::Xorshift;

/// Visits a childless node must accumulate before it is expanded.
pub const DEFAULT_EXPANSION_THRESHOLD: u32 = 40;

/// Bounds for one [`UctTree::search`] call. The wall clock is polled once
/// per outer iteration, so an in-flight visit always completes and the
/// elapsed time may slightly overshoot `movetime`.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    pub max_iterations: u64,
    /// Cap on the root's total visit count.
    pub max_simulations: u32,
    pub movetime: Duration,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_iterations: u64::MAX,
            max_simulations: 32_000,
            movetime: Duration::from_millis(3_000),
        }
    }
}

/// Statistics snapshot of a single node.
#[derive(Debug, Clone, Copy)]
pub struct NodeInfo {
    pub mv: Move,
    pub visits: u32,
    pub score_sum: f32,
    pub value: f32,
    pub state: NodeState,
}

impl NodeInfo {
    fn from_node(node: &Node) -> Self {
        Self {
            mv: node.mv,
            visits: node.visits,
            score_sum: node.score_sum,
            value: node.value,
            state: node.state,
        }
    }
}

/// Immutable snapshot of the root and its immediate children, captured at
/// the end of a bounded search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub root: NodeInfo,
    pub children: Vec<NodeInfo>,
}

pub struct UctTree {
    arena: NodeArena,
    root: Option<NodeHandle>,
    expansion_threshold: u32,
    rng: Xorshift,
    move_buffer: [Move; MAX_MOVE_NUM],
}

impl UctTree {
    pub fn new(expansion_threshold: u32, pool_size: usize) -> Self {
        Self::with_rng(expansion_threshold, pool_size, Xorshift::from_entropy())
    }

    /// Construct with a caller-supplied rollout RNG for reproducible
    /// searches.
    pub fn with_rng(expansion_threshold: u32, pool_size: usize, rng: Xorshift) -> Self {
        Self {
            arena: NodeArena::with_capacity(pool_size),
            root: None,
            expansion_threshold,
            rng,
            move_buffer: [Move::pass(Color::Black); MAX_MOVE_NUM],
        }
    }

    /// Times the arena overflowed into orphan allocation.
    #[inline]
    pub fn saturation_events(&self) -> u64 {
        self.arena.saturation_events()
    }

    /// Snapshot of the current root, if any.
    pub fn root_info(&self) -> Option<NodeInfo> {
        self.root.map(|handle| NodeInfo::from_node(self.arena.get(handle)))
    }

    /// Rebuild the tree from scratch on `board`: every arena slot is
    /// reclaimed, a fresh root is allocated and expanded.
    pub fn set_root(&mut self, board: Board) {
        self.arena.clear();
        let root = self.arena.allocate();
        {
            let node = self.arena.get_mut(root);
            node.board = board;
            node.mv = Move::pass(board.side_to_move());
        }
        self.root = Some(root);
        self.expand(root);
    }

    /// Transplant the root to the direct child whose snapshot matches
    /// `board` (bitboards and side to move). The matched child is detached
    /// first, then the old root and every sibling subtree are freed, so
    /// the promoted statistics are never reclaimed. Returns `false` when
    /// no child matches; the caller then falls back to [`UctTree::set_root`].
    pub fn update_root(&mut self, board: &Board) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        let (children, count) = {
            let node = self.arena.get(root);
            (node.children, node.child_count as usize)
        };
        let mut matched = None;
        for (index, &child) in children[..count].iter().enumerate() {
            if self.arena.get(child).board.same_position(board) {
                matched = Some(index);
            }
        }
        let Some(index) = matched else {
            return false;
        };
        let new_root = children[index];
        {
            let node = self.arena.get_mut(root);
            for i in index..count - 1 {
                node.children[i] = node.children[i + 1];
            }
            node.children[count - 1] = NodeHandle::NULL;
            node.child_count -= 1;
        }
        self.arena.free_subtree(root);
        self.root = Some(new_root);
        if self.arena.get(new_root).child_count == 0 {
            self.expand(new_root);
        }
        true
    }

    /// Convenience form of [`UctTree::update_root`]: apply `mv` to the
    /// current root position and transplant to the resulting child.
    pub fn update_root_with_move(&mut self, mv: Move) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        let mut board = self.arena.get(root).board;
        if !board.is_legal_move(mv) {
            return false;
        }
        board.update(mv);
        self.update_root(&board)
    }

    /// Run bounded search iterations from the root and snapshot the
    /// result. Calling this before [`UctTree::set_root`] is a contract
    /// violation and fails fast.
    pub fn search(&mut self, limits: &SearchLimits) -> SearchResult {
        let root = self
            .root
            .expect("set_root must be called before searching");
        let started_at = Instant::now();
        let mut iterations: u64 = 0;
        while iterations < limits.max_iterations
            && self.arena.get(root).visits < limits.max_simulations
            && started_at.elapsed() < limits.movetime
        {
            self.visit_node(root);
            iterations += 1;
        }
        self.collect_result(root)
    }

    fn collect_result(&self, root: NodeHandle) -> SearchResult {
        let node = self.arena.get(root);
        let children = node.children[..node.child_count as usize]
            .iter()
            .map(|&child| NodeInfo::from_node(self.arena.get(child)))
            .collect();
        SearchResult {
            root: NodeInfo::from_node(node),
            children,
        }
    }

    /// One select/expand/simulate/backpropagate pass. The return value is
    /// the sampled score from the perspective of the player to move at the
    /// *caller's* node (`WIN_SCORE - score` at every level).
    fn visit_node(&mut self, handle: NodeHandle) -> f32 {
        self.arena.get_mut(handle).visits += 1;

        if self.arena.get(handle).state == NodeState::Undetermined {
            let board = self.arena.get(handle).board;
            let result = board.result(board.side_to_move());
            self.arena.get_mut(handle).state = if result == GameResult::NotEnd {
                NodeState::NonTerminal
            } else {
                NodeState::Terminal(result.score())
            };
        }

        if let NodeState::Terminal(fixed_score) = self.arena.get(handle).state {
            self.arena.get_mut(handle).add_score(fixed_score);
            return WIN_SCORE - fixed_score;
        }

        // Defer materializing a full ply of children until this state has
        // been sampled often enough to be worth expanding.
        if self.arena.get(handle).child_count == 0
            && self.arena.get(handle).visits > self.expansion_threshold
        {
            self.expand(handle);
        }

        let score = if self.arena.get(handle).child_count != 0 {
            let child = self.select_child(handle);
            self.visit_node(child)
        } else {
            let board = self.arena.get(handle).board;
            self.rollout(board)
        };
        self.arena.get_mut(handle).add_score(score);
        WIN_SCORE - score
    }

    /// UCB1 child selection. A zero-visit child dominates any finite
    /// score and is taken immediately; ties go to the first encountered.
    fn select_child(&self, parent: NodeHandle) -> NodeHandle {
        let node = self.arena.get(parent);
        let count = node.child_count as usize;
        debug_assert!(count > 0, "select_child requires children");
        if count == 1 || node.visits < 2 {
            return node.children[0];
        }
        let exploration = (2.0 * ((node.visits - 1) as f32).ln()).sqrt();
        let mut best = node.children[0];
        let mut best_score = f32::NEG_INFINITY;
        for &child_handle in &node.children[..count] {
            let child = self.arena.get(child_handle);
            if child.visits == 0 {
                return child_handle;
            }
            let ucb =
                (WIN_SCORE - child.value) + exploration * (1.0 / child.visits as f32).sqrt();
            if ucb > best_score {
                best_score = ucb;
                best = child_handle;
            }
        }
        best
    }

    /// Materialize one child per legal move of `handle`'s position. A
    /// terminal position yields no children.
    fn expand(&mut self, handle: NodeHandle) {
        let mut board = self.arena.get(handle).board;
        let count = board.next_moves(&mut self.move_buffer);
        for i in 0..count {
            let mv = self.move_buffer[i];
            let mut child_board = self.arena.get(handle).board;
            child_board.update(mv);
            let child = self.arena.allocate();
            {
                let node = self.arena.get_mut(child);
                node.board = child_board;
                node.mv = mv;
            }
            self.arena.get_mut(handle).children[i] = child;
        }
        self.arena.get_mut(handle).child_count = count as u8;
    }

    /// Play uniformly random moves to the end of the game and score the
    /// outcome for the player to move at the start of the rollout.
    fn rollout(&mut self, mut board: Board) -> f32 {
        let perspective = board.side_to_move();
        loop {
            let result = board.result(perspective);
            if result != GameResult::NotEnd {
                return result.score();
            }
            let count = board.next_moves(&mut self.move_buffer);
            let mv = self.move_buffer[self.rng.next_below(count as u32) as usize];
            board.update(mv);
        }
    }
}
