//! Monte Carlo Tree Search (MCTS) with UCB1 selection and heuristic rollouts.
//!
//! Each simulation:
//! - descends through fully expanded nodes by UCB1,
//! - expands one untried move,
//! - plays a heuristic rollout from the new node,
//! - adds the rollout value to every node on the path back to the root.
//!
//! Values are always relative to the side to move at the root and are not
//! negated between levels. The tree is an arena of nodes addressed by
//! index; parent links are plain indices and the arena is dropped as a whole.

use std::time::{Duration, Instant};

use log::debug;

use crate::board::{Board, Color, Move};
use crate::constants::{ROLLOUT_DEPTH, UCB_EPSILON, UCB_EXPLORATION};
use crate::deepening::deadline_after;
use crate::playout::rollout;

/// Index of a node in a [`SearchTree`].
pub type NodeId = usize;

/// A node in the MCTS search tree.
pub struct SearchNode {
    /// The position at this node
    pub board: Board,
    /// Side to move at this node
    pub to_move: Color,
    /// Move that produced this node (`None` at the root)
    pub mv: Option<Move>,
    /// Parent node (`None` at the root)
    pub parent: Option<NodeId>,
    /// Expanded children
    pub children: Vec<NodeId>,
    /// Legal moves not yet expanded, in reverse enumeration order
    untried: Vec<Move>,
    /// Number of simulations through this node
    pub visits: u32,
    /// Sum of rollout values through this node
    pub wins: f64,
}

impl SearchNode {
    fn new(board: Board, to_move: Color, mv: Option<Move>, parent: Option<NodeId>) -> Self {
        let mut untried = board.legal_moves(to_move);
        untried.reverse();
        Self {
            board,
            to_move,
            mv,
            parent,
            children: Vec::new(),
            untried,
            visits: 0,
            wins: 0.0,
        }
    }

    /// Moves still waiting to be expanded.
    pub fn untried(&self) -> usize {
        self.untried.len()
    }

    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Average rollout value, or -0.1 if never visited.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.visits > 0 {
            self.wins / self.visits as f64
        } else {
            -0.1
        }
    }
}

/// Arena-backed search tree. Node 0 is the root.
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    root_side: Color,
}

impl SearchTree {
    /// Create a tree rooted at a private copy of `board`.
    pub fn new(board: &Board, to_move: Color) -> Self {
        Self {
            nodes: vec![SearchNode::new(board.clone(), to_move, None, None)],
            root_side: to_move,
        }
    }

    pub const ROOT: NodeId = 0;

    pub fn root(&self) -> &SearchNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root_side(&self) -> Color {
        self.root_side
    }

    /// UCB1 value of `child` under a parent visited `parent_visits` times.
    fn ucb1(&self, child: &SearchNode, parent_visits: u32) -> f64 {
        let visits = child.visits as f64 + UCB_EPSILON;
        let exploit = child.wins / visits;
        let explore = (2.0 * (parent_visits as f64 + 1.0).ln() / visits).sqrt();
        exploit + UCB_EXPLORATION * explore
    }

    /// Child of `id` with the highest UCB1 value, ties going to the more
    /// visited child.
    fn select_child(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id];
        let mut best: Option<(f64, u32, NodeId)> = None;
        for &child_id in &node.children {
            let child = &self.nodes[child_id];
            let value = self.ucb1(child, node.visits);
            let better = match best {
                None => true,
                Some((v, n, _)) => value > v || (value == v && child.visits > n),
            };
            if better {
                best = Some((value, child.visits, child_id));
            }
        }
        best.map(|(_, _, id)| id)
    }

    /// Descend from the root through fully expanded nodes.
    fn select(&self) -> NodeId {
        let mut id = Self::ROOT;
        loop {
            let node = &self.nodes[id];
            if !node.is_fully_expanded() || node.children.is_empty() {
                return id;
            }
            match self.select_child(id) {
                Some(child) => id = child,
                None => return id,
            }
        }
    }

    /// Expand the next untried move of `id`, returning the new child, or
    /// `id` itself when nothing is left to expand.
    fn expand(&mut self, id: NodeId) -> NodeId {
        let Some(mv) = self.nodes[id].untried.pop() else {
            return id;
        };
        let parent = &self.nodes[id];
        let mut board = parent.board.clone();
        board.apply_move(mv, parent.to_move);
        let child = SearchNode::new(board, parent.to_move.opponent(), Some(mv), Some(id));

        let child_id = self.nodes.len();
        self.nodes.push(child);
        self.nodes[id].children.push(child_id);
        child_id
    }

    /// Add `value` to `id` and every ancestor.
    fn backpropagate(&mut self, id: NodeId, value: f64) {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &mut self.nodes[id];
            node.visits += 1;
            node.wins += value;
            current = node.parent;
        }
    }

    /// Run one selection / expansion / rollout / backpropagation cycle.
    pub fn simulate(&mut self, rng: &mut fastrand::Rng, rollout_depth: usize) {
        let leaf = self.select();
        let leaf = self.expand(leaf);
        let node = &self.nodes[leaf];
        let value = rollout(&node.board, node.to_move, self.root_side, rollout_depth, rng);
        self.backpropagate(leaf, value);
    }

    /// Move of the most visited root child; the earliest expanded wins ties.
    pub fn best_move(&self) -> Option<Move> {
        let mut best: Option<&SearchNode> = None;
        for &id in &self.root().children {
            let child = &self.nodes[id];
            if best.is_none_or(|b| child.visits > b.visits) {
                best = Some(child);
            }
        }
        best.and_then(|c| c.mv)
    }
}

/// MCTS engine: the random source plus its budget knobs.
pub struct Mcts {
    rng: fastrand::Rng,
    rollout_depth: usize,
    max_simulations: Option<u32>,
}

impl Default for Mcts {
    fn default() -> Self {
        Self::new()
    }
}

impl Mcts {
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Create an engine with reproducible tie-breaking.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            rng,
            rollout_depth: ROLLOUT_DEPTH,
            max_simulations: None,
        }
    }

    /// Stop after `sims` simulations even if time remains.
    pub fn with_max_simulations(mut self, sims: Option<u32>) -> Self {
        self.max_simulations = sims;
        self
    }

    pub fn with_rollout_depth(mut self, depth: usize) -> Self {
        self.rollout_depth = depth;
        self
    }

    /// Grow a tree for `side` until `budget` elapses or the simulation cap
    /// is reached, checking the clock once per simulation.
    pub fn tree_search(&mut self, board: &Board, side: Color, budget: Duration) -> SearchTree {
        let start = Instant::now();
        let deadline = deadline_after(start, budget);
        let mut tree = SearchTree::new(board, side);

        let mut sims = 0u32;
        while Instant::now() < deadline {
            if self.max_simulations.is_some_and(|max| sims >= max) {
                break;
            }
            tree.simulate(&mut self.rng, self.rollout_depth);
            sims += 1;
        }

        debug!(
            "mcts: {sims} simulations, {} nodes in {:?}",
            tree.len(),
            start.elapsed()
        );
        tree
    }

    /// Pick a move for `side` within `budget`.
    ///
    /// Returns the most visited root child. Falls back to a uniformly random
    /// legal move when the root was never expanded, and to `None` when
    /// `side` has no legal move.
    pub fn decide(&mut self, board: &Board, side: Color, budget: Duration) -> Option<Move> {
        let tree = self.tree_search(board, side, budget);
        if log::log_enabled!(log::Level::Debug) {
            dump_children(&tree);
        }
        tree.best_move().or_else(|| {
            let legal = board.legal_moves(side);
            if legal.is_empty() {
                None
            } else {
                Some(legal[self.rng.usize(..legal.len())])
            }
        })
    }
}

/// Log statistics for the root's children.
pub fn dump_children(tree: &SearchTree) {
    for &id in &tree.root().children {
        let child = tree.node(id);
        if let Some(mv) = child.mv {
            debug!(
                "move {mv} v={} w={:.1} wr={:.3}",
                child.visits,
                child.wins,
                child.winrate()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_simulations_expand_in_order() {
        let board = Board::standard(8).unwrap();
        let legal = board.legal_moves(Color::Black);
        let mut tree = SearchTree::new(&board, Color::Black);
        let mut rng = fastrand::Rng::with_seed(1);

        for _ in 0..legal.len() {
            tree.simulate(&mut rng, 4);
        }
        let expanded: Vec<Move> = tree
            .root()
            .children
            .iter()
            .filter_map(|&id| tree.node(id).mv)
            .collect();
        assert_eq!(expanded, legal);
        assert!(tree.root().is_fully_expanded());
    }

    #[test]
    fn test_visit_accumulation() {
        let board = Board::standard(6).unwrap();
        let mut tree = SearchTree::new(&board, Color::Black);
        let mut rng = fastrand::Rng::with_seed(2);
        let n = 60;
        for _ in 0..n {
            tree.simulate(&mut rng, 8);
        }

        assert_eq!(tree.root().visits, n);
        let child_sum: u32 = tree.root().children.iter().map(|&id| tree.node(id).visits).sum();
        assert_eq!(child_sum, n);

        // each node: own visits = children's visits + direct rollouts (at most one per node
        // unless it has no legal moves)
        for id in 0..tree.len() {
            let node = tree.node(id);
            let below: u32 = node.children.iter().map(|&c| tree.node(c).visits).sum();
            assert!(node.visits >= below);
            assert!((0.0..=node.visits as f64).contains(&node.wins));
        }
    }

    #[test]
    fn test_parent_links() {
        let board = Board::standard(6).unwrap();
        let mut tree = SearchTree::new(&board, Color::White);
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..30 {
            tree.simulate(&mut rng, 4);
        }
        assert_eq!(tree.root_side(), Color::White);
        assert_eq!(tree.root().parent, None);
        for id in 1..tree.len() {
            let node = tree.node(id);
            let parent = tree.node(node.parent.unwrap());
            assert!(parent.children.contains(&id));
            assert_eq!(node.to_move, parent.to_move.opponent());
        }
    }

    #[test]
    fn test_no_legal_moves() {
        let board = Board::parse(
            "B B
             B B",
        )
        .unwrap();
        let mut mcts = Mcts::with_seed(4).with_max_simulations(Some(5));
        let tree = mcts.tree_search(&board, Color::White, Duration::from_secs(1));
        assert!(tree.root().children.is_empty());
        assert_eq!(tree.root().visits, 5);
        assert_eq!(mcts.decide(&board, Color::White, Duration::from_millis(10)), None);
    }

    #[test]
    fn test_zero_budget_returns_random_legal_move() {
        let board = Board::standard(8).unwrap();
        let mut mcts = Mcts::with_seed(5);
        let mv = mcts.decide(&board, Color::Black, Duration::ZERO).unwrap();
        assert!(board.legal_moves(Color::Black).contains(&mv));
    }

    #[test]
    fn test_shallow_rollouts() {
        let board = Board::standard(8).unwrap();
        let mut mcts = Mcts::with_seed(7)
            .with_rollout_depth(1)
            .with_max_simulations(Some(30));
        let tree = mcts.tree_search(&board, Color::Black, Duration::MAX);
        assert_eq!(tree.root().visits, 30);
        // one reply to an opening move can only flip one disc, leaving a tie
        assert!(tree.root().wins > 0.0);
        let mv = mcts.decide(&board, Color::Black, Duration::from_millis(20)).unwrap();
        assert!(board.legal_moves(Color::Black).contains(&mv));
    }

    #[test]
    fn test_best_move_is_most_visited() {
        let board = Board::standard(6).unwrap();
        let mut mcts = Mcts::with_seed(6).with_max_simulations(Some(40));
        let tree = mcts.tree_search(&board, Color::Black, Duration::from_secs(10));
        let best = tree.best_move().unwrap();
        let max_visits = tree
            .root()
            .children
            .iter()
            .map(|&id| tree.node(id).visits)
            .max()
            .unwrap();
        let best_visits = tree
            .root()
            .children
            .iter()
            .map(|&id| tree.node(id))
            .find(|c| c.mv == Some(best))
            .unwrap()
            .visits;
        assert_eq!(best_visits, max_visits);
    }
}
