//! UCT Monte Carlo tree search with node reuse through a transposition table.
//!
//! Each call builds a fresh root for the given position and runs the full
//! simulation budget against it. Nodes created along the way are registered
//! by Zobrist key and survive the call: when a later expansion reaches a key
//! that is already known, the existing node is relinked under the new parent
//! with its statistics reset. Only the most recent parent is remembered, so
//! the structure is a reconverging graph viewed as a single-parent tree.
//!
//! Because a relinked node can be an ancestor of the node being expanded
//! (repetitions), selection stops rather than revisit a node already on the
//! current path, and backpropagation walks the recorded path instead of
//! parent links.

use chess_core::{
    evaluate_for, ordered_moves, Color, Move, Outcome, Position, TranspositionTable, ZobristHasher,
    ZobristKey,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::node::{Node, NodeId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Playouts per move
    pub simulations: u32,
    /// UCT exploration constant
    pub exploration: f64,
    /// Playouts pick uniformly among this many moves, captures first
    pub top_k: usize,
    /// Playout length cap in plies
    pub playout_plies: u32,
    /// Seed for playouts and fallbacks; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: 100,
            exploration: 1.4,
            top_k: 3,
            playout_plies: 30,
            seed: None,
        }
    }
}

/// How the final move was picked from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootChoice {
    /// The most visited root child, legal in the searched position.
    MostVisited(Move),
    /// The most visited child was stale; this is the most visited legal one.
    LegalChild(Move),
    /// No usable child: a uniformly random legal move, or `None` if there are
    /// no legal moves at all.
    Random(Option<Move>),
}

impl RootChoice {
    pub fn mv(self) -> Option<Move> {
        match self {
            RootChoice::MostVisited(mv) | RootChoice::LegalChild(mv) => Some(mv),
            RootChoice::Random(mv) => mv,
        }
    }

    pub fn is_fallback(self) -> bool {
        !matches!(self, RootChoice::MostVisited(_))
    }
}

/// Summary of one search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub choice: RootChoice,
    pub root_visits: u32,
    /// Simulations run plus nodes created
    pub nodes: u64,
    /// Longest root-to-leaf path walked
    pub max_depth: u8,
    pub table_entries: usize,
}

pub struct Mcts {
    cfg: MctsConfig,
    hasher: ZobristHasher,
    pub(crate) arena: Arena,
    pub(crate) table: TranspositionTable<NodeId>,
    /// Arena slot holding the root of the latest search, rewritten by the next.
    pub(crate) root: Option<NodeId>,
    rng: StdRng,
}

impl Mcts {
    pub fn new(cfg: MctsConfig) -> Self {
        Self::with_hasher(cfg, ZobristHasher::default())
    }

    pub fn with_hasher(cfg: MctsConfig, hasher: ZobristHasher) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            cfg,
            hasher,
            arena: Arena::new(),
            table: TranspositionTable::new(),
            root: None,
            rng,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.cfg
    }

    pub fn hasher(&self) -> &ZobristHasher {
        &self.hasher
    }

    /// Number of nodes registered for reuse.
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Drops every node and table entry.
    pub fn reset(&mut self) {
        self.arena.clear();
        self.table.clear();
        self.root = None;
    }

    /// Runs the simulation budget for `side` from `pos` and picks a move.
    pub fn search(&mut self, pos: &Position, side: Color) -> SearchOutcome {
        let root_key = self.hasher.key(pos);
        // The root is never registered, so no other node refers to it and its
        // slot can be rewritten on every call.
        let fresh = Node::new(pos.clone(), root_key, None, None);
        let root = match self.root {
            Some(id) => {
                *self.arena.get_mut(id) = fresh;
                id
            }
            None => self.arena.push(fresh),
        };
        self.root = Some(root);

        let mut nodes = 0u64;
        let mut max_depth = 0usize;

        for _ in 0..self.cfg.simulations {
            nodes += 1;

            let mut path = self.select(root);
            let mut leaf = path[path.len() - 1];

            if let Some((child, created)) = self.expand(leaf) {
                if created {
                    nodes += 1;
                }
                if !path.contains(&child) {
                    path.push(child);
                    leaf = child;
                }
            }
            max_depth = max_depth.max(path.len() - 1);

            let reward = self.playout(leaf, side);
            self.backpropagate(&path, reward, side);
        }

        let root_node = self.arena.get(root);
        let children: Vec<(Option<Move>, u32)> = root_node
            .children
            .iter()
            .map(|&c| {
                let child = self.arena.get(c);
                (child.mv, child.visits)
            })
            .collect();
        let root_visits = root_node.visits;
        let legal = root_node.legal.clone();

        let choice = pick_root_move(&children, &legal, &mut self.rng);

        SearchOutcome {
            choice,
            root_visits,
            nodes,
            max_depth: max_depth.min(u8::MAX as usize) as u8,
            table_entries: self.table.len(),
        }
    }

    /// Descends from `root` while the current node is fully expanded, taking
    /// the child with the highest UCT priority (first one on ties).
    fn select(&self, root: NodeId) -> Vec<NodeId> {
        let mut path = vec![root];
        let mut current = root;

        loop {
            let node = self.arena.get(current);
            if node.children.is_empty() || !node.is_fully_expanded() {
                break;
            }

            let mut best = node.children[0];
            let mut best_score = f64::NEG_INFINITY;
            for &c in &node.children {
                let score = self.arena.get(c).uct(node.visits, self.cfg.exploration);
                if score > best_score {
                    best_score = score;
                    best = c;
                }
            }

            if path.contains(&best) {
                break;
            }
            path.push(best);
            current = best;
        }

        path
    }

    /// Adds one untried move of `id` as a child, returning the child and
    /// whether a new node was created (as opposed to relinked).
    ///
    /// A move counts as tried when its resulting position is already among
    /// the children, compared by key.
    fn expand(&mut self, id: NodeId) -> Option<(NodeId, bool)> {
        let node = self.arena.get(id);
        if node.terminal {
            return None;
        }

        let tried: Vec<ZobristKey> = node.children.iter().map(|&c| self.arena.get(c).key).collect();
        let mut scratch = node.position.clone();
        let (mv, key) = node.legal.iter().find_map(|&mv| {
            let key = self.hasher.key(&scratch.play(mv));
            (!tried.contains(&key)).then_some((mv, key))
        })?;

        let (child, created) = match self.table.get(key).copied() {
            Some(existing) => {
                self.arena.get_mut(existing).relink(id, mv);
                (existing, false)
            }
            None => {
                scratch.make_move(mv);
                let child = self.arena.push(Node::new(scratch, key, Some(id), Some(mv)));
                self.table.insert(key, child);
                (child, true)
            }
        };

        self.arena.get_mut(id).children.push(child);
        Some((child, created))
    }

    /// Plays a capture-biased random game from `leaf` and scores it for `side`.
    fn playout(&mut self, leaf: NodeId, side: Color) -> f64 {
        let mut sim = self.arena.get(leaf).position.clone();
        let top_k = self.cfg.top_k.max(1);

        for _ in 0..self.cfg.playout_plies {
            if let Some(outcome) = sim.outcome() {
                return outcome_reward(outcome, side);
            }
            let moves = ordered_moves(&mut sim);
            let Some(&mv) = moves[..moves.len().min(top_k)].choose(&mut self.rng) else {
                break;
            };
            sim.make_move(mv);
        }

        match sim.outcome() {
            Some(outcome) => outcome_reward(outcome, side),
            None => eval_reward(evaluate_for(&mut sim, side)),
        }
    }

    /// Credits `reward` to every node on `path`: in full where `side` is to
    /// move, as `1 - reward` elsewhere.
    fn backpropagate(&mut self, path: &[NodeId], reward: f64, side: Color) {
        for &id in path {
            let node = self.arena.get_mut(id);
            node.visits += 1;
            node.wins += if node.position.side_to_move == side {
                reward
            } else {
                1.0 - reward
            };
        }
    }
}

/// 1 for a win by `side`, 0 for a loss, 0.5 for any draw.
pub fn outcome_reward(outcome: Outcome, side: Color) -> f64 {
    match outcome.winner() {
        Some(winner) if winner == side => 1.0,
        Some(_) => 0.0,
        None => 0.5,
    }
}

/// Maps a centipawn advantage to a win probability.
pub fn eval_reward(score: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf(-(score as f64) / 800.0))
}

/// Chooses the move to play from the root's children.
///
/// `children` holds each child's move and visit count in child order;
/// `legal` is the legal move list of the searched position. The most visited
/// child wins (first on ties). If its move is not legal, the most visited
/// legal child is taken instead, and failing that a uniformly random legal
/// move.
pub fn pick_root_move<R: Rng + ?Sized>(
    children: &[(Option<Move>, u32)],
    legal: &[Move],
    rng: &mut R,
) -> RootChoice {
    let is_legal = |mv: Option<Move>| mv.is_some_and(|m| legal.contains(&m));

    let most_visited = |only_legal: bool| {
        let mut best: Option<(Move, u32)> = None;
        for &(mv, visits) in children {
            if only_legal && !is_legal(mv) {
                continue;
            }
            let Some(mv) = mv else { continue };
            if best.is_none_or(|(_, v)| visits > v) {
                best = Some((mv, visits));
            }
        }
        best.map(|(mv, _)| mv)
    };

    if let Some(mv) = most_visited(false) {
        if is_legal(Some(mv)) {
            return RootChoice::MostVisited(mv);
        }
        if let Some(mv) = most_visited(true) {
            return RootChoice::LegalChild(mv);
        }
    }

    RootChoice::Random(legal.choose(rng).copied())
}

#[cfg(test)]
#[path = "mcts_tests.rs"]
mod mcts_tests;
