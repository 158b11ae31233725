//! Tree node and UCT scoring.

use chess_core::{legal_moves, Move, Position, ZobristKey};

pub type NodeId = u32;

#[derive(Debug, Clone)]
pub struct Node {
    pub position: Position,
    pub key: ZobristKey,
    /// Last parent this node was linked under. Traversal only; the arena owns
    /// every node.
    pub parent: Option<NodeId>,
    /// Move from `parent` that produced this node (updated on relink).
    pub mv: Option<Move>,
    pub children: Vec<NodeId>,
    /// Legal moves of `position`, in generator order.
    pub legal: Vec<Move>,
    pub terminal: bool,
    pub visits: u32,
    pub wins: f64,
}

impl Node {
    pub fn new(position: Position, key: ZobristKey, parent: Option<NodeId>, mv: Option<Move>) -> Self {
        let legal = legal_moves(&position);
        let terminal = position.is_game_over();
        Self {
            position,
            key,
            parent,
            mv,
            children: Vec::new(),
            legal,
            terminal,
            visits: 0,
            wins: 0.0,
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.children.len() >= self.legal.len()
    }

    /// UCT priority of this node as seen from a parent with `parent_visits`.
    /// Unvisited nodes always come first.
    pub fn uct(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let n = self.visits as f64;
        let ln_parent = (parent_visits.max(1) as f64).ln();
        self.wins / n + exploration * (ln_parent / n).sqrt()
    }

    /// Attach to a new parent as a fresh node: statistics gathered under the
    /// previous parent do not carry over.
    pub fn relink(&mut self, parent: NodeId, mv: Move) {
        self.parent = Some(parent);
        self.mv = Some(mv);
        self.visits = 0;
        self.wins = 0.0;
    }
}
