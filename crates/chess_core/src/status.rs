//! Terminal-state queries: checkmate, stalemate and the automatic draws.
//!
//! Repetition is not detected here because a [`Position`] carries no history.

use crate::{board::Position, movegen::has_legal_move, types::*};

/// Half-moves without a capture or pawn move after which the game is drawn
/// automatically (the 75-move rule).
pub const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
}

impl Outcome {
    /// The winning side, or `None` for a draw.
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    /// PGN result token.
    pub fn result(self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

impl Position {
    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move) && !has_legal_move(self)
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && !has_legal_move(self)
    }

    pub fn is_seventyfive_move_draw(&self) -> bool {
        self.halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES
    }

    /// Neither side can possibly deliver mate: bare kings, a single minor
    /// piece, or bishops that all stand on one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut knights = 0;
        let mut bishop_colors = [false; 2];
        for (i, pc) in self.board.iter().enumerate() {
            let Some(pc) = pc else { continue };
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => knights += 1,
                PieceKind::Bishop => {
                    let shade = ((file_of(i as u8) + rank_of(i as u8)) % 2) as usize;
                    bishop_colors[shade] = true;
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        let bishops_present = bishop_colors[0] || bishop_colors[1];
        let bishops_mixed = bishop_colors[0] && bishop_colors[1];
        match knights {
            0 => !bishops_mixed,
            1 => !bishops_present,
            _ => false,
        }
    }

    /// Draw by a rule that ends the game on its own (no claim needed).
    pub fn is_automatic_draw(&self) -> bool {
        self.is_insufficient_material() || self.is_seventyfive_move_draw()
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// The result of the game if it has ended at this position.
    pub fn outcome(&self) -> Option<Outcome> {
        if !has_legal_move(self) {
            return Some(if self.in_check(self.side_to_move) {
                Outcome::Checkmate {
                    winner: self.side_to_move.other(),
                }
            } else {
                Outcome::Stalemate
            });
        }
        if self.is_insufficient_material() {
            return Some(Outcome::InsufficientMaterial);
        }
        if self.is_seventyfive_move_draw() {
            return Some(Outcome::SeventyFiveMoves);
        }
        None
    }
}
