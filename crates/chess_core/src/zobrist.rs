//! Zobrist hashing for chess positions.
//!
//! The key of a position is the XOR of independent random values for:
//! - Each piece on each square (12 pieces × 64 squares = 768 values)
//! - Side to move (1 value, XORed when Black is to move)
//! - Castling rights (4 values)
//! - En passant file (8 values, only when an en-passant square is set)
//!
//! Move counters are deliberately left out, so two positions that differ only
//! in their clocks share a key. Because every feature contributes through XOR,
//! a key can also be updated incrementally by toggling the features a move
//! changes; the searches in this workspace recompute it from scratch.
//!
//! Collisions are possible in principle and are not guarded against.

use rand::{RngCore, SeedableRng, rngs::StdRng};

use crate::{board::Position, types::*};

/// 64-bit position identity used as a transposition key.
pub type ZobristKey = u64;

/// Seed used by [`ZobristHasher::default`].
pub const DEFAULT_ZOBRIST_SEED: u64 = 42;

/// Pre-computed random values for Zobrist hashing.
///
/// The values are drawn once, at construction, from a generator seeded
/// explicitly by the caller. Hashers built from the same seed produce the
/// same keys.
#[derive(Clone, Debug)]
pub struct ZobristHasher {
    /// Random values for each piece on each square.
    /// Indexed by [color][piece_kind][square]
    pieces: [[[u64; 64]; 6]; 2],
    /// Random value for black to move (XOR when black's turn)
    side_to_move: u64,
    /// Random values for castling rights [wk, wq, bk, bq]
    castling: [u64; 4],
    /// Random values for en passant file (0-7)
    en_passant: [u64; 8],
    seed: u64,
}

impl Default for ZobristHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ZOBRIST_SEED)
    }
}

impl ZobristHasher {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut pieces = [[[0u64; 64]; 6]; 2];
        for by_color in pieces.iter_mut() {
            for by_kind in by_color.iter_mut() {
                for slot in by_kind.iter_mut() {
                    *slot = rng.next_u64();
                }
            }
        }
        let side_to_move = rng.next_u64();
        let castling = std::array::from_fn(|_| rng.next_u64());
        let en_passant = std::array::from_fn(|_| rng.next_u64());

        ZobristHasher {
            pieces,
            side_to_move,
            castling,
            en_passant,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the Zobrist key for a piece on a square.
    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    #[inline(always)]
    pub fn side_key(&self) -> u64 {
        self.side_to_move
    }

    /// Get the Zobrist key for castling right index (0=wk, 1=wq, 2=bk, 3=bq).
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index]
    }

    /// Get the Zobrist key for en passant on a file (0-7).
    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }

    /// Computes the key of `pos` from scratch.
    pub fn key(&self, pos: &Position) -> ZobristKey {
        let mut h = 0u64;
        for (i, pc) in pos.board.iter().enumerate() {
            if let Some(pc) = pc {
                h ^= self.piece_key(*pc, i as u8);
            }
        }
        if pos.side_to_move == Color::Black {
            h ^= self.side_key();
        }
        for (i, held) in pos.castling.as_array().into_iter().enumerate() {
            if held {
                h ^= self.castling_key(i);
            }
        }
        if let Some(ep) = pos.en_passant {
            h ^= self.ep_key(file_of(ep) as u8);
        }
        h
    }
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
