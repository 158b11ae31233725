use std::ops::{Deref, DerefMut};

use crate::error::FenError;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    /// Rights in hashing order: [wk, wq, bk, bq].
    pub fn as_array(&self) -> [bool; 4] {
        [self.wk, self.wq, self.bk, self.bq]
    }

    pub fn kingside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wk,
            Color::Black => self.bk,
        }
    }

    pub fn queenside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wq,
            Color::Black => self.bq,
        }
    }

    /// Drops whatever right is anchored on a rook home square.
    fn clear_rook_square(&mut self, sq: u8) {
        match sq {
            0 => self.wq = false,
            7 => self.wk = false,
            56 => self.bq = false,
            63 => self.bk = false,
            _ => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    pub fn startpos() -> Self {
        let mut p = Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights {
                wk: true,
                wq: true,
                bk: true,
                bq: true,
            },
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        };

        for (f, &kind) in BACK_RANK.iter().enumerate() {
            p.board[f] = Some(Piece {
                color: Color::White,
                kind,
            });
            p.board[8 + f] = Some(Piece {
                color: Color::White,
                kind: PieceKind::Pawn,
            });
            p.board[48 + f] = Some(Piece {
                color: Color::Black,
                kind: PieceKind::Pawn,
            });
            p.board[56 + f] = Some(Piece {
                color: Color::Black,
                kind,
            });
        }
        p
    }

    /// Parses a FEN string, panicking on malformed input.
    ///
    /// Convenient for tests and hard-coded positions; use [`Position::try_from_fen`]
    /// for untrusted input.
    pub fn from_fen(fen: &str) -> Self {
        match Self::try_from_fen(fen) {
            Ok(pos) => pos,
            Err(e) => panic!("Invalid FEN '{fen}': {e}"),
        }
    }

    /// Forsyth-Edwards Notation parser. The move counters are optional.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let mut board = [None; 64];
        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => return Err(FenError::PieceChar(ch)),
                    };
                    let s = sq(file, rank).ok_or(FenError::RankLength(rank_idx))?;
                    board[s as usize] = Some(Piece { color, kind });
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankLength(rank_idx));
                }
            }
            if file != 8 {
                return Err(FenError::RankLength(rank_idx));
            }
        }

        let side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        let mut castling = CastlingRights::NONE;
        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(FenError::CastlingChar(c)),
                }
            }
        }

        let en_passant = if ep_part == "-" {
            None
        } else {
            Some(coord_to_sq(ep_part).ok_or_else(|| FenError::EnPassant(ep_part.to_string()))?)
        };

        let halfmove_clock: u32 = halfmove_part
            .parse()
            .map_err(|_| FenError::Counter(halfmove_part.to_string()))?;
        let fullmove_number: u32 = fullmove_part
            .parse()
            .map_err(|_| FenError::Counter(fullmove_part.to_string()))?;

        Ok(Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Returns the colour-flipped twin of this position: every piece changes
    /// colour and is reflected across the horizontal midline, and side to move,
    /// castling rights and the en-passant square are swapped accordingly.
    pub fn mirrored(&self) -> Position {
        let mut board = [None; 64];
        for (i, pc) in self.board.iter().enumerate() {
            if let Some(pc) = pc {
                board[mirror_sq(i as u8) as usize] = Some(Piece {
                    color: pc.color.other(),
                    kind: pc.kind,
                });
            }
        }
        Position {
            board,
            side_to_move: self.side_to_move.other(),
            castling: CastlingRights {
                wk: self.castling.bk,
                wq: self.castling.bq,
                bk: self.castling.wk,
                bq: self.castling.wq,
            },
            en_passant: self.en_passant.map(mirror_sq),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        self.pieces(c, PieceKind::King).next()
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Squares holding `color`'s pieces of the given kind, in ascending order.
    pub fn pieces(&self, color: Color, kind: PieceKind) -> impl Iterator<Item = u8> + '_ {
        let target = Piece { color, kind };
        self.board
            .iter()
            .enumerate()
            .filter(move |(_, pc)| **pc == Some(target))
            .map(|(i, _)| i as u8)
    }

    /// True if `mv` removes an enemy piece, en passant included.
    pub fn is_capture(&self, mv: Move) -> bool {
        mv.is_en_passant
            || self
                .piece_at(mv.to)
                .is_some_and(|pc| pc.color != self.side_to_move)
    }

    pub fn in_check(&self, c: Color) -> bool {
        let ksq = match self.king_sq(c) {
            Some(s) => s,
            None => return false,
        };
        self.is_square_attacked(ksq, c.other())
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        const KNIGHT: [(i8, i8); 8] = [
            (1, 2),
            (2, 1),
            (-1, 2),
            (-2, 1),
            (1, -2),
            (2, -1),
            (-1, -2),
            (-2, -1),
        ];
        const KING: [(i8, i8); 8] = [
            (1, 1),
            (1, 0),
            (1, -1),
            (0, 1),
            (0, -1),
            (-1, 1),
            (-1, 0),
            (-1, -1),
        ];
        const DIAG: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
        const ORTHO: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

        let tf = file_of(target);
        let tr = rank_of(target);
        let holds = |s: u8, kind: PieceKind| self.piece_at(s) == Some(Piece { color: by, kind });

        // A pawn attacks diagonally forward, so look one rank behind the target.
        let pawn_dr: i8 = match by {
            Color::White => -1,
            Color::Black => 1,
        };
        for df in [-1, 1] {
            if let Some(s) = sq(tf + df, tr + pawn_dr)
                && holds(s, PieceKind::Pawn)
            {
                return true;
            }
        }

        for (df, dr) in KNIGHT {
            if let Some(s) = sq(tf + df, tr + dr)
                && holds(s, PieceKind::Knight)
            {
                return true;
            }
        }

        for (df, dr) in KING {
            if let Some(s) = sq(tf + df, tr + dr)
                && holds(s, PieceKind::King)
            {
                return true;
            }
        }

        let slides = |dirs: &[(i8, i8)], a: PieceKind, b: PieceKind| {
            dirs.iter().any(|&(df, dr)| {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(s) = sq(f, r) {
                    if let Some(pc) = self.piece_at(s) {
                        return pc.color == by && (pc.kind == a || pc.kind == b);
                    }
                    f += df;
                    r += dr;
                }
                false
            })
        };

        slides(&DIAG[..], PieceKind::Bishop, PieceKind::Queen)
            || slides(&ORTHO[..], PieceKind::Rook, PieceKind::Queen)
    }

    /// Applies `mv`, returning what is needed to take it back.
    ///
    /// # Panics
    /// If the from-square is empty. Callers only apply moves produced by the
    /// legal move generator for this exact position.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");
        let mut captured = self.piece_at(to);
        let prev_castling = self.castling.clone();
        let prev_ep = self.en_passant;
        let prev_hmc = self.halfmove_clock;
        let prev_fmn = self.fullmove_number;

        self.en_passant = None;

        // Halfmove clock reset on capture or pawn move
        let mut reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        let mut ep_captured_sq = None;
        if mv.is_en_passant {
            let dir = match moved.color {
                Color::White => -1,
                Color::Black => 1,
            };
            if let Some(cs) = sq(file_of(to), rank_of(to) + dir) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
                ep_captured_sq = Some(cs);
                reset_hmc = true;
            }
        }

        self.set_piece(from, None);
        self.set_piece(to, Some(moved));

        if moved.kind == PieceKind::Pawn && is_promotion_rank(moved.color, to) {
            self.set_piece(
                to,
                Some(Piece {
                    color: moved.color,
                    kind: mv.promo.unwrap_or(PieceKind::Queen),
                }),
            );
        }

        // White: e1->g1 rook h1->f1, e1->c1 rook a1->d1 (mirrored for Black)
        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            let rook_squares = match (from, to) {
                (4, 6) => Some((7, 5)),
                (4, 2) => Some((0, 3)),
                (60, 62) => Some((63, 61)),
                (60, 58) => Some((56, 59)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_squares {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
                rook_move = Some((rf, rt));
            }
        }

        if moved.kind == PieceKind::King {
            match moved.color {
                Color::White => {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                Color::Black => {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
            }
        }
        if moved.kind == PieceKind::Rook {
            self.castling.clear_rook_square(from);
        }
        if captured.is_some_and(|cp| cp.kind == PieceKind::Rook) {
            self.castling.clear_rook_square(to);
        }

        // Double pawn push sets the en-passant square to the one passed over.
        if moved.kind == PieceKind::Pawn && (rank_of(from) - rank_of(to)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        Undo {
            captured,
            castling: prev_castling,
            en_passant: prev_ep,
            halfmove_clock: prev_hmc,
            fullmove_number: prev_fmn,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // The moved piece goes back as it was; this also reverts promotions.
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(mv.to, undo.captured),
        }
    }

    /// Applies `mv` for the lifetime of the returned guard.
    ///
    /// The guard dereferences to the position after the move and takes the
    /// move back when dropped, so every exit path of a search frame (early
    /// cutoffs included) leaves the position as it found it.
    pub fn play(&mut self, mv: Move) -> MoveGuard<'_> {
        let undo = self.make_move(mv);
        MoveGuard {
            pos: self,
            mv,
            undo: Some(undo),
        }
    }

    /// Hands the turn to the opponent without moving a piece.
    pub fn make_null_move(&mut self) -> Option<u8> {
        let prev_ep = self.en_passant.take();
        self.side_to_move = self.side_to_move.other();
        prev_ep
    }

    pub fn unmake_null_move(&mut self, prev_ep: Option<u8>) {
        self.side_to_move = self.side_to_move.other();
        self.en_passant = prev_ep;
    }

    /// Scoped form of [`Position::make_null_move`].
    pub fn pass_turn(&mut self) -> PassGuard<'_> {
        let prev_ep = self.make_null_move();
        PassGuard { pos: self, prev_ep }
    }
}

fn is_promotion_rank(c: Color, to: u8) -> bool {
    match c {
        Color::White => rank_of(to) == 7,
        Color::Black => rank_of(to) == 0,
    }
}

/// A move applied to a borrowed position; undone on drop.
pub struct MoveGuard<'a> {
    pos: &'a mut Position,
    mv: Move,
    undo: Option<Undo>,
}

impl MoveGuard<'_> {
    pub fn mv(&self) -> Move {
        self.mv
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.pos
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.pos
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.pos.unmake_move(self.mv, undo);
        }
    }
}

/// A passed turn on a borrowed position; restored on drop.
pub struct PassGuard<'a> {
    pos: &'a mut Position,
    prev_ep: Option<u8>,
}

impl Deref for PassGuard<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.pos
    }
}

impl DerefMut for PassGuard<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.pos
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.pos.unmake_null_move(self.prev_ep);
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
