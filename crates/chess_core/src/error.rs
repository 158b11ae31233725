use thiserror::Error;

/// Reasons a FEN string can be rejected by [`crate::Position::try_from_fen`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 fields, found {0}")]
    MissingFields(usize),
    #[error("expected 8 ranks in board section, found {0}")]
    RankCount(usize),
    #[error("rank {0} (counted from the top) does not describe exactly 8 files")]
    RankLength(usize),
    #[error("invalid piece character '{0}'")]
    PieceChar(char),
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling character '{0}'")]
    CastlingChar(char),
    #[error("invalid en-passant square '{0}'")]
    EnPassant(String),
    #[error("invalid move counter '{0}'")]
    Counter(String),
}
