//! Move ordering shared by the searches and the playout policy.

use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Reorders `moves` so captures come first. The sort is stable, so the
/// generator's order is kept inside each group.
pub fn captures_first(pos: &Position, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| !pos.is_capture(mv));
}

/// Legal moves of `pos` with captures first.
pub fn ordered_moves(pos: &mut Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    captures_first(pos, &mut moves);
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_lead_and_keep_generator_order() {
        let mut pos = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        );
        let plain = crate::movegen::legal_moves(&pos);
        let ordered = ordered_moves(&mut pos);
        assert_eq!(ordered.len(), plain.len());

        let split = ordered
            .iter()
            .position(|&m| !pos.is_capture(m))
            .unwrap_or(ordered.len());
        assert!(split > 0, "kiwipete has captures");
        assert!(ordered[split..].iter().all(|&m| !pos.is_capture(m)));

        let captures: Vec<Move> = plain.iter().copied().filter(|&m| pos.is_capture(m)).collect();
        assert_eq!(&ordered[..split], captures.as_slice());
    }
}
