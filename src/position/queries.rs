//! Attack and pin queries used by the move generator and rules predicates.

use crate::attacks;
use crate::core::{Bitboard, Color, PieceType, Square};
use crate::position::Board;

impl Board {
    /// Squares attacked by whatever piece (if any) sits on `sq`, under the
    /// current occupancy.
    pub fn attacks_from(&self, sq: Square) -> Bitboard {
        match self.base.piece_type_at(sq) {
            None => Bitboard(0),
            Some(PieceType::Pawn) => {
                let color = self.base.color_at(sq).expect("occupied square has a color");
                attacks::pawn_attacks(color, sq)
            }
            Some(PieceType::Knight) => attacks::knight_attacks(sq),
            Some(PieceType::King) => attacks::king_attacks(sq),
            Some(PieceType::Bishop) => attacks::bishop_attacks(sq, self.base.occupied),
            Some(PieceType::Rook) => attacks::rook_attacks(sq, self.base.occupied),
            Some(PieceType::Queen) => attacks::queen_attacks(sq, self.base.occupied),
            Some(PieceType::None) => Bitboard(0),
        }
    }

    /// Pieces of `color` attacking `target` under the supplied occupancy
    /// (which may differ from the live board, e.g. with a piece hypothetically removed).
    pub fn attackers_mask(&self, color: Color, target: Square, occupied: Bitboard) -> Bitboard {
        let base = &self.base;
        let mut attackers = Bitboard(0);
        attackers |= attacks::king_attacks(target) & base.kings;
        attackers |= attacks::knight_attacks(target) & base.knights;
        let rook_like = base.queens | base.rooks;
        attackers |= attacks::rook_attacks(target, occupied) & rook_like;
        let bishop_like = base.queens | base.bishops;
        attackers |= attacks::bishop_attacks(target, occupied) & bishop_like;
        attackers |= attacks::pawn_attacks(color.other(), target) & base.pawns;
        attackers & base.occupied_by(color)
    }

    pub fn is_attacked_by(&self, color: Color, target: Square) -> bool {
        self.attackers_mask(color, target, self.base.occupied).is_not_empty()
    }

    /// Squares currently giving check to the side to move.
    pub fn checkers(&self) -> Bitboard {
        match self.king_square(self.turn) {
            Some(king) => self.attackers_mask(self.turn.other(), king, self.base.occupied),
            None => Bitboard(0),
        }
    }

    /// If a friendly slider pins the piece on `sq` to its king, returns the
    /// ray the piece is confined to; otherwise returns the all-ones mask
    /// (an unconstrained move destination set).
    pub fn pin_mask(&self, color: Color, sq: Square) -> Bitboard {
        let king = match self.king_square(color) {
            Some(k) => k,
            None => return crate::core::bitboard::ALL,
        };
        let snipers = (attacks::rook_attacks(king, Bitboard(0)) & (self.base.rooks | self.base.queens))
            | (attacks::bishop_attacks(king, Bitboard(0)) & (self.base.bishops | self.base.queens));
        let snipers = snipers & self.base.occupied_by(color.other());
        let mut candidates = snipers;
        while let Some(sniper) = candidates.pop_lsb() {
            let between = attacks::between(king, sniper);
            if (between & Bitboard::from_square(sq)).is_not_empty()
                && (between & self.base.occupied & !Bitboard::from_square(sq)).is_empty()
            {
                return attacks::ray(king, sniper);
            }
        }
        crate::core::bitboard::ALL
    }

    /// Own pieces that are the sole blocker between their king and some
    /// enemy slider (candidates for being pinned).
    pub fn slider_blockers(&self, king: Square) -> Bitboard {
        let base = &self.base;
        let color = self.base.color_at(king).expect("king_square returns an occupied square");
        let snipers = (attacks::rook_attacks(king, Bitboard(0)) & (base.rooks | base.queens))
            | (attacks::bishop_attacks(king, Bitboard(0)) & (base.bishops | base.queens));
        let mut snipers = snipers & base.occupied_by(color.other());
        let mut blockers = Bitboard(0);
        while let Some(sniper) = snipers.pop_lsb() {
            let between = attacks::between(king, sniper) & base.occupied;
            if !between.more_than_one() && between.is_not_empty() {
                blockers |= between;
            }
        }
        blockers
    }

    /// True iff capturing en passant with the pawn on `capturer` would
    /// expose the side-to-move's king to a rank or diagonal attack (a
    /// "skewer" created by removing both the capturer and the captured pawn
    /// from the same rank in one move).
    pub fn ep_skewered(&self, king: Square, capturer: Square) -> bool {
        let ep = self.ep_square;
        if !ep.is_okay() {
            return false;
        }
        let captured_sq = Square::new(ep.file(), capturer.rank());
        let occupied_after = (self.base.occupied
            & !Bitboard::from_square(capturer)
            & !Bitboard::from_square(captured_sq))
            | Bitboard::from_square(ep);
        let rook_like = self.base.rooks | self.base.queens;
        let bishop_like = self.base.bishops | self.base.queens;
        let attackers = (attacks::rook_attacks(king, occupied_after) & rook_like)
            | (attacks::bishop_attacks(king, occupied_after) & bishop_like);
        (attackers & self.base.occupied_by(self.turn.other())).is_not_empty()
    }

    /// True iff `ep_square` is set and at least one pseudo-legal en-passant
    /// capture exists — used to decide whether ep belongs in FEN/zobrist.
    pub fn has_pseudo_legal_ep_capture(&self) -> bool {
        if !self.ep_square.is_okay() {
            return false;
        }
        (attacks::pawn_attacks(self.turn.other(), self.ep_square) & self.base.pawns & self.base.occupied_by(self.turn))
            .is_not_empty()
    }

    /// True iff `ep_square` is set and at least one *legal* en-passant
    /// capture exists (pseudo-legal capturer that also doesn't leave the
    /// king in check, including the skewer case).
    pub fn has_legal_ep_capture(&self) -> bool {
        if !self.has_pseudo_legal_ep_capture() {
            return false;
        }
        let king = match self.king_square(self.turn) {
            Some(k) => k,
            None => return true,
        };
        let mut capturers = attacks::pawn_attacks(self.turn.other(), self.ep_square)
            & self.base.pawns
            & self.base.occupied_by(self.turn);
        while let Some(capturer) = capturers.pop_lsb() {
            if !self.ep_skewered(king, capturer) {
                let pin = self.pin_mask(self.turn, capturer);
                if (pin & Bitboard::from_square(self.ep_square)).is_not_empty() {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Board;

    #[test]
    fn start_pos_has_no_checkers() {
        let b = Board::start_pos();
        assert!(b.checkers().is_empty());
    }

    #[test]
    fn pin_mask_restricts_rook_pinned_on_back_rank() {
        // King a1, own rook e1 pinned to it by the black rook on h1.
        let b = Board::from_fen("4k3/8/8/8/8/8/8/K3R2r w - - 0 1").unwrap();
        let rook_on_e1 = Square::from_algebraic("e1").unwrap();
        let mask = b.pin_mask(Color::White, rook_on_e1);
        // Pinned along the first rank: can move along it, not off it.
        assert!((mask & Bitboard::from_square(Square::from_algebraic("b1").unwrap())).is_not_empty());
        assert!((mask & Bitboard::from_square(Square::from_algebraic("e2").unwrap())).is_empty());
    }
}
