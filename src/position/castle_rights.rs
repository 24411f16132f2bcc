//! Castling rights as a bitboard of rook squares.
//!
//! Unlike a 4-bit flag set, a rook-square bitboard uniformly represents
//! Chess960/Fischer-Random castling rights (where the castling rook can sit
//! on any file). Standard-chess `KQkq` notation is only a FEN-I/O-boundary
//! alias for "the outermost rook on that side's back rank still has rights".

use crate::core::{Bitboard, Color, Square};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CastlingRights(pub Bitboard);

impl CastlingRights {
    pub fn empty() -> CastlingRights {
        CastlingRights(Bitboard(0))
    }

    pub fn standard_start() -> CastlingRights {
        let mut bb = Bitboard(0);
        for sq in ["a1", "h1", "a8", "h8"] {
            bb |= Bitboard::from_square(Square::from_algebraic(sq).unwrap());
        }
        CastlingRights(bb)
    }

    pub fn rooks(self) -> Bitboard {
        self.0
    }

    pub fn rooks_for(self, color: Color) -> Bitboard {
        let back_rank_mask = Bitboard(0xFFu64 << (color.back_rank() as u64 * 8));
        self.0 & back_rank_mask
    }

    /// Clears any right whose rook square is `sq` (a rook moved or was captured there).
    pub fn clear_square(&mut self, sq: Square) {
        self.0 &= !Bitboard::from_square(sq);
    }

    /// Clears every right belonging to `color` (that color's king moved).
    pub fn clear_color(&mut self, color: Color) {
        let back_rank_mask = Bitboard(0xFFu64 << (color.back_rank() as u64 * 8));
        self.0 &= !back_rank_mask;
    }

    pub fn has_any_for(self, color: Color) -> bool {
        self.rooks_for(color).is_not_empty()
    }

    /// The a-side (queenside-by-file-order) rook square for `color`, if any rights remain.
    pub fn a_side(self, color: Color) -> Option<Square> {
        let bb = self.rooks_for(color);
        if bb.is_empty() {
            return None;
        }
        Some(bb.lsb())
    }

    /// The h-side (kingside-by-file-order) rook square for `color`, if any rights remain.
    pub fn h_side(self, color: Color) -> Option<Square> {
        let bb = self.rooks_for(color);
        if bb.is_empty() {
            return None;
        }
        Some(bb.msb())
    }

    /// Standard-chess `KQkq`-style rendering, used by FEN output when the
    /// position is a non-Chess960 standard back-rank arrangement.
    pub fn to_kqkq_string(self) -> String {
        let mut s = String::new();
        if (self.0 & Bitboard::from_square(Square::from_algebraic("h1").unwrap())).is_not_empty() {
            s.push('K');
        }
        if (self.0 & Bitboard::from_square(Square::from_algebraic("a1").unwrap())).is_not_empty() {
            s.push('Q');
        }
        if (self.0 & Bitboard::from_square(Square::from_algebraic("h8").unwrap())).is_not_empty() {
            s.push('k');
        }
        if (self.0 & Bitboard::from_square(Square::from_algebraic("a8").unwrap())).is_not_empty() {
            s.push('q');
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_start_has_four_rights() {
        let cr = CastlingRights::standard_start();
        assert_eq!(cr.rooks().popcount(), 4);
        assert_eq!(cr.to_kqkq_string(), "KQkq");
    }

    #[test]
    fn clear_color_removes_only_that_sides_rights() {
        let mut cr = CastlingRights::standard_start();
        cr.clear_color(Color::White);
        assert!(!cr.has_any_for(Color::White));
        assert!(cr.has_any_for(Color::Black));
    }

    #[test]
    fn clear_square_removes_single_right() {
        let mut cr = CastlingRights::standard_start();
        cr.clear_square(Square::from_algebraic("h1").unwrap());
        assert_eq!(cr.to_kqkq_string(), "Qkq");
    }
}
