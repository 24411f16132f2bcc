//! Pseudo-legal and legal move generation, including castling, en-passant,
//! promotions and check evasions.

use crate::attacks;
use crate::core::bitboard::ALL as BB_ALL;
use crate::core::{Bitboard, Color, PieceType, Square, PROMO_PIECE_TYPES};
use crate::move_list::MoveList;
use crate::mv::Move;
use crate::position::Board;

impl Board {
    pub fn legal_moves(&self) -> MoveList {
        self.generate_legal_moves(BB_ALL, BB_ALL)
    }

    pub fn pseudo_legal_moves(&self) -> MoveList {
        self.generate_pseudo_legal(BB_ALL, BB_ALL)
    }

    /// All moves that satisfy piece-movement rules, without checking whether
    /// they leave the mover's own king in check.
    pub fn generate_pseudo_legal(&self, from_mask: Bitboard, to_mask: Bitboard) -> MoveList {
        let mut moves = MoveList::new();
        let own = self.base.occupied_by(self.turn);
        let enemy = self.base.occupied_by(self.turn.other());

        // 1. Non-pawn, non-king piece moves.
        for &pt in &[PieceType::Knight, PieceType::Bishop, PieceType::Rook, PieceType::Queen] {
            let mut pieces = self.base.plane(pt) & own & from_mask;
            while let Some(from) = pieces.pop_lsb() {
                let dests = self.attacks_from(from) & !own & to_mask;
                for to in dests.scan_reversed() {
                    moves.push(Move::normal(from, to));
                }
            }
        }

        // King moves (non-castling).
        let mut kings = self.base.kings & own & from_mask;
        while let Some(from) = kings.pop_lsb() {
            let dests = attacks::king_attacks(from) & !own & to_mask;
            for to in dests.scan_reversed() {
                moves.push(Move::normal(from, to));
            }
        }

        // 2. Castling.
        self.generate_castling_moves(from_mask, to_mask, &mut moves);

        // 3. Pawn captures.
        let pawns = self.base.pawns & own & from_mask;
        let mut capturers = pawns;
        while let Some(from) = capturers.pop_lsb() {
            let targets = attacks::pawn_attacks(self.turn, from) & enemy & to_mask;
            for to in targets.scan_reversed() {
                push_pawn_move(&mut moves, from, to);
            }
        }

        // 4 & 5. Pawn pushes.
        self.generate_pawn_pushes(from_mask, to_mask, &mut moves);

        // 6. En passant.
        self.generate_ep_moves(from_mask, to_mask, &mut moves);

        moves
    }

    fn generate_pawn_pushes(&self, from_mask: Bitboard, to_mask: Bitboard, moves: &mut MoveList) {
        let own = self.base.occupied_by(self.turn);
        let pawns = self.base.pawns & own & from_mask;
        let (single_targets, start_rank_mask): (Bitboard, Bitboard) = match self.turn {
            Color::White => (pawns.shift_up(), Bitboard(0xFF00)),
            Color::Black => (pawns.shift_down(), Bitboard(0x00FF_0000_0000_0000)),
        };
        let single_empty = single_targets & !self.base.occupied;
        let mut singles = single_empty & to_mask;
        while let Some(to) = singles.pop_lsb() {
            let from = match self.turn {
                Color::White => Square(to.0 - 8),
                Color::Black => Square(to.0 + 8),
            };
            push_pawn_move(moves, from, to);
        }

        let double_source = single_empty
            & match self.turn {
                Color::White => Bitboard(start_rank_mask.0 << 8),
                Color::Black => Bitboard(start_rank_mask.0 >> 8),
            };
        let double_targets = match self.turn {
            Color::White => double_source.shift_up(),
            Color::Black => double_source.shift_down(),
        };
        let mut doubles = double_targets & !self.base.occupied & to_mask;
        while let Some(to) = doubles.pop_lsb() {
            let from = match self.turn {
                Color::White => Square(to.0 - 16),
                Color::Black => Square(to.0 + 16),
            };
            moves.push(Move::normal(from, to));
        }
    }

    fn generate_ep_moves(&self, from_mask: Bitboard, to_mask: Bitboard, moves: &mut MoveList) {
        let ep = self.ep_square;
        if !ep.is_okay() || (Bitboard::from_square(ep) & to_mask).is_empty() {
            return;
        }
        if (self.base.occupied & Bitboard::from_square(ep)).is_not_empty() {
            return;
        }
        let expected_rank = match self.turn {
            Color::White => 4,
            Color::Black => 3,
        };
        let own_pawns = self.base.pawns & self.base.occupied_by(self.turn) & from_mask;
        let mut capturers =
            attacks::pawn_attacks(self.turn.other(), ep) & own_pawns;
        while let Some(from) = capturers.pop_lsb() {
            if from.rank() == expected_rank {
                moves.push(Move::normal(from, ep));
            }
        }
    }

    fn generate_castling_moves(&self, from_mask: Bitboard, to_mask: Bitboard, moves: &mut MoveList) {
        let king = match self.king_square(self.turn) {
            Some(k) => k,
            None => return,
        };
        if (Bitboard::from_square(king) & from_mask).is_empty() {
            return;
        }
        let back_rank = self.turn.back_rank();
        if king.rank() != back_rank {
            return;
        }
        let mut rook_candidates = self.castling_rights.rooks_for(self.turn);
        while let Some(rook) = rook_candidates.pop_lsb() {
            if (Bitboard::from_square(rook) & to_mask).is_empty() {
                continue;
            }
            if self.can_castle(king, rook, back_rank) {
                moves.push(Move::normal(king, rook));
            }
        }
    }

    fn can_castle(&self, king: Square, rook: Square, back_rank: u8) -> bool {
        if self.base.piece_type_at(rook) != Some(PieceType::Rook) {
            return false;
        }
        if (self.base.promoted & (Bitboard::from_square(king) | Bitboard::from_square(rook))).is_not_empty() {
            return false;
        }
        let h_side = rook.file() > king.file();
        let king_to_file = if h_side { 6 } else { 2 };
        let rook_to_file = if h_side { 5 } else { 3 };
        let king_to = Square::new(king_to_file, back_rank);
        let rook_to = Square::new(rook_to_file, back_rank);

        let occ_without_movers =
            self.base.occupied & !Bitboard::from_square(king) & !Bitboard::from_square(rook);

        let king_path = attacks::ray(king, king_to) | Bitboard::from_square(king_to);
        let rook_path = attacks::ray(rook, rook_to) | Bitboard::from_square(rook_to);
        let required_empty = (king_path | rook_path)
            & !Bitboard::from_square(king)
            & !Bitboard::from_square(rook);
        if (required_empty & occ_without_movers).is_not_empty() {
            return false;
        }

        let king_travel = attacks::between(king, king_to) | Bitboard::from_square(king) | Bitboard::from_square(king_to);
        let mut squares = king_travel;
        let enemy = self.turn.other();
        while let Some(sq) = squares.pop_lsb() {
            if self.attackers_mask(enemy, sq, occ_without_movers).is_not_empty() {
                return false;
            }
        }
        true
    }

    /// All legal moves: pseudo-legal moves (or evasions, if in check) that
    /// don't leave the mover's own king in check.
    pub fn generate_legal_moves(&self, from_mask: Bitboard, to_mask: Bitboard) -> MoveList {
        let king = match self.king_square(self.turn) {
            Some(k) => k,
            None => return self.generate_pseudo_legal(from_mask, to_mask),
        };
        let blockers = self.slider_blockers(king);
        let checkers = self.checkers();

        let candidates = if checkers.is_not_empty() {
            self.generate_evasions(king, checkers, from_mask, to_mask)
        } else {
            self.generate_pseudo_legal(from_mask, to_mask)
        };

        candidates.into_iter().filter(|&m| self.is_safe(king, blockers, m)).collect()
    }

    fn generate_evasions(&self, king: Square, checkers: Bitboard, from_mask: Bitboard, to_mask: Bitboard) -> MoveList {
        let mut moves = MoveList::new();
        let own = self.base.occupied_by(self.turn);

        // Squares a sliding checker's ray continues through beyond itself,
        // which the king must not step into even though the checker square
        // itself looks "capturable".
        let mut attacked = Bitboard(0);
        let mut sliders = checkers
            & (self.base.bishops | self.base.rooks | self.base.queens)
            & self.base.occupied_by(self.turn.other());
        while let Some(slider) = sliders.pop_lsb() {
            attacked |= attacks::ray(king, slider) & !Bitboard::from_square(slider);
        }

        if (Bitboard::from_square(king) & from_mask).is_not_empty() {
            let mut dests = attacks::king_attacks(king) & !own & !attacked & to_mask;
            while let Some(to) = dests.pop_lsb() {
                if self.attackers_mask(self.turn.other(), to, self.base.occupied & !Bitboard::from_square(king))
                    .is_empty()
                {
                    moves.push(Move::normal(king, to));
                }
            }
        }

        if !checkers.more_than_one() {
            let checker = checkers.lsb();
            let target_mask = (attacks::between(king, checker) | checkers) & to_mask;
            if target_mask.is_not_empty() {
                let blocking = self.generate_pseudo_legal(from_mask & !self.base.kings, target_mask);
                for m in blocking {
                    moves.push(m);
                }
            }
            // En-passant evasion: capturing the checking pawn that just double-pushed.
            if self.ep_square.is_okay() {
                let captured_sq = Square::new(self.ep_square.file(), checker.rank());
                if captured_sq == checker {
                    let mut ep_moves = MoveList::new();
                    self.generate_ep_moves(from_mask, Bitboard::from_square(self.ep_square), &mut ep_moves);
                    for m in ep_moves {
                        moves.push(m);
                    }
                }
            }
        }

        moves
    }

    /// True iff playing `mv` does not leave the mover's own king in check.
    fn is_safe(&self, king: Square, blockers: Bitboard, mv: Move) -> bool {
        if mv.drop.is_some() {
            return true;
        }
        if mv.from == king {
            // Castling safety was already verified in `can_castle`.
            if self.base.piece_type_at(mv.to) == Some(PieceType::Rook)
                && self.base.color_at(mv.to) == Some(self.turn)
            {
                return true;
            }
            let occ = self.base.occupied & !Bitboard::from_square(king);
            return self.attackers_mask(self.turn.other(), mv.to, occ).is_empty();
        }

        let is_ep = self.base.piece_type_at(mv.from) == Some(PieceType::Pawn)
            && mv.from.file() != mv.to.file()
            && self.base.piece_at(mv.to).is_none();
        if is_ep {
            if self.ep_skewered(king, mv.from) {
                return false;
            }
        }

        if (blockers & Bitboard::from_square(mv.from)).is_empty() {
            return true;
        }
        let pin_ray = self.pin_mask(self.turn, mv.from);
        (pin_ray & Bitboard::from_square(mv.to)).is_not_empty()
    }
}

fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square) {
    let promo_rank = to.rank() == 0 || to.rank() == 7;
    if promo_rank {
        for &pt in PROMO_PIECE_TYPES.iter() {
            moves.push(Move::promotion(from, to, pt));
        }
    } else {
        moves.push(Move::normal(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Board;

    #[test]
    fn start_pos_has_20_legal_moves() {
        let b = Board::start_pos();
        assert_eq!(b.legal_moves().len(), 20);
    }

    #[test]
    fn pinned_piece_cannot_move_off_ray() {
        // Knight on e2 is pinned to the king on e1 by the rook on e8; it has
        // no legal move since no knight move stays on the e-file.
        let b = Board::from_fen("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let e2 = Square::from_algebraic("e2").unwrap();
        assert!(!b.legal_moves().iter().any(|m| m.from == e2));
    }

    #[test]
    fn king_cannot_move_into_check() {
        let b = Board::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
        let moves = b.legal_moves();
        let into_check = Move::normal(Square::from_algebraic("e1").unwrap(), Square::from_algebraic("f1").unwrap());
        assert!(!moves.contains(&into_check));
    }

    #[test]
    fn evasion_required_when_in_check() {
        let b = Board::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
        let moves = b.legal_moves();
        for m in &moves {
            let mut clone = b.clone();
            clone.push(*m);
            assert!(!clone.is_attacked_by(Color::Black, clone.king_square(Color::White).unwrap()));
        }
    }
}
