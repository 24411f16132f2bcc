//! Game-termination predicates: check, mate, stalemate, insufficient
//! material, move-count draws, and repetition.

use crate::position::Board;

impl Board {
    pub fn is_check(&self) -> bool {
        self.checkers().is_not_empty()
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.base.is_insufficient_material()
    }

    pub fn is_game_over(&self) -> bool {
        self.is_checkmate()
            || self.is_stalemate()
            || self.is_insufficient_material()
            || self.is_seventyfive_moves()
            || self.is_fivefold_repetition()
    }

    /// "1-0" / "0-1" / "1/2-1/2" if the game has ended, else `None`.
    pub fn result(&self) -> Option<&'static str> {
        if self.is_checkmate() {
            return Some(if self.turn == crate::core::Color::White { "0-1" } else { "1-0" });
        }
        if self.is_stalemate() || self.is_insufficient_material() || self.is_seventyfive_moves() || self.is_fivefold_repetition() {
            return Some("1/2-1/2");
        }
        None
    }

    pub fn can_claim_fifty_moves(&self) -> bool {
        self.half_move_clock >= 100 && !self.legal_moves().is_empty()
    }

    pub fn is_seventyfive_moves(&self) -> bool {
        self.half_move_clock >= 150 && !self.legal_moves().is_empty()
    }

    fn repetition_count(&self) -> u32 {
        let key = self.position_key();
        let mut count = 1u32;
        let mut idx = self.state_stack.len();
        while idx > 0 {
            idx -= 1;
            let state = &self.state_stack[idx];
            let is_irreversible = state.half_move_clock == 0 && idx != self.state_stack.len() - 1;
            if state.zobrist_key == key {
                count += 1;
            }
            if is_irreversible {
                break;
            }
        }
        count
    }

    pub fn can_claim_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetition_count() >= 5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mv::Move;
    use crate::core::Square;

    #[test]
    fn start_pos_is_not_game_over() {
        let b = Board::start_pos();
        assert!(!b.is_game_over());
        assert!(b.result().is_none());
    }

    #[test]
    fn scholars_mate_is_checkmate() {
        let mut b = Board::start_pos();
        let uci_moves = ["e2e4", "e7e5", "d1f3", "b8c6", "f1c4", "a8b8", "f3f7"];
        for uci in uci_moves {
            let mv = Move::from_uci(uci).unwrap();
            assert!(b.legal_moves().contains(&mv), "{} should be legal", uci);
            b.push(mv);
        }
        assert!(b.is_checkmate());
        assert_eq!(b.result(), Some("1-0"));
        assert_eq!(
            b.to_fen(crate::position::fen::EpMode::Fen),
            "1rbqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQk - 0 4"
        );
    }

    #[test]
    fn bare_kings_is_insufficient_material() {
        let b = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(b.is_insufficient_material());
        let _ = Square::NONE;
    }
}
