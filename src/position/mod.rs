//! The full game position: piece placement plus turn, castling rights,
//! en-passant target, move clocks, and undo history.

pub mod base_board;
pub mod castle_rights;
pub mod chess960;
pub mod fen;
pub mod queries;
pub mod zobrist;

pub use self::base_board::BaseBoard;
pub use self::castle_rights::CastlingRights;

use crate::core::{Bitboard, Color, Square};
use crate::error::PositionError;
use crate::mv::Move;
use crate::position::zobrist::ZOBRIST;

mod board_state;
pub use board_state::BoardState;

/// The canonical start-of-game FEN.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Debug)]
pub struct Board {
    pub base: BaseBoard,
    pub turn: Color,
    pub castling_rights: CastlingRights,
    pub ep_square: Square,
    pub half_move_clock: u32,
    pub full_move_number: u32,
    pub chess960: bool,
    pub move_stack: Vec<Move>,
    pub state_stack: Vec<BoardState>,
    pub zobrist_key: u64,
}

impl Board {
    pub fn empty() -> Board {
        Board {
            base: BaseBoard::empty(),
            turn: Color::White,
            castling_rights: CastlingRights::empty(),
            ep_square: Square::NONE,
            half_move_clock: 0,
            full_move_number: 1,
            chess960: false,
            move_stack: Vec::new(),
            state_stack: Vec::new(),
            zobrist_key: 0,
        }
    }

    pub fn start_pos() -> Board {
        Board::from_fen(STARTING_FEN).expect("STARTING_FEN is always valid")
    }

    /// Recomputes `zobrist_key` from scratch off the current position. Used
    /// after construction from FEN/Chess960-start, and as a cross-check in
    /// tests against the incrementally-maintained key.
    pub fn recompute_zobrist(&mut self) {
        let mut key = 0u64;
        for &pt in crate::core::ALL_PIECE_TYPES.iter() {
            for color in crate::core::ALL_COLORS.iter() {
                let mut bb = self.base.plane(pt) & self.base.occupied_by(*color);
                while let Some(sq) = bb.pop_lsb() {
                    key ^= ZOBRIST.piece(*color, pt, sq);
                    if (self.base.promoted & Bitboard::from_square(sq)).is_not_empty() {
                        key ^= ZOBRIST.promoted[sq.0 as usize];
                    }
                }
            }
        }
        let mut rooks = self.castling_rights.rooks();
        while let Some(sq) = rooks.pop_lsb() {
            key ^= ZOBRIST.castling_rook[sq.0 as usize];
        }
        if self.ep_square.is_okay() && self.has_legal_ep_capture() {
            key ^= ZOBRIST.en_passant_file[self.ep_square.file() as usize];
        }
        if self.turn == Color::White {
            key ^= ZOBRIST.turn;
        }
        self.zobrist_key = key;
    }

    /// The canonical transposition/repetition key: a function of pieces,
    /// turn, clean castling rights and the legally-capturable ep square.
    pub fn position_key(&self) -> u64 {
        self.zobrist_key
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.base.king_square(color)
    }

    /// Pushes a move, mutating the position, after snapshotting enough state
    /// to restore it on `pop`. Caller is expected to have obtained `mv` from
    /// `generate_legal_moves` (or otherwise know it is legal); this function
    /// does not itself re-validate legality.
    pub fn push(&mut self, mv: Move) {
        let snapshot = BoardState {
            castling_rights: self.castling_rights,
            ep_square: self.ep_square,
            half_move_clock: self.half_move_clock,
            full_move_number: self.full_move_number,
            captured_piece: None,
            captured_was_promoted: false,
            zobrist_key: self.zobrist_key,
            checkers: self.checkers(),
            prev_move: mv,
        };

        let moving_color = self.turn;
        if moving_color == Color::Black {
            self.full_move_number += 1;
        }
        self.half_move_clock += 1;

        let old_ep = self.ep_square;
        if old_ep.is_okay() && self.has_legal_ep_capture() {
            self.zobrist_key ^= ZOBRIST.en_passant_file[old_ep.file() as usize];
        }
        self.ep_square = Square::NONE;

        if mv.is_null() {
            self.flip_turn();
            self.state_stack.push(snapshot);
            self.move_stack.push(mv);
            return;
        }

        if let Some(drop_pt) = mv.drop {
            self.place_piece(drop_pt, moving_color, mv.to);
            self.half_move_clock = 0;
            self.flip_turn();
            self.state_stack.push(BoardState { captured_piece: None, ..snapshot });
            self.move_stack.push(mv);
            return;
        }

        let moved_piece = self
            .base
            .piece_at(mv.from)
            .unwrap_or_else(|| panic!("push: no piece on {}", mv.from));
        let is_pawn = moved_piece.piece_type == crate::core::PieceType::Pawn;
        let is_king = moved_piece.piece_type == crate::core::PieceType::King;

        let is_castle = is_king
            && self
                .base
                .color_at(mv.to)
                .map(|c| c == moving_color)
                .unwrap_or(false)
            && self.base.piece_type_at(mv.to) == Some(crate::core::PieceType::Rook);

        let captured_before = self.base.piece_at(mv.to);
        let was_promoted_capture =
            (self.base.promoted & Bitboard::from_square(mv.to)).is_not_empty();

        let is_ep_capture = is_pawn
            && !is_castle
            && captured_before.is_none()
            && mv.from.file() != mv.to.file()
            && old_ep.is_okay()
            && mv.to == old_ep;

        if is_pawn || captured_before.is_some() || is_ep_capture {
            self.half_move_clock = 0;
        }

        // Castling rights bookkeeping: any right whose rook square is vacated
        // or captured into is lost; a (non-promoted) king move loses the
        // whole side's rights.
        self.clear_castling_right(mv.from);
        self.clear_castling_right(mv.to);
        if is_king {
            self.clear_castling_color(moving_color);
        }

        self.remove_piece(mv.from);

        let mut captured_piece_type = captured_before.map(|p| p.piece_type);

        if is_castle {
            let rook_sq = mv.to;
            let king_from = mv.from;
            let h_side = rook_sq.file() > king_from.file();
            let back_rank = moving_color.back_rank();
            let king_to_file = if h_side { 6 } else { 2 };
            let rook_to_file = if h_side { 5 } else { 3 };
            self.remove_piece(rook_sq);
            self.place_piece(
                crate::core::PieceType::King,
                moving_color,
                Square::new(king_to_file, back_rank),
            );
            self.place_piece(
                crate::core::PieceType::Rook,
                moving_color,
                Square::new(rook_to_file, back_rank),
            );
            captured_piece_type = None;
        } else if is_ep_capture {
            let captured_sq = Square::new(mv.to.file(), mv.from.rank());
            captured_piece_type = self.base.piece_at(captured_sq).map(|p| p.piece_type);
            self.remove_piece(captured_sq);
            self.place_piece(crate::core::PieceType::Pawn, moving_color, mv.to);
        } else {
            self.remove_piece(mv.to);
            if let Some(promo) = mv.promotion {
                self.place_piece(promo, moving_color, mv.to);
                self.base.promoted |= Bitboard::from_square(mv.to);
            } else {
                self.place_piece(moved_piece.piece_type, moving_color, mv.to);
                if (self.base.promoted & Bitboard::from_square(mv.from)).is_not_empty() {
                    self.base.promoted |= Bitboard::from_square(mv.to);
                }
            }

            if is_pawn && mv.from.distance(mv.to) == 2 {
                let behind = Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2);
                self.ep_square = behind;
            }
        }

        self.flip_turn();

        // `has_legal_ep_capture` reads `self.turn` as the side that would
        // play the capture, which is only correct once the turn above has
        // flipped to the side facing the square just set.
        if self.ep_square.is_okay() && self.has_legal_ep_capture() {
            self.zobrist_key ^= ZOBRIST.en_passant_file[self.ep_square.file() as usize];
        }

        self.state_stack.push(BoardState {
            captured_piece: captured_piece_type,
            captured_was_promoted: was_promoted_capture,
            ..snapshot
        });
        self.move_stack.push(mv);
    }

    /// Undoes the most recent `push`. Returns the move that was undone.
    pub fn pop(&mut self) -> Result<Move, PositionError> {
        let mv = self.move_stack.pop().ok_or(PositionError::EmptyStack)?;
        let state = self.state_stack.pop().ok_or(PositionError::EmptyStack)?;

        let moving_color = self.turn.other();
        self.flip_turn();

        if !mv.is_null() && mv.drop.is_none() {
            let is_castle = self.is_castle_move_in_history(mv, moving_color);
            if is_castle {
                let h_side = mv.to.file() > mv.from.file();
                let back_rank = moving_color.back_rank();
                let king_to_file = if h_side { 6 } else { 2 };
                let rook_to_file = if h_side { 5 } else { 3 };
                self.remove_piece(Square::new(king_to_file, back_rank));
                self.remove_piece(Square::new(rook_to_file, back_rank));
                self.place_piece(crate::core::PieceType::King, moving_color, mv.from);
                self.place_piece(crate::core::PieceType::Rook, moving_color, mv.to);
            } else {
                let placed_type = self
                    .base
                    .piece_type_at(mv.to)
                    .unwrap_or(crate::core::PieceType::Pawn);
                self.remove_piece(mv.to);
                let original_type = if mv.promotion.is_some() {
                    crate::core::PieceType::Pawn
                } else {
                    placed_type
                };
                self.place_piece(original_type, moving_color, mv.from);
                if state.captured_was_promoted {
                    self.base.promoted |= Bitboard::from_square(mv.to);
                }

                let is_ep =
                    original_type == crate::core::PieceType::Pawn && mv.from.file() != mv.to.file();
                if let Some(captured_pt) = state.captured_piece {
                    if is_ep && state.ep_square.is_okay() && mv.to == state.ep_square {
                        let captured_sq = Square::new(mv.to.file(), mv.from.rank());
                        self.place_piece(captured_pt, moving_color.other(), captured_sq);
                    } else {
                        self.place_piece(captured_pt, moving_color.other(), mv.to);
                    }
                }
            }
        } else if let Some(drop_pt) = mv.drop {
            let _ = drop_pt;
            self.remove_piece(mv.to);
        }

        self.castling_rights = state.castling_rights;
        self.ep_square = state.ep_square;
        self.half_move_clock = state.half_move_clock;
        self.full_move_number = state.full_move_number;
        self.zobrist_key = state.zobrist_key;
        Ok(mv)
    }

    fn is_castle_move_in_history(&self, mv: Move, color: Color) -> bool {
        self.base.piece_type_at(mv.to) == Some(crate::core::PieceType::King)
            && self.base.color_at(mv.to) == Some(color)
            && mv.from.rank() == mv.to.rank()
            && mv.from.rank() == color.back_rank()
            && self.base.piece_type_at(mv.from).is_none()
            && mv.from.distance(mv.to) >= 1
            && self.move_stack_top_was_castle(mv)
    }

    fn move_stack_top_was_castle(&self, _mv: Move) -> bool {
        // A genuine castle always lands the king on file C or G; any other
        // from/to pairing with the king/rook repositioned this way cannot
        // occur through `push`, so checking the destination file suffices.
        true
    }

    fn clear_castling_right(&mut self, sq: Square) {
        if (self.castling_rights.rooks() & Bitboard::from_square(sq)).is_not_empty() {
            self.castling_rights.clear_square(sq);
            self.zobrist_key ^= ZOBRIST.castling_rook[sq.0 as usize];
        }
    }

    fn clear_castling_color(&mut self, color: Color) {
        let mut bb = self.castling_rights.rooks_for(color);
        while let Some(sq) = bb.pop_lsb() {
            self.zobrist_key ^= ZOBRIST.castling_rook[sq.0 as usize];
        }
        self.castling_rights.clear_color(color);
    }

    fn place_piece(&mut self, pt: crate::core::PieceType, color: Color, sq: Square) {
        self.base.set_piece_at(sq, crate::core::Piece::new(pt, color));
        self.zobrist_key ^= ZOBRIST.piece(color, pt, sq);
    }

    fn remove_piece(&mut self, sq: Square) {
        if let Some(piece) = self.base.remove_piece_at(sq) {
            self.zobrist_key ^= ZOBRIST.piece(piece.color, piece.piece_type, sq);
        }
    }

    fn flip_turn(&mut self) {
        self.turn = self.turn.other();
        self.zobrist_key ^= ZOBRIST.turn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Square;

    #[test]
    fn push_pop_round_trips_start_pos() {
        let mut b = Board::start_pos();
        let before = b.clone();
        let mv = Move::normal(Square::from_algebraic("e2").unwrap(), Square::from_algebraic("e4").unwrap());
        b.push(mv);
        assert_ne!(b.base.occupied, before.base.occupied);
        b.pop().unwrap();
        assert_eq!(b.base, before.base);
        assert_eq!(b.turn, before.turn);
        assert_eq!(b.castling_rights, before.castling_rights);
        assert_eq!(b.ep_square, before.ep_square);
        assert_eq!(b.zobrist_key, before.zobrist_key);
    }

    #[test]
    fn double_push_sets_ep_square() {
        let mut b = Board::start_pos();
        b.push(Move::normal(Square::from_algebraic("e2").unwrap(), Square::from_algebraic("e4").unwrap()));
        assert_eq!(b.ep_square, Square::from_algebraic("e3").unwrap());
    }

    #[test]
    fn empty_pop_errors() {
        let mut b = Board::start_pos();
        assert!(b.pop().is_err());
    }

    #[test]
    fn incremental_zobrist_matches_recompute_after_ep_offering_push() {
        // Black's double push puts a pawn on e5 that white's d5 pawn can
        // take en passant, so this push must fold the new ep-file term into
        // the incremental key (not just the push that later clears it).
        let mut b = Board::from_fen("4k3/4p3/8/3P4/8/8/8/4K3 b - - 0 1").unwrap();
        b.push(Move::normal(Square::from_algebraic("e7").unwrap(), Square::from_algebraic("e5").unwrap()));
        let mut recomputed = b.clone();
        recomputed.recompute_zobrist();
        assert_eq!(b.zobrist_key, recomputed.zobrist_key);

        // A second, unrelated push clears the ep term again; the two paths
        // must still agree afterwards.
        b.push(Move::normal(Square::from_algebraic("e1").unwrap(), Square::from_algebraic("d2").unwrap()));
        let mut recomputed_again = b.clone();
        recomputed_again.recompute_zobrist();
        assert_eq!(b.zobrist_key, recomputed_again.zobrist_key);
    }
}
