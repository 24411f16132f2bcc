//! Per-ply undo snapshot.
//!
//! Pushed onto `Board::state_stack` by `Board::push` and popped by
//! `Board::pop`. Each snapshot is a handful of `Copy` words, so — unlike the
//! teacher's `Arc`-linked persistent chain of `BoardState`s — a flat
//! `Vec<BoardState>` is cheap enough for ordinary game-length move
//! sequences and makes `pop` a plain vector pop with no reference counting.

use crate::core::{Bitboard, PieceType, Square};
use crate::mv::Move;
use crate::position::castle_rights::CastlingRights;

#[derive(Copy, Clone, Debug)]
pub struct BoardState {
    pub castling_rights: CastlingRights,
    pub ep_square: Square,
    pub half_move_clock: u32,
    pub full_move_number: u32,
    pub captured_piece: Option<PieceType>,
    pub captured_was_promoted: bool,
    pub zobrist_key: u64,
    pub checkers: Bitboard,
    pub prev_move: Move,
}
