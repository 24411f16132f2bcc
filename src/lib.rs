//! `chesscore` is a rules-accurate chess position and move-generation
//! engine core: bitboard position representation, legal move generation
//! (including castling, en-passant, promotion, and Chess960), make/unmake
//! with a full undo history, and FEN/Shredder-FEN/UCI/SAN/LAN I/O.
//!
//! Search, evaluation, time management, networking, persistence and
//! in-core parallelism are explicitly out of scope — this crate is the
//! rules engine a search layer would sit on top of, not the search layer
//! itself.
//!
//! # Examples
//!
//! ```
//! use chesscore::Board;
//!
//! let mut board = Board::start_pos();
//! assert_eq!(board.legal_moves().len(), 20);
//!
//! let e4 = chesscore::Move::from_uci("e2e4").unwrap();
//! board.push(e4);
//! assert_eq!(board.turn, chesscore::Color::Black);
//! board.pop().unwrap();
//! assert_eq!(board.to_fen(chesscore::EpMode::Fen), chesscore::STARTING_FEN);
//! ```

pub mod attacks;
pub mod core;
pub mod display;
pub mod error;
pub mod move_list;
pub mod movegen;
pub mod mv;
pub mod position;
pub mod rules;
pub mod san;

pub use crate::core::{Bitboard, Color, File, Piece, PieceType, Rank, Square};
pub use crate::error::PositionError;
pub use crate::move_list::MoveList;
pub use crate::mv::Move;
pub use crate::position::fen::EpMode;
pub use crate::position::{BaseBoard, Board, BoardState, CastlingRights, STARTING_FEN};
