//! Fundamental types shared by the rest of the crate: colors, piece kinds,
//! squares, and bitboards.

pub(crate) mod macros;

pub mod bitboard;
pub mod color;
pub mod piece;
pub mod square;

pub use self::bitboard::Bitboard;
pub use self::color::{Color, ALL_COLORS};
pub use self::piece::{Piece, PieceType, ALL_PIECE_TYPES, PROMO_PIECE_TYPES};
pub use self::square::{File, Rank, Square};
