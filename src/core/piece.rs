//! Piece types and colored pieces.

use std::fmt;

use super::color::Color;

/// The six piece kinds, plus `None` for an empty square.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum PieceType {
    None = 0,
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

pub const ALL_PIECE_TYPES: [PieceType; 6] = [
    PieceType::Pawn,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Queen,
    PieceType::King,
];

/// Piece kinds a pawn may promote to, in the spec's mandated emission order.
pub const PROMO_PIECE_TYPES: [PieceType; 4] =
    [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight];

impl PieceType {
    #[inline(always)]
    pub fn is_none(self) -> bool {
        self == PieceType::None
    }

    #[inline(always)]
    pub fn is_some(self) -> bool {
        self != PieceType::None
    }

    /// Upper-case FEN/SAN letter (`' '` for `None`).
    pub fn char_upper(self) -> char {
        match self {
            PieceType::None => ' ',
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    pub fn char_lower(self) -> char {
        self.char_upper().to_ascii_lowercase()
    }

    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char_upper())
    }
}

/// A piece of a given type belonging to a given color.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    #[inline(always)]
    pub fn new(piece_type: PieceType, color: Color) -> Piece {
        Piece { piece_type, color }
    }

    /// The FEN letter for this piece (upper-case for White, lower for Black).
    pub fn character(self) -> char {
        match self.color {
            Color::White => self.piece_type.char_upper(),
            Color::Black => self.piece_type.char_lower(),
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let piece_type = PieceType::from_char(c)?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Piece::new(piece_type, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.character())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_char() {
        for &pt in ALL_PIECE_TYPES.iter() {
            for &c in &[Color::White, Color::Black] {
                let p = Piece::new(pt, c);
                let ch = p.character();
                assert_eq!(Piece::from_char(ch), Some(p));
            }
        }
    }

    #[test]
    fn promo_order_is_q_r_b_n() {
        assert_eq!(
            PROMO_PIECE_TYPES,
            [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight]
        );
    }
}
