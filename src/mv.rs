//! Move representation and UCI codec.
//!
//! Unlike the bit-packed 16-bit move encoding this is descended from, `Move`
//! is a plain struct so it has room to represent drop moves (Crazyhouse-style
//! variants) alongside ordinary and promotion moves.

use std::fmt;

use crate::core::{PieceType, Square};
use crate::error::PositionError;

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
    pub drop: Option<PieceType>,
}

impl Move {
    #[inline]
    pub fn normal(from: Square, to: Square) -> Move {
        Move { from, to, promotion: None, drop: None }
    }

    #[inline]
    pub fn promotion(from: Square, to: Square, promotion: PieceType) -> Move {
        Move { from, to, promotion: Some(promotion), drop: None }
    }

    #[inline]
    pub fn drop_move(piece: PieceType, at: Square) -> Move {
        Move { from: at, to: at, promotion: None, drop: Some(piece) }
    }

    #[inline]
    pub fn null() -> Move {
        Move { from: Square::NONE, to: Square::NONE, promotion: None, drop: None }
    }

    #[inline]
    pub fn is_null(self) -> bool {
        self.from == Square::NONE && self.to == Square::NONE && self.drop.is_none()
    }

    #[inline]
    pub fn is_drop(self) -> bool {
        self.drop.is_some()
    }

    /// Renders in UCI form. Castling is expected to already be encoded as a
    /// king-to-rook-square move by the caller (the move generator); this
    /// function does not know about castling rules, only encoding.
    pub fn to_uci(self) -> String {
        if self.is_null() {
            return "0000".to_string();
        }
        if let Some(pt) = self.drop {
            return format!("{}@{}", pt.char_upper(), self.to.to_algebraic());
        }
        let mut s = format!("{}{}", self.from.to_algebraic(), self.to.to_algebraic());
        if let Some(pt) = self.promotion {
            s.push(pt.char_lower());
        }
        s
    }

    pub fn from_uci(s: &str) -> Result<Move, PositionError> {
        let invalid = || {
            log::debug!("rejecting uci move `{}`", s);
            PositionError::InvalidUci(s.to_string())
        };
        if s == "0000" {
            return Ok(Move::null());
        }
        let bytes: Vec<char> = s.chars().collect();
        if bytes.len() >= 3 && bytes[1] == '@' {
            let pt = PieceType::from_char(bytes[0]).ok_or_else(invalid)?;
            let to = Square::from_algebraic(&s[2..]).ok_or_else(invalid)?;
            return Ok(Move::drop_move(pt, to));
        }
        if s.len() == 4 || s.len() == 5 {
            let from = Square::from_algebraic(&s[0..2]).ok_or_else(invalid)?;
            let to = Square::from_algebraic(&s[2..4]).ok_or_else(invalid)?;
            let promotion = if s.len() == 5 {
                Some(PieceType::from_char(s.chars().nth(4).unwrap()).ok_or_else(invalid)?)
            } else {
                None
            };
            return Ok(Move { from, to, promotion, drop: None });
        }
        Err(invalid())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uci_round_trips_normal_move() {
        let m = Move::normal(Square::from_algebraic("e2").unwrap(), Square::from_algebraic("e4").unwrap());
        assert_eq!(Move::from_uci(&m.to_uci()).unwrap(), m);
    }

    #[test]
    fn uci_round_trips_promotion() {
        let m = Move::promotion(
            Square::from_algebraic("g7").unwrap(),
            Square::from_algebraic("g8").unwrap(),
            PieceType::Queen,
        );
        assert_eq!(m.to_uci(), "g7g8q");
        assert_eq!(Move::from_uci("g7g8q").unwrap(), m);
    }

    #[test]
    fn uci_round_trips_drop() {
        let m = Move::drop_move(PieceType::Knight, Square::from_algebraic("f3").unwrap());
        assert_eq!(m.to_uci(), "N@f3");
        assert_eq!(Move::from_uci("N@f3").unwrap(), m);
    }

    #[test]
    fn null_move_is_0000() {
        assert_eq!(Move::null().to_uci(), "0000");
        assert!(Move::from_uci("0000").unwrap().is_null());
    }

    #[test]
    fn invalid_uci_errors() {
        assert!(Move::from_uci("zz").is_err());
    }
}
