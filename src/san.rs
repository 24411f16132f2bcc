//! Standard Algebraic Notation and Long Algebraic Notation rendering and
//! parsing.
//!
//! Hand-rolled rather than regex-driven: the grammar is small enough to
//! match character-by-character, and nothing else in this crate's
//! dependency stack pulls in a regex engine.

use crate::core::{PieceType, Square};
use crate::error::PositionError;
use crate::mv::Move;
use crate::position::Board;

impl Board {
    /// Renders `mv` in SAN, including the check/checkmate suffix. `mv` must
    /// be legal in the current position.
    pub fn san(&self, mv: Move) -> String {
        let mut s = self.san_base(mv);
        let mut after = self.clone();
        after.push(mv);
        if after.is_check() {
            s.push(if after.is_checkmate() { '#' } else { '+' });
        }
        s
    }

    /// Long algebraic notation: SAN with an explicit origin square.
    pub fn lan(&self, mv: Move) -> String {
        if mv.is_null() {
            return "--".to_string();
        }
        if self.is_castle(mv) {
            return self.san(mv);
        }
        let capture = self.base.piece_at(mv.to).is_some() || self.is_ep_capture(mv);
        let piece = self.base.piece_type_at(mv.from).unwrap_or(PieceType::Pawn);
        let mut s = String::new();
        if piece != PieceType::Pawn {
            s.push(piece.char_upper());
        }
        s.push_str(&mv.from.to_algebraic());
        s.push(if capture { 'x' } else { '-' });
        s.push_str(&mv.to.to_algebraic());
        if let Some(promo) = mv.promotion {
            s.push('=');
            s.push(promo.char_upper());
        }
        let mut after = self.clone();
        after.push(mv);
        if after.is_check() {
            s.push(if after.is_checkmate() { '#' } else { '+' });
        }
        s
    }

    fn san_base(&self, mv: Move) -> String {
        if mv.is_null() {
            return "--".to_string();
        }
        if let Some(pt) = mv.drop {
            if pt == PieceType::Pawn {
                return format!("{}", mv.to.to_algebraic());
            }
            return format!("{}@{}", pt.char_upper(), mv.to.to_algebraic());
        }
        if self.is_castle(mv) {
            return if mv.to.file() > mv.from.file() { "O-O".to_string() } else { "O-O-O".to_string() };
        }

        let piece = self.base.piece_type_at(mv.from).unwrap_or(PieceType::Pawn);
        let capture = self.base.piece_at(mv.to).is_some() || self.is_ep_capture(mv);

        let mut s = String::new();
        if piece == PieceType::Pawn {
            if capture {
                s.push((b'a' + mv.from.file()) as char);
            }
        } else {
            s.push(piece.char_upper());
            s.push_str(&self.disambiguator(mv, piece));
        }
        if capture {
            s.push('x');
        }
        s.push_str(&mv.to.to_algebraic());
        if let Some(promo) = mv.promotion {
            s.push('=');
            s.push(promo.char_upper());
        }
        s
    }

    fn is_castle(&self, mv: Move) -> bool {
        self.base.piece_type_at(mv.from) == Some(PieceType::King)
            && self.base.piece_type_at(mv.to) == Some(PieceType::Rook)
            && self.base.color_at(mv.to) == Some(self.turn)
    }

    fn is_ep_capture(&self, mv: Move) -> bool {
        self.base.piece_type_at(mv.from) == Some(PieceType::Pawn)
            && mv.from.file() != mv.to.file()
            && self.base.piece_at(mv.to).is_none()
    }

    fn disambiguator(&self, mv: Move, piece: PieceType) -> String {
        let others: Vec<Move> = self
            .legal_moves()
            .into_iter()
            .filter(|&m| {
                m != mv
                    && m.to == mv.to
                    && self.base.piece_type_at(m.from) == Some(piece)
            })
            .collect();
        if others.is_empty() {
            return String::new();
        }
        let same_file = others.iter().any(|m| m.from.file() == mv.from.file());
        let same_rank = others.iter().any(|m| m.from.rank() == mv.from.rank());
        if !same_file {
            ((b'a' + mv.from.file()) as char).to_string()
        } else if !same_rank {
            ((b'1' + mv.from.rank()) as char).to_string()
        } else {
            mv.from.to_algebraic()
        }
    }

    /// Parses a SAN move string against the current position's legal moves.
    pub fn parse_san(&self, input: &str) -> Result<Move, PositionError> {
        let trimmed = input.trim_end_matches(['+', '#']);
        if trimmed == "--" || trimmed == "Z0" {
            return Ok(Move::null());
        }
        if trimmed == "O-O" {
            return self.find_castle(true);
        }
        if trimmed == "O-O-O" {
            return self.find_castle(false);
        }

        let chars: Vec<char> = trimmed.chars().collect();
        let mut i = 0;
        let piece_type = if i < chars.len() && "NBRQK".contains(chars[i]) {
            let pt = PieceType::from_char(chars[i]).unwrap();
            i += 1;
            pt
        } else {
            PieceType::Pawn
        };

        let invalid = || {
            log::debug!("rejecting san `{}`: malformed", input);
            PositionError::InvalidSan(input.to_string())
        };

        let mut disambig_file: Option<u8> = None;
        let mut disambig_rank: Option<u8> = None;
        // Walk backwards from the end to find the destination square first.
        if chars.len() < 2 {
            return Err(invalid());
        }
        let mut promo: Option<PieceType> = None;
        let mut end = chars.len();
        if chars[end - 1].is_ascii_alphabetic() && "NBRQ".contains(chars[end - 1].to_ascii_uppercase()) {
            promo = PieceType::from_char(chars[end - 1]);
            end -= 1;
            if end > 0 && chars[end - 1] == '=' {
                end -= 1;
            }
        }
        if end < 2 {
            return Err(invalid());
        }
        let dest_str: String = chars[end - 2..end].iter().collect();
        let to = Square::from_algebraic(&dest_str).ok_or_else(invalid)?;

        let middle: Vec<char> = chars[i..end - 2].iter().filter(|&&c| c != 'x' && c != '-').cloned().collect();
        for c in middle {
            if ('a'..='h').contains(&c) {
                disambig_file = Some(c as u8 - b'a');
            } else if ('1'..='8').contains(&c) {
                disambig_rank = Some(c as u8 - b'1');
            }
        }

        let legal = self.legal_moves();
        let mut matches: Vec<Move> = Vec::new();
        for m in &legal {
            if m.to != to {
                continue;
            }
            if m.promotion != promo {
                continue;
            }
            let mover_type = self.base.piece_type_at(m.from).unwrap_or(PieceType::None);
            if mover_type != piece_type {
                continue;
            }
            if let Some(f) = disambig_file {
                if m.from.file() != f {
                    continue;
                }
            }
            if let Some(r) = disambig_rank {
                if m.from.rank() != r {
                    continue;
                }
            }
            matches.push(*m);
        }

        match matches.len() {
            0 => {
                log::debug!("rejecting san `{}`: no legal move matches", input);
                Err(PositionError::IllegalSan(input.to_string()))
            }
            1 => Ok(matches[0]),
            _ => {
                log::debug!("rejecting san `{}`: {} legal moves match", input, matches.len());
                Err(PositionError::AmbiguousSan(input.to_string()))
            }
        }
    }

    fn find_castle(&self, king_side: bool) -> Result<Move, PositionError> {
        for m in &self.legal_moves() {
            if self.is_castle(*m) {
                let is_h_side = m.to.file() > m.from.file();
                if is_h_side == king_side {
                    return Ok(*m);
                }
            }
        }
        let san = if king_side { "O-O".to_string() } else { "O-O-O".to_string() };
        log::debug!("rejecting san `{}`: castle not legal", san);
        Err(PositionError::IllegalSan(san))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn san_disambiguation_table() {
        let b = Board::from_fen("N3k2N/8/8/3N4/N4N1N/2R5/1R6/4K3 w - - 0 1").unwrap();
        let cases = [
            ("c3", "c2", "Rcc2"),
            ("b2", "c2", "Rbc2"),
            ("a4", "b6", "N4b6"),
            ("h8", "g6", "N8g6"),
            ("h4", "g6", "Nh4g6"),
        ];
        for (from, to, expected) in cases {
            let mv = Move::normal(Square::from_algebraic(from).unwrap(), Square::from_algebraic(to).unwrap());
            assert_eq!(b.san(mv), expected, "san({}{})", from, to);
        }
    }

    #[test]
    fn san_round_trips_legal_moves() {
        let b = Board::start_pos();
        for m in &b.legal_moves() {
            let s = b.san(*m);
            assert_eq!(b.parse_san(&s).unwrap(), *m, "round trip of {}", s);
        }
    }

    #[test]
    fn castling_san() {
        let b = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let kingside = Move::normal(Square::from_algebraic("e1").unwrap(), Square::from_algebraic("h1").unwrap());
        assert_eq!(b.san(kingside), "O-O");
        assert_eq!(b.parse_san("O-O").unwrap(), kingside);
    }
}
