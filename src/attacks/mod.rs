//! Precomputed attack tables.
//!
//! Knight, king and pawn attacks are simple step tables. Sliding-piece
//! (bishop/rook/queen) attacks are computed per-square by enumerating every
//! blocker subset of the square's relevant-occupancy mask with
//! [`Bitboard::carry_rippler`] and mapping each subset to its resulting
//! attack set, mirroring the dictionary-based approach used by reference
//! chess libraries rather than perfect-hash magic bitboards. Everything is
//! built once behind `lazy_static!` before first use.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::core::{Bitboard, Color, Square};

const KNIGHT_DELTAS: [(i8, i8); 8] =
    [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];
const KING_DELTAS: [(i8, i8); 8] =
    [(1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1)];
const BISHOP_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DELTAS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn step_attacks(sq: Square, deltas: &[(i8, i8)]) -> Bitboard {
    let mut bb = Bitboard(0);
    let file = sq.file() as i8;
    let rank = sq.rank() as i8;
    for &(df, dr) in deltas {
        let nf = file + df;
        let nr = rank + dr;
        if (0..8).contains(&nf) && (0..8).contains(&nr) {
            bb |= Bitboard::from_square(Square::new(nf as u8, nr as u8));
        }
    }
    bb
}

/// Slides from `sq` along each delta until off-board or blocked by an
/// occupied square (the blocking square itself is included as a capture
/// target, matching SPEC_FULL.md's `sliding_attacks` definition).
fn sliding_attacks(sq: Square, occupied: Bitboard, deltas: &[(i8, i8)]) -> Bitboard {
    let mut bb = Bitboard(0);
    let file = sq.file() as i8;
    let rank = sq.rank() as i8;
    for &(df, dr) in deltas {
        let (mut nf, mut nr) = (file + df, rank + dr);
        while (0..8).contains(&nf) && (0..8).contains(&nr) {
            let target = Square::new(nf as u8, nr as u8);
            bb |= Bitboard::from_square(target);
            if (occupied & Bitboard::from_square(target)).is_not_empty() {
                break;
            }
            nf += df;
            nr += dr;
        }
    }
    bb
}

/// The relevant-occupancy mask for a slider on `sq`: every square the ray
/// could be blocked from, excluding the board edge in that direction (an
/// edge square is always "occupied" in the sense that nothing beyond it
/// matters).
fn relevant_mask(sq: Square, deltas: &[(i8, i8)]) -> Bitboard {
    let mut bb = Bitboard(0);
    let file = sq.file() as i8;
    let rank = sq.rank() as i8;
    for &(df, dr) in deltas {
        let (mut nf, mut nr) = (file + df, rank + dr);
        loop {
            let (past_nf, past_nr) = (nf + df, nr + dr);
            if !(0..8).contains(&past_nf) || !(0..8).contains(&past_nr) {
                break;
            }
            if !(0..8).contains(&nf) || !(0..8).contains(&nr) {
                break;
            }
            bb |= Bitboard::from_square(Square::new(nf as u8, nr as u8));
            nf += df;
            nr += dr;
        }
    }
    bb
}

struct SliderTable {
    mask: [Bitboard; 64],
    table: Vec<HashMap<u64, Bitboard>>,
}

impl SliderTable {
    fn build(deltas: &[(i8, i8)]) -> SliderTable {
        let mut mask = [Bitboard(0); 64];
        let mut table = Vec::with_capacity(64);
        for idx in 0..64u8 {
            let sq = Square(idx);
            let m = relevant_mask(sq, deltas);
            mask[idx as usize] = m;
            let mut map = HashMap::new();
            for occ in m.carry_rippler() {
                map.insert(occ, sliding_attacks(sq, Bitboard(occ), deltas));
            }
            table.push(map);
        }
        SliderTable { mask, table }
    }

    #[inline]
    fn attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let relevant = occupied.0 & self.mask[sq.0 as usize].0;
        *self.table[sq.0 as usize].get(&relevant).unwrap_or(&Bitboard(0))
    }
}

struct Tables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
    bishop: SliderTable,
    rook: SliderTable,
    rays: Vec<Bitboard>,
    between: Vec<Bitboard>,
}

impl Tables {
    fn build() -> Tables {
        log::debug!("building attack tables");
        let mut knight = [Bitboard(0); 64];
        let mut king = [Bitboard(0); 64];
        let mut pawn = [[Bitboard(0); 64]; 2];
        for idx in 0..64u8 {
            let sq = Square(idx);
            knight[idx as usize] = step_attacks(sq, &KNIGHT_DELTAS);
            king[idx as usize] = step_attacks(sq, &KING_DELTAS);
            pawn[Color::White as usize][idx as usize] = step_attacks(sq, &[(1, 1), (-1, 1)]);
            pawn[Color::Black as usize][idx as usize] = step_attacks(sq, &[(1, -1), (-1, -1)]);
        }
        let bishop = SliderTable::build(&BISHOP_DELTAS);
        let rook = SliderTable::build(&ROOK_DELTAS);

        let mut rays = vec![Bitboard(0); 64 * 64];
        let mut between = vec![Bitboard(0); 64 * 64];
        for a in 0..64u8 {
            let sa = Square(a);
            for b in 0..64u8 {
                if a == b {
                    continue;
                }
                let sb = Square(b);
                let all_deltas: [(i8, i8); 8] = [
                    (1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1),
                ];
                let fa = sa.file() as i8;
                let ra = sa.rank() as i8;
                let fb = sb.file() as i8;
                let rb = sb.rank() as i8;
                for &(df, dr) in all_deltas.iter() {
                    let (mut nf, mut nr) = (fa + df, ra + dr);
                    let mut seen_b = false;
                    let mut ray = Bitboard(0);
                    let mut btw = Bitboard(0);
                    while (0..8).contains(&nf) && (0..8).contains(&nr) {
                        let cur = Square::new(nf as u8, nr as u8);
                        ray |= Bitboard::from_square(cur);
                        if nf == fb && nr == rb {
                            seen_b = true;
                            break;
                        }
                        btw |= Bitboard::from_square(cur);
                        nf += df;
                        nr += dr;
                    }
                    if seen_b {
                        rays[a as usize * 64 + b as usize] =
                            Bitboard::from_square(sa) | Bitboard::from_square(sb) | ray;
                        between[a as usize * 64 + b as usize] = btw;
                        break;
                    }
                }
            }
        }

        log::debug!("attack tables built");
        Tables { knight, king, pawn, bishop, rook, rays, between }
    }
}

lazy_static! {
    static ref TABLES: Tables = Tables::build();
}

#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    TABLES.knight[sq.0 as usize]
}

#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    TABLES.king[sq.0 as usize]
}

#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    TABLES.pawn[color as usize][sq.0 as usize]
}

#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    TABLES.bishop.attacks(sq, occupied)
}

#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    TABLES.rook.attacks(sq, occupied)
}

#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

/// Full ray (including both endpoints) through `a` and `b` if they are
/// aligned on a rank, file or diagonal; else the empty set.
#[inline]
pub fn ray(a: Square, b: Square) -> Bitboard {
    TABLES.rays[a.0 as usize * 64 + b.0 as usize]
}

/// Open squares strictly between `a` and `b` if aligned; else the empty set.
#[inline]
pub fn between(a: Square, b: Square) -> Bitboard {
    TABLES.between[a.0 as usize * 64 + b.0 as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_from_corner_has_two_moves() {
        let a1 = Square::from_algebraic("a1").unwrap();
        assert_eq!(knight_attacks(a1).popcount(), 2);
    }

    #[test]
    fn king_from_corner_has_three_moves() {
        let a1 = Square::from_algebraic("a1").unwrap();
        assert_eq!(king_attacks(a1).popcount(), 3);
    }

    #[test]
    fn rook_attacks_stop_at_blocker() {
        let a1 = Square::from_algebraic("a1").unwrap();
        let a4 = Square::from_algebraic("a4").unwrap();
        let occ = Bitboard::from_square(a4);
        let attacks = rook_attacks(a1, occ);
        assert!((attacks & occ).is_not_empty());
        let a5 = Square::from_algebraic("a5").unwrap();
        assert!((attacks & Bitboard::from_square(a5)).is_empty());
    }

    #[test]
    fn bishop_attacks_on_empty_board_from_center() {
        let d4 = Square::from_algebraic("d4").unwrap();
        let attacks = bishop_attacks(d4, Bitboard(0));
        assert_eq!(attacks.popcount(), 13);
    }

    #[test]
    fn ray_and_between_are_consistent() {
        let a1 = Square::from_algebraic("a1").unwrap();
        let a8 = Square::from_algebraic("a8").unwrap();
        let full = ray(a1, a8);
        let btw = between(a1, a8);
        assert_eq!(full.popcount(), 8);
        assert_eq!(btw.popcount(), 6);
        assert!((btw & Bitboard::from_square(a1)).is_empty());
        assert!((btw & Bitboard::from_square(a8)).is_empty());
    }

    #[test]
    fn ray_is_empty_when_not_aligned() {
        let a1 = Square::from_algebraic("a1").unwrap();
        let b3 = Square::from_algebraic("b3").unwrap();
        assert!(ray(a1, b3).is_empty());
    }
}
