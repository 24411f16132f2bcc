//! A thin, owned vector of moves returned by move generation.
//!
//! Rust has no native suspendable generator, so the lazy move sequence the
//! generator conceptually produces is materialized eagerly here, matching
//! the order and completeness contract while staying idiomatic.

use std::iter::FromIterator;
use std::ops::Deref;
use std::slice::Iter;
use std::vec::IntoIter;

use crate::mv::Move;

#[derive(Clone, Debug, Default)]
pub struct MoveList(Vec<Move>);

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(Vec::new())
    }

    pub fn with_capacity(cap: usize) -> MoveList {
        MoveList(Vec::with_capacity(cap))
    }

    pub fn push(&mut self, m: Move) {
        self.0.push(m);
    }

    pub fn contains(&self, m: &Move) -> bool {
        self.0.contains(m)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.0
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = IntoIter<Move>;

    fn into_iter(self) -> IntoIter<Move> {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = Iter<'a, Move>;

    fn into_iter(self) -> Iter<'a, Move> {
        self.0.iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> MoveList {
        MoveList(iter.into_iter().collect())
    }
}
