/*!

A `NatSet` is a set of natural numbers backed by a growable bit vector. Concept denotations are `NatSet`s over object
indices, and role denotations are `NatSet`s over pair indices `a * n + b`.

The wrapper exists so that the set algebra used by evaluation (`union_in_place`, `intersect_in_place`, and so on)
reads the same everywhere, regardless of the backing crate.

*/

use std::fmt::{Debug, Display, Formatter};

use bit_set::BitSet;

use crate::abstractions::join_string;

#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NatSet(BitSet);

impl NatSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty set with room for `capacity` elements without reallocating.
  pub fn with_capacity(capacity: usize) -> Self {
    NatSet(BitSet::with_capacity(capacity))
  }

  /// The set `{0, 1, ..., n - 1}`.
  pub fn full(n: usize) -> Self {
    let mut set = Self::with_capacity(n);
    for i in 0..n {
      set.0.insert(i);
    }
    set
  }

  #[inline(always)]
  pub fn insert(&mut self, value: usize) -> bool {
    self.0.insert(value)
  }

  #[inline(always)]
  pub fn remove(&mut self, value: usize) -> bool {
    self.0.remove(value)
  }

  #[inline(always)]
  pub fn contains(&self, value: usize) -> bool {
    self.0.contains(value)
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn clear(&mut self) {
    self.0.clear();
  }

  pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
    self.0.iter()
  }

  // region Set Algebra

  pub fn union_in_place(&mut self, other: &NatSet) {
    self.0.union_with(&other.0);
  }

  pub fn intersect_in_place(&mut self, other: &NatSet) {
    self.0.intersect_with(&other.0);
  }

  pub fn difference_in_place(&mut self, other: &NatSet) {
    self.0.difference_with(&other.0);
  }

  /// Replaces `self` by its complement relative to `{0, ..., universe - 1}`.
  pub fn complement_in_place(&mut self, universe: usize) {
    let mut result = NatSet::full(universe);
    result.difference_in_place(self);
    *self = result;
  }

  pub fn is_subset(&self, other: &NatSet) -> bool {
    self.0.is_subset(&other.0)
  }

  pub fn intersects(&self, other: &NatSet) -> bool {
    !self.0.is_disjoint(&other.0)
  }

  // endregion Set Algebra
}

impl FromIterator<usize> for NatSet {
  fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
    NatSet(iter.into_iter().collect())
  }
}

impl Display for NatSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{{{}}}", join_string(self.iter(), ", "))
  }
}

impl Debug for NatSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn complement_is_relative_to_universe() {
    let mut set: NatSet = [0, 2].into_iter().collect();
    set.complement_in_place(4);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3]);
  }

  #[test]
  fn equality_ignores_capacity() {
    let mut a = NatSet::with_capacity(128);
    a.insert(3);
    let b: NatSet = [3].into_iter().collect();
    assert_eq!(a, b);
  }

  #[test]
  fn display_lists_members() {
    let set: NatSet = [1, 5].into_iter().collect();
    assert_eq!(set.to_string(), "{1, 5}");
  }
}
