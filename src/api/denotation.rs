/*!

Denotations are what elements evaluate to.

| category  | denotation          | representation                                       |
|:----------|:--------------------|:-----------------------------------------------------|
| Concept   | `ConceptDenotation` | `NatSet` over object indices `0..n`                  |
| Role      | `RoleDenotation`    | `NatSet` over pair indices `a * n + b` in `0..n * n` |
| Numerical | `i32`               | `INF` for "no path" / undefined                      |
| Boolean   | `bool`              |                                                      |

Both set denotations carry their universe size `n`. Combining denotations over different universes is a logic error,
caught by debug assertions.

*/

use std::fmt::{Debug, Display, Formatter};

use crate::abstractions::{join_string, NatSet};

/// Sentinel numerical value for unreachable or undefined distances.
pub const INF: i32 = i32::MAX;

// region ConceptDenotation

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ConceptDenotation {
  num_objects: usize,
  objects    : NatSet,
}

impl ConceptDenotation {
  pub fn empty(num_objects: usize) -> Self {
    ConceptDenotation {
      num_objects,
      objects: NatSet::with_capacity(num_objects),
    }
  }

  pub fn full(num_objects: usize) -> Self {
    ConceptDenotation {
      num_objects,
      objects: NatSet::full(num_objects),
    }
  }

  pub fn from_objects(num_objects: usize, objects: impl IntoIterator<Item = usize>) -> Self {
    let mut denotation = Self::empty(num_objects);
    for object in objects {
      denotation.insert(object);
    }
    denotation
  }

  #[inline(always)]
  pub fn num_objects(&self) -> usize {
    self.num_objects
  }

  #[inline(always)]
  pub fn insert(&mut self, object: usize) -> bool {
    debug_assert!(object < self.num_objects, "object {} outside a universe of {}", object, self.num_objects);
    self.objects.insert(object)
  }

  #[inline(always)]
  pub fn remove(&mut self, object: usize) -> bool {
    self.objects.remove(object)
  }

  #[inline(always)]
  pub fn contains(&self, object: usize) -> bool {
    self.objects.contains(object)
  }

  pub fn len(&self) -> usize {
    self.objects.len()
  }

  pub fn is_empty(&self) -> bool {
    self.objects.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
    self.objects.iter()
  }

  pub fn as_nat_set(&self) -> &NatSet {
    &self.objects
  }

  pub fn union_in_place(&mut self, other: &ConceptDenotation) {
    debug_assert_eq!(self.num_objects, other.num_objects);
    self.objects.union_in_place(&other.objects);
  }

  pub fn intersect_in_place(&mut self, other: &ConceptDenotation) {
    debug_assert_eq!(self.num_objects, other.num_objects);
    self.objects.intersect_in_place(&other.objects);
  }

  pub fn difference_in_place(&mut self, other: &ConceptDenotation) {
    debug_assert_eq!(self.num_objects, other.num_objects);
    self.objects.difference_in_place(&other.objects);
  }

  pub fn complement_in_place(&mut self) {
    self.objects.complement_in_place(self.num_objects);
  }

  pub fn is_subset(&self, other: &ConceptDenotation) -> bool {
    debug_assert_eq!(self.num_objects, other.num_objects);
    self.objects.is_subset(&other.objects)
  }

  pub fn intersects(&self, other: &ConceptDenotation) -> bool {
    debug_assert_eq!(self.num_objects, other.num_objects);
    self.objects.intersects(&other.objects)
  }
}

impl Display for ConceptDenotation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.objects)
  }
}

impl Debug for ConceptDenotation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "ConceptDenotation({}/{})", self.objects, self.num_objects)
  }
}

// endregion ConceptDenotation

// region RoleDenotation

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RoleDenotation {
  num_objects: usize,
  pairs      : NatSet,
}

impl RoleDenotation {
  pub fn empty(num_objects: usize) -> Self {
    RoleDenotation {
      num_objects,
      pairs: NatSet::with_capacity(num_objects * num_objects),
    }
  }

  pub fn full(num_objects: usize) -> Self {
    RoleDenotation {
      num_objects,
      pairs: NatSet::full(num_objects * num_objects),
    }
  }

  pub fn from_pairs(num_objects: usize, pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
    let mut denotation = Self::empty(num_objects);
    for (a, b) in pairs {
      denotation.insert(a, b);
    }
    denotation
  }

  #[inline(always)]
  pub fn num_objects(&self) -> usize {
    self.num_objects
  }

  #[inline(always)]
  fn pair_index(&self, a: usize, b: usize) -> usize {
    debug_assert!(
      a < self.num_objects && b < self.num_objects,
      "pair ({}, {}) outside a universe of {}", a, b, self.num_objects
    );
    a * self.num_objects + b
  }

  #[inline(always)]
  pub fn insert(&mut self, a: usize, b: usize) -> bool {
    let index = self.pair_index(a, b);
    self.pairs.insert(index)
  }

  #[inline(always)]
  pub fn remove(&mut self, a: usize, b: usize) -> bool {
    let index = self.pair_index(a, b);
    self.pairs.remove(index)
  }

  #[inline(always)]
  pub fn contains(&self, a: usize, b: usize) -> bool {
    self.pairs.contains(self.pair_index(a, b))
  }

  pub fn len(&self) -> usize {
    self.pairs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pairs.is_empty()
  }

  /// Iterates over the pairs in row-major order.
  pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
    let n = self.num_objects;
    self.pairs.iter().map(move |index| (index / n, index % n))
  }

  /// The objects `b` with `(a, b)` in the relation.
  pub fn successors(&self, a: usize) -> impl Iterator<Item = usize> + '_ {
    (0..self.num_objects).filter(move |b| self.contains(a, *b))
  }

  pub fn as_nat_set(&self) -> &NatSet {
    &self.pairs
  }

  pub fn union_in_place(&mut self, other: &RoleDenotation) {
    debug_assert_eq!(self.num_objects, other.num_objects);
    self.pairs.union_in_place(&other.pairs);
  }

  pub fn intersect_in_place(&mut self, other: &RoleDenotation) {
    debug_assert_eq!(self.num_objects, other.num_objects);
    self.pairs.intersect_in_place(&other.pairs);
  }

  pub fn difference_in_place(&mut self, other: &RoleDenotation) {
    debug_assert_eq!(self.num_objects, other.num_objects);
    self.pairs.difference_in_place(&other.pairs);
  }

  pub fn complement_in_place(&mut self) {
    self.pairs.complement_in_place(self.num_objects * self.num_objects);
  }

  pub fn is_subset(&self, other: &RoleDenotation) -> bool {
    debug_assert_eq!(self.num_objects, other.num_objects);
    self.pairs.is_subset(&other.pairs)
  }

  /// Swaps the coordinates of every pair.
  pub fn inverse(&self) -> RoleDenotation {
    RoleDenotation::from_pairs(self.num_objects, self.iter().map(|(a, b)| (b, a)))
  }
}

impl Display for RoleDenotation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let pairs = self.iter().map(|(a, b)| format!("({}, {})", a, b));
    write!(f, "{{{}}}", join_string(pairs, ", "))
  }
}

impl Debug for RoleDenotation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "RoleDenotation({}/{})", self, self.num_objects)
  }
}

// endregion RoleDenotation

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn concept_complement_stays_in_universe() {
    let mut denotation = ConceptDenotation::from_objects(4, [0, 2]);
    denotation.complement_in_place();
    assert_eq!(denotation.iter().collect::<Vec<_>>(), vec![1, 3]);
  }

  #[test]
  fn role_pairs_are_row_major() {
    let role = RoleDenotation::from_pairs(3, [(2, 0), (0, 1), (1, 2)]);
    assert_eq!(role.iter().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (2, 0)]);
    assert_eq!(role.successors(1).collect::<Vec<_>>(), vec![2]);
    assert!(role.inverse().contains(0, 2));
    assert_eq!(role.to_string(), "{(0, 1), (1, 2), (2, 0)}");
  }

  #[test]
  fn role_complement_covers_all_pairs() {
    let mut role = RoleDenotation::from_pairs(2, [(0, 0)]);
    role.complement_in_place();
    assert_eq!(role.len(), 3);
    assert!(!role.contains(0, 0));
  }

  #[test]
  fn equality_ignores_capacity() {
    let mut grown = ConceptDenotation::empty(3);
    grown.insert(2);
    grown.remove(2);
    assert_eq!(grown, ConceptDenotation::empty(3));
  }
}
