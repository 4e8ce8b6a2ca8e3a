/*!

Memoization of denotations.

A `DenotationsCaches` maps `(element, state id)` to the element's denotation in that state, and `(element, batch id)`
to the sequence of its denotations over a batch of states. A batch id is interned from the sequence of `StateId`s of
the batch, so evaluating the same slice of states twice hits the cache.

Entries are keyed by state *identity*: a state that was rebuilt with equal content gets a fresh `StateId` and is
evaluated again. Since element handles are indices into one factory's tables, a `DenotationsCaches` must only ever be
used with a single factory.

Set denotations are stored behind `Rc`, so a hit costs a reference count increment and parents share their children's
results without copying.

*/

use std::{hash::Hash, rc::Rc};

use crate::{
  abstractions::HashMap,
  api::{
    denotation::{ConceptDenotation, RoleDenotation},
    element::{BooleanRef, ConceptRef, NumericalRef, RoleRef},
    state::{State, StateId},
  },
};

/// A cache backed by [HashMap] that counts its hits and misses.
pub struct DenotationCache<K, V> {
  map   : HashMap<K, V>,
  hits  : usize,
  misses: usize,
}

impl<K, V> Default for DenotationCache<K, V> {
  fn default() -> Self {
    DenotationCache {
      map   : HashMap::new(),
      hits  : 0,
      misses: 0,
    }
  }
}

impl<K, V> DenotationCache<K, V> {
  pub fn len(&self) -> usize {
    self.map.len()
  }

  pub fn is_empty(&self) -> bool {
    self.map.is_empty()
  }

  pub fn hits(&self) -> usize {
    self.hits
  }

  pub fn misses(&self) -> usize {
    self.misses
  }

  pub fn clear(&mut self) {
    self.map.clear();
  }
}

impl<K, V> DenotationCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
  #[inline]
  pub fn get(&mut self, key: &K) -> Option<V> {
    match self.map.get(key) {
      Some(value) => {
        self.hits += 1;
        Some(value.clone())
      }
      None => {
        self.misses += 1;
        None
      }
    }
  }

  #[inline]
  pub fn insert(&mut self, key: K, value: V) {
    self.map.insert(key, value);
  }
}

pub(crate) type BatchId = u32;

#[derive(Default)]
pub struct DenotationsCaches {
  pub(crate) concepts  : DenotationCache<(ConceptRef, StateId), Rc<ConceptDenotation>>,
  pub(crate) roles     : DenotationCache<(RoleRef, StateId), Rc<RoleDenotation>>,
  pub(crate) numericals: DenotationCache<(NumericalRef, StateId), i32>,
  pub(crate) booleans  : DenotationCache<(BooleanRef, StateId), bool>,

  pub(crate) concept_batches  : DenotationCache<(ConceptRef, BatchId), Rc<Vec<ConceptDenotation>>>,
  pub(crate) role_batches     : DenotationCache<(RoleRef, BatchId), Rc<Vec<RoleDenotation>>>,
  pub(crate) numerical_batches: DenotationCache<(NumericalRef, BatchId), Rc<Vec<i32>>>,
  pub(crate) boolean_batches  : DenotationCache<(BooleanRef, BatchId), Rc<Vec<bool>>>,

  batch_ids: HashMap<Vec<StateId>, BatchId>,
}

impl DenotationsCaches {
  pub fn new() -> Self {
    Self::default()
  }

  /// The id of the batch made of `states`, in order.
  pub(crate) fn batch_id(&mut self, states: &[State]) -> BatchId {
    let key  = states.iter().map(State::id).collect::<Vec<_>>();
    let next = self.batch_ids.len() as BatchId;
    *self.batch_ids.entry(key).or_insert(next)
  }

  /// Total number of cached single-state and batch entries.
  pub fn len(&self) -> usize {
    self.concepts.len() + self.roles.len() + self.numericals.len() + self.booleans.len()
        + self.concept_batches.len() + self.role_batches.len()
        + self.numerical_batches.len() + self.boolean_batches.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn hits(&self) -> usize {
    self.concepts.hits() + self.roles.hits() + self.numericals.hits() + self.booleans.hits()
        + self.concept_batches.hits() + self.role_batches.hits()
        + self.numerical_batches.hits() + self.boolean_batches.hits()
  }

  pub fn misses(&self) -> usize {
    self.concepts.misses() + self.roles.misses() + self.numericals.misses() + self.booleans.misses()
        + self.concept_batches.misses() + self.role_batches.misses()
        + self.numerical_batches.misses() + self.boolean_batches.misses()
  }

  /// Drops every entry. Hit and miss counts are kept.
  pub fn clear(&mut self) {
    self.concepts.clear();
    self.roles.clear();
    self.numericals.clear();
    self.booleans.clear();
    self.concept_batches.clear();
    self.role_batches.clear();
    self.numerical_batches.clear();
    self.boolean_batches.clear();
    self.batch_ids.clear();
  }
}
