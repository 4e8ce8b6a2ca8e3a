/*!

A `State` is an immutable snapshot of the dynamic atoms that hold in it. Static atoms of the instance are not stored
and are considered true in every state.

## Identity

Each state receives a `StateId` from a process wide monotonic counter when it is constructed. Evaluation caches are
keyed by this id, so cache validity is scoped to a state's identity and not to its content: two states with the same
atoms but different ids occupy different cache entries, while a clone of a state keeps its id and shares entries with
the original.

*/

use std::{
  fmt::{Display, Formatter},
  rc::Rc,
  sync::atomic::{AtomicU64, Ordering},
};

use crate::{
  abstractions::join_string,
  api::{
    instance::InstanceInfo,
    vocabulary::VocabularyInfo,
  },
  core::{Error, Result},
};

static NEXT_STATE_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u64);

impl StateId {
  fn fresh() -> Self {
    StateId(NEXT_STATE_ID.fetch_add(1, Ordering::Relaxed))
  }
}

impl Display for StateId {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "s{}", self.0)
  }
}

#[derive(Clone, Debug)]
pub struct State {
  instance    : Rc<InstanceInfo>,
  /// Sorted, deduplicated indices of the true non-static atoms.
  atom_indices: Vec<usize>,
  id          : StateId,
}

impl State {
  /// Builds a state from atom indices of `instance`. Static atoms are dropped since they are implied. An index that
  /// does not name an atom of `instance` is a `Vocabulary` error.
  pub fn new(instance: Rc<InstanceInfo>, atom_indices: impl IntoIterator<Item = usize>) -> Result<Self> {
    let mut dynamic_atoms = Vec::new();
    for index in atom_indices {
      match instance.atom(index) {
        Some(atom) if atom.is_static => {}
        Some(_) => dynamic_atoms.push(index),
        None => {
          return Err(Error::Vocabulary(format!(
            "atom index {} does not belong to an instance with {} atoms",
            index,
            instance.atoms().len()
          )));
        }
      }
    }
    dynamic_atoms.sort_unstable();
    dynamic_atoms.dedup();

    Ok(State {
      instance,
      atom_indices: dynamic_atoms,
      id: StateId::fresh(),
    })
  }

  /// Builds a state from atom names such as `on(a,b)`.
  pub fn from_atom_names(instance: Rc<InstanceInfo>, atom_names: &[&str]) -> Result<Self> {
    let indices = atom_names
        .iter()
        .map(|name| {
          instance
              .atom_index(name)
              .ok_or_else(|| Error::Vocabulary(format!("unknown atom {}", name)))
        })
        .collect::<Result<Vec<_>>>()?;
    State::new(instance, indices)
  }

  // region Accessors

  pub fn id(&self) -> StateId {
    self.id
  }

  pub fn instance(&self) -> &Rc<InstanceInfo> {
    &self.instance
  }

  pub fn vocabulary(&self) -> &Rc<VocabularyInfo> {
    self.instance.vocabulary()
  }

  pub fn atom_indices(&self) -> &[usize] {
    &self.atom_indices
  }

  pub fn object_count(&self) -> usize {
    self.instance.object_count()
  }

  /// Every atom that holds in this state: the stored dynamic atoms followed by the instance's static atoms.
  pub fn true_atom_indices(&self) -> impl Iterator<Item = usize> + '_ {
    self.atom_indices
        .iter()
        .chain(self.instance.static_atom_indices().iter())
        .copied()
  }

  // endregion Accessors
}

impl Display for State {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let names = self.atom_indices
                    .iter()
                    .filter_map(|index| self.instance.atom(*index))
                    .map(|atom| &atom.name);
    write!(f, "{{{}}}", join_string(names, ", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn instance() -> Rc<InstanceInfo> {
    let mut vocabulary = VocabularyInfo::new();
    vocabulary.add_predicate("on", 2).unwrap();
    vocabulary.add_static_predicate("on_g", 2).unwrap();
    let mut instance = InstanceInfo::new(Rc::new(vocabulary));
    instance.add_atom("on", &["a", "b"]).unwrap();
    instance.add_atom("on", &["b", "a"]).unwrap();
    instance.add_atom("on_g", &["a", "b"]).unwrap();
    Rc::new(instance)
  }

  #[test]
  fn static_atoms_are_implied_not_stored() {
    let instance = instance();
    let state = State::new(instance, [2, 1, 1]).unwrap();
    assert_eq!(state.atom_indices(), &[1]);
    assert_eq!(state.true_atom_indices().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(state.to_string(), "{on(b,a)}");
  }

  #[test]
  fn ids_are_unique_and_survive_cloning() {
    let instance = instance();
    let first  = State::new(instance.clone(), [0]).unwrap();
    let second = State::new(instance, [0]).unwrap();
    assert_ne!(first.id(), second.id());
    assert_eq!(first.clone().id(), first.id());
  }

  #[test]
  fn foreign_atoms_are_rejected() {
    let instance = instance();
    assert!(matches!(State::new(instance.clone(), [7]), Err(Error::Vocabulary(_))));
    assert!(matches!(State::from_atom_names(instance, &["on(a,c)"]), Err(Error::Vocabulary(_))));
  }

  #[test]
  fn from_atom_names_resolves_indices() {
    let state = State::from_atom_names(instance(), &["on(b,a)", "on(a,b)"]).unwrap();
    assert_eq!(state.atom_indices(), &[0, 1]);
  }
}
