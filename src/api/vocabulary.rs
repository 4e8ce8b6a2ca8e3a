/*!

The vocabulary of a planning domain: its predicates and constants.

A `VocabularyInfo` is built once per domain and then shared, read-only, by every `InstanceInfo` of that domain and by
every `ElementFactory` constructing elements over it. Sharing is through `Rc`; two vocabularies are "the same" exactly
when they are the same allocation (`Rc::ptr_eq`).

## Lifecycle and Ownership

Predicates and constants are owned by their vocabulary, are immutable, and are addressed by a stable index assigned in
insertion order. The registry is append-only, so indices stay valid for its whole lifetime.

*/

use std::fmt::{Display, Formatter};

use crate::{
  abstractions::{HashMap, IString},
  core::{Error, Result},
  debug,
};

/// A predicate symbol. Static predicates (e.g. goal predicates) have atoms whose truth never changes between states.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Predicate {
  pub name     : IString,
  pub arity    : usize,
  pub is_static: bool,
  pub index    : usize,
}

impl Display for Predicate {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}/{}", self.name, self.arity)
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Constant {
  pub name : IString,
  pub index: usize,
}

impl Display for Constant {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name)
  }
}

#[derive(Default, Debug)]
pub struct VocabularyInfo {
  predicates        : Vec<Predicate>,
  predicate_by_name : HashMap<IString, usize>,
  constants         : Vec<Constant>,
  constant_by_name  : HashMap<IString, usize>,
}

impl VocabularyInfo {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a dynamic predicate.
  pub fn add_predicate(&mut self, name: &str, arity: usize) -> Result<&Predicate> {
    self.add_predicate_with_staticness(name, arity, false)
  }

  /// Registers a predicate whose atoms hold in every state or in none.
  pub fn add_static_predicate(&mut self, name: &str, arity: usize) -> Result<&Predicate> {
    self.add_predicate_with_staticness(name, arity, true)
  }

  fn add_predicate_with_staticness(&mut self, name: &str, arity: usize, is_static: bool) -> Result<&Predicate> {
    let name = IString::from(name);
    if self.predicate_by_name.contains_key(&name) {
      return Err(Error::Vocabulary(format!("duplicate predicate {}", name)));
    }
    let index = self.predicates.len();
    debug!(3, "registering predicate {}/{} at index {}", name, arity, index);
    self.predicate_by_name.insert(name.clone(), index);
    self.predicates.push(Predicate { name, arity, is_static, index });
    Ok(&self.predicates[index])
  }

  pub fn add_constant(&mut self, name: &str) -> Result<&Constant> {
    let name = IString::from(name);
    if self.constant_by_name.contains_key(&name) {
      return Err(Error::Vocabulary(format!("duplicate constant {}", name)));
    }
    let index = self.constants.len();
    debug!(3, "registering constant {} at index {}", name, index);
    self.constant_by_name.insert(name.clone(), index);
    self.constants.push(Constant { name, index });
    Ok(&self.constants[index])
  }

  // region Accessors

  pub fn predicates(&self) -> &[Predicate] {
    &self.predicates
  }

  pub fn constants(&self) -> &[Constant] {
    &self.constants
  }

  pub fn predicate(&self, index: usize) -> Option<&Predicate> {
    self.predicates.get(index)
  }

  pub fn constant(&self, index: usize) -> Option<&Constant> {
    self.constants.get(index)
  }

  pub fn predicate_index(&self, name: &str) -> Option<usize> {
    self.predicate_by_name.get(&IString::from(name)).copied()
  }

  pub fn constant_index(&self, name: &str) -> Option<usize> {
    self.constant_by_name.get(&IString::from(name)).copied()
  }

  /// Looks up a predicate by name, producing a `Vocabulary` error if it is unknown.
  pub fn predicate_by_name(&self, name: &str) -> Result<&Predicate> {
    self.predicate_index(name)
        .map(|index| &self.predicates[index])
        .ok_or_else(|| Error::Vocabulary(format!("unknown predicate {}", name)))
  }

  pub fn constant_by_name(&self, name: &str) -> Result<&Constant> {
    self.constant_index(name)
        .map(|index| &self.constants[index])
        .ok_or_else(|| Error::Vocabulary(format!("unknown constant {}", name)))
  }

  // endregion Accessors
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn indices_follow_insertion_order() {
    let mut vocabulary = VocabularyInfo::new();
    vocabulary.add_predicate("on", 2).unwrap();
    vocabulary.add_static_predicate("on_g", 2).unwrap();
    vocabulary.add_constant("table").unwrap();

    assert_eq!(vocabulary.predicate_index("on"), Some(0));
    assert_eq!(vocabulary.predicate_index("on_g"), Some(1));
    assert!(vocabulary.predicate(1).unwrap().is_static);
    assert_eq!(vocabulary.constant_by_name("table").unwrap().index, 0);
  }

  #[test]
  fn duplicate_names_are_rejected() {
    let mut vocabulary = VocabularyInfo::new();
    vocabulary.add_predicate("on", 2).unwrap();
    assert!(matches!(vocabulary.add_predicate("on", 2), Err(Error::Vocabulary(_))));
    assert!(matches!(vocabulary.add_predicate("on", 1), Err(Error::Vocabulary(_))));
    vocabulary.add_constant("a").unwrap();
    assert!(matches!(vocabulary.add_constant("a"), Err(Error::Vocabulary(_))));
  }

  #[test]
  fn unknown_predicate_is_a_vocabulary_error() {
    let vocabulary = VocabularyInfo::new();
    assert!(matches!(vocabulary.predicate_by_name("clear"), Err(Error::Vocabulary(_))));
  }
}
