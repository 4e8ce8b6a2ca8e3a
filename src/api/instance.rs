/*!

The objects and ground atoms of one planning problem.

An `InstanceInfo` references its vocabulary through an `Rc`. Every vocabulary constant is registered as an object
when the instance is created, so a constant can always be resolved to an object index (see `c_one_of`). Objects and
atoms are indexed in insertion order.

Static atoms hold in every state of the instance. They are stored once here and applied implicitly when a state is
evaluated; states never store them.

*/

use std::{
  fmt::{Display, Formatter},
  rc::Rc,
};

use crate::{
  abstractions::{join_string, HashMap, IString},
  api::vocabulary::VocabularyInfo,
  core::{Error, Result},
  debug,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Object {
  pub name : IString,
  pub index: usize,
}

/// A ground atom. `object_indices` has exactly as many entries as the predicate's arity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Atom {
  pub name           : IString,
  pub predicate_index: usize,
  pub object_indices : Vec<usize>,
  pub is_static      : bool,
  pub index          : usize,
}

impl Display for Atom {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name)
  }
}

#[derive(Debug)]
pub struct InstanceInfo {
  vocabulary         : Rc<VocabularyInfo>,
  objects            : Vec<Object>,
  object_by_name     : HashMap<IString, usize>,
  atoms              : Vec<Atom>,
  atom_by_name       : HashMap<IString, usize>,
  static_atom_indices: Vec<usize>,
}

impl InstanceInfo {
  /// Creates an instance over `vocabulary`, registering one object per vocabulary constant.
  pub fn new(vocabulary: Rc<VocabularyInfo>) -> Self {
    let mut instance = InstanceInfo {
      vocabulary         : vocabulary.clone(),
      objects            : Vec::new(),
      object_by_name     : HashMap::new(),
      atoms              : Vec::new(),
      atom_by_name       : HashMap::new(),
      static_atom_indices: Vec::new(),
    };
    for constant in vocabulary.constants() {
      instance.insert_object(constant.name.clone());
    }
    instance
  }

  pub fn vocabulary(&self) -> &Rc<VocabularyInfo> {
    &self.vocabulary
  }

  /// Registers a new object. Duplicate names are a `Vocabulary` error.
  pub fn add_object(&mut self, name: &str) -> Result<&Object> {
    let name = IString::from(name);
    if self.object_by_name.contains_key(&name) {
      return Err(Error::Vocabulary(format!("duplicate object {}", name)));
    }
    let index = self.insert_object(name);
    Ok(&self.objects[index])
  }

  fn insert_object(&mut self, name: IString) -> usize {
    let index = self.objects.len();
    debug!(3, "registering object {} at index {}", name, index);
    self.object_by_name.insert(name.clone(), index);
    self.objects.push(Object { name, index });
    index
  }

  /// Registers a ground atom of `predicate_name` over the named objects. The atom is static if its predicate is.
  /// Objects that do not exist yet are created.
  pub fn add_atom(&mut self, predicate_name: &str, object_names: &[&str]) -> Result<&Atom> {
    self.add_atom_with_staticness(predicate_name, object_names, false)
  }

  /// Registers a ground atom that holds in every state of this instance.
  pub fn add_static_atom(&mut self, predicate_name: &str, object_names: &[&str]) -> Result<&Atom> {
    self.add_atom_with_staticness(predicate_name, object_names, true)
  }

  fn add_atom_with_staticness(
    &mut self,
    predicate_name: &str,
    object_names  : &[&str],
    is_static     : bool,
  ) -> Result<&Atom>
  {
    // Validate everything before touching the registry so a failed call leaves it unchanged.
    let predicate = self.vocabulary.predicate_by_name(predicate_name)?;
    if predicate.arity != object_names.len() {
      return Err(Error::Vocabulary(format!(
        "predicate {} expects {} arguments but {} were given",
        predicate, predicate.arity, object_names.len()
      )));
    }
    let predicate_index = predicate.index;
    let is_static       = is_static || predicate.is_static;
    let name            = IString::from(atom_name(predicate_name, object_names));
    if self.atom_by_name.contains_key(&name) {
      return Err(Error::Vocabulary(format!("duplicate atom {}", name)));
    }

    let object_indices = object_names
        .iter()
        .map(|object_name| {
          match self.object_index(object_name) {
            Some(index) => index,
            None        => self.insert_object(IString::from(*object_name)),
          }
        })
        .collect::<Vec<_>>();

    let index = self.atoms.len();
    debug!(3, "registering {}atom {} at index {}", if is_static { "static " } else { "" }, name, index);
    self.atom_by_name.insert(name.clone(), index);
    if is_static {
      self.static_atom_indices.push(index);
    }
    self.atoms.push(Atom { name, predicate_index, object_indices, is_static, index });
    Ok(&self.atoms[index])
  }

  // region Accessors

  pub fn objects(&self) -> &[Object] {
    &self.objects
  }

  pub fn atoms(&self) -> &[Atom] {
    &self.atoms
  }

  pub fn object_count(&self) -> usize {
    self.objects.len()
  }

  pub fn object(&self, index: usize) -> Option<&Object> {
    self.objects.get(index)
  }

  pub fn atom(&self, index: usize) -> Option<&Atom> {
    self.atoms.get(index)
  }

  pub fn object_index(&self, name: &str) -> Option<usize> {
    self.object_by_name.get(&IString::from(name)).copied()
  }

  /// Looks up an atom by its name, e.g. `on(a,b)`.
  pub fn atom_index(&self, name: &str) -> Option<usize> {
    self.atom_by_name.get(&IString::from(name)).copied()
  }

  pub fn static_atom_indices(&self) -> &[usize] {
    &self.static_atom_indices
  }

  // endregion Accessors
}

/// The textual name of an atom: `pred(o1,o2)`, or just `pred` for a nullary predicate.
pub fn atom_name(predicate_name: &str, object_names: &[&str]) -> String {
  if object_names.is_empty() {
    predicate_name.to_string()
  } else {
    format!("{}({})", predicate_name, join_string(object_names.iter(), ","))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn blocks_vocabulary() -> Rc<VocabularyInfo> {
    let mut vocabulary = VocabularyInfo::new();
    vocabulary.add_predicate("on", 2).unwrap();
    vocabulary.add_predicate("clear", 1).unwrap();
    vocabulary.add_static_predicate("on_g", 2).unwrap();
    vocabulary.add_predicate("handempty", 0).unwrap();
    vocabulary.add_constant("table").unwrap();
    Rc::new(vocabulary)
  }

  #[test]
  fn constants_become_objects() {
    let instance = InstanceInfo::new(blocks_vocabulary());
    assert_eq!(instance.object_count(), 1);
    assert_eq!(instance.object_index("table"), Some(0));
  }

  #[test]
  fn atoms_create_missing_objects() {
    let mut instance = InstanceInfo::new(blocks_vocabulary());
    let atom = instance.add_atom("on", &["a", "b"]).unwrap().clone();
    assert_eq!(&*atom.name, "on(a,b)");
    assert_eq!(atom.object_indices, vec![1, 2]);
    assert!(!atom.is_static);
    assert_eq!(instance.atom_index("on(a,b)"), Some(0));

    let nullary = instance.add_atom("handempty", &[]).unwrap();
    assert_eq!(&*nullary.name, "handempty");
  }

  #[test]
  fn static_atoms_are_tracked() {
    let mut instance = InstanceInfo::new(blocks_vocabulary());
    instance.add_atom("on", &["a", "b"]).unwrap();
    instance.add_atom("on_g", &["b", "a"]).unwrap();
    instance.add_static_atom("clear", &["a"]).unwrap();
    assert_eq!(instance.static_atom_indices(), &[1, 2]);
  }

  #[test]
  fn failed_registration_leaves_instance_unchanged() {
    let mut instance = InstanceInfo::new(blocks_vocabulary());
    instance.add_atom("on", &["a", "b"]).unwrap();
    let objects = instance.object_count();

    assert!(matches!(instance.add_atom("on", &["a", "b"]), Err(Error::Vocabulary(_))));
    assert!(matches!(instance.add_atom("on", &["c"]), Err(Error::Vocabulary(_))));
    assert!(matches!(instance.add_atom("stack", &["c"]), Err(Error::Vocabulary(_))));
    assert!(matches!(instance.add_object("a"), Err(Error::Vocabulary(_))));

    assert_eq!(instance.object_count(), objects);
    assert_eq!(instance.atoms().len(), 1);
  }
}
