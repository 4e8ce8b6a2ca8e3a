/*!

An `ElementTable` is the arena holding every element of one category. Elements are addressed by their position in the
arena, which never changes, and are deduplicated by their canonical representation: inserting an element whose
representation is already present returns the existing position and drops the new value.

*/

use crate::{
  abstractions::HashMap,
  api::element::ElementInfo,
};

pub(crate) struct ElementEntry<T> {
  pub element: T,
  pub info   : ElementInfo,
}

pub(crate) struct ElementTable<T> {
  entries      : Vec<ElementEntry<T>>,
  index_by_repr: HashMap<String, u32>,
}

impl<T> Default for ElementTable<T> {
  fn default() -> Self {
    ElementTable {
      entries      : Vec::new(),
      index_by_repr: HashMap::new(),
    }
  }
}

impl<T> ElementTable<T> {
  #[inline(always)]
  pub fn get(&self, index: usize) -> Option<&ElementEntry<T>> {
    self.entries.get(index)
  }

  pub fn find(&self, repr: &str) -> Option<u32> {
    self.index_by_repr.get(repr).copied()
  }

  /// Returns the position of the element with `info.repr`, inserting `element` if there is none yet. The flag is
  /// true if the element was inserted.
  pub fn insert(&mut self, element: T, info: ElementInfo) -> (u32, bool) {
    if let Some(index) = self.find(&info.repr) {
      return (index, false);
    }
    let index = self.entries.len() as u32;
    self.index_by_repr.insert(info.repr.clone(), index);
    self.entries.push(ElementEntry { element, info });
    (index, true)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }
}
