/*!

Booleans denote truth values: `b_nullary(p)` holds when the nullary atom `p` holds, `b_empty(X)` when the concept or
role `X` is empty, and `b_inclusion(X, Y)` when `X` is a subset of `Y` (both concepts or both roles).

*/

use crate::api::element::{
  ConceptRef,
  RoleRef,
  SCORE_CONSTANT,
  SCORE_LINEAR,
  SCORE_QUADRATIC,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Boolean {
  Nullary { predicate: usize },
  ConceptEmpty(ConceptRef),
  RoleEmpty(RoleRef),
  ConceptInclusion(ConceptRef, ConceptRef),
  RoleInclusion(RoleRef, RoleRef),
}

impl Boolean {
  pub fn keyword(&self) -> &'static str {
    match self {
      Boolean::Nullary { .. } => "b_nullary",

      Boolean::ConceptEmpty(_)
      | Boolean::RoleEmpty(_) => "b_empty",

      Boolean::ConceptInclusion(..)
      | Boolean::RoleInclusion(..) => "b_inclusion",
    }
  }

  pub fn cost(&self) -> usize {
    match self {
      Boolean::Nullary { .. } => SCORE_CONSTANT,

      Boolean::ConceptEmpty(_)
      | Boolean::ConceptInclusion(..) => SCORE_LINEAR,

      Boolean::RoleEmpty(_)
      | Boolean::RoleInclusion(..) => SCORE_QUADRATIC,
    }
  }
}
