/*!

Concepts denote sets of objects.

| keyword        | arguments               | denotation                                                   |
|:---------------|:------------------------|:-------------------------------------------------------------|
| `c_primitive`  | predicate, position     | objects at `position` of some true atom of the predicate     |
| `c_bot`        |                         | the empty set                                                |
| `c_top`        |                         | every object                                                 |
| `c_one_of`     | constant                | the object named by the constant                             |
| `c_not`        | C                       | complement of C                                              |
| `c_and`        | C, C                    | intersection (commutative)                                   |
| `c_or`         | C, C                    | union (commutative)                                          |
| `c_diff`       | C, C                    | difference                                                   |
| `c_some`       | R, C                    | `{a : some b with (a,b) in R and b in C}`                    |
| `c_all`        | R, C                    | `{a : every b with (a,b) in R is in C}`                      |
| `c_subset`     | R, R                    | `{a : every (a,b) in the first role is in the second}`       |
| `c_equal`      | R, R                    | `{a : the rows of a agree in both roles}` (commutative)      |
| `c_projection` | R, position             | first (0) or second (1) coordinates of the pairs of R        |

*/

use crate::api::element::{
  ConceptRef,
  RoleRef,
  SCORE_CONSTANT,
  SCORE_LINEAR,
  SCORE_QUADRATIC,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Concept {
  Primitive { predicate: usize, position: usize },
  Bot,
  Top,
  OneOf { constant: usize },
  Not(ConceptRef),
  And(ConceptRef, ConceptRef),
  Or(ConceptRef, ConceptRef),
  Diff(ConceptRef, ConceptRef),
  Some(RoleRef, ConceptRef),
  All(RoleRef, ConceptRef),
  Subset(RoleRef, RoleRef),
  Equal(RoleRef, RoleRef),
  Projection(RoleRef, usize),
}

impl Concept {
  pub fn keyword(&self) -> &'static str {
    match self {
      Concept::Primitive { .. } => "c_primitive",
      Concept::Bot              => "c_bot",
      Concept::Top              => "c_top",
      Concept::OneOf { .. }     => "c_one_of",
      Concept::Not(_)           => "c_not",
      Concept::And(..)          => "c_and",
      Concept::Or(..)           => "c_or",
      Concept::Diff(..)         => "c_diff",
      Concept::Some(..)         => "c_some",
      Concept::All(..)          => "c_all",
      Concept::Subset(..)       => "c_subset",
      Concept::Equal(..)        => "c_equal",
      Concept::Projection(..)   => "c_projection",
    }
  }

  /// The evaluate-time cost class of the operator itself, not counting children.
  pub fn cost(&self) -> usize {
    match self {
      Concept::Bot
      | Concept::Top
      | Concept::OneOf { .. } => SCORE_CONSTANT,

      Concept::Primitive { .. }
      | Concept::Not(_)
      | Concept::And(..)
      | Concept::Or(..)
      | Concept::Diff(..) => SCORE_LINEAR,

      Concept::Some(..)
      | Concept::All(..)
      | Concept::Subset(..)
      | Concept::Equal(..)
      | Concept::Projection(..) => SCORE_QUADRATIC,
    }
  }
}
