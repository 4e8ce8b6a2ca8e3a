/*!

Roles denote sets of object pairs.

| keyword                            | arguments                 | denotation                                          |
|:-----------------------------------|:--------------------------|:----------------------------------------------------|
| `r_primitive`                      | predicate, pos1, pos2     | `(o[pos1], o[pos2])` for every true atom `p(o...)`  |
| `r_top`                            |                           | every pair                                          |
| `r_not`                            | R                         | complement over all pairs                           |
| `r_and`                            | R, R                      | intersection (commutative)                          |
| `r_or`                             | R, R                      | union (commutative)                                 |
| `r_diff`                           | R, R                      | difference                                          |
| `r_inverse`                        | R                         | `{(b,a) : (a,b) in R}`                              |
| `r_compose`                        | R, S                      | `{(a,c) : some b with (a,b) in R and (b,c) in S}`   |
| `r_restrict`                       | R, C                      | `{(a,b) in R : b in C}`                             |
| `r_identity`                       | C                         | `{(a,a) : a in C}`                                  |
| `r_transitive_closure`             | R                         | pairs connected by a nonempty R-path                |
| `r_transitive_reflexive_closure`   | R                         | the transitive closure plus every `(a,a)`           |

*/

use crate::api::element::{
  ConceptRef,
  RoleRef,
  SCORE_CONSTANT,
  SCORE_CUBIC,
  SCORE_LINEAR,
  SCORE_QUADRATIC,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
  Primitive { predicate: usize, position1: usize, position2: usize },
  Top,
  Not(RoleRef),
  And(RoleRef, RoleRef),
  Or(RoleRef, RoleRef),
  Diff(RoleRef, RoleRef),
  Inverse(RoleRef),
  Compose(RoleRef, RoleRef),
  Restrict(RoleRef, ConceptRef),
  Identity(ConceptRef),
  TransitiveClosure(RoleRef),
  TransitiveReflexiveClosure(RoleRef),
}

impl Role {
  pub fn keyword(&self) -> &'static str {
    match self {
      Role::Primitive { .. }              => "r_primitive",
      Role::Top                           => "r_top",
      Role::Not(_)                        => "r_not",
      Role::And(..)                       => "r_and",
      Role::Or(..)                        => "r_or",
      Role::Diff(..)                      => "r_diff",
      Role::Inverse(_)                    => "r_inverse",
      Role::Compose(..)                   => "r_compose",
      Role::Restrict(..)                  => "r_restrict",
      Role::Identity(_)                   => "r_identity",
      Role::TransitiveClosure(_)          => "r_transitive_closure",
      Role::TransitiveReflexiveClosure(_) => "r_transitive_reflexive_closure",
    }
  }

  pub fn cost(&self) -> usize {
    match self {
      Role::Top => SCORE_CONSTANT,

      Role::Primitive { .. }
      | Role::Identity(_) => SCORE_LINEAR,

      Role::Not(_)
      | Role::And(..)
      | Role::Or(..)
      | Role::Diff(..)
      | Role::Inverse(_)
      | Role::Restrict(..) => SCORE_QUADRATIC,

      Role::Compose(..)
      | Role::TransitiveClosure(_)
      | Role::TransitiveReflexiveClosure(_) => SCORE_CUBIC,
    }
  }
}
