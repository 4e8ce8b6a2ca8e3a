/*!

Numericals denote non-negative integers, with `INF` standing for "no path".

`n_count` counts a concept or a role. The distance operators take a *from* element, a role `R` whose pairs are the
edges of a directed graph over objects, and a *to* element:

| keyword                  | arguments | denotation                                                                  |
|:-------------------------|:----------|:----------------------------------------------------------------------------|
| `n_concept_distance`     | C, R, C   | shortest R-path length from any member of the first to any of the second    |
| `n_sum_concept_distance` | C, R, C   | sum over each member of the first of its distance to the nearest of second  |
| `n_role_distance`        | R, R, R   | min over `a`, `(a,b)` in first, `(a,c)` in third of the distance `b` to `c` |
| `n_sum_role_distance`    | R, R, R   | sum over each `a` with a pair in the first of that minimum for `a`          |

All distances are `INF` when either side is empty. Sums saturate: a single unreachable term makes the sum `INF`.

*/

use crate::api::element::{
  ConceptRef,
  RoleRef,
  SCORE_CUBIC,
  SCORE_LINEAR,
  SCORE_QUADRATIC,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Numerical {
  ConceptCount(ConceptRef),
  RoleCount(RoleRef),
  ConceptDistance(ConceptRef, RoleRef, ConceptRef),
  RoleDistance(RoleRef, RoleRef, RoleRef),
  SumConceptDistance(ConceptRef, RoleRef, ConceptRef),
  SumRoleDistance(RoleRef, RoleRef, RoleRef),
}

impl Numerical {
  pub fn keyword(&self) -> &'static str {
    match self {
      Numerical::ConceptCount(_)
      | Numerical::RoleCount(_)           => "n_count",
      Numerical::ConceptDistance(..)      => "n_concept_distance",
      Numerical::RoleDistance(..)         => "n_role_distance",
      Numerical::SumConceptDistance(..)   => "n_sum_concept_distance",
      Numerical::SumRoleDistance(..)      => "n_sum_role_distance",
    }
  }

  pub fn cost(&self) -> usize {
    match self {
      Numerical::ConceptCount(_) => SCORE_LINEAR,
      Numerical::RoleCount(_)    => SCORE_QUADRATIC,

      Numerical::ConceptDistance(..)
      | Numerical::SumConceptDistance(..)
      | Numerical::RoleDistance(..)
      | Numerical::SumRoleDistance(..) => SCORE_CUBIC,
    }
  }
}
