/*!

Typed description-logic elements over planning states.

A vocabulary names predicates and constants; an instance adds objects and ground atoms; a state is the set of atoms
true at one point in time. Over a vocabulary, an `ElementFactory` builds four categories of elements:

| category  | denotation in a state | example                                       |
|:----------|:----------------------|:----------------------------------------------|
| concept   | set of objects        | `c_some(r_primitive(on,0,1),c_primitive(on,1))` |
| role      | set of object pairs   | `r_transitive_closure(r_primitive(on,0,1))`   |
| numerical | integer               | `n_count(c_primitive(clear,0))`               |
| boolean   | truth value           | `b_nullary(handempty)`                        |

Each distinct element exists once per factory, identified by its canonical representation. Evaluation memoizes
denotations per state, and the `generator` module enumerates every element up to a complexity bound.

*/

pub mod api;
pub mod abstractions;
mod core;
pub mod generator;

// We re-export abstractions that are meant to be used publicly.
pub use abstractions::{
  log,
  IString,
  NatSet
};

pub use self::core::{
  cache::DenotationCache,
  DenotationsCaches,
  ElementFactory,
  Error,
  Result
};

pub use api::{
  denotation::{ConceptDenotation, RoleDenotation, INF},
  element::{BooleanRef, Category, ConceptRef, ElementInfo, ElementRef, NumericalRef, RoleRef},
  instance::{Atom, InstanceInfo, Object},
  state::{State, StateId},
  syntax::{Expression, SyntaxTree},
  vocabulary::{Constant, Predicate, VocabularyInfo},
};

pub use generator::{FeatureGenerator, GenerationResult, GeneratorConfig, GeneratorRule, GeneratorRules};
