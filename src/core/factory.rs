/*!

The `ElementFactory` owns every element built over one vocabulary and guarantees that each distinct expression exists
exactly once.

Each `make_*` operation computes the canonical representation of the requested element from the representations of
its children, looks it up in the table of the element's category, and either returns the existing handle or inserts
the element. Operands of commutative operators (`c_and`, `c_or`, `c_equal`, `r_and`, `r_or`) are ordered by their
representations first, so `c_and(A,B)` and `c_and(B,A)` are the same element.

| representation                         | complexity | meaning                   |
|:---------------------------------------|:-----------|:--------------------------|
| `c_top`                                | 1          | nullary keywords are bare |
| `c_primitive(on,0)`                    | 1          | integers in decimal       |
| `c_and(c_primitive(on,0),c_top)`       | 3          | no spaces                 |

Construction is atomic: a `make_*` call either inserts exactly one new element or returns an error and leaves the
factory unchanged. Errors are `Structural` for a handle that does not belong to this factory or a projection position
other than 0 or 1, and `Vocabulary` for a predicate or constant that does not belong to the factory's vocabulary, a
position at or past the predicate's arity, or `b_nullary` over a predicate with nonzero arity.

*/

use std::rc::Rc;

use crate::{
  abstractions::join_string,
  api::{
    boolean::Boolean,
    concept::Concept,
    element::{
      BooleanRef,
      Category,
      ConceptRef,
      ElementInfo,
      ElementRef,
      NumericalRef,
      RoleRef,
    },
    numerical::Numerical,
    role::Role,
    vocabulary::{Constant, Predicate, VocabularyInfo},
  },
  core::{
    element_table::ElementTable,
    Error,
    Result,
  },
  trace,
};

pub struct ElementFactory {
  vocabulary           : Rc<VocabularyInfo>,
  pub(crate) concepts  : ElementTable<Concept>,
  pub(crate) roles     : ElementTable<Role>,
  pub(crate) numericals: ElementTable<Numerical>,
  pub(crate) booleans  : ElementTable<Boolean>,
}

impl ElementFactory {
  pub fn new(vocabulary: Rc<VocabularyInfo>) -> Self {
    ElementFactory {
      vocabulary,
      concepts  : ElementTable::default(),
      roles     : ElementTable::default(),
      numericals: ElementTable::default(),
      booleans  : ElementTable::default(),
    }
  }

  pub fn vocabulary(&self) -> &Rc<VocabularyInfo> {
    &self.vocabulary
  }

  // region Accessors

  /// Representation, complexity, staticness and score of `element`.
  pub fn info(&self, element: impl Into<ElementRef>) -> Result<&ElementInfo> {
    match element.into() {
      ElementRef::Concept(concept)     => self.concept_info(concept),
      ElementRef::Role(role)           => self.role_info(role),
      ElementRef::Numerical(numerical) => self.numerical_info(numerical),
      ElementRef::Boolean(boolean)     => self.boolean_info(boolean),
    }
  }

  pub fn repr(&self, element: impl Into<ElementRef>) -> Result<&str> {
    Ok(self.info(element)?.repr.as_str())
  }

  pub fn complexity(&self, element: impl Into<ElementRef>) -> Result<usize> {
    Ok(self.info(element)?.complexity)
  }

  pub fn is_static(&self, element: impl Into<ElementRef>) -> Result<bool> {
    Ok(self.info(element)?.is_static)
  }

  pub fn score(&self, element: impl Into<ElementRef>) -> Result<usize> {
    Ok(self.info(element)?.score)
  }

  pub fn concept(&self, concept: ConceptRef) -> Result<&Concept> {
    self.concepts
        .get(concept.index())
        .map(|entry| &entry.element)
        .ok_or_else(|| foreign_handle(concept))
  }

  pub fn role(&self, role: RoleRef) -> Result<&Role> {
    self.roles
        .get(role.index())
        .map(|entry| &entry.element)
        .ok_or_else(|| foreign_handle(role))
  }

  pub fn numerical(&self, numerical: NumericalRef) -> Result<&Numerical> {
    self.numericals
        .get(numerical.index())
        .map(|entry| &entry.element)
        .ok_or_else(|| foreign_handle(numerical))
  }

  pub fn boolean(&self, boolean: BooleanRef) -> Result<&Boolean> {
    self.booleans
        .get(boolean.index())
        .map(|entry| &entry.element)
        .ok_or_else(|| foreign_handle(boolean))
  }

  /// The number of distinct elements of `category` built so far.
  pub fn element_count(&self, category: Category) -> usize {
    match category {
      Category::Concept   => self.concepts.len(),
      Category::Role      => self.roles.len(),
      Category::Numerical => self.numericals.len(),
      Category::Boolean   => self.booleans.len(),
    }
  }

  /// Looks up the element with the given canonical representation without building anything.
  pub fn find(&self, category: Category, repr: &str) -> Option<ElementRef> {
    match category {
      Category::Concept   => self.concepts.find(repr).map(|index| ConceptRef(index).into()),
      Category::Role      => self.roles.find(repr).map(|index| RoleRef(index).into()),
      Category::Numerical => self.numericals.find(repr).map(|index| NumericalRef(index).into()),
      Category::Boolean   => self.booleans.find(repr).map(|index| BooleanRef(index).into()),
    }
  }

  pub(crate) fn concept_info(&self, concept: ConceptRef) -> Result<&ElementInfo> {
    self.concepts
        .get(concept.index())
        .map(|entry| &entry.info)
        .ok_or_else(|| foreign_handle(concept))
  }

  pub(crate) fn role_info(&self, role: RoleRef) -> Result<&ElementInfo> {
    self.roles
        .get(role.index())
        .map(|entry| &entry.info)
        .ok_or_else(|| foreign_handle(role))
  }

  pub(crate) fn numerical_info(&self, numerical: NumericalRef) -> Result<&ElementInfo> {
    self.numericals
        .get(numerical.index())
        .map(|entry| &entry.info)
        .ok_or_else(|| foreign_handle(numerical))
  }

  pub(crate) fn boolean_info(&self, boolean: BooleanRef) -> Result<&ElementInfo> {
    self.booleans
        .get(boolean.index())
        .map(|entry| &entry.info)
        .ok_or_else(|| foreign_handle(boolean))
  }

  // endregion Accessors

  // region Concepts

  pub fn make_primitive_concept(&mut self, predicate: &Predicate, position: usize) -> Result<ConceptRef> {
    let predicate = self.own_predicate(predicate)?;
    self.insert_concept(Concept::Primitive { predicate, position })
  }

  pub fn make_bot_concept(&mut self) -> Result<ConceptRef> {
    self.insert_concept(Concept::Bot)
  }

  pub fn make_top_concept(&mut self) -> Result<ConceptRef> {
    self.insert_concept(Concept::Top)
  }

  pub fn make_one_of_concept(&mut self, constant: &Constant) -> Result<ConceptRef> {
    let constant = self.own_constant(constant)?;
    self.insert_concept(Concept::OneOf { constant })
  }

  pub fn make_not_concept(&mut self, concept: ConceptRef) -> Result<ConceptRef> {
    self.insert_concept(Concept::Not(concept))
  }

  pub fn make_and_concept(&mut self, left: ConceptRef, right: ConceptRef) -> Result<ConceptRef> {
    let (left, right) = self.ordered_concepts(left, right)?;
    self.insert_concept(Concept::And(left, right))
  }

  pub fn make_or_concept(&mut self, left: ConceptRef, right: ConceptRef) -> Result<ConceptRef> {
    let (left, right) = self.ordered_concepts(left, right)?;
    self.insert_concept(Concept::Or(left, right))
  }

  pub fn make_diff_concept(&mut self, left: ConceptRef, right: ConceptRef) -> Result<ConceptRef> {
    self.insert_concept(Concept::Diff(left, right))
  }

  pub fn make_some_concept(&mut self, role: RoleRef, concept: ConceptRef) -> Result<ConceptRef> {
    self.insert_concept(Concept::Some(role, concept))
  }

  pub fn make_all_concept(&mut self, role: RoleRef, concept: ConceptRef) -> Result<ConceptRef> {
    self.insert_concept(Concept::All(role, concept))
  }

  pub fn make_subset_concept(&mut self, left: RoleRef, right: RoleRef) -> Result<ConceptRef> {
    self.insert_concept(Concept::Subset(left, right))
  }

  pub fn make_equal_concept(&mut self, left: RoleRef, right: RoleRef) -> Result<ConceptRef> {
    let (left, right) = self.ordered_roles(left, right)?;
    self.insert_concept(Concept::Equal(left, right))
  }

  pub fn make_projection_concept(&mut self, role: RoleRef, position: usize) -> Result<ConceptRef> {
    self.insert_concept(Concept::Projection(role, position))
  }

  // endregion Concepts

  // region Roles

  pub fn make_primitive_role(&mut self, predicate: &Predicate, position1: usize, position2: usize) -> Result<RoleRef> {
    let predicate = self.own_predicate(predicate)?;
    self.insert_role(Role::Primitive { predicate, position1, position2 })
  }

  pub fn make_top_role(&mut self) -> Result<RoleRef> {
    self.insert_role(Role::Top)
  }

  pub fn make_not_role(&mut self, role: RoleRef) -> Result<RoleRef> {
    self.insert_role(Role::Not(role))
  }

  pub fn make_and_role(&mut self, left: RoleRef, right: RoleRef) -> Result<RoleRef> {
    let (left, right) = self.ordered_roles(left, right)?;
    self.insert_role(Role::And(left, right))
  }

  pub fn make_or_role(&mut self, left: RoleRef, right: RoleRef) -> Result<RoleRef> {
    let (left, right) = self.ordered_roles(left, right)?;
    self.insert_role(Role::Or(left, right))
  }

  pub fn make_diff_role(&mut self, left: RoleRef, right: RoleRef) -> Result<RoleRef> {
    self.insert_role(Role::Diff(left, right))
  }

  pub fn make_inverse_role(&mut self, role: RoleRef) -> Result<RoleRef> {
    self.insert_role(Role::Inverse(role))
  }

  pub fn make_compose_role(&mut self, left: RoleRef, right: RoleRef) -> Result<RoleRef> {
    self.insert_role(Role::Compose(left, right))
  }

  pub fn make_restrict_role(&mut self, role: RoleRef, concept: ConceptRef) -> Result<RoleRef> {
    self.insert_role(Role::Restrict(role, concept))
  }

  pub fn make_identity_role(&mut self, concept: ConceptRef) -> Result<RoleRef> {
    self.insert_role(Role::Identity(concept))
  }

  pub fn make_transitive_closure_role(&mut self, role: RoleRef) -> Result<RoleRef> {
    self.insert_role(Role::TransitiveClosure(role))
  }

  pub fn make_transitive_reflexive_closure_role(&mut self, role: RoleRef) -> Result<RoleRef> {
    self.insert_role(Role::TransitiveReflexiveClosure(role))
  }

  // endregion Roles

  // region Numericals

  pub fn make_concept_count_numerical(&mut self, concept: ConceptRef) -> Result<NumericalRef> {
    self.insert_numerical(Numerical::ConceptCount(concept))
  }

  pub fn make_role_count_numerical(&mut self, role: RoleRef) -> Result<NumericalRef> {
    self.insert_numerical(Numerical::RoleCount(role))
  }

  pub fn make_concept_distance_numerical(
    &mut self,
    from: ConceptRef,
    role: RoleRef,
    to  : ConceptRef,
  ) -> Result<NumericalRef>
  {
    self.insert_numerical(Numerical::ConceptDistance(from, role, to))
  }

  pub fn make_role_distance_numerical(&mut self, from: RoleRef, role: RoleRef, to: RoleRef) -> Result<NumericalRef> {
    self.insert_numerical(Numerical::RoleDistance(from, role, to))
  }

  pub fn make_sum_concept_distance_numerical(
    &mut self,
    from: ConceptRef,
    role: RoleRef,
    to  : ConceptRef,
  ) -> Result<NumericalRef>
  {
    self.insert_numerical(Numerical::SumConceptDistance(from, role, to))
  }

  pub fn make_sum_role_distance_numerical(
    &mut self,
    from: RoleRef,
    role: RoleRef,
    to  : RoleRef,
  ) -> Result<NumericalRef>
  {
    self.insert_numerical(Numerical::SumRoleDistance(from, role, to))
  }

  // endregion Numericals

  // region Booleans

  pub fn make_nullary_boolean(&mut self, predicate: &Predicate) -> Result<BooleanRef> {
    let predicate = self.own_predicate(predicate)?;
    self.insert_boolean(Boolean::Nullary { predicate })
  }

  pub fn make_concept_empty_boolean(&mut self, concept: ConceptRef) -> Result<BooleanRef> {
    self.insert_boolean(Boolean::ConceptEmpty(concept))
  }

  pub fn make_role_empty_boolean(&mut self, role: RoleRef) -> Result<BooleanRef> {
    self.insert_boolean(Boolean::RoleEmpty(role))
  }

  pub fn make_concept_inclusion_boolean(&mut self, left: ConceptRef, right: ConceptRef) -> Result<BooleanRef> {
    self.insert_boolean(Boolean::ConceptInclusion(left, right))
  }

  pub fn make_role_inclusion_boolean(&mut self, left: RoleRef, right: RoleRef) -> Result<BooleanRef> {
    self.insert_boolean(Boolean::RoleInclusion(left, right))
  }

  // endregion Booleans

  // region Insertion

  fn insert_concept(&mut self, concept: Concept) -> Result<ConceptRef> {
    let info              = self.concept_node_info(&concept)?;
    let (index, inserted) = self.concepts.insert(concept, info);
    if inserted {
      self.trace_insertion(Category::Concept, index);
    }
    Ok(ConceptRef(index))
  }

  fn insert_role(&mut self, role: Role) -> Result<RoleRef> {
    let info              = self.role_node_info(&role)?;
    let (index, inserted) = self.roles.insert(role, info);
    if inserted {
      self.trace_insertion(Category::Role, index);
    }
    Ok(RoleRef(index))
  }

  fn insert_numerical(&mut self, numerical: Numerical) -> Result<NumericalRef> {
    let info              = self.numerical_node_info(&numerical)?;
    let (index, inserted) = self.numericals.insert(numerical, info);
    if inserted {
      self.trace_insertion(Category::Numerical, index);
    }
    Ok(NumericalRef(index))
  }

  fn insert_boolean(&mut self, boolean: Boolean) -> Result<BooleanRef> {
    let info              = self.boolean_node_info(&boolean)?;
    let (index, inserted) = self.booleans.insert(boolean, info);
    if inserted {
      self.trace_insertion(Category::Boolean, index);
    }
    Ok(BooleanRef(index))
  }

  fn trace_insertion(&self, category: Category, index: u32) {
    let repr = match category {
      Category::Concept   => self.concepts.get(index as usize).map(|entry| entry.info.repr.as_str()),
      Category::Role      => self.roles.get(index as usize).map(|entry| entry.info.repr.as_str()),
      Category::Numerical => self.numericals.get(index as usize).map(|entry| entry.info.repr.as_str()),
      Category::Boolean   => self.booleans.get(index as usize).map(|entry| entry.info.repr.as_str()),
    };
    trace!(4, "inserted {} {} at index {}", category, repr.unwrap_or_default(), index);
  }

  fn concept_node_info(&self, concept: &Concept) -> Result<ElementInfo> {
    let keyword = concept.keyword();
    let cost    = concept.cost();

    match concept {
      Concept::Primitive { predicate, position } => {
        let predicate = self.predicate_with_position(*predicate, *position)?;
        Ok(leaf(format!("{}({},{})", keyword, predicate.name, position), predicate.is_static, cost))
      }

      Concept::Bot | Concept::Top => Ok(leaf(keyword.to_string(), true, cost)),

      Concept::OneOf { constant } => {
        let constant = self.vocabulary
                           .constant(*constant)
                           .ok_or_else(|| Error::Vocabulary(format!("unknown constant index {}", constant)))?;
        Ok(leaf(format!("{}({})", keyword, constant.name), true, cost))
      }

      Concept::Not(concept) => Ok(composite(keyword, cost, &[self.concept_info(*concept)?], None)),

      Concept::And(left, right)
      | Concept::Or(left, right)
      | Concept::Diff(left, right) => {
        Ok(composite(keyword, cost, &[self.concept_info(*left)?, self.concept_info(*right)?], None))
      }

      Concept::Some(role, concept)
      | Concept::All(role, concept) => {
        Ok(composite(keyword, cost, &[self.role_info(*role)?, self.concept_info(*concept)?], None))
      }

      Concept::Subset(left, right)
      | Concept::Equal(left, right) => {
        Ok(composite(keyword, cost, &[self.role_info(*left)?, self.role_info(*right)?], None))
      }

      Concept::Projection(role, position) => {
        if *position > 1 {
          return Err(Error::Structural(format!("projection position {} is not 0 or 1", position)));
        }
        Ok(composite(keyword, cost, &[self.role_info(*role)?], Some(*position)))
      }
    }
  }

  fn role_node_info(&self, role: &Role) -> Result<ElementInfo> {
    let keyword = role.keyword();
    let cost    = role.cost();

    match role {
      Role::Primitive { predicate, position1, position2 } => {
        self.predicate_with_position(*predicate, *position1)?;
        let predicate = self.predicate_with_position(*predicate, *position2)?;
        Ok(leaf(
          format!("{}({},{},{})", keyword, predicate.name, position1, position2),
          predicate.is_static,
          cost,
        ))
      }

      Role::Top => Ok(leaf(keyword.to_string(), true, cost)),

      Role::Not(role)
      | Role::Inverse(role)
      | Role::TransitiveClosure(role)
      | Role::TransitiveReflexiveClosure(role) => Ok(composite(keyword, cost, &[self.role_info(*role)?], None)),

      Role::And(left, right)
      | Role::Or(left, right)
      | Role::Diff(left, right)
      | Role::Compose(left, right) => {
        Ok(composite(keyword, cost, &[self.role_info(*left)?, self.role_info(*right)?], None))
      }

      Role::Restrict(role, concept) => {
        Ok(composite(keyword, cost, &[self.role_info(*role)?, self.concept_info(*concept)?], None))
      }

      Role::Identity(concept) => Ok(composite(keyword, cost, &[self.concept_info(*concept)?], None)),
    }
  }

  fn numerical_node_info(&self, numerical: &Numerical) -> Result<ElementInfo> {
    let keyword = numerical.keyword();
    let cost    = numerical.cost();

    let children = match numerical {
      Numerical::ConceptCount(concept) => vec![self.concept_info(*concept)?],
      Numerical::RoleCount(role)       => vec![self.role_info(*role)?],

      Numerical::ConceptDistance(from, role, to)
      | Numerical::SumConceptDistance(from, role, to) => {
        vec![self.concept_info(*from)?, self.role_info(*role)?, self.concept_info(*to)?]
      }

      Numerical::RoleDistance(from, role, to)
      | Numerical::SumRoleDistance(from, role, to) => {
        vec![self.role_info(*from)?, self.role_info(*role)?, self.role_info(*to)?]
      }
    };

    Ok(composite(keyword, cost, &children, None))
  }

  fn boolean_node_info(&self, boolean: &Boolean) -> Result<ElementInfo> {
    let keyword = boolean.keyword();
    let cost    = boolean.cost();

    let children = match boolean {
      Boolean::Nullary { predicate } => {
        let predicate = self.vocabulary
                            .predicate(*predicate)
                            .ok_or_else(|| Error::Vocabulary(format!("unknown predicate index {}", predicate)))?;
        if predicate.arity != 0 {
          return Err(Error::Vocabulary(format!("b_nullary requires a nullary predicate but {} is not", predicate)));
        }
        return Ok(leaf(format!("{}({})", keyword, predicate.name), predicate.is_static, cost));
      }

      Boolean::ConceptEmpty(concept) => vec![self.concept_info(*concept)?],
      Boolean::RoleEmpty(role)       => vec![self.role_info(*role)?],

      Boolean::ConceptInclusion(left, right) => vec![self.concept_info(*left)?, self.concept_info(*right)?],
      Boolean::RoleInclusion(left, right)    => vec![self.role_info(*left)?, self.role_info(*right)?],
    };

    Ok(composite(keyword, cost, &children, None))
  }

  // endregion Insertion

  // region Helpers

  /// Orders the operands of a commutative concept operator by representation.
  fn ordered_concepts(&self, left: ConceptRef, right: ConceptRef) -> Result<(ConceptRef, ConceptRef)> {
    if self.concept_info(left)?.repr <= self.concept_info(right)?.repr {
      Ok((left, right))
    } else {
      Ok((right, left))
    }
  }

  fn ordered_roles(&self, left: RoleRef, right: RoleRef) -> Result<(RoleRef, RoleRef)> {
    if self.role_info(left)?.repr <= self.role_info(right)?.repr {
      Ok((left, right))
    } else {
      Ok((right, left))
    }
  }

  /// The index of `predicate` if it is a predicate of this factory's vocabulary.
  fn own_predicate(&self, predicate: &Predicate) -> Result<usize> {
    match self.vocabulary.predicate(predicate.index) {
      Some(own) if own == predicate => Ok(predicate.index),
      _ => Err(Error::Vocabulary(format!("predicate {} is not part of the factory's vocabulary", predicate))),
    }
  }

  fn own_constant(&self, constant: &Constant) -> Result<usize> {
    match self.vocabulary.constant(constant.index) {
      Some(own) if own == constant => Ok(constant.index),
      _ => Err(Error::Vocabulary(format!("constant {} is not part of the factory's vocabulary", constant))),
    }
  }

  fn predicate_with_position(&self, predicate: usize, position: usize) -> Result<&Predicate> {
    let predicate = self.vocabulary
                        .predicate(predicate)
                        .ok_or_else(|| Error::Vocabulary(format!("unknown predicate index {}", predicate)))?;
    if position >= predicate.arity {
      return Err(Error::Vocabulary(format!("position {} is out of range for predicate {}", position, predicate)));
    }
    Ok(predicate)
  }

  // endregion Helpers
}

fn foreign_handle(element: impl Into<ElementRef>) -> Error {
  let element = element.into();
  Error::Structural(format!("{} {} does not belong to this factory", element.category(), element.index()))
}

fn leaf(repr: String, is_static: bool, cost: usize) -> ElementInfo {
  ElementInfo { repr, complexity: 1, is_static, score: cost }
}

/// Composes `keyword(child,...,parameter)`. Complexity and score add up over the children.
fn composite(keyword: &str, cost: usize, children: &[&ElementInfo], parameter: Option<usize>) -> ElementInfo {
  let arguments = children.iter()
                          .map(|child| child.repr.clone())
                          .chain(parameter.map(|parameter| parameter.to_string()));

  ElementInfo {
    repr      : format!("{}({})", keyword, join_string(arguments, ",")),
    complexity: 1 + children.iter().map(|child| child.complexity).sum::<usize>(),
    is_static : children.iter().all(|child| child.is_static),
    score     : cost + children.iter().map(|child| child.score).sum::<usize>(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::element::{SCORE_CUBIC, SCORE_LINEAR};

  fn factory() -> ElementFactory {
    let mut vocabulary = VocabularyInfo::new();
    vocabulary.add_predicate("on", 2).unwrap();
    vocabulary.add_predicate("clear", 1).unwrap();
    vocabulary.add_static_predicate("on_g", 2).unwrap();
    vocabulary.add_predicate("handempty", 0).unwrap();
    vocabulary.add_constant("table").unwrap();
    ElementFactory::new(Rc::new(vocabulary))
  }

  #[test]
  fn commutative_operands_are_ordered() {
    let mut factory = factory();
    let vocabulary  = factory.vocabulary().clone();
    let on    = vocabulary.predicate_by_name("on").unwrap();
    let clear = vocabulary.predicate_by_name("clear").unwrap();

    let a = factory.make_primitive_concept(clear, 0).unwrap();
    let b = factory.make_primitive_concept(on, 1).unwrap();
    let ab = factory.make_and_concept(a, b).unwrap();
    let ba = factory.make_and_concept(b, a).unwrap();
    assert_eq!(ab, ba);
    assert_eq!(factory.repr(ab).unwrap(), "c_and(c_primitive(clear,0),c_primitive(on,1))");
    assert_ne!(factory.make_or_concept(a, b).unwrap(), factory.make_diff_concept(b, a).unwrap());
    assert_ne!(factory.make_diff_concept(a, b).unwrap(), factory.make_diff_concept(b, a).unwrap());

    let r = factory.make_primitive_role(on, 0, 1).unwrap();
    let s = factory.make_inverse_role(r).unwrap();
    assert_eq!(factory.make_and_role(r, s).unwrap(), factory.make_and_role(s, r).unwrap());
    assert_eq!(factory.make_or_role(r, s).unwrap(), factory.make_or_role(s, r).unwrap());
    assert_eq!(factory.make_equal_concept(r, s).unwrap(), factory.make_equal_concept(s, r).unwrap());
  }

  #[test]
  fn complexity_is_one_plus_children() {
    let mut factory = factory();
    let vocabulary  = factory.vocabulary().clone();
    let on          = vocabulary.predicate_by_name("on").unwrap();

    let top  = factory.make_top_concept().unwrap();
    let role = factory.make_primitive_role(on, 0, 1).unwrap();
    let some = factory.make_some_concept(role, top).unwrap();
    let not  = factory.make_not_concept(some).unwrap();
    let dist = factory.make_concept_distance_numerical(top, role, not).unwrap();

    assert_eq!(factory.complexity(top).unwrap(), 1);
    assert_eq!(factory.complexity(role).unwrap(), 1);
    assert_eq!(factory.complexity(some).unwrap(), 3);
    assert_eq!(factory.complexity(not).unwrap(), 4);
    assert_eq!(factory.complexity(dist).unwrap(), 1 + 1 + 1 + 4);
    assert_eq!(factory.repr(dist).unwrap(), "n_concept_distance(c_top,r_primitive(on,0,1),c_not(c_some(r_primitive(on,0,1),c_top)))");
  }

  #[test]
  fn equal_expressions_share_one_element() {
    let mut factory = factory();
    let top1 = factory.make_top_concept().unwrap();
    let top2 = factory.make_top_concept().unwrap();
    assert_eq!(top1, top2);
    assert_eq!(factory.element_count(Category::Concept), 1);
    assert_eq!(factory.find(Category::Concept, "c_top"), Some(top1.into()));
  }

  #[test]
  fn staticness_follows_predicates() {
    let mut factory = factory();
    let vocabulary  = factory.vocabulary().clone();
    let goal  = factory.make_primitive_role(vocabulary.predicate_by_name("on_g").unwrap(), 0, 1).unwrap();
    let on    = factory.make_primitive_role(vocabulary.predicate_by_name("on").unwrap(), 0, 1).unwrap();
    let top   = factory.make_top_concept().unwrap();
    let static_some  = factory.make_some_concept(goal, top).unwrap();
    let dynamic_some = factory.make_some_concept(on, top).unwrap();
    assert!(factory.is_static(goal).unwrap());
    assert!(factory.is_static(static_some).unwrap());
    assert!(!factory.is_static(dynamic_some).unwrap());
  }

  #[test]
  fn scores_add_cost_classes() {
    let mut factory = factory();
    let top  = factory.make_top_concept().unwrap();
    let role = factory.make_top_role().unwrap();
    let tc   = factory.make_transitive_closure_role(role).unwrap();
    let all  = factory.make_all_concept(tc, top).unwrap();
    assert_eq!(factory.score(all).unwrap(), 3 + 4 + 1 + 1);
  }

  #[test]
  fn distances_cost_cubic() {
    let mut factory = factory();
    let top   = factory.make_top_concept().unwrap();
    let bot   = factory.make_bot_concept().unwrap();
    let role  = factory.make_top_role().unwrap();
    let dist  = factory.make_concept_distance_numerical(top, role, bot).unwrap();
    let sum   = factory.make_sum_concept_distance_numerical(top, role, bot).unwrap();
    let count = factory.make_concept_count_numerical(top).unwrap();
    assert_eq!(factory.score(dist).unwrap(), SCORE_CUBIC + 3);
    assert_eq!(factory.score(sum).unwrap(), SCORE_CUBIC + 3);
    assert_eq!(factory.score(count).unwrap(), SCORE_LINEAR + 1);
  }

  #[test]
  fn structural_preconditions() {
    let mut factory = factory();
    let role = factory.make_top_role().unwrap();
    assert!(matches!(factory.make_projection_concept(role, 2), Err(Error::Structural(_))));
    assert!(matches!(factory.make_not_concept(ConceptRef(42)), Err(Error::Structural(_))));
    assert!(matches!(factory.make_role_count_numerical(RoleRef(9)), Err(Error::Structural(_))));
    // Nothing was inserted by the failed calls.
    assert_eq!(factory.element_count(Category::Concept), 0);
    assert_eq!(factory.element_count(Category::Numerical), 0);
  }

  #[test]
  fn vocabulary_preconditions() {
    let mut factory = factory();
    let vocabulary  = factory.vocabulary().clone();
    let clear     = vocabulary.predicate_by_name("clear").unwrap();
    let handempty = vocabulary.predicate_by_name("handempty").unwrap();

    assert!(matches!(factory.make_primitive_concept(clear, 1), Err(Error::Vocabulary(_))));
    assert!(matches!(factory.make_primitive_role(clear, 0, 1), Err(Error::Vocabulary(_))));
    assert!(matches!(factory.make_nullary_boolean(clear), Err(Error::Vocabulary(_))));
    assert!(factory.make_nullary_boolean(handempty).is_ok());

    let mut other = VocabularyInfo::new();
    other.add_predicate("at", 2).unwrap();
    let foreign = other.predicate_by_name("at").unwrap();
    assert!(matches!(factory.make_primitive_concept(foreign, 0), Err(Error::Vocabulary(_))));

    let table = vocabulary.constant_by_name("table").unwrap();
    let one_of = factory.make_one_of_concept(table).unwrap();
    assert_eq!(factory.repr(one_of).unwrap(), "c_one_of(table)");
  }
}
