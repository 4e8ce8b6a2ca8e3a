/*!

Evaluation of elements on states.

Every category has three entry points:

| form      | signature (concepts)                                             | caching                             |
|:----------|:-----------------------------------------------------------------|:------------------------------------|
| plain     | `evaluate_concept(c, &State) -> ConceptDenotation`               | shared subexpressions within a call |
| cached    | `evaluate_concept_cached(c, &State, &mut caches) -> Rc<...>`     | `(element, state id)`               |
| batched   | `evaluate_concepts(c, &[State], &mut caches) -> Rc<Vec<...>>`    | `(element, batch id)`, and per state|

All of them fail with `VocabularyMismatch` if a state's instance was built on a vocabulary other than the factory's.
The vocabularies must be the same allocation, not merely equal.

Evaluation is a pure function of the element and the state's atoms. Only the caching depends on state identity.

Evaluation recurses once per nesting level of the element. Text descriptions are capped at `syntax::MAX_DEPTH` levels
by the reader, but elements built through `make_*` or from a foreign `SyntaxTree` are not, so very deep elements can
exhaust the stack.

*/

use std::rc::Rc;

use crate::{
  api::{
    boolean::Boolean,
    concept::Concept,
    denotation::{ConceptDenotation, RoleDenotation, INF},
    element::{BooleanRef, ConceptRef, NumericalRef, RoleRef},
    instance::Atom,
    numerical::Numerical,
    role::Role,
    state::State,
  },
  core::{
    cache::DenotationsCaches,
    factory::ElementFactory,
    graph::{distances_from, pairwise_distances, saturating_sum, transitive_closure},
    Error,
    Result,
  },
};

impl ElementFactory {
  // region Plain

  pub fn evaluate_concept(&self, concept: ConceptRef, state: &State) -> Result<ConceptDenotation> {
    let denotation = self.evaluate_concept_cached(concept, state, &mut DenotationsCaches::new())?;
    Ok(Rc::try_unwrap(denotation).unwrap_or_else(|shared| (*shared).clone()))
  }

  pub fn evaluate_role(&self, role: RoleRef, state: &State) -> Result<RoleDenotation> {
    let denotation = self.evaluate_role_cached(role, state, &mut DenotationsCaches::new())?;
    Ok(Rc::try_unwrap(denotation).unwrap_or_else(|shared| (*shared).clone()))
  }

  pub fn evaluate_numerical(&self, numerical: NumericalRef, state: &State) -> Result<i32> {
    self.evaluate_numerical_cached(numerical, state, &mut DenotationsCaches::new())
  }

  pub fn evaluate_boolean(&self, boolean: BooleanRef, state: &State) -> Result<bool> {
    self.evaluate_boolean_cached(boolean, state, &mut DenotationsCaches::new())
  }

  // endregion Plain

  // region Cached

  pub fn evaluate_concept_cached(
    &self,
    concept: ConceptRef,
    state  : &State,
    caches : &mut DenotationsCaches,
  ) -> Result<Rc<ConceptDenotation>>
  {
    self.check_vocabulary(state)?;
    self.concept_denotation(concept, state, caches)
  }

  pub fn evaluate_role_cached(
    &self,
    role  : RoleRef,
    state : &State,
    caches: &mut DenotationsCaches,
  ) -> Result<Rc<RoleDenotation>>
  {
    self.check_vocabulary(state)?;
    self.role_denotation(role, state, caches)
  }

  pub fn evaluate_numerical_cached(
    &self,
    numerical: NumericalRef,
    state    : &State,
    caches   : &mut DenotationsCaches,
  ) -> Result<i32>
  {
    self.check_vocabulary(state)?;
    self.numerical_denotation(numerical, state, caches)
  }

  pub fn evaluate_boolean_cached(
    &self,
    boolean: BooleanRef,
    state  : &State,
    caches : &mut DenotationsCaches,
  ) -> Result<bool>
  {
    self.check_vocabulary(state)?;
    self.boolean_denotation(boolean, state, caches)
  }

  // endregion Cached

  // region Batched

  pub fn evaluate_concepts(
    &self,
    concept: ConceptRef,
    states : &[State],
    caches : &mut DenotationsCaches,
  ) -> Result<Rc<Vec<ConceptDenotation>>>
  {
    self.check_vocabularies(states)?;
    let key = (concept, caches.batch_id(states));
    if let Some(denotations) = caches.concept_batches.get(&key) {
      return Ok(denotations);
    }
    let denotations = Rc::new(
      states.iter()
            .map(|state| self.concept_denotation(concept, state, caches).map(|denotation| (*denotation).clone()))
            .collect::<Result<Vec<_>>>()?,
    );
    caches.concept_batches.insert(key, denotations.clone());
    Ok(denotations)
  }

  pub fn evaluate_roles(
    &self,
    role  : RoleRef,
    states: &[State],
    caches: &mut DenotationsCaches,
  ) -> Result<Rc<Vec<RoleDenotation>>>
  {
    self.check_vocabularies(states)?;
    let key = (role, caches.batch_id(states));
    if let Some(denotations) = caches.role_batches.get(&key) {
      return Ok(denotations);
    }
    let denotations = Rc::new(
      states.iter()
            .map(|state| self.role_denotation(role, state, caches).map(|denotation| (*denotation).clone()))
            .collect::<Result<Vec<_>>>()?,
    );
    caches.role_batches.insert(key, denotations.clone());
    Ok(denotations)
  }

  pub fn evaluate_numericals(
    &self,
    numerical: NumericalRef,
    states   : &[State],
    caches   : &mut DenotationsCaches,
  ) -> Result<Rc<Vec<i32>>>
  {
    self.check_vocabularies(states)?;
    let key = (numerical, caches.batch_id(states));
    if let Some(denotations) = caches.numerical_batches.get(&key) {
      return Ok(denotations);
    }
    let denotations = Rc::new(
      states.iter()
            .map(|state| self.numerical_denotation(numerical, state, caches))
            .collect::<Result<Vec<_>>>()?,
    );
    caches.numerical_batches.insert(key, denotations.clone());
    Ok(denotations)
  }

  pub fn evaluate_booleans(
    &self,
    boolean: BooleanRef,
    states : &[State],
    caches : &mut DenotationsCaches,
  ) -> Result<Rc<Vec<bool>>>
  {
    self.check_vocabularies(states)?;
    let key = (boolean, caches.batch_id(states));
    if let Some(denotations) = caches.boolean_batches.get(&key) {
      return Ok(denotations);
    }
    let denotations = Rc::new(
      states.iter()
            .map(|state| self.boolean_denotation(boolean, state, caches))
            .collect::<Result<Vec<_>>>()?,
    );
    caches.boolean_batches.insert(key, denotations.clone());
    Ok(denotations)
  }

  // endregion Batched

  fn check_vocabulary(&self, state: &State) -> Result<()> {
    if Rc::ptr_eq(state.vocabulary(), self.vocabulary()) {
      Ok(())
    } else {
      Err(Error::VocabularyMismatch)
    }
  }

  pub(crate) fn check_vocabularies(&self, states: &[State]) -> Result<()> {
    states.iter().try_for_each(|state| self.check_vocabulary(state))
  }

  // region Denotations

  fn concept_denotation(
    &self,
    concept: ConceptRef,
    state  : &State,
    caches : &mut DenotationsCaches,
  ) -> Result<Rc<ConceptDenotation>>
  {
    let key = (concept, state.id());
    if let Some(denotation) = caches.concepts.get(&key) {
      return Ok(denotation);
    }

    let n = state.object_count();
    let denotation = match self.concept(concept)? {
      Concept::Primitive { predicate, position } => {
        ConceptDenotation::from_objects(
          n,
          true_atoms(state, *predicate).map(|atom| atom.object_indices[*position]),
        )
      }

      Concept::Bot => ConceptDenotation::empty(n),

      Concept::Top => ConceptDenotation::full(n),

      Concept::OneOf { constant } => {
        let object = self.vocabulary()
                         .constant(*constant)
                         .and_then(|constant| state.instance().object_index(&constant.name));
        ConceptDenotation::from_objects(n, object)
      }

      Concept::Not(concept) => {
        let mut result = (*self.concept_denotation(*concept, state, caches)?).clone();
        result.complement_in_place();
        result
      }

      Concept::And(left, right) => {
        let mut result = (*self.concept_denotation(*left, state, caches)?).clone();
        result.intersect_in_place(&*self.concept_denotation(*right, state, caches)?);
        result
      }

      Concept::Or(left, right) => {
        let mut result = (*self.concept_denotation(*left, state, caches)?).clone();
        result.union_in_place(&*self.concept_denotation(*right, state, caches)?);
        result
      }

      Concept::Diff(left, right) => {
        let mut result = (*self.concept_denotation(*left, state, caches)?).clone();
        result.difference_in_place(&*self.concept_denotation(*right, state, caches)?);
        result
      }

      Concept::Some(role, concept) => {
        let role    = self.role_denotation(*role, state, caches)?;
        let concept = self.concept_denotation(*concept, state, caches)?;
        ConceptDenotation::from_objects(n, role.iter().filter(|(_, b)| concept.contains(*b)).map(|(a, _)| a))
      }

      Concept::All(role, concept) => {
        // Remove every object with a successor outside the concept.
        let role       = self.role_denotation(*role, state, caches)?;
        let concept    = self.concept_denotation(*concept, state, caches)?;
        let mut result = ConceptDenotation::full(n);
        for (a, b) in role.iter() {
          if !concept.contains(b) {
            result.remove(a);
          }
        }
        result
      }

      Concept::Subset(left, right) => {
        let left       = self.role_denotation(*left, state, caches)?;
        let right      = self.role_denotation(*right, state, caches)?;
        let mut result = ConceptDenotation::full(n);
        for (a, b) in left.iter() {
          if !right.contains(a, b) {
            result.remove(a);
          }
        }
        result
      }

      Concept::Equal(left, right) => {
        let left       = self.role_denotation(*left, state, caches)?;
        let right      = self.role_denotation(*right, state, caches)?;
        let mut result = ConceptDenotation::full(n);
        for a in 0..n {
          if (0..n).any(|b| left.contains(a, b) != right.contains(a, b)) {
            result.remove(a);
          }
        }
        result
      }

      Concept::Projection(role, position) => {
        let role = self.role_denotation(*role, state, caches)?;
        ConceptDenotation::from_objects(n, role.iter().map(|(a, b)| if *position == 0 { a } else { b }))
      }
    };

    let denotation = Rc::new(denotation);
    caches.concepts.insert(key, denotation.clone());
    Ok(denotation)
  }

  fn role_denotation(&self, role: RoleRef, state: &State, caches: &mut DenotationsCaches) -> Result<Rc<RoleDenotation>> {
    let key = (role, state.id());
    if let Some(denotation) = caches.roles.get(&key) {
      return Ok(denotation);
    }

    let n = state.object_count();
    let denotation = match self.role(role)? {
      Role::Primitive { predicate, position1, position2 } => {
        RoleDenotation::from_pairs(
          n,
          true_atoms(state, *predicate).map(|atom| (atom.object_indices[*position1], atom.object_indices[*position2])),
        )
      }

      Role::Top => RoleDenotation::full(n),

      Role::Not(role) => {
        let mut result = (*self.role_denotation(*role, state, caches)?).clone();
        result.complement_in_place();
        result
      }

      Role::And(left, right) => {
        let mut result = (*self.role_denotation(*left, state, caches)?).clone();
        result.intersect_in_place(&*self.role_denotation(*right, state, caches)?);
        result
      }

      Role::Or(left, right) => {
        let mut result = (*self.role_denotation(*left, state, caches)?).clone();
        result.union_in_place(&*self.role_denotation(*right, state, caches)?);
        result
      }

      Role::Diff(left, right) => {
        let mut result = (*self.role_denotation(*left, state, caches)?).clone();
        result.difference_in_place(&*self.role_denotation(*right, state, caches)?);
        result
      }

      Role::Inverse(role) => self.role_denotation(*role, state, caches)?.inverse(),

      Role::Compose(left, right) => {
        let left       = self.role_denotation(*left, state, caches)?;
        let right      = self.role_denotation(*right, state, caches)?;
        let mut result = RoleDenotation::empty(n);
        for (a, b) in left.iter() {
          for c in right.successors(b) {
            result.insert(a, c);
          }
        }
        result
      }

      Role::Restrict(role, concept) => {
        let role    = self.role_denotation(*role, state, caches)?;
        let concept = self.concept_denotation(*concept, state, caches)?;
        RoleDenotation::from_pairs(n, role.iter().filter(|(_, b)| concept.contains(*b)))
      }

      Role::Identity(concept) => {
        let concept = self.concept_denotation(*concept, state, caches)?;
        RoleDenotation::from_pairs(n, concept.iter().map(|a| (a, a)))
      }

      Role::TransitiveClosure(role) => transitive_closure(&*self.role_denotation(*role, state, caches)?),

      Role::TransitiveReflexiveClosure(role) => {
        let mut result = transitive_closure(&*self.role_denotation(*role, state, caches)?);
        for a in 0..n {
          result.insert(a, a);
        }
        result
      }
    };

    let denotation = Rc::new(denotation);
    caches.roles.insert(key, denotation.clone());
    Ok(denotation)
  }

  fn numerical_denotation(&self, numerical: NumericalRef, state: &State, caches: &mut DenotationsCaches) -> Result<i32> {
    let key = (numerical, state.id());
    if let Some(denotation) = caches.numericals.get(&key) {
      return Ok(denotation);
    }

    let denotation = match self.numerical(numerical)? {
      Numerical::ConceptCount(concept) => count(self.concept_denotation(*concept, state, caches)?.len()),

      Numerical::RoleCount(role) => count(self.role_denotation(*role, state, caches)?.len()),

      Numerical::ConceptDistance(from, role, to) => {
        // The role is only evaluated when the answer is not already decided by the endpoints.
        let from = self.concept_denotation(*from, state, caches)?;
        let to   = self.concept_denotation(*to, state, caches)?;
        if from.is_empty() || to.is_empty() {
          INF
        } else if from.intersects(&to) {
          0
        } else {
          let role      = self.role_denotation(*role, state, caches)?;
          let distances = distances_from(&role, from.iter());
          to.iter().map(|b| distances[b]).min().unwrap_or(INF)
        }
      }

      Numerical::SumConceptDistance(from, role, to) => {
        let from = self.concept_denotation(*from, state, caches)?;
        let to   = self.concept_denotation(*to, state, caches)?;
        if from.is_empty() || to.is_empty() {
          INF
        } else {
          // Searching backwards from the targets gives every object its distance to the nearest target.
          let role      = self.role_denotation(*role, state, caches)?;
          let distances = distances_from(&role.inverse(), to.iter());
          saturating_sum(from.iter().map(|b| distances[b]))
        }
      }

      Numerical::RoleDistance(from, role, to) => {
        let from = self.role_denotation(*from, state, caches)?;
        let to   = self.role_denotation(*to, state, caches)?;
        if from.is_empty() || to.is_empty() {
          INF
        } else {
          let role      = self.role_denotation(*role, state, caches)?;
          let distances = pairwise_distances(&role);
          (0..state.object_count())
              .map(|a| row_distance(&from, &to, &distances, a))
              .min()
              .unwrap_or(INF)
        }
      }

      Numerical::SumRoleDistance(from, role, to) => {
        let from = self.role_denotation(*from, state, caches)?;
        let to   = self.role_denotation(*to, state, caches)?;
        if from.is_empty() || to.is_empty() {
          INF
        } else {
          let role      = self.role_denotation(*role, state, caches)?;
          let distances = pairwise_distances(&role);
          saturating_sum(
            (0..state.object_count())
                .filter(|a| from.successors(*a).next().is_some())
                .map(|a| row_distance(&from, &to, &distances, a)),
          )
        }
      }
    };

    caches.numericals.insert(key, denotation);
    Ok(denotation)
  }

  fn boolean_denotation(&self, boolean: BooleanRef, state: &State, caches: &mut DenotationsCaches) -> Result<bool> {
    let key = (boolean, state.id());
    if let Some(denotation) = caches.booleans.get(&key) {
      return Ok(denotation);
    }

    let denotation = match self.boolean(boolean)? {
      Boolean::Nullary { predicate } => true_atoms(state, *predicate).next().is_some(),

      Boolean::ConceptEmpty(concept) => self.concept_denotation(*concept, state, caches)?.is_empty(),

      Boolean::RoleEmpty(role) => self.role_denotation(*role, state, caches)?.is_empty(),

      Boolean::ConceptInclusion(left, right) => {
        let left  = self.concept_denotation(*left, state, caches)?;
        let right = self.concept_denotation(*right, state, caches)?;
        left.is_subset(&right)
      }

      Boolean::RoleInclusion(left, right) => {
        let left  = self.role_denotation(*left, state, caches)?;
        let right = self.role_denotation(*right, state, caches)?;
        left.is_subset(&right)
      }
    };

    caches.booleans.insert(key, denotation);
    Ok(denotation)
  }

  // endregion Denotations
}

/// The atoms of `predicate` that hold in `state`, static ones included.
fn true_atoms(state: &State, predicate: usize) -> impl Iterator<Item = &Atom> + '_ {
  state.true_atom_indices()
       .filter_map(move |index| state.instance().atom(index))
       .filter(move |atom| atom.predicate_index == predicate)
}

fn count(cardinality: usize) -> i32 {
  i32::try_from(cardinality).unwrap_or(INF)
}

/// Minimum distance from a successor of `a` in `from` to a successor of `a` in `to`.
fn row_distance(from: &RoleDenotation, to: &RoleDenotation, distances: &[Vec<i32>], a: usize) -> i32 {
  from.successors(a)
      .flat_map(|b| to.successors(a).map(move |c| distances[b][c]))
      .min()
      .unwrap_or(INF)
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, Rng, SeedableRng};

  use super::*;
  use crate::api::{instance::InstanceInfo, vocabulary::VocabularyInfo};

  /// `on`/2 and `clear`/1 over objects A, B.
  fn blocks() -> (ElementFactory, Rc<InstanceInfo>) {
    let mut vocabulary = VocabularyInfo::new();
    vocabulary.add_predicate("on", 2).unwrap();
    vocabulary.add_predicate("clear", 1).unwrap();
    vocabulary.add_predicate("handempty", 0).unwrap();
    vocabulary.add_static_predicate("on_g", 2).unwrap();
    let vocabulary = Rc::new(vocabulary);

    let mut instance = InstanceInfo::new(vocabulary.clone());
    instance.add_atom("on", &["A", "B"]).unwrap();
    instance.add_atom("on", &["B", "A"]).unwrap();
    instance.add_atom("clear", &["A"]).unwrap();
    instance.add_atom("clear", &["B"]).unwrap();
    instance.add_atom("handempty", &[]).unwrap();
    instance.add_atom("on_g", &["B", "A"]).unwrap();

    (ElementFactory::new(vocabulary), Rc::new(instance))
  }

  #[test]
  fn some_over_primitive_role() {
    let (mut factory, instance) = blocks();
    let state   = State::from_atom_names(instance, &["on(A,B)"]).unwrap();
    let concept = factory.parse_concept("c_some(r_primitive(on,0,1),c_primitive(on,1))").unwrap();
    let result  = factory.evaluate_concept(concept, &state).unwrap();
    assert_eq!(result.iter().collect::<Vec<_>>(), vec![0]);
  }

  #[test]
  fn static_atoms_are_implied() {
    let (mut factory, instance) = blocks();
    let state = State::from_atom_names(instance, &[]).unwrap();
    let goal  = factory.parse_concept("c_primitive(on_g,0)").unwrap();
    assert_eq!(factory.evaluate_concept(goal, &state).unwrap().iter().collect::<Vec<_>>(), vec![1]);
  }

  #[test]
  fn nullary_and_inclusion() {
    let (mut factory, instance) = blocks();
    let empty_state = State::from_atom_names(instance.clone(), &[]).unwrap();
    let hand_state  = State::from_atom_names(instance, &["handempty", "clear(A)"]).unwrap();

    let nullary   = factory.parse_boolean("b_nullary(handempty)").unwrap();
    let inclusion = factory.parse_boolean("b_inclusion(c_primitive(clear,0),c_bot)").unwrap();
    let empty     = factory.parse_boolean("b_empty(r_primitive(on,0,1))").unwrap();

    assert!(!factory.evaluate_boolean(nullary, &empty_state).unwrap());
    assert!(factory.evaluate_boolean(nullary, &hand_state).unwrap());
    assert!(factory.evaluate_boolean(inclusion, &empty_state).unwrap());
    assert!(!factory.evaluate_boolean(inclusion, &hand_state).unwrap());
    assert!(factory.evaluate_boolean(empty, &hand_state).unwrap());
  }

  #[test]
  fn one_of_and_projection() {
    let mut vocabulary = VocabularyInfo::new();
    vocabulary.add_predicate("at", 2).unwrap();
    vocabulary.add_constant("home").unwrap();
    let vocabulary   = Rc::new(vocabulary);
    let mut instance = InstanceInfo::new(vocabulary.clone());
    instance.add_atom("at", &["truck", "home"]).unwrap();
    let instance    = Rc::new(instance);
    let mut factory = ElementFactory::new(vocabulary);
    let state       = State::from_atom_names(instance, &["at(truck,home)"]).unwrap();

    let home  = factory.parse_concept("c_one_of(home)").unwrap();
    let first = factory.parse_concept("c_projection(r_primitive(at,0,1),0)").unwrap();
    let count = factory.parse_numerical("n_count(r_compose(r_primitive(at,0,1),r_inverse(r_primitive(at,0,1))))").unwrap();
    assert_eq!(factory.evaluate_concept(home, &state).unwrap().iter().collect::<Vec<_>>(), vec![0]);
    assert_eq!(factory.evaluate_concept(first, &state).unwrap().iter().collect::<Vec<_>>(), vec![1]);
    assert_eq!(factory.evaluate_numerical(count, &state).unwrap(), 1);
  }

  #[test]
  fn evaluation_is_pure_across_state_identities() {
    let (mut factory, instance) = blocks();
    let first  = State::from_atom_names(instance.clone(), &["on(A,B)", "clear(A)"]).unwrap();
    let second = State::from_atom_names(instance, &["clear(A)", "on(A,B)"]).unwrap();
    assert_ne!(first.id(), second.id());

    let concept = factory.parse_concept("c_all(r_transitive_closure(r_primitive(on,0,1)),c_not(c_primitive(clear,0)))").unwrap();
    let mut caches = DenotationsCaches::new();
    let from_first  = factory.evaluate_concept_cached(concept, &first, &mut caches).unwrap();
    let from_second = factory.evaluate_concept_cached(concept, &second, &mut caches).unwrap();
    assert_eq!(from_first, from_second);
    assert!(!Rc::ptr_eq(&from_first, &from_second));
  }

  #[test]
  fn cache_hits_on_repeated_and_shared_evaluation() {
    let (mut factory, instance) = blocks();
    let states = vec![
      State::from_atom_names(instance.clone(), &["on(A,B)"]).unwrap(),
      State::from_atom_names(instance, &["on(B,A)"]).unwrap(),
    ];
    let inner = factory.parse_concept("c_primitive(on,0)").unwrap();
    let outer = factory.parse_concept("c_not(c_primitive(on,0))").unwrap();

    let mut caches = DenotationsCaches::new();
    let first  = factory.evaluate_concepts(outer, &states, &mut caches).unwrap();
    let hits   = caches.hits();
    let second = factory.evaluate_concepts(outer, &states, &mut caches).unwrap();
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(caches.hits(), hits + 1);

    // The children were memoized per state while evaluating the batch.
    let inner_hits = caches.hits();
    factory.evaluate_concept_cached(inner, &states[1], &mut caches).unwrap();
    assert_eq!(caches.hits(), inner_hits + 1);
    assert_eq!(first[0].iter().collect::<Vec<_>>(), vec![1]);
  }

  #[test]
  fn foreign_states_are_rejected() {
    let (mut factory, _) = blocks();
    let (_, foreign)     = blocks();
    let state   = State::from_atom_names(foreign, &[]).unwrap();
    let concept = factory.parse_concept("c_top").unwrap();
    let mut caches = DenotationsCaches::new();
    assert_eq!(factory.evaluate_concept(concept, &state), Err(Error::VocabularyMismatch));
    assert_eq!(factory.evaluate_concepts(concept, &[state], &mut caches), Err(Error::VocabularyMismatch));
  }

  // region Distances

  /// A line A -> B -> C -> D plus an isolated E, with `clear` and `at` as the endpoint predicates.
  fn line() -> (ElementFactory, State) {
    let mut vocabulary = VocabularyInfo::new();
    vocabulary.add_predicate("edge", 2).unwrap();
    vocabulary.add_predicate("start", 1).unwrap();
    vocabulary.add_predicate("goal", 1).unwrap();
    vocabulary.add_predicate("from", 2).unwrap();
    vocabulary.add_predicate("to", 2).unwrap();
    let vocabulary   = Rc::new(vocabulary);
    let mut instance = InstanceInfo::new(vocabulary.clone());
    let atoms: [(&str, &[&str]); 10] = [
      ("edge", &["A", "B"]),
      ("edge", &["B", "C"]),
      ("edge", &["C", "D"]),
      ("start", &["A"]),
      ("start", &["B"]),
      ("goal", &["D"]),
      ("from", &["A", "A"]),
      ("from", &["B", "B"]),
      ("to", &["A", "D"]),
      ("to", &["B", "C"]),
    ];
    for (predicate, objects) in atoms {
      instance.add_atom(predicate, objects).unwrap();
    }
    instance.add_object("E").unwrap();
    let instance = Rc::new(instance);
    let state    = State::new(instance.clone(), 0..instance.atoms().len()).unwrap();
    (ElementFactory::new(vocabulary), state)
  }

  fn distance(factory: &mut ElementFactory, state: &State, description: &str) -> i32 {
    let numerical = factory.parse_numerical(description).unwrap();
    factory.evaluate_numerical(numerical, state).unwrap()
  }

  #[test]
  fn concept_distance_sentinels() {
    let (mut factory, state) = line();
    let edge = "r_primitive(edge,0,1)";

    assert_eq!(distance(&mut factory, &state, &format!("n_concept_distance(c_primitive(start,0),{},c_primitive(goal,0))", edge)), 2);
    // Overlapping endpoints are at distance 0 whatever the role.
    assert_eq!(distance(&mut factory, &state, "n_concept_distance(c_primitive(start,0),r_not(r_top),c_top)"), 0);
    assert_eq!(distance(&mut factory, &state, &format!("n_concept_distance(c_bot,{},c_top)", edge)), INF);
    assert_eq!(distance(&mut factory, &state, &format!("n_concept_distance(c_top,{},c_bot)", edge)), INF);
    assert_eq!(distance(&mut factory, &state, &format!("n_concept_distance(c_primitive(goal,0),{},c_primitive(start,0))", edge)), INF);
  }

  #[test]
  fn overlap_is_decided_before_the_role_is_evaluated() {
    let (mut factory, state) = line();
    let numerical = factory.parse_numerical("n_concept_distance(c_top,r_transitive_closure(r_top),c_top)").unwrap();
    let role      = factory.parse_role("r_transitive_closure(r_top)").unwrap();
    let mut caches = DenotationsCaches::new();
    assert_eq!(factory.evaluate_numerical_cached(numerical, &state, &mut caches).unwrap(), 0);
    assert_eq!(caches.roles.len(), 0);
    factory.evaluate_role_cached(role, &state, &mut caches).unwrap();
    assert_eq!(caches.roles.len(), 2);
  }

  #[test]
  fn sum_concept_distance_adds_nearest_targets() {
    let (mut factory, state) = line();
    // A is 3 steps from D, B is 2 steps.
    assert_eq!(distance(&mut factory, &state, "n_sum_concept_distance(c_primitive(start,0),r_primitive(edge,0,1),c_primitive(goal,0))"), 5);
    // E cannot reach D, so the sum saturates.
    assert_eq!(distance(&mut factory, &state, "n_sum_concept_distance(c_top,r_primitive(edge,0,1),c_primitive(goal,0))"), INF);
    assert_eq!(distance(&mut factory, &state, "n_sum_concept_distance(c_bot,r_primitive(edge,0,1),c_top)"), INF);
  }

  #[test]
  fn role_distances_pair_rows() {
    let (mut factory, state) = line();
    // Row A: A to D is 3. Row B: B to C is 1.
    let arguments = "r_primitive(from,0,1),r_primitive(edge,0,1),r_primitive(to,0,1)";
    assert_eq!(distance(&mut factory, &state, &format!("n_role_distance({})", arguments)), 1);
    assert_eq!(distance(&mut factory, &state, &format!("n_sum_role_distance({})", arguments)), 4);
    assert_eq!(distance(&mut factory, &state, "n_role_distance(r_not(r_top),r_top,r_top)"), INF);
    // Row E of r_top has no partner row in `to`.
    assert_eq!(distance(&mut factory, &state, "n_sum_role_distance(r_top,r_primitive(edge,0,1),r_primitive(to,0,1))"), INF);
  }

  // endregion Distances

  // region Brute force

  /// A random instance over `n` objects with a binary predicate `r`, a second one `s`, and a unary predicate `p`.
  fn random_world(rng: &mut StdRng, n: usize) -> (ElementFactory, State) {
    let mut vocabulary = VocabularyInfo::new();
    vocabulary.add_predicate("r", 2).unwrap();
    vocabulary.add_predicate("s", 2).unwrap();
    vocabulary.add_predicate("p", 1).unwrap();
    let vocabulary   = Rc::new(vocabulary);
    let mut instance = InstanceInfo::new(vocabulary.clone());
    let names        = (0..n).map(|i| format!("o{}", i)).collect::<Vec<_>>();
    for name in &names {
      instance.add_object(name).unwrap();
    }
    let mut true_atoms = Vec::new();
    for a in &names {
      for b in &names {
        for predicate in ["r", "s"] {
          let atom = instance.add_atom(predicate, &[a.as_str(), b.as_str()]).unwrap().index;
          if rng.gen_bool(0.3) {
            true_atoms.push(atom);
          }
        }
      }
      let atom = instance.add_atom("p", &[a.as_str()]).unwrap().index;
      if rng.gen_bool(0.5) {
        true_atoms.push(atom);
      }
    }
    let state = State::new(Rc::new(instance), true_atoms).unwrap();
    (ElementFactory::new(vocabulary), state)
  }

  #[test]
  fn counterexample_operators_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..100 {
      let n = rng.gen_range(1..=6);
      let (mut factory, state) = random_world(&mut rng, n);

      let r_ref = factory.parse_role("r_primitive(r,0,1)").unwrap();
      let s_ref = factory.parse_role("r_primitive(s,0,1)").unwrap();
      let p_ref = factory.parse_concept("c_primitive(p,0)").unwrap();
      let r     = factory.evaluate_role(r_ref, &state).unwrap();
      let s     = factory.evaluate_role(s_ref, &state).unwrap();
      let p     = factory.evaluate_concept(p_ref, &state).unwrap();

      let all    = factory.parse_concept("c_all(r_primitive(r,0,1),c_primitive(p,0))").unwrap();
      let subset = factory.parse_concept("c_subset(r_primitive(r,0,1),r_primitive(s,0,1))").unwrap();
      let equal  = factory.parse_concept("c_equal(r_primitive(r,0,1),r_primitive(s,0,1))").unwrap();
      let all    = factory.evaluate_concept(all, &state).unwrap();
      let subset = factory.evaluate_concept(subset, &state).unwrap();
      let equal  = factory.evaluate_concept(equal, &state).unwrap();

      for a in 0..n {
        let all_expected    = !(0..n).any(|b| r.contains(a, b) && !p.contains(b));
        let subset_expected = !(0..n).any(|b| r.contains(a, b) && !s.contains(a, b));
        let equal_expected  = (0..n).all(|b| r.contains(a, b) == s.contains(a, b));
        assert_eq!(all.contains(a), all_expected, "c_all at object {} of {}", a, state);
        assert_eq!(subset.contains(a), subset_expected, "c_subset at object {} of {}", a, state);
        assert_eq!(equal.contains(a), equal_expected, "c_equal at object {} of {}", a, state);
      }
    }
  }

  #[test]
  fn set_operators_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..100 {
      let n = rng.gen_range(1..=6);
      let (mut factory, state) = random_world(&mut rng, n);

      let r_ref = factory.parse_role("r_primitive(r,0,1)").unwrap();
      let s_ref = factory.parse_role("r_primitive(s,0,1)").unwrap();
      let p_ref = factory.parse_concept("c_primitive(p,0)").unwrap();
      let q_ref = factory.parse_concept("c_projection(r_primitive(s,0,1),1)").unwrap();
      let r     = factory.evaluate_role(r_ref, &state).unwrap();
      let s     = factory.evaluate_role(s_ref, &state).unwrap();
      let p     = factory.evaluate_concept(p_ref, &state).unwrap();
      let q     = factory.evaluate_concept(q_ref, &state).unwrap();

      // Reachability in one or more steps, by relaxing n times.
      let mut reach = r.clone();
      for _ in 0..n {
        for (a, b) in reach.clone().iter() {
          for c in r.successors(b) {
            reach.insert(a, c);
          }
        }
      }

      let role = |factory: &mut ElementFactory, description: &str| {
        let role = factory.parse_role(description).unwrap();
        factory.evaluate_role(role, &state).unwrap()
      };
      let and       = role(&mut factory, "r_and(r_primitive(r,0,1),r_primitive(s,0,1))");
      let or        = role(&mut factory, "r_or(r_primitive(r,0,1),r_primitive(s,0,1))");
      let diff      = role(&mut factory, "r_diff(r_primitive(r,0,1),r_primitive(s,0,1))");
      let not       = role(&mut factory, "r_not(r_primitive(r,0,1))");
      let compose   = role(&mut factory, "r_compose(r_primitive(r,0,1),r_primitive(s,0,1))");
      let restrict  = role(&mut factory, "r_restrict(r_primitive(r,0,1),c_primitive(p,0))");
      let identity  = role(&mut factory, "r_identity(c_primitive(p,0))");
      let reflexive = role(&mut factory, "r_transitive_reflexive_closure(r_primitive(r,0,1))");

      for a in 0..n {
        for b in 0..n {
          let (in_r, in_s) = (r.contains(a, b), s.contains(a, b));
          let composed     = (0..n).any(|c| r.contains(a, c) && s.contains(c, b));
          assert_eq!(and.contains(a, b), in_r && in_s, "r_and at ({},{}) of {}", a, b, state);
          assert_eq!(or.contains(a, b), in_r || in_s, "r_or at ({},{}) of {}", a, b, state);
          assert_eq!(diff.contains(a, b), in_r && !in_s, "r_diff at ({},{}) of {}", a, b, state);
          assert_eq!(not.contains(a, b), !in_r, "r_not at ({},{}) of {}", a, b, state);
          assert_eq!(compose.contains(a, b), composed, "r_compose at ({},{}) of {}", a, b, state);
          assert_eq!(restrict.contains(a, b), in_r && p.contains(b), "r_restrict at ({},{}) of {}", a, b, state);
          assert_eq!(identity.contains(a, b), a == b && p.contains(a), "r_identity at ({},{}) of {}", a, b, state);
          assert_eq!(reflexive.contains(a, b), a == b || reach.contains(a, b), "r_transitive_reflexive_closure at ({},{}) of {}", a, b, state);
        }
      }

      let concept = |factory: &mut ElementFactory, description: &str| {
        let concept = factory.parse_concept(description).unwrap();
        factory.evaluate_concept(concept, &state).unwrap()
      };
      let or   = concept(&mut factory, "c_or(c_primitive(p,0),c_projection(r_primitive(s,0,1),1))");
      let diff = concept(&mut factory, "c_diff(c_primitive(p,0),c_projection(r_primitive(s,0,1),1))");

      for b in 0..n {
        let targeted = (0..n).any(|a| s.contains(a, b));
        assert_eq!(q.contains(b), targeted, "c_projection at object {} of {}", b, state);
        assert_eq!(or.contains(b), p.contains(b) || targeted, "c_or at object {} of {}", b, state);
        assert_eq!(diff.contains(b), p.contains(b) && !targeted, "c_diff at object {} of {}", b, state);
      }
    }
  }

  #[test]
  fn concept_distance_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
      let n = rng.gen_range(1..=6);
      let (mut factory, state) = random_world(&mut rng, n);
      let r = factory.parse_role("r_primitive(r,0,1)").unwrap();
      let r = factory.evaluate_role(r, &state).unwrap();
      let p = factory.parse_concept("c_primitive(p,0)").unwrap();
      let p = factory.evaluate_concept(p, &state).unwrap();
      let q = factory.parse_concept("c_not(c_primitive(p,0))").unwrap();
      let q = factory.evaluate_concept(q, &state).unwrap();

      // Shortest path lengths by relaxing all edges n times.
      let mut reach = (0..n).map(|b| if p.contains(b) { 0 } else { INF }).collect::<Vec<_>>();
      for _ in 0..n {
        for (a, b) in r.iter() {
          if reach[a] != INF && reach[a] + 1 < reach[b] {
            reach[b] = reach[a] + 1;
          }
        }
      }
      let expected = q.iter().map(|b| reach[b]).min().unwrap_or(INF);

      let numerical = factory.parse_numerical("n_concept_distance(c_primitive(p,0),r_primitive(r,0,1),c_not(c_primitive(p,0)))").unwrap();
      assert_eq!(factory.evaluate_numerical(numerical, &state).unwrap(), expected, "state {}", state);
    }
  }

  // endregion Brute force
}
