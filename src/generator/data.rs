/*!

Working state of one generation run: the per-complexity buckets of every category, the denotations seen so far, and
the result under construction.

*/

use std::{rc::Rc, time::Instant};

use crate::{
  abstractions::HashSet,
  api::{
    denotation::{ConceptDenotation, RoleDenotation},
    element::{BooleanRef, ConceptRef, ElementRef, NumericalRef, RoleRef},
    state::State,
  },
  core::{DenotationsCaches, ElementFactory, Result},
  generator::{GenerationResult, GeneratorConfig, GeneratorRule},
  warning,
};

/// Elements of one category indexed by complexity. Level 0 is always empty.
pub(crate) struct Buckets<T> {
  levels: Vec<Vec<T>>,
}

impl<T: Copy> Buckets<T> {
  pub fn new(max_complexity: usize) -> Self {
    Buckets {
      levels: vec![Vec::new(); max_complexity + 1],
    }
  }

  /// A copy of the elements of the given complexity, so the level can be read while later levels are filled.
  pub fn level(&self, complexity: usize) -> Vec<T> {
    self.levels.get(complexity).cloned().unwrap_or_default()
  }

  pub fn push(&mut self, complexity: usize, element: T) {
    if complexity >= self.levels.len() {
      self.levels.resize_with(complexity + 1, Vec::new);
    }
    self.levels[complexity].push(element);
  }
}

pub(crate) struct GeneratorData<'g> {
  pub config    : &'g GeneratorConfig,
  states        : &'g [State],
  caches        : DenotationsCaches,
  start         : Instant,

  pub concepts  : Buckets<ConceptRef>,
  pub roles     : Buckets<RoleRef>,
  pub numericals: Buckets<NumericalRef>,
  pub booleans  : Buckets<BooleanRef>,

  concept_denotations  : HashSet<Rc<Vec<ConceptDenotation>>>,
  role_denotations     : HashSet<Rc<Vec<RoleDenotation>>>,
  numerical_denotations: HashSet<Rc<Vec<i32>>>,
  boolean_denotations  : HashSet<Rc<Vec<bool>>>,

  /// Elements already placed in a bucket by this run.
  placed    : HashSet<ElementRef>,
  pub result: GenerationResult,
}

impl<'g> GeneratorData<'g> {
  pub fn new(config: &'g GeneratorConfig, states: &'g [State]) -> Self {
    let max_complexity = config.max_complexity_limit();
    GeneratorData {
      config,
      states,
      caches    : DenotationsCaches::new(),
      start     : Instant::now(),

      concepts  : Buckets::new(max_complexity),
      roles     : Buckets::new(max_complexity),
      numericals: Buckets::new(max_complexity),
      booleans  : Buckets::new(max_complexity),

      concept_denotations  : HashSet::new(),
      role_denotations     : HashSet::new(),
      numerical_denotations: HashSet::new(),
      boolean_denotations  : HashSet::new(),

      placed: HashSet::new(),
      result: GenerationResult::default(),
    }
  }

  /// Checks the element and time limits, and records the first time one of them is hit.
  pub fn reached_limit(&mut self) -> bool {
    if self.result.limit_reached {
      return true;
    }

    let element_limit = self.config.max_elements.is_some_and(|max| self.result.total() >= max);
    let time_limit    = self.config.time_limit.is_some_and(|limit| self.start.elapsed() >= limit);
    if element_limit || time_limit {
      warning!(
        1,
        "generation stopped after {} elements: {} limit reached",
        self.result.total(),
        if element_limit { "element" } else { "time" }
      );
      self.result.limit_reached = true;
    }

    self.result.limit_reached
  }

  /// Whether deduplication by denotation applies to this run. Without sample states every denotation sequence is
  /// empty, so deduplicating would keep a single element per category.
  fn deduplicates(&self) -> bool {
    self.config.semantic_deduplication && !self.states.is_empty()
  }

  /// Runs the shared part of every `add_*` method: rejects elements already placed or too complex, and records the
  /// element once its category specific check passes.
  fn admit(
    &mut self,
    factory   : &ElementFactory,
    element   : ElementRef,
    rule      : GeneratorRule,
    is_novel  : impl FnOnce(&mut Self) -> Result<bool>,
  ) -> Result<Option<usize>>
  {
    if self.placed.contains(&element) {
      return Ok(None);
    }
    let info = factory.info(element)?;
    if info.complexity > self.config.complexity_limit(element.category()) {
      return Ok(None);
    }
    let (complexity, repr) = (info.complexity, info.repr.clone());

    if self.deduplicates() && !is_novel(self)? {
      return Ok(None);
    }

    self.placed.insert(element);
    self.result.push(element.category(), repr, rule);
    Ok(Some(complexity))
  }

  // region Adding elements

  pub fn add_concept(&mut self, factory: &ElementFactory, concept: ConceptRef, rule: GeneratorRule) -> Result<bool> {
    let admitted = self.admit(factory, concept.into(), rule, |data| {
      let denotations = factory.evaluate_concepts(concept, data.states, &mut data.caches)?;
      Ok(data.concept_denotations.insert(denotations))
    })?;
    if let Some(complexity) = admitted {
      self.concepts.push(complexity, concept);
    }
    Ok(admitted.is_some())
  }

  pub fn add_role(&mut self, factory: &ElementFactory, role: RoleRef, rule: GeneratorRule) -> Result<bool> {
    let admitted = self.admit(factory, role.into(), rule, |data| {
      let denotations = factory.evaluate_roles(role, data.states, &mut data.caches)?;
      Ok(data.role_denotations.insert(denotations))
    })?;
    if let Some(complexity) = admitted {
      self.roles.push(complexity, role);
    }
    Ok(admitted.is_some())
  }

  pub fn add_numerical(
    &mut self,
    factory  : &ElementFactory,
    numerical: NumericalRef,
    rule     : GeneratorRule,
  ) -> Result<bool>
  {
    let admitted = self.admit(factory, numerical.into(), rule, |data| {
      let denotations = factory.evaluate_numericals(numerical, data.states, &mut data.caches)?;
      Ok(data.numerical_denotations.insert(denotations))
    })?;
    if let Some(complexity) = admitted {
      self.numericals.push(complexity, numerical);
    }
    Ok(admitted.is_some())
  }

  pub fn add_boolean(&mut self, factory: &ElementFactory, boolean: BooleanRef, rule: GeneratorRule) -> Result<bool> {
    let admitted = self.admit(factory, boolean.into(), rule, |data| {
      let denotations = factory.evaluate_booleans(boolean, data.states, &mut data.caches)?;
      Ok(data.boolean_denotations.insert(denotations))
    })?;
    if let Some(complexity) = admitted {
      self.booleans.push(complexity, boolean);
    }
    Ok(admitted.is_some())
  }

  // endregion Adding elements
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn buckets_grow_on_demand() {
    let mut buckets = Buckets::<u32>::new(2);
    buckets.push(1, 10);
    buckets.push(4, 40);
    assert_eq!(buckets.level(1), vec![10]);
    assert_eq!(buckets.level(4), vec![40]);
    assert!(buckets.level(3).is_empty());
    assert!(buckets.level(9).is_empty());
  }
}
