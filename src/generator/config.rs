/*!

Configuration of the feature generator. All options are set programmatically; the defaults are

| option                       | default       |
|:-----------------------------|:--------------|
| `concept_complexity_limit`   | 5             |
| `role_complexity_limit`      | 5             |
| `boolean_complexity_limit`   | 5             |
| `numerical_complexity_limit` | 5             |
| `max_elements`               | no limit      |
| `time_limit`                 | no limit      |
| `rules`                      | every rule    |
| `semantic_deduplication`     | on            |

*/

use std::time::Duration;

use enumflags2::{bitflags, make_bitflags, BitFlags};

use crate::api::element::Category;

/// A construction rule of the generator. Seed rules produce complexity-1 elements straight from the vocabulary;
/// every other rule applies one operator to previously generated elements.
#[bitflags]
#[repr(u64)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeneratorRule {
  // Concepts
  PrimitiveConcept,
  BotConcept,
  TopConcept,
  OneOfConcept,
  NotConcept,
  AndConcept,
  OrConcept,
  DiffConcept,
  SomeConcept,
  AllConcept,
  SubsetConcept,
  EqualConcept,
  ProjectionConcept,

  // Roles
  PrimitiveRole,
  TopRole,
  NotRole,
  AndRole,
  OrRole,
  DiffRole,
  InverseRole,
  ComposeRole,
  RestrictRole,
  IdentityRole,
  TransitiveClosureRole,
  TransitiveReflexiveClosureRole,

  // Numericals
  CountNumerical,
  ConceptDistanceNumerical,
  SumConceptDistanceNumerical,
  RoleDistanceNumerical,
  SumRoleDistanceNumerical,

  // Booleans
  NullaryBoolean,
  EmptyBoolean,
  InclusionBoolean,
}

pub type GeneratorRules = BitFlags<GeneratorRule, u64>;

impl GeneratorRule {
  #![allow(non_upper_case_globals)]

  /// Rules that build complexity-1 elements directly from the vocabulary.
  pub const Seeds: GeneratorRules = make_bitflags!(
    GeneratorRule::{
      PrimitiveConcept
      | BotConcept
      | TopConcept
      | OneOfConcept
      | PrimitiveRole
      | TopRole
      | NullaryBoolean
    }
  );

  pub fn is_seed(self) -> bool {
    GeneratorRule::Seeds.contains(self)
  }

  /// The category of the elements the rule produces.
  pub fn category(self) -> Category {
    match self {
      GeneratorRule::PrimitiveConcept
      | GeneratorRule::BotConcept
      | GeneratorRule::TopConcept
      | GeneratorRule::OneOfConcept
      | GeneratorRule::NotConcept
      | GeneratorRule::AndConcept
      | GeneratorRule::OrConcept
      | GeneratorRule::DiffConcept
      | GeneratorRule::SomeConcept
      | GeneratorRule::AllConcept
      | GeneratorRule::SubsetConcept
      | GeneratorRule::EqualConcept
      | GeneratorRule::ProjectionConcept => Category::Concept,

      GeneratorRule::PrimitiveRole
      | GeneratorRule::TopRole
      | GeneratorRule::NotRole
      | GeneratorRule::AndRole
      | GeneratorRule::OrRole
      | GeneratorRule::DiffRole
      | GeneratorRule::InverseRole
      | GeneratorRule::ComposeRole
      | GeneratorRule::RestrictRole
      | GeneratorRule::IdentityRole
      | GeneratorRule::TransitiveClosureRole
      | GeneratorRule::TransitiveReflexiveClosureRole => Category::Role,

      GeneratorRule::CountNumerical
      | GeneratorRule::ConceptDistanceNumerical
      | GeneratorRule::SumConceptDistanceNumerical
      | GeneratorRule::RoleDistanceNumerical
      | GeneratorRule::SumRoleDistanceNumerical => Category::Numerical,

      GeneratorRule::NullaryBoolean
      | GeneratorRule::EmptyBoolean
      | GeneratorRule::InclusionBoolean => Category::Boolean,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
  pub concept_complexity_limit  : usize,
  pub role_complexity_limit     : usize,
  pub boolean_complexity_limit  : usize,
  pub numerical_complexity_limit: usize,
  /// Generation stops once this many elements have been kept, over all categories.
  pub max_elements              : Option<usize>,
  /// Generation stops once this much wall clock time has passed.
  pub time_limit                : Option<Duration>,
  pub rules                     : GeneratorRules,
  /// Discard elements whose denotations on the sample states equal those of an element kept earlier.
  pub semantic_deduplication    : bool,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    GeneratorConfig {
      concept_complexity_limit  : 5,
      role_complexity_limit     : 5,
      boolean_complexity_limit  : 5,
      numerical_complexity_limit: 5,
      max_elements              : None,
      time_limit                : None,
      rules                     : GeneratorRules::all(),
      semantic_deduplication    : true,
    }
  }
}

impl GeneratorConfig {
  // region Builder

  pub fn with_concept_complexity_limit(mut self, limit: usize) -> Self {
    self.concept_complexity_limit = limit;
    self
  }

  pub fn with_role_complexity_limit(mut self, limit: usize) -> Self {
    self.role_complexity_limit = limit;
    self
  }

  pub fn with_boolean_complexity_limit(mut self, limit: usize) -> Self {
    self.boolean_complexity_limit = limit;
    self
  }

  pub fn with_numerical_complexity_limit(mut self, limit: usize) -> Self {
    self.numerical_complexity_limit = limit;
    self
  }

  /// Sets the same complexity limit for every category.
  pub fn with_complexity_limit(self, limit: usize) -> Self {
    self.with_concept_complexity_limit(limit)
        .with_role_complexity_limit(limit)
        .with_boolean_complexity_limit(limit)
        .with_numerical_complexity_limit(limit)
  }

  pub fn with_max_elements(mut self, max_elements: Option<usize>) -> Self {
    self.max_elements = max_elements;
    self
  }

  pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
    self.time_limit = time_limit;
    self
  }

  pub fn with_rules(mut self, rules: impl Into<GeneratorRules>) -> Self {
    self.rules = rules.into();
    self
  }

  pub fn with_semantic_deduplication(mut self, enabled: bool) -> Self {
    self.semantic_deduplication = enabled;
    self
  }

  // endregion Builder

  pub fn set_rule(&mut self, rule: GeneratorRule, enabled: bool) {
    if enabled {
      self.rules.insert(rule);
    } else {
      self.rules.remove(rule);
    }
  }

  pub fn is_enabled(&self, rule: GeneratorRule) -> bool {
    self.rules.contains(rule)
  }

  pub fn complexity_limit(&self, category: Category) -> usize {
    match category {
      Category::Concept   => self.concept_complexity_limit,
      Category::Role      => self.role_complexity_limit,
      Category::Numerical => self.numerical_complexity_limit,
      Category::Boolean   => self.boolean_complexity_limit,
    }
  }

  /// The largest complexity of any category.
  pub fn max_complexity_limit(&self) -> usize {
    self.concept_complexity_limit
        .max(self.role_complexity_limit)
        .max(self.boolean_complexity_limit)
        .max(self.numerical_complexity_limit)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_enable_everything() {
    let config = GeneratorConfig::default();
    assert_eq!(config.rules.len(), 33);
    assert!(config.semantic_deduplication);
    assert_eq!(config.max_complexity_limit(), 5);
  }

  #[test]
  fn rules_toggle_individually() {
    let mut config = GeneratorConfig::default().with_rules(GeneratorRule::PrimitiveConcept | GeneratorRule::AndConcept);
    assert!(!config.is_enabled(GeneratorRule::OrConcept));
    config.set_rule(GeneratorRule::OrConcept, true);
    config.set_rule(GeneratorRule::AndConcept, false);
    assert!(config.is_enabled(GeneratorRule::OrConcept));
    assert!(!config.is_enabled(GeneratorRule::AndConcept));
  }

  #[test]
  fn seed_rules() {
    assert!(GeneratorRule::OneOfConcept.is_seed());
    assert!(!GeneratorRule::InverseRole.is_seed());
    assert_eq!(GeneratorRule::InclusionBoolean.category(), Category::Boolean);
  }

  #[test]
  fn limits_are_per_category() {
    let config = GeneratorConfig::default().with_complexity_limit(3).with_role_complexity_limit(7);
    assert_eq!(config.complexity_limit(Category::Concept), 3);
    assert_eq!(config.complexity_limit(Category::Role), 7);
    assert_eq!(config.max_complexity_limit(), 7);
  }
}
