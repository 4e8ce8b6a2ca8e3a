/*!

The feature generator enumerates every distinct element up to the configured complexity limits.

Generation proceeds by complexity. The seed rules fill complexity 1 from the vocabulary; iteration `it` then applies
every enabled composite rule to the elements found so far, producing elements of complexity `it + 1`. Since each
level only depends on strictly lower levels, a single pass per level suffices.

An element is kept only if it is new to this run, within its category's complexity limit, and, when semantic
deduplication is enabled, if its denotations over the sample states differ from those of every element of its
category kept before it. Generation stops early when the element limit or the time limit is reached. That is a normal
outcome reported by `GenerationResult::limit_reached`, not an error.

```
use std::rc::Rc;
use planfeat::{
  generator::{FeatureGenerator, GeneratorConfig, GeneratorRule},
  ElementFactory,
  VocabularyInfo,
};

let mut vocabulary = VocabularyInfo::new();
vocabulary.add_predicate("on", 2).unwrap();
let mut factory = ElementFactory::new(Rc::new(vocabulary));

let config = GeneratorConfig::default()
    .with_complexity_limit(2)
    .with_rules(GeneratorRule::PrimitiveConcept | GeneratorRule::NotConcept);
let result = FeatureGenerator::new(config).generate(&mut factory, &[]).unwrap();
assert_eq!(result.concepts.len(), 4);
```

*/

mod config;
mod data;
mod rules;


use std::fmt::{Display, Formatter};

use crate::{
  abstractions::HashMap,
  api::{element::Category, state::State},
  core::{ElementFactory, Result},
  info,
};

pub use config::{GeneratorConfig, GeneratorRule, GeneratorRules};
use data::GeneratorData;

/// The elements kept by a generation run, by canonical representation in the order they were found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationResult {
  pub concepts     : Vec<String>,
  pub roles        : Vec<String>,
  pub numericals   : Vec<String>,
  pub booleans     : Vec<String>,
  /// Number of kept elements each rule produced.
  pub rule_counts  : HashMap<GeneratorRule, usize>,
  /// True if generation stopped at the element or time limit rather than at the complexity limits.
  pub limit_reached: bool,
}

impl GenerationResult {
  pub fn count(&self, rule: GeneratorRule) -> usize {
    self.rule_counts.get(&rule).copied().unwrap_or(0)
  }

  pub fn total(&self) -> usize {
    self.concepts.len() + self.roles.len() + self.numericals.len() + self.booleans.len()
  }

  pub fn elements(&self, category: Category) -> &[String] {
    match category {
      Category::Concept   => &self.concepts,
      Category::Role      => &self.roles,
      Category::Numerical => &self.numericals,
      Category::Boolean   => &self.booleans,
    }
  }

  /// Every kept representation: concepts, roles, numericals, then booleans.
  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.concepts
        .iter()
        .chain(self.roles.iter())
        .chain(self.numericals.iter())
        .chain(self.booleans.iter())
        .map(String::as_str)
  }

  fn push(&mut self, category: Category, repr: String, rule: GeneratorRule) {
    match category {
      Category::Concept   => self.concepts.push(repr),
      Category::Role      => self.roles.push(repr),
      Category::Numerical => self.numericals.push(repr),
      Category::Boolean   => self.booleans.push(repr),
    }
    *self.rule_counts.entry(rule).or_insert(0) += 1;
  }
}

impl Display for GenerationResult {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} concepts, {} roles, {} numericals, {} booleans",
      self.concepts.len(),
      self.roles.len(),
      self.numericals.len(),
      self.booleans.len()
    )?;
    if self.limit_reached {
      write!(f, " (limit reached)")?;
    }
    Ok(())
  }
}

pub struct FeatureGenerator {
  config: GeneratorConfig,
}

impl FeatureGenerator {
  pub fn new(config: GeneratorConfig) -> Self {
    FeatureGenerator { config }
  }

  pub fn config(&self) -> &GeneratorConfig {
    &self.config
  }

  /// Generates elements in `factory`, deduplicating them semantically over `states`. The new elements stay in the
  /// factory; the result lists their representations.
  ///
  /// Fails with `VocabularyMismatch` if a state does not belong to the factory's vocabulary.
  pub fn generate(&self, factory: &mut ElementFactory, states: &[State]) -> Result<GenerationResult> {
    factory.check_vocabularies(states)?;

    let mut data = GeneratorData::new(&self.config, states);
    rules::seed(factory, &mut data)?;
    info!(1, "seeded {}", data.result);

    for it in 1..self.config.max_complexity_limit() {
      if data.reached_limit() {
        break;
      }
      for rule in self.config.rules.iter() {
        rules::apply(rule, factory, &mut data, it)?;
        if data.reached_limit() {
          break;
        }
      }
      info!(1, "complexity {}: {}", it + 1, data.result);
    }

    let mut counts = data.result.rule_counts.iter().collect::<Vec<_>>();
    counts.sort();
    for (rule, count) in counts {
      info!(2, "{:?}: {}", rule, count);
    }

    Ok(data.result)
  }
}
