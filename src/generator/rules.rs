/*!

The construction rules. Seed rules fill complexity 1 from the vocabulary. Every other rule, applied at iteration `it`,
combines elements whose complexities sum to `it`, producing candidates of complexity `it + 1`:

| arity   | operand complexities            |
|:--------|:--------------------------------|
| unary   | `it`                            |
| binary  | `(i, it - i)` for `i` in `1..it` |
| ternary | `(i, j, it - i - j)`            |

Operands of a binary rule over a single category are never identical. Commutative rules only see each unordered pair
once. Neither restriction changes the result, since the factory would return the same handle anyway.

*/

use crate::{
  core::{ElementFactory, Result},
  generator::{
    data::{Buckets, GeneratorData},
    GeneratorRule,
  },
};

// region Operand enumeration

fn pairs<A: Copy, B: Copy>(left: &Buckets<A>, right: &Buckets<B>, it: usize) -> Vec<(A, B)> {
  let mut result = Vec::new();
  for i in 1..it {
    let right_level = right.level(it - i);
    for a in left.level(i) {
      result.extend(right_level.iter().map(|&b| (a, b)));
    }
  }
  result
}

/// Ordered pairs of distinct elements.
fn distinct_pairs<A: Copy + Eq>(bucket: &Buckets<A>, it: usize) -> Vec<(A, A)> {
  pairs(bucket, bucket, it).into_iter().filter(|(a, b)| a != b).collect()
}

/// Unordered pairs of distinct elements.
fn commutative_pairs<A: Copy>(bucket: &Buckets<A>, it: usize) -> Vec<(A, A)> {
  let mut result = Vec::new();
  for i in 1..=it / 2 {
    let left  = bucket.level(i);
    let right = bucket.level(it - i);
    for (x, &a) in left.iter().enumerate() {
      // Within one level, pair each element only with those after it.
      let skip = if i == it - i { x + 1 } else { 0 };
      result.extend(right.iter().skip(skip).map(|&b| (a, b)));
    }
  }
  result
}

fn triples<A: Copy, B: Copy, C: Copy>(
  first : &Buckets<A>,
  second: &Buckets<B>,
  third : &Buckets<C>,
  it    : usize,
) -> Vec<(A, B, C)>
{
  let mut result = Vec::new();
  for i in 1..it {
    for j in 1..it - i {
      let second_level = second.level(j);
      let third_level  = third.level(it - i - j);
      for a in first.level(i) {
        for &b in &second_level {
          result.extend(third_level.iter().map(|&c| (a, b, c)));
        }
      }
    }
  }
  result
}

/// Visits candidates until the generator's limits are reached.
fn each<'g, T>(
  data      : &mut GeneratorData<'g>,
  candidates: Vec<T>,
  mut visit : impl FnMut(&mut GeneratorData<'g>, T) -> Result<()>,
) -> Result<()>
{
  for candidate in candidates {
    if data.reached_limit() {
      break;
    }
    visit(data, candidate)?;
  }
  Ok(())
}

// endregion Operand enumeration

/// Builds the complexity-1 elements of every enabled seed rule.
pub(crate) fn seed(factory: &mut ElementFactory, data: &mut GeneratorData) -> Result<()> {
  let vocabulary = factory.vocabulary().clone();
  let config     = data.config;

  if config.is_enabled(GeneratorRule::PrimitiveConcept) {
    for predicate in vocabulary.predicates() {
      for position in 0..predicate.arity {
        if data.reached_limit() {
          return Ok(());
        }
        let concept = factory.make_primitive_concept(predicate, position)?;
        data.add_concept(factory, concept, GeneratorRule::PrimitiveConcept)?;
      }
    }
  }

  if config.is_enabled(GeneratorRule::BotConcept) && !data.reached_limit() {
    let concept = factory.make_bot_concept()?;
    data.add_concept(factory, concept, GeneratorRule::BotConcept)?;
  }

  if config.is_enabled(GeneratorRule::TopConcept) && !data.reached_limit() {
    let concept = factory.make_top_concept()?;
    data.add_concept(factory, concept, GeneratorRule::TopConcept)?;
  }

  if config.is_enabled(GeneratorRule::OneOfConcept) {
    for constant in vocabulary.constants() {
      if data.reached_limit() {
        return Ok(());
      }
      let concept = factory.make_one_of_concept(constant)?;
      data.add_concept(factory, concept, GeneratorRule::OneOfConcept)?;
    }
  }

  if config.is_enabled(GeneratorRule::PrimitiveRole) {
    for predicate in vocabulary.predicates() {
      for position1 in 0..predicate.arity {
        for position2 in position1 + 1..predicate.arity {
          if data.reached_limit() {
            return Ok(());
          }
          let role = factory.make_primitive_role(predicate, position1, position2)?;
          data.add_role(factory, role, GeneratorRule::PrimitiveRole)?;
        }
      }
    }
  }

  if config.is_enabled(GeneratorRule::TopRole) && !data.reached_limit() {
    let role = factory.make_top_role()?;
    data.add_role(factory, role, GeneratorRule::TopRole)?;
  }

  if config.is_enabled(GeneratorRule::NullaryBoolean) {
    for predicate in vocabulary.predicates().iter().filter(|predicate| predicate.arity == 0) {
      if data.reached_limit() {
        return Ok(());
      }
      let boolean = factory.make_nullary_boolean(predicate)?;
      data.add_boolean(factory, boolean, GeneratorRule::NullaryBoolean)?;
    }
  }

  Ok(())
}

/// Applies a composite rule at iteration `it`. Rules whose results would exceed their category's complexity limit
/// are skipped entirely.
pub(crate) fn apply(
  rule   : GeneratorRule,
  factory: &mut ElementFactory,
  data   : &mut GeneratorData,
  it     : usize,
) -> Result<()>
{
  if rule.is_seed() || it + 1 > data.config.complexity_limit(rule.category()) {
    return Ok(());
  }

  match rule {
    // region Concepts

    GeneratorRule::NotConcept => {
      let candidates = data.concepts.level(it);
      each(data, candidates, |data, concept| {
        let result = factory.make_not_concept(concept)?;
        data.add_concept(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::AndConcept => {
      let candidates = commutative_pairs(&data.concepts, it);
      each(data, candidates, |data, (left, right)| {
        let result = factory.make_and_concept(left, right)?;
        data.add_concept(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::OrConcept => {
      let candidates = commutative_pairs(&data.concepts, it);
      each(data, candidates, |data, (left, right)| {
        let result = factory.make_or_concept(left, right)?;
        data.add_concept(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::DiffConcept => {
      let candidates = distinct_pairs(&data.concepts, it);
      each(data, candidates, |data, (left, right)| {
        let result = factory.make_diff_concept(left, right)?;
        data.add_concept(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::SomeConcept => {
      let candidates = pairs(&data.roles, &data.concepts, it);
      each(data, candidates, |data, (role, concept)| {
        let result = factory.make_some_concept(role, concept)?;
        data.add_concept(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::AllConcept => {
      let candidates = pairs(&data.roles, &data.concepts, it);
      each(data, candidates, |data, (role, concept)| {
        let result = factory.make_all_concept(role, concept)?;
        data.add_concept(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::SubsetConcept => {
      let candidates = distinct_pairs(&data.roles, it);
      each(data, candidates, |data, (left, right)| {
        let result = factory.make_subset_concept(left, right)?;
        data.add_concept(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::EqualConcept => {
      let candidates = commutative_pairs(&data.roles, it);
      each(data, candidates, |data, (left, right)| {
        let result = factory.make_equal_concept(left, right)?;
        data.add_concept(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::ProjectionConcept => {
      let candidates = data.roles.level(it).into_iter().flat_map(|role| [(role, 0), (role, 1)]).collect();
      each(data, candidates, |data, (role, position)| {
        let result = factory.make_projection_concept(role, position)?;
        data.add_concept(factory, result, rule).map(drop)
      })
    }

    // endregion Concepts

    // region Roles

    GeneratorRule::NotRole => {
      let candidates = data.roles.level(it);
      each(data, candidates, |data, role| {
        let result = factory.make_not_role(role)?;
        data.add_role(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::AndRole => {
      let candidates = commutative_pairs(&data.roles, it);
      each(data, candidates, |data, (left, right)| {
        let result = factory.make_and_role(left, right)?;
        data.add_role(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::OrRole => {
      let candidates = commutative_pairs(&data.roles, it);
      each(data, candidates, |data, (left, right)| {
        let result = factory.make_or_role(left, right)?;
        data.add_role(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::DiffRole => {
      let candidates = distinct_pairs(&data.roles, it);
      each(data, candidates, |data, (left, right)| {
        let result = factory.make_diff_role(left, right)?;
        data.add_role(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::InverseRole => {
      let candidates = data.roles.level(it);
      each(data, candidates, |data, role| {
        let result = factory.make_inverse_role(role)?;
        data.add_role(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::ComposeRole => {
      let candidates = distinct_pairs(&data.roles, it);
      each(data, candidates, |data, (left, right)| {
        let result = factory.make_compose_role(left, right)?;
        data.add_role(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::RestrictRole => {
      let candidates = pairs(&data.roles, &data.concepts, it);
      each(data, candidates, |data, (role, concept)| {
        let result = factory.make_restrict_role(role, concept)?;
        data.add_role(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::IdentityRole => {
      let candidates = data.concepts.level(it);
      each(data, candidates, |data, concept| {
        let result = factory.make_identity_role(concept)?;
        data.add_role(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::TransitiveClosureRole => {
      let candidates = data.roles.level(it);
      each(data, candidates, |data, role| {
        let result = factory.make_transitive_closure_role(role)?;
        data.add_role(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::TransitiveReflexiveClosureRole => {
      let candidates = data.roles.level(it);
      each(data, candidates, |data, role| {
        let result = factory.make_transitive_reflexive_closure_role(role)?;
        data.add_role(factory, result, rule).map(drop)
      })
    }

    // endregion Roles

    // region Numericals

    GeneratorRule::CountNumerical => {
      let candidates = data.concepts.level(it);
      each(data, candidates, |data, concept| {
        let result = factory.make_concept_count_numerical(concept)?;
        data.add_numerical(factory, result, rule).map(drop)
      })?;
      let candidates = data.roles.level(it);
      each(data, candidates, |data, role| {
        let result = factory.make_role_count_numerical(role)?;
        data.add_numerical(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::ConceptDistanceNumerical => {
      let candidates = triples(&data.concepts, &data.roles, &data.concepts, it);
      each(data, candidates, |data, (from, role, to)| {
        if from == to {
          return Ok(());
        }
        let result = factory.make_concept_distance_numerical(from, role, to)?;
        data.add_numerical(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::SumConceptDistanceNumerical => {
      let candidates = triples(&data.concepts, &data.roles, &data.concepts, it);
      each(data, candidates, |data, (from, role, to)| {
        if from == to {
          return Ok(());
        }
        let result = factory.make_sum_concept_distance_numerical(from, role, to)?;
        data.add_numerical(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::RoleDistanceNumerical => {
      let candidates = triples(&data.roles, &data.roles, &data.roles, it);
      each(data, candidates, |data, (from, role, to)| {
        if from == to {
          return Ok(());
        }
        let result = factory.make_role_distance_numerical(from, role, to)?;
        data.add_numerical(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::SumRoleDistanceNumerical => {
      let candidates = triples(&data.roles, &data.roles, &data.roles, it);
      each(data, candidates, |data, (from, role, to)| {
        if from == to {
          return Ok(());
        }
        let result = factory.make_sum_role_distance_numerical(from, role, to)?;
        data.add_numerical(factory, result, rule).map(drop)
      })
    }

    // endregion Numericals

    // region Booleans

    GeneratorRule::EmptyBoolean => {
      let candidates = data.concepts.level(it);
      each(data, candidates, |data, concept| {
        let result = factory.make_concept_empty_boolean(concept)?;
        data.add_boolean(factory, result, rule).map(drop)
      })?;
      let candidates = data.roles.level(it);
      each(data, candidates, |data, role| {
        let result = factory.make_role_empty_boolean(role)?;
        data.add_boolean(factory, result, rule).map(drop)
      })
    }

    GeneratorRule::InclusionBoolean => {
      let candidates = distinct_pairs(&data.concepts, it);
      each(data, candidates, |data, (left, right)| {
        let result = factory.make_concept_inclusion_boolean(left, right)?;
        data.add_boolean(factory, result, rule).map(drop)
      })?;
      let candidates = distinct_pairs(&data.roles, it);
      each(data, candidates, |data, (left, right)| {
        let result = factory.make_role_inclusion_boolean(left, right)?;
        data.add_boolean(factory, result, rule).map(drop)
      })
    }

    // endregion Booleans

    // Seeds were handled above.
    GeneratorRule::PrimitiveConcept
    | GeneratorRule::BotConcept
    | GeneratorRule::TopConcept
    | GeneratorRule::OneOfConcept
    | GeneratorRule::PrimitiveRole
    | GeneratorRule::TopRole
    | GeneratorRule::NullaryBoolean => Ok(()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn bucket(levels: &[&[u32]]) -> Buckets<u32> {
    let mut buckets = Buckets::new(levels.len());
    for (complexity, level) in levels.iter().enumerate() {
      for &element in level.iter() {
        buckets.push(complexity + 1, element);
      }
    }
    buckets
  }

  #[test]
  fn commutative_pairs_are_unordered() {
    let buckets = bucket(&[&[1, 2, 3], &[4]]);
    assert_eq!(commutative_pairs(&buckets, 2), vec![(1, 2), (1, 3), (2, 3)]);
    assert_eq!(commutative_pairs(&buckets, 3), vec![(1, 4), (2, 4), (3, 4)]);
  }

  #[test]
  fn distinct_pairs_are_ordered() {
    let buckets = bucket(&[&[1, 2]]);
    assert_eq!(distinct_pairs(&buckets, 2), vec![(1, 2), (2, 1)]);
  }

  #[test]
  fn triples_sum_to_iteration() {
    let buckets = bucket(&[&[1], &[2]]);
    // (1,1,2), (1,2,1), (2,1,1) in complexities
    assert_eq!(triples(&buckets, &buckets, &buckets, 4), vec![(1, 1, 2), (1, 2, 1), (2, 1, 1)]);
    assert!(triples(&buckets, &buckets, &buckets, 2).is_empty());
  }
}
