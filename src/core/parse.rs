/*!

Building elements from descriptions. Every `parse_*` reads text with the `Expression` reader and hands the tree to
the matching `parse_tree_*`, which accepts any [`SyntaxTree`].

A tree node is resolved by its keyword. A keyword of the wrong category where an element of another category is
required (a role where a concept belongs, say) is a `Vocabulary` error; a keyword of no category, a wrong number of
arguments, or a non-integer position is a `Syntax` error. Children are built bottom-up through the `make_*`
operations, so a failing description may leave its already-built subexpressions in the factory, but never the
failing element itself.

*/

use crate::{
  api::{
    element::{BooleanRef, Category, ConceptRef, NumericalRef, RoleRef},
    syntax::{Expression, SyntaxTree},
  },
  core::{factory::ElementFactory, Error, Result},
};

impl ElementFactory {
  // region Text

  pub fn parse_concept(&mut self, description: &str) -> Result<ConceptRef> {
    self.parse_tree_concept(&Expression::parse(description)?)
  }

  pub fn parse_role(&mut self, description: &str) -> Result<RoleRef> {
    self.parse_tree_role(&Expression::parse(description)?)
  }

  pub fn parse_numerical(&mut self, description: &str) -> Result<NumericalRef> {
    self.parse_tree_numerical(&Expression::parse(description)?)
  }

  pub fn parse_boolean(&mut self, description: &str) -> Result<BooleanRef> {
    self.parse_tree_boolean(&Expression::parse(description)?)
  }

  // endregion Text

  // region Trees

  pub fn parse_tree_concept<T: SyntaxTree>(&mut self, tree: &T) -> Result<ConceptRef> {
    let children = tree.children();
    match tree.name() {
      "c_primitive" => {
        expect_arguments(tree, 2)?;
        let vocabulary = self.vocabulary().clone();
        let predicate  = vocabulary.predicate_by_name(name_argument(&children[0])?)?;
        self.make_primitive_concept(predicate, integer_argument(&children[1])?)
      }

      "c_bot" => {
        expect_arguments(tree, 0)?;
        self.make_bot_concept()
      }

      "c_top" => {
        expect_arguments(tree, 0)?;
        self.make_top_concept()
      }

      "c_one_of" => {
        expect_arguments(tree, 1)?;
        let vocabulary = self.vocabulary().clone();
        let constant   = vocabulary.constant_by_name(name_argument(&children[0])?)?;
        self.make_one_of_concept(constant)
      }

      "c_not" => {
        expect_arguments(tree, 1)?;
        let concept = self.parse_tree_concept(&children[0])?;
        self.make_not_concept(concept)
      }

      "c_and" | "c_or" | "c_diff" => {
        expect_arguments(tree, 2)?;
        let left  = self.parse_tree_concept(&children[0])?;
        let right = self.parse_tree_concept(&children[1])?;
        match tree.name() {
          "c_and" => self.make_and_concept(left, right),
          "c_or"  => self.make_or_concept(left, right),
          _       => self.make_diff_concept(left, right),
        }
      }

      "c_some" | "c_all" => {
        expect_arguments(tree, 2)?;
        let role    = self.parse_tree_role(&children[0])?;
        let concept = self.parse_tree_concept(&children[1])?;
        match tree.name() {
          "c_some" => self.make_some_concept(role, concept),
          _        => self.make_all_concept(role, concept),
        }
      }

      "c_subset" | "c_equal" => {
        expect_arguments(tree, 2)?;
        let left  = self.parse_tree_role(&children[0])?;
        let right = self.parse_tree_role(&children[1])?;
        match tree.name() {
          "c_subset" => self.make_subset_concept(left, right),
          _          => self.make_equal_concept(left, right),
        }
      }

      "c_projection" => {
        expect_arguments(tree, 2)?;
        let role = self.parse_tree_role(&children[0])?;
        self.make_projection_concept(role, integer_argument(&children[1])?)
      }

      name => Err(unexpected_keyword(name, Category::Concept)),
    }
  }

  pub fn parse_tree_role<T: SyntaxTree>(&mut self, tree: &T) -> Result<RoleRef> {
    let children = tree.children();
    match tree.name() {
      "r_primitive" => {
        expect_arguments(tree, 3)?;
        let vocabulary = self.vocabulary().clone();
        let predicate  = vocabulary.predicate_by_name(name_argument(&children[0])?)?;
        let position1  = integer_argument(&children[1])?;
        let position2  = integer_argument(&children[2])?;
        self.make_primitive_role(predicate, position1, position2)
      }

      "r_top" => {
        expect_arguments(tree, 0)?;
        self.make_top_role()
      }

      "r_not" | "r_inverse" | "r_transitive_closure" | "r_transitive_reflexive_closure" => {
        expect_arguments(tree, 1)?;
        let role = self.parse_tree_role(&children[0])?;
        match tree.name() {
          "r_not"                => self.make_not_role(role),
          "r_inverse"            => self.make_inverse_role(role),
          "r_transitive_closure" => self.make_transitive_closure_role(role),
          _                      => self.make_transitive_reflexive_closure_role(role),
        }
      }

      "r_and" | "r_or" | "r_diff" | "r_compose" => {
        expect_arguments(tree, 2)?;
        let left  = self.parse_tree_role(&children[0])?;
        let right = self.parse_tree_role(&children[1])?;
        match tree.name() {
          "r_and"  => self.make_and_role(left, right),
          "r_or"   => self.make_or_role(left, right),
          "r_diff" => self.make_diff_role(left, right),
          _        => self.make_compose_role(left, right),
        }
      }

      "r_restrict" => {
        expect_arguments(tree, 2)?;
        let role    = self.parse_tree_role(&children[0])?;
        let concept = self.parse_tree_concept(&children[1])?;
        self.make_restrict_role(role, concept)
      }

      "r_identity" => {
        expect_arguments(tree, 1)?;
        let concept = self.parse_tree_concept(&children[0])?;
        self.make_identity_role(concept)
      }

      name => Err(unexpected_keyword(name, Category::Role)),
    }
  }

  pub fn parse_tree_numerical<T: SyntaxTree>(&mut self, tree: &T) -> Result<NumericalRef> {
    let children = tree.children();
    match tree.name() {
      "n_count" => {
        expect_arguments(tree, 1)?;
        match set_category(tree, &children[0])? {
          Category::Concept => {
            let concept = self.parse_tree_concept(&children[0])?;
            self.make_concept_count_numerical(concept)
          }
          _ => {
            let role = self.parse_tree_role(&children[0])?;
            self.make_role_count_numerical(role)
          }
        }
      }

      "n_concept_distance" | "n_sum_concept_distance" => {
        expect_arguments(tree, 3)?;
        let from = self.parse_tree_concept(&children[0])?;
        let role = self.parse_tree_role(&children[1])?;
        let to   = self.parse_tree_concept(&children[2])?;
        match tree.name() {
          "n_concept_distance" => self.make_concept_distance_numerical(from, role, to),
          _                    => self.make_sum_concept_distance_numerical(from, role, to),
        }
      }

      "n_role_distance" | "n_sum_role_distance" => {
        expect_arguments(tree, 3)?;
        let from = self.parse_tree_role(&children[0])?;
        let role = self.parse_tree_role(&children[1])?;
        let to   = self.parse_tree_role(&children[2])?;
        match tree.name() {
          "n_role_distance" => self.make_role_distance_numerical(from, role, to),
          _                 => self.make_sum_role_distance_numerical(from, role, to),
        }
      }

      name => Err(unexpected_keyword(name, Category::Numerical)),
    }
  }

  pub fn parse_tree_boolean<T: SyntaxTree>(&mut self, tree: &T) -> Result<BooleanRef> {
    let children = tree.children();
    match tree.name() {
      "b_nullary" => {
        expect_arguments(tree, 1)?;
        let vocabulary = self.vocabulary().clone();
        let predicate  = vocabulary.predicate_by_name(name_argument(&children[0])?)?;
        self.make_nullary_boolean(predicate)
      }

      "b_empty" => {
        expect_arguments(tree, 1)?;
        match set_category(tree, &children[0])? {
          Category::Concept => {
            let concept = self.parse_tree_concept(&children[0])?;
            self.make_concept_empty_boolean(concept)
          }
          _ => {
            let role = self.parse_tree_role(&children[0])?;
            self.make_role_empty_boolean(role)
          }
        }
      }

      "b_inclusion" => {
        expect_arguments(tree, 2)?;
        // The second argument must have the category of the first; parsing it as such reports a mismatch.
        match set_category(tree, &children[0])? {
          Category::Concept => {
            let left  = self.parse_tree_concept(&children[0])?;
            let right = self.parse_tree_concept(&children[1])?;
            self.make_concept_inclusion_boolean(left, right)
          }
          _ => {
            let left  = self.parse_tree_role(&children[0])?;
            let right = self.parse_tree_role(&children[1])?;
            self.make_role_inclusion_boolean(left, right)
          }
        }
      }

      name => Err(unexpected_keyword(name, Category::Boolean)),
    }
  }

  // endregion Trees
}

fn expect_arguments<T: SyntaxTree>(tree: &T, count: usize) -> Result<()> {
  let found = tree.children().len();
  if found == count {
    Ok(())
  } else {
    Err(Error::Syntax(format!("{} expects {} arguments but {} were given", tree.name(), count, found)))
  }
}

/// A bare name such as a predicate or constant.
fn name_argument<T: SyntaxTree>(tree: &T) -> Result<&str> {
  if tree.children().is_empty() {
    Ok(tree.name())
  } else {
    Err(Error::Syntax(format!("expected a name but found an expression headed by {}", tree.name())))
  }
}

fn integer_argument<T: SyntaxTree>(tree: &T) -> Result<usize> {
  match tree.name().parse::<usize>() {
    Ok(value) if tree.children().is_empty() => Ok(value),
    _ => Err(Error::Syntax(format!("expected a non-negative integer but found {}", tree.name()))),
  }
}

/// The category of an argument that may be either a concept or a role.
fn set_category<T: SyntaxTree>(parent: &T, argument: &T) -> Result<Category> {
  match Category::of_keyword(argument.name()) {
    Some(category @ (Category::Concept | Category::Role)) => Ok(category),
    Some(category) => Err(Error::Vocabulary(format!(
      "{} expects a concept or a role but {} is a {}", parent.name(), argument.name(), category
    ))),
    None => Err(Error::Syntax(format!("unknown keyword {}", argument.name()))),
  }
}

fn unexpected_keyword(name: &str, expected: Category) -> Error {
  match Category::of_keyword(name) {
    Some(category) if category != expected => {
      Error::Vocabulary(format!("expected a {} but found {}, which is a {}", expected, name, category))
    }
    _ => Error::Syntax(format!("unknown {} keyword {}", expected, name)),
  }
}
