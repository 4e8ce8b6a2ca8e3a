/*!

Errors raised while registering vocabulary items, constructing elements, or evaluating them.

Reaching a generator limit is *not* an error; it is reported through
[`GenerationResult::limit_reached`](crate::generator::GenerationResult).

*/

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// Malformed description text: unknown keyword, wrong argument count, unbalanced parentheses.
  #[error("syntax error: {0}")]
  Syntax(String),

  /// Unknown or duplicate predicate, constant, object or atom, arity mismatch, or a child of the wrong category.
  #[error("vocabulary error: {0}")]
  Vocabulary(String),

  /// A state was evaluated with a factory built on a different vocabulary.
  #[error("the state's instance does not share the element factory's vocabulary")]
  VocabularyMismatch,

  /// A child handle that does not belong to the factory, or a projection position outside {0, 1}.
  #[error("structural error: {0}")]
  Structural(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages_name_the_error_kind() {
    assert_eq!(
      Error::Syntax("unknown keyword c_foo".to_string()).to_string(),
      "syntax error: unknown keyword c_foo"
    );
    assert!(Error::VocabularyMismatch.to_string().contains("vocabulary"));
  }
}
