/*!

Element descriptions as unannotated syntax trees.

The factory builds elements from anything implementing [`SyntaxTree`]: a node has a name and an ordered list of
children. [`Expression`] is the tree produced by this module's reader for the surface syntax

```text
expr := IDENT | INTEGER | IDENT '(' expr (',' expr)* ')'
```

Whitespace between tokens is ignored. Identifiers may contain letters, digits, `_` and `-`, so PDDL names like
`on-table` are accepted. The reader only checks the shape of the text; whether a keyword exists or has the right
number of arguments is decided by the factory.

*/

use std::{
  fmt::{Display, Formatter},
  ops::Range,
};

use logos::Logos;

use crate::{
  abstractions::join_string,
  core::{Error, Result},
};

/// A node of a parsed element description.
pub trait SyntaxTree {
  fn name(&self) -> &str;
  fn children(&self) -> &[Self] where Self: Sized;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
  pub name    : String,
  pub children: Vec<Expression>,
}

impl Expression {
  pub fn leaf(name: &str) -> Self {
    Expression { name: name.to_string(), children: Vec::new() }
  }

  pub fn new(name: &str, children: Vec<Expression>) -> Self {
    Expression { name: name.to_string(), children }
  }

  /// Reads a description such as `c_and(c_primitive(on, 0), c_top)`.
  pub fn parse(text: &str) -> Result<Expression> {
    Reader::new(text)?.read()
  }
}

impl SyntaxTree for Expression {
  fn name(&self) -> &str {
    &self.name
  }

  fn children(&self) -> &[Self] {
    &self.children
  }
}

impl Display for Expression {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if self.children.is_empty() {
      write!(f, "{}", self.name)
    } else {
      write!(f, "{}({})", self.name, join_string(self.children.iter(), ","))
    }
  }
}

// region Reader

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r]+")]
enum Token<'src> {
  #[token("(")]
  LParen,

  #[token(")")]
  RParen,

  #[token(",")]
  Comma,

  #[regex(r"[A-Za-z_][A-Za-z0-9_\-]*", |lex| lex.slice())]
  Identifier(&'src str),

  #[regex(r"[0-9]+", |lex| lex.slice())]
  Integer(&'src str),
}

/// Deepest nesting the reader accepts. Parsing and evaluation both recurse once per level.
pub const MAX_DEPTH: usize = 256;

struct Reader<'src> {
  tokens: Vec<(Token<'src>, Range<usize>)>,
  pos   : usize,
  depth : usize,
  input : &'src str,
}

impl<'src> Reader<'src> {
  fn new(input: &'src str) -> Result<Self> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(input).spanned() {
      match result {
        Ok(token) => tokens.push((token, span)),
        Err(_) => {
          return Err(Error::Syntax(format!(
            "unexpected character {:?} at offset {} in {:?}",
            &input[span.clone()], span.start, input
          )));
        }
      }
    }

    Ok(Reader { tokens, pos: 0, depth: 0, input })
  }

  fn read(mut self) -> Result<Expression> {
    let expression = self.read_expression()?;
    match self.tokens.get(self.pos) {
      None => Ok(expression),
      Some((_, span)) => Err(self.error_at(span.start, "trailing input")),
    }
  }

  fn read_expression(&mut self) -> Result<Expression> {
    let name = match self.next() {
      Some((Token::Identifier(name), _)) | Some((Token::Integer(name), _)) => name,
      Some((_, span))                                                      => {
        return Err(self.error_at(span.start, "expected a name or an integer"));
      }
      None => return Err(self.error_at(self.input.len(), "unexpected end of input")),
    };

    if !matches!(self.peek(), Some(Token::LParen)) {
      return Ok(Expression::leaf(name));
    }
    if self.depth == MAX_DEPTH {
      return Err(self.error_at(self.tokens[self.pos].1.start, "expression nested too deeply"));
    }
    self.pos   += 1;
    self.depth += 1;

    let mut children = vec![self.read_expression()?];
    loop {
      match self.next() {
        Some((Token::Comma, _))  => children.push(self.read_expression()?),
        Some((Token::RParen, _)) => break,
        Some((_, span))          => return Err(self.error_at(span.start, "expected ',' or ')'")),
        None                     => return Err(self.error_at(self.input.len(), "unbalanced parentheses")),
      }
    }

    self.depth -= 1;
    Ok(Expression::new(name, children))
  }

  fn peek(&self) -> Option<Token<'src>> {
    self.tokens.get(self.pos).map(|(token, _)| *token)
  }

  fn next(&mut self) -> Option<(Token<'src>, Range<usize>)> {
    let token = self.tokens.get(self.pos).cloned();
    if token.is_some() {
      self.pos += 1;
    }
    token
  }

  fn error_at(&self, offset: usize, message: &str) -> Error {
    Error::Syntax(format!("{} at offset {} in {:?}", message, offset, self.input))
  }
}

// endregion Reader
