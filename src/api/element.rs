/*!

Handles to elements and the information the factory stores about each of them.

An element is addressed by a typed index into its factory's table for that category: `ConceptRef`, `RoleRef`,
`NumericalRef`, `BooleanRef`. Since the factory hash-conses elements by their canonical representation, two handles
of the same type are equal exactly when they denote the same expression, so comparing handles is comparing
expressions.

Handles are only created by the factory. A handle is meaningful only for the factory that created it.

*/

use std::fmt::{Display, Formatter};

use paste::paste;

/// Evaluate-time cost classes. An element's score is its own class plus the scores of its children.
pub const SCORE_CONSTANT : usize = 1;
pub const SCORE_LINEAR   : usize = 2;
pub const SCORE_QUADRATIC: usize = 3;
pub const SCORE_CUBIC    : usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
  Concept,
  Role,
  Numerical,
  Boolean,
}

impl Category {
  /// The prefix shared by the keywords of every operator of this category.
  pub fn keyword_prefix(&self) -> &'static str {
    match self {
      Category::Concept   => "c_",
      Category::Role      => "r_",
      Category::Numerical => "n_",
      Category::Boolean   => "b_",
    }
  }

  /// The category whose keywords start with the prefix of `keyword`, if any.
  pub fn of_keyword(keyword: &str) -> Option<Category> {
    [Category::Concept, Category::Role, Category::Numerical, Category::Boolean]
        .into_iter()
        .find(|category| keyword.starts_with(category.keyword_prefix()))
  }
}

impl Display for Category {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Category::Concept   => write!(f, "concept"),
      Category::Role      => write!(f, "role"),
      Category::Numerical => write!(f, "numerical"),
      Category::Boolean   => write!(f, "boolean"),
    }
  }
}

/// Defines the handle type `<Category>Ref` for each category along with its conversion into `ElementRef`.
macro_rules! define_element_refs {
  ($($category:ident),+) => {
    paste!{

    /// A handle of any category.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub enum ElementRef {
      $( $category([<$category Ref>]), )+
    }

    impl ElementRef {
      pub fn category(&self) -> Category {
        match self {
          $( ElementRef::$category(_) => Category::$category, )+
        }
      }

      pub fn index(&self) -> usize {
        match self {
          $( ElementRef::$category(element) => element.index(), )+
        }
      }
    }

    $(
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct [<$category Ref>](pub(crate) u32);

    impl [<$category Ref>] {
      #[inline(always)]
      pub fn index(self) -> usize {
        self.0 as usize
      }
    }

    impl Display for [<$category Ref>] {
      fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", stringify!([<$category:lower>]), self.0)
      }
    }

    impl From<[<$category Ref>]> for ElementRef {
      fn from(element: [<$category Ref>]) -> Self {
        ElementRef::$category(element)
      }
    }
    )+

    } // end paste!
  };
}

define_element_refs!(Concept, Role, Numerical, Boolean);

/// What the factory records about every element when it is inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementInfo {
  /// Canonical representation, e.g. `c_and(c_primitive(on,0),c_top)`. Equal representations mean equal handles.
  pub repr      : String,
  /// One plus the sum of the children's complexities; 1 for leaves.
  pub complexity: usize,
  /// True if the element's denotation is the same in every state of an instance.
  pub is_static : bool,
  /// Estimated evaluation cost.
  pub score     : usize,
}
