use std::iter::once;
use std::fmt::Display;

/**
Interleaves a separator between the items of an iterator, which doesn't exist in the stdlib. (C.f. `Vec::join(…)`)

The separator is computed from the item that follows it, which lets callers join borrowed `&str`s without
allocating.

    # use planfeat::abstractions::join_iter;
    let children = ["c_primitive(on,0)", "c_top"].iter().cloned();
    let joined = join_iter(children, |_| ",").collect::<String>();
    // "c_primitive(on,0),c_top"
 */
pub fn join_iter<T>(mut iter: impl Iterator<Item = T>, sep: impl Fn(&T) -> T)
                    -> impl Iterator<Item = T>
{
  iter
      .next()
      .into_iter()
      .chain(iter.flat_map(move |s| once(sep(&s)).chain(once(s))))
}

/// Join a list of things that can be displayed as string with a given separator.
///
/// This is a convenience function that defers to `join_iter`.
pub fn join_string<T:Display>(iter: impl Iterator<Item = T>, sep: &str) -> String {
  join_iter(iter.map(|t| t.to_string()), |_| sep.to_string()).collect::<String>()
}

#[cfg(test)]
mod tests {
  use super::{join_iter, join_string};

  #[test]
  fn join_iter_argument_list() {
    let children = ["c_primitive(on,0)", "c_top"].iter().cloned();
    let joined = join_iter(children, |_| ",").collect::<String>();
    assert_eq!(joined, "c_primitive(on,0),c_top");
  }

  #[test]
  fn join_iter_single_item_has_no_separator() {
    let joined = join_iter(["r_top"].iter().cloned(), |_| ",").collect::<String>();
    assert_eq!(joined, "r_top");
  }

  #[test]
  fn join_string_numbers(){
    let positions = [0, 1, 2];
    assert_eq!(join_string(positions.iter(), ","), "0,1,2");
  }
}
