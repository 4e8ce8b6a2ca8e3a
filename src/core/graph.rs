/*!

Graph algorithms over role denotations, reading a role as the edge set of a directed graph on objects.

*/

use std::collections::VecDeque;

use crate::{
  abstractions::NatSet,
  api::denotation::{RoleDenotation, INF},
};

/// The exact transitive closure, by Warshall's algorithm over successor rows: after step `k`, row `i` holds every
/// object reachable from `i` through intermediate objects `0..=k`.
pub(crate) fn transitive_closure(role: &RoleDenotation) -> RoleDenotation {
  let n = role.num_objects();
  let mut rows: Vec<NatSet> = (0..n).map(|a| role.successors(a).collect()).collect();

  for k in 0..n {
    let row_k = rows[k].clone();
    for row in rows.iter_mut() {
      if row.contains(k) {
        row.union_in_place(&row_k);
      }
    }
  }

  RoleDenotation::from_pairs(
    n,
    rows.iter()
        .enumerate()
        .flat_map(|(a, row)| row.iter().map(move |b| (a, b))),
  )
}

/// Multi-source breadth first search. Entry `b` of the result is the length of a shortest path from any source to
/// `b`, or `INF` if there is none.
pub(crate) fn distances_from(role: &RoleDenotation, sources: impl IntoIterator<Item = usize>) -> Vec<i32> {
  let n = role.num_objects();
  let successors: Vec<Vec<usize>> = (0..n).map(|a| role.successors(a).collect()).collect();

  let mut distances = vec![INF; n];
  let mut queue     = VecDeque::new();
  for source in sources {
    if distances[source] != 0 {
      distances[source] = 0;
      queue.push_back(source);
    }
  }

  while let Some(a) = queue.pop_front() {
    let next = distances[a] + 1;
    for &b in &successors[a] {
      if distances[b] == INF {
        distances[b] = next;
        queue.push_back(b);
      }
    }
  }

  distances
}

/// Floyd-Warshall. Entry `[a][b]` is the length of a shortest path from `a` to `b`, `0` on the diagonal, `INF` if
/// `b` is unreachable.
pub(crate) fn pairwise_distances(role: &RoleDenotation) -> Vec<Vec<i32>> {
  let n = role.num_objects();
  let mut distances = vec![vec![INF; n]; n];
  for (a, row) in distances.iter_mut().enumerate() {
    row[a] = 0;
  }
  for (a, b) in role.iter() {
    if a != b {
      distances[a][b] = 1;
    }
  }

  for k in 0..n {
    for i in 0..n {
      let through_k = distances[i][k];
      if through_k == INF {
        continue;
      }
      for j in 0..n {
        let candidate = saturating_add(through_k, distances[k][j]);
        if candidate < distances[i][j] {
          distances[i][j] = candidate;
        }
      }
    }
  }

  distances
}

/// Adds two distances, treating `INF` as absorbing and capping overflow at `INF`.
#[inline(always)]
pub(crate) fn saturating_add(left: i32, right: i32) -> i32 {
  if left == INF || right == INF {
    INF
  } else {
    left.saturating_add(right)
  }
}

/// Sums distances, yielding `INF` as soon as one term is `INF`.
pub(crate) fn saturating_sum(terms: impl IntoIterator<Item = i32>) -> i32 {
  let mut sum = 0;
  for term in terms {
    sum = saturating_add(sum, term);
    if sum == INF {
      break;
    }
  }
  sum
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, Rng, SeedableRng};

  use super::*;

  fn random_role(rng: &mut StdRng, n: usize) -> RoleDenotation {
    RoleDenotation::from_pairs(
      n,
      (0..n).flat_map(|a| (0..n).map(move |b| (a, b))).filter(|_| rng.gen_bool(0.25)).collect::<Vec<_>>(),
    )
  }

  /// Reachability by iterating relational composition to a fixed point.
  fn naive_closure(role: &RoleDenotation) -> RoleDenotation {
    let n = role.num_objects();
    let mut closure = role.clone();
    loop {
      let mut grown = closure.clone();
      for (a, b) in closure.iter() {
        for c in role.successors(b) {
          grown.insert(a, c);
        }
      }
      if grown == closure {
        return closure;
      }
      closure = grown;
    }
  }

  #[test]
  fn closure_of_a_chain() {
    let chain   = RoleDenotation::from_pairs(4, [(0, 1), (1, 2), (2, 3)]);
    let closure = transitive_closure(&chain);
    assert_eq!(closure.len(), 6);
    assert!(closure.contains(0, 3));
    assert!(!closure.contains(3, 0));
    assert!(!closure.contains(0, 0));
  }

  #[test]
  fn closure_matches_fixed_point() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
      let n    = rng.gen_range(1..=6);
      let role = random_role(&mut rng, n);
      assert_eq!(transitive_closure(&role), naive_closure(&role), "role {}", role);
    }
  }

  #[test]
  fn breadth_first_and_floyd_warshall_agree() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
      let n        = rng.gen_range(1..=6);
      let role     = random_role(&mut rng, n);
      let pairwise = pairwise_distances(&role);
      for source in 0..n {
        assert_eq!(distances_from(&role, [source]), pairwise[source], "role {} from {}", role, source);
      }
    }
  }

  #[test]
  fn multi_source_distances() {
    let chain = RoleDenotation::from_pairs(5, [(0, 1), (1, 2), (2, 3)]);
    assert_eq!(distances_from(&chain, [0, 2]), vec![0, 1, 0, 1, INF]);
  }

  #[test]
  fn sums_saturate() {
    assert_eq!(saturating_sum([1, 2, 3]), 6);
    assert_eq!(saturating_sum([1, INF, 3]), INF);
    assert_eq!(saturating_sum([INF - 1, 5]), INF);
    assert_eq!(saturating_sum(std::iter::empty()), 0);
  }
}
