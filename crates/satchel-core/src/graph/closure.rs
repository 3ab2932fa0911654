// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A generic breadth-first transitive closure.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// Collects every node reachable from `start`, including `start` itself.
///
/// The graph is described lazily by `edges`, which returns the direct
/// successors of a node. Nodes are returned in breadth-first discovery order
/// and each node appears once, so cycles are harmless.
///
/// # Arguments
///
/// * `start`: The node to start from. Always the first element of the result.
/// * `edges`: Returns the direct successors of a node.
pub fn transitive_closure<T, F, I>(start: T, mut edges: F) -> Vec<T>
where
    T: Clone + Eq + Hash,
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    let mut visited: HashSet<T> = HashSet::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    visited.insert(start.clone());
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        for next in edges(&node) {
            if visited.insert(next.clone()) {
                queue.push_back(next);
            }
        }
        order.push(node);
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn graph(edges: &[(u32, u32)]) -> HashMap<u32, Vec<u32>> {
        let mut map: HashMap<u32, Vec<u32>> = HashMap::new();
        for &(from, to) in edges {
            map.entry(from).or_default().push(to);
        }
        map
    }

    #[test]
    fn includes_start_first() {
        let g = graph(&[(1, 2), (2, 3)]);
        let closure = transitive_closure(1, |n| g.get(n).cloned().unwrap_or_default());
        assert_eq!(closure, vec![1, 2, 3]);
    }

    #[test]
    fn diamond_yields_each_node_once() {
        let g = graph(&[(1, 2), (1, 3), (2, 4), (3, 4)]);
        let closure = transitive_closure(1, |n| g.get(n).cloned().unwrap_or_default());
        assert_eq!(closure.len(), 4);
        assert_eq!(closure.iter().filter(|&&n| n == 4).count(), 1);
    }

    #[test]
    fn cycles_terminate() {
        let g = graph(&[(1, 2), (2, 3), (3, 1)]);
        let closure = transitive_closure(1, |n| g.get(n).cloned().unwrap_or_default());
        assert_eq!(closure, vec![1, 2, 3]);
    }

    #[test]
    fn isolated_node() {
        let closure = transitive_closure(7, |_| Vec::new());
        assert_eq!(closure, vec![7]);
    }
}
