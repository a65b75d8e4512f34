//! Strongly connected components (Kosaraju)
//!
//! Pass 1 records nodes in depth-first post-order over the original graph.
//! Pass 2 walks the transposed graph in reverse finish order; each traversal
//! tree is one component. Both passes keep their own explicit stacks.

use super::components::ComponentSet;
use super::IndexedGraph;
use crate::graph::Graph;
use bibgraph_common::metrics::record_algorithm_run;

/// Partition a graph into strongly connected components.
///
/// A size-1 component means the node lies on no cycle; larger components are
/// sets of mutually reachable nodes. Undirected graphs are accepted, in
/// which case the result equals their connected components.
pub fn strongly_connected_components(graph: &Graph) -> ComponentSet {
    let indexed = IndexedGraph::new(graph);
    record_algorithm_run("kosaraju");

    let finish = finish_order(&indexed);
    let reversed = indexed.transposed();

    let n = indexed.len();
    let mut assigned = vec![false; n];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for &root in finish.iter().rev() {
        if assigned[root] {
            continue;
        }
        assigned[root] = true;
        stack.push(root);

        let mut members = Vec::new();
        while let Some(node) = stack.pop() {
            members.push(node);
            for &next in &reversed[node] {
                if !assigned[next] {
                    assigned[next] = true;
                    stack.push(next);
                }
            }
        }
        components.push(indexed.sorted_ids(members));
    }

    tracing::debug!(
        nodes = n,
        components = components.len(),
        cyclic = components.iter().filter(|c| c.len() > 1).count(),
        "Strongly connected components found"
    );
    ComponentSet::new(components)
}

/// Depth-first post-order over every node, roots taken in index order
fn finish_order(indexed: &IndexedGraph<'_>) -> Vec<usize> {
    let n = indexed.len();
    let mut visited = vec![false; n];
    let mut finish = Vec::with_capacity(n);
    // (node, position of the next outgoing edge to explore)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let (node, position) = *top;
            match indexed.out[node].get(position) {
                Some(&(next, _)) => {
                    top.1 += 1;
                    if !visited[next] {
                        visited[next] = true;
                        stack.push((next, 0));
                    }
                }
                None => {
                    finish.push(node);
                    stack.pop();
                }
            }
        }
    }
    finish
}
