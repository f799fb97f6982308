//! Layout phase: deterministic column/row placement from edge topology.
//!
//! Nodes are leveled Kahn-style: level 0 holds every node without incoming
//! edges, and a node joins the level after the one in which its last
//! predecessor was placed. Nodes left over on cycles go into one trailing
//! level, so the pass always terminates.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::parse::types::{Position, WorkflowGraph};

const TRACING_TARGET: &str = "flowgraph::layout";

/// Node ids grouped by column, each column in first-discovered order.
pub fn levels(graph: &WorkflowGraph) -> Vec<Vec<String>> {
    // -----------------------------------------------------------------------
    // 1. In-degrees over edges whose endpoints both exist
    // -----------------------------------------------------------------------
    let mut order: Vec<&str> = Vec::with_capacity(graph.nodes.len());
    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    for node in &graph.nodes {
        if in_degree.insert(node.id.as_str(), 0).is_none() {
            order.push(node.id.as_str());
        }
    }

    let edges: Vec<(&str, &str)> = graph
        .edges
        .iter()
        .filter(|e| in_degree.contains_key(e.source.as_str()))
        .filter(|e| in_degree.contains_key(e.target.as_str()))
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();

    for (_, target) in &edges {
        if let Some(d) = in_degree.get_mut(target) {
            *d += 1;
        }
    }

    // -----------------------------------------------------------------------
    // 2. Level 0: in-degree 0, in node-list order
    // -----------------------------------------------------------------------
    let mut placed: HashSet<&str> = HashSet::new();
    let mut current: Vec<&str> = order
        .iter()
        .copied()
        .filter(|id| in_degree.get(id) == Some(&0))
        .collect();
    placed.extend(current.iter().copied());

    // -----------------------------------------------------------------------
    // 3. Peel levels; each edge is consumed once, when its source is placed
    // -----------------------------------------------------------------------
    let mut result: Vec<Vec<&str>> = Vec::new();
    while !current.is_empty() {
        let in_level: HashSet<&str> = current.iter().copied().collect();
        let mut next: Vec<&str> = Vec::new();

        for &(source, target) in &edges {
            if !in_level.contains(source) || placed.contains(target) {
                continue;
            }
            if let Some(d) = in_degree.get_mut(target) {
                *d = d.saturating_sub(1);
                if *d == 0 {
                    placed.insert(target);
                    next.push(target);
                }
            }
        }

        result.push(std::mem::replace(&mut current, next));
    }

    // -----------------------------------------------------------------------
    // 4. Trailing level for anything stuck on a cycle
    // -----------------------------------------------------------------------
    let stranded: Vec<&str> = order
        .iter()
        .copied()
        .filter(|id| !placed.contains(id))
        .collect();
    if !stranded.is_empty() {
        tracing::debug!(
            target: TRACING_TARGET,
            stranded = stranded.len(),
            "Cyclic nodes collected into trailing level"
        );
        result.push(stranded);
    }

    result
        .into_iter()
        .map(|level| level.into_iter().map(str::to_string).collect())
        .collect()
}

/// Positions with the stock spacing.
pub fn layout(graph: &WorkflowGraph) -> BTreeMap<String, Position> {
    layout_with(graph, &LayoutConfig::default())
}

pub fn layout_with(graph: &WorkflowGraph, config: &LayoutConfig) -> BTreeMap<String, Position> {
    let levels = levels(graph);
    let mut positions = BTreeMap::new();
    for (level_idx, level) in levels.iter().enumerate() {
        for (row, id) in level.iter().enumerate() {
            positions.insert(
                id.clone(),
                Position::new(
                    level_idx as f64 * config.x_gap + config.x_offset,
                    row as f64 * config.y_gap + config.y_offset,
                ),
            );
        }
    }

    tracing::debug!(
        target: TRACING_TARGET,
        nodes = positions.len(),
        levels = levels.len(),
        "Computed layout"
    );
    positions
}

/// A copy of the graph with every node repositioned. Edges and config are untouched.
pub fn apply_layout(graph: &WorkflowGraph, config: &LayoutConfig) -> WorkflowGraph {
    let positions = layout_with(graph, config);
    let nodes = graph
        .nodes
        .iter()
        .map(|node| {
            let mut node = node.clone();
            if let Some(pos) = positions.get(&node.id) {
                node.position = *pos;
            }
            node
        })
        .collect();
    WorkflowGraph {
        nodes,
        edges: graph.edges.clone(),
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::{Edge, Node, NodeKind};

    fn make_graph(ids: &[&str], edges: &[(&str, &str)]) -> WorkflowGraph {
        WorkflowGraph::new(
            ids.iter().map(|id| Node::new(*id, NodeKind::Llm, *id)).collect(),
            edges
                .iter()
                .enumerate()
                .map(|(i, (s, t))| Edge::new(format!("e{}", i), *s, *t))
                .collect(),
        )
    }

    #[test]
    fn diamond_levels() {
        // a → b, a → c, b → d, c → d
        let g = make_graph(&["a", "b", "c", "d"], &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        assert_eq!(levels(&g), vec![vec!["a"], vec!["b", "c"], vec!["d"]]);
    }

    #[test]
    fn node_waits_for_its_last_predecessor() {
        // a → b → c, a → c
        let g = make_graph(&["a", "b", "c"], &[("a", "c"), ("a", "b"), ("b", "c")]);
        assert_eq!(levels(&g), vec![vec!["a"], vec!["b"], vec!["c"]]);
    }

    #[test]
    fn pure_cycle_is_one_trailing_level() {
        let g = make_graph(&["x", "y", "z"], &[("x", "y"), ("y", "z"), ("z", "x")]);
        assert_eq!(levels(&g), vec![vec!["x", "y", "z"]]);
    }

    #[test]
    fn cycle_downstream_of_a_root() {
        // r → a, a → b, b → a
        let g = make_graph(&["r", "a", "b"], &[("r", "a"), ("a", "b"), ("b", "a")]);
        assert_eq!(levels(&g), vec![vec!["r"], vec!["a", "b"]]);
    }

    #[test]
    fn dangling_edges_are_ignored() {
        let g = make_graph(&["a", "b"], &[("ghost", "b"), ("a", "b")]);
        assert_eq!(levels(&g), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn apply_layout_only_moves_nodes() {
        let g = make_graph(&["a", "b"], &[("a", "b")]);
        let moved = apply_layout(&g, &LayoutConfig::default());
        assert_eq!(moved.edges, g.edges);
        assert_eq!(moved.nodes[1].position, Position::new(320.0, 60.0));
        assert_eq!(moved.nodes[1].config, g.nodes[1].config);
    }
}
