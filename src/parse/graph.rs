//! petgraph-based index over a `WorkflowGraph`.
//!
//! Built leniently: edges whose endpoints do not exist are recorded instead
//! of failing, so validation can report them and layout can ignore them.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};

use super::types::WorkflowGraph;

pub struct GraphIndex {
    /// Node weight is the node id; edge weight is the edge's position in `WorkflowGraph::edges`.
    pub graph: DiGraph<String, usize>,
    pub node_indices: HashMap<String, NodeIndex>,
    /// Positions of edges with a missing source or target.
    pub dangling: Vec<usize>,
}

impl GraphIndex {
    pub fn build(workflow: &WorkflowGraph) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut dangling = Vec::new();

        for node in &workflow.nodes {
            // First occurrence wins; duplicates are a structural error reported elsewhere.
            if !node_indices.contains_key(&node.id) {
                let idx = graph.add_node(node.id.clone());
                node_indices.insert(node.id.clone(), idx);
            }
        }

        for (pos, edge) in workflow.edges.iter().enumerate() {
            match (node_indices.get(&edge.source), node_indices.get(&edge.target)) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(s, t, pos);
                }
                _ => dangling.push(pos),
            }
        }

        GraphIndex {
            graph,
            node_indices,
            dangling,
        }
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.node_indices.contains_key(node_id)
    }

    /// Positions of edges ending at `node_id`, in edge-list order.
    pub fn incoming(&self, node_id: &str) -> Vec<usize> {
        self.edge_positions(node_id, Direction::Incoming)
    }

    /// Positions of edges leaving `node_id`, in edge-list order.
    pub fn outgoing(&self, node_id: &str) -> Vec<usize> {
        self.edge_positions(node_id, Direction::Outgoing)
    }

    fn edge_positions(&self, node_id: &str, dir: Direction) -> Vec<usize> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        let mut positions: Vec<usize> = self
            .graph
            .edges_directed(idx, dir)
            .map(|e| *e.weight())
            .collect();
        positions.sort_unstable();
        positions
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.incoming(node_id).len()
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.outgoing(node_id).len()
    }

    pub fn is_isolated(&self, node_id: &str) -> bool {
        self.incoming_count(node_id) == 0 && self.outgoing_count(node_id) == 0
    }

    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }
}
