//! Contract tests for `DirectedGraph`: the properties downstream
//! algorithms rely on.

use std::collections::HashSet;

use chomp_graph::{DirectedGraph, GraphError};
use petgraph::algo::{kosaraju_scc, toposort};
use proptest::prelude::*;

fn graph_from(edges: &[(u8, u8)]) -> DirectedGraph<u8> {
    let mut graph = DirectedGraph::new();
    for &(u, v) in edges {
        graph.add_edge(u, v);
    }
    graph
}

/// Parse the `i -> j;` and `k[label=...]` statements out of DOT text.
fn dot_statements(dot: &str) -> (Vec<usize>, Vec<(usize, usize)>) {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    for line in dot.lines() {
        if let Some((u, v)) = line.trim_end_matches(';').split_once(" -> ") {
            edges.push((u.parse().unwrap(), v.parse().unwrap()));
        } else if let Some((id, _)) = line.split_once("[label=") {
            nodes.push(id.parse().unwrap());
        }
    }
    (nodes, edges)
}

proptest! {
    #[test]
    fn add_edge_makes_endpoints_and_successor(edges in prop::collection::vec((0u8..16, 0u8..16), 0..40)) {
        let graph = graph_from(&edges);
        for (u, v) in &edges {
            prop_assert!(graph.adjacencies(u).unwrap().contains(v));
            prop_assert!(graph.vertices().any(|x| x == u));
            prop_assert!(graph.vertices().any(|x| x == v));
        }
    }

    #[test]
    fn edges_never_repeat(edges in prop::collection::vec((0u8..6, 0u8..6), 0..60)) {
        let graph = graph_from(&edges);
        let listed: Vec<(u8, u8)> = graph.edges().map(|(u, v)| (*u, *v)).collect();
        let distinct: HashSet<(u8, u8)> = edges.iter().copied().collect();
        prop_assert_eq!(listed.len(), distinct.len());
        prop_assert_eq!(listed.into_iter().collect::<HashSet<_>>(), distinct);
    }

    #[test]
    fn remove_edge_is_idempotent(edges in prop::collection::vec((0u8..8, 0u8..8), 1..30), pick in 0usize..30) {
        let mut graph = graph_from(&edges);
        let (u, v) = edges[pick % edges.len()];

        prop_assert_eq!(graph.remove_edge(&u, &v), Ok(true));
        let after_first: Vec<(u8, u8)> = graph.edges().map(|(a, b)| (*a, *b)).collect();
        prop_assert_eq!(graph.remove_edge(&u, &v), Ok(false));
        let after_second: Vec<(u8, u8)> = graph.edges().map(|(a, b)| (*a, *b)).collect();

        prop_assert_eq!(after_first, after_second);
        prop_assert!(!graph.adjacencies(&u).unwrap().contains(&v));
        prop_assert!(graph.contains_vertex(&v));
    }

    #[test]
    fn unlabeled_vertices_report_display_form(vertices in prop::collection::vec(any::<i32>(), 0..20)) {
        let mut graph = DirectedGraph::new();
        for v in &vertices {
            graph.add_vertex(*v);
        }
        for v in &vertices {
            prop_assert_eq!(graph.vertex_label(v).unwrap(), v.to_string());
        }
    }

    #[test]
    fn graphviz_has_one_statement_per_vertex_and_edge(
        edges in prop::collection::vec((0u8..10, 0u8..10), 0..40),
    ) {
        let graph = graph_from(&edges);
        let (nodes, dot_edges) = dot_statements(&graph.graphviz());
        let n = graph.vertex_count();

        prop_assert_eq!(nodes, (0..n).collect::<Vec<_>>());
        prop_assert_eq!(dot_edges.len(), graph.edge_count());
        prop_assert!(dot_edges.iter().all(|&(u, v)| u < n && v < n));
    }
}

#[test]
fn graphviz_escapes_hostile_labels() {
    let mut graph = DirectedGraph::new();
    graph.add_vertex_with_label("q", "a \"quoted\" label");
    graph.add_edge("q", "p");
    let dot = graph.graphviz();
    assert!(dot.contains(r#"0[label="a \"quoted\" label"];"#));
    assert!(dot.contains("0 -> 1;"));
}

#[test]
fn queries_on_absent_vertices_fail() {
    let graph = graph_from(&[(1, 2)]);
    assert_eq!(
        graph.adjacencies(&3).unwrap_err(),
        GraphError::UnknownVertex("3".to_string())
    );
    assert!(graph.vertex_label(&3).is_err());
}

#[test]
fn petgraph_bridge_feeds_topological_sort() {
    let mut graph = DirectedGraph::new();
    graph.add_edge("shirt", "tie");
    graph.add_edge("tie", "jacket");
    graph.add_edge("trousers", "shoes");
    graph.add_edge("trousers", "jacket");

    let exported = graph.to_petgraph();
    let order: Vec<&str> = toposort(&exported, None)
        .unwrap()
        .into_iter()
        .map(|idx| exported[idx])
        .collect();

    let pos = |name: &str| order.iter().position(|&v| v == name).unwrap();
    assert!(pos("shirt") < pos("tie"));
    assert!(pos("tie") < pos("jacket"));
    assert!(pos("trousers") < pos("shoes"));
}

#[test]
fn petgraph_bridge_finds_cycles() {
    let graph = graph_from(&[(1, 2), (2, 3), (3, 1), (3, 4)]);
    let exported = graph.to_petgraph();
    let mut sizes: Vec<usize> = kosaraju_scc(&exported).iter().map(Vec::len).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![1, 3]);
    assert!(toposort(&exported, None).is_err());
}
