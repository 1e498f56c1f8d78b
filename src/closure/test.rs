use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;
use similar_asserts::assert_eq;

use super::*;

fn dense(rows: Vec<Vec<u8>>) -> DenseMatrix {
    DenseMatrix::try_from(rows).unwrap()
}

fn numbers_fixture() -> LabeledAdjacency<&'static str> {
    LabeledAdjacency::try_from_nested(vec![
        ("one", vec![("one", ())]),
        ("two", vec![("two", ()), ("three", ()), ("four", ())]),
        ("three", vec![("two", ()), ("three", ())]),
        ("four", vec![("one", ()), ("four", ())]),
    ])
    .unwrap()
}

/// Reference answer: `i` reaches `j` iff a nonempty edge path connects them.
fn bfs_reaches(edges: &[(usize, usize)], i: usize, j: usize) -> bool {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([i]);
    while let Some(v) = queue.pop_front() {
        for &(from, to) in edges {
            if from == v && seen.insert(to) {
                if to == j {
                    return true;
                }
                queue.push_back(to);
            }
        }
    }
    false
}

fn from_edges(n: usize, edges: &[(usize, usize)]) -> (DenseMatrix, LabeledAdjacency<usize>) {
    let mut matrix = DenseMatrix::new(n);
    let mut labeled = LabeledAdjacency::new();
    for v in 0..n {
        labeled.add_vertex(v);
    }
    for &(from, to) in edges {
        matrix.insert(from, to);
        labeled.add_edge(from, to);
    }
    (matrix, labeled)
}

fn edges_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..9).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..3 * n)))
}

#[test]
fn dense_fixture() {
    let mut m = dense(vec![
        vec![1, 0, 0, 0],
        vec![0, 1, 1, 1],
        vec![0, 1, 1, 0],
        vec![1, 0, 1, 1],
    ]);
    let stats = m.close();

    assert_eq!(
        m,
        dense(vec![
            vec![1, 0, 0, 0],
            vec![1, 1, 1, 1],
            vec![1, 1, 1, 1],
            vec![1, 1, 1, 1],
        ])
    );
    assert_eq!(
        stats,
        ClosureStats {
            vertices: 4,
            relaxations: 64,
            added: 4
        }
    );
    insta::assert_snapshot!(m.to_string(), @r"
    1000
    1111
    1111
    1111
    ");
}

#[test]
fn labeled_fixture() {
    let mut g = numbers_fixture();
    g.close();

    assert!(g.reaches(&"three", &"one"));
    assert!(g.reaches(&"two", &"one"));
    assert!(g.reaches(&"three", &"four"));
    assert!(!g.reaches(&"one", &"two"));
    assert_eq!(g.successors(&"one").map(|t| t.len()), Some(1));
    assert_eq!(g.edge_count(), 11);
    assert_eq!(g.vertex_count(), 4);
}

#[test]
fn labeled_fixture_display() {
    let mut g = numbers_fixture();
    g.close();
    insta::assert_snapshot!(g.to_string(), @r"
    one -> one
    two -> two, three, four, one
    three -> two, three, four, one
    four -> one, four
    ");
}

#[test]
fn isolated_vertices_stay_isolated() {
    let mut g = LabeledAdjacency::new();
    g.add_edge("a", "b");
    g.add_edge("b", "c");
    g.add_vertex("lonely");
    g.close();

    assert_eq!(g.successors(&"lonely").map(|t| t.len()), Some(0));
    assert!(g.vertices().all(|v| !g.reaches(v, &"lonely")));
    assert!(g.reaches(&"a", &"c"));

    let mut m = DenseMatrix::new(3);
    m.insert(0, 1);
    m.close();
    assert_eq!(m.successors(2).count(), 0);
    assert!((0..3).all(|i| !m.reaches(i, 2)));
}

#[test]
fn probing_never_creates_vertices() {
    // "sink" has no outgoing entries at all; every pass probes its row.
    let mut g = LabeledAdjacency::new();
    g.add_edge("a", "sink");
    g.add_edge("b", "a");
    let before: Vec<_> = g.vertices().copied().collect();

    g.close();

    assert_eq!(g.vertices().copied().collect::<Vec<_>>(), before);
    assert_eq!(g.successors(&"sink").map(|t| t.len()), Some(0));
    assert!(!g.contains_vertex(&"ghost"));
    assert!(g.reaches(&"b", &"sink"));
}

#[test]
fn no_self_loops_without_cycles() {
    let mut m = DenseMatrix::new(3);
    m.insert(0, 1);
    m.insert(1, 2);
    m.close();
    assert!((0..3).all(|v| !m.reaches(v, v)));
    assert!(m.reaches(0, 2));
}

#[test]
fn cycles_reach_themselves() {
    let mut m = DenseMatrix::new(3);
    m.insert(0, 1);
    m.insert(1, 2);
    m.insert(2, 0);
    m.close();
    assert_eq!(m.edge_count(), 9);
}

#[test]
fn reflexive_config_seeds_diagonal() {
    let mut m = DenseMatrix::new(3);
    m.insert(0, 1);
    let stats = m.close_with(&ClosureConfig::default().with_reflexive(true));
    assert_eq!(stats.added, 3);
    insta::assert_snapshot!(m.to_string(), @r"
    110
    010
    001
    ");

    let mut g = LabeledAdjacency::new();
    g.add_edge('x', 'y');
    g.close_with(&ClosureConfig::default().with_reflexive(true));
    assert!(g.reaches(&'x', &'x') && g.reaches(&'y', &'y') && g.reaches(&'x', &'y'));
}

#[test]
fn closure_leaves_original_untouched() {
    let mut m = DenseMatrix::new(3);
    m.insert(0, 1);
    m.insert(1, 2);
    let closed = m.closure();
    assert!(!m.reaches(0, 2));
    assert!(closed.reaches(0, 2));
}

#[test]
fn compute_closure_chains() {
    let mut graph: Graph = numbers_fixture_owned().into();
    let edges = compute_closure(&mut graph).edge_count();
    assert_eq!(edges, 11);
    assert!(graph.is_transitively_closed());
    assert!(graph
        .as_labeled()
        .is_some_and(|g| g.reaches(&"three".to_string(), &"one".to_string())));
    assert!(graph.as_dense().is_none());
}

fn numbers_fixture_owned() -> LabeledAdjacency<String> {
    let fixture = numbers_fixture();
    LabeledAdjacency::try_from_nested(fixture.adjacency().iter().map(|(v, targets)| {
        let row: Vec<_> = targets.iter().map(|t| (t.to_string(), true)).collect();
        (v.to_string(), row)
    }))
    .unwrap()
}

#[test]
fn compute_closure_with_reports_stats() {
    let mut graph: Graph = DenseMatrix::new(5).into();
    let stats = compute_closure_with(&mut graph, &ClosureConfig::strict());
    assert_eq!(stats.vertices, 5);
    assert_eq!(stats.relaxations, 125);
    assert_eq!(stats.added, 0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn empty_graphs() {
    let mut m = DenseMatrix::new(0);
    assert_eq!(m.close(), ClosureStats::default());
    let mut g: LabeledAdjacency<u8> = LabeledAdjacency::new();
    assert_eq!(g.close(), ClosureStats::default());
}

#[test]
fn relaxations_scale_cubically() {
    let mut a = DenseMatrix::new(6);
    let mut b = DenseMatrix::new(12);
    let (sa, sb) = (a.close(), b.close());
    assert_eq!(sb.relaxations, 8 * sa.relaxations);

    let mut la = LabeledAdjacency::new();
    let mut lb = LabeledAdjacency::new();
    for v in 0..6u32 {
        la.add_vertex(v);
    }
    for v in 0..12u32 {
        lb.add_vertex(v);
    }
    assert_eq!(lb.close().relaxations, 8 * la.close().relaxations);
}

#[test]
fn graph_equality_is_per_variant() {
    let dense: Graph<u8> = DenseMatrix::new(1).into();
    let mut labeled = LabeledAdjacency::new();
    labeled.add_vertex(0u8);
    assert_ne!(dense, Graph::from(labeled));
}

proptest! {
    #[test]
    fn matches_path_search((n, edges) in edges_strategy()) {
        let (mut matrix, mut labeled) = from_edges(n, &edges);
        matrix.close();
        labeled.close();
        for i in 0..n {
            for j in 0..n {
                let expected = bfs_reaches(&edges, i, j);
                prop_assert_eq!(matrix.reaches(i, j), expected);
                prop_assert_eq!(labeled.reaches(&i, &j), expected);
            }
        }
    }

    #[test]
    fn idempotent((n, edges) in edges_strategy()) {
        let (matrix, labeled) = from_edges(n, &edges);
        let once = matrix.closure();
        let mut twice = once.clone();
        prop_assert_eq!(twice.close().added, 0);
        prop_assert_eq!(&twice, &once);

        let once = labeled.closure();
        prop_assert_eq!(once.closure(), once);
    }

    #[test]
    fn monotone((n, edges) in edges_strategy()) {
        let (matrix, labeled) = from_edges(n, &edges);
        let closed = matrix.closure();
        let closed_labeled = labeled.closure();
        for &(from, to) in &edges {
            prop_assert!(closed.reaches(from, to));
            prop_assert!(closed_labeled.reaches(&from, &to));
        }
        prop_assert_eq!(closed_labeled.vertex_count(), n);
    }

    #[test]
    fn result_is_transitive(rows in (1usize..9).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(any::<bool>(), n), n)
    })) {
        let matrix = DenseMatrix::try_from(rows).unwrap();
        prop_assert!(matrix.closure().is_transitively_closed());
    }
}
