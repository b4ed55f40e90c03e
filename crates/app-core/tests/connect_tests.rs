use app_core::connect::ConnectivityGraph;
use glam::Vec3;

fn x(v: f32) -> Vec3 {
    Vec3::new(v, 0.0, 0.0)
}

#[test]
fn empty_and_singleton_inputs_produce_no_edges() {
    let mut graph = ConnectivityGraph::new();
    graph.rebuild(&[]);
    assert_eq!(graph.edge_count(), 0);
    graph.rebuild(&[x(1.0)]);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn each_source_emits_at_most_one_edge() {
    let positions: Vec<Vec3> = (0..10).map(|i| x(i as f32 * 1.5)).collect();
    let mut graph = ConnectivityGraph::new();
    graph.rebuild(&positions);
    assert!(graph.edge_count() <= positions.len());
    assert_eq!(graph.points().len(), graph.edge_count() * 2);
    // Every even-indexed endpoint is the source, in input order.
    let mut last_source = -1.0f32;
    for pair in graph.points().chunks(2) {
        assert!(pair[0].x > last_source, "sources appear in input order");
        last_source = pair[0].x;
        assert_ne!(pair[0], pair[1], "no self edges");
    }
}

#[test]
fn matching_is_directed_not_mutual() {
    // p0 and p1 both find p2 nearest: p2 receives two incoming edges while
    // sourcing none, because by its turn every other member is spent.
    let positions = [x(0.0), x(10.0), x(4.0)];
    let mut graph = ConnectivityGraph::new();
    graph.rebuild(&positions);

    assert_eq!(graph.edge_count(), 2);
    let points = graph.points();
    assert_eq!(points[0], x(0.0));
    assert_eq!(points[1], x(4.0));
    assert_eq!(points[2], x(10.0));
    assert_eq!(points[3], x(4.0));
}

#[test]
fn spent_targets_are_excluded_for_later_sources() {
    // p1's nearest neighbor overall is p0, but p0 already sourced an edge, so
    // p1 has to settle for p2.
    let positions = [x(0.0), x(1.0), x(2.5)];
    let mut graph = ConnectivityGraph::new();
    graph.rebuild(&positions);

    let points = graph.points();
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(points[0], x(0.0));
    assert_eq!(points[1], x(1.0));
    assert_eq!(points[2], x(1.0));
    assert_eq!(points[3], x(2.5));
}

#[test]
fn coincident_members_still_connect() {
    let positions = [x(3.0), x(3.0)];
    let mut graph = ConnectivityGraph::new();
    graph.rebuild(&positions);
    // Zero distance is a valid nearest neighbor, not a missing one.
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn repeated_rebuilds_replace_rather_than_accumulate() {
    let mut graph = ConnectivityGraph::new();
    let positions: Vec<Vec3> = (0..8).map(|i| x(i as f32)).collect();
    graph.rebuild(&positions);
    let expected = graph.edge_count();

    for _ in 0..1000 {
        graph.rebuild(&positions);
        assert_eq!(graph.edge_count(), expected);
        assert!(graph.points().len() <= positions.len() * 2);
    }
}
