use pertgraph_core::{GraphShape, SchedulerError, Task, TaskId};
use pertgraph_graph::{TaskGraph, TaskGraphBuilder};
use std::collections::HashMap;

fn build_graph(tasks: &[(&str, u64)], edges: &[(&str, &str)]) -> Result<TaskGraph, SchedulerError> {
    let mut builder = TaskGraphBuilder::new();
    let mut ids: HashMap<&str, TaskId> = HashMap::new();
    for (name, duration) in tasks {
        let task = Task::new(*name, *duration);
        ids.insert(name, task.id);
        builder.add_task(task)?;
    }
    for (pred, succ) in edges {
        builder.add_dependency(ids[pred], ids[succ])?;
    }
    builder.build()
}

#[test]
fn chain_is_detected_as_chain() {
    let graph = build_graph(
        &[("a", 1), ("b", 2), ("c", 3)],
        &[("a", "b"), ("b", "c")],
    )
    .unwrap();
    assert_eq!(graph.shape(), GraphShape::Chain);
    assert_eq!(graph.len(), 3);
}

#[test]
fn fan_out_alone_stays_a_chain() {
    // One predecessor feeding two successors has no multi-predecessor task.
    let graph = build_graph(&[("a", 1), ("b", 1), ("c", 1)], &[("a", "b"), ("a", "c")]).unwrap();
    assert_eq!(graph.shape(), GraphShape::Chain);
}

#[test]
fn merge_point_makes_a_dag() {
    let graph = build_graph(
        &[("a", 1), ("b", 1), ("c", 1)],
        &[("a", "c"), ("b", "c")],
    )
    .unwrap();
    assert_eq!(graph.shape(), GraphShape::Dag);
}

#[test]
fn single_task_graph_is_a_chain() {
    let graph = build_graph(&[("only", 5)], &[]).unwrap();
    assert_eq!(graph.shape(), GraphShape::Chain);
    assert_eq!(graph.entry_tasks(), graph.terminal_tasks());
}

#[test]
fn topological_order_respects_edges() {
    let graph = build_graph(
        &[("d", 1), ("b", 1), ("a", 1), ("c", 1)],
        &[("a", "b"), ("b", "d"), ("a", "c"), ("c", "d")],
    )
    .unwrap();

    let positions: HashMap<TaskId, usize> = graph
        .topological_order()
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i))
        .collect();
    for task in graph.tasks() {
        for pred in graph.predecessors(task.id) {
            assert!(positions[pred] < positions[&task.id]);
        }
    }
}

#[test]
fn entry_and_terminal_tasks() {
    let graph = build_graph(
        &[("a", 1), ("b", 1), ("c", 1), ("d", 1)],
        &[("a", "c"), ("b", "c"), ("c", "d")],
    )
    .unwrap();

    let names = |ids: Vec<TaskId>| -> Vec<String> {
        ids.iter()
            .map(|id| graph.task(*id).unwrap().name.clone())
            .collect()
    };
    assert_eq!(names(graph.entry_tasks()), vec!["a", "b"]);
    assert_eq!(names(graph.terminal_tasks()), vec!["d"]);
}

#[test]
fn cycle_is_rejected_with_a_concrete_cycle() {
    let err = build_graph(
        &[("a", 1), ("b", 1), ("c", 1)],
        &[("a", "b"), ("b", "c"), ("c", "a")],
    )
    .unwrap_err();

    match err {
        SchedulerError::CyclicSchedule { cycle } => {
            // Closed walk: first and last name match, all three tasks appear.
            assert_eq!(cycle.first(), cycle.last());
            assert_eq!(cycle.len(), 4);
            for name in ["a", "b", "c"] {
                assert!(cycle.iter().any(|n| n == name), "missing {} in {:?}", name, cycle);
            }
        }
        other => panic!("expected CyclicSchedule, got {:?}", other),
    }
}

#[test]
fn two_node_cycle_is_rejected() {
    let err = build_graph(&[("a", 1), ("b", 1)], &[("a", "b"), ("b", "a")]).unwrap_err();
    assert!(matches!(err, SchedulerError::CyclicSchedule { .. }));
}

#[test]
fn disconnected_components_are_legal() {
    let graph = build_graph(
        &[("a", 1), ("b", 1), ("x", 1), ("y", 1)],
        &[("a", "b"), ("x", "y")],
    )
    .unwrap();
    assert_eq!(graph.entry_tasks().len(), 2);
    assert_eq!(graph.terminal_tasks().len(), 2);
}

#[test]
fn fingerprint_is_stable_across_rebuilds() {
    let make = || {
        build_graph(
            &[("a", 2), ("b", 3), ("c", 4)],
            &[("a", "b"), ("a", "c")],
        )
        .unwrap()
    };
    assert_eq!(make().fingerprint(), make().fingerprint());
}

#[test]
fn fingerprint_tracks_durations_and_edges() {
    let base = build_graph(&[("a", 2), ("b", 3)], &[("a", "b")]).unwrap();
    let longer = build_graph(&[("a", 2), ("b", 4)], &[("a", "b")]).unwrap();
    let unlinked = build_graph(&[("a", 2), ("b", 3)], &[]).unwrap();

    assert_ne!(base.fingerprint(), longer.fingerprint());
    assert_ne!(base.fingerprint(), unlinked.fingerprint());
}
