use std::collections::HashMap;

use pertgraph_core::{FloatPolicy, GraphShape, TaskId};
use pertgraph_graph::TaskGraph;
use tracing::debug;

/// Raw output of the forward and backward passes, keyed by task id. Earliest
/// values are always non-negative; latest values are signed because the
/// legacy policy can push them below the earliest ones.
#[derive(Debug)]
pub(crate) struct PassValues {
    pub earliest_start: HashMap<TaskId, i64>,
    pub earliest_finish: HashMap<TaskId, i64>,
    pub latest_start: HashMap<TaskId, i64>,
    pub latest_finish: HashMap<TaskId, i64>,
    pub horizon: i64,
}

/// Both passes run iteratively over the memoized topological order, so each
/// task is visited exactly once per pass regardless of how many paths reach
/// it. Cycles cannot occur here: `TaskGraph` construction already rejected
/// them.
pub(crate) fn run(graph: &TaskGraph, policy: FloatPolicy) -> PassValues {
    let order = graph.topological_order();
    let duration = |id: TaskId| graph.task(id).map_or(0, |t| t.duration as i64);

    let mut earliest_start: HashMap<TaskId, i64> = HashMap::with_capacity(order.len());
    let mut earliest_finish: HashMap<TaskId, i64> = HashMap::with_capacity(order.len());
    for &id in order {
        let es = graph
            .predecessors(id)
            .iter()
            .map(|p| earliest_start[p] + duration(*p))
            .max()
            .unwrap_or(0);
        earliest_start.insert(id, es);
        earliest_finish.insert(id, es + duration(id));
    }

    let horizon = earliest_finish.values().copied().max().unwrap_or(0);

    let mut latest_start: HashMap<TaskId, i64> = HashMap::with_capacity(order.len());
    let mut latest_finish: HashMap<TaskId, i64> = HashMap::with_capacity(order.len());
    for &id in order.iter().rev() {
        let successors = graph.successors(id);
        let lf = if successors.is_empty() {
            match policy {
                FloatPolicy::Normalized => horizon,
                FloatPolicy::Legacy => match graph.shape() {
                    GraphShape::Chain => earliest_finish[&id],
                    GraphShape::Dag => earliest_start[&id],
                },
            }
        } else {
            successors
                .iter()
                .map(|s| latest_finish[s] - duration(*s))
                .min()
                .expect("non-empty successor list")
        };
        latest_finish.insert(id, lf);
        latest_start.insert(id, lf - duration(id));
    }

    debug!(
        tasks = order.len(),
        horizon,
        policy = %policy,
        "completed forward and backward passes"
    );

    PassValues {
        earliest_start,
        earliest_finish,
        latest_start,
        latest_finish,
        horizon,
    }
}
