use std::collections::HashMap;

use pertgraph_core::{FloatPolicy, GraphShape, TaskId, Ticks};
use pertgraph_graph::TaskGraph;
use serde::Serialize;
use tracing::info;

use crate::pass;

/// Computed dates and floats for one task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskSchedule {
    pub task_id: TaskId,
    pub name: String,
    pub duration: Ticks,
    pub earliest_start: i64,
    pub earliest_finish: i64,
    pub latest_start: i64,
    pub latest_finish: i64,
    pub total_float: i64,
    pub free_float: i64,
    pub critical: bool,
}

/// Full scheduling result for a project: per-task dates in topological
/// order, the project horizon, and the ordered critical path.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSchedule {
    pub policy: FloatPolicy,
    pub shape: GraphShape,
    pub horizon: i64,
    tasks: Vec<TaskSchedule>,
    #[serde(skip)]
    index: HashMap<TaskId, usize>,
    pub critical_path: Vec<TaskId>,
}

impl ProjectSchedule {
    /// Task schedules in topological order.
    pub fn tasks(&self) -> &[TaskSchedule] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&TaskSchedule> {
        self.index.get(&id).map(|i| &self.tasks[*i])
    }

    /// Every zero-float task, in topological order. This is a superset of
    /// the tasks on [`critical_path`](Self::critical_path) when parallel
    /// critical branches exist.
    pub fn critical_tasks(&self) -> impl Iterator<Item = &TaskSchedule> {
        self.tasks.iter().filter(|t| t.critical)
    }

    pub fn critical_path_tasks(&self) -> Vec<&TaskSchedule> {
        self.critical_path
            .iter()
            .filter_map(|id| self.task(*id))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler {
    policy: FloatPolicy,
}

impl Scheduler {
    pub fn new(policy: FloatPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FloatPolicy {
        self.policy
    }

    pub fn schedule(&self, graph: &TaskGraph) -> ProjectSchedule {
        let values = pass::run(graph, self.policy);
        let shape = graph.shape();

        let mut tasks = Vec::with_capacity(graph.len());
        let mut index = HashMap::with_capacity(graph.len());
        for &id in graph.topological_order() {
            let task = graph.task(id).expect("topological order only lists graph tasks");
            let terminal = graph.successors(id).is_empty();

            let earliest_start = values.earliest_start[&id];
            let earliest_finish = values.earliest_finish[&id];
            let latest_finish = values.latest_finish[&id];

            // The legacy policy floats terminal tasks of a complex graph
            // against their earliest start; see FloatPolicy.
            let total_float = if terminal
                && self.policy == FloatPolicy::Legacy
                && shape == GraphShape::Dag
            {
                latest_finish - earliest_start
            } else {
                latest_finish - earliest_finish
            };

            let free_float = if terminal {
                values.horizon - earliest_finish
            } else {
                let earliest_successor_start = graph
                    .successors(id)
                    .iter()
                    .map(|s| values.earliest_start[s])
                    .min()
                    .expect("non-terminal task has successors");
                earliest_successor_start - earliest_finish
            };

            index.insert(id, tasks.len());
            tasks.push(TaskSchedule {
                task_id: id,
                name: task.name.clone(),
                duration: task.duration,
                earliest_start,
                earliest_finish,
                latest_start: values.latest_start[&id],
                latest_finish,
                total_float,
                free_float,
                critical: total_float == 0,
            });
        }

        let critical_path = walk_critical_path(graph, &tasks, &index);

        info!(
            tasks = tasks.len(),
            horizon = values.horizon,
            critical = critical_path.len(),
            policy = %self.policy,
            "schedule computed"
        );

        ProjectSchedule {
            policy: self.policy,
            shape,
            horizon: values.horizon,
            tasks,
            index,
            critical_path,
        }
    }
}

/// Start from the critical terminal finishing last and walk backward through
/// the driving predecessors: critical tasks whose earliest finish equals the
/// successor's earliest start. When several qualify the longest one wins,
/// with the task name as a deterministic tiebreak.
fn walk_critical_path(
    graph: &TaskGraph,
    tasks: &[TaskSchedule],
    index: &HashMap<TaskId, usize>,
) -> Vec<TaskId> {
    let entry = |id: TaskId| &tasks[index[&id]];

    let start = graph
        .terminal_tasks()
        .into_iter()
        .filter(|id| entry(*id).critical)
        .max_by(|a, b| {
            let (a, b) = (entry(*a), entry(*b));
            a.earliest_finish
                .cmp(&b.earliest_finish)
                .then_with(|| b.name.cmp(&a.name))
        });

    let Some(start) = start else {
        return Vec::new();
    };

    let mut path = vec![start];
    let mut current = start;
    loop {
        let driving = graph
            .predecessors(current)
            .iter()
            .copied()
            .filter(|p| {
                let p = entry(*p);
                p.critical && p.earliest_finish == entry(current).earliest_start
            })
            .max_by(|a, b| {
                let (a, b) = (entry(*a), entry(*b));
                a.duration.cmp(&b.duration).then_with(|| b.name.cmp(&a.name))
            });
        match driving {
            Some(pred) => {
                path.push(pred);
                current = pred;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
