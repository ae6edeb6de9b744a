use std::collections::{HashMap, HashSet, VecDeque};

use pertgraph_core::{Dependency, GraphShape, Result, SchedulerError, Task, TaskId};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Validated, immutable task dependency graph.
///
/// Construction goes through [`crate::TaskGraphBuilder`], which guarantees
/// that every edge endpoint exists and that the graph is acyclic, so the
/// scheduling passes never have to re-check either. The topological order is
/// computed once here and reused by every pass over the graph.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: HashMap<TaskId, Task>,
    insertion: Vec<TaskId>,
    successors: HashMap<TaskId, Vec<TaskId>>,
    predecessors: HashMap<TaskId, Vec<TaskId>>,
    topo: Vec<TaskId>,
    shape: GraphShape,
}

impl TaskGraph {
    pub(crate) fn assemble(
        tasks: HashMap<TaskId, Task>,
        insertion: Vec<TaskId>,
        edges: Vec<Dependency>,
    ) -> Result<Self> {
        if tasks.is_empty() {
            return Err(SchedulerError::EmptyProject);
        }

        let mut successors: HashMap<TaskId, Vec<TaskId>> =
            insertion.iter().map(|id| (*id, Vec::new())).collect();
        let mut predecessors: HashMap<TaskId, Vec<TaskId>> =
            insertion.iter().map(|id| (*id, Vec::new())).collect();
        for edge in &edges {
            successors
                .get_mut(&edge.predecessor)
                .expect("builder validated edge endpoints")
                .push(edge.successor);
            predecessors
                .get_mut(&edge.successor)
                .expect("builder validated edge endpoints")
                .push(edge.predecessor);
        }

        let topo = Self::topological_sort(&tasks, &insertion, &successors, &predecessors)?;

        let shape = if predecessors.values().any(|preds| preds.len() > 1) {
            GraphShape::Dag
        } else {
            GraphShape::Chain
        };

        debug!(
            tasks = tasks.len(),
            edges = edges.len(),
            shape = %shape,
            "validated task graph"
        );

        Ok(Self {
            tasks,
            insertion,
            successors,
            predecessors,
            topo,
            shape,
        })
    }

    /// Kahn's algorithm, seeded in insertion order so the resulting order is
    /// deterministic for a given build sequence. Leftover nodes mean a cycle;
    /// one concrete cycle is extracted for the error.
    fn topological_sort(
        tasks: &HashMap<TaskId, Task>,
        insertion: &[TaskId],
        successors: &HashMap<TaskId, Vec<TaskId>>,
        predecessors: &HashMap<TaskId, Vec<TaskId>>,
    ) -> Result<Vec<TaskId>> {
        let mut indegree: HashMap<TaskId, usize> = insertion
            .iter()
            .map(|id| (*id, predecessors[id].len()))
            .collect();

        let mut queue: VecDeque<TaskId> = insertion
            .iter()
            .filter(|id| indegree[*id] == 0)
            .copied()
            .collect();

        let mut topo = Vec::with_capacity(insertion.len());
        while let Some(id) = queue.pop_front() {
            topo.push(id);
            for succ in &successors[&id] {
                let remaining = indegree.get_mut(succ).expect("all nodes have an indegree");
                *remaining -= 1;
                if *remaining == 0 {
                    queue.push_back(*succ);
                }
            }
        }

        if topo.len() != insertion.len() {
            let stuck: Vec<TaskId> = insertion
                .iter()
                .filter(|id| indegree[*id] > 0)
                .copied()
                .collect();
            return Err(SchedulerError::CyclicSchedule {
                cycle: Self::extract_cycle(tasks, predecessors, &stuck),
            });
        }
        Ok(topo)
    }

    /// Walk predecessor links inside the stuck set until a node repeats.
    /// Every stuck node still has a stuck predecessor (all others were
    /// drained by Kahn), so the walk always closes a cycle.
    fn extract_cycle(
        tasks: &HashMap<TaskId, Task>,
        predecessors: &HashMap<TaskId, Vec<TaskId>>,
        stuck: &[TaskId],
    ) -> Vec<String> {
        let in_stuck: HashSet<TaskId> = stuck.iter().copied().collect();
        let mut seen: HashMap<TaskId, usize> = HashMap::new();
        let mut path: Vec<TaskId> = Vec::new();

        let mut current = stuck[0];
        loop {
            if let Some(&pos) = seen.get(&current) {
                // The walk followed edges backward; reverse to report the
                // cycle in predecessor -> successor direction, closing on the
                // first node.
                let mut names: Vec<String> = path[pos..]
                    .iter()
                    .rev()
                    .map(|id| tasks[id].name.clone())
                    .collect();
                names.push(names[0].clone());
                return names;
            }
            seen.insert(current, path.len());
            path.push(current);
            current = predecessors[&current]
                .iter()
                .find(|p| in_stuck.contains(*p))
                .copied()
                .expect("stuck node without stuck predecessor");
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.successors.values().map(Vec::len).sum()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Tasks in the order they were added to the builder.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.insertion.iter().map(|id| &self.tasks[id])
    }

    pub fn predecessors(&self, id: TaskId) -> &[TaskId] {
        self.predecessors.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn successors(&self, id: TaskId) -> &[TaskId] {
        self.successors.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tasks with no predecessors, in topological order.
    pub fn entry_tasks(&self) -> Vec<TaskId> {
        self.topo
            .iter()
            .filter(|id| self.predecessors[*id].is_empty())
            .copied()
            .collect()
    }

    /// Tasks with no successors, in topological order.
    pub fn terminal_tasks(&self) -> Vec<TaskId> {
        self.topo
            .iter()
            .filter(|id| self.successors[*id].is_empty())
            .copied()
            .collect()
    }

    pub fn topological_order(&self) -> &[TaskId] {
        &self.topo
    }

    pub fn shape(&self) -> GraphShape {
        self.shape
    }

    /// Content hash of the graph: task names and durations plus the edge
    /// list, independent of task ids and insertion order. Used as the
    /// schedule-cache key.
    pub fn fingerprint(&self) -> String {
        let mut task_lines: Vec<(&str, u64)> = self
            .tasks
            .values()
            .map(|t| (t.name.as_str(), t.duration))
            .collect();
        task_lines.sort_unstable();

        let mut edge_lines: Vec<(&str, &str)> = Vec::new();
        for (pred, succs) in &self.successors {
            for succ in succs {
                edge_lines.push((self.tasks[pred].name.as_str(), self.tasks[succ].name.as_str()));
            }
        }
        edge_lines.sort_unstable();

        let mut hasher = Sha256::new();
        for (name, duration) in task_lines {
            hasher.update(name.as_bytes());
            hasher.update([0u8]);
            hasher.update(duration.to_le_bytes());
        }
        hasher.update([1u8]);
        for (pred, succ) in edge_lines {
            hasher.update(pred.as_bytes());
            hasher.update([0u8]);
            hasher.update(succ.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }
}
