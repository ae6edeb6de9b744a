use std::collections::{HashMap, HashSet};

use pertgraph_core::{Dependency, ProjectSource, Result, SchedulerError, Task, TaskId};

use crate::TaskGraph;

/// Mutable staging area for a [`TaskGraph`]. Endpoint existence, self-loops
/// and duplicate edges are rejected as they are added; acyclicity is checked
/// once in [`build`](TaskGraphBuilder::build).
#[derive(Debug, Default)]
pub struct TaskGraphBuilder {
    tasks: HashMap<TaskId, Task>,
    insertion: Vec<TaskId>,
    edges: Vec<Dependency>,
    edge_set: HashSet<(TaskId, TaskId)>,
}

impl TaskGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain a [`ProjectSource`] straight into a validated graph.
    pub fn from_source(source: &dyn ProjectSource) -> Result<TaskGraph> {
        let mut builder = Self::new();
        for task in source.tasks()? {
            builder.add_task(task)?;
        }
        for dep in source.dependencies()? {
            builder.add_dependency(dep.predecessor, dep.successor)?;
        }
        builder.build()
    }

    pub fn add_task(&mut self, task: Task) -> Result<&mut Self> {
        if self.tasks.contains_key(&task.id) {
            return Err(SchedulerError::DuplicateTask(task.name));
        }
        self.insertion.push(task.id);
        self.tasks.insert(task.id, task);
        Ok(self)
    }

    pub fn add_dependency(&mut self, predecessor: TaskId, successor: TaskId) -> Result<&mut Self> {
        let pred_name = self.task_name(predecessor)?;
        let succ_name = self.task_name(successor)?;
        if predecessor == successor {
            return Err(SchedulerError::SelfDependency(pred_name));
        }
        if !self.edge_set.insert((predecessor, successor)) {
            return Err(SchedulerError::DuplicateDependency(pred_name, succ_name));
        }
        self.edges.push(Dependency::new(predecessor, successor));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn build(self) -> Result<TaskGraph> {
        TaskGraph::assemble(self.tasks, self.insertion, self.edges)
    }

    fn task_name(&self, id: TaskId) -> Result<String> {
        self.tasks
            .get(&id)
            .map(|t| t.name.clone())
            .ok_or_else(|| SchedulerError::TaskNotFound(id.to_string()))
    }
}
