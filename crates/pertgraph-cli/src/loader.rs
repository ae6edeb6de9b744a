use std::collections::HashMap;
use std::fs;
use std::path::Path;

use pertgraph_core::{Dependency, ProjectSource, Result, SchedulerError, Task, TaskId, Ticks};
use pertgraph_graph::{TaskGraph, TaskGraphBuilder};
use serde::Deserialize;

/// On-disk project definition. Dependencies reference tasks by name; ids are
/// assigned when the file is resolved into a [`LoadedProject`].
#[derive(Debug, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub name: Option<String>,
    pub tasks: Vec<TaskEntry>,
    #[serde(default)]
    pub dependencies: Vec<DependencyEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TaskEntry {
    pub name: String,
    pub duration: Ticks,
}

#[derive(Debug, Deserialize)]
pub struct DependencyEntry {
    pub predecessor: String,
    pub successor: String,
}

/// Project with task names resolved to stable ids.
#[derive(Debug)]
pub struct LoadedProject {
    name: Option<String>,
    tasks: Vec<Task>,
    dependencies: Vec<Dependency>,
}

impl LoadedProject {
    /// Parse a `.json` or `.toml` project file, picked by extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let file: ProjectFile = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&raw)?,
            Some("toml") => {
                toml::from_str(&raw).map_err(|e| SchedulerError::InvalidProject(e.to_string()))?
            }
            _ => {
                return Err(SchedulerError::InvalidProject(format!(
                    "unsupported project file (expected .json or .toml): {}",
                    path.display()
                )))
            }
        };
        Self::resolve(file)
    }

    fn resolve(file: ProjectFile) -> Result<Self> {
        let mut ids: HashMap<String, TaskId> = HashMap::with_capacity(file.tasks.len());
        let mut tasks = Vec::with_capacity(file.tasks.len());
        for entry in file.tasks {
            let task = Task::new(entry.name.clone(), entry.duration);
            if ids.insert(entry.name.clone(), task.id).is_some() {
                return Err(SchedulerError::DuplicateTask(entry.name));
            }
            tasks.push(task);
        }

        let lookup = |name: &str| -> Result<TaskId> {
            ids.get(name)
                .copied()
                .ok_or_else(|| SchedulerError::TaskNotFound(name.to_string()))
        };
        let mut dependencies = Vec::with_capacity(file.dependencies.len());
        for entry in file.dependencies {
            dependencies.push(Dependency::new(
                lookup(&entry.predecessor)?,
                lookup(&entry.successor)?,
            ));
        }

        Ok(Self {
            name: file.name,
            tasks,
            dependencies,
        })
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    pub fn to_graph(&self) -> Result<TaskGraph> {
        TaskGraphBuilder::from_source(self)
    }
}

impl ProjectSource for LoadedProject {
    fn project_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn tasks(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn dependencies(&self) -> Result<Vec<Dependency>> {
        Ok(self.dependencies.clone())
    }
}
