use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Duplicate task: {0}")]
    DuplicateTask(String),

    #[error("Task cannot depend on itself: {0}")]
    SelfDependency(String),

    #[error("Duplicate dependency: {0} -> {1}")]
    DuplicateDependency(String, String),

    #[error("Cyclic schedule: {}", .cycle.join(" -> "))]
    CyclicSchedule { cycle: Vec<String> },

    #[error("Project has no tasks")]
    EmptyProject,

    #[error("Invalid project: {0}")]
    InvalidProject(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
