use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub type TaskId = Uuid;

/// Duration of a task in abstract scheduling ticks. The calendar layer maps
/// ticks to wall-clock time through [`TimeUnit`].
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minutes,
    Hours,
    #[default]
    Days,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minutes" | "minute" | "min" => Ok(TimeUnit::Minutes),
            "hours" | "hour" | "h" => Ok(TimeUnit::Hours),
            "days" | "day" | "d" => Ok(TimeUnit::Days),
            other => Err(format!("unknown time unit: {}", other)),
        }
    }
}

/// How the backward pass seeds latest-finish on terminal tasks.
///
/// `Normalized` anchors every terminal to the project horizon (the largest
/// earliest-finish in the graph), which is classic CPM. `Legacy` keeps the
/// seeding older releases used: a plain chain seeds terminals with their own
/// earliest-finish, while a graph containing any multi-predecessor task
/// seeds terminals with their own earliest-*start*. Under `Legacy` the float
/// of tasks feeding a busy terminal can go negative; the policy exists for
/// parity with previously published schedules, not because that arithmetic
/// is desirable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FloatPolicy {
    #[default]
    Normalized,
    Legacy,
}

impl fmt::Display for FloatPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FloatPolicy::Normalized => "normalized",
            FloatPolicy::Legacy => "legacy",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for FloatPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normalized" => Ok(FloatPolicy::Normalized),
            "legacy" => Ok(FloatPolicy::Legacy),
            other => Err(format!("unknown float policy: {}", other)),
        }
    }
}

/// Structural classification of a task graph. A graph is a `Dag` as soon as
/// any task has more than one predecessor; successor fan-out alone keeps it
/// a `Chain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphShape {
    Chain,
    Dag,
}

impl fmt::Display for GraphShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GraphShape::Chain => "chain",
            GraphShape::Dag => "dag",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub duration: Ticks,
}

impl Task {
    pub fn new(name: impl Into<String>, duration: Ticks) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration,
        }
    }

    pub fn with_id(id: TaskId, name: impl Into<String>, duration: Ticks) -> Self {
        Self {
            id,
            name: name.into(),
            duration,
        }
    }
}

/// Finish-to-start precedence: the successor cannot start before the
/// predecessor finishes. Edges carry no weight of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub predecessor: TaskId,
    pub successor: TaskId,
}

impl Dependency {
    pub fn new(predecessor: TaskId, successor: TaskId) -> Self {
        Self {
            predecessor,
            successor,
        }
    }
}
