use pertgraph_graph::TaskGraph;
use rayon::prelude::*;

use crate::{ProjectSchedule, Scheduler};

/// Schedule independent graphs in parallel. Results line up with the input
/// slice.
pub fn schedule_all(scheduler: &Scheduler, graphs: &[TaskGraph]) -> Vec<ProjectSchedule> {
    graphs
        .par_iter()
        .map(|graph| scheduler.schedule(graph))
        .collect()
}
