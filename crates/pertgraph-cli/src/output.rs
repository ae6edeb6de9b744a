use anyhow::Result;
use colored::Colorize;
use pertgraph_core::GraphShape;
use pertgraph_engine::{CalendarSchedule, ProjectSchedule};
use pertgraph_graph::TaskGraph;

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
    Table,
}

pub fn render_validation(
    format: OutputFormat,
    name: Option<&str>,
    graph: &TaskGraph,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "project": name,
                "tasks": graph.len(),
                "dependencies": graph.edge_count(),
                "shape": graph.shape(),
                "valid": true,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        _ => {
            println!(
                "{} {} ({} tasks, {} dependencies, {})",
                "valid".green().bold(),
                name.unwrap_or("project"),
                graph.len(),
                graph.edge_count(),
                shape_label(graph.shape()),
            );
        }
    }
    Ok(())
}

pub fn render_schedule(
    format: OutputFormat,
    name: Option<&str>,
    schedule: &ProjectSchedule,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(schedule)?);
        }
        OutputFormat::Table => print_table(schedule),
        OutputFormat::Pretty => {
            print_header(name, schedule);
            print_table(schedule);
            print_critical_path(schedule);
        }
    }
    Ok(())
}

pub fn render_calendar(
    format: OutputFormat,
    name: Option<&str>,
    calendar: &CalendarSchedule,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(calendar)?);
            return Ok(());
        }
        OutputFormat::Pretty => {
            println!(
                "{} {}  {} -> {}",
                "project".bold(),
                name.unwrap_or("(unnamed)"),
                calendar.project_start.format("%Y-%m-%d %H:%M"),
                calendar.project_finish.format("%Y-%m-%d %H:%M"),
            );
        }
        OutputFormat::Table => {}
    }

    let name_width = calendar
        .entries
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    println!(
        "{:<name_width$}  {:<16}  {:<16}  {:<16}  {:<16}",
        "TASK", "START", "FINISH", "LATEST START", "LATEST FINISH",
    );
    for entry in &calendar.entries {
        let line = format!(
            "{:<name_width$}  {:<16}  {:<16}  {:<16}  {:<16}",
            entry.name,
            entry.earliest_start.format("%Y-%m-%d %H:%M"),
            entry.earliest_finish.format("%Y-%m-%d %H:%M"),
            entry.latest_start.format("%Y-%m-%d %H:%M"),
            entry.latest_finish.format("%Y-%m-%d %H:%M"),
        );
        if entry.critical {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}

pub fn render_critical_path(format: OutputFormat, schedule: &ProjectSchedule) -> Result<()> {
    let names: Vec<&str> = schedule
        .critical_path_tasks()
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    match format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "critical_path": names,
                "horizon": schedule.horizon,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        _ => {
            println!("{}", names.join(" -> ").red().bold());
            println!("horizon: {} ticks", schedule.horizon);
        }
    }
    Ok(())
}

fn print_header(name: Option<&str>, schedule: &ProjectSchedule) {
    println!(
        "{} {}  policy={} shape={} horizon={}",
        "project".bold(),
        name.unwrap_or("(unnamed)"),
        schedule.policy,
        shape_label(schedule.shape),
        schedule.horizon,
    );
}

fn print_table(schedule: &ProjectSchedule) {
    let name_width = schedule
        .tasks()
        .iter()
        .map(|t| t.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!(
        "{:<name_width$}  {:>4}  {:>5}  {:>5}  {:>5}  {:>5}  {:>6}  {:>6}",
        "TASK", "DUR", "ES", "EF", "LS", "LF", "TFLOAT", "FFLOAT",
    );
    for task in schedule.tasks() {
        let line = format!(
            "{:<name_width$}  {:>4}  {:>5}  {:>5}  {:>5}  {:>5}  {:>6}  {:>6}",
            task.name,
            task.duration,
            task.earliest_start,
            task.earliest_finish,
            task.latest_start,
            task.latest_finish,
            task.total_float,
            task.free_float,
        );
        if task.critical {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
}

fn print_critical_path(schedule: &ProjectSchedule) {
    let names: Vec<&str> = schedule
        .critical_path_tasks()
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    println!("{} {}", "critical path:".bold(), names.join(" -> ").red());
}

fn shape_label(shape: GraphShape) -> &'static str {
    match shape {
        GraphShape::Chain => "simple chain",
        GraphShape::Dag => "complex graph",
    }
}
