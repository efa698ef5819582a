//! Tabular text rendering.
//!
//! `Display` for [`ScheduleResult`] prints one row per machine (jobs and
//! total) followed by the makespan. [`render_suite`] prints benchmark
//! rows as a size × strategy table of times, or of peak MiB when memory
//! was probed.
//!
//! Column widths count characters, not bytes, so non-ASCII labels line up.

use std::fmt::{self, Write as _};
use std::time::Duration;

use crate::bench::{BenchCell, SuiteRow};
use crate::models::ScheduleResult;
use crate::scheduler::ScheduleKpi;

impl fmt::Display for ScheduleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let machines = self.assignment().machines();
        let job_lists: Vec<String> = machines
            .iter()
            .map(|m| {
                m.jobs
                    .iter()
                    .map(|j| format!("{} ({})", j.task_id, j.duration))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect();

        let machine_w = machines
            .iter()
            .map(|m| m.machine.chars().count())
            .chain(["Machine".len()])
            .max()
            .unwrap_or(0);
        let jobs_w = job_lists
            .iter()
            .map(|jobs| jobs.chars().count())
            .chain(["Jobs".len()])
            .max()
            .unwrap_or(0);

        writeln!(f, "{:<machine_w$} | {:<jobs_w$} | Total", "Machine", "Jobs")?;
        writeln!(f, "{}", "-".repeat(machine_w + jobs_w + 11))?;
        for (m, jobs) in machines.iter().zip(&job_lists) {
            writeln!(f, "{:<machine_w$} | {:<jobs_w$} | {}", m.machine, jobs, m.total)?;
        }
        write!(f, "Makespan: {} minutes", self.makespan())
    }
}

/// One-line KPI summary.
pub fn render_kpi(kpi: &ScheduleKpi) -> String {
    format!(
        "makespan {} min, total load {} min, avg utilization {:.1}%, imbalance {} min",
        kpi.makespan,
        kpi.total_load,
        kpi.avg_utilization * 100.0,
        kpi.imbalance
    )
}

/// Renders benchmark rows as a fixed-width table.
///
/// Cells show peak MiB when the measurement carries a memory reading and
/// wall-clock time otherwise.
pub fn render_suite(rows: &[SuiteRow]) -> String {
    let mut out = String::new();
    let Some(first) = rows.first() else {
        return out;
    };

    let _ = write!(out, "{:>9}", "Task Size");
    for cell in &first.cells {
        let _ = write!(out, " | {:>16}", cell.strategy().name());
    }
    out.push('\n');
    out.push_str(&"-".repeat(9 + first.cells.len() * 19));
    out.push('\n');

    for row in rows {
        let _ = write!(out, "{:>9}", row.size);
        for cell in &row.cells {
            let text = match cell {
                BenchCell::Measured(m) => match m.peak_mib() {
                    Some(mib) => format!("{mib:.2} MiB"),
                    None => format_elapsed(m.elapsed),
                },
                BenchCell::Skipped { .. } => "skipped".to_string(),
            };
            let _ = write!(out, " | {text:>16}");
        }
        out.push('\n');
    }
    out
}

/// Formats a duration with a unit suited to its magnitude.
pub fn format_elapsed(elapsed: Duration) -> String {
    let nanos = elapsed.as_nanos();
    if nanos < 1_000 {
        format!("{nanos} ns")
    } else if nanos < 1_000_000 {
        format!("{:.2} µs", nanos as f64 / 1e3)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", nanos as f64 / 1e6)
    } else {
        format!("{:.2} s", elapsed.as_secs_f64())
    }
}
