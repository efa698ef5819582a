//! Assignment (solution) model.
//!
//! An assignment groups tasks by their machine, keeping each machine's
//! job order and total load. Machines appear in the order they were
//! first encountered in the input sequence.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::Serialize;
use std::collections::HashMap;

use super::Task;

/// A job placed on a machine: the task ID and its duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    /// Source task ID.
    pub task_id: String,
    /// Duration (minutes).
    pub duration: u32,
}

/// The ordered jobs of one machine and their summed duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineLoad {
    /// Machine label.
    pub machine: String,
    /// Jobs in execution order.
    pub jobs: Vec<Job>,
    /// Sum of job durations (minutes).
    pub total: u64,
}

impl MachineLoad {
    fn new(machine: &str) -> Self {
        Self {
            machine: machine.to_string(),
            jobs: Vec::new(),
            total: 0,
        }
    }

    fn push(&mut self, task: &Task) {
        self.jobs.push(Job {
            task_id: task.id().to_string(),
            duration: task.duration(),
        });
        self.total += u64::from(task.duration());
    }

    /// Number of jobs on this machine.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}

/// Mapping from machine to its job list and total duration.
///
/// Every task of the source sequence appears in exactly one machine's
/// job list. Each assignment owns its job lists outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Assignment {
    machines: Vec<MachineLoad>,
}

impl Assignment {
    /// Groups tasks by machine in the given order.
    ///
    /// Within-machine job order follows the input order; machines are
    /// listed by first appearance. An empty sequence yields an empty
    /// assignment.
    ///
    /// # Complexity
    /// O(n) in the number of tasks.
    pub fn build<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut machines: Vec<MachineLoad> = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::new();

        for task in tasks {
            let slot = *index.entry(task.machine()).or_insert_with(|| {
                machines.push(MachineLoad::new(task.machine()));
                machines.len() - 1
            });
            machines[slot].push(task);
        }

        Self { machines }
    }

    /// Makespan: largest machine total (minutes).
    ///
    /// An assignment with no machines has makespan 0.
    pub fn makespan(&self) -> u64 {
        self.machines.iter().map(|m| m.total).max().unwrap_or(0)
    }

    /// Machine loads in first-appearance order.
    pub fn machines(&self) -> &[MachineLoad] {
        &self.machines
    }

    /// Finds the load for a machine.
    pub fn machine(&self, machine: &str) -> Option<&MachineLoad> {
        self.machines.iter().find(|m| m.machine == machine)
    }

    /// Number of machines with at least one job.
    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    /// Number of jobs across all machines.
    pub fn job_count(&self) -> usize {
        self.machines.iter().map(MachineLoad::job_count).sum()
    }

    /// Sum of all machine totals (minutes).
    pub fn total_load(&self) -> u64 {
        self.machines.iter().map(|m| m.total).sum()
    }

    /// Whether no task was assigned.
    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

/// A strategy's output: the assignment and its makespan.
///
/// The makespan is always derived from the assignment it is paired with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleResult {
    assignment: Assignment,
    makespan: u64,
}

impl ScheduleResult {
    /// Wraps an assignment, evaluating its makespan.
    pub fn new(assignment: Assignment) -> Self {
        let makespan = assignment.makespan();
        Self {
            assignment,
            makespan,
        }
    }

    /// The per-machine assignment.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Makespan of the assignment (minutes).
    #[inline]
    pub fn makespan(&self) -> u64 {
        self.makespan
    }

    /// Consumes the result, returning the assignment.
    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }
}

impl From<Assignment> for ScheduleResult {
    fn from(assignment: Assignment) -> Self {
        Self::new(assignment)
    }
}
