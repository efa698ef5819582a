//! Schedule quality metrics (KPIs).
//!
//! Computes load-balance indicators from a completed assignment.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Largest machine total |
//! | Total Load | Sum of all machine totals |
//! | Utilization | Machine total / makespan |
//! | Avg Utilization | Mean machine utilization |
//! | Imbalance | Makespan - smallest machine total |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::Serialize;

use crate::models::Assignment;

/// Assignment performance indicators.
///
/// All time values are in minutes.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleKpi {
    /// Makespan: largest machine total.
    pub makespan: u64,
    /// Sum of all machine totals.
    pub total_load: u64,
    /// Per-machine utilization, in first-appearance order.
    pub utilization_by_machine: Vec<(String, f64)>,
    /// Average machine utilization (0.0..=1.0).
    pub avg_utilization: f64,
    /// Makespan minus the lightest machine's total.
    pub imbalance: u64,
}

impl ScheduleKpi {
    /// Computes KPIs from an assignment.
    pub fn calculate(assignment: &Assignment) -> Self {
        let makespan = assignment.makespan();
        let total_load = assignment.total_load();

        let utilization_by_machine: Vec<(String, f64)> = if makespan == 0 {
            Vec::new()
        } else {
            assignment
                .machines()
                .iter()
                .map(|m| (m.machine.clone(), m.total as f64 / makespan as f64))
                .collect()
        };

        let avg_utilization = if utilization_by_machine.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_machine.iter().map(|(_, u)| u).sum();
            sum / utilization_by_machine.len() as f64
        };

        let min_load = assignment
            .machines()
            .iter()
            .map(|m| m.total)
            .min()
            .unwrap_or(0);

        Self {
            makespan,
            total_load,
            utilization_by_machine,
            avg_utilization,
            imbalance: makespan - min_load,
        }
    }

    /// Utilization of one machine, if it has jobs.
    pub fn utilization(&self, machine: &str) -> Option<f64> {
        self.utilization_by_machine
            .iter()
            .find(|(m, _)| m == machine)
            .map(|(_, u)| *u)
    }
}
