//! Scheduling domain models.
//!
//! Provides the data types shared by every strategy: machine-bound
//! tasks, the per-machine assignment they are grouped into, and the
//! schedule result a strategy returns.
//!
//! # Domain Mappings
//!
//! | u-makespan | Manufacturing | Bakery | Compute |
//! |------------|--------------|--------|---------|
//! | Task | Operation | Bake Bread | Batch job |
//! | Machine | Workstation | Oven B | Host |
//! | Assignment | Shift plan | Production run | Placement |

mod schedule;
mod task;

pub use schedule::{Assignment, Job, MachineLoad, ScheduleResult};
pub use task::Task;
