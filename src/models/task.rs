//! Task model.
//!
//! A task is a single unit of work with a fixed duration that must run
//! on one specific machine. The scheduler never moves a task to another
//! machine; it only decides the order in which tasks are grouped.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// A task bound to a machine.
///
/// Immutable once created. Construction validates that the machine label
/// is non-empty and the duration is positive, so every `Task` in a
/// scheduling run is well-formed.
///
/// # Time Representation
/// Durations are whole minutes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    id: String,
    duration: u32,
    machine: String,
}

/// Unchecked wire form; converted through [`Task::new`].
#[derive(Deserialize)]
struct RawTask {
    id: String,
    duration: u32,
    machine: String,
}

impl TryFrom<RawTask> for Task {
    type Error = ScheduleError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        Task::new(raw.id, raw.duration, raw.machine)
    }
}

impl Task {
    /// Creates a task.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidTask`] if `duration` is zero or `machine`
    /// is empty.
    pub fn new(
        id: impl Into<String>,
        duration: u32,
        machine: impl Into<String>,
    ) -> Result<Self, ScheduleError> {
        let id = id.into();
        let machine = machine.into();

        if duration == 0 {
            return Err(ScheduleError::InvalidTask {
                id,
                reason: "duration must be positive".into(),
            });
        }
        if machine.trim().is_empty() {
            return Err(ScheduleError::InvalidTask {
                id,
                reason: "machine must be non-empty".into(),
            });
        }

        Ok(Self {
            id,
            duration,
            machine,
        })
    }

    /// Task identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Processing duration (minutes).
    #[inline]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Machine this task must run on.
    pub fn machine(&self) -> &str {
        &self.machine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_new() {
        let task = Task::new("Mix", 10, "Mixer A").unwrap();
        assert_eq!(task.id(), "Mix");
        assert_eq!(task.duration(), 10);
        assert_eq!(task.machine(), "Mixer A");
    }

    #[test]
    fn test_task_zero_duration() {
        let err = Task::new("T1", 0, "M1").unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTask { ref id, .. } if id == "T1"));
    }

    #[test]
    fn test_task_empty_machine() {
        assert!(Task::new("T1", 5, "").is_err());
        assert!(Task::new("T1", 5, "   ").is_err());
    }

    #[test]
    fn test_task_serde() {
        let task = Task::new("T1", 7, "M1").unwrap();
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":"T1","duration":7,"machine":"M1"}"#);

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_task_deserialize_rejects_invalid() {
        let zero: Result<Task, _> =
            serde_json::from_str(r#"{"id":"T1","duration":0,"machine":"M1"}"#);
        assert!(zero.is_err());

        let no_machine: Result<Task, _> =
            serde_json::from_str(r#"{"id":"T1","duration":3,"machine":""}"#);
        assert!(no_machine.is_err());
    }
}
