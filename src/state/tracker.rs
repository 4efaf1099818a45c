//! Crawl completion detection by outstanding-task reference counting

/// Counts crawl tasks from spawn to their terminal transition
///
/// The crawl is complete exactly when every spawned task (the seed
/// included) has finished.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompletionTracker {
    spawned: usize,
    finished: usize,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a task spawn
    pub fn task_spawned(&mut self) {
        self.spawned += 1;
    }

    /// Records a task reaching a terminal state
    pub fn task_finished(&mut self) {
        debug_assert!(
            self.finished < self.spawned,
            "task finished without a matching spawn"
        );
        self.finished += 1;
    }

    /// Number of tasks spawned but not yet finished
    pub fn outstanding(&self) -> usize {
        self.spawned - self.finished
    }

    /// Total number of tasks spawned so far
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    /// True when no task is outstanding
    pub fn is_complete(&self) -> bool {
        self.outstanding() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_is_complete() {
        let tracker = CompletionTracker::new();
        assert!(tracker.is_complete());
        assert_eq!(tracker.outstanding(), 0);
    }

    #[test]
    fn test_counts_outstanding_tasks() {
        let mut tracker = CompletionTracker::new();
        tracker.task_spawned();
        tracker.task_spawned();
        assert_eq!(tracker.outstanding(), 2);
        assert!(!tracker.is_complete());

        tracker.task_finished();
        assert_eq!(tracker.outstanding(), 1);

        // A finishing task spawns a child before it is counted as done
        tracker.task_spawned();
        tracker.task_finished();
        assert_eq!(tracker.outstanding(), 1);

        tracker.task_finished();
        assert!(tracker.is_complete());
        assert_eq!(tracker.spawned(), 3);
    }
}
