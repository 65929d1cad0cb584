//! A deterministic task scheduler driven by the caller's clock.
//!
//! The engine registers repeating and one-shot tasks keyed by a task
//! tag; each `poll` returns every task due at or before the supplied
//! time, in due order. Repeating tasks catch up when the clock jumps
//! past several periods. Cancelled tasks never fire again.

/// Opaque handle identifying one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy)]
enum Repeat {
    Every(u64),
    Once,
}

#[derive(Debug, Clone, Copy)]
struct Task<K> {
    handle: TaskHandle,
    key: K,
    due_at: u64,
    repeat: Repeat,
}

#[derive(Debug)]
pub struct Scheduler<K> {
    tasks: Vec<Task<K>>,
    next_id: u64,
}

impl<K: Copy> Scheduler<K> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    fn insert(&mut self, key: K, due_at: u64, repeat: Repeat) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            handle,
            key,
            due_at,
            repeat,
        });
        handle
    }

    /// Schedules `key` to fire every `period_ms`, first at
    /// `now_ms + period_ms`.
    pub fn schedule_every(&mut self, key: K, now_ms: u64, period_ms: u64) -> TaskHandle {
        debug_assert!(period_ms > 0);
        self.insert(key, now_ms + period_ms, Repeat::Every(period_ms))
    }

    /// Schedules `key` to fire once at the absolute time `at_ms`.
    pub fn schedule_once(&mut self, key: K, at_ms: u64) -> TaskHandle {
        self.insert(key, at_ms, Repeat::Once)
    }

    /// Removes the task, returning whether it was still scheduled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.handle != handle);
        self.tasks.len() != before
    }

    /// Drops every scheduled task.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|task| task.handle == handle)
    }

    /// Advances and returns the earliest firing due at or before
    /// `now_ms`, or `None` once nothing is due. Dispatching through
    /// repeated calls lets a firing cancel or reschedule tasks and have
    /// that take effect for the remainder of the batch. A repeating
    /// task that fell several periods behind fires once per missed
    /// period.
    pub fn poll_next(&mut self, now_ms: u64) -> Option<K> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due_at <= now_ms)
            .min_by_key(|(_, task)| task.due_at)
            .map(|(idx, _)| idx)?;

        let key = self.tasks[idx].key;
        match self.tasks[idx].repeat {
            Repeat::Every(period) => self.tasks[idx].due_at += period,
            Repeat::Once => {
                self.tasks.remove(idx);
            }
        }
        Some(key)
    }

    /// Returns every firing due at or before `now_ms`, ordered by due
    /// time.
    pub fn poll(&mut self, now_ms: u64) -> Vec<K> {
        let mut due = Vec::new();
        while let Some(key) = self.poll_next(now_ms) {
            due.push(key);
        }
        due
    }
}

impl<K: Copy> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Key {
        A,
        B,
    }

    #[test]
    fn repeating_task_first_fires_one_period_in() {
        let mut sched = Scheduler::new();
        sched.schedule_every(Key::A, 0, 1_000);

        assert!(sched.poll(999).is_empty());
        assert_eq!(sched.poll(1_000), vec![Key::A]);
        // Not due again until the next period boundary.
        assert!(sched.poll(1_500).is_empty());
        assert_eq!(sched.poll(2_000), vec![Key::A]);
    }

    #[test]
    fn repeating_task_catches_up_after_clock_jump() {
        let mut sched = Scheduler::new();
        sched.schedule_every(Key::A, 0, 1_000);

        assert_eq!(sched.poll(3_500), vec![Key::A, Key::A, Key::A]);
        assert_eq!(sched.poll(4_000), vec![Key::A]);
    }

    #[test]
    fn one_shot_fires_exactly_once() {
        let mut sched = Scheduler::new();
        let handle = sched.schedule_once(Key::B, 500);

        assert_eq!(sched.poll(500), vec![Key::B]);
        assert!(!sched.is_scheduled(handle));
        assert!(sched.poll(10_000).is_empty());
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut sched = Scheduler::new();
        let handle = sched.schedule_every(Key::A, 0, 100);

        assert!(sched.cancel(handle));
        assert!(sched.poll(1_000).is_empty());
        // Second cancel reports the task gone.
        assert!(!sched.cancel(handle));
    }

    #[test]
    fn cancel_all_clears_every_task() {
        let mut sched = Scheduler::new();
        sched.schedule_every(Key::A, 0, 100);
        sched.schedule_once(Key::B, 50);

        sched.cancel_all();
        assert!(sched.poll(10_000).is_empty());
    }

    #[test]
    fn firings_come_back_in_due_order() {
        let mut sched = Scheduler::new();
        sched.schedule_every(Key::A, 0, 1_000);
        sched.schedule_once(Key::B, 1_500);

        assert_eq!(sched.poll(2_000), vec![Key::A, Key::B, Key::A]);
    }

    #[test]
    fn cancelling_mid_batch_stops_remaining_firings() {
        let mut sched = Scheduler::new();
        let a = sched.schedule_every(Key::A, 0, 100);
        sched.schedule_every(Key::B, 0, 1_000);

        // A clock jump leaves many A firings due; cancelling after the
        // first one must drop the rest of the batch.
        assert_eq!(sched.poll_next(1_000), Some(Key::A));
        sched.cancel(a);
        assert_eq!(sched.poll_next(1_000), Some(Key::B));
        assert_eq!(sched.poll_next(1_000), None);
    }

    #[test]
    fn handles_stay_distinct_across_reschedules() {
        let mut sched = Scheduler::new();
        let first = sched.schedule_every(Key::A, 0, 100);
        sched.cancel(first);
        let second = sched.schedule_every(Key::A, 0, 100);

        assert_ne!(first, second);
        assert!(sched.is_scheduled(second));
        assert!(!sched.is_scheduled(first));
    }
}
