//! Tick-based timer tasks for the session: the 1-second income grant,
//! the randomized event roll, and one revert task per active event.
//!
//! Timers are plain data owned by the session rather than host callbacks,
//! so they run deterministically under test, can be cancelled one by one,
//! and are dropped with the session.

pub type TaskId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// Periodic passive-income grant (re-armed by the session).
    IncomeTick,
    /// Next random-event roll (re-armed by the session, Hard only).
    EventRoll,
    /// Automatic revert of one active event.
    EventRevert { event_id: u64 },
}

#[derive(Clone, Copy, Debug)]
pub struct Task {
    pub id: TaskId,
    pub due_at: u64,
    pub kind: TaskKind,
}

/// A monotonic tick clock with a queue of one-shot tasks.
pub struct Scheduler {
    now: u64,
    next_id: TaskId,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 1,
            tasks: Vec::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule_in(&mut self, delay_ticks: u64, kind: TaskKind) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            due_at: self.now + delay_ticks,
            kind,
        });
        id
    }

    /// Remove a pending task. Returns false if it already fired or was
    /// cancelled before. (Session teardown needs no explicit cancels; the
    /// queue drops with the session.)
    #[cfg(test)]
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() < before
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Advance the clock one tick and hand back every task now due,
    /// in (due time, creation) order.
    pub fn step(&mut self) -> Vec<Task> {
        self.now += 1;
        let now = self.now;
        let mut due: Vec<Task> = self.tasks.iter().filter(|t| t.due_at <= now).copied().collect();
        self.tasks.retain(|t| t.due_at > now);
        due.sort_by_key(|t| (t.due_at, t.id));
        due
    }
}
