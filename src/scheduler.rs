//! Cancelable deferred work and the single animation-frame slot.
//!
//! Nothing here sleeps: the host polls with the current time and gets back the
//! tasks that are due. Cancelled handles simply never come back.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

#[derive(Debug)]
struct Scheduled<T> {
    handle: TaskHandle,
    due_at: f64,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    timers: Vec<Scheduled<T>>,
    frame: Option<FrameId>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            timers: Vec::new(),
            frame: None,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn schedule(&mut self, due_at: f64, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id());
        self.timers.push(Scheduled { handle, due_at, task });
        handle
    }

    /// Returns false if the task already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|s| s.handle != handle);
        self.timers.len() != before
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.timers.iter().any(|s| s.handle == handle)
    }

    /// Removes and returns the tasks due at `now`, earliest first. Ties keep
    /// scheduling order.
    pub fn drain_due(&mut self, now: f64) -> Vec<(TaskHandle, T)> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].due_at <= now {
                due.push(self.timers.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due_at.total_cmp(&b.due_at));
        due.into_iter().map(|s| (s.handle, s.task)).collect()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Requests the next animation frame, replacing any request still pending.
    pub fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_id());
        self.frame = Some(id);
        id
    }

    pub fn cancel_frame(&mut self) -> Option<FrameId> {
        self.frame.take()
    }

    /// Consumes the pending frame request so its callback can run.
    pub fn take_frame(&mut self) -> Option<FrameId> {
        self.frame.take()
    }

    pub fn frame_pending(&self) -> bool {
        self.frame.is_some()
    }

    /// Drops all timers and the pending frame.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.frame = None;
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
