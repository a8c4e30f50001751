//! # Frame Scheduler
//!
//! The host drives the viewer one animation frame at a time. Code that wants to run on
//! the next frame requests it through [`FrameScheduler`] and may cancel the request
//! before it fires. Nothing here blocks or sleeps: a request only records intent, and
//! the host dispatches whatever is due when it draws.
//!
//! [`FrameQueue`] is the scheduler used by the window host and by tests; it keeps
//! pending requests in order and hands them out with [`FrameQueue::take_due`].

/// Work that can be scheduled for the next animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameTask {
    /// One tick of the held-key movement loop
    Movement,
    /// A single redraw with the current camera
    Render,
}

/// Identifies a pending frame request so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Schedules work on the host's next animation frame.
pub trait FrameScheduler {
    /// Requests that `task` run on the next frame.
    fn request_frame(&mut self, task: FrameTask) -> FrameHandle;

    /// Cancels a pending request. Cancelling a request that already fired is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Ordered queue of pending frame requests.
///
/// Render requests are coalesced: while one is pending, further render requests return
/// its handle instead of queueing another redraw.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_handle: u64,
    pending: Vec<(FrameHandle, FrameTask)>,
}

impl FrameQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if any request is waiting for a frame.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of pending requests for a task.
    pub fn pending_count(&self, task: FrameTask) -> usize {
        self.pending
            .iter()
            .filter(|(_, pending_task)| *pending_task == task)
            .count()
    }

    /// Removes and returns every pending request, in request order.
    ///
    /// Requests made while the returned tasks run are queued for the following frame.
    pub fn take_due(&mut self) -> Vec<FrameTask> {
        self.pending.drain(..).map(|(_, task)| task).collect()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self, task: FrameTask) -> FrameHandle {
        if task == FrameTask::Render {
            if let Some((handle, _)) = self
                .pending
                .iter()
                .find(|(_, pending_task)| *pending_task == FrameTask::Render)
            {
                return *handle;
            }
        }

        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push((handle, task));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|(pending_handle, _)| *pending_handle != handle);
    }
}
