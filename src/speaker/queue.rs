//! Main-thread task queue
//!
//! Scripting threads never touch the world or network directly; they hand
//! zero-argument units of work across a channel to the main simulation
//! thread, which drains the channel between ticks. Execution order is
//! enqueue order and the enqueuer never observes a result.

use std::sync::mpsc::{self, Receiver, Sender};

/// A deferred unit of work executed on the main simulation thread.
pub type MainThreadTask = Box<dyn FnOnce() + Send>;

/// Sink for deferred main-thread work.
pub trait MainThreadQueue: Send + Sync {
    /// Queue a task for later execution on the main thread.
    ///
    /// Fire-and-forget: tasks queued after the consumer is gone are
    /// silently discarded.
    fn enqueue(&self, task: MainThreadTask);
}

/// Create a connected task channel: producer half for scripting threads,
/// consumer half for the main thread.
pub fn task_channel() -> (TaskChannel, TaskRunner) {
    let (sender, receiver) = mpsc::channel();
    (TaskChannel { sender }, TaskRunner { receiver })
}

/// Producer half of the task channel. Cheap to clone; one per enqueuer.
#[derive(Clone)]
pub struct TaskChannel {
    sender: Sender<MainThreadTask>,
}

impl MainThreadQueue for TaskChannel {
    fn enqueue(&self, task: MainThreadTask) {
        // A closed channel means the main loop is gone; the task is dropped.
        if self.sender.send(task).is_err() {
            log::debug!("main-thread task dropped: consumer has shut down");
        }
    }
}

/// Consumer half of the task channel, owned by the main simulation thread.
pub struct TaskRunner {
    receiver: Receiver<MainThreadTask>,
}

impl TaskRunner {
    /// Run every task queued since the last drain, in enqueue order.
    ///
    /// Returns the number of tasks executed.
    pub fn run_pending(&self) -> usize {
        let mut executed = 0;
        while let Ok(task) = self.receiver.try_recv() {
            task();
            executed += 1;
        }
        executed
    }
}
