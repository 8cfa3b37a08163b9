pub mod queue;

pub use queue::{MainThreadQueue, PendingTask, QueueSender};
