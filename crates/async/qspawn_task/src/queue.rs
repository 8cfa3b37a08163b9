use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// 延迟执行的任务,只会在主线程上被执行一次
///
/// 参数是主线程独占的上下文(玩家/世界状态),任务只能通过它修改共享状态。
pub type PendingTask<C> = Box<dyn FnOnce(&mut C) + Send + 'static>;

/// 主线程任务队列
///
/// 任意线程通过 [`QueueSender`] 投递任务,主线程在每个 tick 结束时调用
/// [`MainThreadQueue::drain_all`] 执行。队列本身不可克隆,持有它的一方就是唯一的消费者。
pub struct MainThreadQueue<C> {
    api: UnboundedSender<PendingTask<C>>,
    receiver: UnboundedReceiver<PendingTask<C>>,
}

/// 投递端,可在线程间随意克隆
pub struct QueueSender<C> {
    api: UnboundedSender<PendingTask<C>>,
}

impl<C> Clone for QueueSender<C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<C> std::fmt::Debug for QueueSender<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueSender")
            .field("closed", &self.api.is_closed())
            .finish()
    }
}

impl<C> QueueSender<C> {
    /// 投递任务,不阻塞也不返回错误
    pub fn enqueue<F>(&self, task: F)
    where
        F: FnOnce(&mut C) + Send + 'static,
    {
        self.enqueue_boxed(Box::new(task));
    }

    pub fn enqueue_boxed(&self, task: PendingTask<C>) {
        // 只有队列已被销毁(服务器关闭)时才会失败
        if self.api.send(task).is_err() {
            log::warn!("[主线程队列] 队列已关闭,任务被丢弃");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.api.is_closed()
    }
}

impl<C> MainThreadQueue<C> {
    pub fn new() -> Self {
        let (api, receiver) = unbounded_channel();
        Self { api, receiver }
    }

    pub fn sender(&self) -> QueueSender<C> {
        QueueSender {
            api: self.api.clone(),
        }
    }

    /// 执行当前已排队的全部任务(FIFO),返回执行数量
    ///
    /// 先取快照再执行:执行过程中新投递的任务留到下一个 tick。
    pub fn drain_all(&mut self, ctx: &mut C) -> usize {
        let mut snapshot = Vec::new();
        while let Ok(task) = self.receiver.try_recv() {
            snapshot.push(task);
        }
        let count = snapshot.len();
        for task in snapshot {
            task(ctx);
        }
        if count > 0 {
            log::trace!("[主线程队列] 本 tick 执行 {} 个任务", count);
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<C> Default for MainThreadQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for MainThreadQueue<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainThreadQueue")
            .field("empty", &self.receiver.is_empty())
            .finish()
    }
}
