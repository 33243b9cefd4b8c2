use std::sync::Arc;

use crate::{
    config::GroupConfig,
    observer::FaultObserverRef,
    subscribers::Subscribe,
};

use super::task_group::TaskGroup;

/// Builder for constructing a [`TaskGroup`] with optional observers.
pub struct TaskGroupBuilder {
    cfg: GroupConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
    observer: Option<FaultObserverRef>,
}

impl TaskGroupBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: GroupConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            observer: None,
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive group events (admission, unit outcomes, drain)
    /// through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Adds one event subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Sets the observer notified of every panic caught inside a unit.
    ///
    /// The same handle may be shared with other groups or with
    /// [`spawn_guarded`](crate::spawn_guarded).
    pub fn with_fault_observer(mut self, observer: FaultObserverRef) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Builds the group.
    ///
    /// With at least one subscriber this spawns the event listener and therefore
    /// must be called from within a Tokio runtime.
    pub fn build(self) -> TaskGroup {
        TaskGroup::from_parts(self.cfg, self.subscribers, self.observer)
    }
}
