use std::any::{Any, TypeId, type_name};

use flume::Sender;

use crate::{State, TaskId};

/// A state replacement travelling from a task back to the owning context.
pub(crate) struct Update {
    pub(crate) origin: Option<TaskId>,
    pub(crate) target: TypeId,
    pub(crate) target_name: &'static str,
    pub(crate) value: Box<dyn Any + Send>,
}

/// Sends whole-state replacements to the context. Applied on the next
/// [`crate::StateCtx::sync_computes`].
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    pub fn set<T: State>(&self, value: T) {
        self.send_update(None, value);
    }

    fn send_update<T: State>(&self, origin: Option<TaskId>, value: T) {
        let update = Update {
            origin,
            target: TypeId::of::<T>(),
            target_name: type_name::<T>(),
            value: Box::new(value),
        };
        if self.send.send(update).is_err() {
            log::warn!("state context dropped, discarding update for {}", type_name::<T>());
        }
    }
}

/// An [`Updater`] tagged with the task that owns it.
///
/// Updates sent through it are only applied while the task is still the newest
/// generation of its command.
#[derive(Clone)]
pub struct LatestOnlyUpdater {
    inner: Updater,
    task: TaskId,
}

impl LatestOnlyUpdater {
    pub(crate) fn new(inner: Updater, task: TaskId) -> Self {
        Self { inner, task }
    }

    pub fn task_id(&self) -> TaskId {
        self.task
    }

    pub fn set<T: State>(&self, value: T) {
        self.inner.send_update(Some(self.task), value);
    }
}
