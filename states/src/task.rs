//! Identity and cancellation for command tasks.
//!
//! Every flush of a command gets a fresh [`TaskId`]: the command's `TypeId` plus a
//! generation counter that only grows. The context remembers the newest generation
//! per command type and drops updates coming from any older one, so a slow response
//! can never overwrite the result of a newer request.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    command: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(command: TypeId, generation: u64) -> Self {
        Self {
            command,
            generation,
        }
    }

    /// `TypeId` of the command that spawned the task.
    pub fn command(&self) -> TypeId {
        self.command
    }

    /// Higher generations are newer dispatches of the same command.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_newer_than(&self, other: &Self) -> bool {
        self.command == other.command && self.generation > other.generation
    }
}

/// A running command task together with its cooperative cancellation token.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Signals the task to stop. The task observes this at its next await point.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}
