use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, LatestOnlyUpdater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A manually dispatched action that may perform IO.
///
/// Commands never touch the context directly: they read a [`CommandSnapshot`]
/// and publish results through the [`LatestOnlyUpdater`]. Dispatching the same
/// command again cancels `cancel` for the previous run.
pub trait Command: Send + Sync + 'static {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture;
}
