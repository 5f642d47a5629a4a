//! State container and command runtime shared by the Bizdesk UI and CLI.
//!
//! - [`State`]: any `Clone + Send` value stored by type in a [`StateCtx`].
//! - [`Command`]: async work spawned against a [`CommandSnapshot`] of all states.
//! - [`LatestOnlyUpdater`]: how commands publish results; updates from a
//!   superseded dispatch are dropped when the context syncs.

mod command;
mod ctx;
mod error;
mod snapshot;
mod state;
mod task;
mod time;
mod updater;

pub use command::{Command, CommandFuture};
pub use ctx::StateCtx;
pub use error::Error;
pub use snapshot::CommandSnapshot;
pub use state::State;
pub use task::{TaskHandle, TaskId};
pub use time::Time;
pub use updater::{LatestOnlyUpdater, Updater};

pub use tokio_util::sync::CancellationToken;
