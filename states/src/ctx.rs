use std::any::{TypeId, type_name};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use flume::{Receiver, Sender};
#[cfg(not(target_arch = "wasm32"))]
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::state::ErasedState;
use crate::updater::Update;
use crate::{
    Command, CommandSnapshot, Error, LatestOnlyUpdater, State, TaskHandle, TaskId, Updater,
};

/// Owner of all states and the command runtime.
///
/// The context lives on the UI thread. Commands are queued with
/// [`StateCtx::enqueue_command`], spawned by [`StateCtx::flush_commands`] and report
/// back through a channel drained by [`StateCtx::sync_computes`].
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn ErasedState>>,
    commands: BTreeMap<TypeId, (&'static str, Arc<dyn Command>)>,
    queue: Vec<TypeId>,
    running: BTreeMap<TypeId, TaskHandle>,
    generations: BTreeMap<TypeId, u64>,
    send: Sender<Update>,
    recv: Receiver<Update>,
    #[cfg(not(target_arch = "wasm32"))]
    tasks: JoinSet<()>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            commands: BTreeMap::new(),
            queue: Vec::new(),
            running: BTreeMap::new(),
            generations: BTreeMap::new(),
            send,
            recv,
            #[cfg(not(target_arch = "wasm32"))]
            tasks: JoinSet::new(),
        }
    }

    /// Registers `state`, replacing any previous value of the same type.
    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn record_command<C: Command>(&mut self, command: C) {
        self.commands
            .insert(TypeId::of::<C>(), (type_name::<C>(), Arc::new(command)));
    }

    pub fn has_state<T: State>(&self) -> bool {
        self.states.contains_key(&TypeId::of::<T>())
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found::<T>("state context"))
    }

    /// # Panics
    ///
    /// Panics if `T` was never registered with [`StateCtx::add_state`].
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// # Panics
    ///
    /// Panics if `T` was never registered with [`StateCtx::add_state`].
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.states
            .get_mut(&TypeId::of::<T>())
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("State not registered: {}", type_name::<T>()))
    }

    /// Mutates a state in place.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    /// An updater not tied to any task. Its updates are always applied.
    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    /// Queues `C` for the next [`StateCtx::flush_commands`]. Queuing the same
    /// command twice in one frame runs it once.
    pub fn enqueue_command<C: Command>(&mut self) {
        let id = TypeId::of::<C>();
        if !self.commands.contains_key(&id) {
            log::warn!("{}", Error::command_not_found::<C>());
            return;
        }
        if !self.queue.contains(&id) {
            self.queue.push(id);
        }
    }

    /// Queues and immediately flushes `C`.
    pub fn dispatch<C: Command>(&mut self) {
        self.enqueue_command::<C>();
        self.flush_commands();
    }

    /// Spawns every queued command against a fresh snapshot of all states.
    ///
    /// A command that is still running from a previous flush is cancelled and its
    /// later updates are discarded.
    pub fn flush_commands(&mut self) {
        let queued = std::mem::take(&mut self.queue);
        for command_id in queued {
            let Some((name, command)) = self.commands.get(&command_id).cloned() else {
                continue;
            };

            let generation = self.generations.entry(command_id).or_insert(0);
            *generation += 1;
            let task = TaskId::new(command_id, *generation);

            if let Some(previous) = self.running.remove(&command_id) {
                log::debug!(
                    "cancelling {name} generation {} in favour of {}",
                    previous.id().generation(),
                    task.generation()
                );
                previous.cancel();
            }

            let token = CancellationToken::new();
            self.running
                .insert(command_id, TaskHandle::new(task, token.clone()));

            let updater = LatestOnlyUpdater::new(self.updater(), task);
            let future = command.run(self.snapshot(), updater, token.clone());

            log::debug!("spawning {name} generation {}", task.generation());
            self.spawn(async move {
                tokio::select! {
                    () = token.cancelled() => {
                        log::debug!("{name} generation {} cancelled", task.generation());
                    }
                    () = future => {}
                }
            });
        }
    }

    /// Applies every pending update, dropping those from superseded tasks.
    pub fn sync_computes(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        while let Some(finished) = self.tasks.try_join_next() {
            if let Err(err) = finished
                && err.is_panic()
            {
                log::error!("command task panicked: {err}");
            }
        }

        let updates: Vec<Update> = self.recv.try_iter().collect();
        for update in updates {
            if let Some(origin) = update.origin {
                let latest = self
                    .generations
                    .get(&origin.command())
                    .copied()
                    .unwrap_or_default();
                if origin.generation() < latest {
                    log::debug!(
                        "dropping stale update for {} from generation {} (latest {latest})",
                        update.target_name,
                        origin.generation()
                    );
                    continue;
                }
            }

            match self.states.get_mut(&update.target) {
                Some(state) => {
                    if !state.assign_box(update.value) {
                        log::warn!("type mismatch while updating {}", state.type_name());
                    }
                }
                None => log::warn!("update for unregistered state {}", update.target_name),
            }
        }
    }

    /// Newest generation flushed for `C`, zero if it never ran.
    pub fn latest_generation<C: Command>(&self) -> u64 {
        self.generations
            .get(&TypeId::of::<C>())
            .copied()
            .unwrap_or_default()
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, state) in &self.states {
            snap.insert_cloned(*id, state.clone_boxed());
        }
        snap
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn(&mut self, future: impl Future<Output = ()> + Send + 'static) {
        self.tasks.spawn(future);
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn(&mut self, future: impl Future<Output = ()> + Send + 'static) {
        wasm_bindgen_futures::spawn_local(future);
    }

    /// Number of spawned tasks that have not been reaped yet.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Waits for every spawned task and applies their updates.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn wait_idle(&mut self) {
        self.sync_computes();
        while let Some(finished) = self.tasks.join_next().await {
            if let Err(err) = finished
                && err.is_panic()
            {
                log::error!("command task panicked: {err}");
            }
            self.sync_computes();
        }
        self.sync_computes();
    }

    /// Cancels everything still running.
    pub async fn shutdown(&mut self) {
        for handle in self.running.values() {
            handle.cancel();
        }
        self.running.clear();
        #[cfg(not(target_arch = "wasm32"))]
        self.tasks.shutdown().await;
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::CommandFuture;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Query(String);

    impl State for Query {}

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Echo(Option<String>);

    impl State for Echo {}

    /// Echoes `Query` into `Echo`, sleeping longer for shorter queries so an old
    /// request can finish after a newer one.
    struct EchoCommand;

    impl Command for EchoCommand {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: LatestOnlyUpdater,
            _cancel: CancellationToken,
        ) -> CommandFuture {
            let query = snap.state::<Query>().0.clone();
            Box::pin(async move {
                let delay = 50_u64.saturating_sub(query.len() as u64 * 10);
                tokio::time::sleep(Duration::from_millis(delay)).await;
                updater.set(Echo(Some(query)));
            })
        }
    }

    fn ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(Query::default());
        ctx.add_state(Echo::default());
        ctx.record_command(EchoCommand);
        ctx
    }

    #[test]
    fn update_mutates_in_place() {
        let mut ctx = ctx();
        ctx.update::<Query>(|q| q.0 = "abc".to_owned());
        assert_eq!(ctx.state::<Query>(), &Query("abc".to_owned()));
    }

    #[test]
    fn updater_set_applies_on_sync() {
        let mut ctx = ctx();
        ctx.updater().set(Echo(Some("direct".to_owned())));
        assert_eq!(ctx.state::<Echo>(), &Echo(None));

        ctx.sync_computes();
        assert_eq!(ctx.state::<Echo>(), &Echo(Some("direct".to_owned())));
    }

    #[test]
    fn unknown_state_reports_error() {
        #[derive(Clone)]
        struct Missing;
        impl State for Missing {}

        let ctx = ctx();
        assert!(ctx.try_state::<Missing>().is_err());
        assert!(!ctx.has_state::<Missing>());
    }

    #[tokio::test]
    async fn dispatch_runs_command_against_snapshot() {
        let mut ctx = ctx();
        ctx.update::<Query>(|q| q.0 = "hello".to_owned());
        ctx.dispatch::<EchoCommand>();

        // Mutating after dispatch must not leak into the running command.
        ctx.update::<Query>(|q| q.0 = "changed".to_owned());
        ctx.wait_idle().await;

        assert_eq!(ctx.state::<Echo>(), &Echo(Some("hello".to_owned())));
        assert_eq!(ctx.latest_generation::<EchoCommand>(), 1);
    }

    #[tokio::test]
    async fn superseded_dispatch_never_overwrites_newer_result() {
        let mut ctx = ctx();

        // Slow request first.
        ctx.update::<Query>(|q| q.0 = "a".to_owned());
        ctx.dispatch::<EchoCommand>();

        // Fast request second.
        ctx.update::<Query>(|q| q.0 = "abcd".to_owned());
        ctx.dispatch::<EchoCommand>();

        ctx.wait_idle().await;

        assert_eq!(ctx.state::<Echo>(), &Echo(Some("abcd".to_owned())));
        assert_eq!(ctx.latest_generation::<EchoCommand>(), 2);
    }

    #[tokio::test]
    async fn enqueue_twice_in_one_frame_runs_once() {
        let mut ctx = ctx();
        ctx.enqueue_command::<EchoCommand>();
        ctx.enqueue_command::<EchoCommand>();
        ctx.flush_commands();

        assert_eq!(ctx.task_count(), 1);
        ctx.wait_idle().await;
        assert_eq!(ctx.task_count(), 0);
    }

    #[tokio::test]
    async fn unregistered_command_is_ignored() {
        struct Unregistered;
        impl Command for Unregistered {
            fn run(
                &self,
                _snap: CommandSnapshot,
                _updater: LatestOnlyUpdater,
                _cancel: CancellationToken,
            ) -> CommandFuture {
                Box::pin(async {})
            }
        }

        let mut ctx = ctx();
        ctx.dispatch::<Unregistered>();
        assert_eq!(ctx.task_count(), 0);
        assert_eq!(ctx.latest_generation::<Unregistered>(), 0);
    }
}
